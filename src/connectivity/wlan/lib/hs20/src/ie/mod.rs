// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

pub mod hs20;
mod reader;

pub use reader::Reader;

use {
    crate::{appendable::Appendable, error::Error, organization::Oui},
    std::mem::size_of,
    zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned},
};

pub const IE_MAX_LEN: usize = 255;

#[repr(C)]
#[derive(AsBytes, FromZeroes, FromBytes, Unaligned, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Id(pub u8);

// IEEE Std 802.11-2016, 9.4.2.1, Table 9-77
impl Id {
    pub const SSID: Self = Self(0);
    pub const ADVERTISEMENT_PROTOCOL: Self = Self(108);
    pub const EXT_CAPABILITIES: Self = Self(127);
    pub const VENDOR_SPECIFIC: Self = Self(221);
}

#[repr(C)]
#[derive(AsBytes, FromZeroes, FromBytes, Unaligned, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Header {
    pub id: Id,
    pub body_len: u8,
}

/// OUI and OUI type that open the body of a vendor-specific element.
#[repr(C)]
#[derive(AsBytes, FromZeroes, FromBytes, Unaligned, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VendorHeader {
    pub oui: Oui,
    pub oui_type: u8,
}

impl VendorHeader {
    pub const LEN: usize = size_of::<VendorHeader>();

    pub const fn new(oui: Oui, oui_type: u8) -> Self {
        Self { oui, oui_type }
    }
}

// IEEE Std 802.11-2016, 9.4.2.27, Table 9-135
pub mod ext_cap {
    pub const PROXY_ARP: usize = 12;
    pub const INTERWORKING: usize = 31;
}

/// Returns the body of the first element with the given ID.
pub fn find(ies: &[u8], id: Id) -> Option<&[u8]> {
    Reader::new(ies).find(|(ie_id, _)| *ie_id == id).map(|(_, body)| body)
}

/// Returns the full body, vendor header included, of the first vendor-specific element that
/// carries the given OUI and OUI type.
pub fn find_vendor(ies: &[u8], vendor: VendorHeader) -> Option<&[u8]> {
    Reader::new(ies)
        .filter(|(id, _)| *id == Id::VENDOR_SPECIFIC)
        .map(|(_, body)| body)
        .find(|body| body.get(..VendorHeader::LEN) == Some(vendor.as_bytes()))
}

/// Tests a capability bit of an Extended Capabilities element body. Bits beyond the end of the
/// body read as unset.
pub fn ext_capability(body: &[u8], bit: usize) -> bool {
    body.get(bit / 8).map_or(false, |octet| octet & (1 << (bit % 8)) != 0)
}

pub fn write_vendor_ie<A: Appendable>(
    buf: &mut A,
    vendor: VendorHeader,
    body: &[u8],
) -> Result<(), Error> {
    let body_len = VendorHeader::LEN + body.len();
    if body_len > IE_MAX_LEN {
        return Err(Error::ElementTooLong(body_len));
    }
    if !buf.can_append(size_of::<Header>() + body_len) {
        return Err(Error::BufferTooSmall);
    }
    buf.append_value(&Header { id: Id::VENDOR_SPECIFIC, body_len: body_len as u8 })?;
    buf.append_value(&vendor)?;
    buf.append_bytes(body)?;
    Ok(())
}
