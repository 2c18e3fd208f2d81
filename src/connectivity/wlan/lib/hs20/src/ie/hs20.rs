// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Hotspot 2.0 vendor-specific elements carried in beacons, probe responses and association
//! requests (Hotspot 2.0 Specification, 3.1 and 3.2).

use {
    super::{write_vendor_ie, VendorHeader},
    crate::{
        appendable::Appendable, buffer_reader::BufferReader, error::Error, organization::Oui,
    },
    bitfield::bitfield,
};

pub const INDICATION_OUI_TYPE: u8 = 0x10;
pub const ANQP_OUI_TYPE: u8 = 0x11;
pub const ROAMING_CONS_SEL_OUI_TYPE: u8 = 0x1d;

pub const INDICATION: VendorHeader = VendorHeader::new(Oui::WFA, INDICATION_OUI_TYPE);
pub const ROAMING_CONS_SEL: VendorHeader = VendorHeader::new(Oui::WFA, ROAMING_CONS_SEL_OUI_TYPE);

/// Release supported by this station, encoded like the Version Number field: the high nibble is
/// the release number minus one.
pub const HS20_VERSION: u8 = 0x20;

bitfield! {
    /// Hotspot Configuration octet of the HS2.0 Indication element.
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct Hs20Conf(u8);
    impl Debug;
    pub dgaf_disabled, set_dgaf_disabled: 0;
    pub pps_mo_id_present, set_pps_mo_id_present: 1;
    pub anqp_domain_id_present, set_anqp_domain_id_present: 2;
    // Bit 3 reserved.
    pub u8, version_number, set_version_number: 7, 4;
}

impl Hs20Conf {
    pub fn release(&self) -> u8 {
        self.version_number() + 1
    }
}

/// A decoded HS2.0 Indication element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hs20Indication {
    pub conf: Hs20Conf,
    pub pps_mo_id: Option<u16>,
    pub anqp_domain_id: Option<u16>,
}

impl Hs20Indication {
    /// Parses an element body, vendor header included. Returns `None` if the body is shorter than
    /// the fields its configuration octet announces.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let mut reader = BufferReader::new(body);
        let vendor = reader.read::<VendorHeader>()?;
        if *vendor != INDICATION {
            return None;
        }
        let conf = Hs20Conf(reader.read_u8()?);
        let pps_mo_id = match conf.pps_mo_id_present() {
            true => Some(reader.read_le16()?),
            false => None,
        };
        let anqp_domain_id = match conf.anqp_domain_id_present() {
            true => Some(reader.read_le16()?),
            false => None,
        };
        Some(Self { conf, pps_mo_id, anqp_domain_id })
    }
}

/// Release to advertise towards an AP: the local release, capped at the AP's release when the AP
/// advertised one.
pub fn negotiated_release(hs20_version: u8, ap_release: u8) -> u8 {
    let local = (hs20_version >> 4) + 1;
    if ap_release > 0 && local > ap_release {
        ap_release
    } else {
        local
    }
}

/// Writes the HS2.0 Indication element. The PPS MO ID is dropped when the negotiated release is
/// below 2, which has no such field.
pub fn write_indication_ie<A: Appendable>(
    buf: &mut A,
    hs20_version: u8,
    pps_mo_id: Option<u16>,
    ap_release: u8,
) -> Result<(), Error> {
    let release = negotiated_release(hs20_version, ap_release);
    let pps_mo_id = if release < 2 { None } else { pps_mo_id };

    let mut conf = Hs20Conf(0);
    conf.set_version_number(release - 1);
    conf.set_pps_mo_id_present(pps_mo_id.is_some());

    let mut body = vec![conf.0];
    if let Some(id) = pps_mo_id {
        body.extend_from_slice(&id.to_le_bytes());
    }
    write_vendor_ie(buf, INDICATION, &body[..])
}

pub fn build_indication_ie(pps_mo_id: Option<u16>, ap_release: u8) -> Vec<u8> {
    let mut buf: Vec<u8> = vec![];
    // The body is at most three octets, so this cannot exceed the element size limit.
    if let Err(e) = write_indication_ie(&mut buf, HS20_VERSION, pps_mo_id, ap_release) {
        log::error!("failed to write HS2.0 indication element: {}", e);
    }
    buf
}

/// Writes the Roaming Consortium Selection element. Nothing is written when there is no
/// selection.
pub fn write_roaming_cons_sel_ie<A: Appendable>(
    buf: &mut A,
    selection: Option<&[u8]>,
) -> Result<(), Error> {
    match selection {
        Some(selection) if !selection.is_empty() => {
            write_vendor_ie(buf, ROAMING_CONS_SEL, selection)
        }
        _ => Ok(()),
    }
}

pub fn build_roaming_cons_sel_ie(selection: Option<&[u8]>) -> Result<Vec<u8>, Error> {
    let mut buf: Vec<u8> = vec![];
    write_roaming_cons_sel_ie(&mut buf, selection)?;
    Ok(buf)
}
