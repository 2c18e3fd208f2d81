// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Hotspot 2.0 ANQP elements (Hotspot 2.0 Specification, 4).

pub mod gas;
mod reader;
mod writer;

pub use {
    reader::{hs20_payload, AnqpElementReader},
    writer::{build_anqp_query, put_anqp_query},
};

use {
    crate::{
        buffer_reader::BufferReader,
        error::Error,
        ie::{hs20, VendorHeader},
        mac::{MacAddr, MacFmt},
        organization::Oui,
        sink::{Hs20Event, InfoSink},
    },
    bitfield::bitfield,
    log::{debug, info},
    std::fmt,
    zerocopy::{
        byteorder::{LittleEndian, U16, U32},
        AsBytes, FromBytes, FromZeroes, Unaligned,
    },
};

pub const ANQP: VendorHeader = VendorHeader::new(Oui::WFA, hs20::ANQP_OUI_TYPE);

/// ANQP Info ID, IEEE Std 802.11-2016, 9.4.5.1, Table 9-271
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct InfoId(pub u16);

impl InfoId {
    pub const QUERY_LIST: Self = Self(256);
    pub const CAPABILITY_LIST: Self = Self(257);
    pub const VENUE_NAME: Self = Self(258);
    pub const NETWORK_AUTH_TYPE: Self = Self(260);
    pub const ROAMING_CONSORTIUM: Self = Self(261);
    pub const NAI_REALM: Self = Self(263);
    pub const DOMAIN_NAME: Self = Self(268);
    pub const VENDOR_SPECIFIC: Self = Self(56797);
}

/// HS2.0 ANQP element subtype.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Subtype(pub u8);

impl Subtype {
    // 0 Reserved
    pub const QUERY_LIST: Self = Self(1);
    pub const CAPABILITY_LIST: Self = Self(2);
    pub const OPERATOR_FRIENDLY_NAME: Self = Self(3);
    pub const WAN_METRICS: Self = Self(4);
    pub const CONNECTION_CAPABILITY: Self = Self(5);
    pub const NAI_HOME_REALM_QUERY: Self = Self(6);
    pub const OPERATING_CLASS: Self = Self(7);
    pub const OSU_PROVIDERS_LIST: Self = Self(8);
    pub const ICON_REQUEST: Self = Self(10);
    pub const ICON_BINARY_FILE: Self = Self(11);
    pub const OPERATOR_ICON_METADATA: Self = Self(12);
    pub const OSU_PROVIDERS_NAI_LIST: Self = Self(13);

    /// Position of this subtype in a query bitmap. Subtypes above 31 cannot be queried.
    pub fn bit(self) -> u32 {
        1u32.checked_shl(self.0 as u32).unwrap_or(0)
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::QUERY_LIST => "HS Query List",
            Self::CAPABILITY_LIST => "HS Capability List",
            Self::OPERATOR_FRIENDLY_NAME => "Operator Friendly Name",
            Self::WAN_METRICS => "WAN Metrics",
            Self::CONNECTION_CAPABILITY => "Connection Capability",
            Self::NAI_HOME_REALM_QUERY => "NAI Home Realm Query",
            Self::OPERATING_CLASS => "Operating Class",
            Self::OSU_PROVIDERS_LIST => "OSU Providers List",
            Self::ICON_REQUEST => "Icon Request",
            Self::ICON_BINARY_FILE => "Icon Binary File",
            Self::OPERATOR_ICON_METADATA => "Operator Icon Metadata",
            Self::OSU_PROVIDERS_NAI_LIST => "OSU Providers NAI List",
            Self(other) => return write!(f, "subtype {}", other),
        };
        f.write_str(name)
    }
}

/// HS2.0 ANQP elements received for one BSS. Each response replaces the element it carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnqpElementStore {
    pub capability_list: Option<Vec<u8>>,
    pub operator_friendly_name: Option<Vec<u8>>,
    pub wan_metrics: Option<Vec<u8>>,
    pub connection_capability: Option<Vec<u8>>,
    pub operating_class: Option<Vec<u8>>,
}

impl AnqpElementStore {
    fn slot_mut(&mut self, subtype: Subtype) -> Option<&mut Option<Vec<u8>>> {
        match subtype {
            Subtype::CAPABILITY_LIST => Some(&mut self.capability_list),
            Subtype::OPERATOR_FRIENDLY_NAME => Some(&mut self.operator_friendly_name),
            Subtype::WAN_METRICS => Some(&mut self.wan_metrics),
            Subtype::CONNECTION_CAPABILITY => Some(&mut self.connection_capability),
            Subtype::OPERATING_CLASS => Some(&mut self.operating_class),
            _ => None,
        }
    }

    pub fn get(&self, subtype: Subtype) -> Option<&[u8]> {
        let slot = match subtype {
            Subtype::CAPABILITY_LIST => &self.capability_list,
            Subtype::OPERATOR_FRIENDLY_NAME => &self.operator_friendly_name,
            Subtype::WAN_METRICS => &self.wan_metrics,
            Subtype::CONNECTION_CAPABILITY => &self.connection_capability,
            Subtype::OPERATING_CLASS => &self.operating_class,
            _ => return None,
        };
        slot.as_deref()
    }

    /// Replaces the stored element for `subtype`. Returns false for subtypes that are not kept.
    pub fn set(&mut self, subtype: Subtype, value: &[u8]) -> bool {
        match self.slot_mut(subtype) {
            Some(slot) => {
                *slot = Some(value.to_vec());
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

bitfield! {
    /// WAN Info field of the WAN Metrics element.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct WanInfo(u8);
    impl Debug;
    pub u8, link_status, set_link_status: 1, 0;
    pub symmetric_link, set_symmetric_link: 2;
    pub at_capacity, set_at_capacity: 3;
    // Bits 4-7 reserved.
}

impl WanInfo {
    pub const LINK_UP: u8 = 1;
    pub const LINK_DOWN: u8 = 2;
    pub const LINK_TEST: u8 = 3;
}

/// WAN Metrics element, Hotspot 2.0 Specification, 4.4
#[repr(C)]
#[derive(AsBytes, FromZeroes, FromBytes, Unaligned, Clone, Copy, PartialEq, Eq, Debug)]
pub struct WanMetrics {
    pub wan_info: u8,
    /// kbps
    pub downlink_speed: U32<LittleEndian>,
    /// kbps
    pub uplink_speed: U32<LittleEndian>,
    pub downlink_load: u8,
    pub uplink_load: u8,
    /// Load measurement duration in tenths of a second.
    pub lmd: U16<LittleEndian>,
}

impl WanMetrics {
    pub const LEN: usize = std::mem::size_of::<WanMetrics>();

    pub fn info(&self) -> WanInfo {
        WanInfo(self.wan_info)
    }
}

impl fmt::Display for WanMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{}:{}:{}:{}:{}",
            self.wan_info,
            self.downlink_speed.get(),
            self.uplink_speed.get(),
            self.downlink_load,
            self.uplink_load,
            self.lmd.get()
        )
    }
}

/// Splits an HS2.0 ANQP element payload into its subtype and body, checking the length each stored
/// subtype requires.
pub fn decode_anqp_response(payload: &[u8]) -> Result<(Subtype, &[u8]), Error> {
    let mut reader = BufferReader::new(payload);
    let subtype = reader.read_u8().map(Subtype).ok_or(Error::MalformedElement("ANQP payload"))?;
    reader.skip(1).ok_or(Error::MalformedElement("ANQP payload"))?;
    let body = reader.into_remaining();
    match subtype {
        Subtype::CAPABILITY_LIST
        | Subtype::OPERATOR_FRIENDLY_NAME
        | Subtype::CONNECTION_CAPABILITY
        | Subtype::OPERATING_CLASS => Ok((subtype, body)),
        Subtype::WAN_METRICS if body.len() < WanMetrics::LEN => {
            Err(Error::MalformedElement("WAN Metrics"))
        }
        Subtype::WAN_METRICS => Ok((subtype, body)),
        Subtype(other) => Err(Error::UnknownSubtype(other)),
    }
}

pub fn parse_wan_metrics(body: &[u8]) -> Option<WanMetrics> {
    WanMetrics::read_from_prefix(body)
}

/// Handles the payload of one HS2.0 ANQP element, starting at the subtype octet. Recognized
/// elements are stored in `store` when the BSS still has one. Malformed or unsupported elements
/// are logged and dropped.
pub fn parse_anqp_response(
    store: Option<&mut AnqpElementStore>,
    info_sink: &InfoSink,
    sa: &MacAddr,
    payload: &[u8],
    dialog_token: u8,
) {
    let (subtype, body) = match decode_anqp_response(payload) {
        Ok(decoded) => decoded,
        Err(Error::UnknownSubtype(subtype)) => {
            debug!("HS20: Unsupported subtype {}", subtype);
            return;
        }
        Err(e) => {
            debug!("HS20: dropping ANQP response from {}: {}", sa.to_mac_str(), e);
            return;
        }
    };
    debug!("{} (dialog token {}): {:02x?}", subtype, dialog_token, body);

    let event = match subtype {
        Subtype::WAN_METRICS => match parse_wan_metrics(body) {
            Some(metrics) => {
                info!("RX-HS20-ANQP {} WAN Metrics {}", sa.to_mac_str(), metrics);
                Hs20Event::WanMetrics { sa: *sa, metrics }
            }
            None => return,
        },
        _ => {
            info!("RX-HS20-ANQP {} {}", sa.to_mac_str(), subtype);
            Hs20Event::AnqpElement { sa: *sa, subtype }
        }
    };
    info_sink.send(event);

    if let Some(store) = store {
        store.set(subtype, body);
    }
}
