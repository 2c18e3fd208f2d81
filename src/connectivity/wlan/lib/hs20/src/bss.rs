// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{
        anqp::AnqpElementStore,
        buffer_reader::BufferReader,
        ie::{self, hs20, Id, VendorHeader},
        mac::Bssid,
    },
    std::{collections::HashMap, rc::Rc},
};

/// A scan result as kept by the scan-result store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BssRecord {
    pub bssid: Bssid,
    /// Channel center frequency in MHz.
    pub freq: u32,
    /// Raw information elements from the beacon or probe response.
    pub ies: Vec<u8>,
    /// ANQP elements learned for this BSS. BSSs of the same ESS may share one store.
    pub anqp: Option<Rc<AnqpElementStore>>,
}

impl BssRecord {
    pub fn new(bssid: Bssid, freq: u32, ies: Vec<u8>) -> Self {
        Self { bssid, freq, ies, anqp: None }
    }

    pub fn find_ie(&self, id: Id) -> Option<&[u8]> {
        ie::find(&self.ies[..], id)
    }

    pub fn find_vendor_ie(&self, vendor: VendorHeader) -> Option<&[u8]> {
        ie::find_vendor(&self.ies[..], vendor)
    }

    /// Body of the HS2.0 Indication element, vendor header included.
    pub fn hs20_indication_ie(&self) -> Option<&[u8]> {
        self.find_vendor_ie(hs20::INDICATION)
    }

    /// Hotspot Configuration octet, if the indication element is long enough to carry one.
    pub fn hs20_conf(&self) -> Option<hs20::Hs20Conf> {
        let mut reader = BufferReader::new(self.hs20_indication_ie()?);
        reader.skip(VendorHeader::LEN)?;
        reader.read_u8().map(hs20::Hs20Conf)
    }

    pub fn ext_capabilities(&self) -> Option<&[u8]> {
        self.find_ie(Id::EXT_CAPABILITIES)
    }

    /// Makes sure this BSS owns an ANQP element store that no other BSS shares, copying the
    /// shared contents if needed.
    pub fn anqp_unshare_alloc(&mut self) -> &mut AnqpElementStore {
        Rc::make_mut(self.anqp.get_or_insert_with(Default::default))
    }

    pub fn anqp_mut(&mut self) -> Option<&mut AnqpElementStore> {
        self.anqp.as_mut().map(Rc::make_mut)
    }
}

/// HS2.0 release advertised by a BSS, or 0 when it does not advertise one.
pub fn get_hs20_version(bss: Option<&BssRecord>) -> u8 {
    bss.and_then(BssRecord::hs20_conf).map_or(0, |conf| conf.release())
}

/// Lookup into the scan-result store.
pub trait BssTable {
    fn get_bssid(&self, bssid: &Bssid) -> Option<&BssRecord>;
    fn get_bssid_mut(&mut self, bssid: &Bssid) -> Option<&mut BssRecord>;
}

impl BssTable for HashMap<Bssid, BssRecord> {
    fn get_bssid(&self, bssid: &Bssid) -> Option<&BssRecord> {
        self.get(bssid)
    }

    fn get_bssid_mut(&mut self, bssid: &Bssid) -> Option<&mut BssRecord> {
        self.get_mut(bssid)
    }
}
