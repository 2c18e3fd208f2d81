// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{
        bss::BssRecord,
        filter::{FrameFilterDriver, FrameFilters},
        mac::Bssid,
        network::{Cipher, KeyMgmt, NetworkProfile, Proto},
        query::{DialogToken, GasTransport},
    },
    anyhow::format_err,
};

#[derive(Debug, Default)]
pub struct FakeTransport {
    pub sent: Vec<(Bssid, u32, Vec<u8>)>,
    pub next_token: DialogToken,
    pub fail: bool,
}

impl GasTransport for FakeTransport {
    fn send_request(
        &mut self,
        dst: Bssid,
        freq: u32,
        request: Vec<u8>,
    ) -> Result<DialogToken, anyhow::Error> {
        if self.fail {
            return Err(format_err!("fake transport failure"));
        }
        self.sent.push((dst, freq, request));
        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        Ok(token)
    }
}

#[derive(Debug, Default)]
pub struct FakeFilterDriver {
    pub configured: Vec<FrameFilters>,
    pub fail: bool,
}

impl FrameFilterDriver for FakeFilterDriver {
    fn configure_frame_filters(&mut self, filters: FrameFilters) -> Result<(), anyhow::Error> {
        if self.fail {
            return Err(format_err!("fake driver failure"));
        }
        self.configured.push(filters);
        Ok(())
    }
}

/// A BSS on channel 6 advertising HS2.0 release 2 with DGAF enabled and Proxy ARP.
pub fn fake_hs20_bss(bssid: Bssid) -> BssRecord {
    #[rustfmt::skip]
    let ies = vec![
        // HS2.0 Indication
        0xdd, 0x07, 0x50, 0x6f, 0x9a, 0x10, 0x10, 0x00, 0x00,
        // Extended Capabilities: Proxy ARP
        0x7f, 0x02, 0x00, 0x10,
    ];
    BssRecord::new(bssid, 2437, ies)
}

pub fn fake_hs20_profile() -> NetworkProfile {
    NetworkProfile {
        key_mgmt: KeyMgmt::IEEE8021X,
        pairwise_cipher: Cipher::CCMP,
        proto: Proto::RSN,
        ..Default::default()
    }
}
