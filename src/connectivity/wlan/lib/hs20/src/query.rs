// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{
        anqp::build_anqp_query,
        bss::BssTable,
        error::Error,
        mac::{Bssid, MacFmt},
    },
    log::{debug, warn},
};

/// Correlates a GAS query with its response.
pub type DialogToken = u8;

/// The GAS query transport. It owns each request it accepts and later delivers the correlated
/// response, identified by the dialog token it returned.
pub trait GasTransport {
    fn send_request(
        &mut self,
        dst: Bssid,
        freq: u32,
        request: Vec<u8>,
    ) -> Result<DialogToken, anyhow::Error>;
}

/// Sends an HS2.0 ANQP query for `subtypes` to a BSS known to the scan-result store.
pub fn send_anqp_query<T, B>(
    transport: &mut T,
    bss_table: &mut B,
    dst: Bssid,
    subtypes: u32,
    payload: Option<&[u8]>,
) -> Result<DialogToken, Error>
where
    T: GasTransport + ?Sized,
    B: BssTable + ?Sized,
{
    let bss = match bss_table.get_bssid_mut(&dst) {
        Some(bss) => bss,
        None => {
            warn!("ANQP: Cannot send query to unknown BSS {}", dst.to_mac_str());
            return Err(Error::UnknownDestination(dst));
        }
    };
    bss.anqp_unshare_alloc();
    let freq = bss.freq;

    debug!("HS20: ANQP Query Request to {} for subtypes {:#x}", dst.to_mac_str(), subtypes);
    let request = build_anqp_query(subtypes, payload)?;

    match transport.send_request(dst, freq, request) {
        Ok(dialog_token) => {
            debug!("ANQP: Query started with dialog token {}", dialog_token);
            Ok(dialog_token)
        }
        Err(e) => {
            debug!("ANQP: Failed to send Query Request: {}", e);
            Err(Error::TransportError(e))
        }
    }
}
