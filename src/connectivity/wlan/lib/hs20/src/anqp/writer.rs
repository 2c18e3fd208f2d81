// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{gas, InfoId, Subtype, ANQP},
    crate::{appendable::Appendable, error::Error},
};

/// Appends an HS2.0 vendor-specific ANQP element querying the subtypes set in `subtypes`.
///
/// A bitmap selecting only the NAI Home Realm Query is sent as that element, with `payload` as its
/// body. Any other bitmap becomes an HS Query List naming each selected subtype in ascending order.
pub fn put_anqp_query<A: Appendable>(
    buf: &mut A,
    subtypes: u32,
    payload: Option<&[u8]>,
) -> Result<(), Error> {
    buf.append_le16(InfoId::VENDOR_SPECIFIC.0)?;
    let len_pos = gas::reserve_len(buf)?;
    buf.append_value(&ANQP)?;
    if subtypes == Subtype::NAI_HOME_REALM_QUERY.bit() {
        buf.append_byte(Subtype::NAI_HOME_REALM_QUERY.0)?;
        buf.append_byte(0)?; // Reserved
        if let Some(payload) = payload {
            buf.append_bytes(payload)?;
        }
    } else {
        buf.append_byte(Subtype::QUERY_LIST.0)?;
        buf.append_byte(0)?; // Reserved
        for subtype in (0..32u8).map(Subtype).filter(|s| subtypes & s.bit() != 0) {
            buf.append_byte(subtype.0)?;
        }
    }
    gas::finalize_len(buf, len_pos)
}

/// Builds a complete GAS Initial Request carrying an HS2.0 ANQP query. The dialog token is left at
/// zero for the transport to assign.
pub fn build_anqp_query(subtypes: u32, payload: Option<&[u8]>) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::with_capacity(100 + payload.map_or(0, <[u8]>::len));
    let query_len_pos = gas::write_anqp_initial_request(&mut buf, 0)?;
    put_anqp_query(&mut buf, subtypes, payload)?;
    gas::finalize_len(&mut buf, query_len_pos)?;
    Ok(buf)
}
