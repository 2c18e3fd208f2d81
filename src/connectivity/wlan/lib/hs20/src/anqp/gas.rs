// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! GAS Initial Request framing for ANQP queries, IEEE Std 802.11-2016, 9.6.8.12

use crate::{
    appendable::Appendable,
    error::Error,
    ie::{Header, Id},
};

// IEEE Std 802.11-2016, 9.4.1.11, Table 9-47
pub const ACTION_CATEGORY_PUBLIC: u8 = 4;
// IEEE Std 802.11-2016, 9.6.8.1, Table 9-307
pub const ACTION_GAS_INITIAL_REQUEST: u8 = 10;
// IEEE Std 802.11-2016, 9.4.2.93, Table 9-215
pub const ADVERTISEMENT_PROTOCOL_ANQP: u8 = 0;

/// Offset of the Query Request Length field in a GAS Initial Request.
pub const QUERY_REQUEST_LEN_OFFSET: usize = 3 + 4;

/// Writes the fixed part of a GAS Initial Request that carries an ANQP query, up to and including
/// a zeroed Query Request Length field. Returns the offset of that field so it can be finalized
/// once the query is written.
pub fn write_anqp_initial_request<A: Appendable>(
    buf: &mut A,
    dialog_token: u8,
) -> Result<usize, Error> {
    buf.append_byte(ACTION_CATEGORY_PUBLIC)?;
    buf.append_byte(ACTION_GAS_INITIAL_REQUEST)?;
    buf.append_byte(dialog_token)?;

    buf.append_value(&Header { id: Id::ADVERTISEMENT_PROTOCOL, body_len: 2 })?;
    // Query Response Info: no response length limit, PAME-BI clear.
    buf.append_byte(0)?;
    buf.append_byte(ADVERTISEMENT_PROTOCOL_ANQP)?;

    reserve_len(buf)
}

/// Appends a zeroed little-endian 16-bit length field and returns its offset.
pub fn reserve_len<A: Appendable>(buf: &mut A) -> Result<usize, Error> {
    let pos = buf.bytes_written();
    buf.append_le16(0)?;
    Ok(pos)
}

/// Fills in the length field at `pos` with the number of bytes written after it.
pub fn finalize_len<A: Appendable>(buf: &mut A, pos: usize) -> Result<(), Error> {
    let len = buf.bytes_written().checked_sub(pos + 2).ok_or(Error::BufferTooSmall)?;
    let len = u16::try_from(len).map_err(|_| Error::ElementTooLong(len))?;
    buf.patch_bytes(pos, &len.to_le_bytes())?;
    Ok(())
}
