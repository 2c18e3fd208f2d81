// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{InfoId, ANQP},
    crate::{buffer_reader::BufferReader, ie::VendorHeader},
    zerocopy::AsBytes,
};

/// Iterates over the ANQP elements of a query response, yielding each Info ID with its body.
/// Iteration stops at the first element whose length runs past the end of the response.
pub struct AnqpElementReader<'a>(BufferReader<'a>);

impl<'a> AnqpElementReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self(BufferReader::new(bytes))
    }
}

impl<'a> Iterator for AnqpElementReader<'a> {
    type Item = (InfoId, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.bytes_remaining() < 4 {
            return None;
        }
        let info_id = InfoId(self.0.read_le16()?);
        let len = self.0.read_le16()? as usize;
        let body = self.0.read_bytes(len)?;
        Some((info_id, body))
    }
}

/// Returns the HS2.0 payload, starting at the subtype octet, if the element is an HS2.0
/// vendor-specific ANQP element.
pub fn hs20_payload(info_id: InfoId, body: &[u8]) -> Option<&[u8]> {
    if info_id != InfoId::VENDOR_SPECIFIC {
        return None;
    }
    if body.get(..VendorHeader::LEN)? != ANQP.as_bytes() {
        return None;
    }
    body.get(VendorHeader::LEN..)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(AnqpElementReader::new(&[]).next(), None);
        assert_eq!(AnqpElementReader::new(&[0x01, 0x01, 0x00]).next(), None);
    }

    #[test]
    fn two_elements() {
        #[rustfmt::skip]
        let bytes = [
            0x02, 0x01, 2, 0, 0xaa, 0xbb, // Venue Name
            0xdd, 0xdd, 6, 0, 0x50, 0x6f, 0x9a, 0x11, 7, 0, // HS2.0 Operating Class
        ];
        let elems: Vec<_> = AnqpElementReader::new(&bytes[..]).collect();
        assert_eq!(
            &elems[..],
            &[
                (InfoId::VENUE_NAME, &[0xaa, 0xbb][..]),
                (InfoId::VENDOR_SPECIFIC, &[0x50, 0x6f, 0x9a, 0x11, 7, 0][..]),
            ]
        );
    }

    #[test]
    fn truncated_element() {
        let bytes = [0x02, 0x01, 1, 0, 0xaa, 0xdd, 0xdd, 9, 0, 0x50];
        let elems: Vec<_> = AnqpElementReader::new(&bytes[..]).collect();
        assert_eq!(&elems[..], &[(InfoId::VENUE_NAME, &[0xaa][..])]);
    }

    #[test]
    fn hs20_payload_of_vendor_element() {
        let body = [0x50, 0x6f, 0x9a, 0x11, 7, 0, 81];
        assert_eq!(hs20_payload(InfoId::VENDOR_SPECIFIC, &body[..]), Some(&[7, 0, 81][..]));
        assert_eq!(hs20_payload(InfoId::VENUE_NAME, &body[..]), None);
        assert_eq!(hs20_payload(InfoId::VENDOR_SPECIFIC, &[0x50, 0x6f, 0x9a, 0x10, 7][..]), None);
        assert_eq!(hs20_payload(InfoId::VENDOR_SPECIFIC, &[0x50, 0x6f][..]), None);
    }
}
