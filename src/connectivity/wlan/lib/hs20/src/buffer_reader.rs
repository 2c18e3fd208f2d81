// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    std::mem::size_of,
    zerocopy::{
        byteorder::{LittleEndian, U16, U32},
        FromBytes, Ref, Unaligned,
    },
};

/// A cursor over untrusted bytes. Every read is bounds-checked against the bytes that remain and
/// yields `None` instead of reading past the end.
pub struct BufferReader<'a> {
    buffer: &'a [u8],
    bytes_read: usize,
}

impl<'a> BufferReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BufferReader { buffer: bytes, bytes_read: 0 }
    }

    pub fn peek<T: FromBytes + Unaligned>(&self) -> Option<Ref<&'a [u8], T>> {
        Ref::new_unaligned_from_prefix(self.buffer).map(|(view, _)| view)
    }

    pub fn read<T: FromBytes + Unaligned>(&mut self) -> Option<Ref<&'a [u8], T>> {
        let bytes = self.read_bytes(size_of::<T>())?;
        Ref::new_unaligned(bytes)
    }

    pub fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.buffer.len() < len {
            return None;
        }
        let (head, tail) = self.buffer.split_at(len);
        self.buffer = tail;
        self.bytes_read += len;
        Some(head)
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        self.read_bytes(1).map(|bytes| bytes[0])
    }

    pub fn read_le16(&mut self) -> Option<u16> {
        self.read::<U16<LittleEndian>>().map(|v| v.get())
    }

    pub fn read_le32(&mut self) -> Option<u32> {
        self.read::<U32<LittleEndian>>().map(|v| v.get())
    }

    /// Reads a one-byte length prefix followed by that many bytes.
    pub fn read_len_prefixed(&mut self) -> Option<&'a [u8]> {
        let len = self.peek_u8()? as usize;
        if self.buffer.len() < 1 + len {
            return None;
        }
        self.read_bytes(1)?;
        self.read_bytes(len)
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.buffer.first().copied()
    }

    pub fn skip(&mut self, len: usize) -> Option<()> {
        self.read_bytes(len).map(|_| ())
    }

    pub fn into_remaining(self) -> &'a [u8] {
        self.buffer
    }

    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub fn bytes_remaining(&self) -> usize {
        self.buffer.len()
    }
}
