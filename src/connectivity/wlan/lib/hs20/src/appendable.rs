// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use zerocopy::AsBytes;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct BufferTooSmall;

/// A growable output buffer that frame and element writers append into.
pub trait Appendable {
    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferTooSmall>;

    fn append_value<T: AsBytes + ?Sized>(&mut self, value: &T) -> Result<(), BufferTooSmall> {
        self.append_bytes(value.as_bytes())
    }

    fn append_byte(&mut self, byte: u8) -> Result<(), BufferTooSmall> {
        self.append_bytes(&[byte])
    }

    fn append_le16(&mut self, value: u16) -> Result<(), BufferTooSmall> {
        self.append_bytes(&value.to_le_bytes())
    }

    fn can_append(&self, bytes: usize) -> bool;

    fn bytes_written(&self) -> usize;

    /// Overwrites bytes that were already appended. Used to fill in length fields once the
    /// contents they cover are known.
    fn patch_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<(), BufferTooSmall>;
}

impl Appendable for Vec<u8> {
    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferTooSmall> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn can_append(&self, _bytes: usize) -> bool {
        true
    }

    fn bytes_written(&self) -> usize {
        self.len()
    }

    fn patch_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<(), BufferTooSmall> {
        let end = offset.checked_add(bytes.len()).ok_or(BufferTooSmall)?;
        match self.get_mut(offset..end) {
            Some(dst) => {
                dst.copy_from_slice(bytes);
                Ok(())
            }
            None => Err(BufferTooSmall),
        }
    }
}
