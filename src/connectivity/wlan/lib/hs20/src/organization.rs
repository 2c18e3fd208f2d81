// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

/// Organizationally Unique Identifier, IEEE Std 802.11-2016, 9.4.1.32
#[repr(C)]
#[derive(
    AsBytes, FromZeroes, FromBytes, Unaligned, Clone, Copy, PartialEq, Eq, Hash, Debug, Default,
)]
pub struct Oui([u8; 3]);

impl Oui {
    /// Wi-Fi Alliance.
    pub const WFA: Self = Self([0x50, 0x6F, 0x9A]);
}
