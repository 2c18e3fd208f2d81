// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{error::Error, ie::hs20::HS20_VERSION},
    serde::{Deserialize, Serialize},
};

const DEFAULT_IGNORE_LIST_LIMIT: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Hs20Config {
    /// Global switch for Hotspot 2.0 handling.
    pub hs20_enabled: bool,
    /// Local release in Version Number encoding (release minus one in the high nibble).
    pub hs20_version: u8,
    /// Maximum number of BSSIDs kept on the ignore list.
    pub ignore_list_limit: usize,
}

impl Default for Hs20Config {
    fn default() -> Self {
        Self {
            hs20_enabled: true,
            hs20_version: HS20_VERSION,
            ignore_list_limit: DEFAULT_IGNORE_LIST_LIMIT,
        }
    }
}

impl Hs20Config {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}
