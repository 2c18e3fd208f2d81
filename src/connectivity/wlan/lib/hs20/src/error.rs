// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{appendable::BufferTooSmall, mac::Bssid},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed element: {0}")]
    MalformedElement(&'static str),
    #[error("unsupported HS2.0 ANQP subtype {0}")]
    UnknownSubtype(u8),
    #[error("cannot send query to unknown BSS {0}")]
    UnknownDestination(Bssid),
    #[error("failed to send query request: {0}")]
    TransportError(#[source] anyhow::Error),
    #[error("protected management frames not enabled")]
    PolicyGateFailure,
    #[error("element body of {0} bytes does not fit")]
    ElementTooLong(usize),
    #[error("provided buffer too small")]
    BufferTooSmall,
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<BufferTooSmall> for Error {
    fn from(_: BufferTooSmall) -> Self {
        Error::BufferTooSmall
    }
}
