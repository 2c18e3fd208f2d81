// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Station-side Hotspot 2.0 support: HS2.0 information elements, ANQP queries and responses, and
//! the handling of deauthentication-imminent and terms-and-conditions notices. GAS transport,
//! scanning and credential provisioning live outside this crate and are reached through the
//! [`GasTransport`] and [`FrameFilterDriver`] seams. See [`Hs20Client`].

pub mod anqp;
pub mod appendable;
pub mod bss;
pub mod buffer_reader;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod ie;
pub mod mac;
pub mod network;
pub mod notice;
pub mod organization;
pub mod query;
pub mod sink;
#[cfg(test)]
pub mod test_utils;

pub use {
    client::Hs20Client,
    config::Hs20Config,
    error::Error,
    filter::{FrameFilterDriver, FrameFilters},
    query::{DialogToken, GasTransport},
    sink::{Hs20Event, InfoStream},
};
