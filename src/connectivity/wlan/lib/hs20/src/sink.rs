// Copyright 2018 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{
        anqp::{Subtype, WanMetrics},
        mac::MacAddr,
    },
    futures::channel::mpsc,
};

/// Notifications relayed to the control interface.
#[derive(Clone, Debug, PartialEq)]
pub enum Hs20Event {
    /// An HS2.0 ANQP element was received from `sa`.
    AnqpElement { sa: MacAddr, subtype: Subtype },
    WanMetrics { sa: MacAddr, metrics: WanMetrics },
    /// The network announced that it is about to deauthenticate us. `reauth_delay` is in seconds.
    DeauthImminentNotice { code: u8, reauth_delay: u16, url: String },
    TermsAndConditionsAcceptance { url: String },
}

#[derive(Debug)]
pub struct UnboundedSink<T> {
    sink: mpsc::UnboundedSender<T>,
}

impl<T> UnboundedSink<T> {
    pub fn new(sink: mpsc::UnboundedSender<T>) -> Self {
        UnboundedSink { sink }
    }

    pub fn send(&self, msg: T) {
        // A disconnected receiver only means nobody is listening for notifications anymore.
        let _ = self.sink.unbounded_send(msg);
    }
}

pub type InfoSink = UnboundedSink<Hs20Event>;
pub type InfoStream = mpsc::UnboundedReceiver<Hs20Event>;
