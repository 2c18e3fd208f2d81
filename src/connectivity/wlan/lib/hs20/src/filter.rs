// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{
        bss::BssRecord,
        config::Hs20Config,
        ie::{ext_cap, ext_capability},
        network::{is_hs20, NetworkProfile},
    },
    bitflags::bitflags,
    log::{debug, warn},
};

bitflags! {
    /// Data frames the driver should drop on a Hotspot 2.0 connection.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FrameFilters: u32 {
        /// Unsolicited ARP, answered by the AP's Proxy ARP service.
        const ARP = 1 << 0;
        /// Unsolicited IPv6 Neighbor Advertisements.
        const NA = 1 << 1;
        /// Group-addressed frames protected with the GTK.
        const GTK = 1 << 2;
    }
}

/// Driver-level data frame filtering.
pub trait FrameFilterDriver {
    fn configure_frame_filters(&mut self, filters: FrameFilters) -> Result<(), anyhow::Error>;
}

/// Derives the data frame filters for the current connection and hands them to the driver.
///
/// The driver is only configured once the Proxy ARP capability could be evaluated. The returned set
/// still reflects the GTK decision when the Extended Capabilities element is missing.
pub fn configure_frame_filters<D: FrameFilterDriver>(
    driver: &mut D,
    config: &Hs20Config,
    profile: Option<&NetworkProfile>,
    bss: Option<&BssRecord>,
) -> FrameFilters {
    let bss = match bss {
        Some(bss) if is_hs20(config, profile, Some(bss)) => bss,
        _ => return FrameFilters::empty(),
    };

    let mut filters = FrameFilters::empty();
    match bss.hs20_conf() {
        None => debug!("not configuring frame filtering: can't extract DGAF bit"),
        Some(conf) if !conf.dgaf_disabled() => filters |= FrameFilters::GTK,
        Some(_) => (),
    }

    let ext_caps = match bss.ext_capabilities() {
        Some(ext_caps) if ext_caps.len() >= 2 => ext_caps,
        _ => {
            debug!("not configuring frame filtering: can't extract Proxy ARP bit");
            return filters;
        }
    };
    if ext_capability(ext_caps, ext_cap::PROXY_ARP) {
        filters |= FrameFilters::ARP | FrameFilters::NA;
    }

    if let Err(e) = driver.configure_frame_filters(filters) {
        warn!("failed to configure frame filters {:?}: {}", filters, e);
    }
    filters
}
