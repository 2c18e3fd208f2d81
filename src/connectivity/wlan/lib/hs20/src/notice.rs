// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Hotspot 2.0 WNM-Notification handling: deauthentication-imminent and terms-and-conditions
//! acceptance notices, and the profile disablement they trigger.

use {
    crate::{
        buffer_reader::BufferReader,
        error::Error,
        ie::VendorHeader,
        mac::{Bssid, MacFmt},
        network::NetworkProfile,
        organization::Oui,
        sink::{Hs20Event, InfoSink},
    },
    log::{debug, info},
    std::{
        collections::VecDeque,
        time::{Duration, Instant},
    },
};

/// Deauthentication reason codes, Hotspot 2.0 Specification, 3.8.1.1
pub const DEAUTH_REASON_BSS: u8 = 0;
pub const DEAUTH_REASON_ESS: u8 = 1;

/// WFA WNM-Notification types carried in the vendor header's type octet.
pub const WNM_SUB_REM_NEEDED: u8 = 0;
pub const WNM_DEAUTH_IMMINENT_NOTICE: u8 = 1;
pub const WNM_T_C_ACCEPTANCE: u8 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeauthImminentNotice {
    pub code: u8,
    /// Seconds before the station may reassociate.
    pub reauth_delay: u16,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WnmNotice {
    DeauthImminent(DeauthImminentNotice),
    TermsAndConditions { url: String },
}

fn read_url(reader: &mut BufferReader<'_>) -> Option<String> {
    reader.read_len_prefixed().map(|url| String::from_utf8_lossy(url).into_owned())
}

/// Parses the body of a WFA vendor-specific subelement of a WNM-Notification Request, starting at
/// the OUI. Returns `None` for truncated subelements and for notice types not handled here.
pub fn parse_wnm_notification(body: &[u8]) -> Option<WnmNotice> {
    let mut reader = BufferReader::new(body);
    let vendor = reader.read::<VendorHeader>()?;
    if vendor.oui != Oui::WFA {
        return None;
    }
    match vendor.oui_type {
        WNM_DEAUTH_IMMINENT_NOTICE => {
            let code = reader.read_u8()?;
            let reauth_delay = reader.read_le16()?;
            // The URL is optional.
            let url = match reader.bytes_remaining() {
                0 => String::new(),
                _ => read_url(&mut reader)?,
            };
            Some(WnmNotice::DeauthImminent(DeauthImminentNotice { code, reauth_delay, url }))
        }
        WNM_T_C_ACCEPTANCE => {
            let url = read_url(&mut reader)?;
            Some(WnmNotice::TermsAndConditions { url })
        }
        WNM_SUB_REM_NEEDED => {
            debug!("HS20: subscription remediation notice not supported");
            None
        }
        other => {
            debug!("HS20: unsupported WNM-Notification type {}", other);
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoreEntry {
    pub bssid: Bssid,
    /// Number of times the BSS was added.
    pub count: u32,
}

/// BSSs to skip during network selection. Bounded; the oldest entry is evicted first.
#[derive(Debug)]
pub struct IgnoreList {
    entries: VecDeque<IgnoreEntry>,
    limit: usize,
}

impl IgnoreList {
    pub fn new(limit: usize) -> Self {
        Self { entries: VecDeque::new(), limit: limit.max(1) }
    }

    /// Adds `bssid`, or bumps its count if already present. Returns the new count.
    pub fn add(&mut self, bssid: Bssid) -> u32 {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.bssid == bssid) {
            entry.count += 1;
            return entry.count;
        }
        while self.entries.len() >= self.limit {
            if let Some(evicted) = self.entries.pop_front() {
                debug!("ignore list full, evicting {}", evicted.bssid.to_mac_str());
            }
        }
        self.entries.push_back(IgnoreEntry { bssid, count: 1 });
        1
    }

    pub fn contains(&self, bssid: &Bssid) -> bool {
        self.entries.iter().any(|e| e.bssid == *bssid)
    }

    pub fn count(&self, bssid: &Bssid) -> u32 {
        self.entries.iter().find(|e| e.bssid == *bssid).map_or(0, |e| e.count)
    }

    pub fn remove(&mut self, bssid: &Bssid) -> bool {
        let len = self.entries.len();
        self.entries.retain(|e| e.bssid != *bssid);
        self.entries.len() != len
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnoreEntry> {
        self.entries.iter()
    }
}

/// The association a notice was received on.
#[derive(Debug)]
pub struct CurrentConnection<'a> {
    pub bssid: Bssid,
    pub pmf_enabled: bool,
    pub profile: Option<&'a mut NetworkProfile>,
}

/// Notices are only trusted on connections with protected management frames.
pub fn check_pmf(conn: &CurrentConnection<'_>) -> Result<(), Error> {
    match conn.pmf_enabled {
        true => Ok(()),
        false => Err(Error::PolicyGateFailure),
    }
}

/// Disables `profile` until `now + delay`, unless it is already disabled at least that long.
/// Returns whether the deadline moved.
pub fn extend_disabled_until(profile: &mut NetworkProfile, now: Instant, delay: Duration) -> bool {
    let candidate = match now.checked_add(delay) {
        Some(candidate) => candidate,
        None => return false,
    };
    match profile.disabled_until {
        Some(until) if candidate <= until => false,
        _ => {
            profile.disabled_until = Some(candidate);
            true
        }
    }
}

fn disable_current_profile(profile: Option<&mut NetworkProfile>, now: Instant, reauth_delay: u16) {
    if let Some(profile) = profile {
        let delay = Duration::from_secs(reauth_delay.into());
        if extend_disabled_until(profile, now, delay) {
            debug!("HS20: disabling network for {} seconds", reauth_delay);
        } else {
            debug!("HS20: network already disabled for at least {} seconds", reauth_delay);
        }
    }
}

/// Relays a deauthentication-imminent notice and applies its disablement. A BSS reason puts the
/// current BSS on `ignore_list`. Both reasons disable the current profile for the reauth delay.
pub fn handle_deauth_imminent_notice(
    mut conn: CurrentConnection<'_>,
    ignore_list: &mut IgnoreList,
    info_sink: &InfoSink,
    notice: DeauthImminentNotice,
    now: Instant,
) {
    if let Err(e) = check_pmf(&conn) {
        debug!("HS20: ignoring deauthentication-imminent notice from {}: {}", conn.bssid, e);
        return;
    }
    let DeauthImminentNotice { code, reauth_delay, url } = notice;
    info!("HS20: deauthentication imminent: code={} delay={}s url={}", code, reauth_delay, url);
    info_sink.send(Hs20Event::DeauthImminentNotice { code, reauth_delay, url });

    if code == DEAUTH_REASON_BSS {
        debug!("HS20: adding {} to ignore list", conn.bssid);
        ignore_list.add(conn.bssid);
        disable_current_profile(conn.profile.as_deref_mut(), now, reauth_delay);
    }
    if code == DEAUTH_REASON_ESS {
        disable_current_profile(conn.profile.as_deref_mut(), now, reauth_delay);
    }
}

pub fn handle_terms_and_conditions_acceptance(
    conn: &CurrentConnection<'_>,
    info_sink: &InfoSink,
    url: String,
) {
    if let Err(e) = check_pmf(conn) {
        debug!("HS20: ignoring terms and conditions notice from {}: {}", conn.bssid, e);
        return;
    }
    info!("HS20: terms and conditions acceptance required: {}", url);
    info_sink.send(Hs20Event::TermsAndConditionsAcceptance { url });
}
