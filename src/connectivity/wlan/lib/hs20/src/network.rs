// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{bss::BssRecord, config::Hs20Config},
    bitflags::bitflags,
    std::time::Instant,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyMgmt: u32 {
        const IEEE8021X = 1 << 0;
        const PSK = 1 << 1;
        const NONE = 1 << 2;
        const IEEE8021X_SHA256 = 1 << 7;
        const SAE = 1 << 10;
        const OWE = 1 << 22;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Cipher: u32 {
        const NONE = 1 << 0;
        const WEP40 = 1 << 1;
        const WEP104 = 1 << 2;
        const TKIP = 1 << 3;
        const CCMP = 1 << 4;
        const GCMP = 1 << 6;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Proto: u32 {
        const WPA = 1 << 0;
        const RSN = 1 << 1;
        const OSEN = 1 << 3;
    }
}

/// Handle to a credential held in a `CredentialTable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialId(u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    pub id: CredentialId,
    /// PPS MO update identifier provisioned with this credential.
    pub update_identifier: u16,
}

/// Credentials owned by the configuration store. Network profiles refer to them by handle only.
#[derive(Debug, Default)]
pub struct CredentialTable {
    creds: Vec<Credential>,
    next_id: u32,
}

impl CredentialTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, update_identifier: u16) -> CredentialId {
        let id = CredentialId(self.next_id);
        self.next_id += 1;
        self.creds.push(Credential { id, update_identifier });
        id
    }

    pub fn remove(&mut self, id: CredentialId) -> Option<Credential> {
        let idx = self.creds.iter().position(|cred| cred.id == id)?;
        Some(self.creds.remove(idx))
    }

    pub fn get(&self, id: CredentialId) -> Option<&Credential> {
        self.creds.iter().find(|cred| cred.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.creds.iter()
    }
}

/// A configured network, as held by the network-profile store.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkProfile {
    pub key_mgmt: KeyMgmt,
    pub pairwise_cipher: Cipher,
    pub proto: Proto,
    /// Credential this profile was generated from, if any.
    pub parent_cred: Option<CredentialId>,
    pub update_identifier: u16,
    pub roaming_consortium_selection: Option<Vec<u8>>,
    /// Monotonic deadline before which the profile must not be used for connecting.
    pub disabled_until: Option<Instant>,
}

impl Default for NetworkProfile {
    fn default() -> Self {
        Self {
            key_mgmt: KeyMgmt::PSK | KeyMgmt::IEEE8021X,
            pairwise_cipher: Cipher::CCMP | Cipher::TKIP,
            proto: Proto::WPA | Proto::RSN,
            parent_cred: None,
            update_identifier: 0,
            roaming_consortium_selection: None,
            disabled_until: None,
        }
    }
}

impl NetworkProfile {
    pub fn is_disabled(&self, now: Instant) -> bool {
        self.disabled_until.map_or(false, |until| now < until)
    }
}

/// Decides whether a profile, optionally paired with a BSS, is to be treated as a Hotspot 2.0
/// network.
///
/// A profile generated from a credential always is. Otherwise the BSS, when given, must carry the
/// HS2.0 indication element and the profile must be an RSN/802.1X/CCMP network, so that unrelated
/// vendor elements under the same OUI do not turn ordinary networks into HS2.0 ones.
pub fn is_hs20(
    config: &Hs20Config,
    profile: Option<&NetworkProfile>,
    bss: Option<&BssRecord>,
) -> bool {
    let profile = match profile {
        Some(profile) if config.hs20_enabled => profile,
        _ => return false,
    };

    if profile.parent_cred.is_some() {
        return true;
    }

    if let Some(bss) = bss {
        if bss.hs20_indication_ie().is_none() {
            return false;
        }
    }

    profile.key_mgmt.contains(KeyMgmt::IEEE8021X)
        && profile.pairwise_cipher.contains(Cipher::CCMP)
        && profile.proto == Proto::RSN
}

/// PPS MO ID to announce in the indication element: the profile's own update identifier, else the
/// one of the credential it was generated from, else 0.
pub fn get_pps_mo_id(profile: Option<&NetworkProfile>, creds: &CredentialTable) -> u16 {
    let profile = match profile {
        Some(profile) => profile,
        None => return 0,
    };
    if profile.update_identifier != 0 {
        return profile.update_identifier;
    }
    profile
        .parent_cred
        .and_then(|id| creds.get(id))
        .map_or(0, |cred| cred.update_identifier)
}
