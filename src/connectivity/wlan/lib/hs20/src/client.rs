// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{
        anqp::{hs20_payload, parse_anqp_response, AnqpElementReader},
        appendable::Appendable,
        bss::{get_hs20_version, BssRecord, BssTable},
        config::Hs20Config,
        error::Error,
        filter::{self, FrameFilterDriver, FrameFilters},
        ie::hs20::{write_indication_ie, write_roaming_cons_sel_ie},
        mac::{Bssid, MacFmt},
        network::{get_pps_mo_id, is_hs20, CredentialTable, NetworkProfile},
        notice::{
            handle_deauth_imminent_notice, handle_terms_and_conditions_acceptance,
            parse_wnm_notification, CurrentConnection, DeauthImminentNotice, IgnoreList,
            WnmNotice,
        },
        query::{self, DialogToken, GasTransport},
        sink::{InfoSink, InfoStream, UnboundedSink},
    },
    futures::channel::mpsc,
    log::debug,
    std::time::Instant,
};

/// Hotspot 2.0 station logic. Entry points are invoked from the event loop that receives frames
/// and scan results; results are returned directly or relayed through the info stream.
pub struct Hs20Client<T, D> {
    config: Hs20Config,
    transport: T,
    driver: D,
    info_sink: InfoSink,
    ignore_list: IgnoreList,
}

impl<T: GasTransport, D: FrameFilterDriver> Hs20Client<T, D> {
    pub fn new(config: Hs20Config, transport: T, driver: D) -> (Self, InfoStream) {
        let (info_sink, info_stream) = mpsc::unbounded();
        let ignore_list = IgnoreList::new(config.ignore_list_limit);
        let client = Hs20Client {
            config,
            transport,
            driver,
            info_sink: UnboundedSink::new(info_sink),
            ignore_list,
        };
        (client, info_stream)
    }

    pub fn config(&self) -> &Hs20Config {
        &self.config
    }

    pub fn ignore_list(&self) -> &IgnoreList {
        &self.ignore_list
    }

    pub fn ignore_list_mut(&mut self) -> &mut IgnoreList {
        &mut self.ignore_list
    }

    pub fn is_hs20(&self, profile: Option<&NetworkProfile>, bss: Option<&BssRecord>) -> bool {
        is_hs20(&self.config, profile, bss)
    }

    /// To be called once associated to `bss` with `profile`.
    pub fn configure_frame_filters(
        &mut self,
        profile: Option<&NetworkProfile>,
        bss: Option<&BssRecord>,
    ) -> FrameFilters {
        filter::configure_frame_filters(&mut self.driver, &self.config, profile, bss)
    }

    /// Appends the HS2.0 elements of an (Re)Association Request to `buf`. Nothing is written
    /// unless the pairing is an HS2.0 network.
    pub fn write_association_ies<A: Appendable>(
        &self,
        buf: &mut A,
        profile: &NetworkProfile,
        creds: &CredentialTable,
        bss: &BssRecord,
    ) -> Result<(), Error> {
        if !self.is_hs20(Some(profile), Some(bss)) {
            return Ok(());
        }
        let pps_mo_id = get_pps_mo_id(Some(profile), creds);
        let ap_release = get_hs20_version(Some(bss));
        write_indication_ie(buf, self.config.hs20_version, Some(pps_mo_id), ap_release)?;
        write_roaming_cons_sel_ie(buf, profile.roaming_consortium_selection.as_deref())
    }

    pub fn send_anqp_query<B: BssTable + ?Sized>(
        &mut self,
        bss_table: &mut B,
        dst: Bssid,
        subtypes: u32,
        payload: Option<&[u8]>,
    ) -> Result<DialogToken, Error> {
        query::send_anqp_query(&mut self.transport, bss_table, dst, subtypes, payload)
    }

    /// Handles the Query Response of a completed GAS exchange with `sa`. Elements other than
    /// HS2.0 vendor-specific ones are left to other consumers.
    pub fn on_anqp_response<B: BssTable + ?Sized>(
        &self,
        bss_table: &mut B,
        sa: Bssid,
        response: &[u8],
        dialog_token: DialogToken,
    ) {
        for (info_id, body) in AnqpElementReader::new(response) {
            let payload = match hs20_payload(info_id, body) {
                Some(payload) => payload,
                None => continue,
            };
            let store = bss_table.get_bssid_mut(&sa).and_then(BssRecord::anqp_mut);
            parse_anqp_response(store, &self.info_sink, &sa.0, payload, dialog_token);
        }
    }

    /// Handles a WFA vendor-specific subelement of a WNM-Notification Request, starting at the
    /// OUI.
    pub fn on_wnm_notification(&mut self, conn: CurrentConnection<'_>, body: &[u8], now: Instant) {
        match parse_wnm_notification(body) {
            Some(WnmNotice::DeauthImminent(notice)) => {
                self.on_deauth_imminent_notice(conn, notice, now)
            }
            Some(WnmNotice::TermsAndConditions { url }) => {
                self.on_terms_and_conditions_acceptance(&conn, url)
            }
            None => debug!(
                "HS20: dropping WNM-Notification from {}: {:02x?}",
                conn.bssid.to_mac_str(),
                body
            ),
        }
    }

    pub fn on_deauth_imminent_notice(
        &mut self,
        conn: CurrentConnection<'_>,
        notice: DeauthImminentNotice,
        now: Instant,
    ) {
        handle_deauth_imminent_notice(conn, &mut self.ignore_list, &self.info_sink, notice, now)
    }

    pub fn on_terms_and_conditions_acceptance(&self, conn: &CurrentConnection<'_>, url: String) {
        handle_terms_and_conditions_acceptance(conn, &self.info_sink, url)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            anqp::{AnqpElementStore, Subtype},
            ie::hs20::Hs20Indication,
            network::{Cipher, KeyMgmt, Proto},
            sink::Hs20Event,
            test_utils::{fake_hs20_bss, fake_hs20_profile, FakeFilterDriver, FakeTransport},
        },
        std::{collections::HashMap, rc::Rc, time::Duration},
        test_case::test_case,
    };

    const BSSID: Bssid = Bssid([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);

    type TestClient = Hs20Client<FakeTransport, FakeFilterDriver>;

    fn create_client() -> (TestClient, InfoStream) {
        Hs20Client::new(Hs20Config::default(), FakeTransport::default(), FakeFilterDriver::default())
    }

    fn bss_table() -> HashMap<Bssid, BssRecord> {
        let mut table = HashMap::new();
        table.insert(BSSID, fake_hs20_bss(BSSID));
        table
    }

    #[rustfmt::skip]
    fn wan_metrics_response(wan_metrics_len: usize) -> Vec<u8> {
        let wan_metrics = [
            0x01,
            0x10, 0x27, 0x00, 0x00,
            0xe8, 0x03, 0x00, 0x00,
            0x20,
            0x08,
            0x64, 0x00,
        ];
        let body = &wan_metrics[..wan_metrics_len];
        let len = (6 + body.len()) as u16;
        let mut response = vec![
            // Venue Name, not HS2.0
            0x02, 0x01, 0x02, 0x00, 0x00, 0x00,
            // HS2.0 vendor-specific element
            0xdd, 0xdd, len as u8, (len >> 8) as u8,
            0x50, 0x6f, 0x9a, 0x11,
            0x04, 0x00,
        ];
        response.extend_from_slice(body);
        response
    }

    #[test]
    fn version_and_filters_for_hs20_bss() {
        let (mut client, _stream) = create_client();
        let bss = fake_hs20_bss(BSSID);
        let profile = fake_hs20_profile();

        assert_eq!(get_hs20_version(Some(&bss)), 2);
        assert!(client.is_hs20(Some(&profile), Some(&bss)));

        let filters = client.configure_frame_filters(Some(&profile), Some(&bss));
        assert_eq!(filters, FrameFilters::GTK | FrameFilters::ARP | FrameFilters::NA);
        assert_eq!(client.driver.configured, vec![filters]);
    }

    #[test]
    fn no_filters_for_non_hs20_profile() {
        let (mut client, _stream) = create_client();
        let bss = fake_hs20_bss(BSSID);
        let profile = NetworkProfile {
            key_mgmt: KeyMgmt::PSK,
            pairwise_cipher: Cipher::CCMP,
            proto: Proto::RSN,
            ..Default::default()
        };
        let filters = client.configure_frame_filters(Some(&profile), Some(&bss));
        assert_eq!(filters, FrameFilters::empty());
        assert!(client.driver.configured.is_empty());
    }

    #[test]
    fn association_ies_for_hs20_network() {
        let (client, _stream) = create_client();
        let mut creds = CredentialTable::new();
        let profile = NetworkProfile {
            parent_cred: Some(creds.add(0x1234)),
            roaming_consortium_selection: Some(vec![0x00, 0x1b, 0xc5]),
            ..fake_hs20_profile()
        };
        let bss = fake_hs20_bss(BSSID);

        let mut buf: Vec<u8> = vec![];
        client.write_association_ies(&mut buf, &profile, &creds, &bss).expect("valid IEs");
        #[rustfmt::skip]
        assert_eq!(
            &buf[..],
            &[
                // Indication, capped at the AP's release 2
                0xdd, 0x07, 0x50, 0x6f, 0x9a, 0x10, 0x12, 0x34, 0x12,
                // Roaming Consortium Selection
                0xdd, 0x07, 0x50, 0x6f, 0x9a, 0x1d, 0x00, 0x1b, 0xc5,
            ][..]
        );
        let indication = Hs20Indication::parse(&buf[2..9]).expect("valid indication");
        assert_eq!(indication.conf.release(), 2);
        assert_eq!(indication.pps_mo_id, Some(0x1234));
    }

    #[test]
    fn no_association_ies_for_non_hs20_network() {
        let (client, _stream) = create_client();
        let profile = NetworkProfile { proto: Proto::WPA, ..fake_hs20_profile() };
        let bss = fake_hs20_bss(BSSID);
        let mut buf: Vec<u8> = vec![];
        client
            .write_association_ies(&mut buf, &profile, &CredentialTable::new(), &bss)
            .expect("nothing to write");
        assert!(buf.is_empty());
    }

    #[test]
    fn query_to_unknown_destination() {
        let (mut client, _stream) = create_client();
        let mut table = bss_table();
        let result = client.send_anqp_query(
            &mut table,
            Bssid([0x02, 0, 0, 0, 0, 0x09]),
            Subtype::WAN_METRICS.bit(),
            None,
        );
        assert!(matches!(result, Err(Error::UnknownDestination(_))));
        assert!(client.transport.sent.is_empty());
    }

    #[test_case(13, true; "complete")]
    #[test_case(10, false; "truncated")]
    fn query_and_wan_metrics_response(wan_metrics_len: usize, stored: bool) {
        let (mut client, mut stream) = create_client();
        let mut table = bss_table();
        let token = client
            .send_anqp_query(&mut table, BSSID, Subtype::WAN_METRICS.bit(), None)
            .expect("query should be sent");
        assert_eq!(client.transport.sent.len(), 1);

        client.on_anqp_response(&mut table, BSSID, &wan_metrics_response(wan_metrics_len), token);
        let store = table[&BSSID].anqp.as_ref().expect("store allocated by query");
        assert_eq!(store.get(Subtype::WAN_METRICS).is_some(), stored);

        match stream.try_next() {
            Ok(Some(Hs20Event::WanMetrics { sa, metrics })) => {
                assert!(stored);
                assert_eq!(sa, BSSID.0);
                assert_eq!(metrics.downlink_speed.get(), 10000);
            }
            Err(_) => assert!(!stored),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn response_for_bss_without_store_is_reported() {
        let (client, mut stream) = create_client();
        let mut table = bss_table();
        client.on_anqp_response(&mut table, BSSID, &wan_metrics_response(13), 1);
        assert_eq!(table[&BSSID].anqp, None);
        assert!(matches!(stream.try_next(), Ok(Some(Hs20Event::WanMetrics { .. }))));
    }

    #[test]
    fn response_does_not_touch_shared_store() {
        let (client, _stream) = create_client();
        let mut table = bss_table();
        let shared = Rc::new(AnqpElementStore::default());
        table.get_mut(&BSSID).expect("known BSS").anqp = Some(Rc::clone(&shared));
        client.on_anqp_response(&mut table, BSSID, &wan_metrics_response(13), 1);
        assert!(shared.is_empty());
        let store = table[&BSSID].anqp.as_ref().expect("store");
        assert!(store.get(Subtype::WAN_METRICS).is_some());
    }

    #[test]
    fn deauth_imminent_notification() {
        let (mut client, mut stream) = create_client();
        let mut profile = fake_hs20_profile();
        let now = Instant::now();
        let conn =
            CurrentConnection { bssid: BSSID, pmf_enabled: true, profile: Some(&mut profile) };
        // BSS reason, 10 second delay, no URL
        client.on_wnm_notification(conn, &[0x50, 0x6f, 0x9a, 0x01, 0x00, 0x0a, 0x00], now);

        assert_eq!(client.ignore_list().count(&BSSID), 1);
        assert_eq!(profile.disabled_until, Some(now + Duration::from_secs(10)));
        assert_eq!(
            stream.try_next().expect("expected event"),
            Some(Hs20Event::DeauthImminentNotice { code: 0, reauth_delay: 10, url: String::new() })
        );
    }

    #[test]
    fn terms_and_conditions_notification_without_pmf() {
        let (mut client, mut stream) = create_client();
        let conn = CurrentConnection { bssid: BSSID, pmf_enabled: false, profile: None };
        client.on_wnm_notification(conn, &[0x50, 0x6f, 0x9a, 0x02, 1, b'x'], Instant::now());
        assert!(stream.try_next().is_err(), "expected no event");
    }

    #[test]
    fn ignore_list_limit_from_config() {
        let config = Hs20Config { ignore_list_limit: 1, ..Default::default() };
        let (mut client, _stream) =
            Hs20Client::new(config, FakeTransport::default(), FakeFilterDriver::default());
        for bssid in [Bssid([1; 6]), Bssid([2; 6])] {
            let conn = CurrentConnection { bssid, pmf_enabled: true, profile: None };
            let notice = DeauthImminentNotice { code: 0, reauth_delay: 1, url: String::new() };
            client.on_deauth_imminent_notice(conn, notice, Instant::now());
        }
        assert_eq!(client.ignore_list().len(), 1);
        assert!(client.ignore_list().contains(&Bssid([2; 6])));
        client.ignore_list_mut().clear();
        assert!(client.ignore_list().is_empty());
    }
}
