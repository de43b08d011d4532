// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Cross-crate discovery conformance: the TXT codec and the
//! `DiscoveryManager` state machine exercised together, the way a device
//! process actually drives them — encode what the manager hands the
//! advertiser, decode it back, and watch the state transitions a
//! commissioning/zone lifecycle produces.

use mash_discovery::{
  txt, CommissionableInfo, DiscoveryEvent, DiscoveryManager, DiscoveryState, OperationalInfo, QuietAdvertiser,
  MIN_WINDOW,
};
use std::sync::Arc;
use std::time::Duration;

fn sample_commissionable() -> CommissionableInfo {
  CommissionableInfo {
    discriminator: 777,
    categories: vec![2, 9],
    serial: "SN-CONF-1".into(),
    brand: "Acme".into(),
    model: "Charger9000".into(),
    device_name: Some("Garage Charger".into()),
    port: 8443,
    host: "charger.local".into(),
  }
}

fn sample_zone(zone_id: &str) -> OperationalInfo {
  OperationalInfo {
    zone_id: zone_id.into(),
    device_id: "f9e8d7c6b5a49382".into(),
    vendor_product: Some((1234, 5678)),
    firmware: Some("2.0.0".into()),
    feature_map: Some(0x0003),
    endpoint_count: Some(1),
  }
}

/// The `CommissionableInfo` a `DiscoveryManager` carries into
/// `EnterCommissioningMode` must survive an encode/decode round trip
/// through the TXT codec unchanged — this is what actually goes out over
/// the wire once a real `Advertiser` is wired in instead of the quiet
/// double.
#[tokio::test]
async fn test_commissioning_info_round_trips_through_txt_codec() {
  let advertiser = Arc::new(QuietAdvertiser::new());
  let manager = DiscoveryManager::with_default_window(advertiser);
  let info = sample_commissionable();
  manager.set_commissionable_info(info.clone()).await;
  manager.enter_commissioning_mode().await.unwrap();
  assert_eq!(manager.state().await, DiscoveryState::CommissioningOpen);

  let encoded = txt::encode_commissionable(&info);
  let decoded = txt::decode_commissionable(&encoded, info.port, &info.host).unwrap();
  assert_eq!(decoded, info);
}

/// A full device-side lifecycle: open a short commissioning window, let it
/// expire untouched, then join a zone and confirm the zone's
/// `OperationalInfo` round-trips through the TXT codec the same way the
/// commissionable info did above. Exercises `DiscoveryManager` state
/// transitions, its broadcast event channel, and the operational TXT codec
/// in the same flow, rather than each in isolation.
#[tokio::test(start_paused = true)]
async fn test_commissioning_window_expiry_then_zone_join_round_trips() {
  let advertiser = Arc::new(QuietAdvertiser::new());
  let manager = DiscoveryManager::new(MIN_WINDOW, advertiser.clone()).unwrap();
  let mut events = manager.subscribe();

  manager.set_commissionable_info(sample_commissionable()).await;
  manager.enter_commissioning_mode().await.unwrap();
  assert!(advertiser.commissionable_active());

  tokio::time::advance(MIN_WINDOW + Duration::from_secs(1)).await;
  tokio::task::yield_now().await;
  assert_eq!(manager.state().await, DiscoveryState::Uncommissioned);
  assert!(!advertiser.commissionable_active());

  let mut timed_out = false;
  while let Ok(event) = events.try_recv() {
    if matches!(event, DiscoveryEvent::CommissioningTimedOut) {
      timed_out = true;
    }
  }
  assert!(timed_out, "expired window must surface CommissioningTimedOut");

  let zone = sample_zone("a1b2c3d4e5f6a7b8");
  manager.add_zone(zone.clone()).await.unwrap();
  assert_eq!(manager.state().await, DiscoveryState::Operational);

  let encoded = txt::encode_operational(&zone);
  let decoded = txt::decode_operational(&encoded).unwrap();
  assert_eq!(decoded, zone);
}
