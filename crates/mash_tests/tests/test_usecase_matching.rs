// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

use mash_core::capability::EndpointType;
use mash_core::Version;
use mash_usecase::{match_device, profile::FeatureProfile, DeviceMatchOutcome, DeviceProfile, EndpointProfile};
use std::collections::BTreeMap;

fn inverter_endpoint() -> EndpointProfile {
  let mut energy_control = FeatureProfile {
    feature_id: 5,
    ..Default::default()
  };
  energy_control.attribute_ids.insert(0);
  energy_control.command_ids.insert(0);
  energy_control.bool_values.insert(0, true);

  let mut electrical = FeatureProfile {
    feature_id: 9,
    ..Default::default()
  };
  electrical.attribute_ids.insert(0);
  electrical.attribute_ids.insert(1);

  let mut measurement = FeatureProfile {
    feature_id: 10,
    ..Default::default()
  };
  measurement.attribute_ids.insert(0);

  EndpointProfile::new(2, EndpointType::Inverter)
    .with_feature(energy_control)
    .with_feature(electrical)
    .with_feature(measurement)
}

/// A grid-tied inverter advertising GPL end to end: load the bundled
/// registry rather than hand-parsing one use case, build a multi-endpoint
/// device profile, and confirm the matcher picks the inverter endpoint
/// over an incompatible root endpoint.
#[test]
fn test_gpl_matches_inverter_endpoint_on_multi_endpoint_device() {
  let registry = mash_usecase::load_registry(Version::new(1, 0)).unwrap();
  let gpl = registry.get("GPL").expect("bundled registry carries GPL");

  let mut endpoints = BTreeMap::new();
  endpoints.insert(0, EndpointProfile::new(0, EndpointType::DeviceRoot));
  endpoints.insert(2, inverter_endpoint());
  let device = DeviceProfile { endpoints };

  match match_device(gpl, &device) {
    DeviceMatchOutcome::Matched { endpoint_id, scenarios } => {
      assert_eq!(endpoint_id, 2);
      assert!(scenarios.has_base());
      assert_eq!(scenarios.0, 0b1111);
    }
    other => panic!("expected a BASE match on the inverter endpoint, got {other:?}"),
  }
}

/// An EV charger only ever sees CONSUMPTION and MEASUREMENT from GPL, never
/// PRODUCTION, because PRODUCTION's endpoint-type whitelist excludes it.
#[test]
fn test_gpl_production_scenario_excluded_on_ev_charger() {
  let registry = mash_usecase::load_registry(Version::new(1, 0)).unwrap();
  let gpl = registry.get("GPL").expect("bundled registry carries GPL");

  let mut endpoint = inverter_endpoint();
  endpoint.endpoint_type = EndpointType::EvCharger;
  let mut endpoints = BTreeMap::new();
  endpoints.insert(2, endpoint);
  let device = DeviceProfile { endpoints };

  match match_device(gpl, &device) {
    DeviceMatchOutcome::Matched { scenarios, .. } => {
      assert_eq!(scenarios.0, 0b1011, "PRODUCTION bit must be cleared on an EV_CHARGER endpoint");
    }
    other => panic!("expected Matched, got {other:?}"),
  }
}

/// A device that implements none of EnergyControl never matches GPL's BASE
/// scenario; `match_device` falls back to the first compatible endpoint
/// and reports exactly what is missing.
#[test]
fn test_gpl_reports_missing_requirements_on_bare_endpoint() {
  let registry = mash_usecase::load_registry(Version::new(1, 0)).unwrap();
  let gpl = registry.get("GPL").expect("bundled registry carries GPL");

  let mut endpoints = BTreeMap::new();
  endpoints.insert(1, EndpointProfile::new(1, EndpointType::Inverter));
  let device = DeviceProfile { endpoints };

  match match_device(gpl, &device) {
    DeviceMatchOutcome::Unmatched { endpoint_id, missing } => {
      assert_eq!(endpoint_id, 1);
      assert!(missing.iter().any(|m| m == "EnergyControl"));
    }
    other => panic!("expected Unmatched, got {other:?}"),
  }
}
