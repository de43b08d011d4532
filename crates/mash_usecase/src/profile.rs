// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! `DeviceProfile`/`EndpointProfile`/`FeatureProfile`: the matcher's view
//! of a device (spec.md §3), built either from a locally-owned [`Device`]
//! or by remote probing via [`crate::device_reader::DeviceReader`].

use mash_core::capability::{AttributeValue, Device, EndpointType, Feature, FeatureMap};
use std::collections::{BTreeMap, BTreeSet};

/// One feature's presence and advertised capability surface, as seen by
/// the matcher.
#[derive(Debug, Clone, Default)]
pub struct FeatureProfile {
  pub feature_id: u8,
  pub attribute_ids: BTreeSet<u16>,
  pub command_ids: BTreeSet<u8>,
  pub feature_map: FeatureMap,
  /// Boolean-valued capability attributes, keyed by attribute ID, so the
  /// matcher can test `requiredValue` constraints (spec.md §3
  /// "DeviceProfile / EndpointProfile / FeatureProfile").
  pub bool_values: BTreeMap<u16, bool>,
}

impl FeatureProfile {
  pub fn from_feature(feature: &Feature) -> Self {
    let mut bool_values = BTreeMap::new();
    for id in feature.attribute_ids() {
      if let Some(attr) = feature.attribute(id) {
        if let AttributeValue::Bool(v) = attr.value() {
          bool_values.insert(id, *v);
        }
      }
    }
    Self {
      feature_id: feature.feature_type(),
      attribute_ids: feature.attribute_ids().into_iter().collect(),
      command_ids: feature.command_ids().into_iter().collect(),
      feature_map: feature.feature_map(),
      bool_values,
    }
  }
}

/// One endpoint's present features, as seen by the matcher.
#[derive(Debug, Clone)]
pub struct EndpointProfile {
  pub endpoint_id: u8,
  pub endpoint_type: EndpointType,
  pub features: BTreeMap<u8, FeatureProfile>,
}

impl EndpointProfile {
  pub fn new(endpoint_id: u8, endpoint_type: EndpointType) -> Self {
    Self {
      endpoint_id,
      endpoint_type,
      features: BTreeMap::new(),
    }
  }

  pub fn with_feature(mut self, profile: FeatureProfile) -> Self {
    self.features.insert(profile.feature_id, profile);
    self
  }

  pub fn feature(&self, feature_id: u8) -> Option<&FeatureProfile> {
    self.features.get(&feature_id)
  }
}

/// A whole device's profile, keyed by endpoint ID (spec.md §3).
#[derive(Debug, Clone, Default)]
pub struct DeviceProfile {
  pub endpoints: BTreeMap<u8, EndpointProfile>,
}

impl DeviceProfile {
  pub fn endpoints_in_order(&self) -> impl Iterator<Item = &EndpointProfile> {
    self.endpoints.values()
  }
}

/// Builds a [`DeviceProfile`] directly from a locally-owned [`Device`],
/// reading capability booleans straight from owned feature state (spec.md
/// §4.2.4: "EvaluateDevice ... build a local profile").
pub fn profile_from_device(device: &Device) -> DeviceProfile {
  let mut endpoints = BTreeMap::new();
  for endpoint in device.endpoints() {
    let mut profile = EndpointProfile::new(endpoint.id(), endpoint.endpoint_type());
    for feature in endpoint.features() {
      profile = profile.with_feature(FeatureProfile::from_feature(feature));
    }
    endpoints.insert(endpoint.id(), profile);
  }
  DeviceProfile { endpoints }
}

#[cfg(test)]
mod test {
  use super::*;
  use mash_core::capability::{Attribute, AttributeAccess, AttributeDataType, AttributeMeta, Endpoint};

  #[test]
  fn test_profile_from_device_captures_bool_attribute() {
    let mut device = Device::new("a1b2c3d4e5f6a7b8", 1, 1);
    let mut endpoint = Endpoint::new(1, EndpointType::Inverter, None);
    let mut feature = Feature::new(5, 1, FeatureMap::default());
    feature.add_attribute(Attribute::new(AttributeMeta {
      id: 0,
      name: "acceptsLimits".into(),
      data_type: AttributeDataType::Bool,
      access: AttributeAccess::ReadOnly,
      mandatory: true,
      nullable: false,
      default: Some(AttributeValue::Bool(true)),
      min: None,
      max: None,
      unit: None,
      description: None,
    }));
    endpoint.add_feature(feature);
    device.add_endpoint(endpoint);

    let profile = profile_from_device(&device);
    let endpoint_profile = &profile.endpoints[&1];
    let feature_profile = endpoint_profile.feature(5).unwrap();
    assert_eq!(feature_profile.bool_values.get(&0), Some(&true));
  }
}
