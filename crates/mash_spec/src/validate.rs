// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! `ValidateDevice`: checks a device's advertised capabilities against the
//! spec manifest (spec.md §4.1, §7: "ValidationResult"). Non-fatal — callers
//! inspect `errors`/`warnings` rather than receiving a `Result::Err`.

use crate::manifest::SpecManifest;
use mash_core::capability::Device;
use std::collections::BTreeSet;

/// Structured, non-fatal validation outcome. `valid` is `errors.is_empty()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
  pub valid: bool,
  pub errors: Vec<String>,
  pub warnings: Vec<String>,
}

impl ValidationResult {
  fn finish(errors: Vec<String>, warnings: Vec<String>) -> Self {
    Self {
      valid: errors.is_empty(),
      errors,
      warnings,
    }
  }
}

/// Validates `device` against `spec` per spec.md §4.1's bullet list:
/// absent mandatory features/attributes/commands are fatal errors, revision
/// mismatches are warnings, unknown (unmanifested) features are ignored.
pub fn validate_device(spec: &SpecManifest, device: &Device) -> ValidationResult {
  let mut errors = Vec::new();
  let mut warnings = Vec::new();

  let present_feature_ids: BTreeSet<u8> = device
    .endpoints()
    .flat_map(|endpoint| endpoint.feature_types())
    .collect();

  for name in spec.mandatory_features() {
    let feature_spec = match spec.feature_by_name(&name) {
      Some(spec) => spec,
      None => continue,
    };
    if !present_feature_ids.contains(&feature_spec.id) {
      errors.push(format!("missing mandatory feature: {name}"));
    }
  }

  for endpoint in device.endpoints() {
    for feature in endpoint.features() {
      let Some((name, feature_spec)) = spec.feature_by_id(feature.feature_type()) else {
        continue;
      };

      if feature.revision() != feature_spec.revision {
        warnings.push(format!(
          "feature {name} revision mismatch: device={}, spec={}",
          feature.revision(),
          feature_spec.revision
        ));
      }

      let attribute_ids: BTreeSet<u16> = feature.attribute_ids().into_iter().collect();
      for (attr_name, attr_id) in &feature_spec.mandatory_attributes {
        if !attribute_ids.contains(attr_id) {
          errors.push(format!(
            "feature {name} missing mandatory attribute: {attr_name}"
          ));
        }
      }

      let command_ids: BTreeSet<u8> = feature.command_ids().into_iter().collect();
      for (cmd_name, cmd_id) in &feature_spec.mandatory_commands {
        if !command_ids.contains(cmd_id) {
          errors.push(format!(
            "feature {name} missing mandatory command: {cmd_name}"
          ));
        }
      }
    }
  }

  ValidationResult::finish(errors, warnings)
}

#[cfg(test)]
mod test {
  use super::*;
  use mash_core::capability::{
    Attribute, AttributeAccess, AttributeDataType, AttributeMeta, CommandMeta, Endpoint,
    EndpointType, Feature, FeatureMap,
  };
  use mash_core::Version;

  fn device_info_meta(id: u16, name: &str) -> AttributeMeta {
    AttributeMeta {
      id,
      name: name.to_owned(),
      data_type: AttributeDataType::Uint16,
      access: AttributeAccess::ReadOnly,
      mandatory: true,
      nullable: false,
      default: None,
      min: None,
      max: None,
      unit: None,
      description: None,
    }
  }

  fn sample_device(include_energy_control: bool) -> Device {
    let mut device = Device::new("a1b2c3d4e5f6a7b8", 1, 1);
    let mut root = Endpoint::new(0, EndpointType::DeviceRoot, None);
    let mut device_info = Feature::new(0, 1, FeatureMap::default());
    device_info.add_attribute(Attribute::new(device_info_meta(0, "vendorId")));
    device_info.add_attribute(Attribute::new(device_info_meta(1, "productId")));
    device_info.add_attribute(Attribute::new(AttributeMeta {
      data_type: AttributeDataType::String,
      ..device_info_meta(2, "deviceName")
    }));
    root.add_feature(device_info);
    device.add_endpoint(root);

    if include_energy_control {
      let mut endpoint = Endpoint::new(1, EndpointType::Inverter, None);
      let mut energy_control = Feature::new(5, 1, FeatureMap::default());
      energy_control.add_attribute(Attribute::new(AttributeMeta {
        data_type: AttributeDataType::Bool,
        ..device_info_meta(0, "acceptsLimits")
      }));
      energy_control.add_command(
        CommandMeta {
          id: 0,
          name: "setLimit".into(),
          mandatory: true,
          parameters: vec![],
          response_fields: vec![],
        },
        None,
      );
      endpoint.add_feature(energy_control);
      device.add_endpoint(endpoint);
    }
    device
  }

  #[test]
  fn test_valid_device_has_no_errors() {
    let spec = crate::manifest::load_spec(Version::new(1, 0)).unwrap();
    let device = sample_device(true);
    let result = validate_device(&spec, &device);
    assert!(result.valid, "unexpected errors: {:?}", result.errors);
  }

  #[test]
  fn test_missing_mandatory_feature_is_error() {
    let spec = crate::manifest::load_spec(Version::new(1, 0)).unwrap();
    let mut device = Device::new("a1b2c3d4e5f6a7b8", 1, 1);
    device.add_endpoint(Endpoint::new(0, EndpointType::DeviceRoot, None));
    let result = validate_device(&spec, &device);
    assert!(!result.valid);
    assert!(result
      .errors
      .iter()
      .any(|e| e.contains("missing mandatory feature: DeviceInfo")));
  }

  #[test]
  fn test_missing_mandatory_attribute_on_present_feature_is_error() {
    let spec = crate::manifest::load_spec(Version::new(1, 0)).unwrap();
    let mut device = sample_device(true);
    let mut endpoint = Endpoint::new(2, EndpointType::EvCharger, None);
    // EnergyControl present but missing its mandatory acceptsLimits attribute.
    endpoint.add_feature(Feature::new(5, 1, FeatureMap::default()));
    device.add_endpoint(endpoint);
    let result = validate_device(&spec, &device);
    assert!(result
      .errors
      .iter()
      .any(|e| e.contains("missing mandatory attribute: acceptsLimits")));
  }

  #[test]
  fn test_revision_mismatch_is_warning_not_error() {
    let spec = crate::manifest::load_spec(Version::new(1, 0)).unwrap();
    let mut device = sample_device(false);
    let mut endpoint = Endpoint::new(1, EndpointType::Inverter, None);
    let mut energy_control = Feature::new(5, 99, FeatureMap::default());
    energy_control.add_attribute(Attribute::new(AttributeMeta {
      data_type: AttributeDataType::Bool,
      ..device_info_meta(0, "acceptsLimits")
    }));
    energy_control.add_command(
      CommandMeta {
        id: 0,
        name: "setLimit".into(),
        mandatory: true,
        parameters: vec![],
        response_fields: vec![],
      },
      None,
    );
    endpoint.add_feature(energy_control);
    device.add_endpoint(endpoint);

    let result = validate_device(&spec, &device);
    assert!(result.valid);
    assert!(result
      .warnings
      .iter()
      .any(|w| w.contains("revision mismatch")));
  }
}
