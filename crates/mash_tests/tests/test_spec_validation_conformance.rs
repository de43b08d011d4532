// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Cross-crate spec-validation conformance: a `mash_core::Device` built by
//! hand, checked against the bundled `mash_spec` manifest end to end —
//! the same round trip a device's startup self-check performs before it
//! ever advertises itself.

use mash_core::capability::{
  Attribute, AttributeAccess, AttributeDataType, AttributeMeta, CommandMeta, Device, Endpoint, EndpointType,
  Feature, FeatureMap,
};
use mash_core::Version;
use mash_spec::{load_spec, validate_device};

fn meta(id: u16, name: &str, data_type: AttributeDataType, mandatory: bool) -> AttributeMeta {
  AttributeMeta {
    id,
    name: name.to_owned(),
    data_type,
    access: AttributeAccess::ReadOnly,
    mandatory,
    nullable: false,
    default: None,
    min: None,
    max: None,
    unit: None,
    description: None,
  }
}

fn device_root() -> Endpoint {
  let mut root = Endpoint::new(0, EndpointType::DeviceRoot, None);
  let mut device_info = Feature::new(0, 1, FeatureMap::default());
  device_info.add_attribute(Attribute::new(meta(0, "vendorId", AttributeDataType::Uint16, true)));
  device_info.add_attribute(Attribute::new(meta(1, "productId", AttributeDataType::Uint16, true)));
  device_info.add_attribute(Attribute::new(meta(2, "deviceName", AttributeDataType::String, true)));
  root.add_feature(device_info);
  root
}

/// A fully conformant inverter endpoint (DeviceInfo on endpoint 0 plus a
/// well-formed EnergyControl) validates clean against the bundled 1.0
/// manifest: `load_spec` and `validate_device` composed end to end,
/// rather than `validate_device` exercised against a hand-built
/// `SpecManifest` fixture the way `mash_spec`'s own unit tests do.
#[test]
fn test_conformant_inverter_validates_clean_against_bundled_spec() {
  let spec = load_spec(Version::new(1, 0)).unwrap();

  let mut device = Device::new("a1b2c3d4e5f6a7b8", 1, 1);
  device.add_endpoint(device_root());

  let mut inverter = Endpoint::new(1, EndpointType::Inverter, None);
  let mut energy_control = Feature::new(5, 1, FeatureMap::default());
  energy_control.add_attribute(Attribute::new(meta(0, "acceptsLimits", AttributeDataType::Bool, true)));
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
  inverter.add_feature(energy_control);
  device.add_endpoint(inverter);

  let result = validate_device(&spec, &device);
  assert!(result.valid, "unexpected errors: {:?}", result.errors);
  assert!(result.warnings.is_empty());
}

/// A device missing the mandatory `DeviceInfo` feature altogether fails
/// `validate_device` against the real bundled manifest (not a synthetic
/// one), confirming the bundled 1.0 spec.yaml actually marks `DeviceInfo`
/// mandatory end to end.
#[test]
fn test_device_without_device_info_fails_bundled_validation() {
  let spec = load_spec(Version::new(1, 0)).unwrap();
  let mut device = Device::new("a1b2c3d4e5f6a7b8", 1, 1);
  device.add_endpoint(Endpoint::new(0, EndpointType::DeviceRoot, None));

  let result = validate_device(&spec, &device);
  assert!(!result.valid);
  assert!(result.errors.iter().any(|e| e.contains("DeviceInfo")));
}
