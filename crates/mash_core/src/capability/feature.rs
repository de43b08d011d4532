// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Feature, Attribute, Endpoint, and Device — the capability model
//! (spec.md §3).
//!
//! A [`Feature`] bundles a set of [`Attribute`]s and [`Command`]s under a
//! stable [`FeatureType`] code. [`Endpoint`]s own a feature set keyed by
//! type (unique per endpoint); [`Device`]s own an endpoint set keyed by ID.
//! Ownership is exclusive at every level (spec.md §3): a `Device` owns its
//! `Endpoint`s, an `Endpoint` owns its `Feature`s, a `Feature` owns its
//! attribute/command tables.

use crate::capability::command::{CommandArgs, CommandContext, CommandHandler, CommandMeta, CommandResponse, SimpleResponse};
use crate::capability::value::{AttributeDataType, AttributeValue};
use crate::errors::{MashError, MashNotFoundError, MashPolicyViolationError};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;
use strum_macros::Display;

/// Meta-attribute IDs reserved by spec.md §3, present on every feature.
pub mod meta_attribute {
  pub const FEATURE_MAP: u16 = 0xFFF8;
  pub const ATTRIBUTE_LIST: u16 = 0xFFF9;
  pub const COMMAND_LIST: u16 = 0xFFFA;
  pub const EVENT_LIST: u16 = 0xFFFB;
  pub const CLUSTER_REVISION: u16 = 0xFFFD;
}

/// A 1-byte feature type code (spec.md §3 "Feature").
pub type FeatureType = u8;

/// Read/write access rule for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeAccess {
  ReadOnly,
  ReadWrite,
}

/// Static attribute metadata (spec.md §3 "Attribute" — metadata half).
#[derive(Debug, Clone, Getters, CopyGetters, Serialize, Deserialize)]
pub struct AttributeMeta {
  #[getset(get_copy = "pub")]
  pub id: u16,
  #[getset(get = "pub")]
  pub name: String,
  #[getset(get = "pub")]
  pub data_type: AttributeDataType,
  #[getset(get_copy = "pub")]
  pub access: AttributeAccess,
  #[getset(get_copy = "pub")]
  pub mandatory: bool,
  #[getset(get_copy = "pub")]
  pub nullable: bool,
  pub default: Option<AttributeValue>,
  pub min: Option<i64>,
  pub max: Option<i64>,
  pub unit: Option<String>,
  pub description: Option<String>,
}

/// An attribute's live state: its current value and last-write timestamp
/// (spec.md §3 "Attribute" — state half).
#[derive(Debug, Clone)]
pub struct Attribute {
  meta: AttributeMeta,
  value: AttributeValue,
  last_written: Option<SystemTime>,
}

impl Attribute {
  pub fn new(meta: AttributeMeta) -> Self {
    let value = meta
      .default
      .clone()
      .unwrap_or(if meta.nullable {
        AttributeValue::Null
      } else {
        Self::zero_value(&meta.data_type)
      });
    Self {
      meta,
      value,
      last_written: None,
    }
  }

  fn zero_value(data_type: &AttributeDataType) -> AttributeValue {
    match data_type {
      AttributeDataType::Uint8 => AttributeValue::Uint8(0),
      AttributeDataType::Uint16 => AttributeValue::Uint16(0),
      AttributeDataType::Uint32 => AttributeValue::Uint32(0),
      AttributeDataType::Int64 => AttributeValue::Int64(0),
      AttributeDataType::Bool => AttributeValue::Bool(false),
      AttributeDataType::String => AttributeValue::String(String::new()),
      AttributeDataType::Map { .. } => AttributeValue::Map(Default::default()),
      AttributeDataType::Array { .. } => AttributeValue::Array(Default::default()),
      AttributeDataType::Enum { values, .. } => {
        AttributeValue::Enum(values.first().copied().unwrap_or(0))
      }
    }
  }

  pub fn meta(&self) -> &AttributeMeta {
    &self.meta
  }

  pub fn value(&self) -> &AttributeValue {
    &self.value
  }

  pub fn last_written(&self) -> Option<SystemTime> {
    self.last_written
  }

  /// Writes from an external (non-owning-feature) caller. Enforces every
  /// invariant spec.md §3 lists: read-only rejection, non-nullable-never-null,
  /// enum membership, element-type constraints, min/max bounds.
  pub fn write_external(&mut self, value: AttributeValue) -> Result<(), MashError> {
    if self.meta.access == AttributeAccess::ReadOnly {
      return Err(MashPolicyViolationError::ReadOnlyAttribute(self.meta.name.clone()).into());
    }
    self.write_internal(value)
  }

  /// Writes performed through the owning feature's internal API — bypasses
  /// the read-only check but still enforces type/null/enum/range invariants.
  pub fn write_internal(&mut self, value: AttributeValue) -> Result<(), MashError> {
    if value.is_null() && !self.meta.nullable {
      return Err(MashPolicyViolationError::NotNullable(self.meta.name.clone()).into());
    }
    value.check(&self.meta.data_type, &self.meta.name, self.meta.min, self.meta.max)?;
    self.value = value;
    self.last_written = Some(SystemTime::now());
    Ok(())
  }
}

/// A feature's `FeatureMap` bitfield, advertising optional sub-capabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMap(pub u32);

impl FeatureMap {
  pub fn has(&self, bit: u8) -> bool {
    self.0 & (1 << bit) != 0
  }

  pub fn set(&mut self, bit: u8) {
    self.0 |= 1 << bit;
  }
}

/// A feature: a cluster of related attributes and commands with a stable
/// ID (spec.md §3 "Feature", GLOSSARY).
#[derive(Clone, Getters, CopyGetters)]
pub struct Feature {
  #[getset(get_copy = "pub")]
  feature_type: FeatureType,
  #[getset(get_copy = "pub")]
  revision: u16,
  #[getset(get_copy = "pub")]
  feature_map: FeatureMap,
  attributes: BTreeMap<u16, Attribute>,
  command_metas: BTreeMap<u8, CommandMeta>,
  handlers: BTreeMap<u8, CommandHandler>,
}

impl Feature {
  pub fn new(feature_type: FeatureType, revision: u16, feature_map: FeatureMap) -> Self {
    Self {
      feature_type,
      revision,
      feature_map,
      attributes: BTreeMap::new(),
      command_metas: BTreeMap::new(),
      handlers: BTreeMap::new(),
    }
  }

  pub fn add_attribute(&mut self, attribute: Attribute) -> &mut Self {
    self.attributes.insert(attribute.meta().id(), attribute);
    self
  }

  pub fn add_command(&mut self, meta: CommandMeta, handler: Option<CommandHandler>) -> &mut Self {
    let id = meta.id;
    self.command_metas.insert(id, meta);
    if let Some(handler) = handler {
      self.handlers.insert(id, handler);
    }
    self
  }

  pub fn attribute(&self, id: u16) -> Option<&Attribute> {
    self.attributes.get(&id)
  }

  pub fn attribute_mut(&mut self, id: u16) -> Option<&mut Attribute> {
    self.attributes.get_mut(&id)
  }

  pub fn attribute_ids(&self) -> Vec<u16> {
    self.attributes.keys().copied().collect()
  }

  pub fn command_ids(&self) -> Vec<u8> {
    self.command_metas.keys().copied().collect()
  }

  pub fn command_meta(&self, id: u8) -> Option<&CommandMeta> {
    self.command_metas.get(&id)
  }

  /// Invokes a command by ID. When no handler is registered, returns
  /// `{success:false}` without an error — spec.md §4.4's absent-handler
  /// fallback.
  pub async fn invoke(
    &self,
    endpoint_id: u8,
    command_id: u8,
    args: CommandArgs,
  ) -> Result<CommandResponse, MashError> {
    if !self.command_metas.contains_key(&command_id) {
      return Err(MashNotFoundError::UnknownCommand(
        command_id.to_string(),
        self.feature_type.to_string(),
      )
      .into());
    }
    let ctx = CommandContext {
      endpoint_id,
      feature_id: self.feature_type,
    };
    match self.handlers.get(&command_id) {
      Some(handler) => handler.invoke(ctx, args).await,
      None => {
        let mut resp = CommandResponse::new();
        resp.insert(
          "success".to_owned(),
          AttributeValue::Bool(SimpleResponse::failed().success),
        );
        Ok(resp)
      }
    }
  }
}

/// The 16 closed endpoint-type values spec.md §3 enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum EndpointType {
  DeviceRoot,
  GridConnection,
  Inverter,
  PvString,
  Battery,
  EvCharger,
  HeatPump,
  WaterHeater,
  Hvac,
  Appliance,
  SubMeter,
  Generator,
  EnergyStorage,
  SmartPlug,
  Meter,
  Other,
}

/// Endpoint ID 0 is reserved for the device root.
pub const DEVICE_ROOT_ENDPOINT_ID: u8 = 0;

/// A numbered logical sub-unit of a device (spec.md §3 "Endpoint").
#[derive(Clone, Getters, CopyGetters)]
pub struct Endpoint {
  #[getset(get_copy = "pub")]
  id: u8,
  #[getset(get_copy = "pub")]
  endpoint_type: EndpointType,
  #[getset(get = "pub")]
  label: Option<String>,
  features: BTreeMap<FeatureType, Feature>,
}

impl Endpoint {
  pub fn new(id: u8, endpoint_type: EndpointType, label: Option<String>) -> Self {
    Self {
      id,
      endpoint_type,
      label,
      features: BTreeMap::new(),
    }
  }

  /// Adds a feature. A feature type appearing twice on one endpoint is an
  /// invariant violation (spec.md §3 "Device") — the second insertion wins,
  /// matching the last-write-wins discipline used elsewhere for map-backed
  /// configuration (callers are expected to validate uniqueness upstream,
  /// e.g. during manifest loading, where a duplicate is a `ParseFailed`).
  pub fn add_feature(&mut self, feature: Feature) -> &mut Self {
    self.features.insert(feature.feature_type(), feature);
    self
  }

  pub fn feature(&self, feature_type: FeatureType) -> Option<&Feature> {
    self.features.get(&feature_type)
  }

  pub fn feature_mut(&mut self, feature_type: FeatureType) -> Option<&mut Feature> {
    self.features.get_mut(&feature_type)
  }

  pub fn features(&self) -> impl Iterator<Item = &Feature> {
    self.features.values()
  }

  pub fn feature_types(&self) -> Vec<FeatureType> {
    self.features.keys().copied().collect()
  }
}

/// A MASH device: a stable device ID and the ordered set of endpoints it
/// owns (spec.md §3 "Device").
#[derive(Clone, Getters)]
pub struct Device {
  #[getset(get = "pub")]
  device_id: String,
  #[getset(get_copy = "pub")]
  vendor_id: u16,
  #[getset(get_copy = "pub")]
  product_id: u16,
  endpoints: BTreeMap<u8, Endpoint>,
}

impl Device {
  pub fn new(device_id: impl Into<String>, vendor_id: u16, product_id: u16) -> Self {
    Self {
      device_id: device_id.into(),
      vendor_id,
      product_id,
      endpoints: BTreeMap::new(),
    }
  }

  pub fn add_endpoint(&mut self, endpoint: Endpoint) -> &mut Self {
    self.endpoints.insert(endpoint.id(), endpoint);
    self
  }

  pub fn endpoint(&self, id: u8) -> Option<&Endpoint> {
    self.endpoints.get(&id)
  }

  pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
    self.endpoints.values()
  }

  /// Validates the two device-level invariants spec.md §3 names: endpoint 0
  /// exists and carries exactly the DeviceInfo feature, and no feature type
  /// repeats on one endpoint (the latter is structurally guaranteed by
  /// `Endpoint`'s `BTreeMap<FeatureType, Feature>` storage).
  pub fn validate(&self, device_info_feature_type: FeatureType) -> Result<(), MashError> {
    let root = self
      .endpoints
      .get(&DEVICE_ROOT_ENDPOINT_ID)
      .ok_or_else(|| MashNotFoundError::UnknownFeature("DeviceRoot endpoint".to_owned()))?;
    if root.feature_types() != vec![device_info_feature_type] {
      return Err(
        MashNotFoundError::UnknownFeature("DeviceInfo on endpoint 0".to_owned()).into(),
      );
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn sample_meta(id: u16, access: AttributeAccess, nullable: bool) -> AttributeMeta {
    AttributeMeta {
      id,
      name: format!("attr{id}"),
      data_type: AttributeDataType::Bool,
      access,
      mandatory: true,
      nullable,
      default: None,
      min: None,
      max: None,
      unit: None,
      description: None,
    }
  }

  #[test]
  fn test_read_only_write_rejected() {
    let mut attr = Attribute::new(sample_meta(1, AttributeAccess::ReadOnly, false));
    let err = attr.write_external(AttributeValue::Bool(true)).unwrap_err();
    assert!(matches!(
      err,
      MashError::PolicyViolation(MashPolicyViolationError::ReadOnlyAttribute(_))
    ));
  }

  #[test]
  fn test_internal_write_bypasses_read_only() {
    let mut attr = Attribute::new(sample_meta(1, AttributeAccess::ReadOnly, false));
    attr.write_internal(AttributeValue::Bool(true)).unwrap();
    assert_eq!(attr.value(), &AttributeValue::Bool(true));
    assert!(attr.last_written().is_some());
  }

  #[test]
  fn test_non_nullable_rejects_null() {
    let mut attr = Attribute::new(sample_meta(1, AttributeAccess::ReadWrite, false));
    assert!(attr.write_external(AttributeValue::Null).is_err());
  }

  #[test]
  fn test_nullable_accepts_null() {
    let mut attr = Attribute::new(sample_meta(1, AttributeAccess::ReadWrite, true));
    assert!(attr.write_external(AttributeValue::Null).is_ok());
  }

  #[tokio::test]
  async fn test_unknown_command_is_not_found() {
    let feature = Feature::new(5, 1, FeatureMap::default());
    let err = feature.invoke(1, 9, CommandArgs::new()).await.unwrap_err();
    assert!(matches!(
      err,
      MashError::NotFound(MashNotFoundError::UnknownCommand(_, _))
    ));
  }

  #[tokio::test]
  async fn test_missing_handler_returns_simple_failure() {
    let mut feature = Feature::new(5, 1, FeatureMap::default());
    feature.add_command(
      CommandMeta {
        id: 2,
        name: "clearLimit".into(),
        mandatory: false,
        parameters: vec![],
        response_fields: vec![],
      },
      None,
    );
    let resp = feature.invoke(1, 2, CommandArgs::new()).await.unwrap();
    assert_eq!(resp.get("success"), Some(&AttributeValue::Bool(false)));
  }

  #[test]
  fn test_device_root_must_carry_only_device_info() {
    let mut device = Device::new("abc123", 1, 1);
    let mut root = Endpoint::new(0, EndpointType::DeviceRoot, None);
    root.add_feature(Feature::new(1, 1, FeatureMap::default()));
    device.add_endpoint(root);
    device.validate(1).unwrap();
    assert!(device.validate(2).is_err());
  }
}
