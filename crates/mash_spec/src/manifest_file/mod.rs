// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Wire shape of a spec manifest YAML document (spec.md §4.1, §6).
//!
//! These types exist purely to deserialize the bundled YAML; [`crate::manifest::SpecManifest`]
//! is the validated, query-friendly form the rest of the crate (and `mash_usecase`)
//! actually consumes. The base/feature/attribute/command table split mirrors
//! a device configuration file format with the same base-device-then-overrides
//! shape, adapted from JSON to YAML per spec.md §6.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestVersion {
  pub major: u8,
  pub minor: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeSpecEntry {
  pub name: String,
  pub id: u16,
  #[serde(rename = "dataType")]
  pub data_type: String,
  #[serde(default)]
  pub nullable: bool,
  #[serde(default)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSpecEntry {
  pub name: String,
  pub id: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeTable {
  #[serde(default)]
  pub mandatory: Vec<AttributeSpecEntry>,
  #[serde(default)]
  pub optional: Vec<AttributeSpecEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandTable {
  #[serde(default)]
  pub mandatory: Vec<CommandSpecEntry>,
  #[serde(default)]
  pub optional: Vec<CommandSpecEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSpecEntry {
  pub id: u8,
  pub revision: u16,
  #[serde(default)]
  pub mandatory: bool,
  #[serde(default)]
  pub attributes: AttributeTable,
  #[serde(default)]
  pub commands: CommandTable,
}

/// The full manifest document: `specs/<major.minor>.yaml` (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
  pub version: ManifestVersion,
  pub features: BTreeMap<String, FeatureSpecEntry>,
}
