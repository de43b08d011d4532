// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! [`SpecManifest`] and [`load_spec`]: the per-version registry of features
//! and the process-wide cache that loads it exactly once (spec.md §4.1).
//!
//! Manifests are bundled as YAML via `include_str!`, validated against a
//! JSON Schema at first load (see DESIGN.md for why this crate runs that
//! check at load time rather than at build time), then cached in a
//! process-wide [`DashMap`] keyed by [`Version`] with double-checked
//! read/load-and-store, matching the concurrency policy spec.md §5
//! requires of the spec manifest cache.

use crate::manifest_file::{FeatureSpecEntry, ManifestFile};
use mash_core::errors::{MashError, MashNotFoundError, MashParseFailedError};
use mash_core::Version;
use once_cell_like_cache::ManifestCache;
use std::collections::BTreeMap;
use std::sync::Arc;

mod once_cell_like_cache {
  use dashmap::DashMap;
  use mash_core::Version;
  use std::sync::Arc;

  use super::SpecManifest;

  /// A concurrent map with lazy init and double-checked load, per spec.md
  /// §5 ("The SpecManifest cache is a concurrent map with double-checked
  /// read/load-and-store").
  #[derive(Default)]
  pub struct ManifestCache {
    inner: DashMap<Version, Arc<SpecManifest>>,
  }

  impl ManifestCache {
    pub fn get_or_try_init<F, E>(&self, version: Version, init: F) -> Result<Arc<SpecManifest>, E>
    where
      F: FnOnce() -> Result<SpecManifest, E>,
    {
      if let Some(existing) = self.inner.get(&version) {
        return Ok(existing.clone());
      }
      let built = Arc::new(init()?);
      let entry = self
        .inner
        .entry(version)
        .or_insert_with(|| built.clone());
      Ok(entry.clone())
    }
  }
}

static MANIFEST_CACHE: std::sync::OnceLock<ManifestCache> = std::sync::OnceLock::new();

fn cache() -> &'static ManifestCache {
  MANIFEST_CACHE.get_or_init(ManifestCache::default)
}

/// A single feature's name/id/revision/mandatory-ness plus its mandatory
/// and optional attribute/command tables, keyed for fast name/id lookup in
/// both directions.
#[derive(Debug, Clone)]
pub struct FeatureSpec {
  pub name: String,
  pub id: u8,
  pub revision: u16,
  pub mandatory: bool,
  pub mandatory_attributes: BTreeMap<String, u16>,
  pub optional_attributes: BTreeMap<String, u16>,
  pub mandatory_commands: BTreeMap<String, u8>,
  pub optional_commands: BTreeMap<String, u8>,
}

impl FeatureSpec {
  fn from_entry(name: &str, entry: &FeatureSpecEntry) -> Self {
    Self {
      name: name.to_owned(),
      id: entry.id,
      revision: entry.revision,
      mandatory: entry.mandatory,
      mandatory_attributes: entry
        .attributes
        .mandatory
        .iter()
        .map(|a| (a.name.clone(), a.id))
        .collect(),
      optional_attributes: entry
        .attributes
        .optional
        .iter()
        .map(|a| (a.name.clone(), a.id))
        .collect(),
      mandatory_commands: entry
        .commands
        .mandatory
        .iter()
        .map(|c| (c.name.clone(), c.id))
        .collect(),
      optional_commands: entry
        .commands
        .optional
        .iter()
        .map(|c| (c.name.clone(), c.id))
        .collect(),
    }
  }

  pub fn attribute_id(&self, name: &str) -> Option<u16> {
    self
      .mandatory_attributes
      .get(name)
      .or_else(|| self.optional_attributes.get(name))
      .copied()
  }

  pub fn command_id(&self, name: &str) -> Option<u8> {
    self
      .mandatory_commands
      .get(name)
      .or_else(|| self.optional_commands.get(name))
      .copied()
  }
}

/// A loaded, validated spec manifest for one protocol version (spec.md
/// §4.1).
#[derive(Debug, Clone)]
pub struct SpecManifest {
  pub version: Version,
  features_by_name: BTreeMap<String, FeatureSpec>,
  features_by_id: BTreeMap<u8, String>,
}

impl SpecManifest {
  fn from_file(version: Version, file: ManifestFile) -> Result<Self, MashError> {
    let mut features_by_name = BTreeMap::new();
    let mut features_by_id = BTreeMap::new();
    for (name, entry) in &file.features {
      let spec = FeatureSpec::from_entry(name, entry);
      features_by_id.insert(spec.id, name.clone());
      features_by_name.insert(name.clone(), spec);
    }
    Ok(Self {
      version,
      features_by_name,
      features_by_id,
    })
  }

  /// Sorted list of mandatory feature names, per spec.md §4.1.
  pub fn mandatory_features(&self) -> Vec<String> {
    let mut names: Vec<String> = self
      .features_by_name
      .values()
      .filter(|f| f.mandatory)
      .map(|f| f.name.clone())
      .collect();
    names.sort();
    names
  }

  pub fn feature_by_id(&self, id: u8) -> Option<(&str, &FeatureSpec)> {
    let name = self.features_by_id.get(&id)?;
    self
      .features_by_name
      .get(name)
      .map(|spec| (name.as_str(), spec))
  }

  pub fn feature_by_name(&self, name: &str) -> Option<&FeatureSpec> {
    self.features_by_name.get(name)
  }

  pub fn features(&self) -> impl Iterator<Item = &FeatureSpec> {
    self.features_by_name.values()
  }
}

/// Parses and validates a manifest YAML string against the bundled schema,
/// without consulting or populating the process-wide cache. Exposed for
/// tests and for callers that load a manifest from a non-bundled source
/// (e.g. an out-of-band update).
pub fn parse_manifest(version: Version, yaml: &str) -> Result<SpecManifest, MashError> {
  crate::schema::validate_manifest_yaml(yaml)?;
  let file: ManifestFile = serde_yaml::from_str(yaml)
    .map_err(|e| MashParseFailedError::YamlParseError(e.to_string()))?;
  if file.version.major != version.major || file.version.minor != version.minor {
    return Err(
      MashParseFailedError::YamlParseError(format!(
        "manifest declares version {}.{} but was requested as {}",
        file.version.major, file.version.minor, version
      ))
      .into(),
    );
  }
  SpecManifest::from_file(version, file)
}

/// Loads (and caches) the spec manifest for `version`, per spec.md §4.1:
/// "idempotent, cached per version for the process lifetime."
pub fn load_spec(version: Version) -> Result<Arc<SpecManifest>, MashError> {
  cache().get_or_try_init(version, || {
    let yaml = crate::bundled::manifest_yaml_for(version)
      .ok_or_else(|| MashError::from(MashNotFoundError::SpecVersionNotFound(version.to_string())))?;
    parse_manifest(version, yaml)
  })
}

#[cfg(test)]
mod test {
  use super::*;

  const SAMPLE_YAML: &str = r#"
version: {major: 1, minor: 0}
features:
  DeviceInfo:
    id: 0
    revision: 1
    mandatory: true
    attributes:
      mandatory:
        - {name: vendorId, id: 0, dataType: uint16}
        - {name: productId, id: 1, dataType: uint16}
    commands: {}
  EnergyControl:
    id: 5
    revision: 1
    mandatory: false
    attributes:
      mandatory:
        - {name: acceptsLimits, id: 0, dataType: bool}
      optional:
        - {name: isPausable, id: 1, dataType: bool}
    commands:
      mandatory:
        - {name: setLimit, id: 0}
      optional:
        - {name: clearLimit, id: 1}
"#;

  #[test]
  fn test_parse_manifest_and_mandatory_features() {
    let manifest = parse_manifest(Version::new(1, 0), SAMPLE_YAML).unwrap();
    assert_eq!(manifest.mandatory_features(), vec!["DeviceInfo".to_string()]);
  }

  #[test]
  fn test_feature_by_id() {
    let manifest = parse_manifest(Version::new(1, 0), SAMPLE_YAML).unwrap();
    let (name, spec) = manifest.feature_by_id(5).unwrap();
    assert_eq!(name, "EnergyControl");
    assert_eq!(spec.attribute_id("acceptsLimits"), Some(0));
    assert_eq!(spec.command_id("setLimit"), Some(0));
  }

  #[test]
  fn test_version_mismatch_rejected() {
    let err = parse_manifest(Version::new(2, 0), SAMPLE_YAML).unwrap_err();
    assert!(matches!(err, MashError::ParseFailed(_)));
  }

  #[test]
  fn test_load_spec_is_cached() {
    let a = load_spec(Version::new(1, 0)).unwrap();
    let b = load_spec(Version::new(1, 0)).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
  }

  #[test]
  fn test_load_spec_unknown_version() {
    let err = load_spec(Version::new(99, 0)).unwrap_err();
    assert!(matches!(err, MashError::NotFound(MashNotFoundError::SpecVersionNotFound(_))));
  }
}
