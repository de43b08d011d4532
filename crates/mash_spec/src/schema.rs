// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! JSON Schema validation of manifest YAML, run once at load time.
//!
//! A sibling device-configuration format validates its merged config JSON
//! against a bundled schema at build time; this crate runs the equivalent
//! check at load time instead (see `crate::manifest`'s module doc), because
//! a manifest is versioned data consulted at runtime rather than baked into
//! one merged blob.

use jsonschema::Validator;
use mash_core::errors::{MashError, MashParseFailedError};
use std::sync::OnceLock;

const SCHEMA_JSON: &str = include_str!("../schema/spec-manifest-schema-v1.json");

static SCHEMA: OnceLock<Validator> = OnceLock::new();

fn schema() -> &'static Validator {
  SCHEMA.get_or_init(|| {
    let schema_value: serde_json::Value =
      serde_json::from_str(SCHEMA_JSON).expect("bundled schema is valid JSON");
    jsonschema::validator_for(&schema_value).expect("bundled schema is valid JSON Schema")
  })
}

/// Validates a manifest YAML document's shape against the bundled schema.
/// Structural errors (unknown top-level keys, wrong field types, missing
/// required fields) are caught here, before `serde_yaml` ever attempts to
/// build the strongly-typed [`crate::manifest_file::ManifestFile`].
pub fn validate_manifest_yaml(yaml: &str) -> Result<(), MashError> {
  let value: serde_json::Value = serde_yaml::from_str(yaml)
    .map_err(|e| MashParseFailedError::YamlParseError(e.to_string()))?;
  let errors: Vec<String> = schema()
    .iter_errors(&value)
    .map(|e| e.to_string())
    .collect();
  if errors.is_empty() {
    Ok(())
  } else {
    Err(MashParseFailedError::SchemaValidationError(errors.join("; ")).into())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_bundled_manifest_passes_schema() {
    let yaml = include_str!("../manifests/1.0/spec.yaml");
    assert!(validate_manifest_yaml(yaml).is_ok());
  }

  #[test]
  fn test_unknown_top_level_key_rejected() {
    let yaml = "version: {major: 1, minor: 0}\nfeatures: {}\nbogus: true\n";
    assert!(validate_manifest_yaml(yaml).is_err());
  }

  #[test]
  fn test_missing_required_field_rejected() {
    let yaml = "version: {major: 1, minor: 0}\nfeatures:\n  DeviceInfo:\n    revision: 1\n";
    assert!(validate_manifest_yaml(yaml).is_err());
  }
}
