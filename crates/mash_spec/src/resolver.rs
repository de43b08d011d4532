// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Resolves the symbolic feature/attribute/command names used in use-case
//! YAML (spec.md §4.2.1/§6) to the numeric IDs the rest of the stack
//! operates on, against a loaded [`SpecManifest`] (spec.md §4.1: "Name
//! resolution").
//!
//! `mash_usecase` depends on this module so it never has to re-parse or
//! re-walk manifest YAML itself — it only ever sees resolved IDs.

use crate::manifest::SpecManifest;
use mash_core::errors::{MashError, MashNotFoundError};

/// A feature requirement with its name resolved to a numeric ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFeatureRequirement {
  pub feature_name: String,
  pub feature_id: u8,
  pub required: bool,
  pub attributes: Vec<ResolvedAttributeRequirement>,
  pub commands: Vec<ResolvedCommandRequirement>,
  pub subscribe_all: bool,
}

/// An attribute requirement with its name resolved to a numeric ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttributeRequirement {
  pub attribute_name: String,
  pub attribute_id: u16,
  /// Currently only boolean equality is modelled (spec.md §3:
  /// "FeatureRequirement").
  pub required_value: Option<bool>,
}

/// A command requirement with its name resolved to a numeric ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommandRequirement {
  pub command_name: String,
  pub command_id: u8,
}

/// Resolves a bare feature name to its numeric ID and [`FeatureSpec`], for
/// callers (the use-case loader) that need the spec for attribute/command
/// resolution without re-parsing.
pub fn resolve_feature<'a>(
  manifest: &'a SpecManifest,
  feature_name: &str,
) -> Result<(u8, &'a crate::manifest::FeatureSpec), MashError> {
  let spec = manifest
    .feature_by_name(feature_name)
    .ok_or_else(|| MashNotFoundError::UnknownFeature(feature_name.to_owned()))?;
  Ok((spec.id, spec))
}

/// Resolves an attribute name against a known feature's spec, naming the
/// enclosing feature in the error per spec.md §4.1.
pub fn resolve_attribute(
  feature_name: &str,
  feature_spec: &crate::manifest::FeatureSpec,
  attribute_name: &str,
  required_value: Option<bool>,
) -> Result<ResolvedAttributeRequirement, MashError> {
  let attribute_id = feature_spec.attribute_id(attribute_name).ok_or_else(|| {
    MashNotFoundError::UnknownAttribute(attribute_name.to_owned(), feature_name.to_owned())
  })?;
  Ok(ResolvedAttributeRequirement {
    attribute_name: attribute_name.to_owned(),
    attribute_id,
    required_value,
  })
}

/// Resolves a command name against a known feature's spec, naming the
/// enclosing feature in the error per spec.md §4.1.
pub fn resolve_command(
  feature_name: &str,
  feature_spec: &crate::manifest::FeatureSpec,
  command_name: &str,
) -> Result<ResolvedCommandRequirement, MashError> {
  let command_id = feature_spec
    .command_id(command_name)
    .ok_or_else(|| MashNotFoundError::UnknownCommand(command_name.to_owned(), feature_name.to_owned()))?;
  Ok(ResolvedCommandRequirement {
    command_name: command_name.to_owned(),
    command_id,
  })
}

#[cfg(test)]
mod test {
  use super::*;
  use mash_core::Version;

  fn manifest() -> std::sync::Arc<SpecManifest> {
    crate::manifest::load_spec(Version::new(1, 0)).unwrap()
  }

  #[test]
  fn test_resolve_feature_success() {
    let manifest = manifest();
    let (id, spec) = resolve_feature(&manifest, "EnergyControl").unwrap();
    assert_eq!(id, 5);
    assert_eq!(spec.name, "EnergyControl");
  }

  #[test]
  fn test_resolve_feature_unknown() {
    let manifest = manifest();
    let err = resolve_feature(&manifest, "NoSuchFeature").unwrap_err();
    assert!(matches!(
      err,
      MashError::NotFound(MashNotFoundError::UnknownFeature(_))
    ));
  }

  #[test]
  fn test_resolve_attribute_success_and_failure() {
    let manifest = manifest();
    let (_, spec) = resolve_feature(&manifest, "EnergyControl").unwrap();
    let resolved = resolve_attribute("EnergyControl", spec, "acceptsLimits", Some(true)).unwrap();
    assert_eq!(resolved.attribute_id, 0);
    assert_eq!(resolved.required_value, Some(true));

    let err = resolve_attribute("EnergyControl", spec, "bogus", None).unwrap_err();
    assert!(matches!(
      err,
      MashError::NotFound(MashNotFoundError::UnknownAttribute(_, _))
    ));
  }

  #[test]
  fn test_resolve_command_success_and_failure() {
    let manifest = manifest();
    let (_, spec) = resolve_feature(&manifest, "EnergyControl").unwrap();
    let resolved = resolve_command("EnergyControl", spec, "setLimit").unwrap();
    assert_eq!(resolved.command_id, 0);

    let err = resolve_command("EnergyControl", spec, "bogus").unwrap_err();
    assert!(matches!(
      err,
      MashError::NotFound(MashNotFoundError::UnknownCommand(_, _))
    ));
  }
}
