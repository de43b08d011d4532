// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The spec manifest loader and symbolic name resolver (spec.md §4.1).
//!
//! `mash_spec` is the single source of truth for name→ID resolution: it
//! loads a bundled, versioned YAML manifest describing every feature's
//! numeric ID, revision, mandatory flag, and named attribute/command
//! tables, then exposes [`manifest::load_spec`] (process-wide cached),
//! [`resolver`] for symbolic name lookup, and [`validate::validate_device`]
//! for checking a device's advertised capabilities against the manifest.
//!
//! Use-case YAML and JSON Schema files are bundled here too (`bundled`)
//! since both `mash_spec` and `mash_usecase` need `include_str!` access to
//! the same `manifests/` tree, but the typed use-case registry itself
//! (`UseCaseDef`, `ScenarioDef`) lives in `mash_usecase`.

pub mod bundled;
pub mod manifest;
pub mod manifest_file;
pub mod resolver;
mod schema;
pub mod validate;

pub use manifest::{load_spec, parse_manifest, FeatureSpec, SpecManifest};
pub use resolver::{
  resolve_attribute, resolve_command, resolve_feature, ResolvedAttributeRequirement,
  ResolvedCommandRequirement, ResolvedFeatureRequirement,
};
pub use validate::{validate_device, ValidationResult};
