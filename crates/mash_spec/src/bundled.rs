// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Compile-time embedding of the YAML manifests under `manifests/` via
//! `include_str!`, rather than reading them from disk at runtime.

use mash_core::Version;

const SPEC_1_0: &str = include_str!("../manifests/1.0/spec.yaml");

/// Returns the bundled spec manifest YAML for `version`, or `None` if no
/// manifest is bundled for that version (spec.md §7: `SpecVersionNotFound`).
pub fn manifest_yaml_for(version: Version) -> Option<&'static str> {
  match (version.major, version.minor) {
    (1, 0) => Some(SPEC_1_0),
    _ => None,
  }
}

/// Returns the bundled use-case definition YAML for `version` and `name`
/// (lowercase, e.g. `"gpl"`), consumed by `mash_usecase`'s registry loader.
pub fn usecase_yaml_for(version: Version, name: &str) -> Option<&'static str> {
  match (version.major, version.minor, name) {
    (1, 0, "gpl") => Some(include_str!("../manifests/1.0/usecases/gpl.yaml")),
    (1, 0, "evc") => Some(include_str!("../manifests/1.0/usecases/evc.yaml")),
    _ => None,
  }
}

/// Names of every use-case definition bundled for `version`, for registry
/// enumeration at startup.
pub fn usecase_names_for(version: Version) -> &'static [&'static str] {
  match (version.major, version.minor) {
    (1, 0) => &["gpl", "evc"],
    _ => &[],
  }
}
