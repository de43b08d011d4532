// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! `DeviceUseCases` (spec.md §4.2.3): the matcher's per-device summary —
//! which use cases matched, on which endpoint, with which scenario
//! bitmap, plus the union of interactive commands every matched use case
//! enables.

use crate::matcher::{match_device, DeviceMatchOutcome};
use crate::profile::DeviceProfile;
use crate::registry::UseCaseDef;
use crate::scenario::ScenarioBitmap;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// One use case's match outcome against a device (spec.md §4.2.3).
#[derive(Debug, Clone)]
struct MatchedUseCase {
  endpoint_id: u8,
  scenarios: ScenarioBitmap,
  commands: Vec<String>,
}

/// `MatchAll(profile, registry) -> DeviceUseCases` (spec.md §4.2.3): for
/// every registered use case, the best matching endpoint (or, absent a
/// BASE match, the diagnostic list of what the first compatible endpoint
/// is missing).
#[derive(Debug, Clone, Default)]
pub struct DeviceUseCases {
  matched: BTreeMap<String, MatchedUseCase>,
  missing_required: BTreeMap<String, Vec<String>>,
}

impl DeviceUseCases {
  /// `HasUseCase(name)` (spec.md §4.2.3, §8 "BASE gating"): true iff bit 0
  /// is set in `ScenariosForUseCase(name)`, which holds structurally here
  /// since only BASE-matching use cases are inserted into `matched`.
  pub fn has_use_case(&self, name: &str) -> bool {
    self.matched.contains_key(name)
  }

  /// `EndpointForUseCase(name)`.
  pub fn endpoint_for_use_case(&self, name: &str) -> Option<u8> {
    self.matched.get(name).map(|m| m.endpoint_id)
  }

  /// `ScenariosForUseCase(name)`.
  pub fn scenarios_for_use_case(&self, name: &str) -> Option<ScenarioBitmap> {
    self.matched.get(name).map(|m| m.scenarios)
  }

  /// `SupportedCommands()`: the union of `commands` from every matched use
  /// case.
  pub fn supported_commands(&self) -> BTreeSet<String> {
    self
      .matched
      .values()
      .flat_map(|m| m.commands.iter().cloned())
      .collect()
  }

  /// `MatchedUseCases()`: the names of every use case that matched BASE.
  pub fn matched_use_cases(&self) -> Vec<&str> {
    self.matched.keys().map(String::as_str).collect()
  }

  /// Diagnostics for a use case that failed to match BASE on every
  /// compatible endpoint (spec.md §4.2.3's `MissingRequired`).
  pub fn missing_required(&self, name: &str) -> Option<&[String]> {
    self.missing_required.get(name).map(Vec::as_slice)
  }
}

/// Runs [`match_device`] for every entry in `registry` against `profile`,
/// collecting matches and per-use-case diagnostics into a
/// [`DeviceUseCases`] (spec.md §4.2.3).
pub fn match_all_usecases(
  profile: &DeviceProfile,
  registry: &BTreeMap<String, Arc<UseCaseDef>>,
) -> DeviceUseCases {
  let mut matched = BTreeMap::new();
  let mut missing_required = BTreeMap::new();

  for (name, usecase) in registry {
    match match_device(usecase, profile) {
      DeviceMatchOutcome::Matched { endpoint_id, scenarios } => {
        matched.insert(
          name.clone(),
          MatchedUseCase {
            endpoint_id,
            scenarios,
            commands: usecase.commands.clone(),
          },
        );
      }
      DeviceMatchOutcome::Unmatched { missing, .. } => {
        missing_required.insert(name.clone(), missing);
      }
      DeviceMatchOutcome::NoCompatibleEndpoint => {}
    }
  }

  DeviceUseCases {
    matched,
    missing_required,
  }
}

/// Builds a [`DeviceUseCases`] directly from a remote's own declaration
/// list, trusting it without re-running the matcher (spec.md §4.2.5's fast
/// path: "construct a `DeviceUseCases` directly from the decls").
pub fn device_usecases_from_decls(
  decls: &[mash_core::capability::UseCaseDecl],
  registry: &BTreeMap<String, Arc<UseCaseDef>>,
) -> DeviceUseCases {
  let mut matched = BTreeMap::new();
  for decl in decls {
    let Some(usecase) = registry.values().find(|u| u.id == decl.use_case_id()) else {
      continue;
    };
    if decl.scenarios() == 0 || !ScenarioBitmap(decl.scenarios()).has_base() {
      continue;
    }
    matched.insert(
      usecase.name.clone(),
      MatchedUseCase {
        endpoint_id: decl.endpoint_id(),
        scenarios: ScenarioBitmap(decl.scenarios()),
        commands: usecase.commands.clone(),
      },
    );
  }
  DeviceUseCases {
    matched,
    missing_required: BTreeMap::new(),
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::profile::{EndpointProfile, FeatureProfile};
  use mash_core::capability::EndpointType;
  use mash_core::Version;

  fn inverter_endpoint() -> EndpointProfile {
    let mut energy_control = FeatureProfile {
      feature_id: 5,
      ..Default::default()
    };
    energy_control.attribute_ids.insert(0);
    energy_control.command_ids.insert(0);
    energy_control.command_ids.insert(1);
    energy_control.bool_values.insert(0, true);

    let mut electrical = FeatureProfile {
      feature_id: 9,
      ..Default::default()
    };
    electrical.attribute_ids.insert(0);
    electrical.attribute_ids.insert(1);

    let mut measurement = FeatureProfile {
      feature_id: 10,
      ..Default::default()
    };
    measurement.attribute_ids.insert(0);

    EndpointProfile::new(1, EndpointType::Inverter)
      .with_feature(energy_control)
      .with_feature(electrical)
      .with_feature(measurement)
  }

  #[test]
  fn test_match_all_usecases_reports_gpl_match() {
    let registry = crate::registry::load_registry(Version::new(1, 0)).unwrap();
    let mut endpoints = BTreeMap::new();
    endpoints.insert(1, inverter_endpoint());
    let profile = DeviceProfile { endpoints };

    let device_usecases = match_all_usecases(&profile, &registry);
    assert!(device_usecases.has_use_case("GPL"));
    assert_eq!(device_usecases.endpoint_for_use_case("GPL"), Some(1));
    assert_eq!(device_usecases.scenarios_for_use_case("GPL").unwrap().0, 0b1111);
    let commands = device_usecases.supported_commands();
    assert!(commands.contains("limit"));
    assert!(commands.contains("clear"));
  }

  #[test]
  fn test_match_all_usecases_records_missing_for_unmatched_evc() {
    let registry = crate::registry::load_registry(Version::new(1, 0)).unwrap();
    let mut endpoints = BTreeMap::new();
    endpoints.insert(1, inverter_endpoint());
    let profile = DeviceProfile { endpoints };

    let device_usecases = match_all_usecases(&profile, &registry);
    assert!(!device_usecases.has_use_case("EVC"));
    assert!(device_usecases.missing_required("EVC").is_some());
  }
}
