// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The scenario matching algorithm (spec.md §4.2.2/§4.2.3): per-scenario
//! atomic feature-requirement evaluation, dependency closure to a fixed
//! point, and endpoint selection across a whole device.

use crate::profile::{DeviceProfile, EndpointProfile, FeatureProfile};
use crate::registry::{ScenarioDef, UseCaseDef};
use crate::scenario::ScenarioBitmap;
use mash_spec::ResolvedFeatureRequirement;

/// A single scenario's atomic evaluation (spec.md §4.2.2): every listed
/// `FeatureRequirement` must be satisfied regardless of its `required`
/// flag, which governs PICS-severity reporting only.
fn feature_requirement_satisfied(profile: &EndpointProfile, req: &ResolvedFeatureRequirement) -> bool {
  let Some(feature_profile) = profile.feature(req.feature_id) else {
    return false;
  };
  attribute_requirements_satisfied(feature_profile, req) && command_requirements_satisfied(feature_profile, req)
}

fn attribute_requirements_satisfied(feature_profile: &FeatureProfile, req: &ResolvedFeatureRequirement) -> bool {
  req.attributes.iter().all(|attr| {
    if !feature_profile.attribute_ids.contains(&attr.attribute_id) {
      return false;
    }
    match attr.required_value {
      None => true,
      Some(expected) => feature_profile.bool_values.get(&attr.attribute_id) == Some(&expected),
    }
  })
}

fn command_requirements_satisfied(feature_profile: &FeatureProfile, req: &ResolvedFeatureRequirement) -> bool {
  req
    .commands
    .iter()
    .all(|cmd| feature_profile.command_ids.contains(&cmd.command_id))
}

fn scenario_satisfied(scenario: &ScenarioDef, endpoint: &EndpointProfile) -> bool {
  if let Some(endpoint_types) = &scenario.endpoint_types {
    if !endpoint_types.contains(&endpoint.endpoint_type) {
      return false;
    }
  }
  scenario
    .feature_requirements
    .iter()
    .all(|req| feature_requirement_satisfied(endpoint, &req.resolved))
}

/// Computes which scenarios of `usecase` are satisfied by `endpoint`, then
/// clears any bit whose dependency (`requires`/`requiresAny`) is not met by
/// the rest of the bitmap, to a fixed point (spec.md §8: "Scenario
/// closure").
pub fn match_all(usecase: &UseCaseDef, endpoint: &EndpointProfile) -> ScenarioBitmap {
  let mut bitmap = ScenarioBitmap::EMPTY;
  for scenario in &usecase.scenarios {
    if scenario_satisfied(scenario, endpoint) {
      bitmap.set(scenario.bit);
    }
  }

  loop {
    let mut changed = false;
    for scenario in &usecase.scenarios {
      if !bitmap.has(scenario.bit) {
        continue;
      }
      let requires_ok = scenario.requires.iter().all(|bit| bitmap.has(*bit));
      let requires_any_ok = scenario.requires_any.is_empty() || scenario.requires_any.iter().any(|bit| bitmap.has(*bit));
      if !(requires_ok && requires_any_ok) {
        bitmap.clear(scenario.bit);
        changed = true;
      }
    }
    if !changed {
      break;
    }
  }

  bitmap
}

/// Outcome of matching one use case against a whole device (spec.md
/// §4.2.3).
#[derive(Debug, Clone)]
pub enum DeviceMatchOutcome {
  Matched { endpoint_id: u8, scenarios: ScenarioBitmap },
  Unmatched { endpoint_id: u8, missing: Vec<String> },
  NoCompatibleEndpoint,
}

fn endpoint_is_compatible(usecase: &UseCaseDef, endpoint: &EndpointProfile) -> bool {
  match &usecase.endpoint_types {
    Some(types) => types.contains(&endpoint.endpoint_type),
    None => true,
  }
}

/// Lists the names of every feature/attribute/command the BASE scenario
/// requires but this endpoint lacks, for actionable diagnostics when no
/// endpoint matches BASE (spec.md §4.2.3).
fn missing_base_requirements(usecase: &UseCaseDef, endpoint: &EndpointProfile) -> Vec<String> {
  let Some(base) = usecase.scenarios.iter().find(|s| s.bit == crate::scenario::BASE_BIT) else {
    return Vec::new();
  };
  let mut missing = Vec::new();
  for req in &base.feature_requirements {
    let resolved = &req.resolved;
    match endpoint.feature(resolved.feature_id) {
      None => missing.push(resolved.feature_name.clone()),
      Some(feature_profile) => {
        for attr in &resolved.attributes {
          if !feature_profile.attribute_ids.contains(&attr.attribute_id) {
            missing.push(format!("{}.{}", resolved.feature_name, attr.attribute_name));
          } else if let Some(expected) = attr.required_value {
            if feature_profile.bool_values.get(&attr.attribute_id) != Some(&expected) {
              missing.push(format!("{}.{}", resolved.feature_name, attr.attribute_name));
            }
          }
        }
        for cmd in &resolved.commands {
          if !feature_profile.command_ids.contains(&cmd.command_id) {
            missing.push(format!("{}.{}", resolved.feature_name, cmd.command_name));
          }
        }
      }
    }
  }
  missing
}

/// Matches `usecase` against a whole device (spec.md §4.2.2 "Tie-breaking
/// across endpoints", §4.2.3): among every endpoint-type-compatible
/// endpoint whose BASE scenario is satisfied, prefer the one with the
/// larger scenario bitmap (more scenarios satisfied), ties broken by lower
/// endpoint ID. If none match BASE, the first compatible endpoint
/// (ascending ID order) is returned with a diagnostic list of what it is
/// missing.
pub fn match_device(usecase: &UseCaseDef, device: &DeviceProfile) -> DeviceMatchOutcome {
  let candidates: Vec<&EndpointProfile> = device
    .endpoints_in_order()
    .filter(|endpoint| endpoint_is_compatible(usecase, endpoint))
    .collect();

  let best = candidates
    .iter()
    .map(|endpoint| (*endpoint, match_all(usecase, endpoint)))
    .filter(|(_, scenarios)| scenarios.has_base())
    .max_by(|(a, a_scenarios), (b, b_scenarios)| {
      a_scenarios
        .0
        .count_ones()
        .cmp(&b_scenarios.0.count_ones())
        .then(b.endpoint_id.cmp(&a.endpoint_id))
    });

  if let Some((endpoint, scenarios)) = best {
    return DeviceMatchOutcome::Matched {
      endpoint_id: endpoint.endpoint_id,
      scenarios,
    };
  }

  match candidates.first() {
    Some(endpoint) => DeviceMatchOutcome::Unmatched {
      endpoint_id: endpoint.endpoint_id,
      missing: missing_base_requirements(usecase, endpoint),
    },
    None => DeviceMatchOutcome::NoCompatibleEndpoint,
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::profile::FeatureProfile;
  use mash_core::capability::EndpointType;
  use mash_core::Version;
  use std::collections::BTreeMap;

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
  fn test_gpl_full_match_on_inverter() {
    let registry = mash_spec::bundled::usecase_yaml_for(Version::new(1, 0), "gpl").unwrap();
    let manifest = mash_spec::load_spec(Version::new(1, 0)).unwrap();
    let usecase = crate::registry::parse_usecase(&manifest, registry).unwrap();

    let endpoint = inverter_endpoint();
    let bitmap = match_all(&usecase, &endpoint);
    assert_eq!(bitmap.0, 0b1111);
  }

  #[test]
  fn test_gpl_production_restricted_to_whitelisted_endpoint_types() {
    let manifest = mash_spec::load_spec(Version::new(1, 0)).unwrap();
    let yaml = mash_spec::bundled::usecase_yaml_for(Version::new(1, 0), "gpl").unwrap();
    let usecase = crate::registry::parse_usecase(&manifest, yaml).unwrap();

    let mut endpoint = inverter_endpoint();
    endpoint.endpoint_type = EndpointType::EvCharger;
    let bitmap = match_all(&usecase, &endpoint);
    // BASE | CONSUMPTION | MEASUREMENT, PRODUCTION cleared (endpoint type not whitelisted)
    assert_eq!(bitmap.0, 0b1011);
  }

  #[test]
  fn test_match_device_picks_first_base_matching_endpoint() {
    let manifest = mash_spec::load_spec(Version::new(1, 0)).unwrap();
    let yaml = mash_spec::bundled::usecase_yaml_for(Version::new(1, 0), "gpl").unwrap();
    let usecase = crate::registry::parse_usecase(&manifest, yaml).unwrap();

    let mut endpoints = BTreeMap::new();
    endpoints.insert(1, inverter_endpoint());
    let device = DeviceProfile { endpoints };

    match match_device(&usecase, &device) {
      DeviceMatchOutcome::Matched { endpoint_id, scenarios } => {
        assert_eq!(endpoint_id, 1);
        assert!(scenarios.has_base());
      }
      other => panic!("expected Matched, got {other:?}"),
    }
  }

  #[test]
  fn test_match_device_reports_missing_requirements_when_no_base_match() {
    let manifest = mash_spec::load_spec(Version::new(1, 0)).unwrap();
    let yaml = mash_spec::bundled::usecase_yaml_for(Version::new(1, 0), "gpl").unwrap();
    let usecase = crate::registry::parse_usecase(&manifest, yaml).unwrap();

    let mut endpoints = BTreeMap::new();
    endpoints.insert(1, EndpointProfile::new(1, EndpointType::Inverter));
    let device = DeviceProfile { endpoints };

    match match_device(&usecase, &device) {
      DeviceMatchOutcome::Unmatched { endpoint_id, missing } => {
        assert_eq!(endpoint_id, 1);
        assert!(!missing.is_empty());
      }
      other => panic!("expected Unmatched, got {other:?}"),
    }
  }
}
