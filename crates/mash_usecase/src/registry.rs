// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Use-case definitions (spec.md §3 "UseCaseDef"/"ScenarioDef", §4.2, §6's
//! abridged YAML schema) and the process-wide registry that loads and
//! caches them, grounded on the same cache-by-version discipline as
//! `mash_spec::manifest::load_spec`.

use crate::scenario::BASE_BIT;
use dashmap::DashMap;
use mash_core::capability::EndpointType;
use mash_core::errors::{MashError, MashParseFailedError};
use mash_core::Version;
use mash_spec::resolver::{resolve_attribute, resolve_command, resolve_feature};
use mash_spec::{ResolvedFeatureRequirement, SpecManifest};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

mod wire {
  use serde::Deserialize;

  #[derive(Debug, Clone, Deserialize)]
  pub struct AttrReq {
    pub name: String,
    #[serde(rename = "requiredValue", default)]
    pub required_value: Option<bool>,
  }

  #[derive(Debug, Clone, Deserialize)]
  pub struct FeatureReq {
    pub feature: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub attributes: Vec<AttrReq>,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub subscribe: Option<String>,
  }

  #[derive(Debug, Clone, Deserialize)]
  pub struct ScenarioFile {
    pub bit: u8,
    pub name: String,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(rename = "requiresAny", default)]
    pub requires_any: Vec<String>,
    #[serde(rename = "endpointTypes", default)]
    pub endpoint_types: Vec<String>,
    #[serde(default)]
    pub features: Vec<FeatureReq>,
  }

  #[derive(Debug, Clone, Deserialize)]
  pub struct UseCaseFile {
    pub name: String,
    pub id: u16,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "specVersion")]
    pub spec_version: String,
    pub major: u8,
    pub minor: u8,
    #[serde(rename = "endpointTypes", default)]
    pub endpoint_types: Vec<String>,
    pub scenarios: Vec<ScenarioFile>,
    #[serde(default)]
    pub commands: Vec<String>,
  }
}

/// A resolved, registry-ready feature requirement plus the scenario-level
/// "subscribe all" flag (spec.md §3 "FeatureRequirement").
#[derive(Debug, Clone)]
pub struct FeatureRequirement {
  pub resolved: ResolvedFeatureRequirement,
}

/// A single scenario within a use case (spec.md §3 "ScenarioDef").
#[derive(Debug, Clone)]
pub struct ScenarioDef {
  pub bit: u8,
  pub name: String,
  /// Sibling scenario bit positions this scenario's match requires (AND).
  pub requires: Vec<u8>,
  /// Sibling scenario bit positions, any one of which satisfies this
  /// scenario's dependency (OR).
  pub requires_any: Vec<u8>,
  pub endpoint_types: Option<Vec<EndpointType>>,
  pub feature_requirements: Vec<FeatureRequirement>,
}

/// A use-case registry entry (spec.md §3 "UseCaseDef").
#[derive(Debug, Clone)]
pub struct UseCaseDef {
  pub name: String,
  pub id: u16,
  pub full_name: String,
  pub spec_version: Version,
  pub major: u8,
  pub minor: u8,
  pub endpoint_types: Option<Vec<EndpointType>>,
  pub scenarios: Vec<ScenarioDef>,
  pub commands: Vec<String>,
}

impl UseCaseDef {
  /// The bitmask of every scenario bit this use case defines, per spec.md
  /// §9's `DefinedScenarioMask`.
  pub fn defined_scenario_mask(&self) -> u32 {
    self.scenarios.iter().fold(0u32, |mask, s| mask | (1 << s.bit))
  }

  pub fn scenario_by_name(&self, name: &str) -> Option<&ScenarioDef> {
    self.scenarios.iter().find(|s| s.name == name)
  }
}

/// Parses a MASH `SCREAMING_SNAKE_CASE` endpoint-type name from YAML
/// (spec.md §3: 16 closed endpoint-type values) into [`EndpointType`].
pub fn parse_endpoint_type(name: &str) -> Result<EndpointType, MashError> {
  Ok(match name {
    "DEVICE_ROOT" => EndpointType::DeviceRoot,
    "GRID_CONNECTION" => EndpointType::GridConnection,
    "INVERTER" => EndpointType::Inverter,
    "PV_STRING" => EndpointType::PvString,
    "BATTERY" => EndpointType::Battery,
    "EV_CHARGER" => EndpointType::EvCharger,
    "HEAT_PUMP" => EndpointType::HeatPump,
    "WATER_HEATER" => EndpointType::WaterHeater,
    "HVAC" => EndpointType::Hvac,
    "APPLIANCE" => EndpointType::Appliance,
    "SUB_METER" => EndpointType::SubMeter,
    "GENERATOR" => EndpointType::Generator,
    "ENERGY_STORAGE" => EndpointType::EnergyStorage,
    "SMART_PLUG" => EndpointType::SmartPlug,
    "METER" => EndpointType::Meter,
    "OTHER" => EndpointType::Other,
    other => {
      return Err(MashParseFailedError::YamlParseError(format!("unknown endpoint type: {other}")).into())
    }
  })
}

fn parse_endpoint_types(names: &[String]) -> Result<Option<Vec<EndpointType>>, MashError> {
  if names.is_empty() {
    Ok(None)
  } else {
    Ok(Some(
      names
        .iter()
        .map(|n| parse_endpoint_type(n))
        .collect::<Result<Vec<_>, _>>()?,
    ))
  }
}

fn resolve_scenario(
  manifest: &SpecManifest,
  file: &wire::ScenarioFile,
  bit_by_name: &BTreeMap<String, u8>,
) -> Result<ScenarioDef, MashError> {
  let requires = file
    .requires
    .iter()
    .map(|name| {
      bit_by_name
        .get(name)
        .copied()
        .ok_or_else(|| MashParseFailedError::YamlParseError(format!("unknown sibling scenario: {name}")).into())
    })
    .collect::<Result<Vec<u8>, MashError>>()?;
  let requires_any = file
    .requires_any
    .iter()
    .map(|name| {
      bit_by_name
        .get(name)
        .copied()
        .ok_or_else(|| MashParseFailedError::YamlParseError(format!("unknown sibling scenario: {name}")).into())
    })
    .collect::<Result<Vec<u8>, MashError>>()?;

  let mut feature_requirements = Vec::with_capacity(file.features.len());
  for feature_req in &file.features {
    let (feature_id, feature_spec) = resolve_feature(manifest, &feature_req.feature)?;
    let mut attributes = Vec::with_capacity(feature_req.attributes.len());
    for attr in &feature_req.attributes {
      attributes.push(resolve_attribute(
        &feature_req.feature,
        feature_spec,
        &attr.name,
        attr.required_value,
      )?);
    }
    let mut commands = Vec::with_capacity(feature_req.commands.len());
    for command_name in &feature_req.commands {
      commands.push(resolve_command(&feature_req.feature, feature_spec, command_name)?);
    }
    feature_requirements.push(FeatureRequirement {
      resolved: ResolvedFeatureRequirement {
        feature_name: feature_req.feature.clone(),
        feature_id,
        required: feature_req.required,
        attributes,
        commands,
        subscribe_all: feature_req.subscribe.as_deref() == Some("all"),
      },
    });
  }

  Ok(ScenarioDef {
    bit: file.bit,
    name: file.name.clone(),
    requires,
    requires_any,
    endpoint_types: parse_endpoint_types(&file.endpoint_types)?,
    feature_requirements,
  })
}

/// Parses and resolves a use-case YAML document against `manifest`.
pub fn parse_usecase(manifest: &SpecManifest, yaml: &str) -> Result<UseCaseDef, MashError> {
  let file: wire::UseCaseFile =
    serde_yaml::from_str(yaml).map_err(|e| MashParseFailedError::YamlParseError(e.to_string()))?;

  if !file.scenarios.iter().any(|s| s.bit == BASE_BIT && s.name == "BASE") {
    return Err(MashParseFailedError::MissingBaseScenario(file.name.clone()).into());
  }

  let bit_by_name: BTreeMap<String, u8> =
    file.scenarios.iter().map(|s| (s.name.clone(), s.bit)).collect();

  let scenarios = file
    .scenarios
    .iter()
    .map(|s| resolve_scenario(manifest, s, &bit_by_name))
    .collect::<Result<Vec<_>, _>>()?;

  Ok(UseCaseDef {
    name: file.name,
    id: file.id,
    full_name: file.full_name,
    spec_version: file.spec_version.parse()?,
    major: file.major,
    minor: file.minor,
    endpoint_types: parse_endpoint_types(&file.endpoint_types)?,
    scenarios,
    commands: file.commands,
  })
}

struct Registry {
  inner: DashMap<Version, Arc<BTreeMap<String, Arc<UseCaseDef>>>>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
  REGISTRY.get_or_init(|| Registry { inner: DashMap::new() })
}

/// Loads (and caches) every bundled use case for `version`, keyed by name.
pub fn load_registry(version: Version) -> Result<Arc<BTreeMap<String, Arc<UseCaseDef>>>, MashError> {
  if let Some(existing) = registry().inner.get(&version) {
    return Ok(existing.clone());
  }
  let manifest = mash_spec::load_spec(version)?;
  let mut map = BTreeMap::new();
  for name in mash_spec::bundled::usecase_names_for(version) {
    let yaml = mash_spec::bundled::usecase_yaml_for(version, name).expect("name came from usecase_names_for");
    let def = parse_usecase(&manifest, yaml)?;
    map.insert(def.name.clone(), Arc::new(def));
  }
  let built = Arc::new(map);
  let entry = registry()
    .inner
    .entry(version)
    .or_insert_with(|| built.clone());
  Ok(entry.clone())
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_load_registry_contains_gpl_and_evc() {
    let registry = load_registry(Version::new(1, 0)).unwrap();
    assert!(registry.contains_key("GPL"));
    assert!(registry.contains_key("EVC"));
  }

  #[test]
  fn test_gpl_scenario_bits_and_dependencies() {
    let registry = load_registry(Version::new(1, 0)).unwrap();
    let gpl = &registry["GPL"];
    assert_eq!(gpl.defined_scenario_mask(), 0b1111);
    let production = gpl.scenario_by_name("PRODUCTION").unwrap();
    assert_eq!(production.requires, vec![0]);
    assert_eq!(
      production.endpoint_types.as_ref().unwrap().len(),
      3
    );
  }

  #[test]
  fn test_missing_base_scenario_is_rejected() {
    let manifest = mash_spec::load_spec(Version::new(1, 0)).unwrap();
    let yaml = r#"
name: BROKEN
id: 99
fullName: Broken
specVersion: "1.0"
major: 1
minor: 0
scenarios:
  - bit: 1
    name: NOT_BASE
    features: []
"#;
    let err = parse_usecase(&manifest, yaml).unwrap_err();
    assert!(matches!(
      err,
      MashError::ParseFailed(MashParseFailedError::MissingBaseScenario(_))
    ));
  }
}
