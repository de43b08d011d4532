// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Declaration derivation (spec.md §4.2.4/§4.2.5): turning matcher output
//! into the `UseCaseDecl` list a device or controller actually advertises.

use crate::device_reader::{
  decode_use_case_decls, probe_feature, DeviceReader, DEVICE_INFO_FEATURE_ID, ENDPOINTS_ATTR_ID,
  USE_CASES_ATTR_ID,
};
use crate::device_usecases::{device_usecases_from_decls, match_all_usecases, DeviceUseCases};
use crate::matcher::{match_device, DeviceMatchOutcome};
use crate::profile::{profile_from_device, DeviceProfile, EndpointProfile};
use crate::registry::UseCaseDef;
use mash_core::capability::{Device, EndpointType, UseCaseDecl};
use mash_core::errors::MashError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// `EvaluateDevice(device, registry) -> list<UseCaseDecl>` (spec.md
/// §4.2.4): builds a local profile from owned feature state, runs
/// `MatchAll` per use case, emits one decl per matched use case.
pub fn evaluate_device(device: &Device, registry: &BTreeMap<String, Arc<UseCaseDef>>) -> Vec<UseCaseDecl> {
  let profile = profile_from_device(device);
  evaluate_profile(&profile, registry)
}

fn evaluate_profile(profile: &DeviceProfile, registry: &BTreeMap<String, Arc<UseCaseDef>>) -> Vec<UseCaseDecl> {
  let mut usecases: Vec<&Arc<UseCaseDef>> = registry.values().collect();
  usecases.sort_by_key(|u| u.id);

  let mut decls = Vec::new();
  for usecase in usecases {
    if let DeviceMatchOutcome::Matched { endpoint_id, scenarios } = match_device(usecase, profile) {
      decls.push(UseCaseDecl::new(endpoint_id, usecase.id, usecase.major, usecase.minor, scenarios.0));
    }
  }
  decls
}

/// `EvaluateController(registry) -> list<UseCaseDecl>` (spec.md §8:
/// "Controller declaration determinism"): every use case in the registry,
/// sorted by ID, declared at `endpointId=0` with the full defined-scenario
/// mask — a controller claims every scenario of every use case it
/// implements, not a device-specific subset.
pub fn evaluate_controller(registry: &BTreeMap<String, Arc<UseCaseDef>>) -> Vec<UseCaseDecl> {
  let mut usecases: Vec<&Arc<UseCaseDef>> = registry.values().collect();
  usecases.sort_by_key(|u| u.id);
  usecases
    .into_iter()
    .map(|usecase| {
      UseCaseDecl::new(0, usecase.id, usecase.major, usecase.minor, usecase.defined_scenario_mask())
    })
    .collect()
}

/// `DiscoverUseCases(reader, deviceId, registry)` (spec.md §4.2.5).
///
/// Fast path: a single read of DeviceInfo's `endpoints`/`useCases`
/// attributes on endpoint 0. If `useCases` is present and decodes to at
/// least one declaration, a [`DeviceUseCases`] is built directly from the
/// decls — trusting the remote's own declaration, no further probing.
///
/// Slow path (the fast path's attributes are absent, e.g. an older
/// device): probe every endpoint except 0 for every known feature type via
/// `DeviceReader`, then run the same matcher `evaluate_device` uses.
pub async fn discover_use_cases(
  reader: &dyn DeviceReader,
  registry: &BTreeMap<String, Arc<UseCaseDef>>,
) -> Result<DeviceUseCases, MashError> {
  if let Ok(device_info) = reader
    .read(
      mash_core::capability::DEVICE_ROOT_ENDPOINT_ID,
      DEVICE_INFO_FEATURE_ID,
      &[ENDPOINTS_ATTR_ID, USE_CASES_ATTR_ID],
    )
    .await
  {
    if let Some(use_cases_value) = device_info.get(&USE_CASES_ATTR_ID) {
      let decls = decode_use_case_decls(use_cases_value);
      if !decls.is_empty() {
        return Ok(device_usecases_from_decls(&decls, registry));
      }
    }
  }

  let endpoint_types = probe_endpoint_types(reader, registry).await?;
  let profile = probe_device_profile(reader, &endpoint_types, registry).await?;
  Ok(match_all_usecases(&profile, registry))
}

/// Reads DeviceInfo's `endpoints` attribute (an array of endpoint-type
/// enum discriminants) to learn which endpoints exist before probing each
/// one's features individually. Falls back to an empty map — the slow
/// path's probe loop then simply finds nothing — rather than failing the
/// whole discovery when the remote omits this optimization, per spec.md
/// §7's "malformed per-interface entries are silently skipped" discipline
/// applied to a single remote attribute instead of a browse stream.
async fn probe_endpoint_types(
  reader: &dyn DeviceReader,
  _registry: &BTreeMap<String, Arc<UseCaseDef>>,
) -> Result<BTreeMap<u8, EndpointType>, MashError> {
  let Ok(device_info) = reader
    .read(
      mash_core::capability::DEVICE_ROOT_ENDPOINT_ID,
      DEVICE_INFO_FEATURE_ID,
      &[ENDPOINTS_ATTR_ID],
    )
    .await
  else {
    return Ok(BTreeMap::new());
  };
  let Some(mash_core::capability::AttributeValue::Array(entries)) = device_info.get(&ENDPOINTS_ATTR_ID) else {
    return Ok(BTreeMap::new());
  };
  let mut endpoint_types = BTreeMap::new();
  for (index, entry) in entries.iter().enumerate() {
    if let Some(endpoint_type) = decode_endpoint_type(entry) {
      endpoint_types.insert(index as u8, endpoint_type);
    }
  }
  Ok(endpoint_types)
}

fn decode_endpoint_type(value: &mash_core::capability::AttributeValue) -> Option<EndpointType> {
  use mash_core::capability::AttributeValue;
  let discriminant = match value {
    AttributeValue::Enum(d) => *d,
    AttributeValue::Uint8(d) => *d as u32,
    _ => return None,
  };
  Some(match discriminant {
    0 => EndpointType::DeviceRoot,
    1 => EndpointType::GridConnection,
    2 => EndpointType::Inverter,
    3 => EndpointType::PvString,
    4 => EndpointType::Battery,
    5 => EndpointType::EvCharger,
    6 => EndpointType::HeatPump,
    7 => EndpointType::WaterHeater,
    8 => EndpointType::Hvac,
    9 => EndpointType::Appliance,
    10 => EndpointType::SubMeter,
    11 => EndpointType::Generator,
    12 => EndpointType::EnergyStorage,
    13 => EndpointType::SmartPlug,
    14 => EndpointType::Meter,
    _ => EndpointType::Other,
  })
}

/// Builds a [`DeviceProfile`] by probing every endpoint (excluding 0) for
/// every feature type any registered use case references (spec.md
/// §4.2.5's slow path).
async fn probe_device_profile(
  reader: &dyn DeviceReader,
  endpoint_types: &BTreeMap<u8, EndpointType>,
  registry: &BTreeMap<String, Arc<UseCaseDef>>,
) -> Result<DeviceProfile, MashError> {
  let mut profile = DeviceProfile::default();

  let feature_ids_to_probe: Vec<u8> = registry
    .values()
    .flat_map(|usecase| usecase.scenarios.iter())
    .flat_map(|scenario| scenario.feature_requirements.iter())
    .map(|req| req.resolved.feature_id)
    .collect::<std::collections::BTreeSet<u8>>()
    .into_iter()
    .collect();

  let capability_bool_ids_by_feature: BTreeMap<u8, Vec<u16>> = registry
    .values()
    .flat_map(|usecase| usecase.scenarios.iter())
    .flat_map(|scenario| scenario.feature_requirements.iter())
    .filter_map(|req| {
      let ids: Vec<u16> = req
        .resolved
        .attributes
        .iter()
        .filter(|a| a.required_value.is_some())
        .map(|a| a.attribute_id)
        .collect();
      if ids.is_empty() {
        None
      } else {
        Some((req.resolved.feature_id, ids))
      }
    })
    .collect();

  for (&endpoint_id, &endpoint_type) in endpoint_types {
    if endpoint_id == mash_core::capability::DEVICE_ROOT_ENDPOINT_ID {
      continue;
    }
    let mut endpoint_profile = EndpointProfile::new(endpoint_id, endpoint_type);
    for &feature_id in &feature_ids_to_probe {
      let bool_ids = capability_bool_ids_by_feature
        .get(&feature_id)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
      if let Some(feature_profile) = probe_feature(reader, endpoint_id, feature_id, bool_ids).await {
        endpoint_profile = endpoint_profile.with_feature(feature_profile);
      }
    }
    profile.endpoints.insert(endpoint_id, endpoint_profile);
  }

  Ok(profile)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::device_reader::encode_use_case_decl;
  use mash_core::Version;

  #[test]
  fn test_evaluate_controller_is_sorted_and_uses_full_mask() {
    let registry = crate::registry::load_registry(Version::new(1, 0)).unwrap();
    let decls = evaluate_controller(&registry);
    assert_eq!(decls.len(), 2);
    assert!(decls.windows(2).all(|w| w[0].use_case_id() <= w[1].use_case_id()));
    let gpl = decls.iter().find(|d| d.use_case_id() == 1).unwrap();
    assert_eq!(gpl.endpoint_id(), 0);
    assert_eq!(gpl.scenarios(), 0b1111);
  }

  struct FixedReader {
    responses: BTreeMap<(u8, u8, Vec<u16>), BTreeMap<u16, mash_core::capability::AttributeValue>>,
  }

  #[async_trait::async_trait]
  impl DeviceReader for FixedReader {
    async fn read(
      &self,
      endpoint_id: u8,
      feature_id: u8,
      attribute_ids: &[u16],
    ) -> Result<BTreeMap<u16, mash_core::capability::AttributeValue>, MashError> {
      self
        .responses
        .get(&(endpoint_id, feature_id, attribute_ids.to_vec()))
        .cloned()
        .ok_or_else(|| mash_core::errors::MashNotFoundError::UnknownFeature("no fixture".into()).into())
    }
  }

  #[tokio::test]
  async fn test_discover_use_cases_fast_path_trusts_remote_decl() {
    let registry = crate::registry::load_registry(Version::new(1, 0)).unwrap();
    let decl = UseCaseDecl::new(1, 1, 1, 0, 0b1111);
    let mut responses = BTreeMap::new();
    responses.insert(
      (0u8, DEVICE_INFO_FEATURE_ID, vec![ENDPOINTS_ATTR_ID, USE_CASES_ATTR_ID]),
      BTreeMap::from([(
        USE_CASES_ATTR_ID,
        mash_core::capability::AttributeValue::Array(vec![encode_use_case_decl(&decl)]),
      )]),
    );
    let reader = FixedReader { responses };

    let device_usecases = discover_use_cases(&reader, &registry).await.unwrap();
    assert!(device_usecases.has_use_case("GPL"));
    assert_eq!(device_usecases.endpoint_for_use_case("GPL"), Some(1));
  }

  #[tokio::test]
  async fn test_discover_use_cases_falls_back_to_slow_path() {
    let registry = crate::registry::load_registry(Version::new(1, 0)).unwrap();
    // No DeviceInfo fixture registered at all: the fast-path read fails,
    // endpoint-type probing finds nothing, and discovery returns an empty
    // (but successful) DeviceUseCases rather than propagating an error.
    let reader = FixedReader {
      responses: BTreeMap::new(),
    };

    let device_usecases = discover_use_cases(&reader, &registry).await.unwrap();
    assert!(device_usecases.matched_use_cases().is_empty());
  }
}
