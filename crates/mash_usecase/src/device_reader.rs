// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! `DeviceReader`: the single collaborator interface use-case discovery
//! consumes for remote probing (spec.md §6, §4.2.5). Modeled as a plain
//! trait with no default implementation: callers depend on this
//! contract without bundling any concrete transport backend in this crate.

use async_trait::async_trait;
use mash_core::capability::{meta_attribute, AttributeValue, UseCaseDecl};
use mash_core::errors::MashError;
use std::collections::BTreeMap;

/// Reads a set of attributes from one feature on one endpoint of a remote
/// device (spec.md §6: "the single operation used during use-case
/// discovery").
#[async_trait]
pub trait DeviceReader: Send + Sync {
  async fn read(
    &self,
    endpoint_id: u8,
    feature_id: u8,
    attribute_ids: &[u16],
  ) -> Result<BTreeMap<u16, AttributeValue>, MashError>;
}

/// The DeviceInfo feature ID, per the bundled spec manifest's feature
/// table.
pub const DEVICE_INFO_FEATURE_ID: u8 = 0;
/// Attribute ID of DeviceInfo's `endpoints` array, read during the fast
/// path of use-case discovery (spec.md §4.2.5).
pub const ENDPOINTS_ATTR_ID: u16 = 100;
/// Attribute ID of DeviceInfo's `useCases` array, read during the fast
/// path of use-case discovery (spec.md §4.2.5).
pub const USE_CASES_ATTR_ID: u16 = 101;

/// Decodes a `useCases` attribute value (an array of maps, one per
/// `UseCaseDecl` field) back into [`UseCaseDecl`]s, skipping any entry
/// that doesn't carry every required field — a remote declaring a
/// malformed entry should not poison the rest of the list.
pub fn decode_use_case_decls(value: &AttributeValue) -> Vec<UseCaseDecl> {
  let AttributeValue::Array(entries) = value else {
    return Vec::new();
  };
  entries.iter().filter_map(decode_one_decl).collect()
}

fn decode_one_decl(entry: &AttributeValue) -> Option<UseCaseDecl> {
  let AttributeValue::Map(fields) = entry else {
    return None;
  };
  let endpoint_id = match fields.get("endpointId")? {
    AttributeValue::Uint8(v) => *v,
    _ => return None,
  };
  let use_case_id = match fields.get("useCaseId")? {
    AttributeValue::Uint16(v) => *v,
    _ => return None,
  };
  let major = match fields.get("major")? {
    AttributeValue::Uint8(v) => *v,
    _ => return None,
  };
  let minor = match fields.get("minor")? {
    AttributeValue::Uint8(v) => *v,
    _ => return None,
  };
  let scenarios = match fields.get("scenarios")? {
    AttributeValue::Uint32(v) => *v,
    _ => return None,
  };
  Some(UseCaseDecl::new(endpoint_id, use_case_id, major, minor, scenarios))
}

/// Encodes a [`UseCaseDecl`] into the map shape [`decode_use_case_decls`]
/// expects, for test fixtures and reference servers that implement the
/// fast path of spec.md §4.2.5.
pub fn encode_use_case_decl(decl: &UseCaseDecl) -> AttributeValue {
  let mut map = std::collections::HashMap::new();
  map.insert("endpointId".to_owned(), AttributeValue::Uint8(decl.endpoint_id()));
  map.insert("useCaseId".to_owned(), AttributeValue::Uint16(decl.use_case_id()));
  map.insert("major".to_owned(), AttributeValue::Uint8(decl.major()));
  map.insert("minor".to_owned(), AttributeValue::Uint8(decl.minor()));
  map.insert("scenarios".to_owned(), AttributeValue::Uint32(decl.scenarios()));
  AttributeValue::Map(map)
}

/// Probes one feature's presence and capability surface on a remote
/// device by reading its meta-attributes, per spec.md §4.2.5's slow path:
/// "absence of a feature is detected by a failed read on `AttributeList`
/// and is not an error — just omit that feature."
pub async fn probe_feature(
  reader: &dyn DeviceReader,
  endpoint_id: u8,
  feature_id: u8,
  capability_boolean_attribute_ids: &[u16],
) -> Option<crate::profile::FeatureProfile> {
  let meta_ids = [
    meta_attribute::ATTRIBUTE_LIST,
    meta_attribute::COMMAND_LIST,
    meta_attribute::FEATURE_MAP,
  ];
  let meta = reader.read(endpoint_id, feature_id, &meta_ids).await.ok()?;

  let attribute_ids = match meta.get(&meta_attribute::ATTRIBUTE_LIST) {
    Some(AttributeValue::Array(values)) => values
      .iter()
      .filter_map(|v| v.as_u16())
      .collect::<std::collections::BTreeSet<u16>>(),
    _ => return None,
  };
  let command_ids = match meta.get(&meta_attribute::COMMAND_LIST) {
    Some(AttributeValue::Array(values)) => values
      .iter()
      .filter_map(|v| v.as_u8())
      .collect::<std::collections::BTreeSet<u8>>(),
    _ => Default::default(),
  };
  let feature_map = match meta.get(&meta_attribute::FEATURE_MAP) {
    Some(AttributeValue::Uint32(bits)) => mash_core::capability::FeatureMap(*bits),
    _ => Default::default(),
  };

  let mut bool_values = BTreeMap::new();
  if !capability_boolean_attribute_ids.is_empty() {
    if let Ok(values) = reader
      .read(endpoint_id, feature_id, capability_boolean_attribute_ids)
      .await
    {
      for (id, value) in values {
        if let AttributeValue::Bool(b) = value {
          bool_values.insert(id, b);
        }
      }
    }
  }

  Some(crate::profile::FeatureProfile {
    feature_id,
    attribute_ids,
    command_ids,
    feature_map,
    bool_values,
  })
}

#[cfg(test)]
mod test {
  use super::*;
  use async_trait::async_trait;
  use std::collections::BTreeMap;
  use std::sync::Mutex;

  struct FakeReader {
    responses: Mutex<BTreeMap<(u8, u8, Vec<u16>), BTreeMap<u16, AttributeValue>>>,
  }

  #[async_trait]
  impl DeviceReader for FakeReader {
    async fn read(
      &self,
      endpoint_id: u8,
      feature_id: u8,
      attribute_ids: &[u16],
    ) -> Result<BTreeMap<u16, AttributeValue>, MashError> {
      let key = (endpoint_id, feature_id, attribute_ids.to_vec());
      self
        .responses
        .lock()
        .unwrap()
        .get(&key)
        .cloned()
        .ok_or_else(|| mash_core::errors::MashNotFoundError::UnknownFeature("probe".into()).into())
    }
  }

  #[tokio::test]
  async fn test_probe_feature_absent_is_none() {
    let reader = FakeReader {
      responses: Mutex::new(BTreeMap::new()),
    };
    let result = probe_feature(&reader, 1, 5, &[]).await;
    assert!(result.is_none());
  }

  #[tokio::test]
  async fn test_probe_feature_present_reads_capability_bool() {
    let meta_ids = vec![
      meta_attribute::ATTRIBUTE_LIST,
      meta_attribute::COMMAND_LIST,
      meta_attribute::FEATURE_MAP,
    ];
    let mut responses = BTreeMap::new();
    responses.insert(
      (1u8, 5u8, meta_ids.clone()),
      BTreeMap::from([
        (
          meta_attribute::ATTRIBUTE_LIST,
          AttributeValue::Array(vec![AttributeValue::Uint16(0)]),
        ),
        (
          meta_attribute::COMMAND_LIST,
          AttributeValue::Array(vec![AttributeValue::Uint8(0)]),
        ),
        (meta_attribute::FEATURE_MAP, AttributeValue::Uint32(0)),
      ]),
    );
    responses.insert(
      (1u8, 5u8, vec![0u16]),
      BTreeMap::from([(0u16, AttributeValue::Bool(true))]),
    );
    let reader = FakeReader {
      responses: Mutex::new(responses),
    };
    let profile = probe_feature(&reader, 1, 5, &[0]).await.unwrap();
    assert_eq!(profile.bool_values.get(&0), Some(&true));
  }

  #[test]
  fn test_use_case_decl_encode_decode_round_trip() {
    let decl = UseCaseDecl::new(1, 0x1234, 1, 0, 0b1011);
    let encoded = AttributeValue::Array(vec![encode_use_case_decl(&decl)]);
    let decoded = decode_use_case_decls(&encoded);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].endpoint_id(), decl.endpoint_id());
    assert_eq!(decoded[0].use_case_id(), decl.use_case_id());
    assert_eq!(decoded[0].scenarios(), decl.scenarios());
  }

  #[test]
  fn test_decode_use_case_decls_skips_malformed_entries() {
    let mut incomplete = std::collections::HashMap::new();
    incomplete.insert("endpointId".to_owned(), AttributeValue::Uint8(1));
    let value = AttributeValue::Array(vec![AttributeValue::Map(incomplete)]);
    assert!(decode_use_case_decls(&value).is_empty());
  }
}
