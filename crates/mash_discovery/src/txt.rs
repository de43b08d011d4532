// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! TXT record encode/decode for every discovery entity (spec.md §4.3.1,
//! §8: "TXT round-trip"). TXT records are represented as a `BTreeMap<String,
//! String>` rather than a `Vec<(String, String)>` — DNS-SD TXT records are
//! sets, insertion-order-independent, which a sorted map models directly.

use crate::entities::{CommissionableInfo, CommissionerInfo, OperationalInfo, PairingRequestInfo};
use mash_core::errors::{MashError, MashMissingRequiredError, MashParseError};
use mash_core::util::hex_id::validate_hex_id;
use std::collections::BTreeMap;

pub type TxtRecord = BTreeMap<String, String>;

fn get_required<'a>(record: &'a TxtRecord, key: &str) -> Option<&'a str> {
  record.get(key).map(String::as_str)
}

fn missing_key(key: &str) -> MashError {
  MashParseError::InvalidTxtRecord(format!("missing required key {key}")).into()
}

pub fn encode_commissionable(info: &CommissionableInfo) -> TxtRecord {
  let mut txt = TxtRecord::new();
  txt.insert("D".into(), info.discriminator.to_string());
  txt.insert(
    "cat".into(),
    info
      .categories
      .iter()
      .map(u32::to_string)
      .collect::<Vec<_>>()
      .join(","),
  );
  txt.insert("serial".into(), info.serial.clone());
  txt.insert("brand".into(), info.brand.clone());
  txt.insert("model".into(), info.model.clone());
  if let Some(name) = &info.device_name {
    txt.insert("DN".into(), name.clone());
  }
  txt
}

pub fn decode_commissionable(record: &TxtRecord, port: u16, host: &str) -> Result<CommissionableInfo, MashError> {
  let discriminator: u16 = get_required(record, "D")
    .ok_or_else(|| missing_key("D"))?
    .parse()
    .map_err(|_| MashParseError::InvalidTxtRecord("D is not a valid discriminator".into()))?;
  let categories = get_required(record, "cat")
    .ok_or_else(|| missing_key("cat"))?
    .split(',')
    .filter(|s| !s.is_empty())
    .map(|s| {
      s.parse()
        .map_err(|_| MashParseError::InvalidTxtRecord(format!("cat entry {s} is not a valid category id")))
    })
    .collect::<Result<Vec<u32>, _>>()?;
  let serial = get_required(record, "serial").ok_or_else(|| missing_key("serial"))?.to_owned();
  let brand = get_required(record, "brand").ok_or_else(|| missing_key("brand"))?.to_owned();
  let model = get_required(record, "model").ok_or_else(|| missing_key("model"))?.to_owned();

  Ok(CommissionableInfo {
    discriminator,
    categories,
    serial,
    brand,
    model,
    device_name: record.get("DN").cloned(),
    port,
    host: host.to_owned(),
  })
}

fn encode_vendor_product(vp: (u16, u16)) -> String {
  format!("{}:{}", vp.0, vp.1)
}

fn decode_vendor_product(s: &str) -> Option<(u16, u16)> {
  let (vendor, product) = s.split_once(':')?;
  Some((vendor.parse().ok()?, product.parse().ok()?))
}

pub fn encode_operational(info: &OperationalInfo) -> TxtRecord {
  let mut txt = TxtRecord::new();
  txt.insert("ZI".into(), info.zone_id.clone());
  txt.insert("DI".into(), info.device_id.clone());
  if let Some(vp) = info.vendor_product {
    txt.insert("VP".into(), encode_vendor_product(vp));
  }
  if let Some(fw) = &info.firmware {
    txt.insert("FW".into(), fw.clone());
  }
  if let Some(fm) = info.feature_map {
    txt.insert("FM".into(), format!("{fm:#06x}"));
  }
  if let Some(ep) = info.endpoint_count {
    txt.insert("EP".into(), ep.to_string());
  }
  txt
}

pub fn decode_operational(record: &TxtRecord) -> Result<OperationalInfo, MashError> {
  let zone_id = get_required(record, "ZI")
    .ok_or(MashMissingRequiredError::EmptyZoneId)?
    .to_owned();
  let device_id = get_required(record, "DI")
    .ok_or(MashMissingRequiredError::EmptyDeviceId)?
    .to_owned();
  validate_hex_id(&zone_id)?;
  validate_hex_id(&device_id)?;
  Ok(OperationalInfo {
    zone_id,
    device_id,
    vendor_product: record.get("VP").and_then(|s| decode_vendor_product(s)),
    firmware: record.get("FW").cloned(),
    feature_map: record
      .get("FM")
      .and_then(|s| u32::from_str_radix(s.trim_start_matches("0x"), 16).ok()),
    endpoint_count: record.get("EP").and_then(|s| s.parse().ok()),
  })
}

pub fn encode_commissioner(info: &CommissionerInfo) -> TxtRecord {
  let mut txt = TxtRecord::new();
  txt.insert("ZN".into(), info.zone_name.clone());
  txt.insert("ZI".into(), info.zone_id.clone());
  if let Some(vp) = info.vendor_product {
    txt.insert("VP".into(), encode_vendor_product(vp));
  }
  if let Some(name) = &info.device_name {
    txt.insert("DN".into(), name.clone());
  }
  if let Some(count) = info.device_count {
    txt.insert("DC".into(), count.to_string());
  }
  txt
}

pub fn decode_commissioner(record: &TxtRecord) -> Result<CommissionerInfo, MashError> {
  let zone_name = get_required(record, "ZN")
    .ok_or(MashMissingRequiredError::EmptyZoneId)?
    .to_owned();
  let zone_id = get_required(record, "ZI")
    .ok_or(MashMissingRequiredError::EmptyZoneId)?
    .to_owned();
  validate_hex_id(&zone_id)?;
  Ok(CommissionerInfo {
    zone_name,
    zone_id,
    vendor_product: record.get("VP").and_then(|s| decode_vendor_product(s)),
    device_name: record.get("DN").cloned(),
    device_count: record.get("DC").and_then(|s| s.parse().ok()),
  })
}

pub fn encode_pairing_request(info: &PairingRequestInfo) -> TxtRecord {
  let mut txt = TxtRecord::new();
  txt.insert("D".into(), info.discriminator.to_string());
  txt.insert("ZI".into(), info.zone_id.clone());
  if let Some(name) = &info.zone_name {
    txt.insert("ZN".into(), name.clone());
  }
  txt
}

pub fn decode_pairing_request(record: &TxtRecord, host: &str) -> Result<PairingRequestInfo, MashError> {
  let discriminator: u16 = get_required(record, "D")
    .ok_or(MashMissingRequiredError::EmptyPairingRequestHost)?
    .parse()
    .map_err(|_| MashMissingRequiredError::EmptyPairingRequestHost)?;
  let zone_id = get_required(record, "ZI")
    .ok_or(MashMissingRequiredError::EmptyZoneId)?
    .to_owned();
  validate_hex_id(&zone_id)?;
  Ok(PairingRequestInfo {
    discriminator,
    zone_id,
    zone_name: record.get("ZN").cloned(),
    host: host.to_owned(),
  })
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_commissionable_round_trip() {
    let info = CommissionableInfo {
      discriminator: 1234,
      categories: vec![1, 2, 3],
      serial: "SN1".into(),
      brand: "Acme".into(),
      model: "X1".into(),
      device_name: Some("Garage Charger".into()),
      port: 8443,
      host: "device.local".into(),
    };
    let txt = encode_commissionable(&info);
    let decoded = decode_commissionable(&txt, info.port, &info.host).unwrap();
    assert_eq!(decoded, info);
  }

  #[test]
  fn test_operational_round_trip() {
    let info = OperationalInfo {
      zone_id: "a1b2c3d4e5f6a7b8".into(),
      device_id: "f9e8d7c6b5a49382".into(),
      vendor_product: Some((1234, 5678)),
      firmware: Some("1.2.3".into()),
      feature_map: Some(0x001b),
      endpoint_count: Some(2),
    };
    let txt = encode_operational(&info);
    assert_eq!(decode_operational(&txt).unwrap(), info);
  }

  #[test]
  fn test_operational_missing_required_field() {
    let mut txt = TxtRecord::new();
    txt.insert("ZI".into(), "a1b2".into());
    let err = decode_operational(&txt).unwrap_err();
    assert!(matches!(
      err,
      MashError::MissingRequired(MashMissingRequiredError::EmptyDeviceId)
    ));
  }

  #[test]
  fn test_operational_rejects_malformed_zone_id() {
    let mut txt = TxtRecord::new();
    txt.insert("ZI".into(), "A1B2".into());
    txt.insert("DI".into(), "f9e8d7c6b5a49382".into());
    let err = decode_operational(&txt).unwrap_err();
    assert!(matches!(err, MashError::Parse(MashParseError::InvalidHexId(_))));
  }

  #[test]
  fn test_commissionable_missing_field_is_invalid_txt_record() {
    let mut txt = TxtRecord::new();
    txt.insert("D".into(), "1234".into());
    let err = decode_commissionable(&txt, 8443, "dev.local").unwrap_err();
    assert!(matches!(err, MashError::Parse(MashParseError::InvalidTxtRecord(_))));
  }

  #[test]
  fn test_commissioner_round_trip() {
    let info = CommissionerInfo {
      zone_name: "Home".into(),
      zone_id: "a1b2c3d4e5f6a7b8".into(),
      vendor_product: Some((1, 2)),
      device_name: Some("Hub".into()),
      device_count: Some(5),
    };
    let txt = encode_commissioner(&info);
    assert_eq!(decode_commissioner(&txt).unwrap(), info);
  }

  #[test]
  fn test_pairing_request_round_trip() {
    let info = PairingRequestInfo {
      discriminator: 2000,
      zone_id: "a1b2c3d4e5f6a7b8".into(),
      zone_name: Some("Home".into()),
      host: "controller.local".into(),
    };
    let txt = encode_pairing_request(&info);
    assert_eq!(decode_pairing_request(&txt, &info.host).unwrap(), info);
  }
}
