// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Discovery entities (spec.md §3 "Discovery entities", §4.3.1): the
//! typed records carried over mDNS TXT and the QR code, independent of the
//! wire encoding (see [`crate::txt`] and [`crate::qr`]).

use serde::{Deserialize, Serialize};

/// A commissionable device's advertised identity (spec.md §4.3.1:
/// "Commissionable").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionableInfo {
  pub discriminator: u16,
  pub categories: Vec<u32>,
  pub serial: String,
  pub brand: String,
  pub model: String,
  pub device_name: Option<String>,
  pub port: u16,
  pub host: String,
}

/// An operational zone member's advertised identity (spec.md §4.3.1:
/// "Operational").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalInfo {
  pub zone_id: String,
  pub device_id: String,
  pub vendor_product: Option<(u16, u16)>,
  pub firmware: Option<String>,
  pub feature_map: Option<u32>,
  pub endpoint_count: Option<u8>,
}

/// A controller's advertised identity (spec.md §4.3.1: "Commissioner").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionerInfo {
  pub zone_name: String,
  pub zone_id: String,
  pub vendor_product: Option<(u16, u16)>,
  pub device_name: Option<String>,
  pub device_count: Option<u32>,
}

/// A controller-to-device pairing request (spec.md §4.3.1: "Pairing
/// request").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRequestInfo {
  pub discriminator: u16,
  pub zone_id: String,
  pub zone_name: Option<String>,
  pub host: String,
}

/// A parsed `MASH:<version>:<discriminator>:<setupCode>` QR code (spec.md
/// §3 "QRCode").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCode {
  pub version: u8,
  pub discriminator: u16,
  /// 8-digit numeric setup code, zero-padded. Stored as `u32` with the
  /// padding re-applied on format, per spec.md §8: "setup code always
  /// zero-padded to preserve leading zeros."
  pub setup_code: u32,
}
