// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! MASH error taxonomy (spec.md §7).
//!
//! Errors are grouped by abstract kind rather than by the subsystem that
//! raised them, so that a controller UI can react the same way to
//! `NotFound` regardless of whether it came from the spec loader, the
//! discovery browser, or the matcher. Each leaf enum carries its message as
//! a doc comment (read by `displaydoc`); [`MashError`] aggregates every leaf
//! kind behind one `#[from]`-derived enum, mirroring how protocol errors are
//! aggregated in mature multi-crate device-control stacks.

use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type MashResult<T = ()> = Result<T, MashError>;

/// Malformed input: QR codes, TXT records, zone/device IDs, discriminators.
#[derive(Debug, Error, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MashParseError {
  /// QR code does not start with the MASH prefix: {0}
  InvalidPrefix(String),
  /// QR code version {0} is out of the valid 1-255 range
  InvalidVersion(String),
  /// Discriminator {0} is out of the valid 0-4095 range
  InvalidDiscriminator(String),
  /// Setup code {0} is not an 8-digit numeric string
  InvalidSetupCode(String),
  /// TXT record is malformed: {0}
  InvalidTxtRecord(String),
  /// Zone or device ID {0} must be 16 lowercase hex characters
  InvalidHexId(String),
  /// Negotiated ALPN protocol {0} is not a MASH ALPN
  NotAMashAlpn(String),
}

/// Something the caller asked for does not exist.
#[derive(Debug, Error, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MashNotFoundError {
  /// No advertisement is active for {0}
  AdvertisementNotFound(String),
  /// No device matched discriminator {0} before the deadline
  DiscriminatorNotFound(u16),
  /// Spec manifest version {0} is not bundled
  SpecVersionNotFound(String),
  /// Unknown feature name: {0}
  UnknownFeature(String),
  /// Unknown attribute name {0} on feature {1}
  UnknownAttribute(String, String),
  /// Unknown command name {0} on feature {1}
  UnknownCommand(String, String),
}

/// An attempt to create something that already exists.
#[derive(Debug, Error, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MashAlreadyExistsError {
  /// Pairing request for discriminator {0} is already active
  PairingRequestAlreadyActive(u16),
}

/// A required field or precondition was missing.
#[derive(Debug, Error, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MashMissingRequiredError {
  /// Zone ID must not be empty
  EmptyZoneId,
  /// Device ID must not be empty
  EmptyDeviceId,
  /// Commissioning mode requires commissionableInfo to be set first
  MissingCommissionableInfo,
  /// Pairing request validation requires a non-empty host
  EmptyPairingRequestHost,
}

/// A YAML/JSON document failed to parse or violated its schema.
#[derive(Debug, Error, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MashParseFailedError {
  /// Failed to parse manifest YAML: {0}
  YamlParseError(String),
  /// Manifest failed schema validation: {0}
  SchemaValidationError(String),
  /// Use-case definition {0} is missing its BASE scenario at bit 0
  MissingBaseScenario(String),
}

/// A write or operation violated a declared policy.
#[derive(Debug, Error, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MashPolicyViolationError {
  /// Attribute {0} is read-only and cannot be written by external callers
  ReadOnlyAttribute(String),
  /// Attribute {0} is not nullable and cannot be set to null
  NotNullable(String),
  /// Value for attribute {0} is out of its declared min/max range
  OutOfRange(String),
  /// Value for attribute {0} is not a member of its declared enum
  NotInEnum(String),
  /// Value for attribute {0} does not match its declared data type
  TypeMismatch(String),
}

/// A long-running operation was cancelled or timed out.
#[derive(Debug, Error, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MashTimeoutError {
  /// Operation timed out waiting for a match
  DeadlineExceeded,
  /// Operation was cancelled
  Cancelled,
}

/// Aggregation enum for every MASH error kind.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MashError {
  #[error(transparent)]
  Parse(#[from] MashParseError),
  #[error(transparent)]
  NotFound(#[from] MashNotFoundError),
  #[error(transparent)]
  AlreadyExists(#[from] MashAlreadyExistsError),
  #[error(transparent)]
  MissingRequired(#[from] MashMissingRequiredError),
  #[error(transparent)]
  ParseFailed(#[from] MashParseFailedError),
  #[error(transparent)]
  PolicyViolation(#[from] MashPolicyViolationError),
  #[error(transparent)]
  Timeout(#[from] MashTimeoutError),
}
