// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Protocol version parsing and ALPN naming.
//!
//! A MASH version is a `major.minor` pair. Two endpoints are considered
//! protocol-compatible when their major versions match; the minor version is
//! informational and used only to pick the richest mutually understood
//! feature set once a connection is established.

use crate::errors::MashParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed `major.minor` MASH protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
  pub major: u8,
  pub minor: u8,
}

impl Version {
  pub fn new(major: u8, minor: u8) -> Self {
    Self { major, minor }
  }

  /// ALPN protocol name for this version's major revision, e.g. `mash/1`.
  pub fn alpn(&self) -> String {
    format!("mash/{}", self.major)
  }

  /// Same-major compatibility predicate (spec.md §1: "Version").
  pub fn is_compatible_with(&self, other: &Version) -> bool {
    self.major == other.major
  }

  /// Validates a negotiated ALPN string against this version's protocol name.
  /// A peer advertising something else (e.g. `http/1.1`) is a `NotAMashAlpn`
  /// error, per spec.md §6.
  pub fn validate_alpn(&self, negotiated: &str) -> Result<(), MashParseError> {
    if negotiated == self.alpn() {
      Ok(())
    } else {
      Err(MashParseError::NotAMashAlpn(negotiated.to_owned()))
    }
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.major, self.minor)
  }
}

impl FromStr for Version {
  type Err = MashParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut parts = s.splitn(2, '.');
    let major = parts
      .next()
      .ok_or_else(|| MashParseError::InvalidVersion(s.to_owned()))?;
    let minor = parts
      .next()
      .ok_or_else(|| MashParseError::InvalidVersion(s.to_owned()))?;
    if parts.next().is_some() {
      return Err(MashParseError::InvalidVersion(s.to_owned()));
    }
    let major: u8 = major
      .parse()
      .map_err(|_| MashParseError::InvalidVersion(s.to_owned()))?;
    let minor: u8 = minor
      .parse()
      .map_err(|_| MashParseError::InvalidVersion(s.to_owned()))?;
    Ok(Version { major, minor })
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use test_case::test_case;

  #[test_case("1.0", Some(Version::new(1, 0)))]
  #[test_case("1.2", Some(Version::new(1, 2)))]
  #[test_case("1", None)]
  #[test_case("1.2.3", None)]
  #[test_case("a.2", None)]
  fn test_version_parse(input: &str, expected: Option<Version>) {
    assert_eq!(input.parse::<Version>().ok(), expected);
  }

  #[test]
  fn test_alpn() {
    assert_eq!(Version::new(1, 3).alpn(), "mash/1");
  }

  #[test]
  fn test_compatibility_is_major_only() {
    assert!(Version::new(1, 0).is_compatible_with(&Version::new(1, 7)));
    assert!(!Version::new(1, 0).is_compatible_with(&Version::new(2, 0)));
  }

  #[test]
  fn test_validate_alpn() {
    let v = Version::new(1, 0);
    assert!(v.validate_alpn("mash/1").is_ok());
    assert!(matches!(
      v.validate_alpn("http/1.1"),
      Err(MashParseError::NotAMashAlpn(_))
    ));
  }
}
