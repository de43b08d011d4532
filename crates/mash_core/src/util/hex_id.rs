// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! 16-hex-character zone/device ID validation, used by the discovery TXT
//! codec and the capability model's device ID field (spec.md §3, §4.3.1).

use crate::errors::MashParseError;

/// Validates that `s` is exactly 16 lowercase hex characters, as spec.md
/// §4.3.1 requires for zone IDs and device IDs.
pub fn validate_hex_id(s: &str) -> Result<(), MashParseError> {
  if s.len() == 16 && s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
    Ok(())
  } else {
    Err(MashParseError::InvalidHexId(s.to_owned()))
  }
}

/// Computes a 16-hex-character ID as the first 64 bits of a SHA-256 digest,
/// per spec.md §4.3.1 ("Zone ID: first 64 bits of SHA-256 over the zone CA
/// certificate DER... Device ID: first 64 bits of SHA-256 over the device
/// operational certificate's PKIX-encoded public key").
pub fn sha256_first64_hex(data: &[u8]) -> String {
  use sha2::{Digest, Sha256};
  let digest = Sha256::digest(data);
  digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_validate_hex_id() {
    assert!(validate_hex_id("a1b2c3d4e5f6a7b8").is_ok());
    assert!(validate_hex_id("A1B2C3D4E5F6A7B8").is_err());
    assert!(validate_hex_id("short").is_err());
    assert!(validate_hex_id("a1b2c3d4e5f6a7b8extra").is_err());
  }

  #[test]
  fn test_sha256_first64_hex_is_16_chars() {
    let id = sha256_first64_hex(b"some cert der bytes");
    assert_eq!(id.len(), 16);
    assert!(validate_hex_id(&id).is_ok());
  }

  #[test]
  fn test_sha256_first64_hex_is_deterministic() {
    assert_eq!(sha256_first64_hex(b"abc"), sha256_first64_hex(b"abc"));
    assert_ne!(sha256_first64_hex(b"abc"), sha256_first64_hex(b"abd"));
  }
}
