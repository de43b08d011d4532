// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! QR code format/parse (spec.md §4.3.1, §8: "QR round-trip").
//!
//! `MASH:<version>:<discriminator>:<8-digit-setupcode>`, literal ASCII.

use crate::entities::QrCode;
use mash_core::errors::MashParseError;

const PREFIX: &str = "MASH";

/// Formats a QR code string. `discriminator` is masked to 12 bits and
/// `setup_code` to its 8-digit range by the caller's construction of
/// [`QrCode`]; this function trusts the struct's invariants and only
/// applies the zero-padding the wire format requires.
pub fn format(qr: &QrCode) -> String {
  format!(
    "{PREFIX}:{}:{}:{:08}",
    qr.version, qr.discriminator, qr.setup_code
  )
}

/// Parses a QR code string, per spec.md §8's four invalid-case scenarios.
pub fn parse(input: &str) -> Result<QrCode, MashParseError> {
  let parts: Vec<&str> = input.split(':').collect();
  if parts.len() != 4 {
    return Err(MashParseError::InvalidPrefix(input.to_owned()));
  }
  if parts[0] != PREFIX {
    return Err(MashParseError::InvalidPrefix(input.to_owned()));
  }

  let version: u8 = parts[1]
    .parse()
    .ok()
    .filter(|v| *v >= 1)
    .ok_or_else(|| MashParseError::InvalidVersion(parts[1].to_owned()))?;

  let discriminator: u16 = parts[2]
    .parse()
    .ok()
    .filter(|d| *d <= 4095)
    .ok_or_else(|| MashParseError::InvalidDiscriminator(parts[2].to_owned()))?;

  let setup_code_str = parts[3];
  if setup_code_str.len() != 8 || !setup_code_str.bytes().all(|b| b.is_ascii_digit()) {
    return Err(MashParseError::InvalidSetupCode(setup_code_str.to_owned()));
  }
  let setup_code: u32 = setup_code_str
    .parse()
    .map_err(|_| MashParseError::InvalidSetupCode(setup_code_str.to_owned()))?;

  Ok(QrCode {
    version,
    discriminator,
    setup_code,
  })
}

#[cfg(test)]
mod test {
  use super::*;
  use test_case::test_case;

  #[test]
  fn test_format() {
    let qr = QrCode {
      version: 1,
      discriminator: 1234,
      setup_code: 45,
    };
    assert_eq!(format(&qr), "MASH:1:1234:00000045");
  }

  #[test]
  fn test_round_trip() {
    let qr = QrCode {
      version: 1,
      discriminator: 4095,
      setup_code: 99999999,
    };
    let formatted = format(&qr);
    assert_eq!(formatted, "MASH:1:4095:99999999");
    assert_eq!(parse(&formatted).unwrap(), qr);
  }

  #[test_case("EEBUS:1:1234:12345678")]
  fn test_invalid_prefix(input: &str) {
    assert!(matches!(parse(input), Err(MashParseError::InvalidPrefix(_))));
  }

  #[test_case("MASH:0:1234:12345678")]
  fn test_invalid_version(input: &str) {
    assert!(matches!(parse(input), Err(MashParseError::InvalidVersion(_))));
  }

  #[test_case("MASH:1:9999:12345678")]
  fn test_invalid_discriminator(input: &str) {
    assert!(matches!(
      parse(input),
      Err(MashParseError::InvalidDiscriminator(_))
    ));
  }

  #[test_case("MASH:1:1234:1234abcd")]
  fn test_invalid_setup_code(input: &str) {
    assert!(matches!(parse(input), Err(MashParseError::InvalidSetupCode(_))));
  }
}
