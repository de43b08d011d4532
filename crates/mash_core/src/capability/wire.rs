// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The `UseCaseDecl` wire record (spec.md §3).

use getset::CopyGetters;
use serde::{Deserialize, Serialize};

/// Bit 0 (BASE) of a [`UseCaseDecl`]'s scenario bitmap.
pub const BASE_SCENARIO_BIT: u8 = 0;

/// Wire record: `{endpointId:u8, useCaseId:u16, major:u8, minor:u8,
/// scenarios:u32}`. When present, bit 0 is always set (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
pub struct UseCaseDecl {
  #[serde(rename = "endpointId")]
  endpoint_id: u8,
  #[serde(rename = "useCaseId")]
  use_case_id: u16,
  major: u8,
  minor: u8,
  scenarios: u32,
}

impl UseCaseDecl {
  pub fn new(endpoint_id: u8, use_case_id: u16, major: u8, minor: u8, scenarios: u32) -> Self {
    Self {
      endpoint_id,
      use_case_id,
      major,
      minor,
      scenarios: scenarios | (1 << BASE_SCENARIO_BIT),
    }
  }

  pub fn has_scenario(&self, bit: u8) -> bool {
    self.scenarios & (1 << bit) != 0
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_base_bit_always_set() {
    let decl = UseCaseDecl::new(1, 0x1234, 1, 0, 0);
    assert!(decl.has_scenario(BASE_SCENARIO_BIT));
  }

  #[test]
  fn test_serde_field_names() {
    let decl = UseCaseDecl::new(1, 0x1234, 1, 0, 0b1011);
    let json = serde_json::to_string(&decl).unwrap();
    assert!(json.contains("\"endpointId\""));
    assert!(json.contains("\"useCaseId\""));
  }
}
