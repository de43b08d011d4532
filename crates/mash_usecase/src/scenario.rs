// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! `ScenarioBitmap`: a 32-bit integer over tagged scenario-bit positions
//! (spec.md §9: "Scenario bitmap over tagged sets" — use a plain integer
//! rather than a `HashSet<ScenarioBit>`; the registry defines bit
//! positions from YAML and the bitmap just carries which are set).

use serde::{Deserialize, Serialize};

/// Bit 0 is always BASE (spec.md §3: "ScenarioDef").
pub const BASE_BIT: u8 = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioBitmap(pub u32);

impl ScenarioBitmap {
  pub const EMPTY: ScenarioBitmap = ScenarioBitmap(0);

  pub fn has(&self, bit: u8) -> bool {
    self.0 & (1 << bit) != 0
  }

  pub fn set(&mut self, bit: u8) {
    self.0 |= 1 << bit;
  }

  pub fn clear(&mut self, bit: u8) {
    self.0 &= !(1 << bit);
  }

  pub fn has_base(&self) -> bool {
    self.has(BASE_BIT)
  }

  pub fn union(self, other: ScenarioBitmap) -> ScenarioBitmap {
    ScenarioBitmap(self.0 | other.0)
  }
}

impl std::ops::BitOr for ScenarioBitmap {
  type Output = ScenarioBitmap;

  fn bitor(self, rhs: ScenarioBitmap) -> ScenarioBitmap {
    self.union(rhs)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_set_has_clear() {
    let mut bitmap = ScenarioBitmap::EMPTY;
    assert!(!bitmap.has(3));
    bitmap.set(3);
    assert!(bitmap.has(3));
    bitmap.clear(3);
    assert!(!bitmap.has(3));
  }

  #[test]
  fn test_base_bit_is_zero() {
    let mut bitmap = ScenarioBitmap::EMPTY;
    bitmap.set(BASE_BIT);
    assert!(bitmap.has_base());
    assert_eq!(bitmap.0, 1);
  }
}
