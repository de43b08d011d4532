// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Dynamic, schema-checked attribute values.
//!
//! Attributes carry runtime-typed values because the wire codec,
//! subscription engine, and generic read/write pipeline are schema-driven —
//! specializing every attribute's Rust type would multiply the surface area
//! for no benefit (spec.md §9). [`AttributeValue`] is the dynamic value;
//! [`AttributeDataType`] is the closed shape it is checked against.
//! Typed accessors (see [`crate::capability::feature::Feature`]) narrow an
//! `AttributeValue` to its declared type and return a
//! [`MashPolicyViolationError`] on mismatch, rather than panicking.

use crate::errors::MashPolicyViolationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// The closed set of attribute data types spec.md §3 names:
/// `uint8|uint16|uint32|int64|bool|string|map<K,V>|array<T>|enum<E>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AttributeDataType {
  Uint8,
  Uint16,
  Uint32,
  Int64,
  Bool,
  String,
  Map {
    key: Box<AttributeDataType>,
    value: Box<AttributeDataType>,
  },
  Array {
    element: Box<AttributeDataType>,
  },
  Enum {
    name: String,
    /// Valid discriminants for this enum, so writes can be range-checked
    /// without a separate enum registry lookup.
    values: Vec<u32>,
  },
}

/// A dynamically typed attribute value. `Null` is only constructible for
/// nullable attributes — see [`crate::capability::feature::Attribute::write`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum AttributeValue {
  Null,
  Uint8(u8),
  Uint16(u16),
  Uint32(u32),
  Int64(i64),
  Bool(bool),
  String(String),
  Map(HashMap<String, AttributeValue>),
  Array(Vec<AttributeValue>),
  Enum(u32),
}

impl AttributeValue {
  /// Checks this value against a declared data type, mandatory min/max
  /// (for numeric types), and enum membership. Returns the specific
  /// [`MashPolicyViolationError`] variant spec.md §7 calls for.
  pub fn check(
    &self,
    data_type: &AttributeDataType,
    attribute_name: &str,
    min: Option<i64>,
    max: Option<i64>,
  ) -> Result<(), MashPolicyViolationError> {
    match (self, data_type) {
      (AttributeValue::Null, _) => Ok(()),
      (AttributeValue::Uint8(v), AttributeDataType::Uint8) => {
        Self::check_range(*v as i64, attribute_name, min, max)
      }
      (AttributeValue::Uint16(v), AttributeDataType::Uint16) => {
        Self::check_range(*v as i64, attribute_name, min, max)
      }
      (AttributeValue::Uint32(v), AttributeDataType::Uint32) => {
        Self::check_range(*v as i64, attribute_name, min, max)
      }
      (AttributeValue::Int64(v), AttributeDataType::Int64) => {
        Self::check_range(*v, attribute_name, min, max)
      }
      (AttributeValue::Bool(_), AttributeDataType::Bool) => Ok(()),
      (AttributeValue::String(_), AttributeDataType::String) => Ok(()),
      (AttributeValue::Enum(discriminant), AttributeDataType::Enum { values, .. }) => {
        if values.contains(discriminant) {
          Ok(())
        } else {
          Err(MashPolicyViolationError::NotInEnum(
            attribute_name.to_owned(),
          ))
        }
      }
      (AttributeValue::Array(elements), AttributeDataType::Array { element }) => {
        for e in elements {
          e.check(element, attribute_name, None, None)?;
        }
        Ok(())
      }
      (AttributeValue::Map(entries), AttributeDataType::Map { value, .. }) => {
        for v in entries.values() {
          v.check(value, attribute_name, None, None)?;
        }
        Ok(())
      }
      _ => Err(MashPolicyViolationError::TypeMismatch(
        attribute_name.to_owned(),
      )),
    }
  }

  fn check_range(
    value: i64,
    attribute_name: &str,
    min: Option<i64>,
    max: Option<i64>,
  ) -> Result<(), MashPolicyViolationError> {
    if let Some(min) = min
      && value < min
    {
      return Err(MashPolicyViolationError::OutOfRange(
        attribute_name.to_owned(),
      ));
    }
    if let Some(max) = max
      && value > max
    {
      return Err(MashPolicyViolationError::OutOfRange(
        attribute_name.to_owned(),
      ));
    }
    Ok(())
  }

  pub fn is_null(&self) -> bool {
    matches!(self, AttributeValue::Null)
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      AttributeValue::Bool(v) => Some(*v),
      _ => None,
    }
  }

  pub fn as_u16(&self) -> Option<u16> {
    match self {
      AttributeValue::Uint16(v) => Some(*v),
      _ => None,
    }
  }

  pub fn as_u8(&self) -> Option<u8> {
    match self {
      AttributeValue::Uint8(v) => Some(*v),
      _ => None,
    }
  }
}

/// Getter/setter/clear ergonomics for a nullable attribute's cached value:
/// one setter for a concrete value, one explicit clear, and a convenience
/// that dispatches between them from an `Option<T>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NullableAttribute<T> {
  value: Option<T>,
}

impl<T> NullableAttribute<T> {
  pub fn new(value: Option<T>) -> Self {
    Self { value }
  }

  /// Returns `(value, present)` per spec.md §4.4.
  pub fn get(&self) -> (Option<&T>, bool) {
    (self.value.as_ref(), self.value.is_some())
  }

  pub fn set(&mut self, value: T) {
    self.value = Some(value);
  }

  pub fn clear(&mut self) {
    self.value = None;
  }

  pub fn set_option(&mut self, value: Option<T>) {
    match value {
      Some(v) => self.set(v),
      None => self.clear(),
    }
  }
}

/// A numeric value range, reused for attribute min/max and command
/// parameter bounds.
pub type ValueRange = RangeInclusive<i64>;

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_range_check() {
    let t = AttributeDataType::Uint8;
    assert!(AttributeValue::Uint8(5).check(&t, "x", Some(0), Some(10)).is_ok());
    assert!(
      AttributeValue::Uint8(20)
        .check(&t, "x", Some(0), Some(10))
        .is_err()
    );
  }

  #[test]
  fn test_enum_membership() {
    let t = AttributeDataType::Enum {
      name: "Foo".into(),
      values: vec![0, 1, 2],
    };
    assert!(AttributeValue::Enum(1).check(&t, "x", None, None).is_ok());
    assert!(AttributeValue::Enum(5).check(&t, "x", None, None).is_err());
  }

  #[test]
  fn test_type_mismatch() {
    let t = AttributeDataType::Bool;
    assert!(matches!(
      AttributeValue::Uint8(1).check(&t, "x", None, None),
      Err(MashPolicyViolationError::TypeMismatch(_))
    ));
  }

  #[test]
  fn test_null_always_passes_check() {
    let t = AttributeDataType::Uint8;
    assert!(AttributeValue::Null.check(&t, "x", Some(0), Some(1)).is_ok());
  }

  #[test]
  fn test_nullable_attribute_roundtrip() {
    let mut a: NullableAttribute<u32> = NullableAttribute::new(None);
    assert_eq!(a.get(), (None, false));
    a.set(5);
    assert_eq!(a.get(), (Some(&5), true));
    a.clear();
    assert_eq!(a.get(), (None, false));
    a.set_option(Some(9));
    assert_eq!(a.get(), (Some(&9), true));
  }
}
