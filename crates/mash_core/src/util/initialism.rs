// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The initialism convention (spec.md §4.4): wire names are lowerCamelCase;
//! exported identifiers title-case them, treating known initialisms
//! (AC, DC, EV, ...) as single units rather than capitalizing each letter.
//!
//! This is purely a documentation/`Display` convenience — wire
//! (de)serialization always keys off the literal YAML `name` string via
//! `serde(rename)`, never this helper, so a changed initialism list can
//! never break round-tripping.

const INITIALISMS: &[&str] = &[
  "AC", "DC", "EV", "EVSE", "ID", "PV", "RFID", "VIN", "HVAC", "EVCC", "MAC", "EUI48", "EUI64",
];

/// Splits a lowerCamelCase wire name into title-cased words, keeping any
/// recognized initialism as one upper-case unit.
pub fn to_title_case(name: &str) -> String {
  let words = split_camel_case(name);
  words
    .into_iter()
    .map(|w| {
      let upper = w.to_uppercase();
      if let Some(known) = INITIALISMS.iter().find(|i| **i == upper) {
        known.to_string()
      } else {
        title_case_word(&w)
      }
    })
    .collect::<Vec<_>>()
    .join("")
}

fn title_case_word(w: &str) -> String {
  let mut chars = w.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    None => String::new(),
  }
}

fn split_camel_case(name: &str) -> Vec<String> {
  let mut words = Vec::new();
  let mut current = String::new();
  for c in name.chars() {
    if c.is_uppercase() && !current.is_empty() && !current.chars().last().unwrap().is_uppercase() {
      words.push(std::mem::take(&mut current));
    }
    current.push(c);
  }
  if !current.is_empty() {
    words.push(current);
  }
  words
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_plain_word() {
    assert_eq!(to_title_case("acceptsLimits"), "AcceptsLimits");
  }

  #[test]
  fn test_initialism_preserved() {
    assert_eq!(to_title_case("evChargerState"), "EVChargerState");
  }

  #[test]
  fn test_leading_initialism() {
    assert_eq!(to_title_case("idToken"), "IDToken");
  }
}
