// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Multi-interface browse aggregation (spec.md §4.3.3: "a device answering
//! on two interfaces must not be reported twice"). `mdns-sd` raises one
//! resolve/remove event per interface; [`Aggregator`] folds those into a
//! single added event on first sight and a single removed event once every
//! interface has lost the instance, keyed by DNS-SD instance name with the
//! per-instance address set unioned across interfaces.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateEvent {
  Added,
  Removed,
}

/// Tracks, per service instance name, the set of interface addresses the
/// instance has been resolved on.
#[derive(Debug, Default)]
pub struct Aggregator {
  addresses_by_instance: HashMap<String, HashSet<String>>,
}

impl Aggregator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records that `instance` resolved on `address`. Returns `Some(Added)`
  /// the first time this instance is seen on any interface, `None` on
  /// subsequent interfaces for an already-known instance.
  pub fn note_resolved(&mut self, instance: &str, address: &str) -> Option<AggregateEvent> {
    let addresses = self.addresses_by_instance.entry(instance.to_owned()).or_default();
    let was_empty = addresses.is_empty();
    let is_new_address = addresses.insert(address.to_owned());
    if was_empty && is_new_address {
      Some(AggregateEvent::Added)
    } else {
      None
    }
  }

  /// Records that `instance` was removed on `address`. Returns
  /// `Some(Removed)` once the last known address for this instance is
  /// gone, `None` while other interfaces still report it reachable.
  pub fn note_removed(&mut self, instance: &str, address: &str) -> Option<AggregateEvent> {
    let Some(addresses) = self.addresses_by_instance.get_mut(instance) else {
      return None;
    };
    addresses.remove(address);
    if addresses.is_empty() {
      self.addresses_by_instance.remove(instance);
      Some(AggregateEvent::Removed)
    } else {
      None
    }
  }

  pub fn known_instances(&self) -> Vec<String> {
    self.addresses_by_instance.keys().cloned().collect()
  }

  pub fn addresses_for(&self, instance: &str) -> Vec<String> {
    self
      .addresses_by_instance
      .get(instance)
      .map(|set| set.iter().cloned().collect())
      .unwrap_or_default()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_single_interface_added_removed() {
    let mut agg = Aggregator::new();
    assert_eq!(
      agg.note_resolved("charger._mashc._udp.local.", "192.168.1.10"),
      Some(AggregateEvent::Added)
    );
    assert_eq!(
      agg.note_removed("charger._mashc._udp.local.", "192.168.1.10"),
      Some(AggregateEvent::Removed)
    );
  }

  #[test]
  fn test_two_interfaces_single_added_single_removed() {
    let mut agg = Aggregator::new();
    let instance = "charger._mashc._udp.local.";
    assert_eq!(agg.note_resolved(instance, "192.168.1.10"), Some(AggregateEvent::Added));
    // Second interface resolving the same instance does not repeat Added.
    assert_eq!(agg.note_resolved(instance, "fe80::1"), None);
    assert_eq!(agg.addresses_for(instance).len(), 2);

    // Losing one interface does not yet emit Removed.
    assert_eq!(agg.note_removed(instance, "192.168.1.10"), None);
    assert_eq!(agg.addresses_for(instance).len(), 1);

    // Only the last address leaving emits Removed.
    assert_eq!(agg.note_removed(instance, "fe80::1"), Some(AggregateEvent::Removed));
    assert!(agg.known_instances().is_empty());
  }

  #[test]
  fn test_removed_for_unknown_instance_is_noop() {
    let mut agg = Aggregator::new();
    assert_eq!(agg.note_removed("unknown._mashc._udp.local.", "10.0.0.1"), None);
  }

  #[test]
  fn test_readvertisement_after_full_removal_emits_added_again() {
    let mut agg = Aggregator::new();
    let instance = "plug._mashc._udp.local.";
    agg.note_resolved(instance, "10.0.0.5");
    agg.note_removed(instance, "10.0.0.5");
    assert_eq!(agg.note_resolved(instance, "10.0.0.5"), Some(AggregateEvent::Added));
  }
}
