// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The device-side discovery state machine (spec.md §4.3.2: "Commissioning
//! window"). Five states — `UNREGISTERED`, `UNCOMMISSIONED`,
//! `COMMISSIONING_OPEN`, `OPERATIONAL`, `OPERATIONAL_COMMISSIONING` — driven
//! by the zone/commissioning-mode/pairing-request operations below. State
//! changes and the commissioning timeout are published on a broadcast
//! channel, the same shape the device manager uses to fan events out to
//! external listeners.

use crate::advertiser::Advertiser;
use crate::entities::{CommissionableInfo, CommissionerInfo, OperationalInfo, PairingRequestInfo};
use dashmap::DashMap;
use mash_core::errors::{
  MashAlreadyExistsError, MashError, MashMissingRequiredError, MashNotFoundError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);
pub const MIN_WINDOW: Duration = Duration::from_secs(3 * 60);
pub const MAX_WINDOW: Duration = Duration::from_secs(3 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryState {
  Unregistered,
  Uncommissioned,
  CommissioningOpen,
  Operational,
  OperationalCommissioning,
}

#[derive(Debug, Clone)]
pub enum DiscoveryEvent {
  StateChanged {
    from: DiscoveryState,
    to: DiscoveryState,
  },
  CommissioningTimedOut,
}

struct Inner {
  state: DiscoveryState,
  commissionable_info: Option<CommissionableInfo>,
  operational_zones: DashMap<String, OperationalInfo>,
  commissioner_zones: DashMap<String, CommissionerInfo>,
  pairing_requests: DashMap<u16, PairingRequestInfo>,
  window_cancel: Option<CancellationToken>,
}

/// The device- or controller-side discovery state machine. Cheaply
/// clonable: internal state lives behind an `Arc`, so the event-emitting
/// window timer task below can hold its own handle. The manager
/// exclusively owns the set of active advertisements (spec.md §4.3.2) by
/// driving an injected [`Advertiser`] directly from its transitions,
/// rather than leaving that wiring to a caller reacting to state-change
/// events.
#[derive(Clone)]
pub struct DiscoveryManager {
  inner: Arc<Mutex<Inner>>,
  events: broadcast::Sender<DiscoveryEvent>,
  window: Duration,
  advertiser: Arc<dyn Advertiser>,
}

impl DiscoveryManager {
  pub fn new(window: Duration, advertiser: Arc<dyn Advertiser>) -> Result<Self, MashError> {
    if window < MIN_WINDOW || window > MAX_WINDOW {
      return Err(MashError::PolicyViolation(
        mash_core::errors::MashPolicyViolationError::OutOfRange("commissioning window".into()),
      ));
    }
    let (events, _) = broadcast::channel(64);
    Ok(Self {
      inner: Arc::new(Mutex::new(Inner {
        state: DiscoveryState::Unregistered,
        commissionable_info: None,
        operational_zones: DashMap::new(),
        commissioner_zones: DashMap::new(),
        pairing_requests: DashMap::new(),
        window_cancel: None,
      })),
      events,
      window,
      advertiser,
    })
  }

  pub fn with_default_window(advertiser: Arc<dyn Advertiser>) -> Self {
    Self::new(DEFAULT_WINDOW, advertiser).expect("default window is within bounds")
  }

  pub fn subscribe(&self) -> broadcast::Receiver<DiscoveryEvent> {
    self.events.subscribe()
  }

  pub async fn state(&self) -> DiscoveryState {
    self.inner.lock().await.state
  }

  pub async fn set_commissionable_info(&self, info: CommissionableInfo) {
    self.inner.lock().await.commissionable_info = Some(info);
  }

  fn emit_transition(&self, from: DiscoveryState, to: DiscoveryState) {
    if from == to {
      return;
    }
    debug!(?from, ?to, "discovery state transition");
    let _ = self.events.send(DiscoveryEvent::StateChanged { from, to });
  }

  /// EnterCommissioningMode (spec.md §4.3.2). Starts the commissionable
  /// advertisement the first time a commissioning state is entered
  /// (idempotent — a second call while already commissioning only resets
  /// the window timer, per spec.md §8's "State-machine idempotence").
  /// Starts the commissioning window timer; `OnCommissioningTimeout` fires
  /// via the event channel if `exit_commissioning_mode` is not called
  /// before it elapses.
  pub async fn enter_commissioning_mode(&self) -> Result<(), MashError> {
    let mut guard = self.inner.lock().await;
    let info = guard
      .commissionable_info
      .clone()
      .ok_or(MashMissingRequiredError::MissingCommissionableInfo)?;
    let from = guard.state;
    let to = match from {
      DiscoveryState::Unregistered | DiscoveryState::Uncommissioned => DiscoveryState::CommissioningOpen,
      DiscoveryState::Operational => DiscoveryState::OperationalCommissioning,
      DiscoveryState::CommissioningOpen | DiscoveryState::OperationalCommissioning => from,
    };
    let already_commissioning = matches!(
      from,
      DiscoveryState::CommissioningOpen | DiscoveryState::OperationalCommissioning
    );
    if !already_commissioning {
      self.advertiser.advertise_commissionable(info).await?;
    }
    guard.state = to;

    if let Some(token) = guard.window_cancel.take() {
      token.cancel();
    }
    let token = CancellationToken::new();
    guard.window_cancel = Some(token.clone());
    drop(guard);

    self.emit_transition(from, to);
    self.spawn_window_timer(token);
    Ok(())
  }

  fn spawn_window_timer(&self, token: CancellationToken) {
    let this = self.clone();
    let window = self.window;
    tokio::spawn(async move {
      tokio::select! {
        _ = tokio::time::sleep(window) => {
          this.handle_window_timeout().await;
        }
        _ = token.cancelled() => {}
      }
    });
  }

  async fn handle_window_timeout(&self) {
    let mut guard = self.inner.lock().await;
    let from = guard.state;
    let to = match from {
      DiscoveryState::CommissioningOpen => DiscoveryState::Uncommissioned,
      DiscoveryState::OperationalCommissioning => DiscoveryState::Operational,
      other => other,
    };
    guard.state = to;
    guard.window_cancel = None;
    drop(guard);
    if from != to {
      warn!("commissioning window elapsed without completion");
      if let Err(err) = self.advertiser.stop_commissionable().await {
        warn!(%err, "failed to stop commissionable advertisement on window timeout");
      }
      let _ = self.events.send(DiscoveryEvent::CommissioningTimedOut);
      self.emit_transition(from, to);
    }
  }

  /// ExitCommissioningMode (spec.md §4.3.2), called on successful
  /// commissioning completion or explicit cancellation.
  pub async fn exit_commissioning_mode(&self) -> Result<(), MashError> {
    let mut guard = self.inner.lock().await;
    let from = guard.state;
    let to = match from {
      DiscoveryState::CommissioningOpen => DiscoveryState::Uncommissioned,
      DiscoveryState::OperationalCommissioning => DiscoveryState::Operational,
      other => other,
    };
    let left_commissioning = from != to;
    guard.state = to;
    if let Some(token) = guard.window_cancel.take() {
      token.cancel();
    }
    drop(guard);
    if left_commissioning {
      self.advertiser.stop_commissionable().await?;
    }
    self.emit_transition(from, to);
    Ok(())
  }

  fn derive_operational_state(current: DiscoveryState, has_zones: bool) -> DiscoveryState {
    match (current, has_zones) {
      (DiscoveryState::Unregistered, true) | (DiscoveryState::Uncommissioned, true) => DiscoveryState::Operational,
      (DiscoveryState::CommissioningOpen, true) => DiscoveryState::OperationalCommissioning,
      (DiscoveryState::Operational, false) => DiscoveryState::Uncommissioned,
      (DiscoveryState::OperationalCommissioning, false) => DiscoveryState::CommissioningOpen,
      (other, _) => other,
    }
  }

  /// AddZone (spec.md §4.3.2, §7: `MissingRequired` on empty zone/device
  /// ID). First zone added from `UNCOMMISSIONED` moves the manager to
  /// `OPERATIONAL`; starts one operational advertisement per zone.
  pub async fn add_zone(&self, info: OperationalInfo) -> Result<(), MashError> {
    if info.zone_id.is_empty() {
      return Err(MashMissingRequiredError::EmptyZoneId.into());
    }
    if info.device_id.is_empty() {
      return Err(MashMissingRequiredError::EmptyDeviceId.into());
    }
    let mut guard = self.inner.lock().await;
    guard.operational_zones.insert(info.zone_id.clone(), info.clone());
    let from = guard.state;
    let to = Self::derive_operational_state(from, !guard.operational_zones.is_empty());
    guard.state = to;
    drop(guard);
    self.advertiser.advertise_operational(info).await?;
    self.emit_transition(from, to);
    Ok(())
  }

  pub async fn update_zone(&self, info: OperationalInfo) -> Result<(), MashError> {
    let guard = self.inner.lock().await;
    if !guard.operational_zones.contains_key(&info.zone_id) {
      return Err(MashNotFoundError::AdvertisementNotFound(info.zone_id).into());
    }
    guard.operational_zones.insert(info.zone_id.clone(), info.clone());
    drop(guard);
    self.advertiser.update_operational(info).await
  }

  /// RemoveZone. Last zone removed collapses the manager back to
  /// `UNCOMMISSIONED` or `COMMISSIONING_OPEN` depending on whether a
  /// commissioning window is open.
  pub async fn remove_zone(&self, zone_id: &str) -> Result<(), MashError> {
    let mut guard = self.inner.lock().await;
    let existed = guard.operational_zones.remove(zone_id).is_some();
    let from = guard.state;
    let to = Self::derive_operational_state(from, !guard.operational_zones.is_empty());
    guard.state = to;
    drop(guard);
    if existed {
      self.advertiser.stop_operational(zone_id).await?;
    }
    self.emit_transition(from, to);
    Ok(())
  }

  pub async fn add_commissioner_zone(&self, info: CommissionerInfo) -> Result<(), MashError> {
    if info.zone_id.is_empty() {
      return Err(MashMissingRequiredError::EmptyZoneId.into());
    }
    self
      .inner
      .lock()
      .await
      .commissioner_zones
      .insert(info.zone_id.clone(), info.clone());
    self.advertiser.advertise_commissioner(info).await
  }

  pub async fn update_commissioner_zone(&self, info: CommissionerInfo) -> Result<(), MashError> {
    let guard = self.inner.lock().await;
    if !guard.commissioner_zones.contains_key(&info.zone_id) {
      return Err(MashNotFoundError::AdvertisementNotFound(info.zone_id).into());
    }
    guard.commissioner_zones.insert(info.zone_id.clone(), info.clone());
    drop(guard);
    self.advertiser.update_commissioner(info).await
  }

  pub async fn remove_commissioner_zone(&self, zone_id: &str) -> Result<(), MashError> {
    let existed = self.inner.lock().await.commissioner_zones.remove(zone_id).is_some();
    if existed {
      self.advertiser.stop_commissioner(zone_id).await?;
    }
    Ok(())
  }

  /// AnnouncePairingRequest (spec.md §4.3.1: "Pairing request"). Rejects a
  /// second concurrent announcement for the same discriminator.
  pub async fn announce_pairing_request(&self, info: PairingRequestInfo) -> Result<(), MashError> {
    if info.host.is_empty() {
      return Err(MashMissingRequiredError::EmptyPairingRequestHost.into());
    }
    {
      let guard = self.inner.lock().await;
      if guard.pairing_requests.contains_key(&info.discriminator) {
        return Err(MashAlreadyExistsError::PairingRequestAlreadyActive(info.discriminator).into());
      }
      guard.pairing_requests.insert(info.discriminator, info.clone());
    }
    self.advertiser.announce_pairing_request(info).await
  }

  /// StopPairingRequest. Idempotent: stopping a request that is not active
  /// is not an error. Cancelling the caller's token does not retract an
  /// already-issued advertisement (spec.md §5) — only an explicit call
  /// here does.
  pub async fn stop_pairing_request(&self, discriminator: u16) -> Result<(), MashError> {
    let existed = self.inner.lock().await.pairing_requests.remove(&discriminator).is_some();
    if existed {
      self.advertiser.stop_pairing_request(discriminator).await?;
    }
    Ok(())
  }

  pub async fn active_pairing_requests(&self) -> Vec<PairingRequestInfo> {
    self
      .inner
      .lock()
      .await
      .pairing_requests
      .iter()
      .map(|entry| entry.value().clone())
      .collect()
  }

  /// Stop. Tears the manager back down to `UNREGISTERED`, cancels any
  /// running commissioning window timer, and withdraws every
  /// advertisement via the injected [`Advertiser`].
  pub async fn stop(&self) -> Result<(), MashError> {
    let mut guard = self.inner.lock().await;
    let from = guard.state;
    if let Some(token) = guard.window_cancel.take() {
      token.cancel();
    }
    guard.operational_zones.clear();
    guard.commissioner_zones.clear();
    guard.pairing_requests.clear();
    guard.state = DiscoveryState::Unregistered;
    drop(guard);
    self.advertiser.stop_all().await?;
    self.emit_transition(from, DiscoveryState::Unregistered);
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::advertiser::QuietAdvertiser;
  use std::time::Duration as StdDuration;

  fn quiet() -> Arc<QuietAdvertiser> {
    Arc::new(QuietAdvertiser::new())
  }

  fn sample_commissionable() -> CommissionableInfo {
    CommissionableInfo {
      discriminator: 123,
      categories: vec![1],
      serial: "SN".into(),
      brand: "Acme".into(),
      model: "X".into(),
      device_name: None,
      port: 8443,
      host: "dev.local".into(),
    }
  }

  fn sample_zone(id: &str) -> OperationalInfo {
    OperationalInfo {
      zone_id: id.into(),
      device_id: "f9e8d7c6b5a49382".into(),
      vendor_product: None,
      firmware: None,
      feature_map: None,
      endpoint_count: None,
    }
  }

  #[tokio::test]
  async fn test_requires_commissionable_info() {
    let mgr = DiscoveryManager::with_default_window(quiet());
    let err = mgr.enter_commissioning_mode().await.unwrap_err();
    assert!(matches!(
      err,
      MashError::MissingRequired(MashMissingRequiredError::MissingCommissionableInfo)
    ));
  }

  #[tokio::test]
  async fn test_enter_exit_commissioning_mode() {
    let mgr = DiscoveryManager::with_default_window(quiet());
    mgr.set_commissionable_info(sample_commissionable()).await;
    mgr.enter_commissioning_mode().await.unwrap();
    assert_eq!(mgr.state().await, DiscoveryState::CommissioningOpen);
    mgr.exit_commissioning_mode().await.unwrap();
    assert_eq!(mgr.state().await, DiscoveryState::Uncommissioned);
  }

  #[tokio::test(start_paused = true)]
  async fn test_commissioning_window_timeout() {
    let advertiser = quiet();
    let mgr = DiscoveryManager::new(MIN_WINDOW, advertiser.clone()).unwrap();
    mgr.set_commissionable_info(sample_commissionable()).await;
    let mut events = mgr.subscribe();
    mgr.enter_commissioning_mode().await.unwrap();
    assert!(advertiser.commissionable_active());
    tokio::time::advance(MIN_WINDOW + StdDuration::from_secs(1)).await;
    // let the spawned timer task run.
    tokio::task::yield_now().await;
    assert_eq!(mgr.state().await, DiscoveryState::Uncommissioned);
    assert!(!advertiser.commissionable_active());

    let mut saw_timeout = false;
    while let Ok(event) = events.try_recv() {
      if matches!(event, DiscoveryEvent::CommissioningTimedOut) {
        saw_timeout = true;
      }
    }
    assert!(saw_timeout);
  }

  #[tokio::test]
  async fn test_exit_commissioning_mode_suppresses_timeout_callback() {
    let mgr = DiscoveryManager::with_default_window(quiet());
    mgr.set_commissionable_info(sample_commissionable()).await;
    let mut events = mgr.subscribe();
    mgr.enter_commissioning_mode().await.unwrap();
    mgr.exit_commissioning_mode().await.unwrap();

    let mut saw_timeout = false;
    while let Ok(event) = events.try_recv() {
      if matches!(event, DiscoveryEvent::CommissioningTimedOut) {
        saw_timeout = true;
      }
    }
    assert!(!saw_timeout, "OnCommissioningTimeout must not fire on user-initiated exit");
  }

  #[tokio::test]
  async fn test_zone_lifecycle_drives_operational_state() {
    let advertiser = quiet();
    let mgr = DiscoveryManager::with_default_window(advertiser.clone());
    mgr.add_zone(sample_zone("a1b2c3d4e5f6a7b8")).await.unwrap();
    assert_eq!(mgr.state().await, DiscoveryState::Operational);
    assert_eq!(advertiser.operational_zones(), vec!["a1b2c3d4e5f6a7b8".to_string()]);
    mgr.remove_zone("a1b2c3d4e5f6a7b8").await.unwrap();
    assert_eq!(mgr.state().await, DiscoveryState::Uncommissioned);
    assert!(advertiser.operational_zones().is_empty());
  }

  #[tokio::test]
  async fn test_add_zone_rejects_empty_ids() {
    let mgr = DiscoveryManager::with_default_window(quiet());
    let err = mgr
      .add_zone(OperationalInfo {
        zone_id: String::new(),
        device_id: "f9e8d7c6b5a49382".into(),
        vendor_product: None,
        firmware: None,
        feature_map: None,
        endpoint_count: None,
      })
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      MashError::MissingRequired(MashMissingRequiredError::EmptyZoneId)
    ));
  }

  #[tokio::test]
  async fn test_pairing_request_lifecycle() {
    let advertiser = quiet();
    let mgr = DiscoveryManager::with_default_window(advertiser.clone());
    for disc in [1u16, 2, 3] {
      mgr
        .announce_pairing_request(PairingRequestInfo {
          discriminator: disc,
          zone_id: "a1b2c3d4e5f6a7b8".into(),
          zone_name: None,
          host: "c.local".into(),
        })
        .await
        .unwrap();
    }
    assert_eq!(mgr.active_pairing_requests().await.len(), 3);
    assert_eq!(advertiser.pairing_discriminators().len(), 3);

    mgr.stop_pairing_request(2).await.unwrap();
    assert_eq!(mgr.active_pairing_requests().await.len(), 2);
    assert_eq!(advertiser.pairing_discriminators().len(), 2);

    mgr
      .announce_pairing_request(PairingRequestInfo {
        discriminator: 2,
        zone_id: "a1b2c3d4e5f6a7b8".into(),
        zone_name: None,
        host: "c.local".into(),
      })
      .await
      .unwrap();
    assert_eq!(mgr.active_pairing_requests().await.len(), 3);

    let err = mgr
      .announce_pairing_request(PairingRequestInfo {
        discriminator: 1,
        zone_id: "a1b2c3d4e5f6a7b8".into(),
        zone_name: None,
        host: "c.local".into(),
      })
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      MashError::AlreadyExists(MashAlreadyExistsError::PairingRequestAlreadyActive(1))
    ));
  }
}
