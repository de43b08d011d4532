// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Self-advertisement over mDNS (spec.md §4.3.1). [`Advertiser`] is the
//! seam the rest of the crate programs against; [`MdnsAdvertiser`] is the
//! `mdns-sd`-backed implementation a device or controller runs in
//! production, and [`QuietAdvertiser`] is an in-memory double for tests
//! that exercise commissioning/pairing-request flows without touching a
//! multicast socket.

use crate::entities::{CommissionableInfo, CommissionerInfo, OperationalInfo, PairingRequestInfo};
use crate::txt::{encode_commissionable, encode_commissioner, encode_operational, encode_pairing_request};
use async_trait::async_trait;
use dashmap::DashMap;
use mash_core::errors::{MashError, MashNotFoundError};
use mdns_sd::{ServiceDaemon, ServiceInfo};
use std::collections::HashMap;
use tracing::{debug, info};

pub const SERVICE_COMMISSIONABLE: &str = "_mashc._udp.local.";
pub const SERVICE_OPERATIONAL: &str = "_mash._tcp.local.";
pub const SERVICE_COMMISSIONER: &str = "_mashd._udp.local.";
pub const SERVICE_PAIRING_REQUEST: &str = "_mashp._udp.local.";

#[async_trait]
pub trait Advertiser: Send + Sync {
  async fn advertise_commissionable(&self, info: CommissionableInfo) -> Result<(), MashError>;
  async fn stop_commissionable(&self) -> Result<(), MashError>;
  async fn advertise_operational(&self, info: OperationalInfo) -> Result<(), MashError>;
  async fn update_operational(&self, info: OperationalInfo) -> Result<(), MashError>;
  async fn stop_operational(&self, zone_id: &str) -> Result<(), MashError>;
  async fn advertise_commissioner(&self, info: CommissionerInfo) -> Result<(), MashError>;
  async fn update_commissioner(&self, info: CommissionerInfo) -> Result<(), MashError>;
  async fn stop_commissioner(&self, zone_id: &str) -> Result<(), MashError>;
  async fn announce_pairing_request(&self, info: PairingRequestInfo) -> Result<(), MashError>;
  async fn stop_pairing_request(&self, discriminator: u16) -> Result<(), MashError>;
  async fn stop_all(&self) -> Result<(), MashError>;
}

fn instance_name(prefix: &str, key: &str) -> String {
  format!("{prefix}-{key}")
}

fn txt_into_properties(txt: crate::txt::TxtRecord) -> HashMap<String, String> {
  txt.into_iter().collect()
}

/// `mdns-sd`-backed [`Advertiser`]. `mdns-sd` is chosen over an
/// advertise-only backend so the same dependency also
/// drives [`crate::browser::MdnsBrowser`] — one multicast stack serves
/// both directions of discovery (documented deviation, see DESIGN.md).
pub struct MdnsAdvertiser {
  daemon: ServiceDaemon,
  registrations: DashMap<String, String>,
}

impl MdnsAdvertiser {
  pub fn new() -> Result<Self, MashError> {
    let daemon = ServiceDaemon::new().map_err(|err| {
      MashError::NotFound(MashNotFoundError::AdvertisementNotFound(format!(
        "failed to start mDNS daemon: {err}"
      )))
    })?;
    Ok(Self {
      daemon,
      registrations: DashMap::new(),
    })
  }

  fn register(
    &self,
    key: &str,
    service_type: &str,
    port: u16,
    host: &str,
    properties: HashMap<String, String>,
  ) -> Result<(), MashError> {
    let my_name = instance_name(service_type, key);
    let service = ServiceInfo::new(service_type, &my_name, host, "", port, properties)
      .map_err(|err| MashError::NotFound(MashNotFoundError::AdvertisementNotFound(err.to_string())))?
      .enable_addr_auto();
    let fullname = service.get_fullname().to_owned();
    self
      .daemon
      .register(service)
      .map_err(|err| MashError::NotFound(MashNotFoundError::AdvertisementNotFound(err.to_string())))?;
    info!(%fullname, service_type, "advertising mDNS service");
    self.registrations.insert(key.to_owned(), fullname);
    Ok(())
  }

  fn unregister(&self, key: &str) -> Result<(), MashError> {
    let Some((_, fullname)) = self.registrations.remove(key) else {
      return Err(MashNotFoundError::AdvertisementNotFound(key.to_owned()).into());
    };
    debug!(%fullname, "withdrawing mDNS service");
    self
      .daemon
      .unregister(&fullname)
      .map_err(|err| MashError::NotFound(MashNotFoundError::AdvertisementNotFound(err.to_string())))?;
    Ok(())
  }
}

#[async_trait]
impl Advertiser for MdnsAdvertiser {
  async fn advertise_commissionable(&self, info: CommissionableInfo) -> Result<(), MashError> {
    let key = "commissionable".to_owned();
    let port = info.port;
    let host = info.host.clone();
    self.register(
      &key,
      SERVICE_COMMISSIONABLE,
      port,
      &host,
      txt_into_properties(encode_commissionable(&info)),
    )
  }

  async fn stop_commissionable(&self) -> Result<(), MashError> {
    self.unregister("commissionable")
  }

  async fn advertise_operational(&self, info: OperationalInfo) -> Result<(), MashError> {
    let key = format!("operational-{}", info.zone_id);
    self.register(
      &key,
      SERVICE_OPERATIONAL,
      0,
      "",
      txt_into_properties(encode_operational(&info)),
    )
  }

  async fn update_operational(&self, info: OperationalInfo) -> Result<(), MashError> {
    self.stop_operational(&info.zone_id).await?;
    self.advertise_operational(info).await
  }

  async fn stop_operational(&self, zone_id: &str) -> Result<(), MashError> {
    self.unregister(&format!("operational-{zone_id}"))
  }

  async fn advertise_commissioner(&self, info: CommissionerInfo) -> Result<(), MashError> {
    let key = format!("commissioner-{}", info.zone_id);
    self.register(
      &key,
      SERVICE_COMMISSIONER,
      0,
      "",
      txt_into_properties(encode_commissioner(&info)),
    )
  }

  async fn update_commissioner(&self, info: CommissionerInfo) -> Result<(), MashError> {
    self.stop_commissioner(&info.zone_id).await?;
    self.advertise_commissioner(info).await
  }

  async fn stop_commissioner(&self, zone_id: &str) -> Result<(), MashError> {
    self.unregister(&format!("commissioner-{zone_id}"))
  }

  async fn announce_pairing_request(&self, info: PairingRequestInfo) -> Result<(), MashError> {
    let key = format!("pairing-{}", info.discriminator);
    let host = info.host.clone();
    self.register(
      &key,
      SERVICE_PAIRING_REQUEST,
      0,
      &host,
      txt_into_properties(encode_pairing_request(&info)),
    )
  }

  async fn stop_pairing_request(&self, discriminator: u16) -> Result<(), MashError> {
    self.unregister(&format!("pairing-{discriminator}"))
  }

  async fn stop_all(&self) -> Result<(), MashError> {
    let keys: Vec<String> = self.registrations.iter().map(|e| e.key().clone()).collect();
    for key in keys {
      self.unregister(&key)?;
    }
    Ok(())
  }
}

/// In-memory double used by `mash_discovery`'s own tests and by
/// downstream crates that need a deterministic advertiser without a real
/// multicast socket.
#[derive(Default)]
pub struct QuietAdvertiser {
  commissionable: DashMap<String, CommissionableInfo>,
  operational: DashMap<String, OperationalInfo>,
  commissioner: DashMap<String, CommissionerInfo>,
  pairing: DashMap<u16, PairingRequestInfo>,
}

impl QuietAdvertiser {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn commissionable_active(&self) -> bool {
    !self.commissionable.is_empty()
  }

  pub fn operational_zones(&self) -> Vec<String> {
    self.operational.iter().map(|e| e.key().clone()).collect()
  }

  pub fn pairing_discriminators(&self) -> Vec<u16> {
    self.pairing.iter().map(|e| *e.key()).collect()
  }
}

#[async_trait]
impl Advertiser for QuietAdvertiser {
  async fn advertise_commissionable(&self, info: CommissionableInfo) -> Result<(), MashError> {
    self.commissionable.insert("commissionable".into(), info);
    Ok(())
  }

  async fn stop_commissionable(&self) -> Result<(), MashError> {
    self
      .commissionable
      .remove("commissionable")
      .map(|_| ())
      .ok_or_else(|| MashNotFoundError::AdvertisementNotFound("commissionable".into()).into())
  }

  async fn advertise_operational(&self, info: OperationalInfo) -> Result<(), MashError> {
    self.operational.insert(info.zone_id.clone(), info);
    Ok(())
  }

  async fn update_operational(&self, info: OperationalInfo) -> Result<(), MashError> {
    self.advertise_operational(info).await
  }

  async fn stop_operational(&self, zone_id: &str) -> Result<(), MashError> {
    self
      .operational
      .remove(zone_id)
      .map(|_| ())
      .ok_or_else(|| MashNotFoundError::AdvertisementNotFound(zone_id.to_owned()).into())
  }

  async fn advertise_commissioner(&self, info: CommissionerInfo) -> Result<(), MashError> {
    self.commissioner.insert(info.zone_id.clone(), info);
    Ok(())
  }

  async fn update_commissioner(&self, info: CommissionerInfo) -> Result<(), MashError> {
    self.advertise_commissioner(info).await
  }

  async fn stop_commissioner(&self, zone_id: &str) -> Result<(), MashError> {
    self
      .commissioner
      .remove(zone_id)
      .map(|_| ())
      .ok_or_else(|| MashNotFoundError::AdvertisementNotFound(zone_id.to_owned()).into())
  }

  async fn announce_pairing_request(&self, info: PairingRequestInfo) -> Result<(), MashError> {
    if self.pairing.contains_key(&info.discriminator) {
      return Err(mash_core::errors::MashAlreadyExistsError::PairingRequestAlreadyActive(info.discriminator).into());
    }
    self.pairing.insert(info.discriminator, info);
    Ok(())
  }

  async fn stop_pairing_request(&self, discriminator: u16) -> Result<(), MashError> {
    self.pairing.remove(&discriminator);
    Ok(())
  }

  async fn stop_all(&self) -> Result<(), MashError> {
    self.commissionable.clear();
    self.operational.clear();
    self.commissioner.clear();
    self.pairing.clear();
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn sample_commissionable() -> CommissionableInfo {
    CommissionableInfo {
      discriminator: 42,
      categories: vec![1],
      serial: "SN".into(),
      brand: "Acme".into(),
      model: "X".into(),
      device_name: None,
      port: 8443,
      host: "dev.local".into(),
    }
  }

  #[tokio::test]
  async fn test_quiet_advertiser_lifecycle() {
    let adv = QuietAdvertiser::new();
    adv.advertise_commissionable(sample_commissionable()).await.unwrap();
    assert!(adv.commissionable_active());
    adv.stop_commissionable().await.unwrap();
    assert!(!adv.commissionable_active());
  }

  #[tokio::test]
  async fn test_quiet_advertiser_stop_missing_is_not_found() {
    let adv = QuietAdvertiser::new();
    let err = adv.stop_commissionable().await.unwrap_err();
    assert!(matches!(
      err,
      MashError::NotFound(MashNotFoundError::AdvertisementNotFound(_))
    ));
  }

  #[tokio::test]
  async fn test_quiet_advertiser_duplicate_pairing_request_rejected() {
    let adv = QuietAdvertiser::new();
    let info = PairingRequestInfo {
      discriminator: 7,
      zone_id: "a1b2c3d4e5f6a7b8".into(),
      zone_name: None,
      host: "c.local".into(),
    };
    adv.announce_pairing_request(info.clone()).await.unwrap();
    let err = adv.announce_pairing_request(info).await.unwrap_err();
    assert!(matches!(
      err,
      MashError::AlreadyExists(mash_core::errors::MashAlreadyExistsError::PairingRequestAlreadyActive(7))
    ));
  }
}
