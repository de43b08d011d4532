// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Browsing for advertised services (spec.md §4.3.3). [`Browser`] exposes
//! one unified added/removed event stream per entity kind, built on top of
//! [`crate::aggregate::Aggregator`] so a device visible on several network
//! interfaces is reported once.

use crate::advertiser::{
  SERVICE_COMMISSIONABLE, SERVICE_COMMISSIONER, SERVICE_OPERATIONAL, SERVICE_PAIRING_REQUEST,
};
use crate::aggregate::{AggregateEvent, Aggregator};
use crate::entities::{CommissionableInfo, CommissionerInfo, OperationalInfo, PairingRequestInfo};
use crate::txt::{decode_commissionable, decode_commissioner, decode_operational, decode_pairing_request, TxtRecord};
use async_trait::async_trait;
use mash_core::errors::{MashError, MashNotFoundError, MashTimeoutError};
use mdns_sd::{ServiceDaemon, ServiceEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Debug, Clone)]
pub enum BrowseEvent<T> {
  Added { instance: String, info: T },
  Removed { instance: String },
}

/// A live subscription to one entity kind's browse stream.
pub struct BrowseHandle<T> {
  receiver: mpsc::UnboundedReceiver<BrowseEvent<T>>,
}

impl<T> BrowseHandle<T> {
  pub async fn recv(&mut self) -> Option<BrowseEvent<T>> {
    self.receiver.recv().await
  }
}

/// Every long-running browse or find accepts a [`CancellationToken`]
/// (spec.md §5: "explicit cancellation tokens threaded through every
/// long-running operation"). Cancelling it closes the browse channels and
/// releases the background listener task; `find_by_discriminator` and
/// `find_all_by_discriminator` additionally bound themselves with
/// `deadline`, returning `DeadlineExceeded` if it elapses first.
#[async_trait]
pub trait Browser: Send + Sync {
  async fn browse_commissionable(
    &self,
    cancel: CancellationToken,
  ) -> Result<BrowseHandle<CommissionableInfo>, MashError>;
  async fn browse_operational(
    &self,
    cancel: CancellationToken,
  ) -> Result<BrowseHandle<OperationalInfo>, MashError>;
  async fn browse_commissioners(
    &self,
    cancel: CancellationToken,
  ) -> Result<BrowseHandle<CommissionerInfo>, MashError>;
  async fn browse_pairing_requests(
    &self,
    cancel: CancellationToken,
  ) -> Result<BrowseHandle<PairingRequestInfo>, MashError>;
  async fn find_by_discriminator(
    &self,
    discriminator: u16,
    deadline: Duration,
    cancel: CancellationToken,
  ) -> Result<CommissionableInfo, MashError>;
  async fn find_all_by_discriminator(
    &self,
    discriminator: u16,
    deadline: Duration,
    cancel: CancellationToken,
  ) -> Result<Vec<CommissionableInfo>, MashError>;
}

pub struct MdnsBrowser {
  daemon: ServiceDaemon,
}

impl MdnsBrowser {
  pub fn new() -> Result<Self, MashError> {
    let daemon = ServiceDaemon::new().map_err(|err| {
      MashError::NotFound(MashNotFoundError::AdvertisementNotFound(format!(
        "failed to start mDNS daemon: {err}"
      )))
    })?;
    Ok(Self { daemon })
  }

  fn spawn_aggregated_stream<T, F>(
    &self,
    service_type: &str,
    cancel: CancellationToken,
    decode: F,
  ) -> Result<BrowseHandle<T>, MashError>
  where
    T: Send + 'static,
    F: Fn(&TxtRecord) -> Result<T, MashError> + Send + 'static,
  {
    let mdns_receiver = self
      .daemon
      .browse(service_type)
      .map_err(|err| MashError::NotFound(MashNotFoundError::AdvertisementNotFound(err.to_string())))?;
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
      let mut aggregator = Aggregator::new();
      loop {
        let event = tokio::select! {
          _ = cancel.cancelled() => return,
          event = mdns_receiver.recv_async() => match event {
            Ok(event) => event,
            Err(_) => return,
          },
        };
        match event {
          ServiceEvent::ServiceResolved(info) => {
            let instance = info.get_fullname().to_owned();
            let txt: TxtRecord = info
              .get_properties()
              .iter()
              .map(|p| (p.key().to_owned(), p.val_str().to_owned()))
              .collect();
            for addr in info.get_addresses() {
              if aggregator.note_resolved(&instance, &addr.to_string()) == Some(AggregateEvent::Added) {
                match decode(&txt) {
                  Ok(decoded) => {
                    if tx
                      .send(BrowseEvent::Added {
                        instance: instance.clone(),
                        info: decoded,
                      })
                      .is_err()
                    {
                      return;
                    }
                  }
                  Err(err) => warn!(%instance, %err, "dropping malformed TXT record"),
                }
              }
            }
          }
          ServiceEvent::ServiceRemoved(_ty, fullname) => {
            for addr in aggregator.addresses_for(&fullname) {
              if aggregator.note_removed(&fullname, &addr) == Some(AggregateEvent::Removed)
                && tx
                  .send(BrowseEvent::Removed {
                    instance: fullname.clone(),
                  })
                  .is_err()
              {
                return;
              }
            }
          }
          _ => {}
        }
      }
    });

    Ok(BrowseHandle { receiver: rx })
  }
}

#[async_trait]
impl Browser for MdnsBrowser {
  async fn browse_commissionable(
    &self,
    cancel: CancellationToken,
  ) -> Result<BrowseHandle<CommissionableInfo>, MashError> {
    self.spawn_aggregated_stream(SERVICE_COMMISSIONABLE, cancel, |txt| decode_commissionable(txt, 0, ""))
  }

  async fn browse_operational(
    &self,
    cancel: CancellationToken,
  ) -> Result<BrowseHandle<OperationalInfo>, MashError> {
    self.spawn_aggregated_stream(SERVICE_OPERATIONAL, cancel, |txt| decode_operational(txt))
  }

  async fn browse_commissioners(
    &self,
    cancel: CancellationToken,
  ) -> Result<BrowseHandle<CommissionerInfo>, MashError> {
    self.spawn_aggregated_stream(SERVICE_COMMISSIONER, cancel, |txt| decode_commissioner(txt))
  }

  async fn browse_pairing_requests(
    &self,
    cancel: CancellationToken,
  ) -> Result<BrowseHandle<PairingRequestInfo>, MashError> {
    self.spawn_aggregated_stream(SERVICE_PAIRING_REQUEST, cancel, |txt| decode_pairing_request(txt, ""))
  }

  async fn find_by_discriminator(
    &self,
    discriminator: u16,
    deadline: Duration,
    cancel: CancellationToken,
  ) -> Result<CommissionableInfo, MashError> {
    let mut handle = self.browse_commissionable(cancel.clone()).await?;
    let result = tokio::time::timeout(deadline, async {
      loop {
        tokio::select! {
          _ = cancel.cancelled() => return None,
          event = handle.recv() => match event {
            Some(BrowseEvent::Added { info, .. }) if info.discriminator == discriminator => return Some(info),
            Some(_) => continue,
            None => return None,
          },
        }
      }
    })
    .await;
    match result {
      Ok(Some(info)) => Ok(info),
      Ok(None) => Err(MashNotFoundError::DiscriminatorNotFound(discriminator).into()),
      Err(_) => Err(MashTimeoutError::DeadlineExceeded.into()),
    }
  }

  async fn find_all_by_discriminator(
    &self,
    discriminator: u16,
    deadline: Duration,
    cancel: CancellationToken,
  ) -> Result<Vec<CommissionableInfo>, MashError> {
    let mut handle = self.browse_commissionable(cancel.clone()).await?;
    let mut found = Vec::new();
    let _ = tokio::time::timeout(deadline, async {
      loop {
        tokio::select! {
          _ = cancel.cancelled() => return,
          event = handle.recv() => match event {
            Some(BrowseEvent::Added { info, .. }) if info.discriminator == discriminator => found.push(info),
            Some(_) => {}
            None => return,
          },
        }
      }
    })
    .await;
    Ok(found)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::aggregate::Aggregator;

  #[test]
  fn test_aggregator_feeds_single_added_for_two_interfaces() {
    let mut aggregator = Aggregator::new();
    let instance = "dev._mashc._udp.local.";
    assert_eq!(
      aggregator.note_resolved(instance, "192.168.1.5"),
      Some(AggregateEvent::Added)
    );
    assert_eq!(aggregator.note_resolved(instance, "fe80::9"), None);
    assert_eq!(aggregator.addresses_for(instance).len(), 2);
  }
}
