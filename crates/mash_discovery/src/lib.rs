// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! mDNS-based discovery (spec.md §4.3): self-advertisement, browsing, the
//! QR code and TXT record wire formats, multi-interface aggregation, and
//! the device/controller-side commissioning state machine.

pub mod advertiser;
pub mod aggregate;
pub mod browser;
pub mod entities;
pub mod qr;
pub mod state;
pub mod txt;

pub use advertiser::{
  Advertiser, MdnsAdvertiser, QuietAdvertiser, SERVICE_COMMISSIONABLE, SERVICE_COMMISSIONER,
  SERVICE_OPERATIONAL, SERVICE_PAIRING_REQUEST,
};
pub use aggregate::{AggregateEvent, Aggregator};
pub use browser::{Browser, BrowseEvent, BrowseHandle, MdnsBrowser};
pub use entities::{CommissionableInfo, CommissionerInfo, OperationalInfo, PairingRequestInfo, QrCode};
pub use state::{DiscoveryEvent, DiscoveryManager, DiscoveryState, DEFAULT_WINDOW, MAX_WINDOW, MIN_WINDOW};
