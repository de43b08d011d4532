// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! MASH: Minimal Application-layer Smart Home.
//!
//! This crate is a thin facade over the workspace: `mash_core` (version
//! negotiation, the capability model, the error taxonomy), `mash_spec`
//! (the bundled feature manifest and device validation), `mash_usecase`
//! (use-case registry and scenario matching), and `mash_discovery` (mDNS
//! advertisement, browsing, QR/TXT codecs, and the commissioning state
//! machine). Depend on this crate when you want the whole stack under one
//! name; depend on the individual crates when you only need one layer.

pub use mash_core as core;
pub use mash_discovery as discovery;
pub use mash_spec as spec;
pub use mash_usecase as usecase;

pub mod prelude {
  //! The types most call sites reach for, re-exported without the
  //! per-crate module path.
  pub use mash_core::capability::{
    Attribute, AttributeAccess, AttributeMeta, Device, Endpoint, EndpointType, Feature, FeatureMap,
    FeatureType,
  };
  pub use mash_core::errors::{MashError, MashResult};
  pub use mash_core::version::Version;
  pub use mash_discovery::{
    Advertiser, Browser, CommissionableInfo, DiscoveryManager, DiscoveryState, OperationalInfo,
  };
  pub use mash_spec::{load_spec, validate_device, SpecManifest, ValidationResult};
  pub use mash_usecase::{
    discover_use_cases, evaluate_controller, evaluate_device, load_registry, match_device,
    DeviceMatchOutcome, DeviceReader, DeviceUseCases,
  };
}
