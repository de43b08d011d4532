// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Core types shared by every MASH crate: protocol version negotiation,
//! the error taxonomy, and the capability model (features, attributes,
//! commands, endpoints, devices).
//!
//! This crate has no knowledge of YAML manifests, use-case scenarios, or
//! discovery — those live in `mash_spec`, `mash_usecase`, and
//! `mash_discovery` respectively, each depending on this crate for their
//! shared vocabulary.

#[macro_use]
extern crate strum_macros;

pub mod capability;
pub mod errors;
pub mod util;
pub mod version;

pub use capability::*;
pub use errors::{MashError, MashResult};
pub use version::Version;
