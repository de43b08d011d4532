// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Small helpers shared across crates: hex ID handling and the initialism
//! convention for mapping wire names to exported identifiers (spec.md §4.4).

pub mod hex_id;
pub mod initialism;
