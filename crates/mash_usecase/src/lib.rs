// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The use-case engine (spec.md §4.2): a registry of use-case definitions
//! loaded from the bundled YAML (via `mash_spec`), a pure scenario-matching
//! algorithm, and the `DeviceProfile`/`EndpointProfile`/`FeatureProfile`
//! types the matcher evaluates — built either from a locally owned
//! `Device` or by remote probing through the `DeviceReader` collaborator.

pub mod device_reader;
pub mod device_usecases;
pub mod eval;
pub mod matcher;
pub mod profile;
pub mod registry;
pub mod scenario;

pub use device_reader::DeviceReader;
pub use device_usecases::{device_usecases_from_decls, match_all_usecases, DeviceUseCases};
pub use eval::{discover_use_cases, evaluate_controller, evaluate_device};
pub use matcher::{match_all, match_device, DeviceMatchOutcome};
pub use profile::{profile_from_device, DeviceProfile, EndpointProfile, FeatureProfile};
pub use registry::{load_registry, parse_usecase, FeatureRequirement, ScenarioDef, UseCaseDef};
pub use scenario::{ScenarioBitmap, BASE_BIT};
