// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The capability model: features, attributes, commands, endpoints, and
//! devices (spec.md §3), plus the small dynamic-value and command-handler
//! utilities that let every feature expose typed accessors over a
//! schema-driven storage layer (spec.md §4.4).

pub mod command;
pub mod feature;
pub mod value;
pub mod wire;

pub use command::{CommandArgs, CommandContext, CommandHandler, CommandMeta, CommandResponse, SimpleResponse};
pub use feature::{
  meta_attribute, Attribute, AttributeAccess, AttributeMeta, Device, Endpoint, EndpointType,
  Feature, FeatureMap, FeatureType, DEVICE_ROOT_ENDPOINT_ID,
};
pub use value::{AttributeDataType, AttributeValue, NullableAttribute, ValueRange};
pub use wire::UseCaseDecl;
