// Buttplug Rust Source Code File - See https://buttplug.io for more info.
//
// Copyright 2016-2024 Nonpolynomial Labs LLC. All rights reserved.
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

mod device_list;
mod device_message_info;
mod input_cmd;
mod input_reading;
mod output_cmd;
mod request_server_info;
mod server_info;
mod spec_enums;

pub use {
  device_list::DeviceListV4,
  device_message_info::DeviceMessageInfoV4,
  input_cmd::{InputCmdV4, InputCommandType},
  input_reading::{InputData, InputTypeData, InputReadingV4},
  output_cmd::{
    OutputCmdV4,
    OutputCommand,
    OutputPositionWithDuration,
    OutputRotateWithDirection,
    OutputValue,
  },
  request_server_info::RequestServerInfoV4,
  server_info::ServerInfoV4,
  spec_enums::{ButtplugClientMessageV4, ButtplugDeviceMessageNameV4, ButtplugServerMessageV4},
};
