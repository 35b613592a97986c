// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! On-device file locations, resolved against a device root.
//!
//! The root is `/` on a live device. Pointing it at an extracted vendor/odm
//! tree lets the same lookups run against a firmware dump.

pub mod shared;
pub mod vintf;

pub use shared::{device_path, is_readable, list_readable_files};
