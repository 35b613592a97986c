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

//! GSI image file name derivation.

use super::arch::Arch;
use super::treble::TrebleResult;

pub const UNKNOWN_TOKEN: &str = "???";

/// The name of the system image a device needs, for example
/// `system-arm64-ab.img.xz`.
///
/// Unknown parts are rendered as `???`. The `-vndklite` suffix is added for
/// VNDK-lite or legacy Treble devices unless the device is known not to be
/// system-as-root.
pub fn image_file_name(treble: Option<&TrebleResult>, arch: &Arch, sar: Option<bool>) -> String {
    let arch = arch.image_token().unwrap_or(UNKNOWN_TOKEN);
    let sar_token = match sar {
        Some(true) => "ab",
        Some(false) => "aonly",
        None => UNKNOWN_TOKEN,
    };
    let vndk_lite = sar != Some(false) && treble.is_some_and(|t| t.lite || t.legacy);

    format!(
        "system-{arch}-{sar_token}{}.img.xz",
        if vndk_lite { "-vndklite" } else { "" }
    )
}
