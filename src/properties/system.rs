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

use super::PropertySource;
#[cfg(not(target_os = "android"))]
use std::path::PathBuf;
#[cfg(not(target_os = "android"))]
use std::process::Command;

/// Properties of the running system.
///
/// On Android the property area is read directly. Elsewhere (a rooted shell
/// on a desktop Linux chroot, Termux builds without bionic access) the
/// `getprop` binary is used when one is in `PATH`.
pub struct SystemProperties {
    #[cfg(target_os = "android")]
    inner: android_system_properties::AndroidSystemProperties,
    #[cfg(not(target_os = "android"))]
    getprop: Option<PathBuf>,
}

impl SystemProperties {
    #[cfg(target_os = "android")]
    pub fn new() -> Self {
        Self {
            inner: android_system_properties::AndroidSystemProperties::new(),
        }
    }

    #[cfg(not(target_os = "android"))]
    pub fn new() -> Self {
        let getprop = which::which("getprop").ok();
        log::debug!("getprop binary: {getprop:?}");

        Self { getprop }
    }

    #[cfg(not(target_os = "android"))]
    fn get_via_command(&self, name: &str) -> Option<String> {
        let getprop = self.getprop.as_ref()?;
        match Command::new(getprop).arg(name).output() {
            Ok(output) if output.status.success() => {
                let value = String::from_utf8_lossy(&output.stdout);
                Some(value.trim_end_matches(['\r', '\n']).to_string())
            }
            Ok(output) => {
                log::warn!("getprop {name} exited with {}", output.status);
                None
            }
            Err(e) => {
                log::warn!("Failed to run {}: {e}", getprop.display());
                None
            }
        }
    }
}

/// A property read from the mapped property area. The area is always
/// present on Android, so a missing entry is an unset property.
#[cfg(any(target_os = "android", test))]
fn mapped_value(value: Option<String>) -> Option<String> {
    Some(value.unwrap_or_default())
}

impl Default for SystemProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertySource for SystemProperties {
    #[cfg(target_os = "android")]
    fn get(&self, name: &str) -> Option<String> {
        mapped_value(self.inner.get(name))
    }

    #[cfg(not(target_os = "android"))]
    fn get(&self, name: &str) -> Option<String> {
        self.get_via_command(name)
    }
}
