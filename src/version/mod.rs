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

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `<major>.<minor>` VNDK / SEPolicy version.
///
/// Ordering compares the major component first, then the minor one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VndkVersion {
    pub major: u32,
    pub minor: u32,
}

impl VndkVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for VndkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl From<(u32, u32)> for VndkVersion {
    fn from((major, minor): (u32, u32)) -> Self {
        Self::new(major, minor)
    }
}

/// Parse a `"<major>[.<minor>]"` version string.
///
/// The major component is strict: it must be a non-empty run of ASCII digits.
/// The minor component is lenient: when it is missing, empty or contains
/// anything but ASCII digits the version is `<major>.0`. More than one `.`
/// is rejected.
pub fn parse_version(input: &str) -> Option<VndkVersion> {
    let parts: Vec<&str> = input.split('.').map(str::trim).collect();
    if parts.len() != 1 && parts.len() != 2 {
        return None;
    }

    let major = parse_digits(parts[0])?;
    let minor = parts.get(1).and_then(|minor| parse_digits(minor)).unwrap_or(0);

    Some(VndkVersion::new(major, minor))
}

// ASCII only, so `+1` and full-width digits are rejected
fn parse_digits(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
