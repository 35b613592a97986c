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

//! Vendor interface (VINTF) metadata: manifests, compatibility matrices and
//! the SELinux policy files that carry the vendor's platform version.

pub mod locator;
pub mod selinux;
pub mod xml;

pub use locator::{ManifestSet, locate_compatibility_matrix, locate_manifests};
pub use selinux::scan_selinux;
pub use xml::{scan_manifest, scan_matrix};
