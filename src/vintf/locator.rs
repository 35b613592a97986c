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

use crate::paths::{is_readable, list_readable_files, vintf};
use std::path::{Path, PathBuf};

/// Device manifest files in VINTF lookup order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestSet {
    pub files: Vec<PathBuf>,
    /// The legacy `/vendor/manifest.xml` was found in addition to at least
    /// one manifest from the current locations.
    pub legacy: bool,
}

/// Locate the vendor, ODM and legacy manifests.
///
/// For each of vendor and ODM the first existing candidate is used; if that
/// candidate exists but is unreadable the partition contributes nothing.
/// Fragment directories are only consulted when the partition's main
/// manifest was found.
pub fn locate_manifests(
    root: &Path,
    vendor_sku: Option<&str>,
    odm_sku: Option<&str>,
) -> ManifestSet {
    let vendor_sku = vendor_sku.filter(|sku| !sku.is_empty());
    let odm_sku = odm_sku.filter(|sku| !sku.is_empty());
    let mut files = Vec::new();

    let vendor_candidates = vendor_sku
        .map(|sku| vintf::vendor_sku_manifest(root, sku))
        .into_iter()
        .chain([vintf::vendor_manifest(root)]);
    if let Some(manifest) = first_present(vendor_candidates) {
        files.push(manifest);
        if let Some(fragments) = list_readable_files(&vintf::vendor_manifest_fragments(root)) {
            files.extend(fragments);
        }
    }

    let odm_candidates = odm_sku
        .map(|sku| vintf::odm_sku_manifest(root, sku))
        .into_iter()
        .chain([vintf::odm_manifest(root)])
        .chain(odm_sku.map(|sku| vintf::odm_legacy_sku_manifest(root, sku)))
        .chain([vintf::odm_legacy_manifest(root)]);
    if let Some(manifest) = first_present(odm_candidates) {
        files.push(manifest);
        if let Some(fragments) = list_readable_files(&vintf::odm_manifest_fragments(root)) {
            files.extend(fragments);
        }
    }

    let mut legacy = false;
    let legacy_manifest = vintf::legacy_vendor_manifest(root);
    if is_readable(&legacy_manifest) {
        legacy = !files.is_empty();
        files.push(legacy_manifest);
    }

    log::debug!("Manifests: {files:?}, legacy: {legacy}");
    ManifestSet { files, legacy }
}

/// The vendor compatibility matrix, if present and readable.
pub fn locate_compatibility_matrix(root: &Path) -> Option<PathBuf> {
    let matrix = vintf::vendor_compatibility_matrix(root);
    is_readable(&matrix).then_some(matrix)
}

fn first_present(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    for candidate in candidates {
        if candidate.exists() {
            return is_readable(&candidate).then_some(candidate);
        }
    }
    None
}
