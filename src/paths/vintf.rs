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

use super::device_path;
use std::path::{Path, PathBuf};

pub const VENDOR_VINTF_DIR: &str = "/vendor/etc/vintf";
pub const VENDOR_MANIFEST_FRAGMENTS_DIR: &str = "/vendor/etc/manifest";
pub const LEGACY_VENDOR_MANIFEST: &str = "/vendor/manifest.xml";
pub const ODM_VINTF_DIR: &str = "/odm/etc/vintf";
pub const ODM_ETC_DIR: &str = "/odm/etc";
pub const ODM_MANIFEST_FRAGMENTS_DIR: &str = "/odm/etc/manifest";
pub const VENDOR_COMPATIBILITY_MATRIX: &str = "/vendor/etc/vintf/compatibility_matrix.xml";
pub const VENDOR_SELINUX_DIR: &str = "/vendor/etc/selinux";
pub const PLAT_SEPOLICY_VERSION_FILE: &str = "/vendor/etc/selinux/plat_sepolicy_vers.txt";

pub const MANIFEST_FILE: &str = "manifest.xml";

pub fn vendor_manifest(root: &Path) -> PathBuf {
    device_path(root, VENDOR_VINTF_DIR).join(MANIFEST_FILE)
}

pub fn vendor_sku_manifest(root: &Path, sku: &str) -> PathBuf {
    device_path(root, VENDOR_VINTF_DIR).join(format!("manifest_{sku}.xml"))
}

pub fn vendor_manifest_fragments(root: &Path) -> PathBuf {
    device_path(root, VENDOR_MANIFEST_FRAGMENTS_DIR)
}

pub fn odm_manifest(root: &Path) -> PathBuf {
    device_path(root, ODM_VINTF_DIR).join(MANIFEST_FILE)
}

pub fn odm_sku_manifest(root: &Path, sku: &str) -> PathBuf {
    device_path(root, ODM_VINTF_DIR).join(format!("manifest_{sku}.xml"))
}

pub fn odm_legacy_sku_manifest(root: &Path, sku: &str) -> PathBuf {
    device_path(root, ODM_ETC_DIR).join(format!("{sku}.xml"))
}

pub fn odm_legacy_manifest(root: &Path) -> PathBuf {
    device_path(root, ODM_ETC_DIR).join(MANIFEST_FILE)
}

pub fn odm_manifest_fragments(root: &Path) -> PathBuf {
    device_path(root, ODM_MANIFEST_FRAGMENTS_DIR)
}

pub fn legacy_vendor_manifest(root: &Path) -> PathBuf {
    device_path(root, LEGACY_VENDOR_MANIFEST)
}

pub fn vendor_compatibility_matrix(root: &Path) -> PathBuf {
    device_path(root, VENDOR_COMPATIBILITY_MATRIX)
}

pub fn vendor_selinux_dir(root: &Path) -> PathBuf {
    device_path(root, VENDOR_SELINUX_DIR)
}

pub fn plat_sepolicy_version_file(root: &Path) -> PathBuf {
    device_path(root, PLAT_SEPOLICY_VERSION_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vintf_paths_follow_device_layout() {
        let root = Path::new("/");

        assert_eq!(
            vendor_sku_manifest(root, "sku1"),
            PathBuf::from("/vendor/etc/vintf/manifest_sku1.xml")
        );
        assert_eq!(
            vendor_manifest(root),
            PathBuf::from("/vendor/etc/vintf/manifest.xml")
        );
        assert_eq!(
            odm_legacy_sku_manifest(root, "sku1"),
            PathBuf::from("/odm/etc/sku1.xml")
        );
        assert_eq!(odm_legacy_manifest(root), PathBuf::from("/odm/etc/manifest.xml"));
        assert_eq!(
            legacy_vendor_manifest(root),
            PathBuf::from("/vendor/manifest.xml")
        );
        assert_eq!(
            plat_sepolicy_version_file(root),
            PathBuf::from("/vendor/etc/selinux/plat_sepolicy_vers.txt")
        );
    }

    #[test]
    fn vintf_paths_respect_custom_root() {
        let root = Path::new("/tmp/device");

        assert_eq!(
            odm_sku_manifest(root, "hw"),
            PathBuf::from("/tmp/device/odm/etc/vintf/manifest_hw.xml")
        );
        assert_eq!(
            vendor_compatibility_matrix(root),
            PathBuf::from("/tmp/device/vendor/etc/vintf/compatibility_matrix.xml")
        );
        assert_eq!(
            vendor_manifest_fragments(root),
            PathBuf::from("/tmp/device/vendor/etc/manifest")
        );
        assert_eq!(
            odm_manifest_fragments(root),
            PathBuf::from("/tmp/device/odm/etc/manifest")
        );
        assert_eq!(
            vendor_selinux_dir(root),
            PathBuf::from("/tmp/device/vendor/etc/selinux")
        );
    }
}
