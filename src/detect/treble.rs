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

use crate::error::{Result, TrebleError};
use crate::paths::vintf;
use crate::properties::{
    HARDWARE_SKU, PropertySource, TREBLE_ENABLED, VENDOR_SKU, VNDK_LITE, VNDK_VERSION,
};
use crate::version::{VndkVersion, parse_version};
use crate::vintf::{
    locate_compatibility_matrix, locate_manifests, scan_manifest, scan_matrix, scan_selinux,
};
use serde::Serialize;
use std::path::Path;

/// Project Treble support and the vendor's VNDK version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrebleResult {
    pub legacy: bool,
    pub lite: bool,
    pub vndk_version: u32,
    pub vndk_sub_version: u32,
}

impl TrebleResult {
    pub fn new(legacy: bool, lite: bool, version: VndkVersion) -> Self {
        Self {
            legacy,
            lite,
            vndk_version: version.major,
            vndk_sub_version: version.minor,
        }
    }

    pub fn version(&self) -> VndkVersion {
        VndkVersion::new(self.vndk_version, self.vndk_sub_version)
    }
}

pub struct TrebleDetector<'a> {
    properties: &'a dyn PropertySource,
    root: &'a Path,
}

impl<'a> TrebleDetector<'a> {
    pub fn new(properties: &'a dyn PropertySource, root: &'a Path) -> Self {
        Self { properties, root }
    }

    /// Detect Treble support.
    ///
    /// `Ok(None)` means the device does not support Treble. Once Treble is
    /// enabled the VNDK version is taken from the first source that yields
    /// one: the vendor compatibility matrix, the SELinux policy, the device
    /// manifests in lookup order, and finally `ro.vndk.version`.
    pub fn detect(&self) -> Result<Option<TrebleResult>> {
        let enabled = self.properties.get(TREBLE_ENABLED);
        log::debug!("{TREBLE_ENABLED}: {enabled:?}");
        if enabled.as_deref() != Some("true") {
            return Ok(None);
        }

        let lite = self
            .properties
            .get(VNDK_LITE)
            .ok_or_else(|| TrebleError::PropertyUnavailable(VNDK_LITE.to_string()))?;
        log::debug!("{VNDK_LITE}: {lite:?}");
        let lite = lite == "true";

        let vendor_sku = self.properties.get(VENDOR_SKU);
        let odm_sku = self.properties.get(HARDWARE_SKU);
        let manifests = locate_manifests(self.root, vendor_sku.as_deref(), odm_sku.as_deref());
        let legacy = manifests.legacy;
        let result = |version: VndkVersion| Some(TrebleResult::new(legacy, lite, version));

        if let Some(matrix) = locate_compatibility_matrix(self.root) {
            match scan_matrix(&matrix) {
                Ok(Some(version)) => {
                    log::debug!("Vendor matrix {}: {version}", matrix.display());
                    return Ok(result(version));
                }
                Ok(None) => log::trace!("Vendor matrix {}: no version", matrix.display()),
                Err(e) => log::debug!("Skipping vendor matrix: {e}"),
            }
        }

        match scan_selinux(self.root) {
            Ok(Some(version)) => {
                log::debug!("SELinux policy: {version}");
                return Ok(result(version));
            }
            Ok(None) => log::trace!("SELinux policy: no version"),
            Err(e) => log::debug!("Skipping SELinux policy: {e}"),
        }

        for manifest in &manifests.files {
            match scan_manifest(manifest) {
                Ok(Some(version)) => {
                    log::debug!("Manifest {}: {version}", manifest.display());
                    return Ok(result(version));
                }
                Ok(None) => log::trace!("Manifest {}: no version", manifest.display()),
                Err(e) => log::debug!("Skipping manifest: {e}"),
            }
        }

        let property = self.properties.get(VNDK_VERSION);
        log::debug!("{VNDK_VERSION}: {property:?}");
        if let Some(version) = property.as_deref().and_then(parse_version) {
            return Ok(result(version));
        }

        let mut searched_paths = vec![
            vintf::vendor_compatibility_matrix(self.root)
                .display()
                .to_string(),
            vintf::vendor_selinux_dir(self.root).display().to_string(),
        ];
        searched_paths.extend(manifests.files.iter().map(|p| p.display().to_string()));
        searched_paths.push(VNDK_VERSION.to_string());

        Err(TrebleError::NoVersionSource { searched_paths })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::device_path;
    use crate::properties::PropertyMap;
    use mockall::mock;
    use mockall::predicate::eq;
    use std::fs;
    use tempfile::TempDir;

    mock! {
        Props {}
        impl PropertySource for Props {
            fn get(&self, name: &str) -> Option<String>;
        }
    }

    const MATRIX: &str = "<compatibility-matrix><vendor-ndk>\
                          <version>29</version><version>30</version>\
                          </vendor-ndk></compatibility-matrix>";
    const MANIFEST: &str = "<manifest><sepolicy><version>28.0</version></sepolicy></manifest>";

    fn write(root: &Path, absolute: &str, contents: &str) {
        let path = device_path(root, absolute);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn treble_props(lite: &str) -> PropertyMap {
        PropertyMap::new()
            .with(TREBLE_ENABLED, "true")
            .with(VNDK_LITE, lite)
    }

    #[test]
    fn test_treble_disabled() {
        let temp_dir = TempDir::new().unwrap();

        for value in ["", "false", "1"] {
            let props = PropertyMap::new().with(TREBLE_ENABLED, value);
            let detector = TrebleDetector::new(&props, temp_dir.path());
            assert_eq!(detector.detect().unwrap(), None);
        }
    }

    #[test]
    fn test_treble_disabled_reads_nothing_else() {
        let temp_dir = TempDir::new().unwrap();
        let mut props = MockProps::new();
        props
            .expect_get()
            .with(eq(TREBLE_ENABLED))
            .times(1)
            .return_const(None);

        let detector = TrebleDetector::new(&props, temp_dir.path());
        assert_eq!(detector.detect().unwrap(), None);
    }

    #[test]
    fn test_missing_lite_property_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut props = MockProps::new();
        props
            .expect_get()
            .with(eq(TREBLE_ENABLED))
            .return_const(Some("true".to_string()));
        props.expect_get().with(eq(VNDK_LITE)).return_const(None);

        let detector = TrebleDetector::new(&props, temp_dir.path());
        assert!(matches!(
            detector.detect(),
            Err(TrebleError::PropertyUnavailable(name)) if name == VNDK_LITE
        ));
    }

    #[test]
    fn test_no_version_source_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let props = treble_props("false");

        let detector = TrebleDetector::new(&props, temp_dir.path());
        match detector.detect() {
            Err(TrebleError::NoVersionSource { searched_paths }) => {
                assert!(searched_paths.contains(&VNDK_VERSION.to_string()));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_matrix_has_priority() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "/vendor/etc/vintf/compatibility_matrix.xml", MATRIX);
        write(root, "/vendor/etc/selinux/plat_sepolicy_vers.txt", "29.0\n");
        write(root, "/vendor/etc/vintf/manifest.xml", MANIFEST);
        let props = treble_props("false").with(VNDK_VERSION, "27");

        let detector = TrebleDetector::new(&props, root);
        assert_eq!(
            detector.detect().unwrap(),
            Some(TrebleResult::new(false, false, VndkVersion::new(30, 0)))
        );
    }

    #[test]
    fn test_selinux_before_manifests() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(
            root,
            "/vendor/etc/vintf/compatibility_matrix.xml",
            "<compatibility-matrix/>",
        );
        write(
            root,
            "/vendor/etc/selinux/vendor_sepolicy.cil",
            "(x init_29_0 y)\n",
        );
        write(root, "/vendor/etc/vintf/manifest.xml", MANIFEST);
        let props = treble_props("true");

        let detector = TrebleDetector::new(&props, root);
        assert_eq!(
            detector.detect().unwrap(),
            Some(TrebleResult::new(false, true, VndkVersion::new(29, 0)))
        );
    }

    #[test]
    fn test_first_manifest_with_version_wins() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(
            root,
            "/vendor/etc/vintf/manifest.xml",
            "<manifest><hal/></manifest>",
        );
        write(root, "/odm/etc/vintf/manifest.xml", MANIFEST);
        write(
            root,
            "/vendor/manifest.xml",
            "<manifest><sepolicy><version>26.0</version></sepolicy></manifest>",
        );
        let props = treble_props("false");

        let detector = TrebleDetector::new(&props, root);
        assert_eq!(
            detector.detect().unwrap(),
            Some(TrebleResult::new(true, false, VndkVersion::new(28, 0)))
        );
    }

    #[test]
    fn test_legacy_manifest_alone() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "/vendor/manifest.xml", MANIFEST);
        let props = treble_props("false");

        let detector = TrebleDetector::new(&props, root);
        assert_eq!(
            detector.detect().unwrap(),
            Some(TrebleResult::new(false, false, VndkVersion::new(28, 0)))
        );
    }

    #[test]
    fn test_vndk_version_property_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let props = treble_props("true").with(VNDK_VERSION, "30");

        let detector = TrebleDetector::new(&props, temp_dir.path());
        assert_eq!(
            detector.detect().unwrap(),
            Some(TrebleResult::new(false, true, VndkVersion::new(30, 0)))
        );
    }

    #[test]
    fn test_unparsable_vndk_version_property() {
        let temp_dir = TempDir::new().unwrap();
        let props = treble_props("false").with(VNDK_VERSION, "current");

        let detector = TrebleDetector::new(&props, temp_dir.path());
        assert!(matches!(
            detector.detect(),
            Err(TrebleError::NoVersionSource { .. })
        ));
    }

    #[test]
    fn test_malformed_matrix_falls_through() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(
            root,
            "/vendor/etc/vintf/compatibility_matrix.xml",
            "<compatibility-matrix><vendor-ndk><version>30</vendor-ndk>",
        );
        let props = treble_props("false").with(VNDK_VERSION, "30");

        let detector = TrebleDetector::new(&props, root);
        assert_eq!(
            detector.detect().unwrap(),
            Some(TrebleResult::new(false, false, VndkVersion::new(30, 0)))
        );
    }

    #[test]
    fn test_unreadable_selinux_version_falls_through() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        // a directory in place of the version file fails on read
        let version_file = device_path(root, "/vendor/etc/selinux/plat_sepolicy_vers.txt");
        fs::create_dir_all(version_file).unwrap();
        write(root, "/vendor/etc/vintf/manifest.xml", MANIFEST);
        let props = treble_props("false");

        let detector = TrebleDetector::new(&props, root);
        assert_eq!(
            detector.detect().unwrap(),
            Some(TrebleResult::new(false, false, VndkVersion::new(28, 0)))
        );
    }

    #[test]
    fn test_sku_manifest_is_used() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(
            root,
            "/vendor/etc/vintf/manifest_global.xml",
            "<manifest><sepolicy><version>31.0</version></sepolicy></manifest>",
        );
        write(root, "/vendor/etc/vintf/manifest.xml", MANIFEST);
        let props = treble_props("false").with(VENDOR_SKU, "global");

        let detector = TrebleDetector::new(&props, root);
        assert_eq!(
            detector.detect().unwrap().map(|result| result.version()),
            Some(VndkVersion::new(31, 0))
        );
    }
}
