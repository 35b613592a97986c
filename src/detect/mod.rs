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

//! Device detection.
//!
//! Each detector reads its inputs through a narrow trait ([`PropertySource`],
//! [`MountSource`], [`BinderVersionSource`]) so tests supply fakes directly.
//! [`DeviceDetector`] runs all of them and keeps every outcome separately;
//! one detector failing never hides the results of the others.

pub mod arch;
pub mod binder;
pub mod filename;
pub mod mounts;
pub mod partitions;
pub mod treble;

pub use arch::{Arch, ArchDetector, BinderArch, CpuArch};
pub use binder::{BinderVersionSource, KernelBinder};
pub use filename::image_file_name;
pub use mounts::{Mount, MountSource, ProcMounts, SarDetector};
pub use partitions::VabResult;
pub use treble::{TrebleDetector, TrebleResult};

use crate::config::TrebleConfig;
use crate::error::Result;
use crate::properties::{PropertyFile, PropertySource, SystemProperties};
use std::path::{Path, PathBuf};

/// Results of one detection pass.
#[derive(Debug)]
pub struct Detection {
    pub treble: Result<Option<TrebleResult>>,
    pub ab: Option<bool>,
    pub dynamic_partitions: Option<bool>,
    pub virtual_ab: Result<Option<VabResult>>,
    pub sar: Result<bool>,
    pub cpu: CpuArch,
    pub binder: BinderArch,
    pub arch: Arch,
}

impl Detection {
    /// Image file name from whatever could be detected; failed detectors
    /// count as unknown.
    pub fn file_name(&self) -> String {
        let treble = self.treble.as_ref().ok().and_then(Option::as_ref);
        let sar = self.sar.as_ref().ok().copied();
        image_file_name(treble, &self.arch, sar)
    }
}

pub struct DeviceDetector<'a> {
    properties: &'a dyn PropertySource,
    mounts: &'a dyn MountSource,
    binder: &'a dyn BinderVersionSource,
    root: &'a Path,
}

impl<'a> DeviceDetector<'a> {
    pub fn new(
        properties: &'a dyn PropertySource,
        mounts: &'a dyn MountSource,
        binder: &'a dyn BinderVersionSource,
        root: &'a Path,
    ) -> Self {
        Self {
            properties,
            mounts,
            binder,
            root,
        }
    }

    pub fn treble(&self) -> Result<Option<TrebleResult>> {
        TrebleDetector::new(self.properties, self.root).detect()
    }

    pub fn sar(&self) -> Result<bool> {
        SarDetector::new(self.properties, self.mounts).detect()
    }

    pub fn ab(&self) -> Option<bool> {
        partitions::detect_ab(self.properties)
    }

    pub fn dynamic_partitions(&self) -> Option<bool> {
        partitions::detect_dynamic_partitions(self.properties)
    }

    pub fn virtual_ab(&self) -> Result<Option<VabResult>> {
        partitions::detect_virtual_ab(self.properties)
    }

    pub fn arch_detector(&self) -> ArchDetector<'a> {
        ArchDetector::new(self.properties, self.binder)
    }

    pub fn mounts(&self) -> Result<Vec<Mount>> {
        self.mounts.mounts()
    }

    pub fn detect(&self) -> Detection {
        let arch_detector = self.arch_detector();
        let cpu = arch_detector.cpu_arch();
        let binder = arch_detector.binder_arch();
        let arch = Arch::new(&cpu, binder);

        let detection = Detection {
            treble: self.treble(),
            ab: self.ab(),
            dynamic_partitions: self.dynamic_partitions(),
            virtual_ab: self.virtual_ab(),
            sar: self.sar(),
            cpu,
            binder,
            arch,
        };
        log::debug!("Detection: {detection:?}");
        detection
    }
}

/// The running device, or an extracted image, as described by the
/// configuration.
pub struct Device {
    properties: Box<dyn PropertySource>,
    mounts: ProcMounts,
    binder: KernelBinder,
    root: PathBuf,
}

impl Device {
    pub fn from_config(config: &TrebleConfig) -> Result<Self> {
        let properties: Box<dyn PropertySource> = match &config.properties_file {
            Some(path) => {
                log::info!("Reading properties from {}", path.display());
                Box::new(PropertyFile::load(path)?)
            }
            None => Box::new(SystemProperties::new()),
        };

        Ok(Self {
            properties,
            mounts: ProcMounts::new(&config.device.mounts_path),
            binder: KernelBinder::new(&config.device.binder_path),
            root: config.root.clone(),
        })
    }

    pub fn detector(&self) -> DeviceDetector<'_> {
        DeviceDetector::new(
            self.properties.as_ref(),
            &self.mounts,
            &self.binder,
            &self.root,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrebleError;
    use crate::properties::{
        CPU_ABI_LIST, PropertyMap, SLOT_SUFFIX, TREBLE_ENABLED, VNDK_LITE, VNDK_VERSION,
    };
    use mockall::mock;
    use std::fs;
    use tempfile::TempDir;

    mock! {
        Mounts {}
        impl MountSource for Mounts {
            fn read_mounts(&self) -> Result<String>;
        }
    }

    mock! {
        Binder {}
        impl BinderVersionSource for Binder {
            fn binder_version(&self) -> Option<i32>;
        }
    }

    fn binder(version: Option<i32>) -> MockBinder {
        let mut binder = MockBinder::new();
        binder.expect_binder_version().return_const(version);
        binder
    }

    fn mounts(contents: &'static str) -> MockMounts {
        let mut mounts = MockMounts::new();
        mounts
            .expect_read_mounts()
            .returning(move || Ok(contents.to_string()));
        mounts
    }

    #[test]
    fn test_full_detection() {
        let temp_dir = TempDir::new().unwrap();
        let props = PropertyMap::new()
            .with(TREBLE_ENABLED, "true")
            .with(VNDK_LITE, "false")
            .with(VNDK_VERSION, "30")
            .with(SLOT_SUFFIX, "_b")
            .with(CPU_ABI_LIST, "arm64-v8a,armeabi-v7a");
        let mounts = mounts("/dev/root / ext4 ro 0 0\n");
        let binder = binder(Some(8));

        let detection = DeviceDetector::new(&props, &mounts, &binder, temp_dir.path()).detect();

        assert_eq!(
            detection.treble.as_ref().unwrap().unwrap().vndk_version,
            30
        );
        assert_eq!(detection.ab, Some(true));
        assert_eq!(detection.dynamic_partitions, Some(false));
        assert_eq!(detection.virtual_ab.as_ref().unwrap(), &None);
        assert!(*detection.sar.as_ref().unwrap());
        assert_eq!(detection.cpu, CpuArch::Arm64);
        assert_eq!(detection.binder, BinderArch::Binder8);
        assert_eq!(detection.arch, Arch::Arm64);
        assert_eq!(detection.file_name(), "system-arm64-ab.img.xz");
    }

    #[test]
    fn test_failures_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let props = PropertyMap::new()
            .with(TREBLE_ENABLED, "true")
            .with(VNDK_LITE, "true")
            .with(CPU_ABI_LIST, "armeabi-v7a");
        let mounts = mounts("garbage\n");
        let binder = binder(Some(8));

        let detection = DeviceDetector::new(&props, &mounts, &binder, temp_dir.path()).detect();

        assert!(matches!(
            detection.treble,
            Err(TrebleError::NoVersionSource { .. })
        ));
        assert!(matches!(detection.sar, Err(TrebleError::MountsFormat { .. })));
        assert_eq!(detection.arch, Arch::Arm32Binder64);
        assert_eq!(detection.ab, Some(false));
        assert_eq!(detection.file_name(), "system-arm32_binder64-???.img.xz");
    }

    #[test]
    fn test_device_from_config_with_property_file() {
        let temp_dir = TempDir::new().unwrap();
        let props_path = temp_dir.path().join("build.prop");
        fs::write(&props_path, "ro.boot.slot_suffix=_a\n").unwrap();

        let config = TrebleConfig {
            root: temp_dir.path().to_path_buf(),
            properties_file: Some(props_path),
            ..TrebleConfig::default()
        };
        let device = Device::from_config(&config).unwrap();
        assert_eq!(device.detector().ab(), Some(true));
        assert_eq!(device.detector().treble().unwrap(), None);
    }

    #[test]
    fn test_device_from_config_missing_property_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = TrebleConfig {
            properties_file: Some(temp_dir.path().join("missing.prop")),
            ..TrebleConfig::default()
        };

        assert!(matches!(
            Device::from_config(&config),
            Err(TrebleError::PropertyFile { .. })
        ));
    }
}
