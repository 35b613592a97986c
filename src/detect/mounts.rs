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

//! `/proc/mounts` parsing and system-as-root detection.

use crate::error::{Result, TrebleError};
use crate::properties::{DYNAMIC_PARTITIONS, PropertySource, SYSTEM_ROOT_IMAGE};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const PROC_MOUNTS: &str = "/proc/mounts";

/// One line of the kernel mount table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mount {
    pub device: String,
    pub mountpoint: String,
    pub fs_type: String,
    pub flags: Vec<String>,
    pub dump: i32,
    pub fsck_order: i32,
}

impl Mount {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.device,
            self.mountpoint,
            self.fs_type,
            self.flags.join(","),
            self.dump,
            self.fsck_order
        )
    }
}

/// Parse a single mount table line.
///
/// Blank lines and lines starting with whitespace yield `Ok(None)`. Any other
/// line must have exactly six fields.
pub fn parse_line(line: &str) -> Result<Option<Mount>> {
    if line.trim().is_empty() || line.starts_with(char::is_whitespace) {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [device, mountpoint, fs_type, flags, dump, fsck_order] = fields[..] else {
        return Err(format_error(
            line,
            format!("expected 6 fields, found {}", fields.len()),
        ));
    };

    let number = |field: &str, name: &str| {
        field
            .parse::<i32>()
            .map_err(|e| format_error(line, format!("invalid {name} field '{field}': {e}")))
    };

    Ok(Some(Mount {
        device: device.to_string(),
        mountpoint: mountpoint.to_string(),
        fs_type: fs_type.to_string(),
        flags: flags.split(',').map(str::to_string).collect(),
        dump: number(dump, "dump")?,
        fsck_order: number(fsck_order, "fsck order")?,
    }))
}

/// Parse a whole mount table. A single malformed line fails the table.
pub fn parse_mounts(contents: &str) -> Result<Vec<Mount>> {
    let mut mounts = Vec::new();
    for line in contents.lines() {
        if let Some(mount) = parse_line(line)? {
            mounts.push(mount);
        }
    }
    Ok(mounts)
}

fn format_error(line: &str, reason: String) -> TrebleError {
    TrebleError::MountsFormat {
        line: line.to_string(),
        reason,
    }
}

/// Supplies the raw mount table.
pub trait MountSource {
    fn read_mounts(&self) -> Result<String>;

    fn mounts(&self) -> Result<Vec<Mount>> {
        parse_mounts(&self.read_mounts()?)
    }
}

/// Mount table read from a file, `/proc/mounts` by default.
#[derive(Debug, Clone)]
pub struct ProcMounts {
    path: PathBuf,
}

impl ProcMounts {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ProcMounts {
    fn default() -> Self {
        Self::new(PROC_MOUNTS)
    }
}

impl MountSource for ProcMounts {
    fn read_mounts(&self) -> Result<String> {
        log::debug!("Reading mount table from {}", self.path.display());
        fs::read_to_string(&self.path).map_err(|source| TrebleError::MountsUnavailable {
            path: self.path.clone(),
            source,
        })
    }
}

pub struct SarDetector<'a> {
    properties: &'a dyn PropertySource,
    mounts: &'a dyn MountSource,
}

impl<'a> SarDetector<'a> {
    pub fn new(properties: &'a dyn PropertySource, mounts: &'a dyn MountSource) -> Self {
        Self { properties, mounts }
    }

    /// Whether the system partition is mounted as root.
    ///
    /// Either of the SAR build properties decides on its own; the mount table
    /// is only read when neither is set.
    pub fn detect(&self) -> Result<bool> {
        let dynamic_partitions = self.properties.get(DYNAMIC_PARTITIONS);
        let system_root_image = self.properties.get(SYSTEM_ROOT_IMAGE);
        log::debug!(
            "{DYNAMIC_PARTITIONS}: {dynamic_partitions:?}, {SYSTEM_ROOT_IMAGE}: {system_root_image:?}"
        );

        if dynamic_partitions.as_deref() == Some("true")
            || system_root_image.as_deref() == Some("true")
        {
            return Ok(true);
        }

        let mounts = self.mounts.mounts()?;
        Ok(is_system_as_root(&mounts))
    }
}

/// Mount table heuristics for devices that do not advertise SAR.
pub fn is_system_as_root(mounts: &[Mount]) -> bool {
    let root_mounted = mounts
        .iter()
        .any(|m| m.device == "/dev/root" && m.mountpoint == "/");
    let no_system_partition = !mounts
        .iter()
        .any(|m| m.mountpoint == "/system" && m.fs_type != "tmpfs" && m.device != "none");
    let system_root = mounts
        .iter()
        .any(|m| m.mountpoint == "/system_root" && m.fs_type != "tmpfs");
    log::debug!(
        "root mounted: {root_mounted}, no system partition: {no_system_partition}, system_root: {system_root}"
    );

    root_mounted || no_system_partition || system_root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyMap;
    use mockall::mock;
    use std::io::Write;
    use tempfile::NamedTempFile;

    mock! {
        Mounts {}
        impl MountSource for Mounts {
            fn read_mounts(&self) -> Result<String>;
        }
    }

    const SYSTEM_PARTITION: &str = "\
/dev/block/bootdevice/by-name/system /system ext4 ro,seclabel,relatime,data=ordered 0 0
rootfs / rootfs ro,seclabel,size=1860412k,nr_inodes=465103 0 0
tmpfs /dev tmpfs rw,seclabel,nosuid,relatime,mode=755 0 0
";

    fn mounts_returning(contents: &'static str) -> MockMounts {
        let mut mounts = MockMounts::new();
        mounts
            .expect_read_mounts()
            .returning(move || Ok(contents.to_string()));
        mounts
    }

    #[test]
    fn test_parse_line() {
        let mount = parse_line("/dev/block/dm-0 / ext4 ro,seclabel,relatime,discard 0 0")
            .unwrap()
            .unwrap();

        assert_eq!(mount.device, "/dev/block/dm-0");
        assert_eq!(mount.mountpoint, "/");
        assert_eq!(mount.fs_type, "ext4");
        assert_eq!(mount.flags, vec!["ro", "seclabel", "relatime", "discard"]);
        assert_eq!(mount.dump, 0);
        assert_eq!(mount.fsck_order, 0);
        assert!(mount.has_flag("ro"));
        assert!(!mount.has_flag("rw"));
    }

    #[test]
    fn test_parse_line_preserves_fields() {
        let lines = [
            "none /dev/cpuset cgroup rw,nosuid,nodev,noexec,relatime,cpuset,noprefix,release_agent=/sbin/cpuset_release_agent 0 0",
            "/dev/block/sda1 /mnt/ext ext4 rw 1 2",
        ];

        for line in lines {
            let mount = parse_line(line).unwrap().unwrap();
            assert_eq!(mount.to_string(), line);
        }
    }

    #[test]
    fn test_parse_line_skips_blank_and_indented() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line(" sysfs /sys sysfs rw 0 0").unwrap(), None);
        assert_eq!(parse_line("\tsysfs /sys sysfs rw 0 0").unwrap(), None);
    }

    #[test]
    fn test_parse_line_wrong_field_count() {
        assert!(matches!(
            parse_line("sysfs /sys sysfs rw 0"),
            Err(TrebleError::MountsFormat { .. })
        ));
        assert!(matches!(
            parse_line("sysfs /sys sysfs rw 0 0 extra"),
            Err(TrebleError::MountsFormat { .. })
        ));
    }

    #[test]
    fn test_parse_line_bad_numbers() {
        match parse_line("sysfs /sys sysfs rw x 0") {
            Err(TrebleError::MountsFormat { line, reason }) => {
                assert_eq!(line, "sysfs /sys sysfs rw x 0");
                assert!(reason.contains("dump"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mounts_fails_on_any_bad_line() {
        let contents = "sysfs /sys sysfs rw 0 0\n\nbroken line\n";
        assert!(parse_mounts(contents).is_err());

        let contents =
            "none /dev/cpuset cgroup rw 0 0\n\nsysfs /sys sysfs rw,seclabel,relatime 0 0\n";
        let mounts = parse_mounts(contents).unwrap();
        assert_eq!(mounts.len(), 2);
        assert_eq!(mounts[1].mountpoint, "/sys");
    }

    #[test]
    fn test_proc_mounts_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "sysfs /sys sysfs rw 0 0").unwrap();

        let source = ProcMounts::new(file.path());
        let mounts = source.mounts().unwrap();
        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts[0].device, "sysfs");
    }

    #[test]
    fn test_proc_mounts_missing_file() {
        let source = ProcMounts::new("/nonexistent/proc/mounts");
        assert!(matches!(
            source.read_mounts(),
            Err(TrebleError::MountsUnavailable { .. })
        ));
    }

    #[test]
    fn test_sar_from_dynamic_partitions() {
        let props = PropertyMap::new().with(DYNAMIC_PARTITIONS, "true");
        let mut mounts = MockMounts::new();
        mounts.expect_read_mounts().never();

        assert!(SarDetector::new(&props, &mounts).detect().unwrap());
    }

    #[test]
    fn test_sar_from_system_root_image() {
        let props = PropertyMap::new()
            .with(DYNAMIC_PARTITIONS, "false")
            .with(SYSTEM_ROOT_IMAGE, "true");
        let mut mounts = MockMounts::new();
        mounts.expect_read_mounts().never();

        assert!(SarDetector::new(&props, &mounts).detect().unwrap());
    }

    #[test]
    fn test_sar_from_dev_root() {
        let props = PropertyMap::new();
        let mounts = mounts_returning(
            "/dev/root / ext4 ro,seclabel,relatime 0 0\n/dev/block/sda2 /system ext4 ro 0 0\n",
        );

        assert!(SarDetector::new(&props, &mounts).detect().unwrap());
    }

    #[test]
    fn test_sar_from_system_root_mount() {
        let props = PropertyMap::new();
        let mounts = mounts_returning(
            "/dev/block/sda2 /system_root ext4 ro 0 0\n/dev/block/sda2 /system ext4 ro 0 0\n",
        );

        assert!(SarDetector::new(&props, &mounts).detect().unwrap());
    }

    #[test]
    fn test_sar_when_system_is_not_a_partition() {
        let props = PropertyMap::new();
        let mounts = mounts_returning(
            "rootfs / rootfs ro 0 0\ntmpfs /system tmpfs rw 0 0\nnone /system overlay ro 0 0\n",
        );

        assert!(SarDetector::new(&props, &mounts).detect().unwrap());
    }

    #[test]
    fn test_not_sar_with_system_partition() {
        let props = PropertyMap::new();
        let mounts = mounts_returning(SYSTEM_PARTITION);

        assert!(!SarDetector::new(&props, &mounts).detect().unwrap());
    }

    #[test]
    fn test_sar_mount_errors_propagate() {
        let props = PropertyMap::new();
        let mut mounts = MockMounts::new();
        mounts.expect_read_mounts().returning(|| {
            Err(TrebleError::MountsUnavailable {
                path: PathBuf::from(PROC_MOUNTS),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });

        assert!(SarDetector::new(&props, &mounts).detect().is_err());

        let mounts = mounts_returning("not a mount line\n");
        assert!(matches!(
            SarDetector::new(&props, &mounts).detect(),
            Err(TrebleError::MountsFormat { .. })
        ));
    }
}
