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

/// Shared fixtures for building an extracted device tree on disk
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TREBLE_PROPS: &str = "\
[ro.treble.enabled]: [true]
[ro.vndk.lite]: [false]
[ro.boot.slot_suffix]: [_a]
[ro.boot.dynamic_partitions]: [true]
[ro.virtual_ab.enabled]: [true]
[ro.virtual_ab.retrofit]: [false]
[ro.product.cpu.abilist]: [arm64-v8a,armeabi-v7a,armeabi]
";

pub const VENDOR_MATRIX: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<compatibility-matrix version="1.0" type="device">
    <vendor-ndk>
        <version>30</version>
        <library>libbase.so</library>
    </vendor-ndk>
</compatibility-matrix>
"#;

/// A temporary device: `root/` holds the partitions, the property dump and
/// mount table live next to it, and `config/` isolates the user config.
pub struct DeviceFixture {
    dir: TempDir,
}

#[allow(dead_code)]
impl DeviceFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("root")).unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("root")
    }

    /// Write a file at an absolute device path below the root.
    pub fn write(&self, absolute: &str, contents: &str) -> PathBuf {
        let path = self.root().join(absolute.trim_start_matches('/'));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn props(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("props.txt");
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn mounts(&self, contents: &str) -> PathBuf {
        let path = self.mounts_path();
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn mounts_path(&self) -> PathBuf {
        self.dir.path().join("mounts")
    }

    /// The binary with the user config, mount table and binder device all
    /// pointed into the fixture.
    pub fn command(&self) -> Command {
        let mut command = Command::cargo_bin("treble-info").unwrap();
        command
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("TREBLE_INFO_DEVICE__MOUNTS_PATH", self.mounts_path())
            .env(
                "TREBLE_INFO_DEVICE__BINDER_PATH",
                self.dir.path().join("binder"),
            )
            .env("TREBLE_INFO_OUTPUT__COLOR", "false")
            .env_remove("TREBLE_INFO_ROOT")
            .env_remove("TREBLE_INFO_PROPERTIES_FILE")
            .env_remove("RUST_LOG")
            .arg("--root")
            .arg(self.root());
        command
    }
}
