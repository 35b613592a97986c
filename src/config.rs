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
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "treble-info";
const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "TREBLE_INFO";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrebleConfig {
    /// Directory the device's `/vendor` and `/odm` trees are resolved against.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Read properties from a dump instead of the running system.
    #[serde(default)]
    pub properties_file: Option<PathBuf>,

    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_mounts_path")]
    pub mounts_path: PathBuf,

    #[serde(default = "default_binder_path")]
    pub binder_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for TrebleConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            properties_file: None,
            device: DeviceConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            mounts_path: default_mounts_path(),
            binder_path: default_binder_path(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("/")
}

fn default_mounts_path() -> PathBuf {
    PathBuf::from(crate::detect::mounts::PROC_MOUNTS)
}

fn default_binder_path() -> PathBuf {
    PathBuf::from(crate::detect::binder::DEV_BINDER)
}

fn default_color() -> bool {
    true
}

/// The per-user configuration file, when a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl TrebleConfig {
    /// Load the configuration.
    ///
    /// An explicit `config_file` must exist. Without one the per-user file is
    /// used if present. `TREBLE_INFO_*` environment variables override file
    /// values, with `__` separating nested keys.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match config_file {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                if !path.exists() {
                    return Err(TrebleError::ConfigError(format!(
                        "Config file {} does not exist",
                        path.display()
                    )));
                }
                builder = builder.add_source(
                    config::File::from(path)
                        .format(config::FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                if let Some(path) = default_config_path() {
                    log::debug!("Looking for config at {}", path.display());
                    builder = builder.add_source(
                        config::File::from(path.as_path())
                            .format(config::FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config: TrebleConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| TrebleError::ConfigError(e.to_string()))?;

        log::debug!("Loaded config: {config:?}");
        Ok(config)
    }
}
