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

use super::{PropertyMap, PropertySource};
use crate::error::{Result, TrebleError};
use std::fs;
use std::path::{Path, PathBuf};

/// Properties loaded from a dump taken on a device.
///
/// Both `build.prop` style (`key=value`) and `adb shell getprop` style
/// (`[key]: [value]`) lines are understood and may be mixed.
#[derive(Debug, Clone)]
pub struct PropertyFile {
    path: PathBuf,
    properties: PropertyMap,
}

impl PropertyFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| TrebleError::PropertyFile {
            path: path.to_path_buf(),
            source,
        })?;
        let properties = parse_properties(&contents);
        log::debug!(
            "Loaded {} properties from {}",
            properties.len(),
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            properties,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PropertySource for PropertyFile {
    fn get(&self, name: &str) -> Option<String> {
        self.properties.get(name)
    }
}

pub fn parse_properties(contents: &str) -> PropertyMap {
    contents.lines().filter_map(parse_property_line).collect()
}

fn parse_property_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if let Some(rest) = line.strip_prefix('[') {
        // [ro.treble.enabled]: [true]
        let (name, rest) = rest.split_once("]:")?;
        let value = rest.trim().strip_prefix('[')?.strip_suffix(']')?;
        return Some((name.to_string(), value.to_string()));
    }

    let (name, value) = line.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}
