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

//! Android system property access.
//!
//! Every detector reads properties through [`PropertySource`]. The contract
//! mirrors the platform getter: a property that is not set reads as an empty
//! string, while `None` means the property service could not be queried.

mod file;
mod system;

pub use file::PropertyFile;
pub use system::SystemProperties;

use std::collections::HashMap;

pub const TREBLE_ENABLED: &str = "ro.treble.enabled";
pub const VNDK_LITE: &str = "ro.vndk.lite";
pub const VNDK_VERSION: &str = "ro.vndk.version";
pub const VENDOR_SKU: &str = "ro.boot.product.vendor.sku";
pub const HARDWARE_SKU: &str = "ro.boot.product.hardware.sku";
pub const SLOT_SUFFIX: &str = "ro.boot.slot_suffix";
pub const DYNAMIC_PARTITIONS: &str = "ro.boot.dynamic_partitions";
pub const SYSTEM_ROOT_IMAGE: &str = "ro.build.system_root_image";
pub const VIRTUAL_AB_ENABLED: &str = "ro.virtual_ab.enabled";
pub const VIRTUAL_AB_RETROFIT: &str = "ro.virtual_ab.retrofit";
pub const VIRTUAL_AB_COMPRESSION: &str = "ro.virtual_ab.compression.enabled";
pub const CPU_ABI_LIST: &str = "ro.product.cpu.abilist";
pub const CPU_ABI: &str = "ro.product.cpu.abi";

pub trait PropertySource {
    /// Read a single property, `Some("")` when unset.
    fn get(&self, name: &str) -> Option<String>;
}

impl<T: PropertySource + ?Sized> PropertySource for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

impl<T: PropertySource + ?Sized> PropertySource for Box<T> {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// An in-memory property set. Names that are not present read as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    values: HashMap<String, String>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for PropertyMap {
    fn get(&self, name: &str) -> Option<String> {
        Some(self.values.get(name).cloned().unwrap_or_default())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Returns `Some(true)` when the property reads `"true"`, `None` when the
/// property service is unavailable.
pub fn get_bool(source: &dyn PropertySource, name: &str) -> Option<bool> {
    source.get(name).map(|value| value == "true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_map_unset_reads_empty() {
        let props = PropertyMap::new().with(TREBLE_ENABLED, "true");

        assert_eq!(props.get(TREBLE_ENABLED), Some("true".to_string()));
        assert_eq!(props.get(VNDK_LITE), Some(String::new()));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_property_map_from_iterator() {
        let props: PropertyMap = [(SLOT_SUFFIX, "_a"), (DYNAMIC_PARTITIONS, "true")]
            .into_iter()
            .collect();

        assert_eq!(props.get(SLOT_SUFFIX), Some("_a".to_string()));
        assert!(!props.is_empty());
    }

    #[test]
    fn test_get_bool() {
        let props = PropertyMap::new()
            .with(DYNAMIC_PARTITIONS, "true")
            .with(SYSTEM_ROOT_IMAGE, "false");

        assert_eq!(get_bool(&props, DYNAMIC_PARTITIONS), Some(true));
        assert_eq!(get_bool(&props, SYSTEM_ROOT_IMAGE), Some(false));
        assert_eq!(get_bool(&props, VIRTUAL_AB_RETROFIT), Some(false));
    }

    #[test]
    fn test_reference_forwarding() {
        let props = PropertyMap::new().with(VNDK_VERSION, "30");
        let boxed: Box<dyn PropertySource> = Box::new(props.clone());

        fn read<S: PropertySource>(source: S) -> Option<String> {
            source.get(VNDK_VERSION)
        }

        assert_eq!(read(&props), Some("30".to_string()));
        assert_eq!(read(boxed), Some("30".to_string()));
    }
}
