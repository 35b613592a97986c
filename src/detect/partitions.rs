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

//! A/B, dynamic partition and Virtual A/B detection.

use crate::error::{Result, TrebleError};
use crate::properties::{
    DYNAMIC_PARTITIONS, PropertySource, SLOT_SUFFIX, VIRTUAL_AB_COMPRESSION, VIRTUAL_AB_ENABLED,
    VIRTUAL_AB_RETROFIT, get_bool,
};
use serde::Serialize;

/// Virtual A/B configuration. `None` fields were not readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VabResult {
    pub retrofit: Option<bool>,
    pub compressed: Option<bool>,
}

/// Seamless update slots are in use when the boot slot suffix is set.
pub fn detect_ab(properties: &dyn PropertySource) -> Option<bool> {
    let suffix = properties.get(SLOT_SUFFIX);
    log::debug!("{SLOT_SUFFIX}: {suffix:?}");
    suffix.map(|suffix| !suffix.is_empty())
}

pub fn detect_dynamic_partitions(properties: &dyn PropertySource) -> Option<bool> {
    let dynamic = get_bool(properties, DYNAMIC_PARTITIONS);
    log::debug!("{DYNAMIC_PARTITIONS}: {dynamic:?}");
    dynamic
}

/// `Ok(None)` when Virtual A/B is not enabled.
pub fn detect_virtual_ab(properties: &dyn PropertySource) -> Result<Option<VabResult>> {
    let enabled = properties
        .get(VIRTUAL_AB_ENABLED)
        .ok_or_else(|| TrebleError::PropertyUnavailable(VIRTUAL_AB_ENABLED.to_string()))?;
    log::debug!("{VIRTUAL_AB_ENABLED}: {enabled:?}");
    if enabled != "true" {
        return Ok(None);
    }

    let result = VabResult {
        retrofit: get_bool(properties, VIRTUAL_AB_RETROFIT),
        compressed: get_bool(properties, VIRTUAL_AB_COMPRESSION),
    };
    log::debug!("Virtual A/B: {result:?}");
    Ok(Some(result))
}
