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

//! Detail builders, one per reported property.

use super::{Detail, DetailCategory, DetailStatus};
use crate::detect::filename::UNKNOWN_TOKEN;
use crate::detect::{Arch, BinderArch, CpuArch, TrebleResult, VabResult};
use crate::error::{ErrorContext, Result, TrebleError};

const TREBLE_EXPLANATION: &str = "Project Treble separates the vendor implementation from the \
Android OS framework, so a generic system image (GSI) can boot on the device.";
const VNDK_EXPLANATION: &str = "The VNDK version is the Android release the vendor interface \
was built against. A GSI must be at least this version.";
const LITE_EXPLANATION: &str = "VNDK-lite devices do not enforce the linker namespace \
isolation that full Treble requires. They need a vndklite GSI.";
const LEGACY_EXPLANATION: &str = "The device still ships /vendor/manifest.xml next to the \
current VINTF manifests, which usually means Treble support was added after launch.";
const AB_EXPLANATION: &str = "A/B devices keep two copies of each partition and install \
updates to the inactive slot.";
const DYNAMIC_EXPLANATION: &str = "Dynamic partitions are resized at runtime inside a single \
super partition.";
const VAB_EXPLANATION: &str = "Virtual A/B keeps the second slot as a snapshot instead of a \
full copy of each partition.";
const SAR_EXPLANATION: &str = "System-as-root devices mount the system image at / instead of \
/system. They need an 'ab' GSI even without A/B slots.";
const CPU_EXPLANATION: &str = "The primary ABI reported by the device.";
const BINDER_EXPLANATION: &str = "Binder protocol 7 is the 32-bit kernel interface, protocol \
8 the 64-bit one.";
const ARCH_EXPLANATION: &str = "The GSI architecture combines the userspace ABI with the \
binder interface; arm32_binder64 devices run 32-bit userspace on a 64-bit binder.";
const IMAGE_EXPLANATION: &str = "The generic system image variant to download for this \
device. ??? marks a part that could not be detected.";

/// Unknown detail for a failed detector, carrying the error and its context.
pub fn detection_failed(name: &str, category: DetailCategory, error: &TrebleError) -> Detail {
    let context = ErrorContext::new(error);
    let mut details = error.to_string();
    if let Some(extra) = &context.details {
        details.push('\n');
        details.push_str(extra);
    }
    if let Some(suggestion) = &context.suggestion {
        details.push_str("\nSuggestion: ");
        details.push_str(suggestion);
    }

    Detail::new(name, category, DetailStatus::Unknown, "Detection failed").with_details(details)
}

pub fn treble(result: &Result<Option<TrebleResult>>) -> Vec<Detail> {
    let category = DetailCategory::Treble;
    let treble = match result {
        Err(e) => {
            return vec![
                detection_failed("Treble", category, e).with_explanation(TREBLE_EXPLANATION),
            ];
        }
        Ok(None) => {
            return vec![
                Detail::new("Treble", category, DetailStatus::No, "Not supported")
                    .with_explanation(TREBLE_EXPLANATION),
            ];
        }
        Ok(Some(treble)) => treble,
    };

    let (lite_status, lite_message) = if treble.lite {
        (DetailStatus::Limited, "VNDK lite")
    } else {
        (DetailStatus::Yes, "Full VNDK")
    };
    let (legacy_status, legacy_message) = if treble.legacy {
        (DetailStatus::Limited, "Legacy manifest present")
    } else {
        (DetailStatus::Yes, "Current VINTF layout")
    };

    vec![
        Detail::new("Treble", category, DetailStatus::Yes, "Supported")
            .with_explanation(TREBLE_EXPLANATION),
        Detail::new(
            "VNDK version",
            category,
            DetailStatus::Yes,
            treble.version().to_string(),
        )
        .with_explanation(VNDK_EXPLANATION),
        Detail::new("VNDK lite", category, lite_status, lite_message)
            .with_explanation(LITE_EXPLANATION),
        Detail::new("Legacy", category, legacy_status, legacy_message)
            .with_explanation(LEGACY_EXPLANATION),
    ]
}

fn flag_detail(name: &str, flag: Option<bool>, yes: &str, no: &str) -> Detail {
    let message = match flag {
        Some(true) => yes,
        Some(false) => no,
        None => "Property service unavailable",
    };
    Detail::new(
        name,
        DetailCategory::Partitions,
        DetailStatus::from_flag(flag),
        message,
    )
}

pub fn ab(ab: Option<bool>) -> Detail {
    flag_detail("A/B", ab, "Seamless updates", "Single slot").with_explanation(AB_EXPLANATION)
}

pub fn dynamic_partitions(dynamic: Option<bool>) -> Detail {
    flag_detail(
        "Dynamic partitions",
        dynamic,
        "Super partition",
        "Fixed partitions",
    )
    .with_explanation(DYNAMIC_EXPLANATION)
}

pub fn virtual_ab(result: &Result<Option<VabResult>>) -> Detail {
    let category = DetailCategory::Partitions;
    let detail = match result {
        Err(e) => detection_failed("Virtual A/B", category, e),
        Ok(None) => Detail::new("Virtual A/B", category, DetailStatus::No, "Not enabled"),
        Ok(Some(vab)) => Detail::new("Virtual A/B", category, DetailStatus::Yes, "Enabled")
            .with_details(format!(
                "Retrofit: {}\nCompression: {}",
                flag_text(vab.retrofit),
                flag_text(vab.compressed)
            )),
    };
    detail.with_explanation(VAB_EXPLANATION)
}

pub fn system_as_root(result: &Result<bool>) -> Detail {
    let category = DetailCategory::Partitions;
    let detail = match result {
        Err(e) => detection_failed("System-as-root", category, e),
        Ok(true) => Detail::new(
            "System-as-root",
            category,
            DetailStatus::Yes,
            "System mounted at /",
        ),
        Ok(false) => Detail::new(
            "System-as-root",
            category,
            DetailStatus::No,
            "System mounted at /system",
        ),
    };
    detail.with_explanation(SAR_EXPLANATION)
}

pub fn cpu_arch(cpu: &CpuArch) -> Detail {
    let status = match cpu {
        CpuArch::Unknown(_) => DetailStatus::Unknown,
        _ => DetailStatus::Yes,
    };
    Detail::new("CPU", DetailCategory::Architecture, status, cpu.to_string())
        .with_details(bits_text(cpu.bits()))
        .with_explanation(CPU_EXPLANATION)
}

pub fn binder_arch(binder: BinderArch) -> Detail {
    let status = match binder {
        BinderArch::Unknown(_) => DetailStatus::Unknown,
        _ => DetailStatus::Yes,
    };
    Detail::new(
        "Binder",
        DetailCategory::Architecture,
        status,
        binder.to_string(),
    )
    .with_details(bits_text(binder.bits()))
    .with_explanation(BINDER_EXPLANATION)
}

pub fn arch(arch: &Arch) -> Detail {
    let status = match arch {
        Arch::Unknown { .. } => DetailStatus::Unknown,
        _ => DetailStatus::Yes,
    };
    Detail::new(
        "GSI architecture",
        DetailCategory::Architecture,
        status,
        arch.to_string(),
    )
    .with_details(format!(
        "CPU: {}, binder: {}",
        bits_text(arch.cpu_bits()),
        bits_text(arch.binder_bits())
    ))
    .with_explanation(ARCH_EXPLANATION)
}

pub fn image(file_name: &str) -> Detail {
    let status = if file_name.contains(UNKNOWN_TOKEN) {
        DetailStatus::Unknown
    } else {
        DetailStatus::Yes
    };
    Detail::new("System image", DetailCategory::Image, status, file_name)
        .with_explanation(IMAGE_EXPLANATION)
}

fn flag_text(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    }
}

fn bits_text(bits: Option<u32>) -> String {
    match bits {
        Some(bits) => format!("{bits}-bit"),
        None => "unknown bitness".to_string(),
    }
}
