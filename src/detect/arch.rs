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

//! CPU and binder architecture classification.

use super::binder::BinderVersionSource;
use crate::properties::{CPU_ABI, CPU_ABI_LIST, PropertySource};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CpuArch {
    Arm64,
    Arm32,
    X86_64,
    X86,
    Unknown(Option<String>),
}

impl CpuArch {
    pub fn from_abi(abi: Option<&str>) -> Self {
        match abi {
            Some("arm64-v8a") => CpuArch::Arm64,
            Some("armeabi-v7a") => CpuArch::Arm32,
            Some("x86_64") => CpuArch::X86_64,
            Some("x86") => CpuArch::X86,
            other => CpuArch::Unknown(other.map(str::to_string)),
        }
    }

    pub fn bits(&self) -> Option<u32> {
        match self {
            CpuArch::Arm64 | CpuArch::X86_64 => Some(64),
            CpuArch::Arm32 | CpuArch::X86 => Some(32),
            CpuArch::Unknown(_) => None,
        }
    }
}

impl fmt::Display for CpuArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuArch::Arm64 => write!(f, "arm64"),
            CpuArch::Arm32 => write!(f, "arm32"),
            CpuArch::X86_64 => write!(f, "x86_64"),
            CpuArch::X86 => write!(f, "x86"),
            CpuArch::Unknown(Some(abi)) => write!(f, "unknown ({abi})"),
            CpuArch::Unknown(None) => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinderArch {
    /// 32-bit binder protocol.
    Binder7,
    /// 64-bit binder protocol.
    Binder8,
    Unknown(Option<i32>),
}

impl BinderArch {
    pub fn from_version(version: Option<i32>) -> Self {
        match version {
            Some(7) => BinderArch::Binder7,
            Some(8) => BinderArch::Binder8,
            other => BinderArch::Unknown(other),
        }
    }

    pub fn bits(&self) -> Option<u32> {
        match self {
            BinderArch::Binder7 => Some(32),
            BinderArch::Binder8 => Some(64),
            BinderArch::Unknown(_) => None,
        }
    }
}

impl fmt::Display for BinderArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinderArch::Binder7 => write!(f, "binder 7"),
            BinderArch::Binder8 => write!(f, "binder 8"),
            BinderArch::Unknown(Some(version)) => write!(f, "unknown (binder {version})"),
            BinderArch::Unknown(None) => write!(f, "unknown"),
        }
    }
}

/// The device class a GSI is built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Arch {
    Arm64,
    Arm32,
    Arm32Binder64,
    X86_64,
    X86,
    X86Binder64,
    Unknown {
        cpu: Option<String>,
        binder: Option<i32>,
    },
}

impl Arch {
    pub fn new(cpu: &CpuArch, binder: BinderArch) -> Self {
        match (cpu, binder) {
            (CpuArch::Arm64, BinderArch::Binder8) => Arch::Arm64,
            (CpuArch::Arm32, BinderArch::Binder7) => Arch::Arm32,
            (CpuArch::Arm32, BinderArch::Binder8) => Arch::Arm32Binder64,
            (CpuArch::X86_64, BinderArch::Binder8) => Arch::X86_64,
            (CpuArch::X86, BinderArch::Binder7) => Arch::X86,
            (CpuArch::X86, BinderArch::Binder8) => Arch::X86Binder64,
            _ => Arch::Unknown {
                cpu: cpu_name(cpu),
                binder: binder_version(binder),
            },
        }
    }

    pub fn cpu_bits(&self) -> Option<u32> {
        match self {
            Arch::Arm64 | Arch::X86_64 => Some(64),
            Arch::Arm32 | Arch::Arm32Binder64 | Arch::X86 | Arch::X86Binder64 => Some(32),
            Arch::Unknown { cpu, .. } => CpuArch::from_abi(cpu.as_deref()).bits(),
        }
    }

    pub fn binder_bits(&self) -> Option<u32> {
        match self {
            Arch::Arm64 | Arch::X86_64 | Arch::Arm32Binder64 | Arch::X86Binder64 => Some(64),
            Arch::Arm32 | Arch::X86 => Some(32),
            Arch::Unknown { binder, .. } => BinderArch::from_version(*binder).bits(),
        }
    }

    /// The architecture part of a GSI file name, `None` for unknown devices.
    pub fn image_token(&self) -> Option<&'static str> {
        match self {
            Arch::Arm64 => Some("arm64"),
            Arch::Arm32 => Some("arm32"),
            Arch::Arm32Binder64 => Some("arm32_binder64"),
            Arch::X86_64 => Some("x86_64"),
            Arch::X86 => Some("x86"),
            Arch::X86Binder64 => Some("x86_binder64"),
            Arch::Unknown { .. } => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.image_token() {
            Some(token) => write!(f, "{token}"),
            None => write!(f, "unknown"),
        }
    }
}

fn cpu_name(cpu: &CpuArch) -> Option<String> {
    match cpu {
        CpuArch::Arm64 => Some("arm64-v8a".to_string()),
        CpuArch::Arm32 => Some("armeabi-v7a".to_string()),
        CpuArch::X86_64 => Some("x86_64".to_string()),
        CpuArch::X86 => Some("x86".to_string()),
        CpuArch::Unknown(name) => name.clone(),
    }
}

fn binder_version(binder: BinderArch) -> Option<i32> {
    match binder {
        BinderArch::Binder7 => Some(7),
        BinderArch::Binder8 => Some(8),
        BinderArch::Unknown(version) => version,
    }
}

/// The device's preferred ABI: the first entry of the ABI list, or the
/// single legacy ABI property.
pub fn primary_abi(properties: &dyn PropertySource) -> Option<String> {
    let from_list = properties.get(CPU_ABI_LIST).and_then(|list| {
        list.split(',')
            .map(str::trim)
            .find(|abi| !abi.is_empty())
            .map(str::to_string)
    });
    from_list.or_else(|| {
        properties
            .get(CPU_ABI)
            .map(|abi| abi.trim().to_string())
            .filter(|abi| !abi.is_empty())
    })
}

pub struct ArchDetector<'a> {
    properties: &'a dyn PropertySource,
    binder: &'a dyn BinderVersionSource,
}

impl<'a> ArchDetector<'a> {
    pub fn new(properties: &'a dyn PropertySource, binder: &'a dyn BinderVersionSource) -> Self {
        Self { properties, binder }
    }

    pub fn cpu_arch(&self) -> CpuArch {
        let abi = primary_abi(self.properties);
        log::debug!("Primary ABI: {abi:?}");
        CpuArch::from_abi(abi.as_deref())
    }

    pub fn binder_arch(&self) -> BinderArch {
        BinderArch::from_version(self.binder.binder_version())
    }

    pub fn arch(&self) -> Arch {
        Arch::new(&self.cpu_arch(), self.binder_arch())
    }
}
