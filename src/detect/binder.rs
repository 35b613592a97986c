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

//! Kernel binder protocol version.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const DEV_BINDER: &str = "/dev/binder";

/// Supplies the binder IPC protocol version, `None` when it cannot be
/// queried.
pub trait BinderVersionSource {
    fn binder_version(&self) -> Option<i32>;
}

/// Queries a binder device node with the `BINDER_VERSION` ioctl.
#[derive(Debug)]
pub struct KernelBinder {
    device: PathBuf,
    version: OnceLock<Option<i32>>,
}

impl KernelBinder {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            version: OnceLock::new(),
        }
    }

    pub fn device(&self) -> &Path {
        &self.device
    }
}

impl Default for KernelBinder {
    fn default() -> Self {
        Self::new(DEV_BINDER)
    }
}

impl BinderVersionSource for KernelBinder {
    fn binder_version(&self) -> Option<i32> {
        *self.version.get_or_init(|| match ioctl::query(&self.device) {
            Ok(version) => {
                log::debug!("Binder protocol version: {version}");
                Some(version)
            }
            Err(e) => {
                log::warn!(
                    "Failed to query binder version from {}: {e}",
                    self.device.display()
                );
                None
            }
        })
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
mod ioctl {
    use std::fs::OpenOptions;
    use std::io;
    use std::os::fd::AsRawFd;
    use std::path::Path;

    #[repr(C)]
    pub struct BinderVersion {
        protocol_version: i32,
    }

    nix::ioctl_readwrite!(binder_version, b'b', 9, BinderVersion);

    pub fn query(device: &Path) -> io::Result<i32> {
        // std opens with O_CLOEXEC.
        let file = OpenOptions::new().read(true).write(true).open(device)?;
        let mut version = BinderVersion {
            protocol_version: -1,
        };
        // SAFETY: `file` stays open for the duration of the call and
        // `version` matches the kernel's `struct binder_version`.
        unsafe { binder_version(file.as_raw_fd(), &mut version) }.map_err(io::Error::from)?;
        Ok(version.protocol_version)
    }
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
mod ioctl {
    use std::io;
    use std::path::Path;

    pub fn query(_device: &Path) -> io::Result<i32> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "binder is only available on Linux",
        ))
    }
}
