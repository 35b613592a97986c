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

use crate::detect::{Device, image_file_name};
use crate::error::Result;

pub struct FilenameCommand<'a> {
    device: &'a Device,
}

impl<'a> FilenameCommand<'a> {
    pub fn new(device: &'a Device) -> Result<Self> {
        Ok(Self { device })
    }

    pub fn execute(&self) -> Result<()> {
        println!("{}", self.file_name());
        Ok(())
    }

    /// Failed detectors are logged and rendered as unknown parts of the name.
    pub fn file_name(&self) -> String {
        let detector = self.device.detector();

        let treble = detector
            .treble()
            .inspect_err(|e| log::warn!("Treble detection failed: {e}"))
            .ok()
            .flatten();
        let sar = detector
            .sar()
            .inspect_err(|e| log::warn!("System-as-root detection failed: {e}"))
            .ok();
        let arch = detector.arch_detector().arch();

        image_file_name(treble.as_ref(), &arch, sar)
    }
}
