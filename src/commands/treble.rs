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

use crate::detect::{Device, TrebleResult};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TrebleOutput {
    supported: bool,
    #[serde(flatten)]
    result: Option<TrebleResult>,
}

pub struct TrebleCommand<'a> {
    device: &'a Device,
}

impl<'a> TrebleCommand<'a> {
    pub fn new(device: &'a Device) -> Result<Self> {
        Ok(Self { device })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        self.write_to(&mut std::io::stdout(), json)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, json: bool) -> Result<()> {
        let result = self.device.detector().treble()?;

        if json {
            let output = TrebleOutput {
                supported: result.is_some(),
                result,
            };
            serde_json::to_writer_pretty(&mut *writer, &output)?;
            writeln!(writer)?;
            return Ok(());
        }

        match result {
            Some(treble) => {
                writeln!(writer, "Treble: supported")?;
                writeln!(writer, "VNDK version: {}", treble.version())?;
                writeln!(writer, "VNDK lite: {}", yes_no(treble.lite))?;
                writeln!(writer, "Legacy: {}", yes_no(treble.legacy))?;
            }
            None => writeln!(writer, "Treble: not supported")?,
        }
        Ok(())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
