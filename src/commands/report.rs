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

use crate::detect::Device;
use crate::error::{Result, TrebleError};
use crate::report::formatters::{format_human_readable, format_json};
use crate::report::{DetailCategory, ReportEngine, ReportSummary};
use std::io::Write;
use std::time::Instant;

pub struct ReportCommand<'a> {
    device: &'a Device,
}

impl<'a> ReportCommand<'a> {
    pub fn new(device: &'a Device) -> Result<Self> {
        Ok(Self { device })
    }

    /// Print the report and return the process exit code.
    pub fn execute(
        &self,
        json: bool,
        explain: bool,
        verbose: bool,
        category: Option<&str>,
    ) -> Result<i32> {
        self.write_to(&mut std::io::stdout(), json, explain, verbose, category)
    }

    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        json: bool,
        explain: bool,
        verbose: bool,
        category: Option<&str>,
    ) -> Result<i32> {
        let start = Instant::now();

        let categories = match category {
            Some(category_str) => match DetailCategory::parse(category_str) {
                Some(cat) => Some(vec![cat]),
                None => {
                    return Err(TrebleError::InvalidConfig(format!(
                        "Invalid report category: {category_str}"
                    )));
                }
            },
            None => None,
        };

        let detection = self.device.detector().detect();
        let details = ReportEngine::new(&detection).build_details(categories);

        let summary = ReportSummary::from_details(&details, start.elapsed());

        if json {
            format_json(writer, &details, &summary, explain)?;
        } else {
            format_human_readable(writer, &details, &summary, explain, verbose)?;
        }

        Ok(summary.determine_exit_code())
    }
}
