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

use crate::error::TrebleError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a TrebleError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a TrebleError) -> Self {
        let (suggestion, details) = match error {
            TrebleError::PropertyUnavailable(name) => {
                let suggestion = Some(
                    "Run on an Android device, or pass a property dump with --props (the output \
                     of 'adb shell getprop' or a build.prop file)."
                        .to_string(),
                );
                let details = Some(format!("Property lookup failed for '{name}'"));
                (suggestion, details)
            }
            TrebleError::MountsUnavailable { path, source } => {
                let suggestion = if source.kind() == std::io::ErrorKind::NotFound {
                    Some(
                        "The host is not running Linux or procfs is not mounted. Point \
                         device.mounts_path at a saved copy of /proc/mounts."
                            .to_string(),
                    )
                } else {
                    Some(format!("Ensure {} is readable.", path.display()))
                };
                let details = Some(format!("I/O error: {source}"));
                (suggestion, details)
            }
            TrebleError::MountsFormat { line, reason } => {
                let suggestion = Some(
                    "Each mount table line must have six space separated fields: device, mount \
                     point, type, options, dump and fsck order."
                        .to_string(),
                );
                let details = Some(format!("{reason}: '{line}'"));
                (suggestion, details)
            }
            TrebleError::NoVersionSource { searched_paths } => {
                let suggestion = Some(
                    "Check that the vendor partition is mounted (or present under --root) and \
                     that ro.vndk.version is set."
                        .to_string(),
                );
                let details = if searched_paths.is_empty() {
                    None
                } else {
                    Some(format!(
                        "Searched in:\n{}",
                        searched_paths
                            .iter()
                            .map(|p| format!("  - {p}"))
                            .collect::<Vec<_>>()
                            .join("\n")
                    ))
                };
                (suggestion, details)
            }
            TrebleError::Xml { path, .. } => {
                let suggestion = Some(format!(
                    "The file {} may be truncated or not a VINTF document.",
                    path.display()
                ));
                let details = None;
                (suggestion, details)
            }
            TrebleError::PropertyFile { path, source } => {
                let suggestion = Some(format!(
                    "Ensure the property dump {} exists and is readable.",
                    path.display()
                ));
                let details = Some(format!("I/O error: {source}"));
                (suggestion, details)
            }
            TrebleError::InvalidConfig(msg) => {
                let suggestion = Some(
                    "Valid categories: treble, partitions, architecture, image.".to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            TrebleError::ConfigError(msg) => {
                let enable_cmd = "export TREBLE_INFO_ROOT=/path/to/extracted/device";
                let suggestion = Some(format!(
                    "Fix the configuration file or the TREBLE_INFO_* environment variables, e.g. \
                     {enable_cmd}"
                ));
                let details = Some(msg.clone());
                (suggestion, details)
            }
            TrebleError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => Some(
                        "Some partitions are only readable by root. Try running with su."
                            .to_string(),
                    ),
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
