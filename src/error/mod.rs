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

mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrebleError {
    #[error("System property '{0}' could not be read")]
    PropertyUnavailable(String),

    #[error("Failed to read mount table at {}", path.display())]
    MountsUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Incorrect mount table format: {reason}")]
    MountsFormat { line: String, reason: String },

    #[error("Treble is enabled but no method could detect the VNDK version")]
    NoVersionSource { searched_paths: Vec<String> },

    #[error("Failed to parse {}: {reason}", path.display())]
    Xml { path: PathBuf, reason: String },

    #[error("Failed to read property file {}", path.display())]
    PropertyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrebleError>;
