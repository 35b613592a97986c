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

//! Human-facing summary of a detection pass.

use crate::detect::Detection;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub mod details;
pub mod formatters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailStatus {
    Yes,
    Limited,
    No,
    Unknown,
}

impl fmt::Display for DetailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailStatus::Yes => write!(f, "yes"),
            DetailStatus::Limited => write!(f, "limited"),
            DetailStatus::No => write!(f, "no"),
            DetailStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl DetailStatus {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => DetailStatus::Yes,
            Some(false) => DetailStatus::No,
            None => DetailStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailCategory {
    Treble,
    Partitions,
    Architecture,
    Image,
}

impl fmt::Display for DetailCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailCategory::Treble => write!(f, "Treble"),
            DetailCategory::Partitions => write!(f, "Partitions"),
            DetailCategory::Architecture => write!(f, "Architecture"),
            DetailCategory::Image => write!(f, "Image"),
        }
    }
}

impl DetailCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "treble" => Some(DetailCategory::Treble),
            "partitions" => Some(DetailCategory::Partitions),
            "architecture" | "arch" => Some(DetailCategory::Architecture),
            "image" => Some(DetailCategory::Image),
            _ => None,
        }
    }

    pub fn all() -> Vec<DetailCategory> {
        vec![
            DetailCategory::Treble,
            DetailCategory::Partitions,
            DetailCategory::Architecture,
            DetailCategory::Image,
        ]
    }

    /// Build the details of this category from a detection pass
    pub fn create_details(&self, detection: &Detection) -> Vec<Detail> {
        match self {
            DetailCategory::Treble => details::treble(&detection.treble),
            DetailCategory::Partitions => vec![
                details::ab(detection.ab),
                details::dynamic_partitions(detection.dynamic_partitions),
                details::virtual_ab(&detection.virtual_ab),
                details::system_as_root(&detection.sar),
            ],
            DetailCategory::Architecture => vec![
                details::cpu_arch(&detection.cpu),
                details::binder_arch(detection.binder),
                details::arch(&detection.arch),
            ],
            DetailCategory::Image => vec![details::image(&detection.file_name())],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub name: String,
    pub category: DetailCategory,
    pub status: DetailStatus,
    pub message: String,
    pub details: Option<String>,
    pub explanation: Option<String>,
}

impl Detail {
    pub fn new(
        name: impl Into<String>,
        category: DetailCategory,
        status: DetailStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            status,
            message: message.into(),
            details: None,
            explanation: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

pub struct ReportSummary {
    pub total_details: usize,
    pub yes: usize,
    pub limited: usize,
    pub no: usize,
    pub unknown: usize,
    pub total_duration: Duration,
}

impl ReportSummary {
    pub fn from_details(details: &[Detail], total_duration: Duration) -> Self {
        let mut yes = 0;
        let mut limited = 0;
        let mut no = 0;
        let mut unknown = 0;

        for detail in details {
            match detail.status {
                DetailStatus::Yes => yes += 1,
                DetailStatus::Limited => limited += 1,
                DetailStatus::No => no += 1,
                DetailStatus::Unknown => unknown += 1,
            }
        }

        Self {
            total_details: details.len(),
            yes,
            limited,
            no,
            unknown,
            total_duration,
        }
    }

    pub fn determine_exit_code(&self) -> i32 {
        if self.unknown > 0 { 1 } else { 0 }
    }
}

pub struct ReportEngine<'a> {
    detection: &'a Detection,
}

impl<'a> ReportEngine<'a> {
    pub fn new(detection: &'a Detection) -> Self {
        Self { detection }
    }

    pub fn build_details(&self, categories: Option<Vec<DetailCategory>>) -> Vec<Detail> {
        categories
            .unwrap_or_else(DetailCategory::all)
            .iter()
            .flat_map(|category| category.create_details(self.detection))
            .collect()
    }
}
