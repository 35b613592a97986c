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

use crate::report::{Detail, DetailCategory, DetailStatus, ReportSummary};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

pub fn format_human_readable<W: Write>(
    writer: &mut W,
    details: &[Detail],
    summary: &ReportSummary,
    explain: bool,
    verbose: bool,
) -> std::io::Result<()> {
    writeln!(writer, "\nTreble Info Report")?;
    writeln!(writer, "==================")?;
    writeln!(writer)?;

    for category in DetailCategory::all() {
        let category_details: Vec<&Detail> =
            details.iter().filter(|d| d.category == category).collect();

        if category_details.is_empty() {
            continue;
        }

        writeln!(writer, "{category}")?;
        writeln!(writer, "{}", "-".repeat(category.to_string().len()))?;

        for detail in category_details {
            let status_symbol = match detail.status {
                DetailStatus::Yes => "✓".green(),
                DetailStatus::Limited => "⚠".yellow(),
                DetailStatus::No => "✗".red(),
                DetailStatus::Unknown => "?".bright_black(),
            };

            writeln!(
                writer,
                "{} {}: {}",
                status_symbol, detail.name, detail.message
            )?;

            if (verbose || explain || detail.status == DetailStatus::Unknown)
                && let Some(ref text) = detail.details
            {
                for line in text.lines() {
                    writeln!(writer, "    {line}")?;
                }
            }

            if explain && let Some(ref explanation) = detail.explanation {
                writeln!(writer, "    {}", explanation.italic())?;
            }
        }
        writeln!(writer)?;
    }

    writeln!(writer, "Summary")?;
    writeln!(writer, "-------")?;
    writeln!(
        writer,
        "Total: {} (✓ {} yes, ⚠ {} limited, ✗ {} no, ? {} unknown)",
        summary.total_details, summary.yes, summary.limited, summary.no, summary.unknown
    )?;
    writeln!(
        writer,
        "Total time: {:.2}s",
        summary.total_duration.as_secs_f64()
    )?;

    Ok(())
}

#[derive(Serialize)]
struct JsonOutput {
    version: String,
    timestamp: DateTime<Utc>,
    summary: JsonSummary,
    categories: Vec<JsonCategory>,
}

#[derive(Serialize)]
struct JsonSummary {
    total_details: usize,
    yes: usize,
    limited: usize,
    no: usize,
    unknown: usize,
    total_duration_ms: u128,
    exit_code: i32,
}

#[derive(Serialize)]
struct JsonCategory {
    name: String,
    details: Vec<JsonDetail>,
}

#[derive(Serialize)]
struct JsonDetail {
    name: String,
    status: DetailStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

pub fn format_json<W: Write>(
    writer: &mut W,
    details: &[Detail],
    summary: &ReportSummary,
    explain: bool,
) -> std::io::Result<()> {
    let mut categories: Vec<JsonCategory> = Vec::new();

    for category in DetailCategory::all() {
        let category_details: Vec<JsonDetail> = details
            .iter()
            .filter(|d| d.category == category)
            .map(|d| JsonDetail {
                name: d.name.clone(),
                status: d.status,
                message: d.message.clone(),
                details: d.details.clone(),
                explanation: d.explanation.clone().filter(|_| explain),
            })
            .collect();

        if !category_details.is_empty() {
            categories.push(JsonCategory {
                name: category.to_string(),
                details: category_details,
            });
        }
    }

    let output = JsonOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        summary: JsonSummary {
            total_details: summary.total_details,
            yes: summary.yes,
            limited: summary.limited,
            no: summary.no,
            unknown: summary.unknown,
            total_duration_ms: summary.total_duration.as_millis(),
            exit_code: summary.determine_exit_code(),
        },
        categories,
    };

    serde_json::to_writer_pretty(&mut *writer, &output)?;
    writeln!(writer)?;
    Ok(())
}
