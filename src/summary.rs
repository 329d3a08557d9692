//! Per-file log summaries for the `info` subcommand

use std::fmt::Write as _;
use std::io::BufRead;

use chrono::NaiveDateTime;
use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::logline;

/// A restart banner and the line number it was found at.
#[derive(Debug, Clone, Serialize)]
pub struct RestartEvent {
    pub line_number: u64,
    pub line: String,
}

/// What one pass over a log file found.
#[derive(Debug, Serialize)]
pub struct LogSummary {
    pub source: String,
    pub lines: u64,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    pub restarts: Vec<RestartEvent>,
    pub versions: Vec<String>,
}

/// Scans a log stream and collects its summary.
///
/// First and last timestamps are the first and last parseable ones in file
/// order; the scan does not sort. Versions come from `db version vX.Y.Z`
/// banner lines, recorded once per distinct version in order of appearance,
/// so an upgrade shows up as `2.4.9 -> 2.6.0`.
pub fn scan_log<R: BufRead>(
    source: &str,
    input: R,
    assumed_year: i32,
) -> std::io::Result<LogSummary> {
    let mut summary = LogSummary {
        source: source.to_string(),
        lines: 0,
        first_timestamp: None,
        last_timestamp: None,
        restarts: Vec::new(),
        versions: Vec::new(),
    };
    for line in input.lines() {
        let line = line?;
        summary.lines += 1;
        if logline::is_restart_marker(&line) {
            summary.restarts.push(RestartEvent {
                line_number: summary.lines,
                line: line.clone(),
            });
        }
        if let Some(version) = logline::server_version(&line)
            && !summary.versions.iter().any(|known| known == version)
        {
            summary.versions.push(version.to_string());
        }
        if let Some(timestamp) = logline::ctime_timestamp(&line, assumed_year) {
            if summary.first_timestamp.is_none() {
                summary.first_timestamp = Some(timestamp);
            }
            summary.last_timestamp = Some(timestamp);
        }
    }
    Ok(summary)
}

/// Formats summaries for the console, one table row per file.
pub fn format_summary_text(summaries: &[LogSummary], verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "LOG SUMMARY".bold());
    let _ = writeln!(out, "{}", "-".repeat(80).bright_black());

    let mut table = styled_table(&["Source", "Lines", "Start", "End", "Restarts", "Versions"]);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.source),
            Cell::new(summary.lines),
            Cell::new(display_timestamp(summary.first_timestamp)),
            Cell::new(display_timestamp(summary.last_timestamp)),
            Cell::new(summary.restarts.len()),
            Cell::new(display_versions(&summary.versions)),
        ]);
    }
    let _ = writeln!(out, "{table}");

    if verbose {
        for summary in summaries {
            if summary.restarts.is_empty() {
                continue;
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", format!("RESTARTS IN {}", summary.source).bold());
            let _ = writeln!(out, "{}", "-".repeat(80).bright_black());
            for restart in &summary.restarts {
                let _ = writeln!(
                    out,
                    "  line {}: {}",
                    restart.line_number.to_string().cyan(),
                    restart.line
                );
            }
        }
    }
    out
}

/// Formats summaries as JSON.
pub fn format_summary_json(summaries: &[LogSummary]) -> String {
    serde_json::to_string_pretty(&serde_json::json!({ "files": summaries }))
        .unwrap_or_else(|_| "{}".to_string())
}

fn display_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    match timestamp {
        Some(timestamp) => timestamp.format("%Y %b %d %H:%M:%S").to_string(),
        None => "unknown".to_string(),
    }
}

fn display_versions(versions: &[String]) -> String {
    if versions.is_empty() {
        "unknown".to_string()
    } else {
        versions.join(" -> ")
    }
}

fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    table
}
