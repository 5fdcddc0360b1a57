//! CSV Loader Module
//!
//! Turns a CSV time-series log into a [`LogFrame`]. This is the expensive
//! computation the load cache memoizes: log files routinely run to gigabytes,
//! so a file is parsed once and served from memory afterwards.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use tracing::info;

use crate::error::{LoglyError, Result};
use crate::frame::{Column, LogFrame};

/// Timestamp layouts tried for the index column, most common first.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d.%m.%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
];

// == Load Frame ==
/// Reads one CSV log into a column-major frame.
///
/// The first column becomes the index: cells are parsed as datetimes and
/// reformatted as `"%H:%M:%S%z %Y-%m-%d"`; cells that fail to parse keep
/// their raw text. Header names are whitespace-trimmed. Every other column
/// is read as `f64`, with NaN for empty, missing, or non-numeric cells.
///
/// Blocking: call via `spawn_blocking` from async contexts.
pub fn load_frame(path: &Path) -> Result<LogFrame> {
    let path_text = path.display().to_string();
    if !path.is_file() {
        return Err(LoglyError::FileNotFound(path_text));
    }

    info!(path = %path_text, "Loading log file");

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| load_error(&path_text, &e))?;

    let headers = reader
        .headers()
        .map_err(|e| load_error(&path_text, &e))?
        .clone();
    if headers.is_empty() {
        return Err(LoglyError::Load {
            path: path_text,
            reason: "missing header row".to_string(),
        });
    }

    let field_count = headers.len();
    let mut index = Vec::new();
    let mut columns: Vec<Column> = headers
        .iter()
        .skip(1)
        .map(|name| Column {
            name: name.to_string(),
            values: Vec::new(),
        })
        .collect();

    for record in reader.records() {
        let record = record.map_err(|e| load_error(&path_text, &e))?;
        index.push(format_timestamp(record.get(0).unwrap_or("")));
        for (slot, column) in columns.iter_mut().enumerate() {
            // Ragged rows are tolerated: missing cells read as NaN
            let cell = record.get(slot + 1).unwrap_or("");
            column.values.push(cell.parse::<f64>().unwrap_or(f64::NAN));
        }
    }

    info!(
        path = %path_text,
        rows = index.len(),
        fields = field_count - 1,
        "Log file loaded"
    );

    Ok(LogFrame::new(index, columns))
}

// == List Log Files ==
/// Lists `*log*.csv` file names in the log directory, sorted.
pub fn list_log_files(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        LoglyError::Internal(format!("cannot read log dir '{}': {}", dir.display(), e))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoglyError::Internal(e.to_string()))?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.contains("log") && name.ends_with(".csv") {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

// == Timestamp Formatting ==
/// Reformats an index cell as `"%H:%M:%S%z %Y-%m-%d"` when it parses as a
/// datetime; otherwise returns the raw cell text.
fn format_timestamp(cell: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(cell) {
        return dt.format("%H:%M:%S%z %Y-%m-%d").to_string();
    }
    for layout in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cell, layout) {
            return dt.format("%H:%M:%S %Y-%m-%d").to_string();
        }
    }
    cell.to_string()
}

fn load_error(path: &str, err: &dyn std::fmt::Display) -> LoglyError {
    LoglyError::Load {
        path: path.to_string(),
        reason: err.to_string(),
    }
}
