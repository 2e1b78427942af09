//! # Laboratory Input Files
//!
//! Reads a laboratory export into [`LabRow`]s, keeping the header so data
//! quality can check required columns. The format follows the extension:
//!
//! - `.csv`: header row plus records, RFC 4180 quoting (`"a, b"`, `""`).
//! - `.json`: an array of row objects, or `{"samples": [...]}`.
//! - `.yaml` / `.yml`: same shapes as JSON.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use sdwa_core::{LabRow, SampleRecord};

/// A parsed laboratory export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabFile {
    /// Column names: file order for CSV, sorted for JSON and YAML.
    pub columns: Vec<String>,
    pub rows: Vec<LabRow>,
}

impl LabFile {
    /// Rows that name a parameter, as sample records.
    pub fn samples(&self) -> Vec<SampleRecord> {
        let samples: Vec<SampleRecord> = self.rows.iter().filter_map(LabRow::to_sample_record).collect();
        let skipped = self.rows.len() - samples.len();
        if skipped > 0 {
            tracing::warn!(skipped, "rows without a parameter ignored");
        }
        samples
    }

    /// First non-blank PWSID in the file.
    pub fn first_pwsid(&self) -> Option<&str> {
        self.rows.iter().find_map(|r| r.pwsid.as_deref())
    }
}

/// Read a laboratory export, choosing the parser by extension.
pub fn read_lab_file(path: &Path) -> Result<LabFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read laboratory file: {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let file = match ext.as_str() {
        "csv" => parse_csv(&text),
        "json" => serde_json::from_str::<Value>(&text)
            .context("invalid JSON")
            .and_then(from_value),
        "yaml" | "yml" => serde_yaml::from_str::<Value>(&text)
            .context("invalid YAML")
            .and_then(from_value),
        other => bail!("unsupported laboratory file type {other:?} (expected csv, json, yaml)"),
    }
    .with_context(|| format!("failed to parse laboratory file: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        rows = file.rows.len(),
        columns = file.columns.len(),
        "laboratory file loaded"
    );
    Ok(file)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row.
pub fn parse_csv(text: &str) -> Result<LabFile> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = split_records(text)?.into_iter();
    let Some(header) = records.next() else {
        return Ok(LabFile::default());
    };
    let columns: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

    let rows = records
        .map(|cells| {
            LabRow::from_cells(
                columns
                    .iter()
                    .map(String::as_str)
                    .zip(cells.iter().map(String::as_str)),
            )
        })
        .collect();
    Ok(LabFile { columns, rows })
}

fn split_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                line += 1;
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        bail!("unterminated quoted field at line {line}");
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records.retain(|r| r.iter().any(|cell| !cell.trim().is_empty()));
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON / YAML
// ---------------------------------------------------------------------------

fn from_value(value: Value) -> Result<LabFile> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("samples") {
            Some(Value::Array(items)) => items,
            _ => bail!("expected an array of rows or an object with a \"samples\" array"),
        },
        Value::Null => Vec::new(),
        _ => bail!("expected an array of rows or an object with a \"samples\" array"),
    };

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(map) = &item else {
            bail!("row {index} is not an object");
        };
        for key in map.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
        let row: LabRow =
            serde_json::from_value(item).with_context(|| format!("row {index} is malformed"))?;
        rows.push(row);
    }
    Ok(LabFile { columns, rows })
}
