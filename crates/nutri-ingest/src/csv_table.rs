use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// Raw CSV content with normalized headers and trimmed cells.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Index of the first header equal to `name`, ignoring ASCII case.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name.trim()))
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}

/// Parses CSV bytes. The first non-blank row is the header; short rows are
/// padded with empty cells. `path` is only used in error messages.
pub fn read_csv_bytes(bytes: &[u8], path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut rows = raw_rows.into_iter();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let rows = rows
        .map(|record| {
            (0..headers.len())
                .map(|idx| record.get(idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    Ok(CsvTable { headers, rows })
}
