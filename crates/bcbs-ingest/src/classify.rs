//! Report classification: marker-line sniffing plus table loading.
//!
//! Line 1 of an upload is a report-name marker, not data. The
//! classifier matches it against the known keywords, discards it, and
//! parses the remainder as comma-delimited tabular data with a header
//! row. Parsing happens from the in-memory buffer; the source file is
//! never rewritten.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use bcbs_model::{ReportKind, ReportTable};

use crate::error::{IngestError, Result};

/// Classify an upload's text content and load its tabular section.
pub fn classify_str(raw: &str) -> Result<(ReportKind, ReportTable)> {
    let mut lines = raw.split_inclusive('\n');
    let marker = match lines.next() {
        Some(line) if !line.trim().is_empty() => line.trim_end_matches(['\r', '\n']),
        _ => return Err(IngestError::EmptyUpload),
    };

    let kind = ReportKind::detect(marker).ok_or_else(|| IngestError::UnrecognizedReportType {
        marker: marker.to_string(),
    })?;
    debug!(kind = %kind, marker, "classified report marker");

    let body: String = lines.collect();
    let table = read_table(&body)?;
    if table.headers.is_empty() {
        return Err(IngestError::MissingHeader);
    }
    debug!(
        kind = %kind,
        columns = table.headers.len(),
        rows = table.row_count(),
        "loaded report table"
    );
    Ok((kind, table))
}

/// Classify an upload file on disk.
pub fn classify_file(path: &Path) -> Result<(ReportKind, ReportTable)> {
    let raw = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    classify_str(&raw)
}

/// Parse the post-marker body as a comma-delimited table.
///
/// Cells are trimmed and BOM-stripped; ragged rows are padded or
/// truncated to the header width.
fn read_table(body: &str) -> Result<ReportTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(|value| value.is_empty()) {
            continue;
        }
        if headers.is_empty() {
            headers = cells.iter().map(|value| normalize_header(value)).collect();
            continue;
        }
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = cells.get(idx).map(String::as_str).unwrap_or("");
            row.push(value.to_string());
        }
        rows.push(row);
    }
    Ok(ReportTable::new(headers, rows))
}

/// Collapse internal runs of whitespace in a header name.
fn normalize_header(raw: &str) -> String {
    let mut parts = raw.split_whitespace();
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
    raw.trim().trim_matches('\u{feff}').to_string()
}
