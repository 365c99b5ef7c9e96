//! Pipe-delimited upload writer.
//!
//! Output files are UTF-8, `|`-delimited, header row included, no
//! index column, named `BCBS_<KIND>_UPLOAD_<MM-DD-YYYY>.txt`. When a
//! file for the same kind and date already exists, a numeric suffix is
//! appended rather than silently overwriting the earlier run.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::WriterBuilder;
use thiserror::Error;
use tracing::info;

use bcbs_model::{ReportKind, ReportTable};

/// Errors that can occur while writing an upload file.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write upload file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// The documented upload filename for a kind and run date.
pub fn upload_file_name(kind: ReportKind, date: NaiveDate) -> String {
    format!(
        "BCBS_{}_UPLOAD_{}.txt",
        kind.file_label(),
        date.format("%m-%d-%Y")
    )
}

/// Pick a path under `dir` that does not clobber an earlier run.
///
/// The first run of a day gets the documented name; later runs get
/// `_2`, `_3`, ... suffixes before the extension.
fn available_path(dir: &Path, kind: ReportKind, date: NaiveDate) -> PathBuf {
    let base = upload_file_name(kind, date);
    let candidate = dir.join(&base);
    if !candidate.exists() {
        return candidate;
    }
    let stem = base.trim_end_matches(".txt");
    let mut attempt = 2u32;
    loop {
        let candidate = dir.join(format!("{stem}_{attempt}.txt"));
        if !candidate.exists() {
            return candidate;
        }
        attempt += 1;
    }
}

/// Serialize a transformed table to a pipe-delimited upload file.
///
/// Returns the path written. `dir` is created if needed.
pub fn write_upload(
    dir: &Path,
    kind: ReportKind,
    date: NaiveDate,
    table: &ReportTable,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = available_path(dir, kind, date);

    let write = |path: &Path| -> std::result::Result<(), csv::Error> {
        let mut writer = WriterBuilder::new().delimiter(b'|').from_path(path)?;
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    };
    write(&path).map_err(|source| OutputError::FileWrite {
        path: path.clone(),
        source,
    })?;

    info!(
        kind = %kind,
        path = %path.display(),
        rows = table.row_count(),
        "upload file written"
    );
    Ok(path)
}
