//! Error types for upload ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while classifying and loading an upload.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The marker line matched none of the known report keywords.
    #[error("unrecognized report type, marker line: {marker:?}")]
    UnrecognizedReportType { marker: String },

    /// Upload is empty (no marker line at all).
    #[error("upload is empty")]
    EmptyUpload,

    /// Marker line present but no header row follows it.
    #[error("upload has no header row after the report marker")]
    MissingHeader,

    /// Failed to read the upload file.
    #[error("failed to read upload {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the tabular section.
    #[error("failed to parse upload data: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
