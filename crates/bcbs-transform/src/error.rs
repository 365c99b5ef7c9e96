//! Error types for the schema transformer.

use bcbs_model::ReportKind;
use thiserror::Error;

/// Errors that can occur while transforming a classified report.
///
/// `MalformedValue` names the column and row only; patient values are
/// kept out of error text.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Transform requested for a kind that has no mapping yet.
    #[error("transform for report kind \"{}\" is not implemented", kind.as_str())]
    NotImplemented { kind: ReportKind },

    /// A source column the mapping requires is absent from the upload.
    #[error("required source column {column:?} missing from {} report", kind.as_str())]
    MissingColumn {
        column: &'static str,
        kind: ReportKind,
    },

    /// A cell could not be normalized (row index is zero-based, header
    /// excluded).
    #[error("malformed value in column {column:?}, row {row}: {reason}")]
    MalformedValue {
        column: &'static str,
        row: usize,
        reason: &'static str,
    },

    /// Percentile lookup received a gender spelling it does not know.
    #[error("unrecognized gender {value:?}")]
    UnrecognizedGender { value: String },

    /// Embedded reference data could not serve a lookup.
    #[error("percentile reference data error: {0}")]
    ReferenceData(&'static str),
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
