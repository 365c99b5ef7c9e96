//! Report kind detection from the upload marker line.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of clinical measure being converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    A1c,
    Bmi,
    BloodPressure,
    Egfr,
    UrineAcr,
}

/// Marker keywords in check order. First match wins.
///
/// The order matters for substring collisions: "Microalbumin-HS" is
/// checked before the short codes so it cannot be shadowed, and "BMP"
/// is checked before "BMI" to match the upstream export's precedence.
/// Matching is case-sensitive because the Athena marker line uses
/// these exact spellings.
const MARKER_KEYWORDS: &[(&str, ReportKind)] = &[
    ("Microalbumin-HS", ReportKind::UrineAcr),
    ("A1c", ReportKind::A1c),
    ("BP", ReportKind::BloodPressure),
    ("BMP", ReportKind::Egfr),
    ("BMI", ReportKind::Bmi),
];

impl ReportKind {
    /// All kinds, in marker precedence order.
    pub const ALL: [ReportKind; 5] = [
        ReportKind::UrineAcr,
        ReportKind::A1c,
        ReportKind::BloodPressure,
        ReportKind::Egfr,
        ReportKind::Bmi,
    ];

    /// Match a report-name marker line to a kind.
    ///
    /// Returns the first keyword found as a substring of `marker`, or
    /// `None` when no keyword matches.
    pub fn detect(marker: &str) -> Option<ReportKind> {
        MARKER_KEYWORDS
            .iter()
            .find(|(keyword, _)| marker.contains(keyword))
            .map(|(_, kind)| *kind)
    }

    /// Short lowercase code used in errors and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::A1c => "a1c",
            ReportKind::Bmi => "bmi",
            ReportKind::BloodPressure => "bp",
            ReportKind::Egfr => "egfr",
            ReportKind::UrineAcr => "uacr",
        }
    }

    /// Uppercase label used in output filenames (`BCBS_<label>_UPLOAD_...`).
    pub fn file_label(self) -> &'static str {
        match self {
            ReportKind::A1c => "A1C",
            ReportKind::Bmi => "BMI",
            ReportKind::BloodPressure => "BP",
            ReportKind::Egfr => "EGFR",
            ReportKind::UrineAcr => "UACR",
        }
    }

    /// Human-readable description for the kinds listing.
    pub fn description(self) -> &'static str {
        match self {
            ReportKind::A1c => "Hemoglobin A1c lab results",
            ReportKind::Bmi => "Body mass index vitals",
            ReportKind::BloodPressure => "Blood pressure vitals",
            ReportKind::Egfr => "Estimated glomerular filtration rate (from BMP)",
            ReportKind::UrineAcr => "Urine albumin-creatinine ratio (Microalbumin-HS)",
        }
    }

    /// Whether a transform exists for this kind.
    pub fn is_implemented(self) -> bool {
        matches!(self, ReportKind::A1c | ReportKind::Bmi)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
