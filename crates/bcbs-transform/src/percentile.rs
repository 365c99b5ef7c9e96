//! BMI-for-age growth-chart percentile lookup.
//!
//! The gender-specific reference tables are embedded in the binary and
//! parsed once into a process-wide static; lookups never touch the
//! filesystem. Lookup picks the reference row with the closest age in
//! months, then the percentile column whose reference BMI is closest
//! to the supplied value.

use std::str::FromStr;
use std::sync::OnceLock;

use csv::ReaderBuilder;

use crate::error::{Result, TransformError};

const MALE_TABLE: &str = include_str!("../data/bmi_for_age_male.csv");
const FEMALE_TABLE: &str = include_str!("../data/bmi_for_age_female.csv");

/// Gender axis of the reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = TransformError;

    /// Accepts the spellings seen in Athena exports, case-insensitively.
    /// Anything else is a typed error, never a silent no-result.
    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "m" | "male" | "boy" => Ok(Gender::Male),
            "f" | "female" | "girl" => Ok(Gender::Female),
            _ => Err(TransformError::UnrecognizedGender {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug)]
struct PercentileRow {
    agemos: f64,
    /// (percentile label, reference BMI) pairs, e.g. ("85", 17.9).
    values: Vec<(String, f64)>,
}

#[derive(Debug)]
struct ReferenceTables {
    male: Vec<PercentileRow>,
    female: Vec<PercentileRow>,
}

static TABLES: OnceLock<ReferenceTables> = OnceLock::new();

fn tables() -> &'static ReferenceTables {
    TABLES.get_or_init(|| ReferenceTables {
        male: parse_table(MALE_TABLE),
        female: parse_table(FEMALE_TABLE),
    })
}

/// Parse an embedded reference CSV. Malformed rows are skipped so the
/// loader is total; the embedded assets are fixed at build time.
fn parse_table(raw: &str) -> Vec<PercentileRow> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(raw.as_bytes());
    let labels: Vec<String> = reader
        .headers()
        .map(|headers| {
            headers
                .iter()
                .skip(1)
                .map(|name| name.trim_start_matches('p').to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut rows = Vec::new();
    for record in reader.records().flatten() {
        let Some(agemos) = record.get(0).and_then(|v| v.parse::<f64>().ok()) else {
            continue;
        };
        let values: Vec<(String, f64)> = labels
            .iter()
            .zip(record.iter().skip(1))
            .filter_map(|(label, cell)| {
                cell.parse::<f64>().ok().map(|bmi| (label.clone(), bmi))
            })
            .collect();
        if !values.is_empty() {
            rows.push(PercentileRow { agemos, values });
        }
    }
    rows
}

/// Look up the growth-chart percentile label for a BMI value.
///
/// Returns a label like `"85 percentile"`.
pub fn bmi_percentile(gender: Gender, age_months: f64, bmi: f64) -> Result<String> {
    let tables = tables();
    let rows = match gender {
        Gender::Male => &tables.male,
        Gender::Female => &tables.female,
    };
    let row = rows
        .iter()
        .min_by(|a, b| {
            (a.agemos - age_months)
                .abs()
                .total_cmp(&(b.agemos - age_months).abs())
        })
        .ok_or(TransformError::ReferenceData("percentile table is empty"))?;
    let (label, _) = row
        .values
        .iter()
        .min_by(|a, b| (a.1 - bmi).abs().total_cmp(&(b.1 - bmi).abs()))
        .ok_or(TransformError::ReferenceData("percentile row is empty"))?;
    Ok(format!("{label} percentile"))
}

/// Gender-string convenience wrapper over [`bmi_percentile`].
pub fn bmi_percentile_for(gender: &str, age_months: f64, bmi: f64) -> Result<String> {
    bmi_percentile(Gender::from_str(gender)?, age_months, bmi)
}
