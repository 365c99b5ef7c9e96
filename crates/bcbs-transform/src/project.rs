//! Rule-driven projection onto the canonical upload schema.
//!
//! One generic routine serves every implemented report kind: resolve
//! the kind's [`KindMapping`], verify required source columns, then
//! build each output row in `UPLOAD_COLUMNS` order from the declarative
//! rules. Kinds without a mapping fail fast with a typed error.

use chrono::NaiveDate;
use tracing::{debug, info};

use bcbs_model::{ColumnRule, KindMapping, ReportKind, ReportTable, UPLOAD_COLUMNS, mapping_for};

use crate::error::{Result, TransformError};
use crate::normalize::{normalize_date, normalize_lab_value};

/// Transform a classified report table into the canonical upload
/// layout.
///
/// Row count is preserved exactly; the output headers equal
/// [`UPLOAD_COLUMNS`]. `extract_date` becomes the `FileExtractDate`
/// value (MM-DD-YYYY) on every row.
pub fn transform(
    kind: ReportKind,
    table: &ReportTable,
    extract_date: NaiveDate,
) -> Result<ReportTable> {
    let mapping = mapping_for(kind).ok_or(TransformError::NotImplemented { kind })?;
    project(mapping, table, extract_date)
}

fn project(
    mapping: &KindMapping,
    table: &ReportTable,
    extract_date: NaiveDate,
) -> Result<ReportTable> {
    let kind = mapping.kind;
    for column in mapping.required_source_columns() {
        if !table.has_column(column) {
            return Err(TransformError::MissingColumn { column, kind });
        }
    }

    // Resolve each canonical column to its rule once, not per row.
    let plan: Vec<Option<&ColumnRule>> = UPLOAD_COLUMNS
        .iter()
        .map(|column| {
            mapping
                .rules
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, rule)| rule)
        })
        .collect();
    let extract_date = extract_date.format("%m-%d-%Y").to_string();

    let mut rows = Vec::with_capacity(table.row_count());
    for row_idx in 0..table.row_count() {
        let mut row = Vec::with_capacity(UPLOAD_COLUMNS.len());
        for rule in &plan {
            let value = match rule {
                None => String::new(),
                Some(ColumnRule::Const(value)) => (*value).to_string(),
                Some(ColumnRule::ExtractDate) => extract_date.clone(),
                Some(ColumnRule::Source(source)) => source_cell(table, source, row_idx),
                Some(ColumnRule::SourceDate(source)) => {
                    normalize_date(&source_cell(table, source, row_idx))
                }
                Some(ColumnRule::SourceLabValue(source)) => {
                    let raw = source_cell(table, source, row_idx);
                    normalize_lab_value(&raw).ok_or(TransformError::MalformedValue {
                        column: source,
                        row: row_idx,
                        reason: "not numeric after stripping '%'",
                    })?
                }
            };
            row.push(value);
        }
        rows.push(row);
    }

    debug!(kind = %kind, rows = rows.len(), "projected onto upload schema");
    info!(
        kind = %kind,
        input_rows = table.row_count(),
        output_columns = UPLOAD_COLUMNS.len(),
        "transform complete"
    );
    let headers = UPLOAD_COLUMNS.iter().map(|name| (*name).to_string()).collect();
    Ok(ReportTable::new(headers, rows))
}

fn source_cell(table: &ReportTable, source: &str, row: usize) -> String {
    // Presence was verified up front; a miss here means an empty cell.
    table
        .column_index(source)
        .map(|col| table.cell(row, col).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a1c_table() -> ReportTable {
        let headers = vec![
            "patientid",
            "patient firstname",
            "patient middleinitial",
            "patient lastname",
            "patient dob",
            "patient sex",
            "patient address1",
            "patient address2",
            "patient city",
            "patient state",
            "patient zip",
            "patient homephone",
            "policy id number",
            "provider npi",
            "clinical order type",
            "clinical order chart date",
            "analyte name",
            "analyte value",
            "analyte result status",
            "analyte result date",
        ];
        let row = vec![
            "1001",
            "Ann",
            "Q",
            "Archer",
            "01/02/1980",
            "F",
            "1 Main St",
            "",
            "Springfield",
            "MA",
            "01101",
            "5550100",
            "XQH123456789",
            "1234567893",
            "HbA1c",
            "03/04/2024",
            "HGBA1C",
            "7.1 %",
            "Final",
            "03/06/2024",
        ];
        ReportTable::new(
            headers.into_iter().map(String::from).collect(),
            vec![row.into_iter().map(String::from).collect()],
        )
    }

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
    }

    #[test]
    fn a1c_output_matches_canonical_schema() {
        let out = transform(ReportKind::A1c, &a1c_table(), run_date()).unwrap();
        let expected: Vec<String> = UPLOAD_COLUMNS.iter().map(|c| (*c).to_string()).collect();
        assert_eq!(out.headers, expected);
        assert_eq!(out.row_count(), 1);
    }

    #[test]
    fn a1c_populates_renames_constants_and_dates() {
        let out = transform(ReportKind::A1c, &a1c_table(), run_date()).unwrap();
        let get = |name: &str| out.cell(0, out.column_index(name).unwrap()).to_string();
        assert_eq!(get("FileExtractDate"), "03-08-2024");
        assert_eq!(get("Patient_ID"), "1001");
        assert_eq!(get("Patient_DOB"), "01-02-1980");
        assert_eq!(get("BCBSPolicyId"), "XQH123456789");
        assert_eq!(get("LabOrder_Code"), "83036");
        assert_eq!(get("LabOrder_CodeType"), "CPT");
        assert_eq!(get("LabOrder_Date"), "03-04-2024");
        assert_eq!(get("LabResult_Code"), "4548-4");
        assert_eq!(get("LabResult_CodeType"), "LOINC");
        assert_eq!(get("LabResult_Value"), "7.10");
        assert_eq!(get("LabResult_Units"), "% Hgb");
        assert_eq!(get("LabResult_ReportDate"), "03-06-2024");
        // Unmapped canonical columns default to empty.
        assert_eq!(get("Vaccine_CVXCode"), "");
        assert_eq!(get("Medication_NDC"), "");
    }

    #[test]
    fn a1c_drops_the_analyte_name_column() {
        let out = transform(ReportKind::A1c, &a1c_table(), run_date()).unwrap();
        assert!(!out.rows[0].iter().any(|value| value == "HGBA1C"));
    }

    #[test]
    fn missing_required_column_fails() {
        let mut table = a1c_table();
        let idx = table.column_index("analyte name").unwrap();
        table.headers.remove(idx);
        for row in &mut table.rows {
            row.remove(idx);
        }
        let err = transform(ReportKind::A1c, &table, run_date()).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingColumn {
                column: "analyte name",
                ..
            }
        ));
    }

    #[test]
    fn malformed_lab_value_fails_with_row_index() {
        let mut table = a1c_table();
        let idx = table.column_index("analyte value").unwrap();
        table.rows[0][idx] = "pending".to_string();
        let err = transform(ReportKind::A1c, &table, run_date()).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MalformedValue {
                column: "analyte value",
                row: 0,
                ..
            }
        ));
    }

    #[test]
    fn bmi_transform_is_partial_but_projects_fully() {
        let headers = vec![
            "patientid",
            "patient firstname",
            "patient middleinitial",
            "patient lastname",
            "patient dob",
            "patient sex",
            "patient address1",
            "patient address2",
            "patient city",
            "patient state",
            "patient zip",
            "patient homephone",
            "policy id number",
            "provider npi",
            "patient bmi",
        ];
        let row = vec![
            "2002", "Ben", "", "Brook", "05/06/2012", "M", "2 Oak Ave", "", "Worcester", "MA",
            "01601", "5550111", "XQH987654321", "1987654321", "19.4",
        ];
        let table = ReportTable::new(
            headers.into_iter().map(String::from).collect(),
            vec![row.into_iter().map(String::from).collect()],
        );

        let out = transform(ReportKind::Bmi, &table, run_date()).unwrap();
        let get = |name: &str| out.cell(0, out.column_index(name).unwrap()).to_string();
        assert_eq!(out.headers.len(), UPLOAD_COLUMNS.len());
        assert_eq!(get("Patient_DOB"), "05-06-2012");
        assert_eq!(get("Provider_NPI"), "1987654321");
        // Acknowledged gap: no vital-sign coding populated for BMI.
        assert_eq!(get("VitalSign_Code"), "");
        assert_eq!(get("VitalSign_Value"), "");
    }

    #[test]
    fn unimplemented_kinds_fail_fast() {
        let table = ReportTable::default();
        for kind in [
            ReportKind::BloodPressure,
            ReportKind::Egfr,
            ReportKind::UrineAcr,
        ] {
            let err = transform(kind, &table, run_date()).unwrap_err();
            match err {
                TransformError::NotImplemented { kind: failed } => assert_eq!(failed, kind),
                other => panic!("expected NotImplemented, got {other}"),
            }
        }
    }

    #[test]
    fn row_count_is_preserved() {
        let mut table = a1c_table();
        let second: Vec<String> = table.rows[0].clone();
        table.rows.push(second);
        let value_idx = table.column_index("analyte value").unwrap();
        table.rows[1][value_idx] = "6%".to_string();

        let out = transform(ReportKind::A1c, &table, run_date()).unwrap();
        assert_eq!(out.row_count(), 2);
        let value_idx = out.column_index("LabResult_Value").unwrap();
        assert_eq!(out.cell(1, value_idx), "60");
    }
}
