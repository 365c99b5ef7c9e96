//! Declarative column mappings per report kind.
//!
//! The rename/constant/default dictionaries are data, not code: each
//! kind supplies a table from canonical column name to a [`ColumnRule`]
//! and a single generic projection routine applies it. Canonical
//! columns a kind does not list default to the empty string.

use crate::kind::ReportKind;

/// How one canonical output column is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    /// Copy a source column verbatim.
    Source(&'static str),
    /// Copy a source column, normalizing date separators (`/` to `-`).
    SourceDate(&'static str),
    /// Copy a source column through lab-value normalization
    /// (strip `%` and whitespace, append a literal `"0"`).
    SourceLabValue(&'static str),
    /// Fixed constant value on every row.
    Const(&'static str),
    /// Run date in MM-DD-YYYY form.
    ExtractDate,
}

/// Mapping for one report kind.
#[derive(Debug, Clone, Copy)]
pub struct KindMapping {
    pub kind: ReportKind,
    /// (canonical column, rule) pairs; unlisted canonical columns are
    /// emitted empty.
    pub rules: &'static [(&'static str, ColumnRule)],
    /// Source columns that must be present but are not carried into
    /// the output.
    pub required_drops: &'static [&'static str],
}

impl KindMapping {
    /// Source columns this mapping reads or requires.
    pub fn required_source_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules
            .iter()
            .filter_map(|(_, rule)| match rule {
                ColumnRule::Source(name)
                | ColumnRule::SourceDate(name)
                | ColumnRule::SourceLabValue(name) => Some(*name),
                ColumnRule::Const(_) | ColumnRule::ExtractDate => None,
            })
            .chain(self.required_drops.iter().copied())
    }
}

/// Athena A1C analyte export to BCBS upload mapping.
///
/// Order/result identity is fixed for A1C: CPT 83036 for the order,
/// LOINC 4548-4 for the result.
pub const A1C_MAPPING: KindMapping = KindMapping {
    kind: ReportKind::A1c,
    rules: &[
        ("FileExtractDate", ColumnRule::ExtractDate),
        ("Patient_ID", ColumnRule::Source("patientid")),
        ("Patient_FirstName", ColumnRule::Source("patient firstname")),
        (
            "Patient_MiddleInitial",
            ColumnRule::Source("patient middleinitial"),
        ),
        ("Patient_LastName", ColumnRule::Source("patient lastname")),
        ("Patient_DOB", ColumnRule::SourceDate("patient dob")),
        ("Patient_Gender", ColumnRule::Source("patient sex")),
        ("Patient_Address1", ColumnRule::Source("patient address1")),
        ("Patient_Address2", ColumnRule::Source("patient address2")),
        ("Patient_City", ColumnRule::Source("patient city")),
        ("Patient_State", ColumnRule::Source("patient state")),
        ("Patient_Zip", ColumnRule::Source("patient zip")),
        ("Patient_Phone", ColumnRule::Source("patient homephone")),
        ("BCBSPolicyId", ColumnRule::Source("policy id number")),
        ("Provider_NPI", ColumnRule::Source("provider npi")),
        ("LabOrder_Code", ColumnRule::Const("83036")),
        ("LabOrder_CodeType", ColumnRule::Const("CPT")),
        ("LabOrder_CodeDesc", ColumnRule::Source("clinical order type")),
        (
            "LabOrder_Date",
            ColumnRule::SourceDate("clinical order chart date"),
        ),
        ("LabOrder_Status", ColumnRule::Const("Final")),
        ("LabResult_Code", ColumnRule::Const("4548-4")),
        ("LabResult_CodeType", ColumnRule::Const("LOINC")),
        (
            "LabResult_CodeDesc",
            ColumnRule::Const("Hemoglobin A1c/Hemoglobin.total in Blood"),
        ),
        ("LabResult_Value", ColumnRule::SourceLabValue("analyte value")),
        ("LabResult_Units", ColumnRule::Const("% Hgb")),
        ("LabResult_Status", ColumnRule::Source("analyte result status")),
        (
            "LabResult_ReportDate",
            ColumnRule::SourceDate("analyte result date"),
        ),
    ],
    // Always "HGBA1C" in the export; its absence means the wrong
    // report was uploaded.
    required_drops: &["analyte name"],
};

/// Athena BMI vitals export mapping (partial).
///
/// Demographics and provider columns only; vital-sign coding for the
/// BMI percentile is not populated yet.
pub const BMI_MAPPING: KindMapping = KindMapping {
    kind: ReportKind::Bmi,
    rules: &[
        ("FileExtractDate", ColumnRule::ExtractDate),
        ("Patient_ID", ColumnRule::Source("patientid")),
        ("Patient_FirstName", ColumnRule::Source("patient firstname")),
        (
            "Patient_MiddleInitial",
            ColumnRule::Source("patient middleinitial"),
        ),
        ("Patient_LastName", ColumnRule::Source("patient lastname")),
        ("Patient_DOB", ColumnRule::SourceDate("patient dob")),
        ("Patient_Gender", ColumnRule::Source("patient sex")),
        ("Patient_Address1", ColumnRule::Source("patient address1")),
        ("Patient_Address2", ColumnRule::Source("patient address2")),
        ("Patient_City", ColumnRule::Source("patient city")),
        ("Patient_State", ColumnRule::Source("patient state")),
        ("Patient_Zip", ColumnRule::Source("patient zip")),
        ("Patient_Phone", ColumnRule::Source("patient homephone")),
        ("BCBSPolicyId", ColumnRule::Source("policy id number")),
        ("Provider_NPI", ColumnRule::Source("provider npi")),
    ],
    required_drops: &[],
};

/// Mapping for a kind, when one is defined.
pub fn mapping_for(kind: ReportKind) -> Option<&'static KindMapping> {
    match kind {
        ReportKind::A1c => Some(&A1C_MAPPING),
        ReportKind::Bmi => Some(&BMI_MAPPING),
        ReportKind::BloodPressure | ReportKind::Egfr | ReportKind::UrineAcr => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::schema::column_index;

    #[test]
    fn rules_target_canonical_columns() {
        for mapping in [&A1C_MAPPING, &BMI_MAPPING] {
            for (column, _) in mapping.rules {
                assert!(
                    column_index(column).is_some(),
                    "{column} is not a canonical column"
                );
            }
        }
    }

    #[test]
    fn rules_list_each_column_once() {
        for mapping in [&A1C_MAPPING, &BMI_MAPPING] {
            let unique: BTreeSet<&str> =
                mapping.rules.iter().map(|(column, _)| *column).collect();
            assert_eq!(unique.len(), mapping.rules.len());
        }
    }

    #[test]
    fn a1c_renames_nineteen_source_columns() {
        let renames = A1C_MAPPING
            .rules
            .iter()
            .filter(|(_, rule)| {
                matches!(
                    rule,
                    ColumnRule::Source(_)
                        | ColumnRule::SourceDate(_)
                        | ColumnRule::SourceLabValue(_)
                )
            })
            .count();
        assert_eq!(renames, 19);
    }

    #[test]
    fn bmi_excludes_lab_columns() {
        assert!(
            BMI_MAPPING
                .rules
                .iter()
                .all(|(column, _)| !column.starts_with("Lab"))
        );
    }

    #[test]
    fn required_sources_include_drops() {
        let required: Vec<&str> = A1C_MAPPING.required_source_columns().collect();
        assert!(required.contains(&"analyte name"));
        assert!(required.contains(&"analyte value"));
    }

    #[test]
    fn unimplemented_kinds_have_no_mapping() {
        assert!(mapping_for(ReportKind::BloodPressure).is_none());
        assert!(mapping_for(ReportKind::Egfr).is_none());
        assert!(mapping_for(ReportKind::UrineAcr).is_none());
        assert!(mapping_for(ReportKind::A1c).is_some());
    }
}
