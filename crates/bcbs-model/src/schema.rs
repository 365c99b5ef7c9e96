//! Canonical upload schema for the BCBS intake pipeline.
//!
//! `UPLOAD_COLUMNS` is the single source of truth for output column
//! order. Every emitted record contains exactly these columns, in this
//! order, regardless of report kind; columns a kind does not populate
//! default to the empty string.

/// Fixed column ordering required by the intake pipeline.
pub const UPLOAD_COLUMNS: &[&str] = &[
    "FileExtractDate",
    // Patient identity and demographics
    "Patient_ID",
    "Patient_FirstName",
    "Patient_MiddleInitial",
    "Patient_LastName",
    "Patient_DOB",
    "Patient_Gender",
    "Patient_Address1",
    "Patient_Address2",
    "Patient_City",
    "Patient_State",
    "Patient_Zip",
    "Patient_Phone",
    "Patient_Email",
    "BCBSPolicyId",
    // Encounter
    "Encounter_ID",
    "Encounter_Date",
    "Encounter_Type",
    "Encounter_Location",
    "Encounter_DiagnosisCode",
    "Encounter_DiagnosisCodeType",
    // Provider
    "Provider_NPI",
    "Provider_FirstName",
    "Provider_LastName",
    "Provider_TaxID",
    "Provider_Specialty",
    "Provider_Phone",
    // Procedure
    "Procedure_Code",
    "Procedure_CodeType",
    "Procedure_CodeDesc",
    "Procedure_Date",
    "Procedure_Status",
    "Procedure_Modifier",
    // Problem
    "Problem_Code",
    "Problem_CodeType",
    "Problem_CodeDesc",
    "Problem_OnsetDate",
    "Problem_Status",
    // Lab order
    "LabOrder_Code",
    "LabOrder_CodeType",
    "LabOrder_CodeDesc",
    "LabOrder_Date",
    "LabOrder_Status",
    "LabOrder_OrderingProviderNPI",
    "LabOrder_Specimen",
    // Lab result
    "LabResult_Code",
    "LabResult_CodeType",
    "LabResult_CodeDesc",
    "LabResult_Value",
    "LabResult_Units",
    "LabResult_RefRange",
    "LabResult_Status",
    "LabResult_ReportDate",
    "LabResult_AbnormalFlag",
    // Vital sign
    "VitalSign_Code",
    "VitalSign_CodeType",
    "VitalSign_CodeDesc",
    "VitalSign_Value",
    "VitalSign_Units",
    "VitalSign_Date",
    "VitalSign_BMIPercentile",
    "VitalSign_Status",
    // Medication
    "Medication_NDC",
    "Medication_Name",
    "Medication_Dose",
    "Medication_DoseUnits",
    "Medication_Route",
    "Medication_StartDate",
    "Medication_EndDate",
    "Medication_Status",
    // Vaccine
    "Vaccine_CVXCode",
    "Vaccine_Name",
    "Vaccine_AdminDate",
    "Vaccine_Dose",
    "Vaccine_LotNumber",
    "Vaccine_Status",
    // Allergy
    "Allergy_Code",
    "Allergy_CodeType",
    "Allergy_Name",
    "Allergy_OnsetDate",
    "Allergy_Reaction",
];

/// Position of a canonical column, if it exists in the schema.
pub fn column_index(name: &str) -> Option<usize> {
    UPLOAD_COLUMNS.iter().position(|column| *column == name)
}
