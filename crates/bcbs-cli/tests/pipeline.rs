//! End-to-end conversion through the command layer.

use std::fs;
use std::path::Path;

use chrono::Local;
use tempfile::tempdir;

use bcbs_cli::cli::ConvertArgs;
use bcbs_cli::commands::run_convert;
use bcbs_model::{ReportKind, UPLOAD_COLUMNS};

const A1C_HEADER: &str = "patientid,patient firstname,patient middleinitial,\
patient lastname,patient dob,patient sex,patient address1,patient address2,\
patient city,patient state,patient zip,patient homephone,policy id number,\
provider npi,clinical order type,clinical order chart date,analyte name,\
analyte value,analyte result status,analyte result date";

fn write_a1c_export(dir: &Path) -> std::path::PathBuf {
    let file = dir.join("A1c Registry Export.csv");
    let body = format!(
        "Current Patients with A1c in range\n\
         {A1C_HEADER}\n\
         1001,Ada,M,Lovelace,03/14/2011,F,10 Main St,,Springfield,IL,62701,\
         555-0100,XQJ123456,1234567890,HbA1c Panel,01/05/2026,HGBA1C,7.1 %,\
         Final,01/07/2026\n\
         1002,Alan,,Turing,06/23/2012,M,22 Oak Ave,Apt 4,Springfield,IL,62702,\
         555-0101,XQJ654321,1234567890,HbA1c Panel,01/06/2026,HGBA1C,6%,\
         Final,01/08/2026\n"
    );
    fs::write(&file, body).unwrap();
    file
}

fn convert_args(file: std::path::PathBuf, output_dir: &Path, dry_run: bool) -> ConvertArgs {
    ConvertArgs {
        file,
        output_dir: Some(output_dir.to_path_buf()),
        dry_run,
        json: false,
    }
}

#[test]
fn converts_a1c_export_end_to_end() {
    let dir = tempdir().unwrap();
    let input = write_a1c_export(dir.path());
    let extract_date = Local::now().date_naive().format("%m-%d-%Y").to_string();

    let result = run_convert(&convert_args(input, dir.path(), false)).unwrap();

    assert_eq!(result.kind, ReportKind::A1c);
    assert_eq!(result.input_rows, 2);
    assert_eq!(result.output_rows, 2);
    assert_eq!(result.output_columns, UPLOAD_COLUMNS.len());

    let output_path = result.output_path.unwrap();
    assert_eq!(
        output_path.file_name().unwrap().to_str().unwrap(),
        format!("BCBS_A1C_UPLOAD_{extract_date}.txt")
    );

    let contents = fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], UPLOAD_COLUMNS.join("|"));
    for line in &lines[1..] {
        let fields: Vec<&str> = line.split('|').collect();
        assert_eq!(fields.len(), UPLOAD_COLUMNS.len());
        assert_eq!(fields[0], extract_date);
        assert!(fields.contains(&"83036"));
        assert!(fields.contains(&"4548-4"));
        assert!(fields.contains(&"% Hgb"));
    }

    let row_one: Vec<&str> = lines[1].split('|').collect();
    let value_at = |name: &str| {
        let index = UPLOAD_COLUMNS.iter().position(|c| *c == name).unwrap();
        row_one[index]
    };
    assert_eq!(value_at("LabResult_Value"), "7.10");
    assert_eq!(value_at("Patient_DOB"), "03-14-2011");
    assert_eq!(value_at("LabOrder_Date"), "01-05-2026");
    // The analyte name column is required but never carried forward.
    assert!(!lines[1].contains("HGBA1C"));

    let row_two: Vec<&str> = lines[2].split('|').collect();
    let index = UPLOAD_COLUMNS
        .iter()
        .position(|c| *c == "LabResult_Value")
        .unwrap();
    assert_eq!(row_two[index], "60");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = write_a1c_export(dir.path());

    let result = run_convert(&convert_args(input.clone(), dir.path(), true)).unwrap();

    assert!(result.output_path.is_none());
    assert_eq!(result.output_rows, 2);
    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(entries, vec![input]);
}

#[test]
fn rerun_on_same_day_gets_suffixed_file() {
    let dir = tempdir().unwrap();
    let input = write_a1c_export(dir.path());

    let first = run_convert(&convert_args(input.clone(), dir.path(), false)).unwrap();
    let second = run_convert(&convert_args(input, dir.path(), false)).unwrap();

    let first_path = first.output_path.unwrap();
    let second_path = second.output_path.unwrap();
    assert_ne!(first_path, second_path);
    assert!(
        second_path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .ends_with("_2.txt")
    );
    assert!(first_path.exists());
    assert!(second_path.exists());
}

#[test]
fn unknown_marker_fails_classification() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("mystery.csv");
    fs::write(&file, "Quarterly Wellness Visits\npatientid\n1001\n").unwrap();

    let error = run_convert(&convert_args(file, dir.path(), false)).unwrap_err();

    assert!(format!("{error:#}").contains("Quarterly Wellness Visits"));
}

#[test]
fn blood_pressure_reports_are_not_convertible() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bp.csv");
    fs::write(
        &file,
        "Patients with elevated BP readings\npatientid,patient firstname\n1001,Ada\n",
    )
    .unwrap();

    let error = run_convert(&convert_args(file, dir.path(), false)).unwrap_err();

    assert!(format!("{error:#}").contains("bp"));
}
