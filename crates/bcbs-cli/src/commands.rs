//! Command implementations: convert, kinds, percentile.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;
use serde::Serialize;
use tracing::{info, info_span};

use bcbs_ingest::classify_file;
use bcbs_model::{ReportKind, UPLOAD_COLUMNS};
use bcbs_output::write_upload;
use bcbs_transform::{bmi_percentile_for, transform};

use crate::cli::{ConvertArgs, PercentileArgs};
use crate::summary::apply_table_style;

/// Outcome of one conversion, for the summary surfaces.
#[derive(Debug, Serialize)]
pub struct ConvertResult {
    pub kind: ReportKind,
    pub input_file: PathBuf,
    pub input_rows: usize,
    pub output_rows: usize,
    pub output_columns: usize,
    /// Absent on dry runs.
    pub output_path: Option<PathBuf>,
}

/// Classify, transform, and write one uploaded report export.
pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let convert_span = info_span!("convert", file = %args.file.display());
    let _convert_guard = convert_span.enter();
    let extract_date = Local::now().date_naive();

    let classify_start = Instant::now();
    let (kind, table) = info_span!("classify")
        .in_scope(|| classify_file(&args.file))
        .with_context(|| format!("classify {}", args.file.display()))?;
    info!(
        kind = %kind,
        rows = table.row_count(),
        columns = table.headers.len(),
        duration_ms = classify_start.elapsed().as_millis(),
        "classify complete"
    );

    let transform_start = Instant::now();
    let upload = info_span!("transform", kind = %kind)
        .in_scope(|| transform(kind, &table, extract_date))
        .with_context(|| format!("transform {} report", kind.as_str()))?;
    info!(
        kind = %kind,
        rows = upload.row_count(),
        duration_ms = transform_start.elapsed().as_millis(),
        "transform complete"
    );

    let output_path = if args.dry_run {
        info!(kind = %kind, "output skipped (dry run)");
        None
    } else {
        let output_dir = output_dir_for(args);
        let output_start = Instant::now();
        let path = info_span!("output", kind = %kind)
            .in_scope(|| write_upload(&output_dir, kind, extract_date, &upload))
            .with_context(|| format!("write upload to {}", output_dir.display()))?;
        info!(
            kind = %kind,
            path = %path.display(),
            duration_ms = output_start.elapsed().as_millis(),
            "output complete"
        );
        Some(path)
    };

    Ok(ConvertResult {
        kind,
        input_file: args.file.clone(),
        input_rows: table.row_count(),
        output_rows: upload.row_count(),
        output_columns: UPLOAD_COLUMNS.len(),
        output_path,
    })
}

/// Default the output directory to the upload's own directory.
fn output_dir_for(args: &ConvertArgs) -> PathBuf {
    args.output_dir.clone().unwrap_or_else(|| {
        let parent = args.file.parent().unwrap_or(Path::new("."));
        if parent.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            parent.to_path_buf()
        }
    })
}

/// List report kinds with marker behavior and status.
pub fn run_kinds() {
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Description", "Status"]);
    apply_table_style(&mut table);
    for kind in ReportKind::ALL {
        let status = if kind.is_implemented() {
            "supported"
        } else {
            "not implemented"
        };
        table.add_row(vec![kind.as_str(), kind.description(), status]);
    }
    println!("{table}");
}

/// Resolve a BMI growth-chart percentile.
pub fn run_percentile(args: &PercentileArgs) -> Result<()> {
    let label = bmi_percentile_for(&args.gender, args.age_months, args.bmi)
        .context("percentile lookup")?;
    println!("{label}");
    Ok(())
}
