//! Compute quadrant areas for a frame table.

use std::path::{Path, PathBuf};

use anyhow::Context;
use mosaic_area_core::{AreaBatchRunner, FrameRange, SkippedFrame};
use mosaic_common::config::AppConfig;
use mosaic_common::error::{MosaicError, MosaicResult};
use mosaic_frame_model::{output_columns, AreaFamily, FrameAreaRow, FrameTable};
use serde::Serialize;

pub struct RunArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub range: FrameRange,
    pub families: Vec<AreaFamily>,
    pub engine_config: Option<PathBuf>,
    pub threads: Option<usize>,
    pub force: bool,
    pub report: Option<PathBuf>,
}

/// Summary written alongside the area table.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    generated_at: String,
    input: &'a Path,
    output: &'a Path,
    families: &'a [AreaFamily],
    frames_processed: usize,
    rows_written: usize,
    skipped: &'a [SkippedFrame],
}

pub fn run(args: RunArgs, app: &AppConfig) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        return Err(MosaicError::AlreadyExists { path: args.output }.into());
    }

    let config = super::load_engine_config(args.engine_config, args.families, app)?;
    let families = config.families.clone();

    println!("Reading frames from: {}", args.input.display());
    let table = FrameTable::from_path(&args.input)
        .with_context(|| format!("Failed to read input table {}", args.input.display()))?;
    println!("  Rows: {}", table.len());

    let missing = config.layout.missing_columns(&table);
    if !missing.is_empty() {
        tracing::warn!(
            count = missing.len(),
            first = %missing[0],
            "Input table is missing required columns; affected families will be skipped"
        );
    }

    let mut runner = AreaBatchRunner::new(config);
    if let Some(threads) = args.threads.or(app.processing.threads) {
        runner = runner.with_threads(threads)?;
    }

    let output = runner.run(&table, args.range);

    write_area_table(&args.output, &families, &output.rows)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "  Wrote {} of {} frames to: {}",
        output.rows.len(),
        output.frames_processed,
        args.output.display()
    );

    if let Some(report_path) = &args.report {
        let report = RunReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            input: &args.input,
            output: &args.output,
            families: &families,
            frames_processed: output.frames_processed,
            rows_written: output.rows.len(),
            skipped: &output.skipped,
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(report_path, json)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
        println!("  Report: {}", report_path.display());
    }

    if !output.skipped.is_empty() {
        println!(
            "\n{} (frame, family) pair(s) skipped. Rerun with --report for details.",
            output.skipped.len()
        );
    }

    Ok(())
}

/// Write rows as CSV: `frame`, `timestamp`, then five cells per family.
/// Families a frame did not produce are left empty.
pub fn write_area_table(
    path: &Path,
    families: &[AreaFamily],
    rows: &[FrameAreaRow],
) -> MosaicResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(output_columns(families))?;

    for row in rows {
        let mut record = Vec::with_capacity(2 + families.len() * 5);
        record.push(row.frame.to_string());
        record.push(row.timestamp.map(|t| t.to_string()).unwrap_or_default());
        for &family in families {
            match row.cells(family) {
                Some(cells) => record.extend(cells.iter().map(f64::to_string)),
                None => record.extend(std::iter::repeat(String::new()).take(5)),
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
