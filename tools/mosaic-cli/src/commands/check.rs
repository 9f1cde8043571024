//! Check an input table against the configured column layout.

use std::path::PathBuf;

use anyhow::Context;
use mosaic_common::config::AppConfig;
use mosaic_frame_model::{FrameTable, TIMESTAMP_COLUMN};

pub fn run(input: PathBuf, engine_config: Option<PathBuf>, app: &AppConfig) -> anyhow::Result<()> {
    let config = super::load_engine_config(engine_config, Vec::new(), app)?;
    let table = FrameTable::from_path(&input)
        .with_context(|| format!("Failed to read input table {}", input.display()))?;

    println!("MOSAIC Input Check");
    println!("{}", "=".repeat(50));
    println!("  File: {}", input.display());
    println!("  Rows: {}", table.len());
    println!("  Columns: {}", table.headers().len());
    if table.has_column(TIMESTAMP_COLUMN) {
        println!("[OK] Timestamp column present");
    } else {
        println!("[--] No timestamp column (output timestamps will be empty)");
    }

    let missing = config.layout.missing_columns(&table);
    println!();
    if missing.is_empty() {
        println!("All required columns are present.");
    } else {
        println!("Missing {} required column(s):", missing.len());
        for column in &missing {
            println!("  - {column}");
        }
        println!("\nFrames will be skipped for every family that needs these columns.");
    }

    Ok(())
}
