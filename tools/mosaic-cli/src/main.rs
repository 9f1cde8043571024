//! MOSAIC CLI: per-frame lip quadrant areas.
//!
//! Usage:
//!   mosaic-area run <INPUT> -o <OUTPUT>     Compute areas for every frame
//!   mosaic-area inspect <INPUT> --frame N   Explain one frame's result
//!   mosaic-area check <INPUT>               Check an input table's columns

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mosaic_area_core::FrameRange;
use mosaic_common::config::AppConfig;
use mosaic_frame_model::AreaFamily;

mod commands;

#[derive(Parser)]
#[command(
    name = "mosaic-area",
    about = "Quadrant-based lip areas from fitted Bezier contours",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute quadrant areas for a range of frames
    Run {
        /// Input CSV with curve control points and landmarks
        input: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// First row to process (0-based, negative clamps to 0)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        start: i64,

        /// Row to stop before (0-based, exclusive). Defaults to the end.
        #[arg(long, allow_negative_numbers = true)]
        end: Option<i64>,

        /// Area family to compute: QUAD_O, QUAD_I, BIO_O, BIO_I (repeatable)
        #[arg(long = "family", value_name = "FAMILY")]
        families: Vec<AreaFamily>,

        /// Engine configuration JSON
        #[arg(long)]
        engine_config: Option<PathBuf>,

        /// Worker threads (default: all cores)
        #[arg(long)]
        threads: Option<usize>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,

        /// Write a JSON report of skipped frames
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show how one frame's areas are built
    Inspect {
        /// Input CSV
        input: PathBuf,

        /// 1-based frame number
        #[arg(long)]
        frame: u32,

        /// Area family to inspect (repeatable, default: all configured)
        #[arg(long = "family", value_name = "FAMILY")]
        families: Vec<AreaFamily>,

        /// Engine configuration JSON
        #[arg(long)]
        engine_config: Option<PathBuf>,
    },

    /// Check that an input table carries every required column
    Check {
        /// Input CSV
        input: PathBuf,

        /// Engine configuration JSON
        #[arg(long)]
        engine_config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app_config = AppConfig::load();

    let mut logging = app_config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    mosaic_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Run {
            input,
            output,
            start,
            end,
            families,
            engine_config,
            threads,
            force,
            report,
        } => commands::run::run(
            commands::run::RunArgs {
                input,
                output,
                range: FrameRange::from_signed(start, end),
                families,
                engine_config,
                threads,
                force,
                report,
            },
            &app_config,
        ),
        Commands::Inspect {
            input,
            frame,
            families,
            engine_config,
        } => commands::inspect::run(input, frame, families, engine_config, &app_config),
        Commands::Check {
            input,
            engine_config,
        } => commands::check::run(input, engine_config, &app_config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_accepts_negative_start() {
        let cli = Cli::try_parse_from([
            "mosaic-area", "run", "in.csv", "-o", "out.csv", "--start", "-3", "--end", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { start, end, .. } => {
                assert_eq!(start, -3);
                assert_eq!(FrameRange::from_signed(start, end), FrameRange::new(0, Some(10)));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_parses_families() {
        let cli = Cli::try_parse_from([
            "mosaic-area", "run", "in.csv", "-o", "out.csv", "--family", "BIO_O", "--family", "QUAD_I",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { families, start, .. } => {
                assert_eq!(families, vec![AreaFamily::BioOuter, AreaFamily::QuadInner]);
                assert_eq!(start, 0);
            }
            _ => panic!("expected run"),
        }
    }
}
