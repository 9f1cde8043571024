//! Explain one frame: every split piece, its quadrant, and its area.

use std::path::PathBuf;

use anyhow::Context;
use mosaic_area_core::{AreaBatchRunner, CoordinateFrame};
use mosaic_common::config::AppConfig;
use mosaic_frame_model::{AreaFamily, FrameTable};

pub fn run(
    input: PathBuf,
    frame: u32,
    families: Vec<AreaFamily>,
    engine_config: Option<PathBuf>,
    app: &AppConfig,
) -> anyhow::Result<()> {
    let config = super::load_engine_config(engine_config, families, app)?;
    let table = FrameTable::from_path(&input)
        .with_context(|| format!("Failed to read input table {}", input.display()))?;
    let row = table
        .frame(frame)
        .ok_or_else(|| anyhow::anyhow!("Frame {frame} not found ({} rows)", table.len()))?;

    let runner = AreaBatchRunner::new(config);
    let engine = runner.engine();

    println!("Frame {frame}");
    if let Some(ts) = row.timestamp() {
        println!("  Timestamp: {ts}");
    }

    for &family in &runner.config().families {
        println!();
        println!("{family}:");

        let segments = match runner.segments(&row, family) {
            Ok(segments) => segments,
            Err(e) => {
                println!("  Skipped: {e}");
                continue;
            }
        };

        let coords = if family.is_bio() {
            match runner.bio_frame(&row) {
                Ok(coords) => {
                    println!(
                        "  Bio frame: det = {:.6}, origin = ({:.3}, {:.3})",
                        coords.determinant(),
                        coords.origin().x,
                        coords.origin().y
                    );
                    coords
                }
                Err(e) => {
                    println!("  Skipped: {e}");
                    continue;
                }
            }
        } else {
            CoordinateFrame::identity()
        };

        for segment in &segments {
            let curve = coords.map_curve(&segment.curve);
            println!("  {}:", segment.region.code());
            for piece in engine.pieces(&curve) {
                let start = piece.curve.start();
                let end = piece.curve.end();
                let quadrant = piece
                    .quadrant
                    .map(|q| format!("Q{}", q.number()))
                    .unwrap_or_else(|| "--".to_string());
                println!(
                    "    {quadrant}  ({:.4}, {:.4}) -> ({:.4}, {:.4})  signed area {:.6}",
                    start.x, start.y, end.x, end.y, piece.signed_area
                );
            }
        }

        let result = if family.is_bio() {
            engine.bio(&segments, &coords)
        } else {
            engine.axis_aligned(&segments)
        };
        let [q1, q2, q3, q4] = result.quadrants;
        println!(
            "  Q1 {q1:.4}  Q2 {q2:.4}  Q3 {q3:.4}  Q4 {q4:.4}  total {:.4}",
            result.total
        );
    }

    Ok(())
}
