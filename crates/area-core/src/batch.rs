//! Per-frame batch execution.
//!
//! Frames are independent, so the runner fans them out over a rayon pool
//! and merges results by frame number. A failure in one frame never
//! touches another: it is recorded as a [`SkippedFrame`] and the batch
//! carries on.

use std::cell::OnceCell;
use std::ops::Range;

use mosaic_common::error::{MosaicError, MosaicResult};
use mosaic_frame_model::{AreaFamily, FrameAreaRow, FrameRow, FrameTable, LipSegment};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bio_frame::{BioFrameTransform, CoordinateFrame};
use crate::config::AreaConfig;
use crate::error::{AreaError, AreaResult, SkipReason};
use crate::quadrant_area::QuadrantAreaEngine;

/// Rows to process: 0-based, `end` exclusive. `None` runs to the end of
/// the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl FrameRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// Range from signed bounds, as given on a command line. Negative
    /// bounds clamp to row 0.
    pub fn from_signed(start: i64, end: Option<i64>) -> Self {
        let clamp = |bound: i64| usize::try_from(bound).unwrap_or(0);
        Self {
            start: clamp(start),
            end: end.map(clamp),
        }
    }

    /// Row indices inside a table of `len` rows. Out-of-range bounds are
    /// clamped; an inverted range is empty.
    pub fn clamp(&self, len: usize) -> Range<usize> {
        let end = self.end.map_or(len, |end| end.min(len));
        let start = self.start.min(end);
        start..end
    }
}

/// A (frame, family) pair the engine could not compute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedFrame {
    pub frame: u32,
    pub family: AreaFamily,
    pub reason: SkipReason,
    pub detail: String,
}

impl SkippedFrame {
    fn new(frame: u32, family: AreaFamily, error: &AreaError) -> Self {
        Self {
            frame,
            family,
            reason: error.reason(),
            detail: error.to_string(),
        }
    }
}

/// Result of computing a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    /// `None` when every requested family failed.
    pub row: Option<FrameAreaRow>,
    pub skipped: Vec<SkippedFrame>,
}

/// Result of a whole batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BatchOutput {
    /// Ascending by frame. Frames with no computable family are absent.
    pub rows: Vec<FrameAreaRow>,
    pub skipped: Vec<SkippedFrame>,
    pub frames_processed: usize,
}

pub struct AreaBatchRunner {
    config: AreaConfig,
    engine: QuadrantAreaEngine,
    bio: BioFrameTransform,
    pool: Option<rayon::ThreadPool>,
}

impl AreaBatchRunner {
    /// Runner on rayon's global pool.
    pub fn new(config: AreaConfig) -> Self {
        Self {
            engine: QuadrantAreaEngine::new(config.geometry),
            bio: BioFrameTransform::new(config.bio),
            config,
            pool: None,
        }
    }

    /// Use a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> MosaicResult<Self> {
        if threads == 0 {
            return Err(MosaicError::config("thread count must be >= 1"));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| MosaicError::processing(format!("failed to build thread pool: {e}")))?;
        self.pool = Some(pool);
        Ok(self)
    }

    pub fn config(&self) -> &AreaConfig {
        &self.config
    }

    pub fn engine(&self) -> &QuadrantAreaEngine {
        &self.engine
    }

    /// Lip segments of the contour `family` reads.
    pub fn segments(&self, row: &FrameRow<'_>, family: AreaFamily) -> AreaResult<Vec<LipSegment>> {
        Ok(self.config.layout.curves(family.contour()).extract(row)?)
    }

    /// The bio frame for one row.
    pub fn bio_frame(&self, row: &FrameRow<'_>) -> AreaResult<CoordinateFrame> {
        let landmarks = self.config.layout.landmarks.extract(row)?;
        self.bio.from_landmarks(&landmarks)
    }

    /// Every configured family for one frame.
    pub fn compute_frame(&self, row: &FrameRow<'_>) -> FrameOutcome {
        let frame = row.frame();
        let mut areas = FrameAreaRow::new(frame, row.timestamp());
        let mut skipped = Vec::new();
        let bio_frame = OnceCell::new();

        for &family in &self.config.families {
            let computed = if family.is_bio() {
                match bio_frame.get_or_init(|| self.bio_frame(row)) {
                    Ok(coords) => self
                        .segments(row, family)
                        .map(|segments| self.engine.bio(&segments, coords)),
                    Err(err) => {
                        tracing::debug!(frame, family = %family, error = %err, "Skipping bio family");
                        skipped.push(SkippedFrame::new(frame, family, err));
                        continue;
                    }
                }
            } else {
                self.segments(row, family)
                    .map(|segments| self.engine.axis_aligned(&segments))
            };

            match computed {
                Ok(result) => {
                    areas.areas.insert(family, result);
                }
                Err(err) => {
                    tracing::debug!(frame, family = %family, error = %err, "Skipping family");
                    skipped.push(SkippedFrame::new(frame, family, &err));
                }
            }
        }

        FrameOutcome {
            row: (!areas.is_empty()).then_some(areas),
            skipped,
        }
    }

    /// Compute every frame in `range`.
    pub fn run(&self, table: &FrameTable, range: FrameRange) -> BatchOutput {
        let rows = range.clamp(table.len());
        if rows.is_empty() {
            tracing::info!(
                start = range.start,
                end = ?range.end,
                table_rows = table.len(),
                "Frame range is empty, nothing to compute"
            );
            return BatchOutput::default();
        }

        let frames_processed = rows.len();
        let compute = || {
            rows.into_par_iter()
                .filter_map(|idx| table.row(idx))
                .map(|row| self.compute_frame(&row))
                .collect::<Vec<_>>()
        };
        let outcomes = match &self.pool {
            Some(pool) => pool.install(compute),
            None => compute(),
        };

        let mut output = BatchOutput {
            frames_processed,
            ..BatchOutput::default()
        };
        for outcome in outcomes {
            output.rows.extend(outcome.row);
            output.skipped.extend(outcome.skipped);
        }
        output.rows.sort_by_key(|row| row.frame);
        output
            .skipped
            .sort_by(|a, b| (a.frame, a.family).cmp(&(b.frame, b.family)));

        tracing::info!(
            frames = frames_processed,
            rows = output.rows.len(),
            skipped = output.skipped.len(),
            "Area batch complete"
        );
        if !output.skipped.is_empty() {
            let frames_affected = output
                .skipped
                .iter()
                .map(|s| s.frame)
                .collect::<std::collections::BTreeSet<_>>()
                .len();
            tracing::warn!(
                skipped = output.skipped.len(),
                frames_affected,
                "Some frames could not be computed for every family"
            );
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_clamp() {
        assert_eq!(FrameRange::all().clamp(10), 0..10);
        assert_eq!(FrameRange::new(3, Some(7)).clamp(10), 3..7);
        assert_eq!(FrameRange::new(3, Some(70)).clamp(10), 3..10);
        assert_eq!(FrameRange::new(30, None).clamp(10), 10..10);
        assert!(FrameRange::new(7, Some(3)).clamp(10).is_empty());
        assert!(FrameRange::all().clamp(0).is_empty());
    }

    #[test]
    fn test_negative_bounds_clamp_to_zero() {
        assert_eq!(FrameRange::from_signed(-5, None), FrameRange::all());
        assert_eq!(FrameRange::from_signed(-5, Some(4)).clamp(10), 0..4);
        assert!(FrameRange::from_signed(2, Some(-1)).clamp(10).is_empty());
        assert_eq!(FrameRange::from_signed(3, Some(7)), FrameRange::new(3, Some(7)));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let result = AreaBatchRunner::new(AreaConfig::default()).with_threads(0);
        assert!(matches!(result, Err(MosaicError::Config { .. })));
    }

    #[test]
    fn test_empty_range_yields_empty_output() {
        let table = FrameTable::from_reader("a,b\n1,2\n".as_bytes()).unwrap();
        let runner = AreaBatchRunner::new(AreaConfig::default());
        let output = runner.run(&table, FrameRange::new(5, None));
        assert_eq!(output, BatchOutput::default());
    }

    #[test]
    fn test_missing_columns_skip_every_family() {
        let table = FrameTable::from_reader("a,b\n1,2\n3,4\n".as_bytes()).unwrap();
        let runner = AreaBatchRunner::new(AreaConfig::default());
        let output = runner.run(&table, FrameRange::all());
        assert!(output.rows.is_empty());
        assert_eq!(output.frames_processed, 2);
        assert_eq!(output.skipped.len(), 8);
        assert!(output
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::MalformedInput));
        assert_eq!(output.skipped[0].frame, 1);
        assert_eq!(output.skipped[4].frame, 2);
    }
}
