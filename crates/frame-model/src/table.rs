//! The per-frame input table.
//!
//! One CSV row per video frame, with curve control points and raw
//! landmark coordinates in named columns. Row `i` (0-based) is frame
//! `i + 1`.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::{ModelError, ModelResult};

/// Column carrying the frame timestamp, when present.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// An in-memory frame table with column lookup by name.
#[derive(Debug, Clone)]
pub struct FrameTable {
    headers: Vec<String>,
    columns: HashMap<String, usize>,
    /// Kept as bytes so one undecodable cell only fails its own frame.
    records: Vec<csv::ByteRecord>,
}

impl FrameTable {
    /// Read a headered CSV. Cells and headers are whitespace-trimmed.
    pub fn from_reader<R: Read>(reader: R) -> ModelResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        let records = reader.byte_records().collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            headers,
            columns,
            records,
        })
    }

    pub fn from_path(path: &Path) -> ModelResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of frame rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row at 0-based `index`.
    pub fn row(&self, index: usize) -> Option<FrameRow<'_>> {
        (index < self.records.len()).then_some(FrameRow { table: self, index })
    }

    /// Row for 1-based `frame`.
    pub fn frame(&self, frame: u32) -> Option<FrameRow<'_>> {
        (frame as usize).checked_sub(1).and_then(|idx| self.row(idx))
    }
}

/// A borrowed view of one frame row.
#[derive(Debug, Clone, Copy)]
pub struct FrameRow<'a> {
    table: &'a FrameTable,
    index: usize,
}

impl<'a> FrameRow<'a> {
    /// 0-based row index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based frame number.
    pub fn frame(&self) -> u32 {
        self.index as u32 + 1
    }

    fn cell(&self, column: &str) -> Option<&'a [u8]> {
        let idx = *self.table.columns.get(column)?;
        self.table.records[self.index].get(idx)
    }

    /// Raw cell text, if the column exists, the row is long enough and
    /// the cell is valid UTF-8.
    pub fn raw(&self, column: &str) -> Option<&'a str> {
        self.cell(column)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Numeric value of a required column.
    ///
    /// An absent column, an empty cell, or a non-finite value counts as
    /// missing.
    pub fn value(&self, column: &str) -> ModelResult<f64> {
        self.optional_value(column)?
            .ok_or_else(|| ModelError::MissingColumn {
                column: column.to_string(),
                frame: self.frame(),
            })
    }

    /// Numeric value of an optional column. Unparsable or undecodable
    /// text is still an error.
    pub fn optional_value(&self, column: &str) -> ModelResult<Option<f64>> {
        let Some(bytes) = self.cell(column) else {
            return Ok(None);
        };
        let raw = std::str::from_utf8(bytes).map_err(|_| ModelError::InvalidValue {
            column: column.to_string(),
            frame: self.frame(),
            value: String::from_utf8_lossy(bytes).into_owned(),
        })?;
        if raw.is_empty() {
            return Ok(None);
        }
        let value: f64 = raw.parse().map_err(|_| ModelError::InvalidValue {
            column: column.to_string(),
            frame: self.frame(),
            value: raw.to_string(),
        })?;
        Ok(value.is_finite().then_some(value))
    }

    /// Timestamp column, if present and numeric.
    pub fn timestamp(&self) -> Option<f64> {
        self.optional_value(TIMESTAMP_COLUMN).ok().flatten()
    }
}
