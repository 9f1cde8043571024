//! Per-frame output records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::family::AreaFamily;
use crate::quadrant::FrameAreaResult;

/// All families computed for one frame.
///
/// Families that failed for this frame are absent from `areas`; they are
/// never zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAreaRow {
    /// 1-based frame number.
    pub frame: u32,
    pub timestamp: Option<f64>,
    pub areas: BTreeMap<AreaFamily, FrameAreaResult>,
}

impl FrameAreaRow {
    pub fn new(frame: u32, timestamp: Option<f64>) -> Self {
        Self {
            frame,
            timestamp,
            areas: BTreeMap::new(),
        }
    }

    pub fn get(&self, family: AreaFamily) -> Option<&FrameAreaResult> {
        self.areas.get(&family)
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Flatten one family into its five output cells. `None` when the
    /// family was not computed for this frame.
    pub fn cells(&self, family: AreaFamily) -> Option<[f64; 5]> {
        self.get(family).map(|result| {
            let [q1, q2, q3, q4] = result.quadrants;
            [q1, q2, q3, q4, result.total]
        })
    }
}

/// Output header for the given families: `frame`, `timestamp`, then five
/// columns per family.
pub fn output_columns(families: &[AreaFamily]) -> Vec<String> {
    let mut columns = vec!["frame".to_string(), "timestamp".to_string()];
    for family in families {
        columns.extend(family.column_names());
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_columns_order() {
        let cols = output_columns(&[AreaFamily::QuadOuter, AreaFamily::BioOuter]);
        assert_eq!(cols.len(), 12);
        assert_eq!(cols[0], "frame");
        assert_eq!(cols[2], "QUAD_O_Q1");
        assert_eq!(cols[7], "BIO_O_Q1");
        assert_eq!(cols[11], "BIO_O_total");
    }

    #[test]
    fn test_cells_missing_family() {
        let mut row = FrameAreaRow::new(3, None);
        row.areas.insert(
            AreaFamily::QuadOuter,
            FrameAreaResult {
                quadrants: [1.0, 2.0, 3.0, 4.0],
                total: 10.0,
            },
        );
        assert_eq!(row.cells(AreaFamily::QuadOuter), Some([1.0, 2.0, 3.0, 4.0, 10.0]));
        assert_eq!(row.cells(AreaFamily::BioOuter), None);
    }
}
