//! Quadrants and per-quadrant area accumulation.

use serde::{Deserialize, Serialize};

use crate::point::Point2D;

/// A quadrant of the active coordinate frame, numbered counter-clockwise
/// from `+x, +y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Q1, Quadrant::Q2, Quadrant::Q3, Quadrant::Q4];

    /// Quadrant containing `point`, or `None` when either coordinate is
    /// within `epsilon` of an axis.
    pub fn containing(point: Point2D, epsilon: f64) -> Option<Quadrant> {
        let Point2D { x, y } = point;
        if !(x.abs() > epsilon && y.abs() > epsilon) {
            return None;
        }
        Some(match (x > 0.0, y > 0.0) {
            (true, true) => Quadrant::Q1,
            (false, true) => Quadrant::Q2,
            (false, false) => Quadrant::Q3,
            (true, false) => Quadrant::Q4,
        })
    }

    /// Quadrant number, 1 to 4.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Slot index, 0 to 3.
    pub fn index(self) -> usize {
        match self {
            Self::Q1 => 0,
            Self::Q2 => 1,
            Self::Q3 => 2,
            Self::Q4 => 3,
        }
    }
}

/// Signed area accumulated per quadrant, before taking absolute values.
///
/// Every slot starts at `0.0`, so a quadrant that received no pieces
/// still reports an area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadrantAreas {
    slots: [f64; 4],
}

impl QuadrantAreas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, quadrant: Quadrant, area: f64) {
        self.slots[quadrant.index()] += area;
    }

    pub fn get(&self, quadrant: Quadrant) -> f64 {
        self.slots[quadrant.index()]
    }

    /// Multiply every slot by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        for slot in &mut self.slots {
            *slot *= factor;
        }
        self
    }

    /// Take absolute values and total them.
    pub fn finish(self) -> FrameAreaResult {
        let quadrants = self.slots.map(f64::abs);
        FrameAreaResult {
            quadrants,
            total: quadrants.iter().sum(),
        }
    }
}

/// Final per-frame, per-family area: absolute area per quadrant and their
/// sum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameAreaResult {
    /// Areas for Q1..Q4, in that order.
    pub quadrants: [f64; 4],
    pub total: f64,
}

impl FrameAreaResult {
    pub fn get(&self, quadrant: Quadrant) -> f64 {
        self.quadrants[quadrant.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_by_sign() {
        assert_eq!(Quadrant::containing(Point2D::new(1.0, 1.0), 1e-12), Some(Quadrant::Q1));
        assert_eq!(Quadrant::containing(Point2D::new(-1.0, 1.0), 1e-12), Some(Quadrant::Q2));
        assert_eq!(Quadrant::containing(Point2D::new(-1.0, -1.0), 1e-12), Some(Quadrant::Q3));
        assert_eq!(Quadrant::containing(Point2D::new(1.0, -1.0), 1e-12), Some(Quadrant::Q4));
    }

    #[test]
    fn test_containing_rejects_axis_points() {
        assert_eq!(Quadrant::containing(Point2D::new(0.0, 1.0), 1e-12), None);
        assert_eq!(Quadrant::containing(Point2D::new(1.0, 1e-13), 1e-12), None);
        assert_eq!(Quadrant::containing(Point2D::new(f64::NAN, 1.0), 1e-12), None);
    }

    #[test]
    fn test_numbers_and_indices() {
        let numbers: Vec<u8> = Quadrant::ALL.iter().map(|q| q.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        for (idx, q) in Quadrant::ALL.iter().enumerate() {
            assert_eq!(q.index(), idx);
        }
    }

    #[test]
    fn test_empty_buckets_default_to_zero() {
        let result = QuadrantAreas::new().finish();
        assert_eq!(result.quadrants, [0.0; 4]);
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn test_finish_sums_absolute_values() {
        let mut areas = QuadrantAreas::new();
        areas.add(Quadrant::Q1, 2.0);
        areas.add(Quadrant::Q1, -0.5);
        areas.add(Quadrant::Q3, -3.0);

        let result = areas.scaled(2.0).finish();
        assert!((result.get(Quadrant::Q1) - 3.0).abs() < 1e-12);
        assert_eq!(result.get(Quadrant::Q2), 0.0);
        assert!((result.get(Quadrant::Q3) - 6.0).abs() < 1e-12);
        assert!((result.total - 9.0).abs() < 1e-12);
    }
}
