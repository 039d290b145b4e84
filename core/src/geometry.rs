use core::ops::{Add, Sub};
use serde::{Deserialize, Serialize};

use crate::*;

/// A pointer location in the UI's coordinate space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// On-screen layout of the board, supplied by the UI.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutGeometry {
    /// Top-left corner of the board element, padding included.
    pub origin: Point,
    pub cell_size: f64,
    pub gap: f64,
    pub padding: f64,
}

impl LayoutGeometry {
    pub fn new(origin: Point, cell_size: f64, gap: f64, padding: f64) -> Result<Self> {
        let geometry = Self {
            origin,
            cell_size,
            gap,
            padding,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<()> {
        let values = [
            self.origin.x,
            self.origin.y,
            self.cell_size,
            self.gap,
            self.padding,
        ];
        if values.iter().any(|v| !v.is_finite()) || self.pitch() <= 0.0 {
            return Err(GameError::InvalidGeometry);
        }
        Ok(())
    }

    pub const fn with_origin(self, origin: Point) -> Self {
        Self { origin, ..self }
    }

    /// Distance between the starts of two adjacent cells.
    pub fn pitch(&self) -> f64 {
        self.cell_size + self.gap
    }

    /// Nearest cell to `point`, clamped onto the board.
    pub fn cell_from_point(&self, point: Point) -> Coord2 {
        let relative = point - self.origin;
        let row = self.axis_index(relative.y);
        let col = self.axis_index(relative.x);
        (row, col)
    }

    /// Top-left corner of the cell at `coords`.
    pub fn cell_origin(&self, coords: Coord2) -> Point {
        let inset = |index: Coord| self.padding + f64::from(index) * self.pitch();
        Point::new(
            self.origin.x + inset(coords.1),
            self.origin.y + inset(coords.0),
        )
    }

    fn axis_index(&self, offset: f64) -> Coord {
        let scaled = (offset - self.padding - self.gap / 2.0) / self.pitch();
        let max = i64::from(GRID_SIZE - 1);
        // Clamped into 0..GRID_SIZE, so the narrowing cast is exact.
        round_half_up(scaled).clamp(0, max) as Coord
    }
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            cell_size: 40.0,
            gap: 7.2,
            padding: 16.0,
        }
    }
}

/// `floor(value + 0.5)`, the rounding browsers use; `core` has no float rounding.
fn round_half_up(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let shifted = value + 0.5;
    // Saturating cast; the caller clamps anyway.
    let truncated = shifted as i64;
    if (truncated as f64) > shifted {
        truncated - 1
    } else {
        truncated
    }
}
