use serde::{Deserialize, Serialize};

/// Fixed palette every piece color is drawn from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Amber,
    Violet,
}

impl Color {
    pub const PALETTE: [Self; 5] = [Self::Red, Self::Blue, Self::Green, Self::Amber, Self::Violet];

    pub const fn hex(self) -> &'static str {
        use Color::*;
        match self {
            Red => "#ef4444",
            Blue => "#3b82f6",
            Green => "#10b981",
            Amber => "#f59e0b",
            Violet => "#8b5cf6",
        }
    }
}

/// Content of one board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Filled(Color),
    /// Part of a completed row that is waiting for compaction.
    Flashing(Color),
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Filled(color) | Self::Flashing(color) => Some(color),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}
