use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The `GRID_SIZE × GRID_SIZE` board, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new() -> Self {
        let size = usize::from(GRID_SIZE);
        Self {
            cells: Array2::default((size, size)),
        }
    }

    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        let size = usize::from(GRID_SIZE);
        if cells.dim() != (size, size) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Whether `piece` fits with its top-left corner on `anchor`.
    pub fn can_place(&self, piece: &Piece, anchor: Coord2) -> bool {
        let (row, col) = anchor;
        if u16::from(row) + u16::from(piece.height()) > u16::from(GRID_SIZE)
            || u16::from(col) + u16::from(piece.width()) > u16::from(GRID_SIZE)
        {
            return false;
        }

        piece
            .footprint(anchor)
            .all(|index| self.cells[index].is_empty())
    }

    /// Fills the cells under `piece`. Callers check [`Grid::can_place`] first.
    pub fn place(&mut self, piece: &Piece, anchor: Coord2) {
        debug_assert!(self.can_place(piece, anchor));
        for index in piece.footprint(anchor) {
            if let Some(cell) = self.cells.get_mut(index) {
                *cell = Cell::Filled(piece.color);
            }
        }
    }

    /// Rows with no gap whose cells all share one color. Flashing rows do not count.
    pub fn completed_rows(&self) -> Vec<Coord> {
        self.cells
            .rows()
            .into_iter()
            .enumerate()
            .filter(|(_, row)| {
                let Some(&Cell::Filled(color)) = row.iter().next() else {
                    return false;
                };
                row.iter().all(|&cell| cell == Cell::Filled(color))
            })
            .filter_map(|(index, _)| Coord::try_from(index).ok())
            .collect()
    }

    pub fn has_completed_rows(&self) -> bool {
        !self.completed_rows().is_empty()
    }

    pub(crate) fn mark_flashing(&mut self, row: Coord) {
        for cell in self.cells.row_mut(row.into()) {
            if let Cell::Filled(color) = *cell {
                *cell = Cell::Flashing(color);
            }
        }
    }

    /// Deletes `row` and inserts a fresh empty row at the top.
    pub(crate) fn remove_row(&mut self, row: Coord) {
        let row = usize::from(row);
        let size = usize::from(GRID_SIZE);
        for r in (1..=row).rev() {
            for c in 0..size {
                self.cells[[r, c]] = self.cells[[r - 1, c]];
            }
        }
        self.cells.row_mut(0).fill(Cell::Empty);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
