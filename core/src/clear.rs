use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Points awarded for every row removed by a compaction.
pub const ROW_SCORE: u32 = 100;

pub const fn score_for(rows: usize) -> u32 {
    ROW_SCORE.saturating_mul(rows as u32)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PassId(pub u32);

/// Rows marked as flashing together, waiting for compaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClearPass {
    pub id: PassId,
    rows: SmallVec<[Coord; 4]>,
}

impl ClearPass {
    /// Current positions of the marked rows.
    pub fn rows(&self) -> &[Coord] {
        &self.rows
    }
}

/// Clear passes that were marked but not yet compacted.
///
/// Row positions are kept current: when a compaction removes a row, every
/// pending row above it moves down by one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingClears {
    next_id: u32,
    passes: Vec<ClearPass>,
}

impl PendingClears {
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn passes(&self) -> &[ClearPass] {
        &self.passes
    }

    /// Marks every completed row of `grid` as flashing and records the pass.
    pub fn begin(&mut self, grid: &mut Grid) -> Option<&ClearPass> {
        let rows = grid.completed_rows();
        if rows.is_empty() {
            return None;
        }

        for &row in &rows {
            grid.mark_flashing(row);
        }

        let id = PassId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        log::debug!("clear pass {:?} marked rows {:?}", id, rows);

        self.passes.push(ClearPass {
            id,
            rows: rows.into_iter().collect(),
        });
        self.passes.last()
    }

    /// Removes the rows of pass `id`, highest first, inserting empty rows at the top.
    ///
    /// Returns the number of rows removed, or `None` for an unknown pass.
    pub fn compact(&mut self, grid: &mut Grid, id: PassId) -> Option<usize> {
        let index = self.passes.iter().position(|pass| pass.id == id)?;
        let mut pass = self.passes.remove(index);
        let count = pass.rows.len();

        pass.rows.sort_unstable_by(|a, b| b.cmp(a));
        for i in 0..pass.rows.len() {
            let removed = pass.rows[i];
            grid.remove_row(removed);

            let shift = |row: &mut Coord| {
                if *row < removed {
                    *row += 1;
                }
            };
            pass.rows[i + 1..].iter_mut().for_each(shift);
            self.passes
                .iter_mut()
                .flat_map(|other| other.rows.iter_mut())
                .for_each(shift);
        }

        log::debug!("clear pass {:?} compacted {} rows", id, count);
        Some(count)
    }

    pub fn clear(&mut self) {
        self.passes.clear();
    }
}
