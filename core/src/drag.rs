use serde::{Deserialize, Serialize};

use crate::*;

/// A piece being carried by the pointer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Drag {
    pub piece: Piece,
    /// Pointer position relative to the piece's top-left corner when grabbed.
    pub pointer_offset: Point,
    /// Top-left corner of the floating piece.
    pub position: Point,
    /// Anchor the piece would drop onto, if that anchor is currently legal.
    pub preview: Option<Coord2>,
}

impl Drag {
    /// Last known pointer position.
    pub fn pointer(&self) -> Point {
        self.position + self.pointer_offset
    }

    /// Whether `coords` lies under the piece at its preview anchor.
    pub fn is_preview_cell(&self, coords: Coord2) -> bool {
        self.preview
            .is_some_and(|anchor| covers(&self.piece, anchor, coords))
    }
}

/// Whether `piece` anchored at `anchor` covers `coords`.
pub(crate) fn covers(piece: &Piece, anchor: Coord2, coords: Coord2) -> bool {
    let (row, col) = anchor;
    (row..row.saturating_add(piece.height())).contains(&coords.0)
        && (col..col.saturating_add(piece.width())).contains(&coords.1)
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
}

/// Where a released drag ends up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    Preview(Coord2),
    Snapped(Coord2),
    Nowhere,
}

impl DropTarget {
    pub const fn anchor(self) -> Option<Coord2> {
        match self {
            Self::Preview(anchor) | Self::Snapped(anchor) => Some(anchor),
            Self::Nowhere => None,
        }
    }
}

impl DragState {
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub const fn drag(&self) -> Option<&Drag> {
        match self {
            Self::Dragging(drag) => Some(drag),
            Self::Idle => None,
        }
    }

    /// Picks up `piece`, grabbed at `at` while its top-left corner is at `piece_origin`.
    ///
    /// Returns `false` without changing anything while another drag is active.
    pub fn begin(&mut self, piece: Piece, at: Point, piece_origin: Point) -> bool {
        if self.is_dragging() {
            return false;
        }
        *self = Self::Dragging(Drag {
            piece,
            pointer_offset: at - piece_origin,
            position: piece_origin,
            preview: None,
        });
        true
    }

    /// Moves the floating piece and recomputes the preview anchor.
    pub fn update(&mut self, at: Point, grid: &Grid, geometry: &LayoutGeometry) {
        let Self::Dragging(drag) = self else {
            return;
        };

        drag.position = at - drag.pointer_offset;
        let candidate = geometry.cell_from_point(at);
        let preview = grid.can_place(&drag.piece, candidate).then_some(candidate);
        if preview != drag.preview {
            log::trace!("preview {:?} -> {:?}", drag.preview, preview);
        }
        drag.preview = preview;
    }

    /// Ends the drag and decides where the piece lands.
    ///
    /// The state is always back to [`DragState::Idle`] afterwards.
    pub fn release(
        &mut self,
        at: Point,
        grid: &Grid,
        geometry: &LayoutGeometry,
    ) -> Option<(Piece, DropTarget)> {
        let Self::Dragging(drag) = core::mem::take(self) else {
            return None;
        };

        Some((drag.piece, resolve_drop(&drag, at, grid, geometry)))
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }
}

fn resolve_drop(drag: &Drag, at: Point, grid: &Grid, geometry: &LayoutGeometry) -> DropTarget {
    if let Some(anchor) = drag.preview {
        if grid.can_place(&drag.piece, anchor) {
            return DropTarget::Preview(anchor);
        }
    }

    let center = geometry.cell_from_point(at);
    SnapIter::new(center)
        .find(|&anchor| grid.can_place(&drag.piece, anchor))
        .map_or(DropTarget::Nowhere, DropTarget::Snapped)
}
