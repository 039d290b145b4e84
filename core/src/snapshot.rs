use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// The dragged piece as the UI needs to draw it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragView {
    pub piece: Piece,
    pub position: Point,
    pub preview: Option<Coord2>,
    /// Every anchor where the piece currently fits, for a drop-zone overlay.
    pub legal_anchors: Vec<Coord2>,
}

/// Read-only picture of the engine for rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub started: bool,
    pub game_over: bool,
    pub score: u32,
    pub grid: Vec<Vec<Cell>>,
    pub tray: Vec<Piece>,
    pub drag: Option<DragView>,
}

impl Snapshot {
    pub fn from_engine<G: PieceGenerator>(engine: &PuzzleEngine<G>) -> Self {
        let session = engine.session();
        let drag = engine.drag().drag().map(|drag| DragView {
            piece: drag.piece,
            position: drag.position,
            preview: drag.preview,
            legal_anchors: legal_anchors(session.grid(), &drag.piece).collect(),
        });

        Self {
            started: session.is_started(),
            game_over: session.is_game_over(),
            score: session.score(),
            grid: session.grid().rows(),
            tray: session.tray().pieces().to_vec(),
            drag,
        }
    }

    /// Whether `coords` lies under the preview rectangle of the dragged piece.
    pub fn is_preview_cell(&self, coords: Coord2) -> bool {
        self.drag.as_ref().is_some_and(|drag| {
            drag.preview
                .is_some_and(|anchor| crate::drag::covers(&drag.piece, anchor, coords))
        })
    }
}
