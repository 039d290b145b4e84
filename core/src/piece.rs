use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Rectangle extents of a piece, `width` columns by `height` rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub width: Coord,
    pub height: Coord,
}

impl Shape {
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self { width, height }
    }

    pub const fn area(self) -> u16 {
        self.width as u16 * self.height as u16
    }
}

/// Every shape the generator can hand out.
pub const SHAPES: [Shape; 6] = [
    Shape::new(1, 1),
    Shape::new(2, 1),
    Shape::new(1, 2),
    Shape::new(2, 2),
    Shape::new(3, 1),
    Shape::new(3, 2),
];

/// Identity of one generated piece, unique within a generator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// A solid rectangle of a single color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub shape: Shape,
    pub color: Color,
}

impl Piece {
    pub const fn new(id: PieceId, shape: Shape, color: Color) -> Self {
        Self { id, shape, color }
    }

    pub const fn width(&self) -> Coord {
        self.shape.width
    }

    pub const fn height(&self) -> Coord {
        self.shape.height
    }

    /// The `height × width` color matrix of the piece.
    pub fn cells(&self) -> Array2<Color> {
        Array2::from_elem(
            (self.shape.height.into(), self.shape.width.into()),
            self.color,
        )
    }

    /// Board cells covered when the top-left corner sits on `anchor`.
    pub fn footprint(&self, anchor: Coord2) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (row, col) = (usize::from(anchor.0), usize::from(anchor.1));
        let (width, height) = (usize::from(self.width()), usize::from(self.height()));
        (row..row + height).flat_map(move |r| (col..col + width).map(move |c| (r, c)))
    }
}

pub const TRAY_SIZE: usize = 3;

/// Pieces currently on offer. Holds [`TRAY_SIZE`] pieces while a game runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tray {
    pieces: SmallVec<[Piece; TRAY_SIZE]>,
}

impl Tray {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pieces(pieces: &[Piece]) -> Result<Self> {
        if pieces.len() != TRAY_SIZE {
            return Err(GameError::InvalidTraySize);
        }
        for (i, piece) in pieces.iter().enumerate() {
            if pieces[i + 1..].iter().any(|other| other.id == piece.id) {
                return Err(GameError::DuplicatePiece);
            }
        }
        Ok(Self {
            pieces: pieces.iter().copied().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id == id)
    }

    pub(crate) fn push(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    pub(crate) fn clear(&mut self) {
        self.pieces.clear();
    }

    /// Removes the piece with `id` and appends `replacement` at the end.
    pub(crate) fn replace(&mut self, id: PieceId, replacement: Piece) -> Option<Piece> {
        let index = self.pieces.iter().position(|piece| piece.id == id)?;
        let removed = self.pieces.remove(index);
        self.pieces.push(replacement);
        Some(removed)
    }
}
