/// Single coordinate axis used for grid rows, columns, and piece extents.
pub type Coord = u8;

/// Two-dimensional grid coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Side length of the square board.
pub const GRID_SIZE: Coord = 10;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Iterates every cell of the board in row-major order.
pub fn iter_cells() -> impl Iterator<Item = Coord2> {
    (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
}

/// Snap search offsets, scanned row-major with the center included.
const SNAP_DISPLACEMENTS: [(i8, i8); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains on the board.
fn apply_delta(coords: Coord2, delta: (i8, i8)) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= GRID_SIZE {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= GRID_SIZE {
        return None;
    }

    Some((next_row, next_col))
}

/// The 3×3 block of on-board cells around a center, used as the drop fallback.
#[derive(Debug)]
pub struct SnapIter {
    center: Coord2,
    index: u8,
}

impl SnapIter {
    pub fn new(center: Coord2) -> Self {
        Self { center, index: 0 }
    }
}

impl Iterator for SnapIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= SNAP_DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, SNAP_DISPLACEMENTS[self.index as usize]);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
