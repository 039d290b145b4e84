use crate::*;

/// Every top-left cell where `piece` currently fits, row-major.
pub fn legal_anchors<'a>(grid: &'a Grid, piece: &'a Piece) -> impl Iterator<Item = Coord2> + 'a {
    iter_cells().filter(move |&anchor| grid.can_place(piece, anchor))
}

/// Whether any of `pieces` fits anywhere on `grid`.
pub fn has_any_legal_move(grid: &Grid, pieces: &[Piece]) -> bool {
    pieces
        .iter()
        .any(|piece| legal_anchors(grid, piece).next().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tests::{grid_from, piece};
    use alloc::vec::Vec;

    /// Checkerboard of two colors: no row completes and no empty cell remains.
    const FULL: [&str; 10] = [
        "RBRBRBRBRB",
        "BRBRBRBRBR",
        "RBRBRBRBRB",
        "BRBRBRBRBR",
        "RBRBRBRBRB",
        "BRBRBRBRBR",
        "RBRBRBRBRB",
        "BRBRBRBRBR",
        "RBRBRBRBRB",
        "BRBRBRBRBR",
    ];

    #[test]
    fn empty_grid_fits_everything() {
        let grid = Grid::new();

        for shape in SHAPES {
            let piece = Piece::new(PieceId(0), shape, Color::Red);
            let expected =
                usize::from(11 - shape.width) * usize::from(11 - shape.height);
            assert_eq!(legal_anchors(&grid, &piece).count(), expected);
        }
    }

    #[test]
    fn isolated_holes_only_fit_single_cells() {
        let mut rows = FULL;
        rows[0] = ".BRBRBRBRB";
        rows[5] = "BRBRB.BRBR";
        let grid = grid_from(&rows);

        let single = piece(1, 1, Color::Green);
        let anchors: Vec<_> = legal_anchors(&grid, &single).collect();
        assert_eq!(anchors, [(0, 0), (5, 5)]);

        let pieces = [
            piece(2, 1, Color::Red),
            piece(1, 2, Color::Red),
            piece(3, 2, Color::Red),
        ];
        assert!(!has_any_legal_move(&grid, &pieces));
        assert!(has_any_legal_move(&grid, &[pieces[0], single, pieces[2]]));
    }

    #[test]
    fn full_grid_has_no_legal_move() {
        let grid = grid_from(&FULL);
        let pieces = [
            piece(1, 1, Color::Red),
            piece(1, 1, Color::Blue),
            piece(2, 2, Color::Red),
        ];

        assert!(!has_any_legal_move(&grid, &pieces));
    }

    #[test]
    fn empty_tray_has_no_legal_move() {
        assert!(!has_any_legal_move(&Grid::new(), &[]));
    }
}
