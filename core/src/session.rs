use alloc::vec::Vec;

use crate::*;

/// Result of asking the session to place a tray piece.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlaceOutcome {
    NoChange,
    Placed(Piece),
}

impl PlaceOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Placed(_))
    }
}

/// Board, tray, and score of one game, plus the generator that refills the tray.
#[derive(Clone, Debug)]
pub struct Session<G = WeightedGenerator> {
    grid: Grid,
    tray: Tray,
    history: ColorHistory,
    clears: PendingClears,
    score: u32,
    started: bool,
    game_over: bool,
    generator: G,
}

impl<G: PieceGenerator> Session<G> {
    /// A session showing the pre-start screen.
    pub fn new(generator: G) -> Self {
        Self {
            grid: Grid::new(),
            tray: Tray::empty(),
            history: ColorHistory::new(),
            clears: PendingClears::default(),
            score: 0,
            started: false,
            game_over: false,
            generator,
        }
    }

    /// A running session restored from an existing board and tray.
    pub fn from_parts(grid: Grid, pieces: &[Piece], score: u32, generator: G) -> Result<Self> {
        Ok(Self {
            grid,
            tray: Tray::from_pieces(pieces)?,
            history: ColorHistory::new(),
            clears: PendingClears::default(),
            score,
            started: true,
            game_over: false,
            generator,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    pub fn color_history(&self) -> &ColorHistory {
        &self.history
    }

    pub fn pending_clears(&self) -> &PendingClears {
        &self.clears
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Started and not yet over: placements and drags are accepted.
    pub fn is_active(&self) -> bool {
        self.started && !self.game_over
    }

    pub fn start(&mut self) {
        self.grid = Grid::new();
        self.clears.clear();
        self.score = 0;
        self.history = ColorHistory::new();
        self.tray.clear();
        for _ in 0..TRAY_SIZE {
            let piece = self.next_piece();
            self.tray.push(piece);
        }
        self.started = true;
        self.game_over = false;
        log::debug!("game started with tray {:?}", self.tray.pieces());
    }

    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.clears.clear();
        self.score = 0;
        self.history = ColorHistory::new();
        self.tray.clear();
        self.started = false;
        self.game_over = false;
        log::debug!("game reset");
    }

    /// Places tray piece `id` at `anchor` and refills the tray.
    pub fn place(&mut self, id: PieceId, anchor: Coord2) -> PlaceOutcome {
        if !self.is_active() {
            return PlaceOutcome::NoChange;
        }
        let Some(&piece) = self.tray.get(id) else {
            log::warn!("piece {:?} is not in the tray", id);
            return PlaceOutcome::NoChange;
        };
        if !self.grid.can_place(&piece, anchor) {
            return PlaceOutcome::NoChange;
        }

        self.grid.place(&piece, anchor);
        let replacement = self.next_piece();
        self.tray.replace(id, replacement);
        log::debug!("placed {:?} at {:?}", piece, anchor);
        PlaceOutcome::Placed(piece)
    }

    /// Marks completed rows as flashing. Returns the new pass and its row count.
    pub fn begin_clear(&mut self) -> Option<(PassId, usize)> {
        self.clears
            .begin(&mut self.grid)
            .map(|pass| (pass.id, pass.rows().len()))
    }

    /// Removes the rows of pass `id` and awards their score.
    pub fn compact(&mut self, id: PassId) -> Option<usize> {
        let rows = self.clears.compact(&mut self.grid, id)?;
        self.score = self.score.saturating_add(score_for(rows));
        Some(rows)
    }

    /// Ends the game when no tray piece fits. Returns whether the game is over.
    pub fn evaluate_terminal(&mut self) -> bool {
        if self.is_active() && !has_any_legal_move(&self.grid, self.tray.pieces()) {
            log::debug!("no legal move left, score {}", self.score);
            self.game_over = true;
        }
        self.game_over
    }

    pub fn legal_anchors(&self, id: PieceId) -> Vec<Coord2> {
        self.tray
            .get(id)
            .map(|piece| legal_anchors(&self.grid, piece).collect())
            .unwrap_or_default()
    }

    fn next_piece(&mut self) -> Piece {
        let (piece, history) = self.generator.generate(&self.history);
        self.history = history;
        piece
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::grid::tests::grid_from;
    use alloc::collections::VecDeque;

    /// Hands out queued pieces, then 1x1 red ones.
    #[derive(Clone, Debug)]
    pub(crate) struct ScriptedGenerator {
        queue: VecDeque<(Shape, Color)>,
        next_id: u32,
    }

    impl ScriptedGenerator {
        pub(crate) fn new(pieces: &[(Shape, Color)]) -> Self {
            Self {
                queue: pieces.iter().copied().collect(),
                next_id: 100,
            }
        }
    }

    impl PieceGenerator for ScriptedGenerator {
        fn generate(&mut self, history: &ColorHistory) -> (Piece, ColorHistory) {
            let (shape, color) = self
                .queue
                .pop_front()
                .unwrap_or((Shape::new(1, 1), Color::Red));
            let id = PieceId(self.next_id);
            self.next_id += 1;
            (Piece::new(id, shape, color), history.clone().pushed(color))
        }
    }

    pub(crate) fn tray_piece(id: u32, width: Coord, height: Coord, color: Color) -> Piece {
        Piece::new(PieceId(id), Shape::new(width, height), color)
    }

    pub(crate) fn session_with(rows: &[&str], pieces: &[Piece]) -> Session<ScriptedGenerator> {
        Session::from_parts(grid_from(rows), pieces, 0, ScriptedGenerator::new(&[])).unwrap()
    }

    fn default_tray() -> [Piece; 3] {
        [
            tray_piece(1, 1, 1, Color::Red),
            tray_piece(2, 1, 2, Color::Red),
            tray_piece(3, 2, 2, Color::Blue),
        ]
    }

    #[test]
    fn start_fills_tray_and_resets_state() {
        let mut session = Session::new(WeightedGenerator::new(1));
        assert!(!session.is_started());

        session.start();

        assert!(session.is_active());
        assert_eq!(session.tray().len(), TRAY_SIZE);
        assert_eq!(session.score(), 0);
        assert!(session.grid().cells().iter().all(|cell| cell.is_empty()));
        assert!(!session.color_history().is_empty());
    }

    #[test]
    fn restart_forgets_the_previous_color_history() {
        for seed in 0..50 {
            let mut session = Session::new(WeightedGenerator::new(seed));
            session.start();
            for anchor in [(0, 0), (4, 0), (0, 5), (5, 5)] {
                let id = session.tray().pieces()[0].id;
                session.place(id, anchor);
            }

            session.start();

            let tray_colors: Vec<_> = session.tray().pieces().iter().map(|p| p.color).collect();
            let history = session.color_history();
            assert!(!history.is_empty());
            assert!(history.len() <= TRAY_SIZE);
            assert!(
                history.iter().all(|color| tray_colors.contains(&color)),
                "seed {seed}: history {history:?} outlived the restart, tray {tray_colors:?}"
            );
        }
    }

    #[test]
    fn place_fills_cells_and_replaces_piece_at_the_end() {
        let mut session = session_with(&[], &default_tray());

        let outcome = session.place(PieceId(1), (0, 0));

        assert!(outcome.has_update());
        assert_eq!(session.grid()[(0, 0)], Cell::Filled(Color::Red));
        assert_eq!(session.score(), 0);
        let ids: Vec<_> = session.tray().pieces().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, [2, 3, 100]);
    }

    #[test]
    fn place_rejects_overlap_and_unknown_pieces() {
        let mut session = session_with(&["R........."], &default_tray());
        let before = session.grid().clone();

        assert_eq!(session.place(PieceId(1), (0, 0)), PlaceOutcome::NoChange);
        assert_eq!(session.place(PieceId(9), (5, 5)), PlaceOutcome::NoChange);
        assert_eq!(session.grid(), &before);
        assert_eq!(session.tray().len(), 3);
    }

    #[test]
    fn completing_a_row_scores_after_compaction() {
        let mut session = session_with(&["RRRRRRRRR."], &default_tray());

        session.place(PieceId(1), (0, 9));
        assert!(session.grid().has_completed_rows());

        let (pass, rows) = session.begin_clear().unwrap();
        assert_eq!(rows, 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.grid()[(0, 9)], Cell::Flashing(Color::Red));

        assert_eq!(session.compact(pass), Some(1));
        assert_eq!(session.score(), 100);
        assert!(session.grid().rows()[0].iter().all(|cell| cell.is_empty()));
        assert!(session.pending_clears().is_empty());
    }

    #[test]
    fn mixed_color_row_is_not_cleared() {
        let mut session = session_with(&["RRRRBRRRR."], &default_tray());

        session.place(PieceId(1), (0, 9));

        assert!(!session.grid().has_completed_rows());
        assert_eq!(session.begin_clear(), None);
    }

    #[test]
    fn terminal_state_ends_the_game() {
        let full = [
            "RBRBRBRBRB",
            "BRBRBRBRBR",
            "RBRBRBRBRB",
            "BRBRBRBRBR",
            "RBRBRBRBRB",
            "BRBRBRBRBR",
            "RBRBRBRBRB",
            "BRBRBRBRBR",
            "RBRBRBRBRB",
            "BRBRBRBR..",
        ];
        let tray = [
            tray_piece(1, 3, 2, Color::Red),
            tray_piece(2, 1, 2, Color::Red),
            tray_piece(3, 2, 2, Color::Blue),
        ];
        let mut session = session_with(&full, &tray);

        assert!(session.evaluate_terminal());
        assert!(session.is_game_over());
        assert_eq!(session.place(PieceId(1), (0, 0)), PlaceOutcome::NoChange);
    }

    #[test]
    fn reset_returns_to_pre_start_and_is_idempotent() {
        let mut session = session_with(&["RRRR......"], &default_tray());

        session.reset();
        let once = (
            session.grid().clone(),
            session.tray().clone(),
            session.score(),
            session.is_started(),
            session.is_game_over(),
        );
        session.reset();
        let twice = (
            session.grid().clone(),
            session.tray().clone(),
            session.score(),
            session.is_started(),
            session.is_game_over(),
        );

        assert_eq!(once, twice);
        assert!(!session.is_started());
        assert!(session.tray().is_empty());
    }

    #[test]
    fn legal_anchors_lists_fits_for_a_tray_piece() {
        let session = session_with(&[], &default_tray());

        assert_eq!(session.legal_anchors(PieceId(3)).len(), 81);
        assert!(session.legal_anchors(PieceId(42)).is_empty());
    }
}
