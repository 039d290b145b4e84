use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Chance of reusing a remembered color instead of drawing from the palette.
pub const REUSE_PROBABILITY: f64 = 0.8;

/// Picks a piece color, biased toward colors in `history`.
///
/// A reused color leaves the history untouched; a fresh palette draw is
/// appended to it.
pub fn pick_color<R: Rng + ?Sized>(rng: &mut R, history: &ColorHistory) -> (Color, ColorHistory) {
    if !history.is_empty() && rng.random::<f64>() < REUSE_PROBABILITY {
        let index = rng.random_range(0..history.len());
        if let Some(color) = history.get(index) {
            return (color, history.clone());
        }
    }

    let color = Color::PALETTE[rng.random_range(0..Color::PALETTE.len())];
    (color, history.clone().pushed(color))
}

/// Generation strategy drawing shapes uniformly and colors through [`pick_color`].
#[derive(Clone, Debug)]
pub struct WeightedGenerator {
    rng: SmallRng,
    next_id: u32,
}

impl WeightedGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            next_id: 0,
        }
    }
}

impl PieceGenerator for WeightedGenerator {
    fn generate(&mut self, history: &ColorHistory) -> (Piece, ColorHistory) {
        let shape = SHAPES[self.rng.random_range(0..SHAPES.len())];
        let (color, history) = pick_color(&mut self.rng, history);

        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        log::trace!("generated piece {:?}: {:?} {:?}", id, shape, color);
        (Piece::new(id, shape, color), history)
    }
}
