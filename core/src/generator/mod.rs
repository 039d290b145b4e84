use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;
pub use weighted::*;

mod weighted;

/// Maximum number of colors remembered by [`ColorHistory`].
pub const COLOR_HISTORY_LEN: usize = 3;

/// Recently issued palette colors, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorHistory {
    colors: VecDeque<Color>,
}

impl ColorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }

    /// Returns the history with `color` appended, evicting the oldest entry past the bound.
    pub fn pushed(mut self, color: Color) -> Self {
        self.colors.push_back(color);
        if self.colors.len() > COLOR_HISTORY_LEN {
            self.colors.pop_front();
        }
        self
    }
}

pub trait PieceGenerator {
    fn generate(&mut self, history: &ColorHistory) -> (Piece, ColorHistory);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn history_evicts_oldest_past_three() {
        let history = ColorHistory::new()
            .pushed(Color::Red)
            .pushed(Color::Blue)
            .pushed(Color::Green)
            .pushed(Color::Amber);

        let colors: Vec<_> = history.iter().collect();
        assert_eq!(colors, [Color::Blue, Color::Green, Color::Amber]);
    }

    #[test]
    fn history_keeps_repeated_colors() {
        let history = ColorHistory::new().pushed(Color::Red).pushed(Color::Red);

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(1), Some(Color::Red));
    }
}
