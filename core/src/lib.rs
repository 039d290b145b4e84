#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use clear::*;
pub use drag::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use geometry::*;
pub use grid::*;
pub use piece::*;
pub use schedule::*;
pub use session::*;
pub use snapshot::*;
pub use terminal::*;
pub use types::*;

mod cell;
mod clear;
mod drag;
mod engine;
mod error;
mod generator;
mod geometry;
mod grid;
mod piece;
mod schedule;
mod session;
mod snapshot;
mod terminal;
mod types;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub seed: u64,
    #[serde(default)]
    pub timing: ClearTiming,
    #[serde(default)]
    pub geometry: LayoutGeometry,
}

impl EngineConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()
    }
}
