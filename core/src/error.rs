use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board shape does not match the grid size")]
    InvalidBoardShape,
    #[error("Tray must hold exactly three pieces")]
    InvalidTraySize,
    #[error("Tray holds two pieces with the same id")]
    DuplicatePiece,
    #[error("Layout geometry must have a finite, positive cell pitch")]
    InvalidGeometry,
}

pub type Result<T> = core::result::Result<T, GameError>;
