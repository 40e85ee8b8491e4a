use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board of {rows}x{cols} cells is not allowed")]
    InvalidDimensions { rows: Coord, cols: Coord },
    #[error("Too many mines, requested {mines} but at most {max} fit")]
    TooManyMines { mines: CellCount, max: CellCount },
    #[error("Invalid coordinates {0:?}")]
    InvalidCoords(Coord2),
    #[error("Mine layout does not match the game configuration")]
    LayoutMismatch,
    #[error("Mine layout puts a mine at {0:?}, inside the first reveal's safe zone")]
    UnsafeLayout(Coord2),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

impl GameError {
    /// Whether the error was caused by an unusable board configuration.
    pub const fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::TooManyMines { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
