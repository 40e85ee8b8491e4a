use serde::{Deserialize, Serialize};

use crate::*;

/// Cells kept free of mines around the first reveal.
pub const SAFE_ZONE_CELLS: CellCount = 9;

/// Board shape and mine count for a single game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// Smallest side accepted by [`GameConfig::custom`].
    pub const MIN_SIDE: Coord = 5;
    /// Largest row count accepted by [`GameConfig::custom`].
    pub const MAX_ROWS: Coord = 24;
    /// Largest column count accepted by [`GameConfig::custom`].
    pub const MAX_COLS: Coord = 50;

    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validates a configuration without clamping anything.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from raw user input, clamping every value into range.
    pub fn custom(rows: u32, cols: u32, mines: u32) -> Self {
        let rows = rows.clamp(Self::MIN_SIDE.into(), Self::MAX_ROWS.into()) as Coord;
        let cols = cols.clamp(Self::MIN_SIDE.into(), Self::MAX_COLS.into()) as Coord;
        let max_mines = Self::max_mines_for(rows, cols);
        let mines = mines.min(max_mines.into()) as CellCount;
        Self::new_unchecked(rows, cols, mines)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let max = self.max_mines();
        if self.mines > max {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                max,
            });
        }

        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn max_mines(&self) -> CellCount {
        Self::max_mines_for(self.rows, self.cols)
    }

    const fn max_mines_for(rows: Coord, cols: Coord) -> CellCount {
        mult(rows, cols).saturating_sub(SAFE_ZONE_CELLS)
    }

    pub const fn contains(&self, coords: Coord2) -> bool {
        coords.0 < self.rows && coords.1 < self.cols
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(10, 10, 10)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Custom { rows: u32, cols: u32, mines: u32 },
}

impl Difficulty {
    pub const PRESETS: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked(9, 9, 10),
            Self::Intermediate => GameConfig::new_unchecked(16, 16, 40),
            Self::Expert => GameConfig::new_unchecked(16, 30, 99),
            Self::Custom { rows, cols, mines } => GameConfig::custom(rows, cols, mines),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
            Self::Custom { .. } => "Custom",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}
