use serde::{Deserialize, Serialize};

/// What covers a cell from the player's point of view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cover {
    Hidden,
    Flagged,
    Revealed,
}

impl Default for Cover {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Engine-side record of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) adjacent: u8,
    pub(crate) cover: Cover,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    /// Mines among the 8 neighbors, only meaningful for non-mine cells.
    pub const fn adjacent(self) -> u8 {
        self.adjacent
    }

    pub const fn cover(self) -> Cover {
        self.cover
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.cover, Cover::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.cover, Cover::Flagged)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.cover, Cover::Hidden)
    }
}

/// Read-only view of a cell handed to the presentation layer.
///
/// `mine` is only known once the cell is revealed or the game is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub mine: Option<bool>,
    pub adjacent: Option<u8>,
    pub revealed: bool,
    pub flagged: bool,
}

impl CellView {
    pub(crate) fn new(cell: Cell, finished: bool) -> Self {
        let mine = (finished || cell.is_revealed()).then_some(cell.mine);
        let adjacent = (cell.is_revealed() && !cell.mine).then_some(cell.adjacent);
        Self {
            mine,
            adjacent,
            revealed: cell.is_revealed(),
            flagged: cell.is_flagged(),
        }
    }

    pub fn tile(self) -> Tile {
        use Tile::*;
        match (self.revealed, self.flagged, self.mine) {
            (true, _, Some(true)) => Exploded,
            (true, _, _) => Open(self.adjacent.unwrap_or_default()),
            (false, true, Some(false)) => IncorrectFlag,
            (false, true, _) => Flag,
            (false, false, Some(true)) => Mine,
            (false, false, _) => Closed,
        }
    }
}

/// Visual state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Closed,
    Open(u8),
    Flag,
    Exploded,
    Mine,
    IncorrectFlag,
}

impl Default for Tile {
    fn default() -> Self {
        Self::Closed
    }
}
