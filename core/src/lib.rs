#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::BitOr;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use tile::*;
pub use types::*;

mod config;
mod engine;
mod error;
mod generator;
mod layout;
mod tile;
mod types;

#[cfg(test)]
mod properties;

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Flag state of the cell after the toggle
    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    /// Change applied to the mines-left counter
    pub const fn mines_left_delta(self) -> i32 {
        match self {
            Self::NoChange => 0,
            Self::Flagged => -1,
            Self::Unflagged => 1,
        }
    }
}

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when revealing several cells at once
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            // hitting a mine has priority
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            // then winning
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Result of a reveal, with every cell it uncovered for incremental redraws.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    pub state: GameState,
    pub opened: Vec<Coord2>,
}

impl RevealReport {
    pub(crate) fn unchanged(state: GameState) -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            state,
            opened: Vec::new(),
        }
    }

    pub fn has_update(&self) -> bool {
        self.outcome.has_update()
    }
}
