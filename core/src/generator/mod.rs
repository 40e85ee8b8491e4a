use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of mine layouts, consulted once per game on the first reveal.
pub trait MinefieldGenerator {
    /// Produces a layout for `config` that keeps the 3x3 block around `anchor` free of mines.
    fn generate(&mut self, config: GameConfig, anchor: Coord2) -> MineLayout;
}
