use super::*;

/// Hands out a predetermined layout, ignoring the first reveal.
///
/// Useful for replays and for tests that need mines at known positions. The engine
/// still rejects the layout if it puts a mine next to the first reveal.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    layout: MineLayout,
}

impl FixedMinefieldGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::new)
    }

    /// Configuration matching the stored layout.
    pub fn game_config(&self) -> GameConfig {
        let (rows, cols) = self.layout.size();
        GameConfig::new_unchecked(rows, cols, self.layout.mine_count())
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, _config: GameConfig, _anchor: Coord2) -> MineLayout {
        self.layout.clone()
    }
}
