use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for the first reveal, no mines placed yet
    NotStarted,
    /// Mines placed and game running
    InProgress,
    /// Every safe cell revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Aggregate numbers for the HUD.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub state: GameState,
    /// Mines minus flags, negative when the player over-flags.
    pub mines_left: i32,
    pub revealed_count: CellCount,
    pub flagged_count: CellCount,
}

/// Owns all game-logic state for one board, from configuration to outcome.
#[derive(Clone, Debug)]
pub struct BoardEngine<G = RandomMinefieldGenerator> {
    config: GameConfig,
    generator: G,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl BoardEngine<RandomMinefieldGenerator> {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed))
    }
}

impl<G: MinefieldGenerator> BoardEngine<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            cells: Array2::default(config.size().to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
            triggered_mine: None,
        })
    }

    /// Discards the current board and waits for the first reveal of a new one.
    pub fn start_game(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.reset(config);
        Ok(())
    }

    /// Starts a new game with the current configuration.
    pub fn restart(&mut self) {
        self.reset(self.config);
    }

    fn reset(&mut self, config: GameConfig) {
        log::debug!(
            "New game {}x{} with {} mines",
            config.rows,
            config.cols,
            config.mines
        );
        self.config = config;
        self.cells = Array2::default(config.size().to_nd_index());
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.state = GameState::NotStarted;
        self.triggered_mine = None;
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Whether a game clock should be running.
    pub fn is_timable(&self) -> bool {
        matches!(self.state, GameState::InProgress)
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// How many mines have not been flagged yet, may go negative
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn summary(&self) -> Summary {
        Summary {
            state: self.state,
            mines_left: self.mines_left(),
            revealed_count: self.revealed_count,
            flagged_count: self.flagged_count,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Raw engine record, mine included. Panics on out-of-bounds coordinates.
    pub(crate) fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    /// Player-facing view of a cell.
    pub fn cell(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(CellView::new(self.cell_at(coords), self.is_finished()))
    }

    /// Mines that are still covered, for showing the whole field after a loss.
    pub fn unrevealed_mines(&self) -> Vec<Coord2> {
        self.collect_coords(|cell| cell.is_mine() && !cell.is_revealed())
    }

    /// Flags placed on cells without a mine.
    pub fn misplaced_flags(&self) -> Vec<Coord2> {
        self.collect_coords(|cell| !cell.is_mine() && cell.is_flagged())
    }

    fn collect_coords(&self, predicate: impl Fn(Cell) -> bool) -> Vec<Coord2> {
        self.cells
            .indexed_iter()
            .filter(|&(_, &cell)| predicate(cell))
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.config.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords(coords))
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = &mut self.cells[coords.to_nd_index()];
        Ok(match cell.cover {
            Cover::Hidden => {
                cell.cover = Cover::Flagged;
                self.flagged_count += 1;
                FlagOutcome::Flagged
            }
            Cover::Flagged => {
                cell.cover = Cover::Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Unflagged
            }
            Cover::Revealed => FlagOutcome::NoChange,
        })
    }

    /// Reveal a hidden cell, flood-filling from it when it has no adjacent mines.
    ///
    /// The first reveal of a game places the mines around it.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        if !self.cell_at(coords).is_hidden() {
            return Ok(RevealReport::unchanged(self.state));
        }

        if self.state.is_initial() {
            self.place_mines(coords)?;
        }

        let mut opened = Vec::new();
        let outcome = self.reveal_single_cell(coords, &mut opened);
        Ok(RevealReport {
            outcome,
            state: self.state,
            opened,
        })
    }

    pub fn can_chord_reveal_at(&self, coords: Coord2) -> bool {
        if self.state.is_finished() || !self.config.contains(coords) {
            return false;
        }

        let cell = self.cell_at(coords);
        cell.is_revealed() && cell.adjacent() == self.count_flagged_neighbors(coords)
    }

    /// Reveal a cell, or when it is a satisfied number, all of its unflagged neighbors.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.cell_at(coords);
        if cell.is_hidden() {
            return self.reveal(coords);
        }
        if !self.can_chord_reveal_at(coords) {
            return Ok(RevealReport::unchanged(self.state));
        }

        let mut opened = Vec::new();
        let mut outcome = RevealOutcome::NoChange;
        for pos in self.cells.iter_neighbors(coords) {
            if self.state.is_finished() {
                break;
            }
            outcome = outcome | self.reveal_single_cell(pos, &mut opened);
        }

        Ok(RevealReport {
            outcome,
            state: self.state,
            opened,
        })
    }

    fn place_mines(&mut self, anchor: Coord2) -> Result<()> {
        let layout = self.generator.generate(self.config, anchor);
        if !layout.matches(&self.config) {
            log::warn!(
                "Rejected layout of size {:?} with {} mines for {:?}",
                layout.size(),
                layout.mine_count(),
                self.config
            );
            return Err(GameError::LayoutMismatch);
        }
        if let Some(mine) = layout.iter_mines().find(|&mine| in_safe_zone(anchor, mine)) {
            log::warn!("Rejected layout with a mine at {:?} next to {:?}", mine, anchor);
            return Err(GameError::UnsafeLayout(mine));
        }

        for mine in layout.iter_mines() {
            self.cells[mine.to_nd_index()].mine = true;
            for pos in self.cells.iter_neighbors(mine) {
                let neighbor = &mut self.cells[pos.to_nd_index()];
                if !neighbor.mine {
                    neighbor.adjacent += 1;
                }
            }
        }

        self.state = GameState::InProgress;
        log::debug!(
            "Placed {} mines around first reveal at {:?}",
            layout.mine_count(),
            anchor
        );
        Ok(())
    }

    fn reveal_single_cell(&mut self, coords: Coord2, opened: &mut Vec<Coord2>) -> RevealOutcome {
        let cell = self.cell_at(coords);

        match (cell.cover, cell.mine) {
            (Cover::Hidden, true) => {
                self.open(coords, opened);
                self.triggered_mine = Some(coords);
                self.end_game(false);
                RevealOutcome::HitMine
            }
            (Cover::Hidden, false) => {
                self.open(coords, opened);

                if cell.adjacent == 0 {
                    let mut to_visit = VecDeque::from([coords]);
                    log::trace!("Starting flood-fill from {:?}", coords);

                    while let Some(visit_coords) = to_visit.pop_front() {
                        for pos in self.cells.iter_neighbors(visit_coords) {
                            // revealed cells are done, flagged cells stay put
                            let neighbor = self.cell_at(pos);
                            if !neighbor.is_hidden() {
                                continue;
                            }
                            debug_assert!(!neighbor.mine, "zero cell next to a mine at {pos:?}");

                            self.open(pos, opened);
                            if neighbor.adjacent == 0 {
                                to_visit.push_back(pos);
                            }
                        }
                    }
                }

                if self.revealed_count == self.config.safe_cells() {
                    self.end_game(true);
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Revealed
                }
            }
            _ => RevealOutcome::NoChange,
        }
    }

    fn open(&mut self, coords: Coord2, opened: &mut Vec<Coord2>) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.cover = Cover::Revealed;
        self.revealed_count += 1;
        opened.push(coords);
        log::trace!("Opened cell at {:?}, mine count: {}", coords, cell.adjacent);
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            GameState::Won
        } else {
            GameState::Lost
        };

        if won {
            self.triggered_mine = None;
            // remaining mines get flagged so the counter settles at zero
            for cell in self.cells.iter_mut() {
                if cell.mine && cell.is_hidden() {
                    cell.cover = Cover::Flagged;
                    self.flagged_count += 1;
                }
            }
        }
        log::debug!("Game ended, won: {}", won);
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cell_at(pos).is_flagged())
            .count() as u8
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
