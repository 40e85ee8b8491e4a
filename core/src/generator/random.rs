use alloc::vec::Vec;

use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Shuffle every cell outside the safe zone and keep the first `mines`.
    Shuffle,
    /// Sample random cells, rejecting mines and safe-zone cells until enough are placed.
    Rejection,
}

impl Default for Placement {
    fn default() -> Self {
        Self::Shuffle
    }
}

/// Seeded generator, purely random apart from the safe zone around the first reveal.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
    placement: Placement,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_placement(seed, Placement::default())
    }

    pub fn with_placement(seed: u64, placement: Placement) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            placement,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    fn shuffled(&mut self, config: GameConfig, anchor: Coord2) -> Array2<bool> {
        let mut candidates: Vec<Coord2> = (0..config.rows)
            .flat_map(|row| (0..config.cols).map(move |col| (row, col)))
            .filter(|&coords| !in_safe_zone(anchor, coords))
            .collect();
        candidates.shuffle(&mut self.rng);

        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        for coords in candidates.into_iter().take(config.mines.into()) {
            mines[coords.to_nd_index()] = true;
        }
        mines
    }

    fn rejection_sampled(&mut self, config: GameConfig, anchor: Coord2) -> Array2<bool> {
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());

        // never loop forever when the board cannot hold the requested mines
        let free_cells = (0..config.rows)
            .flat_map(|row| (0..config.cols).map(move |col| (row, col)))
            .filter(|&coords| !in_safe_zone(anchor, coords))
            .count();
        let target = usize::from(config.mines).min(free_cells);

        let mut placed = 0;
        while placed < target {
            let coords = (
                self.rng.random_range(0..config.rows),
                self.rng.random_range(0..config.cols),
            );
            if mines[coords.to_nd_index()] || in_safe_zone(anchor, coords) {
                continue;
            }
            mines[coords.to_nd_index()] = true;
            placed += 1;
        }
        mines
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, anchor: Coord2) -> MineLayout {
        let mines = match self.placement {
            Placement::Shuffle => self.shuffled(config, anchor),
            Placement::Rejection => self.rejection_sampled(config, anchor),
        };
        let layout = MineLayout::from_mine_mask(mines);

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        layout
    }
}
