use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;

use crate::*;

const SEEDS: u64 = 48;

fn configs() -> Vec<GameConfig> {
    let mut configs: Vec<_> = Difficulty::PRESETS.iter().map(|d| d.config()).collect();
    configs.push(GameConfig::new_unchecked(5, 5, 16));
    configs.push(GameConfig::custom(24, 50, 250));
    configs
}

fn all_coords(config: GameConfig) -> impl Iterator<Item = Coord2> {
    (0..config.rows).flat_map(move |row| (0..config.cols).map(move |col| (row, col)))
}

fn anchor_for(config: GameConfig, seed: u64) -> Coord2 {
    (
        (seed * 7 % u64::from(config.rows)) as Coord,
        (seed * 13 % u64::from(config.cols)) as Coord,
    )
}

fn started(config: GameConfig, seed: u64, placement: Placement) -> (BoardEngine, Coord2) {
    let generator = RandomMinefieldGenerator::with_placement(seed, placement);
    let mut engine = BoardEngine::with_generator(config, generator).unwrap();
    let anchor = anchor_for(config, seed);
    engine.reveal(anchor).unwrap();
    (engine, anchor)
}

fn revealed_set(engine: &BoardEngine) -> BTreeSet<Coord2> {
    all_coords(engine.config())
        .filter(|&pos| engine.cell_at(pos).is_revealed())
        .collect()
}

#[test]
fn placement_keeps_count_and_safe_zone() {
    for config in configs() {
        for seed in 0..SEEDS {
            for placement in [Placement::Shuffle, Placement::Rejection] {
                let (engine, anchor) = started(config, seed, placement);
                assert_eq!(engine.generator().placement(), placement);

                let mines: Vec<_> = all_coords(config)
                    .filter(|&pos| engine.cell_at(pos).is_mine())
                    .collect();
                assert_eq!(mines.len(), usize::from(config.mines), "{config:?} seed {seed}");
                assert!(
                    mines.iter().all(|&pos| !in_safe_zone(anchor, pos)),
                    "mine inside safe zone of {anchor:?} for {config:?} seed {seed}"
                );
            }
        }
    }
}

#[test]
fn adjacency_matches_brute_force() {
    for config in configs() {
        for seed in 0..SEEDS {
            let (engine, _) = started(config, seed, Placement::Shuffle);

            for pos in all_coords(config).filter(|&pos| !engine.cell_at(pos).is_mine()) {
                let expected = NeighborIter::new(pos, config.size())
                    .filter(|&n| engine.cell_at(n).is_mine())
                    .count();
                assert_eq!(usize::from(engine.cell_at(pos).adjacent()), expected, "{pos:?}");
            }
        }
    }
}

#[test]
fn first_reveal_opens_zero_component_and_its_border() {
    for config in configs() {
        for seed in 0..SEEDS {
            let (engine, anchor) = started(config, seed, Placement::Shuffle);
            assert_eq!(engine.cell_at(anchor).adjacent(), 0);

            let mut expected = BTreeSet::from([anchor]);
            let mut to_visit = VecDeque::from([anchor]);
            while let Some(pos) = to_visit.pop_front() {
                if engine.cell_at(pos).adjacent() != 0 {
                    continue;
                }
                for n in NeighborIter::new(pos, config.size()) {
                    if expected.insert(n) {
                        to_visit.push_back(n);
                    }
                }
            }

            assert_eq!(revealed_set(&engine), expected, "{config:?} seed {seed}");
            assert_eq!(usize::from(engine.revealed_count()), expected.len());
        }
    }
}

#[test]
fn win_exactly_when_all_safe_cells_revealed() {
    for seed in 0..SEEDS {
        let config = Difficulty::Beginner.config();
        let (mut engine, _) = started(config, seed, Placement::Shuffle);
        let mut seen = revealed_set(&engine);

        for pos in all_coords(config) {
            if engine.is_finished() {
                break;
            }
            if engine.cell_at(pos).is_mine() {
                continue;
            }

            let report = engine.reveal(pos).unwrap();
            let now = revealed_set(&engine);
            assert!(seen.is_subset(&now), "revealed cells must stay revealed");
            assert!(report.opened.iter().all(|p| !seen.contains(p)));
            seen = now;

            let all_safe = engine.revealed_count() == config.safe_cells();
            assert_eq!(engine.state() == GameState::Won, all_safe);
        }

        assert_eq!(engine.state(), GameState::Won);
        assert_eq!(engine.mines_left(), 0);
        assert!(engine.unrevealed_mines().iter().all(|&pos| engine.cell_at(pos).is_flagged()));
        assert!(!engine.is_timable());
    }
}

fn fixed(mines: &[Coord2]) -> BoardEngine<FixedMinefieldGenerator> {
    let generator = FixedMinefieldGenerator::from_mine_coords((5, 5), mines).unwrap();
    BoardEngine::with_generator(generator.game_config(), generator).unwrap()
}

fn assert_moves_rejected(engine: &mut BoardEngine<FixedMinefieldGenerator>) {
    let before = engine.summary();
    for _ in 0..3 {
        assert_eq!(engine.reveal((0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(engine.toggle_flag((0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(engine.chord_reveal((2, 2)), Err(GameError::AlreadyEnded));
    }
    assert_eq!(engine.summary(), before);
}

#[test]
fn terminal_state_is_idempotent() {
    let mut lost = fixed(&[(1, 2), (2, 1)]);
    lost.reveal((4, 4)).unwrap();
    assert_eq!(lost.state(), GameState::InProgress);
    lost.reveal((1, 2)).unwrap();
    assert_eq!(lost.state(), GameState::Lost);

    assert_moves_rejected(&mut lost);
    assert!(lost.cell_at((0, 0)).is_hidden());

    let mut won = fixed(&[(0, 0), (4, 4)]);
    won.reveal((2, 2)).unwrap();
    assert_eq!(won.state(), GameState::Won);

    assert_moves_rejected(&mut won);
    assert_eq!(won.mines_left(), 0);
    assert!(won.cell_at((0, 0)).is_flagged());
}

#[test]
fn flags_never_cause_a_loss() {
    let config = Difficulty::Expert.config();
    let (mut engine, _) = started(config, 11, Placement::Shuffle);

    let mines: Vec<_> = all_coords(config)
        .filter(|&pos| engine.cell_at(pos).is_mine())
        .collect();
    for pos in mines {
        assert_eq!(engine.toggle_flag(pos).unwrap(), FlagOutcome::Flagged);
    }
    assert_eq!(engine.state(), GameState::InProgress);
    assert_eq!(engine.mines_left(), 0);
}

#[test]
fn small_board_single_mine_lands_outside_safe_block() {
    let config = GameConfig::new(5, 5, 1).unwrap();
    for seed in 0..SEEDS {
        let mut engine = BoardEngine::new(config, seed).unwrap();
        let report = engine.reveal((2, 2)).unwrap();

        let mine = all_coords(config).find(|&pos| engine.cell_at(pos).is_mine()).unwrap();
        assert!(!(1..=3).contains(&mine.0) || !(1..=3).contains(&mine.1));
        assert!(matches!(report.state, GameState::InProgress | GameState::Won));
    }
}

#[test]
fn repeated_first_reveal_is_a_no_op() {
    let config = GameConfig::new(9, 9, 10).unwrap();
    for seed in 0..SEEDS {
        let mut engine = BoardEngine::new(config, seed).unwrap();
        engine.reveal((0, 0)).unwrap();
        let before = engine.summary();

        if !engine.is_finished() {
            let report = engine.reveal((0, 0)).unwrap();
            assert_eq!(report.outcome, RevealOutcome::NoChange);
        }
        assert_eq!(engine.summary(), before);
    }
}

#[test]
fn flag_toggle_before_first_reveal() {
    let mut engine = BoardEngine::new(GameConfig::new(9, 9, 10).unwrap(), 0).unwrap();

    assert_eq!(engine.toggle_flag((4, 4)).unwrap(), FlagOutcome::Flagged);
    assert!(engine.cell((4, 4)).unwrap().flagged);
    assert_eq!(engine.mines_left(), 9);

    assert_eq!(engine.toggle_flag((4, 4)).unwrap(), FlagOutcome::Unflagged);
    assert!(!engine.cell((4, 4)).unwrap().flagged);
    assert_eq!(engine.mines_left(), 10);
    assert_eq!(engine.state(), GameState::NotStarted);
}

#[test]
fn densest_board_leaves_only_the_safe_block() {
    let config = GameConfig::new(5, 5, 16).unwrap();
    for seed in 0..SEEDS {
        let mut engine = BoardEngine::new(config, seed).unwrap();
        let report = engine.reveal((2, 2)).unwrap();

        let mines = all_coords(config).filter(|&pos| engine.cell_at(pos).is_mine()).count();
        assert_eq!(mines, 16);
        assert_eq!(report.opened.len(), 9);
        assert_eq!(report.outcome, RevealOutcome::Won);
    }
}

#[test]
fn revealing_known_mine_reports_remaining_mines() {
    let mut engine = fixed(&[(0, 0), (0, 2), (0, 4), (4, 0), (4, 4)]);

    // (0, 1) and (0, 3) sit between mines and stay covered
    assert_eq!(engine.reveal((2, 2)).unwrap().opened.len(), 18);
    engine.toggle_flag((0, 1)).unwrap();
    let report = engine.reveal((4, 4)).unwrap();

    assert_eq!(report.outcome, RevealOutcome::HitMine);
    assert_eq!(engine.state(), GameState::Lost);
    assert_eq!(engine.triggered_mine(), Some((4, 4)));
    assert_eq!(engine.unrevealed_mines(), [(0, 0), (0, 2), (0, 4), (4, 0)]);
    assert_eq!(engine.misplaced_flags(), [(0, 1)]);
    assert_eq!(engine.cell((0, 1)).unwrap().tile(), Tile::IncorrectFlag);
    assert_eq!(engine.cell((0, 3)).unwrap().tile(), Tile::Closed);
    assert_eq!(engine.cell((0, 0)).unwrap().tile(), Tile::Mine);
    assert_eq!(engine.cell((4, 4)).unwrap().tile(), Tile::Exploded);
}

#[test]
fn new_game_replaces_finished_one() {
    let mut engine = BoardEngine::new(Difficulty::Expert.config(), 9).unwrap();
    engine.reveal((8, 15)).unwrap();
    let mine = all_coords(engine.config())
        .find(|&pos| engine.cell_at(pos).is_mine())
        .unwrap();
    engine.reveal(mine).unwrap();
    assert!(engine.is_finished());

    engine.start_game(Difficulty::Beginner.config()).unwrap();

    assert_eq!(engine.state(), GameState::NotStarted);
    assert_eq!(engine.size(), (9, 9));
    assert_eq!(engine.mines_left(), 10);
    assert!(all_coords(engine.config()).all(|pos| !engine.cell_at(pos).is_mine()));
    assert!(engine.reveal((8, 8)).unwrap().has_update());
    assert!(engine.is_timable() || engine.state() == GameState::Won);
}

#[test]
fn config_and_summary_serialize() {
    let difficulty: Difficulty =
        serde_json::from_str(r#"{"Custom":{"rows":30,"cols":3,"mines":500}}"#).unwrap();
    assert_eq!(difficulty.config(), GameConfig::new_unchecked(24, 5, 111));

    let config: GameConfig = serde_json::from_str(r#"{"rows":9,"cols":9,"mines":10}"#).unwrap();
    assert_eq!(config, Difficulty::Beginner.config());

    let engine = BoardEngine::new(config, 0).unwrap();
    let summary = serde_json::to_value(engine.summary()).unwrap();
    assert_eq!(summary["state"], "NotStarted");
    assert_eq!(summary["mines_left"], 10);
}
