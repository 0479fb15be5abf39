use cubepath_core::{validate, Cell, Dims};
use cubepath_search::{
    analyze, analyze_dims, select, Backtracking, CancelToken, Color, CompleteStrategy, Greedy,
    Mode, SearchContext, SearchOptions, Snake, Strategy,
};
use cubepath_test_utils::{assert_full_cover, assert_simple_path, dims_range, grid};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

fn construct(
    strategy: &dyn Strategy,
    g: &cubepath_grid::Grid,
    start: Cell,
    mode: Mode,
    opts: &SearchOptions,
    seed: u64,
) -> Vec<Cell> {
    let cancel = CancelToken::new();
    let ctx = SearchContext::new(g, start, mode, opts, &cancel);
    strategy
        .construct(&ctx, &mut ChaCha8Rng::seed_from_u64(seed))
        .cells
}

#[test]
fn cube_3_corner_scenario() {
    let g = grid(3, 3, 3);
    let start = Cell::new(0, 0, 0);
    let verdict = analyze(&g, &start);
    assert!(verdict.can_generate);
    assert_eq!(verdict.start_color, Color::Even);
    assert_eq!(verdict.majority, Some(verdict.start_color));

    let opts = SearchOptions::default();
    for strategy in [&Snake as &dyn Strategy, &Backtracking] {
        let cells = construct(strategy, &g, start, Mode::Complete, &opts, 42);
        assert_eq!(cells.len(), 27, "{} fell short", strategy.name());
        assert_full_cover(&g, start, &cells);
    }
}

#[test]
fn balanced_2x2x3_scenario() {
    // 12 cells, 6 of each color: no slab rule applies and every start is
    // allowed, so every start must yield a full cover.
    let g = grid(2, 2, 3);
    let opts = SearchOptions::default();
    for start in g.cells() {
        let verdict = analyze(&g, &start);
        assert!(verdict.can_generate);
        assert_eq!(verdict.message, "any cell may start");
        let cells = construct(&Snake, &g, start, Mode::Complete, &opts, 1);
        assert_full_cover(&g, start, &cells);
    }
}

#[test]
fn slab_rule_applies_to_raw_dims() {
    for (w, h, d, expected) in [
        (1, 3, 4, false),
        (1, 2, 3, false),
        (5, 1, 2, false),
        (1, 1, 4, false),
        (3, 3, 1, false),
        (2, 2, 1, true),
        (4, 1, 2, true),
    ] {
        let verdict = analyze_dims(&Dims::new(w, h, d), &Cell::new(0, 0, 0));
        assert_eq!(verdict.can_generate, expected, "{w}x{h}x{d}");
    }
}

#[test]
fn snake_covers_every_feasible_start_on_small_boxes() {
    let opts = SearchOptions::default();
    for dims in dims_range(2, 6) {
        let g = cubepath_grid::Grid::new(dims).unwrap();
        for start in g.cells() {
            if !analyze(&g, &start).can_generate {
                continue;
            }
            let cells = construct(&Snake, &g, start, Mode::Complete, &opts, 2024);
            assert_full_cover(&g, start, &cells);
        }
    }
}

#[test]
fn snake_covers_interior_starts_on_larger_cubes() {
    let opts = SearchOptions::default();
    for (size, start) in [
        (4, Cell::new(1, 0, 0)),
        (6, Cell::new(3, 2, 2)),
        (8, Cell::new(4, 1, 6)),
    ] {
        let g = grid(size, size, size);
        for seed in 0..4 {
            let cells = construct(&Snake, &g, start, Mode::Complete, &opts, seed);
            assert_eq!(cells.len(), g.cell_count(), "{size}^3 from {start}");
            assert_full_cover(&g, start, &cells);
        }
    }
}

#[test]
fn complete_strategy_selection_honours_options() {
    let g = grid(3, 3, 3);
    let start = Cell::new(2, 2, 2);
    let opts = SearchOptions::default().with_complete_strategy(CompleteStrategy::Greedy);
    let strategy = select(Mode::Complete, &opts);
    assert_eq!(strategy.name(), Greedy.name());
    let cells = construct(strategy.as_ref(), &g, start, Mode::Complete, &opts, 9);
    assert_simple_path(&g, start, &cells);
}

fn strategy_for(index: usize) -> &'static dyn Strategy {
    match index {
        0 => &Backtracking,
        1 => &Greedy,
        _ => &Snake,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(160))]

    #[test]
    fn every_constructor_returns_a_simple_path(
        w in 2u32..7, h in 2u32..7, d in 2u32..7,
        x in 0i32..6, y in 0i32..6, z in 0i32..6,
        which in 0usize..3,
        complete in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let g = grid(w, h, d);
        let start = Cell::new(x % w as i32, y % h as i32, z % d as i32);
        let mode = if complete { Mode::Complete } else { Mode::Random };
        let opts = SearchOptions::default()
            .with_backtrack_timeout(Duration::from_millis(100));
        let cells = construct(strategy_for(which), &g, start, mode, &opts, seed);
        prop_assert_eq!(cells[0], start);
        prop_assert!(validate(&cells).is_ok());
        prop_assert!(cells.iter().all(|c| g.contains(c)));
        // Validation never mutates a valid path.
        let copy = cells.clone();
        let _ = validate(&cells);
        prop_assert_eq!(copy, cells);
    }
}
