//! Planner tests - placement search over rotations and columns

use proptest::prelude::*;

use autotris::core::{
    choose_best_placement, choose_best_placement_with, evaluate, rotations, Grid, GridFeatures,
    Weights, GRID_SIZE,
};
use autotris::types::{PieceKind, EMPTY};

#[test]
fn test_o_rests_on_floor_of_empty_grid() {
    let mut grid = Grid::new();
    let p = choose_best_placement(&mut grid, PieceKind::O).expect("placement");

    assert_eq!(p.rotation, 0);
    assert_eq!(p.y, 14);
    assert_eq!(p.lines, 0);
    assert!((0..=7).contains(&p.x));
    assert_eq!(grid, Grid::new());
}

#[test]
fn test_flat_bottomed_kinds_land_without_holes_on_empty_grid() {
    for kind in [PieceKind::I, PieceKind::O, PieceKind::T, PieceKind::J, PieceKind::L] {
        let mut grid = Grid::new();
        let p = choose_best_placement(&mut grid, kind).expect("placement");
        let shape = &rotations(kind)[p.rotation];
        assert_eq!(p.y as u8 + shape.height(), 16, "{:?} floats", kind);
        assert_eq!(p.lines, 0);

        let mut landed = Grid::new();
        landed.place(shape, p.x, p.y, kind.intensity());
        assert_eq!(
            GridFeatures::of(&landed).holes,
            0,
            "{:?} leaves a hole",
            kind
        );
    }
}

#[test]
fn test_vertical_i_fills_single_gap() {
    let mut grid = Grid::new();
    for x in 0..9 {
        if x != 4 {
            grid.set(x, 15, 20);
        }
    }

    let p = choose_best_placement(&mut grid, PieceKind::I).expect("placement");
    assert_eq!((p.rotation, p.x, p.y), (1, 4, 12));
    assert_eq!(p.lines, 1);

    // Locking it for real completes exactly one row.
    let mut locked = grid;
    locked.place(&rotations(PieceKind::I)[1], p.x, p.y, PieceKind::I.intensity());
    assert_eq!(locked.completed_rows().as_slice(), &[15]);
    assert!((evaluate(&locked, 1) - p.score).abs() < 1e-9);
    let (compacted, cleared) = locked.clear_completed_rows();
    assert_eq!(cleared, 1);
    assert_eq!(compacted.column_heights()[4], 3);
    assert_eq!(compacted.block_count(), 3);
}

#[test]
fn test_no_placement_when_field_is_full() {
    let mut grid = Grid::from_rows(&[[7u8; 9]; 16]);
    for kind in PieceKind::ALL {
        assert_eq!(choose_best_placement(&mut grid, kind), None, "{:?}", kind);
    }
}

#[test]
fn test_single_shaft_admits_only_vertical_i() {
    // Full-height columns everywhere except one.
    let mut grid = Grid::new();
    for x in 0..9 {
        if x == 6 {
            continue;
        }
        for y in 0..16 {
            grid.set(x, y, 40);
        }
    }
    for kind in PieceKind::ALL {
        let p = choose_best_placement(&mut grid, kind);
        if kind == PieceKind::I {
            let p = p.expect("vertical I fits the shaft");
            assert_eq!((p.rotation, p.x), (1, 6));
        } else {
            assert_eq!(p, None, "{:?}", kind);
        }
    }
}

#[test]
fn test_ties_keep_first_candidate() {
    // With all weights zero every candidate scores 0: the first one wins.
    let zero = Weights {
        lines: 0.0,
        holes: 0.0,
        blocks: 0.0,
        max_height: 0.0,
        height_std: 0.0,
        bumpiness: 0.0,
        diff_std: 0.0,
        height_range: 0.0,
    };
    let mut grid = Grid::new();
    let p = choose_best_placement_with(&mut grid, PieceKind::T, &zero).expect("placement");
    assert_eq!((p.rotation, p.x), (0, 0));
}

#[test]
fn test_planning_is_deterministic() {
    let mut grid = Grid::new();
    grid.set(0, 15, 20);
    grid.set(1, 15, 20);
    grid.set(1, 14, 20);
    grid.set(7, 15, 20);

    for kind in PieceKind::ALL {
        let a = choose_best_placement(&mut grid, kind);
        let b = choose_best_placement(&mut grid.clone(), kind);
        assert_eq!(a, b, "{:?}", kind);
    }
}

fn arb_stack() -> impl Strategy<Value = Grid> {
    // Random cells below row 4 so most grids still admit a placement.
    prop::collection::vec(prop::bool::weighted(0.45), GRID_SIZE).prop_map(|bits| {
        let mut grid = Grid::new();
        for (i, filled) in bits.into_iter().enumerate() {
            let (x, y) = ((i % 9) as i8, (i / 9) as i8);
            if filled && y >= 4 {
                grid.set(x, y, 100);
            }
        }
        grid
    })
}

proptest! {
    #[test]
    fn planner_leaves_grid_untouched(grid in arb_stack(), kind_idx in 0usize..7) {
        let kind = PieceKind::ALL[kind_idx];
        let mut probe = grid;
        let _ = choose_best_placement(&mut probe, kind);
        prop_assert_eq!(probe, grid);
    }

    #[test]
    fn chosen_placement_is_a_resting_position(grid in arb_stack(), kind_idx in 0usize..7) {
        let kind = PieceKind::ALL[kind_idx];
        let mut probe = grid;
        if let Some(p) = choose_best_placement(&mut probe, kind) {
            let shape = &rotations(kind)[p.rotation];
            prop_assert!(grid.can_place(shape, p.x, p.y));
            prop_assert!(!grid.can_place(shape, p.x, p.y + 1));
            prop_assert_eq!(grid.resting_row(shape, p.x), Some(p.y));

            let mut locked = grid;
            locked.place(shape, p.x, p.y, kind.intensity());
            prop_assert_eq!(locked.completed_rows().len(), p.lines);
            prop_assert!(locked.cells().iter().filter(|&&c| c == EMPTY).count() + 4
                == grid.cells().iter().filter(|&&c| c == EMPTY).count());
        }
    }
}
