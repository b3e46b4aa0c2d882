//! Grid tests - placement, resting rows, row completion and compaction

use proptest::prelude::*;

use autotris::core::{rotations, Grid, GRID_SIZE};
use autotris::types::{Cell, PieceKind, EMPTY, GRID_HEIGHT, GRID_WIDTH};

fn full_row(value: Cell) -> [Cell; 9] {
    [value; 9]
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), GRID_WIDTH);
    assert_eq!(grid.height(), GRID_HEIGHT);
    assert_eq!(grid.block_count(), 0);
    assert!(!grid.is_top_out());
    assert!(grid.completed_rows().is_empty());
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(GRID_WIDTH as i8, 0), None);
    assert_eq!(grid.get(0, GRID_HEIGHT as i8), None);
    assert_eq!(grid.get(8, 15), Some(EMPTY));
}

#[test]
fn test_grid_set_rejects_out_of_bounds() {
    let mut grid = Grid::new();
    assert!(grid.set(4, 7, 100));
    assert_eq!(grid.get(4, 7), Some(100));
    assert!(!grid.set(9, 0, 100));
    assert!(!grid.set(0, 16, 100));
    assert_eq!(grid.block_count(), 1);
}

#[test]
fn test_can_place_rejects_walls_floor_and_overlap() {
    let mut grid = Grid::new();
    let o = &rotations(PieceKind::O)[0];

    assert!(grid.can_place(o, 0, 0));
    assert!(grid.can_place(o, 7, 14));
    assert!(!grid.can_place(o, 8, 0));
    assert!(!grid.can_place(o, -1, 0));
    assert!(!grid.can_place(o, 0, 15));

    grid.set(1, 1, 20);
    assert!(!grid.can_place(o, 0, 0));
    assert!(grid.can_place(o, 2, 0));
}

#[test]
fn test_resting_row_on_stack() {
    let mut grid = Grid::new();
    let i_vertical = &rotations(PieceKind::I)[1];
    assert_eq!(grid.resting_row(i_vertical, 0), Some(12));

    grid.set(0, 10, 40);
    assert_eq!(grid.resting_row(i_vertical, 0), Some(6));
    // Blocked at the spawn row.
    grid.set(0, 0, 40);
    assert_eq!(grid.resting_row(i_vertical, 0), None);
}

#[test]
fn test_resting_row_does_not_tunnel_under_overhang() {
    // Overhang at row 5 over an empty cavity; dropping from above must stop on it.
    let mut grid = Grid::new();
    grid.set(3, 5, 20);
    let single = &rotations(PieceKind::I)[1];
    assert_eq!(grid.resting_row(single, 3), Some(1));
}

#[test]
fn test_clear_completed_rows_compacts_downward() {
    let mut rows = vec![[EMPTY; 9]; 16];
    rows[13][2] = 150;
    rows[14] = full_row(220);
    rows[15] = full_row(40);
    rows[15][0] = EMPTY;
    let grid = Grid::from_rows(&rows);

    let (cleared, n) = grid.clear_completed_rows();
    assert_eq!(n, 1);
    // Row 13 drops into 14, row 15 stays put.
    assert_eq!(cleared.get(2, 14), Some(150));
    assert_eq!(cleared.row(15), grid.row(15));
    assert_eq!(cleared.row(0), &[EMPTY; 9]);
    assert_eq!(cleared.block_count(), grid.block_count() - 9);
    // The input is untouched.
    assert!(grid.is_row_full(14));
}

#[test]
fn test_clear_completed_rows_non_adjacent() {
    let mut rows = vec![[EMPTY; 9]; 16];
    rows[10] = full_row(1);
    rows[11][4] = 80;
    rows[12] = full_row(1);
    rows[15][8] = 20;
    let grid = Grid::from_rows(&rows);

    assert_eq!(grid.completed_rows().as_slice(), &[10, 12]);
    let (cleared, n) = grid.clear_completed_rows();
    assert_eq!(n, 2);
    assert_eq!(cleared.get(4, 12), Some(80));
    assert_eq!(cleared.get(8, 15), Some(20));
    assert_eq!(cleared.block_count(), 2);
}

#[test]
fn test_clear_with_nothing_complete_is_identity() {
    let mut grid = Grid::new();
    grid.set(0, 15, 20);
    let (same, n) = grid.clear_completed_rows();
    assert_eq!(n, 0);
    assert_eq!(same, grid);
}

#[test]
fn test_top_out_checks_row_zero_only() {
    let mut grid = Grid::new();
    grid.set(8, 1, 20);
    assert!(!grid.is_top_out());
    grid.set(8, 0, 20);
    assert!(grid.is_top_out());
}

#[test]
fn test_packed_grid_with_open_spawn_row_is_not_top_out() {
    let mut rows = vec![full_row(30); 16];
    rows[0] = [EMPTY; 9];
    let grid = Grid::from_rows(&rows);
    assert!(!grid.is_top_out());
    assert_eq!(grid.completed_rows().len(), 15);
}

#[test]
fn test_clear_all_rows_full_gives_empty_grid() {
    let grid = Grid::from_rows(&vec![full_row(90); 16]);
    assert!(grid.is_top_out());
    assert_eq!(grid.clear_completed_rows(), (Grid::new(), 16));
}

#[test]
fn test_clear_adjacent_rows_keeps_survivor_order() {
    let mut rows = vec![[EMPTY; 9]; 16];
    rows[9][0] = 11;
    rows[10][1] = 12;
    rows[11][2] = 13;
    rows[12] = full_row(1);
    rows[13] = full_row(2);
    rows[14] = full_row(3);
    rows[15][3] = 16;
    let grid = Grid::from_rows(&rows);

    let (cleared, n) = grid.clear_completed_rows();
    assert_eq!(n, 3);
    // Rows above the cleared band drop by three, in the same order.
    assert_eq!(cleared.get(0, 12), Some(11));
    assert_eq!(cleared.get(1, 13), Some(12));
    assert_eq!(cleared.get(2, 14), Some(13));
    assert_eq!(cleared.get(3, 15), Some(16));
    assert_eq!(cleared.block_count(), 4);
    for y in 0..12 {
        assert_eq!(cleared.row(y), &[EMPTY; 9]);
    }
}

#[test]
fn test_column_heights() {
    let mut grid = Grid::new();
    grid.set(0, 15, 1);
    grid.set(1, 12, 1);
    grid.set(8, 0, 1);
    assert_eq!(grid.column_heights(), [1, 4, 0, 0, 0, 0, 0, 0, 16]);
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    prop::collection::vec(prop::bool::weighted(0.6), GRID_SIZE).prop_map(|bits| {
        let mut grid = Grid::new();
        for (i, filled) in bits.into_iter().enumerate() {
            if filled {
                grid.set((i % 9) as i8, (i / 9) as i8, 100);
            }
        }
        grid
    })
}

proptest! {
    #[test]
    fn clearing_removes_exactly_the_completed_rows(grid in arb_grid()) {
        let completed = grid.completed_rows();
        let (cleared, n) = grid.clear_completed_rows();

        prop_assert_eq!(n, completed.len());
        prop_assert_eq!(cleared.block_count(), grid.block_count() - 9 * n as u32);
        prop_assert!(cleared.completed_rows().is_empty());

        // Surviving rows keep their order, padded with empty rows on top.
        let survivors: Vec<&[Cell]> = (0..16)
            .filter(|y| !completed.contains(y))
            .map(|y| grid.row(y))
            .collect();
        for y in 0..n {
            prop_assert!(cleared.row(y).iter().all(|&c| c == EMPTY));
        }
        for (i, row) in survivors.iter().enumerate() {
            prop_assert_eq!(cleared.row(n + i), *row);
        }
    }

    #[test]
    fn resting_row_is_legal_and_final(grid in arb_grid(), kind_idx in 0usize..7, x in -3i8..9) {
        let kind = PieceKind::ALL[kind_idx];
        for shape in rotations(kind) {
            if let Some(y) = grid.resting_row(shape, x) {
                prop_assert!(grid.can_place(shape, x, y));
                prop_assert!(!grid.can_place(shape, x, y + 1));
            } else {
                prop_assert!(!grid.can_place(shape, x, 0));
            }
        }
    }
}
