use criterion::{black_box, criterion_group, criterion_main, Criterion};
use autotris::core::{choose_best_placement, evaluate, Grid, UniformPieces};
use autotris::engine::{Autoplay, AutoplayConfig, NullSink, Unpaced};
use autotris::types::PieceKind;

/// A ragged mid-game stack with a couple of holes.
fn midgame_grid() -> Grid {
    let mut grid = Grid::new();
    let heights = [5u8, 7, 6, 3, 2, 4, 6, 8, 1];
    for (x, &h) in heights.iter().enumerate() {
        for y in (16 - h)..16 {
            grid.set(x as i8, y as i8, 100);
        }
    }
    grid.set(2, 13, 0);
    grid.set(6, 14, 0);
    grid
}

fn bench_planner(c: &mut Criterion) {
    let mut grid = midgame_grid();

    c.bench_function("plan_t_midgame", |b| {
        b.iter(|| choose_best_placement(black_box(&mut grid), PieceKind::T))
    });

    c.bench_function("plan_all_kinds_midgame", |b| {
        b.iter(|| {
            for kind in PieceKind::ALL {
                black_box(choose_best_placement(&mut grid, kind));
            }
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let grid = midgame_grid();

    c.bench_function("evaluate_midgame", |b| {
        b.iter(|| evaluate(black_box(&grid), 0))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut grid = midgame_grid();
    for y in 12..16 {
        grid.fill_row(y, 20);
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| black_box(&grid).clear_completed_rows())
    });
}

fn bench_autoplay_step(c: &mut Criterion) {
    let mut game = Autoplay::new(UniformPieces::new(12345), AutoplayConfig::default());

    c.bench_function("autoplay_step_headless", |b| {
        b.iter(|| game.step(&mut NullSink, &mut Unpaced))
    });
}

criterion_group!(
    benches,
    bench_planner,
    bench_evaluate,
    bench_line_clear,
    bench_autoplay_step
);
criterion_main!(benches);
