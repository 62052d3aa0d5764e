/*
 * Grid Benchmark
 *
 * Measures the hot paths of a frame: wrapping and occupancy lookups on the
 * grid, the world mapping used to place nodes and a full session update at
 * a few grid sizes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hunger::{Direction, GameConfig, GameSession, Grid, GridPosition, Key};

fn bench_wrap_and_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_lookup");

    for size in [50u32, 100, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &n| {
            let grid = Grid::new(n, n);
            let span = n as i32 * 3;

            b.iter(|| {
                let mut free = 0;
                for i in -span..span {
                    let pos = grid.wrap(GridPosition::new(i, -i));
                    if grid.is_empty(pos) {
                        free += 1;
                    }
                }
                black_box(free)
            });
        });
    }

    group.finish();
}

fn bench_grid_to_world(c: &mut Criterion) {
    let grid = Grid::new(100, 100);

    c.bench_function("grid_to_world_full_grid", |b| {
        b.iter(|| {
            for y in 0..grid.height() {
                for x in 0..grid.width() {
                    black_box(grid.grid_to_world(GridPosition::new(x, y)));
                }
            }
        });
    });
}

fn bench_session_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_update");

    for size in [50u32, 100, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &n| {
            let config = GameConfig {
                grid_width: n,
                grid_height: n,
                rng_seed: Some(42),
                ..GameConfig::default()
            };
            let mut session = GameSession::new(config).expect("valid config");
            session.place_player(GridPosition::new(0, 0), Direction::Right);
            let mut frame = 0u32;

            b.iter(|| {
                // Turn now and then so the trail curls around the bowl
                frame += 1;
                if frame % 64 == 0 {
                    session.handle_key(Key::Left);
                }
                if session.is_game_over() {
                    session.restart();
                    session.place_player(GridPosition::new(0, 0), Direction::Right);
                }
                session.update(black_box(1.0 / 60.0));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_wrap_and_lookup, bench_grid_to_world, bench_session_update);
criterion_main!(benches);
