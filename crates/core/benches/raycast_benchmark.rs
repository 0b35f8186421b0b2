//! Per-frame cost of classification and column casting.
//!
//! Run with: cargo bench --package maze-core --bench raycast_benchmark

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use maze_core::{Hit, MazeConfig, MazeWorld, Point};

fn world() -> MazeWorld {
    let mut world = MazeWorld::new(MazeConfig::default(), 42).expect("valid config");
    world.update_regions(0.5, 0.5);
    world.update_regions(40.5, 0.5);
    world
}

fn benchmark_classify(c: &mut Criterion) {
    let world = world();

    c.bench_function("classify_single_cell", |b| {
        let mut x = 0_i64;
        b.iter(|| {
            x = x.wrapping_add(7);
            black_box(world.classify(black_box(x), black_box(x / 3)))
        });
    });
}

fn benchmark_cast_view(c: &mut Criterion) {
    let world = world();
    let mut columns = vec![Hit::default(); 640];

    let mut group = c.benchmark_group("cast_view");
    group.throughput(Throughput::Elements(columns.len() as u64));
    group.bench_function("640_columns", |b| {
        let mut heading = 0.0_f64;
        b.iter(|| {
            heading += 0.01;
            world.cast_view(Point::new(41.5, 1.5), heading, 1.1, &mut columns);
            black_box(&columns);
        });
    });
    group.finish();
}

criterion_group!(benches, benchmark_classify, benchmark_cast_view);
criterion_main!(benches);
