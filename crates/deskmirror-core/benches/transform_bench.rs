//! Microbenchmarks for the preview coordinate conversions.
//!
//! Run with: `cargo bench -p deskmirror-core`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use deskmirror_core::{CoordinateMapper, Point, Size};

fn bench_recompute(c: &mut Criterion) {
    c.bench_function("recompute_1080p_in_800x600", |b| {
        let mut mapper = CoordinateMapper::new();
        b.iter(|| {
            mapper.recompute(black_box(Size::new(1920, 1080)), black_box(Size::new(800, 600)));
        });
    });
}

fn bench_to_frame_space(c: &mut Criterion) {
    let mut mapper = CoordinateMapper::new();
    mapper.recompute(Size::new(1920, 1080), Size::new(800, 600));

    c.bench_function("to_frame_space", |b| {
        b.iter(|| mapper.to_frame_space(black_box(Point::new(400, 300))));
    });
}

fn bench_to_surface_space(c: &mut Criterion) {
    let mut mapper = CoordinateMapper::new();
    mapper.recompute(Size::new(1920, 1080), Size::new(800, 600));

    c.bench_function("to_surface_space", |b| {
        b.iter(|| mapper.to_surface_space(black_box(Point::new(960, 540))));
    });
}

criterion_group!(benches, bench_recompute, bench_to_frame_space, bench_to_surface_space);
criterion_main!(benches);
