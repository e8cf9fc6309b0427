//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cursor_gravity::prelude::*;
use cursor_gravity::Mode;

fn config(count: usize) -> GravityConfig {
    GravityConfig::default().with_particle_count(count).with_seed(42)
}

fn bench_field_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_step");
    let viewport = Vec2::new(1920.0, 1080.0);
    let pointer = Vec2::new(960.0, 540.0);

    for count in [300, 3_000, 30_000] {
        group.bench_with_input(BenchmarkId::new("normal", count), &count, |b, &count| {
            let mut field = ParticleField::new(config(count), viewport);
            b.iter(|| field.step(black_box(pointer)))
        });

        group.bench_with_input(BenchmarkId::new("vacuum", count), &count, |b, &count| {
            let mut field = ParticleField::new(config(count), viewport);
            field.set_mode(Mode::Vacuum, pointer);
            b.iter(|| field.step(black_box(pointer)))
        });
    }

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    group.bench_function("draw_list_300", |b| {
        let mut effect = CursorGravity::new(config(300)).expect("default config is valid");
        let mut scheduler = FrameScheduler::new();
        let mut canvas = DrawList::new(1920, 1080);
        effect.mount(&mut scheduler, &mut canvas);
        effect.pointer_moved(Vec2::new(960.0, 540.0));

        b.iter(|| {
            let due = scheduler.begin_frame();
            black_box(effect.frame(&due, &mut scheduler, &mut canvas, 1.0 / 60.0))
        })
    });

    group.bench_function("raster_300", |b| {
        let mut effect = CursorGravity::new(config(300)).expect("default config is valid");
        let mut scheduler = FrameScheduler::new();
        let mut canvas = RasterCanvas::new(640, 360, Color::WHITE);
        effect.mount(&mut scheduler, &mut canvas);
        effect.pointer_moved(Vec2::new(320.0, 180.0));

        b.iter(|| {
            let due = scheduler.begin_frame();
            black_box(effect.frame(&due, &mut scheduler, &mut canvas, 1.0 / 60.0))
        })
    });

    group.finish();
}

fn bench_splash(c: &mut Criterion) {
    c.bench_function("vacuum_release_300", |b| {
        let viewport = Vec2::new(1920.0, 1080.0);
        let pointer = Vec2::new(960.0, 540.0);
        let mut field = ParticleField::new(config(300), viewport);
        b.iter(|| {
            field.set_mode(Mode::Vacuum, pointer);
            black_box(field.set_mode(Mode::Normal, pointer))
        })
    });
}

criterion_group!(benches, bench_field_step, bench_frame, bench_splash);
criterion_main!(benches);
