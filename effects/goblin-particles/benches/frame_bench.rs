use criterion::{Criterion, criterion_group, criterion_main};
use goblin_particles::{ParticleConfig, ParticleField, RecordingSurface, SurfaceSize};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

fn create_field(width: f32, height: f32) -> ParticleField {
    ParticleField::new(
        ParticleConfig::default(),
        SurfaceSize::new(width, height),
        StdRng::seed_from_u64(42),
    )
    .unwrap()
}

fn bench_step(c: &mut Criterion) {
    let mut field = create_field(1920.0, 1080.0);

    c.bench_function("step_desktop", |b| {
        b.iter(|| black_box(field.step()));
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut field = create_field(1920.0, 1080.0);
    let mut surface = RecordingSurface::new(field.size());

    c.bench_function("frame_desktop_recording", |b| {
        b.iter(|| black_box(field.frame(&mut surface)));
    });

    let mut field = create_field(375.0, 812.0);
    let mut surface = RecordingSurface::new(field.size());

    c.bench_function("frame_mobile_recording", |b| {
        b.iter(|| black_box(field.frame(&mut surface)));
    });
}

criterion_group!(benches, bench_step, bench_frame);
criterion_main!(benches);
