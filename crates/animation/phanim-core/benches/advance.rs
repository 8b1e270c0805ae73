use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use phanim_core::{Color, Engine, Vec2};

/// `n` circles, each faded in, moved and grown in turn.
fn build_scene(n: usize) -> Engine {
    let mut engine = Engine::default();
    for i in 0..n {
        let x = (i % 40) as f32 * 20.0;
        let y = (i / 40) as f32 * 20.0;
        let c = engine.circle(Vec2::new(x, y), 5.0, Color::rgba(200, 80, 40, 0));
        engine.fade_alpha(c, 0, 255, 0.25);
        engine.transform_position(c, Vec2::new(x, y), Vec2::new(y, x), 0.5);
        engine.scale_radius(c, 5.0, 8.0, 0.25);
    }
    engine
}

fn bench_advance(c: &mut Criterion) {
    let dt = 1.0 / 60.0;

    c.bench_function("advance_single_frame_1k", |b| {
        let mut engine = build_scene(1_000);
        b.iter(|| {
            if engine.is_completed() {
                engine.reset();
            }
            black_box(engine.advance(black_box(dt)));
        })
    });

    c.bench_function("play_through_100", |b| {
        b.iter_batched(
            || build_scene(100),
            |mut engine| {
                while !engine.is_completed() {
                    engine.advance(dt);
                }
                black_box(engine.current_time())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_advance);
criterion_main!(benches);
