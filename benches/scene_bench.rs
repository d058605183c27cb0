//! Benchmarks for target layout and the per-frame scene step.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tinsel::options::{LayoutOptions, Options};
use tinsel::scene::layout;
use tinsel::scene::Jitter;
use tinsel::{InteractionMode, Scene};

fn layout_benchmark(c: &mut Criterion) {
    let opts = LayoutOptions::default();
    let jitter = Jitter {
        radial: 0.4,
        angle: 0.7,
        depth: 0.2,
    };
    let mut group = c.benchmark_group("target_for");
    for mode in [
        InteractionMode::Tree,
        InteractionMode::Scatter,
        InteractionMode::Focus,
    ] {
        let _ = group.bench_function(mode.as_str(), |b| {
            b.iter(|| {
                (0..1500).fold(0.0, |acc, i| {
                    let t = layout::target_for(
                        mode,
                        black_box(i),
                        1500,
                        jitter,
                        i == 7,
                        &opts,
                    );
                    acc + t.position.x
                })
            });
        });
    }
    group.finish();
}

fn tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_tick");
    for count in [300, 1500, 5000] {
        let mut options = Options::default();
        options.scene.ornament_count = count;
        options.scene.seed = Some(1);
        let mut scene = Scene::new(&options);
        let _ = scene.set_mode(InteractionMode::Scatter);
        let _ = group.bench_function(format!("{count}_particles"), |b| {
            b.iter(|| scene.tick(black_box(1.0 / 60.0)));
        });
    }
    group.finish();
}

criterion_group!(benches, layout_benchmark, tick_benchmark);
criterion_main!(benches);
