use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cv_obstacle::prelude::*;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn detection_bench(c: &mut Criterion) {

    // Floor-like background
    let mut background = DisparityMap::new(WIDTH, HEIGHT);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            background.put(x, y, (y * 60 / HEIGHT) as u8);
        }
    }

    // Two obstacles, the nearer one on the right
    let mut scene = background.clone();
    for y in 100..300 {
        for x in 50..250 {
            scene.put(x, y, 120);
        }
        for x in 380..560 {
            scene.put(x, y, 210);
        }
    }

    // Build detector
    let det = ObjectDetection::new(Params::default(), background).unwrap();

    // Benchmark detect function
    c.bench_function("detect 640x480 two obstacles", |b| b.iter(|| det.detect(black_box(&scene))));
    c.bench_function("peel bands 640x480 two obstacles", |b| {
        b.iter(|| det.detect_bands(black_box(&scene)))
    });
}

criterion_group!(benches, detection_bench);
criterion_main!(benches);
