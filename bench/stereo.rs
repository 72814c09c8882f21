use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cv_stereo::{dynamic::Dynamic, naive::Naive, prelude::*};
use image::{GrayImage, Luma};

/// Textured synthetic pair with a constant disparity of `shift` columns.
fn synthetic_frame(width: u32, height: u32, shift: u32) -> StereoFrame {
    let texture = |x: u32, y: u32| {
        Luma([(x.wrapping_mul(2_654_435_761) ^ y.wrapping_mul(40_503)).rotate_left(7) as u8])
    };

    let left = GrayImage::from_fn(width, height, |x, y| texture(x, y));
    let right = GrayImage::from_fn(width, height, |x, y| texture(x + shift, y));

    StereoFrame::new(left, right).unwrap()
}

fn stereo_bench(c: &mut Criterion) {

    // Build frame
    let frame = synthetic_frame(96, 48, 5);

    // Build disparity algs
    let mut naive = Naive::new(Params::default());
    let mut dynamic = Dynamic::new(Params::default());

    // Benchmark compute functions
    c.bench_function("naive synthetic 96x48", |b| b.iter(|| naive.compute(black_box(&frame))));
    c.bench_function("dynamic synthetic 96x48", |b| b.iter(|| dynamic.compute(black_box(&frame))));
}

criterion_group!(benches, stereo_bench);
criterion_main!(benches);
