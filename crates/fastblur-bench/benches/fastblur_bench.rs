//! Benchmarks for fastblur operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use fastblur_core::{transpose, PixelBuffer, PixelLayout};
use fastblur_ops::{blur, box_filter, fill_resize, BlurParams, BoxKernel, Geometry};
use fastblur_transfer::{Gamma, GammaMode};

fn test_image(width: usize, height: usize) -> PixelBuffer {
    let mut img = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = ((x * 7 + y * 13) % 256) as f32 / 255.0;
            img.set_pixel(x, y, [v, 1.0 - v, 0.5]);
        }
    }
    img
}

/// A single pass costs the same whatever the kernel size.
fn bench_box_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_filter");
    let src = test_image(1024, 1024);
    let mut dst = PixelBuffer::empty();
    group.throughput(Throughput::Elements((1024 * 1024) as u64));

    for size in [3usize, 31, 255] {
        let kernel = BoxKernel::new(size).unwrap();
        group.bench_with_input(BenchmarkId::new("pass", size), &kernel, |b, &k| {
            b.iter(|| box_filter(black_box(&src.view()), &mut dst, k))
        });
    }

    group.finish();
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");

    for size in [256usize, 1024, 2048] {
        let src = test_image(size, size);
        let mut dst = PixelBuffer::empty();
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &src, |b, s| {
            b.iter(|| transpose(black_box(&s.view()), &mut dst))
        });
    }

    group.finish();
}

fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("blur");
    group.sample_size(20);
    let src = test_image(1024, 768);
    group.throughput(Throughput::Elements((1024 * 768) as u64));

    for passes in [1usize, 4] {
        let params = BlurParams::new(31, passes).unwrap();
        group.bench_with_input(BenchmarkId::new("k31", passes), &params, |b, p| {
            b.iter(|| blur(black_box(src.clone()), p))
        });
    }

    group.finish();
}

fn bench_gamma(c: &mut Criterion) {
    let mut group = c.benchmark_group("gamma");
    let (w, h) = (1024, 1024);
    let bytes: Vec<u8> = (0..w * h * 4).map(|i| (i % 251) as u8).collect();
    group.throughput(Throughput::Elements((w * h) as u64));

    for mode in [GammaMode::Exact, GammaMode::Fast] {
        let gamma = Gamma::new(mode);
        group.bench_with_input(BenchmarkId::new("decode_bgra", mode), &gamma, |b, g| {
            b.iter(|| g.decode_image(black_box(&bytes), w, h, w * 4, PixelLayout::BGRA))
        });

        let linear = test_image(w, h);
        group.bench_with_input(BenchmarkId::new("encode", mode), &gamma, |b, g| {
            b.iter(|| g.encode_image(black_box(&linear.view())))
        });
    }

    group.finish();
}

fn bench_fill_resize(c: &mut Criterion) {
    let src = test_image(1920, 1080);
    let geometry: Geometry = "640x640@0.5".parse().unwrap();
    c.bench_function("fill_resize_1080p_to_640", |b| {
        b.iter(|| fill_resize(black_box(&src), &geometry))
    });
}

criterion_group!(
    benches,
    bench_box_filter,
    bench_transpose,
    bench_blur,
    bench_gamma,
    bench_fill_resize,
);

criterion_main!(benches);
