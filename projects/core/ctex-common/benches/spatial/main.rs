use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ctex_common::block::{decode_image, encode_image, DxtVariant};
use ctex_common::layout::tile::TileSwizzle;
use ctex_common::layout::twiddle::Twiddler;
use ctex_common::{Color8888, RgbaImage};
use std::hint::black_box;

fn test_image(side: u32) -> RgbaImage {
    let pixels = (0..side * side)
        .map(|i| Color8888::new(i as u8, (i >> 8) as u8, (i >> 4) as u8, 255))
        .collect();
    RgbaImage::new(side, side, pixels).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Spatial Mappers");

    for side in [64u32, 256, 1024] {
        let image = test_image(side);
        let pixels = image.pixels().to_vec();
        group.throughput(Throughput::Elements((side * side) as u64));

        let twiddler = Twiddler::square(side).unwrap();
        group.bench_with_input(BenchmarkId::new("twiddle", side), &pixels, |b, pixels| {
            b.iter(|| twiddler.twiddle(black_box(pixels.as_slice())).unwrap())
        });

        let stored = twiddler.twiddle(&pixels).unwrap();
        group.bench_with_input(BenchmarkId::new("untwiddle", side), &stored, |b, stored| {
            b.iter(|| twiddler.untwiddle(black_box(stored.as_slice())).unwrap())
        });

        let tiles = TileSwizzle::new(side, side, 4, 4).unwrap();
        group.bench_with_input(BenchmarkId::new("tile_swizzle_4x4", side), &pixels, |b, pixels| {
            b.iter(|| tiles.swizzle(black_box(pixels.as_slice())).unwrap())
        });
    }
    group.finish();

    let mut group = c.benchmark_group("DXT1 Blocks");
    let image = test_image(256);
    let encoded = encode_image(DxtVariant::Dxt1, &image);
    group.throughput(Throughput::Bytes(encoded.len() as u64));
    group.bench_function("decode_256", |b| {
        b.iter(|| decode_image(DxtVariant::Dxt1, black_box(encoded.as_slice()), 256, 256).unwrap())
    });
    group.bench_function("encode_256", |b| {
        b.iter(|| encode_image(DxtVariant::Dxt1, black_box(&image)))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
