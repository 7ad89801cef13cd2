use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ctex_common::layout::vq::split_blocks;
use ctex_common::texture::DitherMode;
use ctex_common::{Color8888, RgbaImage};
use ctex_quantize::{quantize, quantize_blocks, QuantizeSettingsBuilder};
use std::hint::black_box;

fn noise_image(side: u32) -> RgbaImage {
    let mut state = 0x9E37_79B9u32;
    let pixels = (0..side * side)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            Color8888::from_array(state.to_le_bytes())
        })
        .collect();
    RgbaImage::new(side, side, pixels).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quantize (RGBA8888 -> Indexed)");
    let image = noise_image(256);
    group.throughput(Throughput::Elements(256 * 256));

    for colors in [16u16, 256] {
        for dither in [DitherMode::None, DitherMode::FloydSteinberg] {
            let settings = QuantizeSettingsBuilder::new()
                .max_colors(colors)
                .dither(dither)
                .build();
            group.bench_with_input(
                BenchmarkId::new(format!("wu_{dither:?}"), colors),
                &settings,
                |b, settings| b.iter(|| quantize(black_box(&image), settings).unwrap()),
            );
        }
    }
    group.finish();

    let mut group = c.benchmark_group("Quantize Blocks (VQ codebook)");
    let blocks = split_blocks(&noise_image(128)).unwrap();
    group.throughput(Throughput::Elements(blocks.len() as u64));
    group.bench_function("kmeans_256", |b| {
        b.iter(|| quantize_blocks(black_box(&blocks), 256).unwrap())
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
