// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for document assembly in the bildwerk-document crate.
// Benchmarks the full downscale + re-encode + paginate pipeline on synthetic
// photos.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use bildwerk_core::types::PageSize;
use bildwerk_document::PdfComposer;

/// Gradient fill so the JPEG encoder does realistic work rather than
/// compressing a flat colour field.
fn synthetic_photo(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x + y) % 256) as u8,
        ])
    });
    DynamicImage::ImageRgb8(img)
}

/// Benchmark assembling three 1024x768 photos plus a caption. The photos are
/// wider than the 800px cap, so every iteration exercises the downscale path.
fn bench_assemble(c: &mut Criterion) {
    let images: Vec<DynamicImage> = (0..3).map(|_| synthetic_photo(1024, 768)).collect();
    let composer = PdfComposer::new(PageSize::A4);

    c.bench_function("assemble (3 x 1024x768)", |b| {
        b.iter(|| {
            let bytes = composer
                .assemble(black_box(&images), black_box("benchmark caption"))
                .expect("assembly succeeds");
            black_box(bytes);
        });
    });
}

criterion_group!(benches, bench_assemble);
criterion_main!(benches);
