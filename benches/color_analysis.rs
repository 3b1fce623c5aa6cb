use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cube_scan::color::classify;
use cube_scan::config::GridConfig;
use cube_scan::{
    ColorClassifier, ColorConverter, FaceSampler, FaceScanner, GridGeometry, HslColor,
    ReferenceTable, RgbSample,
};
use image::{Rgb, RgbImage};

fn checkerboard_frame() -> RgbImage {
    let geometry = GridGeometry::default();
    let size = geometry.canvas_size();
    RgbImage::from_fn(size, size, |x, y| {
        if (x / 20 + y / 20) % 2 == 0 {
            Rgb([230, 40, 35])
        } else {
            Rgb([250, 250, 245])
        }
    })
}

fn benchmark_color_analysis(c: &mut Criterion) {
    let converter = ColorConverter::new();
    let table = ReferenceTable::standard();

    c.bench_function("rgb_to_hsl", |b| {
        b.iter(|| converter.rgb_to_hsl(black_box(RgbSample::from([230, 120, 35]))))
    });

    c.bench_function("classify_nearest", |b| {
        let hsl = HslColor::new(28.0, 80.0, 52.0);
        b.iter(|| classify(black_box(hsl), &table))
    });

    let scanner = FaceScanner::default();
    let frame = checkerboard_frame();
    c.bench_function("scan_face", |b| {
        b.iter(|| scanner.scan(black_box(&frame), &table))
    });

    let whole_cell = GridConfig {
        sample_window: GridConfig::default().cell_size,
        ..GridConfig::default()
    };
    let scanner = FaceScanner::new(FaceSampler::from_config(&whole_cell), ColorClassifier::new());
    c.bench_function("scan_face_whole_cell", |b| {
        b.iter(|| scanner.scan(black_box(&frame), &table))
    });
}

criterion_group!(benches, benchmark_color_analysis);
criterion_main!(benches);
