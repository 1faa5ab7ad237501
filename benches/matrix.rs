//! Benchmarks for matrix chart layout, hit-testing and drawing.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_precision_loss)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use messboard::charts::heatmap;
use messboard::matrix::{ChartArea, HitMode, MatrixController, MatrixSpec};
use messboard::registry::DatasetController;
use messboard::render::{render_matrix, RecordingSurface};

/// `rows` x `cols` heatmap with values cycling through 0-100.
fn spec(rows: usize, cols: usize) -> MatrixSpec {
    let y: Vec<String> = (0..rows).map(|r| format!("Row {r}")).collect();
    let x: Vec<String> = (0..cols).map(|c| format!("Col {c}")).collect();
    let data: Vec<Vec<f64>> = (0..rows)
        .map(|r| (0..cols).map(|c| ((r * cols + c) % 101) as f64).collect())
        .collect();
    heatmap("Bench", &x, &y, &data, 2.0)
}

const SIZES: [(usize, usize); 3] = [(7, 3), (31, 3), (100, 24)];

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_layout");
    let area = ChartArea::new(60.0, 40.0, 800.0, 600.0);
    for (rows, cols) in SIZES {
        let spec = spec(rows, cols);
        group.throughput(Throughput::Elements((rows * cols) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{cols}")),
            &spec,
            |b, spec| {
                let mut controller = MatrixController::new(spec);
                b.iter(|| controller.layout(black_box(area)).expect("layout"));
            },
        );
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_hit_test");
    let area = ChartArea::new(60.0, 40.0, 800.0, 600.0);
    for (rows, cols) in SIZES {
        let mut controller = MatrixController::new(&spec(rows, cols));
        controller.layout(area).expect("layout");
        group.throughput(Throughput::Elements(1));
        group.bench_function(BenchmarkId::from_parameter(format!("{rows}x{cols}")), |b| {
            b.iter(|| {
                controller.hits(black_box(460.0), black_box(340.0), HitMode::Point);
                controller.tooltip(black_box(100.0), black_box(80.0))
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let spec = spec(31, 3);
    c.bench_function("matrix_render_31x3", |b| {
        let mut controller = MatrixController::new(&spec);
        b.iter(|| {
            let mut surface = RecordingSurface::new();
            let controller: &mut dyn DatasetController = &mut controller;
            render_matrix(&mut surface, controller, &spec, 600.0, 400.0).expect("render")
        });
    });
}

criterion_group!(benches, bench_layout, bench_hit_test, bench_render);
criterion_main!(benches);
