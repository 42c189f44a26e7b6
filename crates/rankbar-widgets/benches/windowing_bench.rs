//! Benchmarks for windowing and scrolling.
//!
//! Run with: cargo bench -p rankbar-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rankbar_render::Scene;
use rankbar_render::svg::SvgExporter;
use rankbar_widgets::{
    BarRowFactory, CachePolicy, RowRecord, ScrollController, WindowedList, WindowedListConfig,
};
use std::hint::black_box;

fn dataset(rows: usize) -> Vec<RowRecord> {
    (0..rows)
        .map(|i| RowRecord::new(format!("store {i}"), (rows - i) as f64, 100.0 / rows as f64))
        .collect()
}

fn controller(rows: usize, policy: CachePolicy) -> (Scene, ScrollController) {
    let mut scene = Scene::new(700.0, 560.0);
    let config = WindowedListConfig::new(dataset(rows))
        .container_width(700.0)
        .view_height(520.0)
        .cache_policy(policy);
    let list = WindowedList::new(&mut scene, config, BarRowFactory::default())
        .expect("valid list config");
    let ctl = ScrollController::new(&mut scene, list, 700.0, 560.0, 40.0)
        .expect("valid viewport");
    (scene, ctl)
}

// ============================================================================
// Building
// ============================================================================

fn bench_initial_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("windowing/initial");
    for rows in [100usize, 10_000, 1_000_000] {
        let data: std::sync::Arc<[RowRecord]> = dataset(rows).into();
        group.bench_with_input(BenchmarkId::from_parameter(rows), &data, |b, data| {
            b.iter(|| {
                let mut scene = Scene::new(700.0, 560.0);
                let config = WindowedListConfig::new(data.clone())
                    .container_width(700.0)
                    .view_height(520.0);
                let list = WindowedList::new(&mut scene, config, BarRowFactory::default())
                    .expect("valid list config");
                let ctl = ScrollController::new(&mut scene, list, 700.0, 560.0, 40.0)
                    .expect("valid viewport");
                black_box((ctl.list().cached_len(), scene.node_count()))
            })
        });
    }
    group.finish();
}

// ============================================================================
// Scrolling
// ============================================================================

fn bench_wheel_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("windowing/wheel_sweep");
    for (name, policy) in [
        ("unbounded", CachePolicy::Unbounded),
        ("bounded", CachePolicy::Bounded { margin: 16 }),
    ] {
        group.bench_function(BenchmarkId::new(name, 10_000), |b| {
            let (mut scene, mut ctl) = controller(10_000, policy);
            b.iter(|| {
                ctl.scroll_to(&mut scene, 0.0);
                for _ in 0..200 {
                    ctl.scroll_by(&mut scene, 120.0);
                }
                black_box(ctl.scroll_y())
            })
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("windowing/drag");
    group.bench_function("full_track", |b| {
        let (mut scene, mut ctl) = controller(100_000, CachePolicy::Bounded { margin: 16 });
        b.iter(|| {
            ctl.scroll_to(&mut scene, 0.0);
            ctl.begin_drag(0.0);
            let mut y = 0.0;
            while y < ctl.thumb_max_y() {
                y += 4.0;
                ctl.drag_to(&mut scene, y);
            }
            ctl.end_drag();
            black_box(ctl.scroll_y())
        })
    });
    group.finish();
}

// ============================================================================
// Export
// ============================================================================

fn bench_svg_export(c: &mut Criterion) {
    let (scene, _ctl) = controller(10_000, CachePolicy::Unbounded);
    let exporter = SvgExporter::default();
    c.bench_function("windowing/svg_export", |b| {
        b.iter(|| black_box(exporter.export(&scene).len()))
    });
}

criterion_group!(
    benches,
    bench_initial_window,
    bench_wheel_sweep,
    bench_drag,
    bench_svg_export
);
criterion_main!(benches);
