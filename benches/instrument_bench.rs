//! Instrumentation Benchmarks - Per-request Recording Overhead
//!
//! Benchmarks the work the middleware adds to every request: label
//! derivation and the counter/histogram update.
//!
//! Run with: cargo bench --bench instrument_bench

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prometheus::Registry;

use http_adapter::adapters::metrics::HttpMetrics;
use http_adapter::domain::labels::MetricLabels;
use http_adapter::domain::observation::ResponseObservation;

/// Benchmark deriving labels from a finished observation.
fn bench_label_derivation(c: &mut Criterion) {
    let mut obs = ResponseObservation::start();
    obs.write_status(200);

    c.bench_function("labels_derive_templated", |b| {
        b.iter(|| {
            let _labels = MetricLabels::derive(
                black_box("GET"),
                black_box(Some("/users/:id")),
                black_box("/users/42"),
                &obs,
            );
        });
    });
}

/// Benchmark recording into an existing label set.
fn bench_record(c: &mut Criterion) {
    let metrics = HttpMetrics::new(Registry::new()).expect("register collectors");
    let labels = MetricLabels::new("GET", "/users/:id", 200);

    c.bench_function("metrics_record_existing_series", |b| {
        b.iter(|| {
            metrics.record(black_box(&labels), black_box(Duration::from_micros(420)));
        });
    });
}

/// Benchmark rendering a scrape with a handful of series.
fn bench_render(c: &mut Criterion) {
    let metrics = HttpMetrics::new(Registry::new()).expect("register collectors");
    for (i, code) in [200u16, 201, 404, 500].iter().enumerate() {
        let labels = MetricLabels::new("GET", format!("/route/{i}"), *code);
        metrics.record(&labels, Duration::from_millis(3));
    }

    c.bench_function("metrics_render_text", |b| {
        b.iter(|| {
            let _text = metrics.render().expect("encode");
        });
    });
}

criterion_group!(benches, bench_label_derivation, bench_record, bench_render);
criterion_main!(benches);
