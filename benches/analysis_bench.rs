use criterion::{Criterion, criterion_group, criterion_main};
use ejection_lens::core::{
    AnalysisOptions, CrossingDirection, ScenarioDataset, analyze, first_crossing,
};
use ejection_lens::playback::{DEFAULT_BASE_TICK_PERIOD, TimeCursor};
use serde_json::json;
use std::hint::black_box;

const SAMPLES: usize = 20_000;

fn synthetic_artifact(sample_count: usize) -> String {
    let time: Vec<f64> = (0..sample_count).map(|i| i as f64 * 0.01).collect();
    let last = time[sample_count - 1];
    let positions: Vec<_> = time
        .iter()
        .map(|t| json!([[t.cos(), t.sin(), 0.0], [-t.cos(), 0.0, t.sin()], [0.0, -t.sin(), t.cos()]]))
        .collect();
    json!({
        "scenario": "bench",
        "masses": [1.0, 1.0, 1.0],
        "time": time,
        "positions": positions,
        "scalars": {
            "I": time.iter().map(|t| 1.0 + t * t).collect::<Vec<_>>(),
            "dIdt": time.iter().map(|t| 2.0 * t).collect::<Vec<_>>(),
            "Z": time.iter().map(|t| (t * 0.7).sin() + t / last).collect::<Vec<_>>(),
            "Dmin": time.iter().map(|t| last - t).collect::<Vec<_>>(),
            "Vmax": time.iter().map(|t| (t * 3.0).cos()).collect::<Vec<_>>(),
        },
        "ejectionTime": last * 0.9,
        "thresholds": {"Z": 1.5, "dIdt": last * 1.5, "Dmin": 0.5, "Vmax": 2.0}
    })
    .to_string()
}

fn bench_dataset_validation_20k(c: &mut Criterion) {
    let raw = synthetic_artifact(SAMPLES);

    c.bench_function("dataset_validation_20k", |b| {
        b.iter(|| {
            let _ = ScenarioDataset::from_json_str(black_box(&raw)).expect("valid artifact");
        })
    });
}

fn bench_analysis_20k(c: &mut Criterion) {
    let dataset = ScenarioDataset::from_json_str(&synthetic_artifact(SAMPLES)).expect("valid artifact");

    c.bench_function("analysis_20k", |b| {
        b.iter(|| {
            let _ = analyze(black_box(&dataset), AnalysisOptions::default())
                .expect("analysis should succeed");
        })
    });
}

fn bench_first_crossing_no_hit_100k(c: &mut Criterion) {
    let time: Vec<f64> = (0..100_000).map(|i| i as f64).collect();
    let values: Vec<f64> = time.iter().map(|t| (t * 0.001).sin()).collect();

    c.bench_function("first_crossing_no_hit_100k", |b| {
        b.iter(|| {
            first_crossing(
                black_box(&time),
                black_box(&values),
                black_box(2.0),
                CrossingDirection::Rising,
            )
        })
    });
}

fn bench_cursor_full_playback_20k(c: &mut Criterion) {
    c.bench_function("cursor_full_playback_20k", |b| {
        b.iter(|| {
            let mut cursor =
                TimeCursor::new(black_box(SAMPLES), DEFAULT_BASE_TICK_PERIOD).expect("cursor");
            cursor.play();
            while cursor.is_playing() {
                cursor.tick();
            }
            cursor.index()
        })
    });
}

criterion_group!(
    benches,
    bench_dataset_validation_20k,
    bench_analysis_20k,
    bench_first_crossing_no_hit_100k,
    bench_cursor_full_playback_20k
);
criterion_main!(benches);
