// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Scoring Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the per-cycle hot path: pattern scoring,
//! aggregation and the full pipeline.

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use strikewatch_core::{aggregate, ArticleScorer, WatchPipeline};
use strikewatch_types::{ArticleRecord, WatchConfig};

fn batch(n: usize) -> Vec<ArticleRecord> {
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    let titles = [
        "US strikes Iran nuclear site",
        "Will the US strike Iran? Analysts weigh in",
        "Iran missile intercepted over the Gulf",
        "Polymarket odds of US strike on Iran jump",
        "Oil prices steady ahead of OPEC meeting",
    ];
    let sources = ["Reuters", "blog", "bbc.co.uk", "Some Outlet", "cnn"];
    (0..n)
        .map(|i| {
            ArticleRecord::new(
                titles[i % titles.len()],
                "Officials said cruise missiles hit targets near Isfahan, Iran.",
                sources[i % sources.len()],
                now - Duration::minutes(i as i64),
            )
        })
        .collect()
}

// ── ArticleScorer.score() ───────────────────────────────────────────

fn bench_score_single(c: &mut Criterion) {
    let scorer = ArticleScorer::new(&WatchConfig::default()).unwrap();
    let articles = batch(1);
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    c.bench_function("score_single", |b| {
        b.iter(|| scorer.score(black_box(&articles[0]), now))
    });
}

fn bench_score_batch_100(c: &mut Criterion) {
    let scorer = ArticleScorer::new(&WatchConfig::default()).unwrap();
    let articles = batch(100);
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    c.bench_function("score_batch_100", |b| {
        b.iter(|| scorer.score_batch(black_box(&articles), now))
    });
}

fn bench_score_batch_parallel_1000(c: &mut Criterion) {
    let scorer = ArticleScorer::new(&WatchConfig::default()).unwrap();
    let articles = batch(1000);
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    c.bench_function("score_batch_parallel_1000", |b| {
        b.iter(|| scorer.score_batch_parallel(black_box(&articles), now))
    });
}

// ── aggregate() ─────────────────────────────────────────────────────

fn bench_aggregate_1000(c: &mut Criterion) {
    let scorer = ArticleScorer::new(&WatchConfig::default()).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    let scored = scorer.score_batch(&batch(1000), now).scored;
    c.bench_function("aggregate_1000", |b| {
        b.iter(|| aggregate(black_box(&scored), 5))
    });
}

// ── Full pipeline: score + aggregate + decide ───────────────────────

fn bench_full_cycle_100(c: &mut Criterion) {
    let pipeline = WatchPipeline::new(&WatchConfig::default()).unwrap();
    let articles = batch(100);
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    c.bench_function("full_cycle_100", |b| {
        b.iter(|| pipeline.run_cycle(black_box(&articles), now))
    });
}

criterion_group!(
    benches,
    bench_score_single,
    bench_score_batch_100,
    bench_score_batch_parallel_1000,
    bench_aggregate_1000,
    bench_full_cycle_100,
);
criterion_main!(benches);
