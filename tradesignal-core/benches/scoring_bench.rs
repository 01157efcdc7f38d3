//! Criterion benchmarks for the scoring hot paths.
//!
//! Benchmarks:
//! 1. Indicator evaluation (RSI, SMA) over growing histories
//! 2. Technical signal generation
//! 3. Full evaluation (technical + sentiment + combiner)
//! 4. Replay-style scoring: one evaluation per bar prefix

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tradesignal_core::config::{CategoryWeights, ScoringConfig, SignalConfig};
use tradesignal_core::domain::{Bar, SentimentDatum, SentimentLabel};
use tradesignal_core::evaluate;
use tradesignal_core::indicators::{closes, Indicator, Rsi, Sma};
use tradesignal_core::signals::technical;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect()
}

fn scoring_config() -> ScoringConfig {
    ScoringConfig {
        signal: SignalConfig {
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            sma_short_period: 20,
            sma_long_period: 50,
            sma_trend_period: Some(200),
            news_score_threshold: 65.0,
        },
        weights: CategoryWeights::technical_led(),
    }
}

// ── 1. Indicators ────────────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for &bar_count in &[252, 1260, 2520] {
        let series = closes(&make_bars(bar_count));
        let stack: Vec<Box<dyn Indicator>> = vec![
            Box::new(Rsi::new(14)),
            Box::new(Sma::new(20)),
            Box::new(Sma::new(50)),
            Box::new(Sma::new(200)),
        ];

        group.bench_with_input(BenchmarkId::new("rsi_14", bar_count), &bar_count, |b, _| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.evaluate(black_box(&series)));
        });

        group.bench_with_input(BenchmarkId::new("stack_4", bar_count), &bar_count, |b, _| {
            b.iter(|| {
                stack
                    .iter()
                    .map(|ind| ind.evaluate(black_box(&series)))
                    .collect::<Vec<_>>()
            });
        });
    }

    group.finish();
}

// ── 2. Technical signal ──────────────────────────────────────────────

fn bench_technical(c: &mut Criterion) {
    let mut group = c.benchmark_group("technical_signal");
    let config = scoring_config();

    for &bar_count in &[252, 1260] {
        let bars = make_bars(bar_count);
        group.bench_with_input(
            BenchmarkId::new("generate", bar_count),
            &bar_count,
            |b, _| {
                b.iter(|| technical::generate(black_box(&bars), black_box(&config.signal)));
            },
        );
    }

    group.finish();
}

// ── 3. Full evaluation ───────────────────────────────────────────────

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let config = scoring_config();
    let bars = make_bars(1260);
    let news = SentimentDatum::new(72.0, SentimentLabel::SomewhatBullish, 12);

    group.bench_function("1260_bars_with_news", |b| {
        b.iter(|| evaluate(black_box(&bars), Some(black_box(&news)), &[], &config));
    });

    group.bench_function("1260_bars_no_news", |b| {
        b.iter(|| evaluate(black_box(&bars), None, &[], &config));
    });

    group.finish();
}

// ── 4. Replay ────────────────────────────────────────────────────────

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    group.sample_size(20);
    let config = scoring_config();
    let bars = make_bars(252);

    group.bench_function("252_prefix_evaluations", |b| {
        b.iter(|| {
            (1..=bars.len())
                .map(|end| evaluate(black_box(&bars[..end]), None, &[], &config).combined.score)
                .sum::<f64>()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_indicators,
    bench_technical,
    bench_evaluate,
    bench_replay
);
criterion_main!(benches);
