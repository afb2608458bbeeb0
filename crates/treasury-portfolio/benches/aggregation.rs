//! Benchmarks for maturity-bucket aggregation.
//!
//! Run with: cargo bench -p treasury-portfolio

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use treasury_core::{BondReturnRecord, Period};
use treasury_portfolio::{aggregate, aggregate_period, AggregationConfig, WeightingMethod};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Generates `bonds` records per month over `months` consecutive months.
fn create_records(months: usize, bonds: usize) -> Vec<BondReturnRecord> {
    let mut period = Period::new(2000, 1).unwrap();
    let mut records = Vec::with_capacity(months * bonds);

    for _ in 0..months {
        for i in 0..bonds {
            let maturity = (i * 7 % 720) as f64 / 6.0;
            let ret = ((i % 41) as f64 - 20.0) * 1e-4;
            records.push(
                BondReturnRecord::new(format!("9128{i:05}"), period, maturity, ret)
                    .with_market_value(Decimal::from(1_000 + i)),
            );
        }
        period = period.next();
    }

    records
}

// =============================================================================
// AGGREGATION BENCHMARKS
// =============================================================================

fn bench_aggregate_period(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_period");
    let period = Period::new(2000, 1).unwrap();

    for size in [100, 500, 2_000].iter() {
        let records = create_records(1, *size);
        group.throughput(Throughput::Elements(*size as u64));

        for weighting in [WeightingMethod::EqualWeight, WeightingMethod::ValueWeight] {
            let config = AggregationConfig::sequential().with_weighting(weighting);
            group.bench_with_input(
                BenchmarkId::new(weighting.code(), size),
                &records,
                |b, records| b.iter(|| aggregate_period(period, black_box(records), &config)),
            );
        }
    }

    group.finish();
}

fn bench_aggregate_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_history_240m");
    group.sample_size(20);

    let records = create_records(240, 400);
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("sequential", |b| {
        let config = AggregationConfig::sequential();
        b.iter(|| aggregate(black_box(&records), &config))
    });

    group.bench_function("parallel", |b| {
        let config = AggregationConfig::default();
        b.iter(|| aggregate(black_box(&records), &config))
    });

    group.finish();
}

criterion_group!(aggregation, bench_aggregate_period, bench_aggregate_history);
criterion_main!(aggregation);
