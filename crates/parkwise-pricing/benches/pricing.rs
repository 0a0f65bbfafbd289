//! Parkwise pricing benchmarks
//!
//! - Pure engine evaluation across lot occupancy levels
//! - Full estimate path (validation, roster lookup, engine, quote)

use chrono::{DateTime, FixedOffset, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use parkwise_common::{BookingDuration, OccupancySnapshot, Plate, PricingRequest};
use parkwise_pricing::{PricingEngine, QuoteInput, Quoter, SubscriberRoster};
use std::sync::Arc;

fn start() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2025-06-25T09:00:00+00:00").unwrap()
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let engine = PricingEngine::default();

    for occupied in [0u64, 40, 80, 100].iter() {
        let request = PricingRequest::new(
            BookingDuration::new(3, 2, 1),
            start(),
            OccupancySnapshot::new(*occupied, 100).unwrap(),
        )
        .with_subscriber(true)
        .with_loyalty_points(250.0);

        group.bench_with_input(BenchmarkId::new("calculate", occupied), &request, |b, request| {
            b.iter(|| engine.calculate(black_box(request)))
        });
    }

    group.finish();
}

fn bench_estimate(c: &mut Criterion) {
    let roster: SubscriberRoster = (0..10_000)
        .filter_map(|i| format!("PW-{:05}", i).parse::<Plate>().ok())
        .collect();
    let quoter = Quoter::new(
        PricingEngine::default(),
        Arc::new(roster),
        FixedOffset::east_opt(0).unwrap(),
    );
    let input = QuoteInput::new(start())
        .with_duration(2, 0, 0)
        .with_occupancy(57, 100)
        .with_plate("pw-04242")
        .with_loyalty_points(30.0);
    let now = Utc::now();

    c.bench_function("quote/estimate", |b| {
        b.iter(|| quoter.estimate(black_box(&input), now).unwrap())
    });
}

criterion_group!(benches, bench_engine, bench_estimate);
criterion_main!(benches);
