use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use game_model::{InvestmentType, MarketEvent, TimeInterval};
use runtime::{GameEngine, StaticEventSource};
use rust_decimal::Decimal;
use tokio::runtime::Builder;

const BENCH_ROUNDS: usize = 1_000;

fn bench_events() -> Vec<MarketEvent> {
    (0..BENCH_ROUNDS)
        .map(|i| {
            let step = Decimal::new(i as i64 % 7 - 3, 2);
            MarketEvent::new(format!("event {i}"), step, step * Decimal::TWO, step, step)
        })
        .collect()
}

fn bench_full_game(c: &mut Criterion) {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime should build");
    let source = StaticEventSource::new(bench_events());
    let intervals = TimeInterval::CHOICES;

    let mut group = c.benchmark_group("engine_throughput");
    group.throughput(Throughput::Elements(BENCH_ROUNDS as u64));

    group.bench_function(BenchmarkId::new("submit", BENCH_ROUNDS), |b| {
        b.iter(|| {
            runtime.block_on(async {
                let mut engine = GameEngine::default();
                engine.start(&source, BENCH_ROUNDS).await;
                for turn in 0..BENCH_ROUNDS {
                    let investment_type = match turn % 3 {
                        0 => InvestmentType::Invest,
                        1 => InvestmentType::Short,
                        _ => InvestmentType::Skip,
                    };
                    engine.set_investment_amount("10");
                    engine.set_selected_interval(intervals[turn % intervals.len()]);
                    engine.set_selected_type(Some(investment_type));
                    let _ = engine.submit();
                    let _ = engine.drain_events();
                }
                engine.finalize();
            });
        });
    });

    group.finish();
}

criterion_group!(benches, bench_full_game);
criterion_main!(benches);
