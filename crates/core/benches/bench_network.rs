//! Benchmark for testing network orchestration performance.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tapenet_network::{network, NetworkArgsBuilder};
use tokio::runtime::Runtime;

// instance 0 sends one packet to the rendezvous point, then every instance idles
const SEND_ONCE: &str = "3,100,1005,100,11,104,255,104,7,104,42,3,101,1105,1,11";

fn test_network(c: &mut Criterion) {
    let mut group = c.benchmark_group("tapenet_network");

    for pool_size in [2usize, 50, 500] {
        group.sample_size(100);
        group.bench_with_input(BenchmarkId::from_parameter(pool_size), &pool_size, |b, p| {
            b.to_async::<Runtime>(Runtime::new().expect("failed to start runtime")).iter(
                || async {
                    let start = std::time::Instant::now();
                    let args = NetworkArgsBuilder::new()
                        .target(SEND_ONCE.to_string())
                        .pool_size(Some(*p))
                        .build()
                        .expect("Failed to build NetworkArgs");
                    let _ = network(args).await;
                    start.elapsed()
                },
            );
        });
    }
    group.finish();
}

criterion_group!(benches, test_network);
criterion_main!(benches);
