//! Benchmark for testing VM performance with a counting loop.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tapenet_vm::core::vm::{Status, VM};

// IN [100] ; loop: ADD [101] 1 -> [101] ; LT [101] [100] -> [102] ; JNZ [102] 2 ; OUT [101] ; HALT
const COUNTER: &str = "3,100,1001,101,1,101,7,101,100,102,1005,102,2,4,101,99";

fn test_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("tapenet_vm");

    group.sample_size(100);
    group.bench_function(BenchmarkId::from_parameter("count_to_100000"), |b| {
        b.iter(|| {
            let mut vm = VM::from_program(COUNTER).expect("invalid program");
            vm.push_input(100_000);

            let start = std::time::Instant::now();
            let status = vm.run_to_halt().expect("vm error");

            assert_eq!(status, Status::Halted);
            assert_eq!(vm.pop_output(), Some(100_000));

            start.elapsed()
        });
    });

    group.finish();
}

criterion_group!(benches, test_loop);
criterion_main!(benches);
