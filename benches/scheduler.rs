//! Criterion benchmarks for the MLFQ simulator.
//!
//! Measures end-to-end simulation throughput for representative workload
//! sizes. Run with:
//!
//!     cargo bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use mlfq_sim::{ProcessFactory, Scheduler};

fn run_simulation(nr_processes: usize) {
    let mut scheduler = Scheduler::new(42);
    scheduler.add_queue(4, 8, 32);
    scheduler.add_queue(4, 16, 64);
    scheduler.add_queue(8, 0, 128);

    let mut factory = ProcessFactory::new(42);
    for process in factory.create_batch(nr_processes) {
        scheduler.add_process(process);
    }

    scheduler.run();
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("mlfq");
    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("run", n), &n, |b, &n| {
            b.iter(|| run_simulation(n));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_throughput);
criterion_main!(benches);
