use criterion::{criterion_group, criterion_main, Criterion};

use drumscope::capture::testing::ScriptedTap;
use drumscope::capture::{reconcile, CaptureTask, SampleCollector};
use drumscope::{DEFAULT_CAPACITY, DEFAULT_FRAME_WIDTH};

/// A full capture at display rate: 100 frames of 1024 samples each.
fn full_collector() -> SampleCollector {
    let mut tap = ScriptedTap::new(DEFAULT_FRAME_WIDTH, 0.0, 1.0 / 60.0);
    let collector = SampleCollector::new(48_000.0, DEFAULT_FRAME_WIDTH, DEFAULT_CAPACITY);
    let mut task = CaptureTask::new(collector, f64::MAX);
    while !task.is_done() {
        task.tick(&mut tap);
    }
    task.into_collector()
}

fn bench_reconcile(c: &mut Criterion) {
    let collector = full_collector();
    c.bench_function("reconcile_100x1024", |b| {
        b.iter(|| reconcile(std::hint::black_box(&collector)))
    });
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
