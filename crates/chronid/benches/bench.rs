use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use chronid::{
    FastRandom, Id, MonotonicClock, ObjectId, ObjectIdGenerator, ThreadRandom, TimeSource, Ulid,
    UlidGenerator,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

#[derive(Clone)]
struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Benchmarks a single-threaded hot path producing `TOTAL_IDS` values per
/// iteration from a fresh generator.
fn bench_sequential<G, O>(
    c: &mut Criterion,
    group_name: &str,
    generator_fn: impl Fn() -> G,
    next: impl Fn(&G) -> O,
) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator = generator_fn();
                for _ in 0..TOTAL_IDS {
                    black_box(next(&generator));
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks one generator shared by several threads, all released together.
fn bench_contended<G, O>(
    c: &mut Criterion,
    group_name: &str,
    generator_fn: impl Fn() -> G,
    next: impl Fn(&G) -> O + Sync,
) where
    G: Clone + Send,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(format!("elems/{TOTAL_IDS}/threads/{thread_count}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();

                for _ in 0..iters {
                    let generator = generator_fn();
                    let barrier = Arc::new(Barrier::new(thread_count + 1));
                    scope(|s| {
                        for _ in 0..thread_count {
                            let generator = generator.clone();
                            let barrier = Arc::clone(&barrier);
                            let next = &next;
                            s.spawn(move || {
                                barrier.wait();
                                for _ in 0..ids_per_thread {
                                    black_box(next(&generator));
                                }
                            });
                        }
                        barrier.wait();
                    });
                }

                start.elapsed()
            });
        });
    }

    group.finish();
}

fn benchmark_mock_sequential_monotonic(c: &mut Criterion) {
    bench_sequential(
        c,
        "mock/sequential/ulid/monotonic",
        || UlidGenerator::with_sources(FixedMockTime { millis: 1 }, FastRandom, ThreadRandom),
        |g| g.generate_monotonic().unwrap(),
    );
}

fn benchmark_mono_sequential_monotonic(c: &mut Criterion) {
    let clock = MonotonicClock::default();
    bench_sequential(
        c,
        "mono/sequential/ulid/monotonic",
        || UlidGenerator::with_sources(clock.clone(), FastRandom, ThreadRandom),
        |g| g.generate_monotonic().unwrap(),
    );
}

fn benchmark_sequential_random(c: &mut Criterion) {
    bench_sequential(
        c,
        "system/sequential/ulid/random",
        UlidGenerator::new,
        |g| g.generate_random().unwrap(),
    );
}

fn benchmark_sequential_crypto(c: &mut Criterion) {
    bench_sequential(
        c,
        "system/sequential/ulid/crypto",
        UlidGenerator::new,
        |g| g.generate_crypto().unwrap(),
    );
}

/// One locked batch per iteration instead of `TOTAL_IDS` separate calls.
fn benchmark_batch_monotonic(c: &mut Criterion) {
    let mut group = c.benchmark_group("system/batch/ulid/monotonic");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        let generator = UlidGenerator::new();
        b.iter(|| black_box(generator.generate_batch(TOTAL_IDS as i64).unwrap()));
    });
    group.finish();
}

fn benchmark_sequential_object_id(c: &mut Criterion) {
    bench_sequential(
        c,
        "system/sequential/objectid",
        ObjectIdGenerator::new,
        |g| g.generate().unwrap(),
    );
}

fn benchmark_contended_monotonic(c: &mut Criterion) {
    let clock = MonotonicClock::default();
    bench_contended(
        c,
        "mono/contended/ulid/monotonic",
        || UlidGenerator::with_sources(clock.clone(), FastRandom, ThreadRandom),
        |g| g.generate_monotonic().unwrap(),
    );
}

fn benchmark_contended_object_id(c: &mut Criterion) {
    let clock = MonotonicClock::default();
    bench_contended(
        c,
        "mono/contended/objectid",
        || ObjectIdGenerator::with_sources(clock.clone(), &FastRandom),
        |g| g.generate().unwrap(),
    );
}

fn benchmark_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(1));

    let ulid = Ulid::from_parts(1_469_922_850_259, 1_012_768_647_078_601_740_696_923);
    let ulid_text = ulid.format();
    group.bench_function("ulid/format", |b| b.iter(|| black_box(black_box(ulid).format())));
    group.bench_function("ulid/parse", |b| {
        b.iter(|| Ulid::parse(black_box(ulid_text.as_str())).unwrap());
    });

    let oid = ObjectId::from_parts(0x507f_1f77, 0xbc_f86c_d799, 0x43_9011);
    let oid_text = oid.format();
    group.bench_function("objectid/format", |b| b.iter(|| black_box(black_box(oid).format())));
    group.bench_function("objectid/parse", |b| {
        b.iter(|| ObjectId::parse(black_box(oid_text.as_str())).unwrap());
    });

    group.bench_function("ulid/hash64", |b| b.iter(|| black_box(ulid).hash64()));
    group.finish();
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential_monotonic,
    // Monotonic and system clocks
    benchmark_mono_sequential_monotonic,
    benchmark_sequential_random,
    benchmark_sequential_crypto,
    benchmark_batch_monotonic,
    benchmark_sequential_object_id,
    // Shared across threads
    benchmark_contended_monotonic,
    benchmark_contended_object_id,
    // Text codecs
    benchmark_codecs,
);
criterion_main!(benches);
