use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use limit_order_manager::domain::{Record, RecordStore, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BOOK_SIZE: u64 = 10_000;

fn random_records(count: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(42);
    (1..=count)
        .map(|id| {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            Record::new(id, rng.gen_range(100.0..200.0), rng.gen_range(1..=1000), side)
        })
        .collect()
}

fn filled_store(records: &[Record]) -> RecordStore {
    let mut store = RecordStore::with_capacity(records.len());
    for record in records {
        store.add(*record);
    }
    store
}

fn hot_path_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("RecordStore hot path");
    let records = random_records(BOOK_SIZE);

    group.bench_function("add 10k records", |b| {
        b.iter_batched(
            || RecordStore::with_capacity(records.len()),
            |mut store| {
                for record in &records {
                    store.add(black_box(*record));
                }
                store
            },
            BatchSize::SmallInput,
        );
    });

    // 母版订单簿，每次迭代克隆
    let master = filled_store(&records);

    group.bench_function("cancel 1k records", |b| {
        b.iter_batched(
            || master.clone(),
            |mut store| {
                for id in 1..=1000 {
                    store.cancel(black_box(id));
                }
                store
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("get hit", |b| {
        b.iter(|| master.get(black_box(BOOK_SIZE / 2)).map(|r| r.price()));
    });

    group.finish();
}

fn snapshot_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("SnapshotView render");
    let records = random_records(BOOK_SIZE);
    let master = filled_store(&records);

    group.bench_function("render dirty (rebuild + sort)", |b| {
        b.iter_batched(
            || master.clone(),
            |mut store| {
                black_box(store.render().len());
                store
            },
            BatchSize::SmallInput,
        );
    });

    let mut clean = master.clone();
    clean.render();
    group.bench_function("render clean (sort only)", |b| {
        b.iter(|| clean.render().len());
    });

    group.finish();
}

criterion_group!(benches, hot_path_benchmark, snapshot_benchmark);
criterion_main!(benches);
