use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use heapdex_core::IndexedHeap;

fn random_values(rng: &mut fastrand::Rng, n: usize) -> Vec<u64> {
    let mut values: Vec<u64> = (0..n).map(|_| rng.u64(..)).collect();
    values.sort_unstable();
    values.dedup();
    rng.shuffle(&mut values);
    values
}

fn bench_add_remove_min(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(12345);
    let values = random_values(&mut rng, 10_000);

    c.bench_function("indexed_heap_add_remove_min", |b| {
        b.iter(|| {
            let mut heap = IndexedHeap::new();
            for &v in &values {
                heap.add(black_box(v)).unwrap();
            }
            while let Ok(min) = heap.remove_min() {
                black_box(min);
            }
        })
    });
}

fn bench_replace(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(12345);
    let values = random_values(&mut rng, 10_000);

    let mut heap = IndexedHeap::new();
    for &v in &values {
        heap.add(v).unwrap();
    }

    c.bench_function("indexed_heap_replace", |b| {
        b.iter(|| {
            let old = values[rng.usize(..values.len())];
            let new = rng.u64(..);
            if heap.replace(black_box(&old), new).is_ok() {
                let _ = heap.replace(&new, old);
            }
        })
    });
}

fn bench_remove_arbitrary(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(12345);
    let values = random_values(&mut rng, 10_000);

    let mut heap = IndexedHeap::new();
    for &v in &values {
        heap.add(v).unwrap();
    }

    c.bench_function("indexed_heap_remove", |b| {
        b.iter(|| {
            let item = values[rng.usize(..values.len())];
            heap.remove(black_box(&item)).unwrap();
            heap.add(item).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_add_remove_min,
    bench_replace,
    bench_remove_arbitrary
);
criterion_main!(benches);
