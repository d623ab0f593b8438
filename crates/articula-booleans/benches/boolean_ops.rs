//! Benchmarks for boolean operations on joint-sized operands.
//!
//! Run with: cargo bench -p articula-booleans

#![allow(missing_docs)]

use articula_booleans::{difference, intersection, union};
use articula_math::RigidTransform;
use articula_mesh::{cuboid, cylinder, sphere, Solid};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn offset_cubes() -> (Solid, Solid) {
    let a = cuboid(10.0, 10.0, 10.0).unwrap();
    let b = a.transformed(&RigidTransform::translation(5.0, 5.0, 5.0));
    (a, b)
}

fn bench_cubes(c: &mut Criterion) {
    let (a, b) = offset_cubes();
    let mut group = c.benchmark_group("cubes");
    group.bench_function("union", |bench| {
        bench.iter(|| union(black_box(&a), black_box(&b)))
    });
    group.bench_function("difference", |bench| {
        bench.iter(|| difference(black_box(&a), black_box(&b)))
    });
    group.bench_function("intersection", |bench| {
        bench.iter(|| intersection(black_box(&a), black_box(&b)))
    });
    group.finish();
}

fn bench_shells(c: &mut Criterion) {
    let mut group = c.benchmark_group("shells");
    group.sample_size(20);

    let outer = cylinder(9.4, 16.0, 64).unwrap();
    let inner = cylinder(6.4, 17.0, 64).unwrap();
    group.bench_function("cylindrical_64", |bench| {
        bench.iter(|| difference(black_box(&outer), black_box(&inner)))
    });

    for subdivisions in [3u32, 4] {
        let outer = sphere(13.4, subdivisions).unwrap();
        let inner = sphere(10.4, subdivisions).unwrap();
        group.bench_function(format!("spherical_s{subdivisions}"), |bench| {
            bench.iter(|| difference(black_box(&outer), black_box(&inner)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cubes, bench_shells);
criterion_main!(benches);
