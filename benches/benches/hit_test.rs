// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use stagecraft_objects::{Container, MAX_OBJECTS, ObjectRegistry, PlacedObject, StagePoint};
use stagecraft_pointer::{DEFAULT_SELECTION_THRESHOLD, pick_visible};

fn registry(len: usize) -> ObjectRegistry {
    let containers = Container::ALL;
    let objects = (0..len as u32).map(|i| {
        PlacedObject::new(
            StagePoint::new((i * 37) % 1024, (i * 91) % 768),
            0,
            vec![0; 8],
            0xE140,
            containers[i as usize % containers.len()],
        )
    });
    ObjectRegistry::from_objects(objects).expect("fits the default limit")
}

fn bench_pick_visible(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test/pick_visible");

    // A click that hits nothing scans every object, which is the worst case.
    let miss = Point::new(-100.0, -100.0);
    for len in [16usize, 64, MAX_OBJECTS] {
        let reg = registry(len);
        group.throughput(Throughput::Elements(len as u64));
        for filter in [Some(Container::AllTables), Some(Container::InitialTable)] {
            let name = format!("{len}/{}", filter.map_or("none".into(), |f| f.to_string()));
            group.bench_with_input(BenchmarkId::new("miss", name), &reg, |b, reg| {
                b.iter(|| {
                    black_box(pick_visible(
                        reg,
                        filter,
                        black_box(miss),
                        DEFAULT_SELECTION_THRESHOLD,
                    ))
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_pick_visible);
criterion_main!(benches);
