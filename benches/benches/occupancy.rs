// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stagecraft_objects::{
    AddressAllocator, Container, MAX_OBJECTS, ObjectRegistry, PlacedObject, StagePoint,
};

fn registry(len: usize) -> ObjectRegistry {
    let objects = (0..len as u16).map(|i| {
        PlacedObject::new(
            StagePoint::new(u32::from(i), 0),
            0,
            vec![0; 8],
            0xE140 + (i * 0x23) % 0x1A40,
            Container::RegionTable,
        )
    });
    ObjectRegistry::from_objects(objects).expect("fits the default limit")
}

fn bench_block_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("occupancy/block_table");
    let allocator = AddressAllocator::default();

    for len in [0usize, 64, MAX_OBJECTS] {
        let reg = registry(len);
        let exclude = reg.iter().next().map(|(id, _)| id);
        group.throughput(Throughput::Elements(allocator.layout().block_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &reg, |b, reg| {
            b.iter(|| black_box(allocator.block_table(reg, black_box(exclude))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_block_table);
criterion_main!(benches);
