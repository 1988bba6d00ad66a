// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use stagecraft::{
    Container, DefaultPalette, ObjectRegistry, PlacedObject, StagePoint, StageViewport,
    build_frame,
};
use stagecraft_objects::MAX_OBJECTS;

fn bench_build_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame/build");

    // Heavy stacking exercises the per-position counting map.
    for distinct in [1u32, 16, MAX_OBJECTS as u32] {
        let objects = (0..MAX_OBJECTS as u32).map(|i| {
            let slot = i % distinct;
            PlacedObject::new(
                StagePoint::new(slot * 3, slot * 2),
                0,
                vec![0; 8],
                0xE140,
                Container::AllTables,
            )
        });
        let reg = ObjectRegistry::from_objects(objects).expect("fits the default limit");
        let mut view = StageViewport::new(Size::new(800.0, 600.0), Size::new(1024.0, 768.0));
        view.set_scale(2.0);
        group.bench_with_input(BenchmarkId::new("positions", distinct), &reg, |b, reg| {
            b.iter(|| {
                black_box(build_frame(
                    &view,
                    reg,
                    Some(Container::AllTables),
                    None,
                    &DefaultPalette,
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_frame);
criterion_main!(benches);
