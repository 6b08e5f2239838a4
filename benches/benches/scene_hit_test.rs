// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ferry_scene::{ElementFlags, LocalElement, QueryFilter, Scene};
use kurbo::{Affine, Point, Rect};

const ROW_HEIGHT: f64 = 32.0;

/// A list of `n` rows, every fourth a folder target, each with a cursor handle.
fn gen_list(n: usize) -> Scene {
    let mut scene = Scene::new();
    let list = scene.insert(
        None,
        LocalElement {
            bounds: Rect::new(0.0, 0.0, 400.0, n as f64 * ROW_HEIGHT),
            ..Default::default()
        },
    );
    for i in 0..n {
        let mut flags = ElementFlags::default();
        if i % 4 == 0 {
            flags |= ElementFlags::FOLDER_TARGET;
        }
        let row = scene.insert(
            Some(list),
            LocalElement {
                bounds: Rect::new(0.0, 0.0, 400.0, ROW_HEIGHT),
                transform: Affine::translate((0.0, i as f64 * ROW_HEIGHT)),
                flags,
                ..Default::default()
            },
        );
        scene.insert(
            Some(row),
            LocalElement {
                bounds: Rect::new(8.0, 4.0, 200.0, 28.0),
                flags: ElementFlags::default() | ElementFlags::CURSOR_HANDLE,
                ..Default::default()
            },
        );
    }
    scene
}

fn bench_hits_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("hits_at");
    for &n in &[64usize, 256, 1024] {
        let scene = gen_list(n);
        let probes: Vec<Point> = (0..n)
            .step_by(7)
            .map(|i| Point::new(50.0, i as f64 * ROW_HEIGHT + 10.0))
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("rows_n{}", n), |b| {
            b.iter(|| {
                let mut total = 0;
                for p in &probes {
                    total += scene.hits_at(*p, QueryFilter::PICKING).len();
                }
                black_box(total);
            });
        });
    }
    group.finish();
}

fn bench_clone_subtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_subtree");
    let scene = gen_list(256);
    let rows: Vec<_> = scene
        .hits_at(Point::new(50.0, 10.0), QueryFilter::PICKING)
        .into_iter()
        .collect();
    group.bench_function("cursor_handle", |b| {
        b.iter_batched(
            || scene_with_layer(gen_list(256)),
            |(mut scene, layer)| {
                for row in &rows {
                    if let Some(handle) = scene.find_descendant(*row, ElementFlags::CURSOR_HANDLE) {
                        black_box(scene.clone_subtree(handle, Some(layer)));
                    }
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn scene_with_layer(mut scene: Scene) -> (Scene, ferry_scene::ElementId) {
    let layer = scene.insert(None, LocalElement::default());
    (scene, layer)
}

criterion_group!(benches, bench_hits_at, bench_clone_subtree);
criterion_main!(benches);
