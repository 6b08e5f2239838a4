// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use ferry_selection::{FieldNames, FieldValue, ItemRef, Level, Modifiers, Record, Selection};

#[derive(Clone)]
struct Entry {
    uid: i64,
    parent: i64,
}

impl Record for Entry {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "uid" => Some(FieldValue::Int(self.uid)),
            "parent_uid" => Some(FieldValue::Int(self.parent)),
            _ => None,
        }
    }
}

/// `n` folders and `n` files spread over four parents, a quarter at the top level.
fn gen_items(n: i64) -> (Vec<Entry>, Vec<Entry>) {
    let folders = (1..=n)
        .map(|uid| Entry { uid, parent: uid % 4 })
        .collect();
    let files = (n + 1..=2 * n)
        .map(|uid| Entry { uid, parent: uid % 4 })
        .collect();
    (folders, files)
}

fn bench_level_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_compute");
    let fields = FieldNames::default();
    for &n in &[256i64, 4096] {
        let (folders, files) = gen_items(n);
        group.throughput(Throughput::Elements(2 * n as u64));
        group.bench_function(format!("items_n{}", 2 * n), |b| {
            b.iter(|| black_box(Level::compute(&folders, &files, None, &fields).len()));
        });
    }
    group.finish();
}

fn bench_range_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_select");
    let (folders, files) = gen_items(4096);
    let level = Level::compute(&folders, &files, None, &FieldNames::default());
    let refs: Vec<ItemRef> = level.refs().to_vec();
    group.bench_function("shift_click_sweep", |b| {
        b.iter(|| {
            let mut selection = Selection::new();
            selection.select(&refs[0], Modifiers::NONE, &level);
            for r in refs.iter().step_by(64) {
                selection.select(r, Modifiers::SHIFT, &level);
                // Shift-clicking a selected item clears; re-anchor for the next sweep.
                selection.select(&refs[0], Modifiers::NONE, &level);
            }
            black_box(selection.len());
        });
    });
    group.bench_function("ctrl_click_toggle", |b| {
        b.iter(|| {
            let mut selection = Selection::new();
            for r in refs.iter().step_by(8) {
                selection.select(r, Modifiers::CTRL, &level);
            }
            for r in refs.iter().step_by(16) {
                selection.select(r, Modifiers::CTRL, &level);
            }
            black_box(selection.len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_level_compute, bench_range_select);
criterion_main!(benches);
