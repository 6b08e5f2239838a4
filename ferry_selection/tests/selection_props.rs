// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the selection model over arbitrary click sequences.

use ferry_selection::{FieldNames, FieldValue, ItemRef, Level, Modifiers, Record, Selection};
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct Entry(i64);

impl Record for Entry {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "uid" => Some(FieldValue::Int(self.0)),
            "parent_uid" => Some(FieldValue::Int(0)),
            _ => None,
        }
    }
}

fn level(folders: usize, files: usize) -> Level<Entry> {
    let folders: Vec<Entry> = (0..folders as i64).map(|i| Entry(i + 1)).collect();
    let files: Vec<Entry> = (0..files as i64).map(|i| Entry(i + 1)).collect();
    Level::compute(&folders, &files, None, &FieldNames::default())
}

fn modifiers() -> impl Strategy<Value = Modifiers> {
    (any::<bool>(), any::<bool>()).prop_map(|(ctrl, shift)| Modifiers { ctrl, shift })
}

/// A level plus a history of clicks (position in level, modifiers) to replay.
fn scenario() -> impl Strategy<Value = (Level<Entry>, Vec<(usize, Modifiers)>)> {
    (0usize..5, 1usize..6).prop_flat_map(|(folders, files)| {
        let len = folders + files;
        (
            Just(level(folders, files)),
            prop::collection::vec((0..len, modifiers()), 0..12),
        )
    })
}

fn replay(level: &Level<Entry>, clicks: &[(usize, Modifiers)]) -> Selection {
    let mut sel = Selection::new();
    for (at, mods) in clicks {
        let item = level.refs()[*at].clone();
        sel.select(&item, *mods, level);
    }
    sel
}

fn is_contiguous(level: &Level<Entry>, items: &[ItemRef]) -> bool {
    let Some(first) = items.first().and_then(|i| level.position(i)) else {
        return true;
    };
    items
        .iter()
        .enumerate()
        .all(|(n, item)| level.position(item) == Some(first + n))
}

proptest! {
    #[test]
    fn plain_click_always_yields_singleton(
        (level, history) in scenario(),
        at in 0usize..11,
    ) {
        let mut sel = replay(&level, &history);
        let item = level.refs()[at % level.len()].clone();
        sel.select(&item, Modifiers::NONE, &level);
        prop_assert_eq!(sel.items(), &[item][..]);
    }

    #[test]
    fn ctrl_click_on_selected_removes_only_that_item(
        (level, history) in scenario(),
        pick in 0usize..11,
    ) {
        let mut sel = replay(&level, &history);
        prop_assume!(!sel.is_empty());
        let item = sel.items()[pick % sel.len()].clone();
        let mut expected = sel.items().to_vec();
        expected.retain(|i| *i != item);

        sel.select(&item, Modifiers::CTRL, &level);
        prop_assert_eq!(sel.items(), &expected[..]);
    }

    #[test]
    fn shift_click_yields_contiguous_range_with_both_ends(
        (level, history) in scenario(),
        at in 0usize..11,
    ) {
        let mut sel = replay(&level, &history);
        let item = level.refs()[at % level.len()].clone();
        prop_assume!(!sel.contains(&item));
        let anchor = sel.anchor().cloned();

        sel.select(&item, Modifiers::SHIFT, &level);
        prop_assert!(is_contiguous(&level, sel.items()));
        prop_assert!(sel.contains(&item));
        if let Some(anchor) = anchor.filter(|a| level.contains(a)) {
            prop_assert!(sel.contains(&anchor));
        }
    }

    #[test]
    fn selection_stays_inside_level((level, history) in scenario()) {
        let sel = replay(&level, &history);
        prop_assert!(sel.items().iter().all(|i| level.contains(i)));
    }

    #[test]
    fn deselect_all_twice_equals_once((level, history) in scenario()) {
        let mut sel = replay(&level, &history);
        sel.deselect_all();
        let once = sel.clone();
        sel.deselect_all();
        prop_assert_eq!(sel, once);
    }
}
