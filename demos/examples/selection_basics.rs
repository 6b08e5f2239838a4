// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection basics.
//!
//! Compute a level from flat folder and file lists, then click around with
//! plain, ctrl, and shift clicks.
//!
//! Run:
//! - `cargo run -p ferry_demos --example selection_basics`

use ferry_selection::{FieldNames, ItemRef, Level, Modifiers, Selection};
use serde_json::json;

fn main() {
    let folders = vec![
        json!({ "uid": 1, "parent_uid": 0, "name": "music" }),
        json!({ "uid": 2, "parent_uid": 0, "name": "video" }),
        json!({ "uid": 3, "parent_uid": 1, "name": "live" }),
    ];
    let files = vec![
        json!({ "uid": 1, "parent_uid": "0", "name": "a.txt" }),
        json!({ "uid": 5, "parent_uid": 0, "name": "b.txt" }),
        json!({ "uid": 6, "parent_uid": 1, "name": "song.ogg" }),
    ];

    let fields = FieldNames::default();
    let level = Level::compute(&folders, &files, None, &fields);
    // Folders first; file 1 is distinct from folder 1.
    assert_eq!(
        level.refs(),
        [
            ItemRef::folder("1"),
            ItemRef::folder("2"),
            ItemRef::file("1"),
            ItemRef::file("5"),
        ]
    );

    let mut selection = Selection::new();
    selection.select(&ItemRef::folder("2"), Modifiers::NONE, &level);
    selection.select(&ItemRef::file("5"), Modifiers::SHIFT, &level);
    println!("shift range: {:?}", selection.items());
    assert_eq!(selection.len(), 3);

    selection.select(&ItemRef::file("1"), Modifiers::CTRL, &level);
    println!("after ctrl toggle: {:?}", selection.items());
    assert_eq!(selection.items(), [ItemRef::folder("2"), ItemRef::file("5")]);

    // Open "music": its children form the new level.
    let music = &folders[0];
    let inside = Level::compute(&folders, &files, Some(music), &fields);
    println!(
        "inside music: {:?}",
        inside.folders().iter().chain(inside.files()).map(|i| &i["name"]).collect::<Vec<_>>()
    );
    assert_eq!(inside.len(), 2);
}
