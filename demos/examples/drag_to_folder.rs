// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag two files onto a folder, then let the host react.
//!
//! Walks through a whole drag: ctrl-selection, drag start, hovering a folder,
//! the drop request, and the host moving the files before the clones go home.
//!
//! Run:
//! - `RUST_LOG=ferry_drag=trace cargo run -p ferry_demos --example drag_to_folder`

use std::time::Duration;

use ferry_drag::{BrowserConfig, BrowserEvent, DragStatus, FolderBrowser, Platform};
use ferry_scene::{ElementFlags, ElementId, LocalElement};
use ferry_selection::ItemKind;
use kurbo::{Affine, Point, Rect};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

const ROW: f64 = 40.0;
const CTRL: u32 = 17;

fn mount(browser: &mut FolderBrowser<Value>, kind: ItemKind, item: &Value, index: u8) -> ElementId {
    let mut flags = ElementFlags::default();
    if kind == ItemKind::Folder {
        flags |= ElementFlags::FOLDER_TARGET;
    }
    let scene = browser.scene_mut();
    let row = scene.insert(
        None,
        LocalElement {
            bounds: Rect::new(0.0, 0.0, 320.0, 32.0),
            transform: Affine::translate((0.0, f64::from(index) * ROW)),
            flags,
            ..Default::default()
        },
    );
    scene.insert(
        Some(row),
        LocalElement {
            bounds: Rect::new(8.0, 4.0, 160.0, 28.0),
            flags: ElementFlags::default() | ElementFlags::CURSOR_HANDLE,
            ..Default::default()
        },
    );
    browser.register(row, kind, item.clone());
    row
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let photos = json!({ "uid": 1, "parent_uid": 0, "name": "photos" });
    let beach = json!({ "uid": 2, "parent_uid": 0, "name": "beach.jpg" });
    let dunes = json!({ "uid": 3, "parent_uid": 0, "name": "dunes.jpg" });

    let mut browser = FolderBrowser::new(BrowserConfig::default(), Platform::detect("Win32", "Chrome"))
        .expect("default config is valid");
    browser.set_data(vec![photos.clone()], vec![beach.clone(), dunes.clone()], None);

    let photos_row = mount(&mut browser, ItemKind::Folder, &photos, 0);
    let beach_row = mount(&mut browser, ItemKind::File, &beach, 1);
    let dunes_row = mount(&mut browser, ItemKind::File, &dunes, 2);

    // Click beach.jpg, ctrl-click dunes.jpg.
    browser.select_item(beach_row);
    browser.key_down(CTRL);
    browser.select_item(dunes_row);
    browser.key_up(CTRL);
    println!("selected: {:?}", browser.selection().items());

    // Press on beach.jpg; the drag library reports a drag.
    let mut now = Duration::ZERO;
    browser.pointer_down();
    browser.drag_start(beach_row);
    println!("clones: {}", browser.cursor_clones().len());

    // Sweep up to the folder, one frame at a time.
    for y in [48.0, 36.0, 24.0, 12.0] {
        now += Duration::from_millis(16);
        browser.tick(now);
        browser.pointer_move(Point::new(60.0, y));
    }
    let hovered = browser.hovered_folder().cloned();
    println!("hovered: {:?}", hovered.as_ref().map(|f| &f["name"]));
    assert_eq!(hovered.as_ref(), Some(&photos));
    assert_eq!(browser.drag_session().map(|s| s.target), Some(Some(photos_row)));

    browser.drop();
    let events = browser.take_events();
    for event in &events {
        if let BrowserEvent::Drop { items, target } = event {
            let names: Vec<_> = items.iter().map(|i| &i["name"]).collect();
            println!("move {names:?} into {}", target["name"]);
        }
    }
    assert_eq!(
        events,
        [BrowserEvent::Drop {
            items: vec![beach.clone(), dunes.clone()],
            target: photos.clone(),
        }]
    );

    // The host moves the files right away: the clones vanish instead of flying home.
    let moved: Vec<Value> = [beach, dunes]
        .into_iter()
        .map(|mut f| {
            f["parent_uid"] = json!(1);
            f
        })
        .collect();
    browser.set_files(moved);
    assert_eq!(browser.status(), DragStatus::Idle);
    assert!(browser.cursor_clones().is_empty());
    println!("top level now shows {} item(s)", browser.level().len());
}
