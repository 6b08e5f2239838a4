// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ferry Drag: the selection and drag-lifecycle coordinator of a folder browser.
//!
//! Users select items of the current directory level with plain, ctrl/cmd, and
//! shift clicks, drag the selection by any selected item, and drop it on a
//! folder. This crate ties the pieces together:
//!
//! - [`FolderBrowser`]: the coordinator. It owns the element [`Scene`](ferry_scene::Scene)
//!   the host lays rows out in, the [`Registry`] of which element renders which
//!   item, the selection, and the drag lifecycle.
//! - [`CursorOverlay`]: clones of the dragged items that follow the pointer and
//!   ease back home when a drag ends.
//! - [`ListenerScope`] / [`InputHub`]: window listeners that live exactly as long
//!   as the browser.
//! - [`InputProfile`]: platform-dependent key codes and event names, resolved once.
//! - [`BrowserConfig`]: field names and overlay timing, loadable from JSON.
//!
//! The drag library of the host only reports that a drag started and that it
//! ended. Hit testing during the drag is done here, against the scene.
//!
//! ## Time
//!
//! Nothing here reads a clock. The host calls [`FolderBrowser::tick`] with a
//! monotonic time, typically once per frame; each call is one scheduling turn.
//!
//! ## Example
//!
//! ```
//! use ferry_drag::{BrowserConfig, BrowserEvent, FolderBrowser, Platform};
//! use ferry_scene::{ElementFlags, LocalElement};
//! use ferry_selection::ItemKind;
//! use kurbo::{Affine, Point, Rect};
//! use serde_json::json;
//!
//! let mut browser = FolderBrowser::new(BrowserConfig::default(), Platform::native()).unwrap();
//! let docs = json!({ "uid": 1, "parent_uid": 0, "name": "docs" });
//! let notes = json!({ "uid": 2, "parent_uid": 0, "name": "notes.txt" });
//! browser.set_data(vec![docs.clone()], vec![notes.clone()], None);
//!
//! // The host lays out one row per item and registers it.
//! let row = |y: f64, flags: ElementFlags| LocalElement {
//!     bounds: Rect::new(0.0, 0.0, 200.0, 32.0),
//!     transform: Affine::translate((0.0, y)),
//!     flags: ElementFlags::default() | flags,
//!     ..Default::default()
//! };
//! let docs_row = browser.scene_mut().insert(None, row(0.0, ElementFlags::FOLDER_TARGET));
//! let notes_row = browser.scene_mut().insert(None, row(40.0, ElementFlags::empty()));
//! browser.register(docs_row, ItemKind::Folder, docs.clone());
//! browser.register(notes_row, ItemKind::File, notes.clone());
//!
//! // Press on the file, drag it onto the folder, release.
//! browser.pointer_down();
//! browser.drag_start(notes_row);
//! browser.pointer_move(Point::new(20.0, 10.0));
//! browser.drop();
//!
//! assert_eq!(
//!     browser.take_events(),
//!     [BrowserEvent::Drop { items: vec![notes], target: docs }]
//! );
//! ```

mod browser;
mod config;
mod drag;
mod events;
mod input;
mod overlay;
mod platform;
mod registry;
mod schedule;

pub use browser::FolderBrowser;
pub use config::{BrowserConfig, ConfigError, OverlayConfig};
pub use drag::{DragSession, DragStatus, pick_drop_target};
pub use events::BrowserEvent;
pub use input::{DirectInput, InputHub, InputState, ListenerKind, ListenerScope, ListenerToken};
pub use overlay::{Badge, CloneVisual, CursorOverlay};
pub use platform::{Engine, InputProfile, Os, Platform, SHIFT_KEY};
pub use registry::Registry;
pub use schedule::{Scheduler, TaskId};
