// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ferry Scene: a headless, Kurbo-native element scene for pointer hit testing.
//!
//! A drag-and-drop coordinator cannot rely on a drag library's own hit testing; it
//! needs to ask "what is under this point, front to back?" itself. This crate
//! answers that question over a lightweight stand-in for the rendered view tree.
//!
//! - Represents a hierarchy of rectangles with local transforms, z-order, and flags.
//! - Reports every element under a point, ordered front-to-back.
//! - Deep-clones subtrees (for cursor clones that follow the pointer) while
//!   keeping their world geometry.
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything.
//! Upstream code computes positions and sizes and keeps the scene in sync.
//!
//! ## API overview
//!
//! - [`Scene`]: container managing elements.
//! - [`LocalElement`]: per-element local data (bounds, transform, z, flags).
//! - [`ElementFlags`]: visibility, picking, and drag roles such as
//!   [`ElementFlags::FOLDER_TARGET`] and [`ElementFlags::DRAG_MIRROR`].
//! - [`ElementId`]: generational handle of an element.
//! - [`QueryFilter`]: restricts hit results (visible/pickable).
//!
//! ### Minimal usage
//!
//! ```
//! use ferry_scene::{ElementFlags, LocalElement, QueryFilter, Scene};
//! use kurbo::{Point, Rect};
//!
//! let mut scene = Scene::new();
//! let list = scene.insert(
//!     None,
//!     LocalElement { bounds: Rect::new(0.0, 0.0, 300.0, 400.0), ..Default::default() },
//! );
//! let folder = scene.insert(
//!     Some(list),
//!     LocalElement {
//!         bounds: Rect::new(0.0, 0.0, 300.0, 32.0),
//!         flags: ElementFlags::default() | ElementFlags::FOLDER_TARGET,
//!         ..Default::default()
//!     },
//! );
//!
//! let hits = scene.hits_at(Point::new(20.0, 10.0), QueryFilter::PICKING);
//! assert_eq!(hits, [folder, list]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scene;
mod types;

pub use scene::{Hit, QueryFilter, Scene};
pub use types::{ElementFlags, ElementId, LocalElement};
