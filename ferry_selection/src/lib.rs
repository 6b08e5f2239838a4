// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ferry Selection: directory levels and modifier-key multi-selection.
//!
//! ## Overview
//!
//! A folder browser shows one directory level at a time: the folders, then the
//! files, whose parent is the active folder. Users pick items out of that level
//! with plain, ctrl/cmd, and shift clicks. This crate holds those two pieces and
//! nothing else; it has no notion of pointers, drags, or rendering.
//!
//! - [`Record`]: read access to application-owned items through configurable
//!   field names ([`FieldNames`]). With the `json` feature, `serde_json::Value`
//!   objects are records.
//! - [`Level`]: the items of the active folder, folders first.
//! - [`Selection`]: ordered selection with a range anchor.
//!
//! ## Example
//!
//! ```
//! use ferry_selection::{FieldNames, FieldValue, ItemRef, Level, Modifiers, Record, Selection};
//!
//! #[derive(Clone)]
//! struct Entry { uid: i64, parent: i64 }
//!
//! impl Record for Entry {
//!     fn field(&self, name: &str) -> Option<FieldValue<'_>> {
//!         match name {
//!             "uid" => Some(FieldValue::Int(self.uid)),
//!             "parent_uid" => Some(FieldValue::Int(self.parent)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let files = [Entry { uid: 1, parent: 0 }, Entry { uid: 2, parent: 0 }, Entry { uid: 3, parent: 0 }];
//! let level = Level::compute(&[], &files, None, &FieldNames::default());
//!
//! let mut selection = Selection::new();
//! selection.select(&ItemRef::file("1"), Modifiers::NONE, &level);
//! selection.select(&ItemRef::file("3"), Modifiers::SHIFT, &level);
//! assert_eq!(selection.len(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod level;
mod record;
mod selection;

pub use level::Level;
pub use record::{FieldNames, FieldValue, ItemKey, ItemKind, ItemRef, Record};
pub use selection::{Modifiers, Selection};
