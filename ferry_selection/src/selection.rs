// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection model: click, ctrl-click, and shift-click semantics within a level.

use alloc::vec::Vec;

use crate::level::Level;
use crate::record::ItemRef;

/// Live modifier-key state consulted by [`Selection::select`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl (or Cmd on macOS) is held.
    pub ctrl: bool,
    /// Shift is held.
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
    };
    /// Only ctrl/cmd held.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
    };
    /// Only shift held.
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
    };
}

/// Ordered multi-selection with a range anchor.
///
/// Order is insertion order, except after a range selection, where it is the
/// level order of the range. Every member belongs to the level it was selected
/// in; callers clear the selection whenever the level is recomputed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<ItemRef>,
    anchor: Option<ItemRef>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on `item` with the given modifiers.
    ///
    /// Returns `false` (and leaves the selection alone) when `item` is not part
    /// of `level`.
    ///
    /// Unselected item:
    /// - ctrl appends it and makes it the anchor;
    /// - shift replaces the selection with the level range between the anchor
    ///   and `item`; without a usable anchor this is a plain click;
    /// - otherwise it becomes the only selected item and the anchor.
    ///
    /// Selected item:
    /// - shift clears the selection and the anchor;
    /// - ctrl removes it; if it was the anchor, the last remaining item takes over;
    /// - otherwise it becomes the only selected item and the anchor.
    pub fn select<I>(&mut self, item: &ItemRef, modifiers: Modifiers, level: &Level<I>) -> bool {
        let Some(clicked_at) = level.position(item) else {
            return false;
        };
        match self.items.iter().position(|s| s == item) {
            None if modifiers.ctrl => {
                self.items.push(item.clone());
                self.anchor = Some(item.clone());
            }
            None if modifiers.shift => {
                let anchor_at = self.anchor.as_ref().and_then(|a| level.position(a));
                match anchor_at {
                    Some(anchor_at) => {
                        let (lo, hi) = if anchor_at < clicked_at {
                            (anchor_at, clicked_at)
                        } else {
                            (clicked_at, anchor_at)
                        };
                        self.items.clear();
                        self.items.extend_from_slice(&level.refs()[lo..=hi]);
                    }
                    None => self.replace_with(item),
                }
            }
            None => self.replace_with(item),
            Some(_) if modifiers.shift => {
                self.items.clear();
                self.anchor = None;
            }
            Some(idx) if modifiers.ctrl => {
                let removed = self.items.remove(idx);
                if self.anchor.as_ref() == Some(&removed) {
                    self.anchor = self.items.last().cloned();
                }
            }
            Some(_) => self.replace_with(item),
        }
        true
    }

    /// Empty the selection. The anchor is kept; it only matters while something is selected.
    pub fn deselect_all(&mut self) {
        self.items.clear();
    }

    /// Make `item` the only selected item without moving the anchor.
    ///
    /// Used when a drag starts on an item that is not selected.
    pub fn collapse_to(&mut self, item: ItemRef) {
        self.items.clear();
        self.items.push(item);
    }

    /// Returns true if `item` is selected.
    pub fn contains(&self, item: &ItemRef) -> bool {
        self.items.contains(item)
    }

    /// Selected items in selection order.
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// The range anchor, if any.
    pub fn anchor(&self) -> Option<&ItemRef> {
        self.anchor.as_ref()
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn replace_with(&mut self, item: &ItemRef) {
        self.items.clear();
        self.items.push(item.clone());
        self.anchor = Some(item.clone());
    }
}
