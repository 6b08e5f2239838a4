// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: element identifiers, flags, and local geometry.

use kurbo::{Affine, Rect};

/// Identifier for an element in the scene.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// ### Newer
///
/// An `ElementId` is considered newer than another when it has a higher generation.
/// If generations are equal, the one with the higher slot index is considered newer.
/// This total order is only used for deterministic tie-breaks in
/// [hit testing](crate::Scene::hits_at).
///
/// ### Liveness
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether an `ElementId` still refers to a live element.
/// Stale ids never alias a different live element because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility, picking, and drag roles.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is visible (participates in rendering and hit testing with `visible_only`).
        const VISIBLE       = 0b0000_0001;
        /// Element is pickable (participates in hit testing with `pickable_only`).
        const PICKABLE      = 0b0000_0010;
        /// Element accepts drops (a folder row).
        const FOLDER_TARGET = 0b0000_0100;
        /// Transient ghost owned by the drag recognizer; never a drop target.
        const DRAG_MIRROR   = 0b0000_1000;
        /// The part of an item view that is cloned to follow the cursor.
        const CURSOR_HANDLE = 0b0001_0000;
        /// Active styling, set on cursor clones.
        const ACTIVE        = 0b0010_0000;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Local geometry for an element.
#[derive(Clone, Debug)]
pub struct LocalElement {
    /// Local (untransformed) bounds.
    pub bounds: Rect,
    /// Local transform relative to parent space.
    pub transform: Affine,
    /// Z-order. Higher is drawn on top.
    pub z_index: i32,
    /// Visibility, picking, and role flags.
    pub flags: ElementFlags,
}

impl Default for LocalElement {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            transform: Affine::IDENTITY,
            z_index: 0,
            flags: ElementFlags::default(),
        }
    }
}
