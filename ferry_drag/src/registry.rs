// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test registry: the two-way association between scene elements and items.

use std::collections::HashMap;

use ferry_scene::ElementId;
use ferry_selection::ItemRef;

/// Element ↔ item lookup, populated by item views as they mount and unmount.
///
/// The registry only associates; it never owns the elements. The two maps are
/// kept as exact inverses for every registered pair, including when views
/// mount and unmount out of order.
#[derive(Clone, Debug)]
pub struct Registry<I> {
    by_element: HashMap<ElementId, (ItemRef, I)>,
    by_item: HashMap<ItemRef, ElementId>,
}

impl<I> Default for Registry<I> {
    fn default() -> Self {
        Self {
            by_element: HashMap::new(),
            by_item: HashMap::new(),
        }
    }
}

impl<I> Registry<I> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `element` with `item`.
    ///
    /// Any previous association of either side is dropped first, so a view that
    /// remounts before its predecessor unmounts simply takes over.
    pub fn register(&mut self, element: ElementId, item_ref: ItemRef, item: I) {
        if let Some((old_ref, _)) = self.by_element.remove(&element)
            && self.by_item.get(&old_ref) == Some(&element)
        {
            self.by_item.remove(&old_ref);
        }
        if let Some(old_element) = self.by_item.insert(item_ref.clone(), element)
            && old_element != element
        {
            self.by_element.remove(&old_element);
        }
        self.by_element.insert(element, (item_ref, item));
    }

    /// Drop the association of `element` with `item_ref`.
    ///
    /// Entries that were already replaced by a newer registration are left alone;
    /// unknown elements are ignored.
    pub fn unregister(&mut self, element: ElementId, item_ref: &ItemRef) {
        if self
            .by_element
            .get(&element)
            .is_some_and(|(r, _)| r == item_ref)
        {
            self.by_element.remove(&element);
        }
        if self.by_item.get(item_ref) == Some(&element) {
            self.by_item.remove(item_ref);
        }
    }

    /// The item rendered by `element`.
    pub fn resolve(&self, element: ElementId) -> Option<(&ItemRef, &I)> {
        self.by_element.get(&element).map(|(r, i)| (r, i))
    }

    /// The element currently rendering `item_ref`.
    pub fn element_for(&self, item_ref: &ItemRef) -> Option<ElementId> {
        self.by_item.get(item_ref).copied()
    }

    /// Returns true if `element` renders some item.
    pub fn contains_element(&self, element: ElementId) -> bool {
        self.by_element.contains_key(&element)
    }

    /// Number of registered pairs.
    pub fn len(&self) -> usize {
        self.by_element.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_element.is_empty()
    }

    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        self.by_element.len() == self.by_item.len()
            && self
                .by_element
                .iter()
                .all(|(e, (r, _))| self.by_item.get(r) == Some(e))
    }
}
