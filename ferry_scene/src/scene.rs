// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, updates, queries.

use alloc::vec::Vec;
use core::cmp::Ordering;
use kurbo::{Affine, Point, Rect};

use crate::types::{ElementFlags, ElementId, LocalElement};

/// Results of a single-target hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub element: ElementId,
    /// Path from root to element (inclusive).
    pub path: Vec<ElementId>,
}

/// Filters applied during hit testing.
///
/// Used by [`Scene::hits_at`] and [`Scene::hit_test_point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider elements that are visible along with all of their ancestors.
    pub visible_only: bool,
    /// If true, only consider elements marked [`ElementFlags::PICKABLE`].
    pub pickable_only: bool,
}

impl QueryFilter {
    /// Visible and pickable elements only; what pointer routing wants.
    pub const PICKING: Self = Self {
        visible_only: true,
        pickable_only: true,
    };
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    local: LocalElement,
}

/// World-space facts about an element, derived from its ancestry on demand.
#[derive(Clone, Copy, Debug)]
struct Resolved {
    transform: Affine,
    visible: bool,
    depth: usize,
}

/// A tree of rectangles standing in for the rendered view hierarchy.
///
/// The host inserts one element per rendered row (and whatever sub-elements it
/// wants hit-testable), keeps bounds current as layout changes, and removes
/// elements when rows unmount. Queries always reflect the latest updates; there
/// is no separate commit step.
pub struct Scene {
    elements: Vec<Option<Element>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new element as a child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the element as a root.
    pub fn insert(&mut self, parent: Option<ElementId>, local: LocalElement) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.elements.push(None);
            self.generations.push(1);
            (self.elements.len() - 1, 1)
        };
        self.elements[idx] = Some(Element {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        });
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId indices are 32-bit."
        )]
        let id = ElementId::new(idx as u32, generation);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove an element (and its subtree) from the scene.
    ///
    /// Removing a stale id is a no-op.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.element(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.element(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Update local transform.
    pub fn set_transform(&mut self, id: ElementId, tf: Affine) {
        if let Some(n) = self.element_opt_mut(id) {
            n.local.transform = tf;
        }
    }

    /// Update local bounds.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(n) = self.element_opt_mut(id) {
            n.local.bounds = bounds;
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: ElementId, z: i32) {
        if let Some(n) = self.element_opt_mut(id) {
            n.local.z_index = z;
        }
    }

    /// Replace element flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(n) = self.element_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Add or remove individual flags, leaving the rest untouched.
    pub fn toggle_flags(&mut self, id: ElementId, flags: ElementFlags, on: bool) {
        if let Some(n) = self.element_opt_mut(id) {
            n.local.flags.set(flags, on);
        }
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// See [`ElementId`] docs for the generational semantics.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.elements
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.elements.iter().filter(|n| n.is_some()).count()
    }

    /// Returns true if the scene holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Local data of a live element.
    pub fn local(&self, id: ElementId) -> Option<&LocalElement> {
        self.element_opt(id).map(|n| &n.local)
    }

    /// Flags of a live element.
    pub fn flags(&self, id: ElementId) -> Option<ElementFlags> {
        self.local(id).map(|l| l.flags)
    }

    /// Parent of a live element, or `None` for roots and stale ids.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live element in insertion (paint) order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element_opt(id).map_or(&[], |n| &n.children)
    }

    /// World transform of a live element (product of its ancestry).
    pub fn world_transform(&self, id: ElementId) -> Option<Affine> {
        self.resolve(id).map(|r| r.transform)
    }

    /// World-space bounding box of a live element.
    ///
    /// Conservative under rotation and shear.
    pub fn world_bounds(&self, id: ElementId) -> Option<Rect> {
        let r = self.resolve(id)?;
        Some(transform_rect_bbox(r.transform, self.element(id).local.bounds))
    }

    /// All elements under a world-space point, ordered front-to-back.
    ///
    /// Ordering is by z-index, then by tree depth (children paint over their
    /// parents), then by the newer [`ElementId`]. The result is what a browser's
    /// `elementsFromPoint` reports for the same layout.
    pub fn hits_at(&self, pt: Point, filter: QueryFilter) -> Vec<ElementId> {
        let mut found: Vec<(ElementId, i32, usize)> = Vec::new();
        for (idx, slot) in self.elements.iter().enumerate() {
            let Some(node) = slot else {
                continue;
            };
            if filter.pickable_only && !node.local.flags.contains(ElementFlags::PICKABLE) {
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId indices are 32-bit."
            )]
            let id = ElementId::new(idx as u32, node.generation);
            let Some(r) = self.resolve(id) else {
                continue;
            };
            if filter.visible_only && !r.visible {
                continue;
            }
            if !contains(transform_rect_bbox(r.transform, node.local.bounds), pt) {
                continue;
            }
            found.push((id, node.local.z_index, r.depth));
        }
        found.sort_unstable_by(|a, b| front_to_back(*a, *b));
        found.into_iter().map(|(id, _, _)| id).collect()
    }

    /// Hit test a world-space point. Returns the front-most element.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        let element = self.hits_at(pt, filter).into_iter().next()?;
        Some(Hit {
            element,
            path: self.path_to_root(element),
        })
    }

    /// First element in `id`'s subtree (depth-first, `id` included) carrying all of `flags`.
    pub fn find_descendant(&self, id: ElementId, flags: ElementFlags) -> Option<ElementId> {
        let node = self.element_opt(id)?;
        if node.local.flags.contains(flags) {
            return Some(id);
        }
        node.children
            .iter()
            .find_map(|c| self.find_descendant(*c, flags))
    }

    /// Deep-clone the subtree rooted at `id` under `parent`.
    ///
    /// The clone keeps the source's world geometry: its root transform is set
    /// so that, relative to `parent`'s world transform, it lands where the source is.
    /// Clones never accept drops or picks; [`ElementFlags::PICKABLE`] and
    /// [`ElementFlags::FOLDER_TARGET`] are stripped throughout the copy.
    pub fn clone_subtree(&mut self, id: ElementId, parent: Option<ElementId>) -> Option<ElementId> {
        let source_world = self.world_transform(id)?;
        let parent_world = match parent {
            Some(p) => self.world_transform(p)?,
            None => Affine::IDENTITY,
        };
        let root = self.clone_recursive(id, parent)?;
        self.set_transform(root, parent_world.inverse() * source_world);
        Some(root)
    }

    // --- internals ---

    fn clone_recursive(&mut self, id: ElementId, parent: Option<ElementId>) -> Option<ElementId> {
        let (mut local, children) = {
            let n = self.element_opt(id)?;
            (n.local.clone(), n.children.clone())
        };
        local.flags -= ElementFlags::PICKABLE | ElementFlags::FOLDER_TARGET;
        let copy = self.insert(parent, local);
        for child in children {
            self.clone_recursive(child, Some(copy));
        }
        Some(copy)
    }

    fn resolve(&self, id: ElementId) -> Option<Resolved> {
        let node = self.element_opt(id)?;
        let own_visible = node.local.flags.contains(ElementFlags::VISIBLE);
        match node.parent {
            None => Some(Resolved {
                transform: node.local.transform,
                visible: own_visible,
                depth: 0,
            }),
            Some(p) => {
                let parent = self.resolve(p)?;
                Some(Resolved {
                    transform: parent.transform * node.local.transform,
                    visible: parent.visible && own_visible,
                    depth: parent.depth + 1,
                })
            }
        }
    }

    /// Access an element; panics if `id` is stale.
    fn element(&self, id: ElementId) -> &Element {
        self.elements[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        self.elements[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn element_opt(&self, id: ElementId) -> Option<&Element> {
        let n = self.elements.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn element_opt_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let n = self.elements.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        self.element_mut(parent).children.push(id);
        self.element_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        self.element_mut(parent).children.retain(|c| *c != id);
        self.element_mut(id).parent = None;
    }

    fn path_to_root(&self, mut id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        loop {
            out.push(id);
            match self.element(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }
}

fn front_to_back(a: (ElementId, i32, usize), b: (ElementId, i32, usize)) -> Ordering {
    b.1.cmp(&a.1).then(b.2.cmp(&a.2)).then_with(|| {
        if a.0.is_newer_than(b.0) {
            Ordering::Less
        } else if b.0.is_newer_than(a.0) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

/// Inclusive containment, so points on the right and bottom edges still hit.
fn contains(r: Rect, pt: Point) -> bool {
    pt.x >= r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y <= r.y1
}

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box in world space.
fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let p0 = affine * Point::new(rect.x0, rect.y0);
    let p1 = affine * Point::new(rect.x1, rect.y0);
    let p2 = affine * Point::new(rect.x0, rect.y1);
    let p3 = affine * Point::new(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}
