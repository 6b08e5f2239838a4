// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor overlay: clones of the dragged items that follow the pointer.
//!
//! ## Motion model
//!
//! Every clone has a rendered top-left corner that moves along a linear motion
//! `from → to` over a duration. A clone with a transition eases towards its
//! target; once it comes within the snap radius of the pointer the transition
//! is dropped and further targets are applied immediately. When the drag ends
//! every clone eases back to where its source is *now*, and is removed when the
//! renderer reports that the transition ended at that spot.

use std::time::Duration;

use ferry_scene::{ElementFlags, ElementId, LocalElement, Scene};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use tracing::trace;

use crate::config::OverlayConfig;

/// Diameter of the counter badge.
const BADGE_SIZE: f64 = 28.0;

/// Counter badge shown on the topmost clone of a multi-item drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    /// Element of the badge, a child of the topmost clone.
    pub element: ElementId,
    /// Number of dragged items.
    pub count: usize,
    /// The badge has faded in.
    pub revealed: bool,
    /// The badge was hidden because the clones are heading home.
    pub hidden: bool,
}

/// Snapshot of one clone for rendering.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CloneVisual {
    /// Root element of the clone.
    pub element: ElementId,
    /// World rectangle at the sampled time.
    pub rect: Rect,
    /// The clone casts a shadow.
    pub shadow: bool,
    /// Counter badge, on the topmost clone only.
    pub badge: Option<Badge>,
    /// Active transition, `None` once the clone sticks to the pointer.
    pub transition: Option<Duration>,
}

#[derive(Copy, Clone, Debug)]
struct Motion {
    from: Point,
    to: Point,
    start: Duration,
    duration: Duration,
}

impl Motion {
    fn still(at: Point) -> Self {
        Self {
            from: at,
            to: at,
            start: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    fn at(&self, now: Duration) -> Point {
        let elapsed = now.saturating_sub(self.start);
        if elapsed >= self.duration {
            return self.to;
        }
        self.from
            .lerp(self.to, elapsed.div_duration_f64(self.duration))
    }
}

#[derive(Clone, Debug)]
struct CursorClone {
    source: ElementId,
    clone: ElementId,
    origin: Point,
    size: Size,
    base: Affine,
    motion: Motion,
    transition: Option<Duration>,
    shadow: bool,
    badge: Option<Badge>,
    returning: bool,
}

impl CursorClone {
    fn position(&self, now: Duration) -> Point {
        self.motion.at(now)
    }

    fn retarget(&mut self, to: Point, now: Duration) {
        self.motion = match self.transition {
            Some(duration) => Motion {
                from: self.position(now),
                to,
                start: now,
                duration,
            },
            None => Motion::still(to),
        };
    }
}

/// Manager of the cursor clones of one browser.
///
/// Clones live in a dedicated overlay layer of the [`Scene`]. They are neither
/// pickable nor drop targets, so they never shadow the rows underneath them.
#[derive(Debug)]
pub struct CursorOverlay {
    layer: ElementId,
    clones: Vec<CursorClone>,
    config: OverlayConfig,
}

impl CursorOverlay {
    /// Create the overlay layer in `scene`.
    pub fn new(scene: &mut Scene, config: OverlayConfig) -> Self {
        let layer = scene.insert(
            None,
            LocalElement {
                bounds: Rect::ZERO,
                z_index: config.overlay_z_index,
                flags: ElementFlags::VISIBLE,
                ..Default::default()
            },
        );
        Self {
            layer,
            clones: Vec::new(),
            config,
        }
    }

    /// The overlay layer element.
    pub fn layer(&self) -> ElementId {
        self.layer
    }

    /// Number of live clones.
    pub fn len(&self) -> usize {
        self.clones.len()
    }

    /// Returns true if no clone is alive.
    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }

    /// Clone each of `views` (in order, the last one on top) into the overlay.
    ///
    /// Each view contributes its [`ElementFlags::CURSOR_HANDLE`] descendant, or
    /// itself when it has none. The topmost clone casts a shadow and, when more
    /// than one view is cloned, carries a counter badge that starts out
    /// transparent. Returns true if a badge was created.
    pub fn create(&mut self, scene: &mut Scene, views: &[ElementId], now: Duration) -> bool {
        let sources: Vec<ElementId> = views
            .iter()
            .filter_map(|view| {
                let handle = scene.find_descendant(*view, ElementFlags::CURSOR_HANDLE);
                handle.or_else(|| scene.is_alive(*view).then_some(*view))
            })
            .collect();
        let count = sources.len();
        let mut badged = false;
        for (index, source) in sources.into_iter().enumerate() {
            let (Some(bounds), Some(clone)) = (
                scene.world_bounds(source),
                scene.clone_subtree(source, Some(self.layer)),
            ) else {
                continue;
            };
            let base = scene.local(clone).map_or(Affine::IDENTITY, |l| l.transform);
            scene.set_z_index(clone, self.config.overlay_z_index);
            scene.toggle_flags(clone, ElementFlags::ACTIVE, true);

            let top = index + 1 == count;
            let badge = (top && count > 1).then(|| {
                badged = true;
                Badge {
                    element: insert_badge(scene, clone),
                    count,
                    revealed: false,
                    hidden: false,
                }
            });
            self.clones.push(CursorClone {
                source,
                clone,
                origin: bounds.origin(),
                size: bounds.size(),
                base,
                motion: Motion::still(bounds.origin()),
                transition: Some(self.config.clone_transition),
                shadow: top,
                badge,
                returning: false,
            });
        }
        trace!(clones = self.clones.len(), ?now, "cursor clones created");
        badged
    }

    /// Fade in the counter badge.
    pub fn reveal_badge(&mut self) {
        for badge in self.clones.iter_mut().filter_map(|c| c.badge.as_mut()) {
            badge.revealed = true;
        }
    }

    /// Move the clones towards the pointer.
    pub fn track(&mut self, scene: &mut Scene, pointer: Point, now: Duration) {
        let stacked = self.clones.len() > 1;
        let offset = Vec2::new(self.config.stack_offset, self.config.stack_offset);
        for (index, clone) in self.clones.iter_mut().enumerate() {
            let target = if stacked && index == 0 {
                pointer - offset
            } else {
                pointer
            };
            if clone.transition.is_some()
                && within(pointer, clone.position(now), self.config.snap_radius)
            {
                clone.transition = None;
            }
            clone.retarget(target, now);
        }
        self.sync(scene, now);
    }

    /// Send every clone back to its source's current position.
    pub fn begin_return(&mut self, scene: &mut Scene, now: Duration) {
        for clone in &mut self.clones {
            let home = scene
                .world_bounds(clone.source)
                .map_or(clone.origin, |b| b.origin());
            clone.transition = Some(self.config.return_transition);
            clone.retarget(home, now);
            clone.shadow = false;
            clone.returning = true;
            if let Some(badge) = clone.badge.as_mut() {
                badge.hidden = true;
                scene.toggle_flags(badge.element, ElementFlags::VISIBLE, false);
            }
        }
        self.sync(scene, now);
    }

    /// Handle the end of a transition on `element`.
    ///
    /// A returning clone is removed if its return ends on where its source is
    /// now (within the return tolerance); a clone whose source is gone is
    /// removed as well. Ends fired before the return, or for a return aimed at
    /// a spot the source has since left, are ignored.
    /// Returns true if a clone was removed.
    pub fn transition_end(&mut self, scene: &mut Scene, element: ElementId) -> bool {
        let Some(index) = self
            .clones
            .iter()
            .position(|c| c.clone == element && c.returning)
        else {
            return false;
        };
        let clone = &self.clones[index];
        let home = scene.world_bounds(clone.source).map(|b| b.origin());
        let arrived = home.is_none_or(|home| {
            within(home, clone.motion.to, self.config.return_tolerance)
        });
        if arrived {
            let clone = self.clones.remove(index);
            scene.remove(clone.clone);
        }
        arrived
    }

    /// Remove every clone immediately.
    pub fn clear(&mut self, scene: &mut Scene) {
        for clone in self.clones.drain(..) {
            scene.remove(clone.clone);
        }
    }

    /// Write the clones' positions at `now` into the scene.
    pub fn sync(&self, scene: &mut Scene, now: Duration) {
        for clone in &self.clones {
            let delta = clone.position(now) - clone.origin;
            scene.set_transform(clone.clone, Affine::translate(delta) * clone.base);
        }
    }

    /// Rendering snapshot of every clone at `now`, bottom to top.
    pub fn visuals(&self, now: Duration) -> Vec<CloneVisual> {
        self.clones
            .iter()
            .map(|c| CloneVisual {
                element: c.clone,
                rect: Rect::from_origin_size(c.position(now), c.size),
                shadow: c.shadow,
                badge: c.badge,
                transition: c.transition,
            })
            .collect()
    }
}

/// Returns true if `point` lies in the square of half-size `radius` around `center`.
fn within(center: Point, point: Point, radius: f64) -> bool {
    (point.x - center.x).abs() <= radius && (point.y - center.y).abs() <= radius
}

fn insert_badge(scene: &mut Scene, clone: ElementId) -> ElementId {
    let b = scene.local(clone).map_or(Rect::ZERO, |l| l.bounds);
    let half = BADGE_SIZE / 2.0;
    scene.insert(
        Some(clone),
        LocalElement {
            bounds: Rect::new(b.x1 - half, b.y0 - half, b.x1 + half, b.y0 + half),
            flags: ElementFlags::VISIBLE,
            ..Default::default()
        },
    )
}
