// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag lifecycle: `Idle → Dragging → Returning → Idle`.
//!
//! [`DragPhase::transition`] is the only place the phase changes. It takes one
//! [`DragInput`] and returns the [`DragEffect`]s the coordinator has to carry
//! out (clone management, selection updates, drop emission), so every path
//! through the lifecycle can be read in one match.
//!
//! ```text
//!            start (button down, item resolves)
//!   Idle ───────────────────────────────────────▶ Dragging ──┐ move
//!    ▲  ▲                                          │   ▲     │
//!    │  │ level change (cancel return, clear)      │   └─────┘
//!    │  └──────────────────────── Returning ◀──────┘ drop
//!    └──────────────────────────── │ return due
//! ```

use std::mem;
use std::time::Duration;

use ferry_scene::{ElementFlags, ElementId, QueryFilter, Scene};
use ferry_selection::{ItemRef, Level, Selection};
use kurbo::Point;
use tracing::{debug, trace};

use crate::registry::Registry;
use crate::schedule::{Scheduler, TaskId};

/// Deferred work the coordinator schedules for itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Task {
    /// Start the return animation; scheduled by a drop.
    ReturnClones,
    /// Remove clones whose transition end never arrived.
    ForceRemoveClones,
    /// Fade in the counter badge of a multi-item drag.
    RevealBadge,
}

/// State of a running drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    /// Element the drag started from.
    pub dragged: ElementId,
    /// Item rendered by the dragged element.
    pub item: ItemRef,
    /// Folder-target element under the pointer.
    pub target: Option<ElementId>,
    /// Folder the selection would move into, unless it is part of the selection.
    pub hovered: Option<ItemRef>,
}

/// Public view of the lifecycle phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragStatus {
    /// No drag in progress.
    Idle,
    /// Items are being dragged.
    Dragging,
    /// The drag ended; clones go home on the next turn.
    Returning,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum DragPhase {
    #[default]
    Idle,
    Dragging(DragSession),
    Returning {
        session: DragSession,
        task: TaskId,
    },
}

/// Inputs of [`DragPhase::transition`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum DragInput {
    /// The drag collaborator recognized a drag on `element`.
    Start(ElementId),
    /// The pointer moved.
    Move(Point),
    /// The drag collaborator reported a drop.
    Drop,
    /// A scheduled [`Task::ReturnClones`] is due.
    ReturnDue(TaskId),
    /// The level was recomputed from new data.
    LevelChanged,
}

/// Side effects requested by a transition, in execution order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DragEffect {
    /// Remove every clone now and forget their timers.
    ClearClones,
    /// Make this the only selected item.
    CollapseSelection(ItemRef),
    /// Clone the selected items into the overlay.
    CreateClones,
    /// Disable the selected items as drop targets.
    SnapshotDisabled,
    /// Move the clones towards the pointer.
    TrackClones(Point),
    /// Emit a drop of the selection onto `target`.
    EmitDrop(ItemRef),
    /// Send the clones home and forget the drag.
    StartReturn,
}

/// What a transition may read and schedule.
pub(crate) struct DragContext<'a, I> {
    pub(crate) pointer_down: bool,
    pub(crate) scene: &'a Scene,
    pub(crate) registry: &'a Registry<I>,
    pub(crate) level: &'a Level<I>,
    pub(crate) selection: &'a Selection,
    pub(crate) scheduler: &'a mut Scheduler<Task>,
}

impl DragPhase {
    pub(crate) fn status(&self) -> DragStatus {
        match self {
            Self::Idle => DragStatus::Idle,
            Self::Dragging(_) => DragStatus::Dragging,
            Self::Returning { .. } => DragStatus::Returning,
        }
    }

    pub(crate) fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) | Self::Returning { session, .. } => Some(session),
        }
    }

    /// Apply `input` and return the effects to perform.
    pub(crate) fn transition<I>(
        &mut self,
        input: DragInput,
        cx: DragContext<'_, I>,
    ) -> Vec<DragEffect> {
        let mut effects = Vec::new();
        *self = match (mem::take(self), input) {
            (Self::Dragging(session), DragInput::Start(element)) => {
                debug!(?element, "drag start ignored: already dragging");
                Self::Dragging(session)
            }
            (phase, DragInput::Start(element)) => match start_session(element, &cx) {
                None => phase,
                Some(session) => {
                    if let Self::Returning { task, .. } = phase {
                        cx.scheduler.cancel(task);
                    }
                    effects.push(DragEffect::ClearClones);
                    if !cx.selection.contains(&session.item) {
                        effects.push(DragEffect::CollapseSelection(session.item.clone()));
                    }
                    effects.push(DragEffect::CreateClones);
                    Self::Dragging(session)
                }
            },
            (Self::Dragging(mut session), DragInput::Move(pointer)) => {
                let hits = cx.scene.hits_at(pointer, QueryFilter::PICKING);
                match pick_drop_target(cx.scene, &hits, session.dragged) {
                    Some(target) if session.target != Some(target) => {
                        session.target = Some(target);
                        session.hovered = cx
                            .registry
                            .resolve(target)
                            .map(|(item, _)| item)
                            .filter(|item| !cx.selection.contains(item))
                            .cloned();
                        trace!(?target, hovered = ?session.hovered, "drop target changed");
                    }
                    Some(_) => {}
                    None => {
                        if session.target.take().is_some() {
                            session.hovered = None;
                            trace!("drop target left");
                        }
                    }
                }
                effects.push(DragEffect::SnapshotDisabled);
                effects.push(DragEffect::TrackClones(pointer));
                Self::Dragging(session)
            }
            (Self::Dragging(mut session), DragInput::Drop) => {
                let target = session
                    .target
                    .take()
                    .and_then(|t| cx.registry.resolve(t))
                    .map(|(item, _)| item);
                match target {
                    Some(target) if cx.selection.contains(target) => {
                        debug!(?target, "drop onto a dragged item ignored");
                    }
                    Some(_) if cx.selection.is_empty() => {
                        debug!("drop ignored: nothing selected");
                    }
                    Some(target) => effects.push(DragEffect::EmitDrop(target.clone())),
                    None => {}
                }
                let task = cx.scheduler.schedule(Duration::ZERO, Task::ReturnClones);
                Self::Returning { session, task }
            }
            (Self::Returning { session, task }, DragInput::ReturnDue(due)) => {
                if task != due {
                    Self::Returning { session, task }
                } else {
                    effects.push(DragEffect::StartReturn);
                    Self::Idle
                }
            }
            (Self::Returning { task, .. }, DragInput::LevelChanged) => {
                cx.scheduler.cancel(task);
                effects.push(DragEffect::ClearClones);
                Self::Idle
            }
            (Self::Idle, DragInput::LevelChanged) => {
                effects.push(DragEffect::ClearClones);
                Self::Idle
            }
            (phase, input) => {
                trace!(?input, status = ?phase.status(), "drag input ignored");
                phase
            }
        };
        effects
    }
}

fn start_session<I>(element: ElementId, cx: &DragContext<'_, I>) -> Option<DragSession> {
    if !cx.pointer_down {
        debug!(?element, "drag start ignored: no button down");
        return None;
    }
    let Some((item, _)) = cx.registry.resolve(element) else {
        debug!(?element, "drag start ignored: element renders no item");
        return None;
    };
    if !cx.level.contains(item) {
        debug!(?item, "drag start ignored: item outside the current level");
        return None;
    }
    Some(DragSession {
        dragged: element,
        item: item.clone(),
        target: None,
        hovered: None,
    })
}

/// First of `hits` (front to back) that can receive a drop of `dragged`.
///
/// Drop targets carry [`ElementFlags::FOLDER_TARGET`]; the dragged element
/// itself and the drag collaborator's mirror are skipped.
pub fn pick_drop_target(scene: &Scene, hits: &[ElementId], dragged: ElementId) -> Option<ElementId> {
    hits.iter().copied().find(|id| {
        *id != dragged
            && scene.flags(*id).is_some_and(|f| {
                f.contains(ElementFlags::FOLDER_TARGET) && !f.contains(ElementFlags::DRAG_MIRROR)
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_scene::LocalElement;
    use ferry_selection::{FieldNames, FieldValue, Modifiers, Record};
    use kurbo::{Affine, Rect};

    #[derive(Clone, Debug, PartialEq)]
    struct Entry(i64);

    impl Record for Entry {
        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "uid" => Some(FieldValue::Int(self.0)),
                "parent_uid" => Some(FieldValue::Int(0)),
                _ => None,
            }
        }
    }

    /// Folder 1 at y = 0, files 2 and 3 below it, all 32px rows.
    struct Fixture {
        scene: Scene,
        registry: Registry<Entry>,
        level: Level<Entry>,
        selection: Selection,
        scheduler: Scheduler<Task>,
        rows: Vec<ElementId>,
    }

    impl Fixture {
        fn new() -> Self {
            let folders = [Entry(1)];
            let files = [Entry(2), Entry(3)];
            let level = Level::compute(&folders, &files, None, &FieldNames::default());
            let mut scene = Scene::new();
            let mut registry = Registry::new();
            let mut rows = Vec::new();
            for (i, item) in (0_u8..).zip(level.refs()) {
                let mut flags = ElementFlags::default();
                if i == 0 {
                    flags |= ElementFlags::FOLDER_TARGET;
                }
                let row = scene.insert(
                    None,
                    LocalElement {
                        bounds: Rect::new(0.0, 0.0, 200.0, 32.0),
                        transform: Affine::translate((0.0, 32.0 * f64::from(i))),
                        flags,
                        ..Default::default()
                    },
                );
                let record = level.get(item).unwrap().clone();
                registry.register(row, item.clone(), record);
                rows.push(row);
            }
            Self {
                scene,
                registry,
                level,
                selection: Selection::new(),
                scheduler: Scheduler::new(),
                rows,
            }
        }

        fn cx(&mut self, pointer_down: bool) -> DragContext<'_, Entry> {
            DragContext {
                pointer_down,
                scene: &self.scene,
                registry: &self.registry,
                level: &self.level,
                selection: &self.selection,
                scheduler: &mut self.scheduler,
            }
        }
    }

    #[test]
    fn start_requires_button_and_known_element() {
        let mut fx = Fixture::new();
        let mut phase = DragPhase::Idle;
        let row = fx.rows[1];
        assert!(phase.transition(DragInput::Start(row), fx.cx(false)).is_empty());
        assert_eq!(phase, DragPhase::Idle);

        let stray = fx.scene.insert(None, LocalElement::default());
        assert!(phase.transition(DragInput::Start(stray), fx.cx(true)).is_empty());
        assert_eq!(phase, DragPhase::Idle);

        let effects = phase.transition(DragInput::Start(row), fx.cx(true));
        assert_eq!(
            effects,
            [
                DragEffect::ClearClones,
                DragEffect::CollapseSelection(ItemRef::file("2")),
                DragEffect::CreateClones,
            ]
        );
        assert_eq!(phase.status(), DragStatus::Dragging);
    }

    #[test]
    fn start_on_selected_item_keeps_selection() {
        let mut fx = Fixture::new();
        fx.selection
            .select(&ItemRef::file("2"), Modifiers::NONE, &fx.level);
        let mut phase = DragPhase::Idle;
        let effects = phase.transition(DragInput::Start(fx.rows[1]), fx.cx(true));
        assert_eq!(effects, [DragEffect::ClearClones, DragEffect::CreateClones]);

        // A second start while dragging changes nothing.
        let again = phase.clone();
        assert!(phase.transition(DragInput::Start(fx.rows[2]), fx.cx(true)).is_empty());
        assert_eq!(phase, again);
    }

    #[test]
    fn move_tracks_folder_targets() {
        let mut fx = Fixture::new();
        fx.selection
            .select(&ItemRef::file("2"), Modifiers::NONE, &fx.level);
        let mut phase = DragPhase::Idle;
        phase.transition(DragInput::Start(fx.rows[1]), fx.cx(true));

        let effects = phase.transition(DragInput::Move(Point::new(50.0, 10.0)), fx.cx(true));
        assert_eq!(
            effects,
            [
                DragEffect::SnapshotDisabled,
                DragEffect::TrackClones(Point::new(50.0, 10.0)),
            ]
        );
        let session = phase.session().unwrap();
        assert_eq!(session.target, Some(fx.rows[0]));
        assert_eq!(session.hovered, Some(ItemRef::folder("1")));

        // Over a file row: no target.
        phase.transition(DragInput::Move(Point::new(50.0, 80.0)), fx.cx(true));
        let session = phase.session().unwrap();
        assert_eq!(session.target, None);
        assert_eq!(session.hovered, None);
    }

    #[test]
    fn mirrors_and_the_dragged_element_are_not_targets() {
        let mut scene = Scene::new();
        let target = ElementFlags::default() | ElementFlags::FOLDER_TARGET;
        let folder = scene.insert(
            None,
            LocalElement {
                bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                flags: target,
                ..Default::default()
            },
        );
        let mirror = scene.insert(
            None,
            LocalElement {
                bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                z_index: 5,
                flags: target | ElementFlags::DRAG_MIRROR,
                ..Default::default()
            },
        );
        let hits = scene.hits_at(Point::new(10.0, 10.0), QueryFilter::PICKING);
        assert_eq!(hits, [mirror, folder]);
        assert_eq!(pick_drop_target(&scene, &hits, mirror), Some(folder));
        assert_eq!(pick_drop_target(&scene, &hits, folder), None);
    }

    #[test]
    fn drop_emits_and_schedules_return() {
        let mut fx = Fixture::new();
        fx.selection
            .select(&ItemRef::file("2"), Modifiers::NONE, &fx.level);
        let mut phase = DragPhase::Idle;
        phase.transition(DragInput::Start(fx.rows[1]), fx.cx(true));
        phase.transition(DragInput::Move(Point::new(50.0, 10.0)), fx.cx(true));

        let effects = phase.transition(DragInput::Drop, fx.cx(false));
        assert_eq!(effects, [DragEffect::EmitDrop(ItemRef::folder("1"))]);
        let DragPhase::Returning { session, task } = phase.clone() else {
            panic!("expected Returning, got {phase:?}");
        };
        assert_eq!(session.target, None);
        assert!(fx.scheduler.is_pending(task));

        // A drop while returning is ignored.
        assert!(phase.transition(DragInput::Drop, fx.cx(false)).is_empty());

        let due = fx.scheduler.advance(Duration::ZERO);
        assert_eq!(due, [(task, Task::ReturnClones)]);
        let effects = phase.transition(DragInput::ReturnDue(task), fx.cx(false));
        assert_eq!(effects, [DragEffect::StartReturn]);
        assert_eq!(phase, DragPhase::Idle);
    }

    #[test]
    fn drop_onto_a_selected_folder_emits_nothing() {
        let mut fx = Fixture::new();
        fx.selection
            .select(&ItemRef::folder("1"), Modifiers::NONE, &fx.level);
        fx.selection
            .select(&ItemRef::file("2"), Modifiers::CTRL, &fx.level);
        let mut phase = DragPhase::Idle;
        phase.transition(DragInput::Start(fx.rows[1]), fx.cx(true));
        phase.transition(DragInput::Move(Point::new(50.0, 10.0)), fx.cx(true));
        let session = phase.session().unwrap();
        assert_eq!(session.target, Some(fx.rows[0]));
        assert_eq!(session.hovered, None);

        assert!(phase.transition(DragInput::Drop, fx.cx(false)).is_empty());
        assert_eq!(phase.status(), DragStatus::Returning);
    }

    #[test]
    fn level_change_cancels_pending_return() {
        let mut fx = Fixture::new();
        let mut phase = DragPhase::Idle;
        phase.transition(DragInput::Start(fx.rows[2]), fx.cx(true));
        phase.transition(DragInput::Drop, fx.cx(false));
        assert_eq!(fx.scheduler.len(), 1);

        let effects = phase.transition(DragInput::LevelChanged, fx.cx(false));
        assert_eq!(effects, [DragEffect::ClearClones]);
        assert_eq!(phase, DragPhase::Idle);
        assert!(fx.scheduler.is_empty());
    }

    #[test]
    fn level_change_while_dragging_keeps_the_session() {
        let mut fx = Fixture::new();
        let mut phase = DragPhase::Idle;
        phase.transition(DragInput::Start(fx.rows[2]), fx.cx(true));
        assert!(phase.transition(DragInput::LevelChanged, fx.cx(true)).is_empty());
        assert_eq!(phase.status(), DragStatus::Dragging);
    }

    #[test]
    fn start_while_returning_cancels_the_return() {
        let mut fx = Fixture::new();
        let mut phase = DragPhase::Idle;
        phase.transition(DragInput::Start(fx.rows[2]), fx.cx(true));
        phase.transition(DragInput::Drop, fx.cx(false));
        let effects = phase.transition(DragInput::Start(fx.rows[1]), fx.cx(true));
        assert_eq!(effects[0], DragEffect::ClearClones);
        assert!(fx.scheduler.is_empty());
        assert_eq!(phase.session().unwrap().item, ItemRef::file("2"));
    }

    #[test]
    fn idle_ignores_moves_drops_and_stale_returns() {
        let mut fx = Fixture::new();
        let mut phase = DragPhase::Idle;
        let stale = fx.scheduler.schedule(Duration::ZERO, Task::ReturnClones);
        for input in [
            DragInput::Move(Point::new(50.0, 10.0)),
            DragInput::Drop,
            DragInput::ReturnDue(stale),
        ] {
            assert!(phase.transition(input, fx.cx(true)).is_empty());
            assert_eq!(phase, DragPhase::Idle);
        }
        assert_eq!(fx.scheduler.len(), 1, "nothing scheduled or cancelled");
    }

    #[test]
    fn level_change_while_idle_clears_lingering_clones() {
        let mut fx = Fixture::new();
        let mut phase = DragPhase::Idle;
        phase.transition(DragInput::Start(fx.rows[2]), fx.cx(true));
        phase.transition(DragInput::Drop, fx.cx(false));
        let DragPhase::Returning { task, .. } = phase.clone() else {
            panic!("expected Returning, got {phase:?}");
        };
        fx.scheduler.advance(Duration::ZERO);
        phase.transition(DragInput::ReturnDue(task), fx.cx(false));
        assert_eq!(phase, DragPhase::Idle);

        let effects = phase.transition(DragInput::LevelChanged, fx.cx(false));
        assert_eq!(effects, [DragEffect::ClearClones]);
        assert_eq!(phase, DragPhase::Idle);
    }
}
