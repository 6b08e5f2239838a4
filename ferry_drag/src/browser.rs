// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The folder browser coordinator.

use std::time::Duration;

use ferry_scene::{ElementId, QueryFilter, Scene};
use ferry_selection::{FieldValue, ItemKind, ItemRef, Level, Record, Selection};
use kurbo::Point;
use tracing::{debug, trace};

use crate::config::{BrowserConfig, ConfigError};
use crate::drag::{DragContext, DragEffect, DragInput, DragPhase, DragSession, DragStatus, Task};
use crate::events::BrowserEvent;
use crate::input::{DirectInput, InputHub, InputState, ListenerScope};
use crate::overlay::{CloneVisual, CursorOverlay};
use crate::platform::{InputProfile, Platform};
use crate::registry::Registry;
use crate::schedule::{Scheduler, TaskId};

/// Selection and drag-and-drop coordinator of one folder browser widget.
///
/// The host feeds it data (`set_*`), registrations from mounted item views,
/// raw input, the drag collaborator's start/drop signals, and clock ticks. It
/// answers with [`BrowserEvent`]s and exposes the selection, the hovered
/// folder, the disabled items, and the cursor clones for rendering.
///
/// Time advances only through [`tick`](Self::tick); operations that start
/// animations use the time of the last tick.
#[derive(Debug)]
pub struct FolderBrowser<I, H: InputHub = DirectInput> {
    config: BrowserConfig,
    profile: InputProfile,
    scene: Scene,
    registry: Registry<I>,
    folders: Vec<I>,
    files: Vec<I>,
    active: Option<I>,
    level: Level<I>,
    selection: Selection,
    input: InputState,
    phase: DragPhase,
    overlay: CursorOverlay,
    scheduler: Scheduler<Task>,
    fallback: Option<TaskId>,
    badge_reveal: Option<TaskId>,
    disabled: Vec<ItemRef>,
    events: Vec<BrowserEvent<I>>,
    listeners: ListenerScope<H>,
}

impl<I: Record + Clone> FolderBrowser<I> {
    /// Create a browser for a host that calls the input methods directly.
    pub fn new(config: BrowserConfig, platform: Platform) -> Result<Self, ConfigError> {
        Self::with_hub(config, platform, DirectInput::default())
    }
}

impl<I: Record + Clone, H: InputHub> FolderBrowser<I, H> {
    /// Create a browser whose window listeners are attached to `hub`.
    ///
    /// The listeners stay attached until the browser is dropped.
    pub fn with_hub(config: BrowserConfig, platform: Platform, hub: H) -> Result<Self, ConfigError> {
        config.validate()?;
        let profile = InputProfile::resolve(platform);
        let mut scene = Scene::new();
        let overlay = CursorOverlay::new(&mut scene, config.overlay.clone());
        debug!(?profile, "folder browser created");
        Ok(Self {
            config,
            profile,
            scene,
            registry: Registry::new(),
            folders: Vec::new(),
            files: Vec::new(),
            active: None,
            level: Level::default(),
            selection: Selection::new(),
            input: InputState::default(),
            phase: DragPhase::Idle,
            overlay,
            scheduler: Scheduler::new(),
            fallback: None,
            badge_reveal: None,
            disabled: Vec::new(),
            events: Vec::new(),
            listeners: ListenerScope::acquire(hub),
        })
    }

    // --- data ---

    /// Replace the folder list.
    pub fn set_folders(&mut self, folders: Vec<I>) {
        self.folders = folders;
        self.level_changed();
    }

    /// Replace the file list.
    pub fn set_files(&mut self, files: Vec<I>) {
        self.files = files;
        self.level_changed();
    }

    /// Open `folder`, or the top level with `None`.
    pub fn set_active_folder(&mut self, folder: Option<I>) {
        self.active = folder;
        self.level_changed();
    }

    /// Replace all three data inputs at once.
    pub fn set_data(&mut self, folders: Vec<I>, files: Vec<I>, active: Option<I>) {
        self.folders = folders;
        self.files = files;
        self.active = active;
        self.level_changed();
    }

    fn level_changed(&mut self) {
        self.level = Level::compute(
            &self.folders,
            &self.files,
            self.active.as_ref(),
            &self.config.fields,
        );
        self.selection.deselect_all();
        debug!(items = self.level.len(), "level recomputed");
        self.drive(DragInput::LevelChanged);
    }

    // --- registration ---

    /// Record that `element` renders `item`. Called by item views on mount.
    pub fn register(&mut self, element: ElementId, kind: ItemKind, item: I) {
        match self.config.fields.item_ref(kind, &item) {
            Some(item_ref) => self.registry.register(element, item_ref, item),
            None => debug!(?element, "registration ignored: item has no identity"),
        }
    }

    /// Forget that `element` renders `item`. Called by item views on unmount.
    pub fn unregister(&mut self, element: ElementId, kind: ItemKind, item: &I) {
        if let Some(item_ref) = self.config.fields.item_ref(kind, item) {
            self.registry.unregister(element, &item_ref);
        }
    }

    // --- selection ---

    /// Click on the item rendered by `element`.
    ///
    /// Returns false if `element` renders no item of the current level.
    pub fn select_item(&mut self, element: ElementId) -> bool {
        let Some(item_ref) = self.registry.resolve(element).map(|(r, _)| r.clone()) else {
            debug!(?element, "click ignored: element renders no item");
            self.input.pointer_down = false;
            return false;
        };
        self.select(&item_ref)
    }

    /// Click on `item_ref` with the modifiers currently held.
    pub fn select(&mut self, item_ref: &ItemRef) -> bool {
        // A click completes the press that started it.
        self.input.pointer_down = false;
        let applied = self
            .selection
            .select(item_ref, self.input.modifiers, &self.level);
        if !applied {
            debug!(?item_ref, "click ignored: item outside the current level");
        }
        applied
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
    }

    // --- navigation ---

    /// Ask the host to open `folder`.
    pub fn go_to_folder(&mut self, folder: I) {
        self.events.push(BrowserEvent::GoToFolder { folder });
    }

    /// Ask the host to leave the active folder. Does nothing at the top level.
    pub fn go_back(&mut self) {
        match &self.active {
            Some(current) => self.events.push(BrowserEvent::GoBack {
                current_folder: current.clone(),
            }),
            None => debug!("go back ignored: already at the top level"),
        }
    }

    /// Display name of `item`, read from the field configured for `kind`.
    pub fn display_name<'a>(&self, kind: ItemKind, item: &'a I) -> Option<FieldValue<'a>> {
        self.config.fields.display_name(kind, item)
    }

    // --- raw input ---

    /// A key was pressed.
    pub fn key_down(&mut self, code: u32) {
        self.input.key_down(code, &self.profile);
    }

    /// A key was released. Clears both modifiers, whichever key it was.
    pub fn key_up(&mut self, code: u32) {
        trace!(code, "key up");
        self.input.key_up();
    }

    /// A pointer button was pressed. Only the button state is tracked.
    pub fn pointer_down(&mut self) {
        self.input.pointer_down = true;
    }

    /// A pointer button was released at `at`.
    ///
    /// Releasing outside every rendered item clears the selection.
    pub fn pointer_up(&mut self, at: Point) {
        let on_item = self
            .scene
            .hits_at(at, QueryFilter::PICKING)
            .into_iter()
            .any(|id| self.registry.contains_element(id));
        if !on_item {
            self.selection.deselect_all();
        }
        self.input.pointer_down = false;
    }

    /// The pointer moved to `at`. Only matters while dragging.
    pub fn pointer_move(&mut self, at: Point) {
        if self.phase.status() == DragStatus::Dragging {
            self.drive(DragInput::Move(at));
        }
    }

    /// The renderer finished a transition `name` on `element`.
    pub fn transition_end(&mut self, element: ElementId, name: &str) {
        if name != self.profile.transition_end {
            trace!(name, "foreign transition end ignored");
            return;
        }
        if self.overlay.transition_end(&mut self.scene, element) && self.overlay.is_empty() {
            self.cancel_fallback();
        }
    }

    // --- drag collaborator ---

    /// The drag collaborator recognized a drag starting on `element`.
    pub fn drag_start(&mut self, element: ElementId) {
        self.drive(DragInput::Start(element));
    }

    /// The drag collaborator reported a drop.
    pub fn drop(&mut self) {
        self.drive(DragInput::Drop);
    }

    // --- clock ---

    /// Advance the clock to `now` and run everything that became due.
    ///
    /// One call is one scheduling turn: work scheduled while it runs waits for
    /// the next call.
    pub fn tick(&mut self, now: Duration) {
        for (id, task) in self.scheduler.advance(now) {
            match task {
                Task::ReturnClones => self.drive(DragInput::ReturnDue(id)),
                Task::ForceRemoveClones => {
                    self.fallback = None;
                    if !self.overlay.is_empty() {
                        debug!(clones = self.overlay.len(), "fallback removed cursor clones");
                    }
                    self.overlay.clear(&mut self.scene);
                }
                Task::RevealBadge => {
                    self.badge_reveal = None;
                    self.overlay.reveal_badge();
                }
            }
        }
        self.overlay.sync(&mut self.scene, self.scheduler.now());
    }

    // --- output ---

    /// Take the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<BrowserEvent<I>> {
        std::mem::take(&mut self.events)
    }

    // --- state ---

    /// The element scene the host lays rows out in.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the element scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The items of the active folder.
    pub fn level(&self) -> &Level<I> {
        &self.level
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected records, in selection order.
    pub fn selected_items(&self) -> Vec<&I> {
        self.selection
            .items()
            .iter()
            .filter_map(|r| self.level.get(r))
            .collect()
    }

    /// Live modifier and button state.
    pub fn input_state(&self) -> InputState {
        self.input
    }

    /// The resolved input profile.
    pub fn profile(&self) -> &InputProfile {
        &self.profile
    }

    /// The listener scope holding the window listeners.
    pub fn listeners(&self) -> &ListenerScope<H> {
        &self.listeners
    }

    /// Lifecycle phase of the drag.
    pub fn status(&self) -> DragStatus {
        self.phase.status()
    }

    /// The running drag, if any.
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.phase.session()
    }

    /// Folder the selection would be dropped into.
    pub fn hovered_folder(&self) -> Option<&I> {
        let hovered = self.phase.session()?.hovered.as_ref()?;
        let element = self.registry.element_for(hovered)?;
        self.registry.resolve(element).map(|(_, item)| item)
    }

    /// Items that cannot be drop targets during the current drag.
    pub fn disabled_items(&self) -> &[ItemRef] {
        &self.disabled
    }

    /// Returns true if `item_ref` is disabled as a drop target.
    pub fn is_disabled(&self, item_ref: &ItemRef) -> bool {
        self.disabled.contains(item_ref)
    }

    /// Rendering snapshot of the cursor clones at the last tick, bottom to top.
    pub fn cursor_clones(&self) -> Vec<CloneVisual> {
        self.overlay.visuals(self.scheduler.now())
    }

    // --- internals ---

    fn drive(&mut self, input: DragInput) {
        let effects = self.phase.transition(
            input,
            DragContext {
                pointer_down: self.input.pointer_down,
                scene: &self.scene,
                registry: &self.registry,
                level: &self.level,
                selection: &self.selection,
                scheduler: &mut self.scheduler,
            },
        );
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: DragEffect) {
        let now = self.scheduler.now();
        match effect {
            DragEffect::ClearClones => {
                self.overlay.clear(&mut self.scene);
                self.cancel_fallback();
                if let Some(task) = self.badge_reveal.take() {
                    self.scheduler.cancel(task);
                }
                self.disabled.clear();
            }
            DragEffect::CollapseSelection(item) => self.selection.collapse_to(item),
            DragEffect::CreateClones => {
                let views: Vec<ElementId> = self
                    .selection
                    .items()
                    .iter()
                    .filter_map(|r| self.registry.element_for(r))
                    .collect();
                if views.len() < self.selection.len() {
                    debug!(
                        selected = self.selection.len(),
                        rendered = views.len(),
                        "some selected items are not rendered"
                    );
                }
                if self.overlay.create(&mut self.scene, &views, now) {
                    self.badge_reveal = Some(self.scheduler.schedule(Duration::ZERO, Task::RevealBadge));
                }
            }
            DragEffect::SnapshotDisabled => {
                self.disabled.clear();
                self.disabled.extend_from_slice(self.selection.items());
            }
            DragEffect::TrackClones(pointer) => self.overlay.track(&mut self.scene, pointer, now),
            DragEffect::EmitDrop(target) => {
                let Some(element) = self.registry.element_for(&target) else {
                    return;
                };
                let Some((_, target)) = self.registry.resolve(element) else {
                    return;
                };
                let items = self.selected_items().into_iter().cloned().collect();
                debug!(items = self.selection.len(), "drop emitted");
                self.events.push(BrowserEvent::Drop {
                    items,
                    target: target.clone(),
                });
            }
            DragEffect::StartReturn => {
                self.overlay.begin_return(&mut self.scene, now);
                self.cancel_fallback();
                if !self.overlay.is_empty() {
                    let delay = self.config.overlay.fallback_delay;
                    self.fallback = Some(self.scheduler.schedule(delay, Task::ForceRemoveClones));
                }
                self.disabled.clear();
            }
        }
    }

    fn cancel_fallback(&mut self) {
        if let Some(task) = self.fallback.take() {
            self.scheduler.cancel(task);
        }
    }
}
