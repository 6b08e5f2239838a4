// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global input listening: scoped listener registration and modifier/button state.
//!
//! ## Listener lifetime
//!
//! A browser widget needs key and pointer-button events from the whole window,
//! not only from its own rows. Hosts expose their window-level event source
//! through [`InputHub`]. [`ListenerScope`] attaches the four listeners the
//! widget needs when it is created and detaches exactly those four when it is
//! dropped, so a widget can never leak listeners past its own lifetime.

use ferry_selection::Modifiers;

use crate::platform::InputProfile;

/// The window-level events a browser widget listens to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// A key was pressed.
    KeyDown,
    /// A key was released.
    KeyUp,
    /// A pointer button was pressed.
    PointerDown,
    /// A pointer button was released.
    PointerUp,
}

impl ListenerKind {
    /// Every kind, in attach order.
    pub const ALL: [Self; 4] = [Self::KeyDown, Self::KeyUp, Self::PointerDown, Self::PointerUp];
}

/// Handle returned by [`InputHub::attach`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerToken(pub u64);

/// A window-level event source.
///
/// Implementations route events of an attached kind to the widget owning the
/// token until the token is detached.
pub trait InputHub {
    /// Start delivering events of `kind`.
    fn attach(&mut self, kind: ListenerKind) -> ListenerToken;
    /// Stop delivering events for `token`.
    fn detach(&mut self, token: ListenerToken);
}

impl<H: InputHub + ?Sized> InputHub for &mut H {
    fn attach(&mut self, kind: ListenerKind) -> ListenerToken {
        (**self).attach(kind)
    }

    fn detach(&mut self, token: ListenerToken) {
        (**self).detach(token);
    }
}

/// Hub for hosts that forward every window event to the widget by calling it directly.
///
/// Tokens are handed out for bookkeeping; detaching them has no other effect.
#[derive(Debug, Default)]
pub struct DirectInput {
    next: u64,
}

impl InputHub for DirectInput {
    fn attach(&mut self, _kind: ListenerKind) -> ListenerToken {
        self.next += 1;
        ListenerToken(self.next)
    }

    fn detach(&mut self, _token: ListenerToken) {}
}

/// The four window listeners of one widget, detached on drop.
#[derive(Debug)]
pub struct ListenerScope<H: InputHub> {
    hub: H,
    tokens: Vec<(ListenerKind, ListenerToken)>,
}

impl<H: InputHub> ListenerScope<H> {
    /// Attach every [`ListenerKind`] to `hub`.
    pub fn acquire(mut hub: H) -> Self {
        let tokens = ListenerKind::ALL
            .iter()
            .map(|kind| (*kind, hub.attach(*kind)))
            .collect();
        Self { hub, tokens }
    }

    /// Attached listeners and their tokens.
    pub fn tokens(&self) -> &[(ListenerKind, ListenerToken)] {
        &self.tokens
    }

    /// The hub the listeners are attached to.
    pub fn hub(&self) -> &H {
        &self.hub
    }
}

impl<H: InputHub> Drop for ListenerScope<H> {
    fn drop(&mut self) {
        for (_, token) in self.tokens.drain(..) {
            self.hub.detach(token);
        }
    }
}

/// Live modifier and pointer-button state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    /// Held selection modifiers.
    pub modifiers: Modifiers,
    /// A pointer button is currently held.
    pub pointer_down: bool,
}

impl InputState {
    /// Record a key press.
    pub fn key_down(&mut self, code: u32, profile: &InputProfile) {
        if code == profile.select_key {
            self.modifiers.ctrl = true;
        }
        if code == profile.range_key {
            self.modifiers.shift = true;
        }
    }

    /// Record a key release.
    ///
    /// Releasing any key clears both modifiers, even if the other one is still
    /// held. Hosts that need per-key tracking re-send a key-down for the key
    /// that is still pressed.
    pub fn key_up(&mut self) {
        self.modifiers = Modifiers::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Os, Platform};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingHub {
        log: Rc<RefCell<Vec<(&'static str, u64)>>>,
        next: u64,
    }

    impl InputHub for RecordingHub {
        fn attach(&mut self, _kind: ListenerKind) -> ListenerToken {
            self.next += 1;
            self.log.borrow_mut().push(("attach", self.next));
            ListenerToken(self.next)
        }

        fn detach(&mut self, token: ListenerToken) {
            self.log.borrow_mut().push(("detach", token.0));
        }
    }

    #[test]
    fn scope_detaches_exactly_what_it_attached() {
        let hub = RecordingHub::default();
        let log = hub.log.clone();
        let scope = ListenerScope::acquire(hub);
        let kinds: Vec<_> = scope.tokens().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, ListenerKind::ALL);
        assert_eq!(log.borrow().len(), 4);

        drop(scope);
        let log = log.borrow();
        let detached: Vec<u64> = log
            .iter()
            .filter(|(op, _)| *op == "detach")
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(detached, [1, 2, 3, 4]);
    }

    #[test]
    fn borrowed_hubs_work_too() {
        let mut hub = RecordingHub::default();
        {
            let _scope = ListenerScope::acquire(&mut hub);
        }
        assert_eq!(hub.log.borrow().len(), 8);
    }

    #[test]
    fn key_up_clears_both_modifiers() {
        let profile = InputProfile::resolve(Platform {
            os: Os::Other,
            engine: crate::platform::Engine::Blink,
        });
        let mut state = InputState::default();
        state.key_down(17, &profile);
        state.key_down(16, &profile);
        assert_eq!(state.modifiers, Modifiers { ctrl: true, shift: true });

        // Releasing shift alone also drops ctrl.
        state.key_up();
        assert_eq!(state.modifiers, Modifiers::NONE);

        state.key_down(65, &profile);
        assert_eq!(state.modifiers, Modifiers::NONE, "other keys are ignored");
    }
}
