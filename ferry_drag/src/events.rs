// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Requests a browser emits to its host.

/// Output of a [`FolderBrowser`](crate::FolderBrowser), drained with
/// [`take_events`](crate::FolderBrowser::take_events).
#[derive(Clone, Debug, PartialEq)]
pub enum BrowserEvent<I> {
    /// Move `items` into the folder `target`.
    Drop {
        /// Dropped items, in selection order.
        items: Vec<I>,
        /// Folder the items were dropped on.
        target: I,
    },
    /// Open `folder`.
    GoToFolder {
        /// Folder to open.
        folder: I,
    },
    /// Leave `current_folder` for its parent.
    GoBack {
        /// The folder that was active.
        current_folder: I,
    },
}
