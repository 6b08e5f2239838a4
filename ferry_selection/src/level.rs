// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Levels: the folders and files directly inside the active folder.

use alloc::vec::Vec;

use crate::record::{FieldNames, ItemKey, ItemKind, ItemRef, Record};

/// The items shown for one directory level, folders before files.
///
/// A level is recomputed from the host lists whenever the active folder, the
/// folder list, or the file list changes; it owns clones of the matching items.
#[derive(Clone, Debug)]
pub struct Level<I> {
    folders: Vec<I>,
    files: Vec<I>,
    refs: Vec<ItemRef>,
}

impl<I> Default for Level<I> {
    fn default() -> Self {
        Self {
            folders: Vec::new(),
            files: Vec::new(),
            refs: Vec::new(),
        }
    }
}

impl<I: Record + Clone> Level<I> {
    /// Collect the children of `active` (or the top level when `None`).
    ///
    /// Items without an identity or parent field belong to no level. An active
    /// folder without an identity yields an empty level.
    pub fn compute(folders: &[I], files: &[I], active: Option<&I>, fields: &FieldNames) -> Self {
        let parent = match active {
            Some(folder) => match fields.key_of(folder) {
                Some(key) => key,
                None => return Self::default(),
            },
            None => fields.root_id.clone(),
        };
        let mut level = Self::default();
        for (kind, source) in [(ItemKind::Folder, folders), (ItemKind::File, files)] {
            for item in source {
                if fields.parent_of(item).as_ref() != Some(&parent) {
                    continue;
                }
                let Some(key) = fields.key_of(item) else {
                    continue;
                };
                level.refs.push(ItemRef { kind, key });
                match kind {
                    ItemKind::Folder => level.folders.push(item.clone()),
                    ItemKind::File => level.files.push(item.clone()),
                }
            }
        }
        level
    }
}

impl<I> Level<I> {
    /// Folders of this level in host order.
    pub fn folders(&self) -> &[I] {
        &self.folders
    }

    /// Files of this level in host order.
    pub fn files(&self) -> &[I] {
        &self.files
    }

    /// Identities in level order (folders, then files).
    pub fn refs(&self) -> &[ItemRef] {
        &self.refs
    }

    /// Number of items in the level.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Returns true if the level has no items.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Position of `item` in level order.
    pub fn position(&self, item: &ItemRef) -> Option<usize> {
        self.refs.iter().position(|r| r == item)
    }

    /// Returns true if `item` belongs to this level.
    pub fn contains(&self, item: &ItemRef) -> bool {
        self.position(item).is_some()
    }

    /// The record behind `item`.
    pub fn get(&self, item: &ItemRef) -> Option<&I> {
        let idx = self.position(item)?;
        match idx.checked_sub(self.folders.len()) {
            None => self.folders.get(idx),
            Some(file_idx) => self.files.get(file_idx),
        }
    }

    /// Look up a folder of this level by identity.
    pub fn folder(&self, key: &ItemKey) -> Option<&I> {
        self.get(&ItemRef {
            kind: ItemKind::Folder,
            key: key.clone(),
        })
    }
}
