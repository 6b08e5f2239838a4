// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records: how application-owned items are read through configurable field names.

use alloc::borrow::ToOwned;
use alloc::string::{String, ToString};

/// A borrowed field value read from a [`Record`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Text value.
    Text(&'a str),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value that does not fit in `i64`.
    UInt(u64),
}

/// An application-owned item (file or folder) whose fields are looked up by name.
///
/// Items are never mutated by this crate.
pub trait Record {
    /// Returns the value stored under `name`, if any.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

/// Normalized identity value.
///
/// Integers are stored in their decimal text form so that `0` and `"0"` name the
/// same item, which is how loosely typed host data usually expects it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(String);

impl ItemKey {
    /// Create a key from its text form.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The text form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<FieldValue<'_>> for ItemKey {
    fn from(value: FieldValue<'_>) -> Self {
        match value {
            FieldValue::Text(s) => Self(s.to_owned()),
            FieldValue::Int(i) => Self(i.to_string()),
            FieldValue::UInt(u) => Self(u.to_string()),
        }
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<i64> for ItemKey {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl core::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which host list an item came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// An entry of the folder list.
    Folder,
    /// An entry of the file list.
    File,
}

/// Identity of an item inside the browser.
///
/// Folders and files come from separate host lists and may reuse identity values,
/// so the kind is part of the identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemRef {
    /// Source list.
    pub kind: ItemKind,
    /// Identity field value.
    pub key: ItemKey,
}

impl ItemRef {
    /// A folder reference.
    pub fn folder(key: impl Into<ItemKey>) -> Self {
        Self {
            kind: ItemKind::Folder,
            key: key.into(),
        }
    }

    /// A file reference.
    pub fn file(key: impl Into<ItemKey>) -> Self {
        Self {
            kind: ItemKind::File,
            key: key.into(),
        }
    }
}

/// Field names used to read identity, parentage, and display names from records.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct FieldNames {
    /// Identity field (default `uid`).
    pub id: String,
    /// Parent identity field (default `parent_uid`).
    pub parent_id: String,
    /// Display-name field of files (default `name`).
    pub file_name: String,
    /// Display-name field of folders (default `name`).
    pub folder_name: String,
    /// Parent identity of top-level items, used when no folder is active (default `"0"`).
    pub root_id: ItemKey,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: "uid".into(),
            parent_id: "parent_uid".into(),
            file_name: "name".into(),
            folder_name: "name".into(),
            root_id: ItemKey::from("0"),
        }
    }
}

impl FieldNames {
    /// Identity of `item`, if it has one.
    pub fn key_of(&self, item: &impl Record) -> Option<ItemKey> {
        item.field(&self.id).map(ItemKey::from)
    }

    /// Parent identity of `item`, if it has one.
    pub fn parent_of(&self, item: &impl Record) -> Option<ItemKey> {
        item.field(&self.parent_id).map(ItemKey::from)
    }

    /// Identity of `item` tagged with its kind.
    pub fn item_ref(&self, kind: ItemKind, item: &impl Record) -> Option<ItemRef> {
        Some(ItemRef {
            kind,
            key: self.key_of(item)?,
        })
    }

    /// Display name of `item`, read from the field configured for its kind.
    pub fn display_name<'a>(&self, kind: ItemKind, item: &'a impl Record) -> Option<FieldValue<'a>> {
        match kind {
            ItemKind::Folder => item.field(&self.folder_name),
            ItemKind::File => item.field(&self.file_name),
        }
    }
}

#[cfg(feature = "json")]
mod json {
    use super::{FieldValue, ItemKey, Record};
    use serde_json::Value;

    impl Record for Value {
        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match self.get(name)? {
                Value::String(s) => Some(FieldValue::Text(s)),
                Value::Number(n) => n
                    .as_i64()
                    .map(FieldValue::Int)
                    .or_else(|| n.as_u64().map(FieldValue::UInt)),
                _ => None,
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for ItemKey {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct KeyVisitor;

            impl serde::de::Visitor<'_> for KeyVisitor {
                type Value = ItemKey;

                fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    f.write_str("a string or integer identity")
                }

                fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<ItemKey, E> {
                    Ok(ItemKey::from(v))
                }

                fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<ItemKey, E> {
                    Ok(ItemKey::from(FieldValue::Int(v)))
                }

                fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<ItemKey, E> {
                    Ok(ItemKey::from(FieldValue::UInt(v)))
                }
            }

            deserializer.deserialize_any(KeyVisitor)
        }
    }

    impl serde::Serialize for ItemKey {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static [(&'static str, FieldValue<'static>)]);

    impl Record for Row {
        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            self.0.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
        }
    }

    #[test]
    fn integer_and_text_keys_agree() {
        assert_eq!(ItemKey::from(FieldValue::Int(0)), ItemKey::from("0"));
        assert_eq!(ItemKey::from(FieldValue::UInt(u64::MAX)).as_str(), "18446744073709551615");
    }

    #[test]
    fn field_names_read_configured_fields() {
        let row = Row(&[
            ("id", FieldValue::Int(7)),
            ("parent", FieldValue::Text("3")),
            ("title", FieldValue::Text("notes.txt")),
        ]);
        let fields = FieldNames {
            id: "id".into(),
            parent_id: "parent".into(),
            file_name: "title".into(),
            ..FieldNames::default()
        };
        assert_eq!(fields.key_of(&row), Some(ItemKey::from("7")));
        assert_eq!(fields.parent_of(&row), Some(ItemKey::from("3")));
        assert_eq!(
            fields.item_ref(ItemKind::File, &row),
            Some(ItemRef::file("7"))
        );
        assert_eq!(
            fields.display_name(ItemKind::File, &row),
            Some(FieldValue::Text("notes.txt"))
        );
        assert_eq!(fields.display_name(ItemKind::Folder, &row), None);
    }

    #[test]
    fn kinds_keep_identities_apart() {
        assert_ne!(ItemRef::folder("1"), ItemRef::file("1"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_values_are_records() {
        let v = serde_json::json!({ "uid": 12, "parent_uid": "0", "name": "docs", "tags": [] });
        let fields = FieldNames::default();
        assert_eq!(fields.key_of(&v), Some(ItemKey::from("12")));
        assert_eq!(fields.parent_of(&v), Some(fields.root_id.clone()));
        assert_eq!(v.field("tags"), None, "arrays are not identity values");
    }

    #[cfg(feature = "json")]
    #[test]
    fn field_names_deserialize_with_defaults() {
        let fields: FieldNames = serde_json::from_str(r#"{ "id": "key", "root_id": 0 }"#).unwrap();
        assert_eq!(fields.id, "key");
        assert_eq!(fields.parent_id, "parent_uid");
        assert_eq!(fields.root_id, ItemKey::from("0"));
    }
}
