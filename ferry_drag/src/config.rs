// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser configuration: field names and overlay timing.
//!
//! Every section has a `Default` and may be omitted from JSON. Durations are
//! written in milliseconds.

use std::time::Duration;

use ferry_selection::FieldNames;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`BrowserConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record field name is empty.
    #[error("field name `{0}` must not be empty")]
    EmptyFieldName(&'static str),

    /// A transition or timer duration is zero.
    #[error("`{0}` must be longer than zero")]
    ZeroDuration(&'static str),

    /// A distance is negative or not finite.
    #[error("`{name}` must be a finite, non-negative distance (got {value})")]
    InvalidDistance {
        /// Setting name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Cursor-clone overlay timing and geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Transition of freshly created clones towards the pointer.
    #[serde(with = "millis")]
    pub clone_transition: Duration,
    /// Transition of clones back to their sources.
    #[serde(with = "millis")]
    pub return_transition: Duration,
    /// Delay after which clones still on their way home are removed anyway.
    #[serde(with = "millis")]
    pub fallback_delay: Duration,
    /// Distance to the pointer at which a clone stops easing and sticks to it.
    pub snap_radius: f64,
    /// Distance to its source at which a returning clone counts as home.
    pub return_tolerance: f64,
    /// Offset of the bottom clone of a stack, so the pile reads as several items.
    pub stack_offset: f64,
    /// Z-index of the overlay layer.
    pub overlay_z_index: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            clone_transition: Duration::from_millis(150),
            return_transition: Duration::from_millis(150),
            fallback_delay: Duration::from_millis(500),
            snap_radius: 15.0,
            return_tolerance: 0.0,
            stack_offset: 3.0,
            overlay_z_index: i32::MAX,
        }
    }
}

/// Configuration of a [`FolderBrowser`](crate::FolderBrowser).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Names of the record fields the browser reads.
    pub fields: FieldNames,
    /// Cursor-clone overlay settings.
    pub overlay: OverlayConfig,
}

impl BrowserConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// ```
    /// use ferry_drag::BrowserConfig;
    /// use std::time::Duration;
    ///
    /// let config = BrowserConfig::from_json(
    ///     r#"{ "fields": { "id": "key" }, "overlay": { "fallback_delay": 800 } }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.fields.id, "key");
    /// assert_eq!(config.fields.parent_id, "parent_uid");
    /// assert_eq!(config.overlay.fallback_delay, Duration::from_millis(800));
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the browser cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = &self.fields;
        for (name, value) in [
            ("id", &fields.id),
            ("parent_id", &fields.parent_id),
            ("file_name", &fields.file_name),
            ("folder_name", &fields.folder_name),
        ] {
            if value.is_empty() {
                return Err(ConfigError::EmptyFieldName(name));
            }
        }

        let overlay = &self.overlay;
        for (name, value) in [
            ("clone_transition", overlay.clone_transition),
            ("return_transition", overlay.return_transition),
            ("fallback_delay", overlay.fallback_delay),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ZeroDuration(name));
            }
        }
        for (name, value) in [
            ("snap_radius", overlay.snap_radius),
            ("return_tolerance", overlay.return_tolerance),
            ("stack_offset", overlay.stack_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDistance { name, value });
            }
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Millisecond timings never approach u64::MAX."
        )]
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
