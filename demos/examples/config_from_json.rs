// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load a browser configuration from JSON.
//!
//! Hosts with records keyed differently rename the fields; timings are in
//! milliseconds. Invalid values are reported, not clamped.
//!
//! Run:
//! - `cargo run -p ferry_demos --example config_from_json`

use std::time::Duration;

use ferry_drag::{BrowserConfig, ConfigError, FolderBrowser, Platform};
use ferry_selection::{FieldValue, ItemKind};
use serde_json::{Value, json};

fn main() {
    let config = BrowserConfig::from_json(
        r#"{
            "fields": { "id": "key", "parent_id": "parent", "folder_name": "title" },
            "overlay": { "return_transition": 250, "snap_radius": 0.0 }
        }"#,
    )
    .expect("valid configuration");
    assert_eq!(config.overlay.return_transition, Duration::from_millis(250));
    assert_eq!(config.overlay.clone_transition, Duration::from_millis(150));

    let mut browser = FolderBrowser::<Value>::new(config, Platform::native()).expect("validated");
    let folder = json!({ "key": "a1", "parent": "0", "title": "Reports", "name": "ignored" });
    browser.set_data(vec![folder.clone()], vec![], None);
    assert_eq!(browser.level().len(), 1);
    assert_eq!(
        browser.display_name(ItemKind::Folder, &folder),
        Some(FieldValue::Text("Reports"))
    );

    match BrowserConfig::from_json(r#"{ "overlay": { "fallback_delay": 0 } }"#) {
        Err(err @ ConfigError::ZeroDuration(_)) => println!("rejected: {err}"),
        other => panic!("expected a validation error, got {other:?}"),
    }
}
