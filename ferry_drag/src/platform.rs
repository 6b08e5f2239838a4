// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform probing, resolved once into an immutable [`InputProfile`].

/// Key code reported for Shift on every platform.
pub const SHIFT_KEY: u32 = 16;

/// Key code of Ctrl on non-Apple platforms.
const CTRL_KEY: u32 = 17;
/// Key code of the left Command key in Blink and WebKit.
const META_KEY: u32 = 91;
/// Key code Gecko reports for Command on macOS.
const GECKO_META_KEY: u32 = 224;

/// Host operating system family.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Os {
    /// macOS: the multi-select modifier is Command.
    MacOs,
    /// Anything else: the multi-select modifier is Ctrl.
    Other,
}

/// Rendering engine delivering input and transition events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Engine {
    /// Chromium and derivatives.
    Blink,
    /// Safari and other WebKit hosts.
    WebKit,
    /// Firefox.
    Gecko,
    /// Legacy Opera.
    Presto,
    /// A native host or an engine that was not recognized.
    Unknown,
}

/// Where the browser widget runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
    /// Rendering engine.
    pub engine: Engine,
}

impl Platform {
    /// Probe a platform string (e.g. `navigator.platform`) and a user agent.
    pub fn detect(platform: &str, user_agent: &str) -> Self {
        let os = if platform.contains("Mac") {
            Os::MacOs
        } else {
            Os::Other
        };
        let ua = user_agent.to_ascii_lowercase();
        let engine = if ua.contains("firefox") {
            Engine::Gecko
        } else if ua.contains("presto") {
            Engine::Presto
        } else if ua.contains("chrome") || ua.contains("chromium") {
            Engine::Blink
        } else if ua.contains("applewebkit") {
            Engine::WebKit
        } else {
            Engine::Unknown
        };
        Self { os, engine }
    }

    /// The platform this process was compiled for, with an unknown engine.
    pub fn native() -> Self {
        let os = if cfg!(target_os = "macos") {
            Os::MacOs
        } else {
            Os::Other
        };
        Self {
            os,
            engine: Engine::Unknown,
        }
    }
}

/// Engine-dependent input constants.
///
/// Resolved once when a browser widget is built and never re-probed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InputProfile {
    /// Key code of the multi-select modifier (Ctrl, or Command on macOS).
    pub select_key: u32,
    /// Key code of the range-select modifier.
    pub range_key: u32,
    /// Name of the transition-end event the renderer reports.
    pub transition_end: &'static str,
}

impl InputProfile {
    /// Resolve the profile for `platform`.
    pub fn resolve(platform: Platform) -> Self {
        let select_key = match (platform.os, platform.engine) {
            (Os::MacOs, Engine::Gecko) => GECKO_META_KEY,
            (Os::MacOs, _) => META_KEY,
            (Os::Other, _) => CTRL_KEY,
        };
        let transition_end = match platform.engine {
            Engine::Presto => "oTransitionEnd",
            Engine::WebKit => "webkitTransitionEnd",
            Engine::Blink | Engine::Gecko | Engine::Unknown => "transitionend",
        };
        Self {
            select_key,
            range_key: SHIFT_KEY,
            transition_end,
        }
    }
}
