// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the sheet demos.

use understory_sheet::{NestedScroll, SheetLayout};

/// Installs a `tracing` subscriber that honours `RUST_LOG`, defaulting to
/// `debug` so commits show up.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .with_target(false)
        .init();
}

/// A monotonic clock the demos advance by hand, one frame at a time.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrameClock {
    now_ms: u64,
}

impl FrameClock {
    /// Milliseconds per frame at 60 Hz, rounded.
    pub const FRAME_MS: u64 = 16;

    /// Current time.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Advances one frame and returns the new time.
    pub fn tick(&mut self) -> u64 {
        self.now_ms += Self::FRAME_MS;
        self.now_ms
    }

    /// Jumps forward to `deadline` if it is in the future.
    pub fn advance_to(&mut self, deadline: u64) -> u64 {
        self.now_ms = self.now_ms.max(deadline);
        self.now_ms
    }
}

/// A scroll view stand-in that logs what the sheet asks of it.
#[derive(Debug)]
pub struct ScriptedList {
    /// Vertical content offset; negative while rubber-banding past the top.
    pub offset: f64,
    /// Whether the list scrolls on its own.
    pub enabled: bool,
}

impl Default for ScriptedList {
    fn default() -> Self {
        Self {
            offset: 0.0,
            enabled: true,
        }
    }
}

impl NestedScroll for ScriptedList {
    fn content_offset(&self) -> f64 {
        self.offset
    }

    fn set_content_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        if enabled != self.enabled {
            tracing::info!(enabled, "list scrolling toggled");
        }
        self.enabled = enabled;
    }
}

/// One line describing a frame's layout.
pub fn describe(layout: &SheetLayout) -> String {
    match layout.content_height {
        Some(height) => format!("top {:>6.1}  content {:>6.1}", layout.top, height),
        None => format!("top {:>6.1}  content natural", layout.top),
    }
}
