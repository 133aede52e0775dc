// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sheet --heading-base-level=0

//! Understory Sheet: a headless, multi-state bottom sheet.
//!
//! A bottom sheet is a panel that rests at one of a few discrete heights and
//! follows the user's finger in between. This crate is the part of a sheet
//! that has nothing to do with drawing: it turns drag gestures (from a pan on
//! the sheet itself or from a scrollable list nested inside it) into a
//! continuous offset, a normalized progress value, and eventually a new
//! resting [`SheetState`].
//!
//! Rendering, animation playback, and the overlay window the sheet floats in
//! are left to the host. The host feeds the sheet measured sizes and gesture
//! samples, reads back a [`SheetLayout`] every frame, and drives the
//! debounced commit from its own timer.
//!
//! ## States and geometry
//!
//! [`SheetState`] has three values, from most closed to most open: `Hidden`,
//! `Medium`, and `Large`. A [`SheetConfig`] restricts a sheet to a non-empty
//! subset of them, [`SupportedStates`]. Each state has an anchor, the resting
//! distance of the sheet's top edge from the top of its container, computed by
//! [`SheetGeometry::anchor`] from the measured sizes.
//!
//! ## Gestures
//!
//! - [`Sheet::handle_pan`] takes samples from a pan on the sheet itself.
//! - [`Sheet::handle_nested`] takes samples from a nested list's own gesture,
//!   and decides sample by sample whether the list scrolls or the sheet moves.
//!   The list is reached through the [`NestedScroll`] trait.
//!
//! When a gesture ends the sheet schedules a commit one short debounce delay
//! later. The host arms a timer for [`Sheet::next_deadline`] and calls
//! [`Sheet::poll`]; the commit asks the [`TransitionPolicy`] for the next
//! state and writes it through a [`StateBinding`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_sheet::{DragEvent, Sheet, SheetConfig, SheetState};
//!
//! let config = SheetConfig::builder().threshold(0.5).build().unwrap();
//! let mut sheet = Sheet::new(config, SheetState::Medium);
//! let mut state = SheetState::Medium;
//!
//! // Layout reports the container and the content.
//! sheet.set_full_size(Size::new(390.0, 800.0));
//! sheet.measure_content(Size::new(390.0, 320.0));
//! assert_eq!(sheet.layout().top, 480.0);
//!
//! // Drag the sheet up.
//! sheet.handle_pan(DragEvent::began(0));
//! sheet.handle_pan(DragEvent::changed(-300.0, 16));
//! assert_eq!(sheet.layout().top, 180.0);
//! sheet.handle_pan(DragEvent::ended(-300.0, 33));
//!
//! // The host's timer fires.
//! let due = sheet.next_deadline().unwrap();
//! assert_eq!(sheet.poll(due, &mut state), Some(SheetState::Large));
//! assert_eq!(state, SheetState::Large);
//! assert_eq!(sheet.layout().top, 0.0);
//! ```
//!
//! ## Customization
//!
//! - [`SheetConfigBuilder::next_state`] replaces the default
//!   [`ThresholdPolicy`] with any [`TransitionPolicy`], including a closure.
//! - [`SheetConfigBuilder::decor`] replaces the three pluggable regions
//!   (outside, sheet background, full background) with any [`SheetDecor`].
//!   [`FnDecor`] swaps them one closure at a time.
//! - With the `serde` feature, [`SheetSettings`] can be loaded from a settings
//!   file and applied with [`SheetConfigBuilder::settings`].
//!
//! ## Several sheets
//!
//! A host context (window, screen) keeps its sheets in a [`SheetRegistry`],
//! keyed by string id and stacked in registration order. [`SheetRegistries`]
//! holds one registry per live context.
//!
//! ## Features
//!
//! - `std` (default): build Kurbo, `tracing`, and `thiserror` against the
//!   standard library.
//! - `libm`: use `libm` for Kurbo's float math in `no_std` builds.
//! - `serde`: serialize states and [`SheetSettings`].
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod binding;
mod config;
mod context;
pub mod debounce;
mod geometry;
pub mod gesture;
pub mod policy;
pub mod progress;
mod registry;
mod sheet;
mod state;

pub use binding::StateBinding;
pub use config::{
    ConfigError, Curve, DEFAULT_CORNER_RADIUS, DEFAULT_DEBOUNCE_MS, DEFAULT_THRESHOLD,
    DefaultDecor, FnDecor, LARGE_SCRIM_OPACITY, MEDIUM_SCRIM_OPACITY, Region, SheetConfig,
    SheetConfigBuilder, SheetDecor, SheetSettings, backdrop_opacity,
};
pub use context::SheetContext;
pub use debounce::DebounceHandle;
pub use geometry::SheetGeometry;
pub use gesture::{DragEvent, GesturePhase, NestedScroll, PanTracker};
pub use policy::{ThresholdPolicy, TransitionPolicy};
pub use progress::DragOffset;
pub use registry::{DEFAULT_SHEET_ID, OverlayHost, SheetEntry, SheetRegistries, SheetRegistry};
pub use sheet::{GestureResponse, SettlePhase, Sheet, SheetLayout, SheetRegions};
pub use state::{SheetState, SupportedStates};
