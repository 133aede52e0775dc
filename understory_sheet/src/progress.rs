// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset/progress engine: turn a raw drag delta into a clamped content
//! offset and a normalized progress value.
//!
//! Deltas are signed along the sheet's travel axis: positive drags the sheet
//! open (up), negative drags it closed (down).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Size;
//! use understory_sheet::{SheetGeometry, SheetState, SupportedStates};
//! use understory_sheet::progress::drag_offset;
//!
//! let geometry = SheetGeometry::from_sizes(
//!     Size::new(390.0, 300.0),
//!     Size::new(390.0, 300.0),
//!     Size::new(390.0, 800.0),
//! );
//!
//! // Pull the sheet half way from Medium toward Large.
//! let drag = drag_offset(250.0, SheetState::Medium, &geometry, SupportedStates::all());
//! assert_eq!(drag.offset, 250.0);
//! assert_eq!(drag.progress, 0.5);
//! ```

use crate::geometry::SheetGeometry;
use crate::state::{SheetState, SupportedStates};

/// Scale applied to a drag heading toward a state the sheet cannot rest at.
pub const RESISTANCE: f64 = 1.0 / 5.0;

/// Offset and progress of an in-flight drag.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragOffset {
    /// Distance the sheet has moved from its resting anchor.
    pub offset: f64,
    /// Normalized travel toward the neighbouring state.
    pub progress: f64,
}

impl DragOffset {
    /// The resting value: no offset, no progress.
    pub const REST: Self = Self {
        offset: 0.0,
        progress: 0.0,
    };

    /// Returns `true` when the sheet sits at its anchor.
    #[must_use]
    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }
}

/// Applies rubber-band resistance when `delta` heads toward an unsupported
/// state.
///
/// At `Large` either direction is damped when `Medium` or `Hidden` is
/// unsupported.
#[must_use]
pub fn damp(delta: f64, state: SheetState, supported: SupportedStates) -> f64 {
    let resisted = match state {
        SheetState::Hidden => false,
        SheetState::Medium if delta > 0.0 => !supported.supports(SheetState::Large),
        SheetState::Medium => !supported.supports(SheetState::Hidden),
        SheetState::Large => {
            !supported.supports(SheetState::Medium) || !supported.supports(SheetState::Hidden)
        }
    };
    if resisted { delta * RESISTANCE } else { delta }
}

/// Computes the drag offset and progress for a raw `delta` from `state`.
///
/// Returns [`DragOffset::REST`] while the geometry is not laid out. The
/// offset never exceeds the anchor of `state`, so the sheet cannot be pulled
/// past the top of its container. Every division is guarded; a zero span
/// yields zero progress.
#[must_use]
pub fn drag_offset(
    delta: f64,
    state: SheetState,
    geometry: &SheetGeometry,
    supported: SupportedStates,
) -> DragOffset {
    if !geometry.is_ready() || !delta.is_finite() {
        return DragOffset::REST;
    }

    let delta = damp(delta, state, supported);
    let anchor = geometry.anchor(state);
    let offset = if anchor - delta < 0.0 { anchor } else { delta };

    let full = geometry.full_size().height;
    let main = geometry.main_size().height;
    let medium = geometry.medium_size().height;
    let progress = match state {
        SheetState::Hidden => 0.0,
        SheetState::Large if medium != 0.0 => ratio(offset, full - medium),
        SheetState::Large => toward_open(offset, full, main),
        SheetState::Medium if delta >= 0.0 => toward_open(offset, full, main),
        SheetState::Medium => ratio(offset, medium),
    };

    DragOffset { offset, progress }
}

/// Progress measured against the span between the natural content and the
/// container; content that already fills the container measures against the
/// container itself.
fn toward_open(offset: f64, full: f64, main: f64) -> f64 {
    if full == main {
        ratio(offset, full)
    } else {
        ratio(offset, full - main)
    }
}

fn ratio(offset: f64, span: f64) -> f64 {
    if span == 0.0 || !span.is_finite() {
        0.0
    } else {
        offset / span
    }
}
