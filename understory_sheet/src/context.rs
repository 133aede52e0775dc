// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot of a sheet handed to decor builders and transition policies.

use kurbo::Size;

use crate::state::{SheetState, SupportedStates};

/// Read-only view of a sheet at one instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetContext {
    /// State the sheet rests at, or is being dragged away from.
    pub state: SheetState,
    /// Live drag offset from the resting anchor. Positive is toward open.
    pub offset: f64,
    /// Normalized travel of the current gesture, roughly in `[-1, 1]`.
    ///
    /// Not clamped; consumers must tolerate values slightly beyond the range.
    pub progress: f64,
    /// Natural size of the primary content.
    pub main_size: Size,
    /// Size of the container.
    pub full_size: Size,
    /// Fraction of travel a gesture must exceed to change state.
    pub threshold: f64,
    /// States the sheet may rest at.
    pub supported: SupportedStates,
}

impl SheetContext {
    /// Context for a sheet resting at `state` with no geometry.
    #[must_use]
    pub fn at_rest(state: SheetState, supported: SupportedStates, threshold: f64) -> Self {
        Self {
            state,
            offset: 0.0,
            progress: 0.0,
            main_size: Size::ZERO,
            full_size: Size::ZERO,
            threshold,
            supported,
        }
    }

    /// Returns a copy with `progress` replaced.
    #[must_use]
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }
}
