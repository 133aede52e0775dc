// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State transition policies: decide where a released gesture settles.
//!
//! A policy sees a [`SheetContext`] carrying the state being left, the final
//! progress, the configured threshold, and the supported states. It must be
//! total; any [`SheetState`] it returns is accepted, and the sheet resolves an
//! unsupported answer to the nearest supported state.
//!
//! # Example
//!
//! ```
//! use understory_sheet::{SheetContext, SheetState, SupportedStates};
//! use understory_sheet::policy::{ThresholdPolicy, TransitionPolicy};
//!
//! let cx = SheetContext::at_rest(SheetState::Hidden, SupportedStates::all(), 0.5)
//!     .with_progress(0.6);
//! assert_eq!(ThresholdPolicy.next_state(&cx), SheetState::Medium);
//!
//! // Closures are policies too.
//! let always_large = |_: &SheetContext| SheetState::Large;
//! assert_eq!(always_large.next_state(&cx), SheetState::Large);
//! ```

use crate::context::SheetContext;
use crate::state::SheetState;

/// Decides the next resting state when a gesture is released.
pub trait TransitionPolicy {
    /// Returns the state the sheet should settle at.
    fn next_state(&self, cx: &SheetContext) -> SheetState;
}

/// Default policy: move one step toward the drag when progress exceeds the
/// threshold.
///
/// A single gesture never jumps from `Hidden` straight to `Large` or back,
/// except when the intermediate state is unsupported.
#[derive(Copy, Clone, Debug, Default)]
pub struct ThresholdPolicy;

impl TransitionPolicy for ThresholdPolicy {
    fn next_state(&self, cx: &SheetContext) -> SheetState {
        let supported = cx.supported;
        let progress = cx.progress;
        let threshold = cx.threshold;
        match cx.state {
            SheetState::Hidden if progress > threshold => [SheetState::Medium, SheetState::Large]
                .into_iter()
                .find(|s| supported.supports(*s))
                .unwrap_or(SheetState::Hidden),
            SheetState::Medium if progress > threshold && supported.supports(SheetState::Large) => {
                SheetState::Large
            }
            SheetState::Medium
                if progress < -threshold && supported.supports(SheetState::Hidden) =>
            {
                SheetState::Hidden
            }
            SheetState::Large if progress < -threshold => [SheetState::Medium, SheetState::Hidden]
                .into_iter()
                .find(|s| supported.supports(*s))
                .unwrap_or(SheetState::Large),
            state => state,
        }
    }
}

impl<F> TransitionPolicy for F
where
    F: Fn(&SheetContext) -> SheetState,
{
    fn next_state(&self, cx: &SheetContext) -> SheetState {
        self(cx)
    }
}
