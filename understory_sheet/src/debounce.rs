// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-driven, cancellable one-shot debounce.
//!
//! The debouncer never sleeps or spawns. Scheduling records a deadline and a
//! payload; the host arms its own timer for [`Debouncer::deadline`] and calls
//! [`Debouncer::take_due`] when it fires (or on every frame). Times are
//! monotonic milliseconds supplied by the host.
//!
//! At most one payload is pending. Scheduling again replaces it, and every
//! schedule returns a fresh [`DebounceHandle`] so stale handles can be told
//! apart from the live one.
//!
//! ## Minimal example
//!
//! ```
//! use understory_sheet::debounce::Debouncer;
//!
//! let mut commits = Debouncer::new(10);
//! let first = commits.schedule(1_000, "stale");
//! let second = commits.schedule(1_004, "fresh");
//! assert!(!commits.is_pending(first));
//! assert!(commits.is_pending(second));
//!
//! assert_eq!(commits.take_due(1_010), None);
//! assert_eq!(commits.take_due(1_014), Some((second, "fresh")));
//! assert_eq!(commits.take_due(2_000), None);
//! ```

/// Identifies one scheduled payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DebounceHandle(u64);

#[derive(Clone, Debug)]
struct Pending<T> {
    handle: DebounceHandle,
    due_ms: u64,
    payload: T,
}

/// A single-slot debounce timer.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay_ms: u64,
    generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Creates an idle debouncer with the given delay.
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    /// The delay applied to every schedule.
    #[must_use]
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Schedules `payload` to become due one delay after `now_ms`.
    ///
    /// Any pending payload is cancelled first.
    pub fn schedule(&mut self, now_ms: u64, payload: T) -> DebounceHandle {
        self.generation = self.generation.wrapping_add(1);
        let handle = DebounceHandle(self.generation);
        self.pending = Some(Pending {
            handle,
            due_ms: now_ms.saturating_add(self.delay_ms),
            payload,
        });
        handle
    }

    /// Cancels the pending payload, returning its handle.
    pub fn cancel(&mut self) -> Option<DebounceHandle> {
        self.pending.take().map(|p| p.handle)
    }

    /// Returns `true` if `handle` is the live pending payload.
    #[must_use]
    pub fn is_pending(&self, handle: DebounceHandle) -> bool {
        self.pending.as_ref().is_some_and(|p| p.handle == handle)
    }

    /// Returns `true` if anything is pending.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending payload becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due_ms)
    }

    /// Removes and returns the pending payload if it is due at `now_ms`.
    ///
    /// A payload is returned at most once.
    pub fn take_due(&mut self, now_ms: u64) -> Option<(DebounceHandle, T)> {
        if self.deadline().is_some_and(|due| due <= now_ms) {
            self.pending.take().map(|p| (p.handle, p.payload))
        } else {
            None
        }
    }
}
