// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single sheet: geometry, live drag, and the drag settlement state
//! machine.
//!
//! ## Lifecycle of a gesture
//!
//! 1) `Began` cancels any commit still pending from the previous gesture.
//! 2) Each `Changed` sample, once the sheet owns the gesture, feeds the
//!    offset/progress engine.
//! 3) A terminal phase (`Ended`, `Cancelled`, `Failed`) schedules a commit one
//!    debounce delay later and returns to standby. Platforms often emit one
//!    more sample right after release; the delay absorbs it.
//! 4) The host calls [`Sheet::poll`] when [`Sheet::next_deadline`] passes.
//!    The commit recomputes the drag from the final delta, asks the
//!    transition policy for the next state, writes it through the
//!    [`StateBinding`], and resets the drag.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Size;
//! use understory_sheet::{DragEvent, Sheet, SheetConfig, SheetState};
//!
//! let mut sheet = Sheet::new(SheetConfig::default(), SheetState::Medium);
//! sheet.set_full_size(Size::new(390.0, 800.0));
//! sheet.measure_content(Size::new(390.0, 300.0));
//!
//! let mut requested = SheetState::Medium;
//!
//! // Drag up by 400 and release.
//! sheet.handle_pan(DragEvent::began(0));
//! sheet.handle_pan(DragEvent::changed(-400.0, 16));
//! sheet.handle_pan(DragEvent::ended(-400.0, 32));
//!
//! // Nothing commits until the debounce delay has passed.
//! assert_eq!(sheet.poll(35, &mut requested), None);
//! assert_eq!(sheet.next_deadline(), Some(42));
//! assert_eq!(sheet.poll(42, &mut requested), Some(SheetState::Large));
//! assert_eq!(requested, SheetState::Large);
//! assert!(sheet.drag().is_rest());
//! ```

use alloc::rc::Rc;

use kurbo::Size;

use crate::binding::StateBinding;
use crate::config::{DefaultDecor, SheetConfig, SheetDecor};
use crate::context::SheetContext;
use crate::debounce::{DebounceHandle, Debouncer};
use crate::geometry::SheetGeometry;
use crate::gesture::{DragEvent, GesturePhase, NestedScroll};
use crate::progress::{DragOffset, drag_offset};
use crate::state::SheetState;

/// Gesture ownership of the settlement state machine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SettlePhase {
    /// No gesture is owned by the sheet.
    #[default]
    Standby,
    /// The sheet owns the current gesture.
    Changed,
}

/// What the sheet did with a gesture sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureResponse {
    /// The sample was left to someone else.
    Ignored,
    /// The sheet owns the gesture and tracked the sample.
    Tracking,
    /// The gesture ended and a commit was scheduled.
    Scheduled(DebounceHandle),
}

/// Everything a host needs to lay the sheet out for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetLayout {
    /// `false` until the container has been measured; hosts should not draw
    /// the sheet before then.
    pub ready: bool,
    /// Offset of the sheet's top edge from the top of the container. Also the
    /// height of the outside region.
    pub top: f64,
    /// Height to lay the primary content out at, or `None` for its natural
    /// height.
    pub content_height: Option<f64>,
    /// Corner radius of the top edge.
    pub corner_radius: f64,
}

/// The three pluggable regions, built for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetRegions<V> {
    /// Region above the sheet.
    pub outside: V,
    /// Region behind the sheet content.
    pub sheet_background: V,
    /// Region behind everything.
    pub background: V,
}

/// A draggable, multi-state sheet.
#[derive(Debug)]
pub struct Sheet<D = DefaultDecor> {
    config: Rc<SheetConfig<D>>,
    geometry: SheetGeometry,
    state: SheetState,
    drag: DragOffset,
    phase: SettlePhase,
    open: bool,
    baseline: Option<f64>,
    commits: Debouncer<f64>,
}

impl<D> Sheet<D> {
    /// Creates a sheet resting at `initial`.
    ///
    /// An unsupported `initial` state resolves to the nearest supported one.
    pub fn new(config: SheetConfig<D>, initial: SheetState) -> Self {
        Self::with_shared(Rc::new(config), initial)
    }

    /// Creates a sheet that shares `config` with other sheets.
    pub fn with_shared(config: Rc<SheetConfig<D>>, initial: SheetState) -> Self {
        let state = config.supported().nearest(initial);
        let commits = Debouncer::new(config.debounce_ms());
        Self {
            config,
            geometry: SheetGeometry::new(),
            state,
            drag: DragOffset::REST,
            phase: SettlePhase::Standby,
            open: false,
            baseline: None,
            commits,
        }
    }

    /// The shared configuration.
    #[must_use]
    pub fn config(&self) -> &Rc<SheetConfig<D>> {
        &self.config
    }

    /// Measured sizes.
    #[must_use]
    pub fn geometry(&self) -> &SheetGeometry {
        &self.geometry
    }

    /// State the sheet rests at or is being dragged away from.
    #[must_use]
    pub fn state(&self) -> SheetState {
        self.state
    }

    /// Live drag offset and progress.
    #[must_use]
    pub fn drag(&self) -> DragOffset {
        self.drag
    }

    /// Gesture ownership.
    #[must_use]
    pub fn phase(&self) -> SettlePhase {
        self.phase
    }

    /// Snapshot for decor builders and policies.
    #[must_use]
    pub fn context(&self) -> SheetContext {
        SheetContext {
            state: self.state,
            offset: self.drag.offset,
            progress: self.drag.progress,
            main_size: self.geometry.main_size(),
            full_size: self.geometry.full_size(),
            threshold: self.config.threshold(),
            supported: self.config.supported(),
        }
    }

    /// Layout for the current frame.
    #[must_use]
    pub fn layout(&self) -> SheetLayout {
        SheetLayout {
            ready: self.geometry.is_ready(),
            top: self.geometry.anchor(self.state) - self.drag.offset,
            content_height: self.geometry.content_height(self.state, self.drag.offset),
            corner_radius: self.config.corner_radius(),
        }
    }

    /// Builds the decor regions for the current frame.
    pub fn regions(&self) -> SheetRegions<D::View>
    where
        D: SheetDecor,
    {
        let cx = self.context();
        let decor = self.config.decor();
        SheetRegions {
            outside: decor.outside(&cx),
            sheet_background: decor.sheet_background(&cx),
            background: decor.background(&cx),
        }
    }

    /// Feeds a container measurement. Zero and unchanged sizes are ignored.
    pub fn set_full_size(&mut self, size: Size) -> bool {
        self.geometry.set_full_size(size)
    }

    /// Feeds a measurement of the primary content.
    ///
    /// Only taken while the sheet is at rest; see
    /// [`SheetGeometry::record_content`].
    pub fn measure_content(&mut self, size: Size) -> bool {
        self.geometry.record_content(self.state, self.drag.offset, size)
    }

    /// Adopts a state assigned programmatically through `binding`.
    ///
    /// An unsupported request resolves to the nearest supported state and the
    /// resolved value is written back. Adopting a new state cancels any
    /// pending commit, resets the drag, and gives up any gesture in progress:
    /// its remaining samples are ignored. Returns `true` if the state
    /// changed.
    pub fn sync_state<B: StateBinding + ?Sized>(&mut self, binding: &mut B) -> bool {
        let requested = binding.get();
        let resolved = self.config.supported().nearest(requested);
        if resolved != requested {
            binding.set(resolved);
        }
        if resolved == self.state {
            return false;
        }
        tracing::debug!(from = ?self.state, to = ?resolved, "sheet state assigned");
        self.state = resolved;
        self.release();
        true
    }

    /// Closes the sheet, as a tap on the backdrop does.
    ///
    /// Does nothing when `Hidden` is unsupported. Like [`Sheet::sync_state`],
    /// this gives up any gesture in progress.
    pub fn dismiss<B: StateBinding + ?Sized>(&mut self, binding: &mut B) -> bool {
        if !self.config.supported().supports(SheetState::Hidden) {
            return false;
        }
        self.release();
        self.state = SheetState::Hidden;
        binding.set(SheetState::Hidden);
        true
    }

    /// Applies a raw drag delta to the live offset and progress.
    pub fn update_offset(&mut self, delta: f64) -> DragOffset {
        self.drag = drag_offset(delta, self.state, &self.geometry, self.config.supported());
        tracing::trace!(
            delta,
            offset = self.drag.offset,
            progress = self.drag.progress,
            "sheet drag"
        );
        self.drag
    }

    /// Handles a sample from a pan gesture on the sheet itself.
    ///
    /// The sheet always owns its own pan. A `Changed` sample outside a
    /// gesture opened by `Began` is ignored.
    pub fn handle_pan(&mut self, event: DragEvent) -> GestureResponse {
        match event.phase {
            GesturePhase::Began => {
                self.begin_gesture();
                self.phase = SettlePhase::Changed;
                GestureResponse::Tracking
            }
            GesturePhase::Changed if !self.open => GestureResponse::Ignored,
            GesturePhase::Changed => {
                self.phase = SettlePhase::Changed;
                self.update_offset(event.delta());
                GestureResponse::Tracking
            }
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed => {
                self.finish_gesture(&event)
            }
        }
    }

    /// Handles a sample from the gesture of a nested scrollable `list`.
    ///
    /// The sheet claims the gesture when it is not at `Large`, when the list
    /// is overscrolled past its top, or when it already claimed it earlier in
    /// this gesture. Until then the list scrolls normally. Every terminal
    /// phase re-enables the list's scrolling, whether or not the sheet owned
    /// the gesture.
    pub fn handle_nested<L: NestedScroll + ?Sized>(
        &mut self,
        event: DragEvent,
        list: &mut L,
    ) -> GestureResponse {
        match event.phase {
            GesturePhase::Began => {
                self.begin_gesture();
                self.baseline = Some(list.content_offset());
                GestureResponse::Ignored
            }
            GesturePhase::Changed if !self.open => {
                list.set_scroll_enabled(true);
                GestureResponse::Ignored
            }
            GesturePhase::Changed => {
                let claim = self.state != SheetState::Large
                    || list.content_offset() < 0.0
                    || self.phase == SettlePhase::Changed;
                if !claim {
                    list.set_scroll_enabled(true);
                    return GestureResponse::Ignored;
                }
                if self.phase == SettlePhase::Standby {
                    tracing::trace!(state = ?self.state, "sheet claimed nested scroll gesture");
                }
                self.phase = SettlePhase::Changed;
                self.update_offset(event.delta());
                list.set_content_offset(self.baseline.unwrap_or(0.0));
                list.set_scroll_enabled(false);
                GestureResponse::Tracking
            }
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed => {
                let response = self.finish_gesture(&event);
                self.baseline = None;
                list.set_scroll_enabled(true);
                response
            }
        }
    }

    /// When the pending commit becomes due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.commits.deadline()
    }

    /// Returns `true` if `handle` is the commit still waiting to run.
    #[must_use]
    pub fn is_pending(&self, handle: DebounceHandle) -> bool {
        self.commits.is_pending(handle)
    }

    /// Runs the pending commit if it is due at `now_ms`.
    ///
    /// Returns the state written to `binding`, or `None` if nothing ran. A
    /// scheduled commit runs at most once.
    pub fn poll<B: StateBinding + ?Sized>(
        &mut self,
        now_ms: u64,
        binding: &mut B,
    ) -> Option<SheetState> {
        let (_, delta) = self.commits.take_due(now_ms)?;
        Some(self.settle(delta, binding))
    }

    fn begin_gesture(&mut self) {
        self.abandon_commit();
        self.phase = SettlePhase::Standby;
        self.open = true;
    }

    // Only the last gesture can have a commit pending: `Began`, `sync_state`
    // and `dismiss` all cancel it. A repeated terminal event restarts the
    // delay with its own delta.
    fn finish_gesture(&mut self, event: &DragEvent) -> GestureResponse {
        self.open = false;
        if self.phase == SettlePhase::Changed {
            self.phase = SettlePhase::Standby;
        } else if self.commits.has_pending() {
            tracing::trace!(time_ms = event.time_ms, "sheet commit restarted");
        } else {
            return GestureResponse::Ignored;
        }
        let handle = self.commits.schedule(event.time_ms, event.settle_delta());
        GestureResponse::Scheduled(handle)
    }

    fn release(&mut self) {
        self.abandon_commit();
        self.drag = DragOffset::REST;
        self.phase = SettlePhase::Standby;
        self.open = false;
        self.baseline = None;
    }

    fn abandon_commit(&mut self) {
        if let Some(handle) = self.commits.cancel() {
            tracing::debug!(?handle, "pending sheet commit cancelled");
        }
    }

    fn settle<B: StateBinding + ?Sized>(&mut self, delta: f64, binding: &mut B) -> SheetState {
        self.update_offset(delta);
        let cx = self.context();
        let proposed = self.config.policy().next_state(&cx);
        let next = self.config.supported().nearest(proposed);
        tracing::debug!(
            from = ?self.state,
            to = ?next,
            progress = cx.progress,
            "sheet settled"
        );
        self.state = next;
        binding.set(next);
        self.drag = DragOffset::REST;
        next
    }
}
