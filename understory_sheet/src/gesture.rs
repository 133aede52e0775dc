// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture input: phases, drag events, pointer tracking, and the nested
//! scroll view a sheet competes with.
//!
//! Translations are in screen coordinates along the vertical axis: positive
//! means the finger moved down. The sheet converts them into deltas (positive
//! toward open) itself.
//!
//! ## Pointer tracking
//!
//! Hosts that only see raw pointer positions can use [`PanTracker`] to turn
//! them into [`DragEvent`]s:
//!
//! ```
//! use kurbo::Point;
//! use understory_sheet::gesture::{GesturePhase, PanTracker};
//!
//! let mut pan = PanTracker::default();
//! let began = pan.begin(Point::new(50.0, 600.0), 0);
//! assert_eq!(began.phase, GesturePhase::Began);
//!
//! // Finger moves up by 120.
//! let moved = pan.moved(Point::new(52.0, 480.0), 16).unwrap();
//! assert_eq!(moved.translation, -120.0);
//! assert_eq!(moved.delta(), 120.0);
//!
//! let ended = pan.end(Point::new(52.0, 470.0), 32).unwrap();
//! assert_eq!(ended.phase, GesturePhase::Ended);
//! assert!(!pan.is_dragging());
//! ```

use kurbo::Point;

/// Lifecycle phase of a gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// The gesture started.
    Began,
    /// The gesture moved.
    Changed,
    /// The gesture finished normally.
    Ended,
    /// The platform cancelled the gesture.
    Cancelled,
    /// The gesture recognizer failed.
    Failed,
}

impl GesturePhase {
    /// Returns `true` for phases that end a gesture.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

/// One gesture sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragEvent {
    /// Phase of this sample.
    pub phase: GesturePhase,
    /// Vertical translation since the gesture began. Positive is downward.
    pub translation: f64,
    /// Predicted final translation, when the platform extrapolates one.
    pub predicted: Option<f64>,
    /// Host timestamp in monotonic milliseconds.
    pub time_ms: u64,
}

impl DragEvent {
    const fn new(phase: GesturePhase, translation: f64, time_ms: u64) -> Self {
        Self {
            phase,
            translation,
            predicted: None,
            time_ms,
        }
    }

    /// A gesture start.
    #[must_use]
    pub const fn began(time_ms: u64) -> Self {
        Self::new(GesturePhase::Began, 0.0, time_ms)
    }

    /// A gesture move.
    #[must_use]
    pub const fn changed(translation: f64, time_ms: u64) -> Self {
        Self::new(GesturePhase::Changed, translation, time_ms)
    }

    /// A normal gesture end.
    #[must_use]
    pub const fn ended(translation: f64, time_ms: u64) -> Self {
        Self::new(GesturePhase::Ended, translation, time_ms)
    }

    /// A cancelled gesture.
    #[must_use]
    pub const fn cancelled(translation: f64, time_ms: u64) -> Self {
        Self::new(GesturePhase::Cancelled, translation, time_ms)
    }

    /// A failed gesture.
    #[must_use]
    pub const fn failed(translation: f64, time_ms: u64) -> Self {
        Self::new(GesturePhase::Failed, translation, time_ms)
    }

    /// Attaches a predicted final translation.
    #[must_use]
    pub const fn with_predicted(mut self, predicted: f64) -> Self {
        self.predicted = Some(predicted);
        self
    }

    /// Sheet delta for this sample: positive toward open.
    #[must_use]
    pub fn delta(&self) -> f64 {
        -self.translation
    }

    /// Delta to settle with: the prediction when present, else the sample.
    #[must_use]
    pub fn settle_delta(&self) -> f64 {
        -self.predicted.unwrap_or(self.translation)
    }
}

/// Turns raw pointer positions into [`DragEvent`]s.
#[derive(Copy, Clone, Debug, Default)]
pub struct PanTracker {
    start: Option<Point>,
    last: Option<Point>,
}

impl PanTracker {
    /// Starts tracking at `pos`. A gesture already in progress is replaced.
    pub fn begin(&mut self, pos: Point, time_ms: u64) -> DragEvent {
        self.start = Some(pos);
        self.last = Some(pos);
        DragEvent::began(time_ms)
    }

    /// Records a move; `None` when no gesture is in progress.
    pub fn moved(&mut self, pos: Point, time_ms: u64) -> Option<DragEvent> {
        let start = self.start?;
        self.last = Some(pos);
        Some(DragEvent::changed(pos.y - start.y, time_ms))
    }

    /// Ends the gesture at `pos`.
    pub fn end(&mut self, pos: Point, time_ms: u64) -> Option<DragEvent> {
        let start = self.start?;
        self.reset();
        Some(DragEvent::ended(pos.y - start.y, time_ms))
    }

    /// Ends the gesture at `pos` with a predicted resting position.
    pub fn end_predicted(&mut self, pos: Point, predicted: Point, time_ms: u64) -> Option<DragEvent> {
        let start = self.start?;
        self.end(pos, time_ms)
            .map(|event| event.with_predicted(predicted.y - start.y))
    }

    /// Cancels the gesture at its last known position.
    pub fn cancel(&mut self, time_ms: u64) -> Option<DragEvent> {
        let (start, last) = (self.start?, self.last?);
        self.reset();
        Some(DragEvent::cancelled(last.y - start.y, time_ms))
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    fn reset(&mut self) {
        self.start = None;
        self.last = None;
    }
}

/// A scrollable list nested inside the sheet.
///
/// The sheet and the list compete for the same vertical drag. While the sheet
/// owns a gesture it pins the list at its starting offset with scrolling
/// disabled; every terminal phase re-enables scrolling.
pub trait NestedScroll {
    /// Current vertical content offset. Negative while overscrolled past the
    /// top.
    fn content_offset(&self) -> f64;

    /// Moves the content to `offset`.
    fn set_content_offset(&mut self, offset: f64);

    /// Enables or disables the list's own scrolling.
    fn set_scroll_enabled(&mut self, enabled: bool);
}

impl<L: NestedScroll + ?Sized> NestedScroll for &mut L {
    fn content_offset(&self) -> f64 {
        (**self).content_offset()
    }

    fn set_content_offset(&mut self, offset: f64) {
        (**self).set_content_offset(offset);
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        (**self).set_scroll_enabled(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases() {
        assert!(!GesturePhase::Began.is_terminal());
        assert!(!GesturePhase::Changed.is_terminal());
        assert!(GesturePhase::Ended.is_terminal());
        assert!(GesturePhase::Cancelled.is_terminal());
        assert!(GesturePhase::Failed.is_terminal());
    }

    #[test]
    fn settle_delta_prefers_prediction() {
        let event = DragEvent::ended(-100.0, 5);
        assert_eq!(event.settle_delta(), 100.0);
        assert_eq!(event.with_predicted(-240.0).settle_delta(), 240.0);
        assert_eq!(event.with_predicted(-240.0).delta(), 100.0);
    }

    #[test]
    fn moves_without_begin_are_ignored() {
        let mut pan = PanTracker::default();
        assert_eq!(pan.moved(Point::new(0.0, 10.0), 0), None);
        assert_eq!(pan.end(Point::new(0.0, 10.0), 0), None);
        assert_eq!(pan.cancel(0), None);
    }

    #[test]
    fn translation_is_from_start() {
        let mut pan = PanTracker::default();
        pan.begin(Point::new(0.0, 300.0), 0);
        pan.moved(Point::new(0.0, 320.0), 8);
        let event = pan.moved(Point::new(0.0, 350.0), 16).unwrap();
        assert_eq!(event.translation, 50.0);
    }

    #[test]
    fn end_predicted_measures_from_start() {
        let mut pan = PanTracker::default();
        pan.begin(Point::new(0.0, 300.0), 0);
        let event = pan
            .end_predicted(Point::new(0.0, 250.0), Point::new(0.0, 100.0), 20)
            .unwrap();
        assert_eq!(event.translation, -50.0);
        assert_eq!(event.predicted, Some(-200.0));
    }

    #[test]
    fn cancel_uses_last_position() {
        let mut pan = PanTracker::default();
        pan.begin(Point::new(0.0, 300.0), 0);
        pan.moved(Point::new(0.0, 280.0), 8);
        let event = pan.cancel(12).unwrap();
        assert_eq!(event.phase, GesturePhase::Cancelled);
        assert_eq!(event.translation, -20.0);
        assert!(!pan.is_dragging());
    }

    #[test]
    fn begin_replaces_gesture_in_progress() {
        let mut pan = PanTracker::default();
        pan.begin(Point::new(0.0, 300.0), 0);
        pan.moved(Point::new(0.0, 200.0), 8);
        pan.begin(Point::new(0.0, 500.0), 20);
        let event = pan.moved(Point::new(0.0, 510.0), 28).unwrap();
        assert_eq!(event.translation, 10.0);
    }
}
