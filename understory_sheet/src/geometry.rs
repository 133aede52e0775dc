// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measured sizes of a sheet and the resting anchors derived from them.
//!
//! All sizes are in the host's layout unit. A zero container size means the
//! host has not laid the sheet out yet; anchors still compute, but the
//! offset/progress engine treats the geometry as not ready.

use kurbo::Size;

use crate::state::SheetState;

/// Measured sizes for one sheet instance.
///
/// The sizes are only changed through the measurement setters, which filter
/// out transient layout values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SheetGeometry {
    main_size: Size,
    medium_size: Size,
    full_size: Size,
}

impl SheetGeometry {
    /// Creates geometry with every size zero (not laid out).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            main_size: Size::ZERO,
            medium_size: Size::ZERO,
            full_size: Size::ZERO,
        }
    }

    /// Creates geometry from sizes measured elsewhere.
    ///
    /// A zero `full_size` leaves the geometry not ready.
    #[must_use]
    pub const fn from_sizes(main_size: Size, medium_size: Size, full_size: Size) -> Self {
        Self {
            main_size,
            medium_size,
            full_size,
        }
    }

    /// Natural size of the sheet's primary content.
    #[must_use]
    pub fn main_size(&self) -> Size {
        self.main_size
    }

    /// Size of the content while pinned at [`SheetState::Medium`].
    #[must_use]
    pub fn medium_size(&self) -> Size {
        self.medium_size
    }

    /// Size of the enclosing container.
    #[must_use]
    pub fn full_size(&self) -> Size {
        self.full_size
    }

    /// Returns `true` once the container size is known.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.full_size.height > 0.0
    }

    /// Updates the container size.
    ///
    /// A measurement with a zero dimension is a transient layout value and is
    /// ignored, as is an unchanged size. Returns `true` if the size changed.
    pub fn set_full_size(&mut self, size: Size) -> bool {
        if size.width == 0.0 || size.height == 0.0 || size == self.full_size {
            return false;
        }
        self.full_size = size;
        true
    }

    /// Resting offset from the top of the container for `state`.
    ///
    /// An unmeasured medium size makes `Medium` rest where `Hidden` does.
    #[must_use]
    pub fn anchor(&self, state: SheetState) -> f64 {
        let full = self.full_size.height;
        match state {
            SheetState::Hidden => full,
            SheetState::Medium if self.medium_size.height == 0.0 => full,
            SheetState::Medium => full - self.medium_size.height,
            SheetState::Large => 0.0,
        }
    }

    /// Height the primary content should be laid out at while dragged.
    ///
    /// Returns `None` at rest, meaning the content keeps its natural height.
    #[must_use]
    pub fn content_height(&self, state: SheetState, offset: f64) -> Option<f64> {
        if offset == 0.0 {
            return None;
        }
        let medium = self.medium_size.height;
        Some(match state {
            SheetState::Medium => (medium + offset).max(medium),
            SheetState::Large => (self.full_size.height + offset).max(medium),
            SheetState::Hidden => self.main_size.height,
        })
    }

    /// Records a measured content size.
    ///
    /// Measurements are only taken at rest (`offset == 0`); during a drag the
    /// content is stretched and its size is not its natural size. The medium
    /// size is only recorded while at `Medium`, and a measurement spanning
    /// the whole container is a layout artefact rather than a medium size.
    /// Returns `true` if anything changed.
    pub fn record_content(&mut self, state: SheetState, offset: f64, size: Size) -> bool {
        if size.height == 0.0 || offset != 0.0 {
            return false;
        }
        let mut changed = false;
        if self.main_size != size {
            self.main_size = size;
            changed = true;
        }
        if state == SheetState::Medium
            && self.medium_size != size
            && self.full_size.height != size.height
        {
            self.medium_size = size;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out() -> SheetGeometry {
        SheetGeometry::from_sizes(
            Size::new(390.0, 300.0),
            Size::new(390.0, 300.0),
            Size::new(390.0, 800.0),
        )
    }

    #[test]
    fn fresh_geometry_is_not_ready() {
        let geometry = SheetGeometry::new();
        assert!(!geometry.is_ready());
        assert_eq!(geometry, SheetGeometry::default());
    }

    #[test]
    fn set_full_size_ignores_zero_dimensions() {
        let mut geometry = laid_out();
        assert!(!geometry.set_full_size(Size::new(0.0, 800.0)));
        assert!(!geometry.set_full_size(Size::new(390.0, 0.0)));
        assert!(!geometry.set_full_size(Size::ZERO));
        assert_eq!(geometry.full_size(), Size::new(390.0, 800.0));
        assert!(geometry.is_ready());
    }

    #[test]
    fn set_full_size_reports_changes_only() {
        let mut geometry = laid_out();
        assert!(!geometry.set_full_size(Size::new(390.0, 800.0)));
        assert!(geometry.set_full_size(Size::new(844.0, 390.0)));
        assert_eq!(geometry.full_size(), Size::new(844.0, 390.0));
    }

    #[test]
    fn anchors_per_state() {
        let geometry = laid_out();
        assert_eq!(geometry.anchor(SheetState::Hidden), 800.0);
        assert_eq!(geometry.anchor(SheetState::Medium), 500.0);
        assert_eq!(geometry.anchor(SheetState::Large), 0.0);
    }

    #[test]
    fn unmeasured_medium_rests_like_hidden() {
        let geometry = SheetGeometry::from_sizes(
            Size::new(390.0, 300.0),
            Size::ZERO,
            Size::new(390.0, 800.0),
        );
        assert_eq!(geometry.anchor(SheetState::Medium), 800.0);
    }

    #[test]
    fn content_height_at_rest_is_natural() {
        let geometry = laid_out();
        for state in SheetState::ALL {
            assert_eq!(geometry.content_height(state, 0.0), None);
        }
    }

    #[test]
    fn content_height_stretches_while_dragging() {
        let geometry = laid_out();
        assert_eq!(geometry.content_height(SheetState::Medium, 120.0), Some(420.0));
        // Dragging down from Medium never shrinks below the medium height.
        assert_eq!(geometry.content_height(SheetState::Medium, -50.0), Some(300.0));
        assert_eq!(geometry.content_height(SheetState::Large, -100.0), Some(700.0));
        assert_eq!(geometry.content_height(SheetState::Large, -700.0), Some(300.0));
        assert_eq!(geometry.content_height(SheetState::Hidden, 20.0), Some(300.0));
    }

    #[test]
    fn record_content_skips_zero_height_and_drags() {
        let mut geometry = laid_out();
        assert!(!geometry.record_content(SheetState::Medium, 0.0, Size::new(390.0, 0.0)));
        assert!(!geometry.record_content(SheetState::Medium, 15.0, Size::new(390.0, 350.0)));
        assert_eq!(geometry.main_size().height, 300.0);
    }

    #[test]
    fn record_content_updates_medium_only_at_medium() {
        let mut geometry = SheetGeometry::new();
        geometry.set_full_size(Size::new(390.0, 800.0));
        assert!(geometry.record_content(SheetState::Large, 0.0, Size::new(390.0, 250.0)));
        assert_eq!(geometry.main_size().height, 250.0);
        assert_eq!(geometry.medium_size(), Size::ZERO);

        assert!(geometry.record_content(SheetState::Medium, 0.0, Size::new(390.0, 260.0)));
        assert_eq!(geometry.medium_size().height, 260.0);
    }

    #[test]
    fn record_content_rejects_full_height_medium() {
        let mut geometry = SheetGeometry::new();
        geometry.set_full_size(Size::new(390.0, 800.0));
        geometry.record_content(SheetState::Medium, 0.0, Size::new(390.0, 800.0));
        assert_eq!(geometry.main_size().height, 800.0);
        assert_eq!(geometry.medium_size(), Size::ZERO);
    }
}
