// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete sheet states and the set of states a sheet may occupy.

/// A resting state of the sheet.
///
/// Variants are declared from most closed to most open, so the derived
/// ordering reads `Hidden < Medium < Large`. Transitions between them are not
/// required to be monotonic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SheetState {
    /// Sheet sits entirely below the visible area.
    #[default]
    Hidden,
    /// Sheet is pinned at the measured medium content height.
    Medium,
    /// Sheet covers the full container.
    Large,
}

impl SheetState {
    /// All states, in declaration order.
    pub const ALL: [Self; 3] = [Self::Hidden, Self::Medium, Self::Large];

    /// Position of the state in declaration order.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Hidden => 0,
            Self::Medium => 1,
            Self::Large => 2,
        }
    }

    const fn flag(self) -> SupportedStates {
        match self {
            Self::Hidden => SupportedStates::HIDDEN,
            Self::Medium => SupportedStates::MEDIUM,
            Self::Large => SupportedStates::LARGE,
        }
    }
}

bitflags::bitflags! {
    /// Set of states a sheet is allowed to rest at.
    ///
    /// A usable configuration always carries at least one state; see
    /// [`SheetConfigBuilder::build`](crate::SheetConfigBuilder::build).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SupportedStates: u8 {
        /// [`SheetState::Hidden`] is allowed.
        const HIDDEN = 0b0000_0001;
        /// [`SheetState::Medium`] is allowed.
        const MEDIUM = 0b0000_0010;
        /// [`SheetState::Large`] is allowed.
        const LARGE  = 0b0000_0100;
    }
}

impl Default for SupportedStates {
    fn default() -> Self {
        Self::all()
    }
}

impl SupportedStates {
    /// Returns `true` if `state` is in the set.
    #[must_use]
    pub const fn supports(self, state: SheetState) -> bool {
        self.contains(state.flag())
    }

    /// Iterates the contained states from most closed to most open.
    pub fn states(self) -> impl Iterator<Item = SheetState> {
        SheetState::ALL.into_iter().filter(move |s| self.supports(*s))
    }

    /// Returns the supported state closest to `state` by rank.
    ///
    /// Returns `state` itself when it is supported. On a tie the more closed
    /// candidate wins. An empty set has no answer and returns `state`
    /// unchanged.
    #[must_use]
    pub fn nearest(self, state: SheetState) -> SheetState {
        if self.supports(state) {
            return state;
        }
        // `states()` yields in ascending rank, so `min_by_key` keeps the
        // more closed candidate on ties.
        self.states()
            .min_by_key(|s| s.rank().abs_diff(state.rank()))
            .unwrap_or(state)
    }
}

impl From<SheetState> for SupportedStates {
    fn from(state: SheetState) -> Self {
        state.flag()
    }
}

impl FromIterator<SheetState> for SupportedStates {
    fn from_iter<I: IntoIterator<Item = SheetState>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, state| acc | state.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn states_are_ordered_closed_to_open() {
        assert!(SheetState::Hidden < SheetState::Medium);
        assert!(SheetState::Medium < SheetState::Large);
        assert_eq!(SheetState::default(), SheetState::Hidden);
    }

    #[test]
    fn default_set_supports_everything() {
        let all = SupportedStates::default();
        for state in SheetState::ALL {
            assert!(all.supports(state));
        }
    }

    #[test]
    fn collect_from_states() {
        let set: SupportedStates = [SheetState::Large, SheetState::Hidden].into_iter().collect();
        assert_eq!(set, SupportedStates::HIDDEN | SupportedStates::LARGE);
        let listed: Vec<_> = set.states().collect();
        assert_eq!(listed, [SheetState::Hidden, SheetState::Large]);
    }

    #[test]
    fn nearest_keeps_supported_state() {
        let set = SupportedStates::MEDIUM | SupportedStates::LARGE;
        assert_eq!(set.nearest(SheetState::Large), SheetState::Large);
    }

    #[test]
    fn nearest_picks_closest_rank() {
        let set = SupportedStates::MEDIUM | SupportedStates::LARGE;
        assert_eq!(set.nearest(SheetState::Hidden), SheetState::Medium);

        let only_hidden = SupportedStates::HIDDEN;
        assert_eq!(only_hidden.nearest(SheetState::Large), SheetState::Hidden);
    }

    #[test]
    fn nearest_tie_prefers_more_closed() {
        let set = SupportedStates::HIDDEN | SupportedStates::LARGE;
        assert_eq!(set.nearest(SheetState::Medium), SheetState::Hidden);
    }

    #[test]
    fn nearest_on_empty_set_is_identity() {
        assert_eq!(
            SupportedStates::empty().nearest(SheetState::Medium),
            SheetState::Medium
        );
    }
}
