// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sheet configuration: settings, pluggable region decor, and the
//! transition policy.
//!
//! A [`SheetConfig`] is built once with [`SheetConfigBuilder`] and then shared
//! read-only by the sheet that uses it.
//!
//! ## Minimal example
//!
//! ```
//! use understory_sheet::{Curve, SheetConfig, SheetState};
//!
//! let config = SheetConfig::builder()
//!     .corner_radius(24.0)
//!     .supported_states([SheetState::Hidden, SheetState::Large])
//!     .threshold(0.4)
//!     .curve(Curve::EaseInOut)
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.supported().supports(SheetState::Medium));
//! assert_eq!(config.threshold(), 0.4);
//! ```
//!
//! ## Custom regions
//!
//! Region builders are grouped behind [`SheetDecor`]. [`FnDecor`] lets each
//! region be swapped for a closure independently:
//!
//! ```
//! use understory_sheet::{FnDecor, Region, SheetConfig, SheetDecor, SheetState};
//! use understory_sheet::SheetContext;
//!
//! let config = SheetConfig::builder()
//!     .decor(FnDecor::default())
//!     .background(|_cx| Region::Scrim { opacity: 0.25 })
//!     .build()
//!     .unwrap();
//!
//! let cx = SheetContext::at_rest(SheetState::Large, config.supported(), config.threshold());
//! assert_eq!(config.decor().background(&cx), Region::Scrim { opacity: 0.25 });
//! assert_eq!(config.decor().sheet_background(&cx), Region::Surface);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;

use crate::context::SheetContext;
use crate::policy::{ThresholdPolicy, TransitionPolicy};
use crate::state::{SheetState, SupportedStates};

/// Default corner radius of the sheet's top edge.
pub const DEFAULT_CORNER_RADIUS: f64 = 40.0;
/// Default fraction of travel a gesture must exceed to change state.
pub const DEFAULT_THRESHOLD: f64 = 0.3;
/// Default delay between a gesture ending and its commit, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 10;

/// Backdrop opacity while resting at `Medium`.
pub const MEDIUM_SCRIM_OPACITY: f64 = 0.4;
/// Backdrop opacity while resting at `Large`.
pub const LARGE_SCRIM_OPACITY: f64 = 0.9;

/// Errors from [`SheetConfigBuilder::build`].
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The supported state set was empty.
    #[error("a sheet must support at least one state")]
    EmptySupportedStates,
    /// The threshold was negative or not finite.
    #[error("state threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),
    /// The corner radius was negative or not finite.
    #[error("corner radius must be finite and non-negative, got {0}")]
    InvalidCornerRadius(f64),
}

/// Easing curve the host should animate state changes with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    /// Constant speed.
    Linear,
    /// Starts slow, ends fast.
    EaseIn,
    /// Starts fast, ends slow.
    #[default]
    EaseOut,
    /// Slow at both ends.
    EaseInOut,
}

impl Curve {
    /// Maps linear time `t` in `[0, 1]` to eased progress in `[0, 1]`.
    ///
    /// `t` outside the unit interval is clamped.
    #[must_use]
    pub fn sample(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = 1.0 - t;
                    1.0 - 2.0 * u * u
                }
            }
        }
    }

    /// Interpolates between `from` and `to` at eased time `t`.
    #[must_use]
    pub fn interpolate(self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.sample(t)
    }
}

/// Plain-data sheet settings.
///
/// These are the parts of a [`SheetConfig`] that can live in a settings file.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetSettings {
    /// Corner radius of the sheet's top edge.
    pub corner_radius: f64,
    /// States the sheet may rest at.
    pub supported: SupportedStates,
    /// Fraction of travel a gesture must exceed to change state.
    pub threshold: f64,
    /// Curve for animated state changes.
    pub curve: Curve,
    /// Delay between a gesture ending and its commit, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            corner_radius: DEFAULT_CORNER_RADIUS,
            supported: SupportedStates::all(),
            threshold: DEFAULT_THRESHOLD,
            curve: Curve::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl SheetSettings {
    /// Checks the invariants a usable configuration relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.supported.is_empty() {
            return Err(ConfigError::EmptySupportedStates);
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ConfigError::InvalidCornerRadius(self.corner_radius));
        }
        Ok(())
    }
}

/// Headless description of a region the host renders.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Region {
    /// Nothing is drawn.
    Empty,
    /// The platform's default sheet surface.
    Surface,
    /// A dimming layer with the given opacity.
    Scrim {
        /// Opacity in `[0, 1]`.
        opacity: f64,
    },
}

/// The pluggable regions around a sheet.
///
/// - `outside`: fills the space above the sheet; its height is the sheet's
///   top offset.
/// - `sheet_background`: drawn behind the sheet content; receives the drag
///   gesture.
/// - `background`: covers the whole container behind the sheet.
pub trait SheetDecor {
    /// What the host renders for a region.
    type View;

    /// Region above the sheet.
    fn outside(&self, cx: &SheetContext) -> Self::View;

    /// Region behind the sheet content.
    fn sheet_background(&self, cx: &SheetContext) -> Self::View;

    /// Region behind everything, across the whole container.
    fn background(&self, cx: &SheetContext) -> Self::View;
}

/// Opacity of the default backdrop for `cx`.
///
/// Tracks progress so the backdrop fades continuously while dragging.
#[must_use]
pub fn backdrop_opacity(cx: &SheetContext) -> f64 {
    let span = LARGE_SCRIM_OPACITY - MEDIUM_SCRIM_OPACITY;
    match cx.state {
        SheetState::Hidden => 0.0,
        SheetState::Medium if cx.progress >= 0.0 => MEDIUM_SCRIM_OPACITY + span * cx.progress,
        SheetState::Medium => span * (1.0 + cx.progress),
        SheetState::Large => LARGE_SCRIM_OPACITY + span * cx.progress,
    }
}

/// Default decor: no outside region, a plain surface, and a scrim that
/// darkens as the sheet opens.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultDecor;

impl SheetDecor for DefaultDecor {
    type View = Region;

    fn outside(&self, _cx: &SheetContext) -> Region {
        Region::Empty
    }

    fn sheet_background(&self, _cx: &SheetContext) -> Region {
        Region::Surface
    }

    fn background(&self, cx: &SheetContext) -> Region {
        Region::Scrim {
            opacity: backdrop_opacity(cx),
        }
    }
}

type RegionFn<V> = Box<dyn Fn(&SheetContext) -> V>;

/// Decor whose regions are individual closures.
pub struct FnDecor<V> {
    outside: RegionFn<V>,
    sheet_background: RegionFn<V>,
    background: RegionFn<V>,
}

impl<V> fmt::Debug for FnDecor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDecor").finish_non_exhaustive()
    }
}

impl<V: 'static> FnDecor<V> {
    /// Starts from the regions of an existing decor.
    pub fn from_decor<D>(decor: D) -> Self
    where
        D: SheetDecor<View = V> + 'static,
    {
        let decor = Rc::new(decor);
        let (a, b, c) = (decor.clone(), decor.clone(), decor);
        Self {
            outside: Box::new(move |cx| a.outside(cx)),
            sheet_background: Box::new(move |cx| b.sheet_background(cx)),
            background: Box::new(move |cx| c.background(cx)),
        }
    }

    /// Replaces the outside region.
    #[must_use]
    pub fn with_outside(mut self, f: impl Fn(&SheetContext) -> V + 'static) -> Self {
        self.outside = Box::new(f);
        self
    }

    /// Replaces the sheet background region.
    #[must_use]
    pub fn with_sheet_background(mut self, f: impl Fn(&SheetContext) -> V + 'static) -> Self {
        self.sheet_background = Box::new(f);
        self
    }

    /// Replaces the full background region.
    #[must_use]
    pub fn with_background(mut self, f: impl Fn(&SheetContext) -> V + 'static) -> Self {
        self.background = Box::new(f);
        self
    }
}

impl Default for FnDecor<Region> {
    fn default() -> Self {
        Self::from_decor(DefaultDecor)
    }
}

impl<V> SheetDecor for FnDecor<V> {
    type View = V;

    fn outside(&self, cx: &SheetContext) -> V {
        (self.outside)(cx)
    }

    fn sheet_background(&self, cx: &SheetContext) -> V {
        (self.sheet_background)(cx)
    }

    fn background(&self, cx: &SheetContext) -> V {
        (self.background)(cx)
    }
}

/// Immutable sheet configuration.
pub struct SheetConfig<D = DefaultDecor> {
    settings: SheetSettings,
    decor: D,
    policy: Box<dyn TransitionPolicy>,
}

impl<D: fmt::Debug> fmt::Debug for SheetConfig<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetConfig")
            .field("settings", &self.settings)
            .field("decor", &self.decor)
            .finish_non_exhaustive()
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            settings: SheetSettings::default(),
            decor: DefaultDecor,
            policy: Box::new(ThresholdPolicy),
        }
    }
}

impl SheetConfig {
    /// Starts a builder with every option at its default.
    #[must_use]
    pub fn builder() -> SheetConfigBuilder {
        SheetConfigBuilder::new()
    }
}

impl<D> SheetConfig<D> {
    /// The plain-data settings.
    #[must_use]
    pub fn settings(&self) -> &SheetSettings {
        &self.settings
    }

    /// Corner radius of the sheet's top edge.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.settings.corner_radius
    }

    /// States the sheet may rest at. Never empty.
    #[must_use]
    pub fn supported(&self) -> SupportedStates {
        self.settings.supported
    }

    /// Fraction of travel a gesture must exceed to change state.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.settings.threshold
    }

    /// Curve for animated state changes.
    #[must_use]
    pub fn curve(&self) -> Curve {
        self.settings.curve
    }

    /// Delay between a gesture ending and its commit, in milliseconds.
    #[must_use]
    pub fn debounce_ms(&self) -> u64 {
        self.settings.debounce_ms
    }

    /// The region builders.
    #[must_use]
    pub fn decor(&self) -> &D {
        &self.decor
    }

    /// The transition policy.
    #[must_use]
    pub fn policy(&self) -> &dyn TransitionPolicy {
        &*self.policy
    }
}

/// Fluent builder for [`SheetConfig`].
pub struct SheetConfigBuilder<D = DefaultDecor> {
    settings: SheetSettings,
    decor: D,
    policy: Option<Box<dyn TransitionPolicy>>,
}

impl<D: fmt::Debug> fmt::Debug for SheetConfigBuilder<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetConfigBuilder")
            .field("settings", &self.settings)
            .field("decor", &self.decor)
            .field("custom_policy", &self.policy.is_some())
            .finish()
    }
}

impl Default for SheetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetConfigBuilder {
    /// Creates a builder with every option at its default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: SheetSettings::default(),
            decor: DefaultDecor,
            policy: None,
        }
    }
}

impl<D> SheetConfigBuilder<D> {
    /// Replaces all plain-data settings at once.
    #[must_use]
    pub fn settings(mut self, settings: SheetSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the corner radius.
    #[must_use]
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.settings.corner_radius = radius;
        self
    }

    /// Sets the supported states from a list.
    #[must_use]
    pub fn supported_states(mut self, states: impl IntoIterator<Item = SheetState>) -> Self {
        self.settings.supported = states.into_iter().collect();
        self
    }

    /// Sets the supported states from a set.
    #[must_use]
    pub fn supported(mut self, supported: SupportedStates) -> Self {
        self.settings.supported = supported;
        self
    }

    /// Sets the transition threshold.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.settings.threshold = threshold;
        self
    }

    /// Sets the animation curve.
    #[must_use]
    pub fn curve(mut self, curve: Curve) -> Self {
        self.settings.curve = curve;
        self
    }

    /// Sets the commit debounce delay in milliseconds.
    #[must_use]
    pub fn debounce_ms(mut self, delay: u64) -> Self {
        self.settings.debounce_ms = delay;
        self
    }

    /// Replaces the transition policy.
    ///
    /// Closures of the form `Fn(&SheetContext) -> SheetState` are policies.
    #[must_use]
    pub fn next_state(mut self, policy: impl TransitionPolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Replaces the region decor.
    #[must_use]
    pub fn decor<E>(self, decor: E) -> SheetConfigBuilder<E> {
        SheetConfigBuilder {
            settings: self.settings,
            decor,
            policy: self.policy,
        }
    }

    /// Validates the settings and builds the configuration.
    pub fn build(self) -> Result<SheetConfig<D>, ConfigError> {
        self.settings.validate()?;
        Ok(SheetConfig {
            settings: self.settings,
            decor: self.decor,
            policy: self.policy.unwrap_or_else(|| Box::new(ThresholdPolicy)),
        })
    }
}

impl<V: 'static> SheetConfigBuilder<FnDecor<V>> {
    /// Replaces the outside region builder.
    #[must_use]
    pub fn outside(mut self, f: impl Fn(&SheetContext) -> V + 'static) -> Self {
        self.decor = self.decor.with_outside(f);
        self
    }

    /// Replaces the sheet background builder.
    #[must_use]
    pub fn sheet_background(mut self, f: impl Fn(&SheetContext) -> V + 'static) -> Self {
        self.decor = self.decor.with_sheet_background(f);
        self
    }

    /// Replaces the full background builder.
    #[must_use]
    pub fn background(mut self, f: impl Fn(&SheetContext) -> V + 'static) -> Self {
        self.decor = self.decor.with_background(f);
        self
    }
}
