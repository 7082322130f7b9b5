#![forbid(unsafe_code)]

//! Animation parameters handed to the glyph host.
//!
//! Nothing here runs an animation. The host owns the clock and the tweening;
//! this module derives the parameters it needs from the caller's choice of
//! curve:
//!
//! - [`AnimationConfig`]: timing or spring curve, plus named presets.
//! - [`GlyphTransitions`]: enter / exit / reposition / separator-swap
//!   transitions built from one curve.
//! - [`Easing`]: the easing functions a timing curve can use.

pub mod curve;
pub mod transition;

pub use curve::{AnimationConfig, SpringOptions, TimingOptions, estimate_spring_duration};
pub use transition::{
    Effect, GlyphTransitions, RESIZE_DURATION, SWAP_LIFT, SeparatorAnimation, Transition,
};

/// Easing applied to a timing curve's progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` (clamped to 0.0–1.0) through the curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}
