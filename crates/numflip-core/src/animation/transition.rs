#![forbid(unsafe_code)]

//! Per-glyph transitions derived from one [`AnimationConfig`].
//!
//! Every glyph of a display gets the same enter (fade in, dropping down),
//! exit (fade out, dropping down), and reposition transitions. Separators can
//! instead use a two-leg "swap": lift by [`SWAP_LIFT`] during the first half
//! of the curve, then settle back while sliding to the new slot.
//!
//! Width and font-size changes between passes tween over [`RESIZE_DURATION`]
//! regardless of the curve.

use std::time::Duration;

use super::AnimationConfig;
use crate::classify::CharKind;

/// Vertical lift of a swapping separator, in layout units.
pub const SWAP_LIFT: f32 = 15.0;

/// Tween time for size changes of an existing glyph.
pub const RESIZE_DURATION: Duration = Duration::from_millis(200);

/// How a separator moves when its slot changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SeparatorAnimation {
    /// Slide to the new slot like any digit.
    #[default]
    Translate,
    /// Lift, slide, and settle back.
    Swap,
}

/// What a transition does visually.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    FadeInDown,
    FadeOutDown,
    /// Straight move to the new position.
    Linear,
    /// Two-leg lift-and-settle move.
    Swap { lift: f32, half_duration: Duration },
}

/// An effect played along a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub effect: Effect,
    pub curve: AnimationConfig,
}

impl Transition {
    /// Vertical offset of the glyph `elapsed` into the transition.
    ///
    /// Only a swap moves vertically; other effects return 0.0. The first leg
    /// uses the curve's easing (timing curves) or a linear ramp (springs).
    #[must_use]
    pub fn vertical_offset(&self, elapsed: Duration) -> f32 {
        let Effect::Swap {
            lift,
            half_duration,
        } = self.effect
        else {
            return 0.0;
        };
        if half_duration.is_zero() {
            return 0.0;
        }

        let ease = |t: f32| match self.curve {
            AnimationConfig::Timing(timing) => timing.easing.apply(t),
            AnimationConfig::Spring(_) => t.clamp(0.0, 1.0),
        };
        let half = half_duration.as_secs_f32();
        let t = elapsed.as_secs_f32();
        if t <= half {
            lift * ease(t / half)
        } else {
            lift * (1.0 - ease((t - half) / half))
        }
    }
}

/// The full set of transitions a display hands to its glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphTransitions {
    pub enter: Transition,
    pub exit: Transition,
    pub layout: Transition,
    pub swap: Transition,
    pub resize: Duration,
}

impl GlyphTransitions {
    #[must_use]
    pub fn new(curve: AnimationConfig) -> Self {
        let with = |effect| Transition { effect, curve };
        Self {
            enter: with(Effect::FadeInDown),
            exit: with(Effect::FadeOutDown),
            layout: with(Effect::Linear),
            swap: with(Effect::Swap {
                lift: SWAP_LIFT,
                half_duration: curve.half_duration(),
            }),
            resize: RESIZE_DURATION,
        }
    }

    /// Reposition transition for a glyph of `kind`.
    #[must_use]
    pub fn layout_for(&self, kind: CharKind, separators: SeparatorAnimation) -> &Transition {
        match (kind.is_separator(), separators) {
            (true, SeparatorAnimation::Swap) => &self.swap,
            _ => &self.layout,
        }
    }
}

impl Default for GlyphTransitions {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}
