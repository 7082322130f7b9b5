#![forbid(unsafe_code)]

//! Timing vs. spring curves.
//!
//! A caller picks exactly one parameterisation; everything downstream
//! (half-durations for the separator swap, the renderer's tween) is derived
//! from it by exhaustive match.
//!
//! # Invariants
//!
//! 1. [`AnimationConfig::duration`] is finite and non-zero for every preset.
//! 2. [`estimate_spring_duration`] never exceeds [`MAX_SPRING_DURATION`].

use std::time::Duration;

use super::Easing;

/// Default timing duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Upper bound on a spring settle estimate (undamped or degenerate springs).
pub const MAX_SPRING_DURATION: Duration = Duration::from_secs(5);

/// Settled once the envelope has decayed to 0.1% of the initial offset.
const SETTLE_EPSILON: f32 = 1e-3;

/// Duration + easing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingOptions {
    #[cfg_attr(feature = "serde", serde(rename = "duration_ms", with = "millis"))]
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
        }
    }
}

/// Damped harmonic oscillator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringOptions {
    pub damping: f32,
    pub mass: f32,
    pub stiffness: f32,
    /// Stop at the target instead of overshooting it.
    pub overshoot_clamp: bool,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            damping: 10.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamp: false,
        }
    }
}

/// The curve every glyph transition of a display follows.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum AnimationConfig {
    Timing(TimingOptions),
    Spring(SpringOptions),
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::Timing(TimingOptions::default())
    }
}

impl AnimationConfig {
    /// Timing curve with the default easing.
    #[must_use]
    pub fn timing(duration: Duration) -> Self {
        Self::Timing(TimingOptions {
            duration,
            ..TimingOptions::default()
        })
    }

    /// Spring with the default mass and no overshoot clamp.
    #[must_use]
    pub fn spring(damping: f32, stiffness: f32) -> Self {
        Self::Spring(SpringOptions {
            damping,
            stiffness,
            ..SpringOptions::default()
        })
    }

    /// Quick 150ms timing.
    #[must_use]
    pub fn fast() -> Self {
        Self::timing(Duration::from_millis(150))
    }

    /// Well-damped spring.
    #[must_use]
    pub fn smooth() -> Self {
        Self::spring(15.0, 100.0)
    }

    /// Lightly damped, stiffer spring.
    #[must_use]
    pub fn bouncy() -> Self {
        Self::spring(10.0, 150.0)
    }

    /// Leisurely 500ms timing.
    #[must_use]
    pub fn slow() -> Self {
        Self::timing(Duration::from_millis(500))
    }

    /// Total time the curve takes (spring: settle estimate).
    #[must_use]
    pub fn duration(&self) -> Duration {
        match self {
            Self::Timing(t) => t.duration,
            Self::Spring(s) => estimate_spring_duration(s.mass, s.stiffness, s.damping),
        }
    }

    /// Length of each leg of a two-leg motion (the separator swap).
    #[must_use]
    pub fn half_duration(&self) -> Duration {
        self.duration() / 2
    }

    #[must_use]
    pub fn is_spring(&self) -> bool {
        matches!(self, Self::Spring(_))
    }
}

/// Estimate how long a spring takes to settle.
///
/// Uses the decay rate of the oscillator's envelope: `ζω` when underdamped,
/// the slow root `ω(ζ − √(ζ² − 1))` otherwise. Non-positive parameters fall
/// back to the [`SpringOptions`] defaults.
#[must_use]
pub fn estimate_spring_duration(mass: f32, stiffness: f32, damping: f32) -> Duration {
    let defaults = SpringOptions::default();
    let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
    let mass = positive(mass, defaults.mass);
    let stiffness = positive(stiffness, defaults.stiffness);
    let damping = if damping.is_finite() { damping.max(0.0) } else { defaults.damping };

    let omega = (stiffness / mass).sqrt();
    let zeta = damping / (2.0 * (stiffness * mass).sqrt());
    let decay = if zeta < 1.0 {
        zeta * omega
    } else {
        omega * (zeta - (zeta * zeta - 1.0).sqrt())
    };

    if decay <= f32::EPSILON {
        return MAX_SPRING_DURATION;
    }
    let secs = (1.0 / SETTLE_EPSILON).ln() / decay;
    Duration::from_secs_f32(secs).min(MAX_SPRING_DURATION)
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_300ms_timing() {
        let config = AnimationConfig::default();
        assert_eq!(config.duration(), Duration::from_millis(300));
        assert_eq!(config.half_duration(), Duration::from_millis(150));
        assert!(!config.is_spring());
    }

    #[test]
    fn presets() {
        assert_eq!(AnimationConfig::fast().duration(), Duration::from_millis(150));
        assert_eq!(AnimationConfig::slow().duration(), Duration::from_millis(500));
        assert!(AnimationConfig::smooth().is_spring());
        assert!(AnimationConfig::bouncy().is_spring());
    }

    #[test]
    fn default_spring_settles_in_about_1_4s() {
        let d = estimate_spring_duration(1.0, 100.0, 10.0);
        assert!(d > Duration::from_millis(1300), "{d:?}");
        assert!(d < Duration::from_millis(1500), "{d:?}");
    }

    #[test]
    fn more_damping_settles_faster_when_underdamped() {
        let light = estimate_spring_duration(1.0, 100.0, 5.0);
        let heavy = estimate_spring_duration(1.0, 100.0, 15.0);
        assert!(heavy < light);
    }

    #[test]
    fn overdamped_stiffer_settles_faster() {
        let soft = estimate_spring_duration(1.0, 50.0, 40.0);
        let stiff = estimate_spring_duration(1.0, 200.0, 40.0);
        assert!(stiff < soft);
    }

    #[test]
    fn undamped_spring_is_capped() {
        assert_eq!(estimate_spring_duration(1.0, 100.0, 0.0), MAX_SPRING_DURATION);
    }

    #[test]
    fn degenerate_parameters_fall_back() {
        let d = estimate_spring_duration(0.0, -1.0, f32::NAN);
        assert_eq!(d, estimate_spring_duration(1.0, 100.0, 10.0));
    }

    #[test]
    fn spring_half_duration() {
        let config = AnimationConfig::smooth();
        assert_eq!(config.half_duration(), config.duration() / 2);
        assert!(config.half_duration() > Duration::ZERO);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_tagged_form() {
        let config: AnimationConfig =
            serde_json::from_str(r#"{"type":"timing","duration_ms":120}"#).unwrap();
        assert_eq!(config, AnimationConfig::timing(Duration::from_millis(120)));

        let spring: AnimationConfig =
            serde_json::from_str(r#"{"type":"spring","damping":15.0}"#).unwrap();
        assert_eq!(spring, AnimationConfig::spring(15.0, 100.0));

        let json = serde_json::to_string(&AnimationConfig::fast()).unwrap();
        assert!(json.contains(r#""type":"timing""#), "{json}");
        assert!(json.contains(r#""duration_ms":150"#), "{json}");
    }
}
