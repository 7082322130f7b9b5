#![forbid(unsafe_code)]

//! Auto-fit sizing: shrink the font so a variable-length value fits.
//!
//! Every glyph contributes width units (digits and affix characters 1.0,
//! separators [`SEPARATOR_UNITS`]). At the maximum font size the value is
//! `max_font_size * ratio * units` wide; when that overflows the container,
//! the font scales down proportionally.
//!
//! # Invariants
//!
//! 1. `0.0 <= font_size <= max_font_size`.
//! 2. For a fixed container, more units never produce a larger font.
//! 3. An unknown container (zero, negative, or non-finite width) means "no
//!    constraint yet": the maximum font size is used.
//! 4. `char_width == font_size * ratio`.
//!
//! # Failure Modes
//!
//! - A non-positive or non-finite ratio is replaced by
//!   [`FALLBACK_CHAR_WIDTH_RATIO`].

use numflip_core::classify::{CharKind, CharToken};

/// Width of a separator relative to a digit.
pub const SEPARATOR_UNITS: f32 = 0.4;

/// Average glyph width / font size, used until a measurement resolves.
pub const FALLBACK_CHAR_WIDTH_RATIO: f32 = 0.65;

/// Default upper bound for the font size.
pub const DEFAULT_MAX_FONT_SIZE: f32 = 64.0;

/// Font size and digit slot width for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    pub font_size: f32,
    /// Width of a digit slot; separators get [`SEPARATOR_UNITS`] of it.
    pub char_width: f32,
}

impl Sizing {
    /// Slot width for a glyph of `kind`.
    #[inline]
    #[must_use]
    pub fn glyph_width(&self, kind: CharKind) -> f32 {
        if kind.is_separator() {
            self.char_width * SEPARATOR_UNITS
        } else {
            self.char_width
        }
    }
}

/// Width units of a token run plus its affixes.
#[must_use]
pub fn total_units(tokens: &[CharToken], prefix_len: usize, suffix_len: usize) -> f32 {
    let body: f32 = tokens
        .iter()
        .map(|t| if t.is_separator() { SEPARATOR_UNITS } else { 1.0 })
        .sum();
    body + prefix_len as f32 + suffix_len as f32
}

/// Fit `tokens` (plus affixes) into `container_width`.
///
/// ```
/// use numflip_core::classify::classify;
/// use numflip_layout::sizing::compute_sizing;
///
/// // 5 digits at ratio 0.65 need 208px at size 64; 200px forces ~61.5.
/// let tokens = classify("12345", '.', ',');
/// let sizing = compute_sizing(&tokens, 0, 0, 200.0, 0.65, 64.0);
/// assert!((sizing.font_size - 61.538).abs() < 0.01);
/// ```
#[must_use]
pub fn compute_sizing(
    tokens: &[CharToken],
    prefix_len: usize,
    suffix_len: usize,
    container_width: f32,
    char_width_ratio: f32,
    max_font_size: f32,
) -> Sizing {
    fit_units(
        total_units(tokens, prefix_len, suffix_len),
        container_width,
        char_width_ratio,
        max_font_size,
    )
}

/// [`compute_sizing`] for a precomputed unit count.
#[must_use]
pub fn fit_units(
    units: f32,
    container_width: f32,
    char_width_ratio: f32,
    max_font_size: f32,
) -> Sizing {
    let ratio = if char_width_ratio.is_finite() && char_width_ratio > 0.0 {
        char_width_ratio
    } else {
        FALLBACK_CHAR_WIDTH_RATIO
    };
    let max = if max_font_size.is_finite() {
        max_font_size.max(0.0)
    } else {
        0.0
    };
    let units = if units.is_finite() { units.max(0.0) } else { 0.0 };

    let natural_char_width = max * ratio;
    let natural_width = natural_char_width * units;
    let constrained = container_width.is_finite() && container_width > 0.0;

    if !constrained || natural_width <= container_width {
        return Sizing {
            font_size: max,
            char_width: natural_char_width,
        };
    }

    let font_size = (container_width / units / ratio).min(max);
    let scale = if max > 0.0 { font_size / max } else { 0.0 };
    Sizing {
        font_size,
        char_width: natural_char_width * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numflip_core::classify::classify;

    fn tokens(s: &str) -> Vec<CharToken> {
        classify(s, '.', ',')
    }

    #[test]
    fn units_weigh_separators_lightly() {
        assert!((total_units(&tokens("1,234.5"), 0, 0) - 5.8).abs() < 1e-5);
        assert!((total_units(&tokens("12"), 1, 2) - 5.0).abs() < 1e-5);
        assert_eq!(total_units(&[], 0, 0), 0.0);
    }

    #[test]
    fn fallback_ratio_example() {
        let s = compute_sizing(&tokens("12345"), 0, 0, 200.0, FALLBACK_CHAR_WIDTH_RATIO, 64.0);
        let expected = 200.0 / (5.0 * 0.65);
        assert!((s.font_size - expected).abs() < 1e-3, "{s:?}");
        assert!((s.char_width - expected * 0.65).abs() < 1e-3, "{s:?}");
    }

    #[test]
    fn fits_at_max_when_room() {
        let s = compute_sizing(&tokens("12"), 0, 0, 1000.0, 0.65, 64.0);
        assert_eq!(s.font_size, 64.0);
        assert!((s.char_width - 64.0 * 0.65).abs() < 1e-5);
    }

    #[test]
    fn unknown_container_uses_max() {
        for width in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let s = compute_sizing(&tokens("123456789"), 0, 0, width, 0.65, 48.0);
            assert_eq!(s.font_size, 48.0, "width={width}");
        }
    }

    #[test]
    fn exact_fit_is_not_scaled() {
        // 4 units * 10 * 0.5 = 20
        let s = fit_units(4.0, 20.0, 0.5, 10.0);
        assert_eq!(s.font_size, 10.0);
    }

    #[test]
    fn affixes_push_the_font_down() {
        let bare = compute_sizing(&tokens("1234"), 0, 0, 150.0, 0.65, 64.0);
        let dressed = compute_sizing(&tokens("1234"), 1, 1, 150.0, 0.65, 64.0);
        assert!(dressed.font_size < bare.font_size);
    }

    #[test]
    fn bad_ratio_falls_back() {
        let good = fit_units(5.0, 200.0, FALLBACK_CHAR_WIDTH_RATIO, 64.0);
        for ratio in [0.0, -1.0, f32::NAN] {
            assert_eq!(fit_units(5.0, 200.0, ratio, 64.0), good);
        }
    }

    #[test]
    fn empty_value_keeps_max() {
        let s = compute_sizing(&[], 0, 0, 100.0, 0.65, 64.0);
        assert_eq!(s.font_size, 64.0);
    }

    #[test]
    fn separator_glyphs_are_narrow() {
        let s = Sizing {
            font_size: 20.0,
            char_width: 10.0,
        };
        assert_eq!(s.glyph_width(CharKind::Digit), 10.0);
        assert!((s.glyph_width(CharKind::GroupSeparator) - 4.0).abs() < 1e-6);
        assert!((s.glyph_width(CharKind::DecimalSeparator) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_max_font_size() {
        let s = fit_units(3.0, 10.0, 0.65, f32::NAN);
        assert_eq!(s.font_size, 0.0);
        assert_eq!(s.char_width, 0.0);
    }
}
