#![forbid(unsafe_code)]

//! Per-font-family character-width ratio cache.
//!
//! The sizing math needs `average glyph width / font size` for the active
//! font. The host measures it once per family by rendering a sample string
//! off-screen; until that answer arrives the display runs on
//! [`FALLBACK_CHAR_WIDTH_RATIO`](crate::sizing::FALLBACK_CHAR_WIDTH_RATIO).
//!
//! # Invariants
//!
//! 1. At most one [`MeasureRequest`] is issued per family key.
//! 2. A resolved ratio is finite and positive, and never replaced.
//! 3. Families without a name share the `"default"` key.
//!
//! # Failure Modes
//!
//! - A measurement that never resolves leaves the family on the fallback
//!   ratio for the life of the cache.
//! - Widths that are zero, negative, or non-finite are ignored and the key
//!   stays pending.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::sizing::FALLBACK_CHAR_WIDTH_RATIO;

/// Cache key for an unnamed font family.
pub const DEFAULT_FAMILY_KEY: &str = "default";

/// Sample string measured by the host.
pub const SAMPLE_TEXT: &str = "1234567890";

/// Font size the sample is rendered at.
pub const SAMPLE_FONT_SIZE: f32 = 5.0;

/// Ask the host to measure `sample` in `family` at `font_size` and report
/// the total width back through [`WidthRatioCache::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureRequest {
    pub key: String,
    pub family: Option<String>,
    pub sample: &'static str,
    pub font_size: f32,
}

/// Answer to a ratio lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum RatioLookup {
    Measured(f32),
    /// Not measured yet. `request` is `Some` only the first time a key is
    /// seen; later lookups while pending carry `None`.
    Pending { request: Option<MeasureRequest> },
}

impl RatioLookup {
    /// The ratio to size with right now.
    #[inline]
    #[must_use]
    pub fn ratio(&self) -> f32 {
        match self {
            Self::Measured(r) => *r,
            Self::Pending { .. } => FALLBACK_CHAR_WIDTH_RATIO,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }

    /// Take the measurement request, if this lookup issued one.
    #[must_use]
    pub fn into_request(self) -> Option<MeasureRequest> {
        match self {
            Self::Pending { request } => request,
            Self::Measured(_) => None,
        }
    }
}

/// Shared cache of measured ratios. One instance serves every display.
#[derive(Debug, Default)]
pub struct WidthRatioCache {
    ratios: FxHashMap<String, f32>,
    pending: FxHashSet<String>,
}

/// Normalise an optional family name to its cache key.
#[inline]
#[must_use]
pub fn family_key(family: Option<&str>) -> &str {
    match family {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_FAMILY_KEY,
    }
}

impl WidthRatioCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the ratio for `family`, issuing a measurement on first sight.
    pub fn lookup(&mut self, family: Option<&str>) -> RatioLookup {
        let key = family_key(family);
        if let Some(&ratio) = self.ratios.get(key) {
            return RatioLookup::Measured(ratio);
        }
        if self.pending.contains(key) {
            return RatioLookup::Pending { request: None };
        }

        self.pending.insert(key.to_owned());
        tracing::debug!(message = "probe.request", key);
        RatioLookup::Pending {
            request: Some(MeasureRequest {
                key: key.to_owned(),
                family: family.filter(|f| !f.is_empty()).map(str::to_owned),
                sample: SAMPLE_TEXT,
                font_size: SAMPLE_FONT_SIZE,
            }),
        }
    }

    /// Cached ratio without side effects.
    #[must_use]
    pub fn peek(&self, family: Option<&str>) -> Option<f32> {
        self.ratios.get(family_key(family)).copied()
    }

    #[must_use]
    pub fn is_pending(&self, family: Option<&str>) -> bool {
        self.pending.contains(family_key(family))
    }

    /// Record the measured width of [`SAMPLE_TEXT`] for `key`.
    ///
    /// Returns the stored ratio, or `None` when the width is unusable. A key
    /// that already has a ratio keeps it.
    pub fn resolve(&mut self, key: &str, measured_width: f32) -> Option<f32> {
        if let Some(&ratio) = self.ratios.get(key) {
            return Some(ratio);
        }
        if !(measured_width.is_finite() && measured_width > 0.0) {
            tracing::warn!(message = "probe.reject", key, measured_width);
            return None;
        }

        let ratio = measured_width / SAMPLE_TEXT.len() as f32 / SAMPLE_FONT_SIZE;
        self.pending.remove(key);
        self.ratios.insert(key.to_owned(), ratio);
        tracing::debug!(message = "probe.resolve", key, ratio);
        Some(ratio)
    }

    /// Number of measured families.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}
