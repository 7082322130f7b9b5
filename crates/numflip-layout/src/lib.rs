#![forbid(unsafe_code)]

//! Layout for numflip displays.
//!
//! - [`sizing`] fits a value into its container by shrinking the font.
//! - [`probe`] caches the measured width/size ratio of each font family.

pub mod probe;
pub mod sizing;

pub use probe::{MeasureRequest, RatioLookup, WidthRatioCache, family_key};
pub use sizing::{
    DEFAULT_MAX_FONT_SIZE, FALLBACK_CHAR_WIDTH_RATIO, SEPARATOR_UNITS, Sizing, compute_sizing,
    fit_units, total_units,
};
