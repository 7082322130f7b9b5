#![forbid(unsafe_code)]

//! Animated number display widget.
//!
//! The display itself draws nothing: it decides which glyphs exist, how big
//! they are, and how they should move, then drives a host [`GlyphRenderer`].

pub mod display;
pub mod glyph;
pub mod metrics;

pub use display::{
    DisplayConfig, NumberDisplay, NumberDisplayBuilder, NumberDisplayState, PassSummary,
    RenderReport,
};
pub use glyph::{GlyphFrame, GlyphKey, GlyphRenderer};
pub use metrics::{MetricsSnapshot, RenderMetrics};
