#![forbid(unsafe_code)]

//! Core: number formatting, glyph classification, identity reconciliation,
//! and animation parameters.
//!
//! Everything here is synchronous and total. The one piece of state carried
//! between passes, the tagged glyph list, is owned by the caller and passed
//! back into [`reconcile::reconcile`].

pub mod animation;
pub mod classify;
pub mod config;
pub mod format;
pub mod identity;
pub mod reconcile;

pub use classify::{CharKind, CharToken, classify};
pub use config::{ConfigError, FormatOptions};
pub use format::{NumberFormat, clean_input, format_number};
pub use identity::{GlyphId, IdSource, ProcessIds, SequentialIds};
pub use reconcile::{Lifecycle, Reconciliation, TaggedChar, reconcile};
