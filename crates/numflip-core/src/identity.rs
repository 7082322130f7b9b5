#![forbid(unsafe_code)]

//! Glyph identities and where they come from.
//!
//! An identity binds a displayed glyph across passes so the animation host
//! treats it as one object moving rather than one removed and one added.
//!
//! # Invariants
//!
//! 1. An [`IdSource`] never yields the same [`GlyphId`] twice.
//! 2. Ids from one source are strictly increasing.
//!
//! The reconciler takes the source as a parameter. Hosts normally use
//! [`ProcessIds`]; tests use [`SequentialIds`] for predictable values.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque, ordered glyph identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphId(u64);

impl GlyphId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Supplier of fresh identities.
pub trait IdSource {
    /// Produce an identity never produced before by this source.
    fn next_id(&mut self) -> GlyphId;
}

impl<S: IdSource + ?Sized> IdSource for &mut S {
    fn next_id(&mut self) -> GlyphId {
        (**self).next_id()
    }
}

/// Deterministic counter, local to one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Start counting at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Start counting at `first`.
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// The id the next call will return.
    #[must_use]
    pub const fn peek(&self) -> GlyphId {
        GlyphId(self.next)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> GlyphId {
        let id = GlyphId(self.next);
        self.next += 1;
        id
    }
}

static PROCESS_NEXT: AtomicU64 = AtomicU64::new(1);

/// Process-wide counter: ids are unique across every display in the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessIds;

impl IdSource for ProcessIds {
    fn next_id(&mut self) -> GlyphId {
        GlyphId(PROCESS_NEXT.fetch_add(1, Ordering::Relaxed))
    }
}
