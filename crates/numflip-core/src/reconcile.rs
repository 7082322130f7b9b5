#![forbid(unsafe_code)]

//! Digit-identity reconciliation.
//!
//! Given the tagged list from the previous pass and the freshly classified
//! tokens, decide which tokens continue a previous glyph (keep its identity
//! and move), which are new (fresh identity, enter), and which previous
//! glyphs disappeared (exit).
//!
//! # Algorithm
//!
//! ```text
//! previous ──drop Exiting──► live
//!
//! 1. separators, tail-aligned as one class:
//!      new ≥ prev : first (new − prev) new separators are fresh,
//!                   the rest pair with every previous separator in order
//!      new < prev : new separators pair with the last `new` previous ones
//! 2. left → right over the other tokens:
//!      first unconsumed live entry with the same char, else fresh
//! 3. unconsumed live entries are appended, in previous order, as Exiting
//! ```
//!
//! The positional phase is a greedy first-available match, not a longest
//! common subsequence.
//!
//! # Invariants
//!
//! 1. Non-exiting output entries carry pairwise distinct identities.
//! 2. Output order is: the new tokens in display order, then exiting entries.
//! 3. Identical input reuses every identity and produces no exits.
//! 4. Fresh identities are drawn left to right from the [`IdSource`].
//! 5. Entries that were already `Exiting` in `previous` are not carried over.
//!
//! # Failure Modes
//!
//! - A `previous` list with duplicate live identities is a caller bug and
//!   trips a debug assertion.

use std::ops::Deref;

use crate::classify::{CharKind, CharToken};
use crate::identity::{GlyphId, IdSource};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where a glyph is in its enter → stay → exit life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// First pass with this identity.
    Entering,
    /// Identity carried over from the previous pass.
    Stable,
    /// Gone from the value; shown one last time, dropped next pass.
    Exiting,
}

/// A token bound to a glyph identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaggedChar {
    pub token: CharToken,
    pub id: GlyphId,
    pub lifecycle: Lifecycle,
}

impl TaggedChar {
    #[inline]
    #[must_use]
    pub const fn ch(&self) -> char {
        self.token.ch
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> CharKind {
        self.token.kind
    }

    #[inline]
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.lifecycle == Lifecycle::Exiting
    }
}

/// Output of one [`reconcile`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    chars: Vec<TaggedChar>,
    reused: usize,
    fresh: usize,
    exiting: usize,
}

impl Reconciliation {
    /// Tokens that took over a previous identity.
    #[inline]
    #[must_use]
    pub fn reused(&self) -> usize {
        self.reused
    }

    /// Tokens that received a fresh identity.
    #[inline]
    #[must_use]
    pub fn fresh(&self) -> usize {
        self.fresh
    }

    /// Previous entries now exiting.
    #[inline]
    #[must_use]
    pub fn exiting(&self) -> usize {
        self.exiting
    }

    /// Entries still part of the value (entering or stable).
    pub fn live(&self) -> impl Iterator<Item = &TaggedChar> {
        self.chars.iter().filter(|c| !c.is_exiting())
    }

    /// Entries playing their exit.
    pub fn exits(&self) -> impl Iterator<Item = &TaggedChar> {
        self.chars.iter().filter(|c| c.is_exiting())
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<TaggedChar> {
        self.chars
    }
}

impl Deref for Reconciliation {
    type Target = [TaggedChar];

    fn deref(&self) -> &Self::Target {
        &self.chars
    }
}

impl From<Reconciliation> for Vec<TaggedChar> {
    fn from(value: Reconciliation) -> Self {
        value.chars
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Assign identities to `new_tokens`, continuing those of `previous`.
///
/// ```
/// use numflip_core::classify::classify;
/// use numflip_core::identity::SequentialIds;
/// use numflip_core::reconcile::reconcile;
///
/// let mut ids = SequentialIds::new();
/// let first = reconcile(&classify("1,234", '.', ','), &[], &mut ids);
/// let second = reconcile(&classify("1,235", '.', ','), &first, &mut ids);
///
/// // '1', ',', '2', '3' kept their glyphs; '4' exits and '5' enters.
/// assert_eq!(second.reused(), 4);
/// assert_eq!(second.fresh(), 1);
/// assert_eq!(second.exiting(), 1);
/// ```
pub fn reconcile<S>(new_tokens: &[CharToken], previous: &[TaggedChar], ids: &mut S) -> Reconciliation
where
    S: IdSource + ?Sized,
{
    let live: Vec<&TaggedChar> = previous.iter().filter(|c| !c.is_exiting()).collect();
    debug_assert!(
        ids_unique(live.iter().copied()),
        "previous glyph list carries duplicate live identities"
    );

    let mut consumed = vec![false; live.len()];
    let separator_match = match_separators(new_tokens, &live);

    let mut chars = Vec::with_capacity(new_tokens.len() + live.len());
    let mut reused = 0;
    let mut fresh = 0;

    for (pos, token) in new_tokens.iter().enumerate() {
        let matched = if token.is_separator() {
            separator_match[pos]
        } else {
            (0..live.len()).find(|&j| !consumed[j] && live[j].token.ch == token.ch)
        };

        let tagged = match matched {
            Some(j) => {
                consumed[j] = true;
                reused += 1;
                TaggedChar {
                    token: *token,
                    id: live[j].id,
                    lifecycle: Lifecycle::Stable,
                }
            }
            None => {
                fresh += 1;
                TaggedChar {
                    token: *token,
                    id: ids.next_id(),
                    lifecycle: Lifecycle::Entering,
                }
            }
        };
        chars.push(tagged);
    }

    let mut exiting = 0;
    for (prev, _) in live.iter().zip(&consumed).filter(|(_, used)| !**used) {
        exiting += 1;
        chars.push(TaggedChar {
            lifecycle: Lifecycle::Exiting,
            ..**prev
        });
    }

    tracing::trace!(
        message = "reconcile.pass",
        tokens = new_tokens.len(),
        reused,
        fresh,
        exiting,
        dropped = previous.len() - live.len()
    );

    Reconciliation {
        chars,
        reused,
        fresh,
        exiting,
    }
}

/// Tail-aligned pairing of new separators with live previous separators.
///
/// Returns, per new token position, the index into `live` it continues.
/// Every pairing claims a distinct live entry, so no consumed-check is needed
/// here; the caller marks them consumed when it walks the tokens.
fn match_separators(new_tokens: &[CharToken], live: &[&TaggedChar]) -> Vec<Option<usize>> {
    let new_seps: Vec<usize> = new_tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_separator())
        .map(|(i, _)| i)
        .collect();
    let prev_seps: Vec<usize> = live
        .iter()
        .enumerate()
        .filter(|(_, c)| c.token.is_separator())
        .map(|(i, _)| i)
        .collect();

    let paired = new_seps.len().min(prev_seps.len());
    let new_tail = &new_seps[new_seps.len() - paired..];
    let prev_tail = &prev_seps[prev_seps.len() - paired..];

    let mut out = vec![None; new_tokens.len()];
    for (&new_pos, &live_idx) in new_tail.iter().zip(prev_tail) {
        out[new_pos] = Some(live_idx);
    }
    out
}

/// Whether the non-exiting entries of `chars` carry distinct identities.
#[must_use]
pub fn live_ids_unique(chars: &[TaggedChar]) -> bool {
    ids_unique(chars.iter().filter(|c| !c.is_exiting()))
}

fn ids_unique<'a>(chars: impl Iterator<Item = &'a TaggedChar>) -> bool {
    let mut ids: Vec<GlyphId> = chars.map(|c| c.id).collect();
    ids.sort_unstable();
    ids.windows(2).all(|w| w[0] != w[1])
}
