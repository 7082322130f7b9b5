#![forbid(unsafe_code)]

//! Display string → ordered glyph tokens.
//!
//! Purely structural: one [`CharToken`] per `char`, tagged by what it is. The
//! sign is classed as a digit because it occupies a slot and animates like
//! one. No identities are assigned here; see [`crate::reconcile`].

/// What a glyph represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharKind {
    /// Digits, the sign, and anything else that is not a separator.
    Digit,
    DecimalSeparator,
    GroupSeparator,
}

impl CharKind {
    /// Whether this kind is matched by the separator phase.
    #[inline]
    #[must_use]
    pub const fn is_separator(self) -> bool {
        matches!(self, Self::DecimalSeparator | Self::GroupSeparator)
    }
}

/// One display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharToken {
    pub ch: char,
    pub kind: CharKind,
}

impl CharToken {
    #[must_use]
    pub const fn new(ch: char, kind: CharKind) -> Self {
        Self { ch, kind }
    }

    #[must_use]
    pub const fn digit(ch: char) -> Self {
        Self::new(ch, CharKind::Digit)
    }

    #[inline]
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        self.kind.is_separator()
    }
}

/// Tag every char of `display`.
///
/// ```
/// use numflip_core::classify::{classify, CharKind};
///
/// let tokens = classify("-1,234.5", '.', ',');
/// assert_eq!(tokens.len(), 8);
/// assert_eq!(tokens[0].kind, CharKind::Digit);
/// assert_eq!(tokens[2].kind, CharKind::GroupSeparator);
/// assert_eq!(tokens[6].kind, CharKind::DecimalSeparator);
/// ```
#[must_use]
pub fn classify(display: &str, decimal_separator: char, group_separator: char) -> Vec<CharToken> {
    display
        .chars()
        .map(|ch| {
            let kind = if ch == decimal_separator {
                CharKind::DecimalSeparator
            } else if ch == group_separator {
                CharKind::GroupSeparator
            } else {
                CharKind::Digit
            };
            CharToken { ch, kind }
        })
        .collect()
}

/// Number of separator tokens in `tokens`.
#[inline]
#[must_use]
pub fn separator_count(tokens: &[CharToken]) -> usize {
    tokens.iter().filter(|t| t.is_separator()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_has_no_tokens() {
        assert!(classify("", '.', ',').is_empty());
    }

    #[test]
    fn tags_each_char() {
        let tokens = classify("1,234.56", '.', ',');
        let kinds: Vec<CharKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CharKind::Digit,
                CharKind::GroupSeparator,
                CharKind::Digit,
                CharKind::Digit,
                CharKind::Digit,
                CharKind::DecimalSeparator,
                CharKind::Digit,
                CharKind::Digit,
            ]
        );
        let chars: String = tokens.iter().map(|t| t.ch).collect();
        assert_eq!(chars, "1,234.56");
    }

    #[test]
    fn sign_is_a_digit() {
        let tokens = classify("-5", '.', ',');
        assert_eq!(tokens[0], CharToken::digit('-'));
    }

    #[test]
    fn swapped_separators() {
        let tokens = classify("1.234,5", ',', '.');
        assert_eq!(tokens[1].kind, CharKind::GroupSeparator);
        assert_eq!(tokens[5].kind, CharKind::DecimalSeparator);
    }

    #[test]
    fn counts_separators() {
        assert_eq!(separator_count(&classify("1,234,567.8", '.', ',')), 3);
        assert_eq!(separator_count(&classify("42", '.', ',')), 0);
    }
}
