#![forbid(unsafe_code)]

//! Raw keyboard text → canonical display string.
//!
//! Two passes run on every keystroke:
//!
//! 1. [`clean_input`] normalises what the user typed (a bare leading decimal
//!    separator gains a zero, redundant leading zeros go away).
//! 2. [`format_number`] filters, groups, and truncates into the canonical
//!    form the classifier and reconciler key on.
//!
//! # Invariants
//!
//! 1. Both functions are total: any input produces a (possibly empty) string.
//! 2. The sign is never grouped and never truncated away.
//! 3. The fraction is truncated, never rounded.
//! 4. `format_number` is idempotent on its own output.
//!
//! # Failure Modes
//!
//! - Junk characters are dropped silently.
//! - A second decimal separator ends the fraction; text after it is dropped.

use crate::config::{FormatOptions, Result};

/// Format raw text into its canonical grouped form.
///
/// ```
/// use numflip_core::format::format_number;
///
/// assert_eq!(format_number("1234567", '.', ',', 2), "1,234,567");
/// assert_eq!(format_number("12.999", '.', ',', 2), "12.99");
/// assert_eq!(format_number("-500", '.', ',', 0), "-500");
/// ```
#[must_use]
pub fn format_number(
    raw: &str,
    decimal_separator: char,
    group_separator: char,
    precision: usize,
) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let (negative, body) = split_sign(raw);
    let filtered: String = body
        .chars()
        .filter(|&c| c.is_ascii_digit() || c == decimal_separator)
        .collect();

    let mut parts = filtered.split(decimal_separator);
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next();

    let mut out = String::with_capacity(filtered.len() + filtered.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    push_grouped(&mut out, integer, group_separator);
    if let Some(fraction) = fraction {
        out.push(decimal_separator);
        out.extend(fraction.chars().take(precision));
    }
    out
}

/// Normalise typed text before formatting.
///
/// - `.5` becomes `0.5` and `-.` becomes `-0.`.
/// - Unless `allow_leading_zeros` is set, leading zeros of the integer part
///   are removed, keeping one zero when only a decimal separator (or nothing)
///   follows: `0005` → `5`, `000.5` → `0.5`, `-05` → `-5`, `00` → `0`.
#[must_use]
pub fn clean_input(raw: &str, options: &FormatOptions) -> String {
    let (negative, body) = split_sign(raw);
    let sign = if negative { "-" } else { "" };

    let body = if body.starts_with(options.decimal_separator) {
        format!("0{body}")
    } else {
        body.to_string()
    };

    if options.allow_leading_zeros {
        return format!("{sign}{body}");
    }
    format!(
        "{sign}{}",
        strip_leading_zeros(&body, options.decimal_separator)
    )
}

#[inline]
fn split_sign(raw: &str) -> (bool, &str) {
    match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    }
}

/// Insert `sep` before every run of three digits that has a digit to its left.
fn push_grouped(out: &mut String, digits: &str, sep: char) {
    let len = digits.chars().count();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
}

/// Drop leading zeros (and the junk the formatter would drop anyway).
fn strip_leading_zeros(body: &str, decimal_separator: char) -> String {
    let mut saw_zero = false;
    let mut rest = body;
    for (idx, ch) in body.char_indices() {
        if ch == '0' {
            saw_zero = true;
        } else if ch.is_ascii_digit() || ch == decimal_separator {
            rest = &body[idx..];
            break;
        }
        rest = &body[idx + ch.len_utf8()..];
    }

    if !saw_zero {
        return body.to_string();
    }
    match rest.chars().next() {
        Some(c) if c.is_ascii_digit() => rest.to_string(),
        _ => format!("0{rest}"),
    }
}

// ---------------------------------------------------------------------------
// NumberFormat
// ---------------------------------------------------------------------------

/// Validated [`FormatOptions`] with the formatting passes attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberFormat {
    options: FormatOptions,
}

impl NumberFormat {
    /// Validate `options` and wrap them.
    pub fn new(options: FormatOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Canonical form of `raw` (see [`format_number`]).
    #[must_use]
    pub fn format(&self, raw: &str) -> String {
        format_number(
            raw,
            self.options.decimal_separator,
            self.options.group_separator,
            self.options.precision,
        )
    }

    /// Cleaned form of `raw` (see [`clean_input`]).
    #[must_use]
    pub fn clean(&self, raw: &str) -> String {
        clean_input(raw, &self.options)
    }

    /// Clean then format: what a text-changed handler should publish.
    #[must_use]
    pub fn format_input(&self, raw: &str) -> String {
        self.format(&self.clean(raw))
    }
}
