#![forbid(unsafe_code)]

//! Formatting options and configuration errors.
//!
//! [`FormatOptions`] is plain data supplied by the caller on every pass. It is
//! only checked once, when a [`NumberFormat`](crate::format::NumberFormat) or a
//! display is built; the formatting functions themselves accept any options
//! and degrade instead of failing.

use thiserror::Error;

/// Result alias for configuration validation.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("decimal and group separator are both {0:?}")]
    SeparatorsCollide(char),

    #[error("separator {0:?} is a digit")]
    SeparatorIsDigit(char),

    #[error("separator {0:?} collides with the minus sign")]
    SeparatorIsSign(char),

    #[error("max font size must be finite and positive, got {0}")]
    InvalidFontSize(f32),
}

/// Separator pair, precision, and leading-zero policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    /// Fractional-part delimiter (default `.`).
    pub decimal_separator: char,
    /// Thousands separator (default `,`).
    pub group_separator: char,
    /// Maximum number of fraction digits kept; extra digits are truncated.
    pub precision: usize,
    /// Keep leading zeros of the integer part when cleaning raw input.
    pub allow_leading_zeros: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: ',',
            precision: 2,
            allow_leading_zeros: false,
        }
    }
}

impl FormatOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn decimal_separator(mut self, sep: char) -> Self {
        self.decimal_separator = sep;
        self
    }

    #[must_use]
    pub fn group_separator(mut self, sep: char) -> Self {
        self.group_separator = sep;
        self
    }

    #[must_use]
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn allow_leading_zeros(mut self, allow: bool) -> Self {
        self.allow_leading_zeros = allow;
        self
    }

    /// Check that the separators can be told apart from digits, the sign, and
    /// each other.
    pub fn validate(&self) -> Result<()> {
        for sep in [self.decimal_separator, self.group_separator] {
            if sep.is_ascii_digit() {
                return Err(ConfigError::SeparatorIsDigit(sep));
            }
            if sep == '-' {
                return Err(ConfigError::SeparatorIsSign(sep));
            }
        }
        if self.decimal_separator == self.group_separator {
            return Err(ConfigError::SeparatorsCollide(self.decimal_separator));
        }
        Ok(())
    }

    /// Whether `ch` is either configured separator.
    #[inline]
    #[must_use]
    pub fn is_separator(&self, ch: char) -> bool {
        ch == self.decimal_separator || ch == self.group_separator
    }
}

/// Reject a max font size that sizing cannot work with.
pub fn validate_font_size(size: f32) -> Result<()> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFontSize(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let opts = FormatOptions::default();
        assert_eq!(opts.decimal_separator, '.');
        assert_eq!(opts.group_separator, ',');
        assert_eq!(opts.precision, 2);
        assert!(!opts.allow_leading_zeros);
        assert_eq!(opts.validate(), Ok(()));
    }

    #[test]
    fn european_separators_are_valid() {
        let opts = FormatOptions::new()
            .decimal_separator(',')
            .group_separator('.');
        assert_eq!(opts.validate(), Ok(()));
        assert!(opts.is_separator(','));
        assert!(opts.is_separator('.'));
        assert!(!opts.is_separator('5'));
    }

    #[test]
    fn colliding_separators_rejected() {
        let opts = FormatOptions::new().group_separator('.');
        assert_eq!(opts.validate(), Err(ConfigError::SeparatorsCollide('.')));
    }

    #[test]
    fn digit_separator_rejected() {
        let opts = FormatOptions::new().group_separator('7');
        assert_eq!(opts.validate(), Err(ConfigError::SeparatorIsDigit('7')));
    }

    #[test]
    fn sign_separator_rejected() {
        let opts = FormatOptions::new().decimal_separator('-');
        assert_eq!(opts.validate(), Err(ConfigError::SeparatorIsSign('-')));
    }

    #[test]
    fn font_size_validation() {
        assert!(validate_font_size(64.0).is_ok());
        assert_eq!(
            validate_font_size(0.0),
            Err(ConfigError::InvalidFontSize(0.0))
        );
        assert!(validate_font_size(-3.0).is_err());
        assert!(validate_font_size(f32::NAN).is_err());
        assert!(validate_font_size(f32::INFINITY).is_err());
    }

    #[test]
    fn error_messages_name_the_char() {
        let msg = ConfigError::SeparatorsCollide(',').to_string();
        assert!(msg.contains("','"), "{msg}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let opts: FormatOptions = serde_json::from_str(r#"{"precision": 4}"#).unwrap();
        assert_eq!(opts.precision, 4);
        assert_eq!(opts.decimal_separator, '.');
        assert_eq!(opts.group_separator, ',');
    }
}
