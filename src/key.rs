//! Storage key and stored offset encoding
//!
//! Keys look like `twitter_<userId>_scrollPosition` and values are decimal
//! pixel offsets. Both shapes are shared with pages that already wrote them,
//! so they must not change.

use std::fmt;

use crate::config::Config;

/// Storage key for one user's scroll position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrollKey(String);

impl ScrollKey {
    /// Build the key for a user. A missing id still yields a key.
    pub fn for_user(user_id: Option<&str>, config: &Config) -> Self {
        let fragment = user_id.unwrap_or(&config.missing_user);
        Self(format!("{}{}{}", config.key_prefix, fragment, config.key_suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScrollKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative vertical pixel offset as held in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct StoredOffset(pub u64);

impl StoredOffset {
    pub const TOP: StoredOffset = StoredOffset(0);

    /// Snap a live `scrollY` (fractional on zoomed or high-DPI pages) to whole pixels
    pub fn from_scroll_y(y: f64) -> Self {
        if !y.is_finite() || y <= 0.0 {
            return Self::TOP;
        }
        Self(y.round() as u64)
    }

    /// Parse a stored value with `Number()`-like leniency.
    ///
    /// Surrounding whitespace is ignored and an empty string is zero.
    /// Unsigned `0x`/`0o`/`0b` literals are read in their radix.
    /// Fractions round and negatives clamp to the top. Returns `None` for
    /// anything that is not a finite number.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Some(Self::TOP);
        }
        if let Some(offset) = Self::parse_radix_literal(trimmed) {
            return offset;
        }
        let value: f64 = trimmed.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Self::from_scroll_y(value))
    }

    /// `Some(..)` when `text` carries a radix prefix, even if the digits are bad
    fn parse_radix_literal(text: &str) -> Option<Option<Self>> {
        let (radix, digits) = match text.get(..2)? {
            "0x" | "0X" => (16, &text[2..]),
            "0o" | "0O" => (8, &text[2..]),
            "0b" | "0B" => (2, &text[2..]),
            _ => return None,
        };
        // from_str_radix would accept a leading '+', Number() does not
        if digits.starts_with('+') {
            return Some(None);
        }
        Some(u64::from_str_radix(digits, radix).ok().map(Self))
    }

    /// Offset to restore for a raw storage entry; missing or garbage means top
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            None => Self::TOP,
            Some(s) => Self::parse(s).unwrap_or_else(|| {
                log::warn!("Ignoring non-numeric scroll position {:?}", s);
                Self::TOP
            }),
        }
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for StoredOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(not(target_arch = "wasm32"))]
    use proptest::prelude::*;

    #[test]
    fn test_key_for_user() {
        let key = ScrollKey::for_user(Some("42"), &Config::default());
        assert_eq!(key.as_str(), "twitter_42_scrollPosition");
    }

    #[test]
    fn test_key_without_user_uses_null_fragment() {
        let key = ScrollKey::for_user(None, &Config::default());
        assert_eq!(key.to_string(), "twitter_null_scrollPosition");
    }

    #[test]
    fn test_key_with_empty_user() {
        let key = ScrollKey::for_user(Some(""), &Config::default());
        assert_eq!(key.as_str(), "twitter__scrollPosition");
    }

    #[test]
    fn test_from_scroll_y_rounds_and_clamps() {
        assert_eq!(StoredOffset::from_scroll_y(500.0), StoredOffset(500));
        assert_eq!(StoredOffset::from_scroll_y(499.6), StoredOffset(500));
        assert_eq!(StoredOffset::from_scroll_y(-12.0), StoredOffset::TOP);
        assert_eq!(StoredOffset::from_scroll_y(f64::NAN), StoredOffset::TOP);
    }

    #[test]
    fn test_parse_number_like_values() {
        assert_eq!(StoredOffset::parse("500"), Some(StoredOffset(500)));
        assert_eq!(StoredOffset::parse(" 500 "), Some(StoredOffset(500)));
        assert_eq!(StoredOffset::parse("500.5"), Some(StoredOffset(501)));
        assert_eq!(StoredOffset::parse(""), Some(StoredOffset::TOP));
        assert_eq!(StoredOffset::parse("-3"), Some(StoredOffset::TOP));
    }

    #[test]
    fn test_parse_radix_literals() {
        assert_eq!(StoredOffset::parse("0x1F4"), Some(StoredOffset(500)));
        assert_eq!(StoredOffset::parse(" 0X1f4 "), Some(StoredOffset(500)));
        assert_eq!(StoredOffset::parse("0o764"), Some(StoredOffset(500)));
        assert_eq!(StoredOffset::parse("0b111110100"), Some(StoredOffset(500)));
        assert_eq!(StoredOffset::parse("0x"), None);
        assert_eq!(StoredOffset::parse("0x+1F4"), None);
        assert_eq!(StoredOffset::parse("0xZZ"), None);
        assert_eq!(StoredOffset::parse("-0x10"), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(StoredOffset::parse("abc"), None);
        assert_eq!(StoredOffset::parse("NaN"), None);
        assert_eq!(StoredOffset::parse("inf"), None);
        assert_eq!(StoredOffset::parse("12px"), None);
    }

    #[test]
    fn test_coerce_falls_back_to_top() {
        assert_eq!(StoredOffset::coerce(None), StoredOffset::TOP);
        assert_eq!(StoredOffset::coerce(Some("abc")), StoredOffset::TOP);
        assert_eq!(StoredOffset::coerce(Some("240")), StoredOffset(240));
    }

    #[cfg(not(target_arch = "wasm32"))]
    proptest! {
        #[test]
        fn prop_key_is_deterministic(user in ".*") {
            let config = Config::default();
            let a = ScrollKey::for_user(Some(&user), &config);
            let b = ScrollKey::for_user(Some(&user), &config);
            prop_assert_eq!(&a, &b);
            prop_assert!(a.as_str().starts_with("twitter_"));
            prop_assert!(a.as_str().ends_with("_scrollPosition"));
        }

        #[test]
        fn prop_stored_text_reads_back(offset in 0u64..10_000_000) {
            let text = StoredOffset(offset).to_string();
            prop_assert_eq!(StoredOffset::parse(&text), Some(StoredOffset(offset)));
        }
    }
}
