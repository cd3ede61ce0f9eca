//! UPC/EAN/GTIN normalization.
//!
//! Malformed codes are never an error: they are dropped, and the query
//! builder simply falls through to the next strategy tier.

use std::collections::HashSet;

/// Shortest accepted code (10-digit UPC without check digit / ISBN-10 style).
pub const MIN_IDENTIFIER_DIGITS: usize = 10;
/// Longest accepted code (GTIN-14).
pub const MAX_IDENTIFIER_DIGITS: usize = 14;

/// A product code reduced to 10-14 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedIdentifier(String);

impl NormalizedIdentifier {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strips every non-ASCII-digit character and accepts the residue only when
/// it is 10-14 digits long.
#[must_use]
pub fn normalize_identifier(raw: &str) -> Option<NormalizedIdentifier> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if (MIN_IDENTIFIER_DIGITS..=MAX_IDENTIFIER_DIGITS).contains(&digits.len()) {
        Some(NormalizedIdentifier(digits))
    } else {
        None
    }
}

/// Normalizes an ordered candidate set, dropping rejects and later
/// duplicates of an already-seen code.
#[must_use]
pub fn normalize_identifiers<S: AsRef<str>>(candidates: &[S]) -> Vec<NormalizedIdentifier> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter_map(|raw| normalize_identifier(raw.as_ref()))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_left_to_right_mark() {
        let id = normalize_identifier("\u{200e}199414326476").expect("valid UPC");
        assert_eq!(id.as_str(), "199414326476");
    }

    #[test]
    fn strips_dashes_and_spaces() {
        let id = normalize_identifier(" 0-12345 67890-5 ").expect("valid UPC");
        assert_eq!(id.as_str(), "012345678905");
    }

    #[test]
    fn rejects_short_alphanumeric() {
        assert!(normalize_identifier("abc123").is_none());
    }

    #[test]
    fn rejects_empty_and_non_numeric() {
        assert!(normalize_identifier("").is_none());
        assert!(normalize_identifier("   ").is_none());
        assert!(normalize_identifier("not-a-code").is_none());
    }

    #[test]
    fn accepts_length_bounds_inclusive() {
        assert!(normalize_identifier("1234567890").is_some());
        assert!(normalize_identifier("12345678901234").is_some());
    }

    #[test]
    fn rejects_out_of_bounds_lengths() {
        assert!(normalize_identifier("123456789").is_none());
        assert!(normalize_identifier("123456789012345").is_none());
    }

    #[test]
    fn every_length_in_range_round_trips_digits() {
        for len in 1..=20 {
            let raw: String = "9".repeat(len);
            let expected = (MIN_IDENTIFIER_DIGITS..=MAX_IDENTIFIER_DIGITS).contains(&len);
            assert_eq!(
                normalize_identifier(&raw).map(NormalizedIdentifier::into_string),
                expected.then(|| raw.clone()),
                "len={len}"
            );
        }
    }

    #[test]
    fn non_ascii_digits_are_noise() {
        // Arabic-Indic digits are not ASCII and must not count toward length.
        assert!(normalize_identifier("١٢٣٤٥٦٧٨٩٠").is_none());
    }

    #[test]
    fn normalize_identifiers_dedupes_after_normalization() {
        let ids = normalize_identifiers(&[
            "\u{200e}199414326476",
            "bogus",
            "199-414-326-476",
            "0012345678905",
        ]);
        let codes: Vec<&str> = ids.iter().map(NormalizedIdentifier::as_str).collect();
        assert_eq!(codes, vec!["199414326476", "0012345678905"]);
    }
}
