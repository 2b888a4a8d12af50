//! Regex patterns for VIN and mileage extraction.
//!
//! The regex engine has no lookaround, so bounded digit runs and VINs split
//! across several OCR tokens are found by the run scanner instead.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Mileage patterns, applied to normalized text in this order
    pub static ref MILEAGE_COMMA_GROUPED: Regex = Regex::new(
        r"\b\d{1,3}(?:,\d{3})+\b"
    ).unwrap();

    pub static ref MILEAGE_DOT_GROUPED: Regex = Regex::new(
        r"\b\d{1,3}(?:\.\d{3})+\b"
    ).unwrap();

    pub static ref MILEAGE_WORD_BOUNDED: Regex = Regex::new(
        r"\b\d{4,7}\b"
    ).unwrap();

    pub static ref MILEAGE_ANY_DIGITS: Regex = Regex::new(
        r"\d+"
    ).unwrap();

    // VIN patterns (I, O and Q are never valid VIN characters)
    pub static ref VIN_EXACT: Regex = Regex::new(
        r"\b[A-HJ-NPR-Z0-9]{17}\b"
    ).unwrap();

    pub static ref VIN_NEAR_MISS: Regex = Regex::new(
        r"[A-HJ-NPR-Z0-9]{15,19}"
    ).unwrap();

    // Distance units, matched against raw text
    pub static ref DISTANCE_UNIT: Regex = Regex::new(
        r"(?i)(?:^|[^\p{L}])(kilomet(?:er|re)s?|kms?|miles?|mls|mi)\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_patterns() {
        assert!(MILEAGE_COMMA_GROUPED.is_match("123,456"));
        assert!(MILEAGE_DOT_GROUPED.is_match("1.234.567"));
        assert!(!MILEAGE_COMMA_GROUPED.is_match("12,34"));
    }

    #[test]
    fn test_vin_exact_rejects_confusable_letters() {
        assert!(VIN_EXACT.is_match("1HGBH41JXMN109186"));
        assert!(!VIN_EXACT.is_match("1HGBH41JXMN1O9186"));
        assert!(!VIN_EXACT.is_match("1HGBH41JXMN109186A"));
    }
}
