//! Candidate plausibility scoring.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::models::result::{Candidate, FieldKind};

/// Mileage values outside this range are never preferred.
pub const PLAUSIBLE_MILEAGE: RangeInclusive<u64> = 100..=999_999;

/// A single plausible mileage inside this range is a `High` confidence read.
pub const TYPICAL_MILEAGE: RangeInclusive<u64> = 1_000..=500_000;

/// Length of a complete VIN.
pub const VIN_LENGTH: usize = 17;

/// Letters that never occur in a VIN.
pub const VIN_FORBIDDEN: [char; 3] = ['I', 'O', 'Q'];

/// Assigns plausibility scores to candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateScorer;

impl CandidateScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a candidate; higher is more plausible.
    pub fn score(&self, candidate: &Candidate, kind: FieldKind) -> i64 {
        match kind {
            FieldKind::Mileage => score_mileage(candidate.as_str()),
            FieldKind::Vin => score_vin(candidate.as_str()),
        }
    }
}

/// Parse a separator-free digit string into a positive mileage.
///
/// Zero and values that overflow `u64` are rejected.
pub fn parse_mileage(digits: &str) -> Option<u64> {
    digits.parse::<u64>().ok().filter(|n| *n > 0)
}

/// Score a mileage candidate by magnitude and digit count.
pub fn score_mileage(digits: &str) -> i64 {
    let Some(n) = parse_mileage(digits) else {
        return 0;
    };

    let range_bonus = match n {
        10_000..=200_000 => 100,
        1_000..=500_000 => 50,
        100..=999_999 => 25,
        _ => 0,
    };

    let digit_bonus = match digits.len() {
        6 => 40,
        5 => 30,
        4 | 7 => 15,
        _ => 0,
    };

    let mut penalty = 0;
    if n < 100 {
        penalty -= 50;
    }
    if n > 500_000 {
        penalty -= 30;
    }

    range_bonus + digit_bonus + penalty
}

/// Score a VIN candidate: full-length first, then longest.
pub fn score_vin(vin: &str) -> i64 {
    let exact_bonus = if vin.len() == VIN_LENGTH { 1000 } else { 0 };
    exact_bonus + vin.len() as i64
}

/// Whether a VIN looks like a real one rather than an OCR artifact.
///
/// Requires full length, no I/O/Q, at least 5 distinct characters and
/// both letters and digits.
pub fn is_well_formed_vin(vin: &str) -> bool {
    if vin.len() != VIN_LENGTH || vin.contains(VIN_FORBIDDEN) {
        return false;
    }

    let distinct: HashSet<char> = vin.chars().collect();
    let has_letter = vin.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = vin.chars().any(|c| c.is_ascii_digit());

    distinct.len() >= 5 && has_letter && has_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_mileage_ideal_range() {
        // 100 (range) + 40 (six digits)
        assert_eq!(score_mileage("123456"), 140);
        // 100 + 30
        assert_eq!(score_mileage("45000"), 130);
    }

    #[test]
    fn test_score_mileage_outer_ranges() {
        // 50 + 40
        assert_eq!(score_mileage("350000"), 90);
        // 25 + 40 - 30
        assert_eq!(score_mileage("750000"), 35);
        // 25 + 0
        assert_eq!(score_mileage("456"), 25);
        // 0 + 15 - 30
        assert_eq!(score_mileage("1234567"), -15);
    }

    #[test]
    fn test_score_mileage_small_values_penalized() {
        assert_eq!(score_mileage("99"), -50);
        // Leading zeros count as digits.
        assert_eq!(score_mileage("0099"), 15 - 50);
    }

    #[test]
    fn test_parse_mileage_rejects_zero_and_overflow() {
        assert_eq!(parse_mileage("000"), None);
        assert_eq!(parse_mileage("99999999999999999999999"), None);
        assert_eq!(parse_mileage("160648"), Some(160_648));
        assert_eq!(score_mileage("99999999999999999999999"), 0);
    }

    #[test]
    fn test_score_vin_prefers_exact_length() {
        assert!(score_vin("1HGBH41JXMN109186") > score_vin("1HGBH41JXMN1091861A"));
        assert!(score_vin("1HGBH41JXMN10918") > score_vin("1HGBH41JXMN1091"));
    }

    #[test]
    fn test_well_formed_vin() {
        assert!(is_well_formed_vin("1HGBH41JXMN109186"));
        assert!(!is_well_formed_vin("11111111111111111"));
        assert!(!is_well_formed_vin("ABCDEFGHJKLMNPRST"));
        assert!(!is_well_formed_vin("1HGBH41JXMN1O9186"));
        assert!(!is_well_formed_vin("1HGBH41JXMN10918"));
        assert!(!is_well_formed_vin("1A1A1A1A1A1A1A1A1"));
    }

    #[test]
    fn test_scorer_dispatches_on_kind() {
        let scorer = CandidateScorer::new();
        assert_eq!(scorer.score(&Candidate::new("123456"), FieldKind::Mileage), 140);
        assert_eq!(scorer.score(&Candidate::new("1HGBH41JXMN109186"), FieldKind::Vin), 1017);
    }
}
