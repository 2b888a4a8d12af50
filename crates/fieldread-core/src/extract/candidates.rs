//! Candidate generation from normalized text.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use super::patterns::{
    MILEAGE_ANY_DIGITS, MILEAGE_COMMA_GROUPED, MILEAGE_DOT_GROUPED, MILEAGE_WORD_BOUNDED,
    VIN_EXACT, VIN_NEAR_MISS,
};
use super::scanner;
use super::scoring::{parse_mileage, VIN_FORBIDDEN};
use crate::models::result::{Candidate, FieldKind};

/// Accepted VIN candidate lengths, allowing for OCR length drift.
pub const VIN_CANDIDATE_LENGTHS: RangeInclusive<usize> = 15..=19;

/// Lengths of the bounded digit runs considered for mileage.
const MILEAGE_RUN_LENGTHS: RangeInclusive<usize> = 4..=8;

/// Number of OCR tokens a split VIN may be spread over.
const VIN_GROUP_SIZES: RangeInclusive<usize> = 3..=4;

/// Produces the deduplicated candidate list for a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateGenerator;

impl CandidateGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate candidates in discovery order.
    ///
    /// Text without matches yields an empty vector.
    pub fn generate(&self, normalized: &str, kind: FieldKind) -> Vec<Candidate> {
        match kind {
            FieldKind::Mileage => mileage_candidates(normalized),
            FieldKind::Vin => vin_candidates(normalized),
        }
    }
}

/// Insertion-ordered set of candidates; the first occurrence keeps its position.
#[derive(Default)]
struct CandidateSet {
    seen: HashSet<String>,
    items: Vec<Candidate>,
}

impl CandidateSet {
    fn insert(&mut self, text: String) {
        if self.seen.insert(text.clone()) {
            self.items.push(Candidate::new(text));
        }
    }

    fn into_vec(self) -> Vec<Candidate> {
        self.items
    }
}

fn mileage_candidates(text: &str) -> Vec<Candidate> {
    let mut set = CandidateSet::default();
    let mut add = |raw: &str| {
        let digits = raw.replace([',', '.'], "");
        if parse_mileage(&digits).is_some() {
            set.insert(digits);
        }
    };

    for m in MILEAGE_COMMA_GROUPED.find_iter(text) {
        add(m.as_str());
    }
    for m in MILEAGE_DOT_GROUPED.find_iter(text) {
        add(m.as_str());
    }
    for run in scanner::digit_runs(text, MILEAGE_RUN_LENGTHS) {
        add(run);
    }
    for m in MILEAGE_WORD_BOUNDED.find_iter(text) {
        add(m.as_str());
    }
    for m in MILEAGE_ANY_DIGITS.find_iter(text) {
        add(m.as_str());
    }

    set.into_vec()
}

fn vin_candidates(text: &str) -> Vec<Candidate> {
    let mut set = CandidateSet::default();
    let mut add = |raw: &str| {
        let joined: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if joined.contains(VIN_FORBIDDEN) || !VIN_CANDIDATE_LENGTHS.contains(&joined.len()) {
            return;
        }
        set.insert(joined);
    };

    for m in VIN_EXACT.find_iter(text) {
        add(m.as_str());
    }
    for group in scanner::token_groups(text, VIN_GROUP_SIZES) {
        add(&group);
    }
    for m in VIN_NEAR_MISS.find_iter(text) {
        add(m.as_str());
    }

    set.into_vec()
}
