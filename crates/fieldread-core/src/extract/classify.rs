//! Best-candidate selection and confidence classification.

use std::cmp::Reverse;

use tracing::trace;

use super::scoring::{
    is_well_formed_vin, parse_mileage, CandidateScorer, PLAUSIBLE_MILEAGE, TYPICAL_MILEAGE,
    VIN_LENGTH,
};
use crate::models::result::{
    Candidate, ConfidenceTier, ExtractionResult, FieldKind, FieldValue,
};

/// Picks the value and confidence tier from a candidate list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultClassifier {
    scorer: CandidateScorer,
}

impl ResultClassifier {
    pub fn new() -> Self {
        Self {
            scorer: CandidateScorer::new(),
        }
    }

    /// Classify candidates for a field chosen at run time.
    pub fn classify(
        &self,
        candidates: Vec<Candidate>,
        kind: FieldKind,
        normalized_text: String,
    ) -> ExtractionResult<FieldValue> {
        match kind {
            FieldKind::Mileage => self
                .classify_mileage(candidates, normalized_text)
                .map(FieldValue::Mileage),
            FieldKind::Vin => self
                .classify_vin(candidates, normalized_text)
                .map(FieldValue::Vin),
        }
    }

    /// Choose the most plausible odometer reading.
    pub fn classify_mileage(
        &self,
        candidates: Vec<Candidate>,
        normalized_text: String,
    ) -> ExtractionResult<u64> {
        let mut plausible: Vec<(u64, i64)> = candidates
            .iter()
            .filter_map(|c| {
                parse_mileage(c.as_str())
                    .filter(|n| PLAUSIBLE_MILEAGE.contains(n))
                    .map(|n| (n, self.scorer.score(c, FieldKind::Mileage)))
            })
            .collect();

        // Stable: equal scores keep discovery order.
        plausible.sort_by_key(|&(_, score)| Reverse(score));
        trace!("Ranked plausible mileage candidates: {:?}", plausible);

        let (value, confidence) = match plausible.as_slice() {
            [] => {
                let fallback = candidates
                    .iter()
                    .filter_map(|c| parse_mileage(c.as_str()))
                    .filter(|n| *n <= *PLAUSIBLE_MILEAGE.end())
                    .max();
                (fallback, ConfidenceTier::Low)
            }
            [(n, _)] => {
                let confidence = if TYPICAL_MILEAGE.contains(n) {
                    ConfidenceTier::High
                } else {
                    ConfidenceTier::Medium
                };
                (Some(*n), confidence)
            }
            [(n, top), (_, second), ..] => {
                // top > 1.5 * second, kept in integers
                let confidence = if 2 * top > 3 * second {
                    ConfidenceTier::High
                } else {
                    ConfidenceTier::Medium
                };
                (Some(*n), confidence)
            }
        };

        ExtractionResult {
            value,
            confidence,
            normalized_text,
            candidates,
        }
    }

    /// Choose the VIN.
    pub fn classify_vin(
        &self,
        candidates: Vec<Candidate>,
        normalized_text: String,
    ) -> ExtractionResult<String> {
        let exact: Vec<&Candidate> = candidates.iter().filter(|c| c.len() == VIN_LENGTH).collect();

        let (value, confidence) = match exact.as_slice() {
            [only] => {
                let confidence = if is_well_formed_vin(only.as_str()) {
                    ConfidenceTier::High
                } else {
                    ConfidenceTier::Medium
                };
                (Some(only.to_string()), confidence)
            }
            // Several exact matches cannot be told apart.
            [first, ..] => (Some(first.to_string()), ConfidenceTier::Medium),
            [] => {
                let mut ranked: Vec<&Candidate> = candidates.iter().collect();
                ranked.sort_by_key(|c| Reverse(self.scorer.score(c, FieldKind::Vin)));

                let value = ranked
                    .first()
                    .filter(|c| c.len() == VIN_LENGTH)
                    .map(|c| c.to_string());
                (value, ConfidenceTier::Low)
            }
        };

        ExtractionResult {
            value,
            confidence,
            normalized_text,
            candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidates(values: &[&str]) -> Vec<Candidate> {
        values.iter().map(|v| Candidate::new(*v)).collect()
    }

    #[test]
    fn test_mileage_single_typical_is_high() {
        let result = ResultClassifier::new().classify_mileage(candidates(&["160648"]), "160648".into());
        assert_eq!(result.value, Some(160_648));
        assert_eq!(result.confidence, ConfidenceTier::High);
    }

    #[test]
    fn test_mileage_single_atypical_is_medium() {
        let result = ResultClassifier::new().classify_mileage(candidates(&["750000"]), String::new());
        assert_eq!(result.value, Some(750_000));
        assert_eq!(result.confidence, ConfidenceTier::Medium);

        let result = ResultClassifier::new().classify_mileage(candidates(&["456"]), String::new());
        assert_eq!(result.confidence, ConfidenceTier::Medium);
    }

    #[test]
    fn test_mileage_clear_winner_is_high() {
        // 140 vs 25
        let result =
            ResultClassifier::new().classify_mileage(candidates(&["123", "123456", "456"]), String::new());
        assert_eq!(result.value, Some(123_456));
        assert_eq!(result.confidence, ConfidenceTier::High);
    }

    #[test]
    fn test_mileage_close_scores_are_medium() {
        // 140 vs 130
        let result =
            ResultClassifier::new().classify_mileage(candidates(&["45000", "123456"]), String::new());
        assert_eq!(result.value, Some(123_456));
        assert_eq!(result.confidence, ConfidenceTier::Medium);
    }

    #[test]
    fn test_mileage_ties_keep_discovery_order() {
        // Both score 140.
        let result =
            ResultClassifier::new().classify_mileage(candidates(&["150000", "123456"]), String::new());
        assert_eq!(result.value, Some(150_000));
        assert_eq!(result.confidence, ConfidenceTier::Medium);
    }

    #[test]
    fn test_mileage_last_resort_takes_max() {
        let result = ResultClassifier::new()
            .classify_mileage(candidates(&["12", "99", "12345678"]), String::new());
        assert_eq!(result.value, Some(99));
        assert_eq!(result.confidence, ConfidenceTier::Low);
    }

    #[test]
    fn test_mileage_no_candidates() {
        let result = ResultClassifier::new().classify_mileage(Vec::new(), String::new());
        assert_eq!(result.value, None);
        assert_eq!(result.confidence, ConfidenceTier::Low);

        let result = ResultClassifier::new().classify_mileage(candidates(&["12345678"]), String::new());
        assert_eq!(result.value, None);
        assert_eq!(result.confidence, ConfidenceTier::Low);
    }

    #[test]
    fn test_vin_single_well_formed_is_high() {
        let result =
            ResultClassifier::new().classify_vin(candidates(&["1HGBH41JXMN109186"]), String::new());
        assert_eq!(result.value.as_deref(), Some("1HGBH41JXMN109186"));
        assert_eq!(result.confidence, ConfidenceTier::High);
    }

    #[test]
    fn test_vin_single_degenerate_is_medium() {
        let result =
            ResultClassifier::new().classify_vin(candidates(&["11111111111111111"]), String::new());
        assert_eq!(result.value.as_deref(), Some("11111111111111111"));
        assert_eq!(result.confidence, ConfidenceTier::Medium);
    }

    #[test]
    fn test_vin_multiple_exact_is_medium_first_wins() {
        let result = ResultClassifier::new().classify_vin(
            candidates(&["1HGBH41JX", "1HGBH41JXMN109186", "2T1BURHE0JC043821"]),
            String::new(),
        );
        assert_eq!(result.value.as_deref(), Some("1HGBH41JXMN109186"));
        assert_eq!(result.confidence, ConfidenceTier::Medium);
    }

    #[test]
    fn test_vin_without_exact_match_has_no_value() {
        let result = ResultClassifier::new()
            .classify_vin(candidates(&["1HGBH41JXMN10918", "1HGBH41JXMN1091861A"]), String::new());
        assert_eq!(result.value, None);
        assert_eq!(result.confidence, ConfidenceTier::Low);
        assert_eq!(result.candidates.len(), 2);
    }

    #[test]
    fn test_classify_wraps_field_value() {
        let result = ResultClassifier::new().classify(
            candidates(&["160648"]),
            FieldKind::Mileage,
            "160648".into(),
        );
        assert_eq!(result.value, Some(FieldValue::Mileage(160_648)));
        assert_eq!(result.normalized_text, "160648");
    }
}
