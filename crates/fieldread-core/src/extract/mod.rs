//! Field inference over OCR text.
//!
//! Every extraction runs the same stages, parameterized by [`FieldKind`]:
//! normalize, generate candidates, score and rank, classify confidence.
//! Nothing is kept between calls, so extractors can be shared freely
//! across threads.

mod candidates;
mod classify;
mod normalize;
pub mod patterns;
pub mod scanner;
mod scoring;
pub mod units;
pub mod vin;

pub use candidates::{CandidateGenerator, VIN_CANDIDATE_LENGTHS};
pub use classify::ResultClassifier;
pub use normalize::{normalize, TextNormalizer};
pub use scoring::{
    is_well_formed_vin, parse_mileage, score_mileage, score_vin, CandidateScorer,
    PLAUSIBLE_MILEAGE, TYPICAL_MILEAGE, VIN_LENGTH,
};
pub use units::{detect_distance_unit, DistanceUnit};
pub use vin::{check_digit, has_valid_check_digit};

use tracing::{debug, trace};

use crate::models::result::{Candidate, ExtractionResult, FieldKind, FieldValue};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// The field this extractor looks for.
    fn kind(&self) -> FieldKind;

    /// Extract the field from the text of one captured frame.
    fn extract(&self, raw: &str) -> ExtractionResult<Self::Output>;

    /// Extract the field from the lines a text recognizer returned.
    fn extract_lines<S: AsRef<str>>(&self, lines: &[S]) -> ExtractionResult<Self::Output>
    where
        Self: Sized,
    {
        self.extract(&join_lines(lines))
    }
}

/// Odometer / mileage extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct MileageExtractor;

impl MileageExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for MileageExtractor {
    type Output = u64;

    fn kind(&self) -> FieldKind {
        FieldKind::Mileage
    }

    fn extract(&self, raw: &str) -> ExtractionResult<u64> {
        let (normalized, candidates) = prepare(raw, self.kind());
        let result = ResultClassifier::new().classify_mileage(candidates, normalized);
        log_result(self.kind(), &result);
        result
    }
}

/// VIN extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct VinExtractor;

impl VinExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for VinExtractor {
    type Output = String;

    fn kind(&self) -> FieldKind {
        FieldKind::Vin
    }

    fn extract(&self, raw: &str) -> ExtractionResult<String> {
        let (normalized, candidates) = prepare(raw, self.kind());
        let result = ResultClassifier::new().classify_vin(candidates, normalized);
        log_result(self.kind(), &result);
        result
    }
}

/// Normalize and generate candidates.
fn prepare(raw: &str, kind: FieldKind) -> (String, Vec<Candidate>) {
    let normalized = TextNormalizer::new().normalize(raw, kind);
    trace!("Normalized {} chars to {:?} for {}", raw.len(), normalized, kind);

    let candidates = CandidateGenerator::new().generate(&normalized, kind);
    trace!("Generated {} {} candidates", candidates.len(), kind);

    (normalized, candidates)
}

fn log_result<T: std::fmt::Debug>(kind: FieldKind, result: &ExtractionResult<T>) {
    debug!(
        "Extracted {} {:?} with {} confidence from {} candidates",
        kind,
        result.value,
        result.confidence,
        result.candidates.len()
    );
}

fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join("\n")
}

/// Extract an odometer reading from raw OCR text.
pub fn extract_mileage(raw_text: &str) -> ExtractionResult<u64> {
    MileageExtractor::new().extract(raw_text)
}

/// Extract a VIN from raw OCR text.
pub fn extract_vin(raw_text: &str) -> ExtractionResult<String> {
    VinExtractor::new().extract(raw_text)
}

/// Extract a field chosen at run time.
pub fn extract(raw_text: &str, kind: FieldKind) -> ExtractionResult<FieldValue> {
    match kind {
        FieldKind::Mileage => extract_mileage(raw_text).map(FieldValue::Mileage),
        FieldKind::Vin => extract_vin(raw_text).map(FieldValue::Vin),
    }
}

/// Extract a field from recognizer output lines.
pub fn extract_from_lines<S: AsRef<str>>(lines: &[S], kind: FieldKind) -> ExtractionResult<FieldValue> {
    extract(&join_lines(lines), kind)
}
