//! Core library for vehicle document OCR field inference.
//!
//! This crate provides:
//! - Text normalization for noisy recognizer output
//! - Candidate generation, scoring and ranking for VINs and odometer readings
//! - Confidence classification of the chosen value
//! - VIN check digit and distance unit helpers
//! - Configuration shared by the CLI and bindings

pub mod error;
pub mod extract;
pub mod models;

pub use error::{FieldreadError, Result};
pub use extract::{
    extract, extract_from_lines, extract_mileage, extract_vin, CandidateGenerator,
    CandidateScorer, FieldExtractor, MileageExtractor, ResultClassifier, TextNormalizer,
    VinExtractor,
};
pub use models::config::FieldreadConfig;
pub use models::result::{Candidate, ConfidenceTier, ExtractionResult, FieldKind, FieldValue};
