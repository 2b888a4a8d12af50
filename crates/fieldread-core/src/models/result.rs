//! Extraction result types shared by both field kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldreadError;

/// The field a piece of OCR text is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Odometer / mileage reading.
    Mileage,
    /// 17-character Vehicle Identification Number.
    Vin,
}

impl FieldKind {
    /// Lowercase name used in config files and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mileage => "mileage",
            Self::Vin => "vin",
        }
    }
}

impl FromStr for FieldKind {
    type Err = FieldreadError;

    /// Parse from a name such as "vin" or "mileage".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mileage" | "odometer" | "odo" => Ok(Self::Mileage),
            "vin" => Ok(Self::Vin),
            _ => Err(FieldreadError::Config(format!("unknown field kind: {}", s))),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse trust level of an extracted value.
///
/// Ordered `Low < Medium < High` so callers can compare against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    #[default]
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized token that syntactically matches one of the field patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters. Candidates are always ASCII.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An extracted value whose kind is only known at run time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Mileage(u64),
    Vin(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Mileage(_) => FieldKind::Mileage,
            Self::Vin(_) => FieldKind::Vin,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mileage(n) => write!(f, "{}", n),
            Self::Vin(vin) => f.write_str(vin),
        }
    }
}

/// Outcome of one extraction call.
///
/// Every input, including empty or garbage text, produces a well-formed
/// result; the worst case is `value: None` with `Low` confidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult<T> {
    /// Chosen value, if any candidate qualified.
    pub value: Option<T>,

    /// Confidence in `value`.
    pub confidence: ConfidenceTier,

    /// Text after normalization for the requested field.
    pub normalized_text: String,

    /// All candidates in discovery order.
    pub candidates: Vec<Candidate>,
}

impl<T> ExtractionResult<T> {
    /// Result with no value and `Low` confidence.
    pub fn empty(normalized_text: impl Into<String>) -> Self {
        Self {
            value: None,
            confidence: ConfidenceTier::Low,
            normalized_text: normalized_text.into(),
            candidates: Vec::new(),
        }
    }

    /// Whether a caller should ask the user to verify or re-capture.
    pub fn needs_verification(&self, threshold: ConfidenceTier) -> bool {
        self.value.is_none() || self.confidence < threshold
    }

    /// Map the value, keeping everything else.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionResult<U> {
        ExtractionResult {
            value: self.value.map(f),
            confidence: self.confidence,
            normalized_text: self.normalized_text,
            candidates: self.candidates,
        }
    }
}
