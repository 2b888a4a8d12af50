//! Distance unit detection for odometer text.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::patterns::DISTANCE_UNIT;

/// Unit an odometer reading is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    Kilometers,
    Miles,
}

impl DistanceUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Kilometers => "km",
            Self::Miles => "mi",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Detect the first distance unit mentioned in raw OCR text.
///
/// Works on the raw text since normalization strips letters.
pub fn detect_distance_unit(raw: &str) -> Option<DistanceUnit> {
    let caps = DISTANCE_UNIT.captures(raw)?;
    let word = caps.get(1)?.as_str().to_lowercase();

    if word.starts_with('k') {
        Some(DistanceUnit::Kilometers)
    } else {
        Some(DistanceUnit::Miles)
    }
}
