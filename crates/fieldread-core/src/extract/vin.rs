//! VIN check digit (position 9) computation and validation.
//!
//! Only North American VINs are required to carry a valid check digit, so
//! this is reported alongside a result and never changes its confidence.

use super::scoring::VIN_LENGTH;

/// Position weights for the check digit sum.
const WEIGHTS: [u32; VIN_LENGTH] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

/// Index of the check digit.
const CHECK_POSITION: usize = 8;

/// Numeric value of a VIN character.
fn transliterate(c: char) -> Option<u32> {
    let value = match c {
        '0'..='9' => c.to_digit(10)?,
        'A' | 'J' => 1,
        'B' | 'K' | 'S' => 2,
        'C' | 'L' | 'T' => 3,
        'D' | 'M' | 'U' => 4,
        'E' | 'N' | 'V' => 5,
        'F' | 'W' => 6,
        'G' | 'P' | 'X' => 7,
        'H' | 'Y' => 8,
        'R' | 'Z' => 9,
        _ => return None,
    };
    Some(value)
}

/// Compute the expected check digit for a 17-character VIN.
///
/// Returns `None` when the input has the wrong length or contains a
/// character that cannot appear in a VIN.
pub fn check_digit(vin: &str) -> Option<char> {
    if vin.len() != VIN_LENGTH {
        return None;
    }

    let mut sum = 0;
    for (c, weight) in vin.chars().zip(WEIGHTS) {
        sum += transliterate(c)? * weight;
    }

    match sum % 11 {
        10 => Some('X'),
        r => char::from_digit(r, 10),
    }
}

/// Whether the VIN's ninth character matches its computed check digit.
pub fn has_valid_check_digit(vin: &str) -> bool {
    match check_digit(vin) {
        Some(expected) => vin.chars().nth(CHECK_POSITION) == Some(expected),
        None => false,
    }
}
