//! Text normalization per target alphabet.

use crate::models::result::FieldKind;

/// Cleans raw OCR text down to the characters a field can contain.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize `raw` for the given field.
    ///
    /// Never fails: empty or whitespace-only input yields an empty string.
    pub fn normalize(&self, raw: &str, kind: FieldKind) -> String {
        match kind {
            FieldKind::Mileage => normalize_mileage(raw),
            FieldKind::Vin => normalize_vin(raw),
        }
    }
}

/// Normalize text for the given field.
pub fn normalize(raw: &str, kind: FieldKind) -> String {
    TextNormalizer::new().normalize(raw, kind)
}

fn normalize_mileage(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_whitespace() || *c == '.' || *c == ',')
        .collect();

    collapse_whitespace(&merge_split_digits(&kept))
}

fn normalize_vin(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .map(|c| if c.is_ascii_uppercase() || c.is_ascii_digit() { c } else { ' ' })
        .collect();

    collapse_whitespace(&cleaned)
}

/// Drop every whitespace run that sits between two digits.
///
/// This is the fixed point of repeatedly rewriting `digit, whitespace+, digit`
/// into the two digits joined, so `"1 60 648"` becomes `"160648"`.
fn merge_split_digits(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut merged = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_whitespace() {
            merged.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }

        let between_digits = start > 0
            && chars[start - 1].is_ascii_digit()
            && i < chars.len()
            && chars[i].is_ascii_digit();

        if !between_digits {
            merged.extend(&chars[start..i]);
        }
    }

    merged
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mileage_merges_split_digits() {
        assert_eq!(normalize("1 60648", FieldKind::Mileage), "160648");
        assert_eq!(normalize("1  6\t0 648 km", FieldKind::Mileage), "160648");
    }

    #[test]
    fn test_mileage_keeps_separators() {
        assert_eq!(normalize("Odometer: 123,456 mi", FieldKind::Mileage), "123,456");
        assert_eq!(normalize("ODO 98.765 km", FieldKind::Mileage), "98.765");
    }

    #[test]
    fn test_mileage_merges_across_stripped_words() {
        assert_eq!(normalize("Trip 12 Odo 345", FieldKind::Mileage), "12345");
    }

    #[test]
    fn test_mileage_does_not_merge_across_punctuation() {
        assert_eq!(normalize("12, 345", FieldKind::Mileage), "12, 345");
    }

    #[test]
    fn test_vin_uppercases_and_splits() {
        assert_eq!(
            normalize("vin: 1hgbh41jxmn109186 / reg", FieldKind::Vin),
            "VIN 1HGBH41JXMN109186 REG"
        );
        assert_eq!(normalize("1HGBH-41JXM\nN109186", FieldKind::Vin), "1HGBH 41JXM N109186");
    }

    #[test]
    fn test_vin_drops_non_ascii_letters() {
        assert_eq!(normalize("ÄB ß12", FieldKind::Vin), "B 12");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize("", FieldKind::Mileage), "");
        assert_eq!(normalize(" \n\t ", FieldKind::Vin), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let samples = [
            "Odometer: 123,456 mi",
            "1 6 0 6 4 8",
            "VIN 1HGBH 41JXM N109186 REG",
            "  km 45.000 , 12 ",
            "",
        ];

        for kind in [FieldKind::Mileage, FieldKind::Vin] {
            for sample in samples {
                let once = normalize(sample, kind);
                assert_eq!(normalize(&once, kind), once, "{:?} / {:?}", kind, sample);
            }
        }
    }

    #[test]
    fn test_output_never_longer_than_input() {
        for sample in ["ß ß ß", "a  1  b", "1 2 3 4"] {
            for kind in [FieldKind::Mileage, FieldKind::Vin] {
                assert!(normalize(sample, kind).chars().count() <= sample.chars().count());
            }
        }
    }
}
