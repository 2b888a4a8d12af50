//! Run scanner over normalized text.
//!
//! Splits text into maximal runs of digits, ASCII letters and everything
//! else. A maximal digit run is exactly what `(?<!\d)\d+(?!\d)` would match.

use std::ops::RangeInclusive;

/// Character class of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Digit,
    Letter,
    Separator,
}

impl RunKind {
    fn of(c: char) -> Self {
        if c.is_ascii_digit() {
            Self::Digit
        } else if c.is_ascii_alphabetic() {
            Self::Letter
        } else {
            Self::Separator
        }
    }
}

/// A maximal run of same-class characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<'a> {
    pub kind: RunKind,
    pub text: &'a str,
    /// Byte offset in the scanned text.
    pub start: usize,
}

impl Run<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Iterator over the runs of a string.
pub struct Runs<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Run<'a>> {
        let rest = &self.text[self.pos..];
        let kind = RunKind::of(rest.chars().next()?);

        let len = rest
            .char_indices()
            .find(|(_, c)| RunKind::of(*c) != kind)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());

        let run = Run {
            kind,
            text: &rest[..len],
            start: self.pos,
        };
        self.pos += len;
        Some(run)
    }
}

/// Scan `text` into runs.
pub fn runs(text: &str) -> Runs<'_> {
    Runs { text, pos: 0 }
}

/// Maximal digit runs whose length falls in `lengths`.
pub fn digit_runs(text: &str, lengths: RangeInclusive<usize>) -> impl Iterator<Item = &str> {
    runs(text)
        .filter(|r| r.kind == RunKind::Digit)
        .map(|r| r.text)
        .filter(move |t| lengths.contains(&t.len()))
}

/// Alphanumeric tokens: consecutive digit and letter runs up to a separator.
pub fn alphanumeric_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for run in runs(text) {
        current = match (run.kind, current) {
            (RunKind::Separator, Some((start, end))) => {
                tokens.push(&text[start..end]);
                None
            }
            (RunKind::Separator, None) => None,
            (_, Some((start, _))) => Some((start, run.end())),
            (_, None) => Some((run.start, run.end())),
        };
    }

    if let Some((start, end)) = current {
        tokens.push(&text[start..end]);
    }

    tokens
}

/// Concatenations of consecutive tokens, for every window size in `sizes`.
///
/// Windows are produced left to right, smallest size first at each start.
pub fn token_groups(text: &str, sizes: RangeInclusive<usize>) -> Vec<String> {
    let tokens = alphanumeric_tokens(text);
    let mut groups = Vec::new();

    for start in 0..tokens.len() {
        for size in sizes.clone() {
            if size == 0 || start + size > tokens.len() {
                continue;
            }
            groups.push(tokens[start..start + size].concat());
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_runs_classify_characters() {
        let kinds: Vec<(RunKind, &str)> = runs("AB12 ,3").map(|r| (r.kind, r.text)).collect();
        assert_eq!(
            kinds,
            vec![
                (RunKind::Letter, "AB"),
                (RunKind::Digit, "12"),
                (RunKind::Separator, " ,"),
                (RunKind::Digit, "3"),
            ]
        );
    }

    #[test]
    fn test_digit_runs_are_maximal() {
        let found: Vec<&str> = digit_runs("123456789 4567 12,3456", 4..=8).collect();
        assert_eq!(found, vec!["4567", "3456"]);
    }

    #[test]
    fn test_digit_runs_touch_string_edges() {
        let found: Vec<&str> = digit_runs("1234", 4..=8).collect();
        assert_eq!(found, vec!["1234"]);
    }

    #[test]
    fn test_alphanumeric_tokens() {
        assert_eq!(alphanumeric_tokens(" VIN 1HGBH 41JXM "), vec!["VIN", "1HGBH", "41JXM"]);
        assert!(alphanumeric_tokens("   ").is_empty());
    }

    #[test]
    fn test_token_groups() {
        let groups = token_groups("AB CD EF", 2..=3);
        assert_eq!(groups, vec!["ABCD", "ABCDEF", "CDEF"]);
    }

    #[test]
    fn test_token_groups_of_four() {
        let groups = token_groups("AB CD EF GH", 3..=4);
        assert_eq!(groups, vec!["ABCDEF", "ABCDEFGH", "CDEFGH"]);
    }
}
