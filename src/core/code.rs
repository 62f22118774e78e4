//! # Code Value
//!
//! The logical value behind the segmented input: an ordered run of slots,
//! each either a single decimal digit or empty.
//!
//! ```text
//! "1 34"  →  [Some(1), None, Some(3), Some(4)]
//! ```
//!
//! Empty slots are explicit (`None`) instead of a literal space, so a cleared
//! cell can never be confused with real input.

use std::fmt;

/// The number of cells the widget shows when nothing else is configured.
pub const DEFAULT_VALUE_LENGTH: usize = 4;

/// How an empty slot is written by `Display`.
pub const EMPTY_SLOT: char = '_';

/// A single decimal digit, `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Digit(d as u8))
    }

    /// Parses text that is exactly one decimal digit.
    ///
    /// Empty strings, multi-character strings and non-digits are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One cell's worth of content. `None` is the empty placeholder.
pub type Slot = Option<Digit>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodeValue {
    slots: Vec<Slot>,
}

impl CodeValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses text character by character. Digits become filled slots,
    /// anything else becomes an empty slot.
    pub fn parse(text: &str) -> Self {
        Self {
            slots: text.chars().map(Digit::from_char).collect(),
        }
    }

    /// Parses text that must consist solely of digits.
    pub fn from_digits(text: &str) -> Option<Self> {
        text.chars()
            .map(|c| Digit::from_char(c).map(Some))
            .collect::<Option<Vec<_>>>()
            .map(|slots| Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Slot {
        self.slots.get(index).copied().flatten()
    }

    /// Number of filled slots.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when the value holds exactly `value_length` digits.
    pub fn is_complete(&self, value_length: usize) -> bool {
        self.slots.len() == value_length && self.filled() == value_length
    }

    /// The code as plain digits, only when no slot is empty.
    pub fn digits(&self) -> Option<String> {
        self.slots
            .iter()
            .map(|s| s.map(Digit::as_char))
            .collect::<Option<String>>()
    }

    /// Returns a copy with slot `index` replaced.
    ///
    /// Positions past the current end are padded with empty slots; the prior
    /// length is preserved otherwise.
    pub fn with_slot(&self, index: usize, slot: Slot) -> Self {
        let mut slots = self.slots.clone();
        if index >= slots.len() {
            slots.resize(index + 1, None);
        }
        slots[index] = slot;
        Self { slots }
    }

    /// Drops slots beyond `value_length`.
    pub fn truncated(mut self, value_length: usize) -> Self {
        self.slots.truncate(value_length);
        self
    }
}

impl fmt::Display for CodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            match slot {
                Some(d) => write!(f, "{d}")?,
                None => write!(f, "{EMPTY_SLOT}")?,
            }
        }
        Ok(())
    }
}

/// Derives the per-cell contents the widget displays.
///
/// Always returns exactly `value_length` entries. Entry `i` is slot `i` of
/// `value` when it exists and holds a digit, otherwise empty.
pub fn derive_cells(value: &CodeValue, value_length: usize) -> Vec<Slot> {
    (0..value_length).map(|i| value.slot(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: u8) -> Slot {
        Some(Digit(n))
    }

    #[test]
    fn test_digit_pattern() {
        assert_eq!(Digit::parse("0"), Some(Digit(0)));
        assert_eq!(Digit::parse("9").map(Digit::as_char), Some('9'));
        assert_eq!(Digit::parse(""), None);
        assert_eq!(Digit::parse("12"), None);
        assert_eq!(Digit::parse("a"), None);
        assert_eq!(Digit::parse(" "), None);
        assert_eq!(Digit::parse("٣"), None, "only ASCII decimal digits are accepted");
    }

    #[test]
    fn test_parse_keeps_positions() {
        let value = CodeValue::parse("1 34");
        assert_eq!(derive_cells(&value, 4), vec![d(1), None, d(3), d(4)]);
        assert_eq!(value.to_string(), "1_34");
        assert_eq!(value.digits(), None);
    }

    #[test]
    fn test_from_digits_rejects_non_digits() {
        assert_eq!(CodeValue::from_digits("9876").unwrap().digits().as_deref(), Some("9876"));
        assert!(CodeValue::from_digits("98x6").is_none());
    }

    #[test]
    fn test_derive_cells_pads_to_length() {
        let cells = derive_cells(&CodeValue::parse("12"), 4);
        assert_eq!(cells, vec![d(1), d(2), None, None]);
    }

    #[test]
    fn test_derive_cells_ignores_extra_and_non_digits() {
        assert_eq!(derive_cells(&CodeValue::parse("1a345"), 4), vec![d(1), None, d(3), d(4)]);
        assert!(derive_cells(&CodeValue::parse("123"), 0).is_empty());
    }

    #[test]
    fn test_derive_cells_length_invariant() {
        for text in ["", "1", "12x", "99999999", " 1 "] {
            for n in 0..8 {
                let cells = derive_cells(&CodeValue::parse(text), n);
                assert_eq!(cells.len(), n, "value {text:?}, length {n}");
            }
        }
    }

    #[test]
    fn test_with_slot_replaces_in_place() {
        let value = CodeValue::parse("1234").with_slot(1, None);
        assert_eq!(value.to_string(), "1_34");
        assert_eq!(value.len(), 4);
    }

    #[test]
    fn test_with_slot_extends_short_value() {
        let value = CodeValue::parse("12").with_slot(2, Digit::from_char('3'));
        assert_eq!(value.digits().as_deref(), Some("123"));

        let gapped = CodeValue::new().with_slot(2, Digit::from_char('7'));
        assert_eq!(gapped.to_string(), "__7");
    }

    #[test]
    fn test_is_complete() {
        assert!(CodeValue::parse("1234").is_complete(4));
        assert!(!CodeValue::parse("123").is_complete(4));
        assert!(!CodeValue::parse("12 4").is_complete(4));
        assert!(!CodeValue::parse("12345").is_complete(4));
    }

    #[test]
    fn test_truncated() {
        assert_eq!(CodeValue::parse("123456").truncated(4).to_string(), "1234");
    }
}
