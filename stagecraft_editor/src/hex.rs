// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hex text input: filtering, digit caps, parsing and formatting.
//!
//! Field text only ever holds uppercase hex digits and ASCII whitespace, so
//! byte offsets and character offsets coincide.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::error::{EditError, HexInput};

/// Digits accepted by a type field.
pub const TYPE_DIGITS: usize = 4;

/// Uppercases `input` and drops everything except hex digits and ASCII
/// whitespace.
#[must_use]
pub fn filter_hex(input: &str) -> String {
    input
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_hexdigit() || c.is_ascii_whitespace())
        .collect()
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| !c.is_ascii_whitespace()).count()
}

/// Byte offset of the `n`-th digit of `s`, or `s.len()` if there are fewer.
fn digit_offset(s: &str, n: usize) -> usize {
    s.char_indices()
        .filter(|(_, c)| !c.is_ascii_whitespace())
        .nth(n)
        .map_or(s.len(), |(i, _)| i)
}

fn digits_only(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().filter(|c| !c.is_ascii_whitespace())
}

/// A text field that accepts hex digits up to a fixed count.
///
/// Edits are filtered rather than rejected: stray characters are dropped and
/// an insertion that would overflow the cap is cut to the digits that still
/// fit. Whitespace never counts toward the cap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HexField {
    text: String,
    max_digits: usize,
}

impl HexField {
    /// Creates an empty field holding at most `max_digits` digits.
    #[must_use]
    pub fn new(max_digits: usize) -> Self {
        Self {
            text: String::new(),
            max_digits,
        }
    }

    /// Creates an empty field for a 16-bit object type.
    #[must_use]
    pub fn for_type() -> Self {
        Self::new(TYPE_DIGITS)
    }

    /// Creates an empty field for `data_len` bytes of data.
    #[must_use]
    pub fn for_data(data_len: usize) -> Self {
        Self::new(data_len.saturating_mul(2))
    }

    /// Returns the current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the digit cap.
    #[must_use]
    pub fn max_digits(&self) -> usize {
        self.max_digits
    }

    /// Returns the number of digits in the field.
    #[must_use]
    pub fn digits(&self) -> usize {
        digit_count(&self.text)
    }

    /// Replaces the whole text, filtered and capped.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.replace(0..0, text);
    }

    /// Inserts `input` at byte offset `at`.
    pub fn insert(&mut self, at: usize, input: &str) -> bool {
        self.replace(at..at, input)
    }

    /// Removes the text in `range`.
    pub fn remove(&mut self, range: Range<usize>) -> bool {
        self.replace(range, "")
    }

    /// Replaces the text in `range` with `input`.
    ///
    /// `range` is clamped to the text. Returns `false` if the field was full
    /// and nothing changed.
    pub fn replace(&mut self, range: Range<usize>, input: &str) -> bool {
        let start = range.start.min(self.text.len());
        let end = range.end.clamp(start, self.text.len());
        let incoming = filter_hex(input);

        let current = digit_count(&self.text);
        let removed = digit_count(&self.text[start..end]);
        let kept = current - removed;

        let accepted = if kept + digit_count(&incoming) <= self.max_digits {
            incoming.as_str()
        } else if kept < self.max_digits {
            &incoming[..digit_offset(&incoming, self.max_digits - kept)]
        } else {
            return false;
        };
        self.text.replace_range(start..end, accepted);
        true
    }

    /// Parses the field as an object type. See [`parse_type`].
    pub fn parse_type(&self) -> Result<u16, EditError> {
        parse_type(&self.text)
    }

    /// Parses the field as `len` data bytes. See [`parse_data`].
    pub fn parse_data(&self, len: usize) -> Result<Vec<u8>, EditError> {
        parse_data(&self.text, len)
    }
}

/// Parses an object type from hex text.
///
/// Whitespace is ignored and empty input is `0`. More than four digits, or any
/// non-hex character, is [`EditError::MalformedHex`].
pub fn parse_type(text: &str) -> Result<u16, EditError> {
    let malformed = EditError::MalformedHex {
        input: HexInput::Type,
    };
    let mut value: u16 = 0;
    for (count, c) in digits_only(text).enumerate() {
        if count >= TYPE_DIGITS {
            return Err(malformed);
        }
        let nibble = nibble(c).ok_or_else(|| malformed.clone())?;
        value = (value << 4) | u16::from(nibble);
    }
    Ok(value)
}

/// Parses data bytes from hex text and sizes the result to exactly `len`.
///
/// - Whitespace is ignored; empty input reads as a single `0` digit.
/// - Digits pair up into bytes; a trailing odd digit becomes the high nibble
///   of the last byte.
/// - The bytes are truncated or zero-padded to `len`.
///
/// Any non-hex character is [`EditError::MalformedHex`].
pub fn parse_data(text: &str, len: usize) -> Result<Vec<u8>, EditError> {
    let mut bytes = Vec::with_capacity(len);
    let mut high: Option<u8> = None;
    for c in digits_only(text) {
        let n = nibble(c).ok_or(EditError::MalformedHex {
            input: HexInput::Data,
        })?;
        match high.take() {
            Some(h) => bytes.push((h << 4) | n),
            None => high = Some(n),
        }
    }
    if let Some(h) = high {
        bytes.push(h << 4);
    }
    if bytes.is_empty() {
        bytes.push(0);
    }
    bytes.resize(len, 0);
    Ok(bytes)
}

fn nibble(c: char) -> Option<u8> {
    c.to_digit(16).and_then(|d| u8::try_from(d).ok())
}

/// Formats a type as four lowercase hex digits, e.g. `00ab`.
#[must_use]
pub fn format_type(object_type: u16) -> String {
    format!("{object_type:04x}")
}

/// Formats data as lowercase byte pairs, each followed by a space.
#[must_use]
pub fn format_data(data: &[u8]) -> String {
    data.iter().map(|byte| format!("{byte:02x} ")).collect()
}

/// Formats an allocation address, e.g. `0xe140`.
#[must_use]
pub fn format_address(address: u16) -> String {
    format!("0x{address:04x}")
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn filter_uppercases_and_drops_junk() {
        assert_eq!(filter_hex("0x1f g-a\t9"), "01F A\t9");
    }

    #[test]
    fn overlong_insert_is_truncated_not_rejected() {
        let mut field = HexField::for_type();
        assert!(field.insert(0, "12 345678"));
        assert_eq!(field.text(), "12 34");
        assert!(!field.insert(5, "9"), "field is full");
        assert_eq!(field.text(), "12 34");
    }

    #[test]
    fn replacing_frees_capacity() {
        let mut field = HexField::for_type();
        field.set_text("abcd");
        assert_eq!(field.text(), "ABCD");
        assert!(field.replace(1..3, "0123"));
        assert_eq!(field.text(), "A01D");
        assert!(field.remove(0..2));
        assert_eq!(field.text(), "1D");
        assert_eq!(field.digits(), 2);
    }

    #[test]
    fn whitespace_does_not_count() {
        let mut field = HexField::for_data(2);
        field.set_text("00 11 22");
        assert_eq!(field.text(), "00 11 ");
        assert_eq!(field.digits(), 4);
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        let mut field = HexField::new(8);
        field.set_text("AB");
        assert!(field.insert(99, "cd"));
        assert_eq!(field.text(), "ABCD");
    }

    #[test]
    fn parse_type_defaults_and_limits() {
        assert_eq!(parse_type(""), Ok(0));
        assert_eq!(parse_type("  "), Ok(0));
        assert_eq!(parse_type("00 2a"), Ok(0x2A));
        assert_eq!(parse_type("ffff"), Ok(0xFFFF));
        assert_eq!(
            parse_type("12345"),
            Err(EditError::MalformedHex {
                input: HexInput::Type
            })
        );
        assert!(parse_type("zz").is_err());
    }

    #[test]
    fn parse_data_pads_truncates_and_keeps_high_nibble() {
        assert_eq!(parse_data("", 3), Ok(vec![0, 0, 0]));
        assert_eq!(parse_data("ab c", 3), Ok(vec![0xAB, 0xC0, 0]));
        assert_eq!(parse_data("01 02 03 04", 2), Ok(vec![1, 2]));
        assert!(parse_data("0g", 2).is_err());
    }

    #[test]
    fn formatting() {
        assert_eq!(format_type(0xAB), "00ab");
        assert_eq!(format_data(&[0x0F, 0xA0]), "0f a0 ");
        assert_eq!(format_data(&[0x01, 0xFF, 0x00]), "01 ff 00 ");
        assert_eq!(format_data(&[]), "");
        assert_eq!(format_address(0xE140), "0xe140");
    }
}
