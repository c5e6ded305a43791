//! Number parsing for hand-typed log fields.
//!
//! Logs are usually typed through a Japanese IME, which produces full-width
//! digits (`１０`, `７/１４`). Those parse exactly like their ASCII forms.

use std::borrow::Cow;
use std::str::FromStr;

const FULLWIDTH_ZERO: char = '０';
const FULLWIDTH_NINE: char = '９';

fn ascii_digit(c: char) -> char {
    if (FULLWIDTH_ZERO..=FULLWIDTH_NINE).contains(&c) {
        char::from_digit(c as u32 - FULLWIDTH_ZERO as u32, 10).unwrap_or(c)
    } else {
        c
    }
}

/// Replaces full-width digits with ASCII digits, borrowing when none occur.
pub fn to_ascii_digits(raw: &str) -> Cow<'_, str> {
    if raw.contains(|c: char| (FULLWIDTH_ZERO..=FULLWIDTH_NINE).contains(&c)) {
        Cow::Owned(raw.chars().map(ascii_digit).collect())
    } else {
        Cow::Borrowed(raw)
    }
}

/// Parses a decimal number, ignoring surrounding whitespace and accepting
/// full-width digits.
pub fn parse_decimal<T: FromStr>(raw: &str) -> Result<T, T::Err> {
    to_ascii_digits(raw.trim()).parse()
}
