//! Task directory naming.
//!
//! A task directory is named `<date prefix>-<label>`. The date prefix is
//! the calendar day, optionally followed by a disambiguation suffix for
//! the second and later tasks started that day:
//!
//! ```text
//! 2026-10-14-fix-login       disambiguator 0
//! 2026-10-14b-fix-login      disambiguator 1
//! 2026-10-14y-fix-login      disambiguator 24
//! 2026-10-14z027-fix-login   disambiguator 25 (escape: disambiguator + 2)
//! ```
//!
//! The escape ordinal is `disambiguator + 2`, so the first escaped task
//! (the 26th of the day) is `z027`, not `z026`. Escapes are only valid in
//! this canonical form: `z000`..`z026` would collide with the letter range
//! and padded variants such as `z0027` with their shorter spelling, so the
//! parser rejects both.
//!
//! Lexicographic order of prefixes matches disambiguator order up to
//! [`MAX_SORTED_DISAMBIGUATOR`] (`z999`), so a sorted directory listing
//! reads as chronological order. `z1000` would sort before `z999`.

use chrono::NaiveDate;

/// Separator between the date prefix and the label.
pub const LABEL_SEPARATOR: char = '-';

/// Highest disambiguator written as a single letter (`y`).
pub const MAX_LETTER_DISAMBIGUATOR: u32 = 24;

/// Highest disambiguator whose prefix still sorts after every lower one.
pub const MAX_SORTED_DISAMBIGUATOR: u32 = 997;

/// Marker for the numeric escape form.
const ESCAPE_MARKER: char = 'z';

/// Minimum digit count of the escape ordinal.
const ESCAPE_MIN_WIDTH: usize = 3;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

/// A task directory name split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub date_prefix: String,
    pub label: String,
    date: NaiveDate,
    disambiguator: u32,
}

impl ParsedName {
    /// Calendar date with any disambiguation suffix stripped.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn disambiguator(&self) -> u32 {
        self.disambiguator
    }

    /// Full directory name, `<date prefix>-<label>`.
    pub fn directory_name(&self) -> String {
        directory_name(&self.date_prefix, &self.label)
    }
}

/// Format the date prefix for the `disambiguator`-th task of `date`.
pub fn format_date_prefix(date: NaiveDate, disambiguator: u32) -> String {
    let day = date.format(DATE_FORMAT);
    match disambiguator {
        0 => day.to_string(),
        1..=MAX_LETTER_DISAMBIGUATOR => {
            // 1 -> 'b', 24 -> 'y'
            let letter = char::from(b'a' + disambiguator as u8);
            format!("{day}{letter}")
        }
        _ => {
            let ordinal = u64::from(disambiguator) + 2;
            format!("{day}{ESCAPE_MARKER}{ordinal:0width$}", width = ESCAPE_MIN_WIDTH)
        }
    }
}

/// Join a date prefix and a label into a directory name.
pub fn directory_name(date_prefix: &str, label: &str) -> String {
    format!("{date_prefix}{LABEL_SEPARATOR}{label}")
}

/// Parse a task directory name.
///
/// Returns `None` for anything outside the grammar
/// `date ( "-" | [b-y] "-" | "z" digit{3,} "-" ) label`; such entries are
/// simply not tasks.
pub fn parse_directory_name(name: &str) -> Option<ParsedName> {
    let day = name.get(..DATE_LEN)?;
    let date = parse_day(day)?;
    let rest = &name[DATE_LEN..];

    let (suffix, disambiguator) = split_suffix(rest)?;
    let label = rest[suffix.len()..].strip_prefix(LABEL_SEPARATOR)?;
    if label.is_empty() {
        return None;
    }

    Some(ParsedName {
        date_prefix: format!("{day}{suffix}"),
        label: label.to_string(),
        date,
        disambiguator,
    })
}

/// Strict `YYYY-MM-DD`; chrono alone would also accept unpadded fields.
fn parse_day(day: &str) -> Option<NaiveDate> {
    let shape_ok = day.bytes().enumerate().all(|(idx, byte)| match idx {
        4 | 7 => byte == b'-',
        _ => byte.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// Split the disambiguation suffix off the text following the date.
fn split_suffix(rest: &str) -> Option<(&str, u32)> {
    let first = rest.chars().next()?;
    match first {
        LABEL_SEPARATOR => Some(("", 0)),
        'b'..='y' => Some((&rest[..1], u32::from(first as u8 - b'a'))),
        ESCAPE_MARKER => {
            let digits = rest[1..]
                .bytes()
                .take_while(|byte| byte.is_ascii_digit())
                .count();
            if digits < ESCAPE_MIN_WIDTH {
                return None;
            }
            let suffix = &rest[..1 + digits];
            let ordinal: u64 = suffix[1..].parse().ok()?;
            let disambiguator = u32::try_from(ordinal.checked_sub(2)?).ok()?;
            if disambiguator <= MAX_LETTER_DISAMBIGUATOR {
                return None;
            }
            // Only the spelling format_date_prefix would produce.
            if format!("{ordinal:0width$}", width = ESCAPE_MIN_WIDTH) != suffix[1..] {
                return None;
            }
            Some((suffix, disambiguator))
        }
        _ => None,
    }
}
