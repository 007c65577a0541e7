//! Day-first date parsing for the source date columns.

use chrono::NaiveDate;

/// Outcome of parsing a non-null date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// A valid calendar date.
    Date(NaiveDate),
    /// The cell could not be interpreted as `DDMMYY` or `DDMMYYYY`.
    Unparseable,
}

/// Parse a day-first date written with or without `/` separators.
///
/// After removing `/`, six digits read as `DDMMYY` and eight digits as `DDMMYYYY`; any other
/// shape is [`ParsedDate::Unparseable`]. A null input stays null.
///
/// Malformed four-digit years such as `"1/2/19855"` are left alone: no century correction
/// is attempted.
pub fn parse_date(raw: Option<&str>) -> Option<ParsedDate> {
    let raw = raw?;
    let digits: String = raw.chars().filter(|c| *c != '/').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Some(ParsedDate::Unparseable);
    }

    let parsed = match digits.len() {
        6 => {
            let yy = number(&digits[4..6]);
            ymd(expand_two_digit_year(yy), number(&digits[2..4]), number(&digits[0..2]))
        }
        8 => {
            let year = number(&digits[4..8]) as i32;
            ymd(year, number(&digits[2..4]), number(&digits[0..2]))
        }
        _ => None,
    };

    Some(parsed.map_or(ParsedDate::Unparseable, ParsedDate::Date))
}

/// POSIX `%y` pivot: 69..=99 are 19xx, 00..=68 are 20xx.
fn expand_two_digit_year(yy: u32) -> i32 {
    if yy >= 69 {
        1900 + yy as i32
    } else {
        2000 + yy as i32
    }
}

fn number(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
