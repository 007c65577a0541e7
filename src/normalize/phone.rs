//! Phone-number extraction and landline/mobile classification.
//!
//! The source `Telefono` cell is free text that may hold several numbers. It is reduced to
//! digit-only tokens, then scanned in order:
//!
//! - a 9-digit token starting with `6` or `7` is a mobile number
//! - a 9-digit token starting with anything else is a landline
//! - a 7-digit token is a landline missing its `93` area prefix

use tracing::trace;

/// Area prefix added to 7-digit landline numbers.
pub const LANDLINE_PREFIX: &str = "93";

/// Split a phone cell into digit-only tokens.
///
/// Every character that is neither an ASCII digit nor a space is removed before splitting.
pub fn tokenize_phones(raw: &str) -> Vec<String> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ' ')
        .collect();
    kept.split_whitespace().map(str::to_owned).collect()
}

/// First landline number in `raw`, or the empty string.
pub fn extract_landline(raw: &str) -> String {
    let tokens = tokenize_phones(raw);
    trace!(input = raw, ?tokens, "landline tokens");
    for token in &tokens {
        if token.len() == 7 {
            return format!("{LANDLINE_PREFIX}{token}");
        }
        if token.len() == 9 && !is_mobile_prefix(token) {
            return token.clone();
        }
    }
    String::new()
}

/// First mobile number in `raw`, or the empty string.
pub fn extract_mobile(raw: &str) -> String {
    let tokens = tokenize_phones(raw);
    trace!(input = raw, ?tokens, "mobile tokens");
    tokens
        .into_iter()
        .find(|token| token.len() == 9 && is_mobile_prefix(token))
        .unwrap_or_default()
}

fn is_mobile_prefix(token: &str) -> bool {
    token.starts_with('6') || token.starts_with('7')
}
