//! E-mail validation.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$").unwrap());

/// Trim and lowercase `email`, returning it only if it looks like `local@domain.tld`.
///
/// Invalid addresses normalize to the empty string, never to a null.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim().to_lowercase();
    if EMAIL_REGEX.is_match(&email) {
        email
    } else {
        String::new()
    }
}
