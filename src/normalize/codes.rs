//! Code-like fields: sex codes and national identifiers (NIF).

/// Re-encode a source sex code: `"H"` (hombre) → `"M"`, `"M"` (mujer) → `"F"`.
///
/// Anything else, including a missing code, maps to the empty string.
pub fn map_sex_code(code: Option<&str>) -> &'static str {
    match code {
        Some("H") => "M",
        Some("M") => "F",
        _ => "",
    }
}

/// Clean a national identifier: trim, drop hyphens and spaces, uppercase.
pub fn clean_national_id(nif: &str) -> String {
    nif.trim()
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .collect::<String>()
        .to_uppercase()
}
