//! Person-name normalization.

/// Normalize a given name or family name.
///
/// - whitespace runs collapse to a single space, ends are trimmed
/// - backticks become apostrophes and a space right after an apostrophe is removed
/// - title case: a letter is uppercased when it follows a non-letter, every other letter is
///   lowercased (`"MARÍA-JOSÉ o'neil"` → `"María-José O'Neil"`)
/// - the Spanish particles `" Del"`/`" De"` are lowercased
pub fn normalize_name(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    let quoted = collapsed.replace('`', "'").replace("' ", "'");
    title_case(&quoted)
        .replace(" Del", " del")
        .replace(" De", " de")
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut after_letter = false;
    for c in s.chars() {
        if after_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    out
}
