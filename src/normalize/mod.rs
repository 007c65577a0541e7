//! Field normalizers.
//!
//! Each normalizer is a pure function over a single field value. None of them fail: bad input
//! degrades to an empty string, a null, or an unparseable-date marker.
//!
//! The string-level functions live in the submodules; [`FieldRule`] lifts them to
//! [`Value`]s so the pipeline can dispatch them from its column tables.

pub mod codes;
pub mod date;
pub mod email;
pub mod name;
pub mod phone;

pub use codes::{clean_national_id, map_sex_code};
pub use date::{parse_date, ParsedDate};
pub use email::normalize_email;
pub use name::normalize_name;
pub use phone::{extract_landline, extract_mobile, tokenize_phones};

use std::fmt;

use crate::types::{DataType, Value};

/// Literal contact-type tags written into derived columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTag {
    /// `"Home"`.
    Home,
    /// `"Mobile"`.
    Mobile,
    /// `"ISSADB"`, the record source marker.
    Source,
}

impl ContactTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Mobile => "Mobile",
            Self::Source => "ISSADB",
        }
    }
}

/// A single-argument value rule, used both to derive new columns and to rewrite columns in
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// [`normalize_name`] on strings; other values pass through unchanged.
    PersonName,
    /// [`normalize_email`] on strings; anything else becomes `""`.
    Email,
    /// [`map_sex_code`].
    SexCode,
    /// [`clean_national_id`] on strings; nulls and non-strings pass through unchanged.
    NationalId,
    /// [`extract_landline`] on strings; anything else becomes `""`.
    Landline,
    /// [`extract_mobile`] on strings; anything else becomes `""`.
    Mobile,
    /// Ignores its input and yields the tag.
    Constant(ContactTag),
}

impl FieldRule {
    /// Apply the rule to one value.
    pub fn apply(self, value: &Value) -> Value {
        match self {
            Self::PersonName => match value {
                Value::Utf8(s) => Value::Utf8(normalize_name(s)),
                other => other.clone(),
            },
            Self::Email => Value::Utf8(value.as_str().map(normalize_email).unwrap_or_default()),
            Self::SexCode => Value::utf8(map_sex_code(value.as_str())),
            Self::NationalId => match value {
                Value::Utf8(s) => Value::Utf8(clean_national_id(s)),
                other => other.clone(),
            },
            Self::Landline => Value::Utf8(value.as_str().map(extract_landline).unwrap_or_default()),
            Self::Mobile => Value::Utf8(value.as_str().map(extract_mobile).unwrap_or_default()),
            Self::Constant(tag) => Value::utf8(tag.as_str()),
        }
    }

    /// Column type produced by the rule when no explicit type is declared.
    pub fn output_type(self) -> DataType {
        DataType::Utf8
    }
}

impl fmt::Display for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PersonName => f.write_str("person name"),
            Self::Email => f.write_str("email"),
            Self::SexCode => f.write_str("sex code"),
            Self::NationalId => f.write_str("national id"),
            Self::Landline => f.write_str("landline"),
            Self::Mobile => f.write_str("mobile"),
            Self::Constant(tag) => write!(f, "constant {:?}", tag.as_str()),
        }
    }
}
