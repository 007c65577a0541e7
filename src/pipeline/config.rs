//! Fixed-schema dispatch tables for the policyholder export.
//!
//! Every table is an ordered list of `(key, rule)` entries. Keys after the rename stage are
//! final (post-rename) column names.

use crate::normalize::{ContactTag, FieldRule};
use crate::types::DataType;

/// Source columns removed before anything else happens.
pub const DROP_COLUMNS: [&str; 10] = [
    "N.Orden",
    "Ind.Estado",
    "Ind.Baja",
    "FECHANACIMI",
    "ID_PLZ1",
    "FECHAINSCRI",
    "Grupos",
    "CENTRO",
    "CLAVECARTERA",
    "CLAVEPOLIZA",
];

/// Source → final column names. Unlisted columns keep their name.
pub const RENAME_COLUMNS: [(&str, &str); 10] = [
    ("N.Poliza", "NUM_POLIZA"),
    ("Nombre", "Given Name"),
    ("Apellidos", "Family Name"),
    ("Parentesco", "RELACION_POLIZA"),
    ("Siglas Estado", "ESTADO_CIVIL"),
    ("Sexo", "Gender"),
    ("Fecha Nacimiento", "Birthday"),
    ("Fecha Inscripcion", "FECHA_ALTA"),
    ("E.Mail", "EMAIL"),
    ("NIF", "NIF"),
];

/// Source columns read through the date parser.
pub const DATE_COLUMNS: [&str; 2] = ["Fecha Nacimiento", "Fecha Inscripcion"];

/// Source columns read as integers when every cell allows it.
pub const NUMERIC_COLUMNS: [&str; 1] = ["N.Poliza"];

/// Rows missing any of these (null, or empty text) are dropped.
pub const MANDATORY_COLUMNS: [&str; 3] = ["Given Name", "Family Name", "Phone 1 - Value"];

/// Output header, in order.
pub const OUTPUT_COLUMNS: [&str; 16] = [
    "NUM_POLIZA",
    "Given Name",
    "Family Name",
    "RELACION_POLIZA",
    "ESTADO_CIVIL",
    "Gender",
    "Birthday",
    "FECHA_ALTA",
    "E-mail 1 - Type",
    "E-mail 1 - Value",
    "Phone 1 - Type",
    "Phone 1 - Value",
    "Phone 2 - Type",
    "Phone 2 - Value",
    "NIF",
    "Source",
];

/// A column computed from exactly one source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedColumn {
    /// Name of the new column.
    pub name: String,
    /// Final name of the column it is computed from.
    pub source: String,
    /// Rule applied to every source value.
    pub rule: FieldRule,
    /// Optional type for the result; defaults to [`FieldRule::output_type`].
    pub data_type: Option<DataType>,
}

impl DerivedColumn {
    pub fn new(name: impl Into<String>, source: impl Into<String>, rule: FieldRule) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            rule,
            data_type: None,
        }
    }
}

/// A column rewritten in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRule {
    /// Final column name.
    pub column: String,
    /// Rule applied to every value.
    pub rule: FieldRule,
    /// Optional type for the result; defaults to [`FieldRule::output_type`].
    pub data_type: Option<DataType>,
}

impl ColumnRule {
    pub fn new(column: impl Into<String>, rule: FieldRule) -> Self {
        Self {
            column: column.into(),
            rule,
            data_type: None,
        }
    }

    /// Set the type the rewritten column is coerced to.
    #[must_use]
    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }
}

/// All tables driving a [`crate::pipeline::Pipeline`] run.
///
/// [`Default`] yields the policyholder export schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Source columns to remove (stage 1).
    pub drop_columns: Vec<String>,
    /// Source → final names (stage 2).
    pub rename_columns: Vec<(String, String)>,
    /// Final columns turned into category columns (stage 3).
    pub category_columns: Vec<String>,
    /// Derived columns (stage 4).
    pub derived_columns: Vec<DerivedColumn>,
    /// In-place column rewrites (stage 5).
    pub normalized_columns: Vec<ColumnRule>,
    /// Columns checked by the row filter (stage 6).
    pub mandatory_columns: Vec<String>,
    /// Output projection (stage 7).
    pub output_columns: Vec<String>,
}

impl PipelineConfig {
    /// Tables for the insurance policy owners/beneficiaries export.
    pub fn policyholders() -> Self {
        Self {
            drop_columns: strings(&DROP_COLUMNS),
            rename_columns: RENAME_COLUMNS
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
            category_columns: vec!["Gender".to_string()],
            derived_columns: vec![
                DerivedColumn::new("Phone 1 - Value", "Telefono", FieldRule::Mobile),
                DerivedColumn::new("Phone 2 - Value", "Telefono", FieldRule::Landline),
                DerivedColumn::new("E-mail 1 - Value", "EMAIL", FieldRule::Email),
                DerivedColumn::new("E-mail 1 - Type", "EMAIL", tag(ContactTag::Home)),
                DerivedColumn::new("Phone 1 - Type", "EMAIL", tag(ContactTag::Mobile)),
                DerivedColumn::new("Phone 2 - Type", "EMAIL", tag(ContactTag::Home)),
                DerivedColumn::new("Source", "EMAIL", tag(ContactTag::Source)),
            ],
            normalized_columns: vec![
                ColumnRule::new("Given Name", FieldRule::PersonName),
                ColumnRule::new("Family Name", FieldRule::PersonName),
                ColumnRule::new("EMAIL", FieldRule::Email),
                ColumnRule::new("Gender", FieldRule::SexCode).with_type(DataType::Category),
                ColumnRule::new("NIF", FieldRule::NationalId),
            ],
            mandatory_columns: strings(&MANDATORY_COLUMNS),
            output_columns: strings(&OUTPUT_COLUMNS),
        }
    }

    /// Final name of a source column after the rename stage.
    pub fn renamed<'a>(&'a self, source: &'a str) -> &'a str {
        self.rename_columns
            .iter()
            .find(|(from, _)| from == source)
            .map_or(source, |(_, to)| to.as_str())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::policyholders()
    }
}

fn tag(tag: ContactTag) -> FieldRule {
    FieldRule::Constant(tag)
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{PipelineConfig, OUTPUT_COLUMNS};
    use crate::ingestion::{read_csv_from_path, ReadOptions};
    use crate::pipeline::Pipeline;

    #[test]
    fn renamed_maps_source_names_and_keeps_unknown_ones() {
        let config = PipelineConfig::default();
        assert_eq!(config.renamed("Sexo"), "Gender");
        assert_eq!(config.renamed("NIF"), "NIF");
        assert_eq!(config.renamed("Telefono"), "Telefono");
    }

    #[test]
    fn stage_columns_resolve_after_renaming_the_export() {
        let config = PipelineConfig::default();
        let fixture = "tests/fixtures/policyholders.csv";
        let mut ds = read_csv_from_path(fixture, &ReadOptions::default()).unwrap();
        let pipeline = Pipeline::new(config.clone());
        pipeline.drop_columns(&mut ds).unwrap();
        pipeline.rename_columns(&mut ds).unwrap();

        for column in &config.category_columns {
            assert!(ds.schema.index_of(column).is_some(), "category column {column}");
        }
        for derived in &config.derived_columns {
            assert!(ds.schema.index_of(&derived.source).is_some(), "source {}", derived.source);
        }
        for rule in &config.normalized_columns {
            assert!(ds.schema.index_of(&rule.column).is_some(), "normalized {}", rule.column);
        }
        for (from, _) in &config.rename_columns {
            if from != config.renamed(from) {
                assert!(ds.schema.index_of(from).is_none(), "{from} was not renamed");
            }
        }
    }

    #[test]
    fn every_mandatory_column_is_in_the_output() {
        let config = PipelineConfig::default();
        for column in &config.mandatory_columns {
            assert!(OUTPUT_COLUMNS.contains(&column.as_str()), "{column}");
        }
        assert_eq!(config.output_columns.len(), 16);
    }
}
