//! CSV writing of the finished [`DataSet`].

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::QuoteStyle;

use crate::error::TransformResult;
use crate::types::{DataSet, DataType, Value, DATE_FORMAT};

/// Suffix appended to the input file stem to name the output file.
pub const OUTPUT_SUFFIX: &str = "_converted";

/// Options controlling how the output file is written.
///
/// Quoting follows the column type, not the cell text: every field of an
/// [`DataType::Int64`] column is written bare, every other field (header included) is
/// quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl WriteOptions {
    /// A `csv` writer builder configured from these options.
    ///
    /// The writer itself never quotes; fields are quoted by [`WriteOptions::quote_field`]
    /// before they reach it.
    pub fn writer_builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .has_headers(true)
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'));
        builder
    }

    /// Wrap `field` in the quote character, doubling any quote inside it.
    pub fn quote_field(&self, field: &str) -> String {
        let quote = char::from(self.quote);
        let mut out = String::with_capacity(field.len() + 2);
        out.push(quote);
        for c in field.chars() {
            if c == quote {
                out.push(quote);
            }
            out.push(c);
        }
        out.push(quote);
        out
    }
}

/// Output path for `input`: `<stem>_converted.<ext>` next to the input file.
///
/// An input without an extension yields `<stem>_converted`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push(OUTPUT_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Render one value as unquoted field text.
///
/// Nulls and unparseable dates are empty; dates use [`DATE_FORMAT`].
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null | Value::InvalidDate(_) => String::new(),
        Value::Utf8(s) => s.clone(),
        Value::Int64(v) => v.to_string(),
        Value::Date(d) => d.format(DATE_FORMAT).to_string(),
    }
}

/// Write the header and every row of `dataset` to `writer`.
///
/// `writer` must not quote on its own; build it with [`WriteOptions::writer_builder`].
pub fn write_csv_to_writer<W: Write>(
    dataset: &DataSet,
    writer: &mut csv::Writer<W>,
    options: &WriteOptions,
) -> TransformResult<()> {
    writer.write_record(dataset.schema.field_names().map(|name| options.quote_field(name)))?;

    let bare: Vec<bool> = dataset
        .schema
        .fields
        .iter()
        .map(|field| field.data_type == DataType::Int64)
        .collect();
    for row in &dataset.rows {
        writer.write_record(row.iter().zip(&bare).map(|(value, &is_bare)| {
            let text = render_value(value);
            if is_bare { text } else { options.quote_field(&text) }
        }))?;
    }
    writer.flush()?;
    Ok(())
}

/// Serialize `dataset` into an in-memory CSV document.
pub fn write_csv_to_bytes(dataset: &DataSet, options: &WriteOptions) -> TransformResult<Vec<u8>> {
    let mut writer = options.writer_builder().from_writer(Vec::new());
    write_csv_to_writer(dataset, &mut writer, options)?;
    writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()).into())
}

/// Write `dataset` to `path`.
///
/// The document is built in memory first, so a failure never leaves a partial file behind.
pub fn write_csv_to_path(
    dataset: &DataSet,
    path: impl AsRef<Path>,
    options: &WriteOptions,
) -> TransformResult<()> {
    let bytes = write_csv_to_bytes(dataset, options)?;
    fs::write(path, bytes)?;
    Ok(())
}
