//! CSV reading into an in-memory [`DataSet`].

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{TransformError, TransformResult};
use crate::normalize::{parse_date, ParsedDate};
use crate::pipeline::config::{DATE_COLUMNS, NUMERIC_COLUMNS};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Options controlling how the source file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Columns parsed with the day-first date parser. Each must be present in the header.
    pub date_columns: Vec<String>,
    /// Columns read as integers when every non-empty cell is an integer.
    pub numeric_columns: Vec<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            date_columns: DATE_COLUMNS.iter().map(|s| (*s).to_string()).collect(),
            numeric_columns: NUMERIC_COLUMNS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl ReadOptions {
    /// A `csv` reader builder configured from these options.
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .flexible(true);
        builder
    }
}

/// Read a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - the first row is the header and defines the schema, in file order
/// - empty cells are [`Value::Null`]; other cells are kept verbatim
/// - rows shorter than the header are padded with nulls; longer rows are an error
/// - date columns become [`Value::Date`] or [`Value::InvalidDate`]
pub fn read_csv_from_path(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> TransformResult<DataSet> {
    let mut rdr = options.reader_builder().from_path(path)?;
    read_csv_from_reader(&mut rdr, options)
}

/// Read CSV data from an existing CSV reader.
pub fn read_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &ReadOptions,
) -> TransformResult<DataSet> {
    let headers = rdr.headers()?.clone();
    let names: Vec<String> = headers.iter().map(str::to_owned).collect();

    let mut is_date = vec![false; names.len()];
    for column in &options.date_columns {
        match names.iter().position(|h| h == column) {
            Some(idx) => is_date[idx] = true,
            None => {
                return Err(TransformError::SchemaMismatch {
                    message: format!("missing date column '{column}'. headers={names:?}"),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        if record.len() > names.len() {
            return Err(TransformError::SchemaMismatch {
                message: format!(
                    "row {user_row} has {} fields but the header has {}",
                    record.len(),
                    names.len()
                ),
            });
        }

        let row = (0..names.len())
            .map(|idx| read_cell(record.get(idx).unwrap_or(""), is_date[idx]))
            .collect();
        rows.push(row);
    }

    let fields = names
        .iter()
        .zip(&is_date)
        .map(|(name, &date)| {
            let data_type = if date { DataType::Date } else { DataType::Utf8 };
            Field::new(name.as_str(), data_type)
        })
        .collect();
    let mut dataset = DataSet::new(Schema::new(fields), rows);

    for column in &options.numeric_columns {
        if let Some(idx) = dataset.schema.index_of(column) {
            infer_integer_column(&mut dataset, idx);
        }
    }

    debug!(rows = dataset.row_count(), headers = ?names, "read csv");
    Ok(dataset)
}

fn read_cell(raw: &str, is_date: bool) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if is_date {
        return match parse_date(Some(raw)) {
            Some(ParsedDate::Date(d)) => Value::Date(d),
            _ => Value::InvalidDate(raw.to_owned()),
        };
    }
    Value::Utf8(raw.to_owned())
}

/// Turn the column into [`DataType::Int64`] if every non-null cell parses as an integer.
fn infer_integer_column(dataset: &mut DataSet, idx: usize) {
    let all_integers = dataset.column(idx).all(|value| match value {
        Value::Null => true,
        Value::Utf8(s) => s.parse::<i64>().is_ok(),
        _ => false,
    });

    if !all_integers {
        warn!(
            column = %dataset.schema.fields[idx].name,
            "column has non-integer values, keeping it as text"
        );
        return;
    }

    dataset.map_column(idx, DataType::Int64, |value| match value {
        Value::Utf8(s) => s.parse::<i64>().map_or(Value::Null, Value::Int64),
        other => other.clone(),
    });
}
