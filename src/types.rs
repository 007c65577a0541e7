//! Core data model types.
//!
//! Records are held in an in-memory [`DataSet`]: a [`Schema`] (ordered, typed [`Field`]s)
//! plus row-major [`Value`] storage. The schema evolves as the pipeline drops, renames,
//! retypes and appends columns; every column operation applies to all rows at once.

use chrono::NaiveDate;

/// Output format used whenever a date is rendered as text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Free text.
    Utf8,
    /// Text drawn from a small, fixed set of values.
    Category,
    /// Calendar date.
    Date,
    /// 64-bit signed integer (numeric-string columns such as policy numbers).
    Int64,
}

impl DataType {
    /// Whether values of this type are free text, i.e. subject to the empty-string check.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Utf8)
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing the current shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Missing value.
    Null,
    /// UTF-8 string.
    Utf8(String),
    /// 64-bit signed integer.
    Int64(i64),
    /// Parsed calendar date.
    Date(NaiveDate),
    /// A date cell that could not be parsed; keeps the raw text for diagnostics.
    InvalidDate(String),
}

impl Value {
    /// Shorthand for a [`Value::Utf8`].
    pub fn utf8(s: impl Into<String>) -> Self {
        Self::Utf8(s.into())
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The string payload, for [`Value::Utf8`] only.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s),
            _ => None,
        }
    }

    /// Textual rendering of the value, `None` for nulls.
    ///
    /// Unparseable dates render their raw text here; the CSV writer treats them as empty.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Utf8(s) => Some(s.clone()),
            Self::Int64(v) => Some(v.to_string()),
            Self::Date(d) => Some(d.format(DATE_FORMAT).to_string()),
            Self::InvalidDate(raw) => Some(raw.clone()),
        }
    }
}

/// In-memory tabular dataset (the record set being transformed).
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate the values of one column, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds for any row.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Remove the columns at `indices` from the schema and from every row.
    pub fn remove_columns(&mut self, indices: &[usize]) {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        for &idx in &sorted {
            self.schema.fields.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }

    /// Rename the column at `idx`.
    pub fn rename_column(&mut self, idx: usize, name: impl Into<String>) {
        self.schema.fields[idx].name = name.into();
    }

    /// Replace every value of the column at `idx` with `mapper(value)` and set its type.
    ///
    /// The column keeps its position in the schema.
    pub fn map_column<F>(&mut self, idx: usize, data_type: DataType, mut mapper: F)
    where
        F: FnMut(&Value) -> Value,
    {
        for row in &mut self.rows {
            row[idx] = mapper(&row[idx]);
        }
        self.schema.fields[idx].data_type = data_type;
    }

    /// Append `values` as a new column, or overwrite the column if `field.name` already exists.
    ///
    /// Returns the index of the written column.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not hold exactly one value per row.
    pub fn upsert_column(&mut self, field: Field, values: Vec<Value>) -> usize {
        assert!(
            values.len() == self.rows.len(),
            "column length {} does not match row count {}",
            values.len(),
            self.rows.len()
        );
        match self.schema.index_of(&field.name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
                self.schema.fields[idx] = field;
                idx
            }
            None => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
                self.schema.fields.push(field);
                self.schema.fields.len() - 1
            }
        }
    }

    /// Create a new dataset holding only the columns at `indices`, in that order.
    pub fn select_columns(&self, indices: &[usize]) -> Self {
        let fields = indices
            .iter()
            .map(|&idx| self.schema.fields[idx].clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
            .collect();
        Self {
            schema: Schema::new(fields),
            rows,
        }
    }
}
