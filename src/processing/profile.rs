//! Column profiling for progress reporting.
//!
//! [`profile_column`] summarises one column the way a data-frame `describe()` does for text
//! columns (count, distinct values, most frequent value) and adds full value counts for
//! [`DataType::Category`] columns.

use std::collections::HashMap;
use std::fmt;

use crate::types::{DataSet, DataType, Value};

/// Summary of a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Column type at the time of profiling.
    pub data_type: DataType,
    /// Number of non-null values.
    pub count: usize,
    /// Number of null values.
    pub nulls: usize,
    /// Number of distinct non-null values.
    pub unique: usize,
    /// Most frequent non-null value (ties broken by the smallest rendering).
    pub top: Option<String>,
    /// Frequency of [`Self::top`].
    pub freq: usize,
    /// Value counts, most frequent first; only filled for category columns.
    pub value_counts: Vec<(String, usize)>,
}

/// Profile the column at `idx`.
///
/// Returns `None` if `idx` is not a column of `dataset`.
pub fn profile_column(dataset: &DataSet, idx: usize) -> Option<ColumnProfile> {
    let field = dataset.schema.fields.get(idx)?;

    let mut nulls = 0;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in dataset.column(idx) {
        match value {
            Value::Null => nulls += 1,
            other => {
                let key = other.to_text().unwrap_or_default();
                *counts.entry(key).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(a, na), (b, nb)| nb.cmp(na).then_with(|| a.cmp(b)));

    let (top, freq) = match ranked.first() {
        Some((value, n)) => (Some(value.clone()), *n),
        None => (None, 0),
    };

    Some(ColumnProfile {
        name: field.name.clone(),
        data_type: field.data_type,
        count: dataset.row_count() - nulls,
        nulls,
        unique: ranked.len(),
        top,
        freq,
        value_counts: if field.data_type == DataType::Category {
            ranked
        } else {
            Vec::new()
        },
    })
}

impl fmt::Display for ColumnProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{:?}>: count={}, nulls={}, unique={}",
            self.name, self.data_type, self.count, self.nulls, self.unique
        )?;
        if let Some(top) = &self.top {
            write!(f, ", top={top:?}, freq={}", self.freq)?;
        }
        if !self.value_counts.is_empty() {
            let parts: Vec<String> = self
                .value_counts
                .iter()
                .map(|(value, n)| format!("{value:?}={n}"))
                .collect();
            write!(f, ", counts=[{}]", parts.join(", "))?;
        }
        Ok(())
    }
}
