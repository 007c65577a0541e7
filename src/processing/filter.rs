//! Row filtering for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Row counts observed while filtering on mandatory columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterStats {
    /// Rows before filtering.
    pub before: usize,
    /// Rows left after removing nulls in any mandatory column.
    pub after_nulls: usize,
    /// Rows left after also removing empty strings in text-typed mandatory columns.
    pub after_empty: usize,
}

impl FilterStats {
    /// Total number of dropped rows.
    pub fn dropped(&self) -> usize {
        self.before - self.after_empty
    }
}

/// Drop rows with a null in any of the `columns`.
pub fn drop_null_rows(dataset: &DataSet, columns: &[usize]) -> DataSet {
    filter(dataset, |row| columns.iter().all(|&idx| !row[idx].is_null()))
}

/// Drop rows with a zero-length string in any of the text-typed `columns`.
///
/// Columns of any other type are skipped.
pub fn drop_empty_text_rows(dataset: &DataSet, columns: &[usize]) -> DataSet {
    let text_columns: Vec<usize> = columns
        .iter()
        .copied()
        .filter(|&idx| dataset.schema.fields[idx].data_type.is_text())
        .collect();
    filter(dataset, |row| {
        text_columns
            .iter()
            .all(|&idx| !matches!(&row[idx], Value::Utf8(s) if s.is_empty()))
    })
}

/// Keep only rows where every mandatory column is non-null and, for text columns, non-empty.
pub fn filter_mandatory(dataset: &DataSet, columns: &[usize]) -> (DataSet, FilterStats) {
    let before = dataset.row_count();
    let without_nulls = drop_null_rows(dataset, columns);
    let after_nulls = without_nulls.row_count();
    let without_empty = drop_empty_text_rows(&without_nulls, columns);
    let stats = FilterStats {
        before,
        after_nulls,
        after_empty: without_empty.row_count(),
    };
    (without_empty, stats)
}
