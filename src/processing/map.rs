//! Column mapping for [`crate::types::DataSet`].

use crate::types::{DataSet, DataType, Field, Value};

/// Rewrite the column at `idx` in place by applying `mapper` to every value.
///
/// This is a convenience wrapper around [`DataSet::map_column`]; the column keeps its
/// position and takes `data_type` as its new type.
pub fn map_column<F>(dataset: &mut DataSet, idx: usize, data_type: DataType, mapper: F)
where
    F: FnMut(&Value) -> Value,
{
    dataset.map_column(idx, data_type, mapper);
}

/// Compute a column from the column at `source_idx` and store it under `target`.
///
/// The new column is appended, or replaces an existing column of the same name in place.
/// Returns the index of the written column.
pub fn derive_column<F>(dataset: &mut DataSet, source_idx: usize, target: Field, mapper: F) -> usize
where
    F: FnMut(&Value) -> Value,
{
    let values: Vec<Value> = dataset.column(source_idx).map(mapper).collect();
    dataset.upsert_column(target, values)
}

#[cfg(test)]
mod tests {
    use super::{derive_column, map_column};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("name", DataType::Utf8),
            Field::new("code", DataType::Utf8),
        ]);

        let rows = vec![
            vec![Value::utf8("a"), Value::utf8("H")],
            vec![Value::utf8("b"), Value::Null],
        ];

        DataSet::new(schema, rows)
    }

    #[test]
    fn map_column_rewrites_values_in_place() {
        let mut ds = sample_dataset();
        map_column(&mut ds, 1, DataType::Category, |v| match v {
            Value::Utf8(s) => Value::Utf8(s.to_lowercase()),
            _ => Value::utf8(""),
        });

        assert_eq!(ds.schema.fields[1], Field::new("code", DataType::Category));
        assert_eq!(ds.rows[0], vec![Value::utf8("a"), Value::utf8("h")]);
        assert_eq!(ds.rows[1], vec![Value::utf8("b"), Value::utf8("")]);
    }

    #[test]
    fn derive_column_appends_new_column() {
        let mut ds = sample_dataset();
        let idx = derive_column(&mut ds, 0, Field::new("upper", DataType::Utf8), |v| match v {
            Value::Utf8(s) => Value::Utf8(s.to_uppercase()),
            other => other.clone(),
        });

        assert_eq!(
            ds.schema.field_names().collect::<Vec<_>>(),
            vec!["name", "code", "upper"]
        );
        assert_eq!(idx, 2);
        assert_eq!(ds.rows[1][2], Value::utf8("B"));
        // Source untouched
        assert_eq!(ds.rows[1][0], Value::utf8("b"));
    }

    #[test]
    fn derive_column_overwrites_existing_name() {
        let mut ds = sample_dataset();
        let target = Field::new("code", DataType::Category);
        let idx = derive_column(&mut ds, 0, target, |_| Value::utf8("x"));

        assert_eq!(idx, 1);
        assert_eq!(ds.schema.fields.len(), 2);
        assert_eq!(ds.schema.fields[1].data_type, DataType::Category);
        assert_eq!(ds.rows[0][1], Value::utf8("x"));
        assert_eq!(ds.rows[1][1], Value::utf8("x"));
    }

    #[test]
    #[should_panic(expected = "column length")]
    fn upsert_column_panics_on_wrong_length() {
        let mut ds = sample_dataset();
        ds.upsert_column(Field::new("extra", DataType::Utf8), vec![Value::Null]);
    }
}
