//! Column pipeline.
//!
//! A [`Pipeline`] runs the fixed stage sequence over a [`DataSet`]:
//!
//! 1. drop source columns
//! 2. rename columns to their final names
//! 3. turn declared columns into category columns
//! 4. derive new columns
//! 5. normalize columns in place
//! 6. filter rows on mandatory columns
//! 7. project onto the output column list
//!
//! Stages 1-5 and 7 fail on any missing column, before touching the data set. Stage 6 only
//! ever shrinks the record set.
//!
//! ## Example
//!
//! ```rust
//! use policyholders_transform::normalize::FieldRule;
//! use policyholders_transform::pipeline::{ColumnRule, Pipeline, PipelineConfig};
//! use policyholders_transform::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let config = PipelineConfig {
//!     drop_columns: vec![],
//!     rename_columns: vec![("Nombre".into(), "Given Name".into())],
//!     category_columns: vec![],
//!     derived_columns: vec![],
//!     normalized_columns: vec![ColumnRule::new("Given Name", FieldRule::PersonName)],
//!     mandatory_columns: vec!["Given Name".into()],
//!     output_columns: vec!["Given Name".into()],
//! };
//! let ds = DataSet::new(
//!     Schema::new(vec![Field::new("Nombre", DataType::Utf8)]),
//!     vec![vec![Value::utf8("  ana  DE  la rosa")], vec![Value::utf8("   ")]],
//! );
//!
//! let out = Pipeline::new(config).run(ds).unwrap();
//! assert_eq!(out.dataset.rows, vec![vec![Value::utf8("Ana de La Rosa")]]);
//! assert_eq!(out.filter.dropped(), 1);
//! ```

pub mod config;
mod observer;

use std::fmt;
use std::sync::Arc;

use crate::error::{TransformError, TransformResult};
use crate::processing::{
    derive_column, filter_mandatory, map_column, profile_column, ColumnProfile, FilterStats,
};
use crate::types::{DataSet, DataType, Field, Value};

pub use config::{ColumnRule, DerivedColumn, PipelineConfig};
pub use observer::{PipelineEvent, PipelineObserver, Stage, TracingObserver};

/// Result of a full pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Projected, filtered data set ready to be written.
    pub dataset: DataSet,
    /// Row counts from the filter stage.
    pub filter: FilterStats,
}

/// Runs the column pipeline described by a [`PipelineConfig`].
#[derive(Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    observer: Option<Arc<dyn PipelineObserver>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Attach an observer that receives progress events.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run every stage in order.
    ///
    /// The input data set is consumed; on error nothing is returned.
    pub fn run(&self, mut dataset: DataSet) -> TransformResult<PipelineOutput> {
        self.drop_columns(&mut dataset)?;
        self.rename_columns(&mut dataset)?;
        self.coerce_types(&mut dataset)?;
        self.derive_columns(&mut dataset)?;
        self.normalize_columns(&mut dataset)?;
        let (filtered, filter) = self.filter_rows(&dataset)?;
        let dataset = self.project(&filtered)?;
        Ok(PipelineOutput { dataset, filter })
    }

    /// Stage 1: remove the configured source columns. All of them must be present.
    pub fn drop_columns(&self, dataset: &mut DataSet) -> TransformResult<()> {
        self.stage_started(Stage::Drop);
        let indices = resolve(dataset, Stage::Drop, &self.config.drop_columns)?;
        dataset.remove_columns(&indices);
        self.emit(|| PipelineEvent::ColumnsDropped {
            columns: self.config.drop_columns.clone(),
        });
        Ok(())
    }

    /// Stage 2: rename columns. Unmapped columns keep their name; absent sources are skipped.
    pub fn rename_columns(&self, dataset: &mut DataSet) -> TransformResult<()> {
        self.stage_started(Stage::Rename);

        let mut renames = Vec::new();
        for (from, to) in &self.config.rename_columns {
            let Some(idx) = dataset.schema.index_of(from) else {
                continue;
            };
            if from != to && dataset.schema.index_of(to).is_some() {
                return Err(TransformError::SchemaMismatch {
                    message: format!("cannot rename '{from}' to '{to}': column already exists"),
                });
            }
            renames.push((idx, from, to));
        }

        for (idx, from, to) in renames {
            dataset.rename_column(idx, to.as_str());
            self.emit(|| PipelineEvent::ColumnRenamed {
                from: from.clone(),
                to: to.clone(),
            });
        }
        Ok(())
    }

    /// Stage 3: turn the configured columns into category columns.
    pub fn coerce_types(&self, dataset: &mut DataSet) -> TransformResult<()> {
        self.stage_started(Stage::Coerce);
        let indices = resolve(dataset, Stage::Coerce, &self.config.category_columns)?;

        for (&idx, column) in indices.iter().zip(&self.config.category_columns) {
            map_column(dataset, idx, DataType::Category, category_value);
            if let Some(profile) = self.profile(dataset, idx) {
                self.emit(|| PipelineEvent::ColumnCoerced {
                    column: column.clone(),
                    profile,
                });
            }
        }
        Ok(())
    }

    /// Stage 4: compute derived columns from their source columns.
    pub fn derive_columns(&self, dataset: &mut DataSet) -> TransformResult<()> {
        self.stage_started(Stage::Derive);
        let sources: Vec<String> = self
            .config
            .derived_columns
            .iter()
            .map(|d| d.source.clone())
            .collect();
        let indices = resolve(dataset, Stage::Derive, &sources)?;

        for (&source_idx, derived) in indices.iter().zip(&self.config.derived_columns) {
            let data_type = derived.data_type.unwrap_or(derived.rule.output_type());
            let rule = derived.rule;
            let idx = derive_column(
                dataset,
                source_idx,
                Field::new(derived.name.as_str(), data_type),
                |value| rule.apply(value),
            );
            if let Some(profile) = self.profile(dataset, idx) {
                self.emit(|| PipelineEvent::ColumnDerived {
                    column: derived.name.clone(),
                    source: derived.source.clone(),
                    rule,
                    profile,
                });
            }
        }
        Ok(())
    }

    /// Stage 5: rewrite the configured columns in place.
    pub fn normalize_columns(&self, dataset: &mut DataSet) -> TransformResult<()> {
        self.stage_started(Stage::Normalize);
        let names: Vec<String> = self
            .config
            .normalized_columns
            .iter()
            .map(|c| c.column.clone())
            .collect();
        let indices = resolve(dataset, Stage::Normalize, &names)?;

        for (&idx, column_rule) in indices.iter().zip(&self.config.normalized_columns) {
            let before = self.profile(dataset, idx);
            let data_type = column_rule.data_type.unwrap_or(column_rule.rule.output_type());
            let rule = column_rule.rule;
            map_column(dataset, idx, data_type, |value| rule.apply(value));
            if let (Some(before), Some(after)) = (before, self.profile(dataset, idx)) {
                self.emit(|| PipelineEvent::ColumnNormalized {
                    column: column_rule.column.clone(),
                    rule,
                    before,
                    after,
                });
            }
        }
        Ok(())
    }

    /// Stage 6: drop rows with a null, or an empty text value, in any mandatory column.
    pub fn filter_rows(&self, dataset: &DataSet) -> TransformResult<(DataSet, FilterStats)> {
        self.stage_started(Stage::Filter);
        let indices = resolve(dataset, Stage::Filter, &self.config.mandatory_columns)?;
        let (filtered, stats) = filter_mandatory(dataset, &indices);
        self.emit(|| PipelineEvent::RowsFiltered {
            columns: self.config.mandatory_columns.clone(),
            stats,
        });
        Ok((filtered, stats))
    }

    /// Stage 7: select the output columns, in output order.
    pub fn project(&self, dataset: &DataSet) -> TransformResult<DataSet> {
        self.stage_started(Stage::Project);
        let indices = resolve(dataset, Stage::Project, &self.config.output_columns)?;
        let projected = dataset.select_columns(&indices);
        self.emit(|| PipelineEvent::Projected {
            columns: self.config.output_columns.clone(),
            rows: projected.row_count(),
        });
        Ok(projected)
    }

    /// Profile of the column at `idx`, computed only when an observer is attached.
    fn profile(&self, dataset: &DataSet, idx: usize) -> Option<ColumnProfile> {
        self.observer.as_ref()?;
        profile_column(dataset, idx)
    }

    fn stage_started(&self, stage: Stage) {
        self.emit(|| PipelineEvent::StageStarted { stage });
    }

    fn emit<F>(&self, event: F)
    where
        F: FnOnce() -> PipelineEvent,
    {
        if let Some(observer) = &self.observer {
            observer.on_event(&event());
        }
    }
}

/// Resolve column names to indices, failing on the first missing one.
fn resolve(dataset: &DataSet, stage: Stage, names: &[String]) -> TransformResult<Vec<usize>> {
    names
        .iter()
        .map(|name| {
            dataset
                .schema
                .index_of(name)
                .ok_or_else(|| TransformError::missing_column(stage.to_string(), name.as_str()))
        })
        .collect()
}

/// Category values are text; nulls stay null.
fn category_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Utf8(s) => Value::Utf8(s.clone()),
        other => Value::Utf8(other.to_text().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::category_value;
    use crate::types::Value;

    #[test]
    fn category_values_are_stringified() {
        assert_eq!(category_value(&Value::Int64(7)), Value::utf8("7"));
        let d = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();
        assert_eq!(category_value(&Value::Date(d)), Value::utf8("2001-02-03"));
        assert_eq!(category_value(&Value::utf8("H")), Value::utf8("H"));
        assert_eq!(category_value(&Value::Null), Value::Null);
    }
}
