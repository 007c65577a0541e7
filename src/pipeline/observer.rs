use std::fmt;

use tracing::{debug, info};

use crate::normalize::FieldRule;
use crate::processing::{ColumnProfile, FilterStats};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Drop,
    Rename,
    Coerce,
    Derive,
    Normalize,
    Filter,
    Project,
}

impl Stage {
    /// 1-based position of the stage.
    pub fn number(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Drop => "drop",
            Self::Rename => "rename",
            Self::Coerce => "type coercion",
            Self::Derive => "derived columns",
            Self::Normalize => "column normalization",
            Self::Filter => "row filtering",
            Self::Project => "projection",
        };
        f.write_str(name)
    }
}

/// Progress events emitted by the pipeline.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    StageStarted {
        stage: Stage,
    },
    ColumnsDropped {
        columns: Vec<String>,
    },
    ColumnRenamed {
        from: String,
        to: String,
    },
    ColumnCoerced {
        column: String,
        profile: ColumnProfile,
    },
    ColumnDerived {
        column: String,
        source: String,
        rule: FieldRule,
        profile: ColumnProfile,
    },
    ColumnNormalized {
        column: String,
        rule: FieldRule,
        before: ColumnProfile,
        after: ColumnProfile,
    },
    RowsFiltered {
        columns: Vec<String>,
        stats: FilterStats,
    },
    Projected {
        columns: Vec<String>,
        rows: usize,
    },
}

/// Observer hook for pipeline events.
///
/// Column profiles are only computed when an observer is attached.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent);
}

/// Logs pipeline events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::StageStarted { stage } => {
                info!("{}. {}", stage.number(), stage.to_string().to_uppercase());
            }
            PipelineEvent::ColumnsDropped { columns } => {
                info!(?columns, "removed no-longer-used columns");
            }
            PipelineEvent::ColumnRenamed { from, to } => {
                debug!(%from, %to, "renamed column");
            }
            PipelineEvent::ColumnCoerced { column, profile } => {
                info!("column {column} is type <{:?}>", profile.data_type);
                info!("   -> {profile}");
            }
            PipelineEvent::ColumnDerived {
                column,
                source,
                rule,
                profile,
            } => {
                info!("created column {column} from column {source} ({rule})");
                info!("   -> {profile}");
            }
            PipelineEvent::ColumnNormalized {
                column,
                rule,
                before,
                after,
            } => {
                info!("transformed column {column} ({rule})");
                info!("   -> old: {before}");
                info!("   -> new: {after}");
            }
            PipelineEvent::RowsFiltered { columns, stats } => {
                info!(?columns, "rows without mandatory values");
                info!("   -> without nulls: {} records", stats.after_nulls);
                info!("   -> without empty strings: {} records", stats.after_empty);
            }
            PipelineEvent::Projected { columns, rows } => {
                info!(?columns, rows, "export columns");
            }
        }
    }
}
