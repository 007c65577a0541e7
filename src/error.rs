use thiserror::Error;

/// Convenience result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Error type returned by reading, pipeline and writing functions.
///
/// Every variant is fatal for a run: per-value problems (bad e-mails, unparseable dates,
/// unknown sex codes) are absorbed by the normalizers and never surface here.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not have the shape the fixed schema expects.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A pipeline stage referenced a column that is not present.
    #[error("missing column '{column}' during {stage}")]
    MissingColumn { stage: String, column: String },
}

impl TransformError {
    pub(crate) fn missing_column(stage: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            stage: stage.into(),
            column: column.into(),
        }
    }
}
