//! File-level entrypoint: read the export, run the pipeline, write the cleaned file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::TransformResult;
use crate::ingestion::{read_csv_from_path, ReadOptions};
use crate::output::{output_path_for, write_csv_to_path, WriteOptions};
use crate::pipeline::{Pipeline, PipelineConfig, PipelineObserver};
use crate::processing::FilterStats;

/// Options controlling a conversion.
///
/// Use [`Default`] for the policyholder export.
#[derive(Clone, Default)]
pub struct ConvertOptions {
    /// How the source file is read.
    pub read: ReadOptions,
    /// How the output file is written.
    pub write: WriteOptions,
    /// Pipeline tables.
    pub pipeline: PipelineConfig,
    /// Optional observer for progress events.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Output path; if `None`, derived from the input with [`output_path_for`].
    pub output_path: Option<PathBuf>,
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("read", &self.read)
            .field("write", &self.write)
            .field("pipeline", &self.pipeline)
            .field("observer_set", &self.observer.is_some())
            .field("output_path", &self.output_path)
            .finish()
    }
}

/// What a successful conversion did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Source file.
    pub input: PathBuf,
    /// Written file.
    pub output: PathBuf,
    /// Records read from the source.
    pub rows_read: usize,
    /// Records written to the output.
    pub rows_written: usize,
    /// Row counts from the mandatory-column filter.
    pub filter: FilterStats,
}

/// Convert `input` into the cleaned export.
///
/// Any fatal error (unreadable input, schema mismatch) is returned before the output file is
/// created.
///
/// # Examples
///
/// ```no_run
/// use policyholders_transform::{convert_file, ConvertOptions};
///
/// # fn main() -> Result<(), policyholders_transform::TransformError> {
/// let summary = convert_file("users.csv", &ConvertOptions::default())?;
/// // Written to users_converted.csv next to the input.
/// println!("{} of {} records kept", summary.rows_written, summary.rows_read);
/// # Ok(())
/// # }
/// ```
pub fn convert_file(
    input: impl AsRef<Path>,
    options: &ConvertOptions,
) -> TransformResult<ConvertSummary> {
    let input = input.as_ref();

    info!("reading file {}", input.display());
    let dataset = read_csv_from_path(input, &options.read)?;
    let rows_read = dataset.row_count();
    info!(" - found {rows_read} records");
    debug!(headers = ?dataset.schema.field_names().collect::<Vec<_>>());

    let mut pipeline = Pipeline::new(options.pipeline.clone());
    if let Some(observer) = &options.observer {
        pipeline = pipeline.with_observer(Arc::clone(observer));
    }
    let output = pipeline.run(dataset)?;

    let output_path = options
        .output_path
        .clone()
        .unwrap_or_else(|| output_path_for(input));
    info!("writing result to {}", output_path.display());
    write_csv_to_path(&output.dataset, &output_path, &options.write)?;

    Ok(ConvertSummary {
        input: input.to_path_buf(),
        output: output_path,
        rows_read,
        rows_written: output.dataset.row_count(),
        filter: output.filter,
    })
}
