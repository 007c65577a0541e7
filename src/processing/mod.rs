//! In-memory column and row primitives used by the pipeline.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion.
//!
//! - [`filter()`] and the mandatory-column filters: row removal
//! - [`map_column()`] / [`derive_column()`]: column rewrites and derived columns
//! - [`profile_column()`]: column summaries for progress reporting
//!
//! ## Example
//!
//! ```rust
//! use policyholders_transform::processing::{derive_column, filter_mandatory};
//! use policyholders_transform::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![Field::new("phone", DataType::Utf8)]);
//! let mut ds = DataSet::new(
//!     schema,
//!     vec![vec![Value::utf8("612345678")], vec![Value::utf8("n/a")]],
//! );
//!
//! derive_column(&mut ds, 0, Field::new("digits", DataType::Utf8), |v| {
//!     let s = v.as_str().unwrap_or_default();
//!     Value::Utf8(s.chars().filter(char::is_ascii_digit).collect())
//! });
//!
//! let (kept, stats) = filter_mandatory(&ds, &[1]);
//! assert_eq!(kept.row_count(), 1);
//! assert_eq!(stats.dropped(), 1);
//! ```

pub mod filter;
pub mod map;
pub mod profile;

pub use filter::{drop_empty_text_rows, drop_null_rows, filter, filter_mandatory, FilterStats};
pub use map::{derive_column, map_column};
pub use profile::{profile_column, ColumnProfile};
