//! `policyholders-transform` cleans a CSV export of insurance policy owners and beneficiaries
//! into a fixed sixteen-column contact layout.
//!
//! The primary entrypoint is [`convert_file`], which reads the export into an in-memory
//! [`types::DataSet`], runs the [`pipeline::Pipeline`] and writes
//! `<stem>_converted.<ext>` next to the input.
//!
//! ## What the pipeline does
//!
//! 1. drops columns that are no longer used (`N.Orden`, `Grupos`, ...)
//! 2. renames the rest to their export names (`Nombre` → `Given Name`, ...)
//! 3. marks `Gender` as a category column
//! 4. derives contact columns: mobile and landline numbers from `Telefono`, a validated
//!    e-mail, and the fixed `Home`/`Mobile`/`ISSADB` tags
//! 5. normalizes names, e-mail, sex code and NIF in place
//! 6. drops records without a given name, family name or mobile number
//! 7. projects onto [`pipeline::config::OUTPUT_COLUMNS`]
//!
//! Per-value problems never fail a run: each normalizer in [`normalize`] has an explicit
//! fallback. Missing columns are fatal and abort before anything is written.
//!
//! ## Quick example: normalizers
//!
//! ```rust
//! use policyholders_transform::normalize::{
//!     extract_landline, extract_mobile, map_sex_code, normalize_email, normalize_name,
//! };
//!
//! assert_eq!(normalize_name("  josé   maría   DEL  campo  "), "José María del Campo");
//! assert_eq!(normalize_email(" Ana@Example.COM "), "ana@example.com");
//! assert_eq!(normalize_email("not-an-email"), "");
//! assert_eq!(map_sex_code(Some("H")), "M");
//! assert_eq!(extract_mobile("93 666777888 abc"), "666777888");
//! assert_eq!(extract_landline("93 1234567"), "931234567");
//! ```
//!
//! ## Modules
//!
//! - [`convert`]: file-level entrypoint
//! - [`ingestion`]: CSV reading
//! - [`pipeline`]: the column pipeline, its tables and its progress events
//! - [`normalize`]: field normalizers
//! - [`processing`]: column/row primitives and column profiling
//! - [`output`]: CSV writing and output naming
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: error type shared across the crate
//! - [`logging`]: `tracing-subscriber` setup for the binary

pub mod convert;
pub mod error;
pub mod ingestion;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use convert::{convert_file, ConvertOptions, ConvertSummary};
pub use error::{TransformError, TransformResult};
