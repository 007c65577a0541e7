//! Reading the source export.
//!
//! [`csv::read_csv_from_path`] loads the whole file into a [`crate::types::DataSet`] whose
//! schema is the file header; the declared date columns are parsed on the way in.

pub mod csv;

pub use self::csv::{read_csv_from_path, read_csv_from_reader, ReadOptions};
