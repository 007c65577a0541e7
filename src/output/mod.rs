//! Writing the cleaned export.

pub mod csv;

pub use self::csv::{
    output_path_for, render_value, write_csv_to_bytes, write_csv_to_path, write_csv_to_writer,
    WriteOptions,
};
