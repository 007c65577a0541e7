use std::fs;
use std::path::PathBuf;

use policyholders_transform::pipeline::config::OUTPUT_COLUMNS;
use policyholders_transform::{convert_file, ConvertOptions, TransformError};
use tempfile::TempDir;

fn staged_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::copy("tests/fixtures/policyholders.csv", &path).unwrap();
    (dir, path)
}

#[test]
fn convert_file_writes_converted_sibling() {
    let (dir, input) = staged_fixture("users.csv");

    let summary = convert_file(&input, &ConvertOptions::default()).unwrap();
    assert_eq!(summary.output, dir.path().join("users_converted.csv"));
    assert_eq!(summary.rows_read, 4);
    assert_eq!(summary.rows_written, 2);
    assert_eq!(summary.filter.dropped(), 2);

    let mut rdr = csv::Reader::from_path(&summary.output).unwrap();
    let header: Vec<String> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
    assert_eq!(header, OUTPUT_COLUMNS.to_vec());

    let records: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][0], "1001");
    assert_eq!(&records[0][1], "Ana María");
    assert_eq!(&records[0][6], "1985-03-15");
    assert_eq!(&records[0][11], "666777888");
    // Unparseable dates are written as empty fields.
    assert_eq!(&records[1][6], "");
    assert_eq!(&records[1][7], "");
}

#[test]
fn output_quotes_text_and_leaves_numbers_bare() {
    let (_dir, input) = staged_fixture("users.csv");

    let summary = convert_file(&input, &ConvertOptions::default()).unwrap();
    let text = fs::read_to_string(&summary.output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("\"NUM_POLIZA\",\"Given Name\","));
    assert_eq!(
        lines[1],
        "1001,\"Ana María\",\"García del Campo\",\"TITULAR\",\"S\",\"F\",\"1985-03-15\",\
         \"2010-01-01\",\"Home\",\"ana@example.com\",\"Mobile\",\"666777888\",\"Home\",\
         \"931234567\",\"12345678Z\",\"ISSADB\""
    );
    // Empty text and unparseable dates are still quoted text fields.
    assert_eq!(
        lines[2],
        "1004,\"José\",\"De La Fuente\",\"TITULAR\",\"V\",\"M\",\"\",\"\",\"Home\",\"\",\
         \"Mobile\",\"712345678\",\"Home\",\"912345678\",\"45678901X\",\"ISSADB\""
    );
    assert!(!text.contains('\r'));
}

#[test]
fn explicit_output_path_is_used() {
    let (dir, input) = staged_fixture("users.csv");
    let target = dir.path().join("out.csv");
    let options = ConvertOptions {
        output_path: Some(target.clone()),
        ..ConvertOptions::default()
    };

    let summary = convert_file(&input, &options).unwrap();
    assert_eq!(summary.output, target);
    assert!(target.exists());
    assert!(!dir.path().join("users_converted.csv").exists());
}

#[test]
fn schema_error_leaves_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.csv");
    let original = fs::read_to_string("tests/fixtures/policyholders.csv").unwrap();
    // Strip the trailing Telefono column from every line.
    let truncated: String = original
        .lines()
        .map(|line| {
            let end = line.rfind(',').unwrap();
            format!("{}\n", &line[..end])
        })
        .collect();
    fs::write(&input, truncated).unwrap();

    let err = convert_file(&input, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        &err,
        TransformError::MissingColumn { column, .. } if column == "Telefono"
    ));
    assert!(!dir.path().join("broken_converted.csv").exists());
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(dir.path().join("nope.csv"), &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, TransformError::Csv(_)));
    assert!(!dir.path().join("nope_converted.csv").exists());
}
