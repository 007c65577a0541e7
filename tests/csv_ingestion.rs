use chrono::NaiveDate;
use policyholders_transform::ingestion::{read_csv_from_path, read_csv_from_reader, ReadOptions};
use policyholders_transform::types::{DataType, Value};

const FIXTURE: &str = "tests/fixtures/policyholders.csv";

fn plain_options() -> ReadOptions {
    ReadOptions {
        date_columns: vec![],
        numeric_columns: vec![],
        ..ReadOptions::default()
    }
}

#[test]
fn read_csv_from_path_happy_path() {
    let ds = read_csv_from_path(FIXTURE, &ReadOptions::default()).unwrap();

    assert_eq!(ds.row_count(), 4);
    assert_eq!(ds.schema.fields.len(), 21);

    let poliza = ds.schema.index_of("N.Poliza").unwrap();
    assert_eq!(ds.schema.fields[poliza].data_type, DataType::Int64);
    assert_eq!(ds.rows[0][poliza], Value::Int64(1001));

    let nombre = ds.schema.index_of("Nombre").unwrap();
    assert_eq!(ds.rows[0][nombre], Value::utf8("  ana  maría "));
    assert_eq!(ds.rows[2][nombre], Value::Null);

    let birth = ds.schema.index_of("Fecha Nacimiento").unwrap();
    assert_eq!(ds.schema.fields[birth].data_type, DataType::Date);
    assert_eq!(
        ds.rows[0][birth],
        Value::Date(NaiveDate::from_ymd_opt(1985, 3, 15).unwrap())
    );
    assert_eq!(ds.rows[3][birth], Value::InvalidDate("31/02/1990".to_string()));
}

#[test]
fn read_csv_keeps_header_order() {
    let input = "b,a,c\n1,2,3\n";
    let mut rdr = plain_options().reader_builder().from_reader(input.as_bytes());

    let ds = read_csv_from_reader(&mut rdr, &plain_options()).unwrap();
    assert_eq!(ds.schema.field_names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    assert_eq!(ds.rows[0][0], Value::utf8("1"));
}

#[test]
fn read_csv_pads_short_rows_with_nulls() {
    let input = "a,b,c\nx\n";
    let mut rdr = plain_options().reader_builder().from_reader(input.as_bytes());

    let ds = read_csv_from_reader(&mut rdr, &plain_options()).unwrap();
    assert_eq!(ds.rows[0], vec![Value::utf8("x"), Value::Null, Value::Null]);
}

#[test]
fn read_csv_errors_on_long_rows() {
    let input = "a,b\n1,2,3\n";
    let mut rdr = plain_options().reader_builder().from_reader(input.as_bytes());

    let err = read_csv_from_reader(&mut rdr, &plain_options()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("row 2 has 3 fields"));
}

#[test]
fn read_csv_errors_on_missing_date_column() {
    let options = ReadOptions {
        date_columns: vec!["Fecha Nacimiento".to_string()],
        numeric_columns: vec![],
        ..ReadOptions::default()
    };
    let input = "Nombre,Apellidos\nAna,Ruiz\n";
    let mut rdr = options.reader_builder().from_reader(input.as_bytes());

    let err = read_csv_from_reader(&mut rdr, &options).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("missing date column 'Fecha Nacimiento'"));
}

#[test]
fn numeric_column_with_text_stays_text() {
    let options = ReadOptions {
        date_columns: vec![],
        numeric_columns: vec!["N.Poliza".to_string()],
        ..ReadOptions::default()
    };
    let input = "N.Poliza\n1001\nP-7\n\n";
    let mut rdr = options.reader_builder().from_reader(input.as_bytes());

    let ds = read_csv_from_reader(&mut rdr, &options).unwrap();
    assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
    assert_eq!(ds.rows[0][0], Value::utf8("1001"));
    assert_eq!(ds.rows[1][0], Value::utf8("P-7"));
}

#[test]
fn read_csv_from_path_reports_missing_file() {
    let missing = "tests/fixtures/does_not_exist.csv";
    let err = read_csv_from_path(missing, &ReadOptions::default()).unwrap_err();
    assert!(err.to_string().starts_with("csv error"));
}
