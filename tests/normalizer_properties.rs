use policyholders_transform::normalize::{
    clean_national_id, extract_landline, extract_mobile, normalize_email, normalize_name,
};
use policyholders_transform::processing::filter_mandatory;
use policyholders_transform::types::{DataSet, DataType, Field, Schema, Value};
use proptest::prelude::*;

fn text_cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::utf8("")),
        "[a-z]{1,6}".prop_map(Value::utf8),
    ]
}

proptest! {
    #[test]
    fn email_normalization_is_idempotent(raw in "[ A-Za-z0-9_.+@-]{0,24}") {
        let once = normalize_email(&raw);
        prop_assert_eq!(normalize_email(&once), once.clone());
        prop_assert!(once.is_empty() || once.contains('@'));
        prop_assert_eq!(once.to_lowercase(), once);
    }

    #[test]
    fn addresses_without_at_sign_are_rejected(raw in "[A-Za-z0-9_. -]{0,24}") {
        prop_assert_eq!(normalize_email(&raw), "");
    }

    #[test]
    fn landline_never_returns_a_mobile_number(raw in "[0-9 /().+-]{0,40}") {
        let landline = extract_landline(&raw);
        prop_assert!(landline.is_empty() || landline.len() == 9);
        prop_assert!(!landline.starts_with('6') && !landline.starts_with('7'));
        let mobile = extract_mobile(&raw);
        prop_assert!(
            mobile.is_empty()
                || (mobile.len() == 9 && (mobile.starts_with('6') || mobile.starts_with('7')))
        );
    }

    #[test]
    fn name_normalization_collapses_whitespace(raw in "[ a-zA-Z`']{0,30}") {
        let name = normalize_name(&raw);
        prop_assert!(!name.starts_with(' ') && !name.ends_with(' '));
        prop_assert!(!name.contains("  "));
        prop_assert!(!name.contains('`'));
    }

    #[test]
    fn national_id_has_no_separators(raw in "[ 0-9a-zA-Z-]{0,16}") {
        let id = clean_national_id(&raw);
        prop_assert!(!id.contains(' ') && !id.contains('-'));
        prop_assert_eq!(id.to_uppercase(), id);
    }

    #[test]
    fn mandatory_filter_keeps_exactly_the_complete_rows(
        rows in prop::collection::vec(prop::collection::vec(text_cell(), 3), 0..20)
    ) {
        let schema = Schema::new(vec![
            Field::new("a", DataType::Utf8),
            Field::new("b", DataType::Utf8),
            Field::new("c", DataType::Utf8),
        ]);
        let expected: Vec<Vec<Value>> = rows
            .iter()
            .filter(|row| row.iter().all(|v| matches!(v, Value::Utf8(s) if !s.is_empty())))
            .cloned()
            .collect();
        let ds = DataSet::new(schema, rows);

        let (kept, stats) = filter_mandatory(&ds, &[0, 1, 2]);
        prop_assert_eq!(&kept.rows, &expected);
        prop_assert_eq!(stats.before, ds.row_count());
        prop_assert!(stats.after_empty <= stats.after_nulls && stats.after_nulls <= stats.before);
    }
}
