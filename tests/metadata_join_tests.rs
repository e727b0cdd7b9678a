//! End-to-end join-engine scenarios driven through CSV side-files.

use std::collections::HashMap;

use metajoin::{CsvRowSource, JoinConfig, JoinError, KeyRule, MetadataIndex, PayloadMap};

/// Test helper: build an index from inline CSV text.
fn build_index(csv: &str, rules: Vec<KeyRule>) -> Result<MetadataIndex, JoinError> {
    MetadataIndex::build(CsvRowSource::from_reader(csv.as_bytes()), rules)
}

/// Test helper: record with the given attribute pairs.
fn record(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Test helper: payload value as a plain `&str`.
fn value<'a>(payload: &'a PayloadMap, name: &str) -> Option<&'a str> {
    payload.get(name).map(|v| v.as_ref())
}

#[test]
fn payload_columns_are_unclaimed_header_columns_in_order() {
    let index = build_index(
        "Plate,Well,Stain,Exposure\nP1,A01,DAPI,100\n",
        vec![KeyRule::exact("Well", "Well")],
    )
    .unwrap();
    assert_eq!(
        index.payload_columns(),
        &[
            "Plate".to_string(),
            "Stain".to_string(),
            "Exposure".to_string()
        ]
    );
}

#[test]
fn round_trip_returns_the_loaded_row() {
    let index = build_index(
        "Plate,Well,Treatment\nP1,A01,DMSO\nP1,A02,Taxol\nP2,A01,Media\n",
        vec![
            KeyRule::exact("Plate", "Plate"),
            KeyRule::exact("Well", "Well"),
        ],
    )
    .unwrap();

    let payload = index
        .lookup(&record(&[("Plate", "P2"), ("Well", "A01")]))
        .unwrap();
    assert_eq!(value(payload, "Treatment"), Some("Media"));

    let payload = index
        .lookup(&record(&[("Plate", "P1"), ("Well", "A02")]))
        .unwrap();
    assert_eq!(value(payload, "Treatment"), Some("Taxol"));
}

#[test]
fn case_insensitive_rule_matches_across_case() {
    let index = build_index(
        "Plate,Treatment\nWeekOne,DMSO\n",
        vec![KeyRule::case_insensitive("Plate", "Plate")],
    )
    .unwrap();
    let exact = index.lookup(&record(&[("Plate", "WeekOne")])).unwrap();
    assert_eq!(value(exact, "Treatment"), Some("DMSO"));
    let folded = index.lookup(&record(&[("Plate", "WEEKONE")])).unwrap();
    assert_eq!(value(folded, "Treatment"), Some("DMSO"));
}

#[test]
fn exact_rule_rejects_other_case() {
    let index = build_index(
        "Plate,Treatment\nWeekOne,DMSO\n",
        vec![KeyRule::exact("Plate", "Plate")],
    )
    .unwrap();
    let miss = index.lookup(&record(&[("Plate", "WEEKONE")])).unwrap();
    assert!(miss.is_empty());
}

#[test]
fn numeric_rule_matches_by_value() {
    let index = build_index(
        "Site,Label\n2,two\n",
        vec![KeyRule::numeric("Site", "Site")],
    )
    .unwrap();
    let payload = index.lookup(&record(&[("Site", "2.0")])).unwrap();
    assert_eq!(value(payload, "Label"), Some("two"));
}

#[test]
fn numeric_rule_passes_identical_sentinels_without_parsing() {
    let index = build_index(
        "Site,Label\nabc,letters\n",
        vec![KeyRule::numeric("Site", "Site")],
    )
    .unwrap();
    let payload = index.lookup(&record(&[("Site", "abc")])).unwrap();
    assert_eq!(value(payload, "Label"), Some("letters"));
}

#[test]
fn numeric_rule_probe_with_unparseable_value_fails() {
    let index = build_index(
        "Site,Label\n2,two\n",
        vec![KeyRule::numeric("Site", "Site")],
    )
    .unwrap();
    let err = index.lookup(&record(&[("Site", "x")])).unwrap_err();
    assert!(matches!(err, JoinError::Parse { value, .. } if value == "x"));
}

#[test]
fn record_missing_an_attribute_gets_empty_payload() {
    let index = build_index(
        "Plate,Well,Treatment\nP1,A01,DMSO\n",
        vec![
            KeyRule::exact("Plate", "Plate"),
            KeyRule::exact("Well", "Well"),
        ],
    )
    .unwrap();
    // Plate matches; Well is absent from the record.
    let payload = index.lookup(&record(&[("Plate", "P1")])).unwrap();
    assert!(payload.is_empty());
}

#[test]
fn missing_key_column_fails_construction() {
    let err = build_index("A,B\n1,2\n", vec![KeyRule::exact("C", "C")]).unwrap_err();
    assert!(matches!(
        err,
        JoinError::MalformedInput { column: Some(ref c), .. } if c == "C"
    ));
    assert!(err.to_string().contains('C'));
}

#[test]
fn duplicate_key_column_fails_construction() {
    let err = build_index("A,A\n1,2\n", vec![KeyRule::exact("A", "A")]).unwrap_err();
    assert!(matches!(
        err,
        JoinError::MalformedInput { column: Some(ref c), .. } if c == "A"
    ));
}

#[test]
fn short_row_reports_position_and_counts() {
    let err = build_index("A,B\n1\n", vec![KeyRule::exact("A", "A")]).unwrap_err();
    match err {
        JoinError::MalformedInput { line, message, .. } => {
            assert_eq!(line, Some(1));
            assert!(message.contains("only 1 values defined, expected 2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn lookups_are_idempotent() {
    let index = build_index(
        "Well,Treatment\nA01,DMSO\n",
        vec![KeyRule::exact("Well", "Well")],
    )
    .unwrap();
    let rec = record(&[("Well", "A01")]);
    let first = index.lookup(&rec).unwrap().clone();
    let second = index.lookup(&rec).unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn last_row_wins_on_equal_keys() {
    let index = build_index(
        "Well,Treatment\na01,First\nA01,Second\n",
        vec![KeyRule::case_insensitive("Well", "Well")],
    )
    .unwrap();
    assert_eq!(index.len(), 1);
    let payload = index.lookup(&record(&[("Well", "A01")])).unwrap();
    assert_eq!(value(payload, "Treatment"), Some("Second"));
}

#[test]
fn column_and_attribute_names_may_differ() {
    let index = build_index(
        "PlateName,Treatment\nP1,DMSO\n",
        vec![KeyRule::exact("PlateName", "Plate")],
    )
    .unwrap();
    let payload = index.lookup(&record(&[("Plate", "P1")])).unwrap();
    assert_eq!(value(payload, "Treatment"), Some("DMSO"));
}

#[test]
fn extra_fields_on_a_row_are_ignored() {
    let index = build_index(
        "Well,Treatment\nA01,DMSO,spillover\n",
        vec![KeyRule::exact("Well", "Well")],
    )
    .unwrap();
    let payload = index.lookup(&record(&[("Well", "A01")])).unwrap();
    assert_eq!(value(payload, "Treatment"), Some("DMSO"));
}

#[test]
fn config_driven_rules_build_an_index() {
    let config = JoinConfig::from_json(
        r#"{"keys": [{"column": "Well"}, {"column": "Site", "mode": "numeric"}]}"#,
    )
    .unwrap();
    let index = build_index(
        "Well,Site,Stain\nA01,1,DAPI\nA01,2,GFP\n",
        config.to_rules(),
    )
    .unwrap();
    let payload = index
        .lookup(&record(&[("Well", "A01"), ("Site", "2.0")]))
        .unwrap();
    assert_eq!(value(payload, "Stain"), Some("GFP"));
}

#[test]
fn quoted_csv_fields_are_decoded_by_the_source() {
    let index = build_index(
        "Well,Note\nA01,\"contains, a comma\"\n",
        vec![KeyRule::exact("Well", "Well")],
    )
    .unwrap();
    let payload = index.lookup(&record(&[("Well", "A01")])).unwrap();
    assert_eq!(value(payload, "Note"), Some("contains, a comma"));
}
