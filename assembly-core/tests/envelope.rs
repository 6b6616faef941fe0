use assembly_core::envelope::{find_result, rows, total_count};
use assembly_core::{classify, Outcome, Severity};
use serde_json::json;

fn envelope(key: &str, code: &str) -> serde_json::Value {
    json!({
        key: [
            { "head": [
                { "list_total_count": 2 },
                { "RESULT": { "CODE": code, "MESSAGE": "message for test" } }
            ] },
            { "row": [ { "HG_NM": "A" }, { "HG_NM": "B" } ] }
        ]
    })
}

#[test]
fn info_000_is_success() {
    assert_eq!(classify(&envelope("ep", "INFO-000"), "ep").unwrap(), Outcome::Success);
}

#[test]
fn info_200_is_empty_success() {
    assert_eq!(classify(&envelope("ep", "INFO-200"), "ep").unwrap(), Outcome::Empty);
}

#[test]
fn benign_codes_raise_with_code_and_message() {
    for code in ["INFO-290", "INFO-300", "INFO-337"] {
        let err = classify(&envelope("ep", code), "ep").unwrap_err();
        assert_eq!(err.code, code);
        assert_eq!(err.message, "message for test");
        assert_eq!(err.severity, Severity::Benign);
    }
}

#[test]
fn other_codes_are_fatal() {
    let err = classify(&envelope("ep", "ERROR-300"), "ep").unwrap_err();
    assert_eq!(err.code, "ERROR-300");
    assert!(!err.is_benign());
    assert_eq!(err.to_string(), "[ERROR-300] message for test");
}

#[test]
fn missing_envelope_is_unclassified() {
    assert_eq!(classify(&json!({"other": []}), "ep").unwrap(), Outcome::Unclassified);
    assert_eq!(classify(&json!({"ep": [ { "row": [] } ]}), "ep").unwrap(), Outcome::Unclassified);
}

#[test]
fn error_only_envelope_without_rows_is_classified() {
    let body = json!({ "RESULT": { "CODE": "INFO-300", "MESSAGE": "x" } });
    // Top-level RESULT without the keyed wrapper is not an envelope.
    assert_eq!(classify(&body, "ep").unwrap(), Outcome::Unclassified);

    let body = json!({ "ep": [ { "head": [ { "RESULT": { "CODE": "ERROR-500" } } ] } ] });
    let found = find_result(&body, "ep").unwrap();
    assert_eq!(found.code, "ERROR-500");
    assert_eq!(found.message, "");
}

#[test]
fn rows_and_total_count_are_extracted() {
    let body = envelope("ep", "INFO-000");
    assert_eq!(rows(&body, "ep").len(), 2);
    assert_eq!(total_count(&body, "ep"), Some(2));
}

#[test]
fn rows_fall_back_to_first_envelope_shaped_key() {
    let body = envelope("actualkey", "INFO-000");
    assert_eq!(rows(&body, "expected").len(), 2);
    assert!(rows(&json!({}), "expected").is_empty());
}
