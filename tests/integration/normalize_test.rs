//! Normalization integration tests.
//!
//! Runs the normalizer over native results shaped the way the node-postgres
//! driver actually returns them, extra bookkeeping fields included.

use db_recast::error::RecastError;
use db_recast::normalize::{
    normalize, InsertedIds, NormalizedResult, QueryType, ResultNormalizer,
};
use serde_json::{json, Value as JsonValue};

/// A native result as the driver hands it back for a row-returning query.
fn native_select_result() -> JsonValue {
    json!({
        "command": "SELECT",
        "rowCount": 2,
        "oid": null,
        "rows": [
            {"id": 1, "email": "alice@example.com", "active": true},
            {"id": 2, "email": "bob@example.com", "active": false}
        ],
        "fields": [
            {"name": "id", "dataTypeID": 23},
            {"name": "email", "dataTypeID": 25},
            {"name": "active", "dataTypeID": 16}
        ]
    })
}

#[test]
fn test_select_passes_driver_rows_through() {
    let native = native_select_result();
    let report = normalize(QueryType::Select, &native, JsonValue::Null).unwrap();

    let NormalizedResult::Rows(rows) = &report.result else {
        panic!("Expected Rows, got {:?}", report.result);
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["email"], json!("alice@example.com"));
    assert_eq!(rows[1]["active"], json!(false));
}

#[test]
fn test_insert_returning_id() {
    let native = json!({
        "command": "INSERT",
        "rowCount": 1,
        "oid": 0,
        "rows": [{"id": 101}],
        "fields": [{"name": "id", "dataTypeID": 23}]
    });
    let report = normalize(QueryType::Insert, &native, JsonValue::Null).unwrap();
    assert_eq!(
        report.result,
        NormalizedResult::Inserted(InsertedIds::One(json!(101)))
    );
}

#[test]
fn test_multi_row_insert_returning_uuids() {
    let native = json!({
        "command": "INSERT",
        "rowCount": 3,
        "rows": [
            {"uuid": "0b0e0c9a-1111-4a9b-a1d3-000000000001"},
            {"uuid": "0b0e0c9a-1111-4a9b-a1d3-000000000002"},
            {"uuid": "0b0e0c9a-1111-4a9b-a1d3-000000000003"}
        ]
    });
    let report = normalize(QueryType::Insert, &native, JsonValue::Null).unwrap();
    let NormalizedResult::Inserted(InsertedIds::Many(ids)) = &report.result else {
        panic!("Expected Many, got {:?}", report.result);
    };
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], json!("0b0e0c9a-1111-4a9b-a1d3-000000000001"));
}

#[test]
fn test_insert_without_returning_clause() {
    // Without RETURNING the driver reports no rows; there are no ids to
    // extract and that is not an error.
    let native = json!({"command": "INSERT", "rowCount": 1, "rows": []});
    let report = normalize(QueryType::Insert, &native, JsonValue::Null).unwrap();
    assert_eq!(
        report.result,
        NormalizedResult::Inserted(InsertedIds::Many(vec![]))
    );
}

#[test]
fn test_insert_with_configured_id_column() {
    // The driver returns the full row; the id lives in a known column.
    let native = json!({
        "command": "INSERT",
        "rowCount": 1,
        "rows": [{"created_at": "2026-08-25T10:00:00Z", "id": 7, "name": "alice"}]
    });
    let report = ResultNormalizer::new()
        .with_id_column("id")
        .normalize(QueryType::Insert, &native, JsonValue::Null)
        .unwrap();
    assert_eq!(
        report.result,
        NormalizedResult::Inserted(InsertedIds::One(json!(7)))
    );
}

#[test]
fn test_update_reports_affected_rows() {
    let native = json!({"command": "UPDATE", "rowCount": 4, "rows": []});
    let report = normalize(QueryType::Update, &native, JsonValue::Null).unwrap();
    assert_eq!(report.result, NormalizedResult::Updated(4));
}

#[test]
fn test_delete_reports_affected_rows() {
    let native = json!({"command": "DELETE", "rowCount": 12, "rows": []});
    let report = normalize(QueryType::Delete, &native, JsonValue::Null).unwrap();
    assert_eq!(report.result, NormalizedResult::Deleted(12));
}

#[test]
fn test_sum_of_numeric_column_arrives_as_text() {
    // NUMERIC aggregates come back as strings from the wire protocol.
    let native = json!({
        "command": "SELECT",
        "rowCount": 1,
        "rows": [{"sum": "1249.90"}],
        "fields": [{"name": "sum", "dataTypeID": 1700}]
    });
    let report = normalize(QueryType::Sum, &native, JsonValue::Null).unwrap();
    assert_eq!(report.result, NormalizedResult::Sum(1249.90));
}

#[test]
fn test_avg_under_legacy_average_tag() {
    let native = json!({"rowCount": 1, "rows": [{"avg": "3.5"}]});
    let query_type = "average".parse::<QueryType>().unwrap();
    let report = normalize(query_type, &native, JsonValue::Null).unwrap();
    assert_eq!(report.result, NormalizedResult::Avg(3.5));
}

#[test]
fn test_min_and_max_from_integer_columns() {
    let native_min = json!({"rowCount": 1, "rows": [{"min": 3}]});
    let native_max = json!({"rowCount": 1, "rows": [{"max": 117}]});

    let min = normalize(QueryType::Min, &native_min, JsonValue::Null).unwrap();
    let max = normalize(QueryType::Max, &native_max, JsonValue::Null).unwrap();

    assert_eq!(min.result, NormalizedResult::Min(3.0));
    assert_eq!(max.result, NormalizedResult::Max(117.0));
}

#[test]
fn test_meta_travels_with_the_report() {
    let native = json!({"rowCount": 1, "rows": []});
    let meta = json!({"host": "db-1.internal", "elapsedMs": 12, "notices": []});
    let report = normalize(QueryType::Update, &native, meta.clone()).unwrap();
    assert_eq!(report.meta, meta);
}

// Error taxonomy

#[test]
fn test_select_type_over_count_only_result_is_malformed() {
    // Result shape from a write query handed in under the wrong type.
    let native = json!({"command": "UPDATE", "rowCount": 4});
    let err = normalize(QueryType::Select, &native, JsonValue::Null).unwrap_err();
    assert!(matches!(err, RecastError::MalformedResult(_)));
}

#[test]
fn test_update_type_over_rows_only_result_is_malformed() {
    let native = json!({"rows": [{"id": 1}]});
    let err = normalize(QueryType::Update, &native, JsonValue::Null).unwrap_err();
    assert!(matches!(err, RecastError::MalformedResult(_)));
}

#[test]
fn test_sum_over_empty_table_is_non_numeric() {
    // SUM with no matching rows yields SQL NULL.
    let native = json!({"rowCount": 1, "rows": [{"sum": null}]});
    let err = normalize(QueryType::Sum, &native, JsonValue::Null).unwrap_err();
    assert!(matches!(err, RecastError::NonNumericAggregate(_)));
}

#[test]
fn test_max_of_text_column_is_non_numeric() {
    // MAX over a text column is valid SQL but not a numeric aggregate.
    let native = json!({"rowCount": 1, "rows": [{"max": "zurich"}]});
    let err = normalize(QueryType::Max, &native, JsonValue::Null).unwrap_err();
    assert!(matches!(err, RecastError::NonNumericAggregate(_)));
    assert!(err.to_string().contains("zurich"));
}

#[test]
fn test_errors_name_the_offending_field() {
    let native = json!({"rows": "not an array"});
    let err = normalize(QueryType::Select, &native, JsonValue::Null).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Malformed native result: expected 'rows' to be an array, got a string"
    );
}
