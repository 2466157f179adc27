//! Typed access to the native result structure.
//!
//! Drivers hand the normalizer a JSON-shaped result whose fields depend on
//! the statement kind: row-returning statements carry an ordered `rows`
//! array, row-counting statements carry a `rowCount` integer. `RawResult`
//! wraps that structure and turns missing or mis-shaped fields into
//! `MalformedResult` errors instead of surfacing as a crash deep in a query
//! pipeline.

use serde_json::{Map, Value as JsonValue};

use crate::error::{RecastError, Result};

/// Borrowed view over a driver's native query result.
#[derive(Debug)]
pub(crate) struct RawResult<'a> {
    value: &'a JsonValue,
}

impl<'a> RawResult<'a> {
    pub(crate) fn new(value: &'a JsonValue) -> Self {
        Self { value }
    }

    /// Returns the ordered row array under `rows`.
    pub(crate) fn rows(&self) -> Result<&'a Vec<JsonValue>> {
        match self.value.get("rows") {
            Some(JsonValue::Array(rows)) => Ok(rows),
            Some(other) => Err(RecastError::malformed_result(format!(
                "expected 'rows' to be an array, got {}",
                json_type_name(other)
            ))),
            None => Err(RecastError::malformed_result(format!(
                "missing 'rows' field (native result is {})",
                json_type_name(self.value)
            ))),
        }
    }

    /// Returns the affected-row count under `rowCount`.
    pub(crate) fn row_count(&self) -> Result<u64> {
        match self.value.get("rowCount") {
            Some(count) => count.as_u64().ok_or_else(|| {
                RecastError::malformed_result(format!(
                    "expected 'rowCount' to be a non-negative integer, got {count}"
                ))
            }),
            None => Err(RecastError::malformed_result(format!(
                "missing 'rowCount' field (native result is {})",
                json_type_name(self.value)
            ))),
        }
    }

    /// Returns the first row of `rows` as a column-to-value record.
    pub(crate) fn first_row(&self) -> Result<&'a Map<String, JsonValue>> {
        let rows = self.rows()?;
        let first = rows
            .first()
            .ok_or_else(|| RecastError::malformed_result("expected at least one row, got none"))?;
        first.as_object().ok_or_else(|| {
            RecastError::malformed_result(format!(
                "expected row to be an object, got {}",
                json_type_name(first)
            ))
        })
    }
}

/// Short JSON type label for error messages.
pub(crate) fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
