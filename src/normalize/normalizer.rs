//! Normalization of native driver results into the shared report shape.
//!
//! Each query type reads a different part of the native result: row-returning
//! queries consume the `rows` array, write queries consume `rowCount`, and
//! aggregate queries pull a single value out of the first row. The dispatch
//! is total over [`QueryType`], so adding a variant forces a decision here.

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{RecastError, Result};
use crate::normalize::raw::{json_type_name, RawResult};
use crate::normalize::{InsertedIds, NormalizedResult, QueryType, Report};

/// Converts native driver results into [`Report`]s.
///
/// The default normalizer reports inserted ids from the first column of each
/// returned row, which matches drivers that return rows in table column
/// order. Use [`with_id_column`](Self::with_id_column) when the id lives in
/// a known column instead.
#[derive(Debug, Clone, Default)]
pub struct ResultNormalizer {
    id_column: Option<String>,
}

impl ResultNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports inserted ids from the named column instead of the first
    /// column of each row.
    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    /// Normalizes `native` according to `query_type` and attaches `meta`
    /// to the report unchanged.
    ///
    /// Fails with [`RecastError::MalformedResult`] when the native result
    /// is missing the fields the query type requires, and with
    /// [`RecastError::NonNumericAggregate`] when an aggregate value cannot
    /// be read as a number.
    pub fn normalize<M>(
        &self,
        query_type: QueryType,
        native: &JsonValue,
        meta: M,
    ) -> Result<Report<M>> {
        debug!("Normalizing native result for {} query", query_type);
        let raw = RawResult::new(native);
        let result = match query_type {
            QueryType::Select => NormalizedResult::Rows(raw.rows()?.clone()),
            QueryType::Insert => NormalizedResult::Inserted(self.extract_inserted_ids(&raw)?),
            QueryType::Update => NormalizedResult::Updated(raw.row_count()?),
            QueryType::Delete => NormalizedResult::Deleted(raw.row_count()?),
            QueryType::Sum => NormalizedResult::Sum(aggregate_value(&raw, "sum")?),
            QueryType::Avg => NormalizedResult::Avg(aggregate_value(&raw, "avg")?),
            QueryType::Min => NormalizedResult::Min(aggregate_value(&raw, "min")?),
            QueryType::Max => NormalizedResult::Max(aggregate_value(&raw, "max")?),
        };
        Ok(Report { result, meta })
    }

    fn extract_inserted_ids(&self, raw: &RawResult) -> Result<InsertedIds> {
        let rows = raw.rows()?;
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            ids.push(self.extract_row_id(row)?);
        }
        // A single-row insert reports its id bare, not as a one-element list.
        Ok(if ids.len() == 1 {
            InsertedIds::One(ids.swap_remove(0))
        } else {
            InsertedIds::Many(ids)
        })
    }

    fn extract_row_id(&self, row: &JsonValue) -> Result<JsonValue> {
        let record = row.as_object().ok_or_else(|| {
            RecastError::malformed_result(format!(
                "expected inserted row to be an object, got {}",
                json_type_name(row)
            ))
        })?;
        match &self.id_column {
            Some(column) => record.get(column).cloned().ok_or_else(|| {
                RecastError::malformed_result(format!("inserted row has no '{column}' column"))
            }),
            None => record
                .values()
                .next()
                .cloned()
                .ok_or_else(|| RecastError::malformed_result("inserted row has no columns")),
        }
    }
}

/// Normalizes `native` with the default extraction rules.
///
/// Convenience wrapper around [`ResultNormalizer::normalize`] for callers
/// that do not override the id column.
pub fn normalize<M>(query_type: QueryType, native: &JsonValue, meta: M) -> Result<Report<M>> {
    ResultNormalizer::new().normalize(query_type, native, meta)
}

/// Reads the aggregate value from the first row's `column` field.
fn aggregate_value(raw: &RawResult, column: &str) -> Result<f64> {
    let row = raw.first_row()?;
    let value = row.get(column).ok_or_else(|| {
        RecastError::malformed_result(format!("aggregate row has no '{column}' column"))
    })?;
    coerce_number(column, value)
}

/// Coerces an aggregate field to a float.
///
/// Drivers disagree on whether aggregates arrive as JSON numbers or as
/// decimal strings (Postgres renders NUMERIC as text), so both are accepted.
/// Everything else is a hard error rather than a silent NaN.
fn coerce_number(column: &str, value: &JsonValue) -> Result<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64().ok_or_else(|| {
            RecastError::non_numeric_aggregate(format!(
                "'{column}' value {n} does not fit in a float"
            ))
        }),
        JsonValue::String(s) => {
            let parsed = s.trim().parse::<f64>().map_err(|_| {
                RecastError::non_numeric_aggregate(format!(
                    "'{column}' value '{s}' is not a number"
                ))
            })?;
            if parsed.is_finite() {
                Ok(parsed)
            } else {
                Err(RecastError::non_numeric_aggregate(format!(
                    "'{column}' value '{s}' is not a finite number"
                )))
            }
        }
        other => Err(RecastError::non_numeric_aggregate(format!(
            "'{column}' value is {}, expected a number or numeric string",
            json_type_name(other)
        ))),
    }
}
