//! Result normalization module.
//!
//! Converts the native result object handed back by a database driver into
//! the normalized shape expected by ORM-level callers, keyed by the logical
//! query type that produced it.

mod normalizer;
mod raw;

pub use normalizer::{normalize, ResultNormalizer};

use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::RecastError;

/// The logical query operation a native result came from.
///
/// String forms are the lowercase tags (`"select"`, `"sum"`, ...); parsing
/// additionally accepts `"average"` as a legacy alias for `avg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    Sum,
    #[serde(alias = "average")]
    Avg,
    Min,
    Max,
}

impl QueryType {
    /// Returns the canonical lowercase tag for this query type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl FromStr for QueryType {
    type Err = RecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "select" => Ok(Self::Select),
            "insert" => Ok(Self::Insert),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "sum" => Ok(Self::Sum),
            "avg" | "average" => Ok(Self::Avg),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            _ => Err(RecastError::unsupported_query_type(s)),
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifiers extracted from the rows an insert returned.
///
/// A single inserted record unwraps to its bare identifier; anything else
/// stays a sequence (including the empty insert).
#[derive(Debug, Clone, PartialEq)]
pub enum InsertedIds {
    One(JsonValue),
    Many(Vec<JsonValue>),
}

impl Serialize for InsertedIds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::One(value) => value.serialize(serializer),
            Self::Many(values) => values.serialize(serializer),
        }
    }
}

/// Normalized result of a query, independent of the driver that produced it.
///
/// Serializes to the wire shapes downstream callers consume: `Rows` as the
/// bare row array, everything else as a single-key object
/// (`{"inserted": ...}`, `{"numRecordsUpdated": n}`, `{"sum": x}`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResult {
    /// Rows returned by a select, passed through unchanged.
    Rows(Vec<JsonValue>),
    /// Identifiers extracted from the rows returned by an insert.
    Inserted(InsertedIds),
    /// Number of records touched by an update.
    Updated(u64),
    /// Number of records removed by a delete.
    Deleted(u64),
    /// Value of a sum aggregate.
    Sum(f64),
    /// Value of an avg aggregate.
    Avg(f64),
    /// Value of a min aggregate.
    Min(f64),
    /// Value of a max aggregate.
    Max(f64),
}

impl NormalizedResult {
    /// Returns the query type this result was normalized for.
    pub fn query_type(&self) -> QueryType {
        match self {
            Self::Rows(_) => QueryType::Select,
            Self::Inserted(_) => QueryType::Insert,
            Self::Updated(_) => QueryType::Update,
            Self::Deleted(_) => QueryType::Delete,
            Self::Sum(_) => QueryType::Sum,
            Self::Avg(_) => QueryType::Avg,
            Self::Min(_) => QueryType::Min,
            Self::Max(_) => QueryType::Max,
        }
    }
}

impl Serialize for NormalizedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        fn keyed<S: Serializer, T: Serialize>(
            serializer: S,
            key: &'static str,
            value: &T,
        ) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry(key, value)?;
            map.end()
        }

        match self {
            Self::Rows(rows) => rows.serialize(serializer),
            Self::Inserted(ids) => keyed(serializer, "inserted", ids),
            Self::Updated(count) => keyed(serializer, "numRecordsUpdated", count),
            Self::Deleted(count) => keyed(serializer, "numRecordsDeleted", count),
            Self::Sum(value) => keyed(serializer, "sum", value),
            Self::Avg(value) => keyed(serializer, "avg", value),
            Self::Min(value) => keyed(serializer, "min", value),
            Self::Max(value) => keyed(serializer, "max", value),
        }
    }
}

/// Report returned by the normalizer: the normalized result plus the
/// caller's metadata, passed through untouched.
///
/// `meta` is opaque to this crate; it is never inspected or mutated, only
/// carried from input to output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report<M> {
    /// The normalized version of the native result.
    pub result: NormalizedResult,
    /// Reserved for driver-specific extensions; returned as given.
    pub meta: M,
}
