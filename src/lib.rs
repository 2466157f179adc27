//! Recast - a driver-agnostic normalizer for native SQL query results.
//!
//! Database drivers shape their results differently per statement kind.
//! Recast turns a driver's native result into one report shape keyed by the
//! query type that produced it: rows for selects, inserted ids for inserts,
//! affected-row counts for updates and deletes, and numbers for aggregates.

pub mod config;
pub mod error;
pub mod infer;
pub mod logging;
pub mod normalize;
