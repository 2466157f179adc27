//! Query type inference from SQL text.
//!
//! Uses sqlparser-rs with the PostgreSQL dialect to map a statement to the
//! query type the normalizer should apply, so callers that already hold the
//! SQL they executed do not have to restate it.

use sqlparser::ast::{Expr, Function, Query, SelectItem, SetExpr, Statement};
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

use crate::error::{RecastError, Result};
use crate::normalize::QueryType;

/// Infers the normalizer query type from SQL statements.
#[derive(Debug)]
pub struct QueryTypeInferrer {
    dialect: PostgreSqlDialect,
}

impl Default for QueryTypeInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryTypeInferrer {
    /// Creates a new inferrer.
    pub fn new() -> Self {
        Self {
            dialect: PostgreSqlDialect {},
        }
    }

    /// Infers the query type of a single SQL statement.
    ///
    /// An aggregate type is inferred only when the statement selects exactly
    /// one aggregate expression whose output column carries the aggregate's
    /// name, since that is the column the normalizer reads. Any other
    /// row-returning statement is a plain select. Statements the normalizer
    /// has no rule for fail with [`RecastError::UnsupportedQueryType`].
    pub fn infer(&self, sql: &str) -> Result<QueryType> {
        let statements = Parser::parse_sql(&self.dialect, sql)
            .map_err(|e| RecastError::input(format!("SQL parse error: {e}")))?;

        match statements.as_slice() {
            [] => Err(RecastError::input("empty SQL statement")),
            [statement] => infer_statement(statement),
            _ => Err(RecastError::input(format!(
                "expected a single SQL statement, got {}",
                statements.len()
            ))),
        }
    }
}

/// Convenience function to infer a query type without creating an inferrer.
pub fn infer_query_type(sql: &str) -> Result<QueryType> {
    QueryTypeInferrer::new().infer(sql)
}

fn infer_statement(statement: &Statement) -> Result<QueryType> {
    match statement {
        Statement::Query(query) => Ok(infer_query(query)),
        Statement::Insert(_) => Ok(QueryType::Insert),
        Statement::Update { .. } => Ok(QueryType::Update),
        Statement::Delete(_) => Ok(QueryType::Delete),
        other => {
            let rendered = other.to_string();
            let keyword = rendered.split_whitespace().next().unwrap_or("statement");
            Err(RecastError::unsupported_query_type(keyword.to_lowercase()))
        }
    }
}

/// Distinguishes single-aggregate selects from row-returning ones.
fn infer_query(query: &Query) -> QueryType {
    let SetExpr::Select(select) = query.body.as_ref() else {
        return QueryType::Select;
    };
    match select.projection.as_slice() {
        [item] => aggregate_type(item).unwrap_or(QueryType::Select),
        _ => QueryType::Select,
    }
}

/// Returns the aggregate query type of a lone projection item, if any.
fn aggregate_type(item: &SelectItem) -> Option<QueryType> {
    let (function, alias) = match item {
        SelectItem::UnnamedExpr(Expr::Function(function)) => (function, None),
        SelectItem::ExprWithAlias {
            expr: Expr::Function(function),
            alias,
        } => (function, Some(alias)),
        _ => return None,
    };
    let name = function_name(function)?;
    let query_type = match name.as_str() {
        "sum" => QueryType::Sum,
        "avg" => QueryType::Avg,
        "min" => QueryType::Min,
        "max" => QueryType::Max,
        _ => return None,
    };
    // The normalizer reads the column named after the aggregate, so an
    // alias that renames the output away makes this a plain select.
    match alias {
        Some(alias) if alias.value.to_lowercase() != name => None,
        _ => Some(query_type),
    }
}

fn function_name(function: &Function) -> Option<String> {
    function
        .name
        .0
        .last()
        .map(|ident| ident.value.to_lowercase())
}
