//! Per-table query builder shared by all client variants.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::error::AppError;
use super::traits::QueryExecutor;
use super::types::{Filter, Operation, QueryResult, normalize_insert_payload};

/// Everything a table handle has accumulated before `execute`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuerySpec {
    pub table: String,
    pub columns: Option<String>,
    pub operation: Operation,
    pub filters: Vec<Filter>,
}

impl QuerySpec {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }
}

/// Builder bound to one table.
///
/// Each method consumes and returns the handle so calls chain:
///
/// ```ignore
/// let result = client
///     .table("docs")
///     .select("*")
///     .eq("status", "active")
///     .execute()
///     .await?;
/// ```
pub struct TableHandle {
    spec: QuerySpec,
    executor: Arc<dyn QueryExecutor>,
}

impl TableHandle {
    #[must_use]
    pub fn new(table: impl Into<String>, executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            spec: QuerySpec::new(table),
            executor,
        }
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.spec.table
    }

    /// The state accumulated so far.
    #[must_use]
    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.spec.columns = Some(columns.to_string());
        self
    }

    /// Queue rows for insertion. A single object is wrapped into a batch of one.
    #[must_use]
    pub fn insert(mut self, data: Value) -> Self {
        self.spec.operation = Operation::Insert(normalize_insert_payload(data));
        self
    }

    #[must_use]
    pub fn update(mut self, data: Value) -> Self {
        self.spec.operation = Operation::Update(data);
        self
    }

    #[must_use]
    pub fn delete(mut self) -> Self {
        self.spec.operation = Operation::Delete;
        self
    }

    /// Append an equality filter. Filters are kept in call order.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.spec.filters.push(Filter::eq(column, value));
        self
    }

    /// Run the query, consuming the handle and its pending state.
    pub async fn execute(self) -> Result<QueryResult, AppError> {
        self.executor.execute(self.spec).await
    }
}

impl fmt::Debug for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableHandle")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}
