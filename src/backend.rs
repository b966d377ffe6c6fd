//! Minimal abstraction over the remote backend's fluent query builder.
//!
//! The executor only ever needs the operations declared here: start a query
//! for one table, chain per-operator filters onto it, and resolve it into a
//! `{data, error}` envelope. Keeping the surface this small lets alternative
//! backends substitute without touching the condition-translation logic.

use crate::types::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Error body the backend reports inside a resolved response.
///
/// Field names mirror the PostgREST error shape; anything the backend omits
/// defaults to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// The `{data, error}` envelope a resolved query yields.
///
/// A resolved call either carries data (possibly null/empty) or a
/// backend-reported error; transport failures never produce an envelope and
/// surface as [`crate::types::DataAccessError::Transport`] instead.
#[derive(Debug, Clone, Default)]
pub struct BackendResponse {
    pub data: Option<Value>,
    pub error: Option<BackendErrorBody>,
}

/// One pending query: a mutable builder accumulating filters before
/// execution.
///
/// Handles are created fresh per operation, threaded through zero or more
/// filter calls, executed once, and discarded. Every filter method consumes
/// and returns the handle.
#[async_trait]
pub trait QueryHandle: Sized + Send {
    fn eq(self, field: &str, value: &Value) -> Self;
    fn neq(self, field: &str, value: &Value) -> Self;
    fn gt(self, field: &str, value: &Value) -> Self;
    fn gte(self, field: &str, value: &Value) -> Self;
    fn lt(self, field: &str, value: &Value) -> Self;
    fn lte(self, field: &str, value: &Value) -> Self;
    fn like(self, field: &str, value: &Value) -> Self;
    fn ilike(self, field: &str, value: &Value) -> Self;
    fn is(self, field: &str, value: &Value) -> Self;
    fn in_list(self, field: &str, value: &Value) -> Self;
    fn contains(self, field: &str, value: &Value) -> Self;
    fn contained_by(self, field: &str, value: &Value) -> Self;

    /// Apply a pre-rendered OR expression (`"a.eq.1,b.eq.2"`).
    fn or_group(self, expression: &str) -> Self;

    /// Restrict the result to a row range `[start, end]`.
    fn range(self, start: &Value, end: &Value) -> Self;

    /// Resolve the query into a `{data, error}` envelope.
    async fn execute(self) -> Result<BackendResponse>;
}

/// Connection handle to the backend: creates query handles scoped to one
/// table and one operation.
pub trait QueryClient: Send + Sync {
    type Query: QueryHandle;

    fn insert(&self, table: &str, payload: Map<String, Value>) -> Self::Query;
    fn update(&self, table: &str, payload: Map<String, Value>) -> Self::Query;
    fn delete(&self, table: &str) -> Self::Query;
    fn select(&self, table: &str, columns: &str) -> Self::Query;
}
