//! Condition-translating query executor.
//!
//! Generic over the backend client so the PostgREST binding and test
//! backends share the same validation, payload construction, condition
//! application and error translation. Each operation is a single linear
//! pass: validate, build, apply conditions, execute, translate. No retries,
//! no client-side timeouts.

use crate::backend::{BackendResponse, QueryClient, QueryHandle};
use crate::conditions::{apply_conditions, Condition};
use crate::types::{BackendOp, DataAccessError, Result};
use serde_json::{Map, Value};

/// Executor bound to one backend client for its whole lifetime.
///
/// The client is assumed safe for concurrent in-flight operations; this
/// layer adds no locking and never shares a query handle across calls.
pub struct Store<C: QueryClient> {
    client: C,
}

impl<C: QueryClient> Store<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Insert one record built by zipping `columns` and `values`.
    ///
    /// Returns the backend's reported data for the inserted record.
    pub async fn create(
        &self,
        table: &str,
        columns: &[String],
        values: &[Value],
    ) -> Result<Option<Value>> {
        check_table(table)?;
        let payload = build_payload(columns, values)?;

        tracing::debug!(table, columns = columns.len(), "insert");
        let outcome = self.client.insert(table, payload).execute().await;
        finish(BackendOp::Insert, "Failed to create record", outcome)
    }

    /// Delete every record matching the conditions.
    pub async fn remove(&self, table: &str, conditions: &[Condition]) -> Result<Option<Value>> {
        check_table(table)?;
        let query = apply_conditions(self.client.delete(table), conditions)?;

        tracing::debug!(table, conditions = conditions.len(), "delete");
        finish(
            BackendOp::Delete,
            "Failed to remove record",
            query.execute().await,
        )
    }

    /// Update matching records with the zipped column/value payload.
    pub async fn update(
        &self,
        table: &str,
        columns: &[String],
        values: &[Value],
        conditions: &[Condition],
    ) -> Result<Option<Value>> {
        check_table(table)?;
        let payload = build_payload(columns, values)?;
        let query = apply_conditions(self.client.update(table, payload), conditions)?;

        tracing::debug!(table, conditions = conditions.len(), "update");
        finish(
            BackendOp::Update,
            "Failed to update record",
            query.execute().await,
        )
    }

    /// Select the projected columns from matching records.
    pub async fn select(
        &self,
        table: &str,
        columns: &str,
        conditions: &[Condition],
    ) -> Result<Option<Value>> {
        check_table(table)?;
        let query = apply_conditions(self.client.select(table, columns), conditions)?;

        tracing::debug!(table, columns, conditions = conditions.len(), "select");
        finish(
            BackendOp::Select,
            "Failed to select records",
            query.execute().await,
        )
    }
}

fn check_table(table: &str) -> Result<()> {
    if table.is_empty() {
        return Err(DataAccessError::MissingTable);
    }
    Ok(())
}

/// Zip columns and values into a record payload. Last write wins when a
/// column repeats.
fn build_payload(columns: &[String], values: &[Value]) -> Result<Map<String, Value>> {
    if columns.len() != values.len() {
        return Err(DataAccessError::ColumnValueMismatch);
    }
    let mut payload = Map::new();
    for (column, value) in columns.iter().zip(values) {
        payload.insert(column.clone(), value.clone());
    }
    Ok(payload)
}

/// Translate an execution outcome into the uniform success-or-error
/// contract: a backend-reported error becomes "{op} error: ...", and every
/// execution failure is wrapped with the per-operation "Failed to ..."
/// context.
fn finish(op: BackendOp, context: &str, outcome: Result<BackendResponse>) -> Result<Option<Value>> {
    outcome
        .and_then(|response| match response.error {
            Some(body) => Err(DataAccessError::Backend {
                op,
                message: body.message,
            }),
            None => Ok(response.data),
        })
        .map_err(|source| DataAccessError::Operation {
            context: context.to_string(),
            source: Box::new(source),
        })
}
