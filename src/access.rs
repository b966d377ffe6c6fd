//! Abstract data access contract.

use crate::conditions::Condition;
use crate::types::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Capability set every concrete backend must satisfy.
///
/// Declares all five operations, `connect` included, so implementations
/// cannot diverge on whether connection establishment is part of the
/// contract. Carries no logic: validation, payload construction and error
/// translation live in the implementations.
///
/// `columns` for `select` is a projection string (`"*"` for all columns);
/// `conditions` are combined conjunctively in list order.
#[async_trait]
pub trait DataAccess {
    /// Establish a connection handle from a URL and key. Credentials are not
    /// validated here; invalid ones surface on the first query.
    fn connect(url: &str, key: &str) -> Result<Self>
    where
        Self: Sized;

    async fn create(
        &self,
        table: &str,
        columns: &[String],
        values: &[Value],
    ) -> Result<Option<Value>>;

    async fn remove(&self, table: &str, conditions: &[Condition]) -> Result<Option<Value>>;

    async fn update(
        &self,
        table: &str,
        columns: &[String],
        values: &[Value],
        conditions: &[Condition],
    ) -> Result<Option<Value>>;

    async fn select(
        &self,
        table: &str,
        columns: &str,
        conditions: &[Condition],
    ) -> Result<Option<Value>>;
}
