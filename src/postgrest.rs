//! Supabase/PostgREST backend binding.
//!
//! Filters become query-string pairs (`field=op.value`), mutations carry a
//! JSON body, and row ranges use the `Range` header. One `reqwest::Client`
//! is created per connection and shared across all queries; reqwest clients
//! are cheap to clone and safe for concurrent use.

use crate::access::DataAccess;
use crate::backend::{BackendErrorBody, BackendResponse, QueryClient, QueryHandle};
use crate::conditions::{render_literal, Condition};
use crate::store::Store;
use crate::types::{DataAccessError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

/// Connection handle: base URL, API key and the shared HTTP client.
///
/// The URL and key are not validated here; invalid credentials surface on
/// the first query as a backend-reported error.
#[derive(Debug)]
pub struct PostgrestClient {
    base_url: String,
    key: String,
    http: Client,
}

impl PostgrestClient {
    pub fn new(url: &str, key: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            http: Client::new(),
        }
    }

    /// Read `SUPABASE_URL` and `SUPABASE_KEY` from the environment.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SUPABASE_URL").map_err(|_| {
            DataAccessError::Config("SUPABASE_URL environment variable not set".to_string())
        })?;
        let key = std::env::var("SUPABASE_KEY").map_err(|_| {
            DataAccessError::Config("SUPABASE_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(&url, &key))
    }

    fn start(&self, table: &str, verb: Verb) -> PostgrestQuery {
        PostgrestQuery {
            http: self.http.clone(),
            url: format!("{}/rest/v1/{}", self.base_url, table),
            key: self.key.clone(),
            verb,
            params: Vec::new(),
            row_range: None,
            body: None,
        }
    }
}

impl QueryClient for PostgrestClient {
    type Query = PostgrestQuery;

    fn insert(&self, table: &str, payload: Map<String, Value>) -> PostgrestQuery {
        let mut query = self.start(table, Verb::Post);
        query.body = Some(Value::Object(payload));
        query
    }

    fn update(&self, table: &str, payload: Map<String, Value>) -> PostgrestQuery {
        let mut query = self.start(table, Verb::Patch);
        query.body = Some(Value::Object(payload));
        query
    }

    fn delete(&self, table: &str) -> PostgrestQuery {
        self.start(table, Verb::Delete)
    }

    fn select(&self, table: &str, columns: &str) -> PostgrestQuery {
        let mut query = self.start(table, Verb::Get);
        query.params.push(("select".to_string(), columns.to_string()));
        query
    }
}

/// One pending PostgREST request, accumulating filters before execution.
pub struct PostgrestQuery {
    http: Client,
    url: String,
    key: String,
    verb: Verb,
    params: Vec<(String, String)>,
    row_range: Option<(String, String)>,
    body: Option<Value>,
}

impl PostgrestQuery {
    fn filter(mut self, field: &str, op: &str, rendered: String) -> Self {
        self.params.push((field.to_string(), format!("{op}.{rendered}")));
        self
    }
}

/// Containment operands: arrays as `{a,b}` literals, objects as JSON.
fn render_containment(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(render_literal)
                .collect::<Vec<_>>()
                .join(",");
            format!("{{{joined}}}")
        }
        Value::Object(_) => value.to_string(),
        other => render_literal(other),
    }
}

#[async_trait]
impl QueryHandle for PostgrestQuery {
    fn eq(self, field: &str, value: &Value) -> Self {
        let rendered = render_literal(value);
        self.filter(field, "eq", rendered)
    }

    fn neq(self, field: &str, value: &Value) -> Self {
        let rendered = render_literal(value);
        self.filter(field, "neq", rendered)
    }

    fn gt(self, field: &str, value: &Value) -> Self {
        let rendered = render_literal(value);
        self.filter(field, "gt", rendered)
    }

    fn gte(self, field: &str, value: &Value) -> Self {
        let rendered = render_literal(value);
        self.filter(field, "gte", rendered)
    }

    fn lt(self, field: &str, value: &Value) -> Self {
        let rendered = render_literal(value);
        self.filter(field, "lt", rendered)
    }

    fn lte(self, field: &str, value: &Value) -> Self {
        let rendered = render_literal(value);
        self.filter(field, "lte", rendered)
    }

    fn like(self, field: &str, value: &Value) -> Self {
        let rendered = render_literal(value);
        self.filter(field, "like", rendered)
    }

    fn ilike(self, field: &str, value: &Value) -> Self {
        let rendered = render_literal(value);
        self.filter(field, "ilike", rendered)
    }

    fn is(self, field: &str, value: &Value) -> Self {
        let rendered = render_literal(value);
        self.filter(field, "is", rendered)
    }

    fn in_list(self, field: &str, value: &Value) -> Self {
        let rendered = match value {
            Value::Array(items) => items
                .iter()
                .map(render_literal)
                .collect::<Vec<_>>()
                .join(","),
            other => render_literal(other),
        };
        self.filter(field, "in", format!("({rendered})"))
    }

    fn contains(self, field: &str, value: &Value) -> Self {
        let rendered = render_containment(value);
        self.filter(field, "cs", rendered)
    }

    fn contained_by(self, field: &str, value: &Value) -> Self {
        let rendered = render_containment(value);
        self.filter(field, "cd", rendered)
    }

    fn or_group(mut self, expression: &str) -> Self {
        self.params
            .push(("or".to_string(), format!("({expression})")));
        self
    }

    fn range(mut self, start: &Value, end: &Value) -> Self {
        self.row_range = Some((render_literal(start), render_literal(end)));
        self
    }

    async fn execute(self) -> Result<BackendResponse> {
        let mut request = match self.verb {
            Verb::Get => self.http.get(&self.url),
            Verb::Post => self.http.post(&self.url),
            Verb::Patch => self.http.patch(&self.url),
            Verb::Delete => self.http.delete(&self.url),
        };

        request = request
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
            .query(&self.params);

        if let Some((start, end)) = &self.row_range {
            request = request
                .header("Range-Unit", "items")
                .header("Range", format!("{start}-{end}"));
        }

        if self.verb != Verb::Get {
            request = request.header("Prefer", "return=representation");
        }

        if let Some(body) = &self.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            DataAccessError::Transport(format!("request to {} failed: {e}", self.url))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            DataAccessError::Transport(format!("failed to read response body: {e}"))
        })?;

        if status.is_success() {
            let data = if text.is_empty() {
                None
            } else {
                serde_json::from_str(&text).ok()
            };
            Ok(BackendResponse { data, error: None })
        } else {
            tracing::debug!(%status, url = %self.url, "backend reported an error");
            let error = serde_json::from_str::<BackendErrorBody>(&text).unwrap_or_else(|_| {
                BackendErrorBody {
                    message: format!("{status}: {text}"),
                    ..Default::default()
                }
            });
            Ok(BackendResponse {
                data: None,
                error: Some(error),
            })
        }
    }
}

/// Supabase-backed executor: the condition-translating store bound to the
/// PostgREST client.
pub struct Supabase {
    store: Store<PostgrestClient>,
}

impl Supabase {
    /// Connect using `SUPABASE_URL` and `SUPABASE_KEY`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            store: Store::new(PostgrestClient::from_env()?),
        })
    }
}

#[async_trait]
impl DataAccess for Supabase {
    fn connect(url: &str, key: &str) -> Result<Self> {
        Ok(Self {
            store: Store::new(PostgrestClient::new(url, key)),
        })
    }

    async fn create(
        &self,
        table: &str,
        columns: &[String],
        values: &[Value],
    ) -> Result<Option<Value>> {
        self.store.create(table, columns, values).await
    }

    async fn remove(&self, table: &str, conditions: &[Condition]) -> Result<Option<Value>> {
        self.store.remove(table, conditions).await
    }

    async fn update(
        &self,
        table: &str,
        columns: &[String],
        values: &[Value],
        conditions: &[Condition],
    ) -> Result<Option<Value>> {
        self.store.update(table, columns, values, conditions).await
    }

    async fn select(
        &self,
        table: &str,
        columns: &str,
        conditions: &[Condition],
    ) -> Result<Option<Value>> {
        self.store.select(table, columns, conditions).await
    }
}
