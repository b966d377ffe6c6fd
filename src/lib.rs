//! Backend-agnostic CRUD over a remote store, driven by a declarative
//! condition language.
//!
//! The core is the condition-translation layer: a backend-neutral list of
//! condition descriptors (operator + field + value) is folded into chained
//! filter calls on an opaque query builder, which resolves to a
//! `{data, error}` envelope. Around it sit the four operations (create,
//! remove, update, select) with validation, payload construction and
//! uniform error reporting.
//!
//! The [`backend`] traits are the substitution seam: the shipped binding
//! talks to Supabase/PostgREST over HTTP, and any client exposing the same
//! minimal query-builder surface can be dropped in without touching the
//! condition translation.
//!
//! ```no_run
//! use serde_json::json;
//! use supacrud::{Condition, ConditionType, DataAccess, Supabase};
//!
//! # async fn example() -> supacrud::Result<()> {
//! let db = Supabase::connect("https://project.supabase.co", "service-key")?;
//!
//! let adults = db
//!     .select(
//!         "users",
//!         "*",
//!         &[
//!             Condition::new("age", ConditionType::Gt, json!(18)),
//!             Condition::eq("status", json!("active")),
//!         ],
//!     )
//!     .await?;
//! # let _ = adults;
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod backend;
pub mod conditions;
pub mod postgrest;
pub mod store;
pub mod types;

pub use access::DataAccess;
pub use conditions::{Condition, ConditionType, OrClause};
pub use postgrest::{PostgrestClient, Supabase};
pub use store::Store;
pub use types::{BackendOp, DataAccessError, Result};
