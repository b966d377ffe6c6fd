//! Backend-agnostic condition descriptors and their translation into
//! chained filter calls.
//!
//! A condition list is a pure conjunction: each descriptor is applied as one
//! sequential filter call on the query handle, so list order never changes
//! the result set.

use crate::backend::QueryHandle;
use crate::types::{DataAccessError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Closed set of filter operators a condition descriptor can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionType {
    #[default]
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    Ilike,
    Is,
    In,
    Contains,
    ContainedBy,
    Or,
    Range,
}

impl ConditionType {
    /// Wire tag for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::Eq => "eq",
            ConditionType::Neq => "neq",
            ConditionType::Gt => "gt",
            ConditionType::Gte => "gte",
            ConditionType::Lt => "lt",
            ConditionType::Lte => "lte",
            ConditionType::Like => "like",
            ConditionType::Ilike => "ilike",
            ConditionType::Is => "is",
            ConditionType::In => "in",
            ConditionType::Contains => "contains",
            ConditionType::ContainedBy => "containedBy",
            ConditionType::Or => "or",
            ConditionType::Range => "range",
        }
    }
}

impl FromStr for ConditionType {
    type Err = DataAccessError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eq" => Ok(ConditionType::Eq),
            "neq" => Ok(ConditionType::Neq),
            "gt" => Ok(ConditionType::Gt),
            "gte" => Ok(ConditionType::Gte),
            "lt" => Ok(ConditionType::Lt),
            "lte" => Ok(ConditionType::Lte),
            "like" => Ok(ConditionType::Like),
            "ilike" => Ok(ConditionType::Ilike),
            "is" => Ok(ConditionType::Is),
            "in" => Ok(ConditionType::In),
            "contains" => Ok(ConditionType::Contains),
            "containedBy" => Ok(ConditionType::ContainedBy),
            "or" => Ok(ConditionType::Or),
            "range" => Ok(ConditionType::Range),
            other => Err(DataAccessError::UnsupportedCondition(other.to_string())),
        }
    }
}

/// One filter predicate in the backend-agnostic condition language.
///
/// The tag is kept as a string so unknown operators stay representable on
/// the wire and fail at application time with a descriptive error, not at
/// deserialization time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Operator tag; defaults to `"eq"` when absent.
    #[serde(default = "default_condition_type")]
    pub condition_type: String,
    pub condition_field: String,
    pub condition_value: Value,
}

fn default_condition_type() -> String {
    "eq".to_string()
}

impl Condition {
    pub fn new(field: impl Into<String>, condition_type: ConditionType, value: Value) -> Self {
        Self {
            condition_type: condition_type.as_str().to_string(),
            condition_field: field.into(),
            condition_value: value,
        }
    }

    /// Equality shorthand, the default operator.
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, ConditionType::Eq, value)
    }
}

/// One arm of an OR group: `{field, operator, value}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrClause {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

/// Render a JSON literal the way the backend's filter syntax expects it:
/// strings bare, numbers and booleans as written, null as `null`.
pub(crate) fn render_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Render OR clauses into a single `field.operator.value,...` expression.
fn render_or(clauses: &[OrClause]) -> String {
    clauses
        .iter()
        .map(|c| format!("{}.{}.{}", c.field, c.operator, render_literal(&c.value)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Apply one condition descriptor to a query handle.
///
/// Pure with respect to the handle: the descriptor is validated first, so a
/// malformed `range` or `or` value fails before the handle is touched.
pub fn apply_condition<Q: QueryHandle>(query: Q, condition: &Condition) -> Result<Q> {
    let tag: ConditionType = condition.condition_type.parse()?;
    let field = condition.condition_field.as_str();
    let value = &condition.condition_value;

    let query = match tag {
        ConditionType::Eq => query.eq(field, value),
        ConditionType::Neq => query.neq(field, value),
        ConditionType::Gt => query.gt(field, value),
        ConditionType::Gte => query.gte(field, value),
        ConditionType::Lt => query.lt(field, value),
        ConditionType::Lte => query.lte(field, value),
        ConditionType::Like => query.like(field, value),
        ConditionType::Ilike => query.ilike(field, value),
        ConditionType::Is => query.is(field, value),
        ConditionType::In => query.in_list(field, value),
        ConditionType::Contains => query.contains(field, value),
        ConditionType::ContainedBy => query.contained_by(field, value),
        ConditionType::Or => {
            let clauses: Vec<OrClause> = serde_json::from_value(value.clone())
                .map_err(|_| DataAccessError::InvalidOr)?;
            query.or_group(&render_or(&clauses))
        }
        ConditionType::Range => {
            let pair = value
                .as_array()
                .filter(|a| a.len() == 2)
                .ok_or(DataAccessError::InvalidRange)?;
            query.range(&pair[0], &pair[1])
        }
    };

    Ok(query)
}

/// Fold a condition list onto a query handle (implicit AND).
pub fn apply_conditions<Q: QueryHandle>(mut query: Q, conditions: &[Condition]) -> Result<Q> {
    for condition in conditions {
        query = apply_condition(query, condition)?;
    }
    Ok(query)
}
