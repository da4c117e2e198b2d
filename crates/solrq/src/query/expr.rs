//! Schema-agnostic restriction expressions.
//!
//! Field names here are plain strings; resolution and kind checking happen
//! when an expression is attached to a scope. Expressions are serializable
//! so recorded queries can replay through the request layer.

use crate::{
    error::QueryError,
    query::{
        encode::encode,
        field::{self, DynamicBase},
        restriction::{Constraint, Restriction},
    },
    value::{FieldValue, Value},
};
use serde::{Deserialize, Serialize};
use solrq_schema::EntityInfo;

///
/// Expr
///
/// Untyped restriction expression tree. Intentionally isomorphic to the
/// resolved [`Restriction`] tree minus field resolution, so lowering is a
/// single recursive pass.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Expr {
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),

    /// Resolve the inner expression's field names as instance names under a
    /// dynamic base.
    Dynamic { base: String, expr: Box<Self> },

    Equal { field: String, value: Value },
    NotEqual { field: String, value: Value },
    LessThan { field: String, value: Value },
    GreaterThan { field: String, value: Value },
    Between { field: String, lower: Value, upper: Value },
    AnyOf { field: String, values: Vec<Value> },
    AllOf { field: String, values: Vec<Value> },
    NoneOf { field: String, values: Vec<Value> },
}

impl Expr {
    /// Resolve field names and kind-check values against the active entity
    /// set, producing the immutable restriction tree. `scope_base` is the
    /// dynamic base of the enclosing scope, if any; leaf field names resolve
    /// as instance names while one is active.
    pub(crate) fn resolve(
        &self,
        entities: &[&EntityInfo],
        scope_base: Option<&DynamicBase>,
    ) -> Result<Restriction, QueryError> {
        match self {
            Self::And(children) => {
                Ok(Restriction::And(resolve_group(
                    children, entities, scope_base, "AND",
                )?))
            }
            Self::Or(children) => {
                Ok(Restriction::Or(resolve_group(
                    children, entities, scope_base, "OR",
                )?))
            }
            Self::Not(inner) => Ok(Restriction::Not(Box::new(
                inner.resolve(entities, scope_base)?,
            ))),
            Self::Dynamic { base, expr } => {
                let base = DynamicBase::resolve(entities, base)?;
                expr.resolve(entities, Some(&base))
            }
            Self::Equal { field, value } => {
                leaf(entities, scope_base, field, |f| {
                    Ok(Constraint::Equal(encode(field, f, value)?))
                })
            }
            Self::NotEqual { field, value } => {
                leaf(entities, scope_base, field, |f| {
                    Ok(Constraint::NotEqual(encode(field, f, value)?))
                })
            }
            Self::LessThan { field, value } => {
                leaf(entities, scope_base, field, |f| {
                    Ok(Constraint::LessThan(encode(field, f, value)?))
                })
            }
            Self::GreaterThan { field, value } => {
                leaf(entities, scope_base, field, |f| {
                    Ok(Constraint::GreaterThan(encode(field, f, value)?))
                })
            }
            Self::Between {
                field,
                lower,
                upper,
            } => leaf(entities, scope_base, field, |f| {
                Ok(Constraint::Between(
                    encode(field, f, lower)?,
                    encode(field, f, upper)?,
                ))
            }),
            Self::AnyOf { field, values } => {
                leaf(entities, scope_base, field, |f| {
                    Ok(Constraint::AnyOf(encode_values(field, f, values, "any_of")?))
                })
            }
            Self::AllOf { field, values } => {
                leaf(entities, scope_base, field, |f| {
                    Ok(Constraint::AllOf(encode_values(field, f, values, "all_of")?))
                })
            }
            Self::NoneOf { field, values } => {
                leaf(entities, scope_base, field, |f| {
                    Ok(Constraint::NoneOf(encode_values(
                        field, f, values, "none_of",
                    )?))
                })
            }
        }
    }
}

fn resolve_group(
    children: &[Expr],
    entities: &[&EntityInfo],
    scope_base: Option<&DynamicBase>,
    label: &str,
) -> Result<Vec<Restriction>, QueryError> {
    if children.is_empty() {
        return Err(QueryError::AmbiguousRestriction {
            reason: format!("empty {label} group"),
        });
    }

    children
        .iter()
        .map(|child| child.resolve(entities, scope_base))
        .collect()
}

fn leaf(
    entities: &[&EntityInfo],
    scope_base: Option<&DynamicBase>,
    name: &str,
    build: impl FnOnce(solrq_schema::FieldType) -> Result<Constraint, QueryError>,
) -> Result<Restriction, QueryError> {
    let field = match scope_base {
        Some(base) => field::resolve_dynamic(base, name),
        None => field::resolve_static(entities, name)?,
    };
    let constraint = build(field.field_type)?;

    Ok(Restriction::Compare { field, constraint })
}

fn encode_values(
    field: &str,
    ty: solrq_schema::FieldType,
    values: &[Value],
    label: &str,
) -> Result<Vec<String>, QueryError> {
    if values.is_empty() {
        return Err(QueryError::AmbiguousRestriction {
            reason: format!("{label} on '{field}' requires at least one value"),
        });
    }

    values.iter().map(|v| encode(field, ty, v)).collect()
}

// ─────────────────────────────────────────────────────────────
// Constructors
// ─────────────────────────────────────────────────────────────

/// Equality restriction.
pub fn eq(field: impl Into<String>, value: impl FieldValue) -> Expr {
    Expr::Equal {
        field: field.into(),
        value: value.to_value(),
    }
}

/// Negated equality restriction.
pub fn ne(field: impl Into<String>, value: impl FieldValue) -> Expr {
    Expr::NotEqual {
        field: field.into(),
        value: value.to_value(),
    }
}

/// Open-ended upper bound: everything strictly below `value`.
pub fn lt(field: impl Into<String>, value: impl FieldValue) -> Expr {
    Expr::LessThan {
        field: field.into(),
        value: value.to_value(),
    }
}

/// Open-ended lower bound: everything strictly above `value`.
pub fn gt(field: impl Into<String>, value: impl FieldValue) -> Expr {
    Expr::GreaterThan {
        field: field.into(),
        value: value.to_value(),
    }
}

/// Closed range between `lower` and `upper`.
pub fn between(
    field: impl Into<String>,
    lower: impl FieldValue,
    upper: impl FieldValue,
) -> Expr {
    Expr::Between {
        field: field.into(),
        lower: lower.to_value(),
        upper: upper.to_value(),
    }
}

/// Match documents holding at least one of `values`.
pub fn any_of<V: FieldValue>(
    field: impl Into<String>,
    values: impl IntoIterator<Item = V>,
) -> Expr {
    Expr::AnyOf {
        field: field.into(),
        values: values.into_iter().map(|v| v.to_value()).collect(),
    }
}

/// Match documents holding every one of `values`.
pub fn all_of<V: FieldValue>(
    field: impl Into<String>,
    values: impl IntoIterator<Item = V>,
) -> Expr {
    Expr::AllOf {
        field: field.into(),
        values: values.into_iter().map(|v| v.to_value()).collect(),
    }
}

/// Match documents holding none of `values`.
pub fn none_of<V: FieldValue>(
    field: impl Into<String>,
    values: impl IntoIterator<Item = V>,
) -> Expr {
    Expr::NoneOf {
        field: field.into(),
        values: values.into_iter().map(|v| v.to_value()).collect(),
    }
}

/// Conjunction over `exprs`.
pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::And(exprs.into_iter().collect())
}

/// Disjunction over `exprs`.
pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Or(exprs.into_iter().collect())
}

/// Negation of `expr`.
#[allow(clippy::should_implement_trait)]
pub fn not(expr: Expr) -> Expr {
    Expr::Not(Box::new(expr))
}

/// Scope the inner expression's field names to instance names under the
/// dynamic base `base`.
pub fn dynamic(base: impl Into<String>, expr: Expr) -> Expr {
    Expr::Dynamic {
        base: base.into(),
        expr: Box::new(expr),
    }
}
