//! Recorded query requests.
//!
//! A [`QueryRequest`] is the data form of a scope build: a sequence of ops
//! replayed onto the typed scopes. Because ops arrive as data, scope
//! capability rules are enforced here at apply time and surface as
//! [`QueryError::CapabilityUnavailable`]; the typed API enforces the same
//! rules at compile time by omitting the methods.

use crate::{
    error::{QueryError, ScopeKind},
    query::{
        expr::Expr,
        scope::{DynamicScope, FacetScope, RowScope, Search},
        sort::SortDirection,
    },
};
use serde::{Deserialize, Serialize};
use solrq_schema::Schema;

///
/// QueryRequest
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct QueryRequest {
    pub entities: Vec<String>,
    pub ops: Vec<QueryOp>,
}

impl QueryRequest {
    /// Replay onto a fresh [`Search`] and serialize the result.
    pub fn compile(&self, schema: &Schema) -> Result<crate::query::SearchParams, QueryError> {
        let entities: Vec<&str> = self.entities.iter().map(String::as_str).collect();
        let mut search = Search::new(schema, &entities)?;

        for op in &self.ops {
            apply_top(&mut search, op)?;
        }

        Ok(search.params())
    }
}

///
/// QueryOp
///
/// One recorded call. The grammar is uniform across nesting levels; which
/// ops a level accepts is decided where the op is applied.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum QueryOp {
    Filter(Expr),
    Dynamic {
        base: String,
        ops: Vec<QueryOp>,
    },
    Facet {
        name: String,
        rows: Vec<FacetRowRequest>,
    },
    OrderBy {
        field: String,
        direction: SortDirection,
    },
    Paginate {
        page: u32,
        per_page: u32,
    },
}

impl QueryOp {
    const fn name(&self) -> &'static str {
        match self {
            Self::Filter(_) => "filter",
            Self::Dynamic { .. } => "dynamic",
            Self::Facet { .. } => "facet",
            Self::OrderBy { .. } => "order_by",
            Self::Paginate { .. } => "paginate",
        }
    }
}

///
/// FacetRowRequest
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FacetRowRequest {
    pub label: String,
    pub ops: Vec<QueryOp>,
}

fn apply_top(search: &mut Search<'_>, op: &QueryOp) -> Result<(), QueryError> {
    match op {
        QueryOp::Filter(expr) => {
            search.filter(expr.clone())?;
        }
        QueryOp::Dynamic { base, ops } => {
            search.dynamic(base, |scope| {
                for op in ops {
                    apply_dynamic(scope, op)?;
                }
                Ok(())
            })?;
        }
        QueryOp::Facet { name, rows } => {
            search.facet(name.clone(), |scope| apply_rows(scope, rows))?;
        }
        QueryOp::OrderBy { field, direction } => {
            search.order_by(field, *direction)?;
        }
        QueryOp::Paginate { page, per_page } => {
            search.paginate(*page, *per_page);
        }
    }

    Ok(())
}

fn apply_dynamic(scope: &mut DynamicScope<'_>, op: &QueryOp) -> Result<(), QueryError> {
    match op {
        QueryOp::Filter(expr) => {
            scope.filter(expr.clone())?;
        }
        QueryOp::Facet { name, rows } => {
            scope.facet(name.clone(), |facet| apply_rows(facet, rows))?;
        }
        QueryOp::OrderBy { field, direction } => {
            scope.order_by(field, *direction);
        }
        QueryOp::Dynamic { .. } | QueryOp::Paginate { .. } => {
            return Err(QueryError::CapabilityUnavailable {
                operation: op.name().to_string(),
                scope: ScopeKind::Dynamic,
            });
        }
    }

    Ok(())
}

fn apply_rows(scope: &mut FacetScope<'_>, rows: &[FacetRowRequest]) -> Result<(), QueryError> {
    for row in rows {
        scope.row(row.label.clone(), |row_scope| {
            for op in &row.ops {
                apply_row(row_scope, op)?;
            }
            Ok(())
        })?;
    }

    Ok(())
}

fn apply_row(scope: &mut RowScope<'_>, op: &QueryOp) -> Result<(), QueryError> {
    match op {
        QueryOp::Filter(expr) => {
            scope.filter(expr.clone())?;
        }
        // a dynamic block inside a row may only restrict; anything else in
        // it is a row-level capability violation like the op itself
        QueryOp::Dynamic { base, ops } => {
            let mut exprs = Vec::with_capacity(ops.len());
            for inner in ops {
                match inner {
                    QueryOp::Filter(expr) => exprs.push(expr.clone()),
                    other => {
                        return Err(QueryError::CapabilityUnavailable {
                            operation: other.name().to_string(),
                            scope: ScopeKind::FacetRow,
                        });
                    }
                }
            }

            if exprs.is_empty() {
                return Err(QueryError::AmbiguousRestriction {
                    reason: format!("dynamic block over '{base}' has no restrictions"),
                });
            }

            let inner = if exprs.len() == 1 {
                exprs.remove(0)
            } else {
                Expr::And(exprs)
            };
            scope.filter(Expr::Dynamic {
                base: base.clone(),
                expr: Box::new(inner),
            })?;
        }
        QueryOp::Facet { .. } | QueryOp::OrderBy { .. } | QueryOp::Paginate { .. } => {
            return Err(QueryError::CapabilityUnavailable {
                operation: op.name().to_string(),
                scope: ScopeKind::FacetRow,
            });
        }
    }

    Ok(())
}
