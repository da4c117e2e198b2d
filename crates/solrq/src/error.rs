use crate::value::ValueKind;
use derive_more::Display;
use solrq_schema::FieldType;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Build-time failures raised while a query is being constructed. Every
/// error aborts the build; there is no partial or best-effort output, so a
/// malformed query can never silently compile to a different one.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum QueryError {
    /// A restriction that cannot mean anything, such as an empty
    /// disjunction list.
    #[error("ambiguous restriction: {reason}")]
    AmbiguousRestriction { reason: String },

    /// An operation invoked on a scope that does not support it. Distinct
    /// from [`Self::UnrecognizedField`] so callers can tell a bad call site
    /// from a bad field reference.
    #[error("'{operation}' is not available in a {scope} scope")]
    CapabilityUnavailable {
        operation: String,
        scope: ScopeKind,
    },

    #[error("field '{field}' expects a {expected} value, got {found}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: ValueKind,
    },

    #[error("no entity type named '{entity}' is registered")]
    UnrecognizedEntity { entity: String },

    #[error("no field named '{field}' is configured for entity type '{entity}'")]
    UnrecognizedField { field: String, entity: String },
}

///
/// ScopeKind
///
/// Scope label carried by capability errors.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ScopeKind {
    #[display("dynamic")]
    Dynamic,
    #[display("facet row")]
    FacetRow,
}
