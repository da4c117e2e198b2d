//! Client-side query construction for Solr: typed values, schema-validated
//! restrictions, sort and facet building, and wire-parameter assembly.
//!
//! A query is built by sequential calls against a [`query::Search`] scope,
//! then serialized once into [`query::SearchParams`]. Transport, result
//! parsing, and index management live elsewhere; this crate only produces
//! the textual parameters.

pub mod error;
pub mod query;
pub mod value;

pub use solrq_schema as schema;

///
/// Prelude
///
/// Domain vocabulary only; no internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        error::QueryError,
        query::{
            Search, SearchParams, SortDirection,
            expr::{all_of, and, any_of, between, dynamic, eq, gt, lt, ne, none_of, not, or},
        },
        value::{FieldValue, Value},
    };
    pub use solrq_schema::{EntityDef, FieldType, Schema};
}
