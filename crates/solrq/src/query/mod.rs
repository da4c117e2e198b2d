//! Query construction: escaping, encoding, field resolution, restriction
//! trees, scopes, and wire-parameter assembly.

mod encode;
mod escape;
mod facet;
mod field;
mod params;
mod restriction;
mod scope;
mod sort;

pub mod expr;
pub mod request;


pub use facet::{FACET_QUERY_PARAM, FacetQuery};
pub use params::SearchParams;
pub use scope::{DynamicScope, FacetScope, RowScope, Search};
pub use sort::SortDirection;
