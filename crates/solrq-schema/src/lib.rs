//! Schema registry for solrq: entity declarations, field types, and the
//! physical suffix mapping the query compiler resolves names against.

pub mod entity;
pub mod schema;
pub mod types;

pub use entity::{EntityDef, EntityInfo};
pub use schema::{Schema, SchemaError};
pub use types::FieldType;
