use crate::entity::{EntityDef, EntityInfo};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// Schema
///
/// Registry of entity declarations, keyed by entity-type name. Definitions
/// are validated on insert; lookups after that point are infallible and
/// cheap, which keeps the query build path free of declaration checks.
///

#[derive(Clone, Debug, Default)]
pub struct Schema {
    entities: BTreeMap<String, EntityInfo>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `def` and register it under its entity-type name.
    pub fn insert(&mut self, def: EntityDef) -> Result<(), SchemaError> {
        let info = validate(def)?;
        if self.entities.contains_key(info.name()) {
            return Err(SchemaError::DuplicateEntity {
                entity: info.name().to_string(),
            });
        }

        self.entities.insert(info.name().to_string(), info);
        Ok(())
    }

    /// Look up a registered entity type by name.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&EntityInfo> {
        self.entities.get(name)
    }

    /// Iterate registered entity types in name order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityInfo> {
        self.entities.values()
    }
}

fn validate(def: EntityDef) -> Result<EntityInfo, SchemaError> {
    let EntityDef {
        name,
        fields,
        dynamic_bases,
    } = def;

    if name.is_empty() {
        return Err(SchemaError::EmptyEntityName);
    }

    let mut field_map = BTreeMap::new();
    for (field, ty) in fields {
        if field.is_empty() {
            return Err(SchemaError::EmptyFieldName {
                entity: name.clone(),
            });
        }
        if field_map.insert(field.clone(), ty).is_some() {
            return Err(SchemaError::DuplicateField {
                entity: name.clone(),
                field,
            });
        }
    }

    let mut base_map = BTreeMap::new();
    for (base, ty) in dynamic_bases {
        if base.is_empty() {
            return Err(SchemaError::EmptyFieldName {
                entity: name.clone(),
            });
        }
        if field_map.contains_key(&base) {
            return Err(SchemaError::ShadowedDynamicBase {
                entity: name.clone(),
                base,
            });
        }
        if base_map.insert(base.clone(), ty).is_some() {
            return Err(SchemaError::DuplicateDynamicBase {
                entity: name.clone(),
                base,
            });
        }
    }

    Ok(EntityInfo::new(name, field_map, base_map))
}

///
/// SchemaError
///
/// Declaration-time failures. These abort registration; a schema never
/// holds a partially inserted entity.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("entity '{entity}' declares dynamic base '{base}' more than once")]
    DuplicateDynamicBase { entity: String, base: String },

    #[error("entity type '{entity}' is already registered")]
    DuplicateEntity { entity: String },

    #[error("entity '{entity}' declares field '{field}' more than once")]
    DuplicateField { entity: String, field: String },

    #[error("entity type name must not be empty")]
    EmptyEntityName,

    #[error("entity '{entity}' declares a field with an empty name")]
    EmptyFieldName { entity: String },

    #[error("dynamic base '{base}' on entity '{entity}' shadows a static field of the same name")]
    ShadowedDynamicBase { entity: String, base: String },
}
