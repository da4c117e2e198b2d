use crate::types::FieldType;
use std::collections::BTreeMap;

///
/// EntityDef
///
/// Declaration of one searchable entity type: its static fields and its
/// dynamic-field bases, each with a declared type. Declarations are
/// collected in call order and validated when the definition is inserted
/// into a [`crate::Schema`]; the builder itself never fails.
///

#[derive(Clone, Debug)]
pub struct EntityDef {
    pub(crate) name: String,
    pub(crate) fields: Vec<(String, FieldType)>,
    pub(crate) dynamic_bases: Vec<(String, FieldType)>,
}

impl EntityDef {
    /// Start a declaration for the entity type `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            dynamic_bases: Vec::new(),
        }
    }

    /// Declare a static field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push((name.into(), ty));
        self
    }

    /// Declare a dynamic-field base. Instance names under the base are
    /// chosen by callers at query time and are not declared here.
    #[must_use]
    pub fn dynamic(mut self, base: impl Into<String>, ty: FieldType) -> Self {
        self.dynamic_bases.push((base.into(), ty));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

///
/// EntityInfo
///
/// Validated, lookup-ready form of an [`EntityDef`]. This is the only
/// schema surface the query compiler consults.
///

#[derive(Clone, Debug)]
pub struct EntityInfo {
    name: String,
    fields: BTreeMap<String, FieldType>,
    dynamic_bases: BTreeMap<String, FieldType>,
}

impl EntityInfo {
    pub(crate) const fn new(
        name: String,
        fields: BTreeMap<String, FieldType>,
        dynamic_bases: BTreeMap<String, FieldType>,
    ) -> Self {
        Self {
            name,
            fields,
            dynamic_bases,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type of a static field, if the field exists.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).copied()
    }

    /// Declared type of a dynamic base, if the base exists.
    #[must_use]
    pub fn dynamic_base(&self, base: &str) -> Option<FieldType> {
        self.dynamic_bases.get(base).copied()
    }

    /// Iterate declared static fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Iterate declared dynamic bases in name order.
    pub fn dynamic_bases(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.dynamic_bases
            .iter()
            .map(|(name, ty)| (name.as_str(), *ty))
    }
}
