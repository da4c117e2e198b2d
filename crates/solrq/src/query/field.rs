use crate::{
    error::QueryError,
    query::escape::{DYNAMIC_SEPARATOR, escape},
};
use solrq_schema::{EntityInfo, FieldType};

///
/// ResolvedField
///
/// A field reference resolved against every targeted entity type. It
/// carries the two physical renderings the wire syntax needs: filter
/// positions escape the dynamic separator, sort positions do not, because
/// the sort grammar never tokenizes on the colon.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ResolvedField {
    pub filter_name: String,
    pub sort_name: String,
    pub field_type: FieldType,
}

///
/// DynamicBase
///
/// A dynamic-field base validated against the active entity set. Instance
/// names under the base are caller-chosen and need no declaration.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DynamicBase {
    pub name: String,
    pub field_type: FieldType,
}

impl DynamicBase {
    /// Validate `base` against the entity set. Valid only if every targeted
    /// type declares it, with the same field type.
    pub(crate) fn resolve(entities: &[&EntityInfo], base: &str) -> Result<Self, QueryError> {
        let field_type = common_type(entities, base, EntityInfo::dynamic_base)?;

        Ok(Self {
            name: base.to_string(),
            field_type,
        })
    }
}

/// Resolve a static field against the entity set. Valid only if every
/// targeted type declares it, with the same field type.
pub(crate) fn resolve_static(
    entities: &[&EntityInfo],
    name: &str,
) -> Result<ResolvedField, QueryError> {
    let field_type = common_type(entities, name, EntityInfo::field)?;
    let suffix = field_type.suffix();

    Ok(ResolvedField {
        filter_name: format!("{}{suffix}", escape(name)),
        sort_name: format!("{name}{suffix}"),
        field_type,
    })
}

/// Resolve an instance name under an already validated dynamic base.
pub(crate) fn resolve_dynamic(base: &DynamicBase, instance: &str) -> ResolvedField {
    let suffix = base.field_type.suffix();

    ResolvedField {
        filter_name: format!(
            "{}{DYNAMIC_SEPARATOR}{}{suffix}",
            escape(&base.name),
            escape(instance)
        ),
        sort_name: format!("{}:{instance}{suffix}", base.name),
        field_type: base.field_type,
    }
}

/// Look up `name` on every entity via `get`, requiring agreement. The error
/// names the first entity that fails to declare the field (or declares it
/// with a conflicting type), which is the detail callers need to fix their
/// schema or their query.
fn common_type(
    entities: &[&EntityInfo],
    name: &str,
    get: impl Fn(&EntityInfo, &str) -> Option<FieldType>,
) -> Result<FieldType, QueryError> {
    let mut found: Option<FieldType> = None;
    for entity in entities {
        match get(entity, name) {
            Some(ty) if found.is_none() || found == Some(ty) => found = Some(ty),
            _ => {
                return Err(QueryError::UnrecognizedField {
                    field: name.to_string(),
                    entity: entity.name().to_string(),
                });
            }
        }
    }

    found.ok_or_else(|| QueryError::UnrecognizedField {
        field: name.to_string(),
        entity: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solrq_schema::{EntityDef, Schema};

    fn schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .insert(
                EntityDef::new("Post")
                    .field("title", FieldType::MultiText)
                    .field("sort_title", FieldType::Text)
                    .dynamic("custom_string", FieldType::Text)
                    .dynamic("custom_integer", FieldType::Integer),
            )
            .expect("valid schema");
        schema
            .insert(
                EntityDef::new("Comment")
                    .field("title", FieldType::MultiText)
                    .dynamic("custom_string", FieldType::Text)
                    .dynamic("custom_integer", FieldType::Text),
            )
            .expect("valid schema");
        schema
    }

    #[test]
    fn static_fields_resolve_with_suffix() {
        let schema = schema();
        let entities = [schema.entity("Post").unwrap()];

        let field = resolve_static(&entities, "title").expect("declared");
        assert_eq!(field.filter_name, "title_ss");
        assert_eq!(field.sort_name, "title_ss");
        assert_eq!(field.field_type, FieldType::MultiText);
    }

    #[test]
    fn dynamic_fields_resolve_with_escaped_separator() {
        let schema = schema();
        let entities = [schema.entity("Post").unwrap()];

        let base = DynamicBase::resolve(&entities, "custom_string").expect("declared");
        let field = resolve_dynamic(&base, "test");
        assert_eq!(field.filter_name, "custom_string\\:test_s");
        assert_eq!(field.sort_name, "custom_string:test_s");
    }

    #[test]
    fn unknown_references_fail_with_the_offending_name() {
        let schema = schema();
        let entities = [schema.entity("Post").unwrap()];

        let err = resolve_static(&entities, "bogus").expect_err("unknown");
        assert_eq!(
            err,
            QueryError::UnrecognizedField {
                field: "bogus".to_string(),
                entity: "Post".to_string(),
            }
        );

        assert!(DynamicBase::resolve(&entities, "bogus").is_err());
    }

    #[test]
    fn dynamic_base_must_be_common_to_all_entities() {
        let schema = schema();
        let entities = [
            schema.entity("Post").unwrap(),
            schema.entity("Comment").unwrap(),
        ];

        // declared on both with the same type
        assert!(DynamicBase::resolve(&entities, "custom_string").is_ok());

        // declared on both but with conflicting types
        let err = DynamicBase::resolve(&entities, "custom_integer").expect_err("conflict");
        assert_eq!(
            err,
            QueryError::UnrecognizedField {
                field: "custom_integer".to_string(),
                entity: "Comment".to_string(),
            }
        );

        // declared on only one
        let err = resolve_static(&entities, "sort_title").expect_err("missing on Comment");
        assert_eq!(
            err,
            QueryError::UnrecognizedField {
                field: "sort_title".to_string(),
                entity: "Comment".to_string(),
            }
        );
    }
}
