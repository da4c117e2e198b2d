use crate::query::field::ResolvedField;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum SortDirection {
    #[display("asc")]
    #[serde(rename = "asc")]
    Asc,
    #[display("desc")]
    #[serde(rename = "desc")]
    Desc,
}

///
/// SortClause
///
/// One `(field, direction)` pair. Clauses live on the owning scope in
/// append order; that order encodes caller-intended precedence and is
/// preserved verbatim through serialization.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SortClause {
    field: ResolvedField,
    direction: SortDirection,
}

impl SortClause {
    pub(crate) const fn new(field: ResolvedField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    fn render(&self) -> String {
        format!("{} {}", self.field.sort_name, self.direction)
    }
}

/// Join clauses into the wire sort expression. No re-sorting, no dedup.
pub(crate) fn render_sort(clauses: &[SortClause]) -> Option<String> {
    if clauses.is_empty() {
        return None;
    }

    let parts: Vec<String> = clauses.iter().map(SortClause::render).collect();
    Some(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solrq_schema::FieldType;

    fn clause(sort_name: &str, direction: SortDirection) -> SortClause {
        SortClause::new(
            ResolvedField {
                filter_name: sort_name.to_string(),
                sort_name: sort_name.to_string(),
                field_type: FieldType::Text,
            },
            direction,
        )
    }

    #[test]
    fn empty_sort_renders_nothing() {
        assert_eq!(render_sort(&[]), None);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let clauses = [
            clause("b_s", SortDirection::Desc),
            clause("a_s", SortDirection::Asc),
        ];
        assert_eq!(
            render_sort(&clauses).expect("non-empty"),
            "b_s desc, a_s asc"
        );
    }
}
