use crate::query::restriction::Restriction;

/// Wire parameter key under which every facet row is emitted. The wire
/// format allows the key to repeat, one value per row.
pub const FACET_QUERY_PARAM: &str = "facet.query";

///
/// FacetQuery
///
/// One named facet row and its restriction. The facet name and row label
/// are not part of the wire value; they ride along for the response-mapping
/// layer, which correlates returned counts back to rows.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FacetQuery {
    name: String,
    label: String,
    restriction: Restriction,
}

impl FacetQuery {
    pub(crate) const fn new(name: String, label: String, restriction: Restriction) -> Self {
        Self {
            name,
            label,
            restriction,
        }
    }

    /// Declared facet name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Caller-chosen row label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Wire parameter value for this row.
    #[must_use]
    pub fn to_query(&self) -> String {
        self.restriction.to_filter()
    }
}
