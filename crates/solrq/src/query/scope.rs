use crate::{
    error::QueryError,
    query::{
        escape::escape,
        expr::{self, Expr},
        facet::FacetQuery,
        field::{self, DynamicBase},
        params::{PageSpec, SearchParams},
        restriction::Restriction,
        sort::{self, SortClause, SortDirection},
    },
    value::FieldValue,
};
use solrq_schema::{EntityInfo, Schema};

///
/// Search
///
/// Top-level query scope. Owns the restriction forest, sort list, facet
/// rows, entity set, and pagination for one query build. Restrictions,
/// sorts, and facets accumulate through sequential calls; `params`
/// serializes the finished scope tree in a single pass.
///
/// Nested blocks (`dynamic`, `facet`) run a closure against a sub-scope
/// that exposes only the operations legal at that nesting level; pagination,
/// for example, exists on this type alone.
///

#[derive(Debug)]
pub struct Search<'a> {
    entities: Vec<&'a EntityInfo>,
    restrictions: Vec<Restriction>,
    sort: Vec<SortClause>,
    facets: Vec<FacetQuery>,
    page: Option<PageSpec>,
}

impl<'a> Search<'a> {
    /// Open a search over one or more registered entity types.
    pub fn new(schema: &'a Schema, entities: &[&str]) -> Result<Self, QueryError> {
        if entities.is_empty() {
            return Err(QueryError::AmbiguousRestriction {
                reason: "a search must target at least one entity type".to_string(),
            });
        }

        let entities = entities
            .iter()
            .map(|name| {
                schema
                    .entity(name)
                    .ok_or_else(|| QueryError::UnrecognizedEntity {
                        entity: (*name).to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            entities,
            restrictions: Vec::new(),
            sort: Vec::new(),
            facets: Vec::new(),
            page: None,
        })
    }

    /// Attach a restriction expression as one top-level filter group.
    pub fn filter(&mut self, expr: Expr) -> Result<&mut Self, QueryError> {
        let restriction = expr.resolve(&self.entities, None)?;
        self.restrictions.push(restriction);
        Ok(self)
    }

    /// Equality sugar for [`Self::filter`].
    pub fn with(&mut self, field: &str, value: impl FieldValue) -> Result<&mut Self, QueryError> {
        self.filter(expr::eq(field, value))
    }

    /// Negated-equality sugar for [`Self::filter`].
    pub fn without(
        &mut self,
        field: &str,
        value: impl FieldValue,
    ) -> Result<&mut Self, QueryError> {
        self.filter(expr::ne(field, value))
    }

    /// Open a dynamic-field block over `base`. The base must be declared by
    /// every targeted entity type; the check runs before the block does.
    pub fn dynamic<F>(&mut self, base: &str, f: F) -> Result<&mut Self, QueryError>
    where
        F: FnOnce(&mut DynamicScope<'a>) -> Result<(), QueryError>,
    {
        let base = DynamicBase::resolve(&self.entities, base)?;
        let mut scope = DynamicScope::new(self.entities.clone(), base);
        f(&mut scope)?;

        let DynamicScope {
            restrictions,
            sort,
            facets,
            ..
        } = scope;

        // the block's restrictions flush as one node so grouping intent
        // survives into the parent forest
        match restrictions.len() {
            0 => {}
            1 => self
                .restrictions
                .extend(restrictions),
            _ => self.restrictions.push(Restriction::And(restrictions)),
        }
        self.sort.extend(sort);
        self.facets.extend(facets);

        Ok(self)
    }

    /// Open a facet block named `name`.
    pub fn facet<F>(&mut self, name: impl Into<String>, f: F) -> Result<&mut Self, QueryError>
    where
        F: FnOnce(&mut FacetScope<'a>) -> Result<(), QueryError>,
    {
        let mut scope = FacetScope::new(self.entities.clone(), name.into(), None);
        f(&mut scope)?;

        self.facets.extend(scope.rows);
        Ok(self)
    }

    /// Append a sort clause; append order is precedence order.
    pub fn order_by(
        &mut self,
        field: &str,
        direction: SortDirection,
    ) -> Result<&mut Self, QueryError> {
        let field = field::resolve_static(&self.entities, field)?;
        self.sort.push(SortClause::new(field, direction));
        Ok(self)
    }

    /// Select a result page. Pages are 1-based; zero is treated as the
    /// first page.
    pub fn paginate(&mut self, page: u32, per_page: u32) -> &mut Self {
        self.page = Some(PageSpec {
            page: page.max(1),
            per_page,
        });
        self
    }

    /// Serialize the finished scope tree into wire parameters.
    #[must_use]
    pub fn params(&self) -> SearchParams {
        let mut filter_queries = Vec::with_capacity(self.restrictions.len() + 1);
        filter_queries.push(type_restriction(&self.entities));
        filter_queries.extend(self.restrictions.iter().map(Restriction::to_filter));

        SearchParams {
            filter_queries,
            sort: sort::render_sort(&self.sort),
            facet_queries: self.facets.iter().map(FacetQuery::to_query).collect(),
            start: self.page.map(PageSpec::start),
            rows: self.page.map(|p| p.per_page),
        }
    }

    /// Facet rows accumulated so far, in declaration order.
    #[must_use]
    pub fn facets(&self) -> &[FacetQuery] {
        &self.facets
    }
}

/// The leading filter restricting results to the targeted entity types.
fn type_restriction(entities: &[&EntityInfo]) -> String {
    match entities {
        [only] => format!("type:{}", escape(only.name())),
        _ => {
            let names: Vec<String> = entities.iter().map(|e| escape(e.name())).collect();
            format!("type:({})", names.join(" OR "))
        }
    }
}

///
/// DynamicScope
///
/// Scope opened by [`Search::dynamic`]. Leaf field names resolve as
/// instance names under the block's base. Sorting and faceting are legal
/// here; pagination is not, and the method accordingly does not exist on
/// this type.
///

#[derive(Debug)]
pub struct DynamicScope<'a> {
    entities: Vec<&'a EntityInfo>,
    base: DynamicBase,
    restrictions: Vec<Restriction>,
    sort: Vec<SortClause>,
    facets: Vec<FacetQuery>,
}

impl<'a> DynamicScope<'a> {
    const fn new(entities: Vec<&'a EntityInfo>, base: DynamicBase) -> Self {
        Self {
            entities,
            base,
            restrictions: Vec::new(),
            sort: Vec::new(),
            facets: Vec::new(),
        }
    }

    /// Attach a restriction; leaf field names are instance names.
    pub fn filter(&mut self, expr: Expr) -> Result<&mut Self, QueryError> {
        let restriction = expr.resolve(&self.entities, Some(&self.base))?;
        self.restrictions.push(restriction);
        Ok(self)
    }

    /// Equality sugar for [`Self::filter`].
    pub fn with(
        &mut self,
        instance: &str,
        value: impl FieldValue,
    ) -> Result<&mut Self, QueryError> {
        self.filter(expr::eq(instance, value))
    }

    /// Negated-equality sugar for [`Self::filter`].
    pub fn without(
        &mut self,
        instance: &str,
        value: impl FieldValue,
    ) -> Result<&mut Self, QueryError> {
        self.filter(expr::ne(instance, value))
    }

    /// Append a sort clause on an instance name under this base.
    pub fn order_by(&mut self, instance: &str, direction: SortDirection) -> &mut Self {
        let field = field::resolve_dynamic(&self.base, instance);
        self.sort.push(SortClause::new(field, direction));
        self
    }

    /// Open a facet block; its rows resolve against this base.
    pub fn facet<F>(&mut self, name: impl Into<String>, f: F) -> Result<&mut Self, QueryError>
    where
        F: FnOnce(&mut FacetScope<'a>) -> Result<(), QueryError>,
    {
        let mut scope = FacetScope::new(
            self.entities.clone(),
            name.into(),
            Some(self.base.clone()),
        );
        f(&mut scope)?;

        self.facets.extend(scope.rows);
        Ok(self)
    }
}

///
/// FacetScope
///
/// Scope opened by `facet` blocks. Only rows can be declared here; each row
/// closes into exactly one facet query. A facet block opened inside a
/// dynamic scope carries that base into its rows, so both nesting shapes
/// serialize identically.
///

#[derive(Debug)]
pub struct FacetScope<'a> {
    entities: Vec<&'a EntityInfo>,
    name: String,
    base: Option<DynamicBase>,
    rows: Vec<FacetQuery>,
}

impl<'a> FacetScope<'a> {
    const fn new(entities: Vec<&'a EntityInfo>, name: String, base: Option<DynamicBase>) -> Self {
        Self {
            entities,
            name,
            base,
            rows: Vec::new(),
        }
    }

    /// Declare one row. The row's restrictions close into a single node; an
    /// empty row is ambiguous and rejected.
    pub fn row<F>(&mut self, label: impl Into<String>, f: F) -> Result<&mut Self, QueryError>
    where
        F: FnOnce(&mut RowScope<'a>) -> Result<(), QueryError>,
    {
        let label = label.into();
        let mut scope = RowScope {
            entities: self.entities.clone(),
            base: self.base.clone(),
            restrictions: Vec::new(),
        };
        f(&mut scope)?;

        let mut restrictions = scope.restrictions;
        let restriction = match restrictions.len() {
            0 => {
                return Err(QueryError::AmbiguousRestriction {
                    reason: format!("facet row '{label}' has no restrictions"),
                });
            }
            1 => restrictions.remove(0),
            _ => Restriction::And(restrictions),
        };

        self.rows
            .push(FacetQuery::new(self.name.clone(), label, restriction));
        Ok(self)
    }
}

///
/// RowScope
///
/// Scope opened by [`FacetScope::row`]. Restrictions only; sorting and
/// pagination have no meaning inside a facet row.
///

#[derive(Debug)]
pub struct RowScope<'a> {
    entities: Vec<&'a EntityInfo>,
    base: Option<DynamicBase>,
    restrictions: Vec<Restriction>,
}

impl RowScope<'_> {
    /// Attach a restriction to this row.
    pub fn filter(&mut self, expr: Expr) -> Result<&mut Self, QueryError> {
        let restriction = expr.resolve(&self.entities, self.base.as_ref())?;
        self.restrictions.push(restriction);
        Ok(self)
    }

    /// Equality sugar for [`Self::filter`].
    pub fn with(&mut self, field: &str, value: impl FieldValue) -> Result<&mut Self, QueryError> {
        self.filter(expr::eq(field, value))
    }

    /// Negated-equality sugar for [`Self::filter`].
    pub fn without(
        &mut self,
        field: &str,
        value: impl FieldValue,
    ) -> Result<&mut Self, QueryError> {
        self.filter(expr::ne(field, value))
    }
}
