use crate::query::facet::FACET_QUERY_PARAM;
use serde::Serialize;

///
/// SearchParams
///
/// Plain-text wire parameters produced by one serialization pass over a
/// finished search scope. Transport-layer encoding and transmission happen
/// elsewhere; nothing here reads a response.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SearchParams {
    /// One entry per top-level restriction group, plus the leading
    /// entity-type restriction.
    pub filter_queries: Vec<String>,
    pub sort: Option<String>,
    /// One entry per facet row, in declaration order.
    pub facet_queries: Vec<String>,
    pub start: Option<u32>,
    pub rows: Option<u32>,
}

impl SearchParams {
    /// Flatten into repeatable `(key, value)` pairs in wire order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        for fq in &self.filter_queries {
            pairs.push(("fq".to_string(), fq.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        for facet in &self.facet_queries {
            pairs.push((FACET_QUERY_PARAM.to_string(), facet.clone()));
        }
        if let Some(start) = self.start {
            pairs.push(("start".to_string(), start.to_string()));
        }
        if let Some(rows) = self.rows {
            pairs.push(("rows".to_string(), rows.to_string()));
        }

        pairs
    }
}

///
/// PageSpec
///
/// Caller-facing pagination, converted to offset/limit at serialization.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PageSpec {
    pub page: u32,
    pub per_page: u32,
}

impl PageSpec {
    pub(crate) const fn start(self) -> u32 {
        (self.page - 1) * self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_follow_wire_order() {
        let params = SearchParams {
            filter_queries: vec!["type:Post".to_string(), "title_ss:bar".to_string()],
            sort: Some("title_ss asc".to_string()),
            facet_queries: vec!["title_ss:foo".to_string()],
            start: Some(20),
            rows: Some(10),
        };

        assert_eq!(
            params.to_pairs(),
            vec![
                ("fq".to_string(), "type:Post".to_string()),
                ("fq".to_string(), "title_ss:bar".to_string()),
                ("sort".to_string(), "title_ss asc".to_string()),
                ("facet.query".to_string(), "title_ss:foo".to_string()),
                ("start".to_string(), "20".to_string()),
                ("rows".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn page_math() {
        assert_eq!(PageSpec { page: 1, per_page: 30 }.start(), 0);
        assert_eq!(PageSpec { page: 3, per_page: 10 }.start(), 20);
    }
}
