use crate::query::field::ResolvedField;

///
/// Constraint
///
/// Comparison payload of a leaf restriction. Values are already kind
/// checked and rendered as escaped literals, so serialization below is
/// pure string assembly.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Constraint {
    Equal(String),
    NotEqual(String),
    LessThan(String),
    GreaterThan(String),
    Between(String, String),
    AnyOf(Vec<String>),
    AllOf(Vec<String>),
    NoneOf(Vec<String>),
}

///
/// Restriction
///
/// Immutable, fully resolved filter expression tree. Children serialize in
/// insertion order; the order is caller-visible and deterministic.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Restriction {
    Compare {
        field: ResolvedField,
        constraint: Constraint,
    },
    And(Vec<Restriction>),
    Or(Vec<Restriction>),
    Not(Box<Restriction>),
}

impl Restriction {
    /// Render this node as filter-query syntax.
    pub(crate) fn to_filter(&self) -> String {
        match self {
            Self::Compare { field, constraint } => render_compare(field, constraint),
            Self::And(children) => render_group(children, " AND "),
            Self::Or(children) => render_group(children, " OR "),
            // negation binds directly to whatever the child renders; double
            // negation passes through literally
            Self::Not(child) => format!("-{}", child.to_filter()),
        }
    }
}

fn render_compare(field: &ResolvedField, constraint: &Constraint) -> String {
    let name = &field.filter_name;

    match constraint {
        Constraint::Equal(v) => format!("{name}:{v}"),
        Constraint::NotEqual(v) => format!("-{name}:{v}"),
        Constraint::LessThan(v) => format!("{name}:[* TO {v}]"),
        Constraint::GreaterThan(v) => format!("{name}:[{v} TO *]"),
        Constraint::Between(lower, upper) => format!("{name}:[{lower} TO {upper}]"),
        Constraint::AnyOf(values) => format!("{name}:({})", values.join(" OR ")),
        Constraint::AllOf(values) => format!("{name}:({})", values.join(" AND ")),
        Constraint::NoneOf(values) => format!("-{name}:({})", values.join(" OR ")),
    }
}

fn render_group(children: &[Restriction], joiner: &str) -> String {
    match children {
        // emptiness is rejected when the expression is attached to a scope
        [] => String::new(),
        [only] => only.to_filter(),
        _ => {
            let parts: Vec<String> = children.iter().map(Restriction::to_filter).collect();
            format!("({})", parts.join(joiner))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solrq_schema::FieldType;

    fn field(name: &str) -> ResolvedField {
        ResolvedField {
            filter_name: name.to_string(),
            sort_name: name.to_string(),
            field_type: FieldType::Text,
        }
    }

    fn compare(name: &str, constraint: Constraint) -> Restriction {
        Restriction::Compare {
            field: field(name),
            constraint,
        }
    }

    #[test]
    fn leaf_forms() {
        let cases = [
            (Constraint::Equal("v".to_string()), "f:v"),
            (Constraint::NotEqual("v".to_string()), "-f:v"),
            (Constraint::LessThan("9".to_string()), "f:[* TO 9]"),
            (Constraint::GreaterThan("9".to_string()), "f:[9 TO *]"),
            (
                Constraint::Between("1".to_string(), "9".to_string()),
                "f:[1 TO 9]",
            ),
            (
                Constraint::AnyOf(vec!["a".to_string(), "b".to_string()]),
                "f:(a OR b)",
            ),
            (
                Constraint::AllOf(vec!["a".to_string(), "b".to_string()]),
                "f:(a AND b)",
            ),
            (
                Constraint::NoneOf(vec!["a".to_string(), "b".to_string()]),
                "-f:(a OR b)",
            ),
        ];

        for (constraint, expected) in cases {
            assert_eq!(compare("f", constraint).to_filter(), expected);
        }
    }

    #[test]
    fn multi_child_groups_are_parenthesized() {
        let or = Restriction::Or(vec![
            compare("a", Constraint::Equal("1".to_string())),
            compare("b", Constraint::Equal("2".to_string())),
        ]);
        assert_eq!(or.to_filter(), "(a:1 OR b:2)");

        let and = Restriction::And(vec![
            compare("a", Constraint::Equal("1".to_string())),
            compare("b", Constraint::Equal("2".to_string())),
            compare("c", Constraint::Equal("3".to_string())),
        ]);
        assert_eq!(and.to_filter(), "(a:1 AND b:2 AND c:3)");
    }

    #[test]
    fn single_child_groups_are_unwrapped() {
        let or = Restriction::Or(vec![compare("a", Constraint::Equal("1".to_string()))]);
        assert_eq!(or.to_filter(), "a:1");

        let and = Restriction::And(vec![compare("a", Constraint::Equal("1".to_string()))]);
        assert_eq!(and.to_filter(), "a:1");
    }

    #[test]
    fn negation_prefixes_the_child_form() {
        let not = Restriction::Not(Box::new(compare("a", Constraint::Equal("1".to_string()))));
        assert_eq!(not.to_filter(), "-a:1");

        let double = Restriction::Not(Box::new(Restriction::Not(Box::new(compare(
            "a",
            Constraint::Equal("1".to_string()),
        )))));
        assert_eq!(double.to_filter(), "--a:1");

        let grouped = Restriction::Not(Box::new(Restriction::Or(vec![
            compare("a", Constraint::Equal("1".to_string())),
            compare("b", Constraint::Equal("2".to_string())),
        ])));
        assert_eq!(grouped.to_filter(), "-(a:1 OR b:2)");
    }

    #[test]
    fn children_serialize_in_insertion_order() {
        let or = Restriction::Or(vec![
            compare("b", Constraint::Equal("2".to_string())),
            compare("a", Constraint::Equal("1".to_string())),
        ]);
        assert_eq!(or.to_filter(), "(b:2 OR a:1)");
    }
}
