use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// FieldType
///
/// Closed set of field types the target engine can index. Each type maps to
/// exactly one physical suffix; the mapping is total and fixed, so an
/// unhandled type is a compile-time exhaustiveness failure rather than a
/// runtime lookup miss.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum FieldType {
    Boolean,
    Float,
    Integer,
    MultiFloat,
    MultiText,
    Text,
    Time,
}

impl FieldType {
    /// Physical suffix appended to every resolved field name.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Boolean => "_b",
            Self::Float => "_f",
            Self::Integer => "_i",
            Self::MultiFloat => "_fm",
            Self::MultiText => "_ss",
            Self::Text => "_s",
            Self::Time => "_d",
        }
    }

    /// True for types that store more than one value per document.
    #[must_use]
    pub const fn is_multi_valued(self) -> bool {
        matches!(self, Self::MultiFloat | Self::MultiText)
    }

    /// True for types compared numerically.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Float | Self::Integer | Self::MultiFloat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_are_distinct() {
        let all = [
            FieldType::Boolean,
            FieldType::Float,
            FieldType::Integer,
            FieldType::MultiFloat,
            FieldType::MultiText,
            FieldType::Text,
            FieldType::Time,
        ];

        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.suffix(), b.suffix());
            }
        }
    }

    #[test]
    fn multi_valued_types_are_flagged() {
        assert!(FieldType::MultiFloat.is_multi_valued());
        assert!(FieldType::MultiText.is_multi_valued());
        assert!(!FieldType::Text.is_multi_valued());
        assert!(!FieldType::Time.is_multi_valued());
    }
}
