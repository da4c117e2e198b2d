use crate::{error::QueryError, query::escape::escape, value::Value};
use solrq_schema::FieldType;

/// Timestamp rendering used for `Time` fields; the engine expects UTC.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Render `value` as an escaped query literal for a field declared as `ty`.
///
/// Kind checking happens here so mismatches surface while the query is
/// being built rather than as engine-side parse failures. Integer literals
/// are accepted where a float field is declared; every other mismatch is an
/// error.
pub(crate) fn encode(field: &str, ty: FieldType, value: &Value) -> Result<String, QueryError> {
    let raw = match (ty, value) {
        (FieldType::Text | FieldType::MultiText, Value::Text(s)) => s.clone(),
        (FieldType::Integer, Value::Int(i)) => i.to_string(),
        (FieldType::Float | FieldType::MultiFloat, Value::Float(f)) => f.to_string(),
        (FieldType::Float | FieldType::MultiFloat, Value::Int(i)) => i.to_string(),
        (FieldType::Boolean, Value::Bool(b)) => b.to_string(),
        (FieldType::Time, Value::Time(t)) => t.format(TIME_FORMAT).to_string(),
        _ => {
            return Err(QueryError::TypeMismatch {
                field: field.to_string(),
                expected: ty,
                found: value.kind(),
            });
        }
    };

    Ok(escape(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;
    use chrono::{TimeZone, Utc};

    #[test]
    fn scalar_literals() {
        let cases = [
            (
                FieldType::Text,
                Value::Text("string".to_string()),
                "string",
            ),
            (FieldType::Integer, Value::Int(1), "1"),
            (FieldType::Float, Value::Float(2.2), "2\\.2"),
            (FieldType::MultiFloat, Value::Float(3.3), "3\\.3"),
            (FieldType::Boolean, Value::Bool(false), "false"),
        ];

        for (ty, value, expected) in cases {
            assert_eq!(encode("f", ty, &value).expect("encodes"), expected);
        }
    }

    #[test]
    fn time_literals_are_utc_and_escaped() {
        let t = Utc.with_ymd_and_hms(2009, 2, 10, 14, 0, 0).unwrap();
        assert_eq!(
            encode("f", FieldType::Time, &Value::Time(t)).expect("encodes"),
            "2009\\-02\\-10T14\\:00\\:00Z"
        );
    }

    #[test]
    fn integers_widen_onto_float_fields() {
        assert_eq!(
            encode("f", FieldType::Float, &Value::Int(4)).expect("encodes"),
            "4"
        );
        assert_eq!(
            encode("f", FieldType::MultiFloat, &Value::Int(4)).expect("encodes"),
            "4"
        );
    }

    #[test]
    fn mismatched_kinds_are_rejected() {
        let err = encode("age", FieldType::Integer, &Value::Text("x".to_string()))
            .expect_err("mismatch");

        assert_eq!(
            err,
            QueryError::TypeMismatch {
                field: "age".to_string(),
                expected: FieldType::Integer,
                found: ValueKind::Text,
            }
        );

        assert!(encode("flag", FieldType::Boolean, &Value::Int(1)).is_err());
        assert!(encode("when", FieldType::Time, &Value::Text("now".to_string())).is_err());
    }

    #[test]
    fn text_with_reserved_characters_is_escaped() {
        assert_eq!(
            encode("f", FieldType::Text, &Value::Text("a:b c".to_string())).expect("encodes"),
            "a\\:b\\ c"
        );
    }
}
