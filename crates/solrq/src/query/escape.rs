//! Backslash escaping for the target query grammar. Both resolved field
//! names and rendered literals pass through here before they reach a query
//! position.

/// Two-character sequence separating a dynamic base from its instance name
/// in filter positions. Always emitted literally, regardless of how the
/// surrounding base or instance text escapes.
pub(crate) const DYNAMIC_SEPARATOR: &str = "\\:";

/// Characters the query grammar treats as syntax. The dot is included
/// because the engine's range tokenizer treats it as significant inside
/// bracketed expressions.
const fn is_reserved(c: char) -> bool {
    matches!(
        c,
        '+' | '-'
            | '&'
            | '|'
            | '!'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | '^'
            | '"'
            | '~'
            | '*'
            | '?'
            | ':'
            | '\\'
            | '/'
            | '.'
    ) || c.is_ascii_whitespace()
}

/// Prefix every reserved character in `raw` with a backslash.
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if is_reserved(c) {
            out.push('\\');
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unreserved_text_is_untouched() {
        assert_eq!(escape("string"), "string");
        assert_eq!(escape("custom_string"), "custom_string");
        assert_eq!(escape("false"), "false");
    }

    #[test]
    fn reserved_characters_are_prefixed() {
        assert_eq!(escape("2.2"), "2\\.2");
        assert_eq!(escape("a:b"), "a\\:b");
        assert_eq!(escape("a b"), "a\\ b");
        assert_eq!(escape("(x)"), "\\(x\\)");
        assert_eq!(escape("back\\slash"), "back\\\\slash");
        assert_eq!(
            escape("2009-02-10T14:00:00Z"),
            "2009\\-02\\-10T14\\:00\\:00Z"
        );
    }

    proptest! {
        #[test]
        fn plain_identifiers_round_trip(s in "[a-zA-Z0-9_]{0,24}") {
            prop_assert_eq!(escape(&s), s);
        }

        #[test]
        fn no_reserved_character_survives_unescaped(s in ".{0,48}") {
            let escaped = escape(&s);
            let mut chars = escaped.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    // consumes the escaped character, whatever it is
                    prop_assert!(chars.next().is_some());
                } else {
                    prop_assert!(!is_reserved(c));
                }
            }
        }

        #[test]
        fn escaping_is_reversible(s in ".{0,48}") {
            let escaped = escape(&s);
            let mut restored = String::new();
            let mut chars = escaped.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    restored.push(chars.next().expect("dangling escape"));
                } else {
                    restored.push(c);
                }
            }
            prop_assert_eq!(restored, s);
        }
    }
}
