//! Flat `key=value` property parsing.
//!
//! Property bundles are plain text, one mapping per line. This parser is
//! deliberately primitive: no nesting, no type annotations, no line
//! continuations. Coercions are applied by providers, not here.

use std::collections::HashMap;

/// File extension shared by every property bundle this crate reads.
pub const PROPERTIES_SUFFIX: &str = ".properties";

/// Parse property text into a key/value map.
///
/// Lines are trimmed; blank lines and lines starting with `#` or `!` are
/// skipped. The first `=` splits key from value, both sides trimmed. Lines
/// without `=` are ignored.
pub fn parse(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            let value = line[eq_pos + 1..].trim();
            if !key.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_simple_pairs() {
        let map = parse("database.host=localhost\ndatabase.port=5432\n");
        assert_eq!(map.get("database.host").unwrap(), "localhost");
        assert_eq!(map.get("database.port").unwrap(), "5432");
    }

    #[test]
    fn test_skips_comments_and_blanks() {
        let map = parse("# comment\n! also a comment\n\nkey=value\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key").unwrap(), "value");
    }

    #[test]
    fn test_trims_whitespace_around_key_and_value() {
        let map = parse("  spaced.key  =  spaced value  \n");
        assert_eq!(map.get("spaced.key").unwrap(), "spaced value");
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let map = parse("query=a=b=c\n");
        assert_eq!(map.get("query").unwrap(), "a=b=c");
    }

    #[test]
    fn test_ignores_lines_without_separator() {
        let map = parse("not a mapping\nkey=value\n");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_empty_value_is_kept() {
        let map = parse("empty=\n");
        assert_eq!(map.get("empty").unwrap(), "");
    }
}
