//! Name comparison helpers shared by validation and matching.
//!
//! Case-insensitive comparisons fold each character independently with
//! [`char::to_lowercase`], so [`fold`] produces keys that agree with
//! [`eq`] and [`strip_prefix`].

/// Marks an element as opted out of tag helper processing, e.g. `<!div>`.
pub const ELEMENT_OPT_OUT_CHARACTER: char = '!';

/// Tag name that matches every element.
pub const CATCH_ALL_TAG_NAME: &str = "*";

/// Sigil that starts a directive attribute name, e.g. `@bind`.
pub const DIRECTIVE_ATTRIBUTE_SIGIL: char = '@';

/// Separates a bound attribute name from its parameter, e.g. `@bind:format`.
pub const PARAMETER_SEPARATOR: char = ':';

/// Characters that may never appear in a tag, attribute or parameter name.
pub const INVALID_NAME_CHARACTERS: &[char] =
    &['@', '!', '<', '/', '?', '[', '>', ']', '=', '"', '\'', '*'];

#[must_use]
pub fn is_invalid_name_character(ch: char) -> bool {
    ch.is_whitespace() || INVALID_NAME_CHARACTERS.contains(&ch)
}

/// Compares two names, ignoring case unless `case_sensitive`.
#[must_use]
pub fn eq(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive || (a.is_ascii() && b.is_ascii()) {
        return if case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        };
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Returns the remainder of `value` after `prefix`, or `None` if `value` does
/// not start with it.
#[must_use]
pub fn strip_prefix<'a>(value: &'a str, prefix: &str, case_sensitive: bool) -> Option<&'a str> {
    if case_sensitive {
        return value.strip_prefix(prefix);
    }
    if value.is_ascii() && prefix.is_ascii() {
        let head = value.get(..prefix.len())?;
        return head
            .eq_ignore_ascii_case(prefix)
            .then(|| &value[prefix.len()..]);
    }

    let mut rest = value.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = rest.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    let offset = rest.next().map_or(value.len(), |(index, _)| index);
    Some(&value[offset..])
}

#[must_use]
pub fn starts_with(value: &str, prefix: &str, case_sensitive: bool) -> bool {
    strip_prefix(value, prefix, case_sensitive).is_some()
}

/// Case-folded form of `value`, suitable as a case-insensitive map key.
#[must_use]
pub fn fold(value: &str) -> String {
    if value.is_ascii() {
        value.to_ascii_lowercase()
    } else {
        value.chars().flat_map(char::to_lowercase).collect()
    }
}

/// Splits `name:parameter` at the first separator.
#[must_use]
pub fn split_parameter(full_name: &str) -> Option<(&str, &str)> {
    if full_name.is_empty() {
        return None;
    }
    full_name.split_once(PARAMETER_SEPARATOR)
}

/// Whether a type name denotes a string.
#[must_use]
pub fn is_string_type(type_name: &str) -> bool {
    matches!(type_name, "System.String" | "string")
}

/// Whether a type name denotes a boolean.
#[must_use]
pub fn is_boolean_type(type_name: &str) -> bool {
    matches!(type_name, "System.Boolean" | "bool")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq() {
        assert!(eq("div", "DIV", false));
        assert!(!eq("div", "DIV", true));
        assert!(eq("ÄBC", "äbc", false));
        assert!(!eq("ÄBC", "äbc", true));
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix("my:input", "MY:", false), Some("input"));
        assert_eq!(strip_prefix("my:input", "MY:", true), None);
        assert_eq!(strip_prefix("my", "my:", false), None);
        assert_eq!(strip_prefix("Ünit-x", "ünit-", false), Some("x"));
        assert_eq!(strip_prefix("data", "data", false), Some(""));
    }

    #[test]
    fn test_fold_agrees_with_eq() {
        for (a, b) in [("Input", "iNPUT"), ("ÄBC", "äbc")] {
            assert!(eq(a, b, false));
            assert_eq!(fold(a), fold(b));
        }
    }

    #[test]
    fn test_split_parameter() {
        assert_eq!(split_parameter("@bind:format"), Some(("@bind", "format")));
        assert_eq!(split_parameter("a:b:c"), Some(("a", "b:c")));
        assert_eq!(split_parameter("plain"), None);
        assert_eq!(split_parameter(""), None);
    }

    #[test]
    fn test_invalid_characters() {
        for ch in ['@', '!', '<', '/', '?', '[', '>', ']', '=', '"', '\'', '*', ' ', '\t', '\n'] {
            assert!(is_invalid_name_character(ch), "{ch:?} should be invalid");
        }
        for ch in ['a', '-', ':', '.', '_'] {
            assert!(!is_invalid_name_character(ch), "{ch:?} should be valid");
        }
    }

    #[test]
    fn test_type_detection() {
        assert!(is_string_type("System.String"));
        assert!(is_string_type("string"));
        assert!(!is_string_type("System.Object"));
        assert!(is_boolean_type("bool"));
        assert!(!is_boolean_type("System.Nullable<System.Boolean>"));
    }
}
