//! Name validation shared by the descriptor builders.
//!
//! Every check appends to a diagnostics list instead of failing; one
//! diagnostic is produced per offending character.

use crate::diagnostics::DescriptorError;
use crate::diagnostics::Diagnostic;
use crate::names;

const DATA_DASH_PREFIX: &str = "data-";

pub(crate) fn is_null_or_whitespace(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

fn push_invalid_characters(
    name: &str,
    diagnostics: &mut Vec<Diagnostic>,
    make: impl Fn(char) -> DescriptorError,
) {
    for character in name.chars().filter(|ch| names::is_invalid_name_character(*ch)) {
        diagnostics.push(Diagnostic::error(make(character)));
    }
}

fn starts_with_data_dash(name: &str) -> bool {
    names::starts_with(name, DATA_DASH_PREFIX, false)
}

pub(crate) fn validate_tag_name(tag_name: Option<&str>, diagnostics: &mut Vec<Diagnostic>) {
    let Some(tag_name) = tag_name.filter(|_| !is_null_or_whitespace(tag_name)) else {
        diagnostics.push(Diagnostic::error(
            DescriptorError::TargetedTagNameNullOrWhitespace,
        ));
        return;
    };
    if tag_name == names::CATCH_ALL_TAG_NAME {
        return;
    }
    push_invalid_characters(tag_name, diagnostics, |character| {
        DescriptorError::InvalidTargetedTagName {
            name: tag_name.to_string(),
            character,
        }
    });
}

pub(crate) fn validate_parent_tag(parent_tag: Option<&str>, diagnostics: &mut Vec<Diagnostic>) {
    let Some(parent_tag) = parent_tag else {
        return;
    };
    if parent_tag.trim().is_empty() {
        diagnostics.push(Diagnostic::error(
            DescriptorError::TargetedParentTagNameNullOrWhitespace,
        ));
        return;
    }
    push_invalid_characters(parent_tag, diagnostics, |character| {
        DescriptorError::InvalidTargetedParentTagName {
            name: parent_tag.to_string(),
            character,
        }
    });
}

/// Strips the directive sigil when present. Returns the name to validate and
/// whether a required sigil was missing.
fn strip_directive_sigil(name: &str, is_directive_attribute: bool) -> (&str, bool) {
    match name.strip_prefix(names::DIRECTIVE_ATTRIBUTE_SIGIL) {
        Some(stripped) if is_directive_attribute => (stripped, false),
        _ => (name, is_directive_attribute),
    }
}

pub(crate) fn validate_required_attribute(
    tag_helper: &str,
    name: Option<&str>,
    is_directive_attribute: bool,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(name) = name.filter(|_| !is_null_or_whitespace(name)) else {
        diagnostics.push(Diagnostic::error(
            DescriptorError::TargetedAttributeNameNullOrWhitespace,
        ));
        return;
    };

    let (checked, missing_sigil) = strip_directive_sigil(name, is_directive_attribute);
    if missing_sigil {
        diagnostics.push(Diagnostic::error(
            DescriptorError::InvalidRequiredDirectiveAttributeName {
                tag_helper: tag_helper.to_string(),
                name: name.to_string(),
            },
        ));
    }

    push_invalid_characters(checked, diagnostics, |character| {
        DescriptorError::InvalidTargetedAttributeName {
            name: name.to_string(),
            character,
        }
    });
}

pub(crate) fn validate_bound_attribute_name(
    tag_helper: &str,
    property: &str,
    name: Option<&str>,
    has_indexer: bool,
    is_directive_attribute: bool,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let name = match name {
        // indexer-only attributes have no name of their own
        None if has_indexer => return,
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            diagnostics.push(Diagnostic::error(
                DescriptorError::BoundAttributeNameNullOrWhitespace {
                    tag_helper: tag_helper.to_string(),
                    property: property.to_string(),
                },
            ));
            return;
        }
    };

    let (checked, missing_sigil) = strip_directive_sigil(name, is_directive_attribute);
    if missing_sigil {
        diagnostics.push(Diagnostic::error(
            DescriptorError::InvalidBoundDirectiveAttributeName {
                tag_helper: tag_helper.to_string(),
                name: name.to_string(),
            },
        ));
    }

    if starts_with_data_dash(checked) {
        diagnostics.push(Diagnostic::error(
            DescriptorError::InvalidBoundAttributeNameStartsWith {
                tag_helper: tag_helper.to_string(),
                property: property.to_string(),
                name: name.to_string(),
            },
        ));
    }

    push_invalid_characters(checked, diagnostics, |character| {
        DescriptorError::InvalidBoundAttributeName {
            tag_helper: tag_helper.to_string(),
            property: property.to_string(),
            name: name.to_string(),
            character,
        }
    });
}

pub(crate) fn validate_indexer_prefix(
    tag_helper: &str,
    property: &str,
    prefix: Option<&str>,
    is_directive_attribute: bool,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(prefix) = prefix else {
        return;
    };
    // an empty prefix is legal and matches every attribute
    if prefix.is_empty() {
        return;
    }
    if prefix.trim().is_empty() {
        diagnostics.push(Diagnostic::error(
            DescriptorError::BoundAttributePrefixWhitespace {
                tag_helper: tag_helper.to_string(),
                property: property.to_string(),
            },
        ));
        return;
    }

    let (checked, missing_sigil) = strip_directive_sigil(prefix, is_directive_attribute);
    if missing_sigil {
        diagnostics.push(Diagnostic::error(
            DescriptorError::InvalidBoundDirectiveAttributePrefix {
                tag_helper: tag_helper.to_string(),
                prefix: prefix.to_string(),
            },
        ));
    }

    if starts_with_data_dash(checked) {
        diagnostics.push(Diagnostic::error(
            DescriptorError::InvalidBoundAttributePrefixStartsWith {
                tag_helper: tag_helper.to_string(),
                property: property.to_string(),
                prefix: prefix.to_string(),
            },
        ));
    }

    push_invalid_characters(checked, diagnostics, |character| {
        DescriptorError::InvalidBoundAttributePrefix {
            tag_helper: tag_helper.to_string(),
            property: property.to_string(),
            prefix: prefix.to_string(),
            character,
        }
    });
}

pub(crate) fn validate_parameter_name(
    tag_helper: &str,
    attribute: &str,
    name: Option<&str>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(name) = name.filter(|_| !is_null_or_whitespace(name)) else {
        diagnostics.push(Diagnostic::error(
            DescriptorError::BoundAttributeParameterNameNullOrWhitespace {
                tag_helper: tag_helper.to_string(),
                attribute: attribute.to_string(),
            },
        ));
        return;
    };
    push_invalid_characters(name, diagnostics, |character| {
        DescriptorError::InvalidBoundAttributeParameterName {
            tag_helper: tag_helper.to_string(),
            attribute: attribute.to_string(),
            name: name.to_string(),
            character,
        }
    });
}

pub(crate) fn validate_allowed_child_tag(
    tag_helper: &str,
    name: Option<&str>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(name) = name.filter(|_| !is_null_or_whitespace(name)) else {
        diagnostics.push(Diagnostic::error(
            DescriptorError::RestrictedChildNameNullOrWhitespace {
                tag_helper: tag_helper.to_string(),
            },
        ));
        return;
    };
    if name == names::CATCH_ALL_TAG_NAME {
        return;
    }
    push_invalid_characters(name, diagnostics, |character| {
        DescriptorError::InvalidRestrictedChildName {
            tag_helper: tag_helper.to_string(),
            name: name.to_string(),
            character,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
        diagnostics.iter().map(Diagnostic::code).collect()
    }

    mod tag_names {
        use super::*;

        #[test]
        fn test_catch_all_is_exempt() {
            let mut diagnostics = Vec::new();
            validate_tag_name(Some("*"), &mut diagnostics);
            assert!(diagnostics.is_empty());
        }

        #[test]
        fn test_null_and_whitespace() {
            let mut diagnostics = Vec::new();
            validate_tag_name(None, &mut diagnostics);
            validate_tag_name(Some("  "), &mut diagnostics);
            assert_eq!(codes(&diagnostics), ["TH101", "TH101"]);
        }

        #[test]
        fn test_one_diagnostic_per_invalid_character() {
            let mut diagnostics = Vec::new();
            validate_tag_name(Some("a b*c"), &mut diagnostics);
            assert_eq!(codes(&diagnostics), ["TH100", "TH100"]);
        }

        #[test]
        fn test_parent_tag() {
            let mut diagnostics = Vec::new();
            validate_parent_tag(None, &mut diagnostics);
            assert!(diagnostics.is_empty());
            validate_parent_tag(Some(" "), &mut diagnostics);
            validate_parent_tag(Some("for/m"), &mut diagnostics);
            assert_eq!(codes(&diagnostics), ["TH103", "TH102"]);
        }
    }

    mod attributes {
        use super::*;

        #[test]
        fn test_directive_sigil_is_stripped() {
            let mut diagnostics = Vec::new();
            validate_required_attribute("T", Some("@bind"), true, &mut diagnostics);
            assert!(diagnostics.is_empty());
        }

        #[test]
        fn test_missing_directive_sigil() {
            let mut diagnostics = Vec::new();
            validate_required_attribute("T", Some("bind"), true, &mut diagnostics);
            assert_eq!(codes(&diagnostics), ["TH106"]);
        }

        #[test]
        fn test_sigil_without_directive_flag_is_invalid_character() {
            let mut diagnostics = Vec::new();
            validate_required_attribute("T", Some("@bind"), false, &mut diagnostics);
            assert_eq!(codes(&diagnostics), ["TH104"]);
        }

        #[test]
        fn test_bound_attribute_data_dash() {
            let mut diagnostics = Vec::new();
            validate_bound_attribute_name(
                "T",
                "Foo",
                Some("DATA-foo"),
                false,
                false,
                &mut diagnostics,
            );
            assert_eq!(codes(&diagnostics), ["TH201"]);
        }

        #[test]
        fn test_bound_attribute_without_name_needs_indexer() {
            let mut diagnostics = Vec::new();
            validate_bound_attribute_name("T", "Foo", None, true, false, &mut diagnostics);
            assert!(diagnostics.is_empty());
            validate_bound_attribute_name("T", "Foo", None, false, false, &mut diagnostics);
            assert_eq!(codes(&diagnostics), ["TH202"]);
        }

        #[test]
        fn test_indexer_prefix_rules() {
            let mut diagnostics = Vec::new();
            validate_indexer_prefix("T", "Foo", Some(""), false, &mut diagnostics);
            assert!(diagnostics.is_empty());
            validate_indexer_prefix("T", "Foo", Some(" "), false, &mut diagnostics);
            validate_indexer_prefix("T", "Foo", Some("data-x-"), false, &mut diagnostics);
            validate_indexer_prefix("T", "Foo", Some("x="), false, &mut diagnostics);
            validate_indexer_prefix("T", "Foo", Some("bind-"), true, &mut diagnostics);
            assert_eq!(codes(&diagnostics), ["TH206", "TH205", "TH204", "TH207"]);
        }

        #[test]
        fn test_parameter_names() {
            let mut diagnostics = Vec::new();
            validate_parameter_name("T", "@bind", Some("format"), &mut diagnostics);
            assert!(diagnostics.is_empty());
            validate_parameter_name("T", "@bind", Some(""), &mut diagnostics);
            validate_parameter_name("T", "@bind", Some("for mat"), &mut diagnostics);
            assert_eq!(codes(&diagnostics), ["TH209", "TH208"]);
        }

        #[test]
        fn test_allowed_child_tags() {
            let mut diagnostics = Vec::new();
            validate_allowed_child_tag("T", Some("*"), &mut diagnostics);
            validate_allowed_child_tag("T", Some("li"), &mut diagnostics);
            assert!(diagnostics.is_empty());
            validate_allowed_child_tag("T", None, &mut diagnostics);
            validate_allowed_child_tag("T", Some("l>i"), &mut diagnostics);
            assert_eq!(codes(&diagnostics), ["TH301", "TH300"]);
        }
    }
}
