//! Pure predicates deciding whether a tag satisfies a matching rule.
//!
//! Name comparisons follow the rule's case sensitivity. Attribute values are
//! always compared ordinally, whatever the rule's case sensitivity.

use tagbind_descriptors::names;
use tagbind_descriptors::NameComparison;
use tagbind_descriptors::RequiredAttributeDescriptor;
use tagbind_descriptors::TagMatchingRuleDescriptor;
use tagbind_descriptors::ValueComparison;

/// A rule with a missing or empty tag name constrains nothing and matches
/// like `*`. Both build to an empty name and both carry a tag name error
/// diagnostic on the rule.
#[must_use]
pub fn satisfies_tag_name(tag_name: &str, rule: &TagMatchingRuleDescriptor) -> bool {
    if tag_name.is_empty() || tag_name.starts_with(names::ELEMENT_OPT_OUT_CHARACTER) {
        return false;
    }
    let rule_tag_name = rule.tag_name();
    if rule_tag_name.is_empty() || rule.is_catch_all() {
        return true;
    }
    names::eq(tag_name, rule_tag_name, rule.case_sensitive())
}

/// `parent_tag` must already have any tag helper prefix stripped.
#[must_use]
pub fn satisfies_parent_tag(parent_tag: Option<&str>, rule: &TagMatchingRuleDescriptor) -> bool {
    match rule.parent_tag() {
        None => true,
        Some(required) => {
            parent_tag.is_some_and(|parent| names::eq(parent, required, rule.case_sensitive()))
        }
    }
}

/// Every required attribute must be satisfied by at least one attribute on
/// the tag.
#[must_use]
pub fn satisfies_attributes(
    attributes: &[(String, String)],
    rule: &TagMatchingRuleDescriptor,
) -> bool {
    rule.attributes().iter().all(|required| {
        attributes
            .iter()
            .any(|(name, value)| satisfies_required_attribute(name, value, required))
    })
}

#[must_use]
pub fn satisfies_required_attribute(
    name: &str,
    value: &str,
    required: &RequiredAttributeDescriptor,
) -> bool {
    let case_sensitive = required.case_sensitive();
    let name_matches = match required.name_comparison() {
        NameComparison::FullMatch => names::eq(name, required.name(), case_sensitive),
        NameComparison::PrefixMatch => {
            // the prefix alone is not a match
            names::strip_prefix(name, required.name(), case_sensitive)
                .is_some_and(|rest| !rest.is_empty())
        }
    };
    if !name_matches {
        return false;
    }

    let expected = required.value().unwrap_or_default();
    match required.value_comparison() {
        ValueComparison::None => true,
        ValueComparison::FullMatch => value == expected,
        ValueComparison::PrefixMatch => value.starts_with(expected),
        ValueComparison::SuffixMatch => value.ends_with(expected),
    }
}

#[must_use]
pub fn satisfies_rule(
    tag_name: &str,
    parent_tag: Option<&str>,
    attributes: &[(String, String)],
    rule: &TagMatchingRuleDescriptor,
) -> bool {
    satisfies_tag_name(tag_name, rule)
        && satisfies_parent_tag(parent_tag, rule)
        && satisfies_attributes(attributes, rule)
}

#[cfg(test)]
mod tests {
    use tagbind_descriptors::TagHelperDescriptor;
    use tagbind_descriptors::TagHelperDescriptorBuilder;
    use tagbind_descriptors::TagHelperKind;
    use tagbind_descriptors::TagMatchingRuleDescriptorBuilder;

    use super::*;

    fn single_rule(
        case_sensitive: bool,
        configure: impl FnOnce(&mut TagMatchingRuleDescriptorBuilder),
    ) -> TagHelperDescriptor {
        let mut builder = TagHelperDescriptorBuilder::new(TagHelperKind::Default, "Test", "Test");
        builder
            .case_sensitive(case_sensitive)
            .tag_matching_rule(configure);
        builder.build()
    }

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect()
    }

    mod tag_names {
        use super::*;

        #[test]
        fn test_case_insensitive_match() {
            let descriptor = single_rule(false, |rule| {
                rule.tag_name("div");
            });
            let rule = &descriptor.tag_matching_rules()[0];
            assert!(satisfies_tag_name("DIV", rule));
            assert!(!satisfies_tag_name("!div", rule));
            assert!(!satisfies_tag_name("", rule));
        }

        #[test]
        fn test_case_sensitive_match() {
            let descriptor = single_rule(true, |rule| {
                rule.tag_name("Counter");
            });
            let rule = &descriptor.tag_matching_rules()[0];
            assert!(satisfies_tag_name("Counter", rule));
            assert!(!satisfies_tag_name("counter", rule));
        }

        #[test]
        fn test_catch_all_still_honors_opt_out() {
            let descriptor = single_rule(false, |rule| {
                rule.tag_name("*");
            });
            let rule = &descriptor.tag_matching_rules()[0];
            assert!(satisfies_tag_name("anything", rule));
            assert!(!satisfies_tag_name("!anything", rule));
        }

        #[test]
        fn test_missing_or_empty_rule_name_matches_any_tag() {
            let missing = single_rule(false, |_| {});
            let empty = single_rule(false, |rule| {
                rule.tag_name("");
            });
            for descriptor in [&missing, &empty] {
                let rule = &descriptor.tag_matching_rules()[0];
                assert_eq!(rule.tag_name(), "");
                assert!(rule.has_errors());
                assert!(satisfies_tag_name("div", rule));
                assert!(!satisfies_tag_name("!div", rule));
                assert!(!satisfies_tag_name("", rule));
            }
        }
    }

    mod parent_tags {
        use super::*;

        #[test]
        fn test_required_parent() {
            let descriptor = single_rule(false, |rule| {
                rule.tag_name("li").parent_tag("ul");
            });
            let rule = &descriptor.tag_matching_rules()[0];
            assert!(satisfies_parent_tag(Some("UL"), rule));
            assert!(!satisfies_parent_tag(Some("ol"), rule));
            assert!(!satisfies_parent_tag(None, rule));
        }

        #[test]
        fn test_no_parent_constraint() {
            let descriptor = single_rule(false, |rule| {
                rule.tag_name("li");
            });
            let rule = &descriptor.tag_matching_rules()[0];
            assert!(satisfies_parent_tag(None, rule));
            assert!(satisfies_parent_tag(Some("ol"), rule));
        }
    }

    mod attributes {
        use super::*;

        #[test]
        fn test_existential_per_required_attribute() {
            let descriptor = single_rule(false, |rule| {
                rule.tag_name("button")
                    .attribute(|attribute| {
                        attribute
                            .name("class")
                            .value("btn")
                            .value_comparison(ValueComparison::PrefixMatch);
                    })
                    .require_attribute("disabled");
            });
            let rule = &descriptor.tag_matching_rules()[0];
            assert!(satisfies_attributes(
                &attrs(&[("class", "btn-primary"), ("disabled", "")]),
                rule
            ));
            assert!(!satisfies_attributes(&attrs(&[("class", "btn-primary")]), rule));
        }

        #[test]
        fn test_prefix_match_requires_longer_name() {
            let descriptor = single_rule(false, |rule| {
                rule.tag_name("div").require_attribute_prefix("data");
            });
            let rule = &descriptor.tag_matching_rules()[0];
            assert!(!satisfies_attributes(&attrs(&[("data", "")]), rule));
            assert!(!satisfies_attributes(&attrs(&[("DATA", "")]), rule));
            assert!(satisfies_attributes(&attrs(&[("data-id", "")]), rule));
            assert!(satisfies_attributes(&attrs(&[("DATA-id", "")]), rule));
        }

        #[test]
        fn test_values_compare_ordinally() {
            let descriptor = single_rule(false, |rule| {
                rule.tag_name("input").require_attribute_value("type", "checkbox");
            });
            let rule = &descriptor.tag_matching_rules()[0];
            assert!(satisfies_attributes(&attrs(&[("TYPE", "checkbox")]), rule));
            assert!(!satisfies_attributes(&attrs(&[("type", "Checkbox")]), rule));
        }

        #[test]
        fn test_suffix_match() {
            let descriptor = single_rule(false, |rule| {
                rule.tag_name("img").attribute(|attribute| {
                    attribute
                        .name("src")
                        .value(".svg")
                        .value_comparison(ValueComparison::SuffixMatch);
                });
            });
            let rule = &descriptor.tag_matching_rules()[0];
            assert!(satisfies_attributes(&attrs(&[("src", "logo.svg")]), rule));
            assert!(!satisfies_attributes(&attrs(&[("src", "logo.png")]), rule));
        }

        #[test]
        fn test_no_required_attributes() {
            let descriptor = single_rule(false, |rule| {
                rule.tag_name("p");
            });
            let rule = &descriptor.tag_matching_rules()[0];
            assert!(satisfies_attributes(&[], rule));
        }
    }

    #[test]
    fn test_satisfies_rule_combines_all_checks() {
        let descriptor = single_rule(false, |rule| {
            rule.tag_name("li").parent_tag("ul").require_attribute("active");
        });
        let rule = &descriptor.tag_matching_rules()[0];
        let active = attrs(&[("active", "")]);
        assert!(satisfies_rule("li", Some("ul"), &active, rule));
        assert!(!satisfies_rule("li", Some("ol"), &active, rule));
        assert!(!satisfies_rule("li", Some("ul"), &[], rule));
        assert!(!satisfies_rule("p", Some("ul"), &active, rule));
    }
}
