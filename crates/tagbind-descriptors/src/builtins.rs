//! Common HTML tag helpers embedded in the binary.

use std::sync::LazyLock;

use crate::catalog;
use crate::collection::TagHelperCollection;

static BUILTIN_CATALOG: &str = include_str!("../catalogs/builtin.toml");

// Parsed once on first access
static BUILTIN_TAG_HELPERS: LazyLock<TagHelperCollection> =
    LazyLock::new(|| match catalog::from_toml(BUILTIN_CATALOG) {
        Ok(collection) => collection,
        Err(err) => {
            tracing::error!(error = %err, "builtin catalog failed to parse");
            TagHelperCollection::empty()
        }
    });

/// Returns the builtin tag helpers.
///
/// Cloning the collection is cheap; every call shares the same storage.
#[must_use]
pub fn builtin_tag_helpers() -> TagHelperCollection {
    BUILTIN_TAG_HELPERS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TagHelperDescriptor;

    #[test]
    fn test_builtin_catalog_parses_cleanly() {
        let collection = catalog::from_toml(BUILTIN_CATALOG).unwrap();
        assert_eq!(collection, builtin_tag_helpers());
        assert!(collection.iter().all(|d| !d.has_errors()));
    }

    #[test]
    fn test_builtin_names() {
        let collection = builtin_tag_helpers();
        let names: Vec<_> = collection.iter().map(TagHelperDescriptor::name).collect();
        insta::assert_debug_snapshot!(names, @r#"
        [
            "AnchorTagHelper",
            "InputTagHelper",
            "CheckboxTagHelper",
            "FormTagHelper",
            "ListItemTagHelper",
            "UnorderedListTagHelper",
            "EnvironmentTagHelper",
            "CacheBustingTagHelper",
        ]
        "#);
    }

    #[test]
    fn test_builtin_catch_all_classifies_attributes_only() {
        let collection = builtin_tag_helpers();
        let cache_busting = collection
            .iter()
            .find(|d| d.name() == "CacheBustingTagHelper")
            .unwrap();
        assert!(cache_busting.classify_attributes_only());
        assert!(cache_busting.tag_matching_rules()[0].is_catch_all());
    }
}
