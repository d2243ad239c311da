use std::sync::Arc;

use crate::checksum::ChecksumBuilder;
use crate::checksum::ChecksumValue;

/// Well-known metadata keys read by the descriptor model itself.
pub mod keys {
    /// When `"true"`, the rewriter treats only the matched attributes as the
    /// tag helper construct instead of the whole element.
    pub const CLASSIFY_ATTRIBUTES_ONLY: &str = "ClassifyAttributesOnly";
    pub const NAME_MATCH: &str = "Components.NameMatch";
    pub const FULLY_QUALIFIED_NAME_MATCH: &str = "Components.FullyQualifiedNameMatch";
    pub const TYPE_NAME: &str = "Common.TypeName";
    pub const PROPERTY_NAME: &str = "Common.PropertyName";
}

/// Immutable string-keyed, string-valued bag, kept sorted by key.
///
/// Sorting makes the checksum independent of insertion order; a key added
/// twice keeps its last value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Metadata(Arc<[(String, String)]>);

impl Metadata {
    #[must_use]
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries: Vec<(String, String)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        // stable sort keeps insertion order among equal keys, so the last
        // one survives the reverse dedup below
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.reverse();
        entries.dedup_by(|a, b| a.0 == b.0);
        entries.reverse();
        Self(entries.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|index| self.0[index].1.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether `key` is present with a value of `true` (ASCII case-insensitive).
    #[must_use]
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl ChecksumValue for Metadata {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_len(self.0.len());
        for (key, value) in self.0.iter() {
            builder.append_str(key).append_str(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_lookup() {
        let metadata = Metadata::new([("b", "2"), ("a", "1"), ("c", "3")]);
        assert_eq!(metadata.get("a"), Some("1"));
        assert_eq!(metadata.get("c"), Some("3"));
        assert_eq!(metadata.get("d"), None);
        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn test_last_value_wins() {
        let metadata = Metadata::new([("k", "first"), ("x", "y"), ("k", "second")]);
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("k"), Some("second"));
    }

    #[test]
    fn test_insertion_order_does_not_affect_equality() {
        let a = Metadata::new([("a", "1"), ("b", "2")]);
        let b = Metadata::new([("b", "2"), ("a", "1")]);
        assert_eq!(a, b);

        let mut builder_a = ChecksumBuilder::new();
        builder_a.append(&a);
        let mut builder_b = ChecksumBuilder::new();
        builder_b.append(&b);
        assert_eq!(builder_a.finalize(), builder_b.finalize());
    }

    #[test]
    fn test_is_true() {
        let metadata = Metadata::new([
            (keys::CLASSIFY_ATTRIBUTES_ONLY, "True"),
            ("other", "yes"),
        ]);
        assert!(metadata.is_true(keys::CLASSIFY_ATTRIBUTES_ONLY));
        assert!(!metadata.is_true("other"));
        assert!(!metadata.is_true("missing"));
    }
}
