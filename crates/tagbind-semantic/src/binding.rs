use tagbind_descriptors::TagHelperDescriptor;
use tagbind_descriptors::TagMatchingRuleDescriptor;

/// A matched descriptor together with the rules that were satisfied.
#[derive(Debug, Clone)]
pub struct BoundRules {
    descriptor: TagHelperDescriptor,
    rule_indices: Vec<usize>,
}

impl BoundRules {
    pub(crate) fn new(descriptor: TagHelperDescriptor, rule_indices: Vec<usize>) -> Self {
        debug_assert!(!rule_indices.is_empty());
        Self {
            descriptor,
            rule_indices,
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &TagHelperDescriptor {
        &self.descriptor
    }

    /// Indices into the descriptor's matching rules.
    #[must_use]
    pub fn rule_indices(&self) -> &[usize] {
        &self.rule_indices
    }

    pub fn rules(&self) -> impl Iterator<Item = &TagMatchingRuleDescriptor> {
        let rules = self.descriptor.tag_matching_rules();
        self.rule_indices.iter().map(move |&index| &rules[index])
    }
}

/// The tag helpers that apply to one tag, and which of their rules matched.
///
/// Produced by [`TagHelperBinder::get_binding`](crate::TagHelperBinder::get_binding)
/// only when at least one descriptor matched.
#[derive(Debug, Clone)]
pub struct TagHelperBinding {
    tag_name: String,
    attributes: Vec<(String, String)>,
    parent_tag: Option<String>,
    parent_is_tag_helper: bool,
    tag_helper_prefix: Option<String>,
    bound: Vec<BoundRules>,
    is_attribute_match: bool,
}

impl TagHelperBinding {
    pub(crate) fn new(
        tag_name: &str,
        attributes: &[(String, String)],
        parent_tag: Option<&str>,
        parent_is_tag_helper: bool,
        tag_helper_prefix: Option<&str>,
        bound: Vec<BoundRules>,
    ) -> Self {
        let is_attribute_match = bound
            .iter()
            .all(|entry| entry.descriptor.classify_attributes_only());
        Self {
            tag_name: tag_name.to_string(),
            attributes: attributes.to_vec(),
            parent_tag: parent_tag.map(str::to_string),
            parent_is_tag_helper,
            tag_helper_prefix: tag_helper_prefix.map(str::to_string),
            bound,
            is_attribute_match,
        }
    }

    /// The queried tag name, including any tag helper prefix.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    #[must_use]
    pub fn parent_tag(&self) -> Option<&str> {
        self.parent_tag.as_deref()
    }

    #[must_use]
    pub fn parent_is_tag_helper(&self) -> bool {
        self.parent_is_tag_helper
    }

    #[must_use]
    pub fn tag_helper_prefix(&self) -> Option<&str> {
        self.tag_helper_prefix.as_deref()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &TagHelperDescriptor> {
        self.bound.iter().map(BoundRules::descriptor)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundRules> {
        self.bound.iter()
    }

    /// The satisfied rules of `descriptor`, if it is part of this binding.
    #[must_use]
    pub fn bound_rules(&self, descriptor: &TagHelperDescriptor) -> Option<&BoundRules> {
        self.bound
            .iter()
            .find(|entry| &entry.descriptor == descriptor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// True when every matched descriptor only classifies its attributes,
    /// leaving the element itself as plain markup.
    #[must_use]
    pub fn is_attribute_match(&self) -> bool {
        self.is_attribute_match
    }
}

impl<'a> IntoIterator for &'a TagHelperBinding {
    type Item = &'a BoundRules;
    type IntoIter = std::slice::Iter<'a, BoundRules>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
