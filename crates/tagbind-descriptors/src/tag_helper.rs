use std::fmt;
use std::sync::Arc;

use crate::allowed_child_tag::AllowedChildTagDescriptor;
use crate::allowed_child_tag::AllowedChildTagDescriptorBuilder;
use crate::bound_attribute::BoundAttributeDescriptor;
use crate::bound_attribute::BoundAttributeDescriptorBuilder;
use crate::checksum::Checksum;
use crate::checksum::ChecksumBuilder;
use crate::checksum::ChecksumValue;
use crate::diagnostics::Diagnostic;
use crate::kinds::TagHelperKind;
use crate::matching_rule::TagMatchingRuleDescriptor;
use crate::matching_rule::TagMatchingRuleDescriptorBuilder;
use crate::metadata::keys;
use crate::metadata::Metadata;

/// Parent information handed down to child builders at build time.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BuildContext<'a> {
    pub(crate) tag_helper: &'a str,
    pub(crate) case_sensitive: bool,
}

/// The root descriptor of a tag helper.
///
/// Cloning is cheap and the descriptor is immutable, so it can be shared
/// freely across threads and compilations. Equality and hashing go through
/// the structural [`Checksum`].
#[derive(Clone)]
pub struct TagHelperDescriptor(Arc<TagHelperDescriptorInner>);

struct TagHelperDescriptorInner {
    kind: TagHelperKind,
    name: String,
    assembly_name: String,
    display_name: String,
    documentation: Option<String>,
    tag_output_hint: Option<String>,
    case_sensitive: bool,
    tag_matching_rules: Vec<TagMatchingRuleDescriptor>,
    bound_attributes: Vec<BoundAttributeDescriptor>,
    allowed_child_tags: Vec<AllowedChildTagDescriptor>,
    metadata: Metadata,
    diagnostics: Vec<Diagnostic>,
    flags: DerivedFlags,
    checksum: Checksum,
}

#[derive(Clone, Copy, Debug, Default)]
struct DerivedFlags {
    is_component: bool,
    is_component_fully_qualified_name_match: bool,
    is_child_content: bool,
    classify_attributes_only: bool,
}

impl DerivedFlags {
    fn compute(kind: TagHelperKind, metadata: &Metadata) -> Self {
        let is_component = kind == TagHelperKind::Component;
        Self {
            is_component,
            is_component_fully_qualified_name_match: is_component
                && metadata.get(keys::NAME_MATCH) == Some(keys::FULLY_QUALIFIED_NAME_MATCH),
            is_child_content: kind == TagHelperKind::ChildContent,
            classify_attributes_only: metadata.is_true(keys::CLASSIFY_ATTRIBUTES_ONLY),
        }
    }
}

impl TagHelperDescriptor {
    #[must_use]
    pub fn kind(&self) -> TagHelperKind {
        self.0.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[must_use]
    pub fn assembly_name(&self) -> &str {
        &self.0.assembly_name
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.0.display_name
    }

    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.0.documentation.as_deref()
    }

    #[must_use]
    pub fn tag_output_hint(&self) -> Option<&str> {
        self.0.tag_output_hint.as_deref()
    }

    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.0.case_sensitive
    }

    #[must_use]
    pub fn tag_matching_rules(&self) -> &[TagMatchingRuleDescriptor] {
        &self.0.tag_matching_rules
    }

    #[must_use]
    pub fn bound_attributes(&self) -> &[BoundAttributeDescriptor] {
        &self.0.bound_attributes
    }

    #[must_use]
    pub fn allowed_child_tags(&self) -> &[AllowedChildTagDescriptor] {
        &self.0.allowed_child_tags
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.0.metadata
    }

    /// The implementing type name, falling back to the descriptor name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.0
            .metadata
            .get(keys::TYPE_NAME)
            .unwrap_or(&self.0.name)
    }

    #[must_use]
    pub fn is_component_tag_helper(&self) -> bool {
        self.0.flags.is_component
    }

    #[must_use]
    pub fn is_component_fully_qualified_name_match(&self) -> bool {
        self.0.flags.is_component_fully_qualified_name_match
    }

    #[must_use]
    pub fn is_child_content_tag_helper(&self) -> bool {
        self.0.flags.is_child_content
    }

    /// Whether only the matched attributes, not the whole element, should be
    /// treated as this tag helper's construct.
    #[must_use]
    pub fn classify_attributes_only(&self) -> bool {
        self.0.flags.classify_attributes_only
    }

    /// Diagnostics produced for the tag helper itself, excluding children.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0.diagnostics
    }

    /// Own diagnostics followed by every child's, in declaration order.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        let rules = self
            .0
            .tag_matching_rules
            .iter()
            .flat_map(TagMatchingRuleDescriptor::all_diagnostics);
        let attributes = self
            .0
            .bound_attributes
            .iter()
            .flat_map(BoundAttributeDescriptor::all_diagnostics);
        let children = self
            .0
            .allowed_child_tags
            .iter()
            .flat_map(AllowedChildTagDescriptor::diagnostics);

        self.0
            .diagnostics
            .iter()
            .chain(rules)
            .chain(attributes)
            .chain(children)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.all_diagnostics().any(Diagnostic::is_error)
    }

    pub fn editor_required_attributes(&self) -> impl Iterator<Item = &BoundAttributeDescriptor> {
        self.0
            .bound_attributes
            .iter()
            .filter(|attribute| attribute.is_editor_required())
    }

    #[must_use]
    pub fn checksum(&self) -> Checksum {
        self.0.checksum
    }

    /// Whether both handles point at the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for TagHelperDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.checksum == other.0.checksum
    }
}

impl Eq for TagHelperDescriptor {}

impl std::hash::Hash for TagHelperDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.checksum.hash(state);
    }
}

impl ChecksumValue for TagHelperDescriptor {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_checksum(self.0.checksum);
    }
}

impl fmt::Debug for TagHelperDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagHelperDescriptor")
            .field("kind", &self.0.kind)
            .field("name", &self.0.name)
            .field("assembly_name", &self.0.assembly_name)
            .field("rules", &self.0.tag_matching_rules.len())
            .field("bound_attributes", &self.0.bound_attributes.len())
            .field("checksum", &self.0.checksum)
            .finish()
    }
}

impl fmt::Display for TagHelperDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.display_name)
    }
}

/// Mutable description of a [`TagHelperDescriptor`].
///
/// Children are configured through closures and frozen bottom-up by
/// [`TagHelperDescriptorBuilder::build`], which can be called repeatedly;
/// equal configuration always yields equal descriptors.
#[derive(Clone, Debug)]
pub struct TagHelperDescriptorBuilder {
    kind: TagHelperKind,
    name: String,
    assembly_name: String,
    display_name: Option<String>,
    documentation: Option<String>,
    tag_output_hint: Option<String>,
    case_sensitive: bool,
    tag_matching_rules: Vec<TagMatchingRuleDescriptorBuilder>,
    bound_attributes: Vec<BoundAttributeDescriptorBuilder>,
    allowed_child_tags: Vec<AllowedChildTagDescriptorBuilder>,
    metadata: Vec<(String, String)>,
}

impl TagHelperDescriptorBuilder {
    #[must_use]
    pub fn new(
        kind: TagHelperKind,
        name: impl Into<String>,
        assembly_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            assembly_name: assembly_name.into(),
            display_name: None,
            documentation: None,
            tag_output_hint: None,
            case_sensitive: false,
            tag_matching_rules: Vec::new(),
            bound_attributes: Vec::new(),
            allowed_child_tags: Vec::new(),
            metadata: Vec::new(),
        }
    }

    pub fn display_name(&mut self, display_name: impl Into<String>) -> &mut Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn documentation(&mut self, documentation: impl Into<String>) -> &mut Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn tag_output_hint(&mut self, hint: impl Into<String>) -> &mut Self {
        self.tag_output_hint = Some(hint.into());
        self
    }

    pub fn case_sensitive(&mut self, case_sensitive: bool) -> &mut Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn metadata(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    pub fn type_name(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.metadata(keys::TYPE_NAME, type_name)
    }

    pub fn tag_matching_rule(
        &mut self,
        configure: impl FnOnce(&mut TagMatchingRuleDescriptorBuilder),
    ) -> &mut Self {
        let mut rule = TagMatchingRuleDescriptorBuilder::new();
        configure(&mut rule);
        self.tag_matching_rules.push(rule);
        self
    }

    pub fn bound_attribute(
        &mut self,
        configure: impl FnOnce(&mut BoundAttributeDescriptorBuilder),
    ) -> &mut Self {
        let mut attribute = BoundAttributeDescriptorBuilder::new();
        configure(&mut attribute);
        self.bound_attributes.push(attribute);
        self
    }

    pub fn allowed_child_tag(
        &mut self,
        configure: impl FnOnce(&mut AllowedChildTagDescriptorBuilder),
    ) -> &mut Self {
        let mut child = AllowedChildTagDescriptorBuilder::new();
        configure(&mut child);
        self.allowed_child_tags.push(child);
        self
    }

    #[must_use]
    pub fn build(&self) -> TagHelperDescriptor {
        let display_name = self
            .display_name
            .clone()
            .unwrap_or_else(|| self.name.clone());
        let context = BuildContext {
            tag_helper: &display_name,
            case_sensitive: self.case_sensitive,
        };

        let tag_matching_rules: Vec<_> = self
            .tag_matching_rules
            .iter()
            .map(|rule| rule.build(&context))
            .collect();
        let bound_attributes: Vec<_> = self
            .bound_attributes
            .iter()
            .map(|attribute| attribute.build(&context))
            .collect();
        let allowed_child_tags: Vec<_> = self
            .allowed_child_tags
            .iter()
            .map(|child| child.build(&context))
            .collect();
        let metadata = Metadata::new(self.metadata.iter().cloned());
        let diagnostics = Vec::new();

        let mut builder = ChecksumBuilder::new();
        builder
            .append(&self.kind)
            .append(&self.name)
            .append(&self.assembly_name)
            .append(&display_name)
            .append(&self.documentation)
            .append(&self.tag_output_hint)
            .append(&self.case_sensitive)
            .append(&tag_matching_rules)
            .append(&bound_attributes)
            .append(&allowed_child_tags)
            .append(&metadata)
            .append(&diagnostics);
        let checksum = builder.finalize();

        let flags = DerivedFlags::compute(self.kind, &metadata);
        let descriptor = TagHelperDescriptor(Arc::new(TagHelperDescriptorInner {
            kind: self.kind,
            name: self.name.clone(),
            assembly_name: self.assembly_name.clone(),
            display_name,
            documentation: self.documentation.clone(),
            tag_output_hint: self.tag_output_hint.clone(),
            case_sensitive: self.case_sensitive,
            tag_matching_rules,
            bound_attributes,
            allowed_child_tags,
            metadata,
            diagnostics,
            flags,
            checksum,
        }));

        if descriptor.has_errors() {
            tracing::debug!(
                tag_helper = descriptor.name(),
                diagnostics = descriptor.all_diagnostics().count(),
                "built tag helper with diagnostics"
            );
        }

        descriptor
    }
}
