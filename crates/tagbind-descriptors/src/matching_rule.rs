use crate::checksum::Checksum;
use crate::checksum::ChecksumBuilder;
use crate::checksum::ChecksumValue;
use crate::diagnostics::Diagnostic;
use crate::kinds::NameComparison;
use crate::kinds::TagStructure;
use crate::kinds::ValueComparison;
use crate::names;
use crate::required_attribute::RequiredAttributeDescriptor;
use crate::required_attribute::RequiredAttributeDescriptorBuilder;
use crate::tag_helper::BuildContext;
use crate::validation;

/// One alternative condition under which a tag helper applies.
#[derive(Clone, Debug)]
pub struct TagMatchingRuleDescriptor {
    tag_name: String,
    parent_tag: Option<String>,
    tag_structure: TagStructure,
    case_sensitive: bool,
    attributes: Vec<RequiredAttributeDescriptor>,
    diagnostics: Vec<Diagnostic>,
    checksum: Checksum,
}

impl TagMatchingRuleDescriptor {
    fn new(
        tag_name: String,
        parent_tag: Option<String>,
        tag_structure: TagStructure,
        case_sensitive: bool,
        attributes: Vec<RequiredAttributeDescriptor>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let mut builder = ChecksumBuilder::new();
        builder
            .append(&tag_name)
            .append(&parent_tag)
            .append(&tag_structure)
            .append(&case_sensitive)
            .append(&attributes)
            .append(&diagnostics);

        Self {
            tag_name,
            parent_tag,
            tag_structure,
            case_sensitive,
            attributes,
            diagnostics,
            checksum: builder.finalize(),
        }
    }

    /// The targeted tag name, or `*` for a catch-all rule.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.tag_name == names::CATCH_ALL_TAG_NAME
    }

    #[must_use]
    pub fn parent_tag(&self) -> Option<&str> {
        self.parent_tag.as_deref()
    }

    #[must_use]
    pub fn tag_structure(&self) -> TagStructure {
        self.tag_structure
    }

    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[must_use]
    pub fn attributes(&self) -> &[RequiredAttributeDescriptor] {
        &self.attributes
    }

    /// Diagnostics produced for this rule itself, excluding its attributes.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().chain(
            self.attributes
                .iter()
                .flat_map(RequiredAttributeDescriptor::diagnostics),
        )
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.all_diagnostics().any(Diagnostic::is_error)
    }

    #[must_use]
    pub fn checksum(&self) -> Checksum {
        self.checksum
    }
}

impl PartialEq for TagMatchingRuleDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.checksum == other.checksum
    }
}

impl Eq for TagMatchingRuleDescriptor {}

impl std::hash::Hash for TagMatchingRuleDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.checksum.hash(state);
    }
}

impl ChecksumValue for TagMatchingRuleDescriptor {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_checksum(self.checksum);
    }
}

#[derive(Clone, Debug, Default)]
pub struct TagMatchingRuleDescriptorBuilder {
    tag_name: Option<String>,
    parent_tag: Option<String>,
    tag_structure: TagStructure,
    attributes: Vec<RequiredAttributeDescriptorBuilder>,
}

impl TagMatchingRuleDescriptorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag_name(&mut self, tag_name: impl Into<String>) -> &mut Self {
        self.tag_name = Some(tag_name.into());
        self
    }

    pub fn parent_tag(&mut self, parent_tag: impl Into<String>) -> &mut Self {
        self.parent_tag = Some(parent_tag.into());
        self
    }

    pub fn tag_structure(&mut self, tag_structure: TagStructure) -> &mut Self {
        self.tag_structure = tag_structure;
        self
    }

    /// Adds a required attribute configured by `configure`.
    pub fn attribute(
        &mut self,
        configure: impl FnOnce(&mut RequiredAttributeDescriptorBuilder),
    ) -> &mut Self {
        let mut attribute = RequiredAttributeDescriptorBuilder::new();
        configure(&mut attribute);
        self.attributes.push(attribute);
        self
    }

    /// Shorthand for a required attribute matched by full name, any value.
    pub fn require_attribute(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.attribute(|attribute| {
            attribute.name(name);
        })
    }

    /// Shorthand for a required attribute whose value must equal `value`.
    pub fn require_attribute_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        let name = name.into();
        let value = value.into();
        self.attribute(|attribute| {
            attribute
                .name(name)
                .value(value)
                .value_comparison(ValueComparison::FullMatch);
        })
    }

    /// Shorthand for a required attribute matched by name prefix.
    pub fn require_attribute_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        let prefix = prefix.into();
        self.attribute(|attribute| {
            attribute
                .name(prefix)
                .name_comparison(NameComparison::PrefixMatch);
        })
    }

    pub(crate) fn build(&self, context: &BuildContext<'_>) -> TagMatchingRuleDescriptor {
        let mut diagnostics = Vec::new();
        validation::validate_tag_name(self.tag_name.as_deref(), &mut diagnostics);
        validation::validate_parent_tag(self.parent_tag.as_deref(), &mut diagnostics);

        let attributes = self
            .attributes
            .iter()
            .map(|attribute| attribute.build(context))
            .collect();

        TagMatchingRuleDescriptor::new(
            self.tag_name.clone().unwrap_or_default(),
            self.parent_tag.clone(),
            self.tag_structure,
            context.case_sensitive,
            attributes,
            diagnostics,
        )
    }
}
