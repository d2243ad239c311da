use crate::checksum::Checksum;
use crate::checksum::ChecksumBuilder;
use crate::checksum::ChecksumValue;
use crate::diagnostics::Diagnostic;
use crate::kinds::NameComparison;
use crate::kinds::ValueComparison;
use crate::tag_helper::BuildContext;
use crate::validation;

/// An attribute a [`TagMatchingRuleDescriptor`](crate::TagMatchingRuleDescriptor)
/// requires to be present on the element.
#[derive(Clone, Debug)]
pub struct RequiredAttributeDescriptor {
    name: String,
    name_comparison: NameComparison,
    value: Option<String>,
    value_comparison: ValueComparison,
    display_name: String,
    case_sensitive: bool,
    is_directive_attribute: bool,
    diagnostics: Vec<Diagnostic>,
    checksum: Checksum,
}

impl RequiredAttributeDescriptor {
    #[allow(clippy::too_many_arguments)]
    fn new(
        name: String,
        name_comparison: NameComparison,
        value: Option<String>,
        value_comparison: ValueComparison,
        display_name: String,
        case_sensitive: bool,
        is_directive_attribute: bool,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let mut builder = ChecksumBuilder::new();
        builder
            .append(&name)
            .append(&name_comparison)
            .append(&value)
            .append(&value_comparison)
            .append(&display_name)
            .append(&case_sensitive)
            .append(&is_directive_attribute)
            .append(&diagnostics);

        Self {
            name,
            name_comparison,
            value,
            value_comparison,
            display_name,
            case_sensitive,
            is_directive_attribute,
            diagnostics,
            checksum: builder.finalize(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn name_comparison(&self) -> NameComparison {
        self.name_comparison
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[must_use]
    pub fn value_comparison(&self) -> ValueComparison {
        self.value_comparison
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Governs name comparison only. Values always compare ordinally.
    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[must_use]
    pub fn is_directive_attribute(&self) -> bool {
        self.is_directive_attribute
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn checksum(&self) -> Checksum {
        self.checksum
    }
}

impl PartialEq for RequiredAttributeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.checksum == other.checksum
    }
}

impl Eq for RequiredAttributeDescriptor {}

impl std::hash::Hash for RequiredAttributeDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.checksum.hash(state);
    }
}

impl ChecksumValue for RequiredAttributeDescriptor {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_checksum(self.checksum);
    }
}

#[derive(Clone, Debug, Default)]
pub struct RequiredAttributeDescriptorBuilder {
    name: Option<String>,
    name_comparison: NameComparison,
    value: Option<String>,
    value_comparison: ValueComparison,
    display_name: Option<String>,
    is_directive_attribute: bool,
}

impl RequiredAttributeDescriptorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn name_comparison(&mut self, comparison: NameComparison) -> &mut Self {
        self.name_comparison = comparison;
        self
    }

    pub fn value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    pub fn value_comparison(&mut self, comparison: ValueComparison) -> &mut Self {
        self.value_comparison = comparison;
        self
    }

    pub fn display_name(&mut self, display_name: impl Into<String>) -> &mut Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn directive_attribute(&mut self, is_directive_attribute: bool) -> &mut Self {
        self.is_directive_attribute = is_directive_attribute;
        self
    }

    pub(crate) fn build(&self, context: &BuildContext<'_>) -> RequiredAttributeDescriptor {
        let mut diagnostics = Vec::new();
        validation::validate_required_attribute(
            context.tag_helper,
            self.name.as_deref(),
            self.is_directive_attribute,
            &mut diagnostics,
        );

        let name = self.name.clone().unwrap_or_default();
        let display_name = self.display_name.clone().unwrap_or_else(|| {
            match self.name_comparison {
                NameComparison::FullMatch => name.clone(),
                NameComparison::PrefixMatch => format!("{name}..."),
            }
        });

        RequiredAttributeDescriptor::new(
            name,
            self.name_comparison,
            self.value.clone(),
            self.value_comparison,
            display_name,
            context.case_sensitive,
            self.is_directive_attribute,
            diagnostics,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: BuildContext<'static> = BuildContext {
        tag_helper: "TestTagHelper",
        case_sensitive: false,
    };

    #[test]
    fn test_display_name_defaults() {
        let full = RequiredAttributeDescriptorBuilder::new()
            .name("class")
            .build(&CONTEXT);
        assert_eq!(full.display_name(), "class");

        let prefix = RequiredAttributeDescriptorBuilder::new()
            .name("asp-route-")
            .name_comparison(NameComparison::PrefixMatch)
            .build(&CONTEXT);
        assert_eq!(prefix.display_name(), "asp-route-...");
    }

    #[test]
    fn test_checksum_tracks_value() {
        let a = RequiredAttributeDescriptorBuilder::new()
            .name("type")
            .value("checkbox")
            .value_comparison(ValueComparison::FullMatch)
            .build(&CONTEXT);
        let b = RequiredAttributeDescriptorBuilder::new()
            .name("type")
            .value("text")
            .value_comparison(ValueComparison::FullMatch)
            .build(&CONTEXT);
        assert_ne!(a, b);
        assert_ne!(a.checksum(), b.checksum());
    }

    #[test]
    fn test_missing_name_still_builds() {
        let attribute = RequiredAttributeDescriptorBuilder::new().build(&CONTEXT);
        assert_eq!(attribute.name(), "");
        assert_eq!(attribute.diagnostics().len(), 1);
        assert_eq!(attribute.diagnostics()[0].code(), "TH105");
    }

    #[test]
    fn test_case_sensitivity_comes_from_context() {
        let context = BuildContext {
            tag_helper: "TestTagHelper",
            case_sensitive: true,
        };
        let attribute = RequiredAttributeDescriptorBuilder::new()
            .name("class")
            .build(&context);
        assert!(attribute.case_sensitive());
        assert_ne!(
            attribute,
            RequiredAttributeDescriptorBuilder::new()
                .name("class")
                .build(&CONTEXT)
        );
    }
}
