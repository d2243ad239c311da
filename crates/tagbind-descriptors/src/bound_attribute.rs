use crate::bound_attribute_parameter::BoundAttributeParameterDescriptor;
use crate::bound_attribute_parameter::BoundAttributeParameterDescriptorBuilder;
use crate::checksum::Checksum;
use crate::checksum::ChecksumBuilder;
use crate::checksum::ChecksumValue;
use crate::diagnostics::Diagnostic;
use crate::metadata::Metadata;
use crate::names;
use crate::tag_helper::BuildContext;
use crate::validation;

/// An HTML attribute that maps to a property on a tag helper.
///
/// The string/boolean flags are derived from the type names once, at build
/// time, so matching never re-inspects type names.
#[derive(Clone, Debug)]
pub struct BoundAttributeDescriptor {
    name: String,
    property_name: String,
    type_name: String,
    indexer_name_prefix: Option<String>,
    indexer_type_name: Option<String>,
    display_name: String,
    documentation: Option<String>,
    is_enum: bool,
    is_string_property: bool,
    is_boolean_property: bool,
    is_indexer_string_property: bool,
    is_indexer_boolean_property: bool,
    is_editor_required: bool,
    is_directive_attribute: bool,
    case_sensitive: bool,
    parameters: Vec<BoundAttributeParameterDescriptor>,
    metadata: Metadata,
    diagnostics: Vec<Diagnostic>,
    checksum: Checksum,
}

impl BoundAttributeDescriptor {
    /// The HTML attribute name. Empty for indexer-only attributes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn indexer_name_prefix(&self) -> Option<&str> {
        self.indexer_name_prefix.as_deref()
    }

    #[must_use]
    pub fn indexer_type_name(&self) -> Option<&str> {
        self.indexer_type_name.as_deref()
    }

    #[must_use]
    pub fn has_indexer(&self) -> bool {
        self.indexer_name_prefix.is_some()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.is_enum
    }

    #[must_use]
    pub fn is_string_property(&self) -> bool {
        self.is_string_property
    }

    #[must_use]
    pub fn is_boolean_property(&self) -> bool {
        self.is_boolean_property
    }

    #[must_use]
    pub fn is_indexer_string_property(&self) -> bool {
        self.is_indexer_string_property
    }

    #[must_use]
    pub fn is_indexer_boolean_property(&self) -> bool {
        self.is_indexer_boolean_property
    }

    #[must_use]
    pub fn is_editor_required(&self) -> bool {
        self.is_editor_required
    }

    #[must_use]
    pub fn is_directive_attribute(&self) -> bool {
        self.is_directive_attribute
    }

    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[must_use]
    pub fn parameters(&self) -> &[BoundAttributeParameterDescriptor] {
        &self.parameters
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().chain(
            self.parameters
                .iter()
                .flat_map(BoundAttributeParameterDescriptor::diagnostics),
        )
    }

    #[must_use]
    pub fn checksum(&self) -> Checksum {
        self.checksum
    }
}

impl PartialEq for BoundAttributeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.checksum == other.checksum
    }
}

impl Eq for BoundAttributeDescriptor {}

impl std::hash::Hash for BoundAttributeDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.checksum.hash(state);
    }
}

impl ChecksumValue for BoundAttributeDescriptor {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_checksum(self.checksum);
    }
}

#[derive(Clone, Debug, Default)]
pub struct BoundAttributeDescriptorBuilder {
    name: Option<String>,
    property_name: Option<String>,
    type_name: Option<String>,
    indexer_name_prefix: Option<String>,
    indexer_type_name: Option<String>,
    display_name: Option<String>,
    documentation: Option<String>,
    is_enum: bool,
    is_editor_required: bool,
    is_directive_attribute: bool,
    parameters: Vec<BoundAttributeParameterDescriptorBuilder>,
    metadata: Vec<(String, String)>,
}

impl BoundAttributeDescriptorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn property_name(&mut self, property_name: impl Into<String>) -> &mut Self {
        self.property_name = Some(property_name.into());
        self
    }

    pub fn type_name(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Makes this a dictionary-style attribute: any attribute starting with
    /// `prefix` binds an entry of type `value_type_name`.
    pub fn as_dictionary(
        &mut self,
        prefix: impl Into<String>,
        value_type_name: impl Into<String>,
    ) -> &mut Self {
        self.indexer_name_prefix = Some(prefix.into());
        self.indexer_type_name = Some(value_type_name.into());
        self
    }

    pub fn display_name(&mut self, display_name: impl Into<String>) -> &mut Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn documentation(&mut self, documentation: impl Into<String>) -> &mut Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn is_enum(&mut self, is_enum: bool) -> &mut Self {
        self.is_enum = is_enum;
        self
    }

    pub fn editor_required(&mut self, is_editor_required: bool) -> &mut Self {
        self.is_editor_required = is_editor_required;
        self
    }

    pub fn directive_attribute(&mut self, is_directive_attribute: bool) -> &mut Self {
        self.is_directive_attribute = is_directive_attribute;
        self
    }

    pub fn metadata(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Adds a `:parameter` descriptor configured by `configure`.
    pub fn parameter(
        &mut self,
        configure: impl FnOnce(&mut BoundAttributeParameterDescriptorBuilder),
    ) -> &mut Self {
        let mut parameter = BoundAttributeParameterDescriptorBuilder::new();
        configure(&mut parameter);
        self.parameters.push(parameter);
        self
    }

    pub(crate) fn build(&self, context: &BuildContext<'_>) -> BoundAttributeDescriptor {
        let property_name = self
            .property_name
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_default();

        let mut diagnostics = Vec::new();
        validation::validate_bound_attribute_name(
            context.tag_helper,
            &property_name,
            self.name.as_deref(),
            self.indexer_name_prefix.is_some(),
            self.is_directive_attribute,
            &mut diagnostics,
        );
        validation::validate_indexer_prefix(
            context.tag_helper,
            &property_name,
            self.indexer_name_prefix.as_deref(),
            self.is_directive_attribute,
            &mut diagnostics,
        );

        let name = self.name.clone().unwrap_or_default();
        let type_name = self.type_name.clone().unwrap_or_default();
        let display_name = self.display_name.clone().unwrap_or_else(|| {
            format!("{type_name} {}.{property_name}", context.tag_helper)
        });
        let parameters: Vec<_> = self
            .parameters
            .iter()
            .map(|parameter| parameter.build(context, &name))
            .collect();
        let metadata = Metadata::new(self.metadata.iter().cloned());

        let is_string_property = names::is_string_type(&type_name);
        let is_boolean_property = names::is_boolean_type(&type_name);
        let is_indexer_string_property = self
            .indexer_type_name
            .as_deref()
            .is_some_and(names::is_string_type);
        let is_indexer_boolean_property = self
            .indexer_type_name
            .as_deref()
            .is_some_and(names::is_boolean_type);

        let mut builder = ChecksumBuilder::new();
        builder
            .append(&name)
            .append(&property_name)
            .append(&type_name)
            .append(&self.indexer_name_prefix)
            .append(&self.indexer_type_name)
            .append(&display_name)
            .append(&self.documentation)
            .append(&self.is_enum)
            .append(&self.is_editor_required)
            .append(&self.is_directive_attribute)
            .append(&context.case_sensitive)
            .append(&parameters)
            .append(&metadata)
            .append(&diagnostics);

        BoundAttributeDescriptor {
            name,
            property_name,
            type_name,
            indexer_name_prefix: self.indexer_name_prefix.clone(),
            indexer_type_name: self.indexer_type_name.clone(),
            display_name,
            documentation: self.documentation.clone(),
            is_enum: self.is_enum,
            is_string_property,
            is_boolean_property,
            is_indexer_string_property,
            is_indexer_boolean_property,
            is_editor_required: self.is_editor_required,
            is_directive_attribute: self.is_directive_attribute,
            case_sensitive: context.case_sensitive,
            parameters,
            metadata,
            diagnostics,
            checksum: builder.finalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: BuildContext<'static> = BuildContext {
        tag_helper: "InputTagHelper",
        case_sensitive: false,
    };

    #[test]
    fn test_string_and_boolean_flags() {
        let text = BoundAttributeDescriptorBuilder::new()
            .name("asp-format")
            .property_name("Format")
            .type_name("System.String")
            .build(&CONTEXT);
        assert!(text.is_string_property());
        assert!(!text.is_boolean_property());
        assert!(!text.has_indexer());

        let flag = BoundAttributeDescriptorBuilder::new()
            .name("disabled")
            .type_name("bool")
            .build(&CONTEXT);
        assert!(flag.is_boolean_property());
        assert_eq!(flag.property_name(), "disabled");
    }

    #[test]
    fn test_indexer_flags() {
        let attribute = BoundAttributeDescriptorBuilder::new()
            .name("Items")
            .type_name("System.Collections.Generic.IDictionary<System.String, System.String>")
            .as_dictionary("Items-", "System.String")
            .build(&CONTEXT);
        assert!(attribute.has_indexer());
        assert_eq!(attribute.indexer_name_prefix(), Some("Items-"));
        assert!(!attribute.is_string_property());
        assert!(attribute.is_indexer_string_property());
        assert!(!attribute.is_indexer_boolean_property());
    }

    #[test]
    fn test_default_display_name() {
        let attribute = BoundAttributeDescriptorBuilder::new()
            .name("asp-for")
            .property_name("For")
            .type_name("ModelExpression")
            .build(&CONTEXT);
        assert_eq!(attribute.display_name(), "ModelExpression InputTagHelper.For");
    }

    #[test]
    fn test_indexer_only_attribute_is_valid() {
        let attribute = BoundAttributeDescriptorBuilder::new()
            .property_name("RouteValues")
            .type_name("System.Collections.Generic.IDictionary<System.String, System.String>")
            .as_dictionary("asp-route-", "System.String")
            .build(&CONTEXT);
        assert_eq!(attribute.name(), "");
        assert!(attribute.diagnostics().is_empty());
    }

    #[test]
    fn test_data_dash_is_rejected_but_built() {
        let attribute = BoundAttributeDescriptorBuilder::new()
            .name("data-value")
            .type_name("System.String")
            .build(&CONTEXT);
        assert_eq!(attribute.name(), "data-value");
        let codes: Vec<_> = attribute.diagnostics().iter().map(Diagnostic::code).collect();
        assert_eq!(codes, ["TH201"]);
    }

    #[test]
    fn test_parameters_carry_their_diagnostics_up() {
        let attribute = BoundAttributeDescriptorBuilder::new()
            .name("@bind")
            .directive_attribute(true)
            .type_name("System.Object")
            .parameter(|parameter| {
                parameter.name("format").type_name("System.String");
            })
            .parameter(|parameter| {
                parameter.name("bad name").type_name("System.String");
            })
            .build(&CONTEXT);
        assert_eq!(attribute.parameters().len(), 2);
        assert!(attribute.diagnostics().is_empty());
        let codes: Vec<_> = attribute.all_diagnostics().map(Diagnostic::code).collect();
        assert_eq!(codes, ["TH208"]);
    }

    #[test]
    fn test_sigil_without_directive_flag() {
        let valid = BoundAttributeDescriptorBuilder::new()
            .name("@bind")
            .directive_attribute(true)
            .build(&CONTEXT);
        let invalid = BoundAttributeDescriptorBuilder::new()
            .name("@bind")
            .build(&CONTEXT);
        assert!(!invalid.diagnostics().is_empty());
        assert_ne!(valid, invalid);
    }
}
