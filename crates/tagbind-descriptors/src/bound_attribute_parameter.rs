use crate::checksum::Checksum;
use crate::checksum::ChecksumBuilder;
use crate::checksum::ChecksumValue;
use crate::diagnostics::Diagnostic;
use crate::metadata::Metadata;
use crate::names;
use crate::tag_helper::BuildContext;
use crate::validation;

/// A `:parameter` suffix accepted by a bound attribute, e.g. the `format` in
/// `@bind:format`.
#[derive(Clone, Debug)]
pub struct BoundAttributeParameterDescriptor {
    name: String,
    property_name: Option<String>,
    type_name: String,
    display_name: String,
    documentation: Option<String>,
    is_enum: bool,
    is_string_property: bool,
    is_boolean_property: bool,
    case_sensitive: bool,
    metadata: Metadata,
    diagnostics: Vec<Diagnostic>,
    checksum: Checksum,
}

impl BoundAttributeParameterDescriptor {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
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
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
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

impl PartialEq for BoundAttributeParameterDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.checksum == other.checksum
    }
}

impl Eq for BoundAttributeParameterDescriptor {}

impl std::hash::Hash for BoundAttributeParameterDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.checksum.hash(state);
    }
}

impl ChecksumValue for BoundAttributeParameterDescriptor {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_checksum(self.checksum);
    }
}

#[derive(Clone, Debug, Default)]
pub struct BoundAttributeParameterDescriptorBuilder {
    name: Option<String>,
    property_name: Option<String>,
    type_name: Option<String>,
    display_name: Option<String>,
    documentation: Option<String>,
    is_enum: bool,
    metadata: Vec<(String, String)>,
}

impl BoundAttributeParameterDescriptorBuilder {
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

    pub fn metadata(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    pub(crate) fn build(
        &self,
        context: &BuildContext<'_>,
        attribute: &str,
    ) -> BoundAttributeParameterDescriptor {
        let mut diagnostics = Vec::new();
        validation::validate_parameter_name(
            context.tag_helper,
            attribute,
            self.name.as_deref(),
            &mut diagnostics,
        );

        let name = self.name.clone().unwrap_or_default();
        let type_name = self.type_name.clone().unwrap_or_default();
        let display_name = self
            .display_name
            .clone()
            .unwrap_or_else(|| format!(":{name}"));
        let metadata = Metadata::new(self.metadata.iter().cloned());
        let is_string_property = names::is_string_type(&type_name);
        let is_boolean_property = names::is_boolean_type(&type_name);

        let mut builder = ChecksumBuilder::new();
        builder
            .append(&name)
            .append(&self.property_name)
            .append(&type_name)
            .append(&display_name)
            .append(&self.documentation)
            .append(&self.is_enum)
            .append(&context.case_sensitive)
            .append(&metadata)
            .append(&diagnostics);

        BoundAttributeParameterDescriptor {
            name,
            property_name: self.property_name.clone(),
            type_name,
            display_name,
            documentation: self.documentation.clone(),
            is_enum: self.is_enum,
            is_string_property,
            is_boolean_property,
            case_sensitive: context.case_sensitive,
            metadata,
            diagnostics,
            checksum: builder.finalize(),
        }
    }
}
