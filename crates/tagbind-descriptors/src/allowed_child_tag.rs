use crate::checksum::Checksum;
use crate::checksum::ChecksumBuilder;
use crate::checksum::ChecksumValue;
use crate::diagnostics::Diagnostic;
use crate::tag_helper::BuildContext;
use crate::validation;

/// A child tag a tag helper restricts its content to.
#[derive(Clone, Debug)]
pub struct AllowedChildTagDescriptor {
    name: String,
    display_name: String,
    diagnostics: Vec<Diagnostic>,
    checksum: Checksum,
}

impl AllowedChildTagDescriptor {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
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

impl PartialEq for AllowedChildTagDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.checksum == other.checksum
    }
}

impl Eq for AllowedChildTagDescriptor {}

impl std::hash::Hash for AllowedChildTagDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.checksum.hash(state);
    }
}

impl ChecksumValue for AllowedChildTagDescriptor {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_checksum(self.checksum);
    }
}

#[derive(Clone, Debug, Default)]
pub struct AllowedChildTagDescriptorBuilder {
    name: Option<String>,
    display_name: Option<String>,
}

impl AllowedChildTagDescriptorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&mut self, display_name: impl Into<String>) -> &mut Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub(crate) fn build(&self, context: &BuildContext<'_>) -> AllowedChildTagDescriptor {
        let mut diagnostics = Vec::new();
        validation::validate_allowed_child_tag(
            context.tag_helper,
            self.name.as_deref(),
            &mut diagnostics,
        );

        let name = self.name.clone().unwrap_or_default();
        let display_name = self.display_name.clone().unwrap_or_else(|| name.clone());

        let mut builder = ChecksumBuilder::new();
        builder
            .append(&name)
            .append(&display_name)
            .append(&diagnostics);

        AllowedChildTagDescriptor {
            name,
            display_name,
            diagnostics,
            checksum: builder.finalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: BuildContext<'static> = BuildContext {
        tag_helper: "ListTagHelper",
        case_sensitive: false,
    };

    #[test]
    fn test_display_name_defaults_to_name() {
        let child = AllowedChildTagDescriptorBuilder::new()
            .name("li")
            .build(&CONTEXT);
        assert_eq!(child.display_name(), "li");
        assert!(child.diagnostics().is_empty());
    }

    #[test]
    fn test_invalid_names() {
        let missing = AllowedChildTagDescriptorBuilder::new().build(&CONTEXT);
        assert_eq!(missing.diagnostics()[0].code(), "TH301");

        let invalid = AllowedChildTagDescriptorBuilder::new()
            .name("l<i")
            .build(&CONTEXT);
        assert_eq!(invalid.diagnostics()[0].code(), "TH300");
        assert_ne!(missing, invalid);
    }
}
