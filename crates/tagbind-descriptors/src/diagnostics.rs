use serde::Serialize;
use tagbind_source::Span;
use thiserror::Error;

use crate::checksum::ChecksumBuilder;
use crate::checksum::ChecksumValue;

/// Problems found in user-supplied descriptor data.
///
/// These never abort a build: the builder still produces a descriptor and
/// attaches the problem to it as a [`Diagnostic`].
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash, Serialize)]
pub enum DescriptorError {
    #[error("Tag helpers cannot target tag name '{name}' because it contains a '{character}' character.")]
    InvalidTargetedTagName { name: String, character: char },

    #[error("Targeted tag name cannot be null or whitespace.")]
    TargetedTagNameNullOrWhitespace,

    #[error("Tag helpers cannot target parent tag name '{name}' because it contains a '{character}' character.")]
    InvalidTargetedParentTagName { name: String, character: char },

    #[error("Parent tag name cannot be null or whitespace.")]
    TargetedParentTagNameNullOrWhitespace,

    #[error("Tag helpers cannot target attribute name '{name}' because it contains a '{character}' character.")]
    InvalidTargetedAttributeName { name: String, character: char },

    #[error("Targeted attribute name cannot be null or whitespace.")]
    TargetedAttributeNameNullOrWhitespace,

    #[error("Invalid required directive attribute name '{name}' on tag helper '{tag_helper}'. Directive attribute names must start with '@'.")]
    InvalidRequiredDirectiveAttributeName { tag_helper: String, name: String },

    #[error("Invalid tag helper bound property '{property}' on tag helper '{tag_helper}'. Tag helpers cannot bind to HTML attributes with name '{name}' because the name contains a '{character}' character.")]
    InvalidBoundAttributeName {
        tag_helper: String,
        property: String,
        name: String,
        character: char,
    },

    #[error("Invalid tag helper bound property '{property}' on tag helper '{tag_helper}'. Tag helpers cannot bind to HTML attributes with name '{name}' because the name starts with 'data-'.")]
    InvalidBoundAttributeNameStartsWith {
        tag_helper: String,
        property: String,
        name: String,
    },

    #[error("Invalid tag helper bound property '{property}' on tag helper '{tag_helper}'. Bound attribute names cannot be null or whitespace.")]
    BoundAttributeNameNullOrWhitespace { tag_helper: String, property: String },

    #[error("Invalid tag helper bound attribute '{name}' on tag helper '{tag_helper}'. Directive attribute names must start with '@'.")]
    InvalidBoundDirectiveAttributeName { tag_helper: String, name: String },

    #[error("Invalid tag helper bound property '{property}' on tag helper '{tag_helper}'. Tag helpers cannot bind to HTML attributes with prefix '{prefix}' because the prefix contains a '{character}' character.")]
    InvalidBoundAttributePrefix {
        tag_helper: String,
        property: String,
        prefix: String,
        character: char,
    },

    #[error("Invalid tag helper bound property '{property}' on tag helper '{tag_helper}'. Tag helpers cannot bind to HTML attributes with prefix '{prefix}' because the prefix starts with 'data-'.")]
    InvalidBoundAttributePrefixStartsWith {
        tag_helper: String,
        property: String,
        prefix: String,
    },

    #[error("Invalid tag helper bound property '{property}' on tag helper '{tag_helper}'. Indexer attribute prefixes cannot be whitespace.")]
    BoundAttributePrefixWhitespace { tag_helper: String, property: String },

    #[error("Invalid tag helper bound attribute prefix '{prefix}' on tag helper '{tag_helper}'. Directive attribute prefixes must start with '@'.")]
    InvalidBoundDirectiveAttributePrefix { tag_helper: String, prefix: String },

    #[error("Invalid parameter '{name}' on bound attribute '{attribute}' of tag helper '{tag_helper}'. Parameter names cannot contain a '{character}' character.")]
    InvalidBoundAttributeParameterName {
        tag_helper: String,
        attribute: String,
        name: String,
        character: char,
    },

    #[error("Invalid parameter on bound attribute '{attribute}' of tag helper '{tag_helper}'. Parameter names cannot be null or whitespace.")]
    BoundAttributeParameterNameNullOrWhitespace { tag_helper: String, attribute: String },

    #[error("Invalid restricted child '{name}' on tag helper '{tag_helper}'. Child tag names cannot contain a '{character}' character.")]
    InvalidRestrictedChildName {
        tag_helper: String,
        name: String,
        character: char,
    },

    #[error("Invalid restricted child on tag helper '{tag_helper}'. Child tag names cannot be null or whitespace.")]
    RestrictedChildNameNullOrWhitespace { tag_helper: String },
}

impl DescriptorError {
    /// Get a diagnostic code string for this error type
    #[must_use]
    pub fn diagnostic_code(&self) -> &'static str {
        match self {
            DescriptorError::InvalidTargetedTagName { .. } => "TH100",
            DescriptorError::TargetedTagNameNullOrWhitespace => "TH101",
            DescriptorError::InvalidTargetedParentTagName { .. } => "TH102",
            DescriptorError::TargetedParentTagNameNullOrWhitespace => "TH103",
            DescriptorError::InvalidTargetedAttributeName { .. } => "TH104",
            DescriptorError::TargetedAttributeNameNullOrWhitespace => "TH105",
            DescriptorError::InvalidRequiredDirectiveAttributeName { .. } => "TH106",
            DescriptorError::InvalidBoundAttributeName { .. } => "TH200",
            DescriptorError::InvalidBoundAttributeNameStartsWith { .. } => "TH201",
            DescriptorError::BoundAttributeNameNullOrWhitespace { .. } => "TH202",
            DescriptorError::InvalidBoundDirectiveAttributeName { .. } => "TH203",
            DescriptorError::InvalidBoundAttributePrefix { .. } => "TH204",
            DescriptorError::InvalidBoundAttributePrefixStartsWith { .. } => "TH205",
            DescriptorError::BoundAttributePrefixWhitespace { .. } => "TH206",
            DescriptorError::InvalidBoundDirectiveAttributePrefix { .. } => "TH207",
            DescriptorError::InvalidBoundAttributeParameterName { .. } => "TH208",
            DescriptorError::BoundAttributeParameterNameNullOrWhitespace { .. } => "TH209",
            DescriptorError::InvalidRestrictedChildName { .. } => "TH300",
            DescriptorError::RestrictedChildNameNullOrWhitespace { .. } => "TH301",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl ChecksumValue for Severity {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_int(match self {
            Severity::Error => 0,
            Severity::Warning => 1,
        });
    }
}

/// A [`DescriptorError`] attached to the descriptor it was found on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    error: DescriptorError,
    severity: Severity,
    span: Option<Span>,
}

impl Diagnostic {
    #[must_use]
    pub fn error(error: DescriptorError) -> Self {
        Self {
            error,
            severity: Severity::Error,
            span: None,
        }
    }

    #[must_use]
    pub fn warning(error: DescriptorError) -> Self {
        Self {
            error,
            severity: Severity::Warning,
            span: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn kind(&self) -> &DescriptorError {
        &self.error
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        self.error.diagnostic_code()
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.error)
    }
}

impl ChecksumValue for Diagnostic {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder
            .append_str(self.code())
            .append_str(&self.message())
            .append(&self.severity);
        match self.span {
            Some(span) => {
                builder
                    .append_int(i64::from(span.start))
                    .append_int(i64::from(span.length));
            }
            None => {
                builder.append_null();
            }
        }
    }
}
