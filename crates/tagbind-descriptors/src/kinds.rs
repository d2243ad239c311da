use serde::Deserialize;
use serde::Serialize;

use crate::checksum::ChecksumBuilder;
use crate::checksum::ChecksumValue;

/// Origin and semantics of a tag helper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagHelperKind {
    /// A plain tag helper class.
    #[default]
    Default,
    /// A UI component rendered as an element.
    Component,
    /// A `RenderFragment`-style child content parameter of a component.
    ChildContent,
    EventHandler,
    Bind,
    Key,
    Ref,
    Splat,
    FormName,
    RenderMode,
}

impl TagHelperKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TagHelperKind::Default => "default",
            TagHelperKind::Component => "component",
            TagHelperKind::ChildContent => "child_content",
            TagHelperKind::EventHandler => "event_handler",
            TagHelperKind::Bind => "bind",
            TagHelperKind::Key => "key",
            TagHelperKind::Ref => "ref",
            TagHelperKind::Splat => "splat",
            TagHelperKind::FormName => "form_name",
            TagHelperKind::RenderMode => "render_mode",
        }
    }

    /// Kinds that describe compiler-provided directive attributes rather than
    /// user-authored elements.
    #[must_use]
    pub fn is_directive_attribute_kind(self) -> bool {
        matches!(
            self,
            TagHelperKind::EventHandler
                | TagHelperKind::Bind
                | TagHelperKind::Key
                | TagHelperKind::Ref
                | TagHelperKind::Splat
                | TagHelperKind::FormName
                | TagHelperKind::RenderMode
        )
    }
}

impl std::fmt::Display for TagHelperKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStructure {
    #[default]
    Unspecified,
    NormalOrSelfClosing,
    WithoutEndTag,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameComparison {
    #[default]
    FullMatch,
    PrefixMatch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueComparison {
    #[default]
    None,
    FullMatch,
    PrefixMatch,
    SuffixMatch,
}

impl ChecksumValue for TagHelperKind {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_str(self.as_str());
    }
}

impl ChecksumValue for TagStructure {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_int(match self {
            TagStructure::Unspecified => 0,
            TagStructure::NormalOrSelfClosing => 1,
            TagStructure::WithoutEndTag => 2,
        });
    }
}

impl ChecksumValue for NameComparison {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_int(match self {
            NameComparison::FullMatch => 0,
            NameComparison::PrefixMatch => 1,
        });
    }
}

impl ChecksumValue for ValueComparison {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_int(match self {
            ValueComparison::None => 0,
            ValueComparison::FullMatch => 1,
            ValueComparison::PrefixMatch => 2,
            ValueComparison::SuffixMatch => 3,
        });
    }
}
