mod allowed_child_tag;
mod bound_attribute;
mod bound_attribute_parameter;
mod builtins;
pub mod catalog;
pub mod checksum;
mod collection;
mod diagnostics;
mod kinds;
mod matching_rule;
pub mod metadata;
pub mod names;
mod required_attribute;
mod tag_helper;
mod validation;

pub use allowed_child_tag::AllowedChildTagDescriptor;
pub use allowed_child_tag::AllowedChildTagDescriptorBuilder;
pub use bound_attribute::BoundAttributeDescriptor;
pub use bound_attribute::BoundAttributeDescriptorBuilder;
pub use bound_attribute_parameter::BoundAttributeParameterDescriptor;
pub use bound_attribute_parameter::BoundAttributeParameterDescriptorBuilder;
pub use builtins::builtin_tag_helpers;
pub use catalog::CatalogError;
pub use checksum::Checksum;
pub use collection::TagHelperCollection;
pub use collection::TagHelperCollectionBuilder;
pub use collection::LOOKUP_THRESHOLD;
pub use diagnostics::DescriptorError;
pub use diagnostics::Diagnostic;
pub use diagnostics::Severity;
pub use kinds::NameComparison;
pub use kinds::TagHelperKind;
pub use kinds::TagStructure;
pub use kinds::ValueComparison;
pub use matching_rule::TagMatchingRuleDescriptor;
pub use matching_rule::TagMatchingRuleDescriptorBuilder;
pub use metadata::Metadata;
pub use required_attribute::RequiredAttributeDescriptor;
pub use required_attribute::RequiredAttributeDescriptorBuilder;
pub use tag_helper::TagHelperDescriptor;
pub use tag_helper::TagHelperDescriptorBuilder;
