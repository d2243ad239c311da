mod attributes;
mod binder;
mod binding;
mod cache;
pub mod conventions;

pub use attributes::attribute_matches;
pub use attributes::bound_attribute_match;
pub use attributes::satisfies_bound_attribute_indexer;
pub use attributes::satisfies_bound_attribute_name;
pub use attributes::BoundAttributeMatch;
pub use attributes::BoundAttributeMatchKind;
pub use binder::TagHelperBinder;
pub use binding::BoundRules;
pub use binding::TagHelperBinding;
pub use cache::TagHelperBinderCache;
