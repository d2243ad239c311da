//! Matching observed attribute names against a tag helper's bound attributes.

use tagbind_descriptors::names;
use tagbind_descriptors::BoundAttributeDescriptor;
use tagbind_descriptors::BoundAttributeParameterDescriptor;
use tagbind_descriptors::TagHelperDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundAttributeMatchKind {
    /// The attribute name equals the bound attribute's name.
    Name,
    /// The attribute name starts with the bound attribute's indexer prefix.
    Indexer,
    /// The attribute name is `base:parameter` for one of the bound
    /// attribute's parameters.
    Parameter,
}

/// A bound attribute (and possibly one of its parameters) selected by an
/// observed attribute name.
#[derive(Debug, Clone, Copy)]
pub struct BoundAttributeMatch<'a> {
    attribute: &'a BoundAttributeDescriptor,
    parameter: Option<&'a BoundAttributeParameterDescriptor>,
    is_indexer_match: bool,
}

impl<'a> BoundAttributeMatch<'a> {
    #[must_use]
    pub fn attribute(&self) -> &'a BoundAttributeDescriptor {
        self.attribute
    }

    #[must_use]
    pub fn parameter(&self) -> Option<&'a BoundAttributeParameterDescriptor> {
        self.parameter
    }

    #[must_use]
    pub fn kind(&self) -> BoundAttributeMatchKind {
        match (self.parameter, self.is_indexer_match) {
            (Some(_), _) => BoundAttributeMatchKind::Parameter,
            (None, true) => BoundAttributeMatchKind::Indexer,
            (None, false) => BoundAttributeMatchKind::Name,
        }
    }

    /// Whether the attribute part (before any `:parameter`) matched through
    /// the indexer prefix.
    #[must_use]
    pub fn is_indexer_match(&self) -> bool {
        self.is_indexer_match
    }

    #[must_use]
    pub fn expects_string_value(&self) -> bool {
        match self.parameter {
            Some(parameter) => parameter.is_string_property(),
            None if self.is_indexer_match => self.attribute.is_indexer_string_property(),
            None => self.attribute.is_string_property(),
        }
    }

    #[must_use]
    pub fn expects_boolean_value(&self) -> bool {
        match self.parameter {
            Some(parameter) => parameter.is_boolean_property(),
            None if self.is_indexer_match => self.attribute.is_indexer_boolean_property(),
            None => self.attribute.is_boolean_property(),
        }
    }
}

#[must_use]
pub fn satisfies_bound_attribute_name(name: &str, attribute: &BoundAttributeDescriptor) -> bool {
    !attribute.name().is_empty() && names::eq(name, attribute.name(), attribute.case_sensitive())
}

/// An exact name match always wins over the indexer prefix.
#[must_use]
pub fn satisfies_bound_attribute_indexer(name: &str, attribute: &BoundAttributeDescriptor) -> bool {
    attribute.indexer_name_prefix().is_some_and(|prefix| {
        names::starts_with(name, prefix, attribute.case_sensitive())
            && !satisfies_bound_attribute_name(name, attribute)
    })
}

fn match_parameter<'a>(
    name: &str,
    attribute: &'a BoundAttributeDescriptor,
) -> Option<BoundAttributeMatch<'a>> {
    let (base, parameter_name) = names::split_parameter(name)?;
    let is_indexer_match = if satisfies_bound_attribute_name(base, attribute) {
        false
    } else if satisfies_bound_attribute_indexer(base, attribute) {
        true
    } else {
        return None;
    };

    let parameter = attribute
        .parameters()
        .iter()
        .find(|parameter| names::eq(parameter_name, parameter.name(), parameter.case_sensitive()))?;
    Some(BoundAttributeMatch {
        attribute,
        parameter: Some(parameter),
        is_indexer_match,
    })
}

fn match_attribute<'a>(
    name: &str,
    attribute: &'a BoundAttributeDescriptor,
) -> Option<BoundAttributeMatch<'a>> {
    if let Some(found) = match_parameter(name, attribute) {
        return Some(found);
    }
    let is_indexer_match = if satisfies_bound_attribute_name(name, attribute) {
        false
    } else if satisfies_bound_attribute_indexer(name, attribute) {
        true
    } else {
        return None;
    };
    Some(BoundAttributeMatch {
        attribute,
        parameter: None,
        is_indexer_match,
    })
}

/// Finds the bound attribute `name` binds to on `descriptor`.
///
/// Parameters are tried first across all bound attributes, then exact names,
/// then indexer prefixes.
#[must_use]
pub fn bound_attribute_match<'a>(
    descriptor: &'a TagHelperDescriptor,
    name: &str,
) -> Option<BoundAttributeMatch<'a>> {
    let attributes = descriptor.bound_attributes();

    attributes
        .iter()
        .find_map(|attribute| match_parameter(name, attribute))
        .or_else(|| {
            attributes
                .iter()
                .find(|attribute| satisfies_bound_attribute_name(name, attribute))
                .map(|attribute| BoundAttributeMatch {
                    attribute,
                    parameter: None,
                    is_indexer_match: false,
                })
        })
        .or_else(|| {
            attributes
                .iter()
                .find(|attribute| satisfies_bound_attribute_indexer(name, attribute))
                .map(|attribute| BoundAttributeMatch {
                    attribute,
                    parameter: None,
                    is_indexer_match: true,
                })
        })
}

/// Every bound attribute on `descriptor` that `name` satisfies, in
/// declaration order.
pub fn attribute_matches<'a>(
    descriptor: &'a TagHelperDescriptor,
    name: &'a str,
) -> impl Iterator<Item = BoundAttributeMatch<'a>> + 'a {
    descriptor
        .bound_attributes()
        .iter()
        .filter_map(move |attribute| match_attribute(name, attribute))
}
