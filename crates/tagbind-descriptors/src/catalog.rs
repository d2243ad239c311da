//! Loading tag helper descriptors from TOML or JSON catalog files.
//!
//! Every entry goes through the descriptor builders, so malformed names end
//! up as diagnostics on the produced descriptors rather than load errors.
//!
//! ```toml
//! [[tag_helpers]]
//! name = "AnchorTagHelper"
//! assembly = "Builtin"
//!
//! [[tag_helpers.rules]]
//! tag_name = "a"
//! attributes = [{ name = "asp-route-", name_comparison = "prefix_match" }]
//!
//! [[tag_helpers.bound_attributes]]
//! name = "asp-all-route-data"
//! property_name = "RouteValues"
//! type_name = "System.Collections.Generic.IDictionary<System.String, System.String>"
//! indexer_prefix = "asp-route-"
//! indexer_type_name = "System.String"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::collection::TagHelperCollection;
use crate::collection::TagHelperCollectionBuilder;
use crate::kinds::NameComparison;
use crate::kinds::TagHelperKind;
use crate::kinds::TagStructure;
use crate::kinds::ValueComparison;
use crate::tag_helper::TagHelperDescriptor;
use crate::tag_helper::TagHelperDescriptorBuilder;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML catalog{}: {error}", located(.path.as_deref()))]
    Toml {
        path: Option<String>,
        error: toml::de::Error,
    },
    #[error("Failed to parse JSON catalog{}: {error}", located(.path.as_deref()))]
    Json {
        path: Option<String>,
        error: serde_json::Error,
    },
    #[error("Unsupported catalog format for '{path}' (expected .toml or .json)")]
    UnsupportedFormat { path: String },
}

fn located(path: Option<&str>) -> String {
    path.map(|path| format!(" '{path}'")).unwrap_or_default()
}

impl CatalogError {
    /// Attaches the catalog path to a parse error.
    #[must_use]
    pub fn with_path(self, path: impl Into<String>) -> Self {
        match self {
            CatalogError::Toml { error, .. } => CatalogError::Toml {
                path: Some(path.into()),
                error,
            },
            CatalogError::Json { error, .. } => CatalogError::Json {
                path: Some(path.into()),
                error,
            },
            other => other,
        }
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(error: toml::de::Error) -> Self {
        CatalogError::Toml { path: None, error }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(error: serde_json::Error) -> Self {
        CatalogError::Json { path: None, error }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogFile {
    pub tag_helpers: Vec<TagHelperEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagHelperEntry {
    pub kind: TagHelperKind,
    pub name: String,
    pub assembly: String,
    pub display_name: Option<String>,
    pub documentation: Option<String>,
    pub tag_output_hint: Option<String>,
    pub type_name: Option<String>,
    pub case_sensitive: bool,
    pub rules: Vec<RuleEntry>,
    pub bound_attributes: Vec<BoundAttributeEntry>,
    pub allowed_child_tags: Vec<AllowedChildEntry>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleEntry {
    pub tag_name: Option<String>,
    pub parent_tag: Option<String>,
    pub tag_structure: TagStructure,
    pub attributes: Vec<RequiredAttributeEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequiredAttributeEntry {
    pub name: Option<String>,
    pub name_comparison: NameComparison,
    pub value: Option<String>,
    pub value_comparison: ValueComparison,
    pub display_name: Option<String>,
    pub directive: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundAttributeEntry {
    pub name: Option<String>,
    pub property_name: Option<String>,
    pub type_name: Option<String>,
    pub indexer_prefix: Option<String>,
    pub indexer_type_name: Option<String>,
    pub display_name: Option<String>,
    pub documentation: Option<String>,
    pub is_enum: bool,
    pub editor_required: bool,
    pub directive: bool,
    pub parameters: Vec<ParameterEntry>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterEntry {
    pub name: Option<String>,
    pub property_name: Option<String>,
    pub type_name: Option<String>,
    pub display_name: Option<String>,
    pub documentation: Option<String>,
    pub is_enum: bool,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllowedChildEntry {
    pub name: Option<String>,
    pub display_name: Option<String>,
}

impl TagHelperEntry {
    #[must_use]
    pub fn to_builder(&self) -> TagHelperDescriptorBuilder {
        let mut builder =
            TagHelperDescriptorBuilder::new(self.kind, self.name.as_str(), self.assembly.as_str());
        builder.case_sensitive(self.case_sensitive);
        if let Some(display_name) = &self.display_name {
            builder.display_name(display_name.as_str());
        }
        if let Some(documentation) = &self.documentation {
            builder.documentation(documentation.as_str());
        }
        if let Some(hint) = &self.tag_output_hint {
            builder.tag_output_hint(hint.as_str());
        }
        if let Some(type_name) = &self.type_name {
            builder.type_name(type_name.as_str());
        }
        for (key, value) in &self.metadata {
            builder.metadata(key.as_str(), value.as_str());
        }

        for rule in &self.rules {
            builder.tag_matching_rule(|r| {
                if let Some(tag_name) = &rule.tag_name {
                    r.tag_name(tag_name.as_str());
                }
                if let Some(parent_tag) = &rule.parent_tag {
                    r.parent_tag(parent_tag.as_str());
                }
                r.tag_structure(rule.tag_structure);
                for attribute in &rule.attributes {
                    r.attribute(|a| {
                        if let Some(name) = &attribute.name {
                            a.name(name.as_str());
                        }
                        if let Some(value) = &attribute.value {
                            a.value(value.as_str());
                        }
                        if let Some(display_name) = &attribute.display_name {
                            a.display_name(display_name.as_str());
                        }
                        a.name_comparison(attribute.name_comparison)
                            .value_comparison(attribute.value_comparison)
                            .directive_attribute(attribute.directive);
                    });
                }
            });
        }

        for attribute in &self.bound_attributes {
            builder.bound_attribute(|a| {
                if let Some(name) = &attribute.name {
                    a.name(name.as_str());
                }
                if let Some(property_name) = &attribute.property_name {
                    a.property_name(property_name.as_str());
                }
                if let Some(type_name) = &attribute.type_name {
                    a.type_name(type_name.as_str());
                }
                if let Some(prefix) = &attribute.indexer_prefix {
                    a.as_dictionary(
                        prefix.as_str(),
                        attribute.indexer_type_name.as_deref().unwrap_or_default(),
                    );
                }
                if let Some(display_name) = &attribute.display_name {
                    a.display_name(display_name.as_str());
                }
                if let Some(documentation) = &attribute.documentation {
                    a.documentation(documentation.as_str());
                }
                a.is_enum(attribute.is_enum)
                    .editor_required(attribute.editor_required)
                    .directive_attribute(attribute.directive);
                for (key, value) in &attribute.metadata {
                    a.metadata(key.as_str(), value.as_str());
                }
                for parameter in &attribute.parameters {
                    a.parameter(|p| {
                        if let Some(name) = &parameter.name {
                            p.name(name.as_str());
                        }
                        if let Some(property_name) = &parameter.property_name {
                            p.property_name(property_name.as_str());
                        }
                        if let Some(type_name) = &parameter.type_name {
                            p.type_name(type_name.as_str());
                        }
                        if let Some(display_name) = &parameter.display_name {
                            p.display_name(display_name.as_str());
                        }
                        if let Some(documentation) = &parameter.documentation {
                            p.documentation(documentation.as_str());
                        }
                        p.is_enum(parameter.is_enum);
                        for (key, value) in &parameter.metadata {
                            p.metadata(key.as_str(), value.as_str());
                        }
                    });
                }
            });
        }

        for child in &self.allowed_child_tags {
            builder.allowed_child_tag(|c| {
                if let Some(name) = &child.name {
                    c.name(name.as_str());
                }
                if let Some(display_name) = &child.display_name {
                    c.display_name(display_name.as_str());
                }
            });
        }

        builder
    }

    #[must_use]
    pub fn build(&self) -> TagHelperDescriptor {
        self.to_builder().build()
    }
}

fn build_entries(entries: &[TagHelperEntry]) -> TagHelperCollection {
    let mut builder = TagHelperCollectionBuilder::with_capacity(entries.len());
    for entry in entries {
        let descriptor = entry.build();
        if descriptor.has_errors() {
            tracing::warn!(
                tag_helper = descriptor.name(),
                errors = descriptor
                    .all_diagnostics()
                    .filter(|d| d.is_error())
                    .count(),
                "catalog entry produced error diagnostics"
            );
        }
        if !builder.add(descriptor) {
            tracing::debug!(tag_helper = %entry.name, "skipping duplicate catalog entry");
        }
    }
    builder.build()
}

pub fn from_toml(source: &str) -> Result<TagHelperCollection, CatalogError> {
    let file: CatalogFile = toml::from_str(source)?;
    Ok(build_entries(&file.tag_helpers))
}

/// Accepts a bare array of entries or an object with a `tag_helpers` array.
pub fn from_json(source: &str) -> Result<TagHelperCollection, CatalogError> {
    let entries = if source.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<TagHelperEntry>>(source)?
    } else {
        serde_json::from_str::<CatalogFile>(source)?.tag_helpers
    };
    Ok(build_entries(&entries))
}

/// Loads a catalog, choosing the format from the file extension.
pub fn load(path: &Path) -> Result<TagHelperCollection, CatalogError> {
    let path_str = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&str) -> Result<TagHelperCollection, CatalogError> = match extension.as_deref() {
        Some("toml") => from_toml,
        Some("json") => from_json,
        _ => return Err(CatalogError::UnsupportedFormat { path: path_str }),
    };

    let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path_str.clone(),
        source,
    })?;
    let collection = parse(&source).map_err(|err| err.with_path(path_str))?;
    tracing::debug!(
        path = %path.display(),
        tag_helpers = collection.len(),
        "loaded catalog"
    );
    Ok(collection)
}

/// Loads every catalog in order and merges them.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<TagHelperCollection, CatalogError> {
    let collections = paths
        .iter()
        .map(|path| load(path.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TagHelperCollection::merge(&collections))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_entry() {
        let collection = from_toml(
            r#"
            [[tag_helpers]]
            name = "BoldTagHelper"
            assembly = "Demo"

            [[tag_helpers.rules]]
            tag_name = "b"
            "#,
        )
        .unwrap();
        assert_eq!(collection.len(), 1);
        let descriptor = &collection[0];
        assert_eq!(descriptor.kind(), TagHelperKind::Default);
        assert_eq!(descriptor.tag_matching_rules()[0].tag_name(), "b");
        assert!(!descriptor.has_errors());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = from_toml(
            r#"
            [[tag_helpers]]
            name = "X"
            unexpected = 1
            "#,
        );
        assert!(matches!(result, Err(CatalogError::Toml { path: None, .. })));
    }

    #[test]
    fn test_unknown_field_in_json_array_entry() {
        let err = from_json(r#"[{"name": "A", "bogus": 1}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Json { path: None, .. }));
        let message = err.to_string();
        assert!(
            message.starts_with("Failed to parse JSON catalog: unknown field `bogus`"),
            "{message}"
        );
        assert!(message.contains("line 1"), "{message}");
    }

    #[test]
    fn test_unknown_field_in_json_object() {
        let err = from_json(r#"  {"tag_helpers": [], "extra": true}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `extra`"), "{err}");
    }

    #[test]
    fn test_with_path_names_the_file() {
        let err = from_toml("tag_helpers = 3").unwrap_err().with_path("helpers.toml");
        let message = err.to_string();
        assert!(
            message.starts_with("Failed to parse TOML catalog 'helpers.toml': "),
            "{message}"
        );
    }

    #[test]
    fn test_json_shapes() {
        let bare = from_json(r#"[{"name": "A", "assembly": "X"}]"#).unwrap();
        let wrapped = from_json(r#"{"tag_helpers": [{"name": "A", "assembly": "X"}]}"#).unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn test_invalid_names_become_diagnostics() {
        let collection = from_json(
            r#"[{
                "name": "Broken",
                "assembly": "X",
                "rules": [{"tag_name": "bad tag"}]
            }]"#,
        )
        .unwrap();
        assert!(collection[0].has_errors());
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let collection = from_toml(
            r#"
            [[tag_helpers]]
            name = "A"
            assembly = "X"

            [[tag_helpers]]
            name = "A"
            assembly = "X"
            "#,
        )
        .unwrap();
        assert_eq!(collection.len(), 1);
    }
}
