use std::fmt;
use std::sync::OnceLock;

use tagbind_descriptors::TagHelperCollection;
use tagbind_descriptors::TagHelperDescriptor;
use tagbind_descriptors::TagHelperDescriptorBuilder;
use tagbind_descriptors::TagHelperKind;

const TAG_NAMES: &[&str] = &[
    "a", "button", "div", "form", "img", "input", "label", "li", "link", "option", "script",
    "select", "span", "table", "textarea", "ul",
];

const SIZES: &[usize] = &[1, 8, 64, 512];

/// A collection of synthetic tag helpers plus elements to bind against it.
pub struct CollectionFixture {
    pub label: String,
    pub descriptors: Vec<TagHelperDescriptor>,
    pub collection: TagHelperCollection,
    pub queries: Vec<ElementQuery>,
}

impl fmt::Display for CollectionFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Clone, Debug)]
pub struct ElementQuery {
    pub tag_name: String,
    pub attributes: Vec<(String, String)>,
    pub parent_tag: Option<String>,
}

pub fn collection_fixtures() -> &'static [CollectionFixture] {
    static FIXTURES: OnceLock<Vec<CollectionFixture>> = OnceLock::new();
    FIXTURES
        .get_or_init(|| SIZES.iter().map(|&size| build_fixture(size)).collect())
        .as_slice()
}

/// Every fourth descriptor targets all tags; the rest target one of a small
/// pool of tag names and require a numbered attribute.
pub fn synthetic_descriptor(index: usize) -> TagHelperDescriptor {
    let tag_name = TAG_NAMES[index % TAG_NAMES.len()];
    let attribute = format!("th-{index}");
    let mut builder = TagHelperDescriptorBuilder::new(
        TagHelperKind::Default,
        format!("Bench.TagHelper{index}"),
        "Bench",
    );
    builder
        .tag_matching_rule(|rule| {
            if index % 4 == 0 {
                rule.tag_name("*");
            } else {
                rule.tag_name(tag_name);
            }
            rule.require_attribute(attribute.clone());
        })
        .bound_attribute(|bound| {
            bound
                .name(attribute.clone())
                .property_name(format!("Value{index}"))
                .type_name("System.String");
        });
    builder.build()
}

fn build_fixture(size: usize) -> CollectionFixture {
    let descriptors: Vec<_> = (0..size).map(synthetic_descriptor).collect();
    let collection = TagHelperCollection::from_slice(&descriptors);
    let queries = (0..size.min(32))
        .map(|index| ElementQuery {
            tag_name: TAG_NAMES[index % TAG_NAMES.len()].to_string(),
            attributes: vec![
                (format!("th-{index}"), "value".to_string()),
                ("class".to_string(), "bench".to_string()),
            ],
            parent_tag: Some("div".to_string()),
        })
        .collect();

    CollectionFixture {
        label: format!("{size} tag helpers"),
        descriptors,
        collection,
        queries,
    }
}
