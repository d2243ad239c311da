use tagbind_descriptors::TagHelperCollection;
use tagbind_descriptors::TagHelperDescriptor;
use tagbind_descriptors::TagHelperDescriptorBuilder;
use tagbind_descriptors::TagHelperKind;

fn descriptor(name: &str) -> TagHelperDescriptor {
    let mut builder = TagHelperDescriptorBuilder::new(TagHelperKind::Default, name, "Tests");
    builder.tag_matching_rule(|rule| {
        rule.tag_name("div").require_attribute(name.to_ascii_lowercase());
    });
    builder.build()
}

fn names(collection: &TagHelperCollection) -> Vec<&str> {
    collection.iter().map(TagHelperDescriptor::name).collect()
}

#[test]
fn create_deduplicates_preserving_first_seen_order() {
    let collection = TagHelperCollection::create([
        descriptor("A"),
        descriptor("B"),
        descriptor("A"),
        descriptor("C"),
    ]);
    assert_eq!(names(&collection), ["A", "B", "C"]);
}

#[test]
fn merge_is_order_sensitive() {
    let ab = TagHelperCollection::create([descriptor("A"), descriptor("B")]);
    let bc = TagHelperCollection::create([descriptor("B"), descriptor("C")]);

    let left = TagHelperCollection::merge(&[ab.clone(), bc.clone()]);
    let right = TagHelperCollection::merge(&[bc, ab]);

    assert_eq!(names(&left), ["A", "B", "C"]);
    assert_eq!(names(&right), ["B", "C", "A"]);
    assert_ne!(left, right);
    assert!(left.iter().all(|d| right.contains(d)));
}

#[test]
fn filter_idempotence() {
    let collection = TagHelperCollection::create(["A", "B", "C"].map(descriptor));
    assert_eq!(collection.filter(|_| true), collection);
    assert_eq!(collection.filter(|_| false).len(), 0);
    assert!(collection.filter(|_| false).is_empty());
}

#[test]
fn equality_is_structural() {
    let a = TagHelperCollection::create(["A", "B"].map(descriptor));
    let b: TagHelperCollection = vec![descriptor("A"), descriptor("B")].into();
    assert_eq!(a, b);
    assert_eq!(a.checksum(), b.checksum());
}

#[test]
fn index_queries() {
    let items: Vec<_> = (0..32).map(|i| descriptor(&format!("T{i}"))).collect();
    let collection: TagHelperCollection = items.iter().cloned().collect();

    assert_eq!(collection.len(), 32);
    assert_eq!(collection[5].name(), "T5");
    assert_eq!(collection.index_of(&items[31]), Some(31));
    assert!(collection.contains(&descriptor("T0")));
    assert!(!collection.contains(&descriptor("T32")));
    assert!(collection.get(32).is_none());
}

#[test]
fn merge_with_empty_returns_input() {
    let collection = TagHelperCollection::create(["A", "B"].map(descriptor));
    let merged = collection.merge_with(&TagHelperCollection::empty());
    assert_eq!(merged, collection);
    assert_eq!(
        TagHelperCollection::empty().merge_with(&collection),
        collection
    );
}
