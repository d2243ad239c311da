//! An ordered, checksum-deduplicated set of tag helper descriptors.
//!
//! Collections are immutable and cheap to clone. Small collections answer
//! membership queries by scanning checksums; once a collection grows past
//! [`LOOKUP_THRESHOLD`] elements a checksum-to-index table is built on first
//! use and kept for the collection's lifetime.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::checksum::Checksum;
use crate::checksum::ChecksumBuilder;
use crate::tag_helper::TagHelperDescriptor;

/// Collections with more elements than this use a hash lookup for
/// [`TagHelperCollection::index_of`].
pub const LOOKUP_THRESHOLD: usize = 8;

static EMPTY_CHECKSUM: LazyLock<Checksum> = LazyLock::new(|| ChecksumBuilder::new().finalize());

#[derive(Clone, Default)]
pub struct TagHelperCollection(Repr);

#[derive(Clone, Default)]
enum Repr {
    #[default]
    Empty,
    Single(TagHelperDescriptor, Checksum),
    Many(Arc<ManyInner>),
}

struct ManyInner {
    items: Box<[TagHelperDescriptor]>,
    checksum: Checksum,
    lookup: OnceLock<FxHashMap<Checksum, usize>>,
}

fn aggregate_checksum(items: &[TagHelperDescriptor]) -> Checksum {
    let mut builder = ChecksumBuilder::new();
    for item in items {
        builder.append_checksum(item.checksum());
    }
    builder.finalize()
}

impl TagHelperCollection {
    #[must_use]
    pub fn empty() -> Self {
        Self(Repr::Empty)
    }

    /// Builds a collection from `items`, dropping later duplicates.
    pub fn create(items: impl IntoIterator<Item = TagHelperDescriptor>) -> Self {
        let items = items.into_iter();
        let mut builder = TagHelperCollectionBuilder::with_capacity(items.size_hint().0);
        builder.add_range(items);
        builder.build()
    }

    #[must_use]
    pub fn from_slice(items: &[TagHelperDescriptor]) -> Self {
        Self::create(items.iter().cloned())
    }

    /// Wraps items that are already known to be unique.
    fn from_unique(mut items: Vec<TagHelperDescriptor>) -> Self {
        match items.len() {
            0 => Self::empty(),
            1 => {
                let item = items.swap_remove(0);
                let checksum = aggregate_checksum(std::slice::from_ref(&item));
                Self(Repr::Single(item, checksum))
            }
            _ => {
                let checksum = aggregate_checksum(&items);
                Self(Repr::Many(Arc::new(ManyInner {
                    items: items.into_boxed_slice(),
                    checksum,
                    lookup: OnceLock::new(),
                })))
            }
        }
    }

    /// Combines `collections` in order, keeping the first occurrence of each
    /// descriptor.
    ///
    /// If every non-empty input is equal to the first non-empty input, that
    /// input is returned as-is without copying.
    #[must_use]
    pub fn merge(collections: &[TagHelperCollection]) -> Self {
        let mut non_empty = collections.iter().filter(|c| !c.is_empty());
        let Some(first) = non_empty.next() else {
            return Self::empty();
        };
        if non_empty.all(|other| other == first) {
            return first.clone();
        }

        let capacity = collections.iter().map(Self::len).sum();
        let mut builder = TagHelperCollectionBuilder::with_capacity(capacity);
        for collection in collections {
            builder.add_range(collection.iter().cloned());
        }
        builder.build()
    }

    #[must_use]
    pub fn merge_with(&self, other: &TagHelperCollection) -> Self {
        Self::merge(&[self.clone(), other.clone()])
    }

    /// Keeps the descriptors matching `predicate`, in their relative order.
    ///
    /// Returns a clone of `self` when everything matches and the empty
    /// collection when nothing does.
    #[must_use]
    pub fn filter(&self, mut predicate: impl FnMut(&TagHelperDescriptor) -> bool) -> Self {
        let items = self.as_slice();
        let Some(first_rejected) = items.iter().position(|item| !predicate(item)) else {
            return self.clone();
        };

        let mut kept = items[..first_rejected].to_vec();
        kept.extend(
            items[first_rejected + 1..]
                .iter()
                .filter(|&item| predicate(item))
                .cloned(),
        );
        Self::from_unique(kept)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.0 {
            Repr::Empty => 0,
            Repr::Single(..) => 1,
            Repr::Many(inner) => inner.items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.0, Repr::Empty)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TagHelperDescriptor] {
        match &self.0 {
            Repr::Empty => &[],
            Repr::Single(item, _) => std::slice::from_ref(item),
            Repr::Many(inner) => &inner.items,
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TagHelperDescriptor> {
        self.as_slice().get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagHelperDescriptor> {
        self.as_slice().iter()
    }

    /// Aggregate checksum of every element's checksum, in order.
    #[must_use]
    pub fn checksum(&self) -> Checksum {
        match &self.0 {
            Repr::Empty => *EMPTY_CHECKSUM,
            Repr::Single(_, checksum) => *checksum,
            Repr::Many(inner) => inner.checksum,
        }
    }

    #[must_use]
    pub fn index_of(&self, descriptor: &TagHelperDescriptor) -> Option<usize> {
        let checksum = descriptor.checksum();
        match &self.0 {
            Repr::Empty => None,
            Repr::Single(item, _) => (item.checksum() == checksum).then_some(0),
            Repr::Many(inner) if inner.items.len() <= LOOKUP_THRESHOLD => inner
                .items
                .iter()
                .position(|item| item.checksum() == checksum),
            Repr::Many(inner) => inner
                .lookup
                .get_or_init(|| {
                    inner
                        .items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| (item.checksum(), index))
                        .collect()
                })
                .get(&checksum)
                .copied(),
        }
    }

    #[must_use]
    pub fn contains(&self, descriptor: &TagHelperDescriptor) -> bool {
        self.index_of(descriptor).is_some()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<TagHelperDescriptor> {
        self.as_slice().to_vec()
    }
}

impl PartialEq for TagHelperCollection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.checksum() == other.checksum()
    }
}

impl Eq for TagHelperCollection {}

impl std::hash::Hash for TagHelperCollection {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.checksum().hash(state);
    }
}

impl fmt::Debug for TagHelperCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(TagHelperDescriptor::name))
            .finish()
    }
}

impl Index<usize> for TagHelperCollection {
    type Output = TagHelperDescriptor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a TagHelperCollection {
    type Item = &'a TagHelperDescriptor;
    type IntoIter = std::slice::Iter<'a, TagHelperDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<TagHelperDescriptor>> for TagHelperCollection {
    fn from(items: Vec<TagHelperDescriptor>) -> Self {
        Self::create(items)
    }
}

impl FromIterator<TagHelperDescriptor> for TagHelperCollection {
    fn from_iter<I: IntoIterator<Item = TagHelperDescriptor>>(iter: I) -> Self {
        Self::create(iter)
    }
}

/// Accumulates unique descriptors for a [`TagHelperCollection`].
#[derive(Default)]
pub struct TagHelperCollectionBuilder {
    items: Vec<TagHelperDescriptor>,
    seen: FxHashSet<Checksum>,
}

impl TagHelperCollectionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            seen: FxHashSet::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher),
        }
    }

    /// Adds `descriptor` unless an equal one is already present. Returns
    /// whether it was added.
    pub fn add(&mut self, descriptor: TagHelperDescriptor) -> bool {
        if !self.seen.insert(descriptor.checksum()) {
            return false;
        }
        self.items.push(descriptor);
        true
    }

    pub fn add_range(&mut self, descriptors: impl IntoIterator<Item = TagHelperDescriptor>) {
        for descriptor in descriptors {
            self.add(descriptor);
        }
    }

    #[must_use]
    pub fn contains(&self, descriptor: &TagHelperDescriptor) -> bool {
        self.seen.contains(&descriptor.checksum())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn build(self) -> TagHelperCollection {
        TagHelperCollection::from_unique(self.items)
    }
}
