use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use tagbind_descriptors::names;
use tagbind_descriptors::Checksum;
use tagbind_descriptors::TagHelperCollection;
use tagbind_descriptors::TagHelperDescriptor;

use crate::binding::BoundRules;
use crate::binding::TagHelperBinding;
use crate::conventions;

/// Index over a [`TagHelperCollection`] for answering binding queries.
///
/// Descriptors are bucketed once by the case-folded tag names their rules
/// target; rules targeting `*` put the descriptor in a separate catch-all
/// list. A descriptor appears at most once per bucket.
#[derive(Debug)]
pub struct TagHelperBinder {
    tag_helper_prefix: Option<String>,
    collection: TagHelperCollection,
    by_tag_name: FxHashMap<String, Vec<TagHelperDescriptor>>,
    catch_all: Vec<TagHelperDescriptor>,
}

impl TagHelperBinder {
    /// An empty `tag_helper_prefix` behaves like no prefix.
    #[must_use]
    pub fn new(tag_helper_prefix: Option<&str>, collection: TagHelperCollection) -> Self {
        let mut by_tag_name: FxHashMap<String, Vec<TagHelperDescriptor>> = FxHashMap::default();
        let mut catch_all = Vec::new();

        for descriptor in &collection {
            let mut buckets = FxHashSet::default();
            let mut in_catch_all = false;

            for rule in descriptor.tag_matching_rules() {
                if rule.is_catch_all() {
                    if !in_catch_all {
                        catch_all.push(descriptor.clone());
                        in_catch_all = true;
                    }
                } else if !rule.tag_name().is_empty() {
                    let key = names::fold(rule.tag_name());
                    if buckets.insert(key.clone()) {
                        by_tag_name
                            .entry(key)
                            .or_default()
                            .push(descriptor.clone());
                    }
                }
            }
        }

        tracing::debug!(
            tag_helpers = collection.len(),
            tag_names = by_tag_name.len(),
            catch_all = catch_all.len(),
            prefix = ?tag_helper_prefix,
            "built tag helper binder"
        );

        Self {
            tag_helper_prefix: tag_helper_prefix
                .filter(|prefix| !prefix.is_empty())
                .map(str::to_string),
            collection,
            by_tag_name,
            catch_all,
        }
    }

    #[must_use]
    pub fn tag_helper_prefix(&self) -> Option<&str> {
        self.tag_helper_prefix.as_deref()
    }

    #[must_use]
    pub fn collection(&self) -> &TagHelperCollection {
        &self.collection
    }

    /// Computes which tag helpers apply to `tag_name`.
    ///
    /// Returns `None` when nothing matched, including when a prefix is
    /// configured and `tag_name` does not carry it. The parent tag has the
    /// prefix stripped only when the parent was itself bound as a tag helper.
    #[must_use]
    pub fn get_binding(
        &self,
        tag_name: &str,
        attributes: &[(String, String)],
        parent_tag: Option<&str>,
        parent_is_tag_helper: bool,
    ) -> Option<TagHelperBinding> {
        let (tag_name_without_prefix, parent_without_prefix) = match &self.tag_helper_prefix {
            None => (tag_name, parent_tag),
            Some(prefix) => {
                let stripped = names::strip_prefix(tag_name, prefix, false)
                    .filter(|rest| !rest.is_empty())?;
                let parent = if parent_is_tag_helper {
                    parent_tag
                        .map(|parent| names::strip_prefix(parent, prefix, false).unwrap_or(parent))
                } else {
                    parent_tag
                };
                (stripped, parent)
            }
        };

        let mut seen: FxHashSet<Checksum> = FxHashSet::default();
        let mut bound = Vec::new();

        let literal = self
            .by_tag_name
            .get(&names::fold(tag_name_without_prefix))
            .map_or(&[][..], Vec::as_slice);

        for descriptor in literal.iter().chain(&self.catch_all) {
            if !seen.insert(descriptor.checksum()) {
                continue;
            }
            let rule_indices: Vec<usize> = descriptor
                .tag_matching_rules()
                .iter()
                .enumerate()
                .filter(|(_, rule)| {
                    conventions::satisfies_rule(
                        tag_name_without_prefix,
                        parent_without_prefix,
                        attributes,
                        rule,
                    )
                })
                .map(|(index, _)| index)
                .collect();
            if !rule_indices.is_empty() {
                bound.push(BoundRules::new(descriptor.clone(), rule_indices));
            }
        }

        tracing::trace!(tag_name, matched = bound.len(), "computed tag helper binding");

        if bound.is_empty() {
            return None;
        }
        Some(TagHelperBinding::new(
            tag_name,
            attributes,
            parent_tag,
            parent_is_tag_helper,
            self.tag_helper_prefix.as_deref(),
            bound,
        ))
    }
}
