//! Process-wide reuse of [`TagHelperBinder`]s.
//!
//! Binders are keyed by prefix and collection identity and held weakly, so a
//! binder lives only as long as some caller keeps its `Arc`. Dead entries are
//! swept periodically on insert.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::Weak;

use tagbind_descriptors::Checksum;
use tagbind_descriptors::TagHelperCollection;
use tagbind_source::FxDashMap;

use crate::binder::TagHelperBinder;

/// Inserts between sweeps of dead entries.
const PURGE_INTERVAL: usize = 64;

static GLOBAL_CACHE: OnceLock<TagHelperBinderCache> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BinderKey {
    prefix: Option<String>,
    checksum: Checksum,
    len: usize,
}

#[derive(Default)]
pub struct TagHelperBinderCache {
    binders: FxDashMap<BinderKey, Weak<TagHelperBinder>>,
    inserts: AtomicUsize,
}

impl TagHelperBinderCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared cache used across compilations.
    pub fn global() -> &'static TagHelperBinderCache {
        GLOBAL_CACHE.get_or_init(TagHelperBinderCache::new)
    }

    /// Returns the live binder for `(prefix, collection)`, building one if
    /// none exists.
    pub fn get_or_create(
        &self,
        prefix: Option<&str>,
        collection: &TagHelperCollection,
    ) -> Arc<TagHelperBinder> {
        let key = BinderKey {
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_string),
            checksum: collection.checksum(),
            len: collection.len(),
        };

        if let Some(binder) = self.binders.get(&key).and_then(|entry| entry.upgrade()) {
            tracing::debug!(checksum = ?key.checksum, "binder cache hit");
            return binder;
        }

        let binder = {
            let mut entry = self.binders.entry(key).or_default();
            // another thread may have won the race while we were unlocked
            if let Some(binder) = entry.upgrade() {
                tracing::debug!("binder cache hit after race");
                return binder;
            }
            let binder = Arc::new(TagHelperBinder::new(prefix, collection.clone()));
            *entry = Arc::downgrade(&binder);
            binder
        };
        tracing::debug!(tag_helpers = collection.len(), "binder cache miss");

        if self.inserts.fetch_add(1, Ordering::Relaxed) % PURGE_INTERVAL == PURGE_INTERVAL - 1 {
            self.purge();
        }
        binder
    }

    /// Drops entries whose binder is no longer referenced.
    pub fn purge(&self) {
        let before = self.binders.len();
        self.binders.retain(|_, binder| binder.strong_count() > 0);
        tracing::debug!(
            removed = before.saturating_sub(self.binders.len()),
            "purged binder cache"
        );
    }

    /// Number of entries, live or dead.
    #[must_use]
    pub fn len(&self) -> usize {
        self.binders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }
}

impl std::fmt::Debug for TagHelperBinderCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagHelperBinderCache")
            .field("entries", &self.binders.len())
            .finish()
    }
}
