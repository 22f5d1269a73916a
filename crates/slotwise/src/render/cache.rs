//! Memoization of resolved styles.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;

use super::resolver::{ResolvedStyle, StyleResolver};
use crate::variant::Selection;

/// A concurrent cache of resolved styles.
///
/// Entries are keyed by a caller-chosen chain key `K` (a component name, a
/// theme id, ...) and the selection. Concurrent misses for the same entry may
/// both resolve; the first insert wins and both callers get equal results.
///
/// # Example
///
/// ```rust
/// use slotwise::{ResolveCache, Selection, StyleDocument, StyleResolver};
///
/// let doc = StyleDocument::new().slot("base", "flex");
/// let resolver = StyleResolver::new(doc.compile().unwrap());
/// let cache = ResolveCache::new();
///
/// let first = cache.get_or_resolve("button", &resolver, &Selection::new());
/// let second = cache.get_or_resolve("button", &resolver, &Selection::new());
///
/// assert_eq!(first.slot("base"), "flex");
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
pub struct ResolveCache<K> {
    entries: DashMap<(K, Selection), Arc<ResolvedStyle>>,
}

impl<K: Eq + Hash> ResolveCache<K> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Returns the cached style for `(key, selection)`, resolving it on a miss.
    pub fn get_or_resolve(
        &self,
        key: K,
        resolver: &StyleResolver,
        selection: &Selection,
    ) -> Arc<ResolvedStyle> {
        self.get_or_insert_with(key, selection, || resolver.resolve(selection))
    }

    /// Returns the cached style for `(key, selection)`, computing it on a miss.
    pub fn get_or_insert_with<F>(
        &self,
        key: K,
        selection: &Selection,
        compute: F,
    ) -> Arc<ResolvedStyle>
    where
        F: FnOnce() -> ResolvedStyle,
    {
        let entry_key = (key, selection.clone());
        if let Some(hit) = self.entries.get(&entry_key) {
            tracing::trace!(selection = selection.len(), "resolve cache hit");
            return Arc::clone(hit.value());
        }

        tracing::trace!(selection = selection.len(), "resolve cache miss");
        // Computed outside any shard lock; a racing insert keeps its value.
        let resolved = Arc::new(compute());
        let stored = self.entries.entry(entry_key).or_insert(resolved);
        Arc::clone(stored.value())
    }

    /// Drops every entry for `key`.
    pub fn invalidate(&self, key: &K) {
        self.entries.retain(|(entry, _), _| entry != key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash> std::fmt::Debug for ResolveCache<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolveCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl<K: Eq + Hash> Default for ResolveCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StyleDocument;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn resolver(classes: &str) -> StyleResolver {
        StyleResolver::new(StyleDocument::new().slot("base", classes).compile().unwrap())
    }

    #[test]
    fn test_hit_returns_same_entry() {
        let cache = ResolveCache::new();
        let resolver = resolver("flex");
        let selection = Selection::new().set("size", "sm");
        let a = cache.get_or_resolve(1u32, &resolver, &selection);
        let b = cache.get_or_resolve(1u32, &resolver, &selection);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_and_selections_are_distinct() {
        let cache = ResolveCache::new();
        let resolver = resolver("flex");
        cache.get_or_resolve("a", &resolver, &Selection::new());
        cache.get_or_resolve("b", &resolver, &Selection::new());
        cache.get_or_resolve("a", &resolver, &Selection::new().set("size", "sm"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_compute_runs_once_per_entry() {
        let cache = ResolveCache::new();
        let resolver = resolver("flex");
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            cache.get_or_insert_with("a", &Selection::new(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                resolver.resolve(&Selection::new())
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = ResolveCache::new();
        let flex = resolver("flex");
        let grid = resolver("grid");
        cache.get_or_resolve("a", &flex, &Selection::new());
        cache.get_or_resolve("a", &flex, &Selection::new().set("size", "sm"));
        cache.get_or_resolve("b", &flex, &Selection::new());

        cache.invalidate(&"a");
        assert_eq!(cache.len(), 1);
        let fresh = cache.get_or_resolve("a", &grid, &Selection::new());
        assert_eq!(fresh.slot("base"), "grid");

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(ResolveCache::new());
        let resolver = Arc::new(resolver("flex p-2 p-4"));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let resolver = Arc::clone(&resolver);
                std::thread::spawn(move || {
                    let size = if i % 2 == 0 { "sm" } else { "md" };
                    let selection = Selection::new().set("size", size);
                    cache.get_or_resolve("button", &resolver, &selection)
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().slot("base"), "flex p-4");
        }
        assert_eq!(cache.len(), 2);
    }
}
