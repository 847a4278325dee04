//! Cached list queries and their invalidation.
//!
//! Mutations never patch cached pages; a successful write invalidates the
//! whole resource family and the next read refetches from the server.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::api::{ApiResult, ResourceApi};
use crate::models::{Page, Record, ResourceKind};

/// Identifies one cached list page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: ResourceKind,
    pub page: u32,
}

impl QueryKey {
    pub const fn new(kind: ResourceKind, page: u32) -> Self {
        Self { kind, page }
    }

    pub const fn first_page(kind: ResourceKind) -> Self {
        Self::new(kind, 1)
    }
}

/// Something holding cached list data that a mutation must mark stale.
#[allow(async_fn_in_trait)]
pub trait QueryInvalidator {
    /// Invalidate (and, where supported, refetch) every list of `kind`.
    async fn invalidate(&self, kind: ResourceKind);
}

impl<T: QueryInvalidator + ?Sized> QueryInvalidator for &T {
    async fn invalidate(&self, kind: ResourceKind) {
        (**self).invalidate(kind).await;
    }
}

/// In-memory page cache with per-family generation counters.
#[derive(Debug, Default)]
pub struct ListCache {
    entries: Mutex<HashMap<QueryKey, Page<Record>>>,
    generations: Mutex<HashMap<ResourceKind, u64>>,
}

impl ListCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<Page<Record>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn insert(&self, key: QueryKey, page: Page<Record>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, page);
    }

    /// Drops every cached page of `kind`; returns how many were dropped.
    pub fn invalidate_kind(&self, kind: ResourceKind) -> usize {
        let removed = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            let before = entries.len();
            entries.retain(|key, _| key.kind != kind);
            before - entries.len()
        };

        *self
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_insert(0) += 1;

        tracing::debug!(resource = %kind, removed, "Invalidated list cache");
        removed
    }

    /// Number of invalidations seen for `kind`.
    pub fn generation(&self, kind: ResourceKind) -> u64 {
        self.generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .copied()
            .unwrap_or(0)
    }

    /// Returns the cached page or fetches and caches it.
    pub async fn fetch<A: ResourceApi + ?Sized>(
        &self,
        api: &A,
        key: QueryKey,
    ) -> ApiResult<Page<Record>> {
        if let Some(page) = self.get(&key) {
            return Ok(page);
        }
        let page = api.list(key.kind, key.page).await?;
        self.insert(key, page.clone());
        Ok(page)
    }
}

impl QueryInvalidator for ListCache {
    async fn invalidate(&self, kind: ResourceKind) {
        self.invalidate_kind(kind);
    }
}

/// A [`ListCache`] that refetches the first page right after invalidation.
#[derive(Debug)]
pub struct RefetchingCache<A> {
    api: A,
    cache: ListCache,
}

impl<A: ResourceApi> RefetchingCache<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: ListCache::new(),
        }
    }

    pub const fn cache(&self) -> &ListCache {
        &self.cache
    }

    pub async fn fetch(&self, key: QueryKey) -> ApiResult<Page<Record>> {
        self.cache.fetch(&self.api, key).await
    }
}

impl<A: ResourceApi> QueryInvalidator for RefetchingCache<A> {
    async fn invalidate(&self, kind: ResourceKind) {
        self.cache.invalidate_kind(kind);
        if let Err(error) = self.fetch(QueryKey::first_page(kind)).await {
            // Stale data stays invalidated; the next read retries.
            tracing::warn!(resource = %kind, "Refetch after invalidation failed: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::api::{ApiError, CreateMode};

    /// Answers `list` from a queue and records every request.
    #[derive(Default)]
    struct ScriptedLister {
        pages: RefCell<VecDeque<ApiResult<Page<Record>>>>,
        requests: RefCell<Vec<QueryKey>>,
    }

    impl ScriptedLister {
        fn then(self, result: ApiResult<Page<Record>>) -> Self {
            self.pages.borrow_mut().push_back(result);
            self
        }

        fn requests(&self) -> Vec<QueryKey> {
            self.requests.borrow().clone()
        }
    }

    impl ResourceApi for ScriptedLister {
        async fn list(&self, kind: ResourceKind, page: u32) -> ApiResult<Page<Record>> {
            self.requests.borrow_mut().push(QueryKey::new(kind, page));
            self.pages
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Page::default()))
        }

        async fn retrieve(&self, _kind: ResourceKind, _id: &str) -> ApiResult<Record> {
            unreachable!("caches only list")
        }

        async fn create(
            &self,
            _kind: ResourceKind,
            _payload: &Value,
            _mode: CreateMode,
        ) -> ApiResult<Record> {
            unreachable!("caches only list")
        }

        async fn update(&self, _kind: ResourceKind, _id: &str, _payload: &Value) -> ApiResult<Record> {
            unreachable!("caches only list")
        }

        async fn reactivate(&self, _kind: ResourceKind, _id: &str) -> ApiResult<Record> {
            unreachable!("caches only list")
        }

        async fn delete(&self, _kind: ResourceKind, _id: &str) -> ApiResult<()> {
            unreachable!("caches only list")
        }
    }

    fn ids(page: &Page<Record>) -> Vec<String> {
        page.results.iter().map(|record| record.id.clone()).collect()
    }

    fn page(ids: &[&str]) -> Page<Record> {
        Page {
            count: ids.len() as u64,
            next: None,
            previous: None,
            results: ids
                .iter()
                .map(|id| serde_json::from_value(json!({ "id": id })).unwrap())
                .collect(),
        }
    }

    #[test]
    fn invalidate_drops_only_matching_family() {
        let cache = ListCache::new();
        cache.insert(QueryKey::first_page(ResourceKind::Teachers), page(&["t1"]));
        cache.insert(QueryKey::new(ResourceKind::Teachers, 2), page(&["t2"]));
        cache.insert(QueryKey::first_page(ResourceKind::Holidays), page(&["h1"]));

        assert_eq!(cache.invalidate_kind(ResourceKind::Teachers), 2);
        assert!(cache
            .get(&QueryKey::first_page(ResourceKind::Teachers))
            .is_none());
        assert!(cache
            .get(&QueryKey::first_page(ResourceKind::Holidays))
            .is_some());
        assert_eq!(cache.generation(ResourceKind::Teachers), 1);
        assert_eq!(cache.generation(ResourceKind::Holidays), 0);
    }

    #[tokio::test]
    async fn invalidator_impl_bumps_generation() {
        let cache = ListCache::new();
        cache.invalidate(ResourceKind::Subjects).await;
        let borrowed = &cache;
        QueryInvalidator::invalidate(&borrowed, ResourceKind::Subjects).await;
        assert_eq!(cache.generation(ResourceKind::Subjects), 2);
    }

    #[tokio::test]
    async fn fetch_serves_cached_pages_without_a_request() {
        let api = ScriptedLister::default().then(Ok(page(&["s1"])));
        let cache = ListCache::new();
        let key = QueryKey::first_page(ResourceKind::Subjects);

        assert_eq!(ids(&cache.fetch(&api, key).await.unwrap()), ["s1"]);
        assert_eq!(ids(&cache.fetch(&api, key).await.unwrap()), ["s1"]);
        assert_eq!(api.requests(), [key]);
    }

    #[tokio::test]
    async fn refetching_cache_reloads_first_page_after_invalidation() {
        let api = ScriptedLister::default()
            .then(Ok(page(&["t1"])))
            .then(Ok(page(&["t2"])))
            .then(Ok(page(&["t1", "t9"])));
        let cache = RefetchingCache::new(api);
        let first = QueryKey::first_page(ResourceKind::Teachers);
        let second = QueryKey::new(ResourceKind::Teachers, 2);
        cache.fetch(first).await.unwrap();
        cache.fetch(second).await.unwrap();

        cache.invalidate(ResourceKind::Teachers).await;

        assert!(cache.cache().get(&second).is_none());
        let refreshed = cache.cache().get(&first).expect("first page refetched");
        assert_eq!(ids(&refreshed), ["t1", "t9"]);
        assert_eq!(cache.cache().generation(ResourceKind::Teachers), 1);
        assert_eq!(cache.api.requests(), [first, second, first]);
    }

    #[tokio::test]
    async fn failed_refetch_leaves_family_uncached() {
        let api = ScriptedLister::default()
            .then(Ok(page(&["h1"])))
            .then(Err(ApiError::status(503, json!({ "detail": "Service unavailable" }))));
        let cache = RefetchingCache::new(api);
        let first = QueryKey::first_page(ResourceKind::Holidays);
        cache.fetch(first).await.unwrap();

        cache.invalidate(ResourceKind::Holidays).await;

        assert!(cache.cache().get(&first).is_none());
        assert_eq!(cache.cache().generation(ResourceKind::Holidays), 1);
        assert_eq!(ids(&cache.fetch(first).await.unwrap()), Vec::<String>::new());
        assert_eq!(cache.api.requests(), [first, first, first]);
    }
}
