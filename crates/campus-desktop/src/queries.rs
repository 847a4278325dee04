//! Reactive queries using dioxus-query

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use campus_core::api::{ApiClient, ResourceApi};
use campus_core::cache::QueryInvalidator;
use campus_core::models::{Page, Record, ResourceKind};
use dioxus_query::prelude::*;

/// Query capability for one page of a resource family.
///
/// Keys are the resource kind so a single invalidation reaches every page.
#[derive(Clone)]
pub struct ResourceListQuery {
    pub client: Option<Arc<ApiClient>>,
    pub page: u32,
}

impl PartialEq for ResourceListQuery {
    fn eq(&self, other: &Self) -> bool {
        let same_client = match (&self.client, &other.client) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_client && self.page == other.page
    }
}

impl Eq for ResourceListQuery {}

impl Hash for ResourceListQuery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.client
            .as_ref()
            .map(|arc| Arc::as_ptr(arc) as usize)
            .hash(state);
        self.page.hash(state);
    }
}

impl QueryCapability for ResourceListQuery {
    type Ok = Page<Record>;
    type Err = String;
    type Keys = ResourceKind;

    async fn run(&self, kind: &Self::Keys) -> Result<Self::Ok, Self::Err> {
        let client = self.client.as_ref().ok_or("API client not configured")?;
        tracing::debug!(resource = %kind, page = self.page, "ResourceListQuery: fetching");
        client
            .list(*kind, self.page)
            .await
            .map_err(|error| error.to_string())
    }
}

/// Marks every cached page of `kind` stale; mounted lists refetch.
pub async fn invalidate_resource_list(kind: ResourceKind) {
    tracing::debug!(resource = %kind, "Invalidating resource list query");
    QueriesStorage::<ResourceListQuery>::invalidate_matching(kind).await;
}

/// Hook for one list page (always call unconditionally - uses enable flag)
pub fn use_resource_list_query(
    client: Option<Arc<ApiClient>>,
    kind: ResourceKind,
    page: u32,
) -> UseQuery<ResourceListQuery> {
    let enabled = client.is_some();
    use_query(Query::new(kind, ResourceListQuery { client, page }).enable(enabled))
}

/// Routes core invalidations into the dioxus-query cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceListInvalidator;

impl QueryInvalidator for ResourceListInvalidator {
    async fn invalidate(&self, kind: ResourceKind) {
        invalidate_resource_list(kind).await;
    }
}
