//! Catalog Service
//!
//! Catalog operations served through the read-through cache. Listing, detail
//! and category lookups are cached per operation and arguments; search filters
//! the cached full listing; batch and preload fetch details in chunks.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use tracing::{debug, info};

use crate::batch::{BatchItemError, BatchOrchestrator, BatchResult};
use crate::cache::{Cached, CachedFetcher, SharedCache};
use crate::catalog::{
    CatalogSource, CatalogValue, Category, InterfaceDetail, InterfacePage, InterfaceSummary,
};
use crate::error::{CatalogError, Result};

/// Page size used when a whole project listing is needed at once.
pub const ALL_INTERFACES_LIMIT: u32 = 10_000;

const OP_LIST_INTERFACES: &str = "list_interfaces";
const OP_INTERFACE_DETAIL: &str = "interface_detail";
const OP_LIST_CATEGORIES: &str = "list_categories";

// == Preload Summary ==
/// Outcome of warming the cache for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreloadSummary {
    pub project_id: u64,
    pub total: usize,
    pub succeeded: usize,
    pub failed: Vec<BatchItemError<u64>>,
    pub rounds: usize,
    pub summary: String,
}

impl PreloadSummary {
    fn new<V>(project_id: u64, result: &BatchResult<u64, V>) -> Self {
        Self {
            project_id,
            total: result.total(),
            succeeded: result.successes.len(),
            failed: result.failures.clone(),
            rounds: result.rounds,
            summary: result.summary(),
        }
    }
}

// == Catalog Service ==
/// Cached access to the catalog origin.
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    fetcher: CachedFetcher<CatalogValue>,
    batch: BatchOrchestrator,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("batch", &self.batch)
            .finish_non_exhaustive()
    }
}

impl CatalogService {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        cache: SharedCache<CatalogValue>,
        batch: BatchOrchestrator,
    ) -> Self {
        Self {
            source,
            fetcher: CachedFetcher::new(cache),
            batch,
        }
    }

    pub fn cache(&self) -> &SharedCache<CatalogValue> {
        self.fetcher.cache()
    }

    async fn cached<T, A, F, Fut>(&self, operation: &str, args: &A, fetch: F) -> Result<T>
    where
        T: Into<CatalogValue> + TryFrom<CatalogValue, Error = CatalogError>,
        A: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let value = self
            .fetcher
            .fetch(operation, args, || async move { fetch().await.map(Into::into) })
            .await?;
        T::try_from(value)
    }

    // == List Interfaces ==
    pub async fn list_interfaces(
        &self,
        project_id: u64,
        page: u32,
        limit: u32,
    ) -> Result<InterfacePage> {
        if page == 0 || limit == 0 {
            return Err(CatalogError::InvalidRequest(
                "page and limit must be at least 1".to_string(),
            ));
        }

        self.cached(OP_LIST_INTERFACES, &(project_id, page, limit), || {
            self.source.list_interfaces(project_id, page, limit)
        })
        .await
    }

    /// Every interface of a project, collected page by page.
    ///
    /// Stops at the last page the origin reports, or at the first short page.
    pub async fn list_all_interfaces(&self, project_id: u64) -> Result<Vec<InterfaceSummary>> {
        let mut interfaces = Vec::new();
        let mut page = 1;

        loop {
            let current = self
                .list_interfaces(project_id, page, ALL_INTERFACES_LIMIT)
                .await?;
            let fetched = current.list.len();
            interfaces.extend(current.list);

            if fetched < ALL_INTERFACES_LIMIT as usize || u64::from(page) >= current.total {
                break;
            }
            page += 1;
        }

        debug!(project_id, pages = page, count = interfaces.len(), "Listed all interfaces");
        Ok(interfaces)
    }

    // == Interface Detail ==
    pub async fn interface_detail(&self, id: u64) -> Result<InterfaceDetail> {
        self.cached(OP_INTERFACE_DETAIL, &id, || self.source.interface_detail(id))
            .await
    }

    // == Categories ==
    pub async fn list_categories(&self, project_id: u64) -> Result<Vec<Category>> {
        self.cached(OP_LIST_CATEGORIES, &project_id, || {
            self.source.list_categories(project_id)
        })
        .await
    }

    // == Search ==
    /// Interfaces of a project whose title or path contains `keyword`,
    /// ignoring case.
    pub async fn search(&self, project_id: u64, keyword: &str) -> Result<Vec<InterfaceSummary>> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Err(CatalogError::InvalidRequest(
                "search keyword cannot be empty".to_string(),
            ));
        }

        let matches = self
            .list_all_interfaces(project_id)
            .await?
            .into_iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&needle)
                    || item.path.to_lowercase().contains(&needle)
            })
            .collect();
        Ok(matches)
    }

    // == Batch Details ==
    /// Fetches details for `ids` in chunks, through the cache.
    pub async fn batch_details(
        &self,
        ids: &[u64],
        chunk_size: Option<usize>,
    ) -> BatchResult<u64, InterfaceDetail> {
        let orchestrator = chunk_size.map(BatchOrchestrator::new).unwrap_or(self.batch);
        self.run_details(orchestrator, ids).await
    }

    // == Preload ==
    /// Warms the cache with every interface detail of a project.
    ///
    /// Fails only if the project listing cannot be fetched.
    pub async fn preload(&self, project_id: u64) -> Result<PreloadSummary> {
        info!(project_id, "Preloading project interfaces");

        let discover = async {
            let interfaces = self.list_all_interfaces(project_id).await?;
            Ok::<_, CatalogError>(interfaces.into_iter().map(|item| item.id).collect::<Vec<u64>>())
        };

        let detail = self.detail_loader();
        let result = self
            .batch
            .preload(discover, |id: u64| {
                let detail = &detail;
                async move { detail.call(id).await.map(|_| ()) }
            })
            .await?;

        Ok(PreloadSummary::new(project_id, &result))
    }

    async fn run_details(
        &self,
        orchestrator: BatchOrchestrator,
        ids: &[u64],
    ) -> BatchResult<u64, InterfaceDetail> {
        let detail = self.detail_loader();
        orchestrator
            .run_batch(ids, |id| {
                let detail = &detail;
                async move { InterfaceDetail::try_from(detail.call(id).await?) }
            })
            .await
    }

    /// Detail fetch bound to the same cache entries as `interface_detail`.
    fn detail_loader(
        &self,
    ) -> Cached<CatalogValue, impl Fn(u64) -> BoxFuture<'static, Result<CatalogValue>>> {
        let source = Arc::clone(&self.source);
        self.fetcher.with_cache(OP_INTERFACE_DETAIL, move |id: u64| {
            let source = Arc::clone(&source);
            async move { source.interface_detail(id).await.map(CatalogValue::from) }.boxed()
        })
    }
}
