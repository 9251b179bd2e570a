//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::batch::BatchOrchestrator;
use crate::cache::SharedCache;
use crate::catalog::{
    CatalogService, Category, HttpCatalogSource, InterfaceDetail, InterfacePage, PreloadSummary,
};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{
    BatchRequest, BatchResponse, ClearResponse, DeleteResponse, HealthResponse, ListQuery,
    SearchQuery, SearchResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Cached catalog access
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    /// Creates a new AppState around the given catalog service.
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the HTTP origin, the shared cache and the batch orchestrator.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = HttpCatalogSource::from_config(config)?;
        let cache = SharedCache::new(config.cache_config());
        let batch = BatchOrchestrator::new(config.batch_chunk_size);

        Ok(Self::new(CatalogService::new(
            Arc::new(source),
            cache,
            batch,
        )))
    }
}

// == Catalog Handlers ==

/// Handler for GET /projects/:project_id/interfaces
pub async fn list_interfaces_handler(
    State(state): State<AppState>,
    Path(project_id): Path<u64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<InterfacePage>> {
    let page = state
        .catalog
        .list_interfaces(project_id, query.page(), query.limit())
        .await?;
    Ok(Json(page))
}

/// Handler for GET /projects/:project_id/categories
pub async fn categories_handler(
    State(state): State<AppState>,
    Path(project_id): Path<u64>,
) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.catalog.list_categories(project_id).await?))
}

/// Handler for GET /projects/:project_id/search?q=
///
/// Case-insensitive match against interface titles and paths.
pub async fn search_handler(
    State(state): State<AppState>,
    Path(project_id): Path<u64>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let results = state.catalog.search(project_id, &query.q).await?;
    Ok(Json(SearchResponse::new(query.q, results)))
}

/// Handler for POST /projects/:project_id/preload
///
/// Warms the cache with every interface detail of the project. Individual
/// detail failures are reported in the body; only a failed listing is an
/// error response.
pub async fn preload_handler(
    State(state): State<AppState>,
    Path(project_id): Path<u64>,
) -> Result<Json<PreloadSummary>> {
    Ok(Json(state.catalog.preload(project_id).await?))
}

/// Handler for GET /interfaces/:id
pub async fn interface_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<InterfaceDetail>> {
    Ok(Json(state.catalog.interface_detail(id).await?))
}

/// Handler for POST /interfaces/batch
///
/// Always answers 200 once the request is valid; per-id failures are listed
/// in the body.
pub async fn batch_handler(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CatalogError::InvalidRequest(error_msg));
    }

    let result = state.catalog.batch_details(&req.ids, req.chunk_size).await;
    Ok(Json(BatchResponse::from(result)))
}

// == Cache Handlers ==

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.catalog.cache().stats()))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.catalog.cache().clear();
    Json(ClearResponse::new(cleared))
}

/// Handler for DELETE /cache/:key
pub async fn delete_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if !state.catalog.cache().delete(&key) {
        return Err(CatalogError::NotFound(format!("Key '{}' not found", key)));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
