//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    batch_handler, categories_handler, clear_handler, delete_key_handler, health_handler,
    interface_detail_handler, list_interfaces_handler, preload_handler, search_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/projects/:project_id/interfaces",
            get(list_interfaces_handler),
        )
        .route("/projects/:project_id/categories", get(categories_handler))
        .route("/projects/:project_id/search", get(search_handler))
        .route("/projects/:project_id/preload", post(preload_handler))
        // Static segment takes priority over the :id capture
        .route("/interfaces/batch", post(batch_handler))
        .route("/interfaces/:id", get(interface_detail_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/:key", delete(delete_key_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::batch::BatchOrchestrator;
    use crate::cache::{CacheConfig, SharedCache};
    use crate::catalog::{
        CatalogService, CatalogSource, Category, InterfaceDetail, InterfacePage,
    };
    use crate::error::{CatalogError, Result};

    struct EmptySource;

    #[async_trait]
    impl CatalogSource for EmptySource {
        async fn list_interfaces(
            &self,
            _project_id: u64,
            _page: u32,
            _limit: u32,
        ) -> Result<InterfacePage> {
            Ok(InterfacePage::default())
        }

        async fn interface_detail(&self, id: u64) -> Result<InterfaceDetail> {
            Err(CatalogError::Transport {
                message: format!("connection refused fetching {}", id),
                timed_out: id == 0,
            })
        }

        async fn list_categories(&self, _project_id: u64) -> Result<Vec<Category>> {
            Ok(Vec::new())
        }
    }

    fn create_test_app() -> Router {
        let service = CatalogService::new(
            Arc::new(EmptySource),
            SharedCache::new(CacheConfig::default()),
            BatchOrchestrator::default(),
        );
        create_router(AppState::new(service))
    }

    async fn status_of(request: Request<Body>) -> StatusCode {
        create_test_app().oneshot(request).await.unwrap().status()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of(get_request("/health")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(status_of(get_request("/cache/stats")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_endpoint() {
        assert_eq!(
            status_of(get_request("/projects/11/interfaces?page=2&limit=5")).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_list_rejects_zero_limit() {
        assert_eq!(
            status_of(get_request("/projects/11/interfaces?limit=0")).await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_transport_errors_map_to_gateway_statuses() {
        assert_eq!(
            status_of(get_request("/interfaces/7")).await,
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(get_request("/interfaces/0")).await,
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[tokio::test]
    async fn test_batch_route_is_not_a_detail_lookup() {
        let request = Request::builder()
            .method("POST")
            .uri("/interfaces/batch")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"ids":[1,2]}"#))
            .unwrap();

        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_missing_key() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/cache/nonexistent")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_of(request).await, StatusCode::NOT_FOUND);
    }
}
