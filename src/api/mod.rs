//! API Module
//!
//! HTTP handlers and routing for the catalog gateway REST API.
//!
//! # Endpoints
//! - `GET /projects/:project_id/interfaces` - One page of a project's interfaces
//! - `GET /projects/:project_id/categories` - Interface categories of a project
//! - `GET /projects/:project_id/search?q=` - Search interfaces by title or path
//! - `POST /projects/:project_id/preload` - Warm the cache for a project
//! - `GET /interfaces/:id` - Interface detail
//! - `POST /interfaces/batch` - Fetch many interface details in chunks
//! - `GET /cache/stats` - Cache statistics
//! - `DELETE /cache` - Drop every cache entry
//! - `DELETE /cache/:key` - Drop one cache entry
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
