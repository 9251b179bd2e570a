//! Request and Response models for the catalog gateway API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{BatchRequest, ListQuery, SearchQuery};
pub use responses::{
    BatchResponse, ClearResponse, DeleteResponse, HealthResponse, SearchResponse, StatsResponse,
};
