//! Request DTOs for the catalog gateway API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

/// Default page size for interface listings
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Largest number of ids accepted by one batch request
pub const MAX_BATCH_IDS: usize = 500;

/// Query string for GET /projects/:project_id/interfaces
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// 1-based page number (default 1)
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size (default 20)
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }
}

/// Query string for GET /projects/:project_id/search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// Keyword matched against interface titles and paths
    pub q: String,
}

/// Request body for POST /interfaces/batch
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    /// Interface ids to fetch
    pub ids: Vec<u64>,
    /// Optional override of the configured chunk size
    #[serde(default)]
    pub chunk_size: Option<usize>,
}

impl BatchRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.ids.is_empty() {
            return Some("ids cannot be empty".to_string());
        }
        if self.ids.len() > MAX_BATCH_IDS {
            return Some(format!("at most {} ids per batch", MAX_BATCH_IDS));
        }
        if self.chunk_size == Some(0) {
            return Some("chunk_size must be at least 1".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_batch_request_deserialize() {
        let req: BatchRequest = serde_json::from_str(r#"{"ids": [1, 2, 3]}"#).unwrap();
        assert_eq!(req.ids, vec![1, 2, 3]);
        assert!(req.chunk_size.is_none());
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_batch_request_validation() {
        let empty = BatchRequest {
            ids: vec![],
            chunk_size: None,
        };
        assert!(empty.validate().is_some());

        let zero_chunk = BatchRequest {
            ids: vec![1],
            chunk_size: Some(0),
        };
        assert!(zero_chunk.validate().is_some());

        let too_many = BatchRequest {
            ids: (0..=MAX_BATCH_IDS as u64).collect(),
            chunk_size: None,
        };
        assert!(too_many.validate().is_some());
    }
}
