//! Response DTOs for the catalog gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::batch::BatchResult;
use crate::cache::CacheStats;
use crate::catalog::{InterfaceDetail, InterfaceSummary};

/// Response body for GET /projects/:project_id/search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub count: usize,
    pub results: Vec<InterfaceSummary>,
}

impl SearchResponse {
    pub fn new(keyword: impl Into<String>, results: Vec<InterfaceSummary>) -> Self {
        Self {
            keyword: keyword.into(),
            count: results.len(),
            results,
        }
    }
}

/// Response body for POST /interfaces/batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    #[serde(flatten)]
    pub result: BatchResult<u64, InterfaceDetail>,
    /// Human-readable breakdown of the run
    pub summary: String,
}

impl From<BatchResult<u64, InterfaceDetail>> for BatchResponse {
    fn from(result: BatchResult<u64, InterfaceDetail>) -> Self {
        Self {
            summary: result.summary(),
            result,
        }
    }
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for DELETE /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Live entries dropped by the clear
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cache entries", cleared),
            cleared,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_flattens() {
        let stats = CacheStats {
            size: 2,
            max_size: 100,
            hits: 3,
            misses: 1,
            keys: vec!["a".to_string(), "b".to_string()],
            ..CacheStats::default()
        };
        let json = serde_json::to_value(StatsResponse::from(stats)).unwrap();

        assert_eq!(json["size"], 2);
        assert_eq!(json["max_size"], 100);
        assert_eq!(json["keys"][1], "b");
        assert!((json["hit_rate"].as_f64().unwrap() - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_batch_response_includes_summary() {
        let mut result = BatchResult::new();
        result.push_success(
            6,
            InterfaceDetail {
                id: 6,
                ..InterfaceDetail::default()
            },
        );
        result.push_failure(7, "not found");
        result.rounds = 1;

        let json = serde_json::to_value(BatchResponse::from(result)).unwrap();
        assert_eq!(json["successes"][0]["id"], 6);
        assert_eq!(json["failures"][0]["error"], "not found");
        assert_eq!(json["rounds"], 1);
        assert!(json["summary"].as_str().unwrap().contains("7: not found"));
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new("deleted_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("deleted_key"));
        assert!(json.contains("deleted"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
