//! Batch Result Module
//!
//! Per-item outcomes of a batch run.

use std::fmt::Display;

use serde::Serialize;

/// An item that was fetched successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSuccess<I, V> {
    pub id: I,
    pub value: V,
}

/// An item whose fetch failed, with the failure's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItemError<I> {
    pub id: I,
    pub error: String,
}

// == Batch Result ==
/// Outcome of a batch run. Every input item appears exactly once, either in
/// `successes` or in `failures`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult<I, V> {
    pub successes: Vec<BatchSuccess<I, V>>,
    pub failures: Vec<BatchItemError<I>>,
    /// Number of chunks processed
    pub rounds: usize,
}

impl<I, V> Default for BatchResult<I, V> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
            rounds: 0,
        }
    }
}

impl<I, V> BatchResult<I, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_success(&mut self, id: I, value: V) {
        self.successes.push(BatchSuccess { id, value });
    }

    pub fn push_failure(&mut self, id: I, error: impl Into<String>) {
        self.failures.push(BatchItemError {
            id,
            error: error.into(),
        });
    }

    /// Number of items accounted for.
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl<I: Display, V> BatchResult<I, V> {
    // == Summary ==
    /// Human-readable breakdown: counts, then one line per failed item.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} succeeded, {} failed",
            self.successes.len(),
            self.failures.len()
        );
        for failure in &self.failures {
            out.push_str(&format!("\n  - {}: {}", failure.id, failure.error));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_failures() {
        let mut result: BatchResult<u64, &str> = BatchResult::new();
        result.push_success(6, "six");
        result.push_failure(7, "not found");
        result.push_success(8, "eight");

        assert_eq!(result.total(), 3);
        assert!(result.has_failures());
        assert_eq!(result.summary(), "2 succeeded, 1 failed\n  - 7: not found");
    }

    #[test]
    fn test_summary_all_succeeded() {
        let mut result: BatchResult<u64, u64> = BatchResult::new();
        result.push_success(1, 10);

        assert!(!result.has_failures());
        assert_eq!(result.summary(), "1 succeeded, 0 failed");
        assert_eq!(result.successes[0], BatchSuccess { id: 1, value: 10 });
    }
}
