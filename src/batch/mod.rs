//! Batch Module
//!
//! Runs many fetches in fixed-size concurrent chunks and collects every
//! outcome, so one failing item never aborts its siblings.

mod orchestrator;
mod result;

pub use orchestrator::{BatchOrchestrator, DEFAULT_CHUNK_SIZE};
pub use result::{BatchItemError, BatchResult, BatchSuccess};
