//! Insertion Order Module
//!
//! Tracks the order in which keys were (re)inserted for FIFO eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// Tracks insertion order for the eviction strategy.
///
/// Keys are stored in a VecDeque where:
/// - Front = oldest insertion (next eviction candidate)
/// - Back = newest insertion
///
/// Reads never reorder keys. Re-inserting a key moves it to the back, since its
/// creation timestamp is reset.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Push ==
    /// Records a key as the newest insertion, dropping any earlier position.
    pub fn push(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the oldest inserted key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek Oldest ==
    #[allow(dead_code)]
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.front()
    }

    /// Keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
