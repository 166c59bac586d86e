//! Bounded cache of completed searches, keyed by normalized query

use std::collections::{HashMap, VecDeque};

use super::SearchResult;

pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Cache key for a query: trimmed and lowercased
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Insertion-ordered cache that evicts its oldest entry once over capacity
#[derive(Debug, Clone)]
pub struct SearchCache {
    entries: HashMap<String, Vec<SearchResult>>,
    order: VecDeque<String>,
    capacity: usize,
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl SearchCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, query: &str) -> Option<&[SearchResult]> {
        self.entries
            .get(&normalize_query(query))
            .map(Vec::as_slice)
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(&normalize_query(query))
    }

    /// Store results for a query. Returns the key evicted to make room, if any.
    pub fn insert(&mut self, query: &str, results: Vec<SearchResult>) -> Option<String> {
        let key = normalize_query(query);
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = results;
            return None;
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, results);

        if self.entries.len() > self.capacity {
            let oldest = self.order.pop_front()?;
            self.entries.remove(&oldest);
            tracing::trace!(query = %oldest, "Evicted search cache entry");
            return Some(oldest);
        }
        None
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
