// Bounded memo of fuzzy match results

use std::collections::VecDeque;
use std::hash::BuildHasher;

use hashbrown::{DefaultHashBuilder, HashMap};

/// Default number of results kept before eviction.
pub const DEFAULT_CAPACITY: usize = 500;

/// Memo of `(pattern, text) -> matched` results keyed by their hash.
///
/// When an insertion would exceed the capacity, the older half of the
/// entries is dropped. Lookups do not refresh an entry's age.
#[derive(Debug, Clone)]
pub struct FuzzyCache {
    capacity: usize,
    results: HashMap<u64, bool>,
    order: VecDeque<u64>,
    hasher: DefaultHashBuilder,
}

impl Default for FuzzyCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl FuzzyCache {
    /// Create a cache holding up to `capacity` results. A capacity of 0
    /// disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            results: HashMap::new(),
            order: VecDeque::new(),
            hasher: DefaultHashBuilder::default(),
        }
    }

    /// Cache key for a pattern/text pair.
    pub fn key(&self, pattern: &[char], text: &[char]) -> u64 {
        self.hasher.hash_one((pattern, text))
    }

    pub fn get(&self, key: u64) -> Option<bool> {
        self.results.get(&key).copied()
    }

    pub fn insert(&mut self, key: u64, matched: bool) {
        if self.capacity == 0 {
            return;
        }
        if self.results.insert(key, matched).is_some() {
            return;
        }
        self.order.push_back(key);
        if self.results.len() > self.capacity {
            let keep = self.capacity / 2;
            while self.order.len() > keep {
                if let Some(old) = self.order.pop_front() {
                    self.results.remove(&old);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.order.clear();
    }
}
