//! Bounded read-through cache for combination results.
//!
//! Owned by the caller; the combiner itself keeps no state. Entries are
//! keyed by the input words and the rule table's version stamp, so a cache
//! shared across tables never serves a result computed under other rules.

use std::collections::HashMap;

use tracing::trace;

use crate::combiner::{combine_with, SandhiError, SandhiOutcome};
use crate::rules::RuleTable;
use crate::settings::settings;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    words: Vec<String>,
    version: u32,
}

#[derive(Debug)]
struct CacheEntry {
    outcome: SandhiOutcome,
    last_used: u64,
}

#[derive(Debug)]
pub struct SandhiCache {
    entries: HashMap<CacheKey, CacheEntry>,
    capacity: usize,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl Default for SandhiCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SandhiCache {
    /// A cache sized by `[cache] capacity`.
    pub fn new() -> Self {
        Self::with_capacity(settings().cache.capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached outcome for `words` under `table`, combining and
    /// storing it on a miss. Errors are not cached.
    pub fn get_or_combine<S: AsRef<str>>(
        &mut self,
        table: &RuleTable,
        words: &[S],
    ) -> Result<SandhiOutcome, SandhiError> {
        self.tick += 1;
        let key = CacheKey {
            words: words.iter().map(|w| w.as_ref().to_string()).collect(),
            version: table.version(),
        };
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = self.tick;
            self.hits += 1;
            return Ok(entry.outcome.clone());
        }

        self.misses += 1;
        let outcome = combine_with(table, words)?;
        if self.entries.len() >= self.capacity {
            self.evict_one();
        }
        self.entries.insert(
            key,
            CacheEntry {
                outcome: outcome.clone(),
                last_used: self.tick,
            },
        );
        Ok(outcome)
    }

    /// Drop the least recently used entry. Linear in the entry count, which
    /// is bounded by `capacity`.
    fn evict_one(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            trace!(words = ?key.words, "evict");
            self.entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
