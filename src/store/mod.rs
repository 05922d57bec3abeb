//! Storage abstractions for the dictionary entry set.
//!
//! This module provides the [`WordStore`] trait that abstracts over the two
//! storage strategies: a full in-memory map ([`memory::MemoryStore`]) and an
//! ordered on-disk table ([`table::TableStore`]). The resolver is written
//! against the trait so the performance/footprint tradeoff stays behind one
//! contract.

pub mod memory;
pub mod table;

use crate::error::Result;

/// Default cap on prefix-scan results, matching the resolver's query width.
pub const DEFAULT_PREFIX_LIMIT: usize = 30;

/// Size and footprint counters for a store backend.
///
/// `resident_bytes` is an estimate of what the backend keeps in memory for
/// the lifetime of the process: the full entry set for the memory backend,
/// only the sparse index for the table backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of entries visible to lookups (aliases included).
    pub entries: usize,
    /// Approximate bytes held in memory by the backend.
    pub resident_bytes: usize,
}

/// Core storage contract shared by both backends.
///
/// All read operations treat a missing key as a normal negative result,
/// never as an error. Errors signal genuine store failures (I/O, corruption,
/// use after close) and propagate to callers unchanged.
pub trait WordStore {
    /// Exact-match lookup. `Ok(None)` means the word is not present.
    fn get_definition(&self, word: &str) -> Result<Option<String>>;

    /// Existence check. Must cost a point lookup, not a scan; the corrector
    /// calls this once per candidate.
    fn has_word(&self, word: &str) -> Result<bool> {
        Ok(self.get_definition(word)?.is_some())
    }

    /// All stored keys starting with `prefix`, capped at `limit`, in the
    /// backend's natural order (lexicographic for the table backend,
    /// insertion order for the memory backend).
    fn prefix_lookup(&self, prefix: &str, limit: usize) -> Result<Vec<String>>;

    /// Release backend resources. Idempotent.
    ///
    /// A no-op for the memory backend. For the table backend this flushes
    /// and releases the store lock; any later read fails with
    /// [`crate::DictError::Closed`].
    fn close(&mut self) -> Result<()>;

    /// Entry count and approximate resident footprint.
    fn stats(&self) -> StoreStats;
}
