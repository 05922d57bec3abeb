//! In-memory store backend.
//!
//! Holds the full entry set in a hash map for the lifetime of the process.
//! Rebuilt from the data source on every load; no persistence. Exact lookups
//! are O(1); prefix scans are a linear walk over all entries in insertion
//! order, stopping once `limit` matches are collected.

use std::mem;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::loader::{self, Entry};
use crate::store::{StoreStats, WordStore};

#[derive(Debug, Clone)]
struct StoredEntry {
    definition: String,
    /// Original spelling for lowercase-alias entries.
    display: Option<String>,
}

/// Dictionary store backed by a single in-memory map.
///
/// Keys are stored canonically: lowercase aliases are real keys pointing at
/// the same definition, with the original spelling kept alongside (see
/// [`MemoryStore::display_spelling`]). Insertion order of the data source is
/// preserved for scans, so results are stable across runs but NOT
/// lexicographic — that ordering guarantee belongs to the table backend
/// alone.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: FxHashMap<String, StoredEntry>,
    /// Keys in first-insertion order; scans walk this list.
    order: Vec<String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loader entries.
    ///
    /// A repeated key overwrites the previous definition but keeps its
    /// original scan position (last-write-wins, documented for lowercase
    /// aliases that collide with a distinct source word).
    pub fn from_entries<I: IntoIterator<Item = Entry>>(entries: I) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.insert(entry);
        }
        store
    }

    /// Load the data source at `path` and build a store from it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_entries(loader::load_entries(path)?))
    }

    fn insert(&mut self, entry: Entry) {
        let stored = StoredEntry {
            definition: entry.definition,
            display: entry.display,
        };
        if self.entries.insert(entry.key.clone(), stored).is_none() {
            self.order.push(entry.key);
        }
    }

    /// Original spelling behind a lowercase-alias key, if `word` is one.
    ///
    /// Presentation layers can use this to show `Beijing` for a hit on the
    /// alias key `beijing`; lookups themselves always use canonical keys.
    pub fn display_spelling(&self, word: &str) -> Option<&str> {
        self.entries.get(word)?.display.as_deref()
    }

    /// Number of distinct keys (aliases included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WordStore for MemoryStore {
    fn get_definition(&self, word: &str) -> Result<Option<String>> {
        Ok(self.entries.get(word).map(|e| e.definition.clone()))
    }

    fn has_word(&self, word: &str) -> Result<bool> {
        Ok(self.entries.contains_key(word))
    }

    fn prefix_lookup(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        let mut matches = Vec::new();
        for key in &self.order {
            if matches.len() >= limit {
                break;
            }
            if key.starts_with(prefix) {
                matches.push(key.clone());
            }
        }
        Ok(matches)
    }

    fn close(&mut self) -> Result<()> {
        // Nothing to release; reads stay valid.
        Ok(())
    }

    fn stats(&self) -> StoreStats {
        let mut resident = self.entries.capacity()
            * (mem::size_of::<String>() + mem::size_of::<StoredEntry>());
        resident += self.order.capacity() * mem::size_of::<String>();
        for (key, entry) in &self.entries {
            resident += key.len() * 2 + entry.definition.len();
            resident += entry.display.as_ref().map_or(0, String::len);
        }
        StoreStats {
            entries: self.entries.len(),
            resident_bytes: resident,
        }
    }
}
