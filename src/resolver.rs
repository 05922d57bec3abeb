//! Lookup orchestration over a store backend.
//!
//! The resolver turns a raw query word into the final result text: prefix
//! matches with their definitions when the word (or a word starting with it)
//! is known, a last-token retry for multi-word queries, and spelling
//! corrections as the final fallback. It holds no cache and no state beyond
//! the store it was constructed with; the same store state always yields the
//! same result.

use crate::corrector::edits1;
use crate::error::Result;
use crate::store::{WordStore, DEFAULT_PREFIX_LIMIT};

/// Marker prepended to spelling-correction candidates in result text.
const CORRECTION_MARKER: &str = "? ";

/// Orchestrates lookups against a single store backend.
///
/// Generic over the backend so the in-memory and on-disk stores are
/// interchangeable behind one construction-time choice.
#[derive(Debug)]
pub struct Resolver<S: WordStore> {
    store: S,
}

impl<S: WordStore> Resolver<S> {
    /// Wrap a store. The store should be fully loaded before the first
    /// lookup; the resolver never mutates it.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release the underlying store's resources.
    pub fn close(&mut self) -> Result<()> {
        self.store.close()
    }

    /// Consume the resolver and return the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Resolve `word` to newline-separated result text.
    ///
    /// In order:
    /// 1. Prefix matches (capped at 30) formatted as `<key>: <definition>`,
    ///    in the backend's scan order.
    /// 2. If none and the query contains a space, retry with the last
    ///    space-separated token only. Deliberate trailing-phrase heuristic
    ///    carried over from the original behavior, not a general multi-word
    ///    decomposition.
    /// 3. If none and the query is a single token, single-edit corrections
    ///    that exist in the store, each formatted as `? <candidate>`.
    ///
    /// An empty string means "not found" — callers render it; store
    /// failures propagate unchanged and are never conflated with a miss.
    pub fn lookup_result(&self, word: &str) -> Result<String> {
        let matches = self.store.prefix_lookup(word, DEFAULT_PREFIX_LIMIT)?;
        if !matches.is_empty() {
            let mut lines = Vec::with_capacity(matches.len());
            for key in &matches {
                if let Some(definition) = self.store.get_definition(key)? {
                    lines.push(format!("{key}: {definition}"));
                }
            }
            return Ok(lines.join("\n"));
        }

        if word.contains(' ') {
            let last = word.rsplit(' ').next().unwrap_or_default();
            return self.lookup_result(last);
        }

        let mut corrections = Vec::new();
        for candidate in edits1(word) {
            if self.store.has_word(&candidate)? {
                corrections.push(format!("{CORRECTION_MARKER}{candidate}"));
            }
        }
        Ok(corrections.join("\n"))
    }
}
