//! Error types for dictionary and store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying a dictionary store.
///
/// A missing key is *not* an error: `get_definition` returns `Ok(None)` and
/// `has_word` returns `Ok(false)`. Every variant here is a genuine failure
/// that callers must surface rather than render as "no definition".
#[derive(Debug, Error)]
pub enum DictError {
    /// The dictionary data source is missing or unreadable.
    ///
    /// Raised at load time; partial loads are not attempted.
    #[error("cannot read dictionary data {}: {source}", .path.display())]
    Config {
        /// Path to the data source that failed to open.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// I/O failure in the persistent store (disk full, read error, ...).
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Another process holds the store lock.
    ///
    /// The on-disk store is single-process; a second open must fail fast
    /// instead of risking corruption.
    #[error("store at {} is locked by another process", .0.display())]
    Locked(PathBuf),

    /// The table file is malformed or truncated.
    #[error("corrupt store file: {0}")]
    Corrupt(String),

    /// A read was issued after `close()`.
    #[error("store is closed")]
    Closed,
}

/// A specialized `Result` type for dictionary operations.
pub type Result<T> = std::result::Result<T, DictError>;
