//! # endict
//!
//! English–Chinese dictionary lookup engine with exact lookup, prefix
//! search, and approximate lookup via single-edit spelling correction,
//! implemented against two interchangeable storage backends: a full
//! in-memory map and an ordered on-disk table.
//!
//! ## Example
//!
//! ```rust,ignore
//! use endict::prelude::*;
//!
//! let store = MemoryStore::load("data/endict.txt")?;
//! let resolver = Resolver::new(store);
//!
//! println!("{}", resolver.lookup_result("hello")?);
//! ```
//!
//! The backends trade memory for query shape: the in-memory store answers
//! exact lookups fastest but scans every entry for a prefix query, while
//! the table store streams prefix runs straight off its ordered file and
//! keeps only a sparse index resident.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod corrector;
pub mod error;
pub mod loader;
pub mod resolver;
pub mod store;

pub use error::{DictError, Result};

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::corrector::edits1;
    pub use crate::error::{DictError, Result};
    pub use crate::loader::{load_entries, Entry};
    pub use crate::resolver::Resolver;
    pub use crate::store::memory::MemoryStore;
    pub use crate::store::table::TableStore;
    pub use crate::store::{StoreStats, WordStore, DEFAULT_PREFIX_LIMIT};
}
