//! Loader for the tab-delimited word/definition data source.
//!
//! The source format is one entry per line, `<word>\t<definition>`, UTF-8.
//! Blank lines, lines without a tab, and lines with an empty word or
//! definition after trimming are skipped silently.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{DictError, Result};

/// One word-to-definition mapping produced by the loader.
///
/// `display` is set only on lowercase-alias entries: when a source word
/// contains uppercase characters, a second entry is emitted under the
/// lowercase key so case-insensitive lookup succeeds, and `display` keeps
/// the original spelling for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Lookup key (exact source spelling, or its lowercase alias).
    pub key: String,
    /// Definition text.
    pub definition: String,
    /// Original spelling, when `key` is a lowercase alias.
    pub display: Option<String>,
}

impl Entry {
    /// The spelling to show in results: the original word for alias
    /// entries, the key itself otherwise.
    pub fn display_key(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.key)
    }
}

/// Parse a single data line into an entry, ignoring malformed input.
///
/// Returns `None` for lines without a tab or with an empty field.
fn parse_line(line: &str) -> Option<(String, String)> {
    let (word, definition) = line.split_once('\t')?;
    let word = word.trim();
    let definition = definition.trim();
    if word.is_empty() || definition.is_empty() {
        return None;
    }
    Some((word.to_string(), definition.to_string()))
}

/// Load all entries from a data file, alias entries included.
///
/// Entries appear in source order, with each lowercase alias immediately
/// following its original. A missing or unreadable file is a configuration
/// error; malformed lines are not.
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DictError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some((word, definition)) = parse_line(&line) else {
            skipped += 1;
            continue;
        };

        let lower = word.to_lowercase();
        let alias = (lower != word).then(|| Entry {
            key: lower,
            definition: definition.clone(),
            display: Some(word.clone()),
        });

        entries.push(Entry {
            key: word,
            definition,
            display: None,
        });
        entries.extend(alias);
    }

    tracing::debug!(
        "loaded {} entries from {} ({} malformed lines skipped)",
        entries.len(),
        path.display(),
        skipped
    );
    Ok(entries)
}
