//! Ordered on-disk store backend.
//!
//! Entries live in a single sorted table file inside a store directory and
//! survive process restarts. The layout keeps point lookups and prefix scans
//! cheap without holding the entry set in memory:
//!
//! ```text
//! +--------------------------------------------------+
//! | data section (sorted by key)                     |
//! |   key_len u32 | key | val_len u32 | val   × n    |
//! +--------------------------------------------------+
//! | index section (every 16th key)                   |
//! |   key_len u32 | key | offset u64                 |
//! +--------------------------------------------------+
//! | footer: index_offset u64 | count u64 | magic u32 |
//! +--------------------------------------------------+
//! ```
//!
//! All integers are little-endian. Opening a store reads the footer and the
//! sparse index only; reads seek into the data section and scan at most one
//! index stride. A `LOCK` file enforces single-process open semantics.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::mem;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{DictError, Result};
use crate::loader::{self, Entry};
use crate::store::{StoreStats, WordStore};

const TABLE_FILE: &str = "endict.tbl";
const TMP_FILE: &str = "endict.tbl.tmp";
const LOCK_FILE: &str = "LOCK";

/// Identifies the table format, "EDT1" in little-endian byte order.
const TABLE_MAGIC: u32 = 0x3154_4445;
const FOOTER_LEN: u64 = 20;

/// One index entry per this many data records.
const INDEX_STRIDE: usize = 16;

/// Upper bound on a single key or definition frame; larger lengths mean a
/// corrupt file, not a real entry.
const MAX_FRAME_LEN: u32 = 1 << 20;

/// Exclusive lock on a store directory, backed by a `LOCK` file.
///
/// Creation fails fast if the file already exists; the file is removed when
/// the lock is dropped.
#[derive(Debug)]
struct LockFile {
    path: PathBuf,
}

impl LockFile {
    fn acquire(dir: &Path) -> Result<Self> {
        let path = dir.join(LOCK_FILE);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Self { path }),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(DictError::Locked(dir.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Dictionary store backed by a sorted on-disk table.
///
/// Prefix scans return keys in lexicographic order regardless of insertion
/// order. Lowercase aliases are stored as plain duplicate keys, so their
/// scan results show the lowercase spelling — a documented divergence from
/// the memory backend's display handling.
#[derive(Debug)]
pub struct TableStore {
    dir: PathBuf,
    file: Mutex<File>,
    /// Sparse index: (first key of block, data offset), sorted.
    index: Vec<(String, u64)>,
    entry_count: u64,
    data_end: u64,
    /// `None` once closed; also releases the LOCK file when dropped.
    lock: Option<LockFile>,
}

impl TableStore {
    /// Open an existing store directory.
    ///
    /// Fails with [`DictError::Locked`] if another process has the store
    /// open, and with [`DictError::Corrupt`] if the table file is malformed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let lock = LockFile::acquire(dir)?;
        Self::open_locked(dir, lock)
    }

    fn open_locked(dir: &Path, lock: LockFile) -> Result<Self> {
        let mut file = File::open(dir.join(TABLE_FILE))?;

        let (data_end, entry_count) = read_footer(&mut file)?;
        let index = read_index(&mut file, data_end)?;

        tracing::debug!(
            "opened table store {} ({} entries, {} index keys)",
            dir.display(),
            entry_count,
            index.len()
        );
        Ok(Self {
            dir: dir.to_path_buf(),
            file: Mutex::new(file),
            index,
            entry_count,
            data_end,
            lock: Some(lock),
        })
    }

    /// Build a store from loader entries and open it.
    ///
    /// Entries are sorted and deduplicated (last write wins), streamed to a
    /// temporary file, fsynced, and renamed into place, so an interrupted
    /// import never leaves a half-written table behind.
    pub fn import<P, I>(dir: P, entries: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = Entry>,
    {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let lock = LockFile::acquire(dir)?;

        let mut sorted = std::collections::BTreeMap::new();
        for entry in entries {
            sorted.insert(entry.key, entry.definition);
        }

        let tmp_path = dir.join(TMP_FILE);
        write_table(&tmp_path, &sorted)?;
        fs::rename(&tmp_path, dir.join(TABLE_FILE))?;
        tracing::info!(
            "imported {} entries into table store {}",
            sorted.len(),
            dir.display()
        );

        Self::open_locked(dir, lock)
    }

    /// Load the data source at `data_path` and import it into `dir`.
    pub fn import_file<P, Q>(dir: P, data_path: Q) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Self::import(dir, loader::load_entries(data_path)?)
    }

    /// The store directory this instance reads from.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entry_count as usize
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    fn ensure_open(&self) -> Result<()> {
        if self.lock.is_none() {
            return Err(DictError::Closed);
        }
        Ok(())
    }

    /// Data offset of the block that may contain `key`, or `None` when the
    /// key sorts before every stored key.
    fn block_for(&self, key: &str) -> Option<u64> {
        let idx = self.index.partition_point(|(k, _)| k.as_str() <= key);
        idx.checked_sub(1).map(|i| self.index[i].1)
    }

    /// Data offset to start a prefix scan from: the block whose first key is
    /// the last one sorting before `prefix`.
    fn scan_start(&self, prefix: &str) -> u64 {
        let idx = self.index.partition_point(|(k, _)| k.as_str() < prefix);
        match idx.checked_sub(1) {
            Some(i) => self.index[i].1,
            None => 0,
        }
    }
}

impl WordStore for TableStore {
    fn get_definition(&self, word: &str) -> Result<Option<String>> {
        self.ensure_open()?;
        let Some(offset) = self.block_for(word) else {
            return Ok(None);
        };

        let file = self.file.lock();
        let mut reader = BufReader::new(&*file);
        reader.seek(SeekFrom::Start(offset))?;

        let mut pos = offset;
        for _ in 0..INDEX_STRIDE {
            if pos >= self.data_end {
                break;
            }
            let key = read_frame(&mut reader)?;
            let val_len = read_len(&mut reader)?;
            pos += 8 + key.len() as u64 + val_len as u64;

            match key.as_str().cmp(word) {
                std::cmp::Ordering::Equal => {
                    let mut val = vec![0u8; val_len as usize];
                    reader.read_exact(&mut val)?;
                    let val = String::from_utf8(val)
                        .map_err(|_| DictError::Corrupt("non-UTF-8 definition".into()))?;
                    return Ok(Some(val));
                }
                std::cmp::Ordering::Greater => return Ok(None),
                std::cmp::Ordering::Less => {
                    reader.seek_relative(val_len as i64)?;
                }
            }
        }
        Ok(None)
    }

    fn prefix_lookup(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        self.ensure_open()?;
        let mut matches = Vec::new();
        if self.index.is_empty() || limit == 0 {
            return Ok(matches);
        }

        let start = self.scan_start(prefix);
        let file = self.file.lock();
        let mut reader = BufReader::new(&*file);
        reader.seek(SeekFrom::Start(start))?;

        // Keys sort bytewise, so everything in [prefix, prefix + 0xFF) is a
        // single contiguous run; stop at the first key past it.
        let mut pos = start;
        while pos < self.data_end && matches.len() < limit {
            let key = read_frame(&mut reader)?;
            let val_len = read_len(&mut reader)?;
            pos += 8 + key.len() as u64 + val_len as u64;
            reader.seek_relative(val_len as i64)?;

            if key.starts_with(prefix) {
                matches.push(key);
            } else if key.as_str() > prefix {
                break;
            }
        }
        Ok(matches)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(lock) = self.lock.take() {
            tracing::debug!("closing table store {}", self.dir.display());
            drop(lock);
        }
        Ok(())
    }

    fn stats(&self) -> StoreStats {
        let mut resident =
            self.index.capacity() * (mem::size_of::<String>() + mem::size_of::<u64>());
        for (key, _) in &self.index {
            resident += key.len();
        }
        StoreStats {
            entries: self.entry_count as usize,
            resident_bytes: resident,
        }
    }
}

/// Write the sorted entry set as a complete table file, fsynced.
fn write_table(path: &Path, sorted: &std::collections::BTreeMap<String, String>) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let mut index = Vec::with_capacity(sorted.len() / INDEX_STRIDE + 1);
    let mut offset = 0u64;
    for (i, (key, val)) in sorted.iter().enumerate() {
        if i % INDEX_STRIDE == 0 {
            index.push((key.as_str(), offset));
        }
        writer.write_all(&(key.len() as u32).to_le_bytes())?;
        writer.write_all(key.as_bytes())?;
        writer.write_all(&(val.len() as u32).to_le_bytes())?;
        writer.write_all(val.as_bytes())?;
        offset += 8 + key.len() as u64 + val.len() as u64;
    }

    let index_offset = offset;
    for (key, key_offset) in index {
        writer.write_all(&(key.len() as u32).to_le_bytes())?;
        writer.write_all(key.as_bytes())?;
        writer.write_all(&key_offset.to_le_bytes())?;
    }

    writer.write_all(&index_offset.to_le_bytes())?;
    writer.write_all(&(sorted.len() as u64).to_le_bytes())?;
    writer.write_all(&TABLE_MAGIC.to_le_bytes())?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

/// Read and validate the footer; returns `(index_offset, entry_count)`.
fn read_footer(file: &mut File) -> Result<(u64, u64)> {
    let file_len = file.metadata()?.len();
    if file_len < FOOTER_LEN {
        return Err(DictError::Corrupt(format!(
            "table file too short ({file_len} bytes)"
        )));
    }
    file.seek(SeekFrom::End(-(FOOTER_LEN as i64)))?;
    let mut footer = [0u8; FOOTER_LEN as usize];
    file.read_exact(&mut footer)?;

    let index_offset = u64::from_le_bytes(footer[0..8].try_into().unwrap());
    let entry_count = u64::from_le_bytes(footer[8..16].try_into().unwrap());
    let magic = u32::from_le_bytes(footer[16..20].try_into().unwrap());

    if magic != TABLE_MAGIC {
        return Err(DictError::Corrupt(format!("bad magic {magic:#x}")));
    }
    if index_offset > file_len - FOOTER_LEN {
        return Err(DictError::Corrupt(format!(
            "index offset {index_offset} past end of data"
        )));
    }
    Ok((index_offset, entry_count))
}

/// Load the sparse index section into memory.
fn read_index(file: &mut File, index_offset: u64) -> Result<Vec<(String, u64)>> {
    let index_end = file.metadata()?.len() - FOOTER_LEN;
    file.seek(SeekFrom::Start(index_offset))?;
    let mut reader = BufReader::new(file);

    let mut index = Vec::new();
    let mut pos = index_offset;
    while pos < index_end {
        let key = read_frame(&mut reader)?;
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        pos += 12 + key.len() as u64;
        index.push((key, u64::from_le_bytes(buf)));
    }
    Ok(index)
}

fn read_len<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    let len = u32::from_le_bytes(buf);
    if len > MAX_FRAME_LEN {
        return Err(DictError::Corrupt(format!("frame length {len} out of range")));
    }
    Ok(len)
}

/// Read a length-prefixed UTF-8 string frame.
fn read_frame<R: Read>(reader: &mut R) -> Result<String> {
    let len = read_len(reader)?;
    let mut buf = vec![0u8; len as usize];
    reader.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|_| DictError::Corrupt("non-UTF-8 key".into()))
}
