//! Bounded in-memory cache of source file contents.
//!
//! Scanners read every candidate file through a shared [`ContentCache`] so
//! that repeated scans of an unchanged tree do not hit the disk for the same
//! text again. The cache holds at most `capacity` files; when a new path is
//! inserted into a full cache the entry that was inserted first is evicted.
//!
//! Entries are stamped with the file's modification time and length. A
//! stamp mismatch counts as a miss, so edited files are always re-read.
//! Modification times are coarse on some filesystems, so an entry whose file
//! changed less than [`RACY_WINDOW`] before it was cached is never served:
//! a same-length edit inside that window would otherwise keep the old stamp.
//!
//! # Example
//!
//! ```no_run
//! use apinav::ContentCache;
//!
//! # async fn run() -> apinav::error::Result<()> {
//! let cache = ContentCache::new(100);
//! let text = cache.read("src/main.go".as_ref()).await?;
//! println!("{} bytes", text.len());
//! # Ok(())
//! # }
//! ```

use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime};

use crate::error::{Result, ScanError};

/// Default number of files kept in memory.
pub const DEFAULT_CAPACITY: usize = 100;

/// Widest modification-time granularity in common use (FAT).
pub const RACY_WINDOW: Duration = Duration::from_secs(2);

/// Identifies one version of a file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileStamp {
    fn of(metadata: &std::fs::Metadata) -> Self {
        Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedFile {
    stamp: FileStamp,
    content: Arc<str>,
    cached_at: SystemTime,
}

impl CachedFile {
    /// True if the stamp still identifies the cached text.
    fn serves(&self, stamp: FileStamp) -> bool {
        self.stamp == stamp
            && stamp
                .modified
                .and_then(|modified| modified.checked_add(RACY_WINDOW))
                .is_some_and(|settled| settled <= self.cached_at)
    }
}

/// Insertion-ordered map from file path to content, bounded with FIFO eviction.
#[derive(Debug)]
pub struct ContentCache {
    capacity: usize,
    entries: Mutex<IndexMap<PathBuf, CachedFile>>,
}

impl ContentCache {
    /// Creates a cache holding at most `capacity` files. A capacity of zero
    /// disables caching entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(IndexMap::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    /// Returns the cached content if it was read from the same file version.
    ///
    /// Entries without a modification time, or cached within
    /// [`RACY_WINDOW`] of it, are treated as misses.
    pub fn get(&self, path: &Path, stamp: FileStamp) -> Option<Arc<str>> {
        let entries = self.lock();
        entries
            .get(path)
            .filter(|cached| cached.serves(stamp))
            .map(|cached| Arc::clone(&cached.content))
    }

    /// Stores `content` for `path`.
    ///
    /// Replacing an existing path keeps its original position in the
    /// eviction order. Inserting a new path into a full cache evicts the
    /// oldest entry first.
    pub fn insert(&self, path: PathBuf, stamp: FileStamp, content: Arc<str>) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        if !entries.contains_key(&path) {
            while entries.len() >= self.capacity {
                Self::evict_oldest_locked(&mut entries);
            }
        }
        let cached_at = SystemTime::now();
        entries.insert(
            path,
            CachedFile {
                stamp,
                content,
                cached_at,
            },
        );
    }

    /// Removes and returns the path that was inserted first.
    pub fn evict_oldest(&self) -> Option<PathBuf> {
        Self::evict_oldest_locked(&mut self.lock())
    }

    /// Reads `path` as UTF-8, serving it from memory when the file on disk is
    /// unchanged since it was cached.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Io`] if the file is missing, unreadable or not
    /// valid UTF-8.
    pub async fn read(&self, path: &Path) -> Result<Arc<str>> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ScanError::io(path, e))?;
        let stamp = FileStamp::of(&metadata);

        if let Some(content) = self.get(path, stamp) {
            return Ok(content);
        }

        let content: Arc<str> = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ScanError::io(path, e))?
            .into();
        self.insert(path.to_path_buf(), stamp, Arc::clone(&content));
        Ok(content)
    }

    fn evict_oldest_locked(entries: &mut IndexMap<PathBuf, CachedFile>) -> Option<PathBuf> {
        entries.shift_remove_index(0).map(|(path, _)| path)
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<PathBuf, CachedFile>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
