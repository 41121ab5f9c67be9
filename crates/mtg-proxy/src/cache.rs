//! Artwork cache
//!
//! Downloaded artwork is persisted under a key derived from the resolved
//! card. Requests that name a printing get a per-printing key; requests by
//! name alone share one entry per card name.

use crate::types::CanonicalCard;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Deterministic, filesystem-safe cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a name plus an optional `(set_code, collector_number)`.
    pub fn new(name: &str, printing: Option<(&str, &str)>) -> Self {
        let raw = match printing {
            Some((set, number)) => format!("{}_{}_{}", name, set, number),
            None => name.to_string(),
        };
        Self(format!("{}.png", sanitize_filename(&raw)))
    }

    /// Key for a resolved card. The printing only takes part when the
    /// request asked for one.
    pub fn for_card(card: &CanonicalCard, printing_requested: bool) -> Self {
        let printing = match (&card.set_code, &card.collector_number) {
            (Some(set), Some(number)) if printing_requested => {
                Some((set.as_str(), number.as_str()))
            }
            _ => None,
        };
        Self::new(&card.resolved_name, printing)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase, spaces to `_`, path-hostile characters to `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c => c,
        })
        .collect()
}

// =============================================================================
// Byte Stores
// =============================================================================

/// Raw key/value byte storage behind the cache.
pub trait ByteStore {
    fn exists(&self, key: &CacheKey) -> bool;
    fn read(&self, key: &CacheKey) -> io::Result<Vec<u8>>;
    /// Must not leave a partial entry behind on failure.
    fn write(&self, key: &CacheKey, bytes: &[u8]) -> io::Result<()>;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

impl ByteStore for FsStore {
    fn exists(&self, key: &CacheKey) -> bool {
        self.path_for(key).is_file()
    }

    fn read(&self, key: &CacheKey) -> io::Result<Vec<u8>> {
        fs::read(self.path_for(key))
    }

    fn write(&self, key: &CacheKey, bytes: &[u8]) -> io::Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("part");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })
    }
}

/// In-memory store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<CacheKey, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ByteStore for MemoryStore {
    fn exists(&self, key: &CacheKey) -> bool {
        self.entries.borrow().contains_key(key)
    }

    fn read(&self, key: &CacheKey) -> io::Result<Vec<u8>> {
        self.entries
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, key.to_string()))
    }

    fn write(&self, key: &CacheKey, bytes: &[u8]) -> io::Result<()> {
        self.entries.borrow_mut().insert(key.clone(), bytes.to_vec());
        Ok(())
    }
}

// =============================================================================
// Cache Store
// =============================================================================

pub struct CacheStore<S> {
    store: S,
    use_cache: bool,
}

impl<S: ByteStore> CacheStore<S> {
    /// `use_cache = false` forces every lookup to refetch; successful
    /// fetches are still written.
    pub fn new(store: S, use_cache: bool) -> Self {
        Self { store, use_cache }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decode stored bytes for `key`, or run `fetch`, decode the result and
    /// persist it.
    ///
    /// Bytes are only written once `decode` accepts them, so a failed or
    /// undecodable download never reaches the store. A stored entry that no
    /// longer decodes is refetched. A failed cache write is logged; the
    /// decoded value is still returned.
    pub fn get_or_fetch<T, F, D, E>(&self, key: &CacheKey, fetch: F, decode: D) -> Result<T, E>
    where
        F: FnOnce() -> Result<Vec<u8>, E>,
        D: Fn(&[u8]) -> Result<T, E>,
        E: std::fmt::Display,
    {
        if self.use_cache && self.store.exists(key) {
            match self.store.read(key) {
                Ok(bytes) => match decode(&bytes) {
                    Ok(value) => {
                        log::debug!("Cache hit: {}", key);
                        return Ok(value);
                    }
                    Err(e) => log::warn!("Cache entry {} undecodable, refetching: {}", key, e),
                },
                Err(e) => log::warn!("Cache entry {} unreadable, refetching: {}", key, e),
            }
        }

        let bytes = fetch()?;
        let value = decode(&bytes)?;
        if let Err(e) = self.store.write(key, &bytes) {
            log::warn!("Failed to cache {}: {}", key, e);
        }
        Ok(value)
    }
}
