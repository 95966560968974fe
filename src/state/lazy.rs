//! Compute-once cells for deferred filesystem reads
//!
//! A [`Lazy`] wraps a fallible fetch. The first `get` runs the fetch and caches
//! its outcome, success or failure; every later `get` returns the cached outcome
//! without running the fetch again. First access is serialized, so concurrent
//! callers still observe exactly one fetch.

use crate::error::EntryError;
use crate::state::hasher::compute_content_hash;
use crate::types::Hash;
use std::fmt;
use std::sync::OnceLock;

type Fetch<T, E> = Box<dyn Fn() -> Result<T, E> + Send + Sync>;

/// Memoizing wrapper around a fallible fetch
pub struct Lazy<T, E> {
    fetch: Fetch<T, E>,
    value: OnceLock<Result<T, E>>,
}

impl<T, E> Lazy<T, E> {
    pub fn new<F>(fetch: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            fetch: Box::new(fetch),
            value: OnceLock::new(),
        }
    }

    /// Cached result of the fetch, running it on first call
    pub fn get(&self) -> Result<&T, &E> {
        self.value.get_or_init(|| (self.fetch)()).as_ref()
    }

    /// Whether the fetch has run
    pub fn is_computed(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Lazy<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(result) => f.debug_tuple("Lazy").field(result).finish(),
            None => f.write_str("Lazy(<uncomputed>)"),
        }
    }
}

/// Lazily fetched file contents and their hash
#[derive(Debug)]
pub struct LazyContents {
    contents: Lazy<Vec<u8>, EntryError>,
    sha256: OnceLock<Hash>,
}

impl LazyContents {
    pub fn new<F>(fetch: F) -> Self
    where
        F: Fn() -> Result<Vec<u8>, EntryError> + Send + Sync + 'static,
    {
        Self {
            contents: Lazy::new(fetch),
            sha256: OnceLock::new(),
        }
    }

    pub fn contents(&self) -> Result<&[u8], EntryError> {
        self.contents.get().map(Vec::as_slice).map_err(Clone::clone)
    }

    pub fn contents_sha256(&self) -> Result<Hash, EntryError> {
        let contents = self.contents()?;
        Ok(*self.sha256.get_or_init(|| compute_content_hash(contents)))
    }
}

/// Lazily fetched symlink target and its hash
#[derive(Debug)]
pub struct LazyLinkname {
    linkname: Lazy<String, EntryError>,
    sha256: OnceLock<Hash>,
}

impl LazyLinkname {
    pub fn new<F>(fetch: F) -> Self
    where
        F: Fn() -> Result<String, EntryError> + Send + Sync + 'static,
    {
        Self {
            linkname: Lazy::new(fetch),
            sha256: OnceLock::new(),
        }
    }

    pub fn linkname(&self) -> Result<&str, EntryError> {
        self.linkname.get().map(String::as_str).map_err(Clone::clone)
    }

    pub fn linkname_sha256(&self) -> Result<Hash, EntryError> {
        let linkname = self.linkname()?;
        Ok(*self
            .sha256
            .get_or_init(|| compute_content_hash(linkname.as_bytes())))
    }
}
