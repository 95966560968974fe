//! Persistent State
//!
//! Durable `(bucket, key) -> value` storage over opaque bytes. Buckets are
//! independent namespaces; keys are unique within a bucket. Enumeration is
//! sorted by bucket, then key.
//!
//! Commands declare an [`AccessMode`]; [`open_persistent_state`] enforces it by
//! handing read-only commands a handle that cannot write.

pub mod buckets;
pub mod memory;
pub mod persistence;
pub mod read_only;

pub use buckets::{ScriptStateRecord, CONFIG_STATE_BUCKET, ENTRY_STATE_BUCKET, SCRIPT_STATE_BUCKET};
pub use memory::MemoryPersistentState;
pub use persistence::SledPersistentState;
pub use read_only::ReadOnlyPersistentState;

use crate::error::StorageError;
use crate::types::Bytes;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Full snapshot of the store: bucket -> key -> value
pub type StateData = BTreeMap<Bytes, BTreeMap<Bytes, Bytes>>;

/// Persistent State interface
pub trait PersistentState {
    /// Value stored under `key` in `bucket`, or `None` if absent
    fn get(&self, bucket: &[u8], key: &[u8]) -> Result<Option<Bytes>, StorageError>;

    /// Insert or overwrite `key` in `bucket`
    fn set(&self, bucket: &[u8], key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Remove `key` from `bucket`; absent keys are not an error
    fn delete(&self, bucket: &[u8], key: &[u8]) -> Result<(), StorageError>;

    /// Consistent snapshot of every bucket
    fn data(&self) -> Result<StateData, StorageError>;

    /// Flush pending writes. Further use after `close` is unspecified.
    fn close(&self) -> Result<(), StorageError>;
}

/// Printable form of a stored bucket, key or value
///
/// Valid UTF-8 is shown as is; anything else as `0x`-prefixed lowercase hex.
pub fn printable_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => format!("0x{}", hex::encode(bytes)),
    }
}

/// Insert `value` under the printable form of `raw`
///
/// Fails rather than merging two distinct names that print the same.
pub fn insert_printable<V>(
    map: &mut BTreeMap<String, V>,
    raw: &[u8],
    value: V,
) -> Result<(), StorageError> {
    match map.entry(printable_bytes(raw)) {
        Entry::Occupied(entry) => Err(StorageError::Serialization(format!(
            "{} is shared by more than one stored name",
            entry.key()
        ))),
        Entry::Vacant(entry) => {
            entry.insert(value);
            Ok(())
        }
    }
}

/// Access a command needs to the persistent state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::ReadOnly => write!(f, "read-only"),
            AccessMode::ReadWrite => write!(f, "read-write"),
        }
    }
}

/// Open the persistent state at `path` with the given access
///
/// Read-write creates the store if needed. Read-only never creates it: a
/// path that does not already hold a store is presented as an empty one.
pub fn open_persistent_state(
    path: &Path,
    mode: AccessMode,
) -> Result<Box<dyn PersistentState>, StorageError> {
    debug!(path = %path.display(), %mode, "opening persistent state");
    match mode {
        AccessMode::ReadWrite => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Ok(Box::new(SledPersistentState::new(path)?))
        }
        AccessMode::ReadOnly if SledPersistentState::exists_at(path) => Ok(Box::new(
            ReadOnlyPersistentState::new(SledPersistentState::new(path)?),
        )),
        AccessMode::ReadOnly => Ok(Box::new(ReadOnlyPersistentState::new(
            MemoryPersistentState::new(),
        ))),
    }
}
