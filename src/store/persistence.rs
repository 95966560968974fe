//! Persistence layer for the Persistent State

use crate::error::StorageError;
use crate::store::{PersistentState, StateData};
use crate::types::Bytes;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Name sled gives its implicit default tree; never a bucket
const DEFAULT_TREE: &[u8] = b"__sled__default";

/// Sled-based implementation of PersistentState
///
/// Each bucket is a sled tree. sled holds an exclusive lock on the database
/// for as long as it is open, which keeps a second process out.
pub struct SledPersistentState {
    db: sled::Db,
    // Writers take this exclusively so `data` never sees a half-applied update
    snapshot: RwLock<()>,
}

impl SledPersistentState {
    /// Open (or create) the database at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Ok(Self {
            db,
            snapshot: RwLock::new(()),
        })
    }

    /// Whether `path` already holds a database, without creating anything
    pub fn exists_at(path: &Path) -> bool {
        path.join("conf").is_file() && path.join("db").is_file()
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    fn existing_bucket(&self, bucket: &[u8]) -> Result<Option<sled::Tree>, StorageError> {
        if bucket == DEFAULT_TREE {
            return Ok(None);
        }
        let exists = self
            .db
            .tree_names()
            .iter()
            .any(|name| name.as_ref() == bucket);
        if exists {
            Ok(Some(self.db.open_tree(bucket)?))
        } else {
            Ok(None)
        }
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}

impl PersistentState for SledPersistentState {
    fn get(&self, bucket: &[u8], key: &[u8]) -> Result<Option<Bytes>, StorageError> {
        let _guard = self.snapshot.read();
        match self.existing_bucket(bucket)? {
            Some(tree) => Ok(tree.get(key)?.map(|value| value.to_vec())),
            None => Ok(None),
        }
    }

    fn set(&self, bucket: &[u8], key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        if bucket == DEFAULT_TREE {
            return Err(StorageError::Database(format!(
                "bucket name {} is reserved",
                String::from_utf8_lossy(bucket)
            )));
        }
        let _guard = self.snapshot.write();
        self.db.open_tree(bucket)?.insert(key, value)?;
        Ok(())
    }

    fn delete(&self, bucket: &[u8], key: &[u8]) -> Result<(), StorageError> {
        let _guard = self.snapshot.write();
        if let Some(tree) = self.existing_bucket(bucket)? {
            tree.remove(key)?;
        }
        Ok(())
    }

    fn data(&self) -> Result<StateData, StorageError> {
        let _guard = self.snapshot.read();
        let mut data = StateData::new();
        for name in self.db.tree_names() {
            if name.as_ref() == DEFAULT_TREE {
                continue;
            }
            let tree = self.db.open_tree(&name)?;
            let mut bucket = BTreeMap::new();
            for item in tree.iter() {
                let (key, value) = item?;
                bucket.insert(key.to_vec(), value.to_vec());
            }
            // sled keeps emptied trees around; a bucket with no keys is not data
            if !bucket.is_empty() {
                data.insert(name.to_vec(), bucket);
            }
        }
        Ok(data)
    }

    fn close(&self) -> Result<(), StorageError> {
        debug!("flushing persistent state");
        self.flush()
    }
}

impl Drop for SledPersistentState {
    fn drop(&mut self) {
        if let Err(e) = self.db.flush() {
            warn!("Failed to flush persistent state on close: {}", e);
        }
    }
}
