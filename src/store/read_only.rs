//! Read-only boundary around a Persistent State.

use crate::error::StorageError;
use crate::store::{PersistentState, StateData};
use crate::types::Bytes;
use tracing::warn;

/// Forwards reads and refuses every write
pub struct ReadOnlyPersistentState<S> {
    inner: S,
}

impl<S: PersistentState> ReadOnlyPersistentState<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    fn refuse(&self, bucket: &[u8]) -> StorageError {
        let bucket = String::from_utf8_lossy(bucket).into_owned();
        warn!(bucket = %bucket, "write refused on read-only persistent state");
        StorageError::ReadOnly { bucket }
    }
}

impl<S: PersistentState> PersistentState for ReadOnlyPersistentState<S> {
    fn get(&self, bucket: &[u8], key: &[u8]) -> Result<Option<Bytes>, StorageError> {
        self.inner.get(bucket, key)
    }

    fn set(&self, bucket: &[u8], _key: &[u8], _value: &[u8]) -> Result<(), StorageError> {
        Err(self.refuse(bucket))
    }

    fn delete(&self, bucket: &[u8], _key: &[u8]) -> Result<(), StorageError> {
        Err(self.refuse(bucket))
    }

    fn data(&self) -> Result<StateData, StorageError> {
        self.inner.data()
    }

    fn close(&self) -> Result<(), StorageError> {
        self.inner.close()
    }
}
