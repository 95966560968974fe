//! In-memory Persistent State, used where no store exists on disk.

use crate::error::StorageError;
use crate::store::{PersistentState, StateData};
use crate::types::Bytes;
use parking_lot::RwLock;

/// PersistentState held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryPersistentState {
    data: RwLock<StateData>,
}

impl MemoryPersistentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: StateData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }
}

impl PersistentState for MemoryPersistentState {
    fn get(&self, bucket: &[u8], key: &[u8]) -> Result<Option<Bytes>, StorageError> {
        Ok(self
            .data
            .read()
            .get(bucket)
            .and_then(|keys| keys.get(key))
            .cloned())
    }

    fn set(&self, bucket: &[u8], key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.data
            .write()
            .entry(bucket.to_vec())
            .or_default()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, bucket: &[u8], key: &[u8]) -> Result<(), StorageError> {
        let mut data = self.data.write();
        if let Some(keys) = data.get_mut(bucket) {
            keys.remove(key);
            if keys.is_empty() {
                data.remove(bucket);
            }
        }
        Ok(())
    }

    fn data(&self) -> Result<StateData, StorageError> {
        Ok(self.data.read().clone())
    }

    fn close(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
