//! Well-known buckets and the records kept in them
//!
//! - `configState`: arbitrary configuration values
//! - `entryState`: last applied [`EntryState`] per absolute path
//! - `scriptState`: run-once records keyed by the SHA-256 of script contents

use crate::error::StorageError;
use crate::path::AbsPath;
use crate::state::hasher::{compute_content_hash, hash_hex};
use crate::state::EntryState;
use crate::store::{insert_printable, printable_bytes, PersistentState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const CONFIG_STATE_BUCKET: &[u8] = b"configState";
pub const ENTRY_STATE_BUCKET: &[u8] = b"entryState";
pub const SCRIPT_STATE_BUCKET: &[u8] = b"scriptState";

/// Buckets included in a structured dump, in output order
pub const WELL_KNOWN_BUCKETS: [&[u8]; 3] =
    [CONFIG_STATE_BUCKET, ENTRY_STATE_BUCKET, SCRIPT_STATE_BUCKET];

/// Record of a script that has been run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStateRecord {
    #[serde(rename = "runAt")]
    pub run_at: DateTime<Utc>,
    pub sha256: String,
}

/// Store the entry state applied at `path`
pub fn record_entry_state(
    state: &dyn PersistentState,
    path: &AbsPath,
    entry_state: &EntryState,
) -> Result<(), StorageError> {
    let value = serde_json::to_vec(entry_state)?;
    state.set(ENTRY_STATE_BUCKET, path.state_key().as_bytes(), &value)
}

/// Entry state last recorded for `path`, if any
pub fn load_entry_state(
    state: &dyn PersistentState,
    path: &AbsPath,
) -> Result<Option<EntryState>, StorageError> {
    match state.get(ENTRY_STATE_BUCKET, path.state_key().as_bytes())? {
        Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
        None => Ok(None),
    }
}

/// Whether a script with these contents has already been run
pub fn script_has_run(state: &dyn PersistentState, contents: &[u8]) -> Result<bool, StorageError> {
    let key = hash_hex(&compute_content_hash(contents));
    Ok(state.get(SCRIPT_STATE_BUCKET, key.as_bytes())?.is_some())
}

/// Record that a script with these contents has been run
pub fn record_script_run(
    state: &dyn PersistentState,
    contents: &[u8],
) -> Result<ScriptStateRecord, StorageError> {
    let sha256 = hash_hex(&compute_content_hash(contents));
    let record = ScriptStateRecord {
        run_at: Utc::now(),
        sha256: sha256.clone(),
    };
    state.set(SCRIPT_STATE_BUCKET, sha256.as_bytes(), &serde_json::to_vec(&record)?)?;
    debug!(sha256 = %sha256, "recorded script run");
    Ok(record)
}

/// Structured dump of the well-known buckets
///
/// Values that parse as JSON are included decoded; anything else is included
/// in printable form. Keys that are not UTF-8 are shown as `0x`-prefixed hex.
pub fn dump(
    state: &dyn PersistentState,
) -> Result<BTreeMap<String, BTreeMap<String, serde_json::Value>>, StorageError> {
    let data = state.data()?;
    let mut dump = BTreeMap::new();
    for bucket in WELL_KNOWN_BUCKETS {
        let mut entries = BTreeMap::new();
        if let Some(keys) = data.get(bucket) {
            for (key, value) in keys {
                let decoded = serde_json::from_slice::<serde_json::Value>(value)
                    .unwrap_or_else(|_| serde_json::Value::String(printable_bytes(value)));
                insert_printable(&mut entries, key, decoded)?;
            }
        }
        insert_printable(&mut dump, bucket, entries)?;
    }
    Ok(dump)
}
