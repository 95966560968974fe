//! Persistent state round trips against the sled-backed store

use dotstate::error::StorageError;
use dotstate::path::AbsPath;
use dotstate::state::EntryState;
use dotstate::store::buckets::{
    load_entry_state, record_entry_state, record_script_run, script_has_run,
};
use dotstate::store::{
    open_persistent_state, AccessMode, PersistentState, SledPersistentState, StateData,
};
use dotstate::system::FileMode;
use tempfile::TempDir;

#[test]
fn test_set_get_delete_data_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let state = SledPersistentState::new(temp_dir.path().join("state.db")).unwrap();

    state.set(b"b", b"k", b"v").unwrap();
    assert_eq!(state.get(b"b", b"k").unwrap(), Some(b"v".to_vec()));

    state.set(b"b", b"k", b"overwritten").unwrap();
    state.set(b"b", b"other", b"kept").unwrap();
    assert_eq!(state.get(b"b", b"k").unwrap(), Some(b"overwritten".to_vec()));

    state.delete(b"b", b"k").unwrap();
    assert_eq!(state.get(b"b", b"k").unwrap(), None);
    state.delete(b"b", b"k").unwrap();
    state.delete(b"never", b"created").unwrap();

    let mut expected = StateData::new();
    expected
        .entry(b"b".to_vec())
        .or_default()
        .insert(b"other".to_vec(), b"kept".to_vec());
    assert_eq!(state.data().unwrap(), expected);
}

#[test]
fn test_values_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.db");
    {
        let state = open_persistent_state(&path, AccessMode::ReadWrite).unwrap();
        state.set(b"configState", b"key", b"value").unwrap();
        state.close().unwrap();
    }

    let state = open_persistent_state(&path, AccessMode::ReadOnly).unwrap();
    assert_eq!(
        state.get(b"configState", b"key").unwrap(),
        Some(b"value".to_vec())
    );
}

#[test]
fn test_data_is_sorted_by_bucket_then_key() {
    let temp_dir = TempDir::new().unwrap();
    let state = SledPersistentState::new(temp_dir.path().join("state.db")).unwrap();
    state.set(b"zeta", b"2", b"").unwrap();
    state.set(b"alpha", b"b", b"").unwrap();
    state.set(b"alpha", b"a", b"").unwrap();

    let data = state.data().unwrap();
    let buckets: Vec<_> = data.keys().cloned().collect();
    assert_eq!(buckets, vec![b"alpha".to_vec(), b"zeta".to_vec()]);
    let keys: Vec<_> = data[&b"alpha".to_vec()].keys().cloned().collect();
    assert_eq!(keys, vec![b"a".to_vec(), b"b".to_vec()]);
}

#[test]
fn test_read_only_open_never_writes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("state.db");

    let state = open_persistent_state(&path, AccessMode::ReadOnly).unwrap();
    let err = state.set(b"b", b"k", b"v").unwrap_err();
    assert!(matches!(err, StorageError::ReadOnly { ref bucket } if bucket == "b"));
    state.close().unwrap();
    assert!(!path.exists());
}

#[test]
fn test_entry_state_and_script_records() {
    let temp_dir = TempDir::new().unwrap();
    let state = SledPersistentState::new(temp_dir.path().join("state.db")).unwrap();
    let target = AbsPath::new(temp_dir.path().join(".bashrc")).unwrap();
    let entry_state = EntryState::file(FileMode::from_bits(0o644), b"export A=1\n".to_vec());

    record_entry_state(&state, &target, &entry_state).unwrap();
    assert_eq!(load_entry_state(&state, &target).unwrap(), Some(entry_state));

    let script = b"#!/bin/sh\ntrue\n";
    assert!(!script_has_run(&state, script).unwrap());
    record_script_run(&state, script).unwrap();
    assert!(script_has_run(&state, script).unwrap());
}
