//! dotstate: Actual State and Persistent State for dotfile reconciliation
//!
//! Snapshots what currently exists on disk as comparable, content-addressed
//! [`state::EntryState`] descriptors, and keeps cross-run bookkeeping in a
//! bucketed key/value [`store::PersistentState`].

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod path;
pub mod state;
pub mod store;
pub mod system;
pub mod types;
