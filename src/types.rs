//! Core types shared across the actual-state and persistent-state layers.

/// Hash: SHA-256 digest of entry contents
pub type Hash = [u8; 32];

/// Raw bucket/key/value bytes as stored in the persistent state
pub type Bytes = Vec<u8>;
