//! Content hashing for entry states using SHA-256

use crate::types::Hash;
use sha2::{Digest, Sha256};

/// Compute the content hash of file bytes or a symlink target
pub fn compute_content_hash(content: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hasher.finalize().into()
}

/// Lowercase hex form of a hash, as used for persistent-state keys
pub fn hash_hex(hash: &Hash) -> String {
    hex::encode(hash)
}
