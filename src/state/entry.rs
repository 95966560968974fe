//! Entry state: the canonical, comparable descriptor of one filesystem entry

use crate::state::hasher::compute_content_hash;
use crate::system::FileMode;
use crate::types::Hash;
use serde::{Deserialize, Serialize};

/// Kind of entry an [`EntryState`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStateType {
    Remove,
    Dir,
    File,
    Symlink,
}

/// Canonical shape of an entry: kind, mode, and content hash
///
/// Two entry states are equal when their kind, mode (directories and files
/// only), and content hash match. `contents` is a cache for later diffing and
/// takes no part in equality or serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryState {
    #[serde(rename = "type")]
    pub kind: EntryStateType,

    #[serde(default, skip_serializing_if = "FileMode::is_zero")]
    pub mode: FileMode,

    #[serde(
        rename = "contentsSHA256",
        default,
        skip_serializing_if = "is_zero_hash",
        with = "hex_hash"
    )]
    pub contents_sha256: Hash,

    #[serde(skip)]
    pub contents: Option<Vec<u8>>,
}

impl EntryState {
    pub fn remove() -> Self {
        Self {
            kind: EntryStateType::Remove,
            mode: FileMode::default(),
            contents_sha256: Hash::default(),
            contents: None,
        }
    }

    pub fn dir(perm: FileMode) -> Self {
        Self {
            kind: EntryStateType::Dir,
            mode: FileMode::dir(perm),
            contents_sha256: Hash::default(),
            contents: None,
        }
    }

    pub fn file(perm: FileMode, contents: Vec<u8>) -> Self {
        Self::file_with_hash(perm, compute_content_hash(&contents), Some(contents))
    }

    pub(crate) fn file_with_hash(perm: FileMode, sha256: Hash, contents: Option<Vec<u8>>) -> Self {
        Self {
            kind: EntryStateType::File,
            mode: perm.perm(),
            contents_sha256: sha256,
            contents,
        }
    }

    pub fn symlink(linkname: &str) -> Self {
        Self::symlink_with_hash(compute_content_hash(linkname.as_bytes()), linkname)
    }

    pub(crate) fn symlink_with_hash(sha256: Hash, linkname: &str) -> Self {
        Self {
            kind: EntryStateType::Symlink,
            mode: FileMode::default(),
            contents_sha256: sha256,
            contents: Some(linkname.as_bytes().to_vec()),
        }
    }

    /// Cached raw contents, if retained
    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    fn mode_is_meaningful(&self) -> bool {
        matches!(self.kind, EntryStateType::Dir | EntryStateType::File)
    }
}

impl PartialEq for EntryState {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.contents_sha256 == other.contents_sha256
            && (!self.mode_is_meaningful() || self.mode == other.mode)
    }
}

impl Eq for EntryState {}

fn is_zero_hash(hash: &Hash) -> bool {
    hash.iter().all(|b| *b == 0)
}

mod hex_hash {
    use crate::types::Hash;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Hash, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(&encoded).map_err(de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| de::Error::invalid_length(bytes.len(), &"32 bytes"))
    }
}
