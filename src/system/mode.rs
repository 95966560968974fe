//! Raw file mode bits and the inspection result built from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// File mode bits in the Unix `st_mode` layout (type bits + permission bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileMode(u32);

impl FileMode {
    pub const TYPE_MASK: u32 = 0o170000;
    pub const PERM_MASK: u32 = 0o777;

    pub const REGULAR: u32 = 0o100000;
    pub const DIR: u32 = 0o040000;
    pub const SYMLINK: u32 = 0o120000;
    pub const FIFO: u32 = 0o010000;
    pub const SOCKET: u32 = 0o140000;
    pub const CHAR_DEVICE: u32 = 0o020000;
    pub const BLOCK_DEVICE: u32 = 0o060000;

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Type bits only
    pub const fn file_type(self) -> u32 {
        self.0 & Self::TYPE_MASK
    }

    /// Permission bits only
    pub const fn perm(self) -> FileMode {
        Self(self.0 & Self::PERM_MASK)
    }

    /// Directory mode with the given permission bits
    pub const fn dir(perm: FileMode) -> FileMode {
        Self(Self::DIR | (perm.0 & Self::PERM_MASK))
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_regular(self) -> bool {
        self.file_type() == Self::REGULAR
    }

    pub const fn is_dir(self) -> bool {
        self.file_type() == Self::DIR
    }

    pub const fn is_symlink(self) -> bool {
        self.file_type() == Self::SYMLINK
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#o}", self.0)
    }
}

/// Result of inspecting a path: its mode and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    mode: FileMode,
    size: u64,
}

impl FileInfo {
    pub fn new(mode: FileMode, size: u64) -> Self {
        Self { mode, size }
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    #[cfg(unix)]
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self::new(FileMode::from_bits(metadata.mode()), metadata.len())
    }

    /// Synthesize Unix-style mode bits where the platform has none.
    /// Unknown kinds get no type bits and so fail closed downstream.
    #[cfg(not(unix))]
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        let file_type = metadata.file_type();
        let readonly = metadata.permissions().readonly();
        let bits = if file_type.is_symlink() {
            FileMode::SYMLINK | 0o777
        } else if file_type.is_dir() {
            FileMode::DIR | if readonly { 0o555 } else { 0o777 }
        } else if file_type.is_file() {
            FileMode::REGULAR | if readonly { 0o444 } else { 0o666 }
        } else {
            0
        };
        Self::new(FileMode::from_bits(bits), metadata.len())
    }
}
