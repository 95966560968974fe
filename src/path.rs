//! Absolute path value type
//!
//! Every path handed to the actual-state and persistent-state layers is an
//! `AbsPath`: absolute, lexically normalized, and without trailing slashes.

use crate::error::EntryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// An absolute, normalized filesystem path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PathBuf", into = "PathBuf")]
pub struct AbsPath(PathBuf);

impl AbsPath {
    /// Build an `AbsPath` from an absolute path
    ///
    /// `.` components are dropped and `..` components pop their parent,
    /// without touching the filesystem. Relative paths are rejected.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, EntryError> {
        let path = dunce::simplified(path.as_ref());
        if !path.is_absolute() {
            return Err(EntryError::InvalidPath(format!(
                "{} is not absolute",
                path.display()
            )));
        }

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                    normalized.push(component.as_os_str());
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
            }
        }

        Ok(Self(normalized))
    }

    /// Build an `AbsPath`, resolving relative paths against the current directory
    pub fn from_cwd(path: impl AsRef<Path>) -> Result<Self, EntryError> {
        let path = path.as_ref();
        if path.is_absolute() {
            return Self::new(path);
        }
        let cwd = std::env::current_dir()?;
        Self::new(cwd.join(path))
    }

    /// Join a relative path onto this one
    pub fn join(&self, relative: impl AsRef<Path>) -> Result<Self, EntryError> {
        Self::new(self.0.join(relative))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn parent(&self) -> Option<AbsPath> {
        self.0.parent().map(|parent| Self(parent.to_path_buf()))
    }

    /// Stable key for this path in the persistent state (NFC-normalized UTF-8)
    pub fn state_key(&self) -> String {
        self.0.to_string_lossy().nfc().collect()
    }
}

impl fmt::Display for AbsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for AbsPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<PathBuf> for AbsPath {
    type Error = EntryError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl From<AbsPath> for PathBuf {
    fn from(path: AbsPath) -> Self {
        path.0
    }
}
