//! Actual state: a snapshot of what currently exists at a path
//!
//! An [`ActualStateEntry`] is built from a single `lstat` of its path. The
//! variant chosen at construction never changes. File contents and symlink
//! targets are read on first use and cached for the life of the entry.

use crate::error::EntryError;
use crate::path::AbsPath;
use crate::state::entry::EntryState;
use crate::state::lazy::{LazyContents, LazyLinkname};
use crate::system::{FileInfo, FileMode, System};
use std::io;
use std::sync::Arc;
use tracing::debug;

/// Snapshot of one path's on-disk state
#[derive(Debug)]
pub enum ActualStateEntry {
    /// Nothing exists at the path
    Absent { path: AbsPath },
    Dir { path: AbsPath, perm: FileMode },
    File {
        path: AbsPath,
        perm: FileMode,
        contents: LazyContents,
    },
    Symlink { path: AbsPath, linkname: LazyLinkname },
}

impl ActualStateEntry {
    /// Inspect `path` through `system`
    ///
    /// `inspected` carries the outcome of an `lstat` the caller already made
    /// (for example while walking a directory); when `None`, the path is
    /// inspected here. A missing path yields `Absent`, any other inspection
    /// failure is returned unchanged, and anything that is not a regular file,
    /// directory, or symlink is `UnsupportedFileType`.
    pub fn new(
        system: &Arc<dyn System>,
        path: AbsPath,
        inspected: Option<io::Result<FileInfo>>,
    ) -> Result<Self, EntryError> {
        let inspected = match inspected {
            Some(result) => result,
            None => system.lstat(&path),
        };

        let info = match inspected {
            Ok(info) => info,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path, "actual state: absent");
                return Ok(ActualStateEntry::Absent { path });
            }
            Err(e) => return Err(e.into()),
        };

        let mode = info.mode();
        if mode.is_regular() {
            debug!(path = %path, perm = %mode.perm(), "actual state: file");
            let system = Arc::clone(system);
            let read_path = path.clone();
            Ok(ActualStateEntry::File {
                path,
                perm: mode.perm(),
                contents: LazyContents::new(move || Ok(system.read_file(&read_path)?)),
            })
        } else if mode.is_dir() {
            debug!(path = %path, perm = %mode.perm(), "actual state: dir");
            Ok(ActualStateEntry::Dir {
                path,
                perm: mode.perm(),
            })
        } else if mode.is_symlink() {
            debug!(path = %path, "actual state: symlink");
            let system = Arc::clone(system);
            let read_path = path.clone();
            Ok(ActualStateEntry::Symlink {
                path,
                linkname: LazyLinkname::new(move || Ok(system.readlink(&read_path)?)),
            })
        } else {
            Err(EntryError::UnsupportedFileType { path, mode })
        }
    }

    /// Inspect `path` with a fresh `lstat`
    pub fn inspect(system: &Arc<dyn System>, path: AbsPath) -> Result<Self, EntryError> {
        Self::new(system, path, None)
    }

    pub fn path(&self) -> &AbsPath {
        match self {
            ActualStateEntry::Absent { path }
            | ActualStateEntry::Dir { path, .. }
            | ActualStateEntry::File { path, .. }
            | ActualStateEntry::Symlink { path, .. } => path,
        }
    }

    /// Canonical descriptor of this entry
    ///
    /// Forces the lazy read for files and symlinks; repeated calls reuse it.
    pub fn entry_state(&self) -> Result<EntryState, EntryError> {
        match self {
            ActualStateEntry::Absent { .. } => Ok(EntryState::remove()),
            ActualStateEntry::Dir { perm, .. } => Ok(EntryState::dir(*perm)),
            ActualStateEntry::File { perm, contents, .. } => {
                let bytes = contents.contents()?;
                let sha256 = contents.contents_sha256()?;
                Ok(EntryState::file_with_hash(*perm, sha256, Some(bytes.to_vec())))
            }
            ActualStateEntry::Symlink { linkname, .. } => {
                let target = linkname.linkname()?;
                let sha256 = linkname.linkname_sha256()?;
                Ok(EntryState::symlink_with_hash(sha256, target))
            }
        }
    }

    /// Remove whatever exists at this entry's path. Removing `Absent` is a no-op.
    pub fn remove(&self, system: &dyn System) -> Result<(), EntryError> {
        match self {
            ActualStateEntry::Absent { .. } => Ok(()),
            ActualStateEntry::Dir { path, .. }
            | ActualStateEntry::File { path, .. }
            | ActualStateEntry::Symlink { path, .. } => {
                debug!(path = %path, "removing actual state entry");
                Ok(system.remove_all(path)?)
            }
        }
    }
}
