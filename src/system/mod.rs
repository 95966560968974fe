//! System capability
//!
//! All filesystem I/O performed by the actual-state layer and the state
//! commands goes through a [`System`]. Implementations compose as decorators:
//! [`VerboseSystem`] records and logs mutations, [`DryRunSystem`] suppresses
//! them, and [`RealSystem`] talks to the host filesystem. Read operations are
//! never altered by a decorator.

pub mod dry_run;
pub mod mode;
pub mod real;
pub mod verbose;

pub use dry_run::DryRunSystem;
pub use mode::{FileInfo, FileMode};
pub use real::RealSystem;
pub use verbose::{Mutation, VerboseSystem};

use crate::path::AbsPath;
use std::io;
use std::sync::Arc;

/// Filesystem operations consumed by the actual-state layer
pub trait System: Send + Sync {
    /// Inspect `path` without following a trailing symlink
    fn lstat(&self, path: &AbsPath) -> io::Result<FileInfo>;

    /// Inspect `path`, following symlinks
    fn stat(&self, path: &AbsPath) -> io::Result<FileInfo>;

    fn read_file(&self, path: &AbsPath) -> io::Result<Vec<u8>>;

    /// Target of the symlink at `path`; non-UTF-8 targets are `InvalidData`
    fn readlink(&self, path: &AbsPath) -> io::Result<String>;

    /// Remove `path` and everything below it. Succeeds if `path` is already gone.
    fn remove_all(&self, path: &AbsPath) -> io::Result<()>;

    fn write_file(&self, path: &AbsPath, contents: &[u8], perm: FileMode) -> io::Result<()>;

    fn mkdir(&self, path: &AbsPath, perm: FileMode) -> io::Result<()>;

    fn symlink(&self, target: &str, path: &AbsPath) -> io::Result<()>;
}

impl<S: System + ?Sized> System for Arc<S> {
    fn lstat(&self, path: &AbsPath) -> io::Result<FileInfo> {
        (**self).lstat(path)
    }

    fn stat(&self, path: &AbsPath) -> io::Result<FileInfo> {
        (**self).stat(path)
    }

    fn read_file(&self, path: &AbsPath) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }

    fn readlink(&self, path: &AbsPath) -> io::Result<String> {
        (**self).readlink(path)
    }

    fn remove_all(&self, path: &AbsPath) -> io::Result<()> {
        (**self).remove_all(path)
    }

    fn write_file(&self, path: &AbsPath, contents: &[u8], perm: FileMode) -> io::Result<()> {
        (**self).write_file(path, contents, perm)
    }

    fn mkdir(&self, path: &AbsPath, perm: FileMode) -> io::Result<()> {
        (**self).mkdir(path, perm)
    }

    fn symlink(&self, target: &str, path: &AbsPath) -> io::Result<()> {
        (**self).symlink(target, path)
    }
}

/// Build the system stack for one invocation
pub fn build_system(dry_run: bool, verbose: bool) -> Arc<dyn System> {
    match (dry_run, verbose) {
        (false, false) => Arc::new(RealSystem),
        (false, true) => Arc::new(VerboseSystem::new(RealSystem)),
        (true, false) => Arc::new(DryRunSystem::new(RealSystem)),
        (true, true) => Arc::new(VerboseSystem::new(DryRunSystem::new(RealSystem))),
    }
}
