//! Dry-run decorator: reads pass through, mutations are reported and skipped.

use super::{FileInfo, FileMode, System};
use crate::path::AbsPath;
use std::io;
use tracing::info;

/// Wraps a [`System`] and performs no mutations
#[derive(Debug, Clone, Default)]
pub struct DryRunSystem<S> {
    inner: S,
}

impl<S: System> DryRunSystem<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: System> System for DryRunSystem<S> {
    fn lstat(&self, path: &AbsPath) -> io::Result<FileInfo> {
        self.inner.lstat(path)
    }

    fn stat(&self, path: &AbsPath) -> io::Result<FileInfo> {
        self.inner.stat(path)
    }

    fn read_file(&self, path: &AbsPath) -> io::Result<Vec<u8>> {
        self.inner.read_file(path)
    }

    fn readlink(&self, path: &AbsPath) -> io::Result<String> {
        self.inner.readlink(path)
    }

    fn remove_all(&self, path: &AbsPath) -> io::Result<()> {
        info!(path = %path, "dry run: skipping remove_all");
        Ok(())
    }

    fn write_file(&self, path: &AbsPath, contents: &[u8], perm: FileMode) -> io::Result<()> {
        info!(
            path = %path,
            len = contents.len(),
            perm = %perm,
            "dry run: skipping write_file"
        );
        Ok(())
    }

    fn mkdir(&self, path: &AbsPath, perm: FileMode) -> io::Result<()> {
        info!(path = %path, perm = %perm, "dry run: skipping mkdir");
        Ok(())
    }

    fn symlink(&self, target: &str, path: &AbsPath) -> io::Result<()> {
        info!(path = %path, link_target = target, "dry run: skipping symlink");
        Ok(())
    }
}
