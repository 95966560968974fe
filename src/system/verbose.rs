//! Verbose decorator: logs and records every mutation before delegating.

use super::{FileInfo, FileMode, System};
use crate::path::AbsPath;
use parking_lot::Mutex;
use std::io;
use tracing::info;

/// A mutation requested through a [`VerboseSystem`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    RemoveAll { path: AbsPath },
    WriteFile { path: AbsPath, len: usize, perm: FileMode },
    Mkdir { path: AbsPath, perm: FileMode },
    Symlink { target: String, path: AbsPath },
}

/// Wraps a [`System`], recording mutations in request order
#[derive(Debug, Default)]
pub struct VerboseSystem<S> {
    inner: S,
    mutations: Mutex<Vec<Mutation>>,
}

impl<S: System> VerboseSystem<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            mutations: Mutex::new(Vec::new()),
        }
    }

    /// Mutations requested so far, oldest first
    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().clone()
    }

    fn record(&self, mutation: Mutation) {
        info!(?mutation, "system mutation");
        self.mutations.lock().push(mutation);
    }
}

impl<S: System> System for VerboseSystem<S> {
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
        self.record(Mutation::RemoveAll { path: path.clone() });
        self.inner.remove_all(path)
    }

    fn write_file(&self, path: &AbsPath, contents: &[u8], perm: FileMode) -> io::Result<()> {
        self.record(Mutation::WriteFile {
            path: path.clone(),
            len: contents.len(),
            perm,
        });
        self.inner.write_file(path, contents, perm)
    }

    fn mkdir(&self, path: &AbsPath, perm: FileMode) -> io::Result<()> {
        self.record(Mutation::Mkdir {
            path: path.clone(),
            perm,
        });
        self.inner.mkdir(path, perm)
    }

    fn symlink(&self, target: &str, path: &AbsPath) -> io::Result<()> {
        self.record(Mutation::Symlink {
            target: target.to_string(),
            path: path.clone(),
        });
        self.inner.symlink(target, path)
    }
}
