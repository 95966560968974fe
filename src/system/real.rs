//! Host filesystem implementation of [`System`].

use super::{FileInfo, FileMode, System};
use crate::path::AbsPath;
use std::fs;
use std::io;

/// System backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct RealSystem;

impl System for RealSystem {
    fn lstat(&self, path: &AbsPath) -> io::Result<FileInfo> {
        fs::symlink_metadata(path).map(|metadata| FileInfo::from_metadata(&metadata))
    }

    fn stat(&self, path: &AbsPath) -> io::Result<FileInfo> {
        fs::metadata(path).map(|metadata| FileInfo::from_metadata(&metadata))
    }

    fn read_file(&self, path: &AbsPath) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn readlink(&self, path: &AbsPath) -> io::Result<String> {
        fs::read_link(path)?.into_os_string().into_string().map_err(|target| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: symlink target {:?} is not valid UTF-8", path, target),
            )
        })
    }

    fn remove_all(&self, path: &AbsPath) -> io::Result<()> {
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };

        let result = if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };

        // Something else may have removed it between the stat and the unlink
        match result {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn write_file(&self, path: &AbsPath, contents: &[u8], perm: FileMode) -> io::Result<()> {
        fs::write(path, contents)?;
        set_perm(path, perm)
    }

    fn mkdir(&self, path: &AbsPath, perm: FileMode) -> io::Result<()> {
        fs::create_dir(path)?;
        set_perm(path, perm)
    }

    #[cfg(unix)]
    fn symlink(&self, target: &str, path: &AbsPath) -> io::Result<()> {
        std::os::unix::fs::symlink(target, path)
    }

    #[cfg(not(unix))]
    fn symlink(&self, target: &str, path: &AbsPath) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("{}: cannot create symlink to {}", path, target),
        ))
    }
}

#[cfg(unix)]
fn set_perm(path: &AbsPath, perm: FileMode) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(perm.perm().bits()))
}

#[cfg(not(unix))]
fn set_perm(path: &AbsPath, perm: FileMode) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(perm.perm().bits() & 0o222 == 0);
    fs::set_permissions(path, permissions)
}
