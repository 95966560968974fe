//! Actual state entries built through a call-counting System and the real filesystem

use super::test_utils::{abs, FakeEntry, FakeSystem};
use dotstate::error::EntryError;
use dotstate::path::AbsPath;
use dotstate::state::hasher::compute_content_hash;
use dotstate::state::{ActualStateEntry, EntryState, EntryStateType};
use dotstate::system::{FileMode, RealSystem, System};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tempfile::TempDir;

fn fake() -> (Arc<FakeSystem>, Arc<dyn System>) {
    let fake = Arc::new(FakeSystem::new());
    let system: Arc<dyn System> = fake.clone();
    (fake, system)
}

fn path(p: &str) -> AbsPath {
    AbsPath::new(p).unwrap()
}

#[test]
fn test_missing_path_is_absent_and_removable() {
    let (fake, system) = fake();
    let target = path("/home/user/.bashrc");

    let entry = ActualStateEntry::inspect(&system, target.clone()).unwrap();
    assert!(matches!(entry, ActualStateEntry::Absent { .. }));
    assert_eq!(entry.entry_state().unwrap().kind, EntryStateType::Remove);
    entry.remove(system.as_ref()).unwrap();
    assert_eq!(fake.lstat_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_regular_file_reads_contents_once() {
    let (fake, system) = fake();
    let target = path("/home/user/.gitconfig");
    fake.insert(
        &target,
        FakeEntry::File {
            perm: 0o644,
            contents: b"[user]\n\tname = someone\n".to_vec(),
        },
    );

    let entry = ActualStateEntry::inspect(&system, target).unwrap();
    assert_eq!(fake.reads(), 0);

    let first = entry.entry_state().unwrap();
    let second = entry.entry_state().unwrap();
    assert_eq!(fake.read_file_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fake.lstat_calls.load(Ordering::SeqCst), 1);

    assert_eq!(first.kind, EntryStateType::File);
    assert_eq!(first.mode, FileMode::from_bits(0o644));
    assert_eq!(
        first.contents_sha256,
        compute_content_hash(b"[user]\n\tname = someone\n")
    );
    assert_eq!(first, second);
    assert_eq!(first.contents(), Some(&b"[user]\n\tname = someone\n"[..]));
}

#[test]
fn test_file_read_failure_is_cached() {
    let (fake, system) = fake();
    let target = path("/home/user/.profile");
    fake.insert(
        &target,
        FakeEntry::File {
            perm: 0o600,
            contents: Vec::new(),
        },
    );

    let entry = ActualStateEntry::inspect(&system, target.clone()).unwrap();
    // The file disappears between inspection and read
    fake.remove_all(&target).unwrap();

    let first = entry.entry_state().unwrap_err();
    let second = entry.entry_state().unwrap_err();
    assert_eq!(first.io_kind(), Some(std::io::ErrorKind::NotFound));
    assert_eq!(second.io_kind(), Some(std::io::ErrorKind::NotFound));
    assert_eq!(fake.read_file_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_symlink_hashes_target_string() {
    let (fake, system) = fake();
    let target = path("/home/user/.vimrc");
    fake.insert(
        &target,
        FakeEntry::Symlink {
            target: "dotfiles/vimrc".to_string(),
        },
    );

    let entry = ActualStateEntry::inspect(&system, target).unwrap();
    let state = entry.entry_state().unwrap();
    entry.entry_state().unwrap();

    assert_eq!(state.kind, EntryStateType::Symlink);
    assert!(state.mode.is_zero());
    assert_eq!(state.contents_sha256, compute_content_hash(b"dotfiles/vimrc"));
    assert_eq!(state, EntryState::symlink("dotfiles/vimrc"));
    assert_eq!(fake.readlink_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_directory_mode_includes_dir_bit() {
    let (fake, system) = fake();
    let target = path("/home/user/.config");
    fake.insert(&target, FakeEntry::Dir { perm: 0o755 });

    let entry = ActualStateEntry::inspect(&system, target).unwrap();
    let state = entry.entry_state().unwrap();
    assert_eq!(state.kind, EntryStateType::Dir);
    assert_eq!(state.mode.bits(), FileMode::DIR | 0o755);
    assert_eq!(fake.reads(), 0);
}

#[test]
fn test_unsupported_kinds_fail_with_path_and_mode() {
    for kind in [
        FileMode::FIFO,
        FileMode::SOCKET,
        FileMode::CHAR_DEVICE,
        FileMode::BLOCK_DEVICE,
    ] {
        let (fake, system) = fake();
        let target = path("/home/user/special");
        fake.insert(&target, FakeEntry::Other { mode: kind | 0o644 });

        match ActualStateEntry::inspect(&system, target.clone()) {
            Err(EntryError::UnsupportedFileType { path, mode }) => {
                assert_eq!(path, target);
                assert_eq!(mode.bits(), kind | 0o644);
            }
            other => panic!("expected UnsupportedFileType, got {other:?}"),
        }
    }
}

#[test]
fn test_removing_absent_path_twice_never_errors() {
    let temp_dir = TempDir::new().unwrap();
    let system: Arc<dyn System> = Arc::new(RealSystem);
    let target = abs(&temp_dir, "gone");

    for _ in 0..2 {
        let entry = ActualStateEntry::inspect(&system, target.clone()).unwrap();
        entry.remove(system.as_ref()).unwrap();
    }
}

#[test]
fn test_removing_entry_twice_after_it_vanished() {
    let temp_dir = TempDir::new().unwrap();
    let system: Arc<dyn System> = Arc::new(RealSystem);
    let target = abs(&temp_dir, "tree");
    std::fs::create_dir_all(target.as_path().join("nested")).unwrap();
    std::fs::write(target.as_path().join("nested/file"), "x").unwrap();

    let entry = ActualStateEntry::inspect(&system, target.clone()).unwrap();
    entry.remove(system.as_ref()).unwrap();
    entry.remove(system.as_ref()).unwrap();
    assert!(!target.as_path().exists());
}

#[cfg(unix)]
#[test]
fn test_real_filesystem_snapshot() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let system: Arc<dyn System> = Arc::new(RealSystem);

    let file = abs(&temp_dir, "file");
    std::fs::write(&file, "hello").unwrap();
    std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o640)).unwrap();
    let state = ActualStateEntry::inspect(&system, file).unwrap().entry_state().unwrap();
    assert_eq!(state, EntryState::file(FileMode::from_bits(0o640), b"hello".to_vec()));

    let dir = abs(&temp_dir, "dir");
    std::fs::create_dir(&dir).unwrap();
    std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o750)).unwrap();
    let state = ActualStateEntry::inspect(&system, dir).unwrap().entry_state().unwrap();
    assert_eq!(state, EntryState::dir(FileMode::from_bits(0o750)));

    let link = abs(&temp_dir, "link");
    std::os::unix::fs::symlink("file", &link).unwrap();
    let state = ActualStateEntry::inspect(&system, link).unwrap().entry_state().unwrap();
    assert_eq!(state, EntryState::symlink("file"));
}

#[cfg(unix)]
#[test]
fn test_real_unix_socket_is_unsupported() {
    use std::os::unix::net::UnixListener;

    let temp_dir = TempDir::new().unwrap();
    let system: Arc<dyn System> = Arc::new(RealSystem);
    let socket = abs(&temp_dir, "sock");
    let _listener = UnixListener::bind(&socket).unwrap();

    match ActualStateEntry::inspect(&system, socket.clone()) {
        Err(EntryError::UnsupportedFileType { path, mode }) => {
            assert_eq!(path, socket);
            assert_eq!(mode.file_type(), FileMode::SOCKET);
        }
        other => panic!("expected UnsupportedFileType, got {other:?}"),
    }
}
