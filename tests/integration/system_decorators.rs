//! Composed System decorators over the real filesystem

use super::test_utils::abs;
use dotstate::state::ActualStateEntry;
use dotstate::system::{build_system, DryRunSystem, FileMode, Mutation, RealSystem, System, VerboseSystem};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_verbose_over_dry_run_records_but_does_not_mutate() {
    let temp_dir = TempDir::new().unwrap();
    let file = abs(&temp_dir, "file");
    std::fs::write(&file, "keep me").unwrap();

    let verbose = Arc::new(VerboseSystem::new(DryRunSystem::new(RealSystem)));
    let system: Arc<dyn System> = verbose.clone();

    let entry = ActualStateEntry::inspect(&system, file.clone()).unwrap();
    entry.remove(system.as_ref()).unwrap();

    assert!(file.as_path().exists());
    assert_eq!(verbose.mutations(), vec![Mutation::RemoveAll { path: file }]);
}

#[test]
fn test_dry_run_preserves_reads() {
    let temp_dir = TempDir::new().unwrap();
    let file = abs(&temp_dir, "file");
    std::fs::write(&file, "contents").unwrap();

    let system = build_system(true, true);
    assert_eq!(system.read_file(&file).unwrap(), b"contents");
    assert!(system.lstat(&file).unwrap().mode().is_regular());

    system
        .write_file(&file, b"replaced", FileMode::from_bits(0o600))
        .unwrap();
    system.mkdir(&abs(&temp_dir, "dir"), FileMode::from_bits(0o755)).unwrap();
    assert_eq!(std::fs::read(&file).unwrap(), b"contents");
    assert!(!temp_dir.path().join("dir").exists());
}

#[test]
fn test_verbose_over_real_performs_mutations() {
    let temp_dir = TempDir::new().unwrap();
    let dir = abs(&temp_dir, "dir");
    let file = abs(&temp_dir, "dir/file");

    let verbose = VerboseSystem::new(RealSystem);
    verbose.mkdir(&dir, FileMode::from_bits(0o755)).unwrap();
    verbose
        .write_file(&file, b"data", FileMode::from_bits(0o644))
        .unwrap();
    verbose.remove_all(&dir).unwrap();

    assert!(!dir.as_path().exists());
    assert_eq!(verbose.mutations().len(), 3);
}
