//! Tests for consumer swap transactions

use super::*;
use tempfile::TempDir;

fn dir_with(root: &Path, name: &str, file: &str, content: &str) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
    dir
}

#[test]
fn test_swap_and_commit() {
    let temp = TempDir::new().unwrap();
    let target = dir_with(temp.path(), "bond", "old.txt", "old");
    let staged = dir_with(temp.path(), "staged", "new.txt", "new");

    let mut transaction = SwapTransaction::new();
    transaction.swap(&staged, &target).unwrap();
    assert_eq!(transaction.len(), 1);
    transaction.commit();

    assert!(target.join("new.txt").exists());
    assert!(!target.join("old.txt").exists());
    assert!(!staged.exists());
    assert!(!backup_path(&target).exists());
}

#[test]
fn test_swap_creates_missing_target() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("consumer/bond");
    let staged = dir_with(temp.path(), "staged", "a.txt", "a");

    let mut transaction = SwapTransaction::new();
    transaction.swap(&staged, &target).unwrap();
    transaction.commit();

    assert_eq!(fs::read_to_string(target.join("a.txt")).unwrap(), "a");
}

#[test]
fn test_rollback_on_drop_restores_all() {
    let temp = TempDir::new().unwrap();
    let first = dir_with(temp.path(), "producer", "old.txt", "producer");
    let second = dir_with(temp.path(), "consumer", "old.txt", "consumer");
    let staged_first = dir_with(temp.path(), "s1", "new.txt", "new");
    let staged_second = dir_with(temp.path(), "s2", "new.txt", "new");

    {
        let mut transaction = SwapTransaction::new();
        transaction.swap(&staged_first, &first).unwrap();
        transaction.swap(&staged_second, &second).unwrap();
        // Not committed: dropped here
    }

    assert_eq!(fs::read_to_string(first.join("old.txt")).unwrap(), "producer");
    assert_eq!(fs::read_to_string(second.join("old.txt")).unwrap(), "consumer");
    assert!(!first.join("new.txt").exists());
    assert!(!backup_path(&first).exists());
}

#[test]
fn test_rollback_removes_created_target() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("bond");
    let staged = dir_with(temp.path(), "staged", "a.txt", "a");

    {
        let mut transaction = SwapTransaction::new();
        transaction.swap(&staged, &target).unwrap();
    }

    assert!(!target.exists());
}

#[test]
fn test_failed_swap_leaves_target_intact() {
    let temp = TempDir::new().unwrap();
    let target = dir_with(temp.path(), "bond", "old.txt", "old");
    let missing = temp.path().join("never-staged");

    let mut transaction = SwapTransaction::new();
    let result = transaction.swap(&missing, &target);

    assert!(result.is_err());
    assert!(transaction.is_empty());
    assert_eq!(fs::read_to_string(target.join("old.txt")).unwrap(), "old");
}

#[test]
fn test_backup_path_is_hidden_sibling() {
    let backup = backup_path(Path::new("/work/producer/bond"));
    assert_eq!(backup, Path::new("/work/producer/.bond.depsync-backup"));
}
