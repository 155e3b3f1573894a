//! Stage, commit and push the superproject

use std::cell::RefCell;
use std::path::Path;

use git2::{IndexAddOption, Oid, PushOptions, Repository};

use super::{head_branch, interpret_git_error, remote_callbacks};
use crate::error::{Result, SyncError, publish};

/// Stage every working-tree change and return the resulting tree.
///
/// The gitlink of `submodule` is staged explicitly first so the new
/// submodule commit is recorded even when status scanning ignores it.
pub fn stage_all(repo: &Repository, submodule: Option<&Path>) -> Result<Oid> {
    let stage_err = |e: git2::Error| publish::stage_failed(e.message());

    if let Some(path) = submodule {
        let mut submodules = repo.submodules().map_err(stage_err)?;
        if let Some(sm) = submodules.iter_mut().find(|sm| sm.path() == path) {
            sm.add_to_index(true).map_err(stage_err)?;
        }
    }

    let mut index = repo.index().map_err(stage_err)?;
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .map_err(stage_err)?;
    index.update_all(["*"].iter(), None).map_err(stage_err)?;
    index.write().map_err(stage_err)?;

    index.write_tree().map_err(stage_err)
}

/// Commit `tree` on top of HEAD unless it equals HEAD's tree.
///
/// Returns the new commit, or `None` when there was nothing to commit.
pub fn commit_tree(repo: &Repository, tree: Oid, message: &str) -> Result<Option<Oid>> {
    let commit_err = |e: git2::Error| publish::commit_failed(e.message());

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    if parent.as_ref().map(git2::Commit::tree_id) == Some(tree) {
        log::debug!("Index matches HEAD, nothing to commit");
        return Ok(None);
    }

    let signature = repo.signature().map_err(commit_err)?;
    let tree = repo.find_tree(tree).map_err(commit_err)?;
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    let oid = repo
        .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .map_err(commit_err)?;
    log::info!("Created commit {oid}");
    Ok(Some(oid))
}

/// Branch to push; a detached HEAD cannot be published
pub fn current_branch(repo: &Repository) -> Result<String> {
    head_branch(repo)?.ok_or(SyncError::DetachedHead)
}

/// Push `branch` to the remote named `remote_name`.
///
/// Both transport errors and per-reference rejections reported by the
/// remote are failures.
pub fn push_branch(repo: &Repository, remote_name: &str, branch: &str) -> Result<()> {
    let mut remote = repo
        .find_remote(remote_name)
        .map_err(|_| SyncError::RemoteNotFound {
            name: remote_name.to_string(),
        })?;

    let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
    let rejection: RefCell<Option<String>> = RefCell::new(None);

    {
        let mut callbacks = remote_callbacks();
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                *rejection.borrow_mut() = Some(format!("{refname} rejected: {status}"));
            }
            Ok(())
        });

        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        log::debug!("Pushing {refspec} to {remote_name}");
        remote
            .push(&[refspec.as_str()], Some(&mut options))
            .map_err(|e| publish::push_failed(remote_name, interpret_git_error(&e)))?;
    }

    match rejection.into_inner() {
        Some(reason) => Err(publish::push_failed(remote_name, reason)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn repo_with_identity() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test").unwrap();
            config.set_str("user.email", "test@test.com").unwrap();
        }
        (temp, repo)
    }

    #[test]
    fn test_commit_then_nothing_to_commit() {
        let (temp, repo) = repo_with_identity();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let tree = stage_all(&repo, None).unwrap();
        let first = commit_tree(&repo, tree, "first").unwrap();
        assert!(first.is_some());

        let tree = stage_all(&repo, None).unwrap();
        assert_eq!(commit_tree(&repo, tree, "second").unwrap(), None);
    }

    #[test]
    fn test_stage_records_deletions() {
        let (temp, repo) = repo_with_identity();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("c.txt"), "c").unwrap();
        let tree = stage_all(&repo, None).unwrap();
        commit_tree(&repo, tree, "first").unwrap();

        fs::remove_file(temp.path().join("c.txt")).unwrap();
        let tree = stage_all(&repo, None).unwrap();
        let oid = commit_tree(&repo, tree, "remove c").unwrap().unwrap();

        let committed = repo.find_commit(oid).unwrap().tree().unwrap();
        assert!(committed.get_name("a.txt").is_some());
        assert!(committed.get_name("c.txt").is_none());
    }

    #[test]
    fn test_stage_honours_gitignore() {
        let (temp, repo) = repo_with_identity();
        fs::write(temp.path().join(".gitignore"), "*.log\n").unwrap();
        fs::write(temp.path().join("debug.log"), "noise").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let tree = stage_all(&repo, None).unwrap();
        let tree = repo.find_tree(tree).unwrap();
        assert!(tree.get_name("a.txt").is_some());
        assert!(tree.get_name("debug.log").is_none());
    }

    #[test]
    fn test_push_to_bare_remote() {
        let (temp, repo) = repo_with_identity();
        let remote_dir = TempDir::new().unwrap();
        let bare = Repository::init_bare(remote_dir.path()).unwrap();
        repo.remote("backup", remote_dir.path().to_str().unwrap())
            .unwrap();

        fs::write(temp.path().join("a.txt"), "a").unwrap();
        let tree = stage_all(&repo, None).unwrap();
        let oid = commit_tree(&repo, tree, "first").unwrap().unwrap();
        let branch = current_branch(&repo).unwrap();

        push_branch(&repo, "backup", &branch).unwrap();
        let pushed = bare.refname_to_id(&format!("refs/heads/{branch}")).unwrap();
        assert_eq!(pushed, oid);
    }

    #[test]
    fn test_push_unknown_remote() {
        let (_temp, repo) = repo_with_identity();
        let result = push_branch(&repo, "nowhere", "main");
        assert!(matches!(result, Err(SyncError::RemoteNotFound { .. })));
    }

    #[test]
    fn test_current_branch_detached() {
        let (temp, repo) = repo_with_identity();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        let tree = stage_all(&repo, None).unwrap();
        let oid = commit_tree(&repo, tree, "first").unwrap().unwrap();
        repo.set_head_detached(oid).unwrap();

        assert!(matches!(current_branch(&repo), Err(SyncError::DetachedHead)));
    }
}
