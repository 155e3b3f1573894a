//! Update a submodule to the latest commit of its remote
//!
//! The equivalent of `git submodule update --init --remote --recursive` for a
//! single submodule: initialise and clone it when needed, fetch the tracked
//! branch from `origin`, detach the working tree at the fetched commit and
//! repeat for every nested submodule.

use std::path::{Path, PathBuf};

use git2::{Direction, Oid, Remote, Repository, Submodule, SubmoduleUpdateOptions};

use super::{checkout_detached, fetch_options, head_branch, interpret_git_error, remote_callbacks};
use crate::domain::display_path;
use crate::error::{Result, SyncError, fetch};

const REMOTE_NAME: &str = "origin";

/// Result of updating one submodule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleUpdate {
    /// Path relative to the repository that contains the submodule
    pub path: PathBuf,
    /// Commit checked out before the update (`None` if it was not cloned)
    pub previous: Option<Oid>,
    /// Commit checked out after the update
    pub current: Oid,
    /// Nested submodules updated along the way
    pub nested: Vec<SubmoduleUpdate>,
}

impl SubmoduleUpdate {
    /// Whether this submodule or any nested one moved
    pub fn changed(&self) -> bool {
        self.previous != Some(self.current) || self.nested.iter().any(SubmoduleUpdate::changed)
    }
}

/// Fail unless `.gitmodules` declares a submodule at `path`
pub fn ensure_declared(repo: &Repository, path: &Path) -> Result<()> {
    let label = display_path(path);
    let declared = repo
        .submodules()
        .map_err(|e| fetch::failed(&label, interpret_git_error(&e)))?
        .iter()
        .any(|sm| sm.path() == path);

    if declared {
        Ok(())
    } else {
        Err(SyncError::SubmoduleNotFound { name: label })
    }
}

/// Update the submodule at `path` (relative to `repo`'s working tree)
pub fn update_to_remote(repo: &Repository, path: &Path) -> Result<SubmoduleUpdate> {
    update_at(repo, path, &display_path(path))
}

fn update_at(repo: &Repository, path: &Path, label: &str) -> Result<SubmoduleUpdate> {
    let failed = |e: git2::Error| fetch::failed(label, interpret_git_error(&e));

    let mut submodule = repo
        .submodules()
        .map_err(failed)?
        .into_iter()
        .find(|sm| sm.path() == path)
        .ok_or_else(|| SyncError::SubmoduleNotFound {
            name: label.to_string(),
        })?;

    let previous = submodule.workdir_id();
    submodule.init(false).map_err(failed)?;

    let sub_repo = open_or_clone(&mut submodule, label)?;
    let branch = tracked_branch(repo, &submodule, &sub_repo, label)?;
    log::debug!("Fetching {label} ({REMOTE_NAME}/{branch})");

    let current = fetch_branch(&sub_repo, &branch, label)?;
    checkout_detached(&sub_repo, current)?;
    log::info!(
        "{label}: {} -> {current}",
        previous.map_or_else(|| "(none)".to_string(), |oid| oid.to_string())
    );

    let nested_paths: Vec<PathBuf> = sub_repo
        .submodules()
        .map_err(failed)?
        .iter()
        .map(|sm| sm.path().to_path_buf())
        .collect();

    let nested = nested_paths
        .iter()
        .map(|nested| {
            let nested_label = format!("{label}/{}", display_path(nested));
            update_at(&sub_repo, nested, &nested_label)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SubmoduleUpdate {
        path: path.to_path_buf(),
        previous,
        current,
        nested,
    })
}

fn open_or_clone(submodule: &mut Submodule<'_>, label: &str) -> Result<Repository> {
    if let Ok(repo) = submodule.open() {
        return Ok(repo);
    }

    log::debug!("Cloning submodule {label}");
    let mut options = SubmoduleUpdateOptions::new();
    options.fetch(fetch_options()).allow_fetch(true);
    submodule
        .update(true, Some(&mut options))
        .map_err(|e| fetch::failed(label, interpret_git_error(&e)))?;

    submodule
        .open()
        .map_err(|e| fetch::failed(label, interpret_git_error(&e)))
}

/// Branch to follow: `.gitmodules` `branch`, else the remote's default branch.
/// `branch = .` means the superproject's current branch.
fn tracked_branch(
    parent: &Repository,
    submodule: &Submodule<'_>,
    sub_repo: &Repository,
    label: &str,
) -> Result<String> {
    match submodule.branch() {
        Some(".") => superproject_branch(parent),
        Some(branch) => Ok(branch.to_string()),
        None => {
            let mut remote = find_origin(sub_repo, label)?;
            remote_default_branch(&mut remote).map_err(|e| {
                fetch::ref_resolve_failed(format!("{REMOTE_NAME}/HEAD"), interpret_git_error(&e))
            })
        }
    }
}

/// Current branch of the superproject, for `branch = .`
fn superproject_branch(parent: &Repository) -> Result<String> {
    match head_branch(parent) {
        Ok(Some(branch)) => Ok(branch),
        Ok(None) => Err(fetch::ref_resolve_failed(".", "superproject HEAD is detached")),
        Err(e) => Err(fetch::ref_resolve_failed(".", interpret_git_error(&e))),
    }
}

fn remote_default_branch(remote: &mut Remote<'_>) -> std::result::Result<String, git2::Error> {
    let connection = remote.connect_auth(Direction::Fetch, Some(remote_callbacks()), None)?;
    let head = connection.default_branch()?;
    let name = head.as_str().unwrap_or_default();
    Ok(name.strip_prefix("refs/heads/").unwrap_or(name).to_string())
}

fn find_origin<'r>(repo: &'r Repository, label: &str) -> Result<Remote<'r>> {
    repo.find_remote(REMOTE_NAME)
        .map_err(|_| fetch::failed(label, format!("no '{REMOTE_NAME}' remote configured")))
}

fn fetch_branch(repo: &Repository, branch: &str, label: &str) -> Result<Oid> {
    let tracking = format!("refs/remotes/{REMOTE_NAME}/{branch}");
    let refspec = format!("+refs/heads/{branch}:{tracking}");

    let mut remote = find_origin(repo, label)?;
    remote
        .fetch(&[refspec.as_str()], Some(&mut fetch_options()), None)
        .map_err(|e| fetch::failed(label, interpret_git_error(&e)))?;

    repo.refname_to_id(&tracking)
        .map_err(|e| fetch::ref_resolve_failed(&tracking, e.message()))
}
