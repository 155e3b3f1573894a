//! Git operations for the sync pipeline
//!
//! This module handles:
//! - Updating a submodule (and its nested submodules) to its remote's latest commit
//! - Staging, committing and pushing the superproject
//! - Authentication via git's native credential system
//!
//! Everything goes through libgit2; no `git` executable is required.

pub mod auth;
pub mod error;
pub mod publish;
pub mod submodule;

pub use error::interpret_git_error;

use git2::{FetchOptions, Oid, RemoteCallbacks, Repository};

use crate::error::{Result, fetch};

/// Remote callbacks with authentication installed
pub fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    auth::setup_auth_callbacks(&mut callbacks);
    callbacks
}

/// Fetch options with authentication installed
pub fn fetch_options<'a>() -> FetchOptions<'a> {
    let mut options = FetchOptions::new();
    options.remote_callbacks(remote_callbacks());
    options
}

/// Detach HEAD at `oid` and force the working tree to match it
pub fn checkout_detached(repo: &Repository, oid: Oid) -> Result<()> {
    let sha = oid.to_string();
    let checkout_err = |e: git2::Error| fetch::checkout_failed(&sha, e.message());

    let commit = repo.find_commit(oid).map_err(checkout_err)?;
    repo.set_head_detached(commit.id()).map_err(checkout_err)?;

    let mut checkout = git2::build::CheckoutBuilder::new();
    checkout.force();
    repo.checkout_head(Some(&mut checkout)).map_err(checkout_err)?;

    Ok(())
}

/// Short name of the branch HEAD points to, `None` when HEAD is detached.
///
/// Works on an unborn branch too, since only the symbolic target is read.
pub fn head_branch(repo: &Repository) -> std::result::Result<Option<String>, git2::Error> {
    let head = repo.find_reference("HEAD")?;
    Ok(head
        .symbolic_target()
        .map(|target| target.strip_prefix("refs/heads/").unwrap_or(target).to_string()))
}
