//! Workspace management for depsync
//!
//! The workspace is the superproject working tree every pipeline step acts
//! on. It is passed explicitly to each component instead of relying on the
//! process working directory, so every operation can be exercised against
//! an isolated temporary tree.
//!
//! ## Workspace Structure
//!
//! ```text
//! <root>/
//! ├── depsync.yaml      # Optional sync configuration
//! ├── .gitmodules
//! ├── bond/             # Dependency (git submodule)
//! ├── producer/bond/    # Consumer directory
//! └── consumer/bond/    # Consumer directory
//! ```

mod git;

pub use git::normalize;

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::{Result, SyncError};

/// Represents the superproject a sync runs in
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Root directory of the workspace (the superproject working tree)
    pub root: PathBuf,
}

impl Workspace {
    /// Open the git superproject containing `start`
    pub fn discover(start: &Path) -> Result<Self> {
        let root = git::require_git_repository_root(start)?;
        log::debug!("Workspace root: {}", root.display());
        Ok(Self { root })
    }

    /// Use `root` as the workspace without requiring a git repository.
    ///
    /// Only the vendor step and verification work on such a workspace.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: normalize(&root.into()),
        }
    }

    /// Absolute location of a workspace-relative path
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Open the superproject repository
    pub fn repository(&self) -> Result<Repository> {
        Repository::open(&self.root).map_err(|_| SyncError::NotInGitRepository {
            path: self.root.display().to_string(),
        })
    }
}
