//! Git repository discovery for the workspace

use normpath::PathExt;
use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};

/// Normalize a path for symlink handling (macOS /var -> /private/var).
///
/// Falls back to the path as-is when normalization fails, which can happen
/// on Windows with temp paths.
pub fn normalize(path: &Path) -> PathBuf {
    path.normalize()
        .map(|np| np.into_path_buf())
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Find the git superproject root from a starting path
pub fn find_git_repository_root(start: &Path) -> Option<PathBuf> {
    let repo = git2::Repository::discover(start).ok()?;
    repo.workdir().map(normalize)
}

/// Resolve the superproject root, failing when `start` is outside a git repository
pub fn require_git_repository_root(start: &Path) -> Result<PathBuf> {
    find_git_repository_root(start).ok_or_else(|| SyncError::NotInGitRepository {
        path: start.display().to_string(),
    })
}
