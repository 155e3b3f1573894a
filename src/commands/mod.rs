//! Command implementations for sync-dependency
//!
//! Each command is a thin wrapper: resolve the workspace and settings,
//! then hand off to the matching operation.

pub mod completions;
pub mod sync;
pub mod verify;

use std::path::{Path, PathBuf};

use crate::config::{ConfigFile, ConfigOverrides, SyncSettings};
use crate::error::{Result, SyncError, config::current_dir_failed};
use crate::workspace::Workspace;

/// Open the workspace at `path` (or the current directory).
///
/// With `require_git` unset a plain directory is accepted when no
/// superproject encloses it.
fn open_workspace(path: Option<PathBuf>, require_git: bool) -> Result<Workspace> {
    let start = match path {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| current_dir_failed(&e))?,
    };
    match Workspace::discover(&start) {
        Ok(workspace) => Ok(workspace),
        Err(SyncError::NotInGitRepository { .. }) if !require_git => {
            log::debug!("No superproject found, using {} as is", start.display());
            Ok(Workspace::at(start))
        }
        Err(err) => Err(err),
    }
}

fn load_settings(
    workspace: &Workspace,
    config: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<SyncSettings> {
    let file = ConfigFile::load(&workspace.root, config)?;
    SyncSettings::resolve(file, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_workspace_plain_directory() {
        let temp = TempDir::new().unwrap();
        let workspace = open_workspace(Some(temp.path().to_path_buf()), false).unwrap();
        assert!(workspace.repository().is_err());
    }

    #[test]
    fn test_open_workspace_requires_git() {
        let temp = TempDir::new().unwrap();
        let result = open_workspace(Some(temp.path().to_path_buf()), true);
        assert!(matches!(result, Err(SyncError::NotInGitRepository { .. })));
    }

    #[test]
    fn test_open_workspace_in_repository() {
        let temp = TempDir::new().unwrap();
        git2::Repository::init(temp.path()).unwrap();
        let workspace = open_workspace(Some(temp.path().to_path_buf()), true).unwrap();
        assert!(workspace.repository().is_ok());
    }
}
