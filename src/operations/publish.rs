//! Publish operation: stage, commit and push the superproject

use std::path::Path;

use git2::Oid;

use crate::domain::RemoteEndpoint;
use crate::error::{Result, SyncError};
use crate::git::publish as git_publish;
use crate::ui::ProgressReporter;
use crate::workspace::Workspace;

/// What the publish step did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    /// New commit, `None` when the tree was unchanged
    pub commit: Option<Oid>,
    /// Branch that was pushed
    pub branch: Option<String>,
    /// Remotes pushed to, in order
    pub pushed: Vec<String>,
}

/// High-level publish operation
pub struct PublishOperation<'a> {
    workspace: &'a Workspace,
    push: bool,
}

impl<'a> PublishOperation<'a> {
    pub fn new(workspace: &'a Workspace, push: bool) -> Self {
        Self { workspace, push }
    }

    /// Check everything publishing depends on without changing anything:
    /// HEAD is on a branch and every remote exists.
    pub fn check(&self, remotes: &[RemoteEndpoint]) -> Result<Option<String>> {
        if !self.push || remotes.is_empty() {
            return Ok(None);
        }

        let repo = self.workspace.repository()?;
        let branch = git_publish::current_branch(&repo)?;
        for remote in remotes {
            if repo.find_remote(remote.name()).is_err() {
                return Err(SyncError::RemoteNotFound {
                    name: remote.name().to_string(),
                });
            }
        }
        Ok(Some(branch))
    }

    /// Stage everything, commit with `message` and push to each remote.
    ///
    /// Remotes are pushed in order; the first failure aborts the rest.
    pub fn execute(
        &self,
        submodule: Option<&Path>,
        message: &str,
        remotes: &[RemoteEndpoint],
        progress: &mut dyn ProgressReporter,
    ) -> Result<PublishOutcome> {
        let branch = self.check(remotes)?;
        let repo = self.workspace.repository()?;

        let tree = git_publish::stage_all(&repo, submodule)?;
        let Some(commit) = git_publish::commit_tree(&repo, tree, message)? else {
            log::info!("No changes to publish");
            return Ok(PublishOutcome::default());
        };

        let mut outcome = PublishOutcome {
            commit: Some(commit),
            branch: branch.clone(),
            pushed: Vec::new(),
        };

        let Some(branch) = branch else {
            return Ok(outcome);
        };

        for (i, remote) in remotes.iter().enumerate() {
            progress.update_consumer(&format!("pushing to {remote}"), i + 1, remotes.len());
            git_publish::push_branch(&repo, remote.name(), &branch)?;
            log::info!("Pushed {branch} to {remote}");
            outcome.pushed.push(remote.name().to_string());
        }

        Ok(outcome)
    }
}
