//! Fetch operation: bring the dependency submodule up to date

use std::path::PathBuf;

use git2::Oid;

use crate::domain::{DependencyRef, FetchMode};
use crate::error::Result;
use crate::git::submodule::{self, SubmoduleUpdate};
use crate::workspace::Workspace;

/// What the fetch step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Submodule path, relative to the workspace
    pub path: PathBuf,
    /// Commit before the run (`None` if the submodule was not cloned yet)
    pub previous: Option<Oid>,
    /// Commit after the run
    pub current: Oid,
    /// Nested submodules updated recursively
    pub nested: usize,
    /// Whether anything moved, nested submodules included
    pub changed: bool,
}

impl From<SubmoduleUpdate> for FetchOutcome {
    fn from(update: SubmoduleUpdate) -> Self {
        fn count(update: &SubmoduleUpdate) -> usize {
            update.nested.iter().map(|n| 1 + count(n)).sum()
        }

        Self {
            nested: count(&update),
            changed: update.changed(),
            path: update.path,
            previous: update.previous,
            current: update.current,
        }
    }
}

/// High-level fetch operation
pub struct FetchOperation<'a> {
    workspace: &'a Workspace,
}

impl<'a> FetchOperation<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Update the dependency to its remote's latest commit.
    ///
    /// Returns `None` when the dependency is configured not to be fetched.
    pub fn execute(&self, dependency: &DependencyRef) -> Result<Option<FetchOutcome>> {
        if dependency.fetch() == FetchMode::None {
            log::debug!("Fetch disabled for {dependency}");
            return Ok(None);
        }

        let repo = self.workspace.repository()?;
        let update = submodule::update_to_remote(&repo, dependency.path())?;
        Ok(Some(update.into()))
    }

    /// Check that the dependency can be fetched without touching anything
    pub fn check(&self, dependency: &DependencyRef) -> Result<()> {
        if dependency.fetch() == FetchMode::None {
            return Ok(());
        }
        let repo = self.workspace.repository()?;
        submodule::ensure_declared(&repo, dependency.path())
    }
}
