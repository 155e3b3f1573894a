//! Vendor operation: replace every consumer directory with a fresh copy
//!
//! The operation runs in three phases so a failure never leaves a consumer
//! deleted but not replaced:
//! 1. preflight: validate the source and every consumer, hash the source
//! 2. staging: copy the source into a scratch directory under the nearest
//!    existing ancestor of each consumer that is out of date
//! 3. swap: rename staged copies into place inside a [`SwapTransaction`]
//!
//! Nothing is modified until phase 3, and phase 3 rolls back on failure.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;

use crate::common::fs::{ExcludeSet, copy_dir_recursive};
use crate::domain::{ConsumerDir, display_path};
use crate::error::{Result, SyncError, config::invalid_path, fs::copy_failed};
use crate::hash::hash_directory;
use crate::transaction::SwapTransaction;
use crate::ui::ProgressReporter;
use crate::workspace::Workspace;

const STAGING_PREFIX: &str = ".depsync-stage-";

/// What happened (or would happen) to a consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumerStatus {
    /// Existing directory replaced with a fresh copy
    Replaced,
    /// Directory did not exist and was created
    Created,
    /// Content already matched the source; left untouched
    UpToDate,
}

/// Per-consumer result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumerResult {
    pub consumer: String,
    pub status: ConsumerStatus,
}

/// Result of the vendor step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorReport {
    /// Content hash of the source at the time of the copy
    pub source_hash: String,
    pub consumers: Vec<ConsumerResult>,
}

impl VendorReport {
    /// Number of consumers whose content changed
    pub fn changed(&self) -> usize {
        self.consumers
            .iter()
            .filter(|c| c.status != ConsumerStatus::UpToDate)
            .count()
    }
}

/// A consumer checked during preflight
struct PlannedConsumer {
    name: String,
    target: PathBuf,
    status: ConsumerStatus,
}

/// A consumer whose new content sits in a scratch directory
struct StagedConsumer {
    name: String,
    target: PathBuf,
    /// Keeps the scratch directory alive; removed on drop
    _scratch: TempDir,
    staged: PathBuf,
}

/// High-level vendor operation
pub struct VendorOperation<'a> {
    workspace: &'a Workspace,
    exclude: &'a ExcludeSet,
}

impl<'a> VendorOperation<'a> {
    pub fn new(workspace: &'a Workspace, exclude: &'a ExcludeSet) -> Self {
        Self { workspace, exclude }
    }

    /// Work out what [`execute`](Self::execute) would do without changing anything
    pub fn plan(&self, source: &Path, consumers: &[ConsumerDir]) -> Result<VendorReport> {
        let (source_hash, planned) = self.preflight(source, consumers)?;
        Ok(VendorReport {
            source_hash,
            consumers: planned
                .into_iter()
                .map(|p| ConsumerResult {
                    consumer: p.name,
                    status: p.status,
                })
                .collect(),
        })
    }

    /// Replace every out-of-date consumer with a copy of `source`
    pub fn execute(
        &self,
        source: &Path,
        consumers: &[ConsumerDir],
        progress: &mut dyn ProgressReporter,
    ) -> Result<VendorReport> {
        let (source_hash, planned) = self.preflight(source, consumers)?;
        let source_dir = self.workspace.resolve(source);

        let pending: Vec<&PlannedConsumer> = planned
            .iter()
            .filter(|p| p.status != ConsumerStatus::UpToDate)
            .collect();

        // Staged copies are removed on drop if anything below fails
        let mut staged = Vec::with_capacity(pending.len());
        for (i, consumer) in pending.iter().enumerate() {
            progress.update_consumer(&format!("copying {}", consumer.name), i + 1, pending.len());
            staged.push(self.stage(&source_dir, consumer)?);
        }

        let mut transaction = SwapTransaction::new();
        for (i, consumer) in staged.iter().enumerate() {
            progress.update_consumer(&format!("replacing {}", consumer.name), i + 1, staged.len());
            transaction.swap(&consumer.staged, &consumer.target)?;
            log::debug!("Replaced {}", consumer.target.display());
        }
        log::debug!("Committing {} consumer swap(s)", transaction.len());
        transaction.commit();

        Ok(VendorReport {
            source_hash,
            consumers: planned
                .into_iter()
                .map(|p| ConsumerResult {
                    consumer: p.name,
                    status: p.status,
                })
                .collect(),
        })
    }

    fn preflight(
        &self,
        source: &Path,
        consumers: &[ConsumerDir],
    ) -> Result<(String, Vec<PlannedConsumer>)> {
        let source_dir = self.workspace.resolve(source);
        if !source_dir.is_dir() {
            return Err(SyncError::SourceMissing {
                path: display_path(source),
            });
        }
        let source_hash = hash_directory(&source_dir, self.exclude)?;
        log::debug!("Source {} hashes to {source_hash}", source_dir.display());

        let mut planned = Vec::with_capacity(consumers.len());
        for consumer in consumers {
            let name = consumer.to_string();
            if consumer.path().starts_with(source) || source.starts_with(consumer.path()) {
                return Err(invalid_path(&name, "overlaps the dependency source"));
            }

            let target = self.workspace.resolve(consumer.path());
            check_target(&name, &target)?;

            let status = if !target.exists() {
                ConsumerStatus::Created
            } else if hash_directory(&target, self.exclude)? == source_hash {
                ConsumerStatus::UpToDate
            } else {
                ConsumerStatus::Replaced
            };

            planned.push(PlannedConsumer {
                name,
                target,
                status,
            });
        }

        Ok((source_hash, planned))
    }

    fn stage(&self, source_dir: &Path, consumer: &PlannedConsumer) -> Result<StagedConsumer> {
        // Missing parents are created by the swap, so staging leaves none behind
        let anchor = consumer
            .target
            .ancestors()
            .skip(1)
            .find(|a| a.is_dir())
            .ok_or_else(|| invalid_path(&consumer.name, "has no existing parent directory"))?;

        let scratch = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(anchor)
            .map_err(|e| copy_failed(&consumer.name, e.to_string()))?;
        let staged = scratch.path().join("tree");

        let files = copy_dir_recursive(source_dir, &staged, self.exclude)?;
        log::debug!("Staged {files} file(s) for {}", consumer.name);

        Ok(StagedConsumer {
            name: consumer.name.clone(),
            target: consumer.target.clone(),
            _scratch: scratch,
            staged,
        })
    }
}

/// A consumer must be a directory (or absent) and every existing ancestor
/// inside the workspace must be a directory.
fn check_target(name: &str, target: &Path) -> Result<()> {
    if target.exists() && !target.is_dir() {
        return Err(invalid_path(name, "exists and is not a directory"));
    }
    if let Some(existing) = target.ancestors().skip(1).find(|a| a.exists()) {
        if !existing.is_dir() {
            return Err(invalid_path(
                name,
                format!("{} is not a directory", existing.display()),
            ));
        }
    }
    Ok(())
}
