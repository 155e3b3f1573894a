//! Sync pipeline: fetch, then vendor, then publish
//!
//! Steps run strictly in order and the first failure aborts the rest.
//! Publishing prerequisites (branch, remotes) are checked before the fetch
//! so a misconfigured remote is reported before anything is modified.

use crate::config::SyncSettings;
use crate::domain::FetchMode;
use crate::error::{Result, Step};
use crate::ui::ProgressReporter;
use crate::workspace::Workspace;

use super::fetch::{FetchOperation, FetchOutcome};
use super::publish::{PublishOperation, PublishOutcome};
use super::vendor::{VendorOperation, VendorReport};

/// Switches for a pipeline run
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Validate and report without modifying anything
    pub dry_run: bool,
    /// Run the publish step at all
    pub publish: bool,
    /// Push after committing
    pub push: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            publish: true,
            push: true,
        }
    }
}

/// Everything a pipeline run did (or, for a dry run, would do)
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub dry_run: bool,
    pub fetch: Option<FetchOutcome>,
    pub vendor: VendorReport,
    pub publish: Option<PublishOutcome>,
}

pub struct SyncPipeline<'a> {
    workspace: &'a Workspace,
    settings: &'a SyncSettings,
    options: SyncOptions,
}

impl<'a> SyncPipeline<'a> {
    pub fn new(workspace: &'a Workspace, settings: &'a SyncSettings, options: SyncOptions) -> Self {
        Self {
            workspace,
            settings,
            options,
        }
    }

    pub fn run(&self, progress: &mut dyn ProgressReporter) -> Result<SyncReport> {
        let dependency = &self.settings.dependency;
        let fetch = FetchOperation::new(self.workspace);
        let vendor = VendorOperation::new(self.workspace, &self.settings.exclude);
        let publish = PublishOperation::new(self.workspace, self.options.push);

        if self.options.publish {
            publish.check(&self.settings.remotes)?;
        }

        if self.options.dry_run {
            fetch.check(dependency)?;
            let plan = vendor.plan(dependency.source(), &self.settings.consumers)?;
            return Ok(SyncReport {
                dry_run: true,
                fetch: None,
                vendor: plan,
                publish: None,
            });
        }

        let fetched = run_step(progress, Step::Fetch, &format!("Updating {dependency}"), |_| {
            fetch.execute(dependency)
        })?;
        progress.finish_step(&match &fetched {
            Some(outcome) => format!("{} at {}", dependency.name(), short_oid(outcome.current)),
            None => "Fetch skipped".to_string(),
        });

        let report = run_step(progress, Step::Sync, "Replacing consumer directories", |p| {
            vendor.execute(dependency.source(), &self.settings.consumers, p)
        })?;
        progress.finish_step(&format!(
            "{} of {} consumer(s) updated",
            report.changed(),
            report.consumers.len()
        ));

        let published = if self.options.publish {
            let submodule = (dependency.fetch() == FetchMode::Submodule).then(|| dependency.path());
            let outcome = run_step(progress, Step::Publish, "Publishing changes", |p| {
                publish.execute(submodule, &self.settings.message, &self.settings.remotes, p)
            })?;
            progress.finish_step(&match outcome.commit {
                Some(oid) => format!("Committed {}", short_oid(oid)),
                None => "Nothing to commit".to_string(),
            });
            Some(outcome)
        } else {
            None
        };

        Ok(SyncReport {
            dry_run: false,
            fetch: fetched,
            vendor: report,
            publish: published,
        })
    }
}

/// Run one step, abandoning the progress display if it fails
fn run_step<T>(
    progress: &mut dyn ProgressReporter,
    step: Step,
    message: &str,
    f: impl FnOnce(&mut dyn ProgressReporter) -> Result<T>,
) -> Result<T> {
    progress.start_step(step, message);
    f(&mut *progress).inspect_err(|_| progress.abandon())
}

/// Seven-character abbreviation used in summaries
pub fn short_oid(oid: git2::Oid) -> String {
    oid.to_string().chars().take(7).collect()
}
