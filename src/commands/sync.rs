//! Default command: fetch, vendor and publish

use std::path::PathBuf;

use inquire::Confirm;

use super::{load_settings, open_workspace};
use crate::cli::SyncArgs;
use crate::config::SyncSettings;
use crate::error::{Result, SyncError};
use crate::operations::{SyncOptions, SyncPipeline};
use crate::ui::display::print_sync_report;
use crate::ui::{InteractiveProgressReporter, ProgressReporter, SilentProgressReporter};

impl From<&SyncArgs> for SyncOptions {
    fn from(args: &SyncArgs) -> Self {
        Self {
            dry_run: args.dry_run,
            publish: !args.no_publish,
            push: !args.no_push,
        }
    }
}

/// Run a sync
pub fn run(workspace: Option<PathBuf>, config: Option<PathBuf>, args: SyncArgs) -> Result<()> {
    // Mirroring without fetch or publish needs no superproject
    let require_git = !(args.no_fetch && args.no_publish);
    let workspace = open_workspace(workspace, require_git)?;
    let settings = load_settings(&workspace, config.as_deref(), (&args).into())?;
    let options = SyncOptions::from(&args);

    if !args.dry_run && !args.yes && console::user_attended() && !confirm_sync(&settings)? {
        return Err(SyncError::Aborted);
    }

    let mut progress: Box<dyn ProgressReporter> = if console::user_attended_stderr() {
        Box::new(InteractiveProgressReporter::new())
    } else {
        Box::new(SilentProgressReporter)
    };

    let report = SyncPipeline::new(&workspace, &settings, options).run(progress.as_mut())?;
    print_sync_report(&report);
    Ok(())
}

fn confirm_sync(settings: &SyncSettings) -> Result<bool> {
    println!(
        "\nThe following directories will be replaced with {}:",
        settings.dependency.source().display()
    );
    for consumer in &settings.consumers {
        println!("  - {consumer}");
    }
    println!();

    Ok(Confirm::new("Proceed with sync?")
        .with_default(true)
        .with_help_message("Press Enter to confirm, or 'n' to cancel")
        .prompt()?)
}
