//! Verify command: report consumers that drifted from the source

use std::path::PathBuf;

use super::{load_settings, open_workspace};
use crate::cli::VerifyArgs;
use crate::error::Result;
use crate::operations::VerifyOperation;
use crate::ui::display::print_verify_report;

/// Run verify; fails when any consumer is out of sync or missing
pub fn run(workspace: Option<PathBuf>, config: Option<PathBuf>, args: VerifyArgs) -> Result<()> {
    let workspace = open_workspace(workspace, false)?;
    let settings = load_settings(&workspace, config.as_deref(), (&args.target).into())?;

    let report = VerifyOperation::new(&workspace, &settings.exclude)
        .execute(settings.dependency.source(), &settings.consumers)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_verify_report(&report);
    }

    report.ensure_in_sync()
}
