use clap::Args;

use super::TargetArgs;

/// Arguments for verify command
#[derive(Args, Debug, Clone)]
#[command(after_help = "EXAMPLES:\n  \
                  Check consumers listed in depsync.yaml:\n    sync-dependency verify\n\n\
                  Machine-readable report:\n    sync-dependency verify --json")]
pub struct VerifyArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
