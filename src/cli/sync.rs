use clap::Args;

use crate::config::ConfigOverrides;

/// Dependency and consumer selection, shared by sync and verify
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Submodule path of the dependency (overrides 'dependency:')
    #[arg(long = "ref", value_name = "PATH")]
    pub dependency: Option<String>,

    /// Directory mirrored into consumers, if not the submodule root
    #[arg(long, value_name = "DIR")]
    pub source: Option<String>,

    /// Consumer directories, comma-separated (replaces 'consumers:')
    #[arg(long, value_name = "DIR,...", value_delimiter = ',')]
    pub consumers: Vec<String>,

    /// Extra glob to exclude from copies (repeatable; .git is always excluded)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

/// Flags of the default (sync) command
#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Remotes to push to, comma-separated, in order (replaces 'remotes:')
    #[arg(long, value_name = "NAME,...", value_delimiter = ',')]
    pub remotes: Vec<String>,

    /// Commit message
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Mirror the source as it is, without updating the submodule
    #[arg(long)]
    pub no_fetch: bool,

    /// Commit but do not push
    #[arg(long)]
    pub no_push: bool,

    /// Skip staging, committing and pushing entirely
    #[arg(long, conflicts_with = "no_push")]
    pub no_publish: bool,

    /// Show what would change without modifying anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not ask for confirmation before replacing consumer directories
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl From<&TargetArgs> for ConfigOverrides {
    fn from(args: &TargetArgs) -> Self {
        Self {
            dependency: args.dependency.clone(),
            source: args.source.clone(),
            consumers: args.consumers.clone(),
            exclude: args.exclude.clone(),
            ..Self::default()
        }
    }
}

impl From<&SyncArgs> for ConfigOverrides {
    fn from(args: &SyncArgs) -> Self {
        Self {
            remotes: args.remotes.clone(),
            message: args.message.clone(),
            no_fetch: args.no_fetch,
            ..Self::from(&args.target)
        }
    }
}
