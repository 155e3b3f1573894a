//! CLI definitions using clap derive API
//!
//! Running `sync-dependency` without a subcommand performs a sync. The
//! argument types live in submodules:
//! - sync: sync flags and the dependency/consumer selection shared with verify
//! - verify: verify command arguments
//! - completions: completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod sync;
pub mod verify;

pub use completions::CompletionsArgs;
pub use sync::{SyncArgs, TargetArgs};
pub use verify::VerifyArgs;

/// sync-dependency - keep vendored copies of a submodule in sync
#[derive(Parser, Debug)]
#[command(
    name = "sync-dependency",
    author,
    version,
    args_conflicts_with_subcommands = true,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Update a dependency submodule, re-vendor it into consumer directories and publish the result",
    long_about = "Updates a git submodule to the latest commit of its remote, replaces every consumer \
                  directory with a fresh copy of it, then commits and pushes the superproject to each \
                  configured remote. Settings come from depsync.yaml and can be overridden by flags.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  sync-dependency                                      \x1b[90m# Sync using depsync.yaml\x1b[0m\n   \
                  sync-dependency --ref bond --consumers producer/bond,consumer/bond --remotes origin\n   \
                  sync-dependency --dry-run                            \x1b[90m# Show what would change\x1b[0m\n   \
                  sync-dependency --no-push -y                         \x1b[90m# Commit locally, no prompt\x1b[0m\n   \
                  sync-dependency verify --json                        \x1b[90m# Check consumers for drift\x1b[0m\n"
)]
pub struct Cli {
    /// Workspace directory (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "DEPSYNC_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Configuration file (defaults to depsync.yaml in the workspace root)
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub sync: SyncArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that every consumer matches the dependency source
    Verify(VerifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
