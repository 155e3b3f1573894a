//! Error types and handling for depsync
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every variant belongs to one [`Step`] of the sync pipeline so the CLI can
//! report which step failed. Constructor helpers live in sub-modules by domain:
//! - [`config`]: configuration and workspace resolution errors
//! - [`fetch`]: dependency fetcher errors
//! - [`fs`]: vendor sync (file system) errors
//! - [`publish`]: staging, commit and push errors

pub mod config;
pub mod fetch;
pub mod fs;
pub mod publish;

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Pipeline step an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Config,
    Fetch,
    Sync,
    Publish,
    Verify,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Config => "config",
            Step::Fetch => "fetch",
            Step::Sync => "sync",
            Step::Publish => "publish",
            Step::Verify => "verify",
        };
        f.write_str(name)
    }
}

/// Main error type for depsync operations
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(depsync::config::not_found),
        help("Create depsync.yaml in the workspace root or pass --config")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(depsync::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(depsync::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Not in a git repository: {path}")]
    #[diagnostic(
        code(depsync::config::not_in_repo),
        help("Run sync-dependency from inside the superproject or pass --workspace")
    )]
    NotInGitRepository { path: String },

    #[error("Invalid path '{path}': {reason}")]
    #[diagnostic(code(depsync::config::invalid_path))]
    InvalidPath { path: String, reason: String },

    // Fetch errors
    #[error("Submodule '{name}' not found")]
    #[diagnostic(
        code(depsync::fetch::submodule_not_found),
        help("Check .gitmodules, or pass --no-fetch to mirror a plain directory")
    )]
    SubmoduleNotFound { name: String },

    #[error("Failed to fetch '{name}': {reason}")]
    #[diagnostic(
        code(depsync::fetch::failed),
        help("Check that the remote is reachable and you have access to it")
    )]
    FetchFailed { name: String, reason: String },

    #[error("Failed to resolve git ref '{git_ref}': {reason}")]
    #[diagnostic(code(depsync::fetch::ref_resolve_failed))]
    RefResolveFailed { git_ref: String, reason: String },

    #[error("Failed to checkout commit '{sha}': {reason}")]
    #[diagnostic(code(depsync::fetch::checkout_failed))]
    CheckoutFailed { sha: String, reason: String },

    // Sync (file system) errors
    #[error("Dependency source not found: {path}")]
    #[diagnostic(
        code(depsync::sync::source_missing),
        help("Fetch the dependency first, or check the configured source path")
    )]
    SourceMissing { path: String },

    #[error("Failed to copy into {path}: {reason}")]
    #[diagnostic(code(depsync::sync::copy_failed))]
    CopyFailed { path: String, reason: String },

    #[error("Failed to replace consumer directory {path}: {reason}")]
    #[diagnostic(
        code(depsync::sync::swap_failed),
        help("Consumers replaced earlier in this run have been restored")
    )]
    SwapFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(depsync::sync::io_error))]
    IoError { message: String },

    // Publish errors
    #[error("Failed to stage changes: {reason}")]
    #[diagnostic(code(depsync::publish::stage_failed))]
    StageFailed { reason: String },

    #[error("Failed to create commit: {reason}")]
    #[diagnostic(
        code(depsync::publish::commit_failed),
        help("Make sure user.name and user.email are set in your git config")
    )]
    CommitFailed { reason: String },

    #[error("HEAD is detached; cannot determine the branch to push")]
    #[diagnostic(
        code(depsync::publish::detached_head),
        help("Check out a branch in the superproject before publishing")
    )]
    DetachedHead,

    #[error("Remote '{name}' not found")]
    #[diagnostic(
        code(depsync::publish::remote_not_found),
        help("List configured remotes with 'git remote -v'")
    )]
    RemoteNotFound { name: String },

    #[error("Failed to push to '{remote}': {reason}")]
    #[diagnostic(code(depsync::publish::push_failed))]
    PushFailed { remote: String, reason: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(depsync::publish::git_operation_failed))]
    GitOperationFailed { message: String },

    // Verify errors
    #[error("{count} consumer(s) out of sync with {source_path}")]
    #[diagnostic(
        code(depsync::verify::out_of_sync),
        help("Run sync-dependency to refresh the consumer directories")
    )]
    ConsumerOutOfSync { count: usize, source_path: String },

    #[error("Aborted by user")]
    #[diagnostic(code(depsync::aborted))]
    Aborted,
}

impl SyncError {
    /// The pipeline step this error belongs to
    pub fn step(&self) -> Step {
        match self {
            SyncError::ConfigNotFound { .. }
            | SyncError::ConfigParseFailed { .. }
            | SyncError::ConfigInvalid { .. }
            | SyncError::NotInGitRepository { .. }
            | SyncError::InvalidPath { .. }
            | SyncError::Aborted => Step::Config,
            SyncError::SubmoduleNotFound { .. }
            | SyncError::FetchFailed { .. }
            | SyncError::RefResolveFailed { .. }
            | SyncError::CheckoutFailed { .. } => Step::Fetch,
            SyncError::SourceMissing { .. }
            | SyncError::CopyFailed { .. }
            | SyncError::SwapFailed { .. }
            | SyncError::IoError { .. } => Step::Sync,
            SyncError::StageFailed { .. }
            | SyncError::CommitFailed { .. }
            | SyncError::DetachedHead
            | SyncError::RemoteNotFound { .. }
            | SyncError::PushFailed { .. }
            | SyncError::GitOperationFailed { .. } => Step::Publish,
            SyncError::ConsumerOutOfSync { .. } => Step::Verify,
        }
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<walkdir::Error> for SyncError {
    fn from(err: walkdir::Error) -> Self {
        SyncError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SyncError {
    fn from(err: serde_yaml::Error) -> Self {
        SyncError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<git2::Error> for SyncError {
    fn from(err: git2::Error) -> Self {
        SyncError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for SyncError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => SyncError::Aborted,
            other => SyncError::IoError {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SyncError>;
