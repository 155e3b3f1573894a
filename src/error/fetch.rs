//! Dependency fetcher errors

use super::SyncError;

/// Creates a fetch failed error
pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::FetchFailed {
        name: name.into(),
        reason: reason.into(),
    }
}

/// Creates a ref resolution error
pub fn ref_resolve_failed(git_ref: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::RefResolveFailed {
        git_ref: git_ref.into(),
        reason: reason.into(),
    }
}

/// Creates a checkout error
pub fn checkout_failed(sha: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::CheckoutFailed {
        sha: sha.into(),
        reason: reason.into(),
    }
}
