//! Staging, commit and push errors

use super::SyncError;

/// Creates a staging error
pub fn stage_failed(reason: impl Into<String>) -> SyncError {
    SyncError::StageFailed {
        reason: reason.into(),
    }
}

/// Creates a commit error
pub fn commit_failed(reason: impl Into<String>) -> SyncError {
    SyncError::CommitFailed {
        reason: reason.into(),
    }
}

/// Creates a push error
pub fn push_failed(remote: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::PushFailed {
        remote: remote.into(),
        reason: reason.into(),
    }
}
