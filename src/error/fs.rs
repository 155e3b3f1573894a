//! Vendor sync (file system) errors

use super::SyncError;

/// Creates a copy failure error
pub fn copy_failed(path: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::CopyFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a swap failure error
pub fn swap_failed(path: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::SwapFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
