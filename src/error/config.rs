//! Configuration and workspace resolution errors

use super::SyncError;

/// Creates a configuration not found error
pub fn not_found(path: impl Into<String>) -> SyncError {
    SyncError::ConfigNotFound { path: path.into() }
}

/// Creates a configuration parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> SyncError {
    SyncError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates an invalid path error
pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::InvalidPath {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an error for an unreadable process working directory
pub fn current_dir_failed(err: &std::io::Error) -> SyncError {
    invalid_path(".", format!("cannot read the current directory: {err}"))
}
