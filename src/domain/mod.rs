//! Domain models for depsync
//!
//! This module contains pure domain objects: the dependency being mirrored,
//! the consumer directories receiving copies, and the remotes changes are
//! published to. Paths are always workspace-relative here; the workspace
//! resolves them to absolute locations.

pub mod dependency;
pub mod target;

pub use dependency::{DependencyRef, FetchMode};
pub use target::{ConsumerDir, RemoteEndpoint};

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, config::invalid_path};

/// Validate a workspace-relative path and normalize it to forward slashes.
///
/// Rejects empty paths, absolute paths and any path that climbs out of the
/// workspace with `..`.
pub(crate) fn relative_path(raw: &str) -> Result<PathBuf> {
    let trimmed = raw.trim().trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        return Err(invalid_path(raw, "path is empty"));
    }

    let path = Path::new(trimmed);
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(invalid_path(raw, "path must not leave the workspace"));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid_path(raw, "path must be relative to the workspace"));
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(invalid_path(raw, "path refers to the workspace root"));
    }

    Ok(normalized)
}

/// Render a relative path with forward slashes for display and config files
pub(crate) fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
