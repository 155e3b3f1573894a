//! Dependency reference: the external tree mirrored into every consumer

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{display_path, relative_path};
use crate::error::Result;

/// How the dependency is brought up to date before mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Update the submodule to its remote's latest commit, recursively
    #[default]
    Submodule,
    /// Mirror the source directory as it currently is
    None,
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::Submodule => f.write_str("submodule"),
            FetchMode::None => f.write_str("none"),
        }
    }
}

/// The dependency being vendored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    /// Submodule path, relative to the workspace root
    path: PathBuf,
    /// Directory whose content is mirrored (defaults to `path`)
    source: PathBuf,
    /// Fetch strategy
    fetch: FetchMode,
}

impl DependencyRef {
    pub fn new(path: &str, source: Option<&str>, fetch: FetchMode) -> Result<Self> {
        let path = relative_path(path)?;
        let source = match source {
            Some(s) => relative_path(s)?,
            None => path.clone(),
        };
        Ok(Self {
            path,
            source,
            fetch,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn fetch(&self) -> FetchMode {
        self.fetch
    }

    /// Submodule name as used in `.gitmodules` lookups
    pub fn name(&self) -> String {
        display_path(&self.path)
    }
}

impl fmt::Display for DependencyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source == self.path {
            write!(f, "{}", display_path(&self.path))
        } else {
            write!(
                f,
                "{} (source: {})",
                display_path(&self.path),
                display_path(&self.source)
            )
        }
    }
}
