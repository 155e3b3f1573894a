//! Consumer directories and remote endpoints

use std::fmt;
use std::path::{Path, PathBuf};

use super::{display_path, relative_path};
use crate::error::{Result, config::invalid};

/// A destination directory that receives a full copy of the dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConsumerDir {
    path: PathBuf,
}

impl ConsumerDir {
    pub fn new(path: &str) -> Result<Self> {
        Ok(Self {
            path: relative_path(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ConsumerDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_path(&self.path))
    }
}

/// A named git remote that receives the published commit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteEndpoint {
    name: String,
}

impl RemoteEndpoint {
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("remote name is empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(invalid(format!("remote name '{name}' contains whitespace")));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RemoteEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
