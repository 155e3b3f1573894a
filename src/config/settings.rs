//! Merged and validated sync settings

use std::collections::HashSet;

use super::ConfigFile;
use crate::common::fs::ExcludeSet;
use crate::domain::{ConsumerDir, DependencyRef, FetchMode, RemoteEndpoint};
use crate::error::{Result, config::invalid};

/// Values supplied on the command line; `None`/empty means "not given"
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub dependency: Option<String>,
    pub source: Option<String>,
    pub consumers: Vec<String>,
    pub remotes: Vec<String>,
    pub message: Option<String>,
    pub exclude: Vec<String>,
    pub no_fetch: bool,
}

/// Everything a sync run needs, validated
#[derive(Debug)]
pub struct SyncSettings {
    pub dependency: DependencyRef,
    pub consumers: Vec<ConsumerDir>,
    pub remotes: Vec<RemoteEndpoint>,
    pub message: String,
    pub exclude: ExcludeSet,
}

impl SyncSettings {
    /// Merge the config file with command-line overrides and validate
    pub fn resolve(file: ConfigFile, overrides: ConfigOverrides) -> Result<Self> {
        let dependency_path = overrides
            .dependency
            .or(file.dependency)
            .ok_or_else(|| invalid("no dependency configured (use --ref or 'dependency:')"))?;
        let source = overrides.source.or(file.source);
        let fetch = if overrides.no_fetch {
            FetchMode::None
        } else {
            file.fetch.unwrap_or_default()
        };
        let dependency = DependencyRef::new(&dependency_path, source.as_deref(), fetch)?;

        let consumer_names = prefer_overrides(overrides.consumers, file.consumers);
        if consumer_names.is_empty() {
            return Err(invalid(
                "no consumer directories configured (use --consumers or 'consumers:')",
            ));
        }
        let consumers = consumer_names
            .iter()
            .map(|c| ConsumerDir::new(c))
            .collect::<Result<Vec<_>>>()?;
        validate_consumers(&dependency, &consumers)?;

        let remotes = prefer_overrides(overrides.remotes, file.remotes)
            .iter()
            .map(|r| RemoteEndpoint::new(r))
            .collect::<Result<Vec<_>>>()?;
        let mut seen = HashSet::new();
        if let Some(dup) = remotes.iter().find(|r| !seen.insert(r.name())) {
            return Err(invalid(format!("remote '{dup}' is listed twice")));
        }

        let message = overrides
            .message
            .or(file.message)
            .map(|m| m.trim().to_string())
            .unwrap_or_else(|| format!("Update vendored {}", dependency.name()));
        if message.is_empty() {
            return Err(invalid("commit message is empty"));
        }

        let mut exclude_patterns = file.exclude;
        exclude_patterns.extend(overrides.exclude);
        let exclude = ExcludeSet::new(&exclude_patterns)?;

        Ok(Self {
            dependency,
            consumers,
            remotes,
            message,
            exclude,
        })
    }
}

/// Command-line lists replace config-file lists rather than extending them.
/// Entries may also be comma-separated inside a single value.
fn prefer_overrides(overrides: Vec<String>, file: Vec<String>) -> Vec<String> {
    let chosen = if overrides.is_empty() { file } else { overrides };
    chosen
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Consumers must be distinct and must not overlap the dependency source:
/// a consumer inside the source would be copied into itself, and a source
/// inside a consumer would be deleted by the swap.
fn validate_consumers(dependency: &DependencyRef, consumers: &[ConsumerDir]) -> Result<()> {
    let mut seen = HashSet::new();
    for consumer in consumers {
        if !seen.insert(consumer.path()) {
            return Err(invalid(format!("consumer '{consumer}' is listed twice")));
        }

        let path = consumer.path();
        if path.starts_with(dependency.source()) || dependency.source().starts_with(path) {
            return Err(invalid(format!(
                "consumer '{consumer}' overlaps the dependency source '{}'",
                crate::domain::display_path(dependency.source())
            )));
        }
        if path.starts_with(dependency.path()) || dependency.path().starts_with(path) {
            return Err(invalid(format!(
                "consumer '{consumer}' overlaps the submodule '{}'",
                dependency.name()
            )));
        }
    }

    for a in consumers {
        for b in consumers {
            if a != b && b.path().starts_with(a.path()) {
                return Err(invalid(format!("consumer '{b}' is nested inside '{a}'")));
            }
        }
    }

    Ok(())
}
