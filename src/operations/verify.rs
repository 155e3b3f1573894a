//! Verify operation: compare every consumer against the dependency source

use std::path::Path;

use serde::Serialize;

use crate::common::fs::ExcludeSet;
use crate::domain::{ConsumerDir, display_path};
use crate::error::{Result, SyncError};
use crate::hash::hash_directory;
use crate::workspace::Workspace;

/// State of one consumer relative to the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumerState {
    InSync,
    OutOfSync,
    Missing,
}

impl std::fmt::Display for ConsumerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConsumerState::InSync => "in sync",
            ConsumerState::OutOfSync => "out of sync",
            ConsumerState::Missing => "missing",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumerCheck {
    pub consumer: String,
    pub state: ConsumerState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub source: String,
    pub source_hash: String,
    pub consumers: Vec<ConsumerCheck>,
}

impl VerifyReport {
    /// Consumers not in sync with the source
    pub fn drifted(&self) -> usize {
        self.consumers
            .iter()
            .filter(|c| c.state != ConsumerState::InSync)
            .count()
    }

    /// `Ok` when every consumer is in sync
    pub fn ensure_in_sync(&self) -> Result<()> {
        match self.drifted() {
            0 => Ok(()),
            count => Err(SyncError::ConsumerOutOfSync {
                count,
                source_path: self.source.clone(),
            }),
        }
    }
}

/// High-level verify operation
pub struct VerifyOperation<'a> {
    workspace: &'a Workspace,
    exclude: &'a ExcludeSet,
}

impl<'a> VerifyOperation<'a> {
    pub fn new(workspace: &'a Workspace, exclude: &'a ExcludeSet) -> Self {
        Self { workspace, exclude }
    }

    pub fn execute(&self, source: &Path, consumers: &[ConsumerDir]) -> Result<VerifyReport> {
        let source_dir = self.workspace.resolve(source);
        if !source_dir.is_dir() {
            return Err(SyncError::SourceMissing {
                path: display_path(source),
            });
        }
        let source_hash = hash_directory(&source_dir, self.exclude)?;

        let consumers = consumers
            .iter()
            .map(|consumer| {
                let target = self.workspace.resolve(consumer.path());
                let (state, hash) = if target.is_dir() {
                    let hash = hash_directory(&target, self.exclude)?;
                    let state = if hash == source_hash {
                        ConsumerState::InSync
                    } else {
                        ConsumerState::OutOfSync
                    };
                    (state, Some(hash))
                } else {
                    (ConsumerState::Missing, None)
                };
                Ok(ConsumerCheck {
                    consumer: consumer.to_string(),
                    state,
                    hash,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(VerifyReport {
            source: display_path(source),
            source_hash,
            consumers,
        })
    }
}
