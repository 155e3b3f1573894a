//! Swap transaction for replacing consumer directories
//!
//! A consumer is replaced in two renames: the live directory moves to a
//! backup path, then the staged copy moves into place. The transaction
//! remembers every swap so a later failure can put the old directories back.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = SwapTransaction::new();
//! for (staged, target) in swaps {
//!     transaction.swap(&staged, &target)?;
//! }
//!
//! // On success: backups are deleted
//! transaction.commit();
//!
//! // On error (automatic via Drop if not committed):
//! // every swapped consumer is restored from its backup
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs::swap_failed};

/// One completed swap
#[derive(Debug)]
struct SwapRecord {
    /// Live consumer path
    target: PathBuf,
    /// Where the previous content was moved (`None` if the consumer was new)
    backup: Option<PathBuf>,
}

/// A transaction over consumer directory swaps
#[derive(Debug, Default)]
pub struct SwapTransaction {
    /// Swaps performed so far, in order
    swaps: Vec<SwapRecord>,

    /// Whether the transaction has been committed
    committed: bool,
}

/// Backup location used while `target` is being replaced
pub fn backup_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.depsync-backup"))
}

impl SwapTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `target` with the directory at `staged`.
    ///
    /// `staged` must be on the same filesystem as `target`. On error the
    /// target is left as it was before this call.
    pub fn swap(&mut self, staged: &Path, target: &Path) -> Result<()> {
        let target_display = target.display().to_string();

        let backup = if target.exists() {
            let backup = backup_path(target);
            if backup.exists() {
                fs::remove_dir_all(&backup)
                    .map_err(|e| swap_failed(&target_display, format!("stale backup: {e}")))?;
            }
            fs::rename(target, &backup).map_err(|e| swap_failed(&target_display, e.to_string()))?;
            Some(backup)
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| swap_failed(&target_display, e.to_string()))?;
            }
            None
        };

        if let Err(e) = fs::rename(staged, target) {
            if let Some(backup) = &backup {
                if let Err(restore) = fs::rename(backup, target) {
                    log::warn!(
                        "Failed to restore {} from {}: {restore}",
                        target.display(),
                        backup.display()
                    );
                }
            }
            return Err(swap_failed(&target_display, e.to_string()));
        }

        self.swaps.push(SwapRecord {
            target: target.to_path_buf(),
            backup,
        });
        Ok(())
    }

    /// Number of swaps performed so far
    pub fn len(&self) -> usize {
        self.swaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swaps.is_empty()
    }

    /// Keep all swaps and delete the backups
    pub fn commit(mut self) {
        self.committed = true;
        for record in &self.swaps {
            if let Some(backup) = &record.backup {
                if let Err(e) = fs::remove_dir_all(backup) {
                    log::warn!("Failed to remove backup {}: {e}", backup.display());
                }
            }
        }
    }

    /// Undo every swap, newest first
    pub fn rollback(&mut self) {
        if self.committed {
            return;
        }

        for record in self.swaps.drain(..).rev() {
            if record.target.exists() {
                if let Err(e) = fs::remove_dir_all(&record.target) {
                    log::warn!("Failed to remove {}: {e}", record.target.display());
                    continue;
                }
            }
            if let Some(backup) = record.backup {
                if let Err(e) = fs::rename(&backup, &record.target) {
                    log::warn!(
                        "Failed to restore {} from {}: {e}",
                        record.target.display(),
                        backup.display()
                    );
                }
            }
        }
    }
}

impl Drop for SwapTransaction {
    fn drop(&mut self) {
        if !self.committed && !self.is_empty() {
            log::debug!("Rolling back {} consumer swap(s)", self.len());
            self.rollback();
        }
    }
}

#[cfg(test)]
mod tests;
