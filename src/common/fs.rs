//! Common file system operations: exclusion globs and recursive copy

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{Result, SyncError, config::invalid};

/// Entries that are never mirrored, whatever the configuration says
pub const ALWAYS_EXCLUDED: &[&str] = &[".git"];

/// Compiled set of exclusion globs.
///
/// A pattern without `/` is matched against an entry's file name at any
/// depth (`.git` excludes nested submodule markers too). A pattern with `/`
/// is matched against the path relative to the tree root.
#[derive(Debug, Default)]
pub struct ExcludeSet {
    patterns: Vec<(bool, Glob<'static>)>,
}

impl ExcludeSet {
    /// Compile user patterns on top of [`ALWAYS_EXCLUDED`]
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut compiled = Vec::new();
        let all = ALWAYS_EXCLUDED
            .iter()
            .copied()
            .chain(patterns.iter().map(AsRef::as_ref));

        for pattern in all {
            let pattern = pattern.trim().trim_end_matches('/');
            if pattern.is_empty() {
                continue;
            }
            let glob = Glob::new(pattern)
                .map_err(|e| invalid(format!("invalid exclude pattern '{pattern}': {e}")))?
                .into_owned();
            compiled.push((pattern.contains('/'), glob));
        }

        Ok(Self { patterns: compiled })
    }

    /// Check whether a tree-relative path is excluded
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let normalized = relative.to_string_lossy().replace('\\', "/");
        let file_name = relative
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        self.patterns.iter().any(|(anchored, glob)| {
            let candidate = if *anchored {
                CandidatePath::from(normalized.as_str())
            } else {
                CandidatePath::from(file_name.as_str())
            };
            glob.matched(&candidate).is_some()
        })
    }

    /// Walk `root` in a deterministic order, skipping excluded entries.
    ///
    /// Yields `(relative path, entry)` pairs; the root itself is not yielded.
    pub fn walk<'a>(
        &'a self,
        root: &'a Path,
    ) -> impl Iterator<Item = Result<(PathBuf, DirEntry)>> + 'a {
        WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                !self.is_excluded(relative)
            })
            .map(move |entry| {
                let entry = entry?;
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| entry.path().to_path_buf());
                Ok((relative, entry))
            })
    }
}

/// Copy a directory tree recursively, skipping excluded entries.
///
/// `dst` is created if it does not exist. Symlinks are recreated as
/// symlinks rather than followed. Returns the number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path, exclude: &ExcludeSet) -> Result<usize> {
    let copy_err = |path: &Path, e: std::io::Error| SyncError::CopyFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    fs::create_dir_all(dst).map_err(|e| copy_err(dst, e))?;

    let mut copied = 0;
    for item in exclude.walk(src) {
        let (relative, entry) = item?;
        let target = dst.join(&relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| copy_err(&target, e))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target).map_err(|e| copy_err(&target, e))?;
            copied += 1;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| copy_err(&target, e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> std::io::Result<()> {
    let link_target = fs::read_link(src)?;
    std::os::unix::fs::symlink(link_target, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> std::io::Result<()> {
    // Without portable symlink creation, materialize the link target.
    fs::copy(src, dst).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_patterns() -> ExcludeSet {
        ExcludeSet::new::<&str>(&[]).unwrap()
    }

    #[test]
    fn test_git_marker_always_excluded() {
        let exclude = no_patterns();
        assert!(exclude.is_excluded(Path::new(".git")));
        assert!(exclude.is_excluded(Path::new("nested/lib/.git")));
        assert!(!exclude.is_excluded(Path::new(".gitignore")));
    }

    #[test]
    fn test_name_and_anchored_patterns() {
        let exclude = ExcludeSet::new(&["__pycache__", "docs/*.md"]).unwrap();
        assert!(exclude.is_excluded(Path::new("core/__pycache__")));
        assert!(exclude.is_excluded(Path::new("docs/readme.md")));
        assert!(!exclude.is_excluded(Path::new("core/readme.md")));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(ExcludeSet::new(&["{unclosed"]).is_err());
    }

    #[test]
    fn test_copy_dir_recursive_skips_excluded() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("a.txt"), "a").unwrap();
        fs::create_dir_all(src.path().join("core/input")).unwrap();
        fs::write(src.path().join("core/input/b.txt"), "b").unwrap();
        fs::write(src.path().join(".git"), "gitdir: ../.git/modules/bond").unwrap();

        let target = dst.path().join("bond");
        let copied = copy_dir_recursive(src.path(), &target, &no_patterns()).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(target.join("a.txt")).unwrap(), "a");
        assert_eq!(
            fs::read_to_string(target.join("core/input/b.txt")).unwrap(),
            "b"
        );
        assert!(!target.join(".git").exists());
    }

    #[test]
    fn test_copy_preserves_empty_directories() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("empty")).unwrap();

        copy_dir_recursive(src.path(), dst.path(), &no_patterns()).unwrap();
        assert!(dst.path().join("empty").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_recreates_symlinks() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("real.txt"), "real").unwrap();
        std::os::unix::fs::symlink("real.txt", src.path().join("link.txt")).unwrap();

        copy_dir_recursive(src.path(), dst.path(), &no_patterns()).unwrap();
        let link = dst.path().join("link.txt");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("real.txt"));
    }
}
