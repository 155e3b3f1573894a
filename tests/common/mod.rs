//! Common test utilities for sync-dependency integration tests
//!
//! Every fixture is built with git2 inside temporary directories: an
//! upstream repository for the dependency, a superproject that carries it
//! as the `bond` submodule, and bare repositories standing in for remotes.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use git2::{IndexAddOption, Oid, Repository, Signature};
use tempfile::TempDir;

pub const CONFIG: &str = "\
dependency: bond
consumers:
  - producer/bond
  - consumer/bond
remotes:
  - origin
  - backup
";

/// The sync-dependency binary with a clean environment
#[allow(deprecated)]
pub fn sync_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sync-dependency").unwrap();
    cmd.env_remove("DEPSYNC_WORKSPACE");
    cmd.env_remove("RUST_LOG");
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

/// Commit whatever is in the index on top of HEAD
pub fn commit_index(repo: &Repository, message: &str) -> Oid {
    let sig = Signature::now("Test", "test@test.com").unwrap();
    let mut index = repo.index().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

/// Stage `pathspecs` and commit
pub fn commit_paths(repo: &Repository, pathspecs: &[&str], message: &str) -> Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(pathspecs.iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    commit_index(repo, message)
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Superproject with a `bond` submodule, two stale consumers and two remotes
pub struct SyncFixture {
    upstream_dir: TempDir,
    root_dir: TempDir,
    remotes_dir: TempDir,
    /// Superproject working tree
    pub path: PathBuf,
}

impl SyncFixture {
    pub fn new() -> Self {
        let upstream_dir = TempDir::new().unwrap();
        let upstream = Repository::init(upstream_dir.path()).unwrap();
        write_file(upstream_dir.path(), "README.md", "bond v1\n");
        write_file(upstream_dir.path(), "src/lib.rs", "pub fn version() -> u32 { 1 }\n");
        commit_paths(&upstream, &["*"], "v1");

        let root_dir = TempDir::new().unwrap();
        let path = root_dir.path().to_path_buf();
        let repo = Repository::init(&path).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Sync Tester").unwrap();
            config.set_str("user.email", "sync@test.com").unwrap();
        }

        write_file(&path, "depsync.yaml", CONFIG);
        write_file(&path, "producer/bond/README.md", "stale\n");
        write_file(&path, "producer/bond/obsolete.txt", "remove me\n");
        write_file(&path, "producer/main.rs", "fn main() {}\n");
        write_file(&path, "consumer/bond/README.md", "stale\n");
        commit_paths(&repo, &["depsync.yaml", "producer", "consumer"], "initial");

        {
            let url = upstream_dir.path().to_str().unwrap();
            let mut submodule = repo.submodule(url, Path::new("bond"), true).unwrap();
            submodule.clone(None).unwrap();
            submodule.add_finalize().unwrap();
        }
        commit_index(&repo, "add bond");

        let remotes_dir = TempDir::new().unwrap();
        for name in ["origin", "backup"] {
            let bare = remotes_dir.path().join(format!("{name}.git"));
            Repository::init_bare(&bare).unwrap();
            repo.remote(name, bare.to_str().unwrap()).unwrap();
        }

        Self {
            upstream_dir,
            root_dir,
            remotes_dir,
            path,
        }
    }

    pub fn repo(&self) -> Repository {
        Repository::open(&self.path).unwrap()
    }

    /// Commit a change to the dependency's upstream repository
    pub fn advance_upstream(&self, relative: &str, content: &str) -> Oid {
        let upstream = Repository::open(self.upstream_dir.path()).unwrap();
        write_file(self.upstream_dir.path(), relative, content);
        commit_paths(&upstream, &["*"], &format!("update {relative}"))
    }

    /// Make the upstream unreachable
    pub fn remove_upstream(&self) {
        fs::remove_dir_all(self.upstream_dir.path()).unwrap();
    }

    pub fn head(&self) -> Oid {
        self.repo().head().unwrap().target().unwrap()
    }

    pub fn branch(&self) -> String {
        self.repo().head().unwrap().shorthand().unwrap().to_string()
    }

    pub fn submodule_head(&self) -> Oid {
        Repository::open(self.path.join("bond"))
            .unwrap()
            .head()
            .unwrap()
            .target()
            .unwrap()
    }

    /// Tip of the superproject's branch on a bare remote, if pushed
    pub fn remote_head(&self, name: &str) -> Option<Oid> {
        let bare =
            Repository::open_bare(self.remotes_dir.path().join(format!("{name}.git"))).unwrap();
        let reference = format!("refs/heads/{}", self.branch());
        bare.refname_to_id(&reference).ok()
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path.join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path.join(relative).exists()
    }

    pub fn write(&self, relative: &str, content: &str) {
        write_file(&self.path, relative, content);
    }

    pub fn root(&self) -> &Path {
        self.root_dir.path()
    }
}
