// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test fixtures.
//!
//! Builds throwaway git repositories through git2 directly, so tests do not
//! depend on a git binary being installed.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::{Path, PathBuf};

use git2::{Repository, Signature};
use tempfile::TempDir;

/// A temporary git repository for tests.
pub struct TestRepo {
    temp: TempDir,
}

impl TestRepo {
    /// Initialize an empty repository in a fresh temp directory.
    pub fn init() -> Self {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        Self { temp }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    fn repo(&self) -> Repository {
        Repository::open(self.root()).unwrap()
    }

    /// Write a file under the repository root, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Stage a file.
    pub fn stage(&self, rel: &str) {
        let repo = self.repo();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(rel)).unwrap();
        index.write().unwrap();
    }

    /// Delete a file from disk and the index.
    pub fn remove(&self, rel: &str) {
        std::fs::remove_file(self.root().join(rel)).unwrap();
        let repo = self.repo();
        let mut index = repo.index().unwrap();
        index.remove_path(Path::new(rel)).unwrap();
        index.write().unwrap();
    }

    /// Commit the current index, returning the commit hash.
    pub fn commit(&self, message: &str) -> String {
        let repo = self.repo();
        let mut index = repo.index().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test User", "test@example.com").unwrap();

        let parent = repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .map(|oid| repo.find_commit(oid).unwrap());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
            .to_string()
    }

    /// Write, stage, and commit a file in one step.
    pub fn commit_file(&self, rel: &str, content: &str, message: &str) -> String {
        self.write(rel, content);
        self.stage(rel);
        self.commit(message)
    }
}

/// `n` numbered lines, each unique, newline-terminated.
pub fn numbered_lines(n: u32) -> String {
    (1..=n).map(|i| format!("line {i}\n")).collect()
}

/// `numbered_lines(n)` with the given 1-based lines replaced.
pub fn with_lines_changed(n: u32, changed: &[u32]) -> String {
    (1..=n)
        .map(|i| {
            if changed.contains(&i) {
                format!("changed {i}\n")
            } else {
                format!("line {i}\n")
            }
        })
        .collect()
}
