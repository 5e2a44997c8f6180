// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Changed-line extraction from git diffs.
//!
//! Uses git2 (libgit2) for all git operations to avoid subprocess overhead.
//!
//! A change set is the union of four sources: the committed diff between two
//! refs, the staged diff, the pending (unstaged) diff, and untracked files.
//! Deleted files are excluded; a deleted file cannot be covered going
//! forward.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use git2::{Delta, Diff, DiffOptions, Repository, Status, StatusOptions, Tree};

use crate::error::{Error, Result};
use crate::ranges::LineRange;

/// Context lines surrounding each hunk in the diffs we request.
const HUNK_CONTEXT: u32 = 3;

/// Changed line ranges per absolute file path.
///
/// Ranges accumulate per file and may overlap; only membership is ever
/// tested, so no merging is performed.
pub type ChangedLines = BTreeMap<PathBuf, Vec<LineRange>>;

/// Extract file path from a diff delta.
///
/// For deleted files, `new_file().path()` is `None`, so fall back to
/// `old_file()`.
fn extract_path<'a>(delta: &'a git2::DiffDelta<'a>) -> Option<&'a Path> {
    delta.new_file().path().or_else(|| delta.old_file().path())
}

/// Whether a hunk describes a file creation (no old side at all).
fn is_file_creation(old_start: u32, old_lines: u32) -> bool {
    old_start == 0 && old_lines == 0
}

/// Approximate the truly-changed span of a hunk.
///
/// Hunks carry `HUNK_CONTEXT` unchanged lines before and after the changed
/// block; trimming that context from both ends recovers a practical
/// approximation of the real change. A hunk shorter than twice the context
/// produces an inverted range, which normalizes at the point of use.
fn trimmed_range(new_start: u32, new_lines: u32) -> LineRange {
    LineRange::new(
        new_start + HUNK_CONTEXT,
        (new_start + new_lines).saturating_sub(HUNK_CONTEXT),
    )
}

/// Count the lines in a file on disk.
///
/// Coverage data may reference files that no longer exist at diff time, so
/// an unreadable file yields `None` rather than an error; callers substitute
/// the unbounded range.
fn count_lines(path: &Path) -> Option<u32> {
    let bytes = std::fs::read(path).ok()?;
    if bytes.is_empty() {
        return Some(0);
    }
    let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
    let trailing = usize::from(*bytes.last()? != b'\n');
    u32::try_from(newlines + trailing).ok()
}

/// The whole-file range for a path, unbounded when the file is unreadable.
fn whole_file_range(path: &Path) -> LineRange {
    match count_lines(path) {
        Some(total) => LineRange::new(0, total),
        None => {
            tracing::debug!("cannot count lines in {}, treating as unbounded", path.display());
            LineRange::unbounded()
        }
    }
}

/// Compute the changed line ranges between two refs, per absolute file path.
///
/// When `include_working_tree` is true (the default behavior), staged,
/// pending, and untracked changes are unioned into the committed diff so a
/// work-in-progress fix still triggers its tests. `path_filter` restricts the
/// returned map; which filter to apply belongs to the caller.
pub fn changed_lines(
    root: &Path,
    diff_from: &str,
    diff_to: &str,
    include_working_tree: bool,
    path_filter: impl Fn(&Path) -> bool,
) -> Result<ChangedLines> {
    let repo = Repository::discover(root).map_err(|e| Error::Repository {
        message: format!("{} is not a git working copy: {}", root.display(), e.message()),
    })?;

    let mut changed = ChangedLines::new();

    let from_tree = resolve_tree(&repo, diff_from)?;
    let to_tree = resolve_tree(&repo, diff_to)?;

    let committed = repo.diff_tree_to_tree(
        Some(&from_tree),
        Some(&to_tree),
        Some(&mut diff_options()),
    )?;
    collect_hunk_ranges(&committed, root, &mut changed)?;

    if include_working_tree {
        let head_tree = head_tree(&repo)?;
        let index = repo.index()?;

        let staged = repo.diff_tree_to_index(
            head_tree.as_ref(),
            Some(&index),
            Some(&mut diff_options()),
        )?;
        collect_hunk_ranges(&staged, root, &mut changed)?;

        let pending = repo.diff_index_to_workdir(Some(&index), Some(&mut diff_options()))?;
        collect_hunk_ranges(&pending, root, &mut changed)?;

        for path in untracked_files(&repo)? {
            let abspath = root.join(path);
            let range = whole_file_range(&abspath);
            changed.entry(abspath).or_default().push(range);
        }
    }

    // A degenerate hunk computation for a brand-new file may leave the
    // sentinel unexpanded; re-resolve it to the whole-file range.
    for (path, ranges) in changed.iter_mut() {
        if ranges.iter().any(LineRange::is_sentinel) {
            *ranges = vec![whole_file_range(path)];
        }
    }

    changed.retain(|path, _| path_filter(path));

    tracing::debug!(
        "diff {diff_from}..{diff_to}: {} changed file(s) after filtering",
        changed.len()
    );

    Ok(changed)
}

/// Resolve a ref name or commit hash to its tree.
fn resolve_tree<'r>(repo: &'r Repository, refname: &str) -> Result<Tree<'r>> {
    let object = repo.revparse_single(refname).map_err(|e| Error::Repository {
        message: format!("cannot resolve '{refname}': {}", e.message()),
    })?;
    object.peel_to_tree().map_err(|e| Error::Repository {
        message: format!("'{refname}' does not point at a tree: {}", e.message()),
    })
}

/// The HEAD tree, or `None` on an unborn branch (empty repository).
fn head_tree(repo: &Repository) -> Result<Option<Tree<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree()?)),
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn diff_options() -> DiffOptions {
    let mut opts = DiffOptions::new();
    opts.context_lines(HUNK_CONTEXT);
    opts
}

/// Accumulate per-file hunk ranges from one diff into `acc`.
fn collect_hunk_ranges(diff: &Diff<'_>, root: &Path, acc: &mut ChangedLines) -> Result<()> {
    diff.foreach(
        &mut |_delta, _progress| true,
        None,
        Some(&mut |delta, hunk| {
            if delta.status() == Delta::Deleted {
                return true;
            }
            let Some(rel) = extract_path(&delta) else {
                return true;
            };
            let ranges = acc.entry(root.join(rel)).or_default();
            if is_file_creation(hunk.old_start(), hunk.old_lines()) {
                // The whole file is new; discard narrower ranges gathered so
                // far and mark it for whole-file resolution.
                ranges.clear();
                ranges.push(LineRange::sentinel());
            } else if !ranges.iter().any(LineRange::is_sentinel) {
                ranges.push(trimmed_range(hunk.new_start(), hunk.new_lines()));
            }
            true
        }),
        None,
    )?;
    Ok(())
}

/// Paths of untracked files in the working copy, relative to the repo root.
fn untracked_files(repo: &Repository) -> Result<Vec<PathBuf>> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true).recurse_untracked_dirs(true);

    let statuses = repo.statuses(Some(&mut opts))?;
    let mut files = Vec::new();
    for entry in statuses.iter() {
        if entry.status().contains(Status::WT_NEW) {
            if let Some(path) = entry.path() {
                files.push(PathBuf::from(path));
            }
        }
    }
    Ok(files)
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
