// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::test_utils::{numbered_lines, with_lines_changed, TestRepo};

fn all_paths(_: &Path) -> bool {
    true
}

#[test]
fn trimmed_range_drops_context_from_both_ends() {
    // A 10-line hunk starting at 100 carries 3 context lines either side.
    let range = trimmed_range(100, 10);
    assert_eq!(range, LineRange::new(103, 107));
}

#[test]
fn trimmed_range_of_short_hunk_is_inverted_but_normalizable() {
    let range = trimmed_range(5, 4);
    assert!(range.start > range.end);
    let normalized = range.normalized();
    assert!(normalized.start <= normalized.end);
}

#[test]
fn trimmed_range_saturates_near_zero() {
    let range = trimmed_range(0, 1);
    assert_eq!(range.end, 0);
}

#[test]
fn count_lines_handles_trailing_newline_and_its_absence() {
    let repo = TestRepo::init();
    let terminated = repo.write("a.txt", "one\ntwo\nthree\n");
    let unterminated = repo.write("b.txt", "one\ntwo\nthree");
    let empty = repo.write("c.txt", "");

    assert_eq!(count_lines(&terminated), Some(3));
    assert_eq!(count_lines(&unterminated), Some(3));
    assert_eq!(count_lines(&empty), Some(0));
    assert_eq!(count_lines(Path::new("/no/such/file")), None);
}

#[test]
fn whole_file_range_is_unbounded_for_missing_file() {
    assert_eq!(
        whole_file_range(Path::new("/no/such/file")),
        LineRange::unbounded()
    );
}

#[test]
fn non_repository_directory_is_a_repository_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = changed_lines(dir.path(), "HEAD", "HEAD", false, all_paths);
    assert!(matches!(result, Err(Error::Repository { .. })));
}

#[test]
fn unresolvable_ref_is_a_repository_error() {
    let repo = TestRepo::init();
    repo.commit_file("src/A.php", &numbered_lines(10), "initial");

    let result = changed_lines(repo.root(), "no-such-ref", "HEAD", false, all_paths);
    match result {
        Err(Error::Repository { message }) => assert!(message.contains("no-such-ref")),
        other => panic!("expected Repository error, got {other:?}"),
    }
}

#[test]
fn committed_modification_yields_trimmed_hunk_range() {
    let repo = TestRepo::init();
    let from = repo.commit_file("src/A.php", &numbered_lines(200), "initial");
    let to = repo.commit_file(
        "src/A.php",
        &with_lines_changed(200, &[103, 104, 105, 106]),
        "change middle",
    );

    let changed = changed_lines(repo.root(), &from, &to, false, all_paths).unwrap();
    let ranges = &changed[&repo.root().join("src/A.php")];
    assert_eq!(ranges, &[LineRange::new(103, 107)]);
}

#[test]
fn file_created_in_diff_covers_the_whole_file() {
    let repo = TestRepo::init();
    let from = repo.commit_file("src/A.php", &numbered_lines(10), "initial");
    let to = repo.commit_file("src/B.php", &numbered_lines(50), "add B");

    let changed = changed_lines(repo.root(), &from, &to, false, all_paths).unwrap();
    let ranges = &changed[&repo.root().join("src/B.php")];
    assert_eq!(ranges, &[LineRange::new(0, 50)]);
}

#[test]
fn deleted_file_is_excluded() {
    let repo = TestRepo::init();
    repo.commit_file("src/A.php", &numbered_lines(10), "initial");
    let from = repo.commit_file("src/B.php", &numbered_lines(10), "add B");
    repo.remove("src/B.php");
    let to = repo.commit("remove B");

    let changed = changed_lines(repo.root(), &from, &to, false, all_paths).unwrap();
    assert!(!changed.contains_key(&repo.root().join("src/B.php")));
}

#[test]
fn untracked_file_is_included_with_whole_file_range() {
    let repo = TestRepo::init();
    let head = repo.commit_file("src/A.php", &numbered_lines(10), "initial");
    repo.write("src/New.php", &numbered_lines(5));

    let changed = changed_lines(repo.root(), &head, &head, true, all_paths).unwrap();
    let ranges = &changed[&repo.root().join("src/New.php")];
    assert_eq!(ranges, &[LineRange::new(0, 5)]);
}

#[test]
fn staged_modification_is_included() {
    let repo = TestRepo::init();
    let head = repo.commit_file("src/A.php", &numbered_lines(100), "initial");
    repo.write("src/A.php", &with_lines_changed(100, &[50]));
    repo.stage("src/A.php");

    let changed = changed_lines(repo.root(), &head, &head, true, all_paths).unwrap();
    assert!(changed.contains_key(&repo.root().join("src/A.php")));
}

#[test]
fn pending_unstaged_modification_is_included() {
    let repo = TestRepo::init();
    let head = repo.commit_file("src/A.php", &numbered_lines(100), "initial");
    repo.write("src/A.php", &with_lines_changed(100, &[50]));

    let changed = changed_lines(repo.root(), &head, &head, true, all_paths).unwrap();
    assert!(changed.contains_key(&repo.root().join("src/A.php")));
}

#[test]
fn working_tree_changes_are_excluded_when_disabled() {
    let repo = TestRepo::init();
    let head = repo.commit_file("src/A.php", &numbered_lines(100), "initial");
    repo.write("src/A.php", &with_lines_changed(100, &[50]));
    repo.write("src/New.php", &numbered_lines(5));

    let changed = changed_lines(repo.root(), &head, &head, false, all_paths).unwrap();
    assert!(changed.is_empty());
}

#[test]
fn path_filter_restricts_the_result() {
    let repo = TestRepo::init();
    let from = repo.commit_file("src/A.php", &numbered_lines(10), "initial");
    repo.write("README.md", "docs\n");
    repo.stage("README.md");
    repo.write("src/B.php", &numbered_lines(10));
    repo.stage("src/B.php");
    let to = repo.commit("add B and docs");

    let changed = changed_lines(repo.root(), &from, &to, false, |path| {
        path.to_string_lossy().ends_with(".php")
    })
    .unwrap();

    assert!(changed.contains_key(&repo.root().join("src/B.php")));
    assert!(!changed.contains_key(&repo.root().join("README.md")));
}

#[test]
fn ranges_from_multiple_sources_accumulate_per_file() {
    let repo = TestRepo::init();
    let from = repo.commit_file("src/A.php", &numbered_lines(200), "initial");
    let to = repo.commit_file("src/A.php", &with_lines_changed(200, &[20]), "commit change");
    repo.write("src/A.php", &with_lines_changed(200, &[20, 150]));

    let changed = changed_lines(repo.root(), &from, &to, true, all_paths).unwrap();
    let ranges = &changed[&repo.root().join("src/A.php")];
    assert!(ranges.len() >= 2);
}
