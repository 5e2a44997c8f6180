// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unit tests for config, coverage-file, and suite-descriptor discovery.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use tempfile::TempDir;

use super::*;

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "").unwrap();
}

// =============================================================================
// CONFIG DISCOVERY
// =============================================================================

#[test]
fn finds_config_in_start_dir() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("covdiff.toml"));

    let found = find_config(temp.path()).unwrap();
    assert!(found.ends_with("covdiff.toml"));
}

#[test]
fn walks_up_to_the_git_root() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("covdiff.toml"));
    std::fs::create_dir_all(temp.path().join(".git")).unwrap();
    let nested = temp.path().join("src/deep");
    std::fs::create_dir_all(&nested).unwrap();

    assert!(find_config(&nested).is_some());
}

#[test]
fn stops_at_the_git_root() {
    let temp = TempDir::new().unwrap();
    // Config above the git root must not be found.
    touch(&temp.path().join("covdiff.toml"));
    let project = temp.path().join("project");
    std::fs::create_dir_all(project.join(".git")).unwrap();

    assert!(find_config(&project).is_none());
}

// =============================================================================
// COVERAGE FILE DISCOVERY
// =============================================================================

#[test]
fn finds_cov_files_at_all_three_levels() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("merged.cov"));
    touch(&temp.path().join("tests/unit.cov"));
    touch(&temp.path().join("tests/_output/wpunit.cov"));
    // Too deep: not discovered.
    touch(&temp.path().join("tests/_output/nested/deep.cov"));
    // Wrong extension: not discovered.
    touch(&temp.path().join("tests/unit.xml"));

    let found = find_coverage_files(temp.path());
    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(found.len(), 3, "got {names:?}");
    assert!(names.contains(&"merged.cov".to_string()));
    assert!(names.contains(&"unit.cov".to_string()));
    assert!(names.contains(&"wpunit.cov".to_string()));
}

#[test]
fn no_cov_files_yields_empty_list() {
    let temp = TempDir::new().unwrap();
    assert!(find_coverage_files(temp.path()).is_empty());
}

// =============================================================================
// SUITE DESCRIPTOR DISCOVERY
// =============================================================================

#[test]
fn finds_suite_descriptors_with_both_yaml_extensions() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("tests/wpunit.suite.yml"));
    touch(&temp.path().join("tests/functional.suite.yaml"));
    touch(&temp.path().join("tests/unit.cov"));

    let suites = find_suite_descriptors(temp.path());
    assert_eq!(suites.len(), 2);
    assert!(suites.contains_key("wpunit"));
    assert!(suites.contains_key("functional"));
}

#[test]
fn no_tests_directory_yields_no_suites() {
    let temp = TempDir::new().unwrap();
    assert!(find_suite_descriptors(temp.path()).is_empty());
}
