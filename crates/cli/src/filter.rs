// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test selection: which recorded tests cover the lines in a diff.
//!
//! Two complementary paths feed the selection. Coverage-based selection
//! intersects the changed line ranges against each dataset's line coverage.
//! Static discovery parses changed test files for `test*` methods whose
//! declarations intersect the diff, because a test added or rewritten in the
//! diff has no coverage history and would otherwise never be selected.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::coverage::CoverageData;
use crate::git::ChangedLines;
use crate::php::{self, Discovery};
use crate::ranges::{self, LineRange};

/// Selection granularity.
///
/// FILE selects any test covering any line of a changed file; LINE selects
/// only tests covering a line inside a changed range. LINE is always a
/// subset of FILE for the same inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Line,
    File,
}

/// The tests selected for one invocation.
#[derive(Debug, Default)]
pub struct Selection {
    /// Coverage-selected tests, grouped by presumed suite name.
    pub by_suite: BTreeMap<String, BTreeSet<String>>,
    /// Tests found by static discovery in changed test files.
    pub discovered: BTreeSet<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.discovered.is_empty() && self.by_suite.values().all(BTreeSet::is_empty)
    }

    /// All selected identifiers with data-provider indexes stripped.
    ///
    /// Provider-expanded identifiers (`C::m#0`, `C::m#1`) name the same
    /// underlying test and must collapse to one entry.
    fn normalized_ids(&self) -> BTreeSet<&str> {
        self.by_suite
            .values()
            .flatten()
            .chain(self.discovered.iter())
            .map(|id| strip_provider_index(id))
            .collect()
    }
}

/// Presumed suite name for a coverage file path: the `<name>` of
/// `<name>.cov`.
pub fn suite_name(path: &Path) -> Option<String> {
    if path.extension()? != "cov" {
        return None;
    }
    Some(path.file_stem()?.to_string_lossy().into_owned())
}

/// Select the tests to run for the given changed lines.
///
/// Combines coverage-based selection over every dataset with static
/// discovery in changed test files.
pub fn select(
    coverage_by_suite: &BTreeMap<String, CoverageData>,
    changed: &ChangedLines,
    granularity: Granularity,
) -> Selection {
    let mut selection = Selection {
        by_suite: coverage_by_suite
            .iter()
            .map(|(suite, data)| (suite.clone(), covered_tests(data, changed, granularity)))
            .collect(),
        discovered: discover_changed_tests(changed),
    };
    selection.by_suite.retain(|_, tests| !tests.is_empty());
    selection
}

/// Coverage-based selection against one dataset.
///
/// Files without a recorded coverage entry are skipped; the coverage data
/// may simply predate the file.
fn covered_tests(
    data: &CoverageData,
    changed: &ChangedLines,
    granularity: Granularity,
) -> BTreeSet<String> {
    let mut selected = BTreeSet::new();
    for (path, changed_ranges) in changed {
        let key = path.to_string_lossy();
        let Some(lines) = data.line_coverage.get(key.as_ref()) else {
            continue;
        };
        for (line, tests) in lines {
            let wanted = match granularity {
                Granularity::File => true,
                Granularity::Line => ranges::contains_any(*line, changed_ranges),
            };
            if wanted {
                selected.extend(tests.iter().cloned());
            }
        }
    }
    selected
}

/// Statically discover test methods whose declarations intersect the diff.
///
/// Unreadable or unparseable files are skipped with a debug log; the
/// coverage snapshot may be stale relative to the branch, and a partial
/// result is still useful. Known limitation: a change to only a data
/// provider does not select the owning test.
fn discover_changed_tests(changed: &ChangedLines) -> BTreeSet<String> {
    let mut tests = BTreeSet::new();

    for (path, changed_ranges) in changed {
        if !is_test_file(path) {
            continue;
        }
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::debug!("skipping unreadable test file {}: {e}", path.display());
                continue;
            }
        };
        let methods = match php::discover_test_methods(&source) {
            Discovery::Methods(methods) => methods,
            Discovery::Skipped(reason) => {
                tracing::debug!("skipping test file {}: {reason:?}", path.display());
                continue;
            }
        };
        for (identifier, declaration) in methods {
            if intersects_any(&declaration, changed_ranges) {
                tests.insert(identifier);
            }
        }
    }

    tests
}

fn intersects_any(range: &LineRange, ranges: &[LineRange]) -> bool {
    ranges.iter().any(|r| range.intersects(r))
}

/// Whether a path follows the test-file naming convention.
pub fn is_test_file(path: &Path) -> bool {
    path.to_string_lossy().ends_with("Test.php")
}

/// Whether the selection should render in suite-oriented form.
///
/// True when any presumed suite name matches a known suite descriptor.
/// Classification changes only the rendering, never the selection.
pub fn is_suite_oriented(
    presumed_suites: &BTreeMap<String, CoverageData>,
    known_suites: &BTreeMap<String, std::path::PathBuf>,
) -> bool {
    presumed_suites.keys().any(|name| known_suites.contains_key(name))
}

/// Render the selection as a test-runner filter expression.
///
/// Suite-oriented output maps each identifier to `ShortClass:method` and
/// joins the unique short names with `|` after a leading `:`. Flat output
/// joins the de-duplicated fully-qualified identifiers with `|`, doubling
/// every backslash so the string survives as a name-filter pattern argument.
/// An empty selection renders as an empty string.
pub fn render(selection: &Selection, suite_oriented: bool) -> String {
    let ids = selection.normalized_ids();
    if ids.is_empty() {
        return String::new();
    }

    if suite_oriented {
        let short_names: BTreeSet<String> = ids.iter().map(|id| short_name(id)).collect();
        format!(":{}", short_names.into_iter().collect::<Vec<_>>().join("|"))
    } else {
        ids.into_iter().collect::<Vec<_>>().join("|").replace('\\', "\\\\")
    }
}

/// Strip a `#dataProviderIndex` suffix from a test identifier.
pub fn strip_provider_index(identifier: &str) -> &str {
    identifier.split('#').next().unwrap_or(identifier)
}

/// `Namespace\Class::method` -> `Class:method`.
///
/// Pure string splitting: the class/method separator first, then the last
/// namespace segment as the short class name.
pub fn short_name(identifier: &str) -> String {
    match identifier.split_once("::") {
        Some((class_path, method)) => {
            let short_class = class_path.rsplit('\\').next().unwrap_or(class_path);
            format!("{short_class}:{method}")
        }
        None => identifier.to_string(),
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
