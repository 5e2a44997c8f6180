// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown format coverage report.
//!
//! Intended for CI to post as a pull-request comment. File rows link into a
//! hosted view of the tree when a base URL is given, e.g.
//! `https://github.com/org/project/blob/<sha>`.

use chrono::Local;

use crate::coverage::CoverageData;

use super::Thresholds;

/// Per-file roll-up of line coverage.
struct FileSummary {
    display: String,
    covered: usize,
    total: usize,
}

impl FileSummary {
    fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.covered as f64 * 100.0 / self.total as f64
        }
    }
}

/// Render a coverage dataset as a markdown table.
///
/// `project_root` is the path prefix stripped from each file for display;
/// `base_url` is prepended to the stripped path to form a link.
pub fn render_markdown(
    coverage: &CoverageData,
    project_root: &str,
    base_url: Option<&str>,
) -> String {
    use std::fmt::Write;

    let summaries: Vec<FileSummary> = coverage
        .line_coverage
        .iter()
        .map(|(file, lines)| FileSummary {
            display: file.strip_prefix(project_root).unwrap_or(file).to_string(),
            covered: lines.values().filter(|tests| !tests.is_empty()).count(),
            total: lines.len(),
        })
        .collect();

    let thresholds = Thresholds::default();
    let date = Local::now().format("%a, %b %-d, %Y, %H:%M:%S");

    let mut out = String::with_capacity(512);
    // Infallible writes to a String; ignore the fmt::Result plumbing.
    let _ = writeln!(out, "# Coverage Report\n");
    let _ = writeln!(out, "Generated {date}\n");

    if summaries.is_empty() {
        let _ = writeln!(out, "*No coverage data.*");
        return out;
    }

    let _ = writeln!(out, "| File | Covered | Lines | Coverage | |");
    let _ = writeln!(out, "|------|--------:|------:|---------:|--|");

    let mut covered_sum = 0usize;
    let mut total_sum = 0usize;
    for summary in &summaries {
        covered_sum += summary.covered;
        total_sum += summary.total;

        let cell = match base_url {
            Some(url) => format!(
                "[{}]({}/{})",
                summary.display,
                url.trim_end_matches('/'),
                summary.display
            ),
            None => summary.display.clone(),
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {:.1}% | {} |",
            cell,
            summary.covered,
            summary.total,
            summary.percent(),
            thresholds.classify(summary.percent()),
        );
    }

    let total_percent = if total_sum == 0 {
        0.0
    } else {
        covered_sum as f64 * 100.0 / total_sum as f64
    };
    let _ = writeln!(
        out,
        "| **Total** | {} | {} | {:.1}% | {} |",
        covered_sum,
        total_sum,
        total_percent,
        thresholds.classify(total_percent),
    );

    out
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
