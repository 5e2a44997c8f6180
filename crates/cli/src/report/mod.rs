// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage report rendering.
//!
//! Consumes a projected coverage dataset and produces a presentation of it;
//! no selection or filtering logic lives here.

pub mod markdown;

pub use markdown::render_markdown;

/// Coverage classification thresholds, in percent.
///
/// Defaults follow the PHPUnit report conventions: below `low` is poorly
/// covered, `high` and above is well covered.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 90.0,
        }
    }
}

impl Thresholds {
    /// Classify a coverage percentage.
    pub fn classify(&self, percent: f64) -> &'static str {
        if percent >= self.high {
            "high"
        } else if percent >= self.low {
            "medium"
        } else {
            "low"
        }
    }
}
