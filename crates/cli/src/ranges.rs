// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Inclusive line-range arithmetic.
//!
//! Diff hunks, test-method declarations, and coverage lookups all speak in
//! inclusive `(start, end)` line pairs. Ranges may arrive inverted (a hunk
//! shorter than the context trim) and are normalized at the point of use.

/// An inclusive range of line numbers.
///
/// `(0, 0)` is the whole-file sentinel: the file changed in its entirety but
/// its line count was not known when the range was built. It must be resolved
/// to `(0, total_lines)` before membership tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The whole-file sentinel, pending expansion to an actual line count.
    pub fn sentinel() -> Self {
        Self { start: 0, end: 0 }
    }

    /// A range covering every possible line.
    ///
    /// Used when a file referenced by coverage data cannot be read at diff
    /// time; every line is treated as in range rather than failing.
    pub fn unbounded() -> Self {
        Self {
            start: 0,
            end: u32::MAX,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// Return the range with endpoints in ascending order.
    pub fn normalized(self) -> Self {
        if self.start > self.end {
            Self {
                start: self.end,
                end: self.start,
            }
        } else {
            self
        }
    }

    /// Whether `line` falls inside the range, endpoints included.
    pub fn contains(&self, line: u32) -> bool {
        let r = self.normalized();
        r.start <= line && line <= r.end
    }

    /// Whether two ranges overlap anywhere.
    pub fn intersects(&self, other: &LineRange) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        !(a.end < b.start || b.end < a.start)
    }
}

/// Whether any range in `ranges` contains `line`.
pub fn contains_any(line: u32, ranges: &[LineRange]) -> bool {
    ranges.iter().any(|r| r.contains(line))
}

#[cfg(test)]
#[path = "ranges_tests.rs"]
mod tests;
