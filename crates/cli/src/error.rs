// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy and process exit codes.

use std::path::PathBuf;

/// Covdiff error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No coverage files found, no coverage data loadable, or invalid input.
    #[error("input error: {0}")]
    Input(String),

    /// The working copy is invalid or a diff could not be computed.
    #[error("repository error: {message}")]
    Repository { message: String },

    /// A source file could not be parsed.
    ///
    /// Recovered locally in test discovery (the file is skipped); surfaces
    /// only when a caller chooses to make it fatal.
    #[error("parse error: {path}: {message}", path = .path.display())]
    Parse { path: PathBuf, message: String },

    /// File I/O error with the offending path.
    #[error("io error: {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file invalid.
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// A coverage file was written by an incompatible format version.
    #[error("incompatible coverage file: {path}: {message}", path = .path.display())]
    IncompatibleData { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<git2::Error> for Error {
    fn from(err: git2::Error) -> Self {
        Error::Repository {
            message: err.message().to_string(),
        }
    }
}

/// Result type using covdiff Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Shell exit codes.
///
/// Every fatal error exits 1 with a single-line message on stderr; partial
/// output is never left behind because files are written only after the full
/// in-memory result exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
}

impl From<&Error> for ExitCode {
    fn from(_: &Error) -> Self {
        ExitCode::Failure
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
