// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The requested file does not exist.
    NotFound(String),
    /// A filesystem operation failed.
    Io {
        /// The path being read or written.
        path: String,
        /// The underlying error message.
        message: String,
    },
    /// JSON serialization/deserialization error.
    SerializationError(String),
    /// A table could not be written or read back.
    TableError {
        /// The table file.
        path: String,
        /// The underlying error message.
        message: String,
    },
}

impl PersistenceError {
    /// Wraps an I/O error for `path`, mapping a missing file to `NotFound`.
    #[must_use]
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.display().to_string())
        } else {
            Self::Io {
                path: path.display().to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Wraps a CSV error for the table at `path`.
    #[must_use]
    pub fn table(path: &Path, err: &csv::Error) -> Self {
        Self::TableError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "File not found: {path}"),
            Self::Io { path, message } => write!(f, "I/O error on {path}: {message}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::TableError { path, message } => write!(f, "Table error in {path}: {message}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
