// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtdata_domain::DomainError;

/// Errors that can occur while consolidating staged tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A published date or time could not be read.
    InvalidTimestamp {
        /// The staged column holding the value.
        field: &'static str,
        /// The value as published.
        value: String,
        /// Snapshot or match the value belongs to.
        context: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidTimestamp {
                field,
                value,
                context,
            } => write!(f, "Invalid {field} '{value}' in {context}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
