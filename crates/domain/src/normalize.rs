// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level normalisation shared by parsers and record constructors.

use crate::error::DomainError;

/// A seed number and entry code parsed from one annotation such as `(1/WC)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedEntry {
    /// Numeric seed, if any.
    pub seed: Option<u32>,
    /// Entry code (`WC`, `Q`, `LL`, `PR`, `Alt`, ...), if any.
    pub entry: Option<String>,
}

impl SeedEntry {
    /// Splits a combined seed/entry annotation.
    ///
    /// Surrounding parentheses are ignored. Empty input gives neither value;
    /// `a/b` gives `a` as a seed when numeric and `b` as the entry code;
    /// anything else is a seed when numeric and an entry code otherwise.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default();
        };
        let cleaned: &str = raw
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim();
        if cleaned.is_empty() {
            return Self::default();
        }

        if let Some((left, right)) = cleaned.split_once('/') {
            return Self {
                seed: left.trim().parse().ok(),
                entry: non_empty(right),
            };
        }

        match cleaned.parse::<u32>() {
            Ok(seed) => Self {
                seed: Some(seed),
                entry: None,
            },
            Err(_) => Self {
                seed: None,
                entry: Some(cleaned.to_string()),
            },
        }
    }
}

/// Trims a value and maps empty text to `None`.
#[must_use]
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Applies `non_empty` to an optional value.
#[must_use]
pub fn non_empty_opt(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(non_empty)
}

/// Converts an `H:MM:SS` duration to seconds. Absent or empty text is `None`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDuration` when the text is not three numeric
/// parts or the total does not fit in a `u32`.
pub fn parse_duration_seconds(value: Option<&str>) -> Result<Option<u32>, DomainError> {
    let Some(text) = value.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 3 {
        return Err(DomainError::InvalidDuration(text.to_string()));
    }

    let mut seconds: u32 = 0;
    for (part, scale) in parts.iter().zip([3600_u32, 60, 1]) {
        seconds = part
            .parse::<u32>()
            .ok()
            .and_then(|value| value.checked_mul(scale))
            .and_then(|value| seconds.checked_add(value))
            .ok_or_else(|| DomainError::InvalidDuration(text.to_string()))?;
    }
    Ok(Some(seconds))
}
