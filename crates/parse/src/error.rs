// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Extraction errors.
//!
//! A parse error on already-fetched data means the page structure changed;
//! callers treat it as fatal rather than retrying.

use courtdata_domain::DomainError;
use thiserror::Error;

/// Errors raised while extracting rows from page text or JSON.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A CSS selector literal failed to compile.
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// An element the page must contain was not found.
    #[error("Missing element: {context}. The page structure may have changed")]
    MissingElement { context: &'static str },

    /// A value on the page could not be interpreted.
    #[error("Invalid {field} '{value}'")]
    InvalidValue { field: &'static str, value: String },

    /// A JSON document could not be decoded.
    #[error("Invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON entry has an unexpected shape.
    #[error("Unexpected {field} in {context}")]
    UnexpectedJson {
        field: &'static str,
        context: String,
    },

    /// A domain rule or registry rejected an extracted value.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<scraper::error::SelectorErrorKind<'_>> for ParseError {
    fn from(err: scraper::error::SelectorErrorKind<'_>) -> Self {
        Self::Selector(err.to_string())
    }
}
