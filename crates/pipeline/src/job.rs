// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PipelineError;
use crate::fetch::{FetchRequest, Fetcher};
use courtdata_domain::PlayerIdCorrections;
use courtdata_persistence::Storage;
use serde_json::Value;

/// Fetches upstream pages and documents into the raw tier.
///
/// Dataset methods live next to their staging counterparts, one module per
/// dataset.
#[derive(Debug, Clone)]
pub struct Extractor<F> {
    pub(crate) storage: Storage,
    pub(crate) fetcher: F,
}

impl<F: Fetcher> Extractor<F> {
    /// Creates an extractor writing into `storage`.
    #[must_use]
    pub const fn new(storage: Storage, fetcher: F) -> Self {
        Self { storage, fetcher }
    }

    /// Returns the data tree.
    #[must_use]
    pub const fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Fetches a page as text.
    pub(crate) fn fetch_text(&self, url: String) -> Result<String, PipelineError> {
        Ok(self.fetcher.fetch(&FetchRequest::html(url))?)
    }

    /// Fetches and decodes a JSON document.
    pub(crate) fn fetch_json(&self, request: &FetchRequest) -> Result<Value, PipelineError> {
        let body: String = self.fetcher.fetch(request)?;
        serde_json::from_str(&body).map_err(|source| {
            PipelineError::Parse(courtdata_parse::ParseError::Json {
                context: request.url.clone(),
                source,
            })
        })
    }
}

/// Parses raw files into staged tables and consolidates them. Never fetches,
/// so it runs over an existing data tree.
#[derive(Debug, Clone)]
pub struct Stager {
    pub(crate) storage: Storage,
    pub(crate) corrections: PlayerIdCorrections,
}

impl Stager {
    /// Creates a stager over `storage`.
    #[must_use]
    pub const fn new(storage: Storage, corrections: PlayerIdCorrections) -> Self {
        Self {
            storage,
            corrections,
        }
    }

    /// Returns the data tree.
    #[must_use]
    pub const fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Returns the player id correction table.
    #[must_use]
    pub const fn corrections(&self) -> &PlayerIdCorrections {
        &self.corrections
    }
}
