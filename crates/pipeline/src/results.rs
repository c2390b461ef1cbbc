// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PipelineError;
use crate::fetch::Fetcher;
use crate::job::{Extractor, Stager};
use crate::layout::{RESULTS_DOUBLES_HTML, RESULTS_SINGLES_HTML, RESULTS_TABLE};
use crate::urls::results_url;
use courtdata_domain::{ResultsRecord, ResultsRow, Tournament};
use courtdata_parse::parse_results;
use courtdata_persistence::{Bucket, PersistenceError};
use std::path::PathBuf;
use tracing::{info, warn};

/// Raw results pages, singles first.
const RESULTS_PAGES: [(&str, bool); 2] =
    [(RESULTS_SINGLES_HTML, false), (RESULTS_DOUBLES_HTML, true)];

impl<F: Fetcher> Extractor<F> {
    /// Fetches the singles and doubles results pages, replacing earlier copies.
    ///
    /// # Errors
    ///
    /// Returns an error if either fetch or write fails.
    pub fn extract_results(&self, tournament: &Tournament) -> Result<Vec<PathBuf>, PipelineError> {
        info!(tournament = %tournament, "Fetching results");
        let mut saved: Vec<PathBuf> = Vec::with_capacity(RESULTS_PAGES.len());
        for (filename, doubles) in RESULTS_PAGES {
            let html: String = self.fetch_text(results_url(tournament, doubles))?;
            let target: PathBuf =
                self.storage
                    .build_path(Bucket::Raw, &tournament.path(), filename, None);
            saved.push(self.storage.save_text(&target, &html)?);
        }
        info!(tournament = %tournament, "Saved results");
        Ok(saved)
    }
}

impl Stager {
    /// Rebuilds the results table from the raw singles and doubles pages.
    ///
    /// A missing page is skipped with a warning.
    ///
    /// # Returns
    ///
    /// The table written, or `None` when neither page has a finished match.
    ///
    /// # Errors
    ///
    /// Returns an error if a page does not parse or a match fails validation.
    pub fn stage_results(&self, tournament: &Tournament) -> Result<Option<PathBuf>, PipelineError> {
        let path: String = tournament.path();
        let mut records: Vec<ResultsRecord> = Vec::new();

        for (filename, doubles) in RESULTS_PAGES {
            let source: PathBuf = self.storage.build_path(Bucket::Raw, &path, filename, None);
            let html: String = match self.storage.read_text(&source) {
                Ok(html) => html,
                Err(PersistenceError::NotFound(missing)) => {
                    warn!(tournament = %tournament, path = %missing, "Results page not extracted");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let rows: Vec<ResultsRow> =
                parse_results(&html, tournament.tournament_id(), tournament.year(), doubles)?;
            for row in rows {
                records.push(ResultsRecord::new(row, &self.corrections)?);
            }
        }

        if records.is_empty() {
            info!(tournament = %tournament, "No finished matches");
            return Ok(None);
        }
        let target: PathBuf = self.storage.build_path(Bucket::Stage, &path, RESULTS_TABLE, None);
        self.storage.save_table(&target, &records)?;
        info!(tournament = %tournament, matches = records.len(), "Staged results");
        Ok(Some(target))
    }
}
