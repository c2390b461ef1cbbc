// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PipelineError;
use crate::fetch::{FetchRequest, Fetcher};
use crate::job::{Extractor, Stager};
use crate::layout::{
    JSON_PATTERN, MATCH_STATS_DIR, MATCH_STATS_TABLE, RESULTS_TABLE, TABLE_PATTERN, table_name,
    within,
};
use crate::urls::{STATS_REFERER, match_stats_url};
use courtdata::consolidate_match_stats;
use courtdata_domain::{MatchStatsRecord, ResultsRecord, Tournament};
use courtdata_parse::parse_match_stats;
use courtdata_persistence::{Bucket, Storage};
use serde_json::Value;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Distinct match codes of a tournament's staged results, sorted.
///
/// # Errors
///
/// Returns an error if the results table exists but cannot be read.
pub fn staged_match_codes(
    storage: &Storage,
    tournament: &Tournament,
) -> Result<Vec<String>, PipelineError> {
    let path: PathBuf = storage.build_path(Bucket::Stage, &tournament.path(), RESULTS_TABLE, None);
    if !path.is_file() {
        warn!(tournament = %tournament, "No staged results; cannot list match codes");
        return Ok(Vec::new());
    }
    let codes: BTreeSet<String> = storage
        .read_table::<ResultsRecord>(&path)?
        .into_iter()
        .filter_map(|record| record.into_row().match_code)
        .collect();
    Ok(codes.into_iter().collect())
}

impl<F: Fetcher> Extractor<F> {
    /// Fetches the statistics of every staged match that has none saved yet.
    ///
    /// The statistics endpoint answers HTTP 500 for some matches; those are
    /// logged and skipped. Any other failure stops the job.
    ///
    /// # Returns
    ///
    /// The number of documents saved.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-500 fetch failure or malformed JSON.
    pub fn extract_match_stats(&self, tournament: &Tournament) -> Result<usize, PipelineError> {
        let codes: Vec<String> = staged_match_codes(&self.storage, tournament)?;
        if codes.is_empty() {
            info!(tournament = %tournament, "No match codes");
            return Ok(0);
        }

        let relative: String = within(tournament, MATCH_STATS_DIR);
        let existing: BTreeSet<String> = self
            .storage
            .list_stems(&self.storage.dir(Bucket::Raw, &relative), JSON_PATTERN)?;
        let pending: Vec<&String> = codes.iter().filter(|code| !existing.contains(*code)).collect();
        info!(
            tournament = %tournament,
            codes = codes.len(),
            fetched = existing.len(),
            pending = pending.len(),
            "Fetching match statistics"
        );

        let mut saved: usize = 0;
        let mut skipped: usize = 0;
        for code in pending {
            let request: FetchRequest = FetchRequest::json(match_stats_url(
                tournament.year(),
                tournament.tournament_id(),
                code,
            ))
            .with_header("Referer", STATS_REFERER)
            .with_header("Origin", STATS_REFERER.trim_end_matches('/'));

            let document: Value = match self.fetch_json(&request) {
                Ok(document) => document,
                Err(PipelineError::Fetch(err)) if err.is_server_error() => {
                    warn!(tournament = %tournament, match_code = %code, "Statistics server error; skipping");
                    skipped += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };
            let target: PathBuf =
                self.storage
                    .build_path(Bucket::Raw, &relative, &format!("{code}.json"), None);
            self.storage.save_json(&target, &document)?;
            saved += 1;
        }

        info!(tournament = %tournament, saved, skipped, "Fetched match statistics");
        Ok(saved)
    }
}

impl Stager {
    /// Stages every raw statistics document that has no staged table yet.
    ///
    /// # Returns
    ///
    /// The number of match tables written.
    ///
    /// # Errors
    ///
    /// Returns an error if a document does not parse or a row fails
    /// validation.
    pub fn stage_match_stats(&self, tournament: &Tournament) -> Result<usize, PipelineError> {
        let relative: String = within(tournament, MATCH_STATS_DIR);
        let documents: Vec<PathBuf> = self
            .storage
            .list_files(&self.storage.dir(Bucket::Raw, &relative), JSON_PATTERN)?;
        if documents.is_empty() {
            info!(tournament = %tournament, "No match statistics documents");
            return Ok(0);
        }

        let staged: BTreeSet<String> = self
            .storage
            .list_stems(&self.storage.dir(Bucket::Stage, &relative), TABLE_PATTERN)?;
        let mut written: usize = 0;
        for path in &documents {
            let Some(code) = path.file_stem().and_then(OsStr::to_str) else {
                continue;
            };
            if staged.contains(code) {
                continue;
            }
            let json: String = self.storage.read_text(path)?;
            let records: Vec<MatchStatsRecord> =
                parse_match_stats(&json, code, tournament.tournament_id(), tournament.year())?
                    .into_iter()
                    .map(|row| MatchStatsRecord::new(row, &self.corrections))
                    .collect::<Result<_, _>>()?;
            if records.is_empty() {
                debug!(tournament = %tournament, match_code = code, "No statistics in document");
                continue;
            }
            let target: PathBuf =
                self.storage
                    .build_path(Bucket::Stage, &relative, &table_name(code), None);
            self.storage.save_table(&target, &records)?;
            written += 1;
        }

        info!(
            tournament = %tournament,
            documents = documents.len(),
            written,
            "Staged match statistics"
        );
        Ok(written)
    }

    /// Combines the per-match tables into the tournament statistics table.
    ///
    /// # Returns
    ///
    /// The table written, or `None` when nothing is staged yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a staged table cannot be read or a row fails
    /// validation.
    pub fn consolidate_match_stats(&self, tournament: &Tournament) -> Result<Option<PathBuf>, PipelineError> {
        let relative: String = within(tournament, MATCH_STATS_DIR);
        let tables: Vec<PathBuf> = self
            .storage
            .list_files(&self.storage.dir(Bucket::Stage, &relative), TABLE_PATTERN)?;
        if tables.is_empty() {
            warn!(tournament = %tournament, "No staged match statistics to consolidate");
            return Ok(None);
        }

        let mut staged: Vec<MatchStatsRecord> = Vec::new();
        for table in &tables {
            staged.extend(self.storage.read_table::<MatchStatsRecord>(table)?);
        }
        let records: Vec<MatchStatsRecord> = consolidate_match_stats(staged, &self.corrections)?;

        let target: PathBuf =
            self.storage
                .build_path(Bucket::Stage, &tournament.path(), MATCH_STATS_TABLE, None);
        self.storage.save_table(&target, &records)?;
        info!(
            tournament = %tournament,
            matches = tables.len(),
            rows = records.len(),
            "Consolidated match statistics"
        );
        Ok(Some(target))
    }
}
