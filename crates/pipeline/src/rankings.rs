// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PipelineError;
use crate::fetch::Fetcher;
use crate::job::{Extractor, Stager};
use crate::layout::{RANKINGS_DIR, TABLE_PATTERN, table_name};
use crate::urls::rankings_url;
use chrono::{Datelike, NaiveDate};
use courtdata_domain::RankingsRecord;
use courtdata_parse::{RANKINGS_STEM_PREFIX, parse_ranking_dates, parse_rankings, ranking_date_from_stem};
use courtdata_persistence::Bucket;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::PathBuf;
use tracing::{info, warn};

/// Stem of the raw page for a ranking week.
#[must_use]
pub fn rankings_stem(ranking_date: NaiveDate) -> String {
    format!("{RANKINGS_STEM_PREFIX}{}", ranking_date.format("%Y%m%d"))
}

impl<F: Fetcher> Extractor<F> {
    /// Ranking weeks that already have a raw page.
    ///
    /// # Errors
    ///
    /// Returns an error if a saved page's name has no readable date.
    pub fn fetched_ranking_dates(&self) -> Result<BTreeSet<NaiveDate>, PipelineError> {
        self.storage
            .list_stems(
                &self.storage.dir(Bucket::Raw, RANKINGS_DIR),
                &format!("{RANKINGS_STEM_PREFIX}*.html"),
            )?
            .iter()
            .map(|stem| ranking_date_from_stem(stem).map_err(PipelineError::from))
            .collect()
    }

    /// Fetches the full rankings page of every ranking week from
    /// `start_year` on that has no raw page yet.
    ///
    /// The week list comes from the dropdown of the current rankings page.
    /// A week whose fetch fails is logged and left for the next run.
    ///
    /// # Returns
    ///
    /// The number of pages saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the current page cannot be fetched or has no week
    /// dropdown.
    pub fn extract_rankings(&self, start_year: u16) -> Result<usize, PipelineError> {
        let current: String = self.fetch_text(rankings_url(None))?;
        let available: Vec<NaiveDate> = parse_ranking_dates(&current)?;
        let in_range: Vec<NaiveDate> = available
            .iter()
            .copied()
            .filter(|date| date.year() >= i32::from(start_year))
            .collect();
        let existing: BTreeSet<NaiveDate> = self.fetched_ranking_dates()?;
        let pending: Vec<NaiveDate> = in_range
            .iter()
            .copied()
            .filter(|date| !existing.contains(date))
            .collect();
        info!(
            available = available.len(),
            in_range = in_range.len(),
            start_year,
            fetched = existing.len(),
            pending = pending.len(),
            "Fetching rankings"
        );

        let mut saved: usize = 0;
        for ranking_date in pending {
            let html: String = match self.fetch_text(rankings_url(Some(ranking_date))) {
                Ok(html) => html,
                Err(PipelineError::Fetch(err)) => {
                    warn!(ranking_date = %ranking_date, error = %err, "Rankings page not fetched");
                    continue;
                }
                Err(err) => return Err(err),
            };
            let target: PathBuf = self.storage.build_path(
                Bucket::Raw,
                RANKINGS_DIR,
                &format!("{}.html", rankings_stem(ranking_date)),
                None,
            );
            self.storage.save_text(&target, &html)?;
            saved += 1;
        }
        info!(saved, "Fetched rankings pages");
        Ok(saved)
    }
}

impl Stager {
    /// Stages every raw rankings page that has no staged table yet.
    ///
    /// # Returns
    ///
    /// The number of tables written.
    ///
    /// # Errors
    ///
    /// Returns an error if a page's name has no readable date, the page does
    /// not parse or a row fails validation.
    pub fn stage_rankings(&self) -> Result<usize, PipelineError> {
        let pages: Vec<PathBuf> = self.storage.list_files(
            &self.storage.dir(Bucket::Raw, RANKINGS_DIR),
            &format!("{RANKINGS_STEM_PREFIX}*.html"),
        )?;
        if pages.is_empty() {
            info!("No rankings pages");
            return Ok(0);
        }
        let staged: BTreeSet<String> = self
            .storage
            .list_stems(&self.storage.dir(Bucket::Stage, RANKINGS_DIR), TABLE_PATTERN)?;

        let mut written: usize = 0;
        for path in &pages {
            let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
                continue;
            };
            if staged.contains(stem) {
                continue;
            }
            let ranking_date: NaiveDate = ranking_date_from_stem(stem)?;
            let html: String = self.storage.read_text(path)?;
            let records: Vec<RankingsRecord> = parse_rankings(&html, ranking_date)?
                .into_iter()
                .map(RankingsRecord::new)
                .collect::<Result<_, _>>()?;
            if records.is_empty() {
                warn!(ranking_date = %ranking_date, "Rankings page has no rows");
                continue;
            }
            let target: PathBuf =
                self.storage
                    .build_path(Bucket::Stage, RANKINGS_DIR, &table_name(stem), None);
            self.storage.save_table(&target, &records)?;
            written += 1;
        }
        info!(pages = pages.len(), written, "Staged rankings");
        Ok(written)
    }
}
