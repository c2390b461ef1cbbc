// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PipelineError;
use crate::fetch::Fetcher;
use crate::job::{Extractor, Stager};
use crate::layout::{SCHEDULE_DIR, SCHEDULE_HTML, SCHEDULE_TABLE, TABLE_PATTERN, table_name, within};
use crate::urls::schedule_url;
use chrono::NaiveDateTime;
use courtdata::{ScheduleConsolidation, consolidate_schedule};
use courtdata_domain::{StagedScheduleRecord, Tournament};
use courtdata_parse::{SCHEDULE_STEM_PREFIX, parse_schedule, snapshot_datetime_from_stem};
use courtdata_persistence::{Bucket, Version};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::PathBuf;
use tracing::{debug, info, warn};

impl<F: Fetcher> Extractor<F> {
    /// Saves a new snapshot of the daily schedule, stamped with the run time.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or the write fails.
    pub fn extract_schedule(&self, tournament: &Tournament) -> Result<PathBuf, PipelineError> {
        info!(tournament = %tournament, "Fetching schedule");
        let html: String = self.fetch_text(schedule_url(tournament))?;
        let target: PathBuf = self.storage.build_path(
            Bucket::Raw,
            &within(tournament, SCHEDULE_DIR),
            SCHEDULE_HTML,
            Some(Version::DateTime),
        );
        Ok(self.storage.save_text(&target, &html)?)
    }
}

impl Stager {
    /// Stages every raw schedule snapshot that has no staged table yet.
    ///
    /// A snapshot without any scheduled entries produces no table.
    ///
    /// # Returns
    ///
    /// The number of snapshot tables written.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot's filename has no readable timestamp or
    /// its page does not parse.
    pub fn stage_schedule(&self, tournament: &Tournament) -> Result<usize, PipelineError> {
        let relative: String = within(tournament, SCHEDULE_DIR);
        let pattern: String = format!("{SCHEDULE_STEM_PREFIX}*.html");
        let snapshots: Vec<PathBuf> = self
            .storage
            .list_files(&self.storage.dir(Bucket::Raw, &relative), &pattern)?;
        if snapshots.is_empty() {
            info!(tournament = %tournament, "No schedule snapshots");
            return Ok(0);
        }

        let staged: BTreeSet<String> = self
            .storage
            .list_stems(&self.storage.dir(Bucket::Stage, &relative), TABLE_PATTERN)?;
        let pending: Vec<&PathBuf> = snapshots
            .iter()
            .filter(|path| {
                path.file_stem()
                    .and_then(OsStr::to_str)
                    .is_some_and(|stem| !staged.contains(stem))
            })
            .collect();
        info!(
            tournament = %tournament,
            snapshots = snapshots.len(),
            staged = staged.len(),
            pending = pending.len(),
            "Staging schedule snapshots"
        );

        let mut written: usize = 0;
        for path in pending {
            let stem: &str = path.file_stem().and_then(OsStr::to_str).unwrap_or_default();
            let snapshot: NaiveDateTime = snapshot_datetime_from_stem(stem)?;
            let html: String = self.storage.read_text(path)?;
            let records: Vec<StagedScheduleRecord> = parse_schedule(
                &html,
                tournament.tournament_id(),
                tournament.year(),
                snapshot,
            )?
            .into_iter()
            .map(|row| StagedScheduleRecord::new(row, &self.corrections))
            .collect::<Result<_, _>>()?;

            if records.is_empty() {
                debug!(tournament = %tournament, snapshot = stem, "Snapshot has no scheduled matches");
                continue;
            }
            let target: PathBuf =
                self.storage
                    .build_path(Bucket::Stage, &relative, &table_name(stem), None);
            self.storage.save_table(&target, &records)?;
            written += 1;
        }
        Ok(written)
    }

    /// Consolidates the staged snapshots into the tournament schedule table.
    ///
    /// # Returns
    ///
    /// The table written, or `None` when nothing is staged yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a staged table cannot be read or consolidation
    /// rejects a row.
    pub fn consolidate_schedule(&self, tournament: &Tournament) -> Result<Option<PathBuf>, PipelineError> {
        let relative: String = within(tournament, SCHEDULE_DIR);
        let tables: Vec<PathBuf> = self.storage.list_files(
            &self.storage.dir(Bucket::Stage, &relative),
            &format!("{SCHEDULE_STEM_PREFIX}{TABLE_PATTERN}"),
        )?;
        if tables.is_empty() {
            warn!(tournament = %tournament, "No staged schedule snapshots to consolidate");
            return Ok(None);
        }

        let mut staged: Vec<StagedScheduleRecord> = Vec::new();
        for table in &tables {
            staged.extend(self.storage.read_table::<StagedScheduleRecord>(table)?);
        }
        let consolidation: ScheduleConsolidation = consolidate_schedule(staged, &self.corrections)?;

        let target: PathBuf =
            self.storage
                .build_path(Bucket::Stage, &tournament.path(), SCHEDULE_TABLE, None);
        self.storage.save_table(&target, &consolidation.records)?;
        info!(
            tournament = %tournament,
            snapshots = tables.len(),
            matches = consolidation.records.len(),
            undetermined = consolidation.undetermined,
            superseded = consolidation.superseded,
            "Consolidated schedule"
        );
        Ok(Some(target))
    }
}
