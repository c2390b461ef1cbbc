// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PipelineError;
use crate::fetch::{FetchRequest, Fetcher};
use crate::job::{Extractor, Stager};
use crate::layout::{OVERVIEW_JSON, OVERVIEW_TABLE, TOURNAMENTS_DIR};
use crate::urls::overview_url;
use courtdata_domain::{OverviewFields, OverviewRecord, Tournament};
use courtdata_parse::parse_overview;
use courtdata_persistence::Bucket;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

impl<F: Fetcher> Extractor<F> {
    /// Fetches a tournament's overview, saves it to the raw tier and builds
    /// the tournament identity from it.
    ///
    /// The overview is not year specific; `year` selects the edition the
    /// later jobs work on.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails, the document lacks the location
    /// or event type, or the event type is not registered.
    pub fn extract_overview(&self, tournament_id: u32, year: u16) -> Result<Tournament, PipelineError> {
        info!(tournament_id, year, "Fetching overview");
        let document: Value = self.fetch_json(&FetchRequest::json(overview_url(tournament_id)))?;
        let fields: OverviewFields = parse_overview(&document.to_string(), tournament_id)?;
        let tournament: Tournament = Tournament::from_overview(&fields, tournament_id, year)?;

        let target: PathBuf =
            self.storage
                .build_path(Bucket::Raw, &tournament.path(), OVERVIEW_JSON, None);
        self.storage.save_json(&target, &document)?;
        info!(tournament = %tournament, "Built tournament from overview");
        Ok(tournament)
    }
}

/// Reads `(tournament_id, year)` from a raw overview path
/// `.../{circuit}/{id}_{slug}/{year}/overview.json`.
fn overview_identity(path: &Path) -> Option<(u32, u16)> {
    let year_dir: &Path = path.parent()?;
    let year: u16 = year_dir.file_name()?.to_str()?.parse().ok()?;
    let event_dir: &str = year_dir.parent()?.file_name()?.to_str()?;
    let (id, _slug) = event_dir.split_once('_')?;
    Some((id.parse().ok()?, year))
}

impl Stager {
    /// Lists the tournaments that have a raw overview, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if the raw tier cannot be listed.
    pub fn extracted_tournaments(&self) -> Result<Vec<(u32, u16)>, PipelineError> {
        let root: PathBuf = self.storage.dir(Bucket::Raw, TOURNAMENTS_DIR);
        let mut found: Vec<(u32, u16)> = Vec::new();
        for path in self.storage.find_files(&root, OVERVIEW_JSON)? {
            match overview_identity(&path) {
                Some(identity) if !found.contains(&identity) => found.push(identity),
                Some(_) => {}
                None => warn!(path = %path.display(), "Overview outside a tournament path; skipping"),
            }
        }
        Ok(found)
    }

    /// Rebuilds a tournament identity from its raw overview.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::MissingOverview` if no raw overview exists for
    /// the tournament and year, or an error if it does not parse.
    pub fn load_tournament(&self, tournament_id: u32, year: u16) -> Result<Tournament, PipelineError> {
        let root: PathBuf = self.storage.dir(Bucket::Raw, TOURNAMENTS_DIR);
        let path: PathBuf = self
            .storage
            .find_files(&root, OVERVIEW_JSON)?
            .into_iter()
            .find(|path| overview_identity(path) == Some((tournament_id, year)))
            .ok_or(PipelineError::MissingOverview {
                tournament_id,
                year,
            })?;
        let fields: OverviewFields = parse_overview(&self.storage.read_text(&path)?, tournament_id)?;
        Ok(Tournament::from_overview(&fields, tournament_id, year)?)
    }

    /// Stages the overview record of a tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the raw overview is missing or invalid.
    pub fn stage_overview(&self, tournament: &Tournament) -> Result<PathBuf, PipelineError> {
        let path: &str = &tournament.path();
        let source: PathBuf = self.storage.build_path(Bucket::Raw, path, OVERVIEW_JSON, None);
        let fields: OverviewFields =
            parse_overview(&self.storage.read_text(&source)?, tournament.tournament_id())?;
        let record: OverviewRecord = OverviewRecord::from_fields(tournament, &fields)?;

        let target: PathBuf = self.storage.build_path(Bucket::Stage, path, OVERVIEW_TABLE, None);
        self.storage.save_table(&target, &[record])?;
        info!(tournament = %tournament, "Staged overview");
        Ok(target)
    }
}
