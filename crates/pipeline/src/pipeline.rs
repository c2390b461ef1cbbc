// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::fetch::{Fetcher, RetryingFetcher};
use crate::job::{Extractor, Stager};
use courtdata_domain::{PlayerIdCorrections, Tournament};
use tracing::info;

/// Stages one tournament from its raw files, in dependency order: overview,
/// schedule snapshots and their consolidation, results, then match
/// statistics and their consolidation.
///
/// # Errors
///
/// Returns the first error; later steps do not run.
pub fn stage_tournament(stager: &Stager, tournament: &Tournament) -> Result<(), PipelineError> {
    stager.stage_overview(tournament)?;
    stager.stage_schedule(tournament)?;
    stager.consolidate_schedule(tournament)?;
    stager.stage_results(tournament)?;
    stager.stage_match_stats(tournament)?;
    stager.consolidate_match_stats(tournament)?;
    Ok(())
}

/// Stages every tournament that has a raw overview.
///
/// # Returns
///
/// The tournaments staged.
///
/// # Errors
///
/// Returns the first error; remaining tournaments are not staged.
pub fn stage_all(stager: &Stager) -> Result<Vec<Tournament>, PipelineError> {
    let mut staged: Vec<Tournament> = Vec::new();
    for (tournament_id, year) in stager.extracted_tournaments()? {
        let tournament: Tournament = stager.load_tournament(tournament_id, year)?;
        info!(tournament = %tournament, "Staging tournament");
        stage_tournament(stager, &tournament)?;
        staged.push(tournament);
    }
    info!(count = staged.len(), "Staged tournaments");
    Ok(staged)
}

/// A full pipeline: extraction through a retrying fetcher, then staging.
#[derive(Debug, Clone)]
pub struct Pipeline<F> {
    extractor: Extractor<RetryingFetcher<F>>,
    stager: Stager,
    rankings_start_year: u16,
}

impl<F: Fetcher> Pipeline<F> {
    /// Builds a pipeline over the configured data tree.
    ///
    /// # Arguments
    ///
    /// * `config` - Data tree, domain, rankings range and retry policy
    /// * `fetcher` - The transport; it is wrapped with the retry policy
    /// * `corrections` - The player id correction table
    #[must_use]
    pub fn new(config: &PipelineConfig, fetcher: F, corrections: PlayerIdCorrections) -> Self {
        Self {
            extractor: Extractor::new(config.storage(), RetryingFetcher::new(fetcher, config.retry)),
            stager: Stager::new(config.storage(), corrections),
            rankings_start_year: config.rankings_start_year,
        }
    }

    /// Returns the extractor.
    #[must_use]
    pub const fn extractor(&self) -> &Extractor<RetryingFetcher<F>> {
        &self.extractor
    }

    /// Returns the stager.
    #[must_use]
    pub const fn stager(&self) -> &Stager {
        &self.stager
    }

    /// Extracts and stages one tournament edition.
    ///
    /// Every run saves a new schedule snapshot and refreshes the overview and
    /// results pages; statistics are fetched only for matches without them.
    ///
    /// # Errors
    ///
    /// Returns the first error; later steps do not run.
    pub fn run_tournament(&self, tournament_id: u32, year: u16) -> Result<Tournament, PipelineError> {
        let tournament: Tournament = self.extractor.extract_overview(tournament_id, year)?;
        self.stager.stage_overview(&tournament)?;

        self.extractor.extract_schedule(&tournament)?;
        self.stager.stage_schedule(&tournament)?;
        self.stager.consolidate_schedule(&tournament)?;

        self.extractor.extract_results(&tournament)?;
        self.stager.stage_results(&tournament)?;

        self.extractor.extract_match_stats(&tournament)?;
        self.stager.stage_match_stats(&tournament)?;
        self.stager.consolidate_match_stats(&tournament)?;

        info!(tournament = %tournament, "Tournament run complete");
        Ok(tournament)
    }

    /// Discovers the active tournaments and runs each.
    ///
    /// # Errors
    ///
    /// Returns the first error; remaining tournaments are not run.
    pub fn run_active(&self) -> Result<Vec<Tournament>, PipelineError> {
        let active: Vec<(u32, u16)> = self.extractor.discover_active_tournaments()?;
        if active.is_empty() {
            info!("No active tournaments found");
            return Ok(Vec::new());
        }
        active
            .into_iter()
            .map(|(tournament_id, year)| self.run_tournament(tournament_id, year))
            .collect()
    }

    /// Fetches new ranking weeks and stages every unstaged page.
    ///
    /// # Returns
    ///
    /// The number of pages fetched and the number of tables staged.
    ///
    /// # Errors
    ///
    /// Returns an error if the week list cannot be fetched or a page does not
    /// parse.
    pub fn run_rankings(&self) -> Result<(usize, usize), PipelineError> {
        let fetched: usize = self.extractor.extract_rankings(self.rankings_start_year)?;
        let staged: usize = self.stager.stage_rankings()?;
        Ok((fetched, staged))
    }
}
