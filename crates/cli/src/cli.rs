// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use courtdata_domain::{PlayerIdCorrections, Tournament};
use courtdata_pipeline::{
    DEFAULT_DOMAIN, DEFAULT_RANKINGS_START_YEAR, DEFAULT_TIMEOUT, HttpFetcher, Pipeline,
    PipelineConfig, Stager, stage_all, stage_tournament,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_log::AsTrace;

#[derive(Debug, Parser)]
#[command(name = "courtdata", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Root of the data tree
    #[arg(long, global = true, default_value = "./data")]
    pub data_root: PathBuf,

    /// Data-source domain, the first path segment under each tier
    #[arg(long, global = true, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// First year of ranking weeks to fetch
    #[arg(long, global = true, default_value_t = DEFAULT_RANKINGS_START_YEAR)]
    pub rankings_start_year: u16,

    /// Seconds before an upstream request is abandoned
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Stage and consolidate one tournament from its raw files
    #[command(visible_alias = "s")]
    Stage {
        /// Tournament id
        #[arg(long)]
        tournament_id: u32,

        /// Edition year
        #[arg(long)]
        year: u16,
    },

    /// Stage every tournament that has a raw overview
    #[command(visible_alias = "sa")]
    StageAll,

    /// Stage every raw rankings page without a staged table
    #[command(visible_alias = "r")]
    Rankings,

    /// Fetch, stage and consolidate one tournament
    #[command(visible_alias = "rt")]
    RunTournament {
        /// Tournament id
        #[arg(long)]
        tournament_id: u32,

        /// Edition year
        #[arg(long)]
        year: u16,
    },

    /// Fetch, stage and consolidate every tournament in the live feed
    #[command(visible_alias = "ra")]
    RunActive,

    /// Fetch ranking weeks from the start year on, then stage them
    #[command(visible_alias = "fr")]
    FetchRankings,
}

impl Args {
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    /// The pipeline settings selected by the flags.
    #[must_use]
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig {
            data_root: self.data_root.clone(),
            domain: self.domain.clone(),
            rankings_start_year: self.rankings_start_year,
            ..PipelineConfig::default()
        }
    }

    /// The upstream request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Runs the selected command over the data tree.
    ///
    /// `stage`, `stage-all` and `rankings` work offline on the raw tier; the
    /// `run-*` and `fetch-rankings` commands fetch first.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or staging error, with the command's context
    /// attached.
    pub fn run(self) -> Result<()> {
        let config: PipelineConfig = self.config();
        let timeout: Duration = self.timeout();
        debug!(?config, ?timeout, "Configuration");

        match self.command {
            Command::Stage {
                tournament_id,
                year,
            } => stage(&stager(&config), tournament_id, year),
            Command::StageAll => {
                let staged: Vec<Tournament> = stage_all(&stager(&config))
                    .wrap_err("Failed to stage the extracted tournaments")?;
                info!(count = staged.len(), "Stage-all complete");
                Ok(())
            }
            Command::Rankings => {
                let written: usize = stager(&config)
                    .stage_rankings()
                    .wrap_err("Failed to stage rankings pages")?;
                info!(written, "Rankings staging complete");
                Ok(())
            }
            Command::RunTournament {
                tournament_id,
                year,
            } => {
                let tournament: Tournament = pipeline(&config, timeout)?
                    .run_tournament(tournament_id, year)
                    .wrap_err_with(|| {
                        format!("Failed to run tournament {tournament_id} ({year})")
                    })?;
                info!(tournament = %tournament, "Run complete");
                Ok(())
            }
            Command::RunActive => {
                let run: Vec<Tournament> = pipeline(&config, timeout)?
                    .run_active()
                    .wrap_err("Failed to run the active tournaments")?;
                info!(count = run.len(), "Active run complete");
                Ok(())
            }
            Command::FetchRankings => {
                let (fetched, staged): (usize, usize) = pipeline(&config, timeout)?
                    .run_rankings()
                    .wrap_err_with(|| {
                        format!("Failed to fetch rankings from {}", config.rankings_start_year)
                    })?;
                info!(fetched, staged, "Rankings run complete");
                Ok(())
            }
        }
    }
}

fn stager(config: &PipelineConfig) -> Stager {
    Stager::new(config.storage(), PlayerIdCorrections::builtin())
}

fn pipeline(config: &PipelineConfig, timeout: Duration) -> Result<Pipeline<HttpFetcher>> {
    let fetcher: HttpFetcher =
        HttpFetcher::new(timeout).wrap_err("Failed to build the HTTP client")?;
    Ok(Pipeline::new(config, fetcher, PlayerIdCorrections::builtin()))
}

fn stage(stager: &Stager, tournament_id: u32, year: u16) -> Result<()> {
    let tournament: Tournament = stager
        .load_tournament(tournament_id, year)
        .wrap_err_with(|| format!("Failed to load tournament {tournament_id} ({year})"))?;
    stage_tournament(stager, &tournament)
        .wrap_err_with(|| format!("Failed to stage {tournament}"))?;
    info!(tournament = %tournament, "Staging complete");
    Ok(())
}
