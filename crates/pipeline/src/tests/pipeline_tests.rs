// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    FakeFetcher, TOURNAMENT_ID, TOURNAMENT_PATH, YEAR, empty_results_page, live_feed,
    overview_json, rankings_dropdown_page, rankings_table_page, result_match, results_page,
    schedule_page, stager, storage, stats_document, tournament,
};
use crate::{
    Pipeline, PipelineConfig, PipelineError, RetryPolicy, live_feed_url, match_stats_url,
    overview_url, rankings_url, results_url, schedule_url, stage_all, stage_tournament,
};
use chrono::NaiveDate;
use courtdata_domain::{Circuit, PlayerIdCorrections, Tournament};
use courtdata_persistence::{Bucket, Storage};
use std::path::PathBuf;
use tempfile::TempDir;

fn pipeline<'a>(dir: &TempDir, fetcher: &'a FakeFetcher) -> Pipeline<&'a FakeFetcher> {
    let config: PipelineConfig = PipelineConfig {
        data_root: dir.path().to_path_buf(),
        retry: RetryPolicy::immediate(0),
        ..PipelineConfig::default()
    };
    Pipeline::new(&config, fetcher, PlayerIdCorrections::builtin())
}

/// Answers every request a full run of the test tournament makes.
fn tournament_fetcher() -> FakeFetcher {
    FakeFetcher::new()
        .with(overview_url(TOURNAMENT_ID), overview_json())
        .with(schedule_url(&tournament()), schedule_page("EF56", "GH78"))
        .with(
            results_url(&tournament(), false),
            results_page(&result_match("ms001", "AB12", "CD34")),
        )
        .with(results_url(&tournament(), true), empty_results_page())
        .with(match_stats_url(YEAR, TOURNAMENT_ID, "ms001"), stats_document("AB12", "CD34"))
}

fn staged(storage: &Storage, filename: &str) -> PathBuf {
    storage.build_path(Bucket::Stage, TOURNAMENT_PATH, filename, None)
}

#[test]
fn test_run_tournament_writes_every_table() {
    let dir: TempDir = TempDir::new().unwrap();
    let fetcher: FakeFetcher = tournament_fetcher();

    let ran: Tournament = pipeline(&dir, &fetcher)
        .run_tournament(TOURNAMENT_ID, YEAR)
        .unwrap();

    assert_eq!(ran, tournament());
    let storage: Storage = storage(&dir);
    for table in ["overview.csv", "schedule.csv", "results.csv", "match_stats.csv"] {
        assert!(staged(&storage, table).is_file(), "{table} was not written");
    }
}

#[test]
fn test_second_run_only_fetches_new_work() {
    let dir: TempDir = TempDir::new().unwrap();
    let fetcher: FakeFetcher = tournament_fetcher();
    let stats_url: String = match_stats_url(YEAR, TOURNAMENT_ID, "ms001");

    pipeline(&dir, &fetcher).run_tournament(TOURNAMENT_ID, YEAR).unwrap();
    pipeline(&dir, &fetcher).run_tournament(TOURNAMENT_ID, YEAR).unwrap();

    assert_eq!(fetcher.count(&overview_url(TOURNAMENT_ID)), 2);
    assert_eq!(fetcher.count(&results_url(&tournament(), false)), 2);
    assert_eq!(fetcher.count(&stats_url), 1);
}

#[test]
fn test_run_tournament_stops_at_first_failure() {
    let dir: TempDir = TempDir::new().unwrap();
    let fetcher: FakeFetcher = FakeFetcher::new().with(overview_url(TOURNAMENT_ID), overview_json());

    let result: Result<Tournament, PipelineError> =
        pipeline(&dir, &fetcher).run_tournament(TOURNAMENT_ID, YEAR);

    assert!(matches!(result, Err(PipelineError::Fetch(_))));
    assert!(staged(&storage(&dir), "overview.csv").is_file());
    assert_eq!(fetcher.count(&results_url(&tournament(), false)), 0);
}

#[test]
fn test_run_active_without_live_tournaments() {
    let dir: TempDir = TempDir::new().unwrap();
    let fetcher: FakeFetcher = FakeFetcher::new()
        .with(live_feed_url(Circuit::Tour), live_feed(&[]))
        .with(live_feed_url(Circuit::Challenger), live_feed(&[]));

    let ran: Vec<Tournament> = pipeline(&dir, &fetcher).run_active().unwrap();

    assert!(ran.is_empty());
    assert_eq!(fetcher.requests().len(), 2);
}

#[test]
fn test_run_active_runs_each_live_tournament() {
    let dir: TempDir = TempDir::new().unwrap();
    let fetcher: FakeFetcher = tournament_fetcher()
        .with(live_feed_url(Circuit::Tour), live_feed(&[(TOURNAMENT_ID, YEAR)]))
        .with(live_feed_url(Circuit::Challenger), live_feed(&[]));

    let ran: Vec<Tournament> = pipeline(&dir, &fetcher).run_active().unwrap();

    assert_eq!(ran, vec![tournament()]);
}

#[test]
fn test_run_rankings() {
    let dir: TempDir = TempDir::new().unwrap();
    let week: NaiveDate = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let fetcher: FakeFetcher = FakeFetcher::new()
        .with(rankings_url(None), rankings_dropdown_page(&["2025-03-03"]))
        .with(rankings_url(Some(week)), rankings_table_page("S0AG"));

    assert_eq!(pipeline(&dir, &fetcher).run_rankings().unwrap(), (1, 1));
    assert_eq!(pipeline(&dir, &fetcher).run_rankings().unwrap(), (0, 0));
}

#[test]
fn test_stage_all_restages_from_raw_tier() {
    let dir: TempDir = TempDir::new().unwrap();
    let fetcher: FakeFetcher = tournament_fetcher();
    pipeline(&dir, &fetcher).run_tournament(TOURNAMENT_ID, YEAR).unwrap();
    std::fs::remove_dir_all(dir.path().join("stage")).unwrap();

    let restaged: Vec<Tournament> = stage_all(&stager(&dir)).unwrap();

    assert_eq!(restaged, vec![tournament()]);
    let storage: Storage = storage(&dir);
    for table in ["overview.csv", "schedule.csv", "results.csv", "match_stats.csv"] {
        assert!(staged(&storage, table).is_file(), "{table} was not restaged");
    }
}

#[test]
fn test_stage_tournament_needs_raw_overview() {
    let dir: TempDir = TempDir::new().unwrap();
    let result: Result<(), PipelineError> = stage_tournament(&stager(&dir), &tournament());
    assert!(matches!(result, Err(PipelineError::Persistence(_))));
}
