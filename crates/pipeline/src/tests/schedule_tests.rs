// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{FakeFetcher, TOURNAMENT_PATH, extractor, schedule_page, stager, storage, tournament};
use crate::{PipelineError, schedule_url};
use courtdata_domain::{ScheduleRecord, StagedScheduleRecord};
use courtdata_persistence::{Bucket, Storage};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_snapshot(dir: &TempDir, stem: &str, html: &str) {
    let storage: Storage = storage(dir);
    let path: PathBuf = storage.build_path(
        Bucket::Raw,
        &format!("{TOURNAMENT_PATH}/schedule"),
        &format!("{stem}.html"),
        None,
    );
    storage.save_text(&path, html).unwrap();
}

fn staged_stems(dir: &TempDir) -> Vec<String> {
    let storage: Storage = storage(dir);
    storage
        .list_stems(
            &storage.dir(Bucket::Stage, &format!("{TOURNAMENT_PATH}/schedule")),
            "*.csv",
        )
        .unwrap()
        .into_iter()
        .collect()
}

#[test]
fn test_extract_schedule_saves_timestamped_snapshot() {
    let dir: TempDir = TempDir::new().unwrap();
    let fetcher: FakeFetcher =
        FakeFetcher::new().with(schedule_url(&tournament()), schedule_page("ab12", "cd34"));

    let saved: PathBuf = extractor(&dir, &fetcher).extract_schedule(&tournament()).unwrap();

    assert!(saved.ends_with(format!("{TOURNAMENT_PATH}/schedule/schedule_20260206_100000.html")));
    assert!(saved.is_file());
}

#[test]
fn test_stage_schedule_only_processes_new_snapshots() {
    let dir: TempDir = TempDir::new().unwrap();
    write_snapshot(&dir, "schedule_20260206_080000", &schedule_page("ab12", "cd34"));

    assert_eq!(stager(&dir).stage_schedule(&tournament()).unwrap(), 1);
    assert_eq!(stager(&dir).stage_schedule(&tournament()).unwrap(), 0);

    write_snapshot(&dir, "schedule_20260206_120000", &schedule_page("ab12", "cd34"));
    assert_eq!(stager(&dir).stage_schedule(&tournament()).unwrap(), 1);
    assert_eq!(
        staged_stems(&dir),
        vec!["schedule_20260206_080000", "schedule_20260206_120000"]
    );
}

#[test]
fn test_staged_snapshot_keeps_snapshot_time() {
    let dir: TempDir = TempDir::new().unwrap();
    write_snapshot(&dir, "schedule_20260206_080000", &schedule_page("ab12", "cd34"));
    stager(&dir).stage_schedule(&tournament()).unwrap();

    let storage: Storage = storage(&dir);
    let table: PathBuf = storage.build_path(
        Bucket::Stage,
        &format!("{TOURNAMENT_PATH}/schedule"),
        "schedule_20260206_080000.csv",
        None,
    );
    let records: Vec<StagedScheduleRecord> = storage.read_table(&table).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].row().snapshot_datetime.to_string(),
        "2026-02-06 08:00:00"
    );
    assert_eq!(records[0].row().p1_id.as_deref(), Some("AB12"));
}

#[test]
fn test_snapshot_without_matches_writes_nothing() {
    let dir: TempDir = TempDir::new().unwrap();
    write_snapshot(&dir, "schedule_20260206_080000", "<html><body></body></html>");

    assert_eq!(stager(&dir).stage_schedule(&tournament()).unwrap(), 0);
    assert!(staged_stems(&dir).is_empty());
}

#[test]
fn test_unreadable_snapshot_stem_is_fatal() {
    let dir: TempDir = TempDir::new().unwrap();
    write_snapshot(&dir, "schedule_latest", &schedule_page("ab12", "cd34"));

    let result: Result<usize, PipelineError> = stager(&dir).stage_schedule(&tournament());
    assert!(matches!(result, Err(PipelineError::Parse(_))));
}

#[test]
fn test_consolidate_keeps_latest_snapshot() {
    let dir: TempDir = TempDir::new().unwrap();
    write_snapshot(&dir, "schedule_20260206_080000", &schedule_page("ab12", "cd34"));
    write_snapshot(&dir, "schedule_20260206_120000", &schedule_page("ab12", "cd34"));
    stager(&dir).stage_schedule(&tournament()).unwrap();

    let table: PathBuf = stager(&dir)
        .consolidate_schedule(&tournament())
        .unwrap()
        .unwrap();

    let records: Vec<ScheduleRecord> = storage(&dir).read_table(&table).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].match_uid(), "2026_375_SGL_QF_AB12_CD34");
    assert_eq!(
        records[0].row().snapshot_datetime.to_string(),
        "2026-02-06 12:00:00"
    );
    assert!(!records[0].row().time_estimated);
}

#[test]
fn test_consolidate_without_staged_snapshots() {
    let dir: TempDir = TempDir::new().unwrap();
    assert_eq!(stager(&dir).consolidate_schedule(&tournament()).unwrap(), None);
}

/// Stages and consolidates, returning the consolidated table's bytes.
fn stage_and_consolidate(dir: &TempDir) -> Vec<u8> {
    stager(dir).stage_schedule(&tournament()).unwrap();
    let table: PathBuf = stager(dir)
        .consolidate_schedule(&tournament())
        .unwrap()
        .unwrap();
    std::fs::read(table).unwrap()
}

#[test]
fn test_restaging_schedule_is_byte_identical() {
    let dir: TempDir = TempDir::new().unwrap();
    write_snapshot(&dir, "schedule_20260206_080000", &schedule_page("ab12", "cd34"));
    write_snapshot(&dir, "schedule_20260206_120000", &schedule_page("ab12", "cd34"));

    let first: Vec<u8> = stage_and_consolidate(&dir);
    let staged_dir: PathBuf =
        storage(&dir).dir(Bucket::Stage, &format!("{TOURNAMENT_PATH}/schedule"));
    let snapshot_table: PathBuf = staged_dir.join("schedule_20260206_080000.csv");
    let first_snapshot: Vec<u8> = std::fs::read(&snapshot_table).unwrap();

    std::fs::remove_dir_all(&staged_dir).unwrap();
    let second: Vec<u8> = stage_and_consolidate(&dir);

    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(std::fs::read(&snapshot_table).unwrap(), first_snapshot);
    assert_eq!(stage_and_consolidate(&dir), first);
}
