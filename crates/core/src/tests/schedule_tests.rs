// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{datetime, followed_by, staged, staged_row};
use crate::{CoreError, ScheduleConsolidation, consolidate_schedule, resolve_start_time};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use courtdata_domain::{
    DomainError, PlayerIdCorrections, Round, ScheduleRecord, ScheduleRow, StagedScheduleRow,
};

fn consolidate(rows: Vec<StagedScheduleRow>) -> ScheduleConsolidation {
    consolidate_schedule(staged(rows), &PlayerIdCorrections::builtin()).unwrap()
}

fn row_for(consolidation: &ScheduleConsolidation, round: Round) -> &ScheduleRow {
    consolidation
        .records
        .iter()
        .map(ScheduleRecord::row)
        .find(|r| r.round == round)
        .unwrap()
}

#[test]
fn test_basic_consolidation() {
    let result: ScheduleConsolidation = consolidate(vec![staged_row()]);
    assert_eq!(result.records.len(), 1);
    let row: &ScheduleRow = result.records[0].row();
    assert_eq!(row.p1_id, "AB12");
    assert_eq!(row.round, Round::R16);
    assert_eq!(row.match_date, NaiveDate::from_ymd_opt(2026, 2, 6));
    assert_eq!(row.start_time_utc, Some(datetime("2026-02-06 11:30:00")));
    assert!(!row.time_estimated);
    assert_eq!(row.match_uid, "2026_375_SGL_R16_AB12_CD34");
}

#[test]
fn test_undetermined_matches_dropped() {
    let tbd: StagedScheduleRow = StagedScheduleRow {
        p1_id: None,
        p1_name: None,
        p2_id: None,
        p2_name: None,
        court_match_num: 2,
        round_text: String::from("SF"),
        start_time_str: None,
        time_suffix: Some(String::from("Followed By")),
        ..staged_row()
    };
    let result: ScheduleConsolidation = consolidate(vec![staged_row(), tbd]);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.undetermined, 1);
    assert_eq!(result.records[0].row().p1_id, "AB12");
}

#[test]
fn test_all_undetermined_gives_no_records() {
    let tbd: StagedScheduleRow = StagedScheduleRow {
        p1_id: None,
        p2_id: None,
        ..staged_row()
    };
    let result: ScheduleConsolidation = consolidate(vec![tbd]);
    assert!(result.records.is_empty());
}

#[test]
fn test_no_staged_entries() {
    let result: ScheduleConsolidation = consolidate(Vec::new());
    assert!(result.records.is_empty());
    assert_eq!(result.undetermined, 0);
    assert_eq!(result.superseded, 0);
}

#[test]
fn test_dedup_keeps_latest_snapshot() {
    let newer: StagedScheduleRow = StagedScheduleRow {
        snapshot_datetime: datetime("2026-02-06 12:00:00"),
        court_name: Some(String::from("Court B")),
        ..staged_row()
    };
    let older: StagedScheduleRow = StagedScheduleRow {
        snapshot_datetime: datetime("2026-02-06 08:00:00"),
        court_name: Some(String::from("Court A")),
        ..staged_row()
    };
    let result: ScheduleConsolidation = consolidate(vec![newer, older]);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.superseded, 1);
    assert_eq!(result.records[0].row().court_name.as_deref(), Some("Court B"));
}

#[test]
fn test_consolidation_is_idempotent() {
    let rows: Vec<StagedScheduleRow> = vec![
        staged_row(),
        followed_by(2, "EE55", "FF66", "QF"),
        StagedScheduleRow {
            snapshot_datetime: datetime("2026-02-06 09:00:00"),
            court_name: Some(String::from("Court 2")),
            ..staged_row()
        },
    ];
    let first: ScheduleConsolidation = consolidate(rows.clone());
    let second: ScheduleConsolidation = consolidate(rows);
    assert_eq!(first, second);
}

#[test]
fn test_not_before_is_estimated_with_time() {
    let row: StagedScheduleRow = StagedScheduleRow {
        time_suffix: Some(String::from("Not Before")),
        ..staged_row()
    };
    let result: ScheduleConsolidation = consolidate(vec![row]);
    let row: &ScheduleRow = result.records[0].row();
    assert!(row.time_estimated);
    assert_eq!(row.start_time_utc, Some(datetime("2026-02-06 11:30:00")));
}

#[test]
fn test_followed_by_chains_from_predecessors() {
    let result: ScheduleConsolidation = consolidate(vec![
        followed_by(3, "GG77", "HH88", "SF"),
        StagedScheduleRow {
            p1_id: Some(String::from("AA11")),
            p2_id: Some(String::from("BB22")),
            ..staged_row()
        },
        followed_by(2, "CC33", "DD44", "QF"),
    ]);
    let start: NaiveDateTime = datetime("2026-02-06 11:30:00");
    let second: &ScheduleRow = row_for(&result, Round::QuarterFinal);
    let third: &ScheduleRow = row_for(&result, Round::SemiFinal);
    assert!(second.time_estimated);
    assert_eq!(second.start_time_utc, Some(start + TimeDelta::hours(2)));
    assert_eq!(third.start_time_utc, Some(start + TimeDelta::hours(4)));

    let slots: Vec<u32> = result
        .records
        .iter()
        .map(|r| r.row().court_match_num)
        .collect();
    assert_eq!(slots, vec![1, 2, 3]);
}

#[test]
fn test_followed_by_without_predecessor_stays_empty() {
    let result: ScheduleConsolidation = consolidate(vec![followed_by(3, "AB12", "CD34", "R16")]);
    let row: &ScheduleRow = result.records[0].row();
    assert_eq!(row.start_time_utc, None);
    assert!(row.time_estimated);
}

#[test]
fn test_doubles_predecessor_uses_doubles_estimate() {
    let doubles: StagedScheduleRow = StagedScheduleRow {
        is_doubles: true,
        p1_id: Some(String::from("AA11")),
        p1_partner_id: Some(String::from("BB22")),
        p1_partner_name: Some(String::from("B. Two")),
        p2_id: Some(String::from("CC33")),
        p2_partner_id: Some(String::from("DD44")),
        p2_partner_name: Some(String::from("D. Four")),
        ..staged_row()
    };
    let result: ScheduleConsolidation =
        consolidate(vec![doubles, followed_by(2, "EE55", "FF66", "QF")]);
    let next: &ScheduleRow = row_for(&result, Round::QuarterFinal);
    assert_eq!(
        next.start_time_utc,
        Some(datetime("2026-02-06 11:30:00") + TimeDelta::minutes(90))
    );
}

#[test]
fn test_estimates_do_not_cross_days() {
    let day2: StagedScheduleRow = StagedScheduleRow {
        tournament_day: Some(2),
        match_date_str: Some(String::from("2026-02-07")),
        ..followed_by(2, "CC33", "DD44", "QF")
    };
    let result: ScheduleConsolidation = consolidate(vec![staged_row(), day2]);
    assert_eq!(row_for(&result, Round::QuarterFinal).start_time_utc, None);
}

#[test]
fn test_estimates_do_not_cross_courts() {
    let other_court: StagedScheduleRow = StagedScheduleRow {
        court_name: Some(String::from("Court 2")),
        ..followed_by(2, "CC33", "DD44", "QF")
    };
    let result: ScheduleConsolidation = consolidate(vec![staged_row(), other_court]);
    assert_eq!(row_for(&result, Round::QuarterFinal).start_time_utc, None);
}

#[test]
fn test_confirmed_time_missing_is_an_error() {
    let row: StagedScheduleRow = StagedScheduleRow {
        start_time_str: None,
        ..staged_row()
    };
    let result: Result<ScheduleConsolidation, CoreError> =
        consolidate_schedule(staged(vec![row]), &PlayerIdCorrections::builtin());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::MissingStartTime { .. }))
    ));
}

#[test]
fn test_unreadable_time_is_an_error() {
    let row: StagedScheduleRow = StagedScheduleRow {
        start_time_str: Some(String::from("half past eleven")),
        ..staged_row()
    };
    let result: Result<(Option<NaiveDateTime>, bool), CoreError> = resolve_start_time(&row);
    assert!(matches!(result, Err(CoreError::InvalidTimestamp { .. })));
}

#[test]
fn test_iso_start_time_accepted() {
    let row: StagedScheduleRow = StagedScheduleRow {
        start_time_str: Some(String::from("2026-02-06T11:30:00")),
        ..staged_row()
    };
    let (start, estimated): (Option<NaiveDateTime>, bool) = resolve_start_time(&row).unwrap();
    assert_eq!(start, Some(datetime("2026-02-06 11:30:00")));
    assert!(!estimated);
}

#[test]
fn test_unknown_round_is_an_error() {
    let row: StagedScheduleRow = StagedScheduleRow {
        round_text: String::from("Exhibition"),
        ..staged_row()
    };
    let result: Result<ScheduleConsolidation, CoreError> =
        consolidate_schedule(staged(vec![row]), &PlayerIdCorrections::builtin());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::UnknownRound(_)))
    ));
}
