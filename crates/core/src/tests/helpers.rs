// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDateTime;
use courtdata_domain::{
    MatchStatsRecord, MatchStatsRow, PlayerIdCorrections, Round, StagedScheduleRecord,
    StagedScheduleRow,
};

pub fn datetime(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// A determined singles entry confirmed for 11:30 on day 1, Court 1, slot 1.
pub fn staged_row() -> StagedScheduleRow {
    StagedScheduleRow {
        snapshot_datetime: datetime("2026-02-06 10:00:00"),
        tournament_id: 375,
        year: 2026,
        match_date_str: Some(String::from("2026-02-06")),
        start_time_str: Some(String::from("2026-02-06 11:30:00")),
        time_suffix: Some(String::from("Starts At")),
        tournament_day: Some(1),
        court_name: Some(String::from("Court 1")),
        court_match_num: 1,
        round_text: String::from("R16"),
        is_doubles: false,
        p1_id: Some(String::from("AB12")),
        p1_name: Some(String::from("A. Player")),
        p2_id: Some(String::from("CD34")),
        p2_name: Some(String::from("C. Opponent")),
        ..StagedScheduleRow::default()
    }
}

/// A `Followed By` entry without a published time.
pub fn followed_by(court_match_num: u32, p1: &str, p2: &str, round: &str) -> StagedScheduleRow {
    StagedScheduleRow {
        court_match_num,
        p1_id: Some(p1.to_string()),
        p2_id: Some(p2.to_string()),
        round_text: round.to_string(),
        start_time_str: None,
        time_suffix: Some(String::from("Followed By")),
        ..staged_row()
    }
}

pub fn staged(rows: Vec<StagedScheduleRow>) -> Vec<StagedScheduleRecord> {
    rows.into_iter()
        .map(|row| StagedScheduleRecord::new(row, &PlayerIdCorrections::builtin()).unwrap())
        .collect()
}

/// A singles statistics row for `player` against `opponent` in one set.
pub fn stats_row(
    match_code: &str,
    set_num: u8,
    player: &str,
    opponent: &str,
    set_score: Option<u8>,
    tiebreak_score: Option<u8>,
) -> MatchStatsRow {
    MatchStatsRow {
        tournament_id: 375,
        year: 2026,
        match_code: match_code.to_string(),
        round: Some(Round::QuarterFinal),
        set_num,
        set_score,
        tiebreak_score,
        player_id: player.to_string(),
        opponent_id: opponent.to_string(),
        ..MatchStatsRow::default()
    }
}

pub fn stats_records(rows: Vec<MatchStatsRow>) -> Vec<MatchStatsRecord> {
    rows.into_iter()
        .map(|row| MatchStatsRecord::new(row, &PlayerIdCorrections::builtin()).unwrap())
        .collect()
}
