// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ParseError, parse_match_stats};
use chrono::NaiveDate;
use courtdata_domain::{MatchStatsRecord, MatchStatsRow, PlayerIdCorrections, Round};
use serde_json::{Value, json};

fn ratio(dividend: u32, divisor: u32, percent: f64) -> Value {
    json!({ "Number": null, "Dividend": dividend, "Divisor": divisor, "Percent": percent })
}

fn number(n: f64) -> Value {
    json!({ "Number": n })
}

fn stats(aces: u32, time: &str) -> Value {
    json!({
        "Time": time,
        "ServiceStats": {
            "ServiceGamesPlayed": number(5.0),
            "ServeRating": number(287.5),
            "Aces": number(f64::from(aces)),
            "DoubleFaults": number(1.0),
            "FirstServe": ratio(20, 30, 67.0),
            "FirstServePointsWon": ratio(15, 20, 75.0),
            "SecondServePointsWon": ratio(6, 10, 60.0),
            "BreakPointsSaved": ratio(2, 3, 67.0)
        },
        "ReturnStats": {
            "ReturnGamesPlayed": number(5.0),
            "ReturnRating": number(120.0),
            "FirstServeReturnPointsWon": ratio(8, 25, 32.0),
            "SecondServeReturnPointsWon": ratio(5, 9, 56.0),
            "BreakPointsConverted": ratio(1, 4, 25.0)
        },
        "PointStats": {
            "TotalServicePointsWon": ratio(21, 30, 70.0),
            "TotalReturnPointsWon": ratio(13, 34, 38.0),
            "TotalPointsWon": ratio(34, 64, 53.0)
        }
    })
}

fn person(id: &str, first: &str, last: &str) -> Value {
    json!({ "PlayerId": id, "PlayerFirstName": first, "PlayerLastName": last })
}

fn document(round_name: &str, is_doubles: bool) -> Value {
    let partner = |id: &str, first: &str, last: &str| {
        if is_doubles {
            person(id, first, last)
        } else {
            Value::Null
        }
    };
    json!({
        "Tournament": {
            "Court": "Hard",
            "StartDate": "2026-02-02T00:00:00",
            "EndDate": "2026-02-08T00:00:00"
        },
        "Match": {
            "RoundName": round_name,
            "IsDoubles": is_doubles,
            "IsQualifier": false,
            "CourtName": "Court Central",
            "NumberOfSets": 3,
            "ScoringSystem": "3_6G_7TB",
            "Reason": null,
            "DateSeq": "5",
            "MatchTime": "01:30:00",
            "UmpireFirstName": "John",
            "UmpireLastName": "Doe",
            "WinningPlayerId": "ab12",
            "PlayerTeam1": { "PlayerId": "AB12", "SeedPlayerTeam": 1, "EntryStatusPlayerTeam": null },
            "PlayerTeam2": { "PlayerId": "CD34", "SeedPlayerTeam": "", "EntryStatusPlayerTeam": "WC" },
            "PlayerTeam": {
                "Player": person("ab12", "Alex", "Player"),
                "Partner": partner("ef56", "Eli", "Partner"),
                "SetScores": [
                    { "SetNumber": 0, "SetScore": null, "TieBreakScore": null, "Stats": stats(7, "01:30:00") },
                    { "SetNumber": 1, "SetScore": 6, "TieBreakScore": null, "Stats": stats(3, "00:40:00") },
                    { "SetNumber": 2, "SetScore": 7, "TieBreakScore": null, "Stats": stats(4, "00:50:00") },
                    { "SetNumber": 3, "SetScore": null, "TieBreakScore": null, "Stats": {} }
                ]
            },
            "OpponentTeam": {
                "Player": person("cd34", "Chris", "Opponent"),
                "Partner": partner("gh78", "Gil", "Other"),
                "SetScores": [
                    { "SetNumber": 0, "SetScore": null, "TieBreakScore": null, "Stats": stats(2, "01:30:00") },
                    { "SetNumber": 1, "SetScore": 4, "TieBreakScore": null, "Stats": stats(1, "00:40:00") },
                    { "SetNumber": 2, "SetScore": 6, "TieBreakScore": 5, "Stats": stats(1, "00:50:00") },
                    { "SetNumber": 3, "SetScore": null, "TieBreakScore": null, "Stats": null }
                ]
            }
        }
    })
}

fn parse(doc: &Value) -> Vec<MatchStatsRow> {
    parse_match_stats(&doc.to_string(), "ms001", 375, 2026).unwrap()
}

#[test]
fn test_rows_per_player_per_set() {
    let rows: Vec<MatchStatsRow> = parse(&document("Quarterfinals", false));
    assert_eq!(rows.len(), 6);
    let players: Vec<(&str, u8)> = rows.iter().map(|r| (r.player_id.as_str(), r.set_num)).collect();
    assert_eq!(
        players,
        vec![("ab12", 0), ("ab12", 1), ("ab12", 2), ("cd34", 0), ("cd34", 1), ("cd34", 2)]
    );
}

#[test]
fn test_match_columns() {
    let rows: Vec<MatchStatsRow> = parse(&document("Quarterfinals", false));
    let row: &MatchStatsRow = &rows[0];
    assert_eq!(row.round, Some(Round::QuarterFinal));
    assert_eq!(row.surface.as_deref(), Some("Hard"));
    assert_eq!(row.tournament_start_date, NaiveDate::from_ymd_opt(2026, 2, 2));
    assert_eq!(row.tournament_end_date, NaiveDate::from_ymd_opt(2026, 2, 8));
    assert_eq!(row.court_name.as_deref(), Some("Court Central"));
    assert_eq!(row.best_of, Some(3));
    assert_eq!(row.tournament_day, Some(5));
    assert_eq!(row.match_duration_seconds, Some(5400));
    assert_eq!(row.umpire.as_deref(), Some("John Doe"));
    assert_eq!(row.reason, None);
    assert_eq!(row.match_code, "ms001");
}

#[test]
fn test_player_perspectives() {
    let rows: Vec<MatchStatsRow> = parse(&document("Quarterfinals", false));
    let winner: &MatchStatsRow = &rows[1];
    assert!(winner.is_winner);
    assert_eq!(winner.player_name.as_deref(), Some("Alex Player"));
    assert_eq!(winner.opponent_id, "cd34");
    assert_eq!(winner.player_seed, Some(1));
    assert_eq!(winner.player_entry, None);
    assert_eq!(winner.opponent_seed, None);
    assert_eq!(winner.opponent_entry.as_deref(), Some("WC"));
    assert_eq!(winner.set_score, Some(6));
    assert_eq!(winner.set_duration_seconds, Some(2400));

    let loser: &MatchStatsRow = &rows[5];
    assert!(!loser.is_winner);
    assert_eq!(loser.player_id, "cd34");
    assert_eq!(loser.opponent_seed, Some(1));
    assert_eq!(loser.tiebreak_score, Some(5));
    assert_eq!(loser.player_partner_id, None);
}

#[test]
fn test_counters_flattened() {
    let rows: Vec<MatchStatsRow> = parse(&document("Quarterfinals", false));
    let row: &MatchStatsRow = &rows[0];
    assert_eq!(row.svc_aces, Some(7));
    assert_eq!(row.svc_games_played, Some(5));
    assert_eq!(row.svc_rating, Some(287.5));
    assert_eq!(row.svc_first_serve_in, Some(20));
    assert_eq!(row.svc_first_serve_att, Some(30));
    assert_eq!(row.svc_first_serve_in_pct, Some(67.0));
    assert_eq!(row.svc_bp_faced, Some(3));
    assert_eq!(row.ret_bp_opportunities, Some(4));
    assert_eq!(row.pts_total_won, Some(34));
    assert_eq!(row.pts_total_played, Some(64));
    assert_eq!(row.sets_played, None);
    assert_eq!(row.won_set, None);
}

#[test]
fn test_doubles_partners() {
    let rows: Vec<MatchStatsRow> = parse(&document("Final", true));
    let row: &MatchStatsRow = &rows[0];
    assert!(row.is_doubles);
    assert_eq!(row.player_partner_id.as_deref(), Some("ef56"));
    assert_eq!(row.player_partner_name.as_deref(), Some("Eli Partner"));
    assert_eq!(row.opponent_partner_id.as_deref(), Some("gh78"));

    let record: MatchStatsRecord =
        MatchStatsRecord::new(row.clone(), &PlayerIdCorrections::builtin()).unwrap();
    assert_eq!(record.row().match_uid, "2026_375_DBL_F_AB12_CD34");
}

#[test]
fn test_unknown_round_is_an_error() {
    let result: Result<Vec<MatchStatsRow>, ParseError> =
        parse_match_stats(&document("Exhibition", false).to_string(), "ms001", 375, 2026);
    assert!(matches!(result, Err(ParseError::Domain(_))));
}

#[test]
fn test_umpire_requires_both_names() {
    let mut doc: Value = document("Quarterfinals", false);
    doc["Match"]["UmpireLastName"] = Value::Null;
    let rows: Vec<MatchStatsRow> = parse(&doc);
    assert_eq!(rows[0].umpire, None);
}

#[test]
fn test_invalid_json() {
    let result: Result<Vec<MatchStatsRow>, ParseError> =
        parse_match_stats("not json", "ms001", 375, 2026);
    assert!(matches!(result, Err(ParseError::Json { .. })));
}
