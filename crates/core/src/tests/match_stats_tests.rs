// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{stats_records, stats_row};
use crate::{consolidate_match_stats, tiebreak_winner_points};
use courtdata_domain::{MatchStatsRecord, MatchStatsRow, PlayerIdCorrections};

fn consolidate(rows: Vec<MatchStatsRow>) -> Vec<MatchStatsRow> {
    consolidate_match_stats(stats_records(rows), &PlayerIdCorrections::builtin())
        .unwrap()
        .into_iter()
        .map(MatchStatsRecord::into_row)
        .collect()
}

/// A two-set match: 6-4, then 7-6 with the loser on 5 tiebreak points.
fn two_set_match() -> Vec<MatchStatsRow> {
    vec![
        stats_row("ms001", 0, "AB12", "CD34", None, None),
        stats_row("ms001", 1, "AB12", "CD34", Some(6), None),
        stats_row("ms001", 2, "AB12", "CD34", Some(7), None),
        stats_row("ms001", 0, "CD34", "AB12", None, None),
        stats_row("ms001", 1, "CD34", "AB12", Some(4), None),
        stats_row("ms001", 2, "CD34", "AB12", Some(6), Some(5)),
    ]
}

#[test]
fn test_sets_played_is_max_set_number() {
    let mut rows: Vec<MatchStatsRow> = two_set_match();
    rows.push(stats_row("ms002", 0, "EF56", "GH78", None, None));
    rows.push(stats_row("ms002", 1, "EF56", "GH78", Some(6), None));
    let out: Vec<MatchStatsRow> = consolidate(rows);
    assert!(out.iter().filter(|r| r.match_code == "ms001").all(|r| r.sets_played == Some(2)));
    assert!(out.iter().filter(|r| r.match_code == "ms002").all(|r| r.sets_played == Some(1)));
}

#[test]
fn test_won_set() {
    let out: Vec<MatchStatsRow> = consolidate(two_set_match());
    let won: Vec<Option<bool>> = out.iter().map(|r| r.won_set).collect();
    assert_eq!(
        won,
        vec![None, Some(true), Some(true), None, Some(false), Some(false)]
    );
}

#[test]
fn test_tiebreak_points_on_both_sides() {
    let out: Vec<MatchStatsRow> = consolidate(two_set_match());
    let winner: &MatchStatsRow = &out[2];
    let loser: &MatchStatsRow = &out[5];
    assert_eq!(winner.tiebreak_points_won, Some(7));
    assert_eq!(winner.tiebreak_points_played, Some(12));
    assert_eq!(loser.tiebreak_points_won, Some(5));
    assert_eq!(loser.tiebreak_points_played, Some(12));
}

#[test]
fn test_no_tiebreak_leaves_columns_empty() {
    let out: Vec<MatchStatsRow> = consolidate(two_set_match());
    assert_eq!(out[1].tiebreak_points_won, None);
    assert_eq!(out[1].tiebreak_points_played, None);
    assert_eq!(out[0].tiebreak_points_played, None);
}

#[test]
fn test_extended_tiebreak() {
    let rows: Vec<MatchStatsRow> = vec![
        stats_row("ms003", 1, "AB12", "CD34", Some(7), None),
        stats_row("ms003", 1, "CD34", "AB12", Some(6), Some(10)),
    ];
    let out: Vec<MatchStatsRow> = consolidate(rows);
    assert_eq!(out[0].tiebreak_points_won, Some(12));
    assert_eq!(out[0].tiebreak_points_played, Some(22));
    assert_eq!(out[1].tiebreak_points_won, Some(10));
}

#[test]
fn test_missing_opponent_row() {
    let rows: Vec<MatchStatsRow> = vec![stats_row("ms004", 1, "AB12", "CD34", Some(6), None)];
    let out: Vec<MatchStatsRow> = consolidate(rows);
    assert_eq!(out[0].won_set, None);
    assert_eq!(out[0].sets_played, Some(1));
}

#[test]
fn test_tiebreak_winner_points() {
    assert_eq!(tiebreak_winner_points(0), 7);
    assert_eq!(tiebreak_winner_points(5), 7);
    assert_eq!(tiebreak_winner_points(6), 8);
    assert_eq!(tiebreak_winner_points(12), 14);
}

#[test]
fn test_consolidation_is_idempotent() {
    let once: Vec<MatchStatsRecord> =
        consolidate_match_stats(stats_records(two_set_match()), &PlayerIdCorrections::builtin())
            .unwrap();
    let twice: Vec<MatchStatsRecord> =
        consolidate_match_stats(once.clone(), &PlayerIdCorrections::builtin()).unwrap();
    assert_eq!(once, twice);
}
