// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use courtdata_domain::{MatchStatsRecord, MatchStatsRow, PlayerIdCorrections};
use std::collections::HashMap;
use tracing::debug;

/// Points the winner of a tiebreak scored, given the loser's points.
///
/// A tiebreak is won at 7 with a two point margin, so the winner has 7 when
/// the loser stopped below 6 and the loser's count plus two otherwise.
#[must_use]
pub const fn tiebreak_winner_points(loser_points: u32) -> u32 {
    if loser_points < 6 { 7 } else { loser_points + 2 }
}

/// Fills the derived columns on one row.
///
/// # Arguments
///
/// * `row` - The row to complete
/// * `sets_played` - Highest set number seen for the match
/// * `opponent` - The opponent's `(set_score, tiebreak_score)` for the same set
pub fn derive_columns(
    row: &mut MatchStatsRow,
    sets_played: Option<u8>,
    opponent: Option<(Option<u8>, Option<u8>)>,
) {
    let (opponent_score, opponent_tiebreak): (Option<u8>, Option<u8>) =
        opponent.unwrap_or((None, None));

    row.sets_played = sets_played;
    row.won_set = if row.set_num == 0 {
        None
    } else {
        row.set_score
            .zip(opponent_score)
            .map(|(own, other)| own > other)
    };

    let own_tiebreak: Option<u32> = row.tiebreak_score.map(u32::from);
    let opponent_tiebreak: Option<u32> = opponent_tiebreak.map(u32::from);
    let loser_points: Option<u32> = own_tiebreak.or(opponent_tiebreak);

    row.tiebreak_points_won = own_tiebreak.or_else(|| {
        opponent_tiebreak.map(tiebreak_winner_points)
    });
    row.tiebreak_points_played = loser_points.map(|l| l + tiebreak_winner_points(l));
}

/// Combines the per-match statistics tables of a tournament and adds the
/// derived columns.
///
/// `sets_played` is the highest set number seen for a match. `won_set`
/// compares a player's set score with the opponent's row for the same match
/// and set, and stays empty on the set 0 totals row. Tiebreak point totals
/// follow from whichever side recorded the tiebreak (the loser's points).
/// Input order is preserved.
///
/// # Errors
///
/// Returns an error if a completed row fails validation.
pub fn consolidate_match_stats(
    staged: Vec<MatchStatsRecord>,
    corrections: &PlayerIdCorrections,
) -> Result<Vec<MatchStatsRecord>, CoreError> {
    let mut rows: Vec<MatchStatsRow> = staged.into_iter().map(MatchStatsRecord::into_row).collect();

    let mut sets_played: HashMap<String, u8> = HashMap::new();
    let mut scores: HashMap<(String, u8, String), (Option<u8>, Option<u8>)> = HashMap::new();
    for row in &rows {
        sets_played
            .entry(row.match_code.clone())
            .and_modify(|max| *max = (*max).max(row.set_num))
            .or_insert(row.set_num);
        scores.insert(
            (row.match_code.clone(), row.set_num, row.player_id.clone()),
            (row.set_score, row.tiebreak_score),
        );
    }

    for row in &mut rows {
        let opponent: Option<(Option<u8>, Option<u8>)> = scores
            .get(&(row.match_code.clone(), row.set_num, row.opponent_id.clone()))
            .copied();
        let played: Option<u8> = sets_played.get(&row.match_code).copied();
        derive_columns(row, played, opponent);
    }

    let matches: usize = sets_played.len();
    let records: Vec<MatchStatsRecord> = rows
        .into_iter()
        .map(|row| MatchStatsRecord::new(row, corrections))
        .collect::<Result<_, _>>()?;
    debug!(rows = records.len(), matches, "Consolidated match statistics");
    Ok(records)
}
