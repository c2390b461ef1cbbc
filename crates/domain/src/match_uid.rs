// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::round::Round;
use regex::Regex;
use std::sync::LazyLock;

/// `{year}_{tournament_id}_{SGL|DBL}_{round}_{id}_{id}` with 4-character ids.
const MATCH_UID_PATTERN: &str = r"^\d{4}_\d+_(SGL|DBL)_[A-Z0-9]+_[A-Z0-9]{4}_[A-Z0-9]{4}$";

#[allow(clippy::expect_used)]
static MATCH_UID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MATCH_UID_PATTERN).expect("match UID pattern is a valid literal"));

/// Builds the cross-dataset key for one real-world match.
///
/// Ids are uppercased and sorted so the key does not depend on which side a
/// player was listed on. For doubles, pass the first-listed player of each team.
///
/// # Arguments
///
/// * `year` - The tournament year
/// * `tournament_id` - The tournament id
/// * `round` - The round of the match
/// * `player_a` - One side's (corrected) player id
/// * `player_b` - The other side's (corrected) player id
/// * `is_doubles` - Whether the match is a doubles match
///
/// # Errors
///
/// Returns `DomainError::InvalidMatchUid` when the composed key does not match
/// the UID pattern. This usually means an id needs a manual correction.
pub fn create_match_uid(
    year: u16,
    tournament_id: u32,
    round: Round,
    player_a: &str,
    player_b: &str,
    is_doubles: bool,
) -> Result<String, DomainError> {
    let mut ids: [String; 2] = [player_a.to_uppercase(), player_b.to_uppercase()];
    ids.sort();

    let match_type: &str = if is_doubles { "DBL" } else { "SGL" };
    let uid: String = format!(
        "{year}_{tournament_id}_{match_type}_{}_{}_{}",
        round.as_str(),
        ids[0],
        ids[1]
    );

    if MATCH_UID_RE.is_match(&uid) {
        return Ok(uid);
    }

    let hint: Option<String> = ids.iter().find_map(|id| player_id_hint(id, tournament_id, year));
    Err(DomainError::InvalidMatchUid { uid, hint })
}

/// Explains why a player id cannot appear in a match UID.
fn player_id_hint(id: &str, tournament_id: u32, year: u16) -> Option<String> {
    if id.contains(':') {
        return Some(format!(
            "player ID '{id}' looks like an internal competitor ID; add a correction for ({id}, {tournament_id}, {year}) to the player ID correction table"
        ));
    }
    if id.len() != 4 || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(format!(
            "player ID '{id}' is not a 4-character alphanumeric code"
        ));
    }
    None
}
