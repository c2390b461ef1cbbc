// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Games won by each side in one set, plus the printed tiebreak points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    /// Games won by the match winner.
    pub winner: Option<u8>,
    /// Games won by the match loser.
    pub loser: Option<u8>,
    /// Tiebreak points of the tiebreak loser, when the set had one.
    pub tiebreak: Option<u8>,
}

impl SetScore {
    /// Whether any game count is recorded for this set.
    #[must_use]
    pub const fn is_played(&self) -> bool {
        self.winner.is_some() || self.loser.is_some()
    }

    /// Whether nothing at all is recorded for this set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.is_played() && self.tiebreak.is_none()
    }
}

/// One side of a match as seen by the partner rule.
#[derive(Debug, Clone, Copy)]
pub struct SideFields<'a> {
    /// The side's first-listed player id.
    pub player_id: Option<&'a str>,
    /// The partner id.
    pub partner_id: Option<&'a str>,
    /// The partner name.
    pub partner_name: Option<&'a str>,
    /// Column name of `partner_id`, for error messages.
    pub partner_id_field: &'static str,
    /// Column name of `partner_name`, for error messages.
    pub partner_name_field: &'static str,
}

/// Validates the doubles/singles partner rule.
///
/// A doubles record must carry a partner id for every side that names a
/// player. A singles record must not carry any partner field.
///
/// # Arguments
///
/// * `record` - Record type name used in error messages
/// * `is_doubles` - Whether the match is a doubles match
/// * `sides` - The sides of the match
///
/// # Errors
///
/// Returns `DomainError::MissingPartner` or `DomainError::PartnerOnSingles`.
pub fn validate_partners(
    record: &'static str,
    is_doubles: bool,
    sides: &[SideFields<'_>],
) -> Result<(), DomainError> {
    for side in sides {
        if is_doubles {
            if side.player_id.is_some() && side.partner_id.is_none() {
                return Err(DomainError::MissingPartner {
                    record,
                    field: side.partner_id_field,
                });
            }
            continue;
        }

        if side.partner_id.is_some() {
            return Err(DomainError::PartnerOnSingles {
                record,
                field: side.partner_id_field,
            });
        }
        if side.partner_name.is_some() {
            return Err(DomainError::PartnerOnSingles {
                record,
                field: side.partner_name_field,
            });
        }
    }
    Ok(())
}

/// Validates per-set completeness and gap freedom.
///
/// # Errors
///
/// Returns an error if:
/// - A set has only one of the winner/loser game counts
/// - A set has tiebreak points but no game counts
/// - A set is empty while a later set is played
pub fn validate_set_scores(sets: &[SetScore]) -> Result<(), DomainError> {
    for (set, number) in sets.iter().zip(1_u8..) {
        if set.winner.is_some() != set.loser.is_some() {
            return Err(DomainError::IncompleteSetScore { set: number });
        }
        if set.tiebreak.is_some() && !set.is_played() {
            return Err(DomainError::TiebreakWithoutSet { set: number });
        }
    }

    let mut first_missing: Option<u8> = None;
    for (set, number) in sets.iter().zip(1_u8..) {
        match (set.is_played(), first_missing) {
            (false, None) => first_missing = Some(number),
            (true, Some(missing)) => {
                return Err(DomainError::SetGap {
                    missing,
                    present: number,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Validates that a walkover carries no playing data.
///
/// # Errors
///
/// Returns `DomainError::WalkoverWithScore` naming the first populated field.
pub fn validate_walkover(
    duration_seconds: Option<u32>,
    score: Option<&str>,
    sets: &[SetScore],
) -> Result<(), DomainError> {
    if duration_seconds.is_some() {
        return Err(DomainError::WalkoverWithScore {
            field: String::from("duration_seconds"),
        });
    }
    if score.is_some_and(|s| !s.is_empty()) {
        return Err(DomainError::WalkoverWithScore {
            field: String::from("score"),
        });
    }
    if let Some(number) = sets
        .iter()
        .zip(1_u8..)
        .find(|(set, _)| !set.is_empty())
        .map(|(_, number)| number)
    {
        return Err(DomainError::WalkoverWithScore {
            field: format!("set {number} score"),
        });
    }
    Ok(())
}

/// Validates that a confirmed (non-estimated) time is present.
///
/// # Errors
///
/// Returns `DomainError::MissingStartTime` when `time_estimated` is false and
/// there is no start time.
pub fn validate_start_time(
    match_uid: &str,
    time_estimated: bool,
    start_time: Option<NaiveDateTime>,
) -> Result<(), DomainError> {
    if !time_estimated && start_time.is_none() {
        return Err(DomainError::MissingStartTime {
            match_uid: match_uid.to_string(),
        });
    }
    Ok(())
}

/// Validates that a required text field is not empty.
///
/// # Errors
///
/// Returns `DomainError::MissingField` when the value is empty or whitespace.
pub fn require_text(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField { record, field });
    }
    Ok(())
}
