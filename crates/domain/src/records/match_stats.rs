// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::corrections::PlayerIdCorrections;
use crate::error::DomainError;
use crate::match_uid::create_match_uid;
use crate::normalize::non_empty_opt;
use crate::round::Round;
use crate::validation::{SideFields, require_text, validate_partners};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statistics of one player for one set of one match.
///
/// `set_num` 0 holds the match totals. The last four columns are derived
/// during consolidation and are empty in per-match staged tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStatsRow {
    pub tournament_id: u32,
    pub year: u16,
    pub surface: Option<String>,
    pub tournament_start_date: Option<NaiveDate>,
    pub tournament_end_date: Option<NaiveDate>,
    pub match_code: String,
    pub round: Option<Round>,
    pub court_name: Option<String>,
    pub is_doubles: bool,
    pub is_qualifier: bool,
    pub match_duration_seconds: Option<u32>,
    pub best_of: Option<u8>,
    pub scoring_system: Option<String>,
    pub reason: Option<String>,
    pub tournament_day: Option<u32>,
    pub umpire: Option<String>,
    pub set_num: u8,
    pub set_score: Option<u8>,
    pub tiebreak_score: Option<u8>,
    pub set_duration_seconds: Option<u32>,
    pub player_id: String,
    pub player_name: Option<String>,
    pub opponent_id: String,
    pub opponent_name: Option<String>,
    pub is_winner: bool,
    pub player_seed: Option<u32>,
    pub player_entry: Option<String>,
    pub opponent_seed: Option<u32>,
    pub opponent_entry: Option<String>,
    pub player_partner_id: Option<String>,
    pub player_partner_name: Option<String>,
    pub opponent_partner_id: Option<String>,
    pub opponent_partner_name: Option<String>,
    // Service
    pub svc_games_played: Option<u32>,
    pub svc_rating: Option<f64>,
    pub svc_aces: Option<u32>,
    pub svc_double_faults: Option<u32>,
    pub svc_first_serve_in: Option<u32>,
    pub svc_first_serve_att: Option<u32>,
    pub svc_first_serve_in_pct: Option<f64>,
    pub svc_first_serve_pts_won: Option<u32>,
    pub svc_first_serve_pts_played: Option<u32>,
    pub svc_first_serve_pts_won_pct: Option<f64>,
    pub svc_second_serve_pts_won: Option<u32>,
    pub svc_second_serve_pts_played: Option<u32>,
    pub svc_second_serve_pts_won_pct: Option<f64>,
    pub svc_bp_saved: Option<u32>,
    pub svc_bp_faced: Option<u32>,
    pub svc_bp_saved_pct: Option<f64>,
    // Return
    pub ret_games_played: Option<u32>,
    pub ret_rating: Option<f64>,
    pub ret_first_serve_pts_won: Option<u32>,
    pub ret_first_serve_pts_played: Option<u32>,
    pub ret_first_serve_pts_won_pct: Option<f64>,
    pub ret_second_serve_pts_won: Option<u32>,
    pub ret_second_serve_pts_played: Option<u32>,
    pub ret_second_serve_pts_won_pct: Option<f64>,
    pub ret_bp_converted: Option<u32>,
    pub ret_bp_opportunities: Option<u32>,
    pub ret_bp_converted_pct: Option<f64>,
    // Points
    pub pts_service_won: Option<u32>,
    pub pts_service_played: Option<u32>,
    pub pts_service_won_pct: Option<f64>,
    pub pts_return_won: Option<u32>,
    pub pts_return_played: Option<u32>,
    pub pts_return_won_pct: Option<f64>,
    pub pts_total_won: Option<u32>,
    pub pts_total_played: Option<u32>,
    pub pts_total_won_pct: Option<f64>,
    #[serde(default)]
    pub match_uid: String,
    // Derived
    #[serde(default)]
    pub sets_played: Option<u8>,
    #[serde(default)]
    pub won_set: Option<bool>,
    #[serde(default)]
    pub tiebreak_points_won: Option<u32>,
    #[serde(default)]
    pub tiebreak_points_played: Option<u32>,
}

/// A validated match statistics row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatchStatsRow", into = "MatchStatsRow")]
pub struct MatchStatsRecord {
    row: MatchStatsRow,
}

impl MatchStatsRecord {
    /// Normalises, validates and stamps the match UID on a statistics row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The match code, player id or opponent id is empty
    /// - The round is missing or the match UID is invalid
    /// - The partner rule fails
    /// - `won_set` is populated on the set-0 totals row
    pub fn new(
        mut row: MatchStatsRow,
        corrections: &PlayerIdCorrections,
    ) -> Result<Self, DomainError> {
        let (tournament_id, year): (u32, u16) = (row.tournament_id, row.year);
        row.player_id = corrections.correct(&row.player_id, tournament_id, year);
        row.opponent_id = corrections.correct(&row.opponent_id, tournament_id, year);
        row.player_partner_id =
            corrections.correct_optional(row.player_partner_id.as_deref(), tournament_id, year);
        row.opponent_partner_id =
            corrections.correct_optional(row.opponent_partner_id.as_deref(), tournament_id, year);
        row.surface = non_empty_opt(row.surface);
        row.court_name = non_empty_opt(row.court_name);
        row.scoring_system = non_empty_opt(row.scoring_system);
        row.reason = non_empty_opt(row.reason);
        row.umpire = non_empty_opt(row.umpire);
        row.player_entry = non_empty_opt(row.player_entry);
        row.opponent_entry = non_empty_opt(row.opponent_entry);
        row.player_partner_name = non_empty_opt(row.player_partner_name);
        row.opponent_partner_name = non_empty_opt(row.opponent_partner_name);

        require_text("MatchStatsRecord", "match_code", &row.match_code)?;
        require_text("MatchStatsRecord", "player_id", &row.player_id)?;
        require_text("MatchStatsRecord", "opponent_id", &row.opponent_id)?;
        let round: Round = row.round.ok_or(DomainError::MissingField {
            record: "MatchStatsRecord",
            field: "round",
        })?;
        validate_partners(
            "MatchStatsRecord",
            row.is_doubles,
            &[
                SideFields {
                    player_id: Some(&row.player_id),
                    partner_id: row.player_partner_id.as_deref(),
                    partner_name: row.player_partner_name.as_deref(),
                    partner_id_field: "player_partner_id",
                    partner_name_field: "player_partner_name",
                },
                SideFields {
                    player_id: Some(&row.opponent_id),
                    partner_id: row.opponent_partner_id.as_deref(),
                    partner_name: row.opponent_partner_name.as_deref(),
                    partner_id_field: "opponent_partner_id",
                    partner_name_field: "opponent_partner_name",
                },
            ],
        )?;
        if row.set_num == 0 && row.won_set.is_some() {
            return Err(DomainError::InvalidField {
                record: "MatchStatsRecord",
                field: "won_set",
                reason: String::from("must be empty on the set 0 totals row"),
            });
        }

        row.match_uid = create_match_uid(
            year,
            tournament_id,
            round,
            &row.player_id,
            &row.opponent_id,
            row.is_doubles,
        )?;

        Ok(Self { row })
    }

    /// Returns the stored row.
    #[must_use]
    pub const fn row(&self) -> &MatchStatsRow {
        &self.row
    }

    /// Consumes the record, returning the row.
    #[must_use]
    pub fn into_row(self) -> MatchStatsRow {
        self.row
    }
}

impl TryFrom<MatchStatsRow> for MatchStatsRecord {
    type Error = DomainError;

    fn try_from(row: MatchStatsRow) -> Result<Self, Self::Error> {
        Self::new(row, &PlayerIdCorrections::default())
    }
}

impl From<MatchStatsRecord> for MatchStatsRow {
    fn from(record: MatchStatsRecord) -> Self {
        record.row
    }
}
