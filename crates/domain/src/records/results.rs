// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::corrections::PlayerIdCorrections;
use crate::error::DomainError;
use crate::match_uid::create_match_uid;
use crate::normalize::non_empty_opt;
use crate::round::Round;
use crate::types::MatchStatus;
use crate::validation::{
    SetScore, SideFields, require_text, validate_partners, validate_set_scores, validate_walkover,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of sets recorded per match.
pub const MAX_SETS: usize = 5;

/// One finished match from a results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsRow {
    pub tournament_id: u32,
    pub year: u16,
    pub match_date: NaiveDate,
    pub tournament_day: Option<u32>,
    pub round: Round,
    pub court_name: Option<String>,
    pub match_code: Option<String>,
    pub match_status: MatchStatus,
    pub duration_seconds: Option<u32>,
    pub score: Option<String>,
    pub umpire: Option<String>,
    pub is_doubles: bool,
    pub winner_id: String,
    pub winner_name: Option<String>,
    pub winner_seed: Option<u32>,
    pub winner_entry: Option<String>,
    pub winner_partner_id: Option<String>,
    pub winner_partner_name: Option<String>,
    pub loser_id: String,
    pub loser_name: Option<String>,
    pub loser_seed: Option<u32>,
    pub loser_entry: Option<String>,
    pub loser_partner_id: Option<String>,
    pub loser_partner_name: Option<String>,
    pub w_set1: Option<u8>,
    pub l_set1: Option<u8>,
    pub tb_set1: Option<u8>,
    pub w_set2: Option<u8>,
    pub l_set2: Option<u8>,
    pub tb_set2: Option<u8>,
    pub w_set3: Option<u8>,
    pub l_set3: Option<u8>,
    pub tb_set3: Option<u8>,
    pub w_set4: Option<u8>,
    pub l_set4: Option<u8>,
    pub tb_set4: Option<u8>,
    pub w_set5: Option<u8>,
    pub l_set5: Option<u8>,
    pub tb_set5: Option<u8>,
    #[serde(default)]
    pub match_uid: String,
}

impl ResultsRow {
    /// The five set columns as `SetScore` values.
    #[must_use]
    pub const fn set_scores(&self) -> [SetScore; MAX_SETS] {
        [
            SetScore {
                winner: self.w_set1,
                loser: self.l_set1,
                tiebreak: self.tb_set1,
            },
            SetScore {
                winner: self.w_set2,
                loser: self.l_set2,
                tiebreak: self.tb_set2,
            },
            SetScore {
                winner: self.w_set3,
                loser: self.l_set3,
                tiebreak: self.tb_set3,
            },
            SetScore {
                winner: self.w_set4,
                loser: self.l_set4,
                tiebreak: self.tb_set4,
            },
            SetScore {
                winner: self.w_set5,
                loser: self.l_set5,
                tiebreak: self.tb_set5,
            },
        ]
    }

    /// Writes the set columns from a list of sets; missing trailing sets are cleared.
    pub fn set_set_scores(&mut self, sets: &[SetScore]) {
        let mut all: [SetScore; MAX_SETS] = [SetScore::default(); MAX_SETS];
        for (slot, set) in all.iter_mut().zip(sets) {
            *slot = *set;
        }
        let [s1, s2, s3, s4, s5] = all;
        (self.w_set1, self.l_set1, self.tb_set1) = (s1.winner, s1.loser, s1.tiebreak);
        (self.w_set2, self.l_set2, self.tb_set2) = (s2.winner, s2.loser, s2.tiebreak);
        (self.w_set3, self.l_set3, self.tb_set3) = (s3.winner, s3.loser, s3.tiebreak);
        (self.w_set4, self.l_set4, self.tb_set4) = (s4.winner, s4.loser, s4.tiebreak);
        (self.w_set5, self.l_set5, self.tb_set5) = (s5.winner, s5.loser, s5.tiebreak);
    }
}

/// A validated results row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResultsRow", into = "ResultsRow")]
pub struct ResultsRecord {
    row: ResultsRow,
}

impl ResultsRecord {
    /// Normalises, validates and stamps the match UID on a results row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A player id is empty or the match UID is invalid
    /// - The partner rule fails
    /// - A walkover carries a duration, score or set score
    /// - Set scores are incomplete or have a gap
    pub fn new(mut row: ResultsRow, corrections: &PlayerIdCorrections) -> Result<Self, DomainError> {
        let (tournament_id, year): (u32, u16) = (row.tournament_id, row.year);
        row.winner_id = corrections.correct(&row.winner_id, tournament_id, year);
        row.loser_id = corrections.correct(&row.loser_id, tournament_id, year);
        row.winner_partner_id =
            corrections.correct_optional(row.winner_partner_id.as_deref(), tournament_id, year);
        row.loser_partner_id =
            corrections.correct_optional(row.loser_partner_id.as_deref(), tournament_id, year);
        row.court_name = non_empty_opt(row.court_name);
        row.match_code = non_empty_opt(row.match_code);
        row.score = non_empty_opt(row.score);
        row.umpire = non_empty_opt(row.umpire);
        row.winner_name = non_empty_opt(row.winner_name);
        row.winner_entry = non_empty_opt(row.winner_entry);
        row.winner_partner_name = non_empty_opt(row.winner_partner_name);
        row.loser_name = non_empty_opt(row.loser_name);
        row.loser_entry = non_empty_opt(row.loser_entry);
        row.loser_partner_name = non_empty_opt(row.loser_partner_name);

        require_text("ResultsRecord", "winner_id", &row.winner_id)?;
        require_text("ResultsRecord", "loser_id", &row.loser_id)?;
        validate_partners(
            "ResultsRecord",
            row.is_doubles,
            &[
                SideFields {
                    player_id: Some(&row.winner_id),
                    partner_id: row.winner_partner_id.as_deref(),
                    partner_name: row.winner_partner_name.as_deref(),
                    partner_id_field: "winner_partner_id",
                    partner_name_field: "winner_partner_name",
                },
                SideFields {
                    player_id: Some(&row.loser_id),
                    partner_id: row.loser_partner_id.as_deref(),
                    partner_name: row.loser_partner_name.as_deref(),
                    partner_id_field: "loser_partner_id",
                    partner_name_field: "loser_partner_name",
                },
            ],
        )?;

        let sets: [SetScore; MAX_SETS] = row.set_scores();
        if row.match_status == MatchStatus::Walkover {
            validate_walkover(row.duration_seconds, row.score.as_deref(), &sets)?;
        }
        validate_set_scores(&sets)?;

        row.match_uid = create_match_uid(
            year,
            tournament_id,
            row.round,
            &row.winner_id,
            &row.loser_id,
            row.is_doubles,
        )?;

        Ok(Self { row })
    }

    /// Returns the stored row.
    #[must_use]
    pub const fn row(&self) -> &ResultsRow {
        &self.row
    }

    /// Returns the match UID.
    #[must_use]
    pub fn match_uid(&self) -> &str {
        &self.row.match_uid
    }

    /// Consumes the record, returning the row.
    #[must_use]
    pub fn into_row(self) -> ResultsRow {
        self.row
    }
}

impl TryFrom<ResultsRow> for ResultsRecord {
    type Error = DomainError;

    fn try_from(row: ResultsRow) -> Result<Self, Self::Error> {
        Self::new(row, &PlayerIdCorrections::default())
    }
}

impl From<ResultsRecord> for ResultsRow {
    fn from(record: ResultsRecord) -> Self {
        record.row
    }
}
