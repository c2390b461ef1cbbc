// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::corrections::PlayerIdCorrections;
use crate::error::DomainError;
use crate::match_uid::create_match_uid;
use crate::normalize::non_empty_opt;
use crate::round::Round;
use crate::validation::{SideFields, require_text, validate_partners, validate_start_time};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One match as it appeared in a single schedule snapshot.
///
/// Time fields are kept as published; they are interpreted during
/// consolidation. A side whose players are not yet determined has all of its
/// player fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedScheduleRow {
    pub snapshot_datetime: NaiveDateTime,
    pub tournament_id: u32,
    pub year: u16,
    pub match_date_str: Option<String>,
    pub start_time_str: Option<String>,
    pub time_suffix: Option<String>,
    pub tournament_day: Option<u32>,
    pub court_name: Option<String>,
    pub court_match_num: u32,
    pub round_text: String,
    pub is_doubles: bool,
    pub p1_id: Option<String>,
    pub p1_name: Option<String>,
    pub p1_seed: Option<u32>,
    pub p1_entry: Option<String>,
    pub p1_partner_id: Option<String>,
    pub p1_partner_name: Option<String>,
    pub p2_id: Option<String>,
    pub p2_name: Option<String>,
    pub p2_seed: Option<u32>,
    pub p2_entry: Option<String>,
    pub p2_partner_id: Option<String>,
    pub p2_partner_name: Option<String>,
}

impl StagedScheduleRow {
    /// Whether both sides name a player.
    #[must_use]
    pub const fn is_determined(&self) -> bool {
        self.p1_id.is_some() && self.p2_id.is_some()
    }
}

/// A validated staged schedule row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StagedScheduleRow", into = "StagedScheduleRow")]
pub struct StagedScheduleRecord {
    row: StagedScheduleRow,
}

impl StagedScheduleRecord {
    /// Normalises and validates a staged row.
    ///
    /// Empty text becomes `None` and player ids are corrected before the
    /// partner rule is checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the round text is empty or the partner rule fails.
    pub fn new(
        mut row: StagedScheduleRow,
        corrections: &PlayerIdCorrections,
    ) -> Result<Self, DomainError> {
        let (tournament_id, year): (u32, u16) = (row.tournament_id, row.year);
        let fix = |id: Option<String>| {
            corrections.correct_optional(id.as_deref(), tournament_id, year)
        };

        row.match_date_str = non_empty_opt(row.match_date_str);
        row.start_time_str = non_empty_opt(row.start_time_str);
        row.time_suffix = non_empty_opt(row.time_suffix);
        row.court_name = non_empty_opt(row.court_name);
        row.round_text = row.round_text.trim().to_string();
        row.p1_id = fix(row.p1_id);
        row.p1_name = non_empty_opt(row.p1_name);
        row.p1_entry = non_empty_opt(row.p1_entry);
        row.p1_partner_id = fix(row.p1_partner_id);
        row.p1_partner_name = non_empty_opt(row.p1_partner_name);
        row.p2_id = fix(row.p2_id);
        row.p2_name = non_empty_opt(row.p2_name);
        row.p2_entry = non_empty_opt(row.p2_entry);
        row.p2_partner_id = fix(row.p2_partner_id);
        row.p2_partner_name = non_empty_opt(row.p2_partner_name);

        require_text("StagedScheduleRecord", "round_text", &row.round_text)?;
        validate_partners(
            "StagedScheduleRecord",
            row.is_doubles,
            &[
                SideFields {
                    player_id: row.p1_id.as_deref(),
                    partner_id: row.p1_partner_id.as_deref(),
                    partner_name: row.p1_partner_name.as_deref(),
                    partner_id_field: "p1_partner_id",
                    partner_name_field: "p1_partner_name",
                },
                SideFields {
                    player_id: row.p2_id.as_deref(),
                    partner_id: row.p2_partner_id.as_deref(),
                    partner_name: row.p2_partner_name.as_deref(),
                    partner_id_field: "p2_partner_id",
                    partner_name_field: "p2_partner_name",
                },
            ],
        )?;

        Ok(Self { row })
    }

    /// Returns the stored row.
    #[must_use]
    pub const fn row(&self) -> &StagedScheduleRow {
        &self.row
    }

    /// Consumes the record, returning the row.
    #[must_use]
    pub fn into_row(self) -> StagedScheduleRow {
        self.row
    }
}

impl TryFrom<StagedScheduleRow> for StagedScheduleRecord {
    type Error = DomainError;

    fn try_from(row: StagedScheduleRow) -> Result<Self, Self::Error> {
        Self::new(row, &PlayerIdCorrections::default())
    }
}

impl From<StagedScheduleRecord> for StagedScheduleRow {
    fn from(record: StagedScheduleRecord) -> Self {
        record.row
    }
}

/// One match in the consolidated schedule of a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub tournament_id: u32,
    pub year: u16,
    pub snapshot_datetime: NaiveDateTime,
    pub match_date: Option<NaiveDate>,
    pub tournament_day: Option<u32>,
    pub court_name: Option<String>,
    pub court_match_num: u32,
    pub round: Round,
    pub is_doubles: bool,
    pub start_time_utc: Option<NaiveDateTime>,
    pub time_estimated: bool,
    pub p1_id: String,
    pub p1_name: Option<String>,
    pub p1_seed: Option<u32>,
    pub p1_entry: Option<String>,
    pub p1_partner_id: Option<String>,
    pub p1_partner_name: Option<String>,
    pub p2_id: String,
    pub p2_name: Option<String>,
    pub p2_seed: Option<u32>,
    pub p2_entry: Option<String>,
    pub p2_partner_id: Option<String>,
    pub p2_partner_name: Option<String>,
    pub match_uid: String,
}

/// A validated consolidated schedule row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleRow", into = "ScheduleRow")]
pub struct ScheduleRecord {
    row: ScheduleRow,
}

impl ScheduleRecord {
    /// Normalises, validates and stamps the match UID on a schedule row.
    ///
    /// Any `match_uid` already on the row is replaced by the computed one.
    ///
    /// # Errors
    ///
    /// Returns an error if the partner rule fails, the match UID is invalid,
    /// or the time is confirmed but missing.
    pub fn new(mut row: ScheduleRow, corrections: &PlayerIdCorrections) -> Result<Self, DomainError> {
        let (tournament_id, year): (u32, u16) = (row.tournament_id, row.year);
        row.p1_id = corrections.correct(&row.p1_id, tournament_id, year);
        row.p2_id = corrections.correct(&row.p2_id, tournament_id, year);
        row.p1_partner_id =
            corrections.correct_optional(row.p1_partner_id.as_deref(), tournament_id, year);
        row.p2_partner_id =
            corrections.correct_optional(row.p2_partner_id.as_deref(), tournament_id, year);
        row.court_name = non_empty_opt(row.court_name);
        row.p1_name = non_empty_opt(row.p1_name);
        row.p2_name = non_empty_opt(row.p2_name);
        row.p1_entry = non_empty_opt(row.p1_entry);
        row.p2_entry = non_empty_opt(row.p2_entry);
        row.p1_partner_name = non_empty_opt(row.p1_partner_name);
        row.p2_partner_name = non_empty_opt(row.p2_partner_name);

        require_text("ScheduleRecord", "p1_id", &row.p1_id)?;
        require_text("ScheduleRecord", "p2_id", &row.p2_id)?;
        validate_partners(
            "ScheduleRecord",
            row.is_doubles,
            &[
                SideFields {
                    player_id: Some(&row.p1_id),
                    partner_id: row.p1_partner_id.as_deref(),
                    partner_name: row.p1_partner_name.as_deref(),
                    partner_id_field: "p1_partner_id",
                    partner_name_field: "p1_partner_name",
                },
                SideFields {
                    player_id: Some(&row.p2_id),
                    partner_id: row.p2_partner_id.as_deref(),
                    partner_name: row.p2_partner_name.as_deref(),
                    partner_id_field: "p2_partner_id",
                    partner_name_field: "p2_partner_name",
                },
            ],
        )?;

        row.match_uid = create_match_uid(
            year,
            tournament_id,
            row.round,
            &row.p1_id,
            &row.p2_id,
            row.is_doubles,
        )?;
        validate_start_time(&row.match_uid, row.time_estimated, row.start_time_utc)?;

        Ok(Self { row })
    }

    /// Returns the stored row.
    #[must_use]
    pub const fn row(&self) -> &ScheduleRow {
        &self.row
    }

    /// Returns the match UID.
    #[must_use]
    pub fn match_uid(&self) -> &str {
        &self.row.match_uid
    }

    /// Consumes the record, returning the row.
    #[must_use]
    pub fn into_row(self) -> ScheduleRow {
        self.row
    }
}

impl TryFrom<ScheduleRow> for ScheduleRecord {
    type Error = DomainError;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        Self::new(row, &PlayerIdCorrections::default())
    }
}

impl From<ScheduleRecord> for ScheduleRow {
    fn from(record: ScheduleRecord) -> Self {
        record.row
    }
}
