// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::normalize::non_empty_opt;
use crate::validation::require_text;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One ranked player in one weekly rankings snapshot.
///
/// Movement columns are `None` when the source printed a dash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingsRow {
    pub ranking_date: NaiveDate,
    pub rank: u32,
    pub player_id: String,
    pub player_name: Option<String>,
    pub nationality: Option<String>,
    pub age: Option<u8>,
    pub points: Option<u32>,
    pub rank_move: Option<i32>,
    pub points_move: Option<i32>,
    pub points_dropping: Option<i32>,
    pub next_best: Option<i32>,
}

/// A validated rankings row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RankingsRow", into = "RankingsRow")]
pub struct RankingsRecord {
    row: RankingsRow,
}

impl RankingsRecord {
    /// Normalises and validates a rankings row.
    ///
    /// # Errors
    ///
    /// Returns an error if the player id is empty or the rank is zero.
    pub fn new(mut row: RankingsRow) -> Result<Self, DomainError> {
        row.player_id = row.player_id.trim().to_uppercase();
        row.player_name = non_empty_opt(row.player_name);
        row.nationality = non_empty_opt(row.nationality).map(|n| n.to_uppercase());

        require_text("RankingsRecord", "player_id", &row.player_id)?;
        if row.rank == 0 {
            return Err(DomainError::InvalidField {
                record: "RankingsRecord",
                field: "rank",
                reason: String::from("rank must be at least 1"),
            });
        }
        Ok(Self { row })
    }

    /// Returns the stored row.
    #[must_use]
    pub const fn row(&self) -> &RankingsRow {
        &self.row
    }

    /// Consumes the record, returning the row.
    #[must_use]
    pub fn into_row(self) -> RankingsRow {
        self.row
    }
}

impl TryFrom<RankingsRow> for RankingsRecord {
    type Error = DomainError;

    fn try_from(row: RankingsRow) -> Result<Self, Self::Error> {
        Self::new(row)
    }
}

impl From<RankingsRecord> for RankingsRow {
    fn from(record: RankingsRecord) -> Self {
        record.row
    }
}
