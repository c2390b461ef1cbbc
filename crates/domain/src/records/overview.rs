// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::normalize::non_empty_opt;
use crate::tournament::Tournament;
use crate::types::{Circuit, Surface, TournamentType, parse_indoor};
use serde::{Deserialize, Serialize};

/// Tournament profile fields as published by the overview endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OverviewFields {
    #[serde(default)]
    pub sponsor_title: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub singles_draw_size: Option<u32>,
    #[serde(default)]
    pub doubles_draw_size: Option<u32>,
    #[serde(default)]
    pub surface: Option<String>,
    #[serde(default)]
    pub surface_sub_cat: Option<String>,
    #[serde(default)]
    pub in_outdoor: Option<String>,
    #[serde(default)]
    pub prize: Option<String>,
    #[serde(default)]
    pub total_financial_commitment: Option<String>,
    pub location: String,
    #[serde(default)]
    pub flag_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    pub event_type: String,
    #[serde(default)]
    pub event_type_detail: Option<i64>,
    #[serde(default)]
    pub fb_link: Option<String>,
    #[serde(default)]
    pub tw_link: Option<String>,
    #[serde(default)]
    pub ig_link: Option<String>,
    #[serde(default)]
    pub vixlet_url: Option<String>,
}

impl OverviewFields {
    /// Sponsor title, falling back to location, for error context.
    #[must_use]
    pub fn context(&self) -> String {
        self.sponsor_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.location)
            .to_string()
    }
}

/// Stored overview row: one per tournament-year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewRow {
    pub tournament_id: u32,
    pub year: u16,
    pub city: String,
    pub circuit: Circuit,
    pub sponsor_title: Option<String>,
    pub bio: Option<String>,
    pub singles_draw_size: Option<u32>,
    pub doubles_draw_size: Option<u32>,
    pub surface: Option<Surface>,
    pub surface_detail: Option<String>,
    pub indoor: bool,
    pub prize: Option<String>,
    pub total_financial_commitment: Option<String>,
    pub location: String,
    pub country: Option<String>,
    pub event_type: TournamentType,
    pub event_type_detail: Option<i64>,
    pub flag_url: Option<String>,
    pub website: Option<String>,
    pub website_url: Option<String>,
    pub fb_link: Option<String>,
    pub tw_link: Option<String>,
    pub ig_link: Option<String>,
    pub vixlet_url: Option<String>,
}

/// A validated overview row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OverviewRow", into = "OverviewRow")]
pub struct OverviewRecord {
    row: OverviewRow,
}

impl OverviewRecord {
    /// Builds the overview record for a tournament from its profile fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface, indoor code or event type is not
    /// recognised, or the event type disagrees with the tournament's circuit.
    pub fn from_fields(
        tournament: &Tournament,
        fields: &OverviewFields,
    ) -> Result<Self, DomainError> {
        let context: String = fields.context();
        let event_type: TournamentType =
            TournamentType::from_code(&fields.event_type, tournament.tournament_id(), &context)?;
        let surface: Option<Surface> =
            Surface::parse_optional(fields.surface.as_deref().unwrap_or_default())?;
        let indoor_code: &str = fields.in_outdoor.as_deref().unwrap_or_default().trim();
        let indoor: bool = parse_indoor(indoor_code)?;

        let city: String = fields
            .location
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        let country: Option<String> = fields
            .location
            .rsplit_once(',')
            .map(|(_, country)| country.trim().to_string())
            .filter(|c| !c.is_empty());

        Self::new(OverviewRow {
            tournament_id: tournament.tournament_id(),
            year: tournament.year(),
            city,
            circuit: tournament.circuit(),
            sponsor_title: non_empty_opt(fields.sponsor_title.clone()),
            bio: non_empty_opt(fields.bio.clone()),
            singles_draw_size: fields.singles_draw_size,
            doubles_draw_size: fields.doubles_draw_size,
            surface,
            surface_detail: non_empty_opt(fields.surface_sub_cat.clone()),
            indoor,
            prize: non_empty_opt(fields.prize.clone()),
            total_financial_commitment: non_empty_opt(fields.total_financial_commitment.clone()),
            location: fields.location.trim().to_string(),
            country,
            event_type,
            event_type_detail: fields.event_type_detail,
            flag_url: non_empty_opt(fields.flag_url.clone()),
            website: non_empty_opt(fields.website.clone()),
            website_url: non_empty_opt(fields.website_url.clone()),
            fb_link: non_empty_opt(fields.fb_link.clone()),
            tw_link: non_empty_opt(fields.tw_link.clone()),
            ig_link: non_empty_opt(fields.ig_link.clone()),
            vixlet_url: non_empty_opt(fields.vixlet_url.clone()),
        })
    }

    /// Validates a stored row.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidField` if the circuit does not match the
    /// event type, or `DomainError::MissingField` if the location is empty.
    pub fn new(row: OverviewRow) -> Result<Self, DomainError> {
        crate::validation::require_text("OverviewRecord", "location", &row.location)?;
        if row.event_type.circuit() != row.circuit {
            return Err(DomainError::InvalidField {
                record: "OverviewRecord",
                field: "circuit",
                reason: format!(
                    "event type {} is played on {}, not {}",
                    row.event_type,
                    row.event_type.circuit(),
                    row.circuit
                ),
            });
        }
        Ok(Self { row })
    }

    /// Returns the stored row.
    #[must_use]
    pub const fn row(&self) -> &OverviewRow {
        &self.row
    }

    /// Consumes the record, returning the row.
    #[must_use]
    pub fn into_row(self) -> OverviewRow {
        self.row
    }
}

impl TryFrom<OverviewRow> for OverviewRecord {
    type Error = DomainError;

    fn try_from(row: OverviewRow) -> Result<Self, Self::Error> {
        Self::new(row)
    }
}

impl From<OverviewRecord> for OverviewRow {
    fn from(record: OverviewRecord) -> Self {
        record.row
    }
}
