// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The competition tier a tournament belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Circuit {
    /// The premier tour.
    #[serde(rename = "tour")]
    Tour,
    /// The development tier.
    #[serde(rename = "chal")]
    Challenger,
}

impl Circuit {
    /// Every circuit, in declaration order.
    pub const ALL: [Self; 2] = [Self::Tour, Self::Challenger];

    /// Storage code used in path segments (`tour`, `chal`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tour => "tour",
            Self::Challenger => "chal",
        }
    }

    /// Human-readable name used in log labels.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Tour => "ATP",
            Self::Challenger => "Challenger",
        }
    }

    /// Path prefix of the public scores pages for this circuit.
    #[must_use]
    pub const fn scores_url_prefix(&self) -> &'static str {
        match self {
            Self::Tour => "current",
            Self::Challenger => "current-challenger",
        }
    }

    /// Value of the `scoringTournamentLevel` query for the live-matches feed.
    #[must_use]
    pub const fn live_feed_level(&self) -> &'static str {
        match self {
            Self::Tour => "tour",
            Self::Challenger => "challenger",
        }
    }
}

impl FromStr for Circuit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tour" => Ok(Self::Tour),
            "chal" => Ok(Self::Challenger),
            _ => Err(DomainError::UnknownCircuit(s.to_string())),
        }
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overview `EventType` codes.
///
/// This registry is closed on purpose: a code that is not listed here is a
/// hard failure, and a new member must be added by hand when the source
/// starts publishing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentType {
    /// Grand Slam.
    #[serde(rename = "GS")]
    GrandSlam,
    /// Masters 1000.
    #[serde(rename = "1000")]
    Masters1000,
    /// ATP 500.
    #[serde(rename = "500")]
    Atp500,
    /// ATP 250.
    #[serde(rename = "250")]
    Atp250,
    /// Challenger.
    #[serde(rename = "CH")]
    Challenger,
    /// Davis Cup style national team event.
    #[serde(rename = "DCR")]
    DavisCup,
    /// Laver Cup.
    #[serde(rename = "LVR")]
    LaverCup,
    /// United Cup.
    #[serde(rename = "UC")]
    UnitedCup,
    /// Season-ending tour finals.
    #[serde(rename = "WF")]
    TourFinals,
}

impl TournamentType {
    /// Every tournament type, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::GrandSlam,
        Self::Masters1000,
        Self::Atp500,
        Self::Atp250,
        Self::Challenger,
        Self::DavisCup,
        Self::LaverCup,
        Self::UnitedCup,
        Self::TourFinals,
    ];

    /// The wire code of this tournament type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GrandSlam => "GS",
            Self::Masters1000 => "1000",
            Self::Atp500 => "500",
            Self::Atp250 => "250",
            Self::Challenger => "CH",
            Self::DavisCup => "DCR",
            Self::LaverCup => "LVR",
            Self::UnitedCup => "UC",
            Self::TourFinals => "WF",
        }
    }

    /// The circuit this tournament type is played on.
    #[must_use]
    pub const fn circuit(&self) -> Circuit {
        match self {
            Self::Challenger => Circuit::Challenger,
            Self::GrandSlam
            | Self::Masters1000
            | Self::Atp500
            | Self::Atp250
            | Self::DavisCup
            | Self::LaverCup
            | Self::UnitedCup
            | Self::TourFinals => Circuit::Tour,
        }
    }

    /// Resolves an `EventType` code, naming the tournament in the error.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownTournamentType` if the code is not registered.
    pub fn from_code(code: &str, tournament_id: u32, context: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == code)
            .ok_or_else(|| DomainError::UnknownTournamentType {
                code: code.to_string(),
                tournament_id,
                context: context.to_string(),
            })
    }
}

impl std::fmt::Display for TournamentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Court surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    /// Hard court.
    Hard,
    /// Clay court.
    Clay,
    /// Grass court.
    Grass,
    /// Carpet court.
    Carpet,
}

impl Surface {
    /// Parses surface text from source data.
    ///
    /// Empty text means the event has no single surface and maps to `None`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSurface` for any other unrecognised text.
    pub fn parse_optional(value: &str) -> Result<Option<Self>, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    /// The surface name as published.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hard => "Hard",
            Self::Clay => "Clay",
            Self::Grass => "Grass",
            Self::Carpet => "Carpet",
        }
    }
}

impl FromStr for Surface {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hard" => Ok(Self::Hard),
            "Clay" => Ok(Self::Clay),
            "Grass" => Ok(Self::Grass),
            "Carpet" => Ok(Self::Carpet),
            _ => Err(DomainError::UnknownSurface(s.to_string())),
        }
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Indoor/outdoor lookup for the overview `InOutdoor` code.
const INDOOR_CODES: &[(&str, bool)] = &[("I", true), ("O", false)];

/// Resolves the single-letter indoor/outdoor code.
///
/// # Errors
///
/// Returns `DomainError::UnknownInOutdoor` for any code other than `I` or `O`.
pub fn parse_indoor(code: &str) -> Result<bool, DomainError> {
    INDOOR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, indoor)| *indoor)
        .ok_or_else(|| DomainError::UnknownInOutdoor(code.to_string()))
}

/// Outcome of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Played to completion.
    Completed,
    /// Stopped mid-match.
    Retired,
    /// Not played.
    Walkover,
}

impl MatchStatus {
    /// The status as stored.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Retired => "retired",
            Self::Walkover => "walkover",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Self::Completed),
            "retired" => Ok(Self::Retired),
            "walkover" => Ok(Self::Walkover),
            _ => Err(DomainError::UnknownMatchStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a schedule entry's start time should be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSuffix {
    /// A confirmed start time.
    StartsAt,
    /// The match will not start before the given time.
    NotBefore,
    /// The match follows the previous match on the same court.
    FollowedBy,
    /// Any other label.
    Other(String),
}

impl TimeSuffix {
    /// Classifies the suffix text printed next to a scheduled time.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let normalized: String = value.trim().to_lowercase();
        match normalized.as_str() {
            "starts at" => Self::StartsAt,
            "not before" => Self::NotBefore,
            "followed by" | "after suitable rest" => Self::FollowedBy,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}
