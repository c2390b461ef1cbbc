// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A round of a tournament draw, stored by its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Round {
    /// Final.
    #[serde(rename = "F")]
    Final,
    /// Semifinal.
    #[serde(rename = "SF")]
    SemiFinal,
    /// Quarterfinal.
    #[serde(rename = "QF")]
    QuarterFinal,
    /// Round of 16.
    R16,
    /// Round of 32.
    R32,
    /// Round of 64.
    R64,
    /// Round of 128.
    R128,
    /// Round robin stage.
    #[serde(rename = "RR")]
    RoundRobin,
    /// First qualifying round.
    Q1,
    /// Second qualifying round.
    Q2,
    /// Third qualifying round.
    Q3,
    /// Bronze medal match.
    #[serde(rename = "BRONZE")]
    Bronze,
    /// Third place play-off.
    #[serde(rename = "THIRDPLACE")]
    ThirdPlace,
}

/// Headings used on results pages and in match statistics, mapped to rounds.
///
/// Every `Round` appears at least once. Extend this table when the source
/// starts printing a new heading.
pub const ROUND_DISPLAY_NAMES: &[(&str, Round)] = &[
    ("Final", Round::Final),
    ("Finals", Round::Final),
    ("Semifinals", Round::SemiFinal),
    ("Semi-Finals", Round::SemiFinal),
    ("Semifinal", Round::SemiFinal),
    ("Quarterfinals", Round::QuarterFinal),
    ("Quarter-Finals", Round::QuarterFinal),
    ("Quarterfinal", Round::QuarterFinal),
    ("Round of 16", Round::R16),
    ("Round of 32", Round::R32),
    ("Round of 64", Round::R64),
    ("Round of 128", Round::R128),
    ("Round Robin", Round::RoundRobin),
    ("1st Round Qualifying", Round::Q1),
    ("2nd Round Qualifying", Round::Q2),
    ("3rd Round Qualifying", Round::Q3),
    ("Bronze Medal Match", Round::Bronze),
    ("3rd/4th Place Match", Round::ThirdPlace),
    ("Third Place Match", Round::ThirdPlace),
];

impl Round {
    /// Every round, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Final,
        Self::SemiFinal,
        Self::QuarterFinal,
        Self::R16,
        Self::R32,
        Self::R64,
        Self::R128,
        Self::RoundRobin,
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::Bronze,
        Self::ThirdPlace,
    ];

    /// The short code used in match UIDs and stored tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Final => "F",
            Self::SemiFinal => "SF",
            Self::QuarterFinal => "QF",
            Self::R16 => "R16",
            Self::R32 => "R32",
            Self::R64 => "R64",
            Self::R128 => "R128",
            Self::RoundRobin => "RR",
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Bronze => "BRONZE",
            Self::ThirdPlace => "THIRDPLACE",
        }
    }

    /// Resolves a human-readable round heading.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownRound` when the heading is not in
    /// `ROUND_DISPLAY_NAMES`.
    pub fn from_display(name: &str) -> Result<Self, DomainError> {
        let trimmed: &str = name.trim();
        ROUND_DISPLAY_NAMES
            .iter()
            .find(|(display, _)| display.eq_ignore_ascii_case(trimmed))
            .map(|(_, round)| *round)
            .ok_or_else(|| DomainError::UnknownRound(trimmed.to_string()))
    }

    /// Resolves a round label that may be either a short code or a heading.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownRound` when neither form matches.
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        label
            .trim()
            .parse::<Self>()
            .or_else(|_| Self::from_display(label))
    }
}

impl FromStr for Round {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|round| round.as_str() == s)
            .ok_or_else(|| DomainError::UnknownRoundCode(s.to_string()))
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
