// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised while building or validating domain values.
///
/// Registry gaps (`Unknown*`, `AmbiguousTournamentName`, `InvalidMatchUid`)
/// name the static table a maintainer must extend. Rule violations name the
/// record and field so a parser bug can be told apart from a malformed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The overview `EventType` code is not in the tournament type registry.
    UnknownTournamentType {
        /// The unrecognised code.
        code: String,
        /// The tournament being built.
        tournament_id: u32,
        /// Sponsor title or location, for the log reader.
        context: String,
    },
    /// A round heading is not in the round display table.
    UnknownRound(String),
    /// A round code is not a known `Round`.
    UnknownRoundCode(String),
    /// Surface text is not one of the known surfaces.
    UnknownSurface(String),
    /// Indoor/outdoor code is neither `I` nor `O`.
    UnknownInOutdoor(String),
    /// Match status text is not a known status.
    UnknownMatchStatus(String),
    /// Circuit code is not a known circuit.
    UnknownCircuit(String),
    /// The derived tournament name is the "Multiple Locations" sentinel.
    AmbiguousTournamentName {
        /// The tournament id lacking a display-name entry.
        tournament_id: u32,
        /// The location text that produced the sentinel.
        location: String,
    },
    /// A composed match UID does not match the UID pattern.
    InvalidMatchUid {
        /// The rejected UID.
        uid: String,
        /// Remediation hint, when the cause is recognisable.
        hint: Option<String>,
    },
    /// A doubles record names a side but lacks that side's partner.
    MissingPartner {
        /// The record type being validated.
        record: &'static str,
        /// The missing partner field.
        field: &'static str,
    },
    /// A singles record carries a partner field.
    PartnerOnSingles {
        /// The record type being validated.
        record: &'static str,
        /// The populated partner field.
        field: &'static str,
    },
    /// A walkover carries a duration, score text or set score.
    WalkoverWithScore {
        /// The offending field.
        field: String,
    },
    /// Only one of a set's winner/loser scores is present.
    IncompleteSetScore {
        /// The 1-based set number.
        set: u8,
    },
    /// A later set is present while an earlier one is absent.
    SetGap {
        /// The absent set.
        missing: u8,
        /// The later, present set.
        present: u8,
    },
    /// A tiebreak score is present for a set without games.
    TiebreakWithoutSet {
        /// The 1-based set number.
        set: u8,
    },
    /// `time_estimated` is false but there is no start time.
    MissingStartTime {
        /// The match lacking a start time.
        match_uid: String,
    },
    /// A required field is empty.
    MissingField {
        /// The record type being validated.
        record: &'static str,
        /// The empty field.
        field: &'static str,
    },
    /// A field value is out of range or malformed.
    InvalidField {
        /// The record type being validated.
        record: &'static str,
        /// The invalid field.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },
    /// Failed to parse a date or timestamp.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A duration string is not `H:MM:SS`.
    InvalidDuration(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTournamentType {
                code,
                tournament_id,
                context,
            } => {
                write!(
                    f,
                    "Unknown EventType '{code}' for tournament {tournament_id} ({context}). Add a member to TournamentType"
                )
            }
            Self::UnknownRound(name) => {
                write!(
                    f,
                    "Unknown round '{name}'. Add an entry to ROUND_DISPLAY_NAMES"
                )
            }
            Self::UnknownRoundCode(code) => write!(f, "Unknown round code '{code}'"),
            Self::UnknownSurface(value) => write!(f, "Unknown surface '{value}'"),
            Self::UnknownInOutdoor(value) => {
                write!(
                    f,
                    "Unknown InOutdoor value '{value}'. Add it to the indoor lookup table"
                )
            }
            Self::UnknownMatchStatus(value) => write!(f, "Unknown match status '{value}'"),
            Self::UnknownCircuit(value) => write!(f, "Unknown circuit '{value}'"),
            Self::AmbiguousTournamentName {
                tournament_id,
                location,
            } => {
                write!(
                    f,
                    "Unable to determine tournament name for ID {tournament_id} with location '{location}'. Add an entry to TOURNAMENT_NAMES"
                )
            }
            Self::InvalidMatchUid { uid, hint } => match hint {
                Some(hint) => write!(f, "Invalid match UID '{uid}': {hint}"),
                None => write!(f, "Invalid match UID '{uid}'"),
            },
            Self::MissingPartner { record, field } => {
                write!(f, "{record}: doubles match is missing {field}")
            }
            Self::PartnerOnSingles { record, field } => {
                write!(f, "{record}: singles match must not have {field}")
            }
            Self::WalkoverWithScore { field } => {
                write!(f, "Walkover must not have {field}")
            }
            Self::IncompleteSetScore { set } => {
                write!(
                    f,
                    "Set {set}: winner and loser scores must both be present or absent"
                )
            }
            Self::SetGap { missing, present } => {
                write!(
                    f,
                    "Set gap: set {missing} is empty but set {present} is present"
                )
            }
            Self::TiebreakWithoutSet { set } => {
                write!(f, "Set {set}: tiebreak score without set score")
            }
            Self::MissingStartTime { match_uid } => {
                write!(
                    f,
                    "Match {match_uid}: start time is required when time is not estimated"
                )
            }
            Self::MissingField { record, field } => {
                write!(f, "{record}: {field} is required")
            }
            Self::InvalidField {
                record,
                field,
                reason,
            } => write!(f, "{record}: invalid {field}: {reason}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidDuration(value) => {
                write!(f, "Invalid duration '{value}': expected H:MM:SS")
            }
        }
    }
}

impl std::error::Error for DomainError {}
