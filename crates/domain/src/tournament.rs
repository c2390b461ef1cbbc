// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::records::OverviewFields;
use crate::types::{Circuit, TournamentType};

/// Display names for tournaments known by name rather than by city.
pub const TOURNAMENT_NAMES: &[(u32, &str)] = &[
    (9900, "United Cup"),
    (580, "Australian Open"),
    (8096, "Davis Cup Qualifiers 1st Rd"),
    (520, "Roland Garros"),
    (540, "Wimbledon"),
    (560, "US Open"),
    (8097, "Davis Cup Qualifiers 2nd Rd"),
    (9210, "Laver Cup"),
    (605, "Nitto ATP Finals"),
    (8099, "Davis Cup Finals"),
];

/// Location text the source uses for events spread over several cities.
const MULTIPLE_LOCATIONS: &str = "Multiple Locations";

/// Identity of one edition of a tournament.
///
/// The display name is resolved once at construction, so every derived
/// value (slug, storage path, log label) is infallible afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tournament {
    tournament_id: u32,
    year: u16,
    circuit: Circuit,
    location: String,
    name: String,
}

impl Tournament {
    /// Creates a tournament identity.
    ///
    /// # Arguments
    ///
    /// * `tournament_id` - The source's tournament id
    /// * `year` - The edition year
    /// * `circuit` - The circuit the event is played on
    /// * `location` - Location text, `"City, Country"`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmbiguousTournamentName` when the name would be the
    /// "Multiple Locations" sentinel; such events need a `TOURNAMENT_NAMES` entry.
    pub fn new(
        tournament_id: u32,
        year: u16,
        circuit: Circuit,
        location: &str,
    ) -> Result<Self, DomainError> {
        let city: &str = location.split(',').next().unwrap_or_default().trim();
        let name: &str = tournament_display_name(tournament_id).unwrap_or(city);

        if name == MULTIPLE_LOCATIONS {
            return Err(DomainError::AmbiguousTournamentName {
                tournament_id,
                location: location.to_string(),
            });
        }

        Ok(Self {
            tournament_id,
            year,
            circuit,
            location: location.to_string(),
            name: name.to_string(),
        })
    }

    /// Creates a tournament from an overview `EventType` code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not registered or the name is ambiguous.
    pub fn from_event_type(
        tournament_id: u32,
        year: u16,
        event_type: &str,
        location: &str,
        context: &str,
    ) -> Result<Self, DomainError> {
        let tournament_type: TournamentType =
            TournamentType::from_code(event_type, tournament_id, context)?;
        Self::new(tournament_id, year, tournament_type.circuit(), location)
    }

    /// Creates a tournament from the fields of its overview document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownTournamentType` naming the sponsor title
    /// (or location) when the event type is not registered.
    pub fn from_overview(
        fields: &OverviewFields,
        tournament_id: u32,
        year: u16,
    ) -> Result<Self, DomainError> {
        Self::from_event_type(
            tournament_id,
            year,
            &fields.event_type,
            &fields.location,
            &fields.context(),
        )
    }

    /// Returns the tournament id.
    #[must_use]
    pub const fn tournament_id(&self) -> u32 {
        self.tournament_id
    }

    /// Returns the edition year.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the circuit.
    #[must_use]
    pub const fn circuit(&self) -> Circuit {
        self.circuit
    }

    /// Returns the raw location text.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL slug used by the public site: lowercase, no apostrophes, hyphens for spaces.
    #[must_use]
    pub fn url_slug(&self) -> String {
        self.name.to_lowercase().replace('\'', "").replace(' ', "-")
    }

    /// Storage path segment, e.g. `tournaments/tour/580_australian_open/2026`.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "tournaments/{}/{}_{}/{}",
            self.circuit.as_str(),
            self.tournament_id,
            self.url_slug().replace('-', "_"),
            self.year
        )
    }

    /// Label for log lines, e.g. `ATP Brisbane 2026 (339)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} {} {} ({})",
            self.circuit.display_name(),
            self.name,
            self.year,
            self.tournament_id
        )
    }
}

impl std::fmt::Display for Tournament {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Looks up the registered display name for a tournament id.
#[must_use]
pub fn tournament_display_name(tournament_id: u32) -> Option<&'static str> {
    TOURNAMENT_NAMES
        .iter()
        .find(|(id, _)| *id == tournament_id)
        .map(|(_, name)| *name)
}
