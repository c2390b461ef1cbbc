// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Manual corrections for malformed player ids.
//!
//! Some players are published with an internal competitor id
//! (`SR:COMPETITOR:972327`) instead of the usual 4-character code. These are
//! rare upstream exceptions, so they are fixed through an append-only table
//! rather than guessed.

use std::collections::HashMap;
use tracing::{info, warn};

/// Built-in corrections: `(bad_id_uppercased, tournament_id, year) -> code`.
const BUILTIN_CORRECTIONS: &[(&str, u32, u16, &str)] = &[
    // Australian Open 2026 qualifying
    ("SR:COMPETITOR:972327", 580, 2026, "J0DZ"),
    ("SR:COMPETITOR:1055851", 580, 2026, "H0K0"),
    ("SR:COMPETITOR:59700", 580, 2026, "I326"),
    ("SR:COMPETITOR:145936", 580, 2026, "KH77"),
    // Davis Cup Qualifiers 1st Rd 2026
    ("SR:COMPETITOR:637610", 8096, 2026, "O0BI"),
    ("SR:COMPETITOR:1021133", 8096, 2026, "M0UR"),
    ("SR:COMPETITOR:915589", 8096, 2026, "V0GR"),
    ("SR:COMPETITOR:915951", 8096, 2026, "R0IL"),
    ("SR:COMPETITOR:617530", 8096, 2026, "W0BU"),
    ("SR:COMPETITOR:168420", 8096, 2026, "AG08"),
];

/// Registry of malformed-id corrections, consulted by every record constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdCorrections {
    entries: HashMap<(String, u32, u16), String>,
}

impl Default for PlayerIdCorrections {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PlayerIdCorrections {
    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The registry shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry: Self = Self::empty();
        for (bad_id, tournament_id, year, corrected) in BUILTIN_CORRECTIONS {
            registry.insert(bad_id, *tournament_id, *year, corrected);
        }
        registry
    }

    /// Adds or replaces a correction.
    pub fn insert(&mut self, bad_id: &str, tournament_id: u32, year: u16, corrected: &str) {
        self.entries.insert(
            (bad_id.to_uppercase(), tournament_id, year),
            corrected.to_uppercase(),
        );
    }

    /// Number of registered corrections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no corrections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uppercases a player id and applies any registered correction.
    ///
    /// Well-formed ids (no `:`) pass through uppercased. Malformed ids with no
    /// registered correction also pass through, with a warning naming the
    /// table to extend. Applying this twice yields the same id.
    #[must_use]
    pub fn correct(&self, player_id: &str, tournament_id: u32, year: u16) -> String {
        let upper: String = player_id.trim().to_uppercase();
        if !upper.contains(':') {
            return upper;
        }

        let key: (String, u32, u16) = (upper, tournament_id, year);
        if let Some(corrected) = self.entries.get(&key) {
            info!(from = %key.0, to = %corrected, "Corrected player ID");
            return corrected.clone();
        }

        warn!(
            player_id = %key.0,
            tournament_id,
            year,
            "Uncorrected player ID; add an entry to the player ID correction table"
        );
        key.0
    }

    /// Applies `correct` to an optional id.
    #[must_use]
    pub fn correct_optional(
        &self,
        player_id: Option<&str>,
        tournament_id: u32,
        year: u16,
    ) -> Option<String> {
        player_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| self.correct(id, tournament_id, year))
    }
}
