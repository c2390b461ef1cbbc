// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live-matches feed parser used for active-tournament discovery.

use crate::error::ParseError;
use serde_json::Value;

/// Extracts `(tournament_id, year)` pairs from one live-matches feed document,
/// in feed order.
///
/// # Errors
///
/// Returns an error if the document is not JSON, the tournament list is
/// missing, or an entry's `EventId` or `EventYear` is not an integer. The
/// error names the offending entry.
pub fn parse_active_tournaments(json: &str) -> Result<Vec<(u32, u16)>, ParseError> {
    let document: Value = serde_json::from_str(json).map_err(|source| ParseError::Json {
        context: String::from("live matches feed"),
        source,
    })?;

    let entries: &Vec<Value> = document
        .pointer("/Data/LiveMatchesTournamentsOrdered")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::UnexpectedJson {
            field: "Data.LiveMatchesTournamentsOrdered",
            context: String::from("live matches feed"),
        })?;

    entries
        .iter()
        .map(|entry| {
            let event_id: Option<u32> = entry
                .get("EventId")
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok());
            let event_year: Option<u16> = entry
                .get("EventYear")
                .and_then(Value::as_u64)
                .and_then(|n| u16::try_from(n).ok());
            match (event_id, event_year) {
                (Some(id), Some(year)) => Ok((id, year)),
                (None, _) => Err(ParseError::UnexpectedJson {
                    field: "EventId",
                    context: entry.to_string(),
                }),
                (_, None) => Err(ParseError::UnexpectedJson {
                    field: "EventYear",
                    context: entry.to_string(),
                }),
            }
        })
        .collect()
}
