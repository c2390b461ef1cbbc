// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ParseError;
use courtdata_domain::OverviewFields;

/// Decodes a tournament overview document.
///
/// # Errors
///
/// Returns `ParseError::Json` when the document is malformed or lacks the
/// `Location` or `EventType` keys.
pub fn parse_overview(json: &str, tournament_id: u32) -> Result<OverviewFields, ParseError> {
    serde_json::from_str(json).map_err(|source| ParseError::Json {
        context: format!("overview for tournament {tournament_id}"),
        source,
    })
}
