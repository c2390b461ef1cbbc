// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PipelineError;
use crate::fetch::{FetchRequest, Fetcher};
use crate::job::Extractor;
use crate::urls::live_feed_url;
use courtdata_domain::Circuit;
use courtdata_parse::parse_active_tournaments;
use tracing::info;

impl<F: Fetcher> Extractor<F> {
    /// Lists the tournaments with live matches on either circuit, as
    /// `(tournament_id, year)` in first-seen order without duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if a feed cannot be fetched or has a non-integer id.
    pub fn discover_active_tournaments(&self) -> Result<Vec<(u32, u16)>, PipelineError> {
        let mut active: Vec<(u32, u16)> = Vec::new();
        for circuit in Circuit::ALL {
            info!(circuit = circuit.live_feed_level(), "Fetching live tournaments");
            let body: String = self
                .fetcher
                .fetch(&FetchRequest::json(live_feed_url(circuit)))?;
            for identity in parse_active_tournaments(&body)? {
                if !active.contains(&identity) {
                    active.push(identity);
                }
            }
        }
        info!(count = active.len(), "Found active tournaments");
        Ok(active)
    }
}
