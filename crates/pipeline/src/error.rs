// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::fetch::FetchError;
use courtdata::CoreError;
use courtdata_domain::DomainError;
use courtdata_parse::ParseError;
use courtdata_persistence::PersistenceError;
use thiserror::Error;

/// Errors that stop a pipeline job.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A fetch failed after every retry.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Fetched data did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A record failed validation or a registry lookup.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Consolidation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing the data tree failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Staging needs the raw overview, which has not been extracted.
    #[error("No raw overview for tournament {tournament_id} ({year}); extract it first")]
    MissingOverview { tournament_id: u32, year: u16 },
}
