// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::fetch::RetryPolicy;
use courtdata_persistence::Storage;
use std::path::PathBuf;

/// Default data-source domain.
pub const DEFAULT_DOMAIN: &str = "atptour";

/// Default first year of ranking weeks to fetch.
pub const DEFAULT_RANKINGS_START_YEAR: u16 = 2025;

/// Settings for a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Root of the data tree.
    pub data_root: PathBuf,
    /// Data-source domain, the first path segment under each tier.
    pub domain: String,
    /// Ranking weeks before this year are not fetched.
    pub rankings_start_year: u16,
    /// Pacing and retries for upstream requests.
    pub retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            domain: DEFAULT_DOMAIN.to_string(),
            rankings_start_year: DEFAULT_RANKINGS_START_YEAR,
            retry: RetryPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Opens the configured data tree.
    #[must_use]
    pub fn storage(&self) -> Storage {
        Storage::new(&self.data_root, &self.domain)
    }
}
