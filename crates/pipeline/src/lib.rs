// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Jobs that move tournament data through the storage tiers.
//!
//! [`Extractor`] fetches into `raw/`, [`Stager`] parses `raw/` into per-unit
//! tables in `stage/` and consolidates them into tournament tables.
//! [`Pipeline`] runs both in order.
//!
//! Every job is resumable: a unit is processed only when its output is
//! missing, except schedule snapshots (a new one per run) and the overview
//! and results pages (refreshed per run). Consolidation always rewrites its
//! table from everything staged so far.
//!
//! A failed fetch of a statistics document (HTTP 500) or of one ranking
//! week is logged and skipped. Parse failures stop the run: they mean the
//! page structure changed.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod discovery;
mod error;
mod fetch;
mod http;
mod job;
mod layout;
mod match_stats;
mod overview;
mod pipeline;
mod rankings;
mod results;
mod schedule;
mod urls;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_DOMAIN, DEFAULT_RANKINGS_START_YEAR, PipelineConfig};
pub use error::PipelineError;
pub use fetch::{BROWSER_HEADERS, FetchError, FetchRequest, Fetcher, RetryPolicy, RetryingFetcher};
pub use http::{DEFAULT_TIMEOUT, HttpFetcher, merged_headers};
pub use job::{Extractor, Stager};
pub use match_stats::staged_match_codes;
pub use pipeline::{Pipeline, stage_all, stage_tournament};
pub use rankings::rankings_stem;
pub use urls::{
    LIVE_FEED_URL, SITE_ROOT, STATS_REFERER, live_feed_url, match_stats_url, overview_url,
    rankings_url, results_url, schedule_url,
};
