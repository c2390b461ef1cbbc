// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Extraction parsers.
//!
//! Each parser turns one fetched page or JSON document into unvalidated row
//! structs from `courtdata-domain`. Markup details stay in this crate; the
//! validation and consolidation layers only see rows.

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

mod discovery;
mod error;
mod html;
mod match_stats;
mod overview;
mod rankings;
mod results;
mod schedule;

#[cfg(test)]
mod tests;

pub use discovery::parse_active_tournaments;
pub use error::ParseError;
pub use match_stats::parse_match_stats;
pub use overview::parse_overview;
pub use rankings::{RANKINGS_STEM_PREFIX, parse_ranking_dates, parse_rankings, ranking_date_from_stem};
pub use results::{ResultsDay, determine_status, parse_day_heading, parse_results};
pub use schedule::{SCHEDULE_STEM_PREFIX, parse_schedule, snapshot_datetime_from_stem};
