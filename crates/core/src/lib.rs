// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Consolidation of per-unit staged tables into tournament-level tables.
//!
//! Everything here is pure: callers load the staged records and store the
//! result.

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

mod error;
mod match_stats;
mod schedule;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use match_stats::{consolidate_match_stats, derive_columns, tiebreak_winner_points};
pub use schedule::{
    DOUBLES_MATCH_ESTIMATE, SINGLES_MATCH_ESTIMATE, ScheduleConsolidation, TIMESTAMP_FORMAT,
    consolidate_schedule, parse_start_time, resolve_start_time,
};
