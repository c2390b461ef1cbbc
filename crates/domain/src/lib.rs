// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod corrections;
mod error;
mod match_uid;
mod normalize;
mod records;
mod round;
mod tournament;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use corrections::PlayerIdCorrections;
pub use error::DomainError;
pub use match_uid::create_match_uid;
pub use normalize::{SeedEntry, non_empty, non_empty_opt, parse_duration_seconds};
pub use records::{
    MAX_SETS, MatchStatsRecord, MatchStatsRow, OverviewFields, OverviewRecord, OverviewRow,
    RankingsRecord, RankingsRow, ResultsRecord, ResultsRow, ScheduleRecord, ScheduleRow,
    StagedScheduleRecord, StagedScheduleRow,
};
pub use round::{ROUND_DISPLAY_NAMES, Round};
pub use tournament::{TOURNAMENT_NAMES, Tournament, tournament_display_name};
pub use types::{Circuit, MatchStatus, Surface, TimeSuffix, TournamentType, parse_indoor};
pub use validation::{
    SetScore, SideFields, require_text, validate_partners, validate_set_scores,
    validate_start_time, validate_walkover,
};
