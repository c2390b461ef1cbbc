// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tabular records.
//!
//! Each dataset has a plain `*Row` (the stored column layout, also produced by
//! the parsers) and a `*Record` wrapper that can only be obtained through its
//! validating constructor. Records serialise as their rows and re-validate on
//! deserialisation.

mod match_stats;
mod overview;
mod rankings;
mod results;
mod schedule;

pub use match_stats::{MatchStatsRecord, MatchStatsRow};
pub use overview::{OverviewFields, OverviewRecord, OverviewRow};
pub use rankings::{RankingsRecord, RankingsRow};
pub use results::{MAX_SETS, ResultsRecord, ResultsRow};
pub use schedule::{ScheduleRecord, ScheduleRow, StagedScheduleRecord, StagedScheduleRow};
