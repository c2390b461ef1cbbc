// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! File and directory names within a tournament's path.

use courtdata_domain::Tournament;

pub const OVERVIEW_JSON: &str = "overview.json";
pub const OVERVIEW_TABLE: &str = "overview.csv";

pub const RESULTS_SINGLES_HTML: &str = "results_singles.html";
pub const RESULTS_DOUBLES_HTML: &str = "results_doubles.html";
pub const RESULTS_TABLE: &str = "results.csv";

pub const SCHEDULE_DIR: &str = "schedule";
pub const SCHEDULE_HTML: &str = "schedule.html";
pub const SCHEDULE_TABLE: &str = "schedule.csv";

pub const MATCH_STATS_DIR: &str = "match_stats";
pub const MATCH_STATS_TABLE: &str = "match_stats.csv";

pub const RANKINGS_DIR: &str = "rankings";

/// Parent of every tournament path.
pub const TOURNAMENTS_DIR: &str = "tournaments";

pub const JSON_PATTERN: &str = "*.json";
pub const TABLE_PATTERN: &str = "*.csv";

/// `{tournament path}/{name}`
pub fn within(tournament: &Tournament, name: &str) -> String {
    format!("{}/{name}", tournament.path())
}

/// Filename of a staged table with the given stem.
pub fn table_name(stem: &str) -> String {
    format!("{stem}.csv")
}
