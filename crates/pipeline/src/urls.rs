// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use courtdata_domain::{Circuit, Tournament};

/// The public site.
pub const SITE_ROOT: &str = "https://www.atptour.com";

/// The live-matches gateway queried for active tournaments.
pub const LIVE_FEED_URL: &str = "https://app.atptour.com/api/v2/gateway/livematches/website";

/// Referer/Origin the statistics endpoint expects.
pub const STATS_REFERER: &str = "https://www.atptour.com/";

fn scores_base(tournament: &Tournament) -> String {
    format!(
        "{SITE_ROOT}/en/scores/{}/{}/{}",
        tournament.circuit().scores_url_prefix(),
        tournament.url_slug(),
        tournament.tournament_id()
    )
}

/// Results page; doubles results are a separate view of the same page.
#[must_use]
pub fn results_url(tournament: &Tournament, doubles: bool) -> String {
    let url: String = format!("{}/results", scores_base(tournament));
    if doubles {
        format!("{url}?matchType=doubles")
    } else {
        url
    }
}

/// Daily order of play.
#[must_use]
pub fn schedule_url(tournament: &Tournament) -> String {
    format!("{}/daily-schedule", scores_base(tournament))
}

/// Tournament profile JSON. The endpoint is not year specific.
#[must_use]
pub fn overview_url(tournament_id: u32) -> String {
    format!("{SITE_ROOT}/en/-/tournaments/profile/{tournament_id}/overview")
}

/// Per-match statistics JSON.
#[must_use]
pub fn match_stats_url(year: u16, tournament_id: u32, match_code: &str) -> String {
    format!("{SITE_ROOT}/-/Hawkeye/MatchStats/Complete/{year}/{tournament_id}/{match_code}")
}

/// Singles rankings page.
///
/// Without a date this is the short current list, fetched for its ranking
/// week dropdown; with a date it is the full list for that week.
#[must_use]
pub fn rankings_url(ranking_date: Option<NaiveDate>) -> String {
    let base: String = format!("{SITE_ROOT}/en/rankings/singles");
    match ranking_date {
        None => format!("{base}?rankRange=0-100"),
        Some(date) => format!(
            "{base}?rankRange=0-5000&dateWeek={}",
            date.format("%Y-%m-%d")
        ),
    }
}

/// Live-matches feed for one circuit.
#[must_use]
pub fn live_feed_url(circuit: Circuit) -> String {
    format!(
        "{LIVE_FEED_URL}?scoringTournamentLevel={}",
        circuit.live_feed_level()
    )
}
