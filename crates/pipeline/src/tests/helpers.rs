// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Extractor, FetchError, FetchRequest, Fetcher, Stager};
use chrono::{NaiveDate, NaiveDateTime};
use courtdata_domain::{Circuit, PlayerIdCorrections, Tournament};
use courtdata_persistence::Storage;
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use tempfile::TempDir;

pub const TOURNAMENT_ID: u32 = 375;
pub const YEAR: u16 = 2026;
pub const TOURNAMENT_PATH: &str = "tournaments/tour/375_montpellier/2026";

/// In-memory fetcher answering from a URL table; unknown URLs are a 404.
#[derive(Debug, Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Result<String, FetchError>>,
    requests: RefCell<Vec<FetchRequest>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Ok(body.into()));
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        let url: String = url.into();
        self.responses
            .insert(url.clone(), Err(FetchError::Status { url, status }));
        self
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|r| r.url == url).count()
    }
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Status {
                    url: request.url.clone(),
                    status: 404,
                })
            })
    }
}

/// Fails a set number of times, then succeeds.
#[derive(Debug)]
pub struct FlakyFetcher {
    pub failures: Cell<u32>,
    pub calls: Cell<u32>,
}

impl FlakyFetcher {
    pub const fn new(failures: u32) -> Self {
        Self {
            failures: Cell::new(failures),
            calls: Cell::new(0),
        }
    }
}

impl Fetcher for FlakyFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError> {
        self.calls.set(self.calls.get() + 1);
        if self.failures.get() == 0 {
            return Ok(String::from("ok"));
        }
        self.failures.set(self.failures.get() - 1);
        Err(FetchError::Transport {
            url: request.url.clone(),
            message: format!("attempt {} timed out", self.calls.get()),
        })
    }
}

pub fn run_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 6)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

pub fn storage(dir: &TempDir) -> Storage {
    Storage::at(dir.path(), "atptour", run_datetime())
}

pub fn extractor<'a>(dir: &TempDir, fetcher: &'a FakeFetcher) -> Extractor<&'a FakeFetcher> {
    Extractor::new(storage(dir), fetcher)
}

pub fn stager(dir: &TempDir) -> Stager {
    Stager::new(storage(dir), PlayerIdCorrections::builtin())
}

pub fn tournament() -> Tournament {
    Tournament::new(TOURNAMENT_ID, YEAR, Circuit::Tour, "Montpellier, France").unwrap()
}

pub fn overview_json() -> String {
    json!({
        "SponsorTitle": "Open Occitanie",
        "Location": "Montpellier, France",
        "EventType": "250",
        "Surface": "Hard",
        "InOutdoor": "I",
        "SinglesDrawSize": 28,
        "DoublesDrawSize": 16
    })
    .to_string()
}

pub fn live_feed(events: &[(u32, u16)]) -> String {
    let entries: Vec<Value> = events
        .iter()
        .map(|(id, year)| json!({ "EventId": id, "EventYear": year }))
        .collect();
    json!({ "Data": { "LiveMatchesTournamentsOrdered": entries } }).to_string()
}

pub fn schedule_page(p1_id: &str, p2_id: &str) -> String {
    format!(
        r#"<html><body>
<div class="tournament-day">
  <h4 class="day"><span>Friday, February 6, 2026 (Day 5)</span></h4>
</div>
<div class="schedule" data-datetime="2026-02-06 11:30:00" data-matchdate="2026-02-06" data-suffix="Starts At">
  <div class="schedule-header">
    <div class="schedule-location-timestamp"><span><strong>Court 1</strong></span></div>
  </div>
  <div class="schedule-content">
    <div class="schedule-type">QF</div>
    <div class="schedule-players">
      <div class="player">
        <div class="name"><a href="/en/players/player/{p1_id}/overview">A. Player</a><div class="rank"><span>(1)</span></div></div>
      </div>
      <div class="status">Vs</div>
      <div class="opponent">
        <div class="name"><a href="/en/players/opponent/{p2_id}/overview">C. Opponent</a><div class="rank"><span></span></div></div>
      </div>
    </div>
  </div>
</div>
</body></html>"#
    )
}

fn side_html(id: &str, name: &str, seed: &str, games: [&str; 2], winner: bool) -> String {
    let mark: &str = if winner {
        r#"<div class="winner"><span class="icon-checkmark"></span></div>"#
    } else {
        ""
    };
    format!(
        r#"<div class="stats-item">
  <div class="player-info"><div class="name"><a href="/en/players/x/{id}/overview">{name}</a><span>{seed}</span></div>{mark}</div>
  <div class="scores"><div class="score-item"></div><div class="score-item">{}</div><div class="score-item">{}</div></div>
</div>"#,
        games[0], games[1]
    )
}

/// A straight-sets quarterfinal between `winner_id` and `loser_id`.
pub fn result_match(match_code: &str, winner_id: &str, loser_id: &str) -> String {
    format!(
        r#"<div class="match">
  <div class="match-header"><span><strong>Quarterfinals - Court 1</strong></span><span>01:30:00</span></div>
  <div class="match-content"><div class="match-stats">{}{}</div></div>
  <div class="match-footer">
    <div class="match-umpire">Ump: John Doe</div>
    <div class="match-cta"><a href="/en/players/atp-head-2-head/x">H2H</a><a href="/en/scores/stats-centre/archive/2026/375/{match_code}">Stats</a></div>
  </div>
  <div class="match-notes">Game Set and Match A. Winner.</div>
</div>"#,
        side_html(winner_id, "A. Winner", "(1)", ["<span>6</span>", "<span>6</span>"], true),
        side_html(loser_id, "C. Loser", "", ["<span>4</span>", "<span>3</span>"], false),
    )
}

pub fn results_page(matches: &str) -> String {
    format!(
        r#"<html><body><div class="atp_accordion"><div class="atp_accordion-items">
<div class="atp_accordion-item">
  <div class="atp_accordion-header"><div class="tournament-day"><h4>
    Fri, 06 February, 2026
    <span>Day (5)</span>
  </h4></div></div>
  <div class="atp_accordion-content"><div class="match-group"><div class="match-group-content">{matches}</div></div></div>
</div>
</div></div></body></html>"#
    )
}

pub fn empty_results_page() -> String {
    String::from(r#"<html><body><div class="atp_accordion"><div class="atp_accordion-items"></div></div></body></html>"#)
}

fn number(n: f64) -> Value {
    json!({ "Number": n })
}

fn ratio(dividend: u32, divisor: u32) -> Value {
    json!({ "Number": null, "Dividend": dividend, "Divisor": divisor, "Percent": 50.0 })
}

fn set_stats(aces: f64) -> Value {
    json!({
        "Time": "00:45:00",
        "ServiceStats": {
            "ServiceGamesPlayed": number(5.0),
            "Aces": number(aces),
            "DoubleFaults": number(1.0),
            "FirstServe": ratio(20, 30),
            "FirstServePointsWon": ratio(15, 20),
            "SecondServePointsWon": ratio(6, 10),
            "BreakPointsSaved": ratio(2, 3)
        },
        "ReturnStats": {
            "ReturnGamesPlayed": number(5.0),
            "FirstServeReturnPointsWon": ratio(8, 25),
            "SecondServeReturnPointsWon": ratio(5, 9),
            "BreakPointsConverted": ratio(1, 4)
        },
        "PointStats": {
            "TotalServicePointsWon": ratio(21, 30),
            "TotalReturnPointsWon": ratio(13, 34),
            "TotalPointsWon": ratio(34, 64)
        }
    })
}

fn person(id: &str, first: &str, last: &str) -> Value {
    json!({ "PlayerId": id, "PlayerFirstName": first, "PlayerLastName": last })
}

fn team(player: Value, scores: [Option<u8>; 2]) -> Value {
    json!({
        "Player": player,
        "Partner": null,
        "SetScores": [
            { "SetNumber": 0, "SetScore": null, "TieBreakScore": null, "Stats": set_stats(6.0) },
            { "SetNumber": 1, "SetScore": scores[0], "TieBreakScore": null, "Stats": set_stats(3.0) },
            { "SetNumber": 2, "SetScore": scores[1], "TieBreakScore": null, "Stats": set_stats(3.0) }
        ]
    })
}

/// Statistics document of a straight-sets singles quarterfinal.
pub fn stats_document(winner_id: &str, loser_id: &str) -> String {
    json!({
        "Tournament": {
            "Court": "Hard",
            "StartDate": "2026-02-02T00:00:00",
            "EndDate": "2026-02-08T00:00:00"
        },
        "Match": {
            "RoundName": "Quarterfinals",
            "IsDoubles": false,
            "IsQualifier": false,
            "CourtName": "Court 1",
            "NumberOfSets": 3,
            "ScoringSystem": "3_6G_7TB",
            "Reason": null,
            "DateSeq": "5",
            "MatchTime": "01:30:00",
            "UmpireFirstName": "John",
            "UmpireLastName": "Doe",
            "WinningPlayerId": winner_id,
            "PlayerTeam1": { "PlayerId": winner_id, "SeedPlayerTeam": 1, "EntryStatusPlayerTeam": null },
            "PlayerTeam2": { "PlayerId": loser_id, "SeedPlayerTeam": "", "EntryStatusPlayerTeam": null },
            "PlayerTeam": team(person(winner_id, "Alex", "Winner"), [Some(6), Some(6)]),
            "OpponentTeam": team(person(loser_id, "Chris", "Loser"), [Some(4), Some(3)])
        }
    })
    .to_string()
}

pub fn rankings_dropdown_page(dates: &[&str]) -> String {
    let options: String = dates
        .iter()
        .map(|d| format!(r#"<option value="{d}">{d}</option>"#))
        .collect();
    format!(
        r#"<html><body>
<div class="atp_filters-dropdown" data-key="DateWeek"><select><option value="Current Week">Current Week</option>{options}</select></div>
</body></html>"#
    )
}

pub fn rankings_table_page(player_id: &str) -> String {
    format!(
        r#"<html><body><table class="mega-table"><tbody><tr>
  <td class="rank">1</td>
  <td class="player">
    <svg class="atp-flag"><use href="/assets/atp/flags.svg#flag-ita"></use></svg>
    <a href="/en/players/some-name/{player_id}/overview"><span class="lastName">Sinner</span></a>
  </td>
  <td class="age">24</td>
  <td class="points">11,830</td>
  <td class="pointsMove">-</td>
  <td class="drop">-</td>
  <td class="best">1,000</td>
</tr></tbody></table></body></html>"#
    )
}
