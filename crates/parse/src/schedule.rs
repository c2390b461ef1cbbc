// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily schedule snapshot parser.

use crate::error::ParseError;
use crate::html::{element_text, has_class, player_id_from_href, select_text, selector};
use chrono::NaiveDateTime;
use courtdata_domain::{SeedEntry, StagedScheduleRow, non_empty};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

/// Filename prefix of raw schedule snapshots.
pub const SCHEDULE_STEM_PREFIX: &str = "schedule_";

#[allow(clippy::expect_used)]
static DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(Day\s*(\d+)\)").expect("day pattern is a valid literal"));

/// Player fields for one side of a scheduled match.
#[derive(Debug, Default)]
struct Side {
    id: Option<String>,
    name: Option<String>,
    seed: SeedEntry,
    partner_id: Option<String>,
    partner_name: Option<String>,
}

struct ScheduleSelectors {
    day: Selector,
    block: Selector,
    court: Selector,
    round: Selector,
    match_type: Selector,
    player_side: Selector,
    opponent_side: Selector,
    team_names: Selector,
    team_links: Selector,
    team_seed: Selector,
    single_link: Selector,
    single_seed: Selector,
    any_link: Selector,
}

impl ScheduleSelectors {
    fn new() -> Result<Self, ParseError> {
        Ok(Self {
            day: selector("div.tournament-day h4")?,
            block: selector("div.schedule")?,
            court: selector(".schedule-header .schedule-location-timestamp strong")?,
            round: selector(".schedule-content .schedule-type")?,
            match_type: selector(".schedule-cta span.match-type")?,
            player_side: selector(".schedule-players .player")?,
            opponent_side: selector(".schedule-players .opponent")?,
            team_names: selector(".players .names")?,
            team_links: selector(".names .name a")?,
            team_seed: selector(".players > .rank span")?,
            single_link: selector(".name a")?,
            single_seed: selector(".name .rank span")?,
            any_link: selector("a")?,
        })
    }
}

/// Parses the capture time encoded in a snapshot stem `schedule_YYYYMMDD_HHMMSS`.
///
/// # Errors
///
/// Returns `ParseError::InvalidValue` when the stem does not carry a timestamp.
pub fn snapshot_datetime_from_stem(stem: &str) -> Result<NaiveDateTime, ParseError> {
    let invalid = || ParseError::InvalidValue {
        field: "schedule snapshot stem",
        value: stem.to_string(),
    };
    let stamp: &str = stem.strip_prefix(SCHEDULE_STEM_PREFIX).ok_or_else(invalid)?;
    NaiveDateTime::parse_from_str(stamp, "%Y%m%d_%H%M%S").map_err(|_| invalid())
}

/// Parses one schedule snapshot into staged rows, in page order.
///
/// A court name is printed only on the first match of a run of matches on the
/// same court; later matches inherit it and count up from 1. Blocks for
/// another tour's matches and blocks without a round label still advance the
/// court count but produce no row. A page with neither a day heading nor any
/// match block yields no rows.
///
/// # Arguments
///
/// * `html` - The snapshot page
/// * `tournament_id` - The tournament id
/// * `year` - The tournament year
/// * `snapshot_datetime` - When the snapshot was captured
///
/// # Errors
///
/// Returns an error if a selector fails to compile.
pub fn parse_schedule(
    html: &str,
    tournament_id: u32,
    year: u16,
    snapshot_datetime: NaiveDateTime,
) -> Result<Vec<StagedScheduleRow>, ParseError> {
    let selectors: ScheduleSelectors = ScheduleSelectors::new()?;
    let document: Html = Html::parse_document(html);
    let root: ElementRef<'_> = document.root_element();

    let tournament_day: Option<u32> = select_text(&root, &selectors.day).and_then(|text| {
        DAY_RE
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    });
    let blocks: Vec<ElementRef<'_>> = root.select(&selectors.block).collect();
    if tournament_day.is_none() && blocks.is_empty() {
        debug!(tournament_id, year, "Empty schedule page");
        return Ok(Vec::new());
    }

    let mut rows: Vec<StagedScheduleRow> = Vec::new();
    let mut court_name: Option<String> = None;
    let mut court_match_num: u32 = 0;

    for block in blocks {
        if let Some(court) = select_text(&block, &selectors.court) {
            court_name = Some(court);
            court_match_num = 1;
        } else {
            court_match_num += 1;
        }

        if let Some(marker) = select_text(&block, &selectors.match_type)
            && !marker.eq_ignore_ascii_case("ATP")
        {
            debug!(marker = %marker, court_match_num, "Skipping other tour's match");
            continue;
        }
        let Some(round_text) = select_text(&block, &selectors.round) else {
            debug!(court_match_num, "Skipping schedule block without a round");
            continue;
        };

        let is_doubles: bool = block.select(&selectors.team_names).next().is_some();
        let p1: Side = parse_side(
            block.select(&selectors.player_side).next(),
            is_doubles,
            &selectors,
        );
        let p2: Side = parse_side(
            block.select(&selectors.opponent_side).next(),
            is_doubles,
            &selectors,
        );

        let attr = |name: &str| block.value().attr(name).and_then(non_empty);
        rows.push(StagedScheduleRow {
            snapshot_datetime,
            tournament_id,
            year,
            match_date_str: attr("data-matchdate"),
            start_time_str: attr("data-datetime"),
            time_suffix: attr("data-suffix"),
            tournament_day,
            court_name: court_name.clone(),
            court_match_num,
            round_text,
            is_doubles,
            p1_id: p1.id,
            p1_name: p1.name,
            p1_seed: p1.seed.seed,
            p1_entry: p1.seed.entry,
            p1_partner_id: p1.partner_id,
            p1_partner_name: p1.partner_name,
            p2_id: p2.id,
            p2_name: p2.name,
            p2_seed: p2.seed.seed,
            p2_entry: p2.seed.entry,
            p2_partner_id: p2.partner_id,
            p2_partner_name: p2.partner_name,
        });
    }

    debug!(tournament_id, year, count = rows.len(), "Parsed schedule snapshot");
    Ok(rows)
}

/// Reads one side. Placeholder ("possible") sides and sides without a
/// profile link are left empty.
fn parse_side(side: Option<ElementRef<'_>>, is_doubles: bool, selectors: &ScheduleSelectors) -> Side {
    let Some(side) = side else {
        return Side::default();
    };
    if has_class(&side, "possible") || side.select(&selectors.any_link).next().is_none() {
        return Side::default();
    }

    if is_doubles {
        let mut links = side.select(&selectors.team_links);
        let first: Option<ElementRef<'_>> = links.next();
        let second: Option<ElementRef<'_>> = links.next();
        return Side {
            id: first.and_then(|a| link_player_id(&a)),
            name: first.and_then(|a| non_empty(&element_text(&a))),
            seed: SeedEntry::parse(select_text(&side, &selectors.team_seed).as_deref()),
            partner_id: second.and_then(|a| link_player_id(&a)),
            partner_name: second.and_then(|a| non_empty(&element_text(&a))),
        };
    }

    let link: Option<ElementRef<'_>> = side.select(&selectors.single_link).next();
    Side {
        id: link.and_then(|a| link_player_id(&a)),
        name: link.and_then(|a| non_empty(&element_text(&a))),
        seed: SeedEntry::parse(select_text(&side, &selectors.single_seed).as_deref()),
        partner_id: None,
        partner_name: None,
    }
}

fn link_player_id(link: &ElementRef<'_>) -> Option<String> {
    link.value().attr("href").and_then(player_id_from_href)
}
