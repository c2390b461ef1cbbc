// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Results page parser.

use crate::error::ParseError;
use crate::html::{element_text, last_path_segment, player_id_from_href, select_text, selector};
use chrono::NaiveDate;
use courtdata_domain::{
    MAX_SETS, MatchStatus, ResultsRow, Round, SeedEntry, SetScore, non_empty,
    parse_duration_seconds,
};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Opening phrase of the notes of a finished match.
const MATCH_COMPLETE_PHRASE: &str = "Game Set and Match";
/// Marker for a walkover in the match notes.
const WALKOVER_MARKER: &str = "by Walkover";
/// Marker for a retirement in the match notes, also appended to the score.
const RETIREMENT_MARKER: &str = "RET";

#[allow(clippy::expect_used)]
static DAY_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Day\s*\((\d+)\)").expect("day pattern is a valid literal"));

#[allow(clippy::expect_used)]
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:\d{2}:\d{2}$").expect("duration pattern is a valid literal"));

struct ResultsSelectors {
    day_block: Selector,
    day_header: Selector,
    match_block: Selector,
    header_spans: Selector,
    strong: Selector,
    notes: Selector,
    sides: Selector,
    winner_marker: Selector,
    name_links: Selector,
    seed: Selector,
    score_items: Selector,
    span: Selector,
    stats_link: Selector,
    umpire: Selector,
}

impl ResultsSelectors {
    fn new() -> Result<Self, ParseError> {
        Ok(Self {
            day_block: selector("div.atp_accordion-item")?,
            day_header: selector(".tournament-day h4")?,
            match_block: selector("div.match")?,
            header_spans: selector(".match-header > span")?,
            strong: selector("strong")?,
            notes: selector(".match-notes")?,
            sides: selector(".match-stats .stats-item")?,
            winner_marker: selector(".player-info .winner")?,
            name_links: selector(".player-info .name a")?,
            seed: selector(".player-info .name > span")?,
            score_items: selector(".scores .score-item")?,
            span: selector("span")?,
            stats_link: selector(r#"a[href*="stats-centre"]"#)?,
            umpire: selector(".match-umpire")?,
        })
    }
}

/// One day's heading on the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsDay {
    /// Calendar date of the day.
    pub date: NaiveDate,
    /// Day-of-tournament number, when printed.
    pub tournament_day: Option<u32>,
}

/// Classifies a match from its notes.
///
/// Returns `None` for matches still in progress.
#[must_use]
pub fn determine_status(notes: &str) -> Option<MatchStatus> {
    let notes: &str = notes.trim();
    if notes.contains(WALKOVER_MARKER) {
        return Some(MatchStatus::Walkover);
    }
    if notes.starts_with(MATCH_COMPLETE_PHRASE) {
        let retired: bool = notes
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| word == RETIREMENT_MARKER);
        return Some(if retired {
            MatchStatus::Retired
        } else {
            MatchStatus::Completed
        });
    }
    None
}

/// Parses a day heading such as `Mon, 02 February, 2026 Day (1)`.
///
/// # Errors
///
/// Returns `ParseError::InvalidValue` when the date cannot be read.
pub fn parse_day_heading(text: &str) -> Result<ResultsDay, ParseError> {
    let tournament_day: Option<u32> = DAY_NUMBER_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    let date_part: &str = DAY_NUMBER_RE
        .find(text)
        .map_or(text, |m| &text[..m.start()])
        .trim();
    let without_weekday: &str = date_part
        .split_once(", ")
        .map_or(date_part, |(_, rest)| rest)
        .trim();

    let date: NaiveDate = NaiveDate::parse_from_str(without_weekday, "%d %B, %Y").map_err(|_| {
        ParseError::InvalidValue {
            field: "results day heading",
            value: text.to_string(),
        }
    })?;
    Ok(ResultsDay {
        date,
        tournament_day,
    })
}

/// Parses one results page.
///
/// Singles and doubles are separate pages; every row takes `is_doubles` from
/// the page, so a doubles row whose partner links are missing fails the
/// partner rule when it is validated. In-progress matches are skipped with a
/// warning. Walkovers carry no duration, score or set columns.
///
/// # Errors
///
/// Returns an error if a day heading or round label cannot be read, or a
/// finished match lacks two sides or a winner marker.
pub fn parse_results(
    html: &str,
    tournament_id: u32,
    year: u16,
    is_doubles: bool,
) -> Result<Vec<ResultsRow>, ParseError> {
    let selectors: ResultsSelectors = ResultsSelectors::new()?;
    let document: Html = Html::parse_document(html);
    let mut rows: Vec<ResultsRow> = Vec::new();

    for day_block in document.select(&selectors.day_block) {
        let Some(heading) = select_text(&day_block, &selectors.day_header) else {
            debug!("Skipping results day without a heading");
            continue;
        };
        let day: ResultsDay = parse_day_heading(&heading)?;

        for match_block in day_block.select(&selectors.match_block) {
            let notes: String = select_text(&match_block, &selectors.notes).unwrap_or_default();
            let Some(status) = determine_status(&notes) else {
                warn!(tournament_id, year, notes = %notes, "Skipping unfinished match");
                continue;
            };
            rows.push(parse_match(
                &match_block,
                &selectors,
                status,
                day,
                (tournament_id, year, is_doubles),
            )?);
        }
    }

    debug!(tournament_id, year, is_doubles, count = rows.len(), "Parsed results page");
    Ok(rows)
}

/// Player fields for one side of a finished match.
struct Side {
    id: String,
    name: Option<String>,
    seed: SeedEntry,
    partner_id: Option<String>,
    partner_name: Option<String>,
    games: Vec<Vec<u8>>,
}

fn parse_match(
    block: &ElementRef<'_>,
    selectors: &ResultsSelectors,
    status: MatchStatus,
    day: ResultsDay,
    (tournament_id, year, is_doubles): (u32, u16, bool),
) -> Result<ResultsRow, ParseError> {
    let header_spans: Vec<ElementRef<'_>> = block.select(&selectors.header_spans).collect();
    let heading: String = header_spans
        .first()
        .and_then(|span| select_text(span, &selectors.strong))
        .ok_or(ParseError::MissingElement {
            context: "match header round label (.match-header strong)",
        })?;
    let (round_text, court_name): (&str, Option<String>) = match heading.split_once(" - ") {
        Some((round, court)) => (round, non_empty(court)),
        None => (heading.as_str(), None),
    };
    let round: Round = Round::from_label(round_text)?;

    let side_blocks: Vec<ElementRef<'_>> = block.select(&selectors.sides).collect();
    if side_blocks.len() < 2 {
        return Err(ParseError::MissingElement {
            context: "match sides (.match-stats .stats-item)",
        });
    }
    let winner_index: usize = side_blocks
        .iter()
        .position(|side| side.select(&selectors.winner_marker).next().is_some())
        .ok_or(ParseError::MissingElement {
            context: "winner marker (.player-info .winner)",
        })?;
    let loser_index: usize = usize::from(winner_index == 0);
    let winner: Side = parse_side(&side_blocks[winner_index], selectors)?;
    let loser: Side = parse_side(&side_blocks[loser_index], selectors)?;

    let (duration_seconds, sets, score): (Option<u32>, Vec<SetScore>, Option<String>) =
        if status == MatchStatus::Walkover {
            (None, Vec::new(), None)
        } else {
            let duration: Option<u32> = header_spans
                .iter()
                .map(element_text)
                .find(|text| DURATION_RE.is_match(text))
                .map(|text| parse_duration_seconds(Some(&text)))
                .transpose()?
                .flatten();
            let sets: Vec<SetScore> = pair_sets(&winner.games, &loser.games);
            let score: String = format_score(&sets, status == MatchStatus::Retired);
            (duration, sets, non_empty(&score))
        };

    let match_code: Option<String> = block
        .select(&selectors.stats_link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(last_path_segment);
    let umpire: Option<String> = select_text(block, &selectors.umpire).and_then(|text| {
        let name: &str = text.strip_prefix("Ump:").unwrap_or(&text);
        non_empty(name)
    });

    let mut row: ResultsRow = ResultsRow {
        tournament_id,
        year,
        match_date: day.date,
        tournament_day: day.tournament_day,
        round,
        court_name,
        match_code,
        match_status: status,
        duration_seconds,
        score,
        umpire,
        is_doubles,
        winner_id: winner.id,
        winner_name: winner.name,
        winner_seed: winner.seed.seed,
        winner_entry: winner.seed.entry,
        winner_partner_id: winner.partner_id,
        winner_partner_name: winner.partner_name,
        loser_id: loser.id,
        loser_name: loser.name,
        loser_seed: loser.seed.seed,
        loser_entry: loser.seed.entry,
        loser_partner_id: loser.partner_id,
        loser_partner_name: loser.partner_name,
        w_set1: None,
        l_set1: None,
        tb_set1: None,
        w_set2: None,
        l_set2: None,
        tb_set2: None,
        w_set3: None,
        l_set3: None,
        tb_set3: None,
        w_set4: None,
        l_set4: None,
        tb_set4: None,
        w_set5: None,
        l_set5: None,
        tb_set5: None,
        match_uid: String::new(),
    };
    row.set_set_scores(&sets);
    Ok(row)
}

fn parse_side(side: &ElementRef<'_>, selectors: &ResultsSelectors) -> Result<Side, ParseError> {
    let mut links = side.select(&selectors.name_links);
    let player: ElementRef<'_> = links.next().ok_or(ParseError::MissingElement {
        context: "player link (.player-info .name a)",
    })?;
    let partner: Option<ElementRef<'_>> = links.next();

    let href: &str = player.value().attr("href").unwrap_or_default();
    let id: String = player_id_from_href(href).ok_or_else(|| ParseError::InvalidValue {
        field: "player link",
        value: href.to_string(),
    })?;

    // The first item is a spacer.
    let games: Vec<Vec<u8>> = side
        .select(&selectors.score_items)
        .skip(1)
        .map(|item| {
            item.select(&selectors.span)
                .filter_map(|span| element_text(&span).parse::<u8>().ok())
                .collect()
        })
        .collect();

    Ok(Side {
        id,
        name: non_empty(&element_text(&player)),
        seed: SeedEntry::parse(select_text(side, &selectors.seed).as_deref()),
        partner_id: partner
            .and_then(|a| a.value().attr("href"))
            .and_then(player_id_from_href),
        partner_name: partner.and_then(|a| non_empty(&element_text(&a))),
        games,
    })
}

/// Pairs both sides' score items into sets. A set ends the list as soon as
/// either side has no games for it. The tiebreak is whichever side printed a
/// second number.
fn pair_sets(winner: &[Vec<u8>], loser: &[Vec<u8>]) -> Vec<SetScore> {
    winner
        .iter()
        .zip(loser)
        .take(MAX_SETS)
        .map_while(|(w, l)| {
            let (&w_games, &l_games) = (w.first()?, l.first()?);
            Some(SetScore {
                winner: Some(w_games),
                loser: Some(l_games),
                tiebreak: w.get(1).or_else(|| l.get(1)).copied(),
            })
        })
        .collect()
}

/// Formats sets as `6-4 7-6(5)`, with ` RET` appended for retirements.
fn format_score(sets: &[SetScore], retired: bool) -> String {
    let mut parts: Vec<String> = sets
        .iter()
        .filter_map(|set| {
            let (w, l) = (set.winner?, set.loser?);
            Some(set.tiebreak.map_or_else(
                || format!("{w}-{l}"),
                |tb| format!("{w}-{l}({tb})"),
            ))
        })
        .collect();
    if retired {
        parts.push(String::from(RETIREMENT_MARKER));
    }
    parts.join(" ")
}
