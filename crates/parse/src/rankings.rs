// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rankings page parsers: the ranking-week dropdown and the rankings table.

use crate::error::ParseError;
use crate::html::{element_text, has_class, player_id_from_href, select_text, selector};
use chrono::NaiveDate;
use courtdata_domain::{RankingsRow, non_empty};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Filename prefix of raw rankings pages.
pub const RANKINGS_STEM_PREFIX: &str = "rankings_singles_";

/// Dropdown option that stands for the latest week rather than a date.
const CURRENT_WEEK_OPTION: &str = "Current Week";

/// Parses the ranking date encoded in a stem `rankings_singles_YYYYMMDD`.
///
/// # Errors
///
/// Returns `ParseError::InvalidValue` when the stem does not carry a date.
pub fn ranking_date_from_stem(stem: &str) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::InvalidValue {
        field: "rankings page stem",
        value: stem.to_string(),
    };
    let stamp: &str = stem.strip_prefix(RANKINGS_STEM_PREFIX).ok_or_else(invalid)?;
    NaiveDate::parse_from_str(stamp, "%Y%m%d").map_err(|_| invalid())
}

/// Lists the ranking weeks offered by the page's week dropdown, ascending.
///
/// # Errors
///
/// Returns `ParseError::MissingElement` when the dropdown is absent, or
/// `ParseError::InvalidValue` for an option that is not an ISO date.
pub fn parse_ranking_dates(html: &str) -> Result<Vec<NaiveDate>, ParseError> {
    let dropdown: Selector = selector(r#"div.atp_filters-dropdown[data-key="DateWeek"] select"#)?;
    let option: Selector = selector("option")?;
    let document: Html = Html::parse_document(html);

    let select: ElementRef<'_> =
        document
            .select(&dropdown)
            .next()
            .ok_or(ParseError::MissingElement {
                context: "DateWeek dropdown on the rankings page",
            })?;

    let mut dates: Vec<NaiveDate> = Vec::new();
    for entry in select.select(&option) {
        let value: &str = entry.value().attr("value").unwrap_or_default().trim();
        if value.is_empty() || value == CURRENT_WEEK_OPTION {
            continue;
        }
        let date: NaiveDate =
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ParseError::InvalidValue {
                field: "ranking week option",
                value: value.to_string(),
            })?;
        dates.push(date);
    }
    dates.sort_unstable();
    dates.dedup();
    Ok(dates)
}

struct RankingsSelectors {
    row: Selector,
    rank: Selector,
    player_link: Selector,
    flag: Selector,
    age: Selector,
    points: Selector,
    points_move: Selector,
    dropping: Selector,
    next_best: Selector,
    rank_move: Selector,
}

impl RankingsSelectors {
    fn new() -> Result<Self, ParseError> {
        Ok(Self {
            row: selector("table.mega-table tbody tr")?,
            rank: selector("td.rank")?,
            player_link: selector("td.player a")?,
            flag: selector("td.player use")?,
            age: selector("td.age")?,
            points: selector("td.points")?,
            points_move: selector("td.pointsMove")?,
            dropping: selector("td.drop")?,
            next_best: selector("td.best")?,
            rank_move: selector("span.rank-up, span.rank-down")?,
        })
    }
}

/// Parses one rankings table.
///
/// Rows without a rank cell are advertisement rows and are skipped. A
/// trailing `T` (tie marker) on the rank is dropped. A lone dash in a
/// numeric cell reads as empty; thousands separators are ignored.
///
/// # Errors
///
/// Returns `ParseError::InvalidValue` for a rank or numeric cell that cannot
/// be read, or a player link without an id.
pub fn parse_rankings(html: &str, ranking_date: NaiveDate) -> Result<Vec<RankingsRow>, ParseError> {
    let selectors: RankingsSelectors = RankingsSelectors::new()?;
    let document: Html = Html::parse_document(html);
    let mut rows: Vec<RankingsRow> = Vec::new();

    for tr in document.select(&selectors.row) {
        let Some(rank_text) = select_text(&tr, &selectors.rank) else {
            continue;
        };
        let rank_token: &str = rank_text.split_whitespace().next().unwrap_or_default();
        let rank: u32 = rank_token
            .trim_end_matches(['T', 't'])
            .parse()
            .map_err(|_| ParseError::InvalidValue {
                field: "rank",
                value: rank_text.clone(),
            })?;

        let link: ElementRef<'_> =
            tr.select(&selectors.player_link)
                .next()
                .ok_or(ParseError::MissingElement {
                    context: "player link in a rankings row (td.player a)",
                })?;
        let href: &str = link.value().attr("href").unwrap_or_default();
        let player_id: String = player_id_from_href(href).ok_or_else(|| ParseError::InvalidValue {
            field: "player link",
            value: href.to_string(),
        })?;

        let nationality: Option<String> = tr.select(&selectors.flag).next().and_then(|flag| {
            let reference: &str = flag
                .value()
                .attr("href")
                .or_else(|| flag.value().attr("xlink:href"))?;
            let (_, code) = reference.split_once("#flag-")?;
            non_empty(&code.to_uppercase())
        });

        rows.push(RankingsRow {
            ranking_date,
            rank,
            player_id,
            player_name: non_empty(&element_text(&link)),
            nationality,
            age: cell_number(&tr, &selectors.age, "age")?,
            points: cell_number(&tr, &selectors.points, "points")?,
            rank_move: rank_movement(&tr, &selectors)?,
            points_move: cell_number(&tr, &selectors.points_move, "points movement")?,
            points_dropping: cell_number(&tr, &selectors.dropping, "points dropping")?,
            next_best: cell_number(&tr, &selectors.next_best, "next best")?,
        });
    }

    debug!(%ranking_date, count = rows.len(), "Parsed rankings page");
    Ok(rows)
}

/// Reads a numeric cell. An absent cell, empty text or a dash reads as `None`.
fn cell_number<T: std::str::FromStr>(
    tr: &ElementRef<'_>,
    cell: &Selector,
    field: &'static str,
) -> Result<Option<T>, ParseError> {
    let Some(text) = select_text(tr, cell) else {
        return Ok(None);
    };
    let cleaned: String = text.replace(',', "");
    let cleaned: &str = cleaned.trim().trim_start_matches('+');
    if cleaned.is_empty() || cleaned == "-" {
        return Ok(None);
    }
    cleaned
        .parse()
        .map(Some)
        .map_err(|_| ParseError::InvalidValue { field, value: text })
}

/// Signed rank movement from the up/down indicator, `None` when neither is
/// present.
fn rank_movement(tr: &ElementRef<'_>, selectors: &RankingsSelectors) -> Result<Option<i32>, ParseError> {
    let Some(indicator) = tr.select(&selectors.rank_move).next() else {
        return Ok(None);
    };
    let text: String = element_text(&indicator);
    let magnitude: i32 = text
        .trim()
        .trim_start_matches(['+', '-'])
        .parse()
        .map_err(|_| ParseError::InvalidValue {
            field: "rank movement",
            value: text.clone(),
        })?;
    Ok(Some(if has_class(&indicator, "rank-down") {
        -magnitude
    } else {
        magnitude
    }))
}
