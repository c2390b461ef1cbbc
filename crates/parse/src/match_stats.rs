// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-match statistics document parser.
//!
//! The document nests tournament metadata, a match header and two team
//! blocks, each team carrying a list of per-set statistics. One row is
//! produced per player per set, with set 0 holding the match totals.

use crate::error::ParseError;
use chrono::NaiveDate;
use courtdata_domain::{MatchStatsRow, Round, SeedEntry, non_empty, non_empty_opt, parse_duration_seconds};
use serde::Deserialize;
use serde_json::Number;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MatchStatsDocument {
    tournament: TournamentBlock,
    #[serde(rename = "Match")]
    match_block: MatchBlock,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TournamentBlock {
    #[serde(default)]
    court: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MatchBlock {
    round_name: String,
    #[serde(default)]
    is_doubles: bool,
    #[serde(default)]
    is_qualifier: bool,
    #[serde(default)]
    court_name: Option<String>,
    #[serde(default)]
    number_of_sets: Option<u8>,
    #[serde(default)]
    scoring_system: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    date_seq: Option<NumberOrText>,
    #[serde(default)]
    match_time: Option<String>,
    #[serde(default)]
    umpire_first_name: Option<String>,
    #[serde(default)]
    umpire_last_name: Option<String>,
    #[serde(default)]
    winning_player_id: Option<String>,
    #[serde(default)]
    player_team1: Option<TeamEntry>,
    #[serde(default)]
    player_team2: Option<TeamEntry>,
    player_team: Team,
    opponent_team: Team,
}

/// Seed and entry metadata for one team.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TeamEntry {
    player_id: String,
    #[serde(default)]
    seed_player_team: Option<NumberOrText>,
    #[serde(default)]
    entry_status_player_team: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Team {
    player: Person,
    #[serde(default)]
    partner: Option<Person>,
    #[serde(default)]
    set_scores: Vec<SetBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Person {
    player_id: String,
    #[serde(default)]
    player_first_name: Option<String>,
    #[serde(default)]
    player_last_name: Option<String>,
}

impl Person {
    fn full_name(&self) -> Option<String> {
        join_name(
            self.player_first_name.as_deref(),
            self.player_last_name.as_deref(),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SetBlock {
    set_number: u8,
    #[serde(default)]
    set_score: Option<NumberOrText>,
    #[serde(default)]
    tie_break_score: Option<NumberOrText>,
    #[serde(default)]
    stats: Option<SetStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SetStats {
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    service_stats: Option<ServiceStats>,
    #[serde(default)]
    return_stats: Option<ReturnStats>,
    #[serde(default)]
    point_stats: Option<PointStats>,
}

impl SetStats {
    const fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.service_stats.is_none()
            && self.return_stats.is_none()
            && self.point_stats.is_none()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ServiceStats {
    service_games_played: Option<Counter>,
    serve_rating: Option<Counter>,
    aces: Option<Counter>,
    double_faults: Option<Counter>,
    first_serve: Option<Counter>,
    first_serve_points_won: Option<Counter>,
    second_serve_points_won: Option<Counter>,
    break_points_saved: Option<Counter>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ReturnStats {
    return_games_played: Option<Counter>,
    return_rating: Option<Counter>,
    first_serve_return_points_won: Option<Counter>,
    second_serve_return_points_won: Option<Counter>,
    break_points_converted: Option<Counter>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PointStats {
    total_service_points_won: Option<Counter>,
    total_return_points_won: Option<Counter>,
    total_points_won: Option<Counter>,
}

/// A counter as published: a plain number or a dividend/divisor ratio.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Counter {
    #[serde(default)]
    number: Option<Number>,
    #[serde(default)]
    dividend: Option<Number>,
    #[serde(default)]
    divisor: Option<Number>,
    #[serde(default)]
    percent: Option<Number>,
}

static EMPTY_COUNTER: Counter = Counter {
    number: None,
    dividend: None,
    divisor: None,
    percent: None,
};

fn counter(value: Option<&Counter>) -> &Counter {
    value.unwrap_or(&EMPTY_COUNTER)
}

/// Reads a count. Whole floats such as `5.0` are accepted.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn count(value: Option<&Number>) -> Option<u32> {
    let number: &Number = value?;
    number
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(f))
                .map(|f| f as u32)
        })
}

fn ratio(value: Option<&Number>) -> Option<f64> {
    value.and_then(Number::as_f64)
}

/// Some integer fields arrive as either a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

impl NumberOrText {
    fn to_u32(&self, field: &'static str) -> Result<Option<u32>, ParseError> {
        match self {
            Self::Number(n) => u32::try_from(*n)
                .map(Some)
                .map_err(|_| ParseError::InvalidValue {
                    field,
                    value: n.to_string(),
                }),
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => {
                text.trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| ParseError::InvalidValue {
                        field,
                        value: text.clone(),
                    })
            }
        }
    }

    fn to_u8(&self, field: &'static str) -> Result<Option<u8>, ParseError> {
        self.to_u32(field)?
            .map(|n| {
                u8::try_from(n).map_err(|_| ParseError::InvalidValue {
                    field,
                    value: n.to_string(),
                })
            })
            .transpose()
    }
}

fn optional_u32(
    value: Option<&NumberOrText>,
    field: &'static str,
) -> Result<Option<u32>, ParseError> {
    value.map_or(Ok(None), |v| v.to_u32(field))
}

fn optional_u8(value: Option<&NumberOrText>, field: &'static str) -> Result<Option<u8>, ParseError> {
    value.map_or(Ok(None), |v| v.to_u8(field))
}

fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    non_empty(&parts.join(" "))
}

fn date_prefix(value: Option<&str>, field: &'static str) -> Result<Option<NaiveDate>, ParseError> {
    let Some(text) = value.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    let prefix: &str = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ParseError::InvalidValue {
            field,
            value: text.to_string(),
        })
}

/// Match-level columns shared by every row of one document.
struct MatchContext {
    surface: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    round: Round,
    tournament_day: Option<u32>,
    match_duration_seconds: Option<u32>,
    umpire: Option<String>,
    winning_id: Option<String>,
    entries: HashMap<String, SeedEntry>,
}

/// Parses one statistics document into per-player, per-set rows.
///
/// Both team perspectives are emitted: the player team's sets first, then the
/// opponent team's. Sets without a statistics payload are skipped. Partners
/// are only read for doubles.
///
/// # Arguments
///
/// * `json` - The raw document text
/// * `match_code` - The match code the document was fetched for
/// * `tournament_id` - The tournament id
/// * `year` - The tournament year
///
/// # Errors
///
/// Returns an error if the document is not valid JSON of the expected shape,
/// the round name is not in the round display table, or a date, duration or
/// numeric field cannot be read.
pub fn parse_match_stats(
    json: &str,
    match_code: &str,
    tournament_id: u32,
    year: u16,
) -> Result<Vec<MatchStatsRow>, ParseError> {
    let document: MatchStatsDocument =
        serde_json::from_str(json).map_err(|source| ParseError::Json {
            context: format!("match statistics {match_code}"),
            source,
        })?;
    let tournament: &TournamentBlock = &document.tournament;
    let header: &MatchBlock = &document.match_block;

    let mut entries: HashMap<String, SeedEntry> = HashMap::new();
    for entry in [&header.player_team1, &header.player_team2]
        .into_iter()
        .flatten()
    {
        entries.insert(
            entry.player_id.trim().to_uppercase(),
            SeedEntry {
                seed: optional_u32(entry.seed_player_team.as_ref(), "SeedPlayerTeam")?,
                entry: non_empty_opt(entry.entry_status_player_team.clone()),
            },
        );
    }

    let context: MatchContext = MatchContext {
        surface: non_empty_opt(tournament.court.clone()),
        start_date: date_prefix(tournament.start_date.as_deref(), "tournament StartDate")?,
        end_date: date_prefix(tournament.end_date.as_deref(), "tournament EndDate")?,
        round: Round::from_display(&header.round_name)?,
        tournament_day: optional_u32(header.date_seq.as_ref(), "DateSeq")?,
        match_duration_seconds: parse_duration_seconds(header.match_time.as_deref())?,
        umpire: match (&header.umpire_first_name, &header.umpire_last_name) {
            (Some(first), Some(last)) => join_name(Some(first), Some(last)),
            _ => None,
        },
        winning_id: header
            .winning_player_id
            .as_deref()
            .map(|id| id.trim().to_uppercase()),
        entries,
    };

    let mut rows: Vec<MatchStatsRow> = Vec::new();
    for (own, other) in [
        (&header.player_team, &header.opponent_team),
        (&header.opponent_team, &header.player_team),
    ] {
        for set in &own.set_scores {
            let Some(stats) = set.stats.as_ref().filter(|s| !s.is_empty()) else {
                continue;
            };
            rows.push(build_row(
                &context,
                header,
                (own, other),
                set,
                stats,
                (match_code, tournament_id, year),
            )?);
        }
    }

    debug!(match_code, tournament_id, year, count = rows.len(), "Parsed match statistics");
    Ok(rows)
}

#[allow(clippy::too_many_lines)]
fn build_row(
    context: &MatchContext,
    header: &MatchBlock,
    (own, other): (&Team, &Team),
    set: &SetBlock,
    stats: &SetStats,
    (match_code, tournament_id, year): (&str, u32, u16),
) -> Result<MatchStatsRow, ParseError> {
    let player_key: String = own.player.player_id.trim().to_uppercase();
    let opponent_key: String = other.player.player_id.trim().to_uppercase();
    let player_meta: Option<&SeedEntry> = context.entries.get(&player_key);
    let opponent_meta: Option<&SeedEntry> = context.entries.get(&opponent_key);

    let (own_partner, other_partner): (Option<&Person>, Option<&Person>) = if header.is_doubles {
        (own.partner.as_ref(), other.partner.as_ref())
    } else {
        (None, None)
    };

    let empty_service: ServiceStats = ServiceStats::default();
    let svc: &ServiceStats = stats.service_stats.as_ref().unwrap_or(&empty_service);
    let empty_return: ReturnStats = ReturnStats::default();
    let ret: &ReturnStats = stats.return_stats.as_ref().unwrap_or(&empty_return);
    let empty_points: PointStats = PointStats::default();
    let pts: &PointStats = stats.point_stats.as_ref().unwrap_or(&empty_points);

    let first_serve: &Counter = counter(svc.first_serve.as_ref());
    let first_won: &Counter = counter(svc.first_serve_points_won.as_ref());
    let second_won: &Counter = counter(svc.second_serve_points_won.as_ref());
    let bp_saved: &Counter = counter(svc.break_points_saved.as_ref());
    let ret_first: &Counter = counter(ret.first_serve_return_points_won.as_ref());
    let ret_second: &Counter = counter(ret.second_serve_return_points_won.as_ref());
    let bp_converted: &Counter = counter(ret.break_points_converted.as_ref());
    let service_pts: &Counter = counter(pts.total_service_points_won.as_ref());
    let return_pts: &Counter = counter(pts.total_return_points_won.as_ref());
    let total_pts: &Counter = counter(pts.total_points_won.as_ref());

    Ok(MatchStatsRow {
        tournament_id,
        year,
        surface: context.surface.clone(),
        tournament_start_date: context.start_date,
        tournament_end_date: context.end_date,
        match_code: match_code.to_string(),
        round: Some(context.round),
        court_name: non_empty_opt(header.court_name.clone()),
        is_doubles: header.is_doubles,
        is_qualifier: header.is_qualifier,
        match_duration_seconds: context.match_duration_seconds,
        best_of: header.number_of_sets,
        scoring_system: non_empty_opt(header.scoring_system.clone()),
        reason: non_empty_opt(header.reason.clone()),
        tournament_day: context.tournament_day,
        umpire: context.umpire.clone(),
        set_num: set.set_number,
        set_score: optional_u8(set.set_score.as_ref(), "SetScore")?,
        tiebreak_score: optional_u8(set.tie_break_score.as_ref(), "TieBreakScore")?,
        set_duration_seconds: parse_duration_seconds(stats.time.as_deref())?,
        player_id: own.player.player_id.trim().to_string(),
        player_name: own.player.full_name(),
        opponent_id: other.player.player_id.trim().to_string(),
        opponent_name: other.player.full_name(),
        is_winner: context.winning_id.as_deref() == Some(player_key.as_str()),
        player_seed: player_meta.and_then(|m| m.seed),
        player_entry: player_meta.and_then(|m| m.entry.clone()),
        opponent_seed: opponent_meta.and_then(|m| m.seed),
        opponent_entry: opponent_meta.and_then(|m| m.entry.clone()),
        player_partner_id: own_partner.and_then(|p| non_empty(&p.player_id)),
        player_partner_name: own_partner.and_then(Person::full_name),
        opponent_partner_id: other_partner.and_then(|p| non_empty(&p.player_id)),
        opponent_partner_name: other_partner.and_then(Person::full_name),

        svc_games_played: count(counter(svc.service_games_played.as_ref()).number.as_ref()),
        svc_rating: ratio(counter(svc.serve_rating.as_ref()).number.as_ref()),
        svc_aces: count(counter(svc.aces.as_ref()).number.as_ref()),
        svc_double_faults: count(counter(svc.double_faults.as_ref()).number.as_ref()),
        svc_first_serve_in: count(first_serve.dividend.as_ref()),
        svc_first_serve_att: count(first_serve.divisor.as_ref()),
        svc_first_serve_in_pct: ratio(first_serve.percent.as_ref()),
        svc_first_serve_pts_won: count(first_won.dividend.as_ref()),
        svc_first_serve_pts_played: count(first_won.divisor.as_ref()),
        svc_first_serve_pts_won_pct: ratio(first_won.percent.as_ref()),
        svc_second_serve_pts_won: count(second_won.dividend.as_ref()),
        svc_second_serve_pts_played: count(second_won.divisor.as_ref()),
        svc_second_serve_pts_won_pct: ratio(second_won.percent.as_ref()),
        svc_bp_saved: count(bp_saved.dividend.as_ref()),
        svc_bp_faced: count(bp_saved.divisor.as_ref()),
        svc_bp_saved_pct: ratio(bp_saved.percent.as_ref()),

        ret_games_played: count(counter(ret.return_games_played.as_ref()).number.as_ref()),
        ret_rating: ratio(counter(ret.return_rating.as_ref()).number.as_ref()),
        ret_first_serve_pts_won: count(ret_first.dividend.as_ref()),
        ret_first_serve_pts_played: count(ret_first.divisor.as_ref()),
        ret_first_serve_pts_won_pct: ratio(ret_first.percent.as_ref()),
        ret_second_serve_pts_won: count(ret_second.dividend.as_ref()),
        ret_second_serve_pts_played: count(ret_second.divisor.as_ref()),
        ret_second_serve_pts_won_pct: ratio(ret_second.percent.as_ref()),
        ret_bp_converted: count(bp_converted.dividend.as_ref()),
        ret_bp_opportunities: count(bp_converted.divisor.as_ref()),
        ret_bp_converted_pct: ratio(bp_converted.percent.as_ref()),

        pts_service_won: count(service_pts.dividend.as_ref()),
        pts_service_played: count(service_pts.divisor.as_ref()),
        pts_service_won_pct: ratio(service_pts.percent.as_ref()),
        pts_return_won: count(return_pts.dividend.as_ref()),
        pts_return_played: count(return_pts.divisor.as_ref()),
        pts_return_won_pct: ratio(return_pts.percent.as_ref()),
        pts_total_won: count(total_pts.dividend.as_ref()),
        pts_total_played: count(total_pts.divisor.as_ref()),
        pts_total_won_pct: ratio(total_pts.percent.as_ref()),

        match_uid: String::new(),
        sets_played: None,
        won_set: None,
        tiebreak_points_won: None,
        tiebreak_points_played: None,
    })
}
