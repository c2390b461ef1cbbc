// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use courtdata_domain::{
    PlayerIdCorrections, Round, ScheduleRecord, ScheduleRow, StagedScheduleRecord,
    StagedScheduleRow, TimeSuffix,
};
use std::collections::HashMap;
use tracing::debug;

/// Format of published start times and stored timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Assumed length of a singles match when chaining estimated start times.
pub const SINGLES_MATCH_ESTIMATE: TimeDelta = TimeDelta::hours(2);

/// Assumed length of a doubles match when chaining estimated start times.
pub const DOUBLES_MATCH_ESTIMATE: TimeDelta = TimeDelta::minutes(90);

/// The result of consolidating a tournament's schedule snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConsolidation {
    /// One record per match, ordered by day, court and position on court.
    pub records: Vec<ScheduleRecord>,
    /// Staged entries dropped because a side was not yet determined.
    pub undetermined: usize,
    /// Staged entries replaced by a later snapshot of the same match.
    pub superseded: usize,
}

/// Position of a match within a day's order of play.
type Slot = (Option<u32>, Option<String>, u32);

/// Reads a start time as published: the stored format, or ISO 8601 with `T`.
///
/// # Errors
///
/// Returns `CoreError::InvalidTimestamp` for non-empty text in neither format.
pub fn parse_start_time(value: Option<&str>, context: &str) -> Result<Option<NaiveDateTime>, CoreError> {
    let Some(text) = value.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .map(Some)
        .map_err(|_| CoreError::InvalidTimestamp {
            field: "start_time_str",
            value: text.to_string(),
            context: context.to_string(),
        })
}

/// Interprets a staged entry's time fields.
///
/// `Starts At` gives a confirmed time. `Not Before` and any other label give
/// an estimate from the published time. `Followed By` gives an estimate with
/// no time yet; the time is filled in from the preceding match later.
///
/// # Returns
///
/// The start time, if known, and whether it is an estimate.
///
/// # Errors
///
/// Returns `CoreError::InvalidTimestamp` when a published time cannot be read.
pub fn resolve_start_time(
    row: &StagedScheduleRow,
) -> Result<(Option<NaiveDateTime>, bool), CoreError> {
    let context: String = format!("snapshot {}", row.snapshot_datetime.format(TIMESTAMP_FORMAT));
    let suffix: TimeSuffix = row
        .time_suffix
        .as_deref()
        .map_or_else(|| TimeSuffix::Other(String::new()), TimeSuffix::parse);
    match suffix {
        TimeSuffix::StartsAt => Ok((parse_start_time(row.start_time_str.as_deref(), &context)?, false)),
        TimeSuffix::FollowedBy => Ok((None, true)),
        TimeSuffix::NotBefore | TimeSuffix::Other(_) => {
            Ok((parse_start_time(row.start_time_str.as_deref(), &context)?, true))
        }
    }
}

/// Builds a consolidated row from a determined staged entry.
fn to_schedule_row(row: StagedScheduleRow) -> Result<ScheduleRow, CoreError> {
    let (start_time_utc, time_estimated): (Option<NaiveDateTime>, bool) = resolve_start_time(&row)?;
    let round: Round = Round::from_label(&row.round_text)?;
    let match_date: Option<NaiveDate> = row
        .match_date_str
        .as_deref()
        .map(|text| {
            NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
                CoreError::InvalidTimestamp {
                    field: "match_date_str",
                    value: text.to_string(),
                    context: format!(
                        "snapshot {}",
                        row.snapshot_datetime.format(TIMESTAMP_FORMAT)
                    ),
                }
            })
        })
        .transpose()?;

    Ok(ScheduleRow {
        tournament_id: row.tournament_id,
        year: row.year,
        snapshot_datetime: row.snapshot_datetime,
        match_date,
        tournament_day: row.tournament_day,
        court_name: row.court_name,
        court_match_num: row.court_match_num,
        round,
        is_doubles: row.is_doubles,
        start_time_utc,
        time_estimated,
        p1_id: row.p1_id.unwrap_or_default(),
        p1_name: row.p1_name,
        p1_seed: row.p1_seed,
        p1_entry: row.p1_entry,
        p1_partner_id: row.p1_partner_id,
        p1_partner_name: row.p1_partner_name,
        p2_id: row.p2_id.unwrap_or_default(),
        p2_name: row.p2_name,
        p2_seed: row.p2_seed,
        p2_entry: row.p2_entry,
        p2_partner_id: row.p2_partner_id,
        p2_partner_name: row.p2_partner_name,
        match_uid: String::new(),
    })
}

fn slot(row: &ScheduleRow) -> Slot {
    (row.tournament_day, row.court_name.clone(), row.court_match_num)
}

/// Fills missing estimated start times from the preceding match on the same
/// court and day. Rows must be sorted by slot; each row sees its
/// predecessor's already-filled time, so estimates chain down a court.
fn propagate_start_times(rows: &mut [ScheduleRow]) {
    let mut filled: HashMap<Slot, (Option<NaiveDateTime>, bool)> = HashMap::new();
    for row in rows.iter_mut() {
        if row.time_estimated
            && row.start_time_utc.is_none()
            && let Some(previous_num) = row.court_match_num.checked_sub(1)
            && let Some((Some(previous_start), previous_doubles)) = filled.get(&(
                row.tournament_day,
                row.court_name.clone(),
                previous_num,
            ))
        {
            let duration: TimeDelta = if *previous_doubles {
                DOUBLES_MATCH_ESTIMATE
            } else {
                SINGLES_MATCH_ESTIMATE
            };
            row.start_time_utc = Some(*previous_start + duration);
        }
        filled.insert(slot(row), (row.start_time_utc, row.is_doubles));
    }
}

/// Consolidates staged schedule snapshots into one row per match.
///
/// Entries with an undetermined side are dropped. For each match UID the
/// entry from the latest snapshot wins; on equal snapshot times the entry
/// that comes later in `staged` wins. Missing estimated times are chained
/// from the preceding match on the same court and day. Running this twice on
/// the same input gives the same output.
///
/// # Arguments
///
/// * `staged` - Every staged entry of a tournament, in snapshot file order
/// * `corrections` - The player id correction table
///
/// # Errors
///
/// Returns an error if:
/// - A round label is not in the round tables
/// - A published date or time cannot be read
/// - A consolidated row fails validation
pub fn consolidate_schedule(
    staged: Vec<StagedScheduleRecord>,
    corrections: &PlayerIdCorrections,
) -> Result<ScheduleConsolidation, CoreError> {
    let total: usize = staged.len();
    let mut latest: HashMap<String, ScheduleRecord> = HashMap::new();
    let mut determined: usize = 0;

    for record in staged {
        let row: StagedScheduleRow = record.into_row();
        if !row.is_determined() {
            continue;
        }
        determined += 1;
        let candidate: ScheduleRecord = ScheduleRecord::new(to_schedule_row(row)?, corrections)?;
        let replace: bool = latest.get(candidate.match_uid()).is_none_or(|current| {
            candidate.row().snapshot_datetime >= current.row().snapshot_datetime
        });
        if replace {
            latest.insert(candidate.match_uid().to_string(), candidate);
        }
    }

    let mut rows: Vec<ScheduleRow> = latest.into_values().map(ScheduleRecord::into_row).collect();
    rows.sort_by(|a, b| {
        slot(a)
            .cmp(&slot(b))
            .then_with(|| a.match_uid.cmp(&b.match_uid))
    });
    propagate_start_times(&mut rows);

    let records: Vec<ScheduleRecord> = rows
        .into_iter()
        .map(|row| ScheduleRecord::new(row, corrections))
        .collect::<Result<_, _>>()?;

    let consolidation: ScheduleConsolidation = ScheduleConsolidation {
        undetermined: total - determined,
        superseded: determined - records.len(),
        records,
    };
    debug!(
        matches = consolidation.records.len(),
        undetermined = consolidation.undetermined,
        superseded = consolidation.superseded,
        "Consolidated schedule"
    );
    Ok(consolidation)
}
