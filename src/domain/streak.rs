/// Streak calculation engine
///
/// This module converts a habit's raw completion timestamps into period
/// buckets and computes streak statistics from them. It is the single home
/// for streak math: both the per-habit path (current streak, overview table)
/// and the analytics path (longest streaks) call into these functions.
///
/// All functions here are pure: completions and "today" are passed in as
/// snapshots, nothing reads the system clock.

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;

use crate::domain::{DomainError, HabitId, PeriodKey, Periodicity};

/// Primary textual timestamp format used by the completions table
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a completion timestamp string
///
/// Tries the primary table format first, then falls back to ISO-8601
/// (older rows may carry either). A string matching neither is an error;
/// silently skipping it would corrupt streak counts.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, DomainError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| raw.parse::<NaiveDateTime>())
        .map_err(|_| DomainError::MalformedTimestamp(raw.to_string()))
}

/// Parse every completion timestamp and strip the time of day
pub fn completion_dates(raw: &[String]) -> Result<Vec<NaiveDate>, DomainError> {
    raw.iter()
        .map(|ts| parse_timestamp(ts).map(|dt| dt.date()))
        .collect()
}

/// Bucket completion dates into sorted, deduplicated period keys
///
/// Multiple completions within the same period count once.
fn unique_periods(dates: &[NaiveDate], periodicity: Periodicity) -> Vec<PeriodKey> {
    dates
        .iter()
        .map(|d| PeriodKey::for_date(*d, periodicity))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Longest run of consecutive periods anywhere in the history
///
/// Takes completion dates already parsed via [`completion_dates`]; callers
/// parse once and reuse the dates for both streak directions. Scans the
/// sorted unique periods left to right, resetting on every gap and tracking
/// the running maximum. An empty history yields 0.
pub fn longest_streak(dates: &[NaiveDate], periodicity: Periodicity) -> u32 {
    let periods = unique_periods(dates, periodicity);

    if periods.is_empty() {
        return 0;
    }

    let mut longest = 1u32;
    let mut current = 1u32;

    for pair in periods.windows(2) {
        if pair[1].follows(&pair[0]) {
            current += 1;
        } else {
            current = 1;
        }
        longest = longest.max(current);
    }

    longest
}

/// Run of consecutive periods ending in the period containing `today`
///
/// If today's period has no completion there is no active streak and the
/// result is 0. Otherwise this walks backward from today's period and stops
/// at the first gap - unlike [`longest_streak`], which keeps scanning the
/// whole history.
pub fn current_streak(dates: &[NaiveDate], periodicity: Periodicity, today: NaiveDate) -> u32 {
    let periods = unique_periods(dates, periodicity);

    let now_key = PeriodKey::for_date(today, periodicity);
    let anchor = match periods.iter().position(|key| *key == now_key) {
        Some(index) => index,
        None => return 0,
    };

    let mut streak = 1u32;
    for i in (1..=anchor).rev() {
        if periods[i].follows(&periods[i - 1]) {
            streak += 1;
        } else {
            break;
        }
    }

    streak
}

/// Calculated streak statistics for a habit
///
/// Bundles everything the overview table and the analytics menu need for
/// one habit. Built per invocation from a completions snapshot; nothing is
/// cached between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Which habit this streak data is for
    pub habit_id: HabitId,
    /// Consecutive periods completed, ending at today's period
    pub current_streak: u32,
    /// Best streak ever achieved for this habit
    pub longest_streak: u32,
    /// When the habit was last completed (None if never completed)
    pub last_completed: Option<NaiveDate>,
    /// Total number of logged completions, duplicates included
    pub total_completions: u32,
}

impl Streak {
    /// An empty streak record for a habit without completions
    pub fn new(habit_id: HabitId) -> Self {
        Self {
            habit_id,
            current_streak: 0,
            longest_streak: 0,
            last_completed: None,
            total_completions: 0,
        }
    }

    /// Calculate streak statistics from raw completion timestamps
    ///
    /// The timestamps are parsed exactly once; both streak directions and
    /// the last-completed date are computed from the same parsed dates.
    pub fn from_completions(
        habit_id: HabitId,
        raw: &[String],
        periodicity: Periodicity,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Ok(Self::new(habit_id));
        }

        let dates = completion_dates(raw)?;

        Ok(Self {
            habit_id,
            current_streak: current_streak(&dates, periodicity, today),
            longest_streak: longest_streak(&dates, periodicity),
            last_completed: dates.iter().max().copied(),
            total_completions: raw.len() as u32,
        })
    }
}
