/// Core types and enums used throughout the domain layer
///
/// This module defines the fundamental types like HabitId, Periodicity, and
/// PeriodKey that are used by Habit, the streak engine, and the analytics layer.

use serde::{Deserialize, Serialize};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// This is a wrapper around the integer row id assigned by the database.
/// The newtype provides type safety - you can't accidentally pass an
/// arbitrary integer where a habit ID is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitId(pub i64);

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit is expected to recur
///
/// The periodicity determines how completion dates are bucketed into
/// periods when streaks are calculated: one completion per period is
/// enough to keep a streak alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    /// Every single day
    Daily,
    /// Once per ISO week (Monday through Sunday)
    Weekly,
    /// Once per calendar month
    Monthly,
    /// Once per calendar year
    Yearly,
}

impl Periodicity {
    /// All supported periodicities, in menu display order
    pub const ALL: [Periodicity; 4] = [
        Periodicity::Daily,
        Periodicity::Weekly,
        Periodicity::Monthly,
        Periodicity::Yearly,
    ];

    /// The canonical lowercase name stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Periodicity::Daily => "daily",
            Periodicity::Weekly => "weekly",
            Periodicity::Monthly => "monthly",
            Periodicity::Yearly => "yearly",
        }
    }
}

impl FromStr for Periodicity {
    type Err = DomainError;

    /// Parse a periodicity from its textual form
    ///
    /// Anything outside the four supported values is rejected; callers must
    /// never fall back to a default periodicity.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Periodicity::Daily),
            "weekly" => Ok(Periodicity::Weekly),
            "monthly" => Ok(Periodicity::Monthly),
            "yearly" => Ok(Periodicity::Yearly),
            other => Err(DomainError::InvalidPeriodicity(other.to_string())),
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar bucket a completion date falls into for a given periodicity
///
/// Period keys are totally ordered, and within a single periodicity the
/// ordering matches the chronological ordering of the underlying dates.
/// Weekly keys use ISO week numbering, so the ISO year of a date near a
/// year boundary can differ from its calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    /// The calendar date itself
    Day(NaiveDate),
    /// ISO year and ISO week number
    Week { year: i32, week: u32 },
    /// Calendar year and month
    Month { year: i32, month: u32 },
    /// Calendar year
    Year(i32),
}

impl PeriodKey {
    /// Map a calendar date to its period key under the given periodicity
    pub fn for_date(date: NaiveDate, periodicity: Periodicity) -> Self {
        match periodicity {
            Periodicity::Daily => PeriodKey::Day(date),
            Periodicity::Weekly => {
                let iso = date.iso_week();
                PeriodKey::Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            Periodicity::Monthly => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
            Periodicity::Yearly => PeriodKey::Year(date.year()),
        }
    }

    /// Whether this period immediately follows `prev`
    ///
    /// Both keys must come from the same periodicity; keys of different
    /// shapes are never consecutive. Callers pass sorted, distinct keys.
    ///
    /// Known limitation: ISO years with 53 weeks are not special-cased, so
    /// a weekly streak crossing week 53 resets at the year boundary. This
    /// matches the recorded streak history and is kept deliberately.
    pub fn follows(&self, prev: &PeriodKey) -> bool {
        match (prev, self) {
            (PeriodKey::Day(p), PeriodKey::Day(c)) => {
                c.signed_duration_since(*p).num_days() == 1
            }
            (
                PeriodKey::Week { year: py, week: pw },
                PeriodKey::Week { year: cy, week: cw },
            ) => {
                let same_year = cy == py && *cw == pw + 1;
                let year_rollover = cy - py == 1 && *pw == 52 && *cw == 1;
                same_year || year_rollover
            }
            (
                PeriodKey::Month { year: py, month: pm },
                PeriodKey::Month { year: cy, month: cm },
            ) => {
                let same_year = cy == py && *cm == pm + 1;
                let year_rollover = cy - py == 1 && *pm == 12 && *cm == 1;
                same_year || year_rollover
            }
            (PeriodKey::Year(p), PeriodKey::Year(c)) => c - p == 1,
            _ => false,
        }
    }
}

/// Completion status of a habit relative to "now"
///
/// A habit is DONE once its current period contains a completion, OVERDUE
/// once it has also missed the previous full period, and DUE in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HabitStatus {
    Done,
    Due,
    Overdue,
}

impl HabitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitStatus::Done => "DONE",
            HabitStatus::Due => "DUE",
            HabitStatus::Overdue => "OVERDUE",
        }
    }
}

impl fmt::Display for HabitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
