/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a recurring
/// habit the user tracks, along with validation, the DONE/DUE/OVERDUE
/// status classifier, and next-due-date planning.

use serde::{Deserialize, Serialize};
use chrono::{Duration, Months, NaiveDate, NaiveDateTime};

use crate::domain::{streak, DomainError, HabitId, HabitStatus, PeriodKey, Periodicity};

/// A habit represents something the user wants to do regularly
///
/// Habits are owned by the storage layer; the domain only reads snapshots.
/// Status and streak methods take the completion history and "today" as
/// explicit parameters so they stay deterministic and testable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier assigned by the database
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// Free-form description
    pub description: String,
    /// How often this habit should be performed
    pub periodicity: Periodicity,
    /// When this habit was created
    pub created_at: NaiveDateTime,
}

impl Habit {
    /// Create a habit from existing data (used when loading from the database)
    pub fn from_existing(
        id: HabitId,
        name: String,
        description: String,
        periodicity: Periodicity,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name,
            description,
            periodicity,
            created_at,
        }
    }

    /// Validate a habit name according to business rules
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a habit description
    pub fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.len() > 500 {
            return Err(DomainError::Validation {
                message: "Description cannot be longer than 500 characters".to_string(),
            });
        }
        Ok(())
    }

    /// Whether some completion falls on `today`'s calendar date
    ///
    /// Used to avoid logging the same habit twice in one day, independent
    /// of periodicity.
    pub fn is_completed_today(
        &self,
        completions: &[String],
        today: NaiveDate,
    ) -> Result<bool, DomainError> {
        let dates = streak::completion_dates(completions)?;
        Ok(dates.iter().any(|d| *d == today))
    }

    /// Classify the habit as DONE, DUE, or OVERDUE relative to `today`
    ///
    /// DONE means the current period already contains a completion. OVERDUE
    /// means the previous full period was missed as well (or the habit was
    /// never completed). DUE covers the gap in between: the current period
    /// is still open, which leaves a one-period grace window.
    pub fn status(
        &self,
        completions: &[String],
        today: NaiveDate,
    ) -> Result<HabitStatus, DomainError> {
        let dates = streak::completion_dates(completions)?;
        let last = match dates.iter().max() {
            Some(date) => *date,
            None => return Ok(HabitStatus::Overdue),
        };

        let last_key = PeriodKey::for_date(last, self.periodicity);
        if last_key == PeriodKey::for_date(today, self.periodicity) {
            return Ok(HabitStatus::Done);
        }

        // Any date inside the previous period yields that period's key, so
        // the classifier shares its boundaries with the streak engine.
        let previous = self.previous_period_date(today)?;
        if last_key < PeriodKey::for_date(previous, self.periodicity) {
            Ok(HabitStatus::Overdue)
        } else {
            Ok(HabitStatus::Due)
        }
    }

    /// Current streak for this habit (delegates to the streak engine)
    pub fn current_streak(
        &self,
        completions: &[String],
        today: NaiveDate,
    ) -> Result<u32, DomainError> {
        let dates = streak::completion_dates(completions)?;
        Ok(streak::current_streak(&dates, self.periodicity, today))
    }

    /// The date the habit is next expected: last completion advanced by one
    /// period unit. Month and year steps clamp to the end of shorter months.
    /// Without any completion the habit is due today.
    pub fn next_due_date(
        &self,
        completions: &[String],
        today: NaiveDate,
    ) -> Result<NaiveDate, DomainError> {
        let dates = streak::completion_dates(completions)?;
        let last = match dates.iter().max() {
            Some(date) => *date,
            None => return Ok(today),
        };

        let next = match self.periodicity {
            Periodicity::Daily => last.checked_add_signed(Duration::days(1)),
            Periodicity::Weekly => last.checked_add_signed(Duration::weeks(1)),
            Periodicity::Monthly => last.checked_add_months(Months::new(1)),
            Periodicity::Yearly => last.checked_add_months(Months::new(12)),
        };

        next.ok_or_else(|| {
            DomainError::InvalidDate(format!("next due date out of range from {}", last))
        })
    }

    /// A date inside the period immediately before the one containing `today`
    fn previous_period_date(&self, today: NaiveDate) -> Result<NaiveDate, DomainError> {
        let previous = match self.periodicity {
            Periodicity::Daily => today.checked_sub_signed(Duration::days(1)),
            Periodicity::Weekly => today.checked_sub_signed(Duration::weeks(1)),
            Periodicity::Monthly => today.checked_sub_months(Months::new(1)),
            Periodicity::Yearly => today.checked_sub_months(Months::new(12)),
        };

        previous.ok_or_else(|| {
            DomainError::InvalidDate(format!("previous period out of range from {}", today))
        })
    }
}
