/// Analytics over stored habits
///
/// This module answers the analysis-menu questions: listing habits,
/// filtering by periodicity, and finding longest streaks for one habit or
/// across all of them. The streak math itself lives in the domain streak
/// engine; this layer only feeds it completion snapshots from storage.

use crate::domain::{streak, Habit, HabitId, Periodicity};
use crate::storage::{HabitStore, StorageError};

/// Analytics engine for processing habit data
///
/// Stateless: every call reads a fresh snapshot from the store.
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self
    }

    /// All habits currently stored
    pub fn list_habits(&self, store: &dyn HabitStore) -> Result<Vec<Habit>, StorageError> {
        store.list_habits()
    }

    /// Habits whose periodicity matches exactly
    pub fn list_by_periodicity(
        &self,
        store: &dyn HabitStore,
        periodicity: Periodicity,
    ) -> Result<Vec<Habit>, StorageError> {
        let habits = store.list_habits()?;
        Ok(habits
            .into_iter()
            .filter(|h| h.periodicity == periodicity)
            .collect())
    }

    /// Longest historical streak for one habit
    ///
    /// An unknown id fails with HabitNotFound; a known habit without
    /// completions yields 0. The two cases are never conflated.
    pub fn longest_streak_for_habit(
        &self,
        store: &dyn HabitStore,
        habit_id: HabitId,
    ) -> Result<u32, StorageError> {
        let habit = store.get_habit(habit_id)?;
        let completions = store.get_completions(habit_id)?;
        let dates = streak::completion_dates(&completions)?;

        Ok(streak::longest_streak(&dates, habit.periodicity))
    }

    /// Longest historical streak across all habits
    ///
    /// Each habit is analyzed under its own periodicity. No habits, or all
    /// histories empty, yields 0.
    pub fn longest_streak_all(&self, store: &dyn HabitStore) -> Result<u32, StorageError> {
        let mut longest = 0;

        for habit in store.list_habits()? {
            let completions = store.get_completions(habit.id)?;
            let dates = streak::completion_dates(&completions)?;
            longest = longest.max(streak::longest_streak(&dates, habit.periodicity));
        }

        Ok(longest)
    }
}
