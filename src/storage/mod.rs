/// Storage layer for persisting habit data
///
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving habits and their
/// completion timestamps.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::{DomainError, Habit, HabitId, Periodicity};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Invalid habit data: {0}")]
    Domain(#[from] DomainError),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: HabitId },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits
///
/// This trait allows us to potentially swap out SQLite for other databases
/// in the future while keeping the same interface. The domain layer never
/// depends on a concrete store.
pub trait HabitStore {
    /// Create a new habit and return the id assigned by the database
    fn add_habit(
        &self,
        name: &str,
        description: &str,
        periodicity: Periodicity,
        created_at: NaiveDateTime,
    ) -> Result<HabitId, StorageError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError>;

    /// List all habits, oldest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Update an existing habit's fields; None keeps the current value
    fn update_habit(
        &self,
        habit_id: HabitId,
        name: Option<&str>,
        description: Option<&str>,
        periodicity: Option<Periodicity>,
    ) -> Result<(), StorageError>;

    /// Delete a habit together with its completion history
    fn delete_habit(&self, habit_id: HabitId) -> Result<(), StorageError>;

    /// Record a completion for a habit at the given time
    fn mark_completion(
        &self,
        habit_id: HabitId,
        completed_at: NaiveDateTime,
    ) -> Result<(), StorageError>;

    /// Raw completion timestamps for a habit, oldest first
    fn get_completions(&self, habit_id: HabitId) -> Result<Vec<String>, StorageError>;
}
