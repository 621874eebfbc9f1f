/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, Streak) together with
/// period bucketing and the streak engine. These types represent the
/// fundamental concepts in the habit tracking system; they hold no
/// persistent state and never touch the database or the system clock.

pub mod habit;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid periodicity: {0}")]
    InvalidPeriodicity(String),

    #[error("Malformed completion timestamp: {0}")]
    MalformedTimestamp(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Validation error: {message}")]
    Validation { message: String },
}
