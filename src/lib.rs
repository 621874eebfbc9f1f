/// Public library interface for the habit tracker CLI
///
/// This module exports the application type and public domain/storage types
/// that can be used by other applications or tests.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod cli;

// Re-export public modules and types
pub use domain::*;
pub use storage::{HabitStore, SqliteStore, StorageError};
pub use analytics::AnalyticsEngine;

/// Errors that can occur while running the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Storage(#[from] StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Main habit tracker application driving the interactive menu
///
/// The application owns the SQLite store and the analytics engine and
/// wires them into the menu loop. The database location is decided once,
/// by the caller, and passed in at construction time.
pub struct HabitTrackerApp {
    storage: SqliteStore,
    analytics: AnalyticsEngine,
}

impl HabitTrackerApp {
    /// Create a new application with the specified database path
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist.
    pub fn new(db_path: PathBuf) -> Result<Self, AppError> {
        tracing::info!("Initializing habit tracker with database: {:?}", db_path);

        let storage = SqliteStore::new(db_path)?;
        let analytics = AnalyticsEngine::new();

        Ok(Self { storage, analytics })
    }

    /// Run the interactive menu loop until the user exits
    pub fn run(&self) -> Result<(), AppError> {
        let habits = self.storage.list_habits()?;
        tracing::info!("Started with {} existing habits", habits.len());

        cli::run_main_menu(&self.storage, &self.analytics)
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStore {
        &self.storage
    }

    /// Get a reference to the analytics engine (useful for testing)
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }
}
