/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habit data. It handles all SQL queries and data conversion.

use std::path::PathBuf;
use rusqlite::{params, Connection};
use chrono::NaiveDateTime;

use crate::domain::{streak, Habit, HabitId, Periodicity};
use crate::storage::{migrations, HabitStore, StorageError};

/// Raw habits row before domain parsing
type HabitRow = (i64, String, String, String, String);

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the HabitStore trait. The
/// database location is fixed at construction time.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        // SQLite ships with foreign keys off
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("Opened habit database at {:?}", db_path);

        Ok(Self { conn })
    }

    /// Convert a raw habits row into a domain Habit
    ///
    /// Periodicity and timestamps are parsed here so that a corrupt row
    /// surfaces a domain error instead of being silently defaulted.
    fn row_to_habit(row: HabitRow) -> Result<Habit, StorageError> {
        let (id, name, description, periodicity, created_at) = row;
        let periodicity = periodicity.parse::<Periodicity>()?;
        let created_at = streak::parse_timestamp(&created_at)?;

        Ok(Habit::from_existing(
            HabitId(id),
            name,
            description,
            periodicity,
            created_at,
        ))
    }
}

impl HabitStore for SqliteStore {
    /// Create a new habit and return the id assigned by the database
    fn add_habit(
        &self,
        name: &str,
        description: &str,
        periodicity: Periodicity,
        created_at: NaiveDateTime,
    ) -> Result<HabitId, StorageError> {
        self.conn.execute(
            "INSERT INTO habits (name, description, periodicity, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                name,
                description,
                periodicity.as_str(),
                created_at.format(streak::TIMESTAMP_FORMAT).to_string()
            ],
        )?;

        let habit_id = HabitId(self.conn.last_insert_rowid());
        tracing::debug!("Created habit: {} ({})", name, habit_id);
        Ok(habit_id)
    }

    /// Get a habit by its ID
    fn get_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, periodicity, created_at
             FROM habits WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![habit_id.0], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        });

        match result {
            Ok(row) => Self::row_to_habit(row),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(StorageError::HabitNotFound { habit_id })
            }
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// List all habits, oldest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, periodicity, created_at
             FROM habits ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut habits = Vec::new();
        for row in rows {
            habits.push(Self::row_to_habit(row?)?);
        }

        Ok(habits)
    }

    /// Update an existing habit's fields; None keeps the current value
    fn update_habit(
        &self,
        habit_id: HabitId,
        name: Option<&str>,
        description: Option<&str>,
        periodicity: Option<Periodicity>,
    ) -> Result<(), StorageError> {
        let current = self.get_habit(habit_id)?;

        let name = name.unwrap_or(&current.name);
        let description = description.unwrap_or(&current.description);
        let periodicity = periodicity.unwrap_or(current.periodicity);

        self.conn.execute(
            "UPDATE habits SET name = ?2, description = ?3, periodicity = ?4 WHERE id = ?1",
            params![habit_id.0, name, description, periodicity.as_str()],
        )?;

        tracing::debug!("Updated habit: {} ({})", name, habit_id);
        Ok(())
    }

    /// Delete a habit together with its completion history
    fn delete_habit(&self, habit_id: HabitId) -> Result<(), StorageError> {
        self.conn.execute(
            "DELETE FROM completions WHERE habit_id = ?1",
            params![habit_id.0],
        )?;

        let rows_affected = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?1", params![habit_id.0])?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound { habit_id });
        }

        tracing::debug!("Deleted habit: {}", habit_id);
        Ok(())
    }

    /// Record a completion for a habit at the given time
    fn mark_completion(
        &self,
        habit_id: HabitId,
        completed_at: NaiveDateTime,
    ) -> Result<(), StorageError> {
        // Surface a missing habit as HabitNotFound instead of a raw
        // foreign-key violation.
        self.get_habit(habit_id)?;

        self.conn.execute(
            "INSERT INTO completions (habit_id, completed_at) VALUES (?1, ?2)",
            params![
                habit_id.0,
                completed_at.format(streak::TIMESTAMP_FORMAT).to_string()
            ],
        )?;

        tracing::debug!("Marked completion for habit {} at {}", habit_id, completed_at);
        Ok(())
    }

    /// Raw completion timestamps for a habit, oldest first
    fn get_completions(&self, habit_id: HabitId) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT completed_at FROM completions
             WHERE habit_id = ?1 ORDER BY completed_at",
        )?;

        let rows = stmt.query_map(params![habit_id.0], |row| row.get::<_, String>(0))?;

        let mut completions = Vec::new();
        for raw in rows {
            completions.push(raw?);
        }

        Ok(completions)
    }
}
