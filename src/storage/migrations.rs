/// Schema setup for the SQLite store
///
/// Migrations run in order when a connection is opened; the schema_version
/// table records how far a given database file has been upgraded, so
/// opening an old file applies only what is missing.

use rusqlite::Connection;

use crate::storage::StorageError;

type Migration = fn(&Connection) -> Result<(), StorageError>;

/// Migrations in application order; index + 1 is the resulting version
const MIGRATIONS: &[Migration] = &[migration_v1];

/// Bring the schema up to date
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
        [],
    )?;

    let applied = current_version(conn)?;
    for (index, migration) in MIGRATIONS.iter().enumerate().skip(applied as usize) {
        let version = index as i32 + 1;
        migration(conn)?;
        record_version(conn, version)?;
        tracing::info!("Applied schema migration v{}", version);
    }

    Ok(())
}

/// Highest migration version this database has seen, 0 for a fresh file
fn current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0)
        })?
        .unwrap_or(0);

    Ok(version)
}

fn record_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// v1: habits and completions tables plus their indexes
///
/// Habit ids are integers assigned by SQLite; completion timestamps are
/// stored as text in the primary timestamp format.
fn migration_v1(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS habits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            periodicity TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS completions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id INTEGER NOT NULL,
            completed_at TEXT NOT NULL,
            FOREIGN KEY (habit_id) REFERENCES habits (id)
        )",
        [],
    )?;

    // Completion history is always read per habit, ordered by time
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_completions_habit_completed
         ON completions (habit_id, completed_at)",
        [],
    )?;

    // The analysis menu filters habits by periodicity
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_habits_periodicity
         ON habits (periodicity)",
        [],
    )?;

    Ok(())
}
