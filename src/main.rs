/// Binary entry point for the habit tracker
///
/// Parses command line arguments, wires up logging, resolves where the
/// database lives, and hands control to the interactive menu.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use habit_tracker_cli::HabitTrackerApp;

/// Command line arguments for the habit tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file (defaults to a per-user location)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.debug {
            "info"
        } else {
            "warn"
        }
    }
}

/// Pick a writable per-user location for the database file
///
/// Candidate directories are probed in order of preference; one qualifies
/// if it can be created and a file can actually be written inside it.
/// When nothing else works the system temp directory is used.
fn default_database_path() -> Result<PathBuf, std::io::Error> {
    let candidates = [
        dirs::home_dir().map(|home| home.join(".habit_tracker")),
        dirs::data_dir().map(|data| data.join("habit_tracker")),
        std::env::current_dir().ok().map(|cwd| cwd.join(".habit_tracker")),
    ];

    for dir in candidates.into_iter().flatten() {
        if fs::create_dir_all(&dir).is_err() {
            continue;
        }
        let probe = dir.join(".write_probe");
        if fs::write(&probe, b"probe").is_ok() {
            let _ = fs::remove_file(&probe);
            return Ok(dir.join("habits.db"));
        }
    }

    let fallback = std::env::temp_dir().join("habit_tracker");
    fs::create_dir_all(&fallback)?;
    tracing::warn!(
        "No per-user directory is writable, keeping the database in {}",
        fallback.display()
    );
    Ok(fallback.join("habits.db"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_tracker_cli={}", args.log_level()))
        .with_writer(std::io::stderr) // stdout belongs to the menu
        .init();

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            path
        }
        None => default_database_path()?,
    };
    info!("Using database at {}", db_path.display());

    let app = HabitTrackerApp::new(db_path)?;
    app.run()?;

    info!("Habit tracker shutdown complete");
    Ok(())
}
