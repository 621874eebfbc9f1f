/// Basic unit tests to verify core functionality
use habit_tracker_cli::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_periodicity_parsing() {
        assert_eq!("daily".parse::<Periodicity>().unwrap(), Periodicity::Daily);
        assert_eq!("weekly".parse::<Periodicity>().unwrap(), Periodicity::Weekly);

        let result = "biweekly".parse::<Periodicity>();
        assert!(matches!(result, Err(DomainError::InvalidPeriodicity(_))));
    }

    #[test]
    fn test_habit_construction_and_status() {
        let habit = Habit::from_existing(
            HabitId(1),
            "Reading".to_string(),
            "Read a chapter".to_string(),
            Periodicity::Daily,
            date(2025, 1, 1).and_hms_opt(8, 0, 0).unwrap(),
        );

        assert_eq!(habit.name, "Reading");
        assert_eq!(
            habit.status(&[], date(2025, 11, 16)).unwrap(),
            HabitStatus::Overdue
        );
    }

    #[test]
    fn test_streak_engine_smoke() {
        let completions = vec![
            "2025-11-14 07:30:00".to_string(),
            "2025-11-15 07:30:00".to_string(),
            "2025-11-16T07:30:00".to_string(), // ISO fallback format
        ];

        let dates = streak::completion_dates(&completions).unwrap();
        assert_eq!(streak::longest_streak(&dates, Periodicity::Daily), 3);
        assert_eq!(
            streak::current_streak(&dates, Periodicity::Daily, date(2025, 11, 16)),
            3
        );
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStore::new(temp_file.path().to_path_buf());
        assert!(storage.is_ok());
    }

    #[test]
    fn test_app_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let app = HabitTrackerApp::new(temp_file.path().to_path_buf());
        assert!(app.is_ok());
    }

    #[test]
    fn test_analytics_engine_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStore::new(temp_file.path().to_path_buf()).unwrap();
        let analytics = AnalyticsEngine::new();

        assert_eq!(analytics.longest_streak_all(&storage).unwrap(), 0);
    }
}
