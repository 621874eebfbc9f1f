/// Integration tests over a real temporary database
///
/// The fixture mirrors a realistic month of usage: five habits across all
/// four periodicities, one of them with a 28-day daily run ending on the
/// reference date 2025-11-16. All streak and status checks use that fixed
/// date, so the tests are independent of the actual day they run.
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::NamedTempFile;

use habit_tracker_cli::*;

/// Reference "today" for all assertions
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 16).unwrap()
}

fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Build the fixture store: five habits with known histories
fn seed_store() -> (NamedTempFile, SqliteStore) {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    let store = SqliteStore::new(file.path().to_path_buf()).expect("Failed to open store");
    let created = noon(2025, 9, 1);

    // Reading: daily, completed every day from 2025-10-20 through 2025-11-16
    // (28 consecutive days ending today).
    let reading = store
        .add_habit("Reading", "Read 20 pages", Periodicity::Daily, created)
        .unwrap();
    let mut day = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
    while day <= today() {
        store
            .mark_completion(reading, day.and_hms_opt(21, 0, 0).unwrap())
            .unwrap();
        day = day.succ_opt().unwrap();
    }

    // Meditation: daily with gaps, 15 completions, none recent.
    let meditation = store
        .add_habit("Meditation", "10 minutes of calm", Periodicity::Daily, created)
        .unwrap();
    for d in 1..=10 {
        store.mark_completion(meditation, noon(2025, 10, d)).unwrap();
    }
    for d in 12..=16 {
        store.mark_completion(meditation, noon(2025, 10, d)).unwrap();
    }

    // Jogging: weekly, ISO weeks 44-46 of 2025 (week 46 contains today).
    let jogging = store
        .add_habit("Jogging", "Run around the park", Periodicity::Weekly, created)
        .unwrap();
    store.mark_completion(jogging, noon(2025, 10, 28)).unwrap();
    store.mark_completion(jogging, noon(2025, 11, 4)).unwrap();
    store.mark_completion(jogging, noon(2025, 11, 12)).unwrap();

    // Bills: monthly, August through October (November still open).
    let bills = store
        .add_habit("Pay bills", "Rent and utilities", Periodicity::Monthly, created)
        .unwrap();
    store.mark_completion(bills, noon(2025, 8, 5)).unwrap();
    store.mark_completion(bills, noon(2025, 9, 10)).unwrap();
    store.mark_completion(bills, noon(2025, 10, 15)).unwrap();

    // Checkup: yearly, three years running.
    let checkup = store
        .add_habit("Health checkup", "Annual physical", Periodicity::Yearly, created)
        .unwrap();
    store.mark_completion(checkup, noon(2023, 5, 2)).unwrap();
    store.mark_completion(checkup, noon(2024, 6, 11)).unwrap();
    store.mark_completion(checkup, noon(2025, 4, 20)).unwrap();

    (file, store)
}

fn habit_by_name(store: &SqliteStore, name: &str) -> Habit {
    store
        .list_habits()
        .unwrap()
        .into_iter()
        .find(|h| h.name == name)
        .unwrap_or_else(|| panic!("fixture habit {} missing", name))
}

#[test]
fn test_fixture_contains_five_habits() {
    let (_file, store) = seed_store();
    assert_eq!(store.list_habits().unwrap().len(), 5);
}

#[test]
fn test_list_by_periodicity() {
    let (_file, store) = seed_store();
    let analytics = AnalyticsEngine::new();

    let daily = analytics
        .list_by_periodicity(&store, Periodicity::Daily)
        .unwrap();
    assert_eq!(daily.len(), 2);
    assert!(daily.iter().any(|h| h.name == "Reading"));

    let weekly = analytics
        .list_by_periodicity(&store, Periodicity::Weekly)
        .unwrap();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0].name, "Jogging");
}

#[test]
fn test_longest_streak_for_reading() {
    let (_file, store) = seed_store();
    let analytics = AnalyticsEngine::new();
    let reading = habit_by_name(&store, "Reading");

    assert_eq!(
        analytics.longest_streak_for_habit(&store, reading.id).unwrap(),
        28
    );
}

#[test]
fn test_longest_streak_for_meditation_has_gaps() {
    let (_file, store) = seed_store();
    let analytics = AnalyticsEngine::new();
    let meditation = habit_by_name(&store, "Meditation");

    // 10-day run, one-day gap, 5-day run.
    assert_eq!(
        analytics
            .longest_streak_for_habit(&store, meditation.id)
            .unwrap(),
        10
    );
}

#[test]
fn test_longest_streak_all_habits() {
    let (_file, store) = seed_store();
    let analytics = AnalyticsEngine::new();

    // Reading's 28-day run is the overall maximum.
    assert_eq!(analytics.longest_streak_all(&store).unwrap(), 28);
}

#[test]
fn test_longest_streak_unknown_habit_is_not_found() {
    let (_file, store) = seed_store();
    let analytics = AnalyticsEngine::new();

    let result = analytics.longest_streak_for_habit(&store, HabitId(999));
    assert!(matches!(result, Err(StorageError::HabitNotFound { .. })));
}

#[test]
fn test_current_streaks_at_reference_date() {
    let (_file, store) = seed_store();

    let reading = habit_by_name(&store, "Reading");
    let completions = store.get_completions(reading.id).unwrap();
    assert_eq!(reading.current_streak(&completions, today()).unwrap(), 28);

    let meditation = habit_by_name(&store, "Meditation");
    let completions = store.get_completions(meditation.id).unwrap();
    assert_eq!(meditation.current_streak(&completions, today()).unwrap(), 0);

    let jogging = habit_by_name(&store, "Jogging");
    let completions = store.get_completions(jogging.id).unwrap();
    assert_eq!(jogging.current_streak(&completions, today()).unwrap(), 3);
}

#[test]
fn test_status_at_reference_date() {
    let (_file, store) = seed_store();

    let reading = habit_by_name(&store, "Reading");
    let completions = store.get_completions(reading.id).unwrap();
    assert_eq!(
        reading.status(&completions, today()).unwrap(),
        HabitStatus::Done
    );

    // Last meditation was a month ago.
    let meditation = habit_by_name(&store, "Meditation");
    let completions = store.get_completions(meditation.id).unwrap();
    assert_eq!(
        meditation.status(&completions, today()).unwrap(),
        HabitStatus::Overdue
    );

    // Bills were paid in October; November is still open.
    let bills = habit_by_name(&store, "Pay bills");
    let completions = store.get_completions(bills.id).unwrap();
    assert_eq!(
        bills.status(&completions, today()).unwrap(),
        HabitStatus::Due
    );
}

#[test]
fn test_next_due_dates() {
    let (_file, store) = seed_store();

    let reading = habit_by_name(&store, "Reading");
    let completions = store.get_completions(reading.id).unwrap();
    assert_eq!(
        reading.next_due_date(&completions, today()).unwrap(),
        NaiveDate::from_ymd_opt(2025, 11, 17).unwrap()
    );

    let bills = habit_by_name(&store, "Pay bills");
    let completions = store.get_completions(bills.id).unwrap();
    assert_eq!(
        bills.next_due_date(&completions, today()).unwrap(),
        NaiveDate::from_ymd_opt(2025, 11, 15).unwrap()
    );
}

#[test]
fn test_mark_completion_adds_row() {
    let (_file, store) = seed_store();
    let jogging = habit_by_name(&store, "Jogging");

    let before = store.get_completions(jogging.id).unwrap().len();
    store
        .mark_completion(jogging.id, noon(2025, 11, 16))
        .unwrap();
    let after = store.get_completions(jogging.id).unwrap().len();

    assert_eq!(after, before + 1);
}

#[test]
fn test_completion_in_same_period_does_not_change_streaks() {
    let (_file, store) = seed_store();
    let analytics = AnalyticsEngine::new();
    let jogging = habit_by_name(&store, "Jogging");

    let longest_before = analytics
        .longest_streak_for_habit(&store, jogging.id)
        .unwrap();

    // A second run in the same ISO week counts once.
    store
        .mark_completion(jogging.id, noon(2025, 11, 13))
        .unwrap();

    let longest_after = analytics
        .longest_streak_for_habit(&store, jogging.id)
        .unwrap();
    assert_eq!(longest_after, longest_before);

    let completions = store.get_completions(jogging.id).unwrap();
    assert_eq!(jogging.current_streak(&completions, today()).unwrap(), 3);
}

#[test]
fn test_update_habit_fields() {
    let (_file, store) = seed_store();
    let meditation = habit_by_name(&store, "Meditation");

    store
        .update_habit(meditation.id, Some("Evening meditation"), None, Some(Periodicity::Weekly))
        .unwrap();

    let updated = store.get_habit(meditation.id).unwrap();
    assert_eq!(updated.name, "Evening meditation");
    assert_eq!(updated.description, meditation.description);
    assert_eq!(updated.periodicity, Periodicity::Weekly);
}

#[test]
fn test_delete_habit_removes_completions() {
    let (_file, store) = seed_store();
    let checkup = habit_by_name(&store, "Health checkup");

    store.delete_habit(checkup.id).unwrap();

    assert!(matches!(
        store.get_habit(checkup.id),
        Err(StorageError::HabitNotFound { .. })
    ));
    assert!(store.get_completions(checkup.id).unwrap().is_empty());

    // The rest of the fixture is untouched.
    assert_eq!(store.list_habits().unwrap().len(), 4);
}

#[test]
fn test_delete_unknown_habit_is_not_found() {
    let (_file, store) = seed_store();

    assert!(matches!(
        store.delete_habit(HabitId(424242)),
        Err(StorageError::HabitNotFound { .. })
    ));
}
