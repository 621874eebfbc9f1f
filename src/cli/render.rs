/// Habit overview table formatting
///
/// Renders the habit list the menus show before asking for an id: one row
/// per habit with its streak, status, and last completion. Output is plain
/// aligned text on stdout.

use chrono::NaiveDate;

use crate::domain::{Habit, Streak};
use crate::storage::HabitStore;
use crate::AppError;

/// Maximum characters of a description shown in the table
const DESCRIPTION_WIDTH: usize = 40;

/// Print an overview table for the given habits
///
/// Streak and status are computed per row from a fresh completions
/// snapshot, relative to the `today` the caller read at the menu boundary.
pub fn print_overview(
    store: &dyn HabitStore,
    habits: &[Habit],
    title: &str,
    today: NaiveDate,
) -> Result<(), AppError> {
    println!("\n{}", title);

    if habits.is_empty() {
        println!("  (no habits)");
        return Ok(());
    }

    let mut rows = Vec::new();
    for habit in habits {
        let completions = store.get_completions(habit.id)?;
        let streak = Streak::from_completions(habit.id, &completions, habit.periodicity, today)?;
        let status = habit.status(&completions, today)?;
        let last_completion = streak
            .last_completed
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        rows.push((
            habit.id.to_string(),
            habit.name.clone(),
            truncate(&habit.description, DESCRIPTION_WIDTH),
            habit.periodicity.to_string(),
            streak.current_streak.to_string(),
            status.to_string(),
            habit.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            last_completion,
        ));
    }

    let name_width = column_width("Name", rows.iter().map(|r| r.1.as_str()));
    let desc_width = column_width("Description", rows.iter().map(|r| r.2.as_str()));

    println!(
        "  {:>4}  {:<name_width$}  {:<desc_width$}  {:<11}  {:>6}  {:<7}  {:<19}  {:<19}",
        "ID", "Name", "Description", "Periodicity", "Streak", "Status", "Created At", "Last Completion",
    );
    println!(
        "  {:->4}  {:-<name_width$}  {:-<desc_width$}  {:-<11}  {:->6}  {:-<7}  {:-<19}  {:-<19}",
        "", "", "", "", "", "", "", "",
    );

    for (id, name, desc, periodicity, streak, status, created, last) in &rows {
        println!(
            "  {:>4}  {:<name_width$}  {:<desc_width$}  {:<11}  {:>6}  {:<7}  {:<19}  {:<19}",
            id, name, desc, periodicity, streak, status, created, last,
        );
    }

    Ok(())
}

/// Shorten a description to fit its column
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Width of a column: header or widest cell, whichever is larger
fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}
