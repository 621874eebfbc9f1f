/// Interactive command-line menus
///
/// This module drives the main menu and its submenus: habit-specific
/// actions (create, edit, delete, complete, streak and due-date lookups)
/// and the analysis functions. "Now" is read once per menu action here at
/// the boundary and threaded into the domain as an explicit parameter.

mod render;

use chrono::{Local, NaiveDate, NaiveDateTime};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::analytics::AnalyticsEngine;
use crate::domain::{Habit, HabitId, Periodicity};
use crate::storage::{HabitStore, StorageError};
use crate::AppError;

/// Run the top-level menu loop until the user exits
pub fn run_main_menu(
    store: &dyn HabitStore,
    analytics: &AnalyticsEngine,
) -> Result<(), AppError> {
    let theme = ColorfulTheme::default();

    loop {
        println!();
        let choice = Select::with_theme(&theme)
            .with_prompt("===== HABIT TRACKER =====")
            .items(&["Habit actions", "Analysis", "Exit"])
            .default(0)
            .interact()?;

        match choice {
            0 => habit_actions_menu(store, &theme)?,
            1 => analysis_menu(store, analytics, &theme)?,
            _ => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
}

/// Submenu for habit-specific actions
fn habit_actions_menu(store: &dyn HabitStore, theme: &ColorfulTheme) -> Result<(), AppError> {
    loop {
        println!();
        let choice = Select::with_theme(theme)
            .with_prompt("--- Habit Actions ---")
            .items(&[
                "Create new habit",
                "Delete habit",
                "Edit habit",
                "Mark habit as completed",
                "Show current streak of a habit",
                "Check if habit is completed today",
                "Show next due date of a habit",
                "Back to main menu",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => create_habit(store, theme)?,
            1 => delete_habit(store, theme)?,
            2 => edit_habit(store, theme)?,
            3 => mark_completed(store, theme)?,
            4 => show_current_streak(store, theme)?,
            5 => check_completed_today(store, theme)?,
            6 => show_next_due_date(store, theme)?,
            _ => return Ok(()),
        }
    }
}

/// Submenu for analytics functions
fn analysis_menu(
    store: &dyn HabitStore,
    analytics: &AnalyticsEngine,
    theme: &ColorfulTheme,
) -> Result<(), AppError> {
    loop {
        println!();
        let choice = Select::with_theme(theme)
            .with_prompt("--- Analysis ---")
            .items(&[
                "Show all habits",
                "Show habits by periodicity",
                "Show longest streak of a habit",
                "Show longest streak of all habits",
                "Back to main menu",
            ])
            .default(0)
            .interact()?;

        let today = Local::now().naive_local().date();

        match choice {
            0 => {
                let habits = analytics.list_habits(store)?;
                if habits.is_empty() {
                    println!("No habits found.");
                } else {
                    render::print_overview(store, &habits, "All Habits", today)?;
                }
            }
            1 => {
                let periodicity = select_periodicity(theme, "Which periodicity?")?;
                let filtered = analytics.list_by_periodicity(store, periodicity)?;
                if filtered.is_empty() {
                    println!("No matching habits found.");
                } else {
                    let title = format!("Habits ({})", periodicity);
                    render::print_overview(store, &filtered, &title, today)?;
                }
            }
            2 => {
                if let Some(habit) = select_habit(store, theme, today)? {
                    let streak = analytics.longest_streak_for_habit(store, habit.id)?;
                    println!("Longest streak for '{}': {}", habit.name, streak);
                }
            }
            3 => {
                let streak = analytics.longest_streak_all(store)?;
                println!("Longest streak of all habits: {}", streak);
            }
            _ => return Ok(()),
        }
    }
}

/// Prompt for a new habit and store it
fn create_habit(store: &dyn HabitStore, theme: &ColorfulTheme) -> Result<(), AppError> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Habit name")
        .validate_with(|input: &String| Habit::validate_name(input).map_err(|e| e.to_string()))
        .interact_text()?;

    let existing = store.list_habits()?;
    if existing.iter().any(|h| h.name == name.trim()) {
        println!("Habit with name '{}' already exists.", name.trim());
        return Ok(());
    }

    let description: String = Input::with_theme(theme)
        .with_prompt("Description")
        .allow_empty(true)
        .validate_with(|input: &String| {
            Habit::validate_description(input).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let periodicity = select_periodicity(theme, "Periodicity")?;

    let habit_id = store.add_habit(name.trim(), description.trim(), periodicity, now())?;
    println!("Habit '{}' created (id {}).", name.trim(), habit_id);
    Ok(())
}

/// Pick a habit and delete it after confirmation
fn delete_habit(store: &dyn HabitStore, theme: &ColorfulTheme) -> Result<(), AppError> {
    let today = now().date();
    let Some(habit) = select_habit(store, theme, today)? else {
        return Ok(());
    };

    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!(
            "Delete habit '{}' and all of its completions?",
            habit.name
        ))
        .default(false)
        .interact()?;

    if confirmed {
        store.delete_habit(habit.id)?;
        println!("Habit {} deleted.", habit.id);
    }
    Ok(())
}

/// Pick a habit and update selected fields
fn edit_habit(store: &dyn HabitStore, theme: &ColorfulTheme) -> Result<(), AppError> {
    let today = now().date();
    let Some(habit) = select_habit(store, theme, today)? else {
        return Ok(());
    };

    let name: String = Input::with_theme(theme)
        .with_prompt("New name (leave blank to keep current)")
        .allow_empty(true)
        .interact_text()?;

    let description: String = Input::with_theme(theme)
        .with_prompt("New description (leave blank to keep current)")
        .allow_empty(true)
        .interact_text()?;

    let mut periodicity_items = vec!["(keep current)".to_string()];
    periodicity_items.extend(Periodicity::ALL.iter().map(|p| p.to_string()));
    let periodicity_choice = Select::with_theme(theme)
        .with_prompt("New periodicity")
        .items(&periodicity_items)
        .default(0)
        .interact()?;

    let name = non_empty(&name);
    if let Some(new_name) = name {
        Habit::validate_name(new_name)?;
    }
    let description = non_empty(&description);
    let periodicity = match periodicity_choice {
        0 => None,
        index => Some(Periodicity::ALL[index - 1]),
    };

    store.update_habit(habit.id, name, description, periodicity)?;
    println!("Habit {} updated.", habit.id);
    Ok(())
}

/// Pick a habit and log a completion, unless one exists for today already
fn mark_completed(store: &dyn HabitStore, theme: &ColorfulTheme) -> Result<(), AppError> {
    let now = now();
    let Some(habit) = select_habit(store, theme, now.date())? else {
        return Ok(());
    };

    let completions = store.get_completions(habit.id)?;
    if habit.is_completed_today(&completions, now.date())? {
        println!("Habit '{}' was already completed today.", habit.name);
    } else {
        store.mark_completion(habit.id, now)?;
        println!("Habit '{}' marked as completed.", habit.name);
    }
    Ok(())
}

/// Pick a habit and show its current streak
fn show_current_streak(store: &dyn HabitStore, theme: &ColorfulTheme) -> Result<(), AppError> {
    let today = now().date();
    let Some(habit) = select_habit(store, theme, today)? else {
        return Ok(());
    };

    let completions = store.get_completions(habit.id)?;
    let streak = habit.current_streak(&completions, today)?;
    println!("Current streak for '{}': {}", habit.name, streak);
    Ok(())
}

/// Pick a habit and report whether it was completed today
fn check_completed_today(store: &dyn HabitStore, theme: &ColorfulTheme) -> Result<(), AppError> {
    let today = now().date();
    let Some(habit) = select_habit(store, theme, today)? else {
        return Ok(());
    };

    let completions = store.get_completions(habit.id)?;
    if habit.is_completed_today(&completions, today)? {
        println!("Habit '{}' is already completed today.", habit.name);
    } else {
        println!("Habit '{}' is not yet completed today.", habit.name);
    }
    Ok(())
}

/// Pick a habit and show when it is next due
fn show_next_due_date(store: &dyn HabitStore, theme: &ColorfulTheme) -> Result<(), AppError> {
    let today = now().date();
    let Some(habit) = select_habit(store, theme, today)? else {
        return Ok(());
    };

    let completions = store.get_completions(habit.id)?;
    let due = habit.next_due_date(&completions, today)?;
    println!("Next due date for '{}': {}", habit.name, due);
    Ok(())
}

/// Show the overview table and prompt for a habit id
///
/// Returns None (after printing a message) when the id does not exist, so
/// menu handlers can simply fall through back to the menu.
fn select_habit(
    store: &dyn HabitStore,
    theme: &ColorfulTheme,
    today: NaiveDate,
) -> Result<Option<Habit>, AppError> {
    let habits = store.list_habits()?;
    if habits.is_empty() {
        println!("No habits found.");
        return Ok(None);
    }

    render::print_overview(store, &habits, "Habit Overview", today)?;

    let habit_id: i64 = Input::with_theme(theme)
        .with_prompt("Enter the ID of the habit")
        .interact_text()?;

    match store.get_habit(HabitId(habit_id)) {
        Ok(habit) => Ok(Some(habit)),
        Err(StorageError::HabitNotFound { habit_id }) => {
            println!("Habit with ID {} not found.", habit_id);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Prompt for one of the supported periodicities
fn select_periodicity(theme: &ColorfulTheme, prompt: &str) -> Result<Periodicity, AppError> {
    let items: Vec<&str> = Periodicity::ALL.iter().map(|p| p.as_str()).collect();
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(Periodicity::ALL[index])
}

/// Local wall-clock time, read once per menu action
fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Trimmed input, or None when the user left the field blank
fn non_empty(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
