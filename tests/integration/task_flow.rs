//! Integration tests driving the full intent flow through `App`.
//!
//! These exercise the view-layer intents end to end: key events in, store
//! mutations and derivations out, with persistence riding along underneath.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck::app::{App, FormField, PanelFocus};
use taskdeck_core::{
    CompletionFilter, FileKvStore, MemoryKvStore, Priority, TaskStore, TaskVault, is_overdue,
};
use tempfile::TempDir;

fn memory_app() -> App {
    let store = TaskStore::open(TaskVault::new(Box::new(MemoryKvStore::new())));
    App::new(store, "%Y-%m-%d".to_string())
}

fn key(app: &mut App, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c));
    }
}

/// Fill in and submit the form: title, priority, due date, tags.
fn submit_task(app: &mut App, title: &str, priority: Priority, due: &str, tags: &[&str]) {
    app.focus = PanelFocus::Form;
    type_text(app, title);

    app.form.focus_field(FormField::Priority);
    while app.form.priority != priority {
        key(app, KeyCode::Right);
    }

    if !due.is_empty() {
        app.form.focus_field(FormField::DueDate);
        type_text(app, due);
    }

    app.form.focus_field(FormField::Tags);
    for tag in tags {
        type_text(app, tag);
        key(app, KeyCode::Enter);
    }

    // Tag input is empty, so Enter submits.
    key(app, KeyCode::Enter);
}

#[test]
fn create_toggle_delete_round_trip() {
    let mut app = memory_app();
    submit_task(&mut app, "Buy milk", Priority::Low, "", &[]);
    assert_eq!(app.store().tasks().len(), 1);

    app.toggle_focus();
    key(&mut app, KeyCode::Char(' '));
    assert!(app.store().tasks()[0].completed);

    key(&mut app, KeyCode::Char('d'));
    assert!(app.store().tasks().is_empty());
}

#[test]
fn tags_and_priority_filters_drive_the_visible_list() {
    let mut app = memory_app();
    submit_task(&mut app, "A", Priority::High, "", &["work"]);
    submit_task(&mut app, "B", Priority::Low, "", &["home"]);

    assert_eq!(app.tags(), vec!["home", "work"]);

    app.toggle_focus();
    key(&mut app, KeyCode::Char('p')); // priority filter: high
    let titles: Vec<&str> = app.visible_tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["A"]);

    key(&mut app, KeyCode::Char('p')); // medium: nothing matches
    assert!(app.visible_tasks().is_empty());

    key(&mut app, KeyCode::Char('p')); // low
    key(&mut app, KeyCode::Char('t')); // tag filter: "home"
    let titles: Vec<&str> = app.visible_tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["B"]);
}

#[test]
fn completion_filter_cycles_through_views() {
    let mut app = memory_app();
    submit_task(&mut app, "open", Priority::Medium, "", &[]);
    submit_task(&mut app, "done", Priority::Medium, "", &[]);

    app.toggle_focus();
    key(&mut app, KeyCode::Char(' ')); // complete "done" (front of list)

    assert_eq!(app.filter.completion, CompletionFilter::All);
    assert_eq!(app.visible_tasks().len(), 2);

    key(&mut app, KeyCode::Char('f'));
    let titles: Vec<&str> = app.visible_tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["open"]);

    key(&mut app, KeyCode::Char('f'));
    let titles: Vec<&str> = app.visible_tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["done"]);

    key(&mut app, KeyCode::Char('f'));
    assert_eq!(app.visible_tasks().len(), 2);
}

#[test]
fn overdue_flag_follows_completion() {
    let mut app = memory_app();
    submit_task(&mut app, "ancient", Priority::Medium, "2000-01-01", &[]);

    let task = &app.store().tasks()[0];
    assert!(is_overdue(task, Utc::now()));

    app.toggle_focus();
    key(&mut app, KeyCode::Char(' '));
    let task = &app.store().tasks()[0];
    assert!(!is_overdue(task, Utc::now()));
}

#[test]
fn stats_track_the_session() {
    let mut app = memory_app();
    submit_task(&mut app, "a", Priority::Medium, "", &[]);
    submit_task(&mut app, "b", Priority::Medium, "", &[]);
    submit_task(&mut app, "c", Priority::Medium, "", &[]);

    app.toggle_focus();
    key(&mut app, KeyCode::Char(' '));

    let stats = app.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.active, 2);
}

#[test]
fn edit_intent_updates_the_task_in_place() {
    let mut app = memory_app();
    submit_task(&mut app, "draft title", Priority::Medium, "", &["work"]);
    let id = app.store().tasks()[0].id.clone();
    let created_at = app.store().tasks()[0].created_at;

    app.toggle_focus();
    key(&mut app, KeyCode::Char('e'));
    assert_eq!(app.form.title, "draft title");
    assert_eq!(app.form.tags, vec!["work"]);

    // Rewrite the title, bump priority, save.
    app.form.title.clear();
    app.form.focus_field(FormField::Title);
    type_text(&mut app, "final title");
    app.form.focus_field(FormField::Priority);
    key(&mut app, KeyCode::Left); // medium -> high
    key(&mut app, KeyCode::Enter);

    let task = app.store().get(&id).unwrap();
    assert_eq!(task.title, "final title");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.tags, vec!["work"]);
    assert_eq!(task.created_at, created_at);
    assert!(task.updated_at > created_at);
    // Same id, same slot: edit never re-creates.
    assert_eq!(app.store().tasks().len(), 1);
}

#[test]
fn session_state_survives_an_app_restart() {
    let dir = TempDir::new().unwrap();

    let store = TaskStore::open(TaskVault::new(Box::new(FileKvStore::new(dir.path()))));
    let mut app = App::new(store, "%Y-%m-%d".to_string());
    submit_task(&mut app, "persisted", Priority::High, "2030-06-01", &["later"]);
    app.toggle_focus();
    key(&mut app, KeyCode::Char(' '));
    drop(app);

    let store = TaskStore::open(TaskVault::new(Box::new(FileKvStore::new(dir.path()))));
    let app = App::new(store, "%Y-%m-%d".to_string());
    let tasks = app.store().tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "persisted");
    assert_eq!(tasks[0].priority, Priority::High);
    assert!(tasks[0].completed);
    assert_eq!(tasks[0].tags, vec!["later"]);
}
