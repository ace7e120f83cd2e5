//! Application state and event handling.
//!
//! `App` owns the [`TaskStore`] and the transient view state around it:
//! the task form (create and edit modes), the filter facets, panel focus,
//! and list selection. Form state never leaks into the store; submission
//! translates it into a draft or patch at the boundary.

use chrono::{NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_core::{
    FilterState, Priority, Stats, Task, TaskDraft, TaskId, TaskPatch, TaskStore, all_tags,
    filtered_tasks, stats,
};

/// Input and stored format for due dates. Display format is configurable;
/// entry is fixed so parsing stays unambiguous.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// The task form (default).
    Form,
    /// The task list.
    List,
}

/// Fields of the task form, in traversal order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    /// Task title (required).
    #[default]
    Title,
    /// Optional description.
    Description,
    /// Priority selector.
    Priority,
    /// Optional due date, entered as `YYYY-MM-DD`.
    DueDate,
    /// Tag entry; Enter adds the pending tag.
    Tags,
}

impl FormField {
    /// Next field downward, wrapping to the top.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Priority,
            Self::Priority => Self::DueDate,
            Self::DueDate => Self::Tags,
            Self::Tags => Self::Title,
        }
    }

    /// Previous field upward, wrapping to the bottom.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Tags,
            Self::Description => Self::Title,
            Self::Priority => Self::Description,
            Self::DueDate => Self::Priority,
            Self::Tags => Self::DueDate,
        }
    }

    /// Label shown next to the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Priority => "Priority",
            Self::DueDate => "Due date",
            Self::Tags => "Tags",
        }
    }
}

/// Transient state of the task form, reused for create and edit modes.
///
/// Ordinary view state: nothing here is part of the durable model until
/// submission turns it into a draft or patch.
#[derive(Debug, Default)]
pub struct TaskForm {
    /// Title input.
    pub title: String,
    /// Description input.
    pub description: String,
    /// Selected priority.
    pub priority: Priority,
    /// Raw due date input, parsed on submit.
    pub due_date: String,
    /// Pending tag input.
    pub tag_input: String,
    /// Tags already added.
    pub tags: Vec<String>,
    /// Focused field.
    pub field: FormField,
    /// Byte offset of the cursor within the focused text field.
    pub cursor: usize,
}

impl TaskForm {
    /// Populates the form from an existing task for editing.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            due_date: task
                .due_date
                .map(|due| due.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            tag_input: String::new(),
            tags: task.tags.clone(),
            field: FormField::Title,
            cursor: task.title.len(),
        }
    }

    /// Text content of the focused field, if it is a text field.
    #[must_use]
    pub fn active_text(&self) -> Option<&str> {
        match self.field {
            FormField::Title => Some(&self.title),
            FormField::Description => Some(&self.description),
            FormField::DueDate => Some(&self.due_date),
            FormField::Tags => Some(&self.tag_input),
            FormField::Priority => None,
        }
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Tags => Some(&mut self.tag_input),
            FormField::Priority => None,
        }
    }

    /// Moves focus to `field`, placing the cursor at the end of its text.
    pub fn focus_field(&mut self, field: FormField) {
        self.field = field;
        self.cursor_to_end();
    }

    /// Places the cursor at the end of the focused field's text.
    pub fn cursor_to_end(&mut self) {
        self.cursor = self.active_text().map_or(0, str::len);
    }

    /// Inserts a character at the cursor position.
    pub fn enter_char(&mut self, c: char) {
        let cursor = self.cursor;
        if let Some(text) = self.active_text_mut() {
            text.insert(cursor, c);
            self.cursor = cursor + c.len_utf8();
        }
    }

    /// Deletes the character before the cursor.
    pub fn delete_char(&mut self) {
        let cursor = self.cursor;
        if cursor == 0 {
            return;
        }
        let step = self
            .active_text()
            .and_then(|text| text[..cursor].chars().next_back())
            .map_or(0, char::len_utf8);
        if step == 0 {
            return;
        }
        if let Some(text) = self.active_text_mut() {
            text.remove(cursor - step);
            self.cursor = cursor - step;
        }
    }

    /// Moves the cursor one character left.
    pub fn move_cursor_left(&mut self) {
        let step = self
            .active_text()
            .and_then(|text| text[..self.cursor].chars().next_back())
            .map_or(0, char::len_utf8);
        self.cursor -= step;
    }

    /// Moves the cursor one character right.
    pub fn move_cursor_right(&mut self) {
        let step = self
            .active_text()
            .and_then(|text| text[self.cursor..].chars().next())
            .map_or(0, char::len_utf8);
        self.cursor += step;
    }

    /// Adds the pending tag input as a tag.
    ///
    /// Empty input and duplicate labels are silently ignored; the input is
    /// cleared only when a tag was actually added.
    pub fn add_tag(&mut self) {
        let tag = self.tag_input.trim().to_string();
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
            self.tag_input.clear();
            self.cursor = 0;
        }
    }

    /// Removes the most recently added tag.
    pub fn remove_last_tag(&mut self) {
        self.tags.pop();
    }
}

/// Main application state.
pub struct App {
    store: TaskStore,
    /// Active filter facets (transient, never persisted).
    pub filter: FilterState,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// The task form.
    pub form: TaskForm,
    /// Id of the task being edited, if the form is in edit mode.
    pub editing: Option<TaskId>,
    /// Selected row in the filtered list.
    pub selected: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Due date display format for the list panel.
    pub date_format: String,
}

impl App {
    /// Creates the application over an opened store.
    #[must_use]
    pub fn new(store: TaskStore, date_format: String) -> Self {
        Self {
            store,
            filter: FilterState::default(),
            focus: PanelFocus::Form,
            form: TaskForm::default(),
            editing: None,
            selected: 0,
            should_quit: false,
            date_format,
        }
    }

    /// Read access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Tasks passing the current filters, most-recent-first.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filtered_tasks(self.store.tasks(), &self.filter)
    }

    /// Completion statistics over the whole collection.
    #[must_use]
    pub fn stats(&self) -> Stats {
        stats(self.store.tasks())
    }

    /// Sorted distinct tags over the whole collection.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        all_tags(self.store.tasks())
    }

    /// The task under the list cursor, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected).copied()
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.toggle_focus();
                return;
            }
            _ => {}
        }

        // Focus-specific shortcuts
        match self.focus {
            PanelFocus::Form => self.handle_form_key(key),
            PanelFocus::List => self.handle_list_key(key),
        }
    }

    /// Handle key event when the form is focused.
    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                if self.editing.is_some() {
                    self.cancel_edit();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Enter => {
                if self.form.field == FormField::Tags && !self.form.tag_input.trim().is_empty() {
                    self.form.add_tag();
                } else {
                    self.submit_form();
                }
            }
            KeyCode::Up => self.form.focus_field(self.form.field.prev()),
            KeyCode::Down => self.form.focus_field(self.form.field.next()),
            KeyCode::Left => {
                if self.form.field == FormField::Priority {
                    self.form.priority = prev_priority(self.form.priority);
                } else {
                    self.form.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if self.form.field == FormField::Priority {
                    self.form.priority = next_priority(self.form.priority);
                } else {
                    self.form.move_cursor_right();
                }
            }
            KeyCode::Home => self.form.cursor = 0,
            KeyCode::End => self.form.cursor_to_end(),
            KeyCode::Backspace => {
                if self.form.field == FormField::Tags && self.form.tag_input.is_empty() {
                    self.form.remove_last_tag();
                } else {
                    self.form.delete_char();
                }
            }
            KeyCode::Char(c) => {
                if self.form.field == FormField::Priority {
                    if c == ' ' {
                        self.form.priority = next_priority(self.form.priority);
                    }
                } else {
                    self.form.enter_char(c);
                }
            }
            _ => {}
        }
    }

    /// Handle key event when the list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.prev_task(),
            KeyCode::Down | KeyCode::Char('j') => self.next_task(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('n') => self.begin_create(),
            KeyCode::Char('f') => {
                self.filter.cycle_completion();
                self.clamp_selection();
            }
            KeyCode::Char('p') => {
                self.filter.cycle_priority();
                self.clamp_selection();
            }
            KeyCode::Char('t') => {
                let tags = self.tags();
                self.filter.cycle_tag(&tags);
                self.clamp_selection();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    /// Switch focus between form and list.
    pub const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Form => PanelFocus::List,
            PanelFocus::List => PanelFocus::Form,
        };
    }

    /// Submit the form: create a task, or save the edit in progress.
    ///
    /// An empty (post-trim) title is rejected here, at the form boundary;
    /// the store never sees it. On success the form resets.
    fn submit_form(&mut self) {
        let title = self.form.title.trim().to_string();
        if title.is_empty() {
            return;
        }

        let description = non_empty(self.form.description.trim());
        let due_date = parse_due_date(&self.form.due_date);
        let tags = self.form.tags.clone();
        let priority = self.form.priority;

        if let Some(id) = self.editing.take() {
            self.store.update(
                &id,
                TaskPatch {
                    title: Some(title),
                    description: Some(description),
                    priority: Some(priority),
                    due_date: Some(due_date),
                    tags: Some(tags),
                    updated_at: Some(Utc::now()),
                    ..TaskPatch::default()
                },
            );
            self.focus = PanelFocus::List;
        } else {
            self.store.create(TaskDraft {
                title,
                description,
                priority,
                due_date,
                tags,
            });
            // The new task lands at the front of the list.
            self.selected = 0;
        }

        self.form = TaskForm::default();
        self.clamp_selection();
    }

    /// Load the selected task into the form for editing.
    fn begin_edit(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        self.editing = Some(task.id.clone());
        self.form = TaskForm::from_task(&task);
        self.focus = PanelFocus::Form;
    }

    /// Reset the form for a fresh task and focus it.
    fn begin_create(&mut self) {
        self.editing = None;
        self.form = TaskForm::default();
        self.focus = PanelFocus::Form;
    }

    /// Abandon the edit in progress without mutating the task.
    fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = TaskForm::default();
        self.focus = PanelFocus::List;
    }

    /// Toggle completion of the selected task.
    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id.clone()) else {
            return;
        };
        self.store.toggle(&id);
        // The task may have left the filtered view.
        self.clamp_selection();
    }

    /// Delete the selected task.
    fn delete_selected(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id.clone()) else {
            return;
        };
        self.store.delete(&id);
        self.clamp_selection();
    }

    /// Select the previous task.
    const fn prev_task(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Select the next task.
    fn next_task(&mut self) {
        if self.selected + 1 < self.visible_tasks().len() {
            self.selected += 1;
        }
    }

    /// Keep the selection inside the filtered view.
    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Next priority in the high -> medium -> low cycle.
const fn next_priority(priority: Priority) -> Priority {
    match priority {
        Priority::High => Priority::Medium,
        Priority::Medium => Priority::Low,
        Priority::Low => Priority::High,
    }
}

/// Previous priority in the high -> medium -> low cycle.
const fn prev_priority(priority: Priority) -> Priority {
    match priority {
        Priority::High => Priority::Low,
        Priority::Medium => Priority::High,
        Priority::Low => Priority::Medium,
    }
}

/// `None` for an empty string, `Some` otherwise.
fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Parses the due date input; empty or unparseable input means no due date.
fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(input, DUE_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!("ignoring unparseable due date {input:?}: {e}");
            None
        }
    }
}
