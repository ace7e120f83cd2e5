//! Task data model for `TaskDeck`.
//!
//! Defines the task record and its serialized JSON shape, the draft used
//! to create tasks from form input, and the patch used for partial edits.
//! Stored records use the camelCase field names of the on-disk format;
//! optional fields are omitted entirely when absent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
///
/// A v7 UUID combines a millisecond timestamp with a random suffix, which
/// keeps collisions negligible for single-user, single-process usage. No
/// uniqueness registry is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority level of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Needs attention before everything else.
    High,
    /// The default for new tasks.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A single to-do item.
///
/// Invariants maintained by [`from_draft`](Self::from_draft) and the store:
/// the id is unique within the collection, `tags` contains no duplicates,
/// and `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier (UUID v7, time-ordered).
    pub id: TaskId,
    /// Title, non-empty after trimming (enforced by the form, not here).
    pub title: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the task is done.
    pub completed: bool,
    /// Priority level.
    pub priority: Priority,
    /// Optional calendar due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Distinct labels, insertion order preserved.
    pub tags: Vec<String>,
    /// When the task was created (ISO-8601 on the wire).
    pub created_at: DateTime<Utc>,
    /// When the task was last mutated. Equals `created_at` at creation.
    pub updated_at: DateTime<Utc>,
}

/// Form input for creating a task.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    /// Title, already trimmed and verified non-empty by the caller.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority level (defaults to medium).
    pub priority: Priority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Tag labels; duplicates are dropped on creation.
    pub tags: Vec<String>,
}

/// A partial update to a task's editable fields.
///
/// `None` leaves a field untouched. For the clearable fields
/// (`description`, `due_date`) the inner `Option` distinguishes setting a
/// value from clearing it. The edit flow supplies `updated_at` itself;
/// toggling bumps it internally instead.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New due date, or `Some(None)` to clear it.
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement tag list; duplicates are dropped.
    pub tags: Option<Vec<String>>,
    /// New completion state.
    pub completed: Option<bool>,
    /// New last-modified timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Builds a task from form input.
    ///
    /// Assigns a fresh id, sets `completed` to false, and stamps both
    /// `created_at` and `updated_at` with the same instant. Duplicate tags
    /// are dropped, keeping the first occurrence.
    #[must_use]
    pub fn from_draft(draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            completed: false,
            priority: draft.priority,
            due_date: draft.due_date,
            tags: dedup_tags(draft.tags),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges a patch into this task. Fields the patch does not name are
    /// left untouched, including `updated_at`.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(tags) = patch.tags {
            self.tags = dedup_tags(tags);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }
}

/// Drops duplicate tags, keeping the first occurrence of each label.
fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !distinct.contains(&tag) {
            distinct.push(tag);
        }
    }
    distinct
}
