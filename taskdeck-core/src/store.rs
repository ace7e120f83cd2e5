//! The task store: single source of truth for the task collection.

use chrono::Utc;

use crate::storage::TaskVault;
use crate::task::{Task, TaskDraft, TaskId, TaskPatch};

/// Owns the in-memory task collection and its persistence adapter.
///
/// The collection is ordered most-recent-first: new tasks are prepended.
/// All mutation goes through the operations below, and each mutation
/// rewrites the whole collection through the vault as a side effect. A
/// failed write is logged and dropped inside the vault; in-memory state
/// stays authoritative for the session and the next successful mutation
/// re-persists it.
///
/// Operations on an unknown id are silent no-ops, matching the
/// fire-and-forget intent model of the view layer.
pub struct TaskStore {
    tasks: Vec<Task>,
    vault: TaskVault,
}

impl TaskStore {
    /// Opens a store over the given vault, loading any persisted tasks.
    #[must_use]
    pub fn open(vault: TaskVault) -> Self {
        let tasks = vault.load();
        tracing::debug!(count = tasks.len(), "task store opened");
        Self { tasks, vault }
    }

    /// Current collection, most-recent-first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Creates a task from the draft and prepends it to the collection.
    ///
    /// The new task gets a fresh id, `completed = false`, and one instant
    /// stamped on both `created_at` and `updated_at`. Returns the new id.
    /// Callers are expected to have rejected empty titles already.
    pub fn create(&mut self, draft: TaskDraft) -> TaskId {
        let task = Task::from_draft(draft, Utc::now());
        let id = task.id.clone();
        tracing::debug!(task = %id, "task created");
        self.tasks.insert(0, task);
        self.persist();
        id
    }

    /// Flips `completed` on the matching task and bumps `updated_at`.
    ///
    /// Silently does nothing if `id` is unknown.
    pub fn toggle(&mut self, id: &TaskId) {
        if let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) {
            task.completed = !task.completed;
            task.updated_at = Utc::now();
            tracing::debug!(task = %id, completed = task.completed, "task toggled");
            self.persist();
        }
    }

    /// Merges `patch` into the matching task.
    ///
    /// The patch carries `updated_at` explicitly when the edit flow wants
    /// it bumped. Silently does nothing if `id` is unknown.
    pub fn update(&mut self, id: &TaskId, patch: TaskPatch) {
        if let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) {
            task.apply(patch);
            tracing::debug!(task = %id, "task updated");
            self.persist();
        }
    }

    /// Removes the matching task from the collection.
    ///
    /// Silently does nothing if `id` is unknown.
    pub fn delete(&mut self, id: &TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() < before {
            tracing::debug!(task = %id, "task deleted");
            self.persist();
        }
    }

    fn persist(&self) {
        self.vault.save(&self.tasks);
    }
}
