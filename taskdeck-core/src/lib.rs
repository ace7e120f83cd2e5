//! `TaskDeck` core — task model, store, derivations, and persistence.
//!
//! The [`TaskStore`] owns the in-memory collection and is the single source
//! of truth; [`derive`] holds the pure computations over it; [`storage`]
//! defines the key-value persistence contract. Filter state is transient
//! view input and never persisted.

pub mod derive;
pub mod filter;
pub mod storage;
pub mod store;
pub mod task;

pub use derive::{Stats, all_tags, filtered_tasks, is_overdue, stats};
pub use filter::{CompletionFilter, FilterState};
pub use storage::{FileKvStore, KvStore, MemoryKvStore, StorageError, TASKS_KEY, TaskVault};
pub use store::TaskStore;
pub use task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
