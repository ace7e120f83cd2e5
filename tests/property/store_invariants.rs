//! Property-based task store invariant tests.
//!
//! Uses proptest to verify, for arbitrary sequences of
//! create/toggle/update/delete operations:
//! 1. The unfiltered view equals the full collection in most-recent-first
//!    order.
//! 2. `stats.active + stats.completed == stats.total`.
//! 3. `all_tags` is sorted, distinct, and equals the union of task tags.
//! 4. Ids stay unique and `updated_at >= created_at` for every task.
//! 5. Double-toggle restores every task's completion state.

use proptest::prelude::*;
use taskdeck_core::{
    FilterState, MemoryKvStore, Priority, TaskDraft, TaskPatch, TaskStore, TaskVault, all_tags,
    filtered_tasks, stats,
};

/// One step of a randomly generated editing session. Index-based ops pick
/// a task by position modulo the current collection size.
#[derive(Debug, Clone)]
enum Op {
    Create {
        title: String,
        priority: Priority,
        tags: Vec<String>,
    },
    Toggle(usize),
    Rename(usize, String),
    Delete(usize),
}

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::High),
        Just(Priority::Medium),
        Just(Priority::Low),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (
            "[a-z]{1,12}",
            arb_priority(),
            prop::collection::vec("[a-z]{1,5}", 0..3),
        )
            .prop_map(|(title, priority, tags)| Op::Create {
                title,
                priority,
                tags,
            }),
        any::<usize>().prop_map(Op::Toggle),
        (any::<usize>(), "[a-z]{1,12}").prop_map(|(idx, title)| Op::Rename(idx, title)),
        any::<usize>().prop_map(Op::Delete),
    ]
}

fn make_store() -> TaskStore {
    TaskStore::open(TaskVault::new(Box::new(MemoryKvStore::new())))
}

fn pick_id(store: &TaskStore, idx: usize) -> Option<taskdeck_core::TaskId> {
    let tasks = store.tasks();
    if tasks.is_empty() {
        return None;
    }
    Some(tasks[idx % tasks.len()].id.clone())
}

fn apply(store: &mut TaskStore, op: Op) {
    match op {
        Op::Create {
            title,
            priority,
            tags,
        } => {
            store.create(TaskDraft {
                title,
                priority,
                tags,
                ..TaskDraft::default()
            });
        }
        Op::Toggle(idx) => {
            if let Some(id) = pick_id(store, idx) {
                store.toggle(&id);
            }
        }
        Op::Rename(idx, title) => {
            if let Some(id) = pick_id(store, idx) {
                store.update(
                    &id,
                    TaskPatch {
                        title: Some(title),
                        updated_at: Some(chrono::Utc::now()),
                        ..TaskPatch::default()
                    },
                );
            }
        }
        Op::Delete(idx) => {
            if let Some(id) = pick_id(store, idx) {
                store.delete(&id);
            }
        }
    }
}

proptest! {
    #[test]
    fn unfiltered_view_equals_full_collection(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = make_store();
        for op in ops {
            apply(&mut store, op);
        }
        let visible = filtered_tasks(store.tasks(), &FilterState::default());
        prop_assert_eq!(visible.len(), store.tasks().len());
        for (seen, expected) in visible.iter().zip(store.tasks()) {
            prop_assert_eq!(*seen, expected);
        }
    }

    #[test]
    fn stats_arithmetic_always_holds(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = make_store();
        for op in ops {
            apply(&mut store, op);
            let s = stats(store.tasks());
            prop_assert_eq!(s.active + s.completed, s.total);
            prop_assert_eq!(s.total, store.tasks().len());
        }
    }

    #[test]
    fn all_tags_is_sorted_distinct_union(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = make_store();
        for op in ops {
            apply(&mut store, op);
        }
        let tags = all_tags(store.tasks());

        let mut sorted = tags.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(&tags, &sorted);

        for task in store.tasks() {
            for tag in &task.tags {
                prop_assert!(tags.contains(tag));
            }
        }
        for tag in &tags {
            prop_assert!(store.tasks().iter().any(|task| task.tags.contains(tag)));
        }
    }

    #[test]
    fn per_task_invariants_hold(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = make_store();
        for op in ops {
            apply(&mut store, op);
        }
        for (i, task) in store.tasks().iter().enumerate() {
            prop_assert!(task.updated_at >= task.created_at);
            for other in &store.tasks()[i + 1..] {
                prop_assert!(task.id != other.id);
            }
            let mut seen = task.tags.clone();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), task.tags.len());
        }
    }

    #[test]
    fn double_toggle_restores_completion(ops in prop::collection::vec(arb_op(), 0..30)) {
        let mut store = make_store();
        for op in ops {
            apply(&mut store, op);
        }
        let before: Vec<bool> = store.tasks().iter().map(|t| t.completed).collect();
        let ids: Vec<_> = store.tasks().iter().map(|t| t.id.clone()).collect();
        for id in &ids {
            store.toggle(id);
            store.toggle(id);
        }
        let after: Vec<bool> = store.tasks().iter().map(|t| t.completed).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn creation_order_is_most_recent_first(titles in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let mut store = make_store();
        for title in &titles {
            store.create(TaskDraft {
                title: title.clone(),
                ..TaskDraft::default()
            });
        }
        let stored: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        let expected: Vec<&str> = titles.iter().rev().map(String::as_str).collect();
        prop_assert_eq!(stored, expected);
    }
}
