//! Transient filter state applied to the task list.
//!
//! Filters are view state, never persisted. The three facets (completion,
//! priority, tag) combine as an AND predicate over the collection.

use crate::task::{Priority, Task};

/// Completion facet of the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionFilter {
    /// Show every task.
    #[default]
    All,
    /// Show only tasks that are not completed.
    Active,
    /// Show only completed tasks.
    Completed,
}

impl CompletionFilter {
    /// Next value in the all -> active -> completed cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    /// Short label for the filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// The three independent filter facets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Completion facet.
    pub completion: CompletionFilter,
    /// Priority facet; `None` shows every priority.
    pub priority: Option<Priority>,
    /// Tag facet; `None` shows every tag.
    pub tag: Option<String>,
}

impl FilterState {
    /// True if `task` passes all three facets.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self.completion {
            CompletionFilter::Active if task.completed => return false,
            CompletionFilter::Completed if !task.completed => return false,
            _ => {}
        }
        if let Some(priority) = self.priority
            && task.priority != priority
        {
            return false;
        }
        if let Some(tag) = &self.tag
            && !task.tags.iter().any(|t| t == tag)
        {
            return false;
        }
        true
    }

    /// Advances the completion facet through its cycle.
    pub const fn cycle_completion(&mut self) {
        self.completion = self.completion.next();
    }

    /// Advances the priority facet: all -> high -> medium -> low -> all.
    pub const fn cycle_priority(&mut self) {
        self.priority = match self.priority {
            None => Some(Priority::High),
            Some(Priority::High) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::Low),
            Some(Priority::Low) => None,
        };
    }

    /// Advances the tag facet through `tags` (typically the sorted output
    /// of [`all_tags`](crate::derive::all_tags)), then back to all.
    ///
    /// A current tag that no longer exists in `tags` resets the facet.
    pub fn cycle_tag(&mut self, tags: &[String]) {
        self.tag = match &self.tag {
            None => tags.first().cloned(),
            Some(current) => tags
                .iter()
                .position(|t| t == current)
                .and_then(|idx| tags.get(idx + 1))
                .cloned(),
        };
    }
}
