//! Task page view state: loaded records, filters and summary counts.
//!
//! SYSTEM CONTEXT
//! ==============
//! The task page owns one `RwSignal<TasksState>`. Records are replaced
//! wholesale after every reload; filtering and stats are derived on read.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use chrono::NaiveDate;

use crate::services::categories::Category;
use crate::services::tasks::Task;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub overdue: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TasksState {
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub status: StatusFilter,
    /// Category name; `None` shows every category.
    pub category: Option<String>,
}

impl TasksState {
    /// Tasks passing both filters, in load order.
    #[must_use]
    pub fn visible(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| self.status.admits(t))
            .filter(|t| self.category.as_ref().is_none_or(|c| &t.category == c))
            .cloned()
            .collect()
    }

    /// Counts over all loaded tasks, ignoring filters.
    #[must_use]
    pub fn stats(&self, today: NaiveDate) -> TaskStats {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        TaskStats {
            total: self.tasks.len(),
            completed,
            active: self.tasks.len() - completed,
            overdue: self.tasks.iter().filter(|t| is_overdue(t, today)).count(),
        }
    }
}

/// Open and due strictly before `today`.
#[must_use]
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.due_date.is_some_and(|due| due < today)
}
