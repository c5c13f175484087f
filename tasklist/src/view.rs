//! Read-only projection of the task list for rendering.
//!
//! A view is rebuilt from the state after every change and holds no logic
//! of its own beyond what can be derived from that state. Renderers only
//! ever see a view.

use crate::types::{TaskCounts, TaskId, TaskListState};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskRow<'a> {
    /// Task identifier, passed back on toggle/delete
    pub id: TaskId,
    /// Task text
    pub text: &'a str,
    /// Whether the task is done
    pub completed: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Everything a front end needs to draw the task list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskListView<'a> {
    /// Rows in display order (most recent first)
    pub tasks: Vec<TaskRow<'a>>,
    /// Text in the entry field
    pub pending_input: &'a str,
    /// Whether the submit control should be enabled
    pub can_submit: bool,
    /// Completed and total counts
    pub counts: TaskCounts,
    /// Completion percentage for the progress bar
    pub progress_percent: u8,
    /// Every task is done (and there is at least one)
    pub all_completed: bool,
    /// The stats panel is shown only when there are tasks
    pub show_stats: bool,
    /// The clear-completed control is shown only when something is done
    pub show_clear_completed: bool,
    /// No tasks at all; show the empty state
    pub is_empty: bool,
}

impl<'a> TaskListView<'a> {
    /// Builds a view of the current state
    #[must_use]
    pub fn project(state: &'a TaskListState) -> Self {
        let counts = state.counts();
        let tasks = state
            .tasks
            .iter()
            .map(|task| TaskRow {
                id: task.id,
                text: &task.text,
                completed: task.completed,
                created_at: task.created_at,
            })
            .collect();

        Self {
            tasks,
            pending_input: &state.pending_input,
            can_submit: state.submittable_text().is_some(),
            counts,
            progress_percent: counts.progress_percent(),
            all_completed: counts.all_completed(),
            show_stats: counts.total > 0,
            show_clear_completed: counts.completed > 0,
            is_empty: counts.total == 0,
        }
    }
}
