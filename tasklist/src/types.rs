//! Domain types for the task list.
//!
//! A task list is an ordered collection of short text items, newest first,
//! plus the text the user is currently typing. Tasks are created, toggled
//! and deleted; nothing else about them ever changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for a task
///
/// Displayed as `#n`. Assigned once at creation and never reused within a
/// session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from its raw value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Accepts `3` as well as `#3`
impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        digits.parse().map(Self)
    }
}

/// A single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// What needs doing; trimmed and never empty
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
    /// When the task was created
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, incomplete task
    #[must_use]
    pub const fn new(id: TaskId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
        }
    }

    /// Flips the completion flag
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Completion summary, always computed from the current list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    /// Tasks marked completed
    pub completed: usize,
    /// All tasks
    pub total: usize,
}

impl TaskCounts {
    /// Tasks still to do
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    /// Share of completed tasks, rounded down; 0 for an empty list
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        u8::try_from(self.completed * 100 / self.total).unwrap_or(100)
    }

    /// True when there is at least one task and every task is completed
    #[must_use]
    pub const fn all_completed(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// State of the task list
///
/// The store owns exactly one of these for the lifetime of a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListState {
    /// All tasks, most recently added first
    pub tasks: Vec<Task>,
    /// Text typed but not yet submitted
    pub pending_input: String,
}

impl TaskListState {
    /// Creates a new empty state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            pending_input: String::new(),
        }
    }

    /// Returns the number of tasks
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the number of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Returns both counts, computed from the current list
    #[must_use]
    pub fn counts(&self) -> TaskCounts {
        TaskCounts {
            completed: self.completed_count(),
            total: self.count(),
        }
    }

    /// Returns a task by ID
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Returns a mutable task by ID
    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Position of a task in display order
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn exists(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    /// The pending input as it would be submitted, or `None` if blank
    #[must_use]
    pub fn submittable_text(&self) -> Option<&str> {
        let trimmed = self.pending_input.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Every input the task list reacts to
///
/// The first five are the user events the rendering layer forwards.
/// `QuickAdd` is a convenience for front ends that collect text and submit
/// in one step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskAction {
    /// Replace the pending input verbatim
    SetPendingInput {
        /// New pending text
        text: String,
    },

    /// Turn the pending input into a task
    AddTask,

    /// Flip a task between done and not done
    ToggleTask {
        /// Task to toggle
        id: TaskId,
    },

    /// Remove a task
    DeleteTask {
        /// Task to delete
        id: TaskId,
    },

    /// Remove every completed task
    ClearCompleted,

    /// Set the pending input and submit it
    QuickAdd {
        /// Text to add
        text: String,
    },
}
