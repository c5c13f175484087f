//! Reducer logic for the task list.
//!
//! Every operation is tolerant: an action that cannot apply (blank input,
//! an id that is not in the list) leaves the state exactly as it was and
//! produces no effects. Nothing here returns an error.

use crate::types::{Task, TaskAction, TaskId, TaskListState};
use std::sync::Arc;
use tasklist_core::{
    effect::Effect,
    environment::{Clock, IdGenerator, SequentialIdGenerator, SystemClock},
    reducer::Reducer,
    smallvec, SmallVec,
};

/// Environment dependencies for the task list reducer
#[derive(Clone)]
pub struct TaskListEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of task ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TaskListEnvironment {
    /// Creates a new `TaskListEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and a fresh sequential id generator
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(SequentialIdGenerator::new()))
    }
}

impl std::fmt::Debug for TaskListEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskListEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the task list
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskListReducer;

impl TaskListReducer {
    /// Creates a new `TaskListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draws ids until one is not already in the list
    fn fresh_id(state: &TaskListState, env: &TaskListEnvironment) -> TaskId {
        loop {
            let id = TaskId::new(env.ids.next_id());
            if !state.exists(id) {
                return id;
            }
            tracing::warn!(%id, "Generated id already in use, drawing another");
        }
    }

    fn add_task(state: &mut TaskListState, env: &TaskListEnvironment) {
        let Some(text) = state.submittable_text().map(str::to_owned) else {
            tracing::debug!("Ignoring add: pending input is blank");
            return;
        };

        let id = Self::fresh_id(state, env);
        state.tasks.insert(0, Task::new(id, text, env.clock.now()));
        state.pending_input.clear();
        tracing::debug!(%id, total = state.count(), "Task added");
    }

    fn toggle_task(state: &mut TaskListState, id: TaskId) {
        if let Some(task) = state.get_mut(id) {
            task.toggle();
            tracing::debug!(%id, completed = task.completed, "Task toggled");
        } else {
            tracing::debug!(%id, "Ignoring toggle: no such task");
        }
    }

    fn delete_task(state: &mut TaskListState, id: TaskId) {
        if let Some(index) = state.position(id) {
            state.tasks.remove(index);
            tracing::debug!(%id, total = state.count(), "Task deleted");
        } else {
            tracing::debug!(%id, "Ignoring delete: no such task");
        }
    }

    fn clear_completed(state: &mut TaskListState) {
        let before = state.count();
        state.tasks.retain(|task| !task.completed);
        tracing::debug!(
            removed = before - state.count(),
            total = state.count(),
            "Cleared completed tasks"
        );
    }
}

impl Reducer for TaskListReducer {
    type State = TaskListState;
    type Action = TaskAction;
    type Environment = TaskListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TaskAction::SetPendingInput { text } => {
                tracing::trace!(len = text.len(), "Pending input replaced");
                state.pending_input = text;
            },
            TaskAction::AddTask => Self::add_task(state, env),
            TaskAction::ToggleTask { id } => Self::toggle_task(state, id),
            TaskAction::DeleteTask { id } => Self::delete_task(state, id),
            TaskAction::ClearCompleted => Self::clear_completed(state),
            TaskAction::QuickAdd { text } => {
                return smallvec![Effect::chain(vec![
                    Effect::Send(TaskAction::SetPendingInput { text }),
                    Effect::Send(TaskAction::AddTask),
                ])];
            },
        }

        SmallVec::new()
    }
}
