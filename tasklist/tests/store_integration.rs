//! End-to-end tests of the task list reducer running inside a real store.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use tasklist::{
    TaskAction, TaskCounts, TaskId, TaskListEnvironment, TaskListReducer, TaskListState,
    TaskListStore, TaskListView,
};
use tasklist_runtime::Store;
use tasklist_testing::{init_test_tracing, test_clock, ScriptedIds, StateRecorder};

fn store() -> TaskListStore {
    init_test_tracing();
    let env = TaskListEnvironment::new(Arc::new(test_clock()), Arc::new(ScriptedIds::default()));
    Store::new(TaskListState::new(), TaskListReducer::new(), env)
}

fn type_text(store: &mut TaskListStore, text: &str) {
    store
        .send(TaskAction::SetPendingInput {
            text: text.to_string(),
        })
        .unwrap();
}

fn texts(store: &TaskListStore) -> Vec<String> {
    store.state(|s| s.tasks.iter().map(|t| t.text.clone()).collect())
}

fn id_of(store: &TaskListStore, text: &str) -> TaskId {
    store.state(|s| s.tasks.iter().find(|t| t.text == text).unwrap().id)
}

#[test]
fn buy_milk_walk_dog_scenario() {
    let mut store = store();

    type_text(&mut store, "Buy milk");
    store.send(TaskAction::AddTask).unwrap();
    type_text(&mut store, "Walk dog");
    store.send(TaskAction::AddTask).unwrap();

    assert_eq!(texts(&store), vec!["Walk dog", "Buy milk"]);
    assert_eq!(store.state(TaskListState::counts), TaskCounts { completed: 0, total: 2 });
    assert!(store.state(|s| s.pending_input.is_empty()));

    let milk = id_of(&store, "Buy milk");
    store.send(TaskAction::ToggleTask { id: milk }).unwrap();
    assert_eq!(store.state(TaskListState::counts), TaskCounts { completed: 1, total: 2 });
    assert_eq!(store.state(|s| TaskListView::project(s).progress_percent), 50);

    store.send(TaskAction::ClearCompleted).unwrap();
    assert_eq!(texts(&store), vec!["Walk dog"]);
    assert_eq!(store.state(TaskListState::counts), TaskCounts { completed: 0, total: 1 });

    let dog = id_of(&store, "Walk dog");
    store.send(TaskAction::DeleteTask { id: dog }).unwrap();
    assert!(store.state(|s| s.tasks.is_empty()));
    assert!(store.state(|s| TaskListView::project(s).is_empty));
}

#[test]
fn adding_with_empty_input_changes_nothing() {
    let mut store = store();
    store.send(TaskAction::AddTask).unwrap();
    type_text(&mut store, "   ");
    store.send(TaskAction::AddTask).unwrap();

    assert_eq!(store.state(TaskListState::count), 0);
    assert_eq!(store.state(|s| s.pending_input.clone()), "   ");
}

#[test]
fn toggling_unknown_id_changes_nothing() {
    let mut store = store();
    type_text(&mut store, "Buy milk");
    store.send(TaskAction::AddTask).unwrap();
    let before = store.state(Clone::clone);

    store
        .send(TaskAction::ToggleTask { id: TaskId::new(999) })
        .unwrap();
    store
        .send(TaskAction::DeleteTask { id: TaskId::new(999) })
        .unwrap();

    assert_eq!(store.state(Clone::clone), before);
}

#[test]
fn quick_add_matches_type_then_submit() {
    let mut quick = store();
    quick
        .send(TaskAction::QuickAdd {
            text: "  Walk dog ".to_string(),
        })
        .unwrap();

    let mut manual = store();
    type_text(&mut manual, "  Walk dog ");
    manual.send(TaskAction::AddTask).unwrap();

    assert_eq!(quick.into_state(), manual.into_state());
}

#[test]
fn quick_add_notifies_once_with_final_state() {
    let mut store = store();
    let recorder = StateRecorder::new();
    store.subscribe(recorder.sink(|s: &TaskListState| (s.count(), s.pending_input.clone())));

    store
        .send(TaskAction::QuickAdd {
            text: "Buy milk".to_string(),
        })
        .unwrap();

    // Feedback actions are reduced before subscribers run
    assert_eq!(recorder.take(), vec![(1, String::new())]);
}

#[test]
fn subscribers_see_every_change() {
    let mut store = store();
    let recorder = StateRecorder::new();
    store.subscribe(recorder.sink(|s: &TaskListState| s.counts()));

    type_text(&mut store, "Buy milk");
    store.send(TaskAction::AddTask).unwrap();
    let id = id_of(&store, "Buy milk");
    store.send(TaskAction::ToggleTask { id }).unwrap();
    store.send(TaskAction::ClearCompleted).unwrap();

    assert_eq!(
        recorder.take(),
        vec![
            TaskCounts { completed: 0, total: 0 },
            TaskCounts { completed: 0, total: 1 },
            TaskCounts { completed: 1, total: 1 },
            TaskCounts { completed: 0, total: 0 },
        ]
    );
}

#[test]
fn ids_stay_unique_after_deletes() {
    let mut store = store();
    for text in ["a", "b", "c"] {
        store
            .send(TaskAction::QuickAdd {
                text: text.to_string(),
            })
            .unwrap();
    }
    let b = id_of(&store, "b");
    store.send(TaskAction::DeleteTask { id: b }).unwrap();
    store
        .send(TaskAction::QuickAdd {
            text: "d".to_string(),
        })
        .unwrap();

    let mut ids = store.state(|s| s.tasks.iter().map(|t| t.id).collect::<Vec<_>>());
    assert_eq!(ids.len(), 3);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert_eq!(texts(&store), vec!["d", "c", "a"]);
}

#[test]
fn production_environment_assigns_sequential_ids() {
    let mut store = Store::new(
        TaskListState::new(),
        TaskListReducer::new(),
        TaskListEnvironment::production(),
    );
    for text in ["first", "second"] {
        store
            .send(TaskAction::QuickAdd {
                text: text.to_string(),
            })
            .unwrap();
    }

    let ids = store.state(|s| s.tasks.iter().map(|t| t.id.get()).collect::<Vec<_>>());
    assert_eq!(ids, vec![2, 1]);
}
