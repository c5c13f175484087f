//! # Task List Testing
//!
//! Testing utilities and helpers for the task list.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - A recorder for store subscriptions
//! - proptest strategies for user-typed text
//!
//! ## Example
//!
//! ```
//! use tasklist_testing::{test_clock, ScriptedIds};
//! use tasklist_core::environment::{Clock, IdGenerator};
//!
//! let clock = test_clock();
//! assert_eq!(clock.now(), clock.now());
//!
//! let ids = ScriptedIds::new([7, 3]);
//! assert_eq!(ids.next_id(), 7);
//! assert_eq!(ids.next_id(), 3);
//! assert_eq!(ids.next_id(), 8); // continues past the largest scripted id
//! ```

use chrono::{DateTime, Utc};
use tasklist_core::environment::{Clock, IdGenerator};

mod reducer_test;

pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::collections::VecDeque;
    use std::sync::{Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot
    /// happen for a valid RFC 3339 literal.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Id generator that replays a script, then counts upward
    ///
    /// Scripted values are returned verbatim, duplicates included, which
    /// lets tests drive a reducer into an id collision. Once the script is
    /// exhausted it continues from one past the largest value handed out.
    #[derive(Debug, Default)]
    pub struct ScriptedIds {
        inner: Mutex<ScriptState>,
    }

    #[derive(Debug, Default)]
    struct ScriptState {
        script: VecDeque<u64>,
        high_water: u64,
    }

    impl ScriptedIds {
        /// Create a generator that returns `script` first
        pub fn new(script: impl IntoIterator<Item = u64>) -> Self {
            Self {
                inner: Mutex::new(ScriptState {
                    script: script.into_iter().collect(),
                    high_water: 0,
                }),
            }
        }

        /// Number of scripted ids not yet handed out
        #[must_use]
        pub fn remaining(&self) -> usize {
            self.inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .script
                .len()
        }
    }

    impl IdGenerator for ScriptedIds {
        fn next_id(&self) -> u64 {
            let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            let id = state
                .script
                .pop_front()
                .unwrap_or_else(|| state.high_water.saturating_add(1));
            state.high_water = state.high_water.max(id);
            id
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Collects values handed to a store subscription
    ///
    /// Clone the recorder into the subscription closure and read it back
    /// from the test.
    ///
    /// ```
    /// use tasklist_testing::StateRecorder;
    ///
    /// let recorder = StateRecorder::new();
    /// let mut sink = recorder.sink(|n: &u32| *n * 2);
    /// sink(&1);
    /// sink(&5);
    /// assert_eq!(recorder.take(), vec![2, 10]);
    /// ```
    #[derive(Debug)]
    pub struct StateRecorder<T> {
        seen: Rc<RefCell<Vec<T>>>,
    }

    impl<T> Clone for StateRecorder<T> {
        fn clone(&self) -> Self {
            Self {
                seen: Rc::clone(&self.seen),
            }
        }
    }

    impl<T> Default for StateRecorder<T> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<T> StateRecorder<T> {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self {
                seen: Rc::new(RefCell::new(Vec::new())),
            }
        }

        /// Build a subscriber closure that records `project(state)`
        pub fn sink<S, F>(&self, project: F) -> impl FnMut(&S) + 'static
        where
            S: ?Sized + 'static,
            F: Fn(&S) -> T + 'static,
            T: 'static,
        {
            let seen = Rc::clone(&self.seen);
            move |state: &S| seen.borrow_mut().push(project(state))
        }

        /// Number of recorded values
        #[must_use]
        pub fn len(&self) -> usize {
            self.seen.borrow().len()
        }

        /// Returns true if nothing was recorded
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.seen.borrow().is_empty()
        }

        /// Drain everything recorded so far
        #[must_use]
        pub fn take(&self) -> Vec<T> {
            std::mem::take(&mut *self.seen.borrow_mut())
        }
    }

    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs.
    pub fn init_test_tracing() {
        tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    }
}

/// Property-based testing utilities
///
/// Strategies for the text a user might type into the entry field.
pub mod properties {
    use proptest::prelude::*;

    /// Text whose trimmed form is non-empty, possibly padded with whitespace
    pub fn task_text() -> impl Strategy<Value = String> {
        ("[ \t]{0,3}", "[a-zA-Z0-9][a-zA-Z0-9 .,!?-]{0,30}", "[ \t]{0,3}")
            .prop_map(|(lead, body, trail)| format!("{lead}{body}{trail}"))
    }

    /// Empty or whitespace-only text
    pub fn blank_text() -> impl Strategy<Value = String> {
        "[ \t\n]{0,6}"
    }

    /// Either kind of input, weighted towards real text
    pub fn any_input() -> impl Strategy<Value = String> {
        prop_oneof![3 => task_text(), 1 => blank_text()]
    }
}

// Re-export commonly used items
pub use helpers::{init_test_tracing, StateRecorder};
pub use mocks::{test_clock, FixedClock, ScriptedIds};
