//! # Task List Runtime
//!
//! The Store runtime that coordinates reducer execution, effect handling and
//! change notification.
//!
//! ## Core Components
//!
//! - **Store**: owns the state and is the only way to change it
//! - **Effect execution**: `Effect::Send` actions are fed back into the
//!   reducer within the same `send` call
//! - **Subscriptions**: callbacks that re-read state after every `send`
//!
//! The store is single-threaded. It is owned by the interaction
//! loop that feeds it user events, each `send` runs to completion before the
//! next one starts, and no locks or async runtime are involved.
//!
//! ## Example
//!
//! ```
//! use tasklist_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//! use tasklist_runtime::Store;
//!
//! struct Doubler;
//!
//! impl Reducer for Doubler {
//!     type State = Vec<u32>;
//!     type Action = u32;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Vec<u32>, n: u32, _env: &()) -> SmallVec<[Effect<u32>; 4]> {
//!         state.push(n);
//!         if n < 8 {
//!             smallvec![Effect::Send(n * 2)]
//!         } else {
//!             SmallVec::new()
//!         }
//!     }
//! }
//!
//! let mut store = Store::new(Vec::new(), Doubler, ());
//! store.send(1)?;
//! assert_eq!(store.state(Clone::clone), vec![1, 2, 4, 8]);
//! # Ok::<(), tasklist_runtime::error::StoreError>(())
//! ```

use tasklist_core::{effect::Effect, reducer::Reducer};

/// Metric names recorded by the store
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// A single `send` produced more feedback actions than allowed
        ///
        /// State changes made before the limit was hit are kept and
        /// subscribers are still notified; the remaining feedback actions
        /// are dropped.
        #[error("effect feedback exceeded {limit} actions in a single send")]
        FeedbackLimitExceeded {
            /// The configured bound
            limit: usize,
        },
    }
}

pub use error::StoreError;
pub use store::{Store, SubscriptionId};

/// Default bound on feedback actions per `send`
pub const DEFAULT_MAX_FEEDBACK_ACTIONS: usize = 64;

/// Configuration for the Store runtime
///
/// # Example
///
/// ```
/// use tasklist_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_actions(8);
/// assert_eq!(config.max_feedback_actions, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of actions produced by effects that a single `send`
    /// will reduce
    pub max_feedback_actions: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_actions: usize) -> Self {
        Self {
            max_feedback_actions,
        }
    }

    /// Set the feedback action bound
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, max: usize) -> Self {
        self.max_feedback_actions = max;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEEDBACK_ACTIONS)
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::metrics::{
        ACTIONS_TOTAL, FEEDBACK_LIMIT_TOTAL, FEEDBACK_TOTAL, NOTIFICATIONS_TOTAL,
        REDUCER_DURATION,
    };
    use super::{Effect, Reducer, StoreConfig, StoreError};
    use std::collections::VecDeque;

    /// Handle returned by [`Store::subscribe`], used to unsubscribe
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct SubscriptionId(u64);

    impl std::fmt::Display for SubscriptionId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "sub-{}", self.0)
        }
    }

    type Subscriber<S> = Box<dyn FnMut(&S)>;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned directly, mutated only through `send`)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (synchronous feedback loop)
    /// 5. Subscribers (notified once after every `send`)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
        subscribers: Vec<(SubscriptionId, Subscriber<S>)>,
        next_subscription: u64,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
                subscribers: Vec::new(),
                next_subscription: 0,
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, then reduces every action fed back by the
        /// returned effects in FIFO order, then notifies each subscriber
        /// once with the resulting state. Returns only after all of that has
        /// happened.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] when effects keep
        /// producing actions past [`StoreConfig::max_feedback_actions`].
        /// Subscribers are notified before the error is returned.
        #[tracing::instrument(skip_all, name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<(), StoreError> {
            metrics::counter!(ACTIONS_TOTAL).increment(1);
            tracing::debug!("Processing action");

            let mut pending: VecDeque<A> = VecDeque::new();
            self.reduce_one(action, &mut pending);

            let limit = self.config.max_feedback_actions;
            let mut processed = 0_usize;
            let mut result = Ok(());

            while let Some(next) = pending.pop_front() {
                if processed == limit {
                    tracing::warn!(
                        limit,
                        dropped = pending.len() + 1,
                        "Feedback limit reached, dropping remaining actions"
                    );
                    metrics::counter!(FEEDBACK_LIMIT_TOTAL).increment(1);
                    result = Err(StoreError::FeedbackLimitExceeded { limit });
                    break;
                }
                processed += 1;
                metrics::counter!(FEEDBACK_TOTAL).increment(1);
                tracing::trace!(processed, "Reducing feedback action");
                self.reduce_one(next, &mut pending);
            }

            self.notify();
            tracing::debug!(feedback = processed, "Action processing completed");
            result
        }

        fn reduce_one(&mut self, action: A, pending: &mut VecDeque<A>) {
            let span = tracing::debug_span!("reducer_execution");
            let _enter = span.enter();

            let start = std::time::Instant::now();
            let effects = self
                .reducer
                .reduce(&mut self.state, action, &self.environment);
            metrics::histogram!(REDUCER_DURATION).record(start.elapsed().as_secs_f64());

            tracing::trace!("Reducer completed, returned {} effects", effects.len());
            for effect in effects {
                if !effect.is_none() {
                    pending.extend(Effect::into_actions(effect));
                }
            }
        }

        fn notify(&mut self) {
            if self.subscribers.is_empty() {
                return;
            }
            tracing::trace!(count = self.subscribers.len(), "Notifying subscribers");
            for (_, subscriber) in &mut self.subscribers {
                subscriber(&self.state);
            }
            #[allow(clippy::cast_possible_truncation)]
            metrics::counter!(NOTIFICATIONS_TOTAL).increment(self.subscribers.len() as u64);
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let total = store.state(|s| s.tasks.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Register a callback that receives the state after every `send`
        ///
        /// The callback is not invoked on registration; call it yourself
        /// with [`Store::state`] if an initial render is needed.
        pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
        where
            F: FnMut(&S) + 'static,
        {
            let id = SubscriptionId(self.next_subscription);
            self.next_subscription += 1;
            self.subscribers.push((id, Box::new(subscriber)));
            tracing::debug!(subscription = %id, "Subscriber registered");
            id
        }

        /// Remove a subscriber
        ///
        /// Returns `false` if the id was not (or no longer) registered.
        pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
            let before = self.subscribers.len();
            self.subscribers.retain(|(sub, _)| *sub != id);
            let removed = self.subscribers.len() != before;
            if removed {
                tracing::debug!(subscription = %id, "Subscriber removed");
            }
            removed
        }

        /// Number of registered subscribers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.subscribers.len()
        }

        /// Consume the store and return its state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }
    }
}
