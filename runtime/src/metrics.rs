//! Metric names and descriptions for the store runtime.
//!
//! The store records through the `metrics` facade. Nothing is exported
//! unless the host installs a recorder; without one every call is a no-op.

use metrics::{describe_counter, describe_histogram, Unit};

/// Actions passed to [`Store::send`](crate::store::Store::send)
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Actions fed back into the store by [`Effect::Send`](tasklist_core::effect::Effect::Send)
pub const FEEDBACK_TOTAL: &str = "store.effects.feedback_total";

/// Sends aborted because the feedback bound was reached
pub const FEEDBACK_LIMIT_TOTAL: &str = "store.effects.feedback_limit_total";

/// Wall time of a single reducer invocation
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Subscriber callbacks invoked
pub const NOTIFICATIONS_TOTAL: &str = "store.subscribers.notified_total";

/// Register descriptions for all store metrics.
///
/// Call once after installing a recorder so exporters can show help text.
pub fn register_metrics() {
    describe_counter!(ACTIONS_TOTAL, Unit::Count, "Actions sent to the store");
    describe_counter!(
        FEEDBACK_TOTAL,
        Unit::Count,
        "Actions produced by effects and reduced in the same send"
    );
    describe_counter!(
        FEEDBACK_LIMIT_TOTAL,
        Unit::Count,
        "Sends that stopped at the feedback action bound"
    );
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time spent inside the reducer per action"
    );
    describe_counter!(
        NOTIFICATIONS_TOTAL,
        Unit::Count,
        "Subscriber callbacks invoked after a send"
    );
}
