use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// The front-end renders them; the notifier consumes `TaskDue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TaskAdded {
        id: String,
        name: String,
        at: DateTime<Utc>,
    },
    TaskStarted {
        id: String,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    TaskPaused {
        id: String,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    TaskReset {
        id: String,
        target_time: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// A running task's countdown reached zero. Emitted exactly once per
    /// cycle; the latch clears on the next reset.
    TaskDue {
        id: String,
        name: String,
        at: DateTime<Utc>,
    },
    TaskRemoved {
        id: String,
        at: DateTime<Utc>,
    },
}
