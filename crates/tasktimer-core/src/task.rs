//! The countdown task model.
//!
//! A task counts down a fixed duration (value + unit, never a calendar
//! rule). `target_time` is the absolute instant the current cycle is due,
//! recomputed as `now + duration` at creation and on every reset.
//!
//! ## State transitions
//!
//! ```text
//! Running ──pause──> Paused ──start──> Running
//! Running ──(due)──> Paused + notified ──reset──> Running
//! ```
//!
//! Pausing freezes the countdown: the remaining seconds are snapshotted at
//! pause time and the absolute target is rebased on resume, so a task never
//! resumes against a stale target.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Time unit for a task duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    pub const ALL: [DurationUnit; 4] = [
        DurationUnit::Seconds,
        DurationUnit::Minutes,
        DurationUnit::Hours,
        DurationUnit::Days,
    ];

    /// Seconds per one unit.
    pub fn secs_per_unit(&self) -> u64 {
        match self {
            DurationUnit::Seconds => 1,
            DurationUnit::Minutes => 60,
            DurationUnit::Hours => 3_600,
            DurationUnit::Days => 86_400,
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DurationUnit::Seconds => "seconds",
            DurationUnit::Minutes => "minutes",
            DurationUnit::Hours => "hours",
            DurationUnit::Days => "days",
        };
        write!(f, "{s}")
    }
}

/// A positive duration magnitude plus its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDuration {
    pub value: u32,
    pub unit: DurationUnit,
}

impl TaskDuration {
    /// Build a duration, rejecting a zero magnitude.
    pub fn new(value: u32, unit: DurationUnit) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::ZeroDuration);
        }
        Ok(Self { value, unit })
    }

    /// Normalized length in seconds.
    pub fn as_secs(&self) -> i64 {
        (self.value as u64).saturating_mul(self.unit.secs_per_unit()) as i64
    }

    pub fn to_chrono(&self) -> Duration {
        Duration::seconds(self.as_secs())
    }
}

impl fmt::Display for TaskDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Task state enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Countdown is active.
    Running,
    /// Countdown is frozen (user pause, or expired awaiting reset).
    Paused,
}

impl Default for TaskState {
    fn default() -> Self {
        TaskState::Running
    }
}

/// One countdown task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (UUID v4), assigned at creation, never reused.
    pub id: String,
    /// Short display name.
    pub name: String,
    /// Free-form text; may contain URLs (rendering is the front-end's job).
    #[serde(default)]
    pub description: String,
    /// Configured cycle length.
    pub duration: TaskDuration,
    /// Absolute instant the current cycle is due.
    pub target_time: DateTime<Utc>,
    #[serde(default)]
    pub state: TaskState,
    /// Latch: true once the due event for the current cycle has fired.
    /// Persisted so a restart does not re-announce an already-seen expiry.
    #[serde(default)]
    pub notified: bool,
    /// Remaining seconds frozen at pause time; cleared on resume/reset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused_remaining_secs: Option<i64>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Fields written by newer versions: ignored here, preserved on re-save.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    /// Create a new running task with `target_time = now + duration`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        duration: TaskDuration,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: description.into(),
            duration,
            target_time: now + duration.to_chrono(),
            state: TaskState::Running,
            notified: false,
            paused_remaining_secs: None,
            created_at: now,
            extra: serde_json::Map::new(),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Seconds until due. Negative once overdue. Constant while paused.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        match self.paused_remaining_secs {
            Some(frozen) => frozen,
            None => (self.target_time - now).num_seconds(),
        }
    }

    /// True when the countdown has reached zero.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.remaining_secs(now) <= 0
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Resume a paused task. Rebases the target from the frozen remainder.
    ///
    /// Returns false (no change) when already running, or when the current
    /// cycle has expired -- an expired task must be reset, not started.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.state == TaskState::Running || self.notified {
            return false;
        }
        if let Some(frozen) = self.paused_remaining_secs.take() {
            self.target_time = now + Duration::seconds(frozen);
        }
        self.state = TaskState::Running;
        true
    }

    /// Freeze the countdown. Returns false when already paused.
    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        if self.state == TaskState::Paused {
            return false;
        }
        self.paused_remaining_secs = Some((self.target_time - now).num_seconds());
        self.state = TaskState::Paused;
        true
    }

    /// Restart the cycle: `target_time = now + duration`, running, due latch
    /// cleared. Affects only this task.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.target_time = now + self.duration.to_chrono();
        self.state = TaskState::Running;
        self.notified = false;
        self.paused_remaining_secs = None;
    }
}
