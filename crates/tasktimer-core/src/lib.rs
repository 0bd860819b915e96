//! # TaskTimer Core Library
//!
//! Core domain logic for TaskTimer, a desktop utility that tracks
//! independently-managed countdown tasks. Each task counts down a fixed
//! duration (not a calendar date) and is announced once when it elapses;
//! resetting it starts another cycle.
//!
//! The library is front-end agnostic: the CLI binary drives it directly,
//! and a GUI would be a thin layer over the same types.
//!
//! ## Key Components
//!
//! - [`Task`]: the countdown task model with start/pause/reset semantics
//! - [`TaskStore`]: JSON persistence with atomic writes and import/export
//! - [`ticker`]: caller-driven due-detection scan (no internal thread)
//! - [`Notifier`]: in-app plus best-effort desktop announcement
//! - [`Settings`]: TOML user preferences
//! - [`AutostartManager`]: capability-gated launch-on-boot registration

pub mod autostart;
pub mod error;
pub mod events;
pub mod notify;
pub mod settings;
pub mod store;
pub mod task;
pub mod ticker;

pub use autostart::{platform_autostart, AutostartManager, DesktopEntryAutostart, NoopAutostart};
pub use error::{CoreError, NotifyError, Result, SettingsError, StoreError, ValidationError};
pub use events::Event;
pub use notify::{DesktopChannel, DueNotice, NoopChannel, NotificationChannel, Notifier};
pub use settings::{Settings, Theme};
pub use store::{data_dir, ImportMode, TaskStore};
pub use task::{DurationUnit, Task, TaskDuration, TaskState};
