//! Core error types for tasktimer-core.
//!
//! A thiserror hierarchy: each subsystem gets its own error enum, all of
//! which fold into [`CoreError`] at the library boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for tasktimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Settings errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Task-store-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The task file exists but does not hold valid task data. The file is
    /// left untouched so the user can recover it by hand.
    #[error("Task file at {path} is corrupt: {source}")]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the task file failed (disk full, permissions). The in-memory
    /// collection is unchanged.
    #[error("Failed to write task file at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a task or import file failed for reasons other than absence.
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No task with the given id.
    #[error("No task with id '{0}'")]
    TaskNotFound(String),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Input validation errors, rejected before anything reaches the store.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Duration must be greater than zero")]
    ZeroDuration,

    #[error("Task name must not be empty")]
    EmptyName,

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Notification delivery errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("Notification channel unavailable on this platform")]
    Unavailable,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
