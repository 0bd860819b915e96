//! TOML-based user preferences.
//!
//! Stores:
//! - Theme choice (stored only; applying it is the front-end's job)
//! - Notification preferences (desktop toggle, in-app alert anchor)
//! - Startup behavior (launch on boot, start minimized)
//!
//! Settings live at `~/.config/tasktimer/config.toml`. Every field carries
//! a serde default so files written by older versions load cleanly.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, SettingsError};
use crate::store::data_dir;

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::System
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Mirror due alerts to the OS notification service.
    #[serde(default = "default_true")]
    pub system_enabled: bool,
    /// In-app alert anchor; None means centered on screen.
    #[serde(default)]
    pub toast_x: Option<i32>,
    #[serde(default)]
    pub toast_y: Option<i32>,
}

/// Startup behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupSettings {
    #[serde(default)]
    pub launch_on_boot: bool,
    #[serde(default)]
    pub start_minimized: bool,
}

/// User preferences.
///
/// Serialized to/from TOML at `~/.config/tasktimer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub startup: StartupSettings,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            system_enabled: true,
            toast_x: None,
            toast_y: None,
        }
    }
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            launch_on_boot: false,
            start_minimized: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            notifications: NotificationSettings::default(),
            startup: StartupSettings::default(),
        }
    }
}

impl Settings {
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk. A missing file writes and returns defaults; a
    /// present but unparseable file is an error so the caller can report
    /// it and fall back to defaults without crashing.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(path)
    }

    pub(crate) fn load_from(path: PathBuf) -> Result<Self> {
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let settings =
                    toml::from_str(&content).map_err(|err| SettingsError::LoadFailed {
                        path,
                        message: err.to_string(),
                    })?;
                Ok(settings)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.save_to(&path)?;
                Ok(settings)
            }
            Err(err) => Err(SettingsError::LoadFailed {
                path,
                message: err.to_string(),
            }
            .into()),
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        self.save_to(&path)
    }

    pub(crate) fn save_to(&self, path: &std::path::Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|err| SettingsError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        std::fs::write(path, content).map_err(|err| SettingsError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(())
    }

    /// Get a settings value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by dot-separated key. The new value must parse
    /// as the existing field's type; unknown keys are rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self).map_err(crate::error::CoreError::Json)?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|err| SettingsError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), SettingsError> {
    let unknown = || SettingsError::UnknownKey(key.to_string());
    let invalid = |message: String| SettingsError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let mut parts = key.split('.').peekable();
    if key.is_empty() || parts.peek().is_none() {
        return Err(unknown());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => value
                    .parse::<i64>()
                    .map(serde_json::Value::from)
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                // Optional fields (toast anchor) show up as null when unset:
                // accept a number, or "none" to clear.
                serde_json::Value::Null => {
                    if value.eq_ignore_ascii_case("none") || value.is_empty() {
                        serde_json::Value::Null
                    } else {
                        value
                            .parse::<i64>()
                            .map(serde_json::Value::from)
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                    }
                }
                serde_json::Value::String(_) => {
                    if value.eq_ignore_ascii_case("none") {
                        serde_json::Value::Null
                    } else {
                        serde_json::Value::String(value.to_string())
                    }
                }
                _ => return Err(invalid("cannot set a nested section directly".to_string())),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current.get_mut(part).ok_or_else(unknown)?;
    }

    Err(unknown())
}
