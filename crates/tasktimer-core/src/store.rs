//! JSON-backed task store.
//!
//! The store owns the authoritative in-memory collection; every mutation
//! routes through it and is persisted immediately, so the file on disk
//! never lags behind what the user saw. Writes are atomic (write to a
//! sibling temp file, then rename over the target) to survive a crash or
//! power loss mid-save.
//!
//! Task data lives at `~/.config/tasktimer/tasks.json` (see [`data_dir`]).

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::events::Event;
use crate::task::{Task, TaskDuration};

/// Returns `~/.config/tasktimer[-dev]/` based on TASKTIMER_ENV.
///
/// Set TASKTIMER_ENV=dev to use a development data directory, or
/// TASKTIMER_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TASKTIMER_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TASKTIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tasktimer-dev")
    } else {
        base_dir.join("tasktimer")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// How [`TaskStore::import`] combines the file with the current collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Upsert by id: imported records win, unknown ids append in file order.
    Merge,
    /// Swap the collection wholesale.
    Replace,
}

/// Owner of the task collection and its backing file.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Open the store at the default per-user path.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(data_dir()?.join("tasks.json"))?)
    }

    /// Open the store at `path`. A missing file is an empty collection;
    /// a present but unparseable file is [`StoreError::CorruptData`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tasks = read_tasks(&path)?;
        Ok(Self { path, tasks })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Create and persist a new task. Returns its id.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        duration: TaskDuration,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let task = Task::new(name, description, duration, now)?;
        let id = task.id.clone();
        self.tasks.push(task);
        self.save()?;
        Ok(id)
    }

    /// Edit name/description/duration. Any change re-arms the cycle:
    /// `target_time = now + duration`, due latch cleared.
    pub fn update_meta(
        &mut self,
        id: &str,
        name: Option<String>,
        description: Option<String>,
        duration: Option<TaskDuration>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let task = self.get_mut(id)?;
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(crate::error::ValidationError::EmptyName.into());
            }
            task.name = name;
        }
        if let Some(description) = description {
            task.description = description;
        }
        if let Some(duration) = duration {
            task.duration = duration;
        }
        task.reset(now);
        self.save()?;
        Ok(())
    }

    /// Delete a task. The only way a task ever leaves the collection.
    pub fn remove(&mut self, id: &str, now: DateTime<Utc>) -> Result<Event> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        self.tasks.remove(idx);
        self.save()?;
        Ok(Event::TaskRemoved {
            id: id.to_string(),
            at: now,
        })
    }

    /// Resume a paused task. `Ok(None)` when nothing changed (already
    /// running, or expired and awaiting reset).
    pub fn start(&mut self, id: &str, now: DateTime<Utc>) -> Result<Option<Event>> {
        let task = self.get_mut(id)?;
        if !task.start(now) {
            return Ok(None);
        }
        let event = Event::TaskStarted {
            id: task.id.clone(),
            remaining_secs: task.remaining_secs(now),
            at: now,
        };
        self.save()?;
        Ok(Some(event))
    }

    /// Freeze a running task's countdown.
    pub fn pause(&mut self, id: &str, now: DateTime<Utc>) -> Result<Option<Event>> {
        let task = self.get_mut(id)?;
        if !task.pause(now) {
            return Ok(None);
        }
        let event = Event::TaskPaused {
            id: task.id.clone(),
            remaining_secs: task.remaining_secs(now),
            at: now,
        };
        self.save()?;
        Ok(Some(event))
    }

    /// Restart a task's cycle for another round.
    pub fn reset(&mut self, id: &str, now: DateTime<Utc>) -> Result<Event> {
        let task = self.get_mut(id)?;
        task.reset(now);
        let event = Event::TaskReset {
            id: task.id.clone(),
            target_time: task.target_time,
            at: now,
        };
        self.save()?;
        Ok(event)
    }

    /// Persist the full collection atomically.
    pub fn save(&self) -> Result<(), StoreError> {
        write_tasks(&self.path, &self.tasks)
    }

    // ── Import / export ──────────────────────────────────────────────

    /// Write the collection to a user-chosen path, same schema as the
    /// task file.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        write_tasks(path.as_ref(), &self.tasks)
    }

    /// Bring tasks in from an export file. Returns how many records the
    /// file held.
    pub fn import(&mut self, path: impl AsRef<Path>, mode: ImportMode) -> Result<usize> {
        let path = path.as_ref();
        // A missing task file means "start empty", but a missing import file
        // is a user mistake and must be reported.
        if !path.exists() {
            return Err(StoreError::ReadFailed {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            }
            .into());
        }
        let incoming = read_tasks(path)?;
        let count = incoming.len();
        match mode {
            ImportMode::Replace => self.tasks = incoming,
            ImportMode::Merge => {
                for task in incoming {
                    match self.tasks.iter_mut().find(|t| t.id == task.id) {
                        Some(existing) => *existing = task,
                        None => self.tasks.push(task),
                    }
                }
            }
        }
        self.save()?;
        Ok(count)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn get_mut(&mut self, id: &str) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))
    }

    /// Mutable scan access for the ticker; callers must `save()` after
    /// changing anything.
    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }
}

fn read_tasks(path: &Path) -> Result<Vec<Task>, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(StoreError::ReadFailed {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };
    serde_json::from_str(&content).map_err(|source| StoreError::CorruptData {
        path: path.to_path_buf(),
        source,
    })
}

fn write_tasks(path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    let write_failed = |source: std::io::Error| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
        }
    }

    let json = serde_json::to_string_pretty(tasks).map_err(|err| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source: std::io::Error::other(err),
    })?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, json).map_err(write_failed)?;
    std::fs::rename(&tmp, path).map_err(write_failed)?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "task file saved");
    Ok(())
}
