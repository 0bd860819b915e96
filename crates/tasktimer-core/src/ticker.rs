//! Due-detection scan.
//!
//! Wall-clock based with no internal thread: the host calls [`tick`] on an
//! interval of about one second. Each scan is independent per task and runs
//! on the caller's thread, so a tick never observes a half-applied mutation.
//!
//! When a running task's countdown reaches zero the scan latches
//! `notified`, freezes the task (expired tasks wait for an explicit reset),
//! and emits [`Event::TaskDue`] -- exactly once per cycle.

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::events::Event;
use crate::store::TaskStore;
use crate::task::TaskState;

/// Scan running tasks for due transitions. Persists and returns the emitted
/// events; an event-free tick does not touch the disk.
pub fn tick(store: &mut TaskStore, now: DateTime<Utc>) -> Result<Vec<Event>, StoreError> {
    let mut events = Vec::new();
    for task in store.tasks_mut() {
        if task.state != TaskState::Running || task.notified {
            continue;
        }
        if task.remaining_secs(now) <= 0 {
            task.notified = true;
            task.pause(now);
            events.push(Event::TaskDue {
                id: task.id.clone(),
                name: task.name.clone(),
                at: now,
            });
        }
    }
    if !events.is_empty() {
        store.save()?;
    }
    Ok(events)
}

/// Startup replay: fire the due event for tasks whose countdown elapsed
/// while the process was not running and were never announced.
pub fn catch_up(store: &mut TaskStore, now: DateTime<Utc>) -> Result<Vec<Event>, StoreError> {
    let mut events = Vec::new();
    for task in store.tasks_mut() {
        if task.notified || task.remaining_secs(now) > 0 {
            continue;
        }
        task.notified = true;
        task.pause(now);
        events.push(Event::TaskDue {
            id: task.id.clone(),
            name: task.name.clone(),
            at: now,
        });
    }
    if !events.is_empty() {
        store.save()?;
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;
    use crate::task::{DurationUnit, TaskDuration};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn store_with(names: &[(&str, u32)]) -> (tempfile::TempDir, TaskStore, Vec<String>) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::open(dir.path().join("tasks.json")).unwrap();
        let ids = names
            .iter()
            .map(|(name, secs)| {
                let duration = TaskDuration::new(*secs, DurationUnit::Seconds).unwrap();
                store.add(*name, "", duration, t0()).unwrap()
            })
            .collect();
        (dir, store, ids)
    }

    #[test]
    fn due_event_fires_exactly_once_per_cycle() {
        let (_dir, mut store, ids) = store_with(&[("a", 30)]);

        assert!(tick(&mut store, t0() + Duration::seconds(29)).unwrap().is_empty());

        let events = tick(&mut store, t0() + Duration::seconds(30)).unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], Event::TaskDue { name, .. } if name == "a"));

        // No repeat firing while the user has not reset.
        for offset in 31..40 {
            assert!(tick(&mut store, t0() + Duration::seconds(offset)).unwrap().is_empty());
        }

        // Reset starts the next cycle; it fires again when that elapses.
        store.reset(&ids[0], t0() + Duration::seconds(60)).unwrap();
        let events = tick(&mut store, t0() + Duration::seconds(90)).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn expired_task_freezes_until_reset() {
        let (_dir, mut store, ids) = store_with(&[("a", 10)]);
        tick(&mut store, t0() + Duration::seconds(10)).unwrap();

        let task = store.get(&ids[0]).unwrap();
        assert_eq!(task.state, TaskState::Paused);
        assert!(task.notified);
        // Expired tasks stay in the collection; only deletion removes them.
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn paused_tasks_are_excluded() {
        let (_dir, mut store, ids) = store_with(&[("a", 10)]);
        store.pause(&ids[0], t0() + Duration::seconds(5)).unwrap();

        // Well past the stale absolute target, still nothing fires.
        assert!(tick(&mut store, t0() + Duration::hours(1)).unwrap().is_empty());
        assert!(!store.get(&ids[0]).unwrap().notified);
    }

    #[test]
    fn due_transition_is_independent_per_task() {
        let (_dir, mut store, ids) = store_with(&[("short", 10), ("long", 300)]);

        let events = tick(&mut store, t0() + Duration::seconds(10)).unwrap();
        assert_eq!(events.len(), 1);

        let long = store.get(&ids[1]).unwrap();
        assert_eq!(long.state, TaskState::Running);
        assert!(!long.notified);
        assert_eq!(long.remaining_secs(t0() + Duration::seconds(10)), 290);
    }

    #[test]
    fn catch_up_replays_missed_expiries() {
        let (_dir, mut store, _ids) = store_with(&[("missed", 10), ("pending", 300)]);

        // Simulate a restart long after the first task went due.
        let reopened = t0() + Duration::minutes(2);
        let events = catch_up(&mut store, reopened).unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], Event::TaskDue { name, .. } if name == "missed"));

        // Second catch-up announces nothing new.
        assert!(catch_up(&mut store, reopened).unwrap().is_empty());
    }
}
