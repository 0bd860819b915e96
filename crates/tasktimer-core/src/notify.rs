//! Due-event announcement.
//!
//! Two channels with different guarantees:
//! - the in-app channel is always invoked and its failure surfaces;
//! - the OS desktop channel is opt-in (`notifications.system_enabled`) and
//!   best-effort: a failure is logged and swallowed, never blocking the
//!   in-app alert.
//!
//! Platform integrations sit behind [`NotificationChannel`] so a host
//! without the optional capability degrades to [`NoopChannel`].

use crate::error::NotifyError;

/// What gets shown when a task goes due.
#[derive(Debug, Clone)]
pub struct DueNotice {
    pub task_id: String,
    pub title: String,
    pub body: String,
}

impl DueNotice {
    /// The standard notice for an elapsed task.
    pub fn for_task(task_id: impl Into<String>, name: &str) -> Self {
        Self {
            task_id: task_id.into(),
            title: "Time's up".to_string(),
            body: format!("{name} has reached its target time"),
        }
    }
}

/// A delivery surface for due notices.
pub trait NotificationChannel {
    fn deliver(&self, notice: &DueNotice) -> Result<(), NotifyError>;
}

/// Fallback when the optional capability is unavailable.
pub struct NoopChannel;

impl NotificationChannel for NoopChannel {
    fn deliver(&self, _notice: &DueNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// OS desktop notification via the platform notification service.
pub struct DesktopChannel;

impl NotificationChannel for DesktopChannel {
    fn deliver(&self, notice: &DueNotice) -> Result<(), NotifyError> {
        notify_rust::Notification::new()
            .appname("TaskTimer")
            .summary(&notice.title)
            .body(&notice.body)
            .show()
            .map(|_| ())
            .map_err(|err| NotifyError::DeliveryFailed(err.to_string()))
    }
}

/// Fan-out over the guaranteed in-app channel and the optional desktop one.
pub struct Notifier {
    in_app: Box<dyn NotificationChannel>,
    desktop: Box<dyn NotificationChannel>,
    desktop_enabled: bool,
}

impl Notifier {
    pub fn new(
        in_app: Box<dyn NotificationChannel>,
        desktop: Box<dyn NotificationChannel>,
        desktop_enabled: bool,
    ) -> Self {
        Self {
            in_app,
            desktop,
            desktop_enabled,
        }
    }

    /// Announce a due notice on every applicable channel.
    ///
    /// # Errors
    /// Only an in-app delivery failure is returned; the desktop channel is
    /// best-effort and its failures are logged.
    pub fn announce(&self, notice: &DueNotice) -> Result<(), NotifyError> {
        let in_app_result = self.in_app.deliver(notice);
        if self.desktop_enabled {
            if let Err(err) = self.desktop.deliver(notice) {
                tracing::warn!(task_id = %notice.task_id, %err, "desktop notification failed");
            }
        }
        in_app_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recording {
        delivered: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    fn recording(fail: bool) -> (Box<Recording>, Rc<RefCell<Vec<String>>>) {
        let delivered = Rc::new(RefCell::new(Vec::new()));
        (
            Box::new(Recording {
                delivered: Rc::clone(&delivered),
                fail,
            }),
            delivered,
        )
    }

    impl NotificationChannel for Recording {
        fn deliver(&self, notice: &DueNotice) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::DeliveryFailed("boom".into()));
            }
            self.delivered.borrow_mut().push(notice.task_id.clone());
            Ok(())
        }
    }

    fn notice() -> DueNotice {
        DueNotice::for_task("id-1", "renew domain")
    }

    #[test]
    fn announces_on_both_channels_when_enabled() {
        let (in_app, in_app_log) = recording(false);
        let (desktop, desktop_log) = recording(false);
        let notifier = Notifier::new(in_app, desktop, true);

        assert!(notifier.announce(&notice()).is_ok());
        assert_eq!(in_app_log.borrow().as_slice(), ["id-1"]);
        assert_eq!(desktop_log.borrow().as_slice(), ["id-1"]);
    }

    #[test]
    fn desktop_failure_does_not_block_in_app() {
        let (in_app, in_app_log) = recording(false);
        let (desktop, _) = recording(true);
        let notifier = Notifier::new(in_app, desktop, true);

        assert!(notifier.announce(&notice()).is_ok());
        assert_eq!(in_app_log.borrow().len(), 1);
    }

    #[test]
    fn desktop_channel_skipped_when_disabled() {
        let (in_app, _) = recording(false);
        let (desktop, desktop_log) = recording(false);
        let notifier = Notifier::new(in_app, desktop, false);

        assert!(notifier.announce(&notice()).is_ok());
        assert!(desktop_log.borrow().is_empty());
    }

    #[test]
    fn in_app_failure_surfaces() {
        let (in_app, _) = recording(true);
        let notifier = Notifier::new(in_app, Box::new(NoopChannel), false);
        assert!(notifier.announce(&notice()).is_err());
    }

    #[test]
    fn notice_text_names_the_task() {
        let n = notice();
        assert_eq!(n.title, "Time's up");
        assert!(n.body.contains("renew domain"));
    }
}
