//! Foreground timer loop.
//!
//! Drives the due-detection scan on a fixed interval. The in-app channel
//! renders to the terminal; the desktop channel is consulted only when
//! the settings enable it. Every event-bearing tick persists before the
//! loop sleeps again, so killing the process never loses a transition.

use chrono::{Local, Utc};
use tasktimer_core::{
    ticker, DesktopChannel, DueNotice, Event, NotificationChannel, Notifier, NotifyError,
    Settings, TaskStore,
};

/// In-app alert surface: the terminal itself.
struct TerminalChannel;

impl NotificationChannel for TerminalChannel {
    fn deliver(&self, notice: &DueNotice) -> Result<(), NotifyError> {
        println!(
            "[{}] {} -- {}",
            Local::now().format("%H:%M:%S"),
            notice.title,
            notice.body
        );
        Ok(())
    }
}

pub fn run(interval_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default();
    let notifier = Notifier::new(
        Box::new(TerminalChannel),
        Box::new(DesktopChannel),
        settings.notifications.system_enabled,
    );
    let mut store = TaskStore::open_default()?;

    // Announce anything that went due while we were not running.
    announce_all(&notifier, &ticker::catch_up(&mut store, Utc::now())?);

    let interval = std::time::Duration::from_secs(interval_secs.max(1));
    println!(
        "watching {} task(s), scanning every {}s (Ctrl-C to stop)",
        store.len(),
        interval.as_secs()
    );

    loop {
        std::thread::sleep(interval);
        let events = ticker::tick(&mut store, Utc::now())?;
        announce_all(&notifier, &events);
    }
}

fn announce_all(notifier: &Notifier, events: &[Event]) {
    for event in events {
        if let Event::TaskDue { id, name, .. } = event {
            if let Err(err) = notifier.announce(&DueNotice::for_task(id.clone(), name)) {
                eprintln!("notification failed: {err}");
            }
        }
    }
}
