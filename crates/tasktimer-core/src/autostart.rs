//! Launch-on-boot registration.
//!
//! Platform-specific and optional, behind [`AutostartManager`]. Hosts on
//! platforms without a supported mechanism get [`NoopAutostart`] and
//! degrade gracefully. Both enable and disable are idempotent.

use std::path::PathBuf;

use crate::error::Result;

/// Capability seam for autostart registration.
pub trait AutostartManager {
    /// Register the application to launch on boot. Idempotent.
    fn enable(&self) -> Result<()>;
    /// Remove the registration. Idempotent.
    fn disable(&self) -> Result<()>;
    fn is_enabled(&self) -> bool;
}

/// Fallback: reports disabled, enable/disable succeed without doing
/// anything.
pub struct NoopAutostart;

impl AutostartManager for NoopAutostart {
    fn enable(&self) -> Result<()> {
        Ok(())
    }

    fn disable(&self) -> Result<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// XDG autostart entry at `~/.config/autostart/tasktimer.desktop`.
pub struct DesktopEntryAutostart {
    entry_path: PathBuf,
    exec: PathBuf,
}

impl DesktopEntryAutostart {
    /// Entry pointing at the current executable.
    pub fn current_exe() -> Result<Self> {
        let exec = std::env::current_exe()?;
        let entry_path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("autostart")
            .join("tasktimer.desktop");
        Ok(Self { entry_path, exec })
    }

    pub fn at(entry_path: PathBuf, exec: PathBuf) -> Self {
        Self { entry_path, exec }
    }

    fn entry_content(&self) -> String {
        format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=TaskTimer\n\
             Exec={} watch\n\
             X-GNOME-Autostart-enabled=true\n",
            self.exec.display()
        )
    }
}

impl AutostartManager for DesktopEntryAutostart {
    fn enable(&self) -> Result<()> {
        if let Some(parent) = self.entry_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.entry_path, self.entry_content())?;
        Ok(())
    }

    fn disable(&self) -> Result<()> {
        match std::fs::remove_file(&self.entry_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn is_enabled(&self) -> bool {
        self.entry_path.exists()
    }
}

/// The best manager available on this platform.
pub fn platform_autostart() -> Box<dyn AutostartManager> {
    #[cfg(unix)]
    {
        match DesktopEntryAutostart::current_exe() {
            Ok(manager) => Box::new(manager),
            Err(_) => Box::new(NoopAutostart),
        }
    }
    #[cfg(not(unix))]
    {
        Box::new(NoopAutostart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(dir: &tempfile::TempDir) -> DesktopEntryAutostart {
        DesktopEntryAutostart::at(
            dir.path().join("autostart").join("tasktimer.desktop"),
            PathBuf::from("/usr/bin/tasktimer"),
        )
    }

    #[test]
    fn enable_writes_entry_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(&dir);

        assert!(!m.is_enabled());
        m.enable().unwrap();
        m.enable().unwrap();
        assert!(m.is_enabled());

        let content =
            std::fs::read_to_string(dir.path().join("autostart").join("tasktimer.desktop"))
                .unwrap();
        assert!(content.contains("[Desktop Entry]"));
        assert!(content.contains("/usr/bin/tasktimer watch"));
    }

    #[test]
    fn disable_removes_entry_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(&dir);

        m.enable().unwrap();
        m.disable().unwrap();
        assert!(!m.is_enabled());
        // Disabling again is not an error.
        m.disable().unwrap();
    }

    #[test]
    fn noop_fallback_reports_disabled() {
        let m = NoopAutostart;
        m.enable().unwrap();
        assert!(!m.is_enabled());
        m.disable().unwrap();
    }
}
