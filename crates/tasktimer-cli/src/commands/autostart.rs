use clap::Subcommand;
use tasktimer_core::{platform_autostart, Settings};

#[derive(Subcommand)]
pub enum AutostartAction {
    /// Register TaskTimer to launch on boot
    Enable,
    /// Remove the launch-on-boot registration
    Disable,
    /// Report whether launch-on-boot is registered
    Status,
}

pub fn run(action: AutostartAction) -> Result<(), Box<dyn std::error::Error>> {
    let manager = platform_autostart();
    match action {
        AutostartAction::Enable => {
            manager.enable()?;
            sync_setting(true);
            println!("autostart enabled");
        }
        AutostartAction::Disable => {
            manager.disable()?;
            sync_setting(false);
            println!("autostart disabled");
        }
        AutostartAction::Status => {
            println!(
                "{}",
                if manager.is_enabled() {
                    "enabled"
                } else {
                    "disabled"
                }
            );
        }
    }
    Ok(())
}

/// Keep the stored preference in step with the actual registration.
fn sync_setting(enabled: bool) {
    let mut settings = Settings::load_or_default();
    settings.startup.launch_on_boot = enabled;
    if let Err(err) = settings.save() {
        eprintln!("warning: could not persist startup preference: {err}");
    }
}
