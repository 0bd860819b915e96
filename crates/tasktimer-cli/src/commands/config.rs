use clap::Subcommand;
use tasktimer_core::Settings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "theme", "notifications.system_enabled")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value ("none" clears an optional field)
        value: String,
    },
    /// Show all settings
    Show,
    /// Print the settings file path
    Path,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let settings = Settings::load_or_default();
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load_or_default();
            settings.set(&key, &value)?;
            settings.save()?;
            println!("ok");
        }
        ConfigAction::Show => {
            let settings = Settings::load_or_default();
            print!("{}", toml::to_string_pretty(&settings)?);
        }
        ConfigAction::Path => {
            println!("{}", Settings::path()?.display());
        }
        ConfigAction::Reset => {
            let settings = Settings::default();
            settings.save()?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
