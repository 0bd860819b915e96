use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "tasktimer", version, about = "TaskTimer CLI -- duration-based reminders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Run the foreground timer loop, announcing tasks as they go due
    Watch {
        /// Seconds between due-detection scans
        #[arg(long, default_value = "1")]
        interval_secs: u64,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Write the task collection to a file
    Export {
        path: PathBuf,
    },
    /// Bring tasks in from an export file
    Import {
        path: PathBuf,
        /// Upsert by id instead of replacing the collection
        #[arg(long)]
        merge: bool,
    },
    /// Launch-on-boot registration
    Autostart {
        #[command(subcommand)]
        action: commands::autostart::AutostartAction,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Watch { interval_secs } => commands::watch::run(interval_secs),
        Commands::Config { action } => commands::config::run(action),
        Commands::Export { path } => commands::transfer::export(&path),
        Commands::Import { path, merge } => commands::transfer::import(&path, merge),
        Commands::Autostart { action } => commands::autostart::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "tasktimer",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
