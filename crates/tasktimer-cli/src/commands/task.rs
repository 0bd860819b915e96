use chrono::{Local, Utc};
use clap::Subcommand;
use tasktimer_core::{DurationUnit, TaskDuration, TaskStore};

use crate::common::{format_remaining, parse_unit, state_label};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task and arm its first cycle
    Add {
        /// Display name
        name: String,
        /// Duration magnitude (must be positive)
        #[arg(long)]
        value: u32,
        /// Duration unit: seconds, minutes, hours or days
        #[arg(long, value_parser = parse_unit)]
        unit: DurationUnit,
        /// Free-form description (may contain links)
        #[arg(long, default_value = "")]
        description: String,
        /// Create the task with its countdown frozen
        #[arg(long)]
        paused: bool,
    },
    /// List all tasks
    List {
        /// Print the raw task records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one task in full
    Show { id: String },
    /// Edit name, description or duration (re-arms the cycle)
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        value: Option<u32>,
        #[arg(long, value_parser = parse_unit)]
        unit: Option<DurationUnit>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Resume a paused task
    Start { id: String },
    /// Freeze a running task's countdown
    Pause { id: String },
    /// Restart the cycle: new target = now + duration
    Reset { id: String },
    /// Remove a task permanently
    Delete { id: String },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = TaskStore::open_default()?;
    let now = Utc::now();

    match action {
        TaskAction::Add {
            name,
            value,
            unit,
            description,
            paused,
        } => {
            let duration = TaskDuration::new(value, unit)?;
            let id = store.add(name, description, duration, now)?;
            if paused {
                store.pause(&id, now)?;
            }
            let task = store.get(&id).expect("freshly added task");
            println!("Task created: {id}");
            println!(
                "  due {} ({})",
                task.target_time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
                format_remaining(task.remaining_secs(now))
            );
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.tasks())?);
                return Ok(());
            }
            if store.is_empty() {
                println!("no tasks");
                return Ok(());
            }
            println!(
                "{:<36}  {:<16}  {:<8}  {:<19}  {}",
                "ID", "NAME", "STATE", "TARGET", "REMAINING"
            );
            for task in store.tasks() {
                println!(
                    "{:<36}  {:<16}  {:<8}  {:<19}  {}",
                    task.id,
                    task.name,
                    state_label(task, now),
                    task.target_time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
                    format_remaining(task.remaining_secs(now)),
                );
            }
        }
        TaskAction::Show { id } => {
            let task = store
                .get(&id)
                .ok_or_else(|| format!("no task with id '{id}'"))?;
            println!("{}", serde_json::to_string_pretty(task)?);
        }
        TaskAction::Edit {
            id,
            name,
            value,
            unit,
            description,
        } => {
            let duration = if value.is_some() || unit.is_some() {
                let current = store
                    .get(&id)
                    .ok_or_else(|| format!("no task with id '{id}'"))?
                    .duration;
                Some(TaskDuration::new(
                    value.unwrap_or(current.value),
                    unit.unwrap_or(current.unit),
                )?)
            } else {
                None
            };
            store.update_meta(&id, name, description, duration, now)?;
            println!("Task updated: {id}");
        }
        TaskAction::Start { id } => match store.start(&id, now)? {
            Some(_) => println!("started"),
            None => println!("no change (already running, or expired -- reset it)"),
        },
        TaskAction::Pause { id } => match store.pause(&id, now)? {
            Some(_) => println!("paused"),
            None => println!("no change (already paused)"),
        },
        TaskAction::Reset { id } => {
            store.reset(&id, now)?;
            let task = store.get(&id).expect("task just reset");
            println!(
                "reset; next due {}",
                task.target_time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            );
        }
        TaskAction::Delete { id } => {
            store.remove(&id, now)?;
            println!("deleted");
        }
    }

    Ok(())
}
