use std::path::Path;
use tasktimer_core::{ImportMode, TaskStore};

pub fn export(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::open_default()?;
    store.export(path)?;
    println!("exported {} task(s) to {}", store.len(), path.display());
    Ok(())
}

pub fn import(path: &Path, merge: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = TaskStore::open_default()?;
    let mode = if merge {
        ImportMode::Merge
    } else {
        ImportMode::Replace
    };
    let count = store.import(path, mode)?;
    println!(
        "imported {count} task(s) from {} ({} now in store)",
        path.display(),
        store.len()
    );
    Ok(())
}
