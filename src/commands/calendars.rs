use anyhow::Result;
use calsync_core::EventStore;

use crate::store::JsonStore;

pub fn run(store: &JsonStore) -> Result<()> {
    let collections = store.list_collections()?;

    if collections.is_empty() {
        println!("No collections yet. Create one with:\n  calsync new <name>");
        return Ok(());
    }

    for name in collections {
        println!("📅 {name}");
    }
    Ok(())
}
