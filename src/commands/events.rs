use anyhow::Result;
use calsync_core::{DateRange, EventStore};

use crate::render::Render;
use crate::store::JsonStore;

pub fn run(store: &JsonStore, collection: &str, range: &DateRange) -> Result<()> {
    let collections = store.list_collections()?;
    if !collections.iter().any(|c| c == collection) {
        println!("Collection '{collection}' not found.");
        return Ok(());
    }

    let events = store.list_events(collection, range)?;
    if events.is_empty() {
        println!("No events in '{collection}' for this range.");
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render());
    }
    println!("\n{} events", events.len());
    Ok(())
}
