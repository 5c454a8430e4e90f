use anyhow::Result;

use crate::store::JsonStore;

pub fn run(store: &JsonStore, name: &str) -> Result<()> {
    store.create_collection(name)?;
    println!("Created collection '{name}'");
    Ok(())
}
