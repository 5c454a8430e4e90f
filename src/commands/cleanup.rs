use anyhow::Result;
use owo_colors::OwoColorize;

use calsync_core::{CalSyncError, CancelFlag, MatchPolicy, Synchronizer};

use crate::render::Render;
use crate::store::JsonStore;
use crate::utils::tui;

pub async fn run(
    store: JsonStore,
    collection: &str,
    policy: MatchPolicy,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    let engine = Synchronizer::new(store);

    let spinner = tui::spinner(format!("Scanning '{collection}' for duplicates..."));
    let result = engine.find_duplicates(collection, policy);
    spinner.finish_and_clear();

    let groups = match result {
        Ok(groups) => groups,
        Err(CalSyncError::CollectionNotFound(_)) => {
            println!("Collection '{collection}' not found, nothing to clean up.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if groups.is_empty() {
        println!("No duplicates found in '{collection}' ({policy} policy).");
        return Ok(());
    }

    let to_delete: usize = groups.iter().map(|g| g.deletion_candidates().len()).sum();
    println!(
        "{} duplicate groups, {} events marked for deletion:\n",
        groups.len(),
        to_delete
    );
    for group in &groups {
        println!("{}\n", group.render());
    }

    if dry_run {
        println!("Dry run, nothing deleted.");
        return Ok(());
    }

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete {to_delete} duplicate events from '{collection}'?"
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let cancel = CancelFlag::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let report = {
        let collection = collection.to_string();
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || {
            engine.delete_duplicates(&collection, &groups, Some(&cancel))
        })
        .await??
    };
    watcher.abort();

    if cancel.is_cancelled() {
        println!("{}", "Cleanup cancelled".yellow());
    }
    println!("{}", report.render());
    Ok(())
}
