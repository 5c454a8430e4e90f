use anyhow::Result;
use owo_colors::OwoColorize;

use calsync_core::{CancelFlag, DateRange, MatchPolicy, Synchronizer};

use crate::render::Render;
use crate::store::JsonStore;
use crate::utils::tui;

pub async fn run(
    store: JsonStore,
    source: &str,
    target: &str,
    range: DateRange,
    policy: MatchPolicy,
) -> Result<()> {
    println!(
        "Syncing {} -> {} ({} policy)",
        source.bold(),
        target.bold(),
        policy
    );

    let cancel = CancelFlag::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let spinner = tui::spinner("Synchronizing...");
    let report = {
        let engine = Synchronizer::new(store);
        let source = source.to_string();
        let target = target.to_string();
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || {
            engine.sync(&source, &target, &range, policy, Some(&cancel))
        })
        .await??
    };
    spinner.finish_and_clear();
    watcher.abort();

    if cancel.is_cancelled() {
        println!("{}", "Sync cancelled".yellow());
    }
    println!("{}", report.render());
    Ok(())
}
