//! Colored terminal rendering for calsync types.

use owo_colors::OwoColorize;

use calsync_core::{CleanupReport, DuplicateGroup, EventRecord, SyncReport};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventRecord {
    fn render(&self) -> String {
        let time = match self.start {
            Some(start) if self.all_day => format!("{} (all day)", start.format("%Y-%m-%d")),
            Some(start) => start.format("%Y-%m-%d %H:%M").to_string(),
            None => "(no date)".to_string(),
        };

        let location = self
            .location
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .map(|l| format!(" @ {l}"))
            .unwrap_or_default();

        format!(
            "{} {}{}",
            time.dimmed(),
            self.display_title(),
            location.dimmed()
        )
    }
}

impl Render for SyncReport {
    fn render(&self) -> String {
        format!(
            "{} created, {} skipped as duplicates, {} failed",
            self.created.green(),
            self.skipped_duplicate.yellow(),
            self.failed.red()
        )
    }
}

impl Render for CleanupReport {
    fn render(&self) -> String {
        format!("{} deleted, {} failed", self.deleted.green(), self.failed.red())
    }
}

impl Render for DuplicateGroup {
    fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.len());
        lines.push(format!(
            "  {} {}",
            "keep  ".green(),
            self.keeper().render()
        ));
        for event in self.deletion_candidates() {
            lines.push(format!("  {} {}", "delete".red(), event.render()));
        }
        lines.join("\n")
    }
}
