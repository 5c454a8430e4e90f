//! One-way synchronization between two event collections.

use serde::Serialize;
use tracing::debug;

use crate::event::EventRecord;
use crate::matcher;
use crate::policy::MatchPolicy;

/// Outcome counts for a one-way sync pass.
///
/// Always satisfies `created + skipped_duplicate + failed == source count`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub created: usize,
    pub skipped_duplicate: usize,
    pub failed: usize,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.created + self.skipped_duplicate + self.failed
    }
}

/// Copy events from `source` that are not already present in `target`.
///
/// Each source event is checked, in input order, against the full target
/// snapshot (a cross-product scan; tolerant time matching does not reduce
/// cleanly to hash buckets). Non-duplicates are handed to `create` one at a
/// time; a `false` return is counted as failed and never aborts the pass.
///
/// The target snapshot is not updated mid-run: events created by this pass
/// are caught as duplicates on the *next* run, not retroactively on this
/// one. Source events that match each other but no target event are all
/// created.
pub fn synchronize<F>(
    source: &[EventRecord],
    target: &[EventRecord],
    policy: MatchPolicy,
    mut create: F,
) -> SyncReport
where
    F: FnMut(&EventRecord) -> bool,
{
    let mut report = SyncReport::default();

    for event in source {
        let duplicate = target
            .iter()
            .any(|existing| matcher::is_duplicate(event, existing, policy));

        if duplicate {
            debug!(title = event.display_title(), "skipping duplicate");
            report.skipped_duplicate += 1;
        } else if create(event) {
            report.created += 1;
        } else {
            debug!(title = event.display_title(), "event creation failed");
            report.failed += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn event(title: &str, start: &str) -> EventRecord {
        EventRecord::new(title, DateTime::parse_from_rfc3339(start).unwrap())
    }

    #[test]
    fn test_empty_target_creates_everything() {
        let source = vec![event("Standup", "2025-03-20T09:00:00+00:00")];
        let report = synchronize(&source, &[], MatchPolicy::Moderate, |_| true);

        assert_eq!(report.created, 1);
        assert_eq!(report.skipped_duplicate, 0);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn test_existing_event_is_skipped() {
        let source = vec![event("Standup", "2025-03-20T09:00:00+00:00")];
        let target = vec![event("standup", "2025-03-20T09:00:00+00:00")];

        let report = synchronize(&source, &target, MatchPolicy::Moderate, |_| {
            panic!("create must not be called for duplicates")
        });

        assert_eq!(report.created, 0);
        assert_eq!(report.skipped_duplicate, 1);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn test_failed_creation_does_not_abort_the_pass() {
        let source = vec![
            event("One", "2025-03-20T09:00:00+00:00"),
            event("Two", "2025-03-20T10:00:00+00:00"),
            event("Three", "2025-03-20T11:00:00+00:00"),
        ];

        let mut calls = 0;
        let report = synchronize(&source, &[], MatchPolicy::Moderate, |_| {
            calls += 1;
            calls != 2 // second creation fails
        });

        assert_eq!(calls, 3);
        assert_eq!(report.created, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), source.len());
    }

    #[test]
    fn test_creations_happen_in_source_order() {
        let source = vec![
            event("B", "2025-03-20T10:00:00+00:00"),
            event("A", "2025-03-20T09:00:00+00:00"),
        ];

        let mut seen = Vec::new();
        synchronize(&source, &[], MatchPolicy::Moderate, |e| {
            seen.push(e.display_title().to_string());
            true
        });

        assert_eq!(seen, vec!["B", "A"]);
    }

    #[test]
    fn test_counts_always_sum_to_source_len() {
        let source = vec![
            event("Dup", "2025-03-20T09:00:00+00:00"),
            event("New", "2025-03-20T10:00:00+00:00"),
            event("Bad", "2025-03-20T11:00:00+00:00"),
        ];
        let target = vec![event("dup", "2025-03-20T09:00:30+00:00")];

        let report = synchronize(&source, &target, MatchPolicy::Moderate, |e| {
            e.display_title() != "Bad"
        });

        assert_eq!(report.created, 1);
        assert_eq!(report.skipped_duplicate, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), source.len());
    }

    #[test]
    fn test_resync_with_created_events_is_idempotent() {
        let source = vec![
            event("Standup", "2025-03-20T09:00:00+00:00"),
            event("Retro", "2025-03-21T15:00:00+00:00"),
        ];

        let mut target: Vec<EventRecord> = Vec::new();
        let mut created: Vec<EventRecord> = Vec::new();
        let first = synchronize(&source, &target, MatchPolicy::Moderate, |e| {
            created.push(e.clone());
            true
        });
        assert_eq!(first.created, 2);

        // Second run against target ∪ {created events}: nothing new.
        target.extend(created);
        let second = synchronize(&source, &target, MatchPolicy::Moderate, |_| {
            panic!("re-sync must not create anything")
        });
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped_duplicate, 2);
    }

    #[test]
    fn test_source_self_duplicates_are_both_created() {
        // Two source events matching each other with no target counterpart
        // are both created; the engine only filters against the target.
        let source = vec![
            event("Standup", "2025-03-20T09:00:00+00:00"),
            event("standup", "2025-03-20T09:00:00+00:00"),
        ];

        let report = synchronize(&source, &[], MatchPolicy::Moderate, |_| true);
        assert_eq!(report.created, 2);
    }
}
