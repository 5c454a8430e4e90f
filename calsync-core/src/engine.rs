//! Store-facing orchestration of sync and cleanup passes.
//!
//! [`Synchronizer`] wires the pure algorithms in [`crate::sync`] and
//! [`crate::cleanup`] to an [`EventStore`]: it reads both collections up
//! front, applies creations/deletions strictly sequentially (the store side
//! is rate- and permission-sensitive), and reports aggregate counts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cleanup::{self, CleanupReport, DuplicateGroup};
use crate::date_range::DateRange;
use crate::error::{CalSyncError, CalSyncResult};
use crate::policy::MatchPolicy;
use crate::store::EventStore;
use crate::sync::{self, SyncReport};

/// Cooperative cancellation flag, polled between per-event store calls.
///
/// Cancellation is coarse: a pass is not interruptible mid-scan, only
/// between discrete creations/deletions, and already-completed store calls
/// are never rolled back.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

const PROGRESS_EVERY: usize = 10;

/// Runs sync and cleanup operations against an event store.
pub struct Synchronizer<S: EventStore> {
    store: S,
}

impl<S: EventStore> Synchronizer<S> {
    pub fn new(store: S) -> Self {
        Synchronizer { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn collection_exists(&self, name: &str) -> CalSyncResult<bool> {
        Ok(self.store.list_collections()?.iter().any(|c| c == name))
    }

    /// Error with `CollectionNotFound` unless `name` exists in the store.
    pub fn require_collection(&self, name: &str) -> CalSyncResult<()> {
        if self.collection_exists(name)? {
            Ok(())
        } else {
            Err(CalSyncError::CollectionNotFound(name.to_string()))
        }
    }

    /// One-way sync of `source` into `target`.
    ///
    /// The target snapshot is read over the full default window regardless
    /// of `range`, so older target events still count as duplicates. A
    /// missing source or target collection is reported and yields a
    /// zero-effect report rather than an error.
    ///
    /// Once `cancel` fires, no further store calls are made; the remaining
    /// events are counted as failed so the report still covers every source
    /// event.
    pub fn sync(
        &self,
        source: &str,
        target: &str,
        range: &DateRange,
        policy: MatchPolicy,
        cancel: Option<&CancelFlag>,
    ) -> CalSyncResult<SyncReport> {
        if !self.collection_exists(source)? {
            warn!(collection = source, "source collection not found, nothing to sync");
            return Ok(SyncReport::default());
        }
        if !self.collection_exists(target)? {
            warn!(collection = target, "target collection not found, nothing to sync");
            return Ok(SyncReport::default());
        }

        let source_events = self.store.list_events(source, range)?;
        if source_events.is_empty() {
            info!(collection = source, "no events to synchronize");
            return Ok(SyncReport::default());
        }
        let target_events = self.store.list_events(target, &DateRange::all())?;

        info!(
            source,
            target,
            source_events = source_events.len(),
            target_events = target_events.len(),
            policy = %policy,
            "starting sync"
        );

        let mut attempted = 0usize;
        let report = sync::synchronize(&source_events, &target_events, policy, |event| {
            if cancel.is_some_and(CancelFlag::is_cancelled) {
                return false;
            }
            let ok = self.store.create_event(target, event);
            attempted += 1;
            if attempted % PROGRESS_EVERY == 0 {
                info!(attempted, "sync progress");
            }
            ok
        });

        if cancel.is_some_and(CancelFlag::is_cancelled) {
            warn!("sync cancelled; remaining events counted as failed");
        }
        info!(
            created = report.created,
            skipped = report.skipped_duplicate,
            failed = report.failed,
            "sync complete"
        );
        Ok(report)
    }

    /// Read a whole collection and group its duplicates.
    pub fn find_duplicates(
        &self,
        collection: &str,
        policy: MatchPolicy,
    ) -> CalSyncResult<Vec<DuplicateGroup>> {
        self.require_collection(collection)?;
        let events = self.store.list_events(collection, &DateRange::all())?;
        let groups = cleanup::group_duplicates(&events, policy);
        info!(
            collection,
            events = events.len(),
            groups = groups.len(),
            "duplicate scan complete"
        );
        Ok(groups)
    }

    /// Find duplicate groups and delete every non-keeper event.
    pub fn cleanup(
        &self,
        collection: &str,
        policy: MatchPolicy,
        cancel: Option<&CancelFlag>,
    ) -> CalSyncResult<CleanupReport> {
        if !self.collection_exists(collection)? {
            warn!(collection, "collection not found, nothing to clean up");
            return Ok(CleanupReport::default());
        }
        let events = self.store.list_events(collection, &DateRange::all())?;
        let groups = cleanup::group_duplicates(&events, policy);
        self.delete_duplicates(collection, &groups, cancel)
    }

    /// Delete each group's deletion candidates, sequentially, in group
    /// order. Split out from [`Self::cleanup`] so callers can show the
    /// groups (or dry-run) before committing to deletion.
    pub fn delete_duplicates(
        &self,
        collection: &str,
        groups: &[DuplicateGroup],
        cancel: Option<&CancelFlag>,
    ) -> CalSyncResult<CleanupReport> {
        let mut report = CleanupReport::default();

        for group in groups {
            for event in group.deletion_candidates() {
                if cancel.is_some_and(CancelFlag::is_cancelled) {
                    report.failed += 1;
                    continue;
                }
                if self.store.delete_event(collection, event) {
                    debug!(title = event.display_title(), "duplicate deleted");
                    report.deleted += 1;
                } else {
                    debug!(title = event.display_title(), "duplicate deletion failed");
                    report.failed += 1;
                }
            }
        }

        if cancel.is_some_and(CancelFlag::is_cancelled) {
            warn!("cleanup cancelled; remaining deletions counted as failed");
        }
        info!(
            collection,
            deleted = report.deleted,
            failed = report.failed,
            "cleanup complete"
        );
        Ok(report)
    }
}
