//! The event-store capability.

use crate::date_range::DateRange;
use crate::error::CalSyncResult;
use crate::event::EventRecord;

/// Narrow interface to the external calendar store.
///
/// Implementations come from a fallible initialization step: callers hold
/// either a usable store handle or an explicit
/// [`StoreUnavailable`](crate::CalSyncError::StoreUnavailable) error, never
/// a global availability flag checked before each call.
///
/// Collection names are opaque user-facing strings owned by the store and
/// are compared byte-for-byte wherever they are used as lookup keys.
pub trait EventStore: Send + Sync {
    /// Names of every event collection in the store.
    fn list_collections(&self) -> CalSyncResult<Vec<String>>;

    /// Events in `collection` whose span intersects `range`, in store read
    /// order. An unknown collection yields an empty list, not an error.
    fn list_events(&self, collection: &str, range: &DateRange) -> CalSyncResult<Vec<EventRecord>>;

    /// Create `record` in `collection`. Failures (unknown collection,
    /// rejected write) are converted to `false` so per-event isolation
    /// holds in the sync loop.
    fn create_event(&self, collection: &str, record: &EventRecord) -> bool;

    /// Delete the event identified by `record`: by the store-assigned
    /// `external_id` when the record carries a usable one, otherwise by
    /// the event best matching its properties (same title, start time
    /// within ±1 hour, ±25 hours for all-day events) — identifiers may
    /// not be portable across stores. Returns `false` when no unique
    /// match is found or the store rejects the deletion.
    fn delete_event(&self, collection: &str, record: &EventRecord) -> bool;
}
