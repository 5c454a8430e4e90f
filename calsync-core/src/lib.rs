//! Core engine for the calsync ecosystem.
//!
//! This crate holds everything with algorithmic content:
//! - `matcher`: decides whether two event records denote the same entry
//! - `sync`: one-way synchronization between two collections
//! - `cleanup`: duplicate grouping within a single collection
//! - `store`: the capability trait the surrounding application implements
//!
//! The engine never talks to a calendar backend itself; it works on
//! already-materialized lists of [`EventRecord`]s and hands per-event
//! creations/deletions back through the [`EventStore`] capability.

pub mod cleanup;
pub mod date_range;
pub mod engine;
pub mod error;
pub mod event;
pub mod matcher;
pub mod policy;
pub mod store;
pub mod sync;

pub use cleanup::{group_duplicates, CleanupReport, DuplicateGroup};
pub use date_range::DateRange;
pub use engine::{CancelFlag, Synchronizer};
pub use error::{CalSyncError, CalSyncResult};
pub use event::EventRecord;
pub use matcher::{is_duplicate, match_key};
pub use policy::MatchPolicy;
pub use store::EventStore;
pub use sync::{synchronize, SyncReport};
