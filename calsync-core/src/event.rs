//! Store-neutral event records.
//!
//! Events are read from the external store in this shape and the engine
//! works exclusively with it for matching, sync, and cleanup.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A calendar event as read from the external store.
///
/// A record is immutable once produced by a store read: the engine
/// classifies records but never mutates them. `collection_id` and
/// `external_id` are assigned by the store on creation, never by the
/// engine, and `external_id` is only ever used to identify events for
/// deletion, never for matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Start timestamp, kept in the record's own time reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default)]
    pub all_day: bool,

    /// Which collection the record currently belongs to (set by the store).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,

    /// Opaque store-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl EventRecord {
    /// A minimal record with just a title and start time.
    pub fn new(title: impl Into<String>, start: DateTime<FixedOffset>) -> Self {
        EventRecord {
            title: Some(title.into()),
            start: Some(start),
            ..Default::default()
        }
    }

    /// Title for display purposes; falls back for untitled records.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => "(untitled)",
        }
    }
}
