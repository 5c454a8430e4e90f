//! Duplicate grouping within a single collection.

use std::collections::HashMap;

use serde::Serialize;

use crate::event::EventRecord;
use crate::matcher;
use crate::policy::MatchPolicy;

/// Two or more events sharing a match key, in the order they were read.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    pub key: String,
    pub events: Vec<EventRecord>,
}

impl DuplicateGroup {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The event to retain: first seen wins. The rule is arbitrary but
    /// deterministic; it does not try to pick the "richer" duplicate.
    pub fn keeper(&self) -> &EventRecord {
        &self.events[0]
    }

    /// Everything after the keeper, in original order.
    pub fn deletion_candidates(&self) -> &[EventRecord] {
        &self.events[1..]
    }
}

/// Outcome counts for a cleanup pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub deleted: usize,
    pub failed: usize,
}

/// Bucket events by match key, keeping only buckets with two or more
/// entries.
///
/// Groups come out in first-seen-key order and events keep their read
/// order within each group. Records without a usable key (no title or no
/// start time) are never grouped.
pub fn group_duplicates(events: &[EventRecord], policy: MatchPolicy) -> Vec<DuplicateGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<EventRecord>)> = Vec::new();

    for event in events {
        let Some(key) = matcher::match_key(event, policy) else {
            continue;
        };
        match index.get(&key) {
            Some(&slot) => buckets[slot].1.push(event.clone()),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push((key, vec![event.clone()]));
            }
        }
    }

    buckets
        .into_iter()
        .filter(|(_, events)| events.len() > 1)
        .map(|(key, events)| DuplicateGroup { key, events })
        .collect()
}
