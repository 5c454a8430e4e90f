//! JSON-file event store.
//!
//! One `<collection>.json` file per collection under the store directory,
//! each holding an array of event records in creation order. Collection
//! names are the exact, case-sensitive file stems.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};
use uuid::Uuid;

use calsync_core::{CalSyncError, CalSyncResult, DateRange, EventRecord, EventStore};

/// Start-time search window for property-based deletion.
const DELETE_WINDOW_SECS: i64 = 3600;
/// Wider window for all-day events, which may be anchored anywhere in the day.
const DELETE_WINDOW_ALL_DAY_SECS: i64 = 25 * 3600;

pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open the store rooted at `root`, creating the directory on first
    /// use. Callers hold either a usable handle or a `StoreUnavailable`
    /// error; availability is never re-checked per call.
    pub fn open(root: impl Into<PathBuf>) -> CalSyncResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            CalSyncError::StoreUnavailable(format!("cannot open store at {}: {}", root.display(), e))
        })?;
        fs::read_dir(&root).map_err(|e| {
            CalSyncError::StoreUnavailable(format!("cannot read store at {}: {}", root.display(), e))
        })?;
        Ok(JsonStore { root })
    }

    /// Create an empty collection. Errors if it already exists.
    pub fn create_collection(&self, name: &str) -> CalSyncResult<()> {
        let path = self
            .collection_path(name)
            .ok_or_else(|| CalSyncError::Store(format!("invalid collection name '{name}'")))?;
        if path.exists() {
            return Err(CalSyncError::Store(format!(
                "collection '{name}' already exists"
            )));
        }
        self.write_collection(name, &[])
    }

    /// Collection names are opaque strings, but as file stems they must
    /// stay inside the store directory.
    fn collection_path(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return None;
        }
        Some(self.root.join(format!("{name}.json")))
    }

    fn read_collection(&self, name: &str) -> CalSyncResult<Vec<EventRecord>> {
        let Some(path) = self.collection_path(name) else {
            return Ok(Vec::new());
        };
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| CalSyncError::Serialization(format!("{}: {}", path.display(), e)))
    }

    fn write_collection(&self, name: &str, events: &[EventRecord]) -> CalSyncResult<()> {
        let path = self
            .collection_path(name)
            .ok_or_else(|| CalSyncError::Store(format!("invalid collection name '{name}'")))?;
        let content = serde_json::to_string_pretty(events)
            .map_err(|e| CalSyncError::Serialization(e.to_string()))?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn try_create(&self, collection: &str, record: &EventRecord) -> CalSyncResult<()> {
        let path = self
            .collection_path(collection)
            .ok_or_else(|| CalSyncError::Store(format!("invalid collection name '{collection}'")))?;
        if !path.exists() {
            return Err(CalSyncError::CollectionNotFound(collection.to_string()));
        }

        let mut events = self.read_collection(collection)?;
        let mut stored = record.clone();
        stored.collection_id = Some(collection.to_string());
        stored.external_id = Some(Uuid::new_v4().to_string());
        events.push(stored);
        self.write_collection(collection, &events)
    }

    /// Records read back from this store carry the store's own id, which
    /// identifies exactly one event even when duplicates sit well inside
    /// the property-match window (cleanup candidates always do). Foreign
    /// or hand-built records fall back to a best-effort property match:
    /// same normalized title, start within the deletion window, matching
    /// location when the identifying record carries one, and only a
    /// unique match is deleted.
    fn try_delete(&self, collection: &str, record: &EventRecord) -> CalSyncResult<bool> {
        if let Some(id) = record.external_id.as_deref() {
            let mut events = self.read_collection(collection)?;
            if let Some(pos) = events
                .iter()
                .position(|e| e.external_id.as_deref() == Some(id))
            {
                events.remove(pos);
                self.write_collection(collection, &events)?;
                return Ok(true);
            }
        }

        let Some(target_start) = record.start else {
            return Ok(false);
        };
        let target_title = match record.title.as_deref().map(normalize) {
            Some(t) if !t.is_empty() => t,
            _ => return Ok(false),
        };
        let target_location = record
            .location
            .as_deref()
            .map(normalize)
            .filter(|l| !l.is_empty());
        let window = if record.all_day {
            DELETE_WINDOW_ALL_DAY_SECS
        } else {
            DELETE_WINDOW_SECS
        };

        let mut events = self.read_collection(collection)?;
        let matches: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                let same_title = e.title.as_deref().map(normalize) == Some(target_title.clone());
                let in_window = e
                    .start
                    .is_some_and(|s| (s - target_start).num_seconds().abs() <= window);
                let same_location = match &target_location {
                    Some(loc) => e.location.as_deref().map(normalize).as_ref() == Some(loc),
                    None => true,
                };
                same_title && in_window && same_location
            })
            .map(|(i, _)| i)
            .collect();

        if matches.len() != 1 {
            debug!(
                collection,
                title = record.display_title(),
                candidates = matches.len(),
                "no unique match for deletion"
            );
            return Ok(false);
        }

        events.remove(matches[0]);
        self.write_collection(collection, &events)?;
        Ok(true)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

impl EventStore for JsonStore {
    fn list_collections(&self) -> CalSyncResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            CalSyncError::StoreUnavailable(format!(
                "cannot read store at {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(CalSyncError::Io)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn list_events(&self, collection: &str, range: &DateRange) -> CalSyncResult<Vec<EventRecord>> {
        let events = self.read_collection(collection)?;
        Ok(events
            .into_iter()
            .filter(|e| range.intersects(e.start, e.end))
            .collect())
    }

    fn create_event(&self, collection: &str, record: &EventRecord) -> bool {
        match self.try_create(collection, record) {
            Ok(()) => true,
            Err(e) => {
                warn!(collection, error = %e, "event creation rejected");
                false
            }
        }
    }

    fn delete_event(&self, collection: &str, record: &EventRecord) -> bool {
        match self.try_delete(collection, record) {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(collection, error = %e, "event deletion failed");
                false
            }
        }
    }
}
