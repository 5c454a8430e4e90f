use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use calsync_core::{EventRecord, EventStore};

use crate::render::Render;
use crate::store::JsonStore;

pub struct AddArgs {
    pub collection: String,
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub all_day: bool,
}

pub fn run(store: &JsonStore, args: AddArgs) -> Result<()> {
    let record = EventRecord {
        title: Some(args.title),
        start: Some(parse_timestamp(&args.start)?),
        end: args.end.as_deref().map(parse_timestamp).transpose()?,
        description: args.description,
        location: args.location,
        all_day: args.all_day,
        ..Default::default()
    };

    if !store.create_event(&args.collection, &record) {
        return Err(anyhow!(
            "Could not create event in '{}'. Does the collection exist?",
            args.collection
        ));
    }

    println!("Added {}", record.render());
    Ok(())
}

/// Accepts RFC 3339 timestamps, or a bare YYYY-MM-DD taken as midnight UTC.
fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc().fixed_offset());
    }
    Err(anyhow!(
        "Invalid timestamp '{}'. Expected RFC 3339 (2025-03-20T15:00:00+01:00) or YYYY-MM-DD",
        s
    ))
}
