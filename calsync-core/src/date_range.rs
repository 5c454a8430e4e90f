//! Date windows for reading events from the store.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

/// How far the default windows reach, in days.
pub const DEFAULT_SYNC_DAYS: i64 = 365;

/// Date range for filtering events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange::all()
    }
}

impl DateRange {
    /// ±DEFAULT_SYNC_DAYS around now.
    pub fn all() -> Self {
        let now = Utc::now();
        DateRange {
            from: Some(now - Duration::days(DEFAULT_SYNC_DAYS)),
            to: Some(now + Duration::days(DEFAULT_SYNC_DAYS)),
        }
    }

    /// Now until +DEFAULT_SYNC_DAYS.
    pub fn future() -> Self {
        let now = Utc::now();
        DateRange {
            from: Some(now),
            to: Some(now + Duration::days(DEFAULT_SYNC_DAYS)),
        }
    }

    pub fn unbounded() -> Self {
        DateRange { from: None, to: None }
    }

    /// Parse date strings into a DateRange.
    /// - `from`: "start" for unbounded, or YYYY-MM-DD
    /// - `to`: YYYY-MM-DD, defaults to +DEFAULT_SYNC_DAYS if not specified
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> Result<Self, String> {
        let now = Utc::now();

        let from_dt = match from {
            Some("start") => None, // Unbounded past
            Some(s) => Some(parse_date_start(s)?),
            None => Some(now - Duration::days(DEFAULT_SYNC_DAYS)),
        };

        let to_dt = match to {
            Some(s) => Some(parse_date_end(s)?),
            None => Some(now + Duration::days(DEFAULT_SYNC_DAYS)),
        };

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    /// Whether an event spanning `[start, end]` intersects this range.
    ///
    /// Records without a start time cannot be window-filtered and are
    /// always included; the matcher treats them as unique downstream.
    pub fn intersects(
        &self,
        start: Option<DateTime<FixedOffset>>,
        end: Option<DateTime<FixedOffset>>,
    ) -> bool {
        let Some(start) = start else { return true };
        let start = start.with_timezone(&Utc);
        let end = end.map(|e| e.with_timezone(&Utc)).unwrap_or(start);

        if let Some(to) = self.to {
            if start > to {
                return false;
            }
        }
        if let Some(from) = self.from {
            if end < from {
                return false;
            }
        }
        true
    }
}

/// Parse YYYY-MM-DD as start of day in UTC
fn parse_date_start(s: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

/// Parse YYYY-MM-DD as end of day in UTC
fn parse_date_end(s: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(date.and_hms_opt(23, 59, 59).unwrap().and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_intersects_bounded_range() {
        let range = DateRange::from_args(Some("2025-03-01"), Some("2025-03-31")).unwrap();

        assert!(range.intersects(Some(ts("2025-03-15T10:00:00+00:00")), None));
        assert!(!range.intersects(Some(ts("2025-04-02T10:00:00+00:00")), None));
        assert!(!range.intersects(Some(ts("2025-02-01T10:00:00+00:00")), None));

        // Spans that straddle a boundary still intersect
        assert!(range.intersects(
            Some(ts("2025-02-28T10:00:00+00:00")),
            Some(ts("2025-03-02T10:00:00+00:00")),
        ));
    }

    #[test]
    fn test_undated_records_always_included() {
        let range = DateRange::from_args(Some("2025-03-01"), Some("2025-03-31")).unwrap();
        assert!(range.intersects(None, None));
    }

    #[test]
    fn test_unbounded_past() {
        let range = DateRange::from_args(Some("start"), Some("2025-03-31")).unwrap();
        assert!(range.from.is_none());
        assert!(range.intersects(Some(ts("1999-01-01T00:00:00+00:00")), None));
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert!(DateRange::from_args(Some("03/01/2025"), None).is_err());
    }
}
