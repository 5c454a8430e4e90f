//! Duplicate detection between event records.
//!
//! Two entry points that must agree with each other:
//! - [`is_duplicate`] does the pairwise comparison the sync engine uses.
//! - [`match_key`] derives the grouping key the cleanup path buckets on.
//!
//! Both are total functions: degenerate records (no usable title, no start
//! time) never match anything and never form a group, so a batch of
//! malformed records cannot mass-match each other.

use crate::event::EventRecord;
use crate::policy::MatchPolicy;

/// Maximum start-time difference, in seconds, for Moderate/Strict matches.
pub const TIME_TOLERANCE_SECS: i64 = 60;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Normalized title, or None when missing/empty.
fn usable_title(e: &EventRecord) -> Option<String> {
    let title = normalize(e.title.as_deref()?);
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Normalized location; a missing location equals an empty one.
fn normalized_location(e: &EventRecord) -> String {
    e.location.as_deref().map(normalize).unwrap_or_default()
}

fn within_time_tolerance(a: &EventRecord, b: &EventRecord) -> bool {
    match (a.start, b.start) {
        (Some(sa), Some(sb)) => (sa - sb).num_seconds().abs() <= TIME_TOLERANCE_SECS,
        _ => false,
    }
}

/// Whether `a` and `b` denote the same calendar entry under `policy`.
///
/// Titles are compared case-insensitively after trimming; an empty or
/// missing title on either side means no match. Loose compares calendar
/// days in each record's own time reference (no timezone conversion);
/// Moderate and Strict compare instants with a ±60s tolerance, and Strict
/// additionally requires matching locations (both empty counts as equal).
pub fn is_duplicate(a: &EventRecord, b: &EventRecord, policy: MatchPolicy) -> bool {
    let (Some(title_a), Some(title_b)) = (usable_title(a), usable_title(b)) else {
        return false;
    };
    if title_a != title_b {
        return false;
    }

    let (Some(start_a), Some(start_b)) = (a.start, b.start) else {
        return false;
    };

    match policy {
        MatchPolicy::Loose => start_a.date_naive() == start_b.date_naive(),
        MatchPolicy::Moderate => within_time_tolerance(a, b),
        MatchPolicy::Strict => {
            within_time_tolerance(a, b) && normalized_location(a) == normalized_location(b)
        }
    }
}

/// Grouping key for `e` under `policy`, or None when the record has no
/// usable title or start time (such records are never grouped).
///
/// The key is a delimited composite of the normalized title, a date bucket
/// (calendar day for Loose, minute-truncated timestamp otherwise) and, for
/// Strict, the normalized location. Keys are only compared for equality
/// within a single run; they are never persisted or parsed back.
pub fn match_key(e: &EventRecord, policy: MatchPolicy) -> Option<String> {
    let title = usable_title(e)?;
    let start = e.start?;

    let key = match policy {
        MatchPolicy::Loose => format!("{}|{}", title, start.format("%Y-%m-%d")),
        MatchPolicy::Moderate => format!("{}|{}", title, start.format("%Y-%m-%d %H:%M")),
        MatchPolicy::Strict => format!(
            "{}|{}|{}",
            title,
            start.format("%Y-%m-%d %H:%M"),
            normalized_location(e)
        ),
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn event(title: &str, start: &str) -> EventRecord {
        EventRecord::new(title, DateTime::parse_from_rfc3339(start).unwrap())
    }

    fn event_at(title: &str, start: &str, location: &str) -> EventRecord {
        let mut e = event(title, start);
        e.location = Some(location.to_string());
        e
    }

    const ALL_POLICIES: [MatchPolicy; 3] = [
        MatchPolicy::Loose,
        MatchPolicy::Moderate,
        MatchPolicy::Strict,
    ];

    #[test]
    fn test_differing_titles_never_match() {
        let a = event("Standup", "2025-03-20T09:00:00+00:00");
        let b = event("Retro", "2025-03-20T09:00:00+00:00");
        for policy in ALL_POLICIES {
            assert!(!is_duplicate(&a, &b, policy));
        }
    }

    #[test]
    fn test_empty_titles_never_match() {
        let blank = EventRecord {
            title: Some("   ".to_string()),
            start: event("x", "2025-03-20T09:00:00+00:00").start,
            ..Default::default()
        };
        for policy in ALL_POLICIES {
            assert!(!is_duplicate(&blank, &blank, policy));
            assert_eq!(match_key(&blank, policy), None);
        }
    }

    #[test]
    fn test_title_comparison_is_case_insensitive_and_trimmed() {
        let a = event("Standup", "2025-03-20T09:00:00+00:00");
        let b = event("  sTANDUP ", "2025-03-20T09:00:00+00:00");
        for policy in ALL_POLICIES {
            assert!(is_duplicate(&a, &b, policy));
        }
    }

    #[test]
    fn test_missing_start_never_matches() {
        let mut a = event("Standup", "2025-03-20T09:00:00+00:00");
        let b = a.clone();
        a.start = None;
        for policy in ALL_POLICIES {
            assert!(!is_duplicate(&a, &b, policy));
            assert!(!is_duplicate(&b, &a, policy));
            assert_eq!(match_key(&a, policy), None);
        }
    }

    #[test]
    fn test_loose_matches_same_day_regardless_of_time() {
        let a = event("Standup", "2025-03-20T08:00:00+00:00");
        let b = event("Standup", "2025-03-20T23:00:00+00:00");
        assert!(is_duplicate(&a, &b, MatchPolicy::Loose));
        assert!(!is_duplicate(&a, &b, MatchPolicy::Moderate));
        assert!(!is_duplicate(&a, &b, MatchPolicy::Strict));
    }

    #[test]
    fn test_loose_uses_record_local_day() {
        // Same instant, different offsets landing on different local days.
        let a = event("Standup", "2025-03-20T23:30:00-02:00");
        let b = event("Standup", "2025-03-21T01:30:00+00:00");
        assert!(!is_duplicate(&a, &b, MatchPolicy::Loose));
        // But the instant-based policies still match.
        assert!(is_duplicate(&a, &b, MatchPolicy::Moderate));
    }

    #[test]
    fn test_moderate_tolerance_boundary() {
        let base = event("Standup", "2025-03-20T09:00:00+00:00");
        let one_sec = event("Standup", "2025-03-20T09:00:01+00:00");
        let sixty = event("Standup", "2025-03-20T09:01:00+00:00");
        let sixty_one = event("Standup", "2025-03-20T09:01:01+00:00");

        assert!(is_duplicate(&base, &one_sec, MatchPolicy::Moderate));
        assert!(is_duplicate(&base, &sixty, MatchPolicy::Moderate));
        assert!(!is_duplicate(&base, &sixty_one, MatchPolicy::Moderate));
    }

    #[test]
    fn test_strict_compares_location_case_insensitively() {
        let a = event_at("Standup", "2025-03-20T09:00:00+00:00", "Room A");
        let b = event_at("Standup", "2025-03-20T09:00:00+00:00", "room a");
        let c = event_at("Standup", "2025-03-20T09:00:00+00:00", "Room B");

        assert!(is_duplicate(&a, &b, MatchPolicy::Strict));
        assert!(!is_duplicate(&a, &c, MatchPolicy::Strict));
        // Moderate ignores location entirely.
        assert!(is_duplicate(&a, &c, MatchPolicy::Moderate));
    }

    #[test]
    fn test_strict_both_locations_empty_counts_as_equal() {
        let a = event("Standup", "2025-03-20T09:00:00+00:00");
        let mut b = event("Standup", "2025-03-20T09:00:00+00:00");
        b.location = Some("".to_string());
        assert!(is_duplicate(&a, &b, MatchPolicy::Strict));
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (
                event("Standup", "2025-03-20T09:00:00+00:00"),
                event("standup", "2025-03-20T09:00:30+00:00"),
            ),
            (
                event_at("Standup", "2025-03-20T09:00:00+00:00", "Room A"),
                event_at("Standup", "2025-03-20T09:00:00+00:00", "Room B"),
            ),
            (
                event("Standup", "2025-03-20T08:00:00+00:00"),
                event("Standup", "2025-03-20T23:00:00+00:00"),
            ),
        ];
        for (a, b) in &pairs {
            for policy in ALL_POLICIES {
                assert_eq!(
                    is_duplicate(a, b, policy),
                    is_duplicate(b, a, policy),
                    "asymmetric under {policy}"
                );
            }
        }
    }

    #[test]
    fn test_key_agrees_with_pairwise_comparison() {
        let a = event_at("Standup", "2025-03-20T09:00:00+00:00", "Room A");
        let b = event_at("standup ", "2025-03-20T09:00:00+00:00", "ROOM A");
        let c = event_at("Standup", "2025-03-21T09:00:00+00:00", "Room A");

        for policy in ALL_POLICIES {
            assert!(is_duplicate(&a, &b, policy));
            assert_eq!(match_key(&a, policy), match_key(&b, policy));

            assert!(!is_duplicate(&a, &c, policy));
            assert_ne!(match_key(&a, policy), match_key(&c, policy));
        }
    }

    #[test]
    fn test_loose_key_buckets_by_day() {
        let a = event("Standup", "2025-03-20T08:00:00+00:00");
        let b = event("Standup", "2025-03-20T23:00:00+00:00");
        assert_eq!(match_key(&a, MatchPolicy::Loose), match_key(&b, MatchPolicy::Loose));
        assert_ne!(
            match_key(&a, MatchPolicy::Moderate),
            match_key(&b, MatchPolicy::Moderate)
        );
    }
}
