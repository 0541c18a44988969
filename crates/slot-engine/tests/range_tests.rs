//! Tests for the TimeRange value type.

use chrono::{Duration, FixedOffset, TimeZone, Utc};
use slot_engine::{SlotError, TimeRange};

fn at(hour: u32, min: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 5, 1, hour, min, 0).unwrap()
}

fn range(start: (u32, u32), end: (u32, u32)) -> TimeRange {
    TimeRange::new(at(start.0, start.1), at(end.0, end.1)).unwrap()
}

#[test]
fn end_before_start_is_rejected() {
    let err = TimeRange::new(at(10, 0), at(9, 0)).unwrap_err();

    assert!(matches!(err, SlotError::InvalidRange { .. }));
}

#[test]
fn zero_length_range_is_allowed() {
    let r = TimeRange::new(at(10, 0), at(10, 0)).unwrap();

    assert!(r.is_empty());
    assert_eq!(r.duration(), Duration::zero());
}

#[test]
fn offsets_are_normalized_to_utc() {
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let r = TimeRange::new(
        plus_two.with_ymd_and_hms(2023, 5, 1, 11, 0, 0).unwrap(),
        plus_two.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap(),
    )
    .unwrap();

    assert_eq!(r, range((9, 0), (10, 0)));
    assert_eq!(r.start().timezone(), Utc);
}

#[test]
fn starting_at_adds_the_duration() {
    let r = TimeRange::starting_at(at(9, 0), Duration::minutes(90)).unwrap();

    assert_eq!(r.end(), at(10, 30));
    assert!(TimeRange::starting_at(at(9, 0), Duration::minutes(-1)).is_err());
}

#[test]
fn overlap_is_half_open() {
    let a = range((9, 0), (10, 0));

    assert!(a.overlaps(&range((9, 30), (10, 30))));
    assert!(a.overlaps(&range((8, 0), (11, 0))));
    // Touching boundaries are not an overlap.
    assert!(!a.overlaps(&range((10, 0), (11, 0))));
    assert!(!range((10, 0), (11, 0)).overlaps(&a));
}

#[test]
fn contains_instant_includes_both_ends() {
    let a = range((9, 0), (10, 0));

    assert!(a.contains(&at(9, 0)));
    assert!(a.contains(&at(9, 30)));
    assert!(a.contains(&at(10, 0)));
    assert!(!a.contains(&at(10, 1)));
}

#[test]
fn contains_range_allows_shared_edges() {
    let day = range((9, 0), (17, 0));

    assert!(day.contains_range(&range((9, 0), (10, 0))));
    assert!(day.contains_range(&range((16, 0), (17, 0))));
    assert!(!day.contains_range(&range((16, 30), (17, 30))));
}

#[test]
fn clamp_to_trims_to_the_window() {
    let window = range((9, 0), (17, 0));

    assert_eq!(
        range((8, 0), (10, 0)).clamp_to(&window),
        Some(range((9, 0), (10, 0)))
    );
    assert_eq!(range((18, 0), (19, 0)).clamp_to(&window), None);
}

#[test]
fn display_uses_minute_precision() {
    assert_eq!(
        range((9, 0), (10, 30)).to_string(),
        "2023-05-01 09:00 - 2023-05-01 10:30"
    );
}

#[test]
fn deserializing_checks_the_ordering() {
    let ok: TimeRange =
        serde_json::from_str(r#"{"start":"2023-05-01T09:00:00Z","end":"2023-05-01T10:00:00Z"}"#)
            .unwrap();
    assert_eq!(ok, range((9, 0), (10, 0)));

    let bad = serde_json::from_str::<TimeRange>(
        r#"{"start":"2023-05-01T10:00:00Z","end":"2023-05-01T09:00:00Z"}"#,
    );
    assert!(bad.is_err());
}

#[test]
fn serializes_as_rfc3339_pair() {
    let json = serde_json::to_string(&range((9, 0), (10, 0))).unwrap();

    assert_eq!(
        json,
        r#"{"start":"2023-05-01T09:00:00Z","end":"2023-05-01T10:00:00Z"}"#
    );
}
