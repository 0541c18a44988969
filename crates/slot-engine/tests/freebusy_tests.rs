//! Tests for busy-interval merging and free-gap computation.

use chrono::{Duration, TimeZone, Utc};
use slot_engine::freebusy::{free_intervals, merge_busy_intervals};
use slot_engine::TimeRange;

/// Helper to create a TimeRange from hour/minute pairs on 2026-03-01.
fn range(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> TimeRange {
    TimeRange::new(
        Utc.with_ymd_and_hms(2026, 3, 1, start_hour, start_min, 0)
            .unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 1, end_hour, end_min, 0).unwrap(),
    )
    .unwrap()
}

// ── Merging ─────────────────────────────────────────────────────────────────

#[test]
fn overlapping_intervals_merge_into_one() {
    // [10:00,12:00) + [11:00,13:00) → [10:00,13:00)
    let merged = merge_busy_intervals(&[range(10, 0, 12, 0), range(11, 0, 13, 0)]);

    assert_eq!(merged, vec![range(10, 0, 13, 0)]);
}

#[test]
fn touching_intervals_merge() {
    // Back-to-back meetings leave no zero-width gap at the seam.
    let merged = merge_busy_intervals(&[range(9, 0, 10, 0), range(10, 0, 11, 0)]);

    assert_eq!(merged, vec![range(9, 0, 11, 0)]);
}

#[test]
fn unsorted_input_is_sorted_before_merging() {
    let merged = merge_busy_intervals(&[
        range(14, 0, 15, 0),
        range(9, 0, 10, 0),
        range(9, 30, 9, 45),
    ]);

    assert_eq!(merged, vec![range(9, 0, 10, 0), range(14, 0, 15, 0)]);
}

#[test]
fn contained_interval_does_not_shrink_the_merge() {
    let merged = merge_busy_intervals(&[range(9, 0, 12, 0), range(10, 0, 11, 0)]);

    assert_eq!(merged, vec![range(9, 0, 12, 0)]);
}

#[test]
fn merge_of_nothing_is_empty() {
    assert!(merge_busy_intervals(&[]).is_empty());
}

// ── Free intervals ──────────────────────────────────────────────────────────

#[test]
fn single_busy_interval_produces_two_gaps() {
    // Window: 08:00-17:00, busy: 10:00-11:00
    let free = free_intervals(&[range(10, 0, 11, 0)], range(8, 0, 17, 0), Duration::hours(1));

    assert_eq!(free, vec![range(8, 0, 10, 0), range(11, 0, 17, 0)]);
}

#[test]
fn no_busy_time_makes_the_whole_window_free_once() {
    let window = range(9, 0, 17, 0);

    let free = free_intervals(&[], window, Duration::hours(1));

    assert_eq!(free, vec![window]);
}

#[test]
fn gaps_shorter_than_the_minimum_are_skipped() {
    // Only gap 10:00-10:15 is 15 min; needs 60.
    let merged = merge_busy_intervals(&[range(9, 0, 10, 0), range(10, 15, 12, 0)]);

    let free = free_intervals(&merged, range(9, 0, 12, 0), Duration::hours(1));

    assert!(free.is_empty(), "no gap is long enough: {free:?}");
}

#[test]
fn gap_exactly_the_minimum_is_kept() {
    let free = free_intervals(&[range(10, 0, 11, 0)], range(9, 0, 11, 0), Duration::hours(1));

    assert_eq!(free, vec![range(9, 0, 10, 0)]);
}

#[test]
fn busy_time_spilling_outside_the_window_is_handled() {
    // Busy 07:00-09:30 starts before the window, 16:30-19:00 ends after it.
    let merged = merge_busy_intervals(&[range(7, 0, 9, 30), range(16, 30, 19, 0)]);

    let free = free_intervals(&merged, range(9, 0, 17, 0), Duration::minutes(30));

    assert_eq!(free, vec![range(9, 30, 16, 30)]);
}

#[test]
fn busy_time_covering_the_window_leaves_nothing() {
    let free = free_intervals(&[range(8, 0, 18, 0)], range(9, 0, 17, 0), Duration::minutes(1));

    assert!(free.is_empty());
}

#[test]
fn zero_minimum_still_skips_empty_gaps() {
    let merged = merge_busy_intervals(&[range(9, 0, 10, 0), range(12, 0, 17, 0)]);

    let free = free_intervals(&merged, range(9, 0, 17, 0), Duration::zero());

    assert_eq!(free, vec![range(10, 0, 12, 0)]);
}

#[test]
fn multiple_gaps_between_busy_intervals() {
    // Window: 08:00-18:00, busy: 09-10, 12-13, 15-16
    let merged = merge_busy_intervals(&[
        range(9, 0, 10, 0),
        range(12, 0, 13, 0),
        range(15, 0, 16, 0),
    ]);

    let free = free_intervals(&merged, range(8, 0, 18, 0), Duration::minutes(30));

    let minutes: Vec<i64> = free.iter().map(|f| f.duration().num_minutes()).collect();
    assert_eq!(minutes, vec![60, 120, 120, 120]);
}

#[test]
fn busy_time_after_the_window_does_not_stretch_the_last_gap() {
    let free = free_intervals(&[range(19, 0, 20, 0)], range(9, 0, 17, 0), Duration::hours(1));

    assert_eq!(free, vec![range(9, 0, 17, 0)]);
}
