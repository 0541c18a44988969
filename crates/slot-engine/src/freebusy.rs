//! Merge busy intervals and compute the free gaps between them.
//!
//! Sorts busy intervals by start time, merges overlapping and touching ones
//! into a disjoint timeline, then walks that timeline across a search window
//! to find the gaps long enough for a meeting.

use chrono::Duration;

use crate::range::TimeRange;

/// Merge overlapping or touching busy intervals.
///
/// Returns a sorted, disjoint list covering exactly the same instants. Two
/// intervals merge when the next one starts at or before the running end, so
/// `[09:00, 10:00)` and `[10:00, 11:00)` become `[09:00, 11:00)` and never
/// leave a zero-width gap at the seam.
pub fn merge_busy_intervals(intervals: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted = intervals.to_vec();
    // Sort by start time (then by end time for stability).
    sorted.sort();

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start() <= last.end() {
                let end = last.end().max(interval.end());
                *last = TimeRange::span(last.start(), end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Find the free intervals of at least `min_duration` inside `window`.
///
/// `merged` must be sorted and disjoint, as produced by
/// [`merge_busy_intervals`]. Intervals reaching outside the window are fine:
/// the cursor only moves forward and no gap extends past the window end.
/// Empty gaps are never reported.
pub fn free_intervals(
    merged: &[TimeRange],
    window: TimeRange,
    min_duration: Duration,
) -> Vec<TimeRange> {
    let fits = |gap: Duration| gap >= min_duration && gap > Duration::zero();

    let mut free = Vec::new();
    let mut cursor = window.start();

    for busy in merged {
        if busy.start() >= window.end() {
            break;
        }
        if busy.start() > cursor && fits(busy.start() - cursor) {
            free.push(TimeRange::span(cursor, busy.start()));
        }
        cursor = cursor.max(busy.end());
    }

    // Trailing gap after the last busy period.
    if window.end() > cursor && fits(window.end() - cursor) {
        free.push(TimeRange::span(cursor, window.end()));
    }

    free
}
