//! Half-open UTC time ranges.
//!
//! [`TimeRange`] is the single value type the engine works in: busy intervals,
//! free intervals, the search window, and candidate slots are all time ranges.
//! Both ends are converted to UTC on construction.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// An immutable `[start, end)` span with `end >= start`.
///
/// Zero-length ranges are allowed. Ordering is by start, then end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = SlotError;

    fn try_from(raw: RawTimeRange) -> Result<Self> {
        TimeRange::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Build a range from two instants in any timezone.
    ///
    /// # Errors
    /// Returns [`SlotError::InvalidRange`] if `end` is earlier than `start`.
    pub fn new<Tz: TimeZone>(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        let start = start.with_timezone(&Utc);
        let end = end.with_timezone(&Utc);
        if end < start {
            return Err(SlotError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range of `duration` beginning at `start`.
    ///
    /// # Errors
    /// Returns [`SlotError::InvalidRange`] for a negative duration, or one that
    /// runs past the representable calendar.
    pub fn starting_at<Tz: TimeZone>(start: DateTime<Tz>, duration: Duration) -> Result<Self> {
        let start = start.with_timezone(&Utc);
        match start.checked_add_signed(duration) {
            Some(end) => Self::new(start, end),
            None => Err(SlotError::InvalidRange {
                start,
                end: DateTime::<Utc>::MAX_UTC,
            }),
        }
    }

    /// Internal constructor for spans whose ordering is already established.
    pub(crate) fn span(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(end >= start, "span end precedes start");
        Self { start, end }
    }

    /// Inclusive start.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the range, never negative.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True for a zero-length range.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when the two ranges share at least one instant.
    ///
    /// Ranges that only touch (`self.end == other.start`) do not overlap, so
    /// back-to-back meetings are never reported as conflicting.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `instant` lies within the range, both ends inclusive.
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let instant = instant.with_timezone(&Utc);
        self.start <= instant && instant <= self.end
    }

    /// True when `other` lies entirely within this range.
    pub fn contains_range(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The part of this range that falls inside `window`, if any.
    pub fn clamp_to(&self, window: &TimeRange) -> Option<TimeRange> {
        let start = self.start.max(window.start);
        let end = self.end.min(window.end);
        (start <= end).then(|| TimeRange::span(start, end))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}
