//! Fixed-duration candidate slots cut from free intervals.

use chrono::Duration;

use crate::range::TimeRange;

/// Distance between consecutive candidate start times, in minutes.
///
/// Independent of the meeting duration: a one-hour meeting in a free morning
/// yields 09:00-10:00, 09:30-10:30, 10:00-11:00, and so on.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// [`SLOT_STEP_MINUTES`] as a [`Duration`].
pub fn slot_step() -> Duration {
    Duration::minutes(SLOT_STEP_MINUTES)
}

/// Lazily emit every candidate slot of exactly `duration` from `free`.
///
/// Within each free interval the window starts at the interval's start and
/// slides forward by [`SLOT_STEP_MINUTES`] while it still fits. Slots from
/// different free intervals come out in the order the intervals are given.
pub fn candidate_slots(
    free: &[TimeRange],
    duration: Duration,
) -> impl Iterator<Item = TimeRange> + '_ {
    let step = slot_step();
    free.iter().flat_map(move |interval| {
        std::iter::successors(Some(interval.start()), move |start| {
            start.checked_add_signed(step)
        })
        .map_while(move |start| {
            start
                .checked_add_signed(duration)
                .filter(|end| *end > start && *end <= interval.end())
                .map(|end| TimeRange::span(start, end))
        })
    })
}
