//! Multi-participant availability search.
//!
//! [`AvailabilityEngine`] fetches every participant's busy intervals from a
//! [`BusyIntervalSource`] concurrently, merges them into one busy timeline,
//! and cuts fixed-duration candidate meeting slots out of the gaps.
//!
//! The fetch step is the only I/O. Everything after the join is a pure
//! function of the fetched intervals ([`available_slots`]), so the same
//! inputs against an unchanged source always produce the same slots.

use chrono::Duration;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::busy::{BusyIntervalSource, EventStatus, ParticipantId};
use crate::error::{Result, SlotError};
use crate::freebusy;
use crate::range::TimeRange;
use crate::slots;

/// Result cap used by callers that do not specify one.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Merged view of a group's schedule within a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// The analysis window.
    pub window: TimeRange,
    /// Merged busy intervals, clipped to the window (sorted, disjoint).
    pub busy: Vec<TimeRange>,
    /// Every non-empty gap between busy intervals.
    pub free: Vec<TimeRange>,
}

/// Check a slot request before any participant is looked up.
///
/// # Errors
/// In order of precedence: [`SlotError::NoParticipants`],
/// [`SlotError::NonPositiveDuration`], [`SlotError::DurationExceedsRange`],
/// [`SlotError::NonPositiveMaxResults`].
pub fn validate_request(
    participants: &[ParticipantId],
    search_range: TimeRange,
    duration: Duration,
    max_results: usize,
) -> Result<()> {
    if participants.is_empty() {
        return Err(SlotError::NoParticipants);
    }
    if duration <= Duration::zero() {
        return Err(SlotError::NonPositiveDuration(duration));
    }
    if duration > search_range.duration() {
        return Err(SlotError::DurationExceedsRange {
            duration,
            range: search_range.duration(),
        });
    }
    if max_results == 0 {
        return Err(SlotError::NonPositiveMaxResults);
    }
    Ok(())
}

/// Compute candidate slots from already-fetched busy intervals.
///
/// Intervals that do not overlap `search_range` are ignored. The rest are
/// merged, the gaps of at least `duration` are collected, and each gap is
/// sliced into `duration`-long slots every [`slots::SLOT_STEP_MINUTES`].
/// At most `max_results` slots are returned, earliest first.
pub fn available_slots(
    busy: &[TimeRange],
    search_range: TimeRange,
    duration: Duration,
    max_results: usize,
) -> Vec<TimeRange> {
    let relevant = overlapping(busy, search_range);
    let merged = freebusy::merge_busy_intervals(&relevant);
    let free = freebusy::free_intervals(&merged, search_range, duration);

    debug!(
        busy = relevant.len(),
        merged = merged.len(),
        free = free.len(),
        "computed free intervals"
    );

    slots::candidate_slots(&free, duration)
        .take(max_results)
        .collect()
}

/// Busy intervals a source returned that actually touch `window`.
fn overlapping(busy: &[TimeRange], window: TimeRange) -> Vec<TimeRange> {
    busy.iter().filter(|b| b.overlaps(&window)).copied().collect()
}

/// Finds meeting slots that suit every participant.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine<S> {
    source: S,
}

impl<S: BusyIntervalSource> AvailabilityEngine<S> {
    /// Build an engine reading busy time from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying busy-interval source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Find up to `max_results` slots of exactly `duration` inside
    /// `search_range` during which no participant has a scheduled event.
    ///
    /// Slots are sorted by start time and may overlap each other; they start
    /// every 30 minutes within each free interval. An empty result means the
    /// request was valid but nothing fits.
    ///
    /// # Errors
    /// Validation errors (see [`validate_request`]) are returned before any
    /// lookup. If any participant's lookup fails the whole call fails with
    /// [`SlotError::ParticipantLookupFailed`].
    pub async fn find_available_slots(
        &self,
        participants: &[ParticipantId],
        search_range: TimeRange,
        duration: Duration,
        max_results: usize,
    ) -> Result<Vec<TimeRange>> {
        validate_request(participants, search_range, duration, max_results)?;
        debug!(
            participants = participants.len(),
            range = %search_range,
            minutes = duration.num_minutes(),
            max_results,
            "searching for slots"
        );

        let busy = self.collect_busy(participants, search_range).await?;
        let slots = available_slots(&busy, search_range, duration, max_results);

        debug!(slots = slots.len(), "slot search finished");
        Ok(slots)
    }

    /// Merged busy and free time for `participants` within `window`.
    ///
    /// # Errors
    /// [`SlotError::NoParticipants`] for an empty group, or
    /// [`SlotError::ParticipantLookupFailed`] if a lookup fails.
    pub async fn timeline(
        &self,
        participants: &[ParticipantId],
        window: TimeRange,
    ) -> Result<Timeline> {
        if participants.is_empty() {
            return Err(SlotError::NoParticipants);
        }

        let busy = self.collect_busy(participants, window).await?;
        let merged = freebusy::merge_busy_intervals(&overlapping(&busy, window));
        let free = freebusy::free_intervals(&merged, window, Duration::zero());
        let busy = merged
            .iter()
            .filter_map(|b| b.clamp_to(&window))
            .collect();

        Ok(Timeline { window, busy, free })
    }

    /// Fetch every participant's scheduled busy intervals concurrently.
    ///
    /// All lookups are joined before returning; the first failure cancels the
    /// rest.
    async fn collect_busy(
        &self,
        participants: &[ParticipantId],
        range: TimeRange,
    ) -> Result<Vec<TimeRange>> {
        let lookups = participants.iter().map(|&participant| async move {
            self.source
                .busy_intervals(participant, range, EventStatus::Scheduled)
                .await
                .map_err(|source| {
                    warn!(%participant, error = %source, "busy interval lookup failed");
                    SlotError::ParticipantLookupFailed {
                        participant,
                        source,
                    }
                })
        });

        let per_participant = try_join_all(lookups).await?;
        Ok(per_participant.into_iter().flatten().collect())
    }
}
