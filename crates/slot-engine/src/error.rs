//! Error types for slot-engine operations.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::busy::ParticipantId;

/// Error type returned by [`BusyIntervalSource`](crate::busy::BusyIntervalSource)
/// implementations. The engine wraps it without inspecting it.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from time range construction and slot search.
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid time range: end {end} is earlier than start {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("At least one participant must be specified")]
    NoParticipants,

    #[error("Duration must be greater than zero (got {} min)", .0.num_minutes())]
    NonPositiveDuration(Duration),

    #[error(
        "Duration cannot be longer than search range ({} min > {} min)",
        .duration.num_minutes(),
        .range.num_minutes()
    )]
    DurationExceedsRange { duration: Duration, range: Duration },

    #[error("Maximum results must be greater than zero")]
    NonPositiveMaxResults,

    #[error("Failed to fetch busy intervals for participant {participant}: {source}")]
    ParticipantLookupFailed {
        participant: ParticipantId,
        #[source]
        source: BoxError,
    },
}

/// Violations of the event and participant rules enforced by
/// [`InMemoryCalendar`](crate::calendar::InMemoryCalendar).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CalendarError {
    #[error("{0} cannot be empty")]
    Blank(&'static str),

    #[error("User with ID {0} already exists")]
    DuplicateUser(ParticipantId),

    #[error("User with ID {0} not found")]
    UnknownUser(ParticipantId),

    #[error("Event with ID {0} already exists")]
    DuplicateEvent(Uuid),

    #[error("Event with ID {0} not found")]
    UnknownEvent(Uuid),

    #[error("Event is already cancelled")]
    AlreadyCancelled,

    #[error("Event is already completed")]
    AlreadyCompleted,

    #[error("Cannot complete a cancelled event")]
    CompleteCancelled,

    #[error("Cannot add participant to a cancelled event")]
    AttendCancelled,

    #[error("Cannot remove the organizer from the event")]
    RemoveOrganizer,

    #[error("User {0} is not a participant of this event")]
    NotAttending(ParticipantId),
}

pub type Result<T> = std::result::Result<T, SlotError>;
