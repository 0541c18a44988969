//! # slot-engine
//!
//! Find meeting times that work for everyone.
//!
//! Given a group of participants, a search window and a meeting length, the
//! engine looks up each participant's scheduled events, merges them into one
//! busy timeline, and offers fixed-length candidate slots from the gaps.
//! Candidates start every 30 minutes inside each gap, so they overlap one
//! another on purpose to give the caller choices.
//!
//! ## Quick start
//!
//! ```rust
//! use std::collections::HashMap;
//! use chrono::{Duration, TimeZone, Utc};
//! use slot_engine::{AvailabilityEngine, ParticipantId, TimeRange};
//!
//! # async fn demo() -> slot_engine::Result<()> {
//! let alice = ParticipantId::random();
//! let day = TimeRange::new(
//!     Utc.with_ymd_and_hms(2023, 5, 1, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2023, 5, 1, 17, 0, 0).unwrap(),
//! )?;
//! let busy: HashMap<ParticipantId, Vec<TimeRange>> = HashMap::new();
//!
//! let engine = AvailabilityEngine::new(busy);
//! let slots = engine
//!     .find_available_slots(&[alice], day, Duration::hours(1), 5)
//!     .await?;
//! assert_eq!(slots[0].start(), day.start());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`range`]: `TimeRange`, the half-open UTC interval everything is built from
//! - [`busy`]: `BusyIntervalSource` port, participant ids, event status
//! - [`calendar`]: In-memory users and events implementing the port
//! - [`freebusy`]: Merge busy intervals and compute free gaps
//! - [`slots`]: Slice free gaps into fixed-length candidates
//! - [`availability`]: The engine, plus request validation and slot search
//! - [`error`]: Error types

pub mod availability;
pub mod busy;
pub mod calendar;
pub mod error;
pub mod freebusy;
pub mod range;
pub mod slots;

pub use availability::{
    available_slots, validate_request, AvailabilityEngine, Timeline, DEFAULT_MAX_RESULTS,
};
pub use busy::{BusyIntervalSource, EventStatus, ParticipantId};
pub use calendar::{Attendee, Event, InMemoryCalendar, ResponseStatus, User};
pub use error::{BoxError, CalendarError, Result, SlotError};
pub use freebusy::{free_intervals, merge_busy_intervals};
pub use range::TimeRange;
pub use slots::{candidate_slots, SLOT_STEP_MINUTES};
