//! The busy-interval port the engine reads participant schedules through.
//!
//! The engine never sees events, only the [`TimeRange`]s during which a
//! participant is committed. Storage backends implement
//! [`BusyIntervalSource`]; [`InMemoryCalendar`](crate::calendar::InMemoryCalendar)
//! and a plain `HashMap` table ship with the crate.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BoxError;
use crate::range::TimeRange;

/// Opaque participant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// A fresh random (v4) identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ParticipantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for ParticipantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Cancelled,
    Completed,
}

/// Read-only access to participants' committed time.
///
/// Implementations must return only intervals that overlap `range` and belong
/// to events in `status`. The engine always asks for
/// [`EventStatus::Scheduled`], so cancelled events are filtered here rather
/// than by the caller.
#[async_trait]
pub trait BusyIntervalSource: Send + Sync {
    async fn busy_intervals(
        &self,
        participant: ParticipantId,
        range: TimeRange,
        status: EventStatus,
    ) -> Result<Vec<TimeRange>, BoxError>;
}

#[async_trait]
impl<S: BusyIntervalSource + ?Sized> BusyIntervalSource for Arc<S> {
    async fn busy_intervals(
        &self,
        participant: ParticipantId,
        range: TimeRange,
        status: EventStatus,
    ) -> Result<Vec<TimeRange>, BoxError> {
        (**self).busy_intervals(participant, range, status).await
    }
}

#[async_trait]
impl<S: BusyIntervalSource + ?Sized> BusyIntervalSource for &S {
    async fn busy_intervals(
        &self,
        participant: ParticipantId,
        range: TimeRange,
        status: EventStatus,
    ) -> Result<Vec<TimeRange>, BoxError> {
        (**self).busy_intervals(participant, range, status).await
    }
}

/// A fixed busy table. Every entry counts as scheduled; asking for any other
/// status yields nothing. Unknown participants are entirely free.
#[async_trait]
impl BusyIntervalSource for HashMap<ParticipantId, Vec<TimeRange>> {
    async fn busy_intervals(
        &self,
        participant: ParticipantId,
        range: TimeRange,
        status: EventStatus,
    ) -> Result<Vec<TimeRange>, BoxError> {
        if status != EventStatus::Scheduled {
            return Ok(Vec::new());
        }
        Ok(self
            .get(&participant)
            .map(|busy| busy.iter().filter(|b| b.overlaps(&range)).copied().collect())
            .unwrap_or_default())
    }
}
