//! In-memory users, events and attendance.
//!
//! [`InMemoryCalendar`] is a reference [`BusyIntervalSource`]: a user is busy
//! for every event they organize or attend, regardless of how they responded.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::busy::{BusyIntervalSource, EventStatus, ParticipantId};
use crate::error::{BoxError, CalendarError};
use crate::range::TimeRange;

type CalendarResult<T> = std::result::Result<T, CalendarError>;

fn non_blank(value: String, field: &'static str) -> CalendarResult<String> {
    if value.trim().is_empty() {
        Err(CalendarError::Blank(field))
    } else {
        Ok(value)
    }
}

/// A calendar user. Name and email are never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: ParticipantId,
    name: String,
    email: String,
    username: Option<String>,
}

impl User {
    /// # Errors
    /// [`CalendarError::Blank`] if `name` or `email` is blank.
    pub fn new(
        id: ParticipantId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> CalendarResult<Self> {
        Ok(Self {
            id,
            name: non_blank(name.into(), "Name")?,
            email: non_blank(email.into(), "Email")?,
            username: None,
        })
    }

    /// Attach a login name.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// The user's participant id.
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Login name, if one was set.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

/// A participant's reply to an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Tentative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub user: ParticipantId,
    pub status: ResponseStatus,
    pub note: Option<String>,
}

/// A meeting with an organizer and attendees.
///
/// An `Event` is edited directly only before it is stored. Once inserted into
/// an [`InMemoryCalendar`] it changes through the calendar's methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    id: Uuid,
    title: String,
    description: Option<String>,
    range: TimeRange,
    status: EventStatus,
    organizer: ParticipantId,
    attendees: Vec<Attendee>,
}

impl Event {
    /// Create a scheduled event. The organizer attends as
    /// [`ResponseStatus::Accepted`].
    ///
    /// # Errors
    /// [`CalendarError::Blank`] if `title` is blank.
    pub fn new(
        title: impl Into<String>,
        range: TimeRange,
        organizer: ParticipantId,
    ) -> CalendarResult<Self> {
        Self::with_id(Uuid::new_v4(), title, range, organizer)
    }

    /// Like [`Event::new`] with a caller-chosen id.
    pub fn with_id(
        id: Uuid,
        title: impl Into<String>,
        range: TimeRange,
        organizer: ParticipantId,
    ) -> CalendarResult<Self> {
        Ok(Self {
            id,
            title: non_blank(title.into(), "Title")?,
            description: None,
            range,
            status: EventStatus::Scheduled,
            organizer,
            attendees: vec![Attendee {
                user: organizer,
                status: ResponseStatus::Accepted,
                note: None,
            }],
        })
    }

    /// Attach a free-form description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Event id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Non-blank title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// When the event takes place.
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Current lifecycle state.
    pub fn status(&self) -> EventStatus {
        self.status
    }

    /// The organizing user, always also an attendee.
    pub fn organizer(&self) -> ParticipantId {
        self.organizer
    }

    /// Everyone invited, organizer first.
    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    /// The attendance entry for `user`, if invited.
    pub fn attendee(&self, user: ParticipantId) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.user == user)
    }

    /// True if `user` organizes or attends this event.
    pub fn involves(&self, user: ParticipantId) -> bool {
        self.organizer == user || self.attendee(user).is_some()
    }

    /// Rename, reschedule, and replace the description.
    pub fn update(
        &mut self,
        title: impl Into<String>,
        range: TimeRange,
        description: Option<String>,
    ) -> CalendarResult<()> {
        self.title = non_blank(title.into(), "Title")?;
        self.range = range;
        self.description = description;
        Ok(())
    }

    /// Mark the event cancelled. Fails if it already is.
    pub fn cancel(&mut self) -> CalendarResult<()> {
        if self.status == EventStatus::Cancelled {
            return Err(CalendarError::AlreadyCancelled);
        }
        self.status = EventStatus::Cancelled;
        Ok(())
    }

    /// Mark a scheduled event completed.
    pub fn complete(&mut self) -> CalendarResult<()> {
        match self.status {
            EventStatus::Cancelled => Err(CalendarError::CompleteCancelled),
            EventStatus::Completed => Err(CalendarError::AlreadyCompleted),
            EventStatus::Scheduled => {
                self.status = EventStatus::Completed;
                Ok(())
            }
        }
    }

    /// Invite `user`. Inviting someone already attending returns their
    /// existing entry unchanged. Whether `user` exists is checked when the
    /// event is stored; use [`InMemoryCalendar::add_attendee`] afterwards.
    ///
    /// # Errors
    /// [`CalendarError::AttendCancelled`] on a cancelled event.
    pub fn add_attendee(
        &mut self,
        user: ParticipantId,
        status: ResponseStatus,
    ) -> CalendarResult<&Attendee> {
        if self.status == EventStatus::Cancelled {
            return Err(CalendarError::AttendCancelled);
        }
        let index = match self.attendees.iter().position(|a| a.user == user) {
            Some(index) => index,
            None => {
                self.attendees.push(Attendee {
                    user,
                    status,
                    note: None,
                });
                self.attendees.len() - 1
            }
        };
        Ok(&self.attendees[index])
    }

    /// Returns `false` if `user` was not attending.
    ///
    /// # Errors
    /// [`CalendarError::RemoveOrganizer`] for the organizer.
    pub fn remove_attendee(&mut self, user: ParticipantId) -> CalendarResult<bool> {
        if user == self.organizer {
            return Err(CalendarError::RemoveOrganizer);
        }
        let before = self.attendees.len();
        self.attendees.retain(|a| a.user != user);
        Ok(self.attendees.len() != before)
    }

    /// Record a reply. A `None` note keeps the previous note.
    pub fn set_response(
        &mut self,
        user: ParticipantId,
        status: ResponseStatus,
        note: Option<String>,
    ) -> CalendarResult<()> {
        let attendee = self
            .attendees
            .iter_mut()
            .find(|a| a.user == user)
            .ok_or(CalendarError::NotAttending(user))?;
        attendee.status = status;
        if note.is_some() {
            attendee.note = note;
        }
        Ok(())
    }
}

/// Users and events held in memory.
///
/// Stored events can only be changed through the calendar, so every attendee
/// of a stored event is always a known user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendar {
    users: BTreeMap<ParticipantId, User>,
    events: BTreeMap<Uuid, Event>,
}

impl InMemoryCalendar {
    /// An empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user.
    ///
    /// # Errors
    /// [`CalendarError::DuplicateUser`] if the id is taken.
    pub fn add_user(&mut self, user: User) -> CalendarResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(CalendarError::DuplicateUser(user.id));
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    /// Look up a user by id.
    pub fn user(&self, id: ParticipantId) -> Option<&User> {
        self.users.get(&id)
    }

    /// All users, ordered by id.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    fn known_user(&self, id: ParticipantId) -> CalendarResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(CalendarError::UnknownUser(id))
        }
    }

    fn stored_event(&mut self, id: Uuid) -> CalendarResult<&mut Event> {
        self.events.get_mut(&id).ok_or(CalendarError::UnknownEvent(id))
    }

    /// Store an event whose organizer and attendees are all known users.
    pub fn insert_event(&mut self, event: Event) -> CalendarResult<Uuid> {
        if self.events.contains_key(&event.id) {
            return Err(CalendarError::DuplicateEvent(event.id));
        }
        std::iter::once(event.organizer)
            .chain(event.attendees.iter().map(|a| a.user))
            .try_for_each(|id| self.known_user(id))?;
        let id = event.id;
        self.events.insert(id, event);
        Ok(id)
    }

    /// Look up a stored event by id.
    pub fn event(&self, id: Uuid) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Remove a stored event and hand it back.
    pub fn remove_event(&mut self, id: Uuid) -> CalendarResult<Event> {
        self.events.remove(&id).ok_or(CalendarError::UnknownEvent(id))
    }

    /// See [`Event::update`].
    pub fn update_event(
        &mut self,
        id: Uuid,
        title: impl Into<String>,
        range: TimeRange,
        description: Option<String>,
    ) -> CalendarResult<()> {
        self.stored_event(id)?.update(title, range, description)
    }

    /// See [`Event::cancel`].
    pub fn cancel_event(&mut self, id: Uuid) -> CalendarResult<()> {
        self.stored_event(id)?.cancel()
    }

    /// See [`Event::complete`].
    pub fn complete_event(&mut self, id: Uuid) -> CalendarResult<()> {
        self.stored_event(id)?.complete()
    }

    /// Invite a known user to a stored event.
    ///
    /// # Errors
    /// [`CalendarError::UnknownEvent`], then [`CalendarError::UnknownUser`],
    /// then the rules of [`Event::add_attendee`].
    pub fn add_attendee(
        &mut self,
        event: Uuid,
        user: ParticipantId,
        status: ResponseStatus,
    ) -> CalendarResult<&Attendee> {
        if !self.events.contains_key(&event) {
            return Err(CalendarError::UnknownEvent(event));
        }
        self.known_user(user)?;
        self.stored_event(event)?.add_attendee(user, status)
    }

    /// See [`Event::remove_attendee`].
    pub fn remove_attendee(&mut self, event: Uuid, user: ParticipantId) -> CalendarResult<bool> {
        self.stored_event(event)?.remove_attendee(user)
    }

    /// See [`Event::set_response`].
    pub fn set_response(
        &mut self,
        event: Uuid,
        user: ParticipantId,
        status: ResponseStatus,
        note: Option<String>,
    ) -> CalendarResult<()> {
        self.stored_event(event)?.set_response(user, status, note)
    }

    /// Events `user` organizes or attends that overlap `range`, optionally
    /// restricted to one status, ordered by start time.
    pub fn events_for(
        &self,
        user: ParticipantId,
        range: TimeRange,
        status: Option<EventStatus>,
    ) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .events
            .values()
            .filter(|e| e.involves(user))
            .filter(|e| e.range.overlaps(&range))
            .filter(|e| status.is_none_or(|s| e.status == s))
            .collect();
        events.sort_by_key(|e| e.range);
        events
    }
}

#[async_trait]
impl BusyIntervalSource for InMemoryCalendar {
    async fn busy_intervals(
        &self,
        participant: ParticipantId,
        range: TimeRange,
        status: EventStatus,
    ) -> Result<Vec<TimeRange>, BoxError> {
        Ok(self
            .events_for(participant, range, Some(status))
            .into_iter()
            .map(Event::range)
            .collect())
    }
}
